//! Integration tests exercising [`dirtree::Tree`] through its public API only.

use dirtree::{Tree, TreeError};

#[test]
fn create_and_list_round_trip() {
    let tree = Tree::new();
    tree.create("/home/").unwrap();
    tree.create("/home/user/").unwrap();
    tree.create("/home/admin/").unwrap();
    assert_eq!(tree.list("/home/").unwrap(), "admin,user");
    assert_eq!(tree.list("/home/user/").unwrap(), "");
}

#[test]
fn create_duplicate_is_eexist() {
    let tree = Tree::new();
    tree.create("/a/").unwrap();
    assert_eq!(tree.create("/a/"), Err(TreeError::AlreadyExists));
}

#[test]
fn create_root_is_always_eexist() {
    let tree = Tree::new();
    assert_eq!(tree.create("/"), Err(TreeError::AlreadyExists));
}

#[test]
fn create_missing_intermediate_is_enoent() {
    let tree = Tree::new();
    assert_eq!(tree.create("/a/b/c/"), Err(TreeError::NotFound));
}

#[test]
fn invalid_path_shapes_are_einval() {
    let tree = Tree::new();
    for bad in ["", "a", "/a", "a/", "/A/", "//", "/a//b/", "/a1/"] {
        assert_eq!(
            tree.create(bad),
            Err(TreeError::InvalidArgument),
            "expected {bad:?} to be rejected"
        );
    }
}

#[test]
fn remove_ordering_matters() {
    let tree = Tree::new();
    tree.create("/a/").unwrap();
    tree.create("/a/b/").unwrap();

    assert_eq!(tree.remove("/a/"), Err(TreeError::NotEmpty));
    tree.remove("/a/b/").unwrap();
    tree.remove("/a/").unwrap();
    assert_eq!(tree.list("/").unwrap(), "");
}

#[test]
fn remove_root_is_ebusy() {
    let tree = Tree::new();
    assert_eq!(tree.remove("/"), Err(TreeError::Busy));
}

#[test]
fn remove_missing_is_enoent() {
    let tree = Tree::new();
    assert_eq!(tree.remove("/missing/"), Err(TreeError::NotFound));
}

#[test]
fn move_relocates_a_subtree() {
    let tree = Tree::new();
    tree.create("/src/").unwrap();
    tree.create("/src/inner/").unwrap();
    tree.create("/src/inner/leaf/").unwrap();
    tree.create("/dst/").unwrap();

    tree.move_dir("/src/inner/", "/dst/inner/").unwrap();

    assert_eq!(tree.list("/src/").unwrap(), "");
    assert_eq!(tree.list("/dst/").unwrap(), "inner");
    assert_eq!(tree.list("/dst/inner/").unwrap(), "leaf");
}

#[test]
fn move_rename_within_same_parent() {
    let tree = Tree::new();
    tree.create("/a/").unwrap();
    tree.create("/a/old/").unwrap();

    tree.move_dir("/a/old/", "/a/new/").unwrap();
    assert_eq!(tree.list("/a/").unwrap(), "new");
}

#[test]
fn move_is_noop_when_source_equals_target() {
    let tree = Tree::new();
    tree.create("/a/").unwrap();
    tree.move_dir("/a/", "/a/").unwrap();
    assert_eq!(tree.list("/").unwrap(), "a");
}

#[test]
fn move_root_source_is_ebusy() {
    let tree = Tree::new();
    tree.create("/a/").unwrap();
    assert_eq!(tree.move_dir("/", "/a/b/"), Err(TreeError::Busy));
}

#[test]
fn move_root_target_is_eexist() {
    let tree = Tree::new();
    tree.create("/a/").unwrap();
    assert_eq!(tree.move_dir("/a/", "/"), Err(TreeError::AlreadyExists));
}

#[test]
fn move_into_own_subtree_is_rejected() {
    let tree = Tree::new();
    tree.create("/a/").unwrap();
    tree.create("/a/b/").unwrap();
    assert_eq!(
        tree.move_dir("/a/", "/a/b/c/"),
        Err(TreeError::TargetInsideSource)
    );
}

#[test]
fn move_existing_target_is_eexist() {
    let tree = Tree::new();
    tree.create("/a/").unwrap();
    tree.create("/b/").unwrap();
    assert_eq!(tree.move_dir("/a/", "/b/"), Err(TreeError::AlreadyExists));
}

#[test]
fn move_missing_source_is_enoent() {
    let tree = Tree::new();
    tree.create("/dst/").unwrap();
    assert_eq!(
        tree.move_dir("/missing/", "/dst/x/"),
        Err(TreeError::NotFound)
    );
}

#[test]
fn move_missing_target_parent_is_enoent() {
    let tree = Tree::new();
    tree.create("/a/").unwrap();
    assert_eq!(
        tree.move_dir("/a/", "/nope/a/"),
        Err(TreeError::NotFound)
    );
}

#[test]
fn custom_limits_reject_overlong_paths() {
    let tree = Tree::with_limits(dirtree::Limits {
        max_component_len: 3,
        max_path_len: 32,
    });
    tree.create("/abc/").unwrap();
    assert_eq!(tree.create("/abcd/"), Err(TreeError::InvalidArgument));
}
