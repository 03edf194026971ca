//! The four externally exposed operations (C6): `list`, `create`, `remove`, `move_dir`.
//!
//! Each is a close translation of the source implementation's `tree_list`/`tree_create`/
//! `tree_remove`/`tree_move`. `move_dir` additionally resolves the open questions noted in
//! §9/DESIGN.md: O1 (no `after_remove` on the abandoned `ENOTEMPTY` path) and O2 (target's
//! parent is resolved, and checked for `EEXIST`, before source's parent).

use std::sync::Arc;

use log::{debug, trace};

use crate::descend;
use crate::error::{TreeError, TreeResult};
use crate::node::{Node, WriteGuard};
use crate::path::{self, Limits};
use crate::sync::DirLock;

/// §4.6.1.
pub fn list(root: &Arc<Node>, path: &str, limits: &Limits) -> TreeResult<String> {
    if !path::is_valid(path, limits) {
        return Err(TreeError::InvalidArgument);
    }
    debug!("list {path}");
    let guard = descend::descend_read(root, path).ok_or(TreeError::NotFound)?;
    Ok(path::map_contents_string(guard.names()))
}

/// §4.6.2.
pub fn create(root: &Arc<Node>, path: &str, limits: &Limits) -> TreeResult<()> {
    if !path::is_valid(path, limits) {
        return Err(TreeError::InvalidArgument);
    }
    if path == path::ROOT {
        return Err(TreeError::AlreadyExists);
    }
    debug!("create {path}");
    let (mut parent, child) = descend::lock_parent_write(root, path)?;
    if parent.insert(child, Arc::new(Node::empty())) {
        Ok(())
    } else {
        Err(TreeError::AlreadyExists)
    }
}

/// §4.6.3.
pub fn remove(root: &Arc<Node>, path: &str, limits: &Limits) -> TreeResult<()> {
    if !path::is_valid(path, limits) {
        return Err(TreeError::InvalidArgument);
    }
    if path == path::ROOT {
        return Err(TreeError::Busy);
    }
    debug!("remove {path}");
    let (mut parent, child_name) = descend::lock_parent_write(root, path)?;
    let child = parent.get(&child_name).ok_or(TreeError::NotFound)?;

    // Blocks until the child's whole subtree is quiescent (§4.1, I5).
    Node::lock_remove(&child);

    // SAFETY: `child` is held in remove mode, which is admitted only from total quiescence
    // (§4.1) — no reader, writer, or concurrent remover can be touching its children map.
    let nonempty = unsafe { child.children_len_unchecked() } > 0;
    if nonempty {
        // O1: abandon the remove-mode acquisition without an `after_remove`. No counter was
        // mutated by `before_remove`, so the child's lock is left in a consistent state for
        // the next caller.
        return Err(TreeError::NotEmpty);
    }

    parent.remove(&child_name);
    // `child` was the only other strong reference (the map entry just dropped its own); this
    // drop runs the child's (empty) children map destructor, i.e. destroys it.
    drop(child);
    Ok(())
}

/// §4.6.4.
pub fn move_dir(root: &Arc<Node>, source: &str, target: &str, limits: &Limits) -> TreeResult<()> {
    if !path::is_valid(source, limits) || !path::is_valid(target, limits) {
        return Err(TreeError::InvalidArgument);
    }
    if source == path::ROOT {
        return Err(TreeError::Busy);
    }
    if target == path::ROOT {
        return Err(TreeError::AlreadyExists);
    }
    if source == target {
        return Ok(());
    }
    if path::is_subdirectory(source, target) {
        return Err(TreeError::TargetInsideSource);
    }
    debug!("move {source} -> {target}");

    let (sp, source_name) = path::parent_of(source);
    let (tp, target_name) = path::parent_of(target);
    let lcp = path::longest_common_path(&sp, &tp);

    // Step 1: lock the LCA (`L`) in write mode.
    let mut lca_guard = Some(descend::lock_node_write(root, &lcp)?);

    // Step 3 (target-first, per O2): resolve target's parent (`T`). `L` is already held, so its
    // immediate child heading toward `T` is looked up directly from `L`'s own map (no new lock on
    // `L` itself — re-locking it here would self-deadlock); only that child gets locked, and the
    // hand-over-hand descent continues from there.
    let mut target_parent: Option<WriteGuard> = if tp == lcp {
        None
    } else {
        let suffix = path::remove_prefix(&lcp, &tp);
        let (heading, rest) =
            path::split(suffix).expect("target's parent strictly below the LCA has a component");
        let child = lca_guard
            .as_ref()
            .unwrap()
            .get(&heading)
            .ok_or(TreeError::NotFound)?;
        Some(descend::descend_write_from(&child, &rest).ok_or(TreeError::NotFound)?)
    };

    if parent_view(&target_parent, &lca_guard).contains(&target_name) {
        return Err(TreeError::AlreadyExists);
    }

    // Step 2: resolve source's parent (`S`), the same way.
    let mut source_parent: Option<WriteGuard> = if sp == lcp {
        None
    } else {
        let suffix = path::remove_prefix(&lcp, &sp);
        let (heading, rest) =
            path::split(suffix).expect("source's parent strictly below the LCA has a component");
        let child = lca_guard
            .as_ref()
            .unwrap()
            .get(&heading)
            .ok_or(TreeError::NotFound)?;
        Some(descend::descend_write_from(&child, &rest).ok_or(TreeError::NotFound)?)
    };

    let source_node = match parent_view(&source_parent, &lca_guard).get(&source_name) {
        Some(node) => node,
        None => return Err(TreeError::NotFound),
    };

    // Step 4: once both S and T are pinned independently of L, L's serializing job is done.
    if target_parent.is_some() && source_parent.is_some() {
        trace!("move: releasing LCA early, both parents resolved separately");
        lca_guard = None;
    }

    // Drain the whole source subtree to quiescence before the identity swap (§4.6.4).
    lock_subtree_remove(&source_node);

    // Detach from the old parent first, so the only remaining strong reference is `source_node`
    // itself (required for the identity replacement below to take ownership of the children).
    parent_view_mut(&mut source_parent, &mut lca_guard).remove(&source_name);

    let children = Node::into_children(source_node);
    let replacement = Arc::new(Node::new(DirLock::new(), children));
    parent_view_mut(&mut target_parent, &mut lca_guard).insert(target_name, replacement);

    Ok(())
}

/// Recursively acquires `node` and every node in its subtree in remove mode (pre-order: a
/// child can only be reached through its parent, which is already remove-locked, so no other
/// thread can be entering a child concurrently with this walk).
fn lock_subtree_remove(node: &Arc<Node>) {
    Node::lock_remove(node);
    // SAFETY: `node` is now held in remove mode, i.e. quiescent; its children map cannot change
    // underneath us.
    let children = unsafe { node.children_unchecked() };
    for child in children {
        lock_subtree_remove(&child);
    }
}

fn parent_view<'a>(separate: &'a Option<WriteGuard>, lca: &'a Option<WriteGuard>) -> &'a WriteGuard {
    separate
        .as_ref()
        .or(lca.as_ref())
        .expect("a parent guard (separate or LCA) must be held")
}

fn parent_view_mut<'a>(
    separate: &'a mut Option<WriteGuard>,
    lca: &'a mut Option<WriteGuard>,
) -> &'a mut WriteGuard {
    if separate.is_some() {
        separate.as_mut().unwrap()
    } else {
        lca.as_mut()
            .expect("a parent guard (separate or LCA) must be held")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> Arc<Node> {
        Arc::new(Node::empty())
    }

    #[test]
    fn create_then_list_root() {
        let root = root();
        let limits = Limits::default();
        assert_eq!(create(&root, "/a/", &limits), Ok(()));
        assert_eq!(list(&root, "/", &limits), Ok("a".to_string()));
        assert_eq!(list(&root, "/a/", &limits), Ok(String::new()));
    }

    #[test]
    fn create_duplicate_is_eexist() {
        let root = root();
        let limits = Limits::default();
        create(&root, "/a/", &limits).unwrap();
        assert_eq!(create(&root, "/a/", &limits), Err(TreeError::AlreadyExists));
    }

    #[test]
    fn create_missing_parent_is_enoent() {
        let root = root();
        let limits = Limits::default();
        assert_eq!(
            create(&root, "/a/b/c/", &limits),
            Err(TreeError::NotFound)
        );
    }

    #[test]
    fn remove_root_is_ebusy() {
        let root = root();
        let limits = Limits::default();
        assert_eq!(remove(&root, "/", &limits), Err(TreeError::Busy));
    }

    #[test]
    fn remove_nonempty_then_drain() {
        let root = root();
        let limits = Limits::default();
        create(&root, "/a/", &limits).unwrap();
        create(&root, "/a/b/", &limits).unwrap();
        create(&root, "/a/b/c/", &limits).unwrap();

        assert_eq!(remove(&root, "/a/", &limits), Err(TreeError::NotEmpty));
        assert_eq!(remove(&root, "/a/b/c/", &limits), Ok(()));
        assert_eq!(remove(&root, "/a/b/", &limits), Ok(()));
        assert_eq!(remove(&root, "/a/", &limits), Ok(()));
        assert_eq!(list(&root, "/", &limits), Ok(String::new()));
    }

    #[test]
    fn move_reparents_subtree() {
        let root = root();
        let limits = Limits::default();
        create(&root, "/a/", &limits).unwrap();
        create(&root, "/b/", &limits).unwrap();
        create(&root, "/a/x/", &limits).unwrap();

        assert_eq!(move_dir(&root, "/a/x/", "/b/y/", &limits), Ok(()));
        assert_eq!(list(&root, "/a/", &limits), Ok(String::new()));
        assert_eq!(list(&root, "/b/", &limits), Ok("y".to_string()));
    }

    #[test]
    fn move_noop_on_self() {
        let root = root();
        let limits = Limits::default();
        create(&root, "/a/", &limits).unwrap();
        assert_eq!(move_dir(&root, "/a/", "/a/", &limits), Ok(()));
    }

    #[test]
    fn move_into_own_subtree_is_rejected() {
        let root = root();
        let limits = Limits::default();
        create(&root, "/a/", &limits).unwrap();
        assert_eq!(
            move_dir(&root, "/a/", "/a/sub/", &limits),
            Err(TreeError::TargetInsideSource)
        );
    }

    #[test]
    fn move_across_disjoint_parents_locks_lca() {
        let root = root();
        let limits = Limits::default();
        create(&root, "/p/", &limits).unwrap();
        create(&root, "/p/a/", &limits).unwrap();
        create(&root, "/p/b/", &limits).unwrap();
        create(&root, "/p/a/x/", &limits).unwrap();

        assert_eq!(move_dir(&root, "/p/a/x/", "/p/b/x/", &limits), Ok(()));
        assert_eq!(list(&root, "/p/a/", &limits), Ok(String::new()));
        assert_eq!(list(&root, "/p/b/", &limits), Ok("x".to_string()));
    }

    #[test]
    fn move_target_already_exists() {
        let root = root();
        let limits = Limits::default();
        create(&root, "/a/", &limits).unwrap();
        create(&root, "/a/x/", &limits).unwrap();
        create(&root, "/b/", &limits).unwrap();
        create(&root, "/b/x/", &limits).unwrap();

        assert_eq!(
            move_dir(&root, "/a/x/", "/b/x/", &limits),
            Err(TreeError::AlreadyExists)
        );
    }
}
