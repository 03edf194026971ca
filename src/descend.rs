//! Hand-over-hand descent (C5).
//!
//! A direct translation of the source implementation's `get_directory_tree`: walk the path one
//! component at a time, always holding the current node's lock while acquiring the next one,
//! and releasing the current node only once the next is held. `as_writer` becomes two
//! functions — `descend_read`/`descend_write_from` — rather than a boolean, since the guard
//! types returned differ (`ReadGuard` vs `WriteGuard`).

use std::sync::Arc;

use crate::error::TreeError;
use crate::node::{self, Node, ReadGuard, WriteGuard};
use crate::path;

/// Descend from `root` along `path` in read mode, returning the target node still read-locked,
/// or `None` if any component along the way does not exist (no locks held on return).
pub fn descend_read(root: &Arc<Node>, path: &str) -> Option<ReadGuard> {
    let mut guard = node::lock_read(root);
    let mut remaining = path.to_string();
    while let Some((component, rest)) = crate::path::split(&remaining) {
        let next = guard.get(&component)?;
        let next_guard = node::lock_read(&next);
        drop(guard);
        guard = next_guard;
        remaining = rest;
    }
    Some(guard)
}

/// Locks `start` in write mode, then continues hand-over-hand along `path` (relative to `start`)
/// in write mode, returning the target node still write-locked, or `None` if a component is
/// missing (no locks held on return).
///
/// `start` itself must not already be held in write mode by the caller — this function's first
/// step is to lock it. `move`'s S/T descents rely on this: they look up the LCA's relevant child
/// from the LCA's own (already-held) map without locking it, and call this function on that
/// unlocked child, never on the LCA node itself.
pub fn descend_write_from(start: &Arc<Node>, path: &str) -> Option<WriteGuard> {
    let mut guard = node::lock_write(start);
    let mut remaining = path.to_string();
    while let Some((component, rest)) = crate::path::split(&remaining) {
        let next = guard.get(&component)?;
        let next_guard = node::lock_write(&next);
        drop(guard);
        guard = next_guard;
        remaining = rest;
    }
    Some(guard)
}

/// Acquire the node at `path` in write mode: if `path` is the root, lock it directly; otherwise
/// descend in read mode to its parent, then hand-over-hand acquire it in write mode, releasing
/// the parent once the child is held.
///
/// This is the "descend to grandparent in read, acquire parent in write" pattern shared by
/// `create`, `remove`, and the LCA step of `move`.
pub fn lock_node_write(root: &Arc<Node>, path: &str) -> Result<WriteGuard, TreeError> {
    if path == path::ROOT {
        return Ok(node::lock_write(root));
    }
    let (parent_path, name) = path::parent_of(path);
    let parent_guard = descend_read(root, &parent_path).ok_or(TreeError::NotFound)?;
    let child = parent_guard.get(&name).ok_or(TreeError::NotFound)?;
    let guard = node::lock_write(&child);
    drop(parent_guard);
    Ok(guard)
}

/// Acquire the parent directory of `path` in write mode, returning `(parent_guard,
/// last_component)`. `path` must not be the root.
pub fn lock_parent_write(root: &Arc<Node>, path: &str) -> Result<(WriteGuard, String), TreeError> {
    let (parent_path, child) = path::parent_of(path);
    let guard = lock_node_write(root, &parent_path)?;
    Ok((guard, child))
}
