//! A single directory node (C4): a children map guarded by its own multi-mode lock.
//!
//! `Node` itself holds the children behind an `UnsafeCell`, the same shape as the
//! hand-rolled `RwLock<T>` exercises in the reference pack (data cell + external lock +
//! `Deref`/`DerefMut` guards that release on `Drop`), specialized to [`DirLock`]'s three modes
//! instead of a plain two-mode reader/writer split.

use std::cell::UnsafeCell;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::map::ChildMap;
use crate::sync::DirLock;

/// A directory: a children map plus the lock that serializes access to it.
pub struct Node {
    lock: DirLock,
    children: UnsafeCell<ChildMap>,
}

// SAFETY: all access to `children` is mediated by `lock`, which admits at most one writer (or
// one remover, from quiescence) at a time, and any number of readers with no concurrent writer.
unsafe impl Send for Node {}
unsafe impl Sync for Node {}

impl Node {
    pub fn new(lock: DirLock, children: ChildMap) -> Self {
        Node {
            lock,
            children: UnsafeCell::new(children),
        }
    }

    /// A freshly created, empty directory with a neutral lock.
    pub fn empty() -> Self {
        Node::new(DirLock::new(), ChildMap::new())
    }

    /// Blocks until `node` is quiescent and held in remove mode (no `after_remove`: see
    /// `DirLock::before_remove`).
    pub fn lock_remove(node: &Arc<Node>) {
        node.lock.before_remove();
    }

    /// Consumes a remove-mode-held, sole-owner `Arc<Node>`, extracting its children map so it
    /// can be handed to a freshly constructed node (the identity-replacement step of `move`,
    /// §4.6.4).
    ///
    /// # Panics
    /// Panics if another strong reference to `node` survives. Remove mode's quiescence guarantee
    /// (§4.1/I5) means this can only happen if an invariant has already been violated elsewhere;
    /// per §4.1's fatal-primitive-failure model, that is unrecoverable.
    pub fn into_children(node: Arc<Node>) -> ChildMap {
        let owned = Arc::try_unwrap(node)
            .unwrap_or_else(|_| panic!("node held in remove mode must have a single owner"));
        owned.children.into_inner()
    }

    /// Number of children. Caller must hold `self` in remove mode (§4.1): that guarantees total
    /// quiescence, so no concurrent reader/writer/remover can be touching the children map.
    pub unsafe fn children_len_unchecked(&self) -> usize {
        (*self.children.get()).len()
    }

    /// A snapshot of the current children. Same precondition as `children_len_unchecked`.
    pub unsafe fn children_unchecked(&self) -> Vec<Arc<Node>> {
        (*self.children.get())
            .iter()
            .map(|(_, child)| child.clone())
            .collect()
    }
}

/// Acquires `node` in read mode, returning an RAII guard that releases on `Drop`.
pub fn lock_read(node: &Arc<Node>) -> ReadGuard {
    node.lock.before_read();
    ReadGuard { node: node.clone() }
}

/// Acquires `node` in write mode, returning an RAII guard that releases on `Drop`.
pub fn lock_write(node: &Arc<Node>) -> WriteGuard {
    node.lock.before_write();
    WriteGuard { node: node.clone() }
}

/// A held read-mode lock on a node; derefs to its children map.
pub struct ReadGuard {
    node: Arc<Node>,
}

impl ReadGuard {
    /// The node this guard locks.
    pub fn node(&self) -> &Arc<Node> {
        &self.node
    }
}

impl Deref for ReadGuard {
    type Target = ChildMap;
    fn deref(&self) -> &ChildMap {
        // SAFETY: a held read lock excludes any writer/remover touching `children`.
        unsafe { &*self.node.children.get() }
    }
}

impl Drop for ReadGuard {
    fn drop(&mut self) {
        self.node.lock.after_read();
    }
}

/// A held write-mode lock on a node; derefs (mutably) to its children map.
pub struct WriteGuard {
    node: Arc<Node>,
}

impl WriteGuard {
    /// The node this guard locks.
    pub fn node(&self) -> &Arc<Node> {
        &self.node
    }
}

impl Deref for WriteGuard {
    type Target = ChildMap;
    fn deref(&self) -> &ChildMap {
        // SAFETY: a held write lock excludes any other reader/writer/remover.
        unsafe { &*self.node.children.get() }
    }
}

impl DerefMut for WriteGuard {
    fn deref_mut(&mut self) -> &mut ChildMap {
        // SAFETY: see above.
        unsafe { &mut *self.node.children.get() }
    }
}

impl Drop for WriteGuard {
    fn drop(&mut self) {
        self.node.lock.after_write();
    }
}
