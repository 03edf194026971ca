//! An in-memory, thread-safe hierarchical directory namespace.
//!
//! [`Tree`] exposes four operations — [`Tree::list`], [`Tree::create`], [`Tree::remove`],
//! [`Tree::move_dir`] — over a namespace of `/`-separated, lowercase-only paths. Concurrent
//! access is serialized per-directory by a hand-rolled reader/writer/remover lock ([`sync`]);
//! callers never see a lock failure, only the POSIX-flavored [`TreeError`] taxonomy that the
//! namespace operations themselves can produce.
//!
//! ```
//! use dirtree::Tree;
//!
//! let tree = Tree::new();
//! tree.create("/a/").unwrap();
//! tree.create("/a/b/").unwrap();
//! assert_eq!(tree.list("/a/").unwrap(), "b");
//! ```

mod descend;
mod error;
mod map;
mod node;
mod ops;
mod path;
mod sync;

pub use error::{TreeError, TreeResult};
pub use path::Limits;

use std::sync::Arc;

use node::Node;

/// A hierarchical namespace of directories, rooted at `/`.
///
/// Cheaply cloneable would require wrapping in an `Arc` at the call site; `Tree` itself holds
/// its root behind one already, but exposes no `Clone` — each `Tree` owns its own namespace.
pub struct Tree {
    root: Arc<Node>,
    limits: Limits,
}

impl Tree {
    /// An empty namespace (just `/`), using the default path limits (§3).
    pub fn new() -> Self {
        Tree::with_limits(Limits::default())
    }

    /// An empty namespace with custom path-length limits.
    pub fn with_limits(limits: Limits) -> Self {
        Tree {
            root: Arc::new(Node::empty()),
            limits,
        }
    }

    /// Lists the names of `path`'s immediate children, comma-joined and sorted.
    ///
    /// # Errors
    /// [`TreeError::InvalidArgument`] if `path` fails validation; [`TreeError::NotFound`] if any
    /// component of `path` does not exist.
    pub fn list(&self, path: &str) -> TreeResult<String> {
        ops::list(&self.root, path, &self.limits)
    }

    /// Creates a new, empty directory at `path`.
    ///
    /// # Errors
    /// [`TreeError::InvalidArgument`] if `path` fails validation (this includes `path == "/"`,
    /// which additionally always yields [`TreeError::AlreadyExists`] instead); [`TreeError::NotFound`]
    /// if an intermediate component is missing; [`TreeError::AlreadyExists`] if `path` already
    /// names a directory.
    pub fn create(&self, path: &str) -> TreeResult<()> {
        ops::create(&self.root, path, &self.limits)
    }

    /// Removes the (empty) directory at `path`.
    ///
    /// # Errors
    /// [`TreeError::InvalidArgument`] if `path` fails validation; [`TreeError::Busy`] if
    /// `path == "/"`; [`TreeError::NotFound`] if `path` does not exist; [`TreeError::NotEmpty`]
    /// if it has children.
    pub fn remove(&self, path: &str) -> TreeResult<()> {
        ops::remove(&self.root, path, &self.limits)
    }

    /// Moves the subtree rooted at `source` so it is rooted at `target` instead.
    ///
    /// A no-op (returns `Ok`) if `source == target`.
    ///
    /// # Errors
    /// [`TreeError::InvalidArgument`] if either path fails validation; [`TreeError::Busy`] if
    /// `source == "/"`; [`TreeError::AlreadyExists`] if `target == "/"` or `target` already
    /// exists; [`TreeError::NotFound`] if `source`, or an intermediate component of either path,
    /// does not exist; [`TreeError::TargetInsideSource`] if `target` lies within `source`.
    pub fn move_dir(&self, source: &str, target: &str) -> TreeResult<()> {
        ops::move_dir(&self.root, source, target, &self.limits)
    }
}

impl Default for Tree {
    fn default() -> Self {
        Tree::new()
    }
}

static_assertions::assert_impl_all!(Tree: Send, Sync);
