//! String-keyed child map (C2).
//!
//! A thin newtype over `std::collections::HashMap<String, Arc<Node>>`. Values are `Arc`-shared
//! so a descent can clone a child out of its parent's map and drop the parent's lock while
//! continuing to work against the child — access to the child is still fully serialized by the
//! child's own [`crate::sync::DirLock`], never by the refcount.

use std::collections::HashMap;
use std::sync::Arc;

use crate::node::Node;

/// Mapping from component name to child node.
#[derive(Default)]
pub struct ChildMap {
    inner: HashMap<String, Arc<Node>>,
}

impl ChildMap {
    pub fn new() -> Self {
        ChildMap {
            inner: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<Node>> {
        self.inner.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    /// Inserts `child` under `name`. Returns `false` (and does not insert) if `name` was
    /// already occupied.
    pub fn insert(&mut self, name: String, child: Arc<Node>) -> bool {
        if self.inner.contains_key(&name) {
            return false;
        }
        self.inner.insert(name, child);
        true
    }

    /// Removes `name`, returning its node if it existed.
    pub fn remove(&mut self, name: &str) -> Option<Arc<Node>> {
        self.inner.remove(name)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// All child names, in unspecified order (callers needing a deterministic order should sort).
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    /// All `(name, node)` pairs, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<Node>)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::DirLock;

    fn leaf() -> Arc<Node> {
        Arc::new(Node::new(DirLock::new(), ChildMap::new()))
    }

    #[test]
    fn insert_rejects_duplicate_name() {
        let mut map = ChildMap::new();
        assert!(map.insert("a".to_string(), leaf()));
        assert!(!map.insert("a".to_string(), leaf()));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn remove_reports_existence() {
        let mut map = ChildMap::new();
        assert!(map.remove("a").is_none());
        map.insert("a".to_string(), leaf());
        assert!(map.remove("a").is_some());
        assert!(map.is_empty());
    }
}
