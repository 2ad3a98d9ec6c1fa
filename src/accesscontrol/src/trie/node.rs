//! Trie node storage

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Handle to a node inside a trie's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node of every trie
    pub const ROOT: NodeId = NodeId(0);
}

/// A single scope segment and the actions granted exactly at it
///
/// Actions are not copied into descendants; queries inherit them while
/// walking down from the root.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) path: String,
    pub(crate) root: bool,
    pub(crate) actions: HashSet<Arc<str>>,
    pub(crate) children: HashMap<String, NodeId>,
}

impl Node {
    pub(crate) fn root() -> Self {
        Self {
            path: String::new(),
            root: true,
            actions: HashSet::new(),
            children: HashMap::new(),
        }
    }

    pub(crate) fn child(path: &str) -> Self {
        Self {
            path: path.to_string(),
            root: false,
            actions: HashSet::new(),
            children: HashMap::new(),
        }
    }

    /// Segment this node represents (empty for the root)
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether this is the trie's root
    pub fn is_root(&self) -> bool {
        self.root
    }

    /// Whether `action` is granted exactly at this node
    pub fn grants(&self, action: &str) -> bool {
        self.actions.contains(action)
    }

    /// Actions granted exactly at this node
    pub fn actions(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(|a| &**a)
    }

    /// Handle of the child keyed by `segment`
    pub fn child_id(&self, segment: &str) -> Option<NodeId> {
        self.children.get(segment).copied()
    }

    /// Handles of all immediate children
    pub fn child_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.values().copied()
    }

    /// Whether this node has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
