//! Scope trie
//!
//! A hierarchical index over granted scopes. Each node is one scope segment
//! and holds the actions granted exactly there; descendants inherit those
//! actions at query time.
//!
//! # Architecture
//!
//! ```text
//! permissions → TrieBuilder → Trie (read-only)
//!                               ├─ has_access   (path descent, stop on first grant)
//!                               ├─ identifiers  (path descent + prefix walk)
//!                               └─ metadata     (path descent, union of grants)
//! ```
//!
//! # Example
//!
//! ```
//! use cretoai_accesscontrol::{Permission, Trie};
//!
//! let trie = Trie::from_permissions(&[
//!     Permission::new("datasources:read", "datasources:*"),
//!     Permission::new("datasources:write", "datasources:uid:123"),
//! ]);
//!
//! assert!(trie.has_access("datasources:read", "datasources:uid:123"));
//!
//! let metadata = trie.metadata("datasources:uid:123");
//! assert_eq!(metadata.len(), 2);
//! ```

mod builder;
mod dump;
mod node;
mod walk;


pub use builder::TrieBuilder;
pub use node::{Node, NodeId};
pub use walk::PathWalk;

use crate::config::TrieConfig;
use crate::types::Metadata;

use std::collections::HashSet;
use std::sync::Arc;

/// Result of an identifier enumeration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Identifiers {
    /// The action is granted on the prefix itself or one of its ancestors.
    /// Every identifier under the prefix is implicitly included and `ids`
    /// is left empty.
    pub has_wildcard: bool,

    /// Identifiers directly under the prefix that grant the action, sorted
    ///
    /// Children holding only other actions are excluded, and so are children
    /// whose grants for this action all sit deeper (`res:3:sub` does not make
    /// `3` an identifier under `res`).
    pub ids: Vec<String>,
}

/// Read-only permission index built by [`TrieBuilder`]
///
/// Safe to share across threads; no query mutates it.
#[derive(Debug, Clone)]
pub struct Trie {
    pub(crate) config: TrieConfig,
    pub(crate) nodes: Vec<Node>,
    pub(crate) actions: HashSet<Arc<str>>,
}

impl Trie {
    /// Root node (the empty scope)
    pub fn root(&self) -> &Node {
        self.node(NodeId::ROOT)
    }

    /// Node behind a handle obtained from this trie
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range for this trie. Use [`Trie::get`] for
    /// handles that may come from another trie.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Node behind `id`, or `None` if this trie has no such node
    ///
    /// A handle from another trie that happens to be in range resolves to
    /// an unrelated node.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Total number of nodes, including the root
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Scope syntax this trie was built with
    pub fn config(&self) -> &TrieConfig {
        &self.config
    }

    /// Whether `action` was granted on any scope, or without one
    pub fn has_action(&self, action: &str) -> bool {
        self.actions.contains(action)
    }

    /// Every action ever inserted
    pub fn actions(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(|a| &**a)
    }

    /// Checks whether `action` is granted on `scope`
    ///
    /// A grant on any ancestor of `scope` covers it. An empty `scope` asks
    /// whether the action is held at all.
    pub fn has_access(&self, action: &str, scope: &str) -> bool {
        if scope.is_empty() {
            return self.has_action(action);
        }

        if !self.has_action(action) {
            return false;
        }

        self.walk(scope).any(|node| node.grants(action))
    }

    /// Lists identifiers directly under `prefix` that grant `action`
    ///
    /// When the action is already granted on `prefix` or an ancestor,
    /// returns `has_wildcard = true` and no ids: the caller can skip
    /// filtering altogether.
    pub fn identifiers(&self, action: &str, prefix: &str) -> Identifiers {
        if !self.has_action(action) {
            return Identifiers::default();
        }

        if self.walk(prefix).any(|node| node.grants(action)) {
            return Identifiers {
                has_wildcard: true,
                ids: Vec::new(),
            };
        }

        let mut ids: Vec<String> = self
            .walk_prefix(prefix)
            .filter(|child| child.grants(action))
            .map(|child| child.path().to_string())
            .collect();
        ids.sort_unstable();

        Identifiers {
            has_wildcard: false,
            ids,
        }
    }

    /// Every action granted on `scope` or one of its ancestors
    pub fn metadata(&self, scope: &str) -> Metadata {
        let mut metadata = Metadata::new();
        for node in self.walk(scope) {
            for action in node.actions() {
                if !metadata.contains_key(action) {
                    metadata.insert(action.to_string(), true);
                }
            }
        }
        metadata
    }
}
