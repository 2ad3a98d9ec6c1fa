//! Trie construction
//!
//! The builder is the only place nodes are created. Once [`TrieBuilder::build`]
//! returns, the trie is read-only; a changed permission set means building a
//! new trie.

use super::node::{Node, NodeId};
use super::Trie;
use crate::config::TrieConfig;
use crate::error::Result;
use crate::scope::{is_wildcard, split_segment};
use crate::types::{Permission, PermissionMap};

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, trace};

/// Incrementally builds a [`Trie`] from (action, scope) grants
///
/// # Examples
///
/// ```
/// use cretoai_accesscontrol::TrieBuilder;
///
/// let mut builder = TrieBuilder::new();
/// builder
///     .insert("datasources:read", "datasources:*")
///     .insert("datasources:write", "datasources:uid:123");
/// let trie = builder.build();
///
/// assert!(trie.has_access("datasources:read", "datasources:uid:456"));
/// assert!(trie.has_access("datasources:write", "datasources:uid:123"));
/// assert!(!trie.has_access("datasources:write", "datasources:uid:456"));
/// ```
#[derive(Debug)]
pub struct TrieBuilder {
    config: TrieConfig,
    nodes: Vec<Node>,
    actions: HashSet<Arc<str>>,
    ignored: usize,
}

impl TrieBuilder {
    /// Creates a builder using the default `:` / `*` syntax
    pub fn new() -> Self {
        Self::from_valid_config(TrieConfig::default())
    }

    /// Creates a builder with a custom scope syntax
    pub fn with_config(config: TrieConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: TrieConfig) -> Self {
        Self {
            config,
            nodes: vec![Node::root()],
            actions: HashSet::new(),
            ignored: 0,
        }
    }

    /// Adds every permission in `permissions`
    pub fn extend<'a, I>(&mut self, permissions: I) -> &mut Self
    where
        I: IntoIterator<Item = &'a Permission>,
    {
        for permission in permissions {
            self.insert(&permission.action, &permission.scope);
        }
        self
    }

    /// Adds every scope of every action in `permissions`
    pub fn extend_from_map(&mut self, permissions: &PermissionMap) -> &mut Self {
        for (action, scopes) in permissions {
            // Record the action even when it carries no scopes at all
            self.intern(action);
            for scope in scopes {
                self.insert(action, scope);
            }
        }
        self
    }

    /// Grants `action` on `scope`
    ///
    /// The action is always recorded in the trie-wide action set. An empty
    /// scope adds nothing else, and neither does a scope ending with the
    /// delimiter (`users:`, `users:uid:`). Descent stops early at the first node that
    /// already grants the action, and at a wildcard segment, which grants at
    /// the node it hangs off and drops the rest of the scope.
    pub fn insert(&mut self, action: &str, scope: &str) -> &mut Self {
        let action = self.intern(action);

        if scope.is_empty() {
            return self;
        }

        let delimiter = self.config.delimiter;
        if scope.ends_with(delimiter) {
            trace!("Ignoring scope with trailing delimiter: {}", scope);
            self.ignored += 1;
            return self;
        }

        let mut node = NodeId::ROOT;
        let mut remaining = scope;

        loop {
            if self.nodes[node.0].actions.contains(&action) {
                break;
            }

            let (head, tail) = split_segment(remaining, delimiter);

            if is_wildcard(head, &self.config) {
                self.nodes[node.0].actions.insert(action);
                break;
            }

            match tail {
                None => {
                    let leaf = self.child_or_insert(node, head);
                    self.nodes[leaf.0].actions.insert(action);
                    break;
                }
                Some(tail) => {
                    node = self.child_or_insert(node, head);
                    remaining = tail;
                }
            }
        }

        self
    }

    /// Finalizes the trie
    pub fn build(self) -> Trie {
        debug!(
            "Built permission trie: {} nodes, {} actions, {} ignored scopes",
            self.nodes.len(),
            self.actions.len(),
            self.ignored
        );

        Trie {
            config: self.config,
            nodes: self.nodes,
            actions: self.actions,
        }
    }

    /// Number of nodes created so far, including the root
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn intern(&mut self, action: &str) -> Arc<str> {
        if let Some(existing) = self.actions.get(action) {
            return Arc::clone(existing);
        }
        let action: Arc<str> = Arc::from(action);
        self.actions.insert(Arc::clone(&action));
        action
    }

    fn child_or_insert(&mut self, parent: NodeId, segment: &str) -> NodeId {
        if let Some(id) = self.nodes[parent.0].child_id(segment) {
            return id;
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::child(segment));
        self.nodes[parent.0].children.insert(segment.to_string(), id);
        id
    }
}

impl Default for TrieBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    /// Builds a trie from a flat permission list
    pub fn from_permissions(permissions: &[Permission]) -> Self {
        let mut builder = TrieBuilder::new();
        builder.extend(permissions);
        builder.build()
    }

    /// Builds a trie from scopes grouped by action
    pub fn from_map(permissions: &PermissionMap) -> Self {
        let mut builder = TrieBuilder::new();
        builder.extend_from_map(permissions);
        builder.build()
    }
}
