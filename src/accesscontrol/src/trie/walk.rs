//! Trie traversal
//!
//! Two strategies, both read-only:
//!
//! - **Path descent** follows one scope from the root, yielding every node on
//!   the way. Stopping early is up to the caller (`Iterator::any`,
//!   `try_for_each`, ...), which is how an ancestor grant short-circuits a
//!   deep query.
//! - **Prefix walk** descends the same way and then yields the immediate
//!   children of the node the prefix ends at.

use super::node::{Node, NodeId};
use super::Trie;
use crate::scope::split_segment;

use std::ops::ControlFlow;

/// Lazily yields the nodes on the path from the root towards a scope
///
/// The root comes first. The walk ends after the node matching the last
/// segment, or earlier when the trie has no child for the next segment.
#[derive(Debug, Clone)]
pub struct PathWalk<'a> {
    trie: &'a Trie,
    next: Option<(NodeId, &'a str)>,
}

impl<'a> PathWalk<'a> {
    pub(crate) fn new(trie: &'a Trie, scope: &'a str) -> Self {
        Self {
            trie,
            next: Some((NodeId::ROOT, scope)),
        }
    }
}

impl<'a> Iterator for PathWalk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let (id, remaining) = self.next.take()?;
        let node = self.trie.node(id);

        if !remaining.is_empty() {
            let (head, tail) = split_segment(remaining, self.trie.config.delimiter);
            self.next = node
                .child_id(head)
                .map(|child| (child, tail.unwrap_or("")));
        }

        Some(node)
    }
}

impl Trie {
    /// Walks from the root along `scope`
    pub fn walk<'a>(&'a self, scope: &'a str) -> PathWalk<'a> {
        PathWalk::new(self, scope)
    }

    /// Visits every node on the path to `scope` until `visit` breaks
    ///
    /// Returns the break value, or `Continue` when the path was exhausted.
    pub fn walk_path<B, F>(&self, scope: &str, visit: F) -> ControlFlow<B>
    where
        F: FnMut(&Node) -> ControlFlow<B>,
    {
        self.walk(scope).try_for_each(visit)
    }

    /// Returns the node matching `path` exactly, if the trie has one
    ///
    /// The empty path is the root. A single trailing delimiter is ignored.
    pub fn descend(&self, path: &str) -> Option<&Node> {
        let delimiter = self.config.delimiter;
        let mut node = self.root();
        let mut remaining = path;

        while !remaining.is_empty() {
            let (head, tail) = split_segment(remaining, delimiter);
            node = self.node(node.child_id(head)?);
            remaining = tail.unwrap_or("");
        }

        Some(node)
    }

    /// Yields the immediate children of the node matching `prefix`
    ///
    /// Yields nothing when the trie has no node for `prefix`.
    pub fn walk_prefix(&self, prefix: &str) -> impl Iterator<Item = &Node> + '_ {
        self.descend(prefix)
            .into_iter()
            .flat_map(move |node| node.child_ids().map(move |id| self.node(id)))
    }
}
