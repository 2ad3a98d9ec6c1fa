//! Diagnostic JSON dump of a trie
//!
//! Not a stable wire format. Shape:
//!
//! ```json
//! {
//!   "root": {"root": true, "path": "", "actions": {}, "children": {"datasources": {...}}},
//!   "actions": {"datasources:read": true}
//! }
//! ```

use super::node::Node;
use super::Trie;
use crate::error::Result;

use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};
use std::collections::BTreeSet;

/// Borrowed view of a node, serialized with its whole subtree
struct NodeDump<'a> {
    trie: &'a Trie,
    node: &'a Node,
}

/// Serializes a set of actions as `{action: true}`, sorted
struct ActionSet<'a>(BTreeSet<&'a str>);

impl<'a> ActionSet<'a> {
    fn new(actions: impl Iterator<Item = &'a str>) -> Self {
        Self(actions.collect())
    }
}

impl Serialize for ActionSet<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for action in &self.0 {
            map.serialize_entry(action, &true)?;
        }
        map.end()
    }
}

/// Serializes children as `{segment: node}`, sorted by segment
struct Children<'a> {
    trie: &'a Trie,
    node: &'a Node,
}

impl Serialize for Children<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut children: Vec<(&str, &Node)> = self
            .node
            .children
            .iter()
            .map(|(segment, id)| (segment.as_str(), self.trie.node(*id)))
            .collect();
        children.sort_unstable_by_key(|(segment, _)| *segment);

        let mut map = serializer.serialize_map(Some(children.len()))?;
        for (segment, node) in children {
            map.serialize_entry(segment, &NodeDump { trie: self.trie, node })?;
        }
        map.end()
    }
}

impl Serialize for NodeDump<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Node", 4)?;
        state.serialize_field("root", &self.node.is_root())?;
        state.serialize_field("path", self.node.path())?;
        state.serialize_field("actions", &ActionSet::new(self.node.actions()))?;
        state.serialize_field(
            "children",
            &Children {
                trie: self.trie,
                node: self.node,
            },
        )?;
        state.end()
    }
}

impl Serialize for Trie {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Trie", 2)?;
        state.serialize_field(
            "root",
            &NodeDump {
                trie: self,
                node: self.root(),
            },
        )?;
        state.serialize_field("actions", &ActionSet::new(self.actions()))?;
        state.end()
    }
}

impl Trie {
    /// Pretty-printed JSON dump for debugging
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
