//! Per-resource action metadata
//!
//! Builds `{resource id → {action: true}}` maps that callers turn into
//! capability hints. Two sources are supported: a built [`Trie`] (one path
//! descent per resource) and a flat action → scopes map (one pass over the
//! permissions).

use crate::config::TrieConfig;
use crate::scope::{scope_covers, validate_scope};
use crate::trie::Trie;
use crate::types::{Metadata, PermissionMap};

use std::collections::{HashMap, HashSet};

/// Anything that can report the actions held on a scope
pub trait MetadataSource {
    /// Actions held on `scope`, including those inherited from ancestors
    fn metadata(&self, scope: &str) -> Metadata;
}

impl MetadataSource for Trie {
    fn metadata(&self, scope: &str) -> Metadata {
        Trie::metadata(self, scope)
    }
}

/// Computes metadata for every candidate resource under `prefix`
///
/// Each id is looked up as `prefix + id`, so `prefix` normally ends with
/// the delimiter (`"dashboards:uid:"`).
pub fn get_resources_metadata<S>(
    permissions: &S,
    prefix: &str,
    resource_ids: &HashSet<String>,
) -> HashMap<String, Metadata>
where
    S: MetadataSource + ?Sized,
{
    let mut scope = String::with_capacity(prefix.len() + 16);

    resource_ids
        .iter()
        .map(|id| {
            scope.clear();
            scope.push_str(prefix);
            scope.push_str(id);
            (id.clone(), permissions.metadata(&scope))
        })
        .collect()
}

/// Computes resource metadata from a flat action → scopes map
///
/// A scope covering `prefix` (the prefix itself, an ancestor, or a wildcard
/// over either) grants the action on every candidate. A scope naming
/// `prefix + id`, or `prefix + id` followed by a wildcard, grants it on that
/// id if it is a candidate. Matches [`get_resources_metadata`] over a trie
/// for scopes that pass [`validate_scope`], except that resources with no
/// action are omitted here.
pub fn resources_metadata_from_map(
    permissions: &PermissionMap,
    prefix: &str,
    resource_ids: &HashSet<String>,
    config: &TrieConfig,
) -> HashMap<String, Metadata> {
    let base = prefix.strip_suffix(config.delimiter).unwrap_or(prefix);
    let mut all_metadata = HashMap::new();

    for (action, scopes) in permissions {
        for scope in scopes {
            if !validate_scope(scope, config) {
                continue;
            }

            if scope_covers(scope, base, config) {
                for id in resource_ids {
                    add_action_to_metadata(&mut all_metadata, action, id);
                }
                break;
            }

            if let Some(rest) = scope.strip_prefix(prefix) {
                let id = rest
                    .strip_suffix(config.wildcard.as_str())
                    .and_then(|id| id.strip_suffix(config.delimiter))
                    .unwrap_or(rest);
                if resource_ids.contains(id) {
                    add_action_to_metadata(&mut all_metadata, action, id);
                }
            }
        }
    }

    all_metadata
}

/// Records `action` on resource `id`
pub fn add_action_to_metadata(
    all_metadata: &mut HashMap<String, Metadata>,
    action: &str,
    id: &str,
) {
    all_metadata
        .entry(id.to_string())
        .or_default()
        .insert(action.to_string(), true);
}

/// Merges the actions of `second` that start with `prefix` into `first`
pub fn merge_meta(prefix: &str, mut first: Metadata, second: &Metadata) -> Metadata {
    for key in second.keys() {
        if key.starts_with(prefix) {
            first.insert(key.clone(), true);
        }
    }
    first
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Permission;

    fn ids(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn meta(actions: &[&str]) -> Metadata {
        actions.iter().map(|a| (a.to_string(), true)).collect()
    }

    #[test]
    fn test_get_resources_metadata() {
        let trie = Trie::from_permissions(&[
            Permission::new("dashboards:read", "dashboards:*"),
            Permission::new("dashboards:write", "dashboards:uid:1"),
        ]);

        let result = get_resources_metadata(&trie, "dashboards:uid:", &ids(&["1", "2"]));
        assert_eq!(result.len(), 2);
        assert_eq!(result["1"], meta(&["dashboards:read", "dashboards:write"]));
        assert_eq!(result["2"], meta(&["dashboards:read"]));
    }

    #[test]
    fn test_get_resources_metadata_without_grants() {
        let trie = Trie::from_permissions(&[Permission::new("folders:read", "folders:*")]);

        let result = get_resources_metadata(&trie, "dashboards:uid:", &ids(&["1"]));
        assert_eq!(result.len(), 1);
        assert!(result["1"].is_empty());
    }

    #[test]
    fn test_metadata_from_map() {
        let mut permissions = PermissionMap::new();
        permissions.insert("dashboards:read".to_string(), vec!["dashboards:*".to_string()]);
        permissions.insert(
            "dashboards:write".to_string(),
            vec!["dashboards:uid:1".to_string(), "dashboards:uid:9".to_string()],
        );
        permissions.insert("folders:read".to_string(), vec!["folders:uid:1".to_string()]);

        let result = resources_metadata_from_map(
            &permissions,
            "dashboards:uid:",
            &ids(&["1", "2"]),
            &TrieConfig::default(),
        );

        assert_eq!(result.len(), 2);
        assert_eq!(result["1"], meta(&["dashboards:read", "dashboards:write"]));
        assert_eq!(result["2"], meta(&["dashboards:read"]));
    }

    #[test]
    fn test_map_and_trie_agree() {
        let permissions = vec![
            Permission::new("dashboards:read", "dashboards:uid:*"),
            Permission::new("dashboards:write", "dashboards:uid:2"),
            Permission::new("dashboards:delete", "*"),
        ];
        let candidates = ids(&["1", "2", "3"]);

        let trie = Trie::from_permissions(&permissions);
        let from_trie = get_resources_metadata(&trie, "dashboards:uid:", &candidates);

        let map = crate::evaluator::group_scopes_by_action(&permissions);
        let from_map =
            resources_metadata_from_map(&map, "dashboards:uid:", &candidates, &TrieConfig::default());

        assert_eq!(from_trie, from_map);
    }

    #[test]
    fn test_map_and_trie_agree_on_plain_grants() {
        let permissions = vec![
            Permission::new("dashboards:read", "dashboards"),
            Permission::new("dashboards:write", "dashboards:*"),
            Permission::new("dashboards:delete", "dashboards:uid:2:*"),
            Permission::new("dashboards:create", "dashboards:uid:3:panels"),
        ];
        let candidates = ids(&["1", "2", "3"]);

        let trie = Trie::from_permissions(&permissions);
        let from_trie = get_resources_metadata(&trie, "dashboards:uid:", &candidates);

        let map = crate::evaluator::group_scopes_by_action(&permissions);
        let from_map =
            resources_metadata_from_map(&map, "dashboards:uid:", &candidates, &TrieConfig::default());

        assert_eq!(from_trie["1"], meta(&["dashboards:read", "dashboards:write"]));
        assert_eq!(
            from_trie["2"],
            meta(&["dashboards:read", "dashboards:write", "dashboards:delete"])
        );
        assert_eq!(from_trie["3"], meta(&["dashboards:read", "dashboards:write"]));
        assert_eq!(from_trie, from_map);
    }

    #[test]
    fn test_add_action_to_metadata() {
        let mut all = HashMap::new();
        add_action_to_metadata(&mut all, "read", "1");
        add_action_to_metadata(&mut all, "write", "1");
        add_action_to_metadata(&mut all, "read", "2");

        assert_eq!(all["1"], meta(&["read", "write"]));
        assert_eq!(all["2"], meta(&["read"]));
    }

    #[test]
    fn test_merge_meta() {
        let first = meta(&["dashboards:read"]);
        let second = meta(&["dashboards:write", "folders:read"]);

        let merged = merge_meta("dashboards", first, &second);
        assert_eq!(merged, meta(&["dashboards:read", "dashboards:write"]));
    }

    #[test]
    fn test_merge_meta_into_empty() {
        let second = meta(&["folders:read", "folders:write"]);
        let merged = merge_meta("folders:", Metadata::new(), &second);
        assert_eq!(merged, second);
    }
}
