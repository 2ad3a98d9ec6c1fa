//! Requirement evaluators over flattened permissions
//!
//! An alternative to the trie for one-off checks: a requirement is tested
//! directly against an action → scopes map without building an index.
//!
//! Both backends share the trie's hierarchy: a grant covers its scope and
//! every scope below it. For granted scopes that pass
//! [`validate_scope`](crate::scope::validate_scope), `evaluate` and
//! `evaluate_trie` always agree. Scopes with a wildcard before the last
//! segment (`x:*:z`) are rejected by the map backend, while the trie
//! widens them to the segment before the wildcard.

use crate::config::TrieConfig;
use crate::scope::scope_covers;
use crate::trie::Trie;
use crate::types::{Permission, PermissionMap};

use std::fmt;

/// A permission requirement
pub trait Evaluator: fmt::Display + Send + Sync {
    /// Checks the requirement against scopes grouped by action
    ///
    /// Gives the same answer as [`Evaluator::evaluate_trie`] for valid scopes.
    fn evaluate(&self, permissions: &PermissionMap) -> bool;

    /// Checks the requirement against a built trie
    fn evaluate_trie(&self, trie: &Trie) -> bool;
}

/// Requires an action, optionally on one of several target scopes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionEvaluator {
    /// Required action
    pub action: String,

    /// Target scopes; any one matching is enough. Empty means scope-less.
    pub scopes: Vec<String>,

    config: TrieConfig,
}

impl PermissionEvaluator {
    /// Use a custom scope syntax for wildcard matching
    pub fn with_config(mut self, config: TrieConfig) -> Self {
        self.config = config;
        self
    }

    fn scope_matches(&self, granted: &str, target: &str) -> bool {
        scope_covers(granted, target, &self.config)
    }
}

impl Evaluator for PermissionEvaluator {
    fn evaluate(&self, permissions: &PermissionMap) -> bool {
        let granted = match permissions.get(&self.action) {
            Some(scopes) => scopes,
            None => return false,
        };

        if self.scopes.is_empty() {
            return true;
        }

        self.scopes.iter().any(|target| {
            granted
                .iter()
                .any(|scope| self.scope_matches(scope, target))
        })
    }

    fn evaluate_trie(&self, trie: &Trie) -> bool {
        if self.scopes.is_empty() {
            return trie.has_action(&self.action);
        }

        self.scopes
            .iter()
            .any(|target| trie.has_access(&self.action, target))
    }
}

impl fmt::Display for PermissionEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "action:{} scopes:{}", self.action, self.scopes.join(", "))
    }
}

/// Requires every inner evaluator to pass
pub struct AllEvaluator {
    evaluators: Vec<Box<dyn Evaluator>>,
}

impl Evaluator for AllEvaluator {
    fn evaluate(&self, permissions: &PermissionMap) -> bool {
        self.evaluators.iter().all(|e| e.evaluate(permissions))
    }

    fn evaluate_trie(&self, trie: &Trie) -> bool {
        self.evaluators.iter().all(|e| e.evaluate_trie(trie))
    }
}

impl fmt::Display for AllEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_composite(f, "all", &self.evaluators)
    }
}

/// Requires at least one inner evaluator to pass
pub struct AnyEvaluator {
    evaluators: Vec<Box<dyn Evaluator>>,
}

impl Evaluator for AnyEvaluator {
    fn evaluate(&self, permissions: &PermissionMap) -> bool {
        self.evaluators.iter().any(|e| e.evaluate(permissions))
    }

    fn evaluate_trie(&self, trie: &Trie) -> bool {
        self.evaluators.iter().any(|e| e.evaluate_trie(trie))
    }
}

impl fmt::Display for AnyEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_composite(f, "any", &self.evaluators)
    }
}

fn write_composite(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    evaluators: &[Box<dyn Evaluator>],
) -> fmt::Result {
    write!(f, "{}(", name)?;
    for (idx, evaluator) in evaluators.iter().enumerate() {
        if idx > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", evaluator)?;
    }
    write!(f, ")")
}

/// Requires `action` on any of `scopes` (or anywhere, if `scopes` is empty)
pub fn eval_permission<S>(action: impl Into<String>, scopes: S) -> PermissionEvaluator
where
    S: IntoIterator,
    S::Item: Into<String>,
{
    PermissionEvaluator {
        action: action.into(),
        scopes: scopes.into_iter().map(Into::into).collect(),
        config: TrieConfig::default(),
    }
}

/// Passes when all of `evaluators` pass; an empty list passes
pub fn eval_all(evaluators: Vec<Box<dyn Evaluator>>) -> AllEvaluator {
    AllEvaluator { evaluators }
}

/// Passes when any of `evaluators` passes; an empty list fails
pub fn eval_any(evaluators: Vec<Box<dyn Evaluator>>) -> AnyEvaluator {
    AnyEvaluator { evaluators }
}

/// Groups scopes by action
pub fn group_scopes_by_action(permissions: &[Permission]) -> PermissionMap {
    let mut grouped = PermissionMap::new();
    for permission in permissions {
        grouped
            .entry(permission.action.clone())
            .or_default()
            .push(permission.scope.clone());
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_SCOPES: [&str; 0] = [];

    fn permissions() -> Vec<Permission> {
        vec![
            Permission::new("datasources:read", "datasources:*"),
            Permission::new("datasources:write", "datasources:uid:123"),
            Permission::new("users:create", ""),
        ]
    }

    #[test]
    fn test_group_scopes_by_action() {
        let grouped = group_scopes_by_action(&[
            Permission::new("a", "x:1"),
            Permission::new("a", "x:2"),
            Permission::new("b", "y"),
        ]);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["a"], vec!["x:1", "x:2"]);
        assert_eq!(grouped["b"], vec!["y"]);
    }

    #[test]
    fn test_eval_permission_wildcard() {
        let map = group_scopes_by_action(&permissions());
        assert!(eval_permission("datasources:read", ["datasources:uid:1"]).evaluate(&map));
        assert!(!eval_permission("datasources:read", ["dashboards:uid:1"]).evaluate(&map));
    }

    #[test]
    fn test_eval_permission_exact() {
        let map = group_scopes_by_action(&permissions());
        assert!(eval_permission("datasources:write", ["datasources:uid:123"]).evaluate(&map));
        assert!(!eval_permission("datasources:write", ["datasources:uid:124"]).evaluate(&map));
    }

    #[test]
    fn test_eval_permission_any_target_scope() {
        let map = group_scopes_by_action(&permissions());
        let evaluator = eval_permission(
            "datasources:write",
            ["datasources:uid:1", "datasources:uid:123"],
        );
        assert!(evaluator.evaluate(&map));
    }

    #[test]
    fn test_eval_permission_scopeless() {
        let map = group_scopes_by_action(&permissions());
        assert!(eval_permission("users:create", NO_SCOPES).evaluate(&map));
        assert!(eval_permission("datasources:read", NO_SCOPES).evaluate(&map));
        assert!(!eval_permission("users:delete", NO_SCOPES).evaluate(&map));
    }

    #[test]
    fn test_invalid_granted_scope_never_matches() {
        let map = group_scopes_by_action(&[Permission::new("a", "x*")]);
        assert!(!eval_permission("a", ["x:1"]).evaluate(&map));
        assert!(!eval_permission("a", ["x*"]).evaluate(&map));
    }

    #[test]
    fn test_custom_delimiter_matching() {
        let map = group_scopes_by_action(&[Permission::new("files:read", "files/*")]);
        let evaluator = eval_permission("files:read", ["files/report.pdf"])
            .with_config(TrieConfig::with_delimiter('/'));
        assert!(evaluator.evaluate(&map));
    }

    #[test]
    fn test_eval_all_and_any() {
        let map = group_scopes_by_action(&permissions());

        let all = eval_all(vec![
            Box::new(eval_permission("datasources:read", ["datasources:uid:1"])),
            Box::new(eval_permission("datasources:write", ["datasources:uid:1"])),
        ]);
        assert!(!all.evaluate(&map));

        let any = eval_any(vec![
            Box::new(eval_permission("datasources:read", ["datasources:uid:1"])),
            Box::new(eval_permission("datasources:write", ["datasources:uid:1"])),
        ]);
        assert!(any.evaluate(&map));

        assert!(eval_all(vec![]).evaluate(&map));
        assert!(!eval_any(vec![]).evaluate(&map));
    }

    #[test]
    fn test_trie_and_map_agree() {
        let permissions = permissions();
        let map = group_scopes_by_action(&permissions);
        let trie = Trie::from_permissions(&permissions);

        let cases = vec![
            eval_permission("datasources:read", vec!["datasources:uid:1"]),
            eval_permission("datasources:write", vec!["datasources:uid:123"]),
            eval_permission("datasources:write", vec!["datasources:uid:9"]),
            eval_permission("users:create", Vec::<String>::new()),
            eval_permission("users:delete", Vec::<String>::new()),
        ];

        for evaluator in cases {
            assert_eq!(
                evaluator.evaluate(&map),
                evaluator.evaluate_trie(&trie),
                "{}",
                evaluator
            );
        }
    }

    #[test]
    fn test_plain_grant_covers_descendants() {
        let permissions = vec![
            Permission::new("dashboards:read", "dashboards"),
            Permission::new("dashboards:write", "dashboards:*"),
        ];
        let map = group_scopes_by_action(&permissions);
        let trie = Trie::from_permissions(&permissions);

        for (action, target) in [
            ("dashboards:read", "dashboards:uid:1"),
            ("dashboards:read", "dashboards"),
            ("dashboards:write", "dashboards"),
            ("dashboards:write", "dashboards:uid:1"),
        ] {
            let evaluator = eval_permission(action, [target]);
            assert!(evaluator.evaluate(&map), "{}", evaluator);
            assert!(evaluator.evaluate_trie(&trie), "{}", evaluator);
        }

        let evaluator = eval_permission("dashboards:read", ["dashboardsX:uid:1"]);
        assert!(!evaluator.evaluate(&map));
        assert!(!evaluator.evaluate_trie(&trie));
    }

    #[test]
    fn test_display() {
        let evaluator = eval_permission("datasources:read", ["datasources:uid:1", "datasources:uid:2"]);
        assert_eq!(
            evaluator.to_string(),
            "action:datasources:read scopes:datasources:uid:1, datasources:uid:2"
        );

        let any = eval_any(vec![
            Box::new(eval_permission("a", ["x"])),
            Box::new(eval_all(vec![Box::new(eval_permission("b", NO_SCOPES))])),
        ]);
        assert_eq!(any.to_string(), "any(action:a scopes:x all(action:b scopes:))");
    }
}
