/// Scope path model
///
/// A scope is a delimiter-separated resource path such as
/// `datasources:uid:123`. The wildcard segment (`*` by default) covers
/// everything at and below its position.
///
/// # Examples
///
/// ```
/// use cretoai_accesscontrol::scope::{split_segment, wildcards_from_prefix};
/// use cretoai_accesscontrol::TrieConfig;
///
/// assert_eq!(split_segment("datasources:uid:123", ':'), ("datasources", Some("uid:123")));
/// assert_eq!(split_segment("123", ':'), ("123", None));
///
/// let wildcards = wildcards_from_prefix("dashboards:uid:", &TrieConfig::default());
/// assert_eq!(wildcards, vec!["*", "dashboards:*", "dashboards:uid:*"]);
/// ```

mod path;

pub use path::{is_wildcard, scope_covers, split_segment, validate_scope, wildcards_from_prefix};
