/// Segment splitting and wildcard helpers
///
/// Splitting only ever looks at the first delimiter of the remaining path,
/// so walks peel one segment per step without tokenizing the whole scope.

use crate::config::TrieConfig;

/// Splits off the next segment of `path`
///
/// Returns the head segment and the remaining tail. The tail is `None`
/// when `path` contains no delimiter, meaning `head` is the last segment.
pub fn split_segment(path: &str, delimiter: char) -> (&str, Option<&str>) {
    match path.split_once(delimiter) {
        Some((head, tail)) => (head, Some(tail)),
        None => (path, None),
    }
}

/// Returns whether `segment` is the configured wildcard
pub fn is_wildcard(segment: &str, config: &TrieConfig) -> bool {
    segment == config.wildcard
}

/// Checks that a granted scope is usable for wildcard matching
///
/// A wildcard may only appear as the final segment, and no `?` may appear
/// anywhere before it. `datasources:*` and `*` are valid, `datasources*`
/// and `datasources:*:uid` are not. A scope ending with the delimiter is
/// invalid, matching the trie, which ignores such grants.
pub fn validate_scope(scope: &str, config: &TrieConfig) -> bool {
    if scope.is_empty() || scope.ends_with(config.delimiter) {
        return false;
    }

    let body = match scope.strip_suffix(config.wildcard.as_str()) {
        Some(prefix) => {
            if !prefix.is_empty() && !prefix.ends_with(config.delimiter) {
                return false;
            }
            prefix
        }
        None => scope,
    };

    !body.contains(config.wildcard.as_str()) && !body.contains('?')
}

/// Checks whether a granted scope covers `target`
///
/// A grant covers its own scope and everything below it. A trailing
/// wildcard grants the scope it hangs off, so `dashboards:*` covers
/// `dashboards` as well as `dashboards:uid:1`, and `*` covers everything.
/// Grants failing [`validate_scope`] cover nothing.
pub fn scope_covers(granted: &str, target: &str, config: &TrieConfig) -> bool {
    if !validate_scope(granted, config) {
        return false;
    }

    let base = match granted.strip_suffix(config.wildcard.as_str()) {
        Some(prefix) => prefix.strip_suffix(config.delimiter).unwrap_or(prefix),
        None => granted,
    };

    if base.is_empty() {
        return true;
    }

    match target.strip_prefix(base) {
        Some(rest) => rest.is_empty() || rest.starts_with(config.delimiter),
        None => false,
    }
}

/// Builds every wildcard scope that covers resources under `prefix`
///
/// `dashboards:uid:` yields `*`, `dashboards:*` and `dashboards:uid:*`.
/// Empty segments are skipped, so a trailing delimiter is optional.
pub fn wildcards_from_prefix(prefix: &str, config: &TrieConfig) -> Vec<String> {
    let mut wildcards = vec![config.wildcard.clone()];
    let mut current = String::with_capacity(prefix.len() + config.wildcard.len());

    for segment in prefix.split(config.delimiter).filter(|s| !s.is_empty()) {
        current.push_str(segment);
        current.push(config.delimiter);
        wildcards.push(format!("{}{}", current, config.wildcard));
    }

    wildcards
}
