//! Core permission types

use crate::error::{AccessControlError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Actions a principal holds on one resource
///
/// Every present key maps to `true`, e.g. `{"datasources:read": true}`.
pub type Metadata = HashMap<String, bool>;

/// Granted scopes grouped by action
pub type PermissionMap = HashMap<String, Vec<String>>;

/// A single (action, scope) grant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    /// Operation identifier (e.g., "datasources:read")
    pub action: String,

    /// Resource scope the action applies to (e.g., "datasources:uid:123").
    /// Empty means the action is held without a scope.
    #[serde(default)]
    pub scope: String,
}

impl Permission {
    /// Create a new permission
    pub fn new(action: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            scope: scope.into(),
        }
    }
}

/// Parse a JSON list of `{"action": .., "scope": ..}` objects
///
/// Entries with an empty action are rejected.
pub fn permissions_from_json(json: &str) -> Result<Vec<Permission>> {
    let permissions: Vec<Permission> = serde_json::from_str(json)?;

    if let Some(index) = permissions.iter().position(|p| p.action.is_empty()) {
        return Err(AccessControlError::InvalidInput(format!(
            "permission {} has an empty action",
            index
        )));
    }

    Ok(permissions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissions_from_json() {
        let json = r#"[
            {"action": "datasources:read", "scope": "datasources:*"},
            {"action": "datasources:write", "scope": "datasources:uid:123"},
            {"action": "users:create"}
        ]"#;

        let permissions = permissions_from_json(json).unwrap();
        assert_eq!(permissions.len(), 3);
        assert_eq!(permissions[0], Permission::new("datasources:read", "datasources:*"));
        assert_eq!(permissions[2].scope, "");
    }

    #[test]
    fn test_permissions_from_invalid_json() {
        let result = permissions_from_json("{not json");
        assert!(matches!(result, Err(AccessControlError::Serialization(_))));
    }

    #[test]
    fn test_permissions_from_json_rejects_empty_action() {
        let json = r#"[
            {"action": "datasources:read", "scope": "datasources:*"},
            {"action": "", "scope": "datasources:uid:1"}
        ]"#;

        match permissions_from_json(json) {
            Err(AccessControlError::InvalidInput(msg)) => assert!(msg.contains("permission 1")),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }
}
