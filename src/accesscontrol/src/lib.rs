//! # CretoAI Access Control
//!
//! In-process permission evaluation over (action, scope) grants.
//!
//! ## Features
//!
//! - **Scope trie** indexing colon-delimited scopes with wildcard coverage
//! - **Ancestor inheritance**: a grant on `datasources` covers `datasources:uid:1`
//! - **Identifier enumeration** for filtering resource listings
//! - **Resource metadata** maps of allowed actions per resource
//! - **Map evaluators** for one-off checks without building an index
//!
//! ## Example
//!
//! ```rust
//! use cretoai_accesscontrol::{Permission, Trie};
//!
//! let trie = Trie::from_permissions(&[
//!     Permission::new("dashboards:read", "dashboards:*"),
//!     Permission::new("dashboards:write", "dashboards:uid:1"),
//!     Permission::new("dashboards:write", "dashboards:uid:2"),
//! ]);
//!
//! assert!(trie.has_access("dashboards:read", "dashboards:uid:7"));
//! assert!(!trie.has_access("dashboards:write", "dashboards:uid:7"));
//!
//! let writable = trie.identifiers("dashboards:write", "dashboards:uid");
//! assert!(!writable.has_wildcard);
//! assert_eq!(writable.ids, vec!["1", "2"]);
//! ```

pub mod config;
pub mod error;
pub mod evaluator;
pub mod metadata;
pub mod scope;
pub mod trie;
pub mod types;

// Re-export commonly used types
pub use config::TrieConfig;
pub use error::{AccessControlError, Result};
pub use evaluator::{eval_all, eval_any, eval_permission, group_scopes_by_action, Evaluator};
pub use metadata::{get_resources_metadata, merge_meta, MetadataSource};
pub use trie::{Identifiers, Node, NodeId, Trie, TrieBuilder};
pub use types::{Metadata, Permission, PermissionMap};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
