//! Collaborator traits consumed by the group facade.
//!
//! - [`error`]: Error types for repository operations
//! - [`group`]: The group search index (queries and writes)
//! - [`directory`]: Username to display-name resolution
//! - [`security`]: The current organization and user
//!
//! The facade only depends on these traits; in-memory implementations live in
//! [`crate::db::repositories`].

pub mod directory;
pub mod error;
pub mod group;
pub mod security;

pub use directory::UserDirectory;
pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use group::GroupSearchIndex;
pub use security::SecurityService;
