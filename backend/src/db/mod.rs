//! Collaborator layer for group storage, lookup and identity.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                             │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services/) - IndexService               │
//! │  - Name validation, identifier derivation               │
//! │  - Conflict / not-found detection                       │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Collaborator Traits (repository/)                      │
//! │  - GroupSearchIndex, UserDirectory, SecurityService     │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌──────────────────────────────────────────────┐
//!     │        Local collaborators (in-memory)       │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! Collaborators are always passed explicitly; use [`RepositoryFactory`] to
//! build them from a [`RepositoryConfig`].

pub mod factory;
pub mod query;
pub mod repo_config;
pub mod repositories;
pub mod repository;

pub use factory::{Collaborators, RepositoryFactory, RepositoryType};
pub use query::{GroupSearchQuery, GroupSortField, SearchResult, SortCriterion, SortOrder};
pub use repo_config::RepositoryConfig;
pub use repositories::{LocalGroupIndex, LocalUserDirectory, StaticSecurityService};
pub use repository::{
    ErrorContext, GroupSearchIndex, RepositoryError, RepositoryResult, SecurityService,
    UserDirectory,
};
