//! Group search index trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::db::query::{GroupSearchQuery, SearchResult};
use crate::models::Group;

/// Search index holding the groups of every organization.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait GroupSearchIndex: Send + Sync {
    /// Check if the index is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if the index is healthy
    /// - `Ok(false)` if it is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if the check itself failed
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Run a query and return one page of matching groups.
    ///
    /// The returned `hit_count` counts every match, not only the page.
    async fn search_groups(&self, query: &GroupSearchQuery) -> RepositoryResult<SearchResult<Group>>;

    /// Look up a single group.
    ///
    /// # Returns
    /// * `Ok(Some(Group))` - The group
    /// * `Ok(None)` - If no group has this identifier in the organization
    async fn get_group(&self, organization: &str, identifier: &str) -> RepositoryResult<Option<Group>>;

    /// Insert a group unless its identifier is already taken in the organization.
    ///
    /// The existence check and the insert are one atomic step.
    ///
    /// # Returns
    /// * `Ok(true)` - The group was stored
    /// * `Ok(false)` - A group with this identifier already exists; nothing changed
    async fn add_group(&self, group: &Group) -> RepositoryResult<bool>;

    /// Insert a group or replace the one with the same identifier.
    async fn add_or_update_group(&self, group: &Group) -> RepositoryResult<()>;

    /// Remove a group.
    ///
    /// # Returns
    /// * `Ok(true)` - The group existed and was removed
    /// * `Ok(false)` - There was nothing to remove
    async fn delete_group(&self, organization: &str, identifier: &str) -> RepositoryResult<bool>;
}
