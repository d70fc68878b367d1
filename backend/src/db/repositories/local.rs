//! In-memory collaborator implementations.
//!
//! These back the facade during local development and in tests. Data lives in
//! `parking_lot::RwLock`-guarded maps, so every instance is isolated and
//! deterministic.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use crate::db::query::{GroupSearchQuery, SearchResult};
use crate::db::repository::*;
use crate::models::{Group, Organization, User};

/// In-memory group search index.
///
/// # Example
/// ```
/// use admin_groups::db::repositories::LocalGroupIndex;
/// use admin_groups::models::Group;
///
/// let index = LocalGroupIndex::new();
/// index.insert(Group::from_name("org", "Editors", None, Default::default(), Default::default()));
/// assert_eq!(index.group_count(), 1);
/// ```
#[derive(Clone)]
pub struct LocalGroupIndex {
    data: Arc<RwLock<LocalIndexData>>,
}

struct LocalIndexData {
    // Keyed by (organization, identifier)
    groups: HashMap<(String, String), Group>,
    is_healthy: bool,
}

impl LocalGroupIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalIndexData {
                groups: HashMap::new(),
                is_healthy: true,
            })),
        }
    }

    /// Add a group directly, bypassing the index service.
    pub fn insert(&self, group: Group) {
        let key = (group.organization.clone(), group.identifier.clone());
        self.data.write().groups.insert(key, group);
    }

    /// Set the health status for testing index outages.
    ///
    /// While unhealthy every query and write fails with an index error.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Number of groups across all organizations.
    pub fn group_count(&self) -> usize {
        self.data.read().groups.len()
    }

    fn ensure_healthy(&self, operation: &str) -> RepositoryResult<()> {
        if self.data.read().is_healthy {
            Ok(())
        } else {
            Err(RepositoryError::index_with_context(
                "Search index unavailable",
                ErrorContext::new(operation).with_entity("group"),
            ))
        }
    }
}

impl Default for LocalGroupIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GroupSearchIndex for LocalGroupIndex {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn search_groups(&self, query: &GroupSearchQuery) -> RepositoryResult<SearchResult<Group>> {
        self.ensure_healthy("search_groups")?;

        let mut hits: Vec<Group> = self
            .data
            .read()
            .groups
            .values()
            .filter(|group| query.matches(group))
            .cloned()
            .collect();
        hits.sort_by(|a, b| query.compare(a, b));

        let hit_count = hits.len() as u64;
        let offset = query.offset.unwrap_or(0);
        let items = hits
            .into_iter()
            .skip(offset)
            .take(query.limit.unwrap_or(usize::MAX))
            .collect();

        Ok(SearchResult {
            items,
            hit_count,
            offset,
            limit: query.limit,
        })
    }

    async fn get_group(&self, organization: &str, identifier: &str) -> RepositoryResult<Option<Group>> {
        self.ensure_healthy("get_group")?;
        let key = (organization.to_string(), identifier.to_string());
        Ok(self.data.read().groups.get(&key).cloned())
    }

    async fn add_group(&self, group: &Group) -> RepositoryResult<bool> {
        self.ensure_healthy("add_group")?;
        let key = (group.organization.clone(), group.identifier.clone());
        match self.data.write().groups.entry(key) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(group.clone());
                Ok(true)
            }
        }
    }

    async fn add_or_update_group(&self, group: &Group) -> RepositoryResult<()> {
        self.ensure_healthy("add_or_update_group")?;
        self.insert(group.clone());
        Ok(())
    }

    async fn delete_group(&self, organization: &str, identifier: &str) -> RepositoryResult<bool> {
        self.ensure_healthy("delete_group")?;
        let key = (organization.to_string(), identifier.to_string());
        Ok(self.data.write().groups.remove(&key).is_some())
    }
}

/// In-memory user directory.
#[derive(Clone, Default)]
pub struct LocalUserDirectory {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl LocalUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a user.
    pub fn add_user(&self, user: User) {
        self.users.write().insert(user.username.clone(), user);
    }

    pub fn user_count(&self) -> usize {
        self.users.read().len()
    }
}

#[async_trait]
impl UserDirectory for LocalUserDirectory {
    async fn load_user(&self, username: &str) -> RepositoryResult<Option<User>> {
        Ok(self.users.read().get(username).cloned())
    }
}

/// Security service that always acts for the same organization and user.
#[derive(Debug, Clone)]
pub struct StaticSecurityService {
    organization: Organization,
    user: User,
}

impl StaticSecurityService {
    pub fn new(organization: Organization, user: User) -> Self {
        Self { organization, user }
    }
}

impl SecurityService for StaticSecurityService {
    fn organization(&self) -> Organization {
        self.organization.clone()
    }

    fn user(&self) -> User {
        self.user.clone()
    }
}
