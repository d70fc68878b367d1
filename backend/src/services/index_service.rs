//! Index service: the group operations the HTTP facade delegates to.
//!
//! Reads go through the search index handed in by the caller; writes go to the
//! index the service was built with. Every operation is scoped to the
//! organization reported by the security service.

use async_trait::async_trait;
use log::{debug, info};
use std::sync::Arc;

use crate::db::query::{parse_sort, GroupSearchQuery, SearchResult};
use crate::db::repo_config::DEFAULT_MAX_NAME_LENGTH;
use crate::db::repository::{
    ErrorContext, GroupSearchIndex, RepositoryError, RepositoryResult, SecurityService,
};
use crate::models::{split_list, Group};

/// Fields submitted when creating or updating a group.
///
/// `roles` and `users` are comma separated lists.
#[derive(Debug, Clone, Default)]
pub struct GroupChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub roles: Option<String>,
    pub users: Option<String>,
}

impl GroupChanges {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_roles(mut self, roles: impl Into<String>) -> Self {
        self.roles = Some(roles.into());
        self
    }

    pub fn with_users(mut self, users: impl Into<String>) -> Self {
        self.users = Some(users.into());
        self
    }
}

/// Group operations exposed to the HTTP layer.
#[async_trait]
pub trait IndexService: Send + Sync {
    /// Query one page of groups of the current organization.
    ///
    /// # Errors
    /// * `ValidationError` - the sort specification names an unknown field
    /// * `IndexError` - the search index failed
    async fn list_groups(
        &self,
        filter: Option<&str>,
        limit: Option<usize>,
        offset: Option<usize>,
        sort: Option<&str>,
        index: &dyn GroupSearchIndex,
    ) -> RepositoryResult<SearchResult<Group>>;

    /// Look up a group, `Ok(None)` when it does not exist.
    async fn get_group(&self, id: &str, index: &dyn GroupSearchIndex) -> RepositoryResult<Option<Group>>;

    /// Create a group whose identifier is derived from its name.
    ///
    /// # Errors
    /// * `ValidationError` - the name is missing, blank or too long
    /// * `Conflict` - a group with the derived identifier already exists
    async fn create_group(&self, changes: &GroupChanges) -> RepositoryResult<Group>;

    /// Replace name, description, roles and members of an existing group.
    ///
    /// # Errors
    /// * `NotFound` - no group has this identifier
    /// * `ValidationError` - the name is missing, blank or too long
    async fn update_group(&self, id: &str, changes: &GroupChanges) -> RepositoryResult<Group>;

    /// Delete a group.
    ///
    /// # Errors
    /// * `NotFound` - no group has this identifier
    async fn remove_group(&self, id: &str) -> RepositoryResult<()>;
}

/// [`IndexService`] writing through to a [`GroupSearchIndex`].
#[derive(Clone)]
pub struct DefaultIndexService {
    security: Arc<dyn SecurityService>,
    index: Arc<dyn GroupSearchIndex>,
    max_name_length: usize,
}

impl DefaultIndexService {
    pub fn new(security: Arc<dyn SecurityService>, index: Arc<dyn GroupSearchIndex>) -> Self {
        Self {
            security,
            index,
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
        }
    }

    pub fn with_max_name_length(mut self, max_name_length: usize) -> Self {
        self.max_name_length = max_name_length;
        self
    }

    fn validate_name(&self, name: Option<&str>, operation: &str) -> RepositoryResult<String> {
        let name = name.map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Err(RepositoryError::validation_with_context(
                "Group name is required",
                ErrorContext::new(operation).with_entity("group"),
            ));
        }
        if name.chars().count() > self.max_name_length {
            return Err(RepositoryError::validation_with_context(
                "Name too long",
                ErrorContext::new(operation)
                    .with_entity("group")
                    .with_details(format!("max_length={}", self.max_name_length)),
            ));
        }
        Ok(name.to_string())
    }
}

fn trim_to_none(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl IndexService for DefaultIndexService {
    async fn list_groups(
        &self,
        filter: Option<&str>,
        limit: Option<usize>,
        offset: Option<usize>,
        sort: Option<&str>,
        index: &dyn GroupSearchIndex,
    ) -> RepositoryResult<SearchResult<Group>> {
        let organization = self.security.organization();
        let mut query = GroupSearchQuery::new(organization.id);

        if let Some(filter) = filter {
            query = query.with_filter(filter);
        }
        if let Some(sort) = sort {
            query.sort = parse_sort(sort).map_err(|e| e.with_operation("list_groups"))?;
        }
        if let Some(limit) = limit {
            query = query.with_limit(limit);
        }
        if let Some(offset) = offset {
            query = query.with_offset(offset);
        }

        debug!("Searching groups with {:?}", query);
        index
            .search_groups(&query)
            .await
            .map_err(|e| e.with_operation("list_groups"))
    }

    async fn get_group(&self, id: &str, index: &dyn GroupSearchIndex) -> RepositoryResult<Option<Group>> {
        let organization = self.security.organization();
        index.get_group(&organization.id, id).await
    }

    async fn create_group(&self, changes: &GroupChanges) -> RepositoryResult<Group> {
        let organization = self.security.organization();
        let name = self.validate_name(changes.name.as_deref(), "create_group")?;

        let group = Group::from_name(
            organization.id.clone(),
            &name,
            trim_to_none(changes.description.as_deref()),
            split_list(changes.roles.as_deref()),
            split_list(changes.users.as_deref()),
        );

        if !self.index.add_group(&group).await? {
            return Err(RepositoryError::conflict_with_context(
                format!("A group with the name '{}' already exists", name),
                ErrorContext::new("create_group")
                    .with_entity("group")
                    .with_entity_id(&group.identifier),
            ));
        }

        info!(
            "Created group '{}' in organization '{}' by '{}'",
            group.identifier,
            organization.id,
            self.security.user().username
        );
        Ok(group)
    }

    async fn update_group(&self, id: &str, changes: &GroupChanges) -> RepositoryResult<Group> {
        let organization = self.security.organization();
        let mut group = self
            .index
            .get_group(&organization.id, id)
            .await?
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Group {} does not exist.", id),
                    ErrorContext::new("update_group")
                        .with_entity("group")
                        .with_entity_id(id),
                )
            })?;

        let name = self.validate_name(changes.name.as_deref(), "update_group")?;
        group.name = Some(name);
        group.description = trim_to_none(changes.description.as_deref());
        group.roles = split_list(changes.roles.as_deref());
        group.members = split_list(changes.users.as_deref());

        self.index.add_or_update_group(&group).await?;
        info!("Updated group '{}' in organization '{}'", id, organization.id);
        Ok(group)
    }

    async fn remove_group(&self, id: &str) -> RepositoryResult<()> {
        let organization = self.security.organization();
        if !self.index.delete_group(&organization.id, id).await? {
            return Err(RepositoryError::not_found_with_context(
                format!("Group {} does not exist.", id),
                ErrorContext::new("remove_group")
                    .with_entity("group")
                    .with_entity_id(id),
            ));
        }
        info!("Removed group '{}' from organization '{}'", id, organization.id);
        Ok(())
    }
}
