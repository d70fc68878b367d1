//! Collaborator factory for dependency injection.
//!
//! This module builds the four collaborators the facade needs (search index,
//! security service, user directory and index service) from runtime
//! configuration.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use log::info;

use super::repo_config::RepositoryConfig;
use super::repositories::{LocalGroupIndex, LocalUserDirectory, StaticSecurityService};
use super::repository::{
    GroupSearchIndex, RepositoryError, RepositoryResult, SecurityService, UserDirectory,
};
use crate::models::{split_list, Group, Organization, User};
use crate::services::{DefaultIndexService, IndexService};

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory local collaborators
    Local,
}

impl FromStr for RepositoryType {
    type Err = RepositoryError;

    /// Parse repository type from string ("local", "memory").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" | "memory" => Ok(Self::Local),
            _ => Err(RepositoryError::configuration(format!(
                "Unknown repository type: {}",
                s
            ))),
        }
    }
}

/// The collaborators injected into the HTTP facade.
#[derive(Clone)]
pub struct Collaborators {
    pub search_index: Arc<dyn GroupSearchIndex>,
    pub security: Arc<dyn SecurityService>,
    pub user_directory: Arc<dyn UserDirectory>,
    pub index_service: Arc<dyn IndexService>,
}

/// Factory for creating collaborator instances.
///
/// # Example
/// ```
/// use admin_groups::db::{RepositoryConfig, RepositoryFactory};
///
/// let collaborators = RepositoryFactory::create_local(&RepositoryConfig::default());
/// assert_eq!(collaborators.security.organization().id, "default_org");
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create collaborators of the configured type.
    pub fn create(config: &RepositoryConfig) -> RepositoryResult<Collaborators> {
        match config.repository_type()? {
            RepositoryType::Local => Ok(Self::create_local(config)),
        }
    }

    /// Create in-memory collaborators, seeded from the configuration.
    pub fn create_local(config: &RepositoryConfig) -> Collaborators {
        let organization = Organization::new(&config.organization.id, &config.organization.name);

        let directory = LocalUserDirectory::new();
        for user in &config.seed.users {
            directory.add_user(user.clone());
        }

        let index = LocalGroupIndex::new();
        for seed in &config.seed.groups {
            index.insert(Group::from_name(
                organization.id.clone(),
                seed.name.trim(),
                seed.description.clone(),
                split_list(Some(seed.roles.join(",").as_str())),
                split_list(Some(seed.members.join(",").as_str())),
            ));
        }
        info!(
            "Local collaborators ready: {} groups, {} users, organization '{}'",
            index.group_count(),
            directory.user_count(),
            organization.id
        );

        let security = Arc::new(StaticSecurityService::new(
            organization,
            User::new(&config.security.username),
        ));
        Self::assemble(
            Arc::new(index),
            security,
            Arc::new(directory),
            config.groups.max_name_length,
        )
    }

    /// Wire explicit collaborators together with a [`DefaultIndexService`].
    ///
    /// The index service writes to the same search index the facade reads from.
    pub fn assemble(
        search_index: Arc<dyn GroupSearchIndex>,
        security: Arc<dyn SecurityService>,
        user_directory: Arc<dyn UserDirectory>,
        max_name_length: usize,
    ) -> Collaborators {
        let index_service = DefaultIndexService::new(security.clone(), search_index.clone())
            .with_max_name_length(max_name_length);

        Collaborators {
            search_index,
            security,
            user_directory,
            index_service: Arc::new(index_service),
        }
    }

    /// Create collaborators from a TOML configuration file.
    pub fn from_config_file<P: AsRef<Path>>(config_path: P) -> RepositoryResult<Collaborators> {
        let config = RepositoryConfig::from_file(config_path)?;
        Self::create(&config)
    }

    /// Create collaborators from `GROUPS_CONFIG`, the default locations or defaults.
    ///
    /// `REPOSITORY_TYPE` overrides the type named in the file.
    pub fn from_env() -> RepositoryResult<Collaborators> {
        let mut config = RepositoryConfig::load()?;
        if let Ok(repo_type) = std::env::var("REPOSITORY_TYPE") {
            config.repository.repo_type = repo_type;
        }
        Self::create(&config)
    }
}
