//! Repository configuration file support.
//!
//! This module reads the collaborator configuration (`repository.toml`):
//! which backend to use, the organization the service acts for, group name
//! limits and optional seed data for the in-memory collaborators.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::factory::RepositoryType;
use super::repository::RepositoryError;
use crate::models::{group_id_from_name, User};

/// Environment variable pointing at an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "GROUPS_CONFIG";

const DEFAULT_LOCATIONS: [&str; 3] = ["repository.toml", "backend/repository.toml", "../repository.toml"];

/// Longest group name accepted unless configured otherwise.
pub const DEFAULT_MAX_NAME_LENGTH: usize = 128;

/// Repository configuration from file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryConfig {
    #[serde(default)]
    pub repository: RepositorySettings,
    #[serde(default)]
    pub organization: OrganizationSettings,
    #[serde(default)]
    pub security: SecuritySettings,
    #[serde(default)]
    pub groups: GroupSettings,
    #[serde(default)]
    pub seed: SeedData,
}

/// Repository type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type", default = "default_repo_type")]
    pub repo_type: String,
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: default_repo_type(),
        }
    }
}

/// Organization every request is scoped to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationSettings {
    #[serde(default = "default_organization_id")]
    pub id: String,
    #[serde(default = "default_organization_name")]
    pub name: String,
}

impl Default for OrganizationSettings {
    fn default() -> Self {
        Self {
            id: default_organization_id(),
            name: default_organization_name(),
        }
    }
}

/// User the static security service reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecuritySettings {
    #[serde(default = "default_username")]
    pub username: String,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            username: default_username(),
        }
    }
}

/// Group validation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSettings {
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,
}

impl Default for GroupSettings {
    fn default() -> Self {
        Self {
            max_name_length: default_max_name_length(),
        }
    }
}

/// Initial content for the in-memory collaborators.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub groups: Vec<SeedGroup>,
}

/// A group created at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedGroup {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub members: Vec<String>,
}

fn default_repo_type() -> String {
    "local".to_string()
}

fn default_organization_id() -> String {
    "default_org".to_string()
}

fn default_organization_name() -> String {
    "Default Organization".to_string()
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_max_name_length() -> usize {
    DEFAULT_MAX_NAME_LENGTH
}

impl FromStr for RepositoryConfig {
    type Err = RepositoryError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let config: RepositoryConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}

impl RepositoryConfig {
    /// Load repository configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(RepositoryConfig)` if successful
    /// * `Err(RepositoryError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        content.parse()
    }

    /// Load repository configuration from the default location.
    ///
    /// Searches for `repository.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, RepositoryError> {
        for path in DEFAULT_LOCATIONS.iter().map(PathBuf::from) {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(RepositoryError::configuration(
            "No repository.toml found in standard locations",
        ))
    }

    /// Resolve the configuration the server should run with.
    ///
    /// Order: `GROUPS_CONFIG`, then the default locations, then built-in defaults.
    pub fn load() -> Result<Self, RepositoryError> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Self::from_file(path);
        }

        if DEFAULT_LOCATIONS.iter().any(|p| Path::new(p).exists()) {
            return Self::from_default_location();
        }

        log::info!("No repository.toml found, using built-in defaults");
        Ok(Self::default())
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, RepositoryError> {
        RepositoryType::from_str(&self.repository.repo_type)
    }

    fn validate(&self) -> Result<(), RepositoryError> {
        self.repository_type()?;
        if self.organization.id.trim().is_empty() {
            return Err(RepositoryError::configuration(
                "organization.id must not be empty",
            ));
        }
        if self.groups.max_name_length == 0 {
            return Err(RepositoryError::configuration(
                "groups.max_name_length must be at least 1",
            ));
        }
        self.validate_seed_groups()
    }

    // Seed groups obey the same name rules as groups created over HTTP, and
    // no two of them may derive the same identifier.
    fn validate_seed_groups(&self) -> Result<(), RepositoryError> {
        let mut seen: HashMap<String, &str> = HashMap::new();
        for seed in &self.seed.groups {
            let name = seed.name.trim();
            if name.is_empty() {
                return Err(RepositoryError::configuration(
                    "seed.groups entries need a non-blank name",
                ));
            }
            if name.chars().count() > self.groups.max_name_length {
                return Err(RepositoryError::configuration(format!(
                    "seed group '{}' is longer than groups.max_name_length ({})",
                    name, self.groups.max_name_length
                )));
            }
            let identifier = group_id_from_name(name);
            if let Some(previous) = seen.insert(identifier.clone(), name) {
                return Err(RepositoryError::configuration(format!(
                    "seed groups '{}' and '{}' both map to identifier '{}'",
                    previous, name, identifier
                )));
            }
        }
        Ok(())
    }
}
