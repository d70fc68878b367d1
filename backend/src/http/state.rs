//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::factory::Collaborators;
use crate::db::repository::{GroupSearchIndex, SecurityService, UserDirectory};
use crate::services::IndexService;

/// Path the group endpoints are mounted under unless configured otherwise.
pub const DEFAULT_BASE_PATH: &str = "/admin-ng/groups";

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Search index the list and detail queries run against
    pub search_index: Arc<dyn GroupSearchIndex>,
    /// Current organization and user
    pub security: Arc<dyn SecurityService>,
    /// Resolves member display names
    pub user_directory: Arc<dyn UserDirectory>,
    /// Group operations
    pub index_service: Arc<dyn IndexService>,
    /// Mount point of the group routes, without a trailing slash
    pub base_path: String,
}

impl AppState {
    /// Create a new application state from injected collaborators.
    pub fn new(collaborators: Collaborators) -> Self {
        Self {
            search_index: collaborators.search_index,
            security: collaborators.security,
            user_directory: collaborators.user_directory,
            index_service: collaborators.index_service,
            base_path: DEFAULT_BASE_PATH.to_string(),
        }
    }

    /// Mount the group routes somewhere else; `""` or `"/"` mounts them at the root.
    pub fn with_base_path(mut self, base_path: &str) -> Self {
        let trimmed = base_path.trim().trim_end_matches('/');
        self.base_path = if trimmed.is_empty() || trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{}", trimmed)
        };
        self
    }
}
