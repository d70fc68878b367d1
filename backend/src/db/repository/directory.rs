//! User directory trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::User;

/// Directory resolving usernames to user records.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Load a user by username, `Ok(None)` if the directory does not know it.
    async fn load_user(&self, username: &str) -> RepositoryResult<Option<User>>;

    /// Display name of a user, `None` when the user is unknown or has a blank name.
    async fn resolve_display_name(&self, username: &str) -> RepositoryResult<Option<String>> {
        let user = self.load_user(username).await?;
        Ok(user.and_then(|u| u.display_name().map(str::to_string)))
    }
}
