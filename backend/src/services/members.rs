//! Member display-name resolution.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::db::repository::UserDirectory;

/// A group member as shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberView {
    pub username: String,
    /// Directory display name, or the username when the directory has none
    pub name: String,
}

/// Resolve the display name of a single member.
///
/// Unknown users, blank names and directory failures all fall back to the username.
pub async fn resolve_member(directory: &dyn UserDirectory, username: &str) -> MemberView {
    let name = match directory.resolve_display_name(username).await {
        Ok(Some(name)) => name,
        Ok(None) => username.to_string(),
        Err(e) => {
            warn!("Could not resolve user '{}': {}", username, e);
            username.to_string()
        }
    };

    MemberView {
        username: username.to_string(),
        name,
    }
}

/// Resolve every member of a group.
pub async fn resolve_members(
    directory: &dyn UserDirectory,
    members: &BTreeSet<String>,
) -> Vec<MemberView> {
    let mut views = Vec::with_capacity(members.len());
    for username in members {
        views.push(resolve_member(directory, username).await);
    }
    views
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalUserDirectory;
    use crate::db::repository::{RepositoryError, RepositoryResult};
    use crate::models::{split_list, User};
    use async_trait::async_trait;

    struct FailingDirectory;

    #[async_trait]
    impl UserDirectory for FailingDirectory {
        async fn load_user(&self, _username: &str) -> RepositoryResult<Option<User>> {
            Err(RepositoryError::internal("directory offline"))
        }
    }

    #[tokio::test]
    async fn test_members_fall_back_to_username() {
        let directory = LocalUserDirectory::new();
        directory.add_user(User::new("alice").with_name("Alice Liddell"));
        directory.add_user(User::new("blank").with_name(""));

        let views = resolve_members(&directory, &split_list(Some("alice,blank,ghost"))).await;

        assert_eq!(views.len(), 3);
        assert!(views.contains(&MemberView {
            username: "alice".to_string(),
            name: "Alice Liddell".to_string()
        }));
        assert!(views.contains(&MemberView {
            username: "blank".to_string(),
            name: "blank".to_string()
        }));
        assert!(views.contains(&MemberView {
            username: "ghost".to_string(),
            name: "ghost".to_string()
        }));
    }

    #[tokio::test]
    async fn test_directory_failure_falls_back_to_username() {
        let view = resolve_member(&FailingDirectory, "carol").await;
        assert_eq!(view.name, "carol");
    }
}
