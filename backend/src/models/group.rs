//! Group domain type and the derivations applied when a group is created.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Prefix of the role every group grants to its members.
pub const GROUP_ROLE_PREFIX: &str = "ROLE_GROUP_";

/// A named collection of users and roles, scoped to an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier, derived from the name at creation and never changed
    pub identifier: String,
    /// Organization owning the group
    pub organization: String,
    pub name: Option<String>,
    pub description: Option<String>,
    /// The role granted by membership in this group
    pub role: String,
    /// Additional roles granted to members
    pub roles: BTreeSet<String>,
    /// Member usernames
    pub members: BTreeSet<String>,
}

impl Group {
    /// Build a group whose identifier and role are derived from `name`.
    pub fn from_name(
        organization: impl Into<String>,
        name: &str,
        description: Option<String>,
        roles: BTreeSet<String>,
        members: BTreeSet<String>,
    ) -> Self {
        let identifier = group_id_from_name(name);
        Self {
            role: group_role(&identifier),
            identifier,
            organization: organization.into(),
            name: Some(name.to_string()),
            description,
            roles,
            members,
        }
    }
}

/// Derive a group identifier from its display name.
///
/// The name is lower-cased and every character outside `[a-z0-9_]` becomes `_`.
pub fn group_id_from_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Role granted by a group with the given identifier.
pub fn group_role(identifier: &str) -> String {
    format!("{}{}", GROUP_ROLE_PREFIX, identifier.to_uppercase())
}

/// Split a comma separated list into a set of trimmed, non-empty tokens.
pub fn split_list(value: Option<&str>) -> BTreeSet<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
