//! Data Transfer Objects for the HTTP API.
//!
//! Query strings and form bodies are deserialized into the request types;
//! groups are serialized through the summary and detail types.

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::Group;
use crate::services::{GroupChanges, MemberView};

/// Page size used when the client sends no limit or one below 1.
pub const DEFAULT_LIMIT: usize = 100;

/// Query parameters for the group list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ListGroupsQuery {
    /// `key:value,key:value` filter
    #[serde(default)]
    pub filter: Option<String>,
    /// Sort fields, e.g. `NAME` or `ROLE_DESC`
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub offset: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub limit: Option<i64>,
}

impl ListGroupsQuery {
    /// Requested page size; anything below 1 falls back to [`DEFAULT_LIMIT`].
    pub fn effective_limit(&self) -> usize {
        match self.limit {
            Some(limit) if limit >= 1 => limit as usize,
            _ => DEFAULT_LIMIT,
        }
    }

    /// Requested offset; negative values are treated as 0.
    pub fn effective_offset(&self) -> usize {
        self.offset.unwrap_or(0).max(0) as usize
    }

    pub fn filter(&self) -> Option<&str> {
        non_blank(self.filter.as_deref())
    }

    pub fn sort(&self) -> Option<&str> {
        non_blank(self.sort.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// `?limit=` arrives as an empty string rather than a missing key.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Form body for creating or updating a group.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GroupForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Comma separated roles
    #[serde(default)]
    pub roles: Option<String>,
    /// Comma separated member usernames
    #[serde(default)]
    pub users: Option<String>,
}

impl From<GroupForm> for GroupChanges {
    fn from(form: GroupForm) -> Self {
        Self {
            name: form.name,
            description: form.description,
            roles: form.roles,
            users: form.users,
        }
    }
}

/// Group entry in a list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSummary {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub role: String,
    pub users: Vec<MemberView>,
}

impl GroupSummary {
    pub fn new(group: Group, users: Vec<MemberView>) -> Self {
        Self {
            id: group.identifier,
            name: group.name,
            description: group.description,
            role: group.role,
            users,
        }
    }
}

/// Full representation of a single group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupDetail {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub role: String,
    pub roles: Vec<String>,
    pub users: Vec<MemberView>,
}

impl GroupDetail {
    pub fn new(group: Group, users: Vec<MemberView>) -> Self {
        Self {
            id: group.identifier,
            name: group.name,
            description: group.description,
            role: group.role,
            roles: group.roles.into_iter().collect(),
            users,
        }
    }
}

/// Paged list of groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupListResponse {
    pub results: Vec<GroupSummary>,
    /// Number of results in this page
    pub count: usize,
    pub offset: usize,
    pub limit: usize,
    /// Number of groups matching the query
    pub total: u64,
}

/// Response for group creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedGroupResponse {
    /// Identifier assigned to the new group
    pub id: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Search index connection status
    pub index: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(limit: Option<i64>, offset: Option<i64>) -> ListGroupsQuery {
        ListGroupsQuery {
            limit,
            offset,
            ..Default::default()
        }
    }

    #[test]
    fn test_limit_below_one_uses_default() {
        assert_eq!(query(None, None).effective_limit(), DEFAULT_LIMIT);
        assert_eq!(query(Some(0), None).effective_limit(), DEFAULT_LIMIT);
        assert_eq!(query(Some(-5), None).effective_limit(), DEFAULT_LIMIT);
        assert_eq!(query(Some(7), None).effective_limit(), 7);
    }

    #[test]
    fn test_negative_offset_is_zero() {
        assert_eq!(query(None, Some(-3)).effective_offset(), 0);
        assert_eq!(query(None, Some(40)).effective_offset(), 40);
    }

    #[test]
    fn test_blank_filter_and_sort_are_ignored() {
        let q = ListGroupsQuery {
            filter: Some("  ".to_string()),
            sort: Some(" NAME ".to_string()),
            ..Default::default()
        };
        assert_eq!(q.filter(), None);
        assert_eq!(q.sort(), Some("NAME"));
    }
}
