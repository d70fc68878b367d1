//! Group search queries: filter and sort parsing plus paged results.
//!
//! Filters use the `key:value,key:value` syntax of the admin UI. Sort
//! specifications are comma separated field names with an optional `_DESC`
//! (or `_ASC`) suffix, e.g. `NAME,ROLE_DESC`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::Serialize;

use super::repository::{ErrorContext, RepositoryError, RepositoryResult};
use crate::models::Group;

/// Filter key matching the group name exactly (case-insensitive).
pub const FILTER_NAME: &str = "name";
/// Filter key matching free text across all group fields.
pub const FILTER_TEXT: &str = "textFilter";

/// Fields a group listing can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupSortField {
    Name,
    Description,
    Role,
}

impl FromStr for GroupSortField {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NAME" => Ok(Self::Name),
            "DESCRIPTION" => Ok(Self::Description),
            "ROLE" => Ok(Self::Role),
            _ => Err(RepositoryError::validation_with_context(
                format!("Unknown sort field: {}", s),
                ErrorContext::new("parse_sort").with_entity("group"),
            )),
        }
    }
}

impl fmt::Display for GroupSortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Name => "NAME",
            Self::Description => "DESCRIPTION",
            Self::Role => "ROLE",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// One field of a sort specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortCriterion {
    pub field: GroupSortField,
    pub order: SortOrder,
}

impl FromStr for SortCriterion {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let upper = token.to_uppercase();
        let (field, order) = if let Some(field) = upper.strip_suffix("_DESC") {
            (field, SortOrder::Descending)
        } else if let Some(field) = upper.strip_suffix("_ASC") {
            (field, SortOrder::Ascending)
        } else {
            (upper.as_str(), SortOrder::Ascending)
        };

        Ok(Self {
            field: field.parse()?,
            order,
        })
    }
}

/// Parse a comma separated sort specification.
pub fn parse_sort(spec: &str) -> RepositoryResult<Vec<SortCriterion>> {
    spec.split(',')
        .filter(|token| !token.trim().is_empty())
        .map(str::parse)
        .collect()
}

/// Parse a `key:value,key:value` filter into its pairs.
///
/// Tokens without a value are skipped.
pub fn parse_filter(filter: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for token in filter.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        match token.split_once(':') {
            Some((key, value)) if !value.trim().is_empty() => {
                pairs.push((key.trim().to_string(), value.trim().to_string()));
            }
            _ => debug!("No value for filter '{}' in filters list '{}'", token, filter),
        }
    }
    pairs
}

/// A query against the group search index.
#[derive(Debug, Clone, Default)]
pub struct GroupSearchQuery {
    pub organization: String,
    pub name: Option<String>,
    pub text: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub sort: Vec<SortCriterion>,
}

impl GroupSearchQuery {
    pub fn new(organization: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn sort_by(mut self, field: GroupSortField, order: SortOrder) -> Self {
        self.sort.push(SortCriterion { field, order });
        self
    }

    /// Apply the supported filter pairs; unknown keys are ignored.
    pub fn with_filter(mut self, filter: &str) -> Self {
        for (key, value) in parse_filter(filter) {
            match key.as_str() {
                FILTER_NAME => self.name = Some(value),
                FILTER_TEXT => self.text = Some(value),
                other => debug!("Ignoring unknown group filter '{}'", other),
            }
        }
        self
    }

    /// Whether a group satisfies the organization, name and text filters.
    pub fn matches(&self, group: &Group) -> bool {
        if group.organization != self.organization {
            return false;
        }

        if let Some(ref name) = self.name {
            let wanted = name.to_lowercase();
            let matches_name = group
                .name
                .as_deref()
                .map(|n| n.to_lowercase() == wanted)
                .unwrap_or(false);
            if !matches_name {
                return false;
            }
        }

        if let Some(ref text) = self.text {
            let needle = text.to_lowercase();
            let contains = |value: &str| value.to_lowercase().contains(&needle);
            let hit = contains(&group.identifier)
                || group.name.as_deref().map(contains).unwrap_or(false)
                || group.description.as_deref().map(contains).unwrap_or(false)
                || contains(&group.role)
                || group.roles.iter().any(|r| contains(r))
                || group.members.iter().any(|m| contains(m));
            if !hit {
                return false;
            }
        }

        true
    }

    /// Compare two groups according to the sort criteria, falling back to the identifier.
    pub fn compare(&self, a: &Group, b: &Group) -> Ordering {
        for criterion in &self.sort {
            let ordering = match criterion.field {
                GroupSortField::Name => compare_optional(&a.name, &b.name),
                GroupSortField::Description => compare_optional(&a.description, &b.description),
                GroupSortField::Role => a.role.to_lowercase().cmp(&b.role.to_lowercase()),
            };
            let ordering = match criterion.order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        a.identifier.cmp(&b.identifier)
    }
}

// Missing values sort first in ascending order.
fn compare_optional(a: &Option<String>, b: &Option<String>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// A page of search results together with the total number of hits.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult<T> {
    pub items: Vec<T>,
    /// Number of documents matching the query, independent of paging
    pub hit_count: u64,
    pub offset: usize,
    pub limit: Option<usize>,
}

impl<T> SearchResult<T> {
    /// Number of items in this page.
    pub fn page_size(&self) -> usize {
        self.items.len()
    }
}
