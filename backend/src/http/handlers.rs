//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an endpoint of the group facade: it extracts
//! the parameters, delegates to the index service and serializes the result.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    Form, Json,
};
use tracing::{debug, info};

use super::dto::{
    CreatedGroupResponse, GroupDetail, GroupForm, GroupListResponse, GroupSummary,
    HealthResponse, ListGroupsQuery,
};
use super::error::AppError;
use super::state::AppState;
use crate::services::{resolve_members, GroupChanges};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the index is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let index_status = match state.search_index.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        index: index_status,
    }))
}

// =============================================================================
// Group CRUD
// =============================================================================

/// GET {base}/groups.json
///
/// List one page of groups of the current organization.
pub async fn list_groups(
    State(state): State<AppState>,
    Query(query): Query<ListGroupsQuery>,
) -> HandlerResult<GroupListResponse> {
    let limit = query.effective_limit();
    let offset = query.effective_offset();
    debug!(
        organization = %state.security.organization().id,
        limit,
        offset,
        filter = ?query.filter(),
        sort = ?query.sort(),
        "Listing groups"
    );

    let results = state
        .index_service
        .list_groups(
            query.filter(),
            Some(limit),
            Some(offset),
            query.sort(),
            state.search_index.as_ref(),
        )
        .await?;

    let total = results.hit_count;
    let mut summaries = Vec::with_capacity(results.items.len());
    for group in results.items {
        let users = resolve_members(state.user_directory.as_ref(), &group.members).await;
        summaries.push(GroupSummary::new(group, users));
    }

    Ok(Json(GroupListResponse {
        count: summaries.len(),
        results: summaries,
        offset,
        limit,
        total,
    }))
}

/// GET {base}/{id}
///
/// Get the full representation of one group.
pub async fn get_group(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> HandlerResult<GroupDetail> {
    let group = state
        .index_service
        .get_group(&group_id, state.search_index.as_ref())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Group {} does not exist.", group_id)))?;

    let users = resolve_members(state.user_directory.as_ref(), &group.members).await;
    Ok(Json(GroupDetail::new(group, users)))
}

/// POST {base}
///
/// Create a group from form fields. Responds with 201 and the new identifier.
pub async fn create_group(
    State(state): State<AppState>,
    Form(form): Form<GroupForm>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<CreatedGroupResponse>), AppError> {
    let changes = GroupChanges::from(form);
    let group = state.index_service.create_group(&changes).await?;

    info!(group = %group.identifier, "Group created");
    let location = format!("{}/{}", state.base_path, group.identifier);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(CreatedGroupResponse {
            id: group.identifier,
        }),
    ))
}

/// PUT {base}/{id}
///
/// Replace name, description, roles and members of a group.
pub async fn update_group(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    Form(form): Form<GroupForm>,
) -> Result<StatusCode, AppError> {
    let changes = GroupChanges::from(form);
    state.index_service.update_group(&group_id, &changes).await?;
    Ok(StatusCode::OK)
}

/// DELETE {base}/{id}
///
/// Remove a group.
pub async fn remove_group(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.index_service.remove_group(&group_id).await?;
    Ok(StatusCode::OK)
}
