//! Group Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::application::dto::request::{
    CreateGroupRequest, DeleteGroupRequest, RequesterQuery, UpdateGroupRequest,
};
use crate::application::dto::response::GroupResponse;
use crate::application::services::{CreateGroupDto, GroupError, GroupService, UpdateGroupDto};
use crate::infrastructure::metrics;
use crate::presentation::http::extractors::{ApiJson, ApiQuery};
use crate::shared::error::AppError;
use crate::shared::validation::{parse_id, validation_error};
use crate::startup::AppState;

/// Helper to convert GroupError to AppError
pub(super) fn map_group_error(e: GroupError) -> AppError {
    match e {
        GroupError::NotFound => AppError::NotFound("Group not found".into()),
        GroupError::MemberNotFound => {
            AppError::NotFound("User is not a member of this group".into())
        }
        GroupError::Forbidden => AppError::Forbidden("Permission denied".into()),
        GroupError::AlreadyMember => {
            AppError::Conflict("User is already a member of this group".into())
        }
        GroupError::NameImmutable => AppError::BadRequest("Name field cannot be updated".into()),
        GroupError::InvalidInput(msg) => AppError::Validation(msg),
        GroupError::Internal(msg) => AppError::Internal(msg),
    }
}

/// Create a new group
///
/// POST /api/v1/groups
pub async fn create_group(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateGroupRequest>,
) -> Result<(StatusCode, Json<GroupResponse>), AppError> {
    body.validate().map_err(validation_error)?;

    let end_date = body
        .end_date
        .ok_or_else(|| AppError::BadRequest("Missing required fields: end_date".into()))?;

    let request = CreateGroupDto {
        name: body.name,
        start_date: body.start_date,
        end_date,
        image: body.image,
        description: body.description,
    };

    let group = state
        .groups
        .create_group(body.creator_id, request)
        .map_err(map_group_error)?;

    metrics::record_group_operation("created");
    tracing::info!(group_id = group.id, creator_id = group.creator_id, "Group created");

    Ok((StatusCode::CREATED, Json(GroupResponse::from(group))))
}

/// Get group by ID (members only)
///
/// GET /api/v1/groups/{id}?requester_id=
pub async fn get_group(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    ApiQuery(query): ApiQuery<RequesterQuery>,
) -> Result<Json<GroupResponse>, AppError> {
    let group_id = parse_id(&group_id, "group ID")?;
    query.validate().map_err(validation_error)?;

    let group = state
        .groups
        .get_group(group_id, query.requester_id)
        .map_err(|e| {
            if e == GroupError::Forbidden {
                tracing::warn!(
                    group_id,
                    requester_id = query.requester_id,
                    "Non-member tried to view group"
                );
            }
            map_group_error(e)
        })?;

    Ok(Json(GroupResponse::from(group)))
}

/// Update group
///
/// PUT /api/v1/groups/{id}
pub async fn update_group(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    ApiJson(body): ApiJson<UpdateGroupRequest>,
) -> Result<Json<GroupResponse>, AppError> {
    let group_id = parse_id(&group_id, "group ID")?;

    let update = UpdateGroupDto {
        name: body.name,
        description: body.description,
        image: body.image,
        end_date: body.end_date,
    };

    let group = state
        .groups
        .update_group(group_id, update)
        .map_err(map_group_error)?;

    metrics::record_group_operation("updated");
    tracing::debug!(group_id, "Group updated");

    Ok(Json(GroupResponse::from(group)))
}

/// Delete group (creator only)
///
/// DELETE /api/v1/groups/{id}
pub async fn delete_group(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    ApiJson(body): ApiJson<DeleteGroupRequest>,
) -> Result<StatusCode, AppError> {
    let group_id = parse_id(&group_id, "group ID")?;
    body.validate().map_err(validation_error)?;

    state
        .groups
        .delete_group(group_id, body.creator_id)
        .map_err(|e| {
            if e == GroupError::Forbidden {
                tracing::warn!(
                    group_id,
                    creator_id = body.creator_id,
                    "Non-creator tried to delete group"
                );
            }
            map_group_error(e)
        })?;

    metrics::record_group_operation("deleted");
    tracing::info!(group_id, "Group deleted");

    Ok(StatusCode::NO_CONTENT)
}
