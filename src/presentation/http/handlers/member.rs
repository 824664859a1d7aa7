//! Membership Handlers
//!
//! Group membership and nickname endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use super::group::map_group_error;
use crate::application::dto::request::{
    AddMemberRequest, DeleteNicknameRequest, RemoveMemberRequest, RequesterQuery,
    SetNicknameRequest,
};
use crate::application::dto::response::{
    MemberResponse, MembersResponse, MembershipChangeResponse, NicknameResponse,
};
use crate::application::services::{GroupError, GroupService};
use crate::presentation::http::extractors::{ApiJson, ApiQuery};
use crate::shared::error::AppError;
use crate::shared::validation::{parse_id, validation_error};
use crate::startup::AppState;

/// List group members (members only)
///
/// GET /api/v1/groups/{id}/members?requester_id=
pub async fn list_members(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    ApiQuery(query): ApiQuery<RequesterQuery>,
) -> Result<Json<MembersResponse>, AppError> {
    let group_id = parse_id(&group_id, "group ID")?;
    query.validate().map_err(validation_error)?;

    let members: Vec<MemberResponse> = state
        .groups
        .list_members(group_id, query.requester_id)
        .map_err(map_group_error)?
        .into_iter()
        .map(MemberResponse::from)
        .collect();

    Ok(Json(MembersResponse {
        group_id,
        member_count: members.len(),
        members,
    }))
}

/// Add a user to a group
///
/// POST /api/v1/groups/{id}/members
pub async fn add_member(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    ApiJson(body): ApiJson<AddMemberRequest>,
) -> Result<(StatusCode, Json<MembershipChangeResponse>), AppError> {
    let group_id = parse_id(&group_id, "group ID")?;
    body.validate().map_err(validation_error)?;

    let member = state
        .groups
        .add_member(group_id, body.user_id)
        .map_err(|e| {
            if e == GroupError::AlreadyMember {
                tracing::info!(group_id, user_id = body.user_id, "User is already a member");
            }
            map_group_error(e)
        })?;

    Ok((
        StatusCode::CREATED,
        Json(MembershipChangeResponse {
            message: "User added to group successfully".into(),
            group_id: member.group_id,
            user_id: member.user_id,
        }),
    ))
}

/// Remove a member (group creator or the member themselves)
///
/// DELETE /api/v1/groups/{id}/members
pub async fn remove_member(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    ApiJson(body): ApiJson<RemoveMemberRequest>,
) -> Result<Json<MembershipChangeResponse>, AppError> {
    let group_id = parse_id(&group_id, "group ID")?;
    body.validate().map_err(validation_error)?;

    state
        .groups
        .remove_member(group_id, body.requester_id, body.user_id)
        .map_err(|e| {
            if e == GroupError::Forbidden {
                tracing::warn!(
                    group_id,
                    requester_id = body.requester_id,
                    user_id = body.user_id,
                    "Requester may not remove this member"
                );
            }
            map_group_error(e)
        })?;

    Ok(Json(MembershipChangeResponse {
        message: "User removed from group successfully".into(),
        group_id,
        user_id: body.user_id,
    }))
}

/// Set a member's nickname
///
/// PUT /api/v1/groups/{id}/members/nickname
pub async fn set_nickname(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    ApiJson(body): ApiJson<SetNicknameRequest>,
) -> Result<Json<NicknameResponse>, AppError> {
    let group_id = parse_id(&group_id, "group ID")?;
    body.validate().map_err(validation_error)?;

    let member = state
        .groups
        .set_nickname(group_id, body.requester_id, body.user_id, body.nickname)
        .map_err(map_group_error)?;

    Ok(Json(NicknameResponse {
        message: "Nickname updated successfully".into(),
        group_id,
        user_id: member.user_id,
        nickname: member.nickname,
    }))
}

/// Clear a member's nickname
///
/// DELETE /api/v1/groups/{id}/members/nickname
pub async fn delete_nickname(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    ApiJson(body): ApiJson<DeleteNicknameRequest>,
) -> Result<Json<NicknameResponse>, AppError> {
    let group_id = parse_id(&group_id, "group ID")?;
    body.validate().map_err(validation_error)?;

    let member = state
        .groups
        .delete_nickname(group_id, body.requester_id, body.user_id)
        .map_err(map_group_error)?;

    Ok(Json(NicknameResponse {
        message: "Nickname deleted successfully".into(),
        group_id,
        user_id: member.user_id,
        nickname: None,
    }))
}
