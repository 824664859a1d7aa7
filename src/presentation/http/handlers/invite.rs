//! Invite Handlers
//!
//! HTTP handlers for invite-related endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::application::dto::request::{
    CreateInviteRequest, DeactivateInviteRequest, JoinInviteRequest,
};
use crate::application::dto::response::{
    DeactivateInviteResponse, InviteResponse, InvitesResponse, JoinResponse,
};
use crate::application::services::{CreateInviteDto, InviteError, InviteService};
use crate::domain::InviteState;
use crate::infrastructure::metrics;
use crate::presentation::http::extractors::ApiJson;
use crate::shared::error::AppError;
use crate::shared::validation::{parse_id, validation_error};
use crate::startup::AppState;

/// Helper to convert InviteError to AppError
fn map_invite_error(e: InviteError) -> AppError {
    match e {
        InviteError::NotFound => AppError::NotFound("Invite not found".into()),
        InviteError::Inactive(InviteState::Expired) => {
            AppError::NotFound("Invite has expired".into())
        }
        InviteError::Inactive(_) => AppError::NotFound("Invite has been deactivated".into()),
        InviteError::GroupNotFound => AppError::NotFound("Group not found".into()),
        InviteError::Forbidden => AppError::Forbidden("Permission denied".into()),
        InviteError::AlreadyMember => {
            AppError::Conflict("User is already a member of this group".into())
        }
        InviteError::InvalidInput(msg) => AppError::Validation(msg),
        InviteError::Internal(msg) => AppError::Internal(msg),
    }
}

/// Metric label for a join outcome
fn join_outcome(result: &Result<JoinResponse, InviteError>) -> &'static str {
    match result {
        Ok(_) => "joined",
        Err(InviteError::NotFound) => "not_found",
        Err(InviteError::Inactive(_)) => "inactive",
        Err(InviteError::GroupNotFound) => "group_not_found",
        Err(InviteError::AlreadyMember) => "already_member",
        Err(InviteError::InvalidInput(_)) => "invalid",
        Err(InviteError::Forbidden | InviteError::Internal(_)) => "error",
    }
}

/// Create a new invite for a group
///
/// POST /api/v1/groups/{id}/invites
///
/// ## Request Body
/// - `creator_id`: must be the group creator
/// - `expires_at` (optional): RFC 3339 expiry; omitted means the invite never expires
pub async fn create_invite(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    ApiJson(body): ApiJson<CreateInviteRequest>,
) -> Result<(StatusCode, Json<InviteResponse>), AppError> {
    let group_id = parse_id(&group_id, "group ID")?;
    body.validate().map_err(validation_error)?;

    let request = CreateInviteDto {
        expires_at: body.expires_at,
    };

    let invite = state
        .invites
        .create_invite(group_id, body.creator_id, request)
        .map_err(|e| {
            if e == InviteError::Forbidden {
                tracing::warn!(
                    group_id,
                    creator_id = body.creator_id,
                    "Non-creator tried to create invite"
                );
            }
            map_invite_error(e)
        })?;

    tracing::info!(group_id, expires_at = ?invite.expires_at, "Invite created");

    Ok((StatusCode::CREATED, Json(InviteResponse::from(invite))))
}

/// List the active invites of a group
///
/// GET /api/v1/groups/{id}/invites
pub async fn list_group_invites(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> Result<Json<InvitesResponse>, AppError> {
    let group_id = parse_id(&group_id, "group ID")?;

    let invites: Vec<InviteResponse> = state
        .invites
        .list_active_invites(group_id)
        .map_err(map_invite_error)?
        .into_iter()
        .map(InviteResponse::from)
        .collect();

    Ok(Json(InvitesResponse {
        group_id,
        invite_count: invites.len(),
        invites,
    }))
}

/// Get invite by code
///
/// GET /api/v1/invites/{code}
pub async fn get_invite(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<InviteResponse>, AppError> {
    let invite = state.invites.get_invite(&code).map_err(map_invite_error)?;

    Ok(Json(InviteResponse::from(invite)))
}

/// Join the invite's group
///
/// POST /api/v1/invites/{code}/join
pub async fn join_invite(
    State(state): State<AppState>,
    Path(code): Path<String>,
    ApiJson(body): ApiJson<JoinInviteRequest>,
) -> Result<Json<JoinResponse>, AppError> {
    body.validate().map_err(validation_error)?;

    let result = state
        .invites
        .join(&code, body.user_id, body.nickname)
        .map(JoinResponse::from);
    metrics::record_invite_join(join_outcome(&result));

    match result {
        Ok(joined) => {
            tracing::info!(
                group_id = joined.group_id,
                user_id = joined.user_id,
                "User joined group by invite"
            );
            Ok(Json(joined))
        }
        Err(e) => {
            tracing::info!(user_id = body.user_id, error = %e, "Invite join rejected");
            Err(map_invite_error(e))
        }
    }
}

/// Deactivate an invite (group creator or invite creator)
///
/// DELETE /api/v1/invites/{code}/deactivate
pub async fn deactivate_invite(
    State(state): State<AppState>,
    Path(code): Path<String>,
    ApiJson(body): ApiJson<DeactivateInviteRequest>,
) -> Result<Json<DeactivateInviteResponse>, AppError> {
    body.validate().map_err(validation_error)?;

    state
        .invites
        .deactivate_invite(&code, body.requester_id)
        .map_err(|e| {
            if e == InviteError::Forbidden {
                tracing::warn!(
                    requester_id = body.requester_id,
                    "Requester may not deactivate invite"
                );
            }
            map_invite_error(e)
        })?;

    tracing::info!(requester_id = body.requester_id, "Invite deactivated");

    Ok(Json(DeactivateInviteResponse {
        message: "Invite deactivated successfully".into(),
        invite_code: code,
    }))
}
