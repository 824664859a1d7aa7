//! User Handlers

use axum::{
    extract::{Path, State},
    Json,
};

use super::group::map_group_error;
use crate::application::dto::response::{GroupResponse, UserGroupsResponse};
use crate::application::services::GroupService;
use crate::shared::error::AppError;
use crate::shared::validation::parse_id;
use crate::startup::AppState;

/// List the groups a user belongs to
///
/// GET /api/v1/users/{id}/groups
pub async fn get_user_groups(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserGroupsResponse>, AppError> {
    let user_id = parse_id(&user_id, "user ID")?;

    let groups: Vec<GroupResponse> = state
        .groups
        .list_user_groups(user_id)
        .map_err(map_group_error)?
        .into_iter()
        .map(GroupResponse::from)
        .collect();

    Ok(Json(UserGroupsResponse {
        user_id,
        group_count: groups.len(),
        groups,
    }))
}
