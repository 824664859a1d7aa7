//! Request DTOs
//!
//! Data structures for API request bodies and query strings.
//!
//! Actor and target IDs default to 0 when absent so that a missing field is
//! reported through validation rather than as a deserialization failure.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use validator::Validate;

/// Requester identification passed as a query parameter
#[derive(Debug, Deserialize, Validate)]
pub struct RequesterQuery {
    #[serde(default)]
    #[validate(range(min = 1, message = "requester_id is required"))]
    pub requester_id: i64,
}

/// Create group request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateGroupRequest {
    #[serde(default)]
    #[validate(range(min = 1, message = "creator_id is required"))]
    pub creator_id: i64,

    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub image: Option<String>,
    pub description: Option<String>,
}

/// Update group request
///
/// `name` is accepted only so that a rename attempt can be refused.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateGroupRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub end_date: Option<NaiveDate>,
}

/// Delete group request
#[derive(Debug, Deserialize, Validate)]
pub struct DeleteGroupRequest {
    #[serde(default)]
    #[validate(range(min = 1, message = "creator_id is required"))]
    pub creator_id: i64,
}

/// Add member request
#[derive(Debug, Deserialize, Validate)]
pub struct AddMemberRequest {
    #[serde(default)]
    #[validate(range(min = 1, message = "user_id is required"))]
    pub user_id: i64,
}

/// Remove member request
#[derive(Debug, Deserialize, Validate)]
pub struct RemoveMemberRequest {
    #[serde(default)]
    #[validate(range(min = 1, message = "user_id is required"))]
    pub user_id: i64,

    #[serde(default)]
    #[validate(range(min = 1, message = "requester_id is required"))]
    pub requester_id: i64,
}

/// Set nickname request; an absent or empty nickname clears it
#[derive(Debug, Deserialize, Validate)]
pub struct SetNicknameRequest {
    #[serde(default)]
    #[validate(range(min = 1, message = "user_id is required"))]
    pub user_id: i64,

    #[serde(default)]
    #[validate(range(min = 1, message = "requester_id is required"))]
    pub requester_id: i64,

    #[validate(length(max = 50, message = "Nickname cannot be longer than 50 characters"))]
    pub nickname: Option<String>,
}

/// Delete nickname request
#[derive(Debug, Deserialize, Validate)]
pub struct DeleteNicknameRequest {
    #[serde(default)]
    #[validate(range(min = 1, message = "user_id is required"))]
    pub user_id: i64,

    #[serde(default)]
    #[validate(range(min = 1, message = "requester_id is required"))]
    pub requester_id: i64,
}

/// Create invite request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateInviteRequest {
    #[serde(default)]
    #[validate(range(min = 1, message = "creator_id is required"))]
    pub creator_id: i64,

    /// RFC 3339 timestamp; omitted means the invite never expires
    pub expires_at: Option<DateTime<Utc>>,
}

/// Join by invite request
#[derive(Debug, Deserialize, Validate)]
pub struct JoinInviteRequest {
    #[serde(default)]
    #[validate(range(min = 1, message = "user_id is required"))]
    pub user_id: i64,

    #[validate(length(max = 50, message = "Nickname cannot be longer than 50 characters"))]
    pub nickname: Option<String>,
}

/// Deactivate invite request
#[derive(Debug, Deserialize, Validate)]
pub struct DeactivateInviteRequest {
    #[serde(default)]
    #[validate(range(min = 1, message = "requester_id is required"))]
    pub requester_id: i64,
}
