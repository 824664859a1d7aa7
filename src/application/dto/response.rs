//! Response DTOs
//!
//! Data structures for API response bodies.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::application::services::{GroupDto, InviteDto, JoinResultDto, MemberDto};
use crate::domain::InviteState;

/// Group response
#[derive(Debug, Serialize)]
pub struct GroupResponse {
    pub id: i64,
    pub creator_id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub image: Option<String>,
    pub description: Option<String>,
    pub member_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GroupDto> for GroupResponse {
    fn from(dto: GroupDto) -> Self {
        Self {
            id: dto.id,
            creator_id: dto.creator_id,
            name: dto.name,
            start_date: dto.start_date,
            end_date: dto.end_date,
            image: dto.image,
            description: dto.description,
            member_count: dto.member_count,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}

/// Groups of a user
#[derive(Debug, Serialize)]
pub struct UserGroupsResponse {
    pub user_id: i64,
    pub groups: Vec<GroupResponse>,
    pub group_count: usize,
}

/// Member response
#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub group_id: i64,
    pub user_id: i64,
    pub nickname: Option<String>,
    pub joined_at: DateTime<Utc>,
}

impl From<MemberDto> for MemberResponse {
    fn from(dto: MemberDto) -> Self {
        Self {
            group_id: dto.group_id,
            user_id: dto.user_id,
            nickname: dto.nickname,
            joined_at: dto.joined_at,
        }
    }
}

/// Members of a group
#[derive(Debug, Serialize)]
pub struct MembersResponse {
    pub group_id: i64,
    pub members: Vec<MemberResponse>,
    pub member_count: usize,
}

/// Outcome of adding or removing a member
#[derive(Debug, Serialize)]
pub struct MembershipChangeResponse {
    pub message: String,
    pub group_id: i64,
    pub user_id: i64,
}

/// Outcome of setting or clearing a nickname
#[derive(Debug, Serialize)]
pub struct NicknameResponse {
    pub message: String,
    pub group_id: i64,
    pub user_id: i64,
    pub nickname: Option<String>,
}

/// Invite response
#[derive(Debug, Serialize)]
pub struct InviteResponse {
    pub code: String,
    pub group_id: i64,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub state: InviteState,
    pub uses: u32,
}

impl From<InviteDto> for InviteResponse {
    fn from(dto: InviteDto) -> Self {
        Self {
            code: dto.code,
            group_id: dto.group_id,
            created_by: dto.created_by,
            created_at: dto.created_at,
            expires_at: dto.expires_at,
            is_active: dto.is_active,
            state: dto.state,
            uses: dto.uses,
        }
    }
}

/// Active invites of a group
#[derive(Debug, Serialize)]
pub struct InvitesResponse {
    pub group_id: i64,
    pub invites: Vec<InviteResponse>,
    pub invite_count: usize,
}

/// Outcome of joining through an invite
#[derive(Debug, Serialize)]
pub struct JoinResponse {
    pub message: String,
    pub invite_code: String,
    pub group_id: i64,
    pub user_id: i64,
    pub nickname: Option<String>,
    pub joined_at: DateTime<Utc>,
}

impl From<JoinResultDto> for JoinResponse {
    fn from(dto: JoinResultDto) -> Self {
        Self {
            message: "Successfully joined group".to_string(),
            invite_code: dto.invite_code,
            group_id: dto.group_id,
            user_id: dto.user_id,
            nickname: dto.nickname,
            joined_at: dto.joined_at,
        }
    }
}

/// Outcome of deactivating an invite
#[derive(Debug, Serialize)]
pub struct DeactivateInviteResponse {
    pub message: String,
    pub invite_code: String,
}
