//! Invite Service
//!
//! Handles invite link creation, lookup, deactivation and joining.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{
    validate_nickname, AuthorizationPolicy, Group, GroupRepository, InviteLink, InviteRepository,
    InviteState, JoinError, Membership,
};
use crate::shared::error::AppError;

/// Invite service trait
pub trait InviteService: Send + Sync {
    /// Create an invite for a group (group creator only)
    fn create_invite(
        &self,
        group_id: i64,
        actor_id: i64,
        request: CreateInviteDto,
    ) -> Result<InviteDto, InviteError>;

    /// Look up an invite by code
    fn get_invite(&self, code: &str) -> Result<InviteDto, InviteError>;

    /// List the active invites of a group
    fn list_active_invites(&self, group_id: i64) -> Result<Vec<InviteDto>, InviteError>;

    /// Deactivate an invite (group creator or invite creator)
    fn deactivate_invite(&self, code: &str, actor_id: i64) -> Result<(), InviteError>;

    /// Join the invite's group
    fn join(
        &self,
        code: &str,
        user_id: i64,
        nickname: Option<String>,
    ) -> Result<JoinResultDto, InviteError>;
}

/// Create invite request
#[derive(Debug, Clone, Default)]
pub struct CreateInviteDto {
    /// `None` means the invite never expires
    pub expires_at: Option<DateTime<Utc>>,
}

/// Invite data transfer object
#[derive(Debug, Clone, PartialEq)]
pub struct InviteDto {
    pub code: String,
    pub group_id: i64,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub state: InviteState,
    pub uses: u32,
}

impl InviteDto {
    pub fn from_invite(invite: InviteLink, now: DateTime<Utc>) -> Self {
        let state = invite.state_at(now);
        Self {
            code: invite.code,
            group_id: invite.group_id,
            created_by: invite.created_by,
            created_at: invite.created_at,
            expires_at: invite.expires_at,
            is_active: state == InviteState::Active,
            state,
            uses: invite.uses,
        }
    }
}

/// Result of joining a group through an invite
#[derive(Debug, Clone, PartialEq)]
pub struct JoinResultDto {
    pub invite_code: String,
    pub group_id: i64,
    pub user_id: i64,
    pub nickname: Option<String>,
    pub joined_at: DateTime<Utc>,
}

impl JoinResultDto {
    fn new(code: &str, membership: Membership) -> Self {
        Self {
            invite_code: code.to_string(),
            group_id: membership.group_id,
            user_id: membership.user_id,
            nickname: membership.nickname,
            joined_at: membership.joined_at,
        }
    }
}

/// Invite service errors
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum InviteError {
    #[error("Invite not found")]
    NotFound,

    #[error("Invite is {}", .0.as_str())]
    Inactive(InviteState),

    #[error("Group not found")]
    GroupNotFound,

    #[error("Permission denied")]
    Forbidden,

    #[error("User is already a member of this group")]
    AlreadyMember,

    #[error("{0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AppError> for InviteError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::NotFound(_) => InviteError::GroupNotFound,
            other => InviteError::Internal(other.to_string()),
        }
    }
}

impl From<JoinError> for InviteError {
    fn from(err: JoinError) -> Self {
        match err {
            JoinError::InviteNotFound => InviteError::NotFound,
            JoinError::InviteInactive(state) => InviteError::Inactive(state),
            JoinError::GroupNotFound => InviteError::GroupNotFound,
            JoinError::AlreadyMember => InviteError::AlreadyMember,
            JoinError::Internal(msg) => InviteError::Internal(msg),
        }
    }
}

/// InviteService implementation
pub struct InviteServiceImpl<I, G>
where
    I: InviteRepository,
    G: GroupRepository,
{
    invite_repo: Arc<I>,
    group_repo: Arc<G>,
}

impl<I, G> InviteServiceImpl<I, G>
where
    I: InviteRepository,
    G: GroupRepository,
{
    pub fn new(invite_repo: Arc<I>, group_repo: Arc<G>) -> Self {
        Self {
            invite_repo,
            group_repo,
        }
    }

    fn find_group(&self, group_id: i64) -> Result<Group, InviteError> {
        self.group_repo
            .find_by_id(group_id)?
            .ok_or(InviteError::GroupNotFound)
    }

    fn find_invite(&self, code: &str) -> Result<InviteLink, InviteError> {
        self.invite_repo
            .find_by_code(code)?
            .ok_or(InviteError::NotFound)
    }
}

impl<I, G> InviteService for InviteServiceImpl<I, G>
where
    I: InviteRepository + 'static,
    G: GroupRepository + 'static,
{
    fn create_invite(
        &self,
        group_id: i64,
        actor_id: i64,
        request: CreateInviteDto,
    ) -> Result<InviteDto, InviteError> {
        let group = self.find_group(group_id)?;
        if !AuthorizationPolicy::can_create_invite(actor_id, &group) {
            return Err(InviteError::Forbidden);
        }

        let now = Utc::now();
        if request.expires_at.is_some_and(|at| at <= now) {
            return Err(InviteError::InvalidInput(
                "Expiration must be in the future".into(),
            ));
        }

        let invite = self
            .invite_repo
            .create(group_id, actor_id, request.expires_at)?;

        Ok(InviteDto::from_invite(invite, now))
    }

    fn get_invite(&self, code: &str) -> Result<InviteDto, InviteError> {
        let invite = self.find_invite(code)?;
        Ok(InviteDto::from_invite(invite, Utc::now()))
    }

    fn list_active_invites(&self, group_id: i64) -> Result<Vec<InviteDto>, InviteError> {
        self.find_group(group_id)?;

        let now = Utc::now();
        let invites = self.invite_repo.find_active_by_group(group_id)?;

        Ok(invites
            .into_iter()
            .map(|invite| InviteDto::from_invite(invite, now))
            .collect())
    }

    fn deactivate_invite(&self, code: &str, actor_id: i64) -> Result<(), InviteError> {
        let invite = self.find_invite(code)?;
        let group = self.find_group(invite.group_id)?;
        if !AuthorizationPolicy::can_deactivate_invite(actor_id, &group, &invite) {
            return Err(InviteError::Forbidden);
        }

        if !self.invite_repo.deactivate(code)? {
            return Err(InviteError::NotFound);
        }

        Ok(())
    }

    fn join(
        &self,
        code: &str,
        user_id: i64,
        nickname: Option<String>,
    ) -> Result<JoinResultDto, InviteError> {
        validate_nickname(nickname.as_deref()).map_err(InviteError::InvalidInput)?;

        let membership = self.invite_repo.join(code, user_id, nickname)?;

        Ok(JoinResultDto::new(code, membership))
    }
}
