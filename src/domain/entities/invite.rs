//! Group invite link entity and repository trait.

use chrono::{DateTime, Utc};
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::entities::Membership;
use crate::shared::error::AppError;

/// Default invite code length. 16 alphanumeric characters carry ~95 bits.
pub const DEFAULT_CODE_LENGTH: usize = 16;

/// Shortest code length giving at least 64 bits of entropy.
pub const MIN_CODE_LENGTH: usize = 11;

/// Represents a group invite link.
///
/// Invites are never physically deleted; `is_active` is flipped instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteLink {
    /// Unguessable invite code, primary key
    pub code: String,

    pub group_id: i64,

    /// User ID who created the invite
    pub created_by: i64,

    pub created_at: DateTime<Utc>,

    /// Expiration timestamp (None if never expires)
    pub expires_at: Option<DateTime<Utc>>,

    /// Stored active flag. Expiry flips it lazily on the next read.
    pub is_active: bool,

    /// Set only when the invite is explicitly deactivated
    pub deactivated_at: Option<DateTime<Utc>>,

    /// Number of successful joins through this invite
    pub uses: u32,
}

/// Lifecycle state of an invite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteState {
    Active,
    Deactivated,
    Expired,
}

impl InviteState {
    pub fn as_str(&self) -> &'static str {
        match self {
            InviteState::Active => "active",
            InviteState::Deactivated => "deactivated",
            InviteState::Expired => "expired",
        }
    }
}

impl InviteLink {
    /// Create an active invite with the given code.
    pub fn new(
        code: String,
        group_id: i64,
        created_by: i64,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            code,
            group_id,
            created_by,
            created_at: Utc::now(),
            expires_at,
            is_active: true,
            deactivated_at: None,
            uses: 0,
        }
    }

    /// Check if the invite's expiry has passed at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now > expires_at)
    }

    /// Derive the lifecycle state at `now` without mutating the invite.
    pub fn state_at(&self, now: DateTime<Utc>) -> InviteState {
        if self.deactivated_at.is_some() {
            InviteState::Deactivated
        } else if !self.is_active || self.is_expired_at(now) {
            InviteState::Expired
        } else {
            InviteState::Active
        }
    }

    /// Flush the active flag if the invite has expired. Returns the state
    /// after evaluation.
    pub fn refresh(&mut self, now: DateTime<Utc>) -> InviteState {
        let state = self.state_at(now);
        if state != InviteState::Active {
            self.is_active = false;
        }
        state
    }

    /// Explicitly deactivate the invite. The first deactivation time is kept.
    pub fn deactivate(&mut self, now: DateTime<Utc>) {
        self.is_active = false;
        if self.deactivated_at.is_none() {
            self.deactivated_at = Some(now);
        }
    }

    /// Generate a random URL-safe invite code.
    pub fn generate_code(len: usize) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }
}

/// Whether a successful join consumes the invite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InviteUsePolicy {
    /// The invite stays active until deactivated or expired.
    #[default]
    Reusable,
    /// The first successful join deactivates the invite.
    SingleUse,
}

/// Why a join through an invite was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JoinError {
    #[error("Invite not found")]
    InviteNotFound,

    #[error("Invite is {}", .0.as_str())]
    InviteInactive(InviteState),

    #[error("Group not found")]
    GroupNotFound,

    #[error("Already a member of this group")]
    AlreadyMember,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AppError> for JoinError {
    fn from(err: AppError) -> Self {
        JoinError::Internal(err.to_string())
    }
}

/// Repository trait for InviteLink data access operations.
///
/// Every read applies expire-on-access: an invite found past its expiry is
/// stored back with `is_active = false`.
#[cfg_attr(test, mockall::automock)]
pub trait InviteRepository: Send + Sync {
    /// Create an active invite for an existing group. Fails with `NotFound`
    /// if the group does not exist.
    fn create(
        &self,
        group_id: i64,
        created_by: i64,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<InviteLink, AppError>;

    /// Find an invite by its code.
    fn find_by_code(&self, code: &str) -> Result<Option<InviteLink>, AppError>;

    /// Active, unexpired invites of a group, oldest first.
    fn find_active_by_group(&self, group_id: i64) -> Result<Vec<InviteLink>, AppError>;

    /// Deactivate an invite. Returns `false` if no such invite exists.
    fn deactivate(&self, code: &str) -> Result<bool, AppError>;

    /// Join the invite's group as one atomic step: the invite must be
    /// active, its group must exist, and the user must not already be a
    /// member.
    fn join(
        &self,
        code: &str,
        user_id: i64,
        nickname: Option<String>,
    ) -> Result<Membership, JoinError>;
}
