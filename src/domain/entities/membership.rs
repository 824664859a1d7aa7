//! Group membership entity and repository trait.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Maximum nickname length, in characters.
pub const MAX_NICKNAME_LENGTH: usize = 50;

/// A user's membership in a group, keyed by `(group_id, user_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub group_id: i64,

    pub user_id: i64,

    /// Group-scoped nickname
    pub nickname: Option<String>,

    pub joined_at: DateTime<Utc>,
}

impl Membership {
    /// Create a membership with no nickname.
    pub fn new(group_id: i64, user_id: i64) -> Self {
        Self {
            group_id,
            user_id,
            nickname: None,
            joined_at: Utc::now(),
        }
    }

    /// Replace the nickname. An empty nickname is stored as absent.
    pub fn set_nickname(&mut self, nickname: Option<String>) {
        self.nickname = normalize_nickname(nickname);
    }
}

/// Collapse an empty nickname to absent.
pub fn normalize_nickname(nickname: Option<String>) -> Option<String> {
    nickname.filter(|n| !n.is_empty())
}

/// Check a nickname against the length limit.
pub fn validate_nickname(nickname: Option<&str>) -> Result<(), String> {
    match nickname {
        Some(n) if n.chars().count() > MAX_NICKNAME_LENGTH => Err(format!(
            "Nickname cannot be longer than {} characters",
            MAX_NICKNAME_LENGTH
        )),
        _ => Ok(()),
    }
}

/// Repository trait for Membership data access operations.
#[cfg_attr(test, mockall::automock)]
pub trait MemberRepository: Send + Sync {
    /// Find a membership by group and user ID.
    fn find(&self, group_id: i64, user_id: i64) -> Result<Option<Membership>, AppError>;

    /// All memberships of a group ordered by user ID, or `None` if the
    /// group does not exist.
    fn find_by_group(&self, group_id: i64) -> Result<Option<Vec<Membership>>, AppError>;

    /// Add a user to a group. Returns `false` if the group does not exist
    /// or the user is already a member.
    fn add(&self, group_id: i64, user_id: i64) -> Result<bool, AppError>;

    /// Remove a user from a group. Returns `false` if there was no such membership.
    fn remove(&self, group_id: i64, user_id: i64) -> Result<bool, AppError>;

    /// Check if a user is a member of a group.
    fn is_member(&self, group_id: i64, user_id: i64) -> Result<bool, AppError>;

    /// Number of members in a group (0 for unknown groups).
    fn count(&self, group_id: i64) -> Result<usize, AppError>;

    /// Set or clear a member's nickname. Returns `false` if not a member.
    fn set_nickname(
        &self,
        group_id: i64,
        user_id: i64,
        nickname: Option<String>,
    ) -> Result<bool, AppError>;

    /// Clear a member's nickname. Returns `false` if not a member.
    fn delete_nickname(&self, group_id: i64, user_id: i64) -> Result<bool, AppError> {
        self.set_nickname(group_id, user_id, None)
    }
}
