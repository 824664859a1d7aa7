//! Invite Repository Implementation
//!
//! In-memory implementation of the InviteRepository trait, including the
//! invite join workflow.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{
    InviteLink, InviteRepository, InviteState, InviteUsePolicy, JoinError, Membership,
    DEFAULT_CODE_LENGTH,
};
use crate::infrastructure::database::{with_transaction, InMemoryDatabase};
use crate::shared::error::AppError;

/// Default number of code generation attempts before giving up.
pub const DEFAULT_MAX_CODE_ATTEMPTS: u32 = 5;

/// Construction-time invite behaviour.
#[derive(Debug, Clone, Copy)]
pub struct InviteOptions {
    pub use_policy: InviteUsePolicy,
    pub code_length: usize,
    pub max_code_attempts: u32,
}

impl Default for InviteOptions {
    fn default() -> Self {
        Self {
            use_policy: InviteUsePolicy::Reusable,
            code_length: DEFAULT_CODE_LENGTH,
            max_code_attempts: DEFAULT_MAX_CODE_ATTEMPTS,
        }
    }
}

/// In-memory invite repository.
#[derive(Clone)]
pub struct InMemoryInviteRepository {
    db: Arc<InMemoryDatabase>,
    options: InviteOptions,
    generate_code: fn(usize) -> String,
}

impl InMemoryInviteRepository {
    /// Create a new repository over shared storage.
    pub fn new(db: Arc<InMemoryDatabase>, options: InviteOptions) -> Self {
        Self {
            db,
            options,
            generate_code: InviteLink::generate_code,
        }
    }

    /// Replace the code generator.
    pub fn with_code_generator(mut self, generate_code: fn(usize) -> String) -> Self {
        self.generate_code = generate_code;
        self
    }
}

impl InviteRepository for InMemoryInviteRepository {
    fn create(
        &self,
        group_id: i64,
        created_by: i64,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<InviteLink, AppError> {
        let groups = self.db.groups.read();
        if !groups.contains_key(&group_id) {
            return Err(AppError::NotFound(format!("Group {} not found", group_id)));
        }

        let mut invites = self.db.invites.write();
        for _ in 0..self.options.max_code_attempts.max(1) {
            let code = (self.generate_code)(self.options.code_length);
            if invites.contains_key(&code) {
                continue;
            }
            let invite = InviteLink::new(code.clone(), group_id, created_by, expires_at);
            invites.insert(code, invite.clone());
            return Ok(invite);
        }

        Err(AppError::Internal(
            "Failed to generate unique invite code".to_string(),
        ))
    }

    fn find_by_code(&self, code: &str) -> Result<Option<InviteLink>, AppError> {
        let now = Utc::now();
        let mut invites = self.db.invites.write();
        Ok(invites.get_mut(code).map(|invite| {
            invite.refresh(now);
            invite.clone()
        }))
    }

    fn find_active_by_group(&self, group_id: i64) -> Result<Vec<InviteLink>, AppError> {
        let now = Utc::now();
        let mut invites = self.db.invites.write();

        let mut active: Vec<InviteLink> = invites
            .values_mut()
            .filter(|invite| invite.group_id == group_id && invite.is_active)
            .filter_map(|invite| {
                (invite.refresh(now) == InviteState::Active).then(|| invite.clone())
            })
            .collect();
        active.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.code.cmp(&b.code)));

        Ok(active)
    }

    fn deactivate(&self, code: &str) -> Result<bool, AppError> {
        let now = Utc::now();
        let mut invites = self.db.invites.write();
        Ok(invites
            .get_mut(code)
            .map(|invite| invite.deactivate(now))
            .is_some())
    }

    fn join(
        &self,
        code: &str,
        user_id: i64,
        nickname: Option<String>,
    ) -> Result<Membership, JoinError> {
        let now = Utc::now();
        let use_policy = self.options.use_policy;

        with_transaction(&self.db, |tx| {
            let invite = tx.invites.get_mut(code).ok_or(JoinError::InviteNotFound)?;

            let state = invite.refresh(now);
            if state != InviteState::Active {
                return Err(JoinError::InviteInactive(state));
            }

            let group_id = invite.group_id;
            if !tx.groups.contains_key(&group_id) {
                return Err(JoinError::GroupNotFound);
            }

            let members = tx.memberships.entry(group_id).or_default();
            if members.contains_key(&user_id) {
                return Err(JoinError::AlreadyMember);
            }

            let mut membership = Membership::new(group_id, user_id);
            membership.set_nickname(nickname);
            members.insert(user_id, membership.clone());

            invite.uses = invite.uses.saturating_add(1);
            if use_policy == InviteUsePolicy::SingleUse {
                invite.deactivate(now);
            }

            Ok(membership)
        })
    }
}
