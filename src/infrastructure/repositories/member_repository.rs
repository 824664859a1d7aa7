//! Member Repository Implementation
//!
//! In-memory implementation of the MemberRepository trait.
//! Sole writer of membership rows outside group creation, group deletion
//! and invite joins.

use std::sync::Arc;

use crate::domain::{MemberRepository, Membership};
use crate::infrastructure::database::InMemoryDatabase;
use crate::shared::error::AppError;

/// In-memory membership repository.
#[derive(Clone)]
pub struct InMemoryMemberRepository {
    db: Arc<InMemoryDatabase>,
}

impl InMemoryMemberRepository {
    /// Create a new repository over shared storage.
    pub fn new(db: Arc<InMemoryDatabase>) -> Self {
        Self { db }
    }
}

impl MemberRepository for InMemoryMemberRepository {
    fn find(&self, group_id: i64, user_id: i64) -> Result<Option<Membership>, AppError> {
        let memberships = self.db.memberships.read();
        Ok(memberships
            .get(&group_id)
            .and_then(|members| members.get(&user_id))
            .cloned())
    }

    fn find_by_group(&self, group_id: i64) -> Result<Option<Vec<Membership>>, AppError> {
        let groups = self.db.groups.read();
        if !groups.contains_key(&group_id) {
            return Ok(None);
        }

        let memberships = self.db.memberships.read();
        Ok(Some(
            memberships
                .get(&group_id)
                .map(|members| members.values().cloned().collect())
                .unwrap_or_default(),
        ))
    }

    fn add(&self, group_id: i64, user_id: i64) -> Result<bool, AppError> {
        let groups = self.db.groups.read();
        if !groups.contains_key(&group_id) {
            return Ok(false);
        }

        let mut memberships = self.db.memberships.write();
        let members = memberships.entry(group_id).or_default();
        if members.contains_key(&user_id) {
            return Ok(false);
        }
        members.insert(user_id, Membership::new(group_id, user_id));

        Ok(true)
    }

    fn remove(&self, group_id: i64, user_id: i64) -> Result<bool, AppError> {
        let mut memberships = self.db.memberships.write();
        Ok(memberships
            .get_mut(&group_id)
            .is_some_and(|members| members.remove(&user_id).is_some()))
    }

    fn is_member(&self, group_id: i64, user_id: i64) -> Result<bool, AppError> {
        let memberships = self.db.memberships.read();
        Ok(memberships
            .get(&group_id)
            .is_some_and(|members| members.contains_key(&user_id)))
    }

    fn count(&self, group_id: i64) -> Result<usize, AppError> {
        let memberships = self.db.memberships.read();
        Ok(memberships.get(&group_id).map_or(0, |members| members.len()))
    }

    fn set_nickname(
        &self,
        group_id: i64,
        user_id: i64,
        nickname: Option<String>,
    ) -> Result<bool, AppError> {
        let mut memberships = self.db.memberships.write();
        match memberships
            .get_mut(&group_id)
            .and_then(|members| members.get_mut(&user_id))
        {
            Some(member) => {
                member.set_nickname(nickname);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
