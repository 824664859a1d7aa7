//! Group Repository Implementation
//!
//! In-memory implementation of the GroupRepository trait.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::{Group, GroupPatch, GroupRepository, Membership, NewGroup};
use crate::infrastructure::database::{with_transaction, InMemoryDatabase};
use crate::shared::error::AppError;
use crate::shared::id_allocator::{EntityKind, IdAllocator};

/// In-memory group repository.
///
/// Owns the group rows; group creation and deletion also write the
/// membership and invite tables inside one lock scope.
#[derive(Clone)]
pub struct InMemoryGroupRepository {
    db: Arc<InMemoryDatabase>,
    ids: Arc<IdAllocator>,
}

impl InMemoryGroupRepository {
    /// Create a new repository over shared storage.
    pub fn new(db: Arc<InMemoryDatabase>, ids: Arc<IdAllocator>) -> Self {
        Self { db, ids }
    }
}

impl GroupRepository for InMemoryGroupRepository {
    fn find_by_id(&self, id: i64) -> Result<Option<Group>, AppError> {
        Ok(self.db.groups.read().get(&id).cloned())
    }

    fn find_by_member(&self, user_id: i64) -> Result<Vec<Group>, AppError> {
        let groups = self.db.groups.read();
        let memberships = self.db.memberships.read();

        Ok(groups
            .values()
            .filter(|group| {
                memberships
                    .get(&group.id)
                    .is_some_and(|members| members.contains_key(&user_id))
            })
            .cloned()
            .collect())
    }

    fn create(&self, group: NewGroup) -> Result<Group, AppError> {
        let id = self.ids.next_id(EntityKind::Group)?;
        let group = group.into_group(id);
        let creator = Membership::new(id, group.creator_id);

        let mut groups = self.db.groups.write();
        let mut memberships = self.db.memberships.write();

        if groups.contains_key(&id) {
            return Err(AppError::Internal(format!("group id {} allocated twice", id)));
        }
        groups.insert(id, group.clone());
        memberships.insert(id, BTreeMap::from([(creator.user_id, creator)]));

        Ok(group)
    }

    fn update(&self, id: i64, patch: &GroupPatch) -> Result<Option<Group>, AppError> {
        let mut groups = self.db.groups.write();
        Ok(groups.get_mut(&id).map(|group| {
            group.apply(patch);
            group.clone()
        }))
    }

    fn delete(&self, id: i64) -> Result<bool, AppError> {
        with_transaction(&self.db, |tx| Ok(tx.cascade_delete_group(id)))
    }
}
