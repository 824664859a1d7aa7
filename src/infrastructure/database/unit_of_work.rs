//! Unit of Work Pattern Implementation
//!
//! Provides atomic boundaries for operations that touch more than one table.
//! While a `TransactionContext` is alive no other reader or writer can
//! observe any of the tables, so a closure running inside it sees and
//! leaves a consistent state.

use parking_lot::RwLockWriteGuard;

use super::{GroupTable, InMemoryDatabase, InviteTable, MembershipTable};

/// Write access to every table, held until dropped.
pub struct TransactionContext<'a> {
    pub groups: RwLockWriteGuard<'a, GroupTable>,
    pub memberships: RwLockWriteGuard<'a, MembershipTable>,
    pub invites: RwLockWriteGuard<'a, InviteTable>,
}

impl<'a> TransactionContext<'a> {
    /// Create a transaction context from guards acquired in lock order.
    pub(super) fn new(
        groups: RwLockWriteGuard<'a, GroupTable>,
        memberships: RwLockWriteGuard<'a, MembershipTable>,
        invites: RwLockWriteGuard<'a, InviteTable>,
    ) -> Self {
        Self {
            groups,
            memberships,
            invites,
        }
    }

    /// Remove a group and every row that references it.
    pub fn cascade_delete_group(&mut self, group_id: i64) -> bool {
        if self.groups.remove(&group_id).is_none() {
            return false;
        }
        self.memberships.remove(&group_id);
        self.invites.retain(|_, invite| invite.group_id != group_id);
        true
    }
}

/// Execute a closure within a transaction.
///
/// The closure must validate before it mutates: an `Err` return does not
/// roll back writes already made through the context.
///
/// # Example
/// ```ignore
/// let removed = with_transaction(&db, |tx| Ok(tx.cascade_delete_group(id)))?;
/// ```
pub fn with_transaction<T, E, F>(db: &InMemoryDatabase, f: F) -> Result<T, E>
where
    F: FnOnce(&mut TransactionContext<'_>) -> Result<T, E>,
{
    let mut tx = db.begin();
    f(&mut tx)
}
