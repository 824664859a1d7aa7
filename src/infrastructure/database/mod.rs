//! Database Module
//!
//! In-memory tables guarded by one read-write lock each, and the
//! transaction context used by operations that span tables.
//!
//! ## Lock order
//!
//! Any code holding more than one table lock acquires them in the order
//! `groups` -> `memberships` -> `invites` and never the reverse.

pub mod unit_of_work;

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use parking_lot::RwLock;

use crate::domain::{Group, InviteLink, Membership};

pub use unit_of_work::{with_transaction, TransactionContext};

/// Group rows keyed by group ID.
pub type GroupTable = BTreeMap<i64, Group>;

/// Membership rows keyed by group ID, then user ID. The nested key makes a
/// second row for the same `(group_id, user_id)` unrepresentable.
pub type MembershipTable = HashMap<i64, BTreeMap<i64, Membership>>;

/// Invite rows keyed by invite code.
pub type InviteTable = HashMap<String, InviteLink>;

/// Process-local storage shared by all repositories.
#[derive(Debug, Default)]
pub struct InMemoryDatabase {
    pub(crate) groups: RwLock<GroupTable>,
    pub(crate) memberships: RwLock<MembershipTable>,
    pub(crate) invites: RwLock<InviteTable>,
}

impl InMemoryDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock every table for writing, in lock order.
    pub fn begin(&self) -> TransactionContext<'_> {
        TransactionContext::new(
            self.groups.write(),
            self.memberships.write(),
            self.invites.write(),
        )
    }

    /// Number of stored groups, or `None` if the table stays write-locked
    /// for longer than `timeout`.
    pub fn try_group_count(&self, timeout: Duration) -> Option<usize> {
        self.groups.try_read_for(timeout).map(|groups| groups.len())
    }
}
