//! Identity Allocator
//!
//! Per-kind, strictly increasing entity IDs for the lifetime of the process.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use super::error::AppError;

/// Kinds of entity that receive allocated IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Group,
    User,
    Activity,
    Comment,
}

impl EntityKind {
    const COUNT: usize = 4;

    fn index(self) -> usize {
        match self {
            EntityKind::Group => 0,
            EntityKind::User => 1,
            EntityKind::Activity => 2,
            EntityKind::Comment => 3,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Group => "group",
            EntityKind::User => "user",
            EntityKind::Activity => "activity",
            EntityKind::Comment => "comment",
        };
        f.write_str(name)
    }
}

/// Issues unique IDs per entity kind, starting at 1.
///
/// IDs are never reused, even after the entity they named is deleted.
#[derive(Debug)]
pub struct IdAllocator {
    counters: [AtomicI64; EntityKind::COUNT],
}

impl IdAllocator {
    /// Create an allocator whose first ID for every kind is 1.
    pub fn new() -> Self {
        Self {
            counters: std::array::from_fn(|_| AtomicI64::new(0)),
        }
    }

    /// Allocate the next ID for `kind`.
    ///
    /// Fails only if the counter for `kind` is exhausted.
    pub fn next_id(&self, kind: EntityKind) -> Result<i64, AppError> {
        let previous = self.counters[kind.index()]
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                current.checked_add(1)
            })
            .map_err(|_| AppError::Internal(format!("{} id space exhausted", kind)))?;

        Ok(previous + 1)
    }

    /// Last ID handed out for `kind`, or 0 if none yet.
    #[cfg(test)]
    fn current(&self, kind: EntityKind) -> i64 {
        self.counters[kind.index()].load(Ordering::SeqCst)
    }

    #[cfg(test)]
    fn starting_at(kind: EntityKind, last: i64) -> Self {
        let allocator = Self::new();
        allocator.counters[kind.index()].store(last, Ordering::SeqCst);
        allocator
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
