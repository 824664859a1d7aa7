//! Group entity and repository trait.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Maximum length of a group name, in characters.
pub const MAX_GROUP_NAME_LENGTH: usize = 100;

/// Represents a planning group.
///
/// `creator_id` and `name` never change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Allocated group ID (primary key)
    pub id: i64,

    /// User ID of the group owner
    pub creator_id: i64,

    /// Group name (1-100 characters)
    pub name: String,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    /// URL of the group image
    pub image: Option<String>,

    pub description: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Group {
    /// Check if a user created this group.
    pub fn is_creator(&self, user_id: i64) -> bool {
        self.creator_id == user_id
    }

    /// Apply the mutable fields of a patch. `name` is ignored here; callers
    /// reject name changes through the authorization policy first.
    pub fn apply(&mut self, patch: &GroupPatch) {
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(image) = &patch.image {
            self.image = Some(image.clone());
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }
        self.updated_at = Utc::now();
    }
}

/// Fields needed to create a group. The ID is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewGroup {
    pub creator_id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub image: Option<String>,
    pub description: Option<String>,
}

impl NewGroup {
    /// Check the invariants a new group must satisfy.
    pub fn validate(&self) -> Result<(), String> {
        let name_len = self.name.trim().chars().count();
        if name_len == 0 {
            return Err("Group name is required".into());
        }
        if self.name.chars().count() > MAX_GROUP_NAME_LENGTH {
            return Err(format!(
                "Group name cannot be longer than {} characters",
                MAX_GROUP_NAME_LENGTH
            ));
        }
        if self.end_date < self.start_date {
            return Err("End date cannot be before start date".into());
        }
        Ok(())
    }

    /// Materialize the group under an allocated ID.
    pub fn into_group(self, id: i64) -> Group {
        let now = Utc::now();
        Group {
            id,
            creator_id: self.creator_id,
            name: self.name,
            start_date: self.start_date,
            end_date: self.end_date,
            image: self.image,
            description: self.description,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A partial update to a group.
///
/// `name` is carried so the policy can see (and refuse) rename attempts.
#[derive(Debug, Clone, Default)]
pub struct GroupPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub end_date: Option<NaiveDate>,
}

/// Repository trait for Group data access operations.
///
/// Creating a group also records the creator's membership, and deleting a
/// group removes its memberships and invites, both atomically.
#[cfg_attr(test, mockall::automock)]
pub trait GroupRepository: Send + Sync {
    /// Find a group by ID.
    fn find_by_id(&self, id: i64) -> Result<Option<Group>, AppError>;

    /// Find all groups a user is a member of, ordered by ID.
    fn find_by_member(&self, user_id: i64) -> Result<Vec<Group>, AppError>;

    /// Create a group together with the creator's membership.
    fn create(&self, group: NewGroup) -> Result<Group, AppError>;

    /// Apply a patch. Returns `None` if the group does not exist.
    fn update(&self, id: i64, patch: &GroupPatch) -> Result<Option<Group>, AppError>;

    /// Delete a group with its memberships and invites.
    /// Returns `false` if the group does not exist.
    fn delete(&self, id: i64) -> Result<bool, AppError>;
}
