//! Group Service
//!
//! Handles group lifecycle and membership operations.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{
    validate_nickname, AuthorizationPolicy, Group, GroupPatch, GroupRepository, MemberRepository,
    Membership, NewGroup,
};
use crate::shared::error::AppError;

/// Group service trait
pub trait GroupService: Send + Sync {
    /// Create a new group; the creator becomes its first member
    fn create_group(
        &self,
        creator_id: i64,
        request: CreateGroupDto,
    ) -> Result<GroupDto, GroupError>;

    /// Get a group, visible to members only
    fn get_group(&self, group_id: i64, requester_id: i64) -> Result<GroupDto, GroupError>;

    /// Update the mutable fields of a group
    fn update_group(&self, group_id: i64, update: UpdateGroupDto) -> Result<GroupDto, GroupError>;

    /// Delete a group, creator only
    fn delete_group(&self, group_id: i64, actor_id: i64) -> Result<(), GroupError>;

    /// List group members, visible to members only
    fn list_members(&self, group_id: i64, requester_id: i64) -> Result<Vec<MemberDto>, GroupError>;

    /// Add a user to a group
    fn add_member(&self, group_id: i64, user_id: i64) -> Result<MemberDto, GroupError>;

    /// Remove a member; allowed for the creator and for the member themselves
    fn remove_member(&self, group_id: i64, actor_id: i64, user_id: i64) -> Result<(), GroupError>;

    /// Set or clear a member's nickname
    fn set_nickname(
        &self,
        group_id: i64,
        actor_id: i64,
        user_id: i64,
        nickname: Option<String>,
    ) -> Result<MemberDto, GroupError>;

    /// Clear a member's nickname
    fn delete_nickname(
        &self,
        group_id: i64,
        actor_id: i64,
        user_id: i64,
    ) -> Result<MemberDto, GroupError>;

    /// List the groups a user belongs to
    fn list_user_groups(&self, user_id: i64) -> Result<Vec<GroupDto>, GroupError>;
}

/// Create group request
#[derive(Debug, Clone)]
pub struct CreateGroupDto {
    pub name: String,
    /// Defaults to today
    pub start_date: Option<NaiveDate>,
    pub end_date: NaiveDate,
    pub image: Option<String>,
    pub description: Option<String>,
}

/// Update group request
#[derive(Debug, Clone, Default)]
pub struct UpdateGroupDto {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub end_date: Option<NaiveDate>,
}

impl From<UpdateGroupDto> for GroupPatch {
    fn from(update: UpdateGroupDto) -> Self {
        Self {
            name: update.name,
            description: update.description,
            image: update.image,
            end_date: update.end_date,
        }
    }
}

/// Group data transfer object
#[derive(Debug, Clone, PartialEq)]
pub struct GroupDto {
    pub id: i64,
    pub creator_id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub image: Option<String>,
    pub description: Option<String>,
    pub member_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GroupDto {
    pub fn from_group(group: Group, member_count: usize) -> Self {
        Self {
            id: group.id,
            creator_id: group.creator_id,
            name: group.name,
            start_date: group.start_date,
            end_date: group.end_date,
            image: group.image,
            description: group.description,
            member_count,
            created_at: group.created_at,
            updated_at: group.updated_at,
        }
    }
}

/// Member data transfer object
#[derive(Debug, Clone, PartialEq)]
pub struct MemberDto {
    pub group_id: i64,
    pub user_id: i64,
    pub nickname: Option<String>,
    pub joined_at: DateTime<Utc>,
}

impl From<Membership> for MemberDto {
    fn from(member: Membership) -> Self {
        Self {
            group_id: member.group_id,
            user_id: member.user_id,
            nickname: member.nickname,
            joined_at: member.joined_at,
        }
    }
}

/// Group service errors
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum GroupError {
    #[error("Group not found")]
    NotFound,

    #[error("User is not a member of this group")]
    MemberNotFound,

    #[error("Permission denied")]
    Forbidden,

    #[error("User is already a member of this group")]
    AlreadyMember,

    #[error("Name field cannot be updated")]
    NameImmutable,

    #[error("{0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AppError> for GroupError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::NotFound(_) => GroupError::NotFound,
            other => GroupError::Internal(other.to_string()),
        }
    }
}

/// GroupService implementation
pub struct GroupServiceImpl<G, M>
where
    G: GroupRepository,
    M: MemberRepository,
{
    group_repo: Arc<G>,
    member_repo: Arc<M>,
}

impl<G, M> GroupServiceImpl<G, M>
where
    G: GroupRepository,
    M: MemberRepository,
{
    pub fn new(group_repo: Arc<G>, member_repo: Arc<M>) -> Self {
        Self {
            group_repo,
            member_repo,
        }
    }

    fn find_group(&self, group_id: i64) -> Result<Group, GroupError> {
        self.group_repo
            .find_by_id(group_id)?
            .ok_or(GroupError::NotFound)
    }

    fn to_dto(&self, group: Group) -> Result<GroupDto, GroupError> {
        let member_count = self.member_repo.count(group.id)?;
        Ok(GroupDto::from_group(group, member_count))
    }

    fn ensure_viewer(&self, group: &Group, requester_id: i64) -> Result<(), GroupError> {
        let membership = self.member_repo.find(group.id, requester_id)?;
        if !AuthorizationPolicy::can_view_group(requester_id, group, membership.as_ref()) {
            return Err(GroupError::Forbidden);
        }
        Ok(())
    }

    fn find_member(&self, group_id: i64, user_id: i64) -> Result<MemberDto, GroupError> {
        self.member_repo
            .find(group_id, user_id)?
            .map(MemberDto::from)
            .ok_or(GroupError::MemberNotFound)
    }
}

impl<G, M> GroupService for GroupServiceImpl<G, M>
where
    G: GroupRepository + 'static,
    M: MemberRepository + 'static,
{
    fn create_group(
        &self,
        creator_id: i64,
        request: CreateGroupDto,
    ) -> Result<GroupDto, GroupError> {
        let new_group = NewGroup {
            creator_id,
            name: request.name,
            start_date: request
                .start_date
                .unwrap_or_else(|| Utc::now().date_naive()),
            end_date: request.end_date,
            image: request.image,
            description: request.description,
        };
        new_group.validate().map_err(GroupError::InvalidInput)?;

        let group = self.group_repo.create(new_group)?;

        Ok(GroupDto::from_group(group, 1))
    }

    fn get_group(&self, group_id: i64, requester_id: i64) -> Result<GroupDto, GroupError> {
        let group = self.find_group(group_id)?;
        self.ensure_viewer(&group, requester_id)?;

        self.to_dto(group)
    }

    fn update_group(&self, group_id: i64, update: UpdateGroupDto) -> Result<GroupDto, GroupError> {
        let group = self.find_group(group_id)?;

        let patch = GroupPatch::from(update);
        if !AuthorizationPolicy::can_apply_patch(&patch) {
            return Err(GroupError::NameImmutable);
        }
        if patch.end_date.is_some_and(|end| end < group.start_date) {
            return Err(GroupError::InvalidInput(
                "End date cannot be before start date".into(),
            ));
        }

        let updated = self
            .group_repo
            .update(group_id, &patch)?
            .ok_or(GroupError::NotFound)?;

        self.to_dto(updated)
    }

    fn delete_group(&self, group_id: i64, actor_id: i64) -> Result<(), GroupError> {
        let group = self.find_group(group_id)?;
        if !AuthorizationPolicy::can_delete_group(actor_id, &group) {
            return Err(GroupError::Forbidden);
        }

        if !self.group_repo.delete(group_id)? {
            return Err(GroupError::NotFound);
        }

        Ok(())
    }

    fn list_members(&self, group_id: i64, requester_id: i64) -> Result<Vec<MemberDto>, GroupError> {
        let group = self.find_group(group_id)?;
        self.ensure_viewer(&group, requester_id)?;

        let members = self
            .member_repo
            .find_by_group(group_id)?
            .ok_or(GroupError::NotFound)?;

        Ok(members.into_iter().map(MemberDto::from).collect())
    }

    fn add_member(&self, group_id: i64, user_id: i64) -> Result<MemberDto, GroupError> {
        self.find_group(group_id)?;

        if !self.member_repo.add(group_id, user_id)? {
            // The group may have been deleted in between.
            self.find_group(group_id)?;
            return Err(GroupError::AlreadyMember);
        }

        self.find_member(group_id, user_id)
    }

    fn remove_member(&self, group_id: i64, actor_id: i64, user_id: i64) -> Result<(), GroupError> {
        let group = self.find_group(group_id)?;
        if !AuthorizationPolicy::can_remove_member(actor_id, &group, user_id) {
            return Err(GroupError::Forbidden);
        }

        if !self.member_repo.remove(group_id, user_id)? {
            return Err(GroupError::MemberNotFound);
        }

        Ok(())
    }

    fn set_nickname(
        &self,
        group_id: i64,
        actor_id: i64,
        user_id: i64,
        nickname: Option<String>,
    ) -> Result<MemberDto, GroupError> {
        let group = self.find_group(group_id)?;
        if !AuthorizationPolicy::can_set_nickname(actor_id, &group, user_id) {
            return Err(GroupError::Forbidden);
        }
        validate_nickname(nickname.as_deref()).map_err(GroupError::InvalidInput)?;

        if !self.member_repo.set_nickname(group_id, user_id, nickname)? {
            return Err(GroupError::MemberNotFound);
        }

        self.find_member(group_id, user_id)
    }

    fn delete_nickname(
        &self,
        group_id: i64,
        actor_id: i64,
        user_id: i64,
    ) -> Result<MemberDto, GroupError> {
        let group = self.find_group(group_id)?;
        if !AuthorizationPolicy::can_set_nickname(actor_id, &group, user_id) {
            return Err(GroupError::Forbidden);
        }

        if !self.member_repo.delete_nickname(group_id, user_id)? {
            return Err(GroupError::MemberNotFound);
        }

        self.find_member(group_id, user_id)
    }

    fn list_user_groups(&self, user_id: i64) -> Result<Vec<GroupDto>, GroupError> {
        self.group_repo
            .find_by_member(user_id)?
            .into_iter()
            .map(|group| self.to_dto(group))
            .collect()
    }
}
