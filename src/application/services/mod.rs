//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **GroupService**: Group lifecycle, membership and nicknames
//! - **InviteService**: Invite links and joining through them

pub mod group_service;
pub mod invite_service;

use crate::infrastructure::repositories::{
    InMemoryGroupRepository, InMemoryInviteRepository, InMemoryMemberRepository,
};

// Re-export group service types
pub use group_service::{
    CreateGroupDto, GroupDto, GroupError, GroupService, GroupServiceImpl, MemberDto, UpdateGroupDto,
};

// Re-export invite service types
pub use invite_service::{
    CreateInviteDto, InviteDto, InviteError, InviteService, InviteServiceImpl, JoinResultDto,
};

/// Group service over the in-memory repositories
pub type InMemoryGroupService = GroupServiceImpl<InMemoryGroupRepository, InMemoryMemberRepository>;

/// Invite service over the in-memory repositories
pub type InMemoryInviteService =
    InviteServiceImpl<InMemoryInviteRepository, InMemoryGroupRepository>;
