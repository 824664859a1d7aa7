//! # Domain Entities
//!
//! Core domain entities of the planning backend.
//!
//! - **Group**: A planning group owned by its creator
//! - **Membership**: A user's membership in a group, with an optional nickname
//! - **InviteLink**: A time-limited code granting join rights to a group
//!
//! Users, activities and comments are referenced by ID only.
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod group;
mod invite;
mod membership;

pub use group::{Group, GroupPatch, GroupRepository, NewGroup, MAX_GROUP_NAME_LENGTH};
pub use invite::{
    InviteLink, InviteRepository, InviteState, InviteUsePolicy, JoinError,
    DEFAULT_CODE_LENGTH, MIN_CODE_LENGTH,
};
pub use membership::{
    normalize_nickname, validate_nickname, MemberRepository, Membership, MAX_NICKNAME_LENGTH,
};

#[cfg(test)]
pub use group::MockGroupRepository;
#[cfg(test)]
pub use invite::MockInviteRepository;
#[cfg(test)]
pub use membership::MockMemberRepository;
