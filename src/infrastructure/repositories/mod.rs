//! Repository Implementations
//!
//! In-memory implementations of domain repository traits.
//!
//! Every repository shares one [`InMemoryDatabase`](super::database::InMemoryDatabase)
//! through an `Arc`, so a row written by one is immediately visible to
//! the others.
//!
//! ## Available Repositories
//!
//! - **GroupRepository** - Group rows, creator membership and cascade delete
//! - **MemberRepository** - Group membership and nicknames
//! - **InviteRepository** - Invite links with expiration and the join workflow
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::infrastructure::database::InMemoryDatabase;
//! use crate::infrastructure::repositories::{
//!     InMemoryGroupRepository, InMemoryInviteRepository, InMemoryMemberRepository,
//! };
//!
//! let db = Arc::new(InMemoryDatabase::new());
//! let groups = InMemoryGroupRepository::new(db.clone(), Arc::new(IdAllocator::new()));
//! let members = InMemoryMemberRepository::new(db.clone());
//! let invites = InMemoryInviteRepository::new(db, InviteOptions::default());
//! ```

pub mod group_repository;
pub mod invite_repository;
pub mod member_repository;

pub use group_repository::InMemoryGroupRepository;
pub use invite_repository::{InMemoryInviteRepository, InviteOptions, DEFAULT_MAX_CODE_ATTEMPTS};
pub use member_repository::InMemoryMemberRepository;
