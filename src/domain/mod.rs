//! # Domain Layer
//!
//! The domain layer contains the core business rules of the planning backend.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: Core domain entities (Group, Membership, InviteLink)
//! - **services**: Domain services (authorization policy)
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts
//! - Entities encapsulate domain behavior

pub mod entities;
pub mod services;

// Re-export commonly used types
pub use entities::*;
pub use services::AuthorizationPolicy;
