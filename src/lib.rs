//! # Group Planner Library
//!
//! This crate provides the backend core of a group activity planner:
//! - Groups with an immutable creator and name
//! - Memberships with optional per-group nicknames
//! - Invite links with lazy expiry and an atomic join workflow
//! - A RESTful HTTP API over in-memory storage
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core business entities, repository traits and the authorization policy
//! - **Application Layer**: Business logic services and DTOs
//! - **Infrastructure Layer**: In-memory storage, repositories and metrics
//! - **Presentation Layer**: HTTP handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! group_planner/
//! +-- config/         Configuration management
//! +-- domain/         Domain entities, policy, and traits
//! +-- application/    Application services and DTOs
//! +-- infrastructure/ Storage, repositories and metrics
//! +-- presentation/   HTTP routes and middleware
//! +-- shared/         Common utilities (errors, ID allocation, validation)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
