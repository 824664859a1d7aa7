//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod group;
pub mod health;
pub mod invite;
pub mod member;
pub mod user;
