//! Infrastructure Layer
//!
//! Contains implementations for:
//! - In-memory storage and repositories
//! - Prometheus metrics

pub mod database;
pub mod metrics;
pub mod repositories;
