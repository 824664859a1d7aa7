//! HTTP API
//!
//! Routes and handlers for the REST API.

pub mod extractors;
pub mod handlers;
pub mod routes;
