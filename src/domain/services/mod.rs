//! # Domain Services
//!
//! Domain services encapsulate business rules that don't naturally belong
//! to a single entity.
//!
//! ## Services
//!
//! - **AuthorizationPolicy**: Who may view, mutate, or invite into a group

mod authorization_policy;

pub use authorization_policy::*;
