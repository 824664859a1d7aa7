//! REST API endpoint tests

mod group_tests;
mod health_tests;
mod invite_tests;
mod member_tests;
