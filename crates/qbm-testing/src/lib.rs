//! Test-only helpers shared by service test suites.

pub mod auth;
pub mod fixture;
