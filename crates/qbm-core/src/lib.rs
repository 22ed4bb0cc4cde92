//! Cross-cutting service plumbing: error kinds, health handlers,
//! request-id middleware, tracing setup, serde helpers.

pub mod error;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
