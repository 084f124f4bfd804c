//! Shared service plumbing for Mercato services.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
