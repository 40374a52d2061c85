//! Shared service plumbing: health endpoints, request-id middleware,
//! tracing initialization, serde helpers.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
