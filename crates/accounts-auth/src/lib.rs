//! Access-token validation and the bearer identity extractor.

pub mod identity;
pub mod token;
