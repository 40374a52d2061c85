//! Test utilities for account-service crates.
//!
//! Provides `MockAuth` for minting signed bearer tokens in integration tests.
//! Import in `#[cfg(test)]` blocks or `tests/` crates only — never in
//! production code.

pub mod auth;
