//! Domain types shared across account-service crates.

pub mod user;
