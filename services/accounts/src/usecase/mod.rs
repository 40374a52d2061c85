pub mod photo;
pub mod user;
