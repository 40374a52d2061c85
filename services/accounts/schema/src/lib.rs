//! sea-orm entities owned by the account service.

pub mod users;
