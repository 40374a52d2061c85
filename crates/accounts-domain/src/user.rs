//! User domain types.

use serde::{Deserialize, Serialize};

/// User permission level.
///
/// Wire format: `u8` (0 = StandardUser, 1 = Administrator). The wire values
/// match the role claim carried in access tokens and the `role` column in
/// the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    StandardUser = 0,
    Administrator = 1,
}

impl UserRole {
    /// Convert from `u8` wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::StandardUser),
            1 => Some(Self::Administrator),
            _ => None,
        }
    }

    /// Convert to `u8` wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether this role permits account-wide list/create/update/delete.
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Administrator)
    }
}

impl PartialOrd for UserRole {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UserRole {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_u8().cmp(&other.as_u8())
    }
}
