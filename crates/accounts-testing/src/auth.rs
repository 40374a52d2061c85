//! Mock auth helpers for integration tests.
//!
//! The service validates `Authorization: Bearer` tokens signed by the
//! external identity provider. In tests, `MockAuth` signs tokens with the
//! test secret directly so no real identity provider is needed.

use http::{HeaderMap, HeaderValue};
use jsonwebtoken::{EncodingKey, Header, encode};

use accounts_auth::token::JwtClaims;
use accounts_domain::user::UserRole;

/// Secret shared between test token minting and test service configuration.
pub const TEST_JWT_SECRET: &str = "accounts-test-jwt-secret";

/// Configurable identity minted into test bearer tokens.
pub struct MockAuth {
    pub user_id: i32,
    pub role: UserRole,
}

impl MockAuth {
    pub fn new(user_id: i32, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn admin(user_id: i32) -> Self {
        Self::new(user_id, UserRole::Administrator)
    }

    pub fn standard(user_id: i32) -> Self {
        Self::new(user_id, UserRole::StandardUser)
    }

    /// Sign a token for this identity, valid for one hour.
    pub fn token(&self) -> String {
        let exp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs()
            + 3600;
        let claims = JwtClaims {
            sub: self.user_id.to_string(),
            role: self.role.as_u8(),
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
        )
        .unwrap()
    }

    /// Return headers as if the caller presented this identity's token.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            http::header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.token())).unwrap(),
        );
        map
    }
}
