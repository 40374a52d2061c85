//! JWT access-token validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use accounts_domain::user::UserRole;

/// Caller identity extracted from a validated access token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub user_id: i32,
    pub role: UserRole,
    pub exp: u64,
}

/// Errors returned by [`validate_access_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("unknown role")]
    UnknownRole,
}

/// JWT claims payload.
///
/// | Field  | JWT claim | Rust type | Meaning                          |
/// |--------|-----------|-----------|----------------------------------|
/// | `sub`  | `sub`     | i32 string| user id assigned by the store    |
/// | `role` | custom    | `u8`      | see [`UserRole`] wire values     |
/// | `exp`  | `exp`     | u64       | expiration, seconds since epoch  |
///
/// `Serialize` exists so that tests (and the external identity provider's
/// contract fixtures) can mint tokens; the service itself only validates.
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    /// User id as a decimal string.
    pub sub: String,
    /// User role as `u8` wire value.
    pub role: u8,
    /// Expiration timestamp (seconds since UNIX epoch).
    pub exp: u64,
}

/// Decode and validate a JWT, returning raw claims.
///
/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
/// Default leeway = 60s tolerates clock skew against the identity provider.
fn decode_jwt(token: &str, secret: &str) -> Result<JwtClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
        | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_) => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate a bearer-token value, returning parsed identity.
///
/// Called on every authenticated request by the [`crate::identity::Identity`]
/// extractor. A syntactically valid token carrying a role value outside the
/// [`UserRole`] enum is rejected — privilege cannot be established for it.
pub fn validate_access_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    let claims = decode_jwt(token, secret)?;
    let user_id = claims
        .sub
        .parse::<i32>()
        .map_err(|_| AuthError::Malformed)?;
    let role = UserRole::from_u8(claims.role).ok_or(AuthError::UnknownRole)?;
    Ok(TokenInfo {
        user_id,
        role,
        exp: claims.exp,
    })
}
