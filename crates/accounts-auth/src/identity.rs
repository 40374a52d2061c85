//! Bearer-token identity extractor.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;

use accounts_domain::user::UserRole;

use crate::token::validate_access_token;

/// Source of the HMAC secret used to validate access tokens.
///
/// Implemented by the service's shared state so [`Identity`] can be used
/// as an axum extractor against that state.
pub trait JwtSecretSource {
    fn jwt_secret(&self) -> &str;
}

/// Caller identity established from the `Authorization: Bearer` header.
///
/// Returns 401 if the header is absent, the token fails validation, or the
/// role claim is outside the [`UserRole`] enum. Role enforcement (403) is
/// done by handlers after extraction.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: i32,
    pub role: UserRole,
}

impl<S> FromRequestParts<S> for Identity
where
    S: JwtSecretSource + Send + Sync,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let identity = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .and_then(|token| validate_access_token(token, state.jwt_secret()).ok())
            .map(|info| Identity {
                user_id: info.user_id,
                role: info.role,
            });

        async move { identity.ok_or(StatusCode::UNAUTHORIZED) }
    }
}
