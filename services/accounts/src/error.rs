use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Account service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum AccountsServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("email already in use")]
    EmailTaken,
    #[error("missing email")]
    MissingEmail,
    #[error("photo format not accepted")]
    UnsupportedPhotoFormat,
    #[error("invalid multipart body")]
    InvalidMultipart,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AccountsServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::MissingEmail => "MISSING_EMAIL",
            Self::UnsupportedPhotoFormat => "UNSUPPORTED_PHOTO_FORMAT",
            Self::InvalidMultipart => "INVALID_MULTIPART",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for AccountsServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::EmailTaken => StatusCode::CONFLICT,
            Self::MissingEmail | Self::UnsupportedPhotoFormat | Self::InvalidMultipart => {
                StatusCode::BAD_REQUEST
            }
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status
        // for all requests. 4xx are expected client errors. The underlying fault
        // stays in the log; the caller sees the generic message.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
