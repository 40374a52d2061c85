/// Account service configuration loaded from environment variables.
#[derive(Debug)]
pub struct AccountsConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3117). Env var: `ACCOUNTS_PORT`.
    pub accounts_port: u16,
    /// HMAC secret for validating access tokens issued by the identity provider.
    pub jwt_secret: String,
    /// HTTP endpoint of the mail delivery service (e.g. "http://mailer:8025/send").
    pub mail_endpoint: String,
    /// Root directory for stored profile photos (default "./photos").
    /// Env var: `PHOTO_ROOT`.
    pub photo_root: String,
    /// Timeout in seconds applied to every outbound mail call (default 10).
    /// Env var: `MAIL_TIMEOUT_SECS`.
    pub mail_timeout_secs: u64,
}

impl AccountsConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            accounts_port: std::env::var("ACCOUNTS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3117),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            mail_endpoint: std::env::var("MAIL_ENDPOINT").expect("MAIL_ENDPOINT"),
            photo_root: std::env::var("PHOTO_ROOT").unwrap_or_else(|_| "./photos".to_owned()),
            mail_timeout_secs: std::env::var("MAIL_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }
}
