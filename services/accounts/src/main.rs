use std::time::Duration;

use sea_orm::{ConnectOptions, Database};
use tracing::info;

use accounts_service::config::AccountsConfig;
use accounts_service::infra::mail::HttpMailer;
use accounts_service::infra::storage::DiskPhotoStore;
use accounts_service::router::build_router;
use accounts_service::state::AppState;

#[tokio::main]
async fn main() {
    accounts_core::tracing::init_tracing();

    let config = AccountsConfig::from_env();

    // Every store call is bounded; a stuck database surfaces as an error
    // instead of a hung request.
    let mut opts = ConnectOptions::new(&config.database_url);
    opts.connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5));
    let db = Database::connect(opts)
        .await
        .expect("failed to connect to database");

    let mailer = HttpMailer::new(
        &config.mail_endpoint,
        Duration::from_secs(config.mail_timeout_secs),
    )
    .expect("failed to build mail client");

    let state = AppState {
        db,
        mailer,
        photos: DiskPhotoStore::new(&config.photo_root),
        jwt_secret: config.jwt_secret,
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.accounts_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("account service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
