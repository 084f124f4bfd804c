use chrono::Duration;
use sea_orm::Database;
use tracing::info;

use mercato_identity::config::IdentityConfig;
use mercato_identity::infra::mailer::RelayMailer;
use mercato_identity::router::build_router;
use mercato_identity::state::AppState;
use mercato_identity::sweeper::spawn_sweeper;

#[tokio::main]
async fn main() {
    mercato_core::tracing::init_tracing("identity");

    let config = IdentityConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let mailer = RelayMailer {
        client: reqwest::Client::new(),
        relay_url: config.mail_relay_url,
        from: config.mail_from,
        ttl_minutes: config.otp_ttl_minutes,
    };

    let state = AppState {
        db,
        mailer,
        jwt_secret: config.jwt_secret,
        cookie_domain: config.cookie_domain,
        otp_ttl: Duration::minutes(config.otp_ttl_minutes),
        otp_resend_cooldown: Duration::seconds(config.otp_resend_cooldown_secs),
    };

    spawn_sweeper(state.otp_service(), config.otp_sweep_interval_secs);

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.identity_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("identity service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
