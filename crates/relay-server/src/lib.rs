//! relay-server — the HTTP surface of lead-relay.
//!
//! | Route          | Purpose                                   |
//! |----------------|-------------------------------------------|
//! | `GET /health`  | Liveness: `{"ok":true,"service":"lead-relay"}` |
//! | `POST /lead`   | Normalise a form submission and deliver it |
//!
//! Every route sits behind the origin allow-list CORS middleware and the
//! configured request body limit.

pub mod cors;
mod handlers;
pub mod relay;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use relay_core::config::ServerConfig;
use relay_core::Settings;
use relay_delivery::{LeadSink, TelegramClient};

pub use cors::AllowedOrigins;
pub use handlers::SERVICE_NAME;
pub use relay::{Outcome, Relay};

/// Build the router around an already-assembled [`Relay`].
pub fn router(relay: Arc<Relay>, server: &ServerConfig) -> Router {
    let origins = Arc::new(AllowedOrigins::new(server.allowed_origins.iter().cloned()));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/lead", post(handlers::submit_lead))
        .with_state(relay)
        .layer(DefaultBodyLimit::max(server.body_limit_bytes))
        .layer(axum::middleware::from_fn_with_state(origins, cors::cors))
}

/// Assemble the relay from `settings` and serve until Ctrl-C.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    for setting in settings.missing_secrets() {
        tracing::warn!(setting, "telegram secret missing; every delivery will fail");
    }

    let sink: Arc<dyn LeadSink> = Arc::new(TelegramClient::new(&settings.telegram)?);
    let relay = Arc::new(Relay::from_settings(&settings, sink));
    let app = router(relay, &settings.server);

    let listener =
        tokio::net::TcpListener::bind((settings.server.bind.as_str(), settings.server.port)).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        mode = ?settings.server.delivery_mode,
        origins = settings.server.allowed_origins.len(),
        "lead relay listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("lead relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
    }
}
