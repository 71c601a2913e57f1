//! Email collector - Entry point.

use email_collector::{
    api::{create_router, AppState, Throttle},
    config::Config,
    notify::Notifier,
    store::Store,
    token::TokenCodec,
};
use ses_client::{Credentials, SesClient, SesClientConfig};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting email collector");

    // Initialize storage
    let store = if config.database.persist {
        match Store::sqlite(&config.database.path).await {
            Ok(s) => s,
            Err(e) => {
                error!("Failed to open customer store: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        info!("Persistence disabled, using in-memory storage");
        Store::memory()
    };

    // Initialize SES client
    let ses = match SesClient::new(SesClientConfig {
        region: config.ses.region.clone(),
        endpoint: config.ses.endpoint.clone(),
        credentials: Credentials {
            access_key_id: config.ses.access_key_id.clone(),
            secret_access_key: config.ses.secret_access_key.clone(),
            session_token: config.ses.session_token.clone(),
        },
        timeout: config.ses.timeout(),
    }) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to create SES client: {}", e);
            std::process::exit(1);
        }
    };
    info!(region = %ses.region(), "SES client ready");

    // Create application state
    let codec = TokenCodec::new(config.token.secret.clone());
    let notifier = Notifier::new(codec.clone(), ses, config.mail.clone());
    let state = AppState::new(codec, store, notifier);

    let throttle = Throttle::per_minute(config.rate_limit.global_per_minute);
    if throttle.is_enabled() {
        info!(
            per_minute = config.rate_limit.global_per_minute,
            "Global request throttle enabled"
        );
    }
    let app = create_router(state, throttle);

    // Bind to address
    let addr = SocketAddr::new(
        config.server.listen_addr.parse().unwrap_or([0, 0, 0, 0].into()),
        config.server.port,
    );

    info!("Listening on {}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
