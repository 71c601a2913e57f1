//! HTTP API for the collector.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::{access_log, throttle, Throttle};
pub use types::*;

use crate::notify::Notifier;
use crate::store::Store;
use crate::token::TokenCodec;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Signs and verifies customer tokens
    pub codec: TokenCodec,
    /// Customer store
    pub store: Arc<Store>,
    /// Verification email sender
    pub notifier: Arc<Notifier>,
}

impl AppState {
    pub fn new(codec: TokenCodec, store: Store, notifier: Notifier) -> Self {
        Self {
            codec,
            store: Arc::new(store),
            notifier: Arc::new(notifier),
        }
    }
}

/// Build the API router.
///
/// The throttle layer is installed only when `throttle` is enabled.
pub fn create_router(state: AppState, throttle: Throttle) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health))
        .route("/customer", post(handlers::create_customer))
        .route("/notify", post(handlers::notify_customer));

    if throttle.is_enabled() {
        router = router.layer(axum_middleware::from_fn_with_state(
            throttle,
            middleware::throttle,
        ));
    }

    router
        .layer(axum_middleware::from_fn(access_log))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
