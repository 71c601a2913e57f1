//! HTTP request handlers.

use super::types::{HealthResponse, NotifyRequest, Payload, RegisterRequest};
use super::AppState;
use crate::error::CollectorError;
use crate::notify::DeliveryStatus;
use crate::registration::{register, RegisterOutcome};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

/// Empty JSON body (`null`) with the given status.
fn empty(status: StatusCode) -> Response {
    (status, Json(serde_json::Value::Null)).into_response()
}

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, CollectorError> {
    let customer_count = state.store.count().await?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        customer_count,
    }))
}

/// Register a customer if the supplied token matches.
///
/// A wrong token yields `200` with a `null` body and writes nothing.
pub async fn create_customer(
    State(state): State<AppState>,
    Payload(request): Payload<RegisterRequest>,
) -> Result<Response, CollectorError> {
    let outcome = register(
        &state.codec,
        &state.store,
        &request.name,
        &request.email,
        &request.p,
    )
    .await?;

    Ok(match outcome {
        RegisterOutcome::Created(customer) => (StatusCode::CREATED, Json(customer)).into_response(),
        RegisterOutcome::Rejected => empty(StatusCode::OK),
    })
}

/// Send a verification email with a freshly signed link.
///
/// Any failure after decoding yields `500` with an empty body.
pub async fn notify_customer(
    State(state): State<AppState>,
    Payload(request): Payload<NotifyRequest>,
) -> Response {
    match state.notifier.notify(&request.name, &request.email).await {
        Ok(DeliveryStatus::Sent { .. }) => empty(StatusCode::OK),
        Ok(DeliveryStatus::Failed(_)) => empty(StatusCode::INTERNAL_SERVER_ERROR),
        Err(e) => {
            error!(email = %request.email, error = %e, "Failed to build verification email");
            empty(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

