//! HTTP surface for spend limit readouts.
//!
//! - `GET /health`
//! - `GET /spend-limit?address=<owner>`
//!
//! Caller input errors map to 4xx with a message; upstream failures map to a
//! generic 500 and are only detailed in the log.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::{
    config::ReaderError,
    reader::{SpendLimitReader, SpendLimitReadout},
    utils::{base_units_to_cents, parse_owner_address},
};

pub struct AppState {
    pub reader: SpendLimitReader,
}

#[derive(Debug, Deserialize)]
pub struct SpendLimitQuery {
    pub address: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendLimitResponse {
    #[serde(flatten)]
    pub readout: SpendLimitReadout,
    pub remaining_allowance_cents: u64,
    pub spend_limit_per_transaction_cents: u64,
}

impl From<SpendLimitReadout> for SpendLimitResponse {
    fn from(readout: SpendLimitReadout) -> Self {
        Self {
            remaining_allowance_cents: base_units_to_cents(readout.remaining_allowance),
            spend_limit_per_transaction_cents: base_units_to_cents(
                readout.spend_limit_per_transaction,
            ),
            readout,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

fn api_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ApiError {
            error: message.into(),
        }),
    )
        .into_response()
}

impl IntoResponse for ReaderError {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            let status = match &self {
                ReaderError::VaultNotFound(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::BAD_REQUEST,
            };
            return api_error(status, self.to_string());
        }

        error!("Spend limit readout failed: {}", self);
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/spend-limit", get(get_spend_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /spend-limit?address= - Current spendable amount for a vault owner
async fn get_spend_limit(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SpendLimitQuery>,
) -> Result<Json<SpendLimitResponse>, ReaderError> {
    let address = query
        .address
        .ok_or_else(|| ReaderError::InvalidAddress("address is required".to_string()))?;
    let owner = parse_owner_address(&address)?;

    let readout = state.reader.read(&owner).await?;
    Ok(Json(readout.into()))
}
