//! Event ingestion.
//!
//! - `POST /events/pool-initialized` – accept a signed `PoolInitialized` event
//!
//! The handler only validates and enqueues. Decoding, assembly and the store
//! write happen on the indexer runner, in delivery order.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use poolidx_core::events::PoolInitialized;
use poolidx_sdk::objects::{IngestAccepted, PoolInitializedEvent};

use super::ApiError;
use crate::api::extractors::SignedBody;
use crate::state::AppState;

pub(super) async fn ingest_pool_initialized(
    State(state): State<AppState>,
    SignedBody(event): SignedBody<PoolInitializedEvent>,
) -> Result<impl IntoResponse, ApiError> {
    let event = PoolInitialized::try_from(event).map_err(|e| {
        tracing::warn!(error = %e, "Rejected PoolInitialized with malformed config");
        ApiError::InvalidConfig(e)
    })?;
    let id = event.id();

    state
        .event_tx
        .send(event)
        .await
        .map_err(|_| ApiError::QueueClosed)?;
    tracing::debug!(id = %id, "Queued PoolInitialized");

    Ok((StatusCode::ACCEPTED, Json(IngestAccepted { id: id.into() })))
}
