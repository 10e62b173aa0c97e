//! Record lookups.
//!
//! - `GET /pool-initializations/{id}` – one record by event id
//! - `GET /pool-initializations`      – ascending page of records

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use poolidx_core::identity::EventId;
use poolidx_sdk::objects::{
    ListPoolInitializationsQuery, PoolInitializationResponse, clamp_limit,
};

use super::ApiError;
use crate::state::AppState;

pub(super) async fn get_pool_initialization(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: EventId = id.parse().map_err(ApiError::InvalidId)?;

    let record = state
        .store
        .get(id)
        .await
        .map_err(ApiError::Store)?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(PoolInitializationResponse::from(&record)))
}

pub(super) async fn list_pool_initializations(
    State(state): State<AppState>,
    Query(query): Query<ListPoolInitializationsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let after = query
        .after
        .as_deref()
        .map(str::parse::<EventId>)
        .transpose()
        .map_err(ApiError::InvalidId)?;
    let limit = clamp_limit(query.limit);

    let records = state
        .store
        .list(after, limit)
        .await
        .map_err(ApiError::Store)?;

    Ok(Json(
        records
            .iter()
            .map(PoolInitializationResponse::from)
            .collect::<Vec<_>>(),
    ))
}
