//! Route handlers
//!
//! Read endpoints answer 200 with an empty or default body when the ledger
//! cannot be read; the failure only shows up in the logs.

use std::str::FromStr;

use alloy_primitives::Address;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};
use tracing::info;

use super::error::ApiError;
use super::state::AppState;
use super::types::{CatalogQuery, ConfirmationRequest, StatusResponse};
use crate::domain::units::unix_now;
use crate::domain::{ExperienceCard, ProfileSummary, Schedule};
use crate::services::{Confirmation, ExperienceDraft, Fetch, WalletCall};

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "nomad",
        "version": env!("CARGO_PKG_VERSION"),
        "ledger": state.marketplace.ledger().endpoint_name(),
    }))
}

/// Ready once the node answers
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.marketplace.ledger().head_block().await {
        Ok(block) => (
            StatusCode::OK,
            Json(json!({ "status": "ready", "block": block })),
        ),
        Err(err) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable", "error": err.to_string() })),
        ),
    }
}

pub async fn confirm_transaction(
    State(state): State<AppState>,
    body: Result<Json<ConfirmationRequest>, JsonRejection>,
) -> Result<Json<Confirmation>, ApiError> {
    let Json(request) = body.map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))?;
    let transaction_id = request
        .transaction_id
        .filter(|id| !id.trim().is_empty())
        .ok_or(ApiError::MissingTransactionId)?;

    info!(%transaction_id, "checking transaction confirmation");
    let confirmation = state.marketplace.check_transaction(&transaction_id).await?;
    Ok(Json(confirmation))
}

pub async fn list_experiences(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Json<Vec<ExperienceCard>> {
    let cards = state.marketplace.catalog_cards(query.q.as_deref()).await;
    Json(cards.into_value_or_default())
}

pub async fn get_experience(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ExperienceCard>, ApiError> {
    match state.marketplace.experience_card(id).await {
        Fetch::Loaded(card) => Ok(Json(card)),
        Fetch::Empty => Err(ApiError::ExperienceNotFound {
            id,
            details: format!("experience {id} does not exist"),
        }),
        Fetch::Failed(details) => Err(ApiError::ExperienceNotFound { id, details }),
    }
}

pub async fn experience_status(
    State(state): State<AppState>,
    Path((id, address)): Path<(u64, String)>,
) -> Result<Json<StatusResponse>, ApiError> {
    let address = parse_address(&address)?;
    let status = state
        .marketplace
        .user_status(id, address)
        .await
        .into_value_or_default();
    Ok(Json(StatusResponse {
        experience_id: id,
        address,
        status,
    }))
}

pub async fn user_schedule(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<Schedule<ExperienceCard>>, ApiError> {
    let address = parse_address(&address)?;
    let schedule = state.marketplace.user_schedule(address, unix_now()).await;
    Ok(Json(schedule.into_value_or_default()))
}

pub async fn user_profile(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<ProfileSummary>, ApiError> {
    let address = parse_address(&address)?;
    let summary = state.marketplace.profile_summary(address).await;
    Ok(Json(summary.into_value_or_default()))
}

pub async fn draft_experience(
    State(state): State<AppState>,
    body: Result<Json<ExperienceDraft>, JsonRejection>,
) -> Result<Json<WalletCall>, ApiError> {
    let Json(draft) = body.map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))?;
    let call = state.marketplace.draft_experience(&draft)?;
    Ok(Json(call))
}

fn parse_address(value: &str) -> Result<Address, ApiError> {
    Address::from_str(value.trim()).map_err(|_| ApiError::InvalidAddress(value.to_string()))
}
