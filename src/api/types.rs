//! Request and response bodies of the HTTP API

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::domain::MembershipStatus;

/// Body of `POST /api/transaction-confirmation`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationRequest {
    #[serde(default)]
    pub transaction_id: Option<String>,
}

/// Query string of `GET /api/experiences`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogQuery {
    /// Free-text filter on title and description
    pub q: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub experience_id: u64,
    pub address: Address,
    pub status: MembershipStatus,
}
