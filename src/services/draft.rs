//! createExperience payloads for the wallet to sign
//!
//! The application never sends transactions itself. It hands the wallet a
//! pre-built call and later polls the returned transaction id.

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::Marketplace;
use crate::domain::units::parse_units;
use crate::infrastructure::ledger::bindings::INomadExperience;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("Title is required")]
    EmptyTitle,

    #[error("End time {end} is before start time {start}")]
    EndBeforeStart { start: u64, end: u64 },

    #[error("An experience needs room for at least one participant")]
    NoCapacity,

    #[error("Invalid price: {0}")]
    InvalidPrice(String),
}

/// Experience as entered by the host, before it is on chain
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cover_image: String,
    pub start_time: u64,
    /// 0 leaves the end open
    #[serde(default)]
    pub end_time: u64,
    #[serde(default)]
    pub location: String,
    /// Decimal amount, e.g. `"0.5"`
    pub price: String,
    pub max_participants: u64,
}

/// A contract call in the shape wallet mini-app hosts expect
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletCall {
    pub address: Address,
    pub function_name: &'static str,
    /// Arguments in declaration order; integers as decimal strings
    pub args: Vec<Value>,
    /// ABI-encoded call data, `0x`-prefixed
    pub calldata: String,
}

/// Validate `draft` and encode it as a createExperience call on `contract`.
pub fn build_create_call(
    contract: Address,
    draft: &ExperienceDraft,
    price_decimals: u8,
) -> Result<WalletCall, DraftError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(DraftError::EmptyTitle);
    }
    if draft.end_time != 0 && draft.end_time < draft.start_time {
        return Err(DraftError::EndBeforeStart {
            start: draft.start_time,
            end: draft.end_time,
        });
    }
    if draft.max_participants == 0 {
        return Err(DraftError::NoCapacity);
    }
    let price = parse_units(&draft.price, price_decimals).map_err(DraftError::InvalidPrice)?;

    let call = INomadExperience::createExperienceCall {
        title: title.to_string(),
        description: draft.description.clone(),
        coverImage: draft.cover_image.clone(),
        startTime: U256::from(draft.start_time),
        endTime: U256::from(draft.end_time),
        location: draft.location.clone(),
        price,
        maxParticipants: U256::from(draft.max_participants),
    };

    let args = vec![
        Value::from(call.title.clone()),
        Value::from(call.description.clone()),
        Value::from(call.coverImage.clone()),
        Value::from(call.startTime.to_string()),
        Value::from(call.endTime.to_string()),
        Value::from(call.location.clone()),
        Value::from(call.price.to_string()),
        Value::from(call.maxParticipants.to_string()),
    ];

    Ok(WalletCall {
        address: contract,
        function_name: "createExperience",
        args,
        calldata: format!("0x{}", hex::encode(call.abi_encode())),
    })
}

impl Marketplace {
    pub fn draft_experience(&self, draft: &ExperienceDraft) -> Result<WalletCall, DraftError> {
        build_create_call(
            self.options.experience_contract,
            draft,
            self.options.card_style.price_decimals,
        )
    }
}
