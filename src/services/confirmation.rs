//! Transaction confirmation by single-shot receipt polling

use std::time::Duration;

use alloy_primitives::B256;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use super::Marketplace;
use crate::infrastructure::{LedgerError, ReceiptSummary};

#[derive(Debug, Error)]
pub enum ConfirmationError {
    #[error("Transaction ID is required")]
    MissingTransactionId,

    #[error("Invalid transaction ID: {0}")]
    InvalidTransactionId(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmationStatus {
    Pending,
    Confirmed,
    Failed,
}

/// Confirmation state of a submitted transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    pub status: ConfirmationStatus,
    pub transaction_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<B256>,
    /// Milliseconds since the epoch at which the receipt was seen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Decimal string, gas can exceed what JSON numbers hold exactly
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_used: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Confirmation {
    pub fn pending(transaction_id: impl Into<String>) -> Self {
        Self {
            status: ConfirmationStatus::Pending,
            transaction_id: transaction_id.into(),
            block_number: None,
            block_hash: None,
            timestamp: None,
            gas_used: None,
            message: Some("Transaction not yet confirmed".to_string()),
        }
    }

    pub fn from_receipt(
        transaction_id: impl Into<String>,
        receipt: &ReceiptSummary,
        timestamp_ms: i64,
    ) -> Self {
        Self {
            status: if receipt.success {
                ConfirmationStatus::Confirmed
            } else {
                ConfirmationStatus::Failed
            },
            transaction_id: transaction_id.into(),
            block_number: receipt.block_number,
            block_hash: receipt.block_hash,
            timestamp: Some(timestamp_ms),
            gas_used: Some(receipt.gas_used.to_string()),
            message: None,
        }
    }

    /// Confirmed and failed are terminal; pending may still change
    pub fn is_final(&self) -> bool {
        self.status != ConfirmationStatus::Pending
    }
}

/// Accepts 32-byte hex hashes with or without the `0x` prefix
pub fn parse_transaction_id(input: &str) -> Result<B256, ConfirmationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ConfirmationError::MissingTransactionId);
    }
    trimmed
        .parse::<B256>()
        .map_err(|_| ConfirmationError::InvalidTransactionId(trimmed.to_string()))
}

impl Marketplace {
    /// One receipt lookup. A transaction that is not mined yet is pending,
    /// not an error.
    pub async fn check_transaction(
        &self,
        transaction_id: &str,
    ) -> Result<Confirmation, ConfirmationError> {
        let hash = parse_transaction_id(transaction_id)?;
        let transaction_id = transaction_id.trim();
        debug!(%hash, "checking transaction confirmation");

        let confirmation = match self.ledger.transaction_receipt(hash).await? {
            None => Confirmation::pending(transaction_id),
            Some(receipt) => Confirmation::from_receipt(
                transaction_id,
                &receipt,
                chrono::Utc::now().timestamp_millis(),
            ),
        };

        if confirmation.is_final() {
            info!(
                %hash,
                status = ?confirmation.status,
                block = ?confirmation.block_number,
                "transaction settled"
            );
        }
        Ok(confirmation)
    }

    /// Repeat [`Self::check_transaction`] until the transaction settles or
    /// `max_attempts` checks have been made.
    pub async fn wait_for_transaction(
        &self,
        transaction_id: &str,
        interval: Duration,
        max_attempts: u32,
    ) -> Result<Confirmation, ConfirmationError> {
        let mut attempt = 1;
        loop {
            let confirmation = self.check_transaction(transaction_id).await?;
            if confirmation.is_final() || attempt >= max_attempts {
                return Ok(confirmation);
            }
            attempt += 1;
            tokio::time::sleep(interval).await;
        }
    }
}
