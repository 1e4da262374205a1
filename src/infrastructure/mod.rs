//! Infrastructure layer - External service integrations
//!
//! This layer contains:
//! - Alloy-based Ethereum provider implementations
//! - Contract bindings and the typed ledger client built on them

pub mod ethereum;
pub mod ledger;

pub use ethereum::{create_provider, EthereumProvider, ProviderConfig};
pub use ledger::{ContractLedger, ExperienceLedger, LedgerError, ReceiptSummary};
