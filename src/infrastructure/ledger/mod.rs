//! Ledger access - contract bindings and typed read client
//!
//! The application holds no authoritative data: everything it shows is read
//! through [`ExperienceLedger`].

pub mod bindings;
mod client;
mod error;

pub use client::{ContractLedger, ExperienceLedger, ReceiptSummary};
pub use error::{LedgerError, LedgerResult};
