//! nomad - data layer of the experiences marketplace mini-app
//!
//! Reads experiences, memberships and profiles from the World Chain
//! contracts, shapes them for display, and reports confirmation of
//! wallet-submitted transactions.

pub mod api;
pub mod config;
pub mod domain;
pub mod export;
pub mod infrastructure;
pub mod services;

pub use domain::{Experience, ExperienceCard, MembershipStatus, Schedule, UserProfile};
pub use infrastructure::{ContractLedger, ExperienceLedger, LedgerError, ReceiptSummary};
pub use services::{Fetch, Marketplace, ServiceOptions};
