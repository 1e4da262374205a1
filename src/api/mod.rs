//! HTTP API module.
//!
//! Exposes the transaction-confirmation endpoint and read-only views of the
//! ledger for the mini-app front end.

mod error;
mod handlers;
mod server;
mod state;
pub mod types;

pub use error::ApiError;
pub use server::{create_router, start_server};
pub use state::AppState;
