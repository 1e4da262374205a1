//! Ethereum infrastructure - Alloy provider implementations

mod provider;

pub use provider::{create_provider, AlloyProvider, EthereumProvider, ProviderConfig};
