//! Node access over alloy
//!
//! Only the read side of the node API is exposed: `eth_call`, receipts and
//! the chain head. Transactions are signed and sent by the user's wallet.

use std::fmt;
use std::path::PathBuf;

use alloy::network::Ethereum;
use alloy::primitives::{Bytes, B256};
use alloy::providers::{
    fillers::{BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller},
    Identity, Provider, ProviderBuilder, RootProvider,
};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use anyhow::{Context, Result};

/// Where the node is and which transport reaches it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderConfig {
    /// HTTP JSON-RPC endpoint
    Http(String),
    /// WebSocket endpoint
    WebSocket(String),
    /// IPC socket path (Unix only)
    #[cfg(unix)]
    Ipc(PathBuf),
}

impl ProviderConfig {
    /// Pick the transport from the URL scheme
    pub fn from_url(url: &str) -> Self {
        let url = url.trim();
        if url.starts_with("ws://") || url.starts_with("wss://") {
            ProviderConfig::WebSocket(url.to_string())
        } else {
            ProviderConfig::Http(url.to_string())
        }
    }

}

impl fmt::Display for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderConfig::Http(url) | ProviderConfig::WebSocket(url) => f.write_str(url),
            #[cfg(unix)]
            ProviderConfig::Ipc(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Read-only view of an Ethereum node
#[async_trait::async_trait]
pub trait EthereumProvider: Send + Sync + 'static {
    async fn block_number(&self) -> Result<u64>;

    /// `None` while the transaction is not mined
    async fn get_receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>>;

    /// `eth_call` against the latest block
    async fn call(&self, request: TransactionRequest) -> Result<Bytes>;

    /// URL or socket path, for logs and `/health`
    fn endpoint_name(&self) -> String;
}

type FilledProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider,
    Ethereum,
>;

/// A connected node; every transport builds the same filled provider
pub struct AlloyProvider {
    inner: FilledProvider,
    endpoint: String,
}

impl AlloyProvider {
    /// Connect over the transport `config` names
    pub async fn connect(config: ProviderConfig) -> Result<Self> {
        let endpoint = config.to_string();
        let inner = match config {
            ProviderConfig::Http(url) => {
                let rpc_url = url.parse().context("Invalid HTTP URL")?;
                ProviderBuilder::new().connect_http(rpc_url)
            }
            ProviderConfig::WebSocket(url) => ProviderBuilder::new()
                .connect(&url)
                .await
                .context("Failed to create WebSocket provider")?,
            #[cfg(unix)]
            ProviderConfig::Ipc(path) => {
                use alloy::providers::IpcConnect;
                ProviderBuilder::new()
                    .connect_ipc(IpcConnect::new(path.to_string_lossy().into_owned()))
                    .await
                    .context("Failed to create IPC provider")?
            }
        };
        Ok(Self { inner, endpoint })
    }
}

/// Connect and erase the concrete provider behind [`EthereumProvider`]
pub async fn create_provider(config: ProviderConfig) -> Result<Box<dyn EthereumProvider>> {
    Ok(Box::new(AlloyProvider::connect(config).await?))
}

#[async_trait::async_trait]
impl EthereumProvider for AlloyProvider {
    async fn block_number(&self) -> Result<u64> {
        Ok(self.inner.get_block_number().await?)
    }

    async fn get_receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>> {
        Ok(self.inner.get_transaction_receipt(hash).await?)
    }

    async fn call(&self, request: TransactionRequest) -> Result<Bytes> {
        Ok(self.inner.call(request).await?)
    }

    fn endpoint_name(&self) -> String {
        self.endpoint.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_from_scheme() {
        assert_eq!(
            ProviderConfig::from_url("wss://example.org/ws"),
            ProviderConfig::WebSocket("wss://example.org/ws".into())
        );
        assert_eq!(
            ProviderConfig::from_url(" https://worldchain-mainnet.g.alchemy.com/public\t"),
            ProviderConfig::Http("https://worldchain-mainnet.g.alchemy.com/public".into())
        );
    }

    #[test]
    fn test_display_is_the_endpoint() {
        let config = ProviderConfig::from_url("ws://127.0.0.1:8546");
        assert_eq!(config.to_string(), "ws://127.0.0.1:8546");
    }

    #[tokio::test]
    async fn test_http_connect_is_lazy() {
        // No request is made until the first read
        let provider = create_provider(ProviderConfig::from_url("http://127.0.0.1:1"))
            .await
            .unwrap();
        assert_eq!(provider.endpoint_name(), "http://127.0.0.1:1");
    }

    #[tokio::test]
    async fn test_rejects_unparsable_http_url() {
        let result = create_provider(ProviderConfig::Http("not a url".into())).await;
        assert!(result.is_err());
    }
}
