use std::fs;
use std::path::PathBuf;

use alloy_primitives::Address;
use serde::Deserialize;
use tracing::warn;

use crate::domain::experience::{DEFAULT_COVER_IMAGE, PRICE_DECIMALS};
use crate::domain::CardStyle;
use crate::services::ServiceOptions;

pub const DEFAULT_RPC_URL: &str = "https://worldchain-mainnet.g.alchemy.com/public";
pub const DEFAULT_LISTEN: &str = "0.0.0.0:3000";

/// A named alternative node, selectable with `--endpoint <name>`
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
    pub name: Option<String>,
    pub rpc: Option<String>,
    pub ipc: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rpc_url: String,
    pub endpoints: Vec<EndpointConfig>,
    pub experience_contract: String,
    pub profile_hub_contract: String,
    pub listen: String,
    pub read_concurrency: usize,
    pub fallback_image: String,
    pub price_decimals: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            endpoints: Vec::new(),
            experience_contract: Address::ZERO.to_string(),
            profile_hub_contract: Address::ZERO.to_string(),
            listen: DEFAULT_LISTEN.to_string(),
            read_concurrency: 8,
            fallback_image: DEFAULT_COVER_IMAGE.to_string(),
            price_decimals: PRICE_DECIMALS,
        }
    }
}

impl Config {
    pub fn experience_contract(&self) -> anyhow::Result<Address> {
        parse_contract("experience_contract", &self.experience_contract)
    }

    pub fn profile_hub_contract(&self) -> anyhow::Result<Address> {
        parse_contract("profile_hub_contract", &self.profile_hub_contract)
    }

    pub fn endpoint(&self, name: &str) -> Option<&EndpointConfig> {
        self.endpoints.iter().find(|endpoint| {
            endpoint
                .name
                .as_deref()
                .is_some_and(|n| n.eq_ignore_ascii_case(name.trim()))
        })
    }

    pub fn service_options(&self) -> anyhow::Result<ServiceOptions> {
        Ok(ServiceOptions {
            read_concurrency: self.read_concurrency.max(1),
            card_style: CardStyle {
                fallback_image: self.fallback_image.clone(),
                price_decimals: self.price_decimals,
            },
            experience_contract: self.experience_contract()?,
        })
    }
}

fn parse_contract(key: &str, value: &str) -> anyhow::Result<Address> {
    let address: Address = value
        .trim()
        .parse()
        .map_err(|err| anyhow::anyhow!("{key} is not an address ({value}): {err}"))?;
    if address.is_zero() {
        warn!("{key} is not configured, reads against it will come back empty");
    }
    Ok(address)
}

/// Load the config file, falling back to defaults when it is absent or
/// unreadable. Environment overrides are applied on top.
pub fn load() -> Config {
    let mut config = config_path()
        .and_then(|path| match fs::read_to_string(&path) {
            Ok(content) => Some((path, content)),
            Err(_) => None,
        })
        .map(|(path, content)| parse(&content).unwrap_or_else(|err| {
            warn!(path = %path.display(), error = %err, "ignoring invalid config file");
            Config::default()
        }))
        .unwrap_or_default();
    apply_env(&mut config);
    config
}

pub fn parse(content: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(content)
}

fn apply_env(config: &mut Config) {
    if let Ok(value) = std::env::var("NOMAD_RPC_URL") {
        config.rpc_url = value;
    }
    if let Ok(value) = std::env::var("NOMAD_EXPERIENCE_CONTRACT") {
        config.experience_contract = value;
    }
    if let Ok(value) = std::env::var("NOMAD_PROFILE_HUB_CONTRACT") {
        config.profile_hub_contract = value;
    }
    if let Ok(value) = std::env::var("NOMAD_LISTEN") {
        config.listen = value;
    }
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("NOMAD_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("nomad").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("nomad").join("config.toml"));
    }

    directories::ProjectDirs::from("app", "nomad", "nomad")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
