use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::Address;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nomad::api::{self, AppState};
use nomad::config::{self, Config};
use nomad::domain::units::unix_now;
use nomad::export::{self, ExportFormat};
use nomad::infrastructure::{create_provider, ContractLedger, ProviderConfig};
use nomad::services::{build_create_call, ExperienceDraft};
use nomad::{Fetch, Marketplace};

#[derive(Debug, Parser)]
#[command(
    name = "nomad",
    version,
    about = "Nomad: experiences marketplace reader for World Chain"
)]
struct Args {
    /// HTTP JSON-RPC endpoint (e.g. https://worldchain-mainnet.g.alchemy.com/public)
    #[arg(long, global = true)]
    rpc: Option<String>,

    /// WebSocket endpoint (e.g. wss://...)
    #[arg(long, global = true)]
    ws: Option<String>,

    /// IPC path. Unix only.
    #[arg(long, global = true)]
    ipc: Option<PathBuf>,

    /// Named endpoint from the config file
    #[arg(long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Listen address, overrides `listen` from the config
        #[arg(long)]
        listen: Option<SocketAddr>,
    },
    /// List experiences, optionally filtered by a search query
    List {
        #[arg(long, short)]
        query: Option<String>,
    },
    /// Show one experience
    Show { id: u64 },
    /// Membership status of an address for one experience
    Status { id: u64, address: String },
    /// Upcoming and past experiences of an address
    Schedule { address: String },
    /// Profile summary of an address
    Profile { address: String },
    /// Check whether a transaction is confirmed
    Confirm {
        transaction_id: String,
        /// Keep polling until the transaction settles
        #[arg(long)]
        wait: bool,
        /// Seconds between checks with --wait
        #[arg(long, default_value_t = 2)]
        interval: u64,
        /// Maximum number of checks with --wait
        #[arg(long, default_value_t = 30)]
        attempts: u32,
    },
    /// Build the createExperience payload for a wallet to sign
    Draft {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        cover_image: String,
        /// Unix seconds
        #[arg(long)]
        start_time: u64,
        /// Unix seconds, 0 for open-ended
        #[arg(long, default_value_t = 0)]
        end_time: u64,
        #[arg(long, default_value = "")]
        location: String,
        /// Decimal amount, e.g. 0.5
        #[arg(long)]
        price: String,
        #[arg(long)]
        max_participants: u64,
    },
    /// Write the catalog or a schedule to a file
    Export {
        #[arg(value_enum)]
        target: ExportTarget,
        /// Required for schedule exports
        #[arg(long)]
        address: Option<String>,
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExportTarget {
    Catalog,
    Schedule,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let args = Args::parse();
    let config = config::load();

    // Drafting is offline, everything else needs a node
    if let Command::Draft {
        title,
        description,
        cover_image,
        start_time,
        end_time,
        location,
        price,
        max_participants,
    } = &args.command
    {
        let draft = ExperienceDraft {
            title: title.clone(),
            description: description.clone(),
            cover_image: cover_image.clone(),
            start_time: *start_time,
            end_time: *end_time,
            location: location.clone(),
            price: price.clone(),
            max_participants: *max_participants,
        };
        let call = build_create_call(config.experience_contract()?, &draft, config.price_decimals)?;
        return print_json(&call);
    }

    let marketplace = connect(&args, &config).await?;
    run(args.command, marketplace, &config).await
}

/// Initialize logging with tracing; stdout is reserved for command output
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nomad=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn connect(args: &Args, config: &Config) -> Result<Marketplace> {
    let endpoint = endpoint_from_args_and_config(args, config)?;
    let display = endpoint.to_string();
    let provider = create_provider(endpoint)
        .await
        .with_context(|| format!("Connection failed ({display})"))?;

    let ledger = ContractLedger::new(
        provider,
        config.experience_contract()?,
        config.profile_hub_contract()?,
    );
    Ok(Marketplace::new(Arc::new(ledger), config.service_options()?))
}

async fn run(command: Command, marketplace: Marketplace, config: &Config) -> Result<()> {
    match command {
        Command::Serve { listen } => {
            let addr = match listen {
                Some(addr) => addr,
                None => config
                    .listen
                    .parse()
                    .with_context(|| format!("Invalid listen address {}", config.listen))?,
            };
            api::start_server(addr, AppState::new(marketplace)).await
        }
        Command::List { query } => emit(marketplace.catalog_cards(query.as_deref()).await),
        Command::Show { id } => match marketplace.experience_card(id).await {
            Fetch::Loaded(card) => print_json(&card),
            Fetch::Empty => anyhow::bail!("Experience {id} not found"),
            Fetch::Failed(message) => anyhow::bail!("Experience {id} unavailable: {message}"),
        },
        Command::Status { id, address } => {
            let user = parse_address(&address)?;
            let status = marketplace.user_status(id, user).await;
            if let Some(message) = status.error() {
                eprintln!("warning: {message}");
            }
            println!("{}", status.into_value_or_default());
            Ok(())
        }
        Command::Schedule { address } => {
            let user = parse_address(&address)?;
            emit(marketplace.user_schedule(user, unix_now()).await)
        }
        Command::Profile { address } => {
            let user = parse_address(&address)?;
            emit(marketplace.profile_summary(user).await)
        }
        Command::Confirm {
            transaction_id,
            wait,
            interval,
            attempts,
        } => {
            let confirmation = if wait {
                marketplace
                    .wait_for_transaction(
                        &transaction_id,
                        Duration::from_secs(interval.max(1)),
                        attempts.max(1),
                    )
                    .await?
            } else {
                marketplace.check_transaction(&transaction_id).await?
            };
            print_json(&confirmation)
        }
        Command::Export {
            target,
            address,
            format,
            out,
        } => {
            let (path, count) = match target {
                ExportTarget::Catalog => {
                    let cards = marketplace.catalog_cards(None).await;
                    warn_unless_loaded(&cards);
                    export::export_cards(&cards.into_value_or_default(), format, out)?
                }
                ExportTarget::Schedule => {
                    let address = address.context("--address is required for schedule exports")?;
                    let user = parse_address(&address)?;
                    let schedule = marketplace.user_schedule(user, unix_now()).await;
                    warn_unless_loaded(&schedule);
                    export::export_schedule(&schedule.into_value_or_default(), format, out)?
                }
            };
            eprintln!("Exported {} rows to {}", count, path.display());
            Ok(())
        }
        Command::Draft { .. } => anyhow::bail!("draft does not need a node connection"),
    }
}

/// Print a read result, degrading to its default value with a note on stderr
fn emit<T: Serialize + Default>(fetch: Fetch<T>) -> Result<()> {
    warn_unless_loaded(&fetch);
    print_json(&fetch.into_value_or_default())
}

fn warn_unless_loaded<T>(fetch: &Fetch<T>) {
    match fetch {
        Fetch::Loaded(_) => {}
        Fetch::Empty => eprintln!("Nothing found"),
        Fetch::Failed(message) => eprintln!("warning: ledger read failed: {message}"),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_address(value: &str) -> Result<Address> {
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid address: {value}"))
}

fn endpoint_from_args_and_config(args: &Args, config: &Config) -> Result<ProviderConfig> {
    fn non_empty(value: &Option<String>) -> Option<&str> {
        value.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    // CLI arguments take precedence
    if let Some(ipc) = args.ipc.clone() {
        #[cfg(unix)]
        {
            return Ok(ProviderConfig::Ipc(ipc));
        }
        #[cfg(not(unix))]
        {
            let _ = ipc;
            return Err(anyhow::anyhow!("IPC is not supported on this platform"));
        }
    }
    if let Some(ws) = non_empty(&args.ws) {
        return Ok(ProviderConfig::WebSocket(ws.to_string()));
    }
    if let Some(rpc) = non_empty(&args.rpc) {
        return Ok(ProviderConfig::from_url(rpc));
    }

    if let Some(name) = non_empty(&args.endpoint) {
        let endpoint = config
            .endpoint(name)
            .with_context(|| format!("No endpoint named {name} in the config"))?;
        #[cfg(unix)]
        if let Some(ipc) = non_empty(&endpoint.ipc) {
            return Ok(ProviderConfig::Ipc(PathBuf::from(ipc)));
        }
        return non_empty(&endpoint.rpc)
            .map(ProviderConfig::from_url)
            .with_context(|| format!("Endpoint {name} has no rpc or ipc"));
    }

    Ok(ProviderConfig::from_url(&config.rpc_url))
}
