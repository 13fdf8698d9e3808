//! `zenland` command line: read-only queries against the indexer.

pub mod agents;
pub mod dashboard;
pub mod escrows;
pub mod logs;
pub mod output;
pub mod stats;

use clap::{Parser, Subcommand};

use crate::client::ZenlandClient;
use crate::config::{ClientConfig, LoggingConfig};

use self::output::OutputMode;

#[derive(Parser, Debug)]
#[command(name = "zenland")]
#[command(about = "Query the Zenland escrow protocol indexer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Indexer base URL; overrides config/zenland.toml and ZENLAND__BASE_URL,
    /// the only environment variable consulted for it.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Output as JSON instead of human-readable tables.
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding zenland.toml.
    #[arg(long, global = true, default_value = "config")]
    pub config_dir: String,

    /// Log level used when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Browse escrows.
    #[command(subcommand)]
    Escrows(escrows::EscrowsCommands),

    /// Browse agents and check eligibility.
    #[command(subcommand)]
    Agents(agents::AgentsCommands),

    /// Protocol statistics with staking-inclusive TVL.
    Stats {
        /// Network scope, e.g. mainnet or sepolia.
        #[arg(long)]
        scope: Option<String>,
        /// Print the upstream record without recomposing TVL.
        #[arg(long)]
        raw: bool,
    },

    /// Transaction logs.
    Logs(logs::LogsArgs),

    /// Escrow counts, TVL and recent activity.
    Dashboard {
        /// Address to scope the dashboard to; global when omitted.
        #[arg(long)]
        user: Option<String>,
    },
}

impl Cli {
    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            json: self.log_json,
        }
    }

    /// File and environment config, with `--base-url` taking precedence
    pub fn client_config(&self) -> anyhow::Result<ClientConfig> {
        let mut config = ClientConfig::load_from(&self.config_dir)?;
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        Ok(config)
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = ZenlandClient::new(cli.client_config()?)?;
    let mode = OutputMode::from_json_flag(cli.json);

    match cli.command {
        Commands::Escrows(cmd) => escrows::run(cmd, &client, mode).await,
        Commands::Agents(cmd) => agents::run(cmd, &client, mode).await,
        Commands::Stats { scope, raw } => stats::run(scope, raw, &client, mode).await,
        Commands::Logs(args) => logs::run(args, &client, mode).await,
        Commands::Dashboard { user } => dashboard::run(user, &client, mode).await,
    }
}
