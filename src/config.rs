use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::error::{Result, ZenlandError};

/// Production indexer URL
pub const DEFAULT_BASE_URL: &str = "https://api.zen.land";

/// Coverage granted per unit of staked collateral ($1 stake backs $20 of escrow)
pub const MAV_MULTIPLIER: u32 = 20;

/// Default page size for escrow and agent listings
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// Default page size for transaction log listings
pub const DEFAULT_LOG_PAGE_SIZE: u32 = 100;

/// Upper bound on active agents fetched for the staking component of TVL.
/// Agents beyond this bound are silently left out of the sum.
pub const STATS_AGENT_PAGE_SIZE: u32 = 1000;

/// Upper bound on escrows summed for a user's TVL
pub const TVL_ESCROW_PAGE_SIZE: u32 = 1000;

/// Stats scope used when the caller does not name one
pub const DEFAULT_STATS_ID: &str = "mainnet";

/// Number of escrows shown in "recent activity" views
pub const DEFAULT_RECENT_LIMIT: u32 = 5;

/// Client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the indexer API (the GraphQL endpoint is `<base>/graphql`)
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Load configuration from `config/zenland.toml` and the environment
    pub fn load() -> Result<Self> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .add_source(File::from(config_dir.join("zenland.toml")).required(false))
            // Override with environment variables (ZENLAND__BASE_URL)
            .add_source(
                Environment::with_prefix("ZENLAND")
                    .separator("__")
                    .try_parsing(true),
            );

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Base URL with any trailing slash removed, after checking it parses
    pub fn normalized_base_url(&self) -> Result<String> {
        normalize_base_url(&self.base_url)
    }

    /// Full GraphQL endpoint
    pub fn endpoint(&self) -> Result<String> {
        Ok(format!("{}/graphql", self.normalized_base_url()?))
    }
}

pub(crate) fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    url::Url::parse(trimmed)
        .map_err(|e| ZenlandError::Validation(format!("invalid base URL '{trimmed}': {e}")))?;
    Ok(trimmed.strip_suffix('/').unwrap_or(trimmed).to_string())
}

/// Policy knobs for agent eligibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityPolicy {
    pub mav_multiplier: u32,
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self {
            mav_multiplier: MAV_MULTIPLIER,
        }
    }
}

/// Logging settings for the `zenland` binary
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
