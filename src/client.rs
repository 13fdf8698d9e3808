//! Zenland indexer client
//!
//! Bundles the query services behind a single base URL. The client holds no
//! cache and no mutable state, so it is cheap to clone and safe to share
//! across tasks; concurrent identical calls each make their own request.

use std::sync::Arc;

use crate::config::{ClientConfig, EligibilityPolicy};
use crate::error::Result;
use crate::services::{
    AgentService, DashboardService, EscrowService, ProtocolStatsService, TransactionLogService,
};
use crate::transport::{GraphQlExecutor, HttpGraphQlClient};

#[derive(Clone)]
pub struct ZenlandClient {
    base_url: String,
    escrows: EscrowService,
    agents: AgentService,
    protocol_stats: ProtocolStatsService,
    transaction_logs: TransactionLogService,
    dashboard: DashboardService,
}

impl ZenlandClient {
    /// Client over HTTP for the configured base URL
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = config.normalized_base_url()?;
        let executor = Arc::new(HttpGraphQlClient::new(&base_url)?);
        Ok(Self::with_executor(base_url, executor))
    }

    /// Client over the production indexer
    pub fn production() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Client over a caller-supplied transport
    pub fn with_executor(base_url: impl Into<String>, executor: Arc<dyn GraphQlExecutor>) -> Self {
        Self::with_policy(base_url, executor, EligibilityPolicy::default())
    }

    pub fn with_policy(
        base_url: impl Into<String>,
        executor: Arc<dyn GraphQlExecutor>,
        policy: EligibilityPolicy,
    ) -> Self {
        let escrows = EscrowService::new(executor.clone());
        Self {
            base_url: base_url.into(),
            dashboard: DashboardService::new(escrows.clone()),
            escrows,
            agents: AgentService::with_policy(executor.clone(), policy),
            protocol_stats: ProtocolStatsService::new(executor.clone()),
            transaction_logs: TransactionLogService::new(executor),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn escrows(&self) -> &EscrowService {
        &self.escrows
    }

    pub fn agents(&self) -> &AgentService {
        &self.agents
    }

    pub fn protocol_stats(&self) -> &ProtocolStatsService {
        &self.protocol_stats
    }

    pub fn transaction_logs(&self) -> &TransactionLogService {
        &self.transaction_logs
    }

    pub fn dashboard(&self) -> &DashboardService {
        &self.dashboard
    }
}
