//! Protocol statistics, tracked per scope (network id such as `mainnet` or `sepolia`)

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{instrument, warn};

use crate::config::{DEFAULT_STATS_ID, STATS_AGENT_PAGE_SIZE};
use crate::domain::{AgentStake, ProtocolStats, RawProtocolStats};
use crate::error::Result;
use crate::queries::PROTOCOL_STATS_QUERY;
use crate::transport::{request, GraphQlExecutor};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsVariables<'a> {
    id: &'a str,
    agent_limit: u32,
}

#[derive(Deserialize)]
struct ActiveAgents {
    #[serde(default)]
    items: Vec<AgentStake>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProtocolStatsResponse {
    protocol_stats: Option<RawProtocolStats>,
    #[serde(default)]
    agents: Option<ActiveAgents>,
}

#[derive(Clone)]
pub struct ProtocolStatsService {
    executor: Arc<dyn GraphQlExecutor>,
}

impl ProtocolStatsService {
    pub fn new(executor: Arc<dyn GraphQlExecutor>) -> Self {
        Self { executor }
    }

    async fn fetch(&self, scope: Option<&str>) -> Result<ProtocolStatsResponse> {
        let variables = StatsVariables {
            id: scope.unwrap_or(DEFAULT_STATS_ID),
            agent_limit: STATS_AGENT_PAGE_SIZE,
        };
        request(self.executor.as_ref(), PROTOCOL_STATS_QUERY, &variables).await
    }

    /// Stats for `scope` (default `mainnet`) with TVL recomposed from
    /// escrow-held value plus the summed stake of active agents.
    ///
    /// `None` when the scope has no stats record, even if agents exist.
    #[instrument(skip(self))]
    pub async fn get(&self, scope: Option<&str>) -> Result<Option<ProtocolStats>> {
        let response = self.fetch(scope).await?;

        let Some(raw) = response.protocol_stats else {
            return Ok(None);
        };

        let agents = response.agents.map(|a| a.items).unwrap_or_default();
        if agents.len() >= STATS_AGENT_PAGE_SIZE as usize {
            warn!(
                "active agent list hit the {} page bound; staking TVL may be understated",
                STATS_AGENT_PAGE_SIZE
            );
        }

        Ok(Some(ProtocolStats::aggregate(
            raw,
            agents.iter().map(|a| &a.stablecoin_stake),
        )))
    }

    /// The upstream stats record as-is, without staking recomposition
    #[instrument(skip(self))]
    pub async fn get_raw(&self, scope: Option<&str>) -> Result<Option<RawProtocolStats>> {
        Ok(self.fetch(scope).await?.protocol_stats)
    }
}
