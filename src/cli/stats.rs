//! `zenland stats` - protocol totals for one network scope.

use serde::Serialize;
use tabled::Tabled;

use crate::client::ZenlandClient;
use crate::domain::ProtocolStats;

use super::output::{self, OutputMode};

#[derive(Debug, Serialize, Tabled)]
pub struct StatRow {
    pub metric: &'static str,
    pub value: String,
}

pub fn stat_rows(stats: &ProtocolStats) -> Vec<StatRow> {
    let row = |metric, value: String| StatRow { metric, value };
    vec![
        row("scope", stats.id.clone()),
        row("escrows created", stats.total_escrows_created.to_string()),
        row("active escrows", stats.active_escrow_count.to_string()),
        row("volume escrowed", stats.total_volume_escrowed.to_string()),
        row("fees collected", stats.total_fees_collected.to_string()),
        row("escrow TVL", stats.escrow_tvl.to_string()),
        row("agent staking TVL", stats.agent_staking_tvl.to_string()),
        row("total TVL", stats.current_tvl.to_string()),
        row("agents registered", stats.total_agents_registered.to_string()),
        row("active agents", stats.active_agents_count.to_string()),
    ]
}

pub async fn run(
    scope: Option<String>,
    raw: bool,
    client: &ZenlandClient,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let scope = scope.as_deref();
    let service = client.protocol_stats();

    if raw {
        match service.get_raw(scope).await? {
            Some(stats) => output::print_item(&stats, mode)?,
            None => output::print_not_found("protocol stats", scope.unwrap_or("default scope")),
        }
        return Ok(());
    }

    match service.get(scope).await? {
        Some(stats) => match mode {
            OutputMode::Json => output::print_item(&stats, mode)?,
            OutputMode::Table => output::print_items(&stat_rows(&stats), mode)?,
        },
        None => output::print_not_found("protocol stats", scope.unwrap_or("default scope")),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Amount, RawProtocolStats};

    #[test]
    fn rows_show_recomposed_tvl() {
        let raw: RawProtocolStats = serde_json::from_value(serde_json::json!({
            "id": "mainnet",
            "totalEscrowsCreated": 2,
            "totalVolumeEscrowed": "10",
            "totalFeesCollected": "1",
            "currentTVL": "1000",
            "activeEscrowCount": 1,
            "totalAgentsRegistered": 2,
            "activeAgentsCount": 2
        }))
        .unwrap();
        let stakes = [Amount::from(100), Amount::from(200)];
        let stats = ProtocolStats::aggregate(raw, stakes.iter());

        let rows = stat_rows(&stats);
        let total = rows.iter().find(|r| r.metric == "total TVL").unwrap();
        assert_eq!(total.value, "1300");
        let staking = rows.iter().find(|r| r.metric == "agent staking TVL").unwrap();
        assert_eq!(staking.value, "300");
    }
}
