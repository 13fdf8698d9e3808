//! `zenland dashboard` - per-user or global escrow roll-up.

use serde::Serialize;
use tabled::Tabled;

use crate::client::ZenlandClient;
use crate::services::DashboardStats;

use super::escrows::EscrowRow;
use super::output::{self, OutputMode};

#[derive(Debug, Serialize, Tabled)]
pub struct SummaryRow {
    pub active: u64,
    pub in_dispute: u64,
    pub completed: u64,
    pub tvl: String,
}

impl From<&DashboardStats> for SummaryRow {
    fn from(stats: &DashboardStats) -> Self {
        Self {
            active: stats.active_count,
            in_dispute: stats.dispute_count,
            completed: stats.completed_count,
            tvl: stats
                .tvl
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

pub async fn run(user: Option<String>, client: &ZenlandClient, mode: OutputMode) -> anyhow::Result<()> {
    let service = client.dashboard();
    let stats = match user.as_deref() {
        Some(user) => service.user_dashboard(user).await?,
        None => service.global_dashboard().await?,
    };

    match mode {
        OutputMode::Json => output::print_item(&stats, mode)?,
        OutputMode::Table => {
            output::print_items(&[SummaryRow::from(&stats)], mode)?;
            println!();
            println!("Recent escrows");
            let rows: Vec<EscrowRow> = stats.recent_escrows.iter().map(EscrowRow::from).collect();
            output::print_items(&rows, mode)?;
        }
    }
    Ok(())
}
