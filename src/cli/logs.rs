//! `zenland logs` - on-chain events captured by the indexer.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::client::ZenlandClient;
use crate::domain::TransactionLog;
use crate::filter::{ListTransactionLogsArgs, OrderDirection};

use super::output::{self, OutputMode};

#[derive(Args, Debug, Clone)]
pub struct LogsArgs {
    /// Only events for this escrow address.
    #[arg(long)]
    pub escrow: Option<String>,
    #[arg(long)]
    pub limit: Option<u32>,
    #[arg(long)]
    pub offset: Option<u32>,
    /// asc or desc
    #[arg(long)]
    pub order_direction: Option<OrderDirection>,
}

#[derive(Debug, Serialize, Tabled)]
pub struct LogRow {
    pub time: String,
    pub block: u64,
    pub event: String,
    pub contract: String,
    pub escrow: String,
    pub tx: String,
}

impl From<&TransactionLog> for LogRow {
    fn from(log: &TransactionLog) -> Self {
        Self {
            time: output::format_timestamp(log.timestamp),
            block: log.block_number,
            event: log.event_name.clone(),
            contract: log.contract_type.clone(),
            escrow: log
                .escrow_address
                .as_deref()
                .map(output::short_address)
                .unwrap_or_else(|| "-".to_string()),
            tx: output::short_address(&log.tx_hash),
        }
    }
}

pub async fn run(args: LogsArgs, client: &ZenlandClient, mode: OutputMode) -> anyhow::Result<()> {
    let list_args = ListTransactionLogsArgs {
        escrow_address: None,
        limit: args.limit,
        offset: args.offset,
        order_by: None,
        order_direction: args.order_direction,
    };
    let service = client.transaction_logs();
    let logs = match args.escrow.as_deref() {
        Some(escrow) => service.get_by_escrow(escrow, list_args).await?,
        None => service.list(list_args).await?,
    };

    match mode {
        // full records, with event data decoded
        OutputMode::Json => {
            let decoded: Vec<serde_json::Value> = logs
                .iter()
                .map(|log| -> Result<serde_json::Value, serde_json::Error> {
                    let mut value = serde_json::to_value(log)?;
                    value["eventData"] = serde_json::Value::Object(log.event_data());
                    Ok(value)
                })
                .collect::<Result<_, _>>()?;
            output::print_item(&decoded, mode)?;
        }
        OutputMode::Table => {
            let rows: Vec<LogRow> = logs.iter().map(LogRow::from).collect();
            output::print_items(&rows, mode)?;
        }
    }
    Ok(())
}
