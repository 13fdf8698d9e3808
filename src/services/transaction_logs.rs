//! Transaction log queries

use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::instrument;

use crate::domain::{parse_event_data, TransactionLog, TransactionLogPage};
use crate::error::Result;
use crate::filter::{transaction_log_variables, ListTransactionLogsArgs};
use crate::queries::TRANSACTION_LOGS_QUERY;
use crate::transport::{request, GraphQlExecutor};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionLogsResponse {
    transaction_logs: TransactionLogPage,
}

#[derive(Clone)]
pub struct TransactionLogService {
    executor: Arc<dyn GraphQlExecutor>,
}

impl TransactionLogService {
    pub fn new(executor: Arc<dyn GraphQlExecutor>) -> Self {
        Self { executor }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, args: ListTransactionLogsArgs) -> Result<Vec<TransactionLog>> {
        let variables = transaction_log_variables(&args);
        let response: TransactionLogsResponse =
            request(self.executor.as_ref(), TRANSACTION_LOGS_QUERY, &variables).await?;
        Ok(response.transaction_logs.items)
    }

    /// Events emitted for one escrow, oldest first by default
    pub async fn get_by_escrow(
        &self,
        escrow_address: &str,
        args: ListTransactionLogsArgs,
    ) -> Result<Vec<TransactionLog>> {
        self.list(ListTransactionLogsArgs {
            escrow_address: Some(escrow_address.to_string()),
            ..args
        })
        .await
    }

    /// See [`parse_event_data`]
    pub fn parse_event_data(&self, event_data: &str) -> Map<String, Value> {
        parse_event_data(event_data)
    }
}
