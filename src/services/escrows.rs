//! Escrow queries

use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::config::DEFAULT_RECENT_LIMIT;
use crate::domain::{Escrow, EscrowPage, StateGroup};
use crate::error::Result;
use crate::filter::{escrow_list_variables, ListEscrowsArgs, OrderDirection};
use crate::queries::{ESCROWS_QUERY, ESCROW_QUERY};
use crate::transport::{request, GraphQlExecutor};

#[derive(Deserialize)]
struct EscrowsResponse {
    escrows: EscrowPage,
}

#[derive(Deserialize)]
struct EscrowResponse {
    escrow: Option<Escrow>,
}

/// Escrow listing and lookup bound to one indexer
#[derive(Clone)]
pub struct EscrowService {
    executor: Arc<dyn GraphQlExecutor>,
}

impl EscrowService {
    pub fn new(executor: Arc<dyn GraphQlExecutor>) -> Self {
        Self { executor }
    }

    /// List escrows with filtering and pagination
    #[instrument(skip(self))]
    pub async fn list(&self, args: ListEscrowsArgs) -> Result<EscrowPage> {
        let variables = escrow_list_variables(&args)?;
        let response: EscrowsResponse =
            request(self.executor.as_ref(), ESCROWS_QUERY, &variables).await?;
        debug!(
            "fetched {} of {} escrows",
            response.escrows.items.len(),
            response.escrows.total_count
        );
        Ok(response.escrows)
    }

    /// Look up one escrow by contract address; `None` if the indexer has no such escrow
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Escrow>> {
        let variables = json!({ "id": id.trim().to_lowercase() });
        let response: EscrowResponse =
            request(self.executor.as_ref(), ESCROW_QUERY, &variables).await?;
        Ok(response.escrow)
    }

    /// Escrows where `user` is buyer, seller or agent
    pub async fn get_by_user(&self, user: &str, args: ListEscrowsArgs) -> Result<EscrowPage> {
        self.list(args.with_user(user)).await
    }

    pub async fn get_by_state_group(
        &self,
        group: StateGroup,
        args: ListEscrowsArgs,
    ) -> Result<EscrowPage> {
        self.list(args.with_state_group(group)).await
    }

    /// Newest escrows first, for activity feeds
    pub async fn recent(&self, limit: Option<u32>) -> Result<Vec<Escrow>> {
        let page = self
            .list(ListEscrowsArgs {
                limit: Some(limit.unwrap_or(DEFAULT_RECENT_LIMIT)),
                order_by: Some("createdAt".to_string()),
                order_direction: Some(OrderDirection::Desc),
                ..Default::default()
            })
            .await?;
        Ok(page.items)
    }
}
