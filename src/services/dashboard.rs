//! Dashboard roll-ups built from escrow listings
//!
//! Each figure is an independent read; they run concurrently and the first
//! failure aborts the rest.

use serde::Serialize;
use tracing::{instrument, warn};

use crate::config::{DEFAULT_RECENT_LIMIT, TVL_ESCROW_PAGE_SIZE};
use crate::domain::{Amount, Escrow, StateGroup};
use crate::error::{Result, ZenlandError};
use crate::filter::ListEscrowsArgs;

use super::EscrowService;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub active_count: u64,
    pub dispute_count: u64,
    pub completed_count: u64,
    /// Principal locked in the user's escrows; `None` for the global view
    pub tvl: Option<Amount>,
    pub recent_escrows: Vec<Escrow>,
}

#[derive(Clone)]
pub struct DashboardService {
    escrows: EscrowService,
}

impl DashboardService {
    pub fn new(escrows: EscrowService) -> Self {
        Self { escrows }
    }

    /// Counts by state group, locked value and latest escrows for one address
    #[instrument(skip(self))]
    pub async fn user_dashboard(&self, user: &str) -> Result<DashboardStats> {
        let user = user.trim().to_lowercase();
        if user.is_empty() {
            return Err(ZenlandError::Validation(
                "user dashboard needs a non-empty address".to_string(),
            ));
        }

        let (active_count, dispute_count, completed_count, tvl, recent_escrows) = tokio::try_join!(
            self.count(Some(user.as_str()), StateGroup::Active),
            self.count(Some(user.as_str()), StateGroup::InDispute),
            self.count(Some(user.as_str()), StateGroup::Completed),
            self.user_tvl(&user),
            self.recent(Some(user.as_str())),
        )?;

        Ok(DashboardStats {
            active_count,
            dispute_count,
            completed_count,
            tvl: Some(tvl),
            recent_escrows,
        })
    }

    /// Protocol-wide counts and latest escrows
    #[instrument(skip(self))]
    pub async fn global_dashboard(&self) -> Result<DashboardStats> {
        let (active_count, dispute_count, completed_count, recent_escrows) = tokio::try_join!(
            self.count(None, StateGroup::Active),
            self.count(None, StateGroup::InDispute),
            self.count(None, StateGroup::Completed),
            self.recent(None),
        )?;

        Ok(DashboardStats {
            active_count,
            dispute_count,
            completed_count,
            tvl: None,
            recent_escrows,
        })
    }

    fn base_args(user: Option<&str>) -> ListEscrowsArgs {
        ListEscrowsArgs {
            user: user.map(str::to_string),
            ..Default::default()
        }
    }

    async fn count(&self, user: Option<&str>, group: StateGroup) -> Result<u64> {
        let args = ListEscrowsArgs {
            limit: Some(1),
            ..Self::base_args(user)
        };
        let page = self.escrows.get_by_state_group(group, args).await?;
        Ok(page.total_count)
    }

    async fn user_tvl(&self, user: &str) -> Result<Amount> {
        let args = ListEscrowsArgs {
            limit: Some(TVL_ESCROW_PAGE_SIZE),
            states: StateGroup::tvl_states(),
            ..Self::base_args(Some(user))
        };
        let page = self.escrows.list(args).await?;
        if tvl_truncated(page.items.len(), page.total_count) {
            warn!(
                user,
                fetched = page.items.len(),
                total = page.total_count,
                "locked escrows exceed the {} page bound; user TVL is understated",
                TVL_ESCROW_PAGE_SIZE
            );
        }
        Ok(page.items.iter().map(|e| &e.amount).sum())
    }

    async fn recent(&self, user: Option<&str>) -> Result<Vec<Escrow>> {
        let args = ListEscrowsArgs {
            limit: Some(DEFAULT_RECENT_LIMIT),
            ..Self::base_args(user)
        };
        Ok(self.escrows.list(args).await?.items)
    }
}

/// Whether the TVL page stopped short of every locked escrow
fn tvl_truncated(fetched: usize, total_count: u64) -> bool {
    fetched >= TVL_ESCROW_PAGE_SIZE as usize || total_count > fetched as u64
}
