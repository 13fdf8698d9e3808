//! Read-only client for the Zenland escrow protocol indexer.
//!
//! Escrows, agents, protocol statistics and transaction logs are fetched over
//! GraphQL; agent eligibility and staking-inclusive TVL are computed locally.

pub mod cli;
pub mod client;
pub mod config;
pub mod domain;
pub mod eligibility;
pub mod error;
pub mod filter;
pub mod queries;
pub mod services;
pub mod transport;

pub use client::ZenlandClient;
pub use config::{ClientConfig, EligibilityPolicy};
pub use domain::{
    Agent, AgentPage, Amount, Escrow, EscrowPage, EscrowState, ProtocolStats, RawProtocolStats,
    StateGroup, TransactionLog,
};
pub use eligibility::{compute_agent_mav, evaluate, Eligibility, IneligibleReason};
pub use error::{Result, ZenlandError};
pub use filter::{ListAgentsArgs, ListEscrowsArgs, ListTransactionLogsArgs, OrderDirection};
pub use services::{
    AgentService, DashboardService, DashboardStats, EscrowService, ProtocolStatsService,
    TransactionLogService,
};
pub use transport::{GraphQlExecutor, HttpGraphQlClient};
