//! Query surfaces over the indexer: escrows, agents, protocol stats,
//! transaction logs and dashboard roll-ups.

pub mod agents;
pub mod dashboard;
pub mod escrows;
pub mod protocol_stats;
pub mod transaction_logs;

pub use agents::AgentService;
pub use dashboard::{DashboardService, DashboardStats};
pub use escrows::EscrowService;
pub use protocol_stats::ProtocolStatsService;
pub use transaction_logs::TransactionLogService;
