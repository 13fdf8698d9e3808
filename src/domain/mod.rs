pub mod agent;
pub mod amount;
pub mod escrow;
pub mod log;
pub mod page;
pub mod stats;

pub use agent::*;
pub use amount::Amount;
pub use escrow::*;
pub use log::*;
pub use page::*;
pub use stats::*;
