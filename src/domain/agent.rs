use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::amount::{deserialize_opt_u64_scalar, deserialize_u64_scalar, Amount};
use super::escrow::EscrowSummary;
use super::page::PageInfo;

/// A registered dispute-resolution agent as seen by the indexer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// Agent address, lower-case
    pub id: String,
    pub is_active: bool,
    pub is_available: bool,
    /// Decimal places of the stake token. Display only.
    #[serde(default)]
    pub stablecoin_decimals: u32,
    #[serde(default)]
    pub stablecoin_token: Option<String>,
    /// Collateral in the stake token's smallest unit
    pub stablecoin_stake: Amount,
    #[serde(default)]
    pub dao_token_stake: Amount,
    #[serde(default)]
    pub dispute_fee_bps: u32,
    #[serde(default)]
    pub assignment_fee_bps: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub total_resolved: u32,
    #[serde(default)]
    pub active_cases: u32,
    #[serde(default)]
    pub total_escrows_assigned: u32,
    #[serde(default, deserialize_with = "deserialize_u64_scalar")]
    pub registration_time: u64,
    #[serde(default, deserialize_with = "deserialize_opt_u64_scalar")]
    pub last_engagement_timestamp: Option<u64>,
    #[serde(default)]
    pub total_earnings: Amount,
    #[serde(default)]
    pub total_slashed: Amount,
    #[serde(default)]
    pub cases: Option<AgentCasePage>,
}

impl Agent {
    /// Active and accepting new cases
    pub fn is_assignable(&self) -> bool {
        self.is_active && self.is_available
    }

    pub fn registered_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(i64::try_from(self.registration_time).ok()?, 0)
    }

    /// Stake rendered in whole stablecoin units
    pub fn stake_display(&self) -> String {
        self.stablecoin_stake.format_units(self.stablecoin_decimals)
    }
}

/// One dispute an agent was invited into
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCase {
    pub id: String,
    pub escrow: String,
    #[serde(default)]
    pub agent: Option<String>,
    #[serde(deserialize_with = "deserialize_u64_scalar")]
    pub invited_at: u64,
    #[serde(default, deserialize_with = "deserialize_opt_u64_scalar")]
    pub resolved_at: Option<u64>,
    #[serde(default)]
    pub timed_out: bool,
    #[serde(default)]
    pub fee_earned: Option<Amount>,
    #[serde(default)]
    pub escrow_ref: Option<EscrowSummary>,
}

impl AgentCase {
    pub fn is_open(&self) -> bool {
        self.resolved_at.is_none() && !self.timed_out
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCasePage {
    #[serde(default)]
    pub items: Vec<AgentCase>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub page_info: PageInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentPage {
    #[serde(default)]
    pub items: Vec<Agent>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub page_info: PageInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_indexer_agent() {
        let agent: Agent = serde_json::from_value(json!({
            "id": "0xabc",
            "isActive": true,
            "isAvailable": false,
            "stablecoinDecimals": 6,
            "stablecoinStake": "2500000",
            "daoTokenStake": 0,
            "totalResolved": 4,
            "activeCases": 1,
            "registrationTime": "1700000000",
            "lastEngagementTimestamp": null,
            "totalEarnings": "123",
            "totalSlashed": "0"
        }))
        .unwrap();

        assert_eq!(agent.stablecoin_stake, Amount::from(2_500_000));
        assert_eq!(agent.stake_display(), "2.5");
        assert!(!agent.is_assignable());
        assert_eq!(agent.registered_at().unwrap().timestamp(), 1_700_000_000);
        assert!(agent.cases.is_none());
    }

    #[test]
    fn open_case_detection() {
        let case: AgentCase = serde_json::from_value(json!({
            "id": "c1",
            "escrow": "0xe1",
            "invitedAt": "10",
            "resolvedAt": null,
            "timedOut": false
        }))
        .unwrap();
        assert!(case.is_open());
    }
}
