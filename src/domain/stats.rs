//! Protocol-wide statistics.
//!
//! The indexer's own `currentTVL` only tracks value held by escrow contracts.
//! The staking component is recomputed here from the active agent set, and
//! the reported total is the sum of both.

use serde::{Deserialize, Serialize};

use super::amount::{deserialize_opt_u64_scalar, deserialize_u64_scalar, Amount};

/// Stats record exactly as the indexer returns it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProtocolStats {
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_opt_u64_scalar")]
    pub chain_id: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_u64_scalar")]
    pub total_escrows_created: u64,
    #[serde(default)]
    pub total_volume_escrowed: Amount,
    #[serde(default)]
    pub total_fees_collected: Amount,
    /// Value held by escrow contracts only
    #[serde(rename = "currentTVL")]
    pub current_tvl: Amount,
    #[serde(default, deserialize_with = "deserialize_u64_scalar")]
    pub active_escrow_count: u64,
    #[serde(default, deserialize_with = "deserialize_u64_scalar")]
    pub total_agents_registered: u64,
    #[serde(default, deserialize_with = "deserialize_u64_scalar")]
    pub active_agents_count: u64,
}

/// The one agent field needed for the staking sum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentStake {
    pub stablecoin_stake: Amount,
}

/// Normalized stats with the TVL split into its two sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolStats {
    pub id: String,
    pub chain_id: Option<u64>,
    pub total_escrows_created: u64,
    pub total_volume_escrowed: Amount,
    pub total_fees_collected: Amount,
    /// escrow_tvl + agent_staking_tvl
    #[serde(rename = "currentTVL")]
    pub current_tvl: Amount,
    #[serde(rename = "escrowTVL")]
    pub escrow_tvl: Amount,
    #[serde(rename = "agentStakingTVL")]
    pub agent_staking_tvl: Amount,
    pub active_escrow_count: u64,
    pub total_agents_registered: u64,
    pub active_agents_count: u64,
}

impl ProtocolStats {
    /// Compose normalized stats from the raw record and the active agent stakes.
    ///
    /// The raw record's `currentTVL` is taken as the escrow-held value only.
    pub fn aggregate<'a, I>(raw: RawProtocolStats, active_agent_stakes: I) -> Self
    where
        I: IntoIterator<Item = &'a Amount>,
    {
        let escrow_tvl = raw.current_tvl;
        let agent_staking_tvl: Amount = active_agent_stakes.into_iter().sum();
        let current_tvl = escrow_tvl.clone() + &agent_staking_tvl;

        Self {
            id: raw.id,
            chain_id: raw.chain_id,
            total_escrows_created: raw.total_escrows_created,
            total_volume_escrowed: raw.total_volume_escrowed,
            total_fees_collected: raw.total_fees_collected,
            current_tvl,
            escrow_tvl,
            agent_staking_tvl,
            active_escrow_count: raw.active_escrow_count,
            total_agents_registered: raw.total_agents_registered,
            active_agents_count: raw.active_agents_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(current_tvl: u64) -> RawProtocolStats {
        RawProtocolStats {
            id: "mainnet".into(),
            chain_id: Some(1),
            total_escrows_created: 12,
            current_tvl: Amount::from(current_tvl),
            ..Default::default()
        }
    }

    #[test]
    fn total_is_escrow_plus_staking() {
        let stakes = [Amount::from(100), Amount::from(200)];
        let stats = ProtocolStats::aggregate(raw(1000), &stakes);

        assert_eq!(stats.escrow_tvl, Amount::from(1000));
        assert_eq!(stats.agent_staking_tvl, Amount::from(300));
        assert_eq!(stats.current_tvl, Amount::from(1300));
        assert_eq!(stats.total_escrows_created, 12);
    }

    #[test]
    fn no_active_agents_leaves_escrow_value_unchanged() {
        let none: [Amount; 0] = [];
        let stats = ProtocolStats::aggregate(raw(1000), &none);
        assert!(stats.agent_staking_tvl.is_zero());
        assert_eq!(stats.current_tvl, Amount::from(1000));
    }

    #[test]
    fn raw_record_decodes_tvl_field_name() {
        let raw: RawProtocolStats = serde_json::from_value(json!({
            "id": "sepolia",
            "chainId": 11155111,
            "totalEscrowsCreated": 3,
            "totalVolumeEscrowed": "900",
            "totalFeesCollected": "9",
            "currentTVL": "450",
            "activeEscrowCount": 2,
            "totalAgentsRegistered": 5,
            "activeAgentsCount": 4
        }))
        .unwrap();
        assert_eq!(raw.current_tvl, Amount::from(450));
        assert_eq!(raw.chain_id, Some(11_155_111));
    }

    #[test]
    fn counters_accept_string_scalars() {
        let raw: RawProtocolStats = serde_json::from_value(json!({
            "id": "mainnet",
            "chainId": "1",
            "totalEscrowsCreated": "12",
            "currentTVL": "1000",
            "activeEscrowCount": "4",
            "totalAgentsRegistered": 3,
            "activeAgentsCount": "2"
        }))
        .unwrap();
        assert_eq!(raw.chain_id, Some(1));
        assert_eq!(raw.total_escrows_created, 12);
        assert_eq!(raw.active_escrow_count, 4);
        assert_eq!(raw.total_agents_registered, 3);
        assert_eq!(raw.active_agents_count, 2);
    }
}
