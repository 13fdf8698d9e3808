use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::amount::{deserialize_opt_u64_scalar, deserialize_u64_scalar, Amount};
use super::page::PageInfo;

/// Escrow lifecycle state as reported by the indexer.
///
/// States are owned by the on-chain contract; unknown strings are preserved
/// in `Other` and simply match no [`StateGroup`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EscrowState {
    Pending,
    Active,
    Fulfilled,
    Disputed,
    AgentInvited,
    Released,
    AgentResolved,
    Refunded,
    Split,
    Other(String),
}

impl EscrowState {
    pub fn as_str(&self) -> &str {
        match self {
            EscrowState::Pending => "PENDING",
            EscrowState::Active => "ACTIVE",
            EscrowState::Fulfilled => "FULFILLED",
            EscrowState::Disputed => "DISPUTED",
            EscrowState::AgentInvited => "AGENT_INVITED",
            EscrowState::Released => "RELEASED",
            EscrowState::AgentResolved => "AGENT_RESOLVED",
            EscrowState::Refunded => "REFUNDED",
            EscrowState::Split => "SPLIT",
            EscrowState::Other(s) => s,
        }
    }

    /// The group this state belongs to, if any
    pub fn group(&self) -> Option<StateGroup> {
        StateGroup::ALL
            .into_iter()
            .find(|group| group.states().contains(self))
    }

    /// Funds for this state are still held by the escrow contract
    pub fn counts_toward_tvl(&self) -> bool {
        matches!(
            self.group(),
            Some(StateGroup::Active) | Some(StateGroup::InDispute)
        )
    }

    pub fn is_terminal(&self) -> bool {
        self.group() == Some(StateGroup::Completed)
    }
}

impl From<String> for EscrowState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "PENDING" => EscrowState::Pending,
            "ACTIVE" => EscrowState::Active,
            "FULFILLED" => EscrowState::Fulfilled,
            "DISPUTED" => EscrowState::Disputed,
            "AGENT_INVITED" => EscrowState::AgentInvited,
            "RELEASED" => EscrowState::Released,
            "AGENT_RESOLVED" => EscrowState::AgentResolved,
            "REFUNDED" => EscrowState::Refunded,
            "SPLIT" => EscrowState::Split,
            _ => EscrowState::Other(s),
        }
    }
}

impl From<&str> for EscrowState {
    fn from(s: &str) -> Self {
        EscrowState::from(s.to_string())
    }
}

/// Lenient parse for user input: case-insensitive, `-` accepted for `_`.
/// Unrecognized input is kept as `Other` with the normalized spelling.
impl FromStr for EscrowState {
    type Err = std::convert::Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(EscrowState::from(
            raw.trim().to_ascii_uppercase().replace('-', "_"),
        ))
    }
}

impl From<EscrowState> for String {
    fn from(state: EscrowState) -> Self {
        match state {
            EscrowState::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EscrowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

const ACTIVE_STATES: &[EscrowState] = &[
    EscrowState::Pending,
    EscrowState::Active,
    EscrowState::Fulfilled,
];

const IN_DISPUTE_STATES: &[EscrowState] = &[EscrowState::Disputed, EscrowState::AgentInvited];

const COMPLETED_STATES: &[EscrowState] = &[
    EscrowState::Released,
    EscrowState::AgentResolved,
    EscrowState::Refunded,
    EscrowState::Split,
];

/// Coarse partition of escrow states used for filtering and dashboards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StateGroup {
    Active,
    InDispute,
    Completed,
}

impl StateGroup {
    pub const ALL: [StateGroup; 3] = [
        StateGroup::Active,
        StateGroup::InDispute,
        StateGroup::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StateGroup::Active => "ACTIVE",
            StateGroup::InDispute => "IN_DISPUTE",
            StateGroup::Completed => "COMPLETED",
        }
    }

    /// Fixed member list of the group
    pub fn states(&self) -> &'static [EscrowState] {
        match self {
            StateGroup::Active => ACTIVE_STATES,
            StateGroup::InDispute => IN_DISPUTE_STATES,
            StateGroup::Completed => COMPLETED_STATES,
        }
    }

    pub fn contains(&self, state: &EscrowState) -> bool {
        self.states().contains(state)
    }

    /// States whose principal is still locked: ACTIVE ∪ IN_DISPUTE
    pub fn tvl_states() -> Vec<EscrowState> {
        ACTIVE_STATES
            .iter()
            .chain(IN_DISPUTE_STATES)
            .cloned()
            .collect()
    }
}

impl fmt::Display for StateGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StateGroup {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "ACTIVE" => Ok(StateGroup::Active),
            "IN_DISPUTE" => Ok(StateGroup::InDispute),
            "COMPLETED" => Ok(StateGroup::Completed),
            _ => Err(format!(
                "unknown state group '{raw}'; expected ACTIVE|IN_DISPUTE|COMPLETED"
            )),
        }
    }
}

/// An escrow contract snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Escrow {
    /// Escrow contract address, lower-case
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_opt_u64_scalar")]
    pub chain_id: Option<u64>,
    pub buyer: String,
    pub seller: String,
    #[serde(default)]
    pub agent: Option<String>,
    /// Principal, fees excluded
    pub amount: Amount,
    pub token: String,
    pub state: EscrowState,
    #[serde(deserialize_with = "deserialize_u64_scalar")]
    pub created_at: u64,
    #[serde(default, deserialize_with = "deserialize_opt_u64_scalar")]
    pub seller_accept_deadline: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_opt_u64_scalar")]
    pub buyer_protection_time: Option<u64>,
    #[serde(default)]
    pub terms_hash: Option<String>,
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_opt_u64_scalar")]
    pub funded_at: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_opt_u64_scalar")]
    pub fulfilled_at: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_opt_u64_scalar")]
    pub resolved_at: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_opt_u64_scalar")]
    pub agent_invited_at: Option<u64>,
    #[serde(default)]
    pub split_proposer: Option<String>,
    #[serde(default)]
    pub proposed_buyer_bps: Option<u32>,
    #[serde(default)]
    pub proposed_seller_bps: Option<u32>,
    #[serde(default)]
    pub buyer_approved_split: Option<bool>,
    #[serde(default)]
    pub seller_approved_split: Option<bool>,
    #[serde(default)]
    pub agent_fee_received: Option<Amount>,
    #[serde(default)]
    pub buyer_received: Option<Amount>,
    #[serde(default)]
    pub seller_received: Option<Amount>,
    #[serde(default)]
    pub creation_fee: Option<Amount>,
}

impl Escrow {
    /// Whether `address` is buyer, seller or agent (case-insensitive)
    pub fn involves(&self, address: &str) -> bool {
        let addr = address.to_lowercase();
        self.buyer.eq_ignore_ascii_case(&addr)
            || self.seller.eq_ignore_ascii_case(&addr)
            || self
                .agent
                .as_deref()
                .map(|a| a.eq_ignore_ascii_case(&addr))
                .unwrap_or(false)
    }

    pub fn counts_toward_tvl(&self) -> bool {
        self.state.counts_toward_tvl()
    }

    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(i64::try_from(self.created_at).ok()?, 0)
    }

    /// A split has been proposed and both parties signed off
    pub fn split_agreed(&self) -> bool {
        self.split_proposer.is_some()
            && self.buyer_approved_split == Some(true)
            && self.seller_approved_split == Some(true)
    }
}

/// Escrow fields embedded in an agent case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowSummary {
    pub id: String,
    pub amount: Amount,
    pub token: String,
    pub state: EscrowState,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscrowPage {
    #[serde(default)]
    pub items: Vec<Escrow>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub page_info: PageInfo,
}
