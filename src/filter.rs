//! Translates list arguments into indexer `where` predicates and query variables.
//!
//! An empty predicate is never sent: "no filter" is expressed by omitting the
//! `where` variable entirely, so the indexer can tell "list everything" apart
//! from a predicate that matches nothing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::{DEFAULT_LOG_PAGE_SIZE, DEFAULT_PAGE_SIZE};
use crate::domain::{EscrowState, StateGroup};
use crate::error::{Result, ZenlandError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderDirection {
    type Err = &'static str;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err("invalid order direction; expected asc|desc"),
        }
    }
}

/// Variables shared by every paginated list query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListVariables<F> {
    pub limit: u32,
    pub offset: u32,
    pub order_by: String,
    pub order_direction: OrderDirection,
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub filter: Option<F>,
}

fn lower_nonempty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_lowercase)
}

// ==================== Escrows ====================

/// Blank states (e.g. an unset form field) constrain nothing
fn state_value(state: &EscrowState) -> Option<String> {
    let raw = state.as_str().trim();
    (!raw.is_empty()).then(|| raw.to_string())
}

/// Structured escrow predicate (`escrowFilter` input type)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EscrowFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_in: Option<Vec<String>>,
    #[serde(rename = "OR", skip_serializing_if = "Option::is_none")]
    pub or: Option<Vec<EscrowFilter>>,
}

impl EscrowFilter {
    pub fn is_empty(&self) -> bool {
        self == &EscrowFilter::default()
    }

    fn role(buyer: Option<String>, seller: Option<String>, agent: Option<String>) -> Self {
        Self {
            buyer,
            seller,
            agent,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListEscrowsArgs {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub buyer: Option<String>,
    pub seller: Option<String>,
    pub agent: Option<String>,
    /// Match the address in any role (buyer OR seller OR agent).
    /// Cannot be combined with `buyer`, `seller` or `agent`.
    pub user: Option<String>,
    pub state: Option<EscrowState>,
    /// Takes precedence over `state` when non-empty
    pub states: Vec<EscrowState>,
    pub order_by: Option<String>,
    pub order_direction: Option<OrderDirection>,
}

impl ListEscrowsArgs {
    /// Replace any state filter with the members of `group`
    pub fn with_state_group(mut self, group: StateGroup) -> Self {
        self.state = None;
        self.states = group.states().to_vec();
        self
    }

    /// Replace any role filter with an any-role match on `user`
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.buyer = None;
        self.seller = None;
        self.agent = None;
        self.user = Some(user.into());
        self
    }
}

/// Build the escrow predicate, or `None` when nothing constrains the listing.
pub fn build_escrow_filter(args: &ListEscrowsArgs) -> Result<Option<EscrowFilter>> {
    let mut filter = EscrowFilter::role(
        lower_nonempty(args.buyer.as_deref()),
        lower_nonempty(args.seller.as_deref()),
        lower_nonempty(args.agent.as_deref()),
    );

    let states: Vec<String> = args.states.iter().filter_map(state_value).collect();
    if !states.is_empty() {
        filter.state_in = Some(states);
    } else {
        filter.state = args.state.as_ref().and_then(state_value);
    }

    if let Some(user) = lower_nonempty(args.user.as_deref()) {
        if filter.buyer.is_some() || filter.seller.is_some() || filter.agent.is_some() {
            return Err(ZenlandError::Validation(
                "`user` matches any role and cannot be combined with buyer/seller/agent filters"
                    .to_string(),
            ));
        }
        filter.or = Some(vec![
            EscrowFilter::role(Some(user.clone()), None, None),
            EscrowFilter::role(None, Some(user.clone()), None),
            EscrowFilter::role(None, None, Some(user)),
        ]);
    }

    Ok((!filter.is_empty()).then_some(filter))
}

pub fn escrow_list_variables(args: &ListEscrowsArgs) -> Result<ListVariables<EscrowFilter>> {
    Ok(ListVariables {
        limit: args.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        offset: args.offset.unwrap_or(0),
        order_by: args
            .order_by
            .clone()
            .unwrap_or_else(|| "createdAt".to_string()),
        order_direction: args.order_direction.unwrap_or(OrderDirection::Desc),
        filter: build_escrow_filter(args)?,
    })
}

// ==================== Agents ====================

/// Structured agent predicate (`agentFilter` input type)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

impl AgentFilter {
    pub fn is_empty(&self) -> bool {
        self == &AgentFilter::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListAgentsArgs {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub only_active: bool,
    pub only_available: bool,
    pub order_by: Option<String>,
    pub order_direction: Option<OrderDirection>,
}

/// `false` flags are left out, never sent as `isActive: false`
pub fn build_agent_filter(args: &ListAgentsArgs) -> Option<AgentFilter> {
    let filter = AgentFilter {
        is_active: args.only_active.then_some(true),
        is_available: args.only_available.then_some(true),
    };
    (!filter.is_empty()).then_some(filter)
}

pub fn agent_list_variables(args: &ListAgentsArgs) -> ListVariables<AgentFilter> {
    ListVariables {
        limit: args.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        offset: args.offset.unwrap_or(0),
        order_by: args
            .order_by
            .clone()
            .unwrap_or_else(|| "totalResolved".to_string()),
        order_direction: args.order_direction.unwrap_or(OrderDirection::Desc),
        filter: build_agent_filter(args),
    }
}

// ==================== Transaction logs ====================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTransactionLogsArgs {
    pub escrow_address: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub order_by: Option<String>,
    pub order_direction: Option<OrderDirection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionLogVariables {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escrow_address: Option<String>,
    pub limit: u32,
    pub offset: u32,
    pub order_by: String,
    pub order_direction: OrderDirection,
}

pub fn transaction_log_variables(args: &ListTransactionLogsArgs) -> TransactionLogVariables {
    TransactionLogVariables {
        escrow_address: lower_nonempty(args.escrow_address.as_deref()),
        limit: args.limit.unwrap_or(DEFAULT_LOG_PAGE_SIZE),
        offset: args.offset.unwrap_or(0),
        order_by: args
            .order_by
            .clone()
            .unwrap_or_else(|| "timestamp".to_string()),
        order_direction: args.order_direction.unwrap_or(OrderDirection::Asc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_arguments_means_no_filter() {
        let vars = escrow_list_variables(&ListEscrowsArgs::default()).unwrap();
        assert_eq!(
            serde_json::to_value(&vars).unwrap(),
            json!({"limit": 30, "offset": 0, "orderBy": "createdAt", "orderDirection": "desc"})
        );
    }

    #[test]
    fn role_addresses_are_lowercased() {
        let args = ListEscrowsArgs {
            buyer: Some("0xABCdef".into()),
            agent: Some("0xAGENT".into()),
            ..Default::default()
        };
        let filter = build_escrow_filter(&args).unwrap().unwrap();
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({"buyer": "0xabcdef", "agent": "0xagent"})
        );
    }

    #[test]
    fn uppercase_and_lowercase_addresses_build_the_same_filter() {
        let upper = ListEscrowsArgs::default().with_user("0xDEADBEEF");
        let lower = ListEscrowsArgs::default().with_user("0xdeadbeef");
        assert_eq!(
            build_escrow_filter(&upper).unwrap(),
            build_escrow_filter(&lower).unwrap()
        );
    }

    #[test]
    fn state_list_wins_over_single_state() {
        let args = ListEscrowsArgs {
            state: Some(EscrowState::Released),
            states: vec![EscrowState::Pending, EscrowState::Active],
            ..Default::default()
        };
        let filter = build_escrow_filter(&args).unwrap().unwrap();
        assert_eq!(filter.state, None);
        assert_eq!(
            filter.state_in,
            Some(vec!["PENDING".to_string(), "ACTIVE".to_string()])
        );
    }

    #[test]
    fn single_state_used_when_list_empty() {
        let args = ListEscrowsArgs {
            state: Some(EscrowState::Split),
            ..Default::default()
        };
        let filter = build_escrow_filter(&args).unwrap().unwrap();
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({"state": "SPLIT"})
        );
    }

    #[test]
    fn state_group_expands_to_member_list() {
        let args = ListEscrowsArgs {
            state: Some(EscrowState::Pending),
            ..Default::default()
        }
        .with_state_group(StateGroup::Completed);
        let filter = build_escrow_filter(&args).unwrap().unwrap();
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({"state_in": ["RELEASED", "AGENT_RESOLVED", "REFUNDED", "SPLIT"]})
        );
    }

    #[test]
    fn user_expands_to_or_across_roles() {
        let args = ListEscrowsArgs::default()
            .with_user("0xUSER")
            .with_state_group(StateGroup::InDispute);
        let filter = build_escrow_filter(&args).unwrap().unwrap();
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({
                "state_in": ["DISPUTED", "AGENT_INVITED"],
                "OR": [{"buyer": "0xuser"}, {"seller": "0xuser"}, {"agent": "0xuser"}]
            })
        );
    }

    #[test]
    fn user_combined_with_role_filter_is_rejected() {
        let args = ListEscrowsArgs {
            seller: Some("0xs".into()),
            user: Some("0xu".into()),
            ..Default::default()
        };
        let err = build_escrow_filter(&args).unwrap_err();
        assert!(matches!(err, ZenlandError::Validation(_)));
    }

    #[test]
    fn blank_addresses_are_ignored() {
        let args = ListEscrowsArgs {
            buyer: Some("   ".into()),
            user: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(build_escrow_filter(&args).unwrap(), None);
    }

    #[test]
    fn blank_states_are_ignored() {
        let single = ListEscrowsArgs {
            state: Some(EscrowState::from("")),
            ..Default::default()
        };
        assert_eq!(build_escrow_filter(&single).unwrap(), None);

        let list = ListEscrowsArgs {
            states: vec![EscrowState::from(""), EscrowState::from("  ")],
            ..Default::default()
        };
        assert_eq!(build_escrow_filter(&list).unwrap(), None);

        // an all-blank list falls back to the single state
        let fallback = ListEscrowsArgs {
            state: Some(EscrowState::Active),
            states: vec![EscrowState::from("")],
            ..Default::default()
        };
        let filter = build_escrow_filter(&fallback).unwrap().unwrap();
        assert_eq!(filter.state.as_deref(), Some("ACTIVE"));
        assert_eq!(filter.state_in, None);

        let mixed = ListEscrowsArgs {
            states: vec![EscrowState::from(""), EscrowState::Split],
            ..Default::default()
        };
        let filter = build_escrow_filter(&mixed).unwrap().unwrap();
        assert_eq!(filter.state_in, Some(vec!["SPLIT".to_string()]));
    }

    #[test]
    fn agent_flags_only_emit_true() {
        assert_eq!(build_agent_filter(&ListAgentsArgs::default()), None);

        let vars = agent_list_variables(&ListAgentsArgs {
            only_available: true,
            limit: Some(5),
            ..Default::default()
        });
        assert_eq!(
            serde_json::to_value(&vars).unwrap(),
            json!({
                "limit": 5,
                "offset": 0,
                "orderBy": "totalResolved",
                "orderDirection": "desc",
                "where": {"isAvailable": true}
            })
        );
    }

    #[test]
    fn log_variables_default_to_ascending_timestamp() {
        let vars = transaction_log_variables(&ListTransactionLogsArgs {
            escrow_address: Some("0xESCROW".into()),
            ..Default::default()
        });
        assert_eq!(
            serde_json::to_value(&vars).unwrap(),
            json!({
                "escrowAddress": "0xescrow",
                "limit": 100,
                "offset": 0,
                "orderBy": "timestamp",
                "orderDirection": "asc"
            })
        );
    }

    #[test]
    fn order_direction_parsing() {
        assert_eq!("DESC".parse::<OrderDirection>(), Ok(OrderDirection::Desc));
        assert!("sideways".parse::<OrderDirection>().is_err());
    }
}
