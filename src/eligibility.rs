//! Agent eligibility for escrow assignment
//!
//! An agent's maximum assignable value (MAV) is its stablecoin stake times a
//! fixed multiplier, in the same smallest units as the stake. An agent may
//! take an escrow when it is registered, active, available and its MAV covers
//! the escrow principal.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::EligibilityPolicy;
use crate::domain::{Agent, Amount};

/// Why an agent cannot take an escrow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IneligibleReason {
    NotRegistered,
    NotActive,
    NotAvailable,
    InsufficientMav,
}

impl IneligibleReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            IneligibleReason::NotRegistered => "NOT_REGISTERED",
            IneligibleReason::NotActive => "NOT_ACTIVE",
            IneligibleReason::NotAvailable => "NOT_AVAILABLE",
            IneligibleReason::InsufficientMav => "INSUFFICIENT_MAV",
        }
    }
}

impl fmt::Display for IneligibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of [`evaluate`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Eligibility {
    Eligible {
        agent_value: Amount,
        required_value: Amount,
    },
    Ineligible {
        reason: IneligibleReason,
        required_value: Amount,
        /// Only reported once the capacity check was reached
        #[serde(skip_serializing_if = "Option::is_none")]
        agent_value: Option<Amount>,
    },
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible { .. })
    }

    pub fn reason(&self) -> Option<IneligibleReason> {
        match self {
            Eligibility::Eligible { .. } => None,
            Eligibility::Ineligible { reason, .. } => Some(*reason),
        }
    }

    pub fn required_value(&self) -> &Amount {
        match self {
            Eligibility::Eligible { required_value, .. }
            | Eligibility::Ineligible { required_value, .. } => required_value,
        }
    }

    pub fn agent_value(&self) -> Option<&Amount> {
        match self {
            Eligibility::Eligible { agent_value, .. } => Some(agent_value),
            Eligibility::Ineligible { agent_value, .. } => agent_value.as_ref(),
        }
    }

    fn ineligible(reason: IneligibleReason, required_value: Amount) -> Self {
        Eligibility::Ineligible {
            reason,
            required_value,
            agent_value: None,
        }
    }
}

/// Stake x multiplier. Decimals are ignored; the result is in stake units.
pub fn compute_agent_mav(stake: &Amount, policy: &EligibilityPolicy) -> Amount {
    stake * policy.mav_multiplier
}

/// Evaluate whether `agent` may be assigned an escrow of `escrow_principal`.
///
/// `escrow_principal` must exclude protocol fees; this is not checked.
/// Checks run in a fixed order (registered, active, available, capacity) and
/// the first failure wins.
pub fn evaluate(agent: Option<&Agent>, escrow_principal: &Amount) -> Eligibility {
    evaluate_with_policy(agent, escrow_principal, &EligibilityPolicy::default())
}

pub fn evaluate_with_policy(
    agent: Option<&Agent>,
    escrow_principal: &Amount,
    policy: &EligibilityPolicy,
) -> Eligibility {
    let required_value = escrow_principal.clone();

    let Some(agent) = agent else {
        return Eligibility::ineligible(IneligibleReason::NotRegistered, required_value);
    };

    if !agent.is_active {
        return Eligibility::ineligible(IneligibleReason::NotActive, required_value);
    }

    if !agent.is_available {
        return Eligibility::ineligible(IneligibleReason::NotAvailable, required_value);
    }

    let agent_value = compute_agent_mav(&agent.stablecoin_stake, policy);

    if agent_value < required_value {
        return Eligibility::Ineligible {
            reason: IneligibleReason::InsufficientMav,
            required_value,
            agent_value: Some(agent_value),
        };
    }

    Eligibility::Eligible {
        agent_value,
        required_value,
    }
}
