//! Agent queries

use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::config::EligibilityPolicy;
use crate::domain::{Agent, AgentPage, Amount};
use crate::eligibility::{evaluate_with_policy, Eligibility};
use crate::error::Result;
use crate::filter::{agent_list_variables, ListAgentsArgs};
use crate::queries::{AGENTS_QUERY, AGENT_QUERY};
use crate::transport::{request, GraphQlExecutor};

#[derive(Deserialize)]
struct AgentsResponse {
    agents: AgentPage,
}

#[derive(Deserialize)]
struct AgentResponse {
    agent: Option<Agent>,
}

#[derive(Clone)]
pub struct AgentService {
    executor: Arc<dyn GraphQlExecutor>,
    policy: EligibilityPolicy,
}

impl AgentService {
    pub fn new(executor: Arc<dyn GraphQlExecutor>) -> Self {
        Self::with_policy(executor, EligibilityPolicy::default())
    }

    pub fn with_policy(executor: Arc<dyn GraphQlExecutor>, policy: EligibilityPolicy) -> Self {
        Self { executor, policy }
    }

    pub fn policy(&self) -> &EligibilityPolicy {
        &self.policy
    }

    /// List agents with filtering and pagination
    #[instrument(skip(self))]
    pub async fn list(&self, args: ListAgentsArgs) -> Result<AgentPage> {
        let variables = agent_list_variables(&args);
        let response: AgentsResponse =
            request(self.executor.as_ref(), AGENTS_QUERY, &variables).await?;
        debug!(
            "fetched {} of {} agents",
            response.agents.items.len(),
            response.agents.total_count
        );
        Ok(response.agents)
    }

    /// Look up one agent by address, including its five most recent cases
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Agent>> {
        let variables = json!({ "id": id.trim().to_lowercase() });
        let response: AgentResponse =
            request(self.executor.as_ref(), AGENT_QUERY, &variables).await?;
        Ok(response.agent)
    }

    /// Agents that are both active and available
    pub async fn get_available(&self, args: ListAgentsArgs) -> Result<AgentPage> {
        self.list(ListAgentsArgs {
            only_active: true,
            only_available: true,
            ..args
        })
        .await
    }

    /// Fetch `id` and evaluate it against an escrow principal (fees excluded).
    /// An unknown address evaluates as not registered.
    #[instrument(skip(self))]
    pub async fn check_eligibility(&self, id: &str, principal: &Amount) -> Result<Eligibility> {
        let agent = self.get_by_id(id).await?;
        let outcome = evaluate_with_policy(agent.as_ref(), principal, &self.policy);
        debug!(eligible = outcome.is_eligible(), "eligibility evaluated");
        Ok(outcome)
    }
}
