//! `zenland agents` - browse agents and check eligibility.

use clap::Subcommand;
use serde::Serialize;
use tabled::Tabled;

use crate::client::ZenlandClient;
use crate::domain::{Agent, AgentPage, Amount};
use crate::eligibility::Eligibility;
use crate::filter::ListAgentsArgs;

use super::output::{self, OutputMode};

#[derive(Subcommand, Debug, Clone)]
pub enum AgentsCommands {
    /// List agents.
    List {
        #[arg(long)]
        active: bool,
        #[arg(long)]
        available: bool,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Get an agent by address, with recent cases.
    Get { id: String },
    /// Agents that are active and available.
    Available {
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Check whether an agent can take an escrow of the given principal.
    Eligibility {
        id: String,
        /// Escrow principal in token base units, fees excluded.
        amount: Amount,
    },
}

#[derive(Debug, Serialize, Tabled)]
pub struct AgentRow {
    pub id: String,
    pub active: bool,
    pub available: bool,
    pub stake: String,
    pub resolved: u32,
    pub open_cases: u32,
    pub dispute_fee_bps: u32,
}

impl From<&Agent> for AgentRow {
    fn from(a: &Agent) -> Self {
        Self {
            id: a.id.clone(),
            active: a.is_active,
            available: a.is_available,
            stake: a.stake_display(),
            resolved: a.total_resolved,
            open_cases: a.active_cases,
            dispute_fee_bps: a.dispute_fee_bps,
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct EligibilityRow {
    pub agent: String,
    pub eligible: bool,
    pub reason: String,
    pub required: String,
    pub agent_mav: String,
}

impl EligibilityRow {
    fn new(agent: &str, outcome: &Eligibility) -> Self {
        Self {
            agent: agent.to_string(),
            eligible: outcome.is_eligible(),
            reason: outcome
                .reason()
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".to_string()),
            required: outcome.required_value().to_string(),
            agent_mav: outcome
                .agent_value()
                .map(ToString::to_string)
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

fn print_page(page: &AgentPage, mode: OutputMode) -> anyhow::Result<()> {
    let rows: Vec<AgentRow> = page.items.iter().map(AgentRow::from).collect();
    output::print_items(&rows, mode)?;
    output::print_page_footer(
        rows.len(),
        page.total_count,
        page.page_info.has_next_page,
        mode,
    );
    Ok(())
}

pub async fn run(cmd: AgentsCommands, client: &ZenlandClient, mode: OutputMode) -> anyhow::Result<()> {
    let agents = client.agents();

    match cmd {
        AgentsCommands::List {
            active,
            available,
            limit,
            offset,
        } => {
            let page = agents
                .list(ListAgentsArgs {
                    limit,
                    offset,
                    only_active: active,
                    only_available: available,
                    ..Default::default()
                })
                .await?;
            print_page(&page, mode)?;
        }
        AgentsCommands::Get { id } => match agents.get_by_id(&id).await? {
            Some(agent) => output::print_item(&agent, mode)?,
            None => output::print_not_found("agent", &id),
        },
        AgentsCommands::Available { limit, offset } => {
            let page = agents
                .get_available(ListAgentsArgs {
                    limit,
                    offset,
                    ..Default::default()
                })
                .await?;
            print_page(&page, mode)?;
        }
        AgentsCommands::Eligibility { id, amount } => {
            let outcome = agents.check_eligibility(&id, &amount).await?;
            match mode {
                OutputMode::Json => output::print_item(&outcome, mode)?,
                OutputMode::Table => {
                    output::print_items(&[EligibilityRow::new(&id, &outcome)], mode)?
                }
            }
        }
    }
    Ok(())
}
