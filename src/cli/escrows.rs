//! `zenland escrows` - list and inspect escrows.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::client::ZenlandClient;
use crate::domain::{Escrow, EscrowPage, EscrowState, StateGroup};
use crate::filter::{ListEscrowsArgs, OrderDirection};

use super::output::{self, OutputMode};

#[derive(Subcommand, Debug, Clone)]
pub enum EscrowsCommands {
    /// List escrows with optional filters.
    List {
        #[arg(long)]
        buyer: Option<String>,
        #[arg(long)]
        seller: Option<String>,
        #[arg(long)]
        agent: Option<String>,
        /// Match escrows where this address is buyer, seller or agent.
        #[arg(long, conflicts_with_all = ["buyer", "seller", "agent"])]
        user: Option<String>,
        /// Exact state, e.g. active or AGENT_INVITED (case-insensitive).
        #[arg(long)]
        state: Option<EscrowState>,
        /// Any of these states (comma separated); wins over --state.
        #[arg(long, value_delimiter = ',')]
        states: Vec<EscrowState>,
        /// State group: active, in_dispute or completed.
        #[arg(long, conflicts_with_all = ["state", "states"])]
        group: Option<StateGroup>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Get an escrow by contract address.
    Get { id: String },
    /// Escrows a user participates in.
    User {
        address: String,
        #[arg(long)]
        group: Option<StateGroup>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Escrows in a state group.
    Group {
        group: StateGroup,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Most recently created escrows.
    Recent {
        #[arg(long)]
        limit: Option<u32>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
    #[arg(long)]
    pub limit: Option<u32>,
    #[arg(long)]
    pub offset: Option<u32>,
    #[arg(long)]
    pub order_by: Option<String>,
    /// asc or desc
    #[arg(long)]
    pub order_direction: Option<OrderDirection>,
}

impl PageArgs {
    fn into_list_args(self) -> ListEscrowsArgs {
        ListEscrowsArgs {
            limit: self.limit,
            offset: self.offset,
            order_by: self.order_by,
            order_direction: self.order_direction,
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct EscrowRow {
    pub id: String,
    pub state: String,
    pub amount: String,
    pub buyer: String,
    pub seller: String,
    pub agent: String,
    pub created: String,
}

impl From<&Escrow> for EscrowRow {
    fn from(e: &Escrow) -> Self {
        Self {
            id: e.id.clone(),
            state: e.state.to_string(),
            amount: e.amount.to_string(),
            buyer: output::short_address(&e.buyer),
            seller: output::short_address(&e.seller),
            agent: e
                .agent
                .as_deref()
                .map(output::short_address)
                .unwrap_or_else(|| "-".to_string()),
            created: output::format_timestamp(e.created_at),
        }
    }
}

fn page_rows(page: &EscrowPage) -> Vec<EscrowRow> {
    page.items.iter().map(EscrowRow::from).collect()
}

fn print_page(page: &EscrowPage, mode: OutputMode) -> anyhow::Result<()> {
    let rows = page_rows(page);
    output::print_items(&rows, mode)?;
    output::print_page_footer(
        rows.len(),
        page.total_count,
        page.page_info.has_next_page,
        mode,
    );
    Ok(())
}

pub async fn run(cmd: EscrowsCommands, client: &ZenlandClient, mode: OutputMode) -> anyhow::Result<()> {
    let escrows = client.escrows();

    match cmd {
        EscrowsCommands::List {
            buyer,
            seller,
            agent,
            user,
            state,
            states,
            group,
            page,
        } => {
            let mut args = ListEscrowsArgs {
                buyer,
                seller,
                agent,
                user,
                state,
                states,
                ..page.into_list_args()
            };
            if let Some(group) = group {
                args = args.with_state_group(group);
            }
            let page = escrows.list(args).await?;
            print_page(&page, mode)?;
        }
        EscrowsCommands::Get { id } => match escrows.get_by_id(&id).await? {
            Some(escrow) => output::print_item(&escrow, mode)?,
            None => output::print_not_found("escrow", &id),
        },
        EscrowsCommands::User {
            address,
            group,
            page,
        } => {
            let mut args = page.into_list_args();
            if let Some(group) = group {
                args = args.with_state_group(group);
            }
            let page = escrows.get_by_user(&address, args).await?;
            print_page(&page, mode)?;
        }
        EscrowsCommands::Group { group, page } => {
            let page = escrows
                .get_by_state_group(group, page.into_list_args())
                .await?;
            print_page(&page, mode)?;
        }
        EscrowsCommands::Recent { limit } => {
            let items = escrows.recent(limit).await?;
            let rows: Vec<EscrowRow> = items.iter().map(EscrowRow::from).collect();
            output::print_items(&rows, mode)?;
        }
    }
    Ok(())
}
