use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use coachplan_domain as domain;
use coachplan_storage::file_store;
use domain::{BlockService, ClientService, PlanService};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use super::{CoachService, block_name, print_json};

#[derive(Args, Debug)]
pub struct PlanArgs {
    pub client: Uuid,
    /// Store the plan as a block, optionally under the given name
    #[arg(long, num_args = 0..=1, value_name = "NAME")]
    pub save: Option<Option<String>>,
    /// Use the weekly split templates instead of the daily pattern rotation
    #[arg(long)]
    pub balanced: bool,
    /// Add a volume summary
    #[arg(long)]
    pub summary: bool,
}

#[derive(Serialize)]
struct PlanOutput {
    client: String,
    plan: domain::WeekPlan,
    #[serde(skip_serializing_if = "Option::is_none")]
    block: Option<file_store::Block>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<domain::VolumeSummary>,
}

pub fn run(service: &CoachService, args: PlanArgs, out: &mut impl Write) -> Result<()> {
    let client_id = domain::ClientID::from(args.client);
    let (client, plan, block) = match (args.balanced, args.save) {
        (false, None) => {
            let response = service
                .generate_plan_for_client(client_id)
                .with_context(|| format!("failed to generate plan for client {}", args.client))?;
            (response.client, response.plan, None)
        }
        (false, Some(name)) => {
            let block = service
                .save_plan_for_client(client_id, block_name(name)?)
                .with_context(|| format!("failed to save plan for client {}", args.client))?;
            let client = service.get_client(client_id)?.display_name();
            (client, block.plan.clone(), Some(block))
        }
        (true, save) => {
            let client = service
                .get_client(client_id)
                .with_context(|| format!("failed to read client {}", args.client))?
                .display_name();
            let plan = service
                .generate_balanced_plan_for_client(client_id)
                .with_context(|| format!("failed to generate plan for client {}", args.client))?;
            let block = match save {
                Some(name) => Some(
                    service
                        .save_block(client_id, block_name(name)?, plan.clone())
                        .with_context(|| {
                            format!("failed to save plan for client {}", args.client)
                        })?,
                ),
                None => None,
            };
            (client, plan, block)
        }
    };

    if let Some(block) = &block {
        info!("saved block {} ({})", *block.id, block.title());
    }

    print_json(
        out,
        &PlanOutput {
            summary: args.summary.then(|| domain::volume_summary(&plan)),
            client,
            plan,
            block: block.as_ref().map(file_store::Block::from),
        },
    )
}
