pub mod block;
pub mod client;
pub mod plan;
pub mod session;

use std::io::Write;

use anyhow::{Context, Result};
use clap::Subcommand;
use coachplan_domain as domain;
use coachplan_storage::{
    catalog::{CatalogSource, CsvCatalog},
    file_store::FileStore,
};
use domain::{ExerciseService, ProfileService};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::config::Config;

pub type CoachService = domain::Service<FileStore, CsvCatalog>;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the exercise catalog
    Exercises,
    /// Client management
    Client {
        #[command(subcommand)]
        action: client::ClientCommand,
    },
    /// Normalize and store the profile of a client
    Profile {
        client: Uuid,
        /// Return the stored profile instead of recomputing it
        #[arg(long)]
        cached: bool,
    },
    /// Generate a week plan for a client
    Plan(plan::PlanArgs),
    /// Generate a single session from the built-in library
    Session(session::SessionArgs),
    /// Generate a multi-week program from the built-in library
    Program(session::ProgramArgs),
    /// Stored plan blocks
    Block {
        #[command(subcommand)]
        action: block::BlockCommand,
    },
}

#[must_use]
pub fn service(config: &Config) -> CoachService {
    domain::Service::new(
        FileStore::new(&config.data_dir),
        CsvCatalog::new(&config.catalog),
    )
}

pub fn run(command: Command, config: &Config, out: &mut impl Write) -> Result<()> {
    let service = service(config);
    match command {
        Command::Exercises => {
            let source = CatalogSource::detect(&config.catalog);
            debug!("listing exercises from {} catalog", source.name());
            let listing =
                domain::Service::new(FileStore::new(&config.data_dir), source).list_exercises();
            print_json(out, &listing)
        }
        Command::Client { action } => client::run(&service, action, out),
        Command::Profile { client, cached } => {
            let profile = if cached {
                service.get_profile(client.into())
            } else {
                service.refresh_profile(client.into())
            }
            .with_context(|| format!("failed to get profile of client {client}"))?;
            print_json(out, &profile)
        }
        Command::Plan(args) => plan::run(&service, args, out),
        Command::Session(args) => session::run_session(args, out),
        Command::Program(args) => session::run_program(args, out),
        Command::Block { action } => block::run(&service, action, out),
    }
}

fn print_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn block_name(name: Option<String>) -> Result<Option<domain::Name>> {
    name.map(|name| domain::Name::new(&name).context("invalid block name"))
        .transpose()
}
