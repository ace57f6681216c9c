use std::{fs, io::Write, path::PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use coachplan_domain as domain;
use coachplan_storage::file_store;
use domain::ClientService;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use super::{CoachService, print_json};

#[derive(Subcommand, Debug)]
pub enum ClientCommand {
    /// Create clients from a JSON file holding one client or a list of clients
    Import { file: PathBuf },
    /// List all clients
    List,
    /// Show a client
    Show { client: Uuid },
    /// Delete a client with its profile and blocks
    Delete { client: Uuid },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Import {
    Many(Vec<file_store::Client>),
    One(Box<file_store::Client>),
}

impl From<Import> for Vec<file_store::Client> {
    fn from(value: Import) -> Self {
        match value {
            Import::Many(clients) => clients,
            Import::One(client) => vec![*client],
        }
    }
}

pub fn run(service: &CoachService, command: ClientCommand, out: &mut impl Write) -> Result<()> {
    match command {
        ClientCommand::Import { file } => {
            let content =
                fs::read(&file).with_context(|| format!("failed to read {}", file.display()))?;
            let import: Import = serde_json::from_slice(&content)
                .with_context(|| format!("invalid client data in {}", file.display()))?;
            let mut created = vec![];
            for client in Vec::<file_store::Client>::from(import) {
                let client = service
                    .create_client(client.into())
                    .context("failed to create client")?;
                info!("created client {} ({})", *client.id, client.display_name());
                created.push(file_store::Client::from(client));
            }
            print_json(out, &created)
        }
        ClientCommand::List => {
            let clients = service
                .get_clients()
                .context("failed to read clients")?
                .iter()
                .map(file_store::Client::from)
                .collect::<Vec<_>>();
            print_json(out, &clients)
        }
        ClientCommand::Show { client } => {
            let client = service
                .get_client(client.into())
                .with_context(|| format!("failed to read client {client}"))?;
            print_json(out, &file_store::Client::from(client))
        }
        ClientCommand::Delete { client } => {
            service
                .delete_client(client.into())
                .with_context(|| format!("failed to delete client {client}"))?;
            print_json(out, &json!({ "deleted": client }))
        }
    }
}
