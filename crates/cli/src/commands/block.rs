use std::{
    fs,
    io::{BufWriter, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};
use coachplan_domain as domain;
use coachplan_storage::{export, file_store};
use domain::BlockService;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use super::{CoachService, block_name, print_json};

#[derive(Subcommand, Debug)]
pub enum BlockCommand {
    /// List the blocks of a client, newest first
    List { client: Uuid },
    /// Show a block
    Show { client: Uuid, block: Uuid },
    /// Delete a block
    Delete { client: Uuid, block: Uuid },
    /// Store a progressed copy of a block
    Next {
        client: Uuid,
        block: Uuid,
        /// Name of the new block (defaults to "Next of <name>")
        #[arg(long)]
        name: Option<String>,
    },
    /// Write a block to a CSV or HTML file
    Export {
        client: Uuid,
        block: Uuid,
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,
        /// Output directory
        #[arg(long, default_value = ".")]
        output: PathBuf,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Html,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Html => "html",
        }
    }
}

pub fn run(service: &CoachService, command: BlockCommand, out: &mut impl Write) -> Result<()> {
    match command {
        BlockCommand::List { client } => {
            let blocks = service
                .get_blocks(client.into())
                .with_context(|| format!("failed to read blocks of client {client}"))?;
            print_json(
                out,
                &blocks.iter().map(file_store::Block::from).collect::<Vec<_>>(),
            )
        }
        BlockCommand::Show { client, block } => {
            let block = read_block(service, client, block)?;
            print_json(out, &file_store::Block::from(&block))
        }
        BlockCommand::Delete { client, block } => {
            service
                .delete_block(client.into(), block.into())
                .with_context(|| format!("failed to delete block {block}"))?;
            print_json(out, &json!({ "deleted": block }))
        }
        BlockCommand::Next {
            client,
            block,
            name,
        } => {
            let next = service
                .next_block(client.into(), block.into(), block_name(name)?)
                .with_context(|| format!("failed to progress block {block}"))?;
            info!("created block {} ({})", *next.id, next.title());
            print_json(out, &file_store::Block::from(&next))
        }
        BlockCommand::Export {
            client,
            block,
            format,
            output,
        } => {
            let block = read_block(service, client, block)?;
            let path = output.join(format!("{}.{}", block.export_stem(), format.extension()));
            fs::create_dir_all(&output)
                .with_context(|| format!("failed to create {}", output.display()))?;
            match format {
                Format::Csv => {
                    let file = fs::File::create(&path)
                        .with_context(|| format!("failed to create {}", path.display()))?;
                    export::write_csv(BufWriter::new(file), &block.plan)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                }
                Format::Html => {
                    fs::write(&path, domain::render_html(&block.title(), &block.plan))
                        .with_context(|| format!("failed to write {}", path.display()))?;
                }
            }
            info!("exported block {} to {}", *block.id, path.display());
            writeln!(out, "{}", path.display())?;
            Ok(())
        }
    }
}

fn read_block(service: &CoachService, client: Uuid, block: Uuid) -> Result<domain::Block> {
    service
        .get_block(client.into(), block.into())
        .with_context(|| format!("failed to read block {block} of client {client}"))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::{
        commands::{
            Command,
            plan::PlanArgs,
            tests::{config, exec, import_client},
        },
        config::Config,
    };

    fn block_command(action: BlockCommand) -> Command {
        Command::Block { action }
    }

    fn save_plan(config: &Config, client: Uuid, name: Option<&str>) -> Value {
        exec(
            config,
            Command::Plan(PlanArgs {
                client,
                save: Some(name.map(ToString::to_string)),
                balanced: false,
                summary: false,
            }),
        )["block"]
            .clone()
    }

    fn block_id(block: &Value) -> Uuid {
        block["id"].as_str().unwrap().parse().unwrap()
    }

    #[test]
    fn test_list_show_delete() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);
        let client = import_client(&config, &json!({"first_name": "Alice"}));
        let first = save_plan(&config, client, Some("First"));
        let second = save_plan(&config, client, Some("Second"));

        let blocks = exec(&config, block_command(BlockCommand::List { client }));
        assert_eq!(blocks, json!([second.clone(), first.clone()]));

        assert_eq!(
            exec(
                &config,
                block_command(BlockCommand::Show {
                    client,
                    block: block_id(&first)
                })
            ),
            first
        );

        exec(
            &config,
            block_command(BlockCommand::Delete {
                client,
                block: block_id(&first),
            }),
        );
        assert_eq!(
            exec(&config, block_command(BlockCommand::List { client })),
            json!([second])
        );
    }

    #[test]
    fn test_next() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);
        let client = import_client(&config, &json!({"first_name": "Alice"}));
        let block = save_plan(&config, client, None);
        assert_eq!(block["name"], json!("Plan Alice"));

        let next = exec(
            &config,
            block_command(BlockCommand::Next {
                client,
                block: block_id(&block),
                name: None,
            }),
        );
        assert_eq!(next["name"], json!("Next of Plan Alice"));
        assert_ne!(next["id"], block["id"]);
    }

    #[rstest]
    #[case(Format::Csv, "Spring_Block.csv", "Day,Exercise,Movement Pattern")]
    #[case(Format::Html, "Spring_Block.html", "<!doctype html>")]
    fn test_export(#[case] format: Format, #[case] file_name: &str, #[case] prefix: &str) {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);
        let client = import_client(&config, &json!({"first_name": "Alice"}));
        let block = save_plan(&config, client, Some("Spring Block"));
        let output = dir.path().join("exports");

        let mut out = vec![];
        crate::commands::run(
            block_command(BlockCommand::Export {
                client,
                block: block_id(&block),
                format,
                output: output.clone(),
            }),
            &config,
            &mut out,
        )
        .unwrap();

        let path = output.join(file_name);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("{}\n", path.display())
        );
        assert!(fs::read_to_string(&path).unwrap().starts_with(prefix));
    }

    #[test]
    fn test_show_unknown_block() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(&dir);
        let client = import_client(&config, &json!({"first_name": "Alice"}));
        let mut out = vec![];
        assert!(
            crate::commands::run(
                block_command(BlockCommand::Show {
                    client,
                    block: Uuid::nil()
                }),
                &config,
                &mut out,
            )
            .is_err()
        );
    }
}
