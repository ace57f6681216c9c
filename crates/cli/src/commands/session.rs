use std::io::Write;

use anyhow::Result;
use clap::Args;
use coachplan_domain as domain;

use super::print_json;

/// Options shared by single sessions and programs.
#[derive(Args, Debug, Clone)]
pub struct SessionOptions {
    /// Training goal, e.g. "Strength Training" or "Weight Loss"
    #[arg(long, default_value = "General Fitness")]
    pub goal: String,
    /// Target session length in minutes
    #[arg(long, default_value_t = 50)]
    pub duration: u32,
    /// Fitness level: Beginner, Intermediate or Advanced
    #[arg(long, default_value = "Intermediate")]
    pub level: String,
    /// Available equipment, e.g. Dumbbells or "Resistance Band"
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    pub equipment: Vec<String>,
    #[arg(long)]
    pub intensity: Option<String>,
}

impl From<SessionOptions> for domain::SessionParams {
    fn from(value: SessionOptions) -> Self {
        Self {
            goal: domain::Goal::parse(&value.goal),
            duration_min: value.duration,
            fitness_level: domain::SkillLevel::parse(&value.level),
            equipment: value.equipment,
            intensity: value.intensity,
            ..domain::SessionParams::default()
        }
    }
}

#[derive(Args, Debug)]
pub struct SessionArgs {
    #[command(flatten)]
    pub options: SessionOptions,
    /// Muscle groups to emphasize, e.g. Legs or "Full Body"
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    pub target_muscles: Vec<String>,
    /// Number of primary lifts
    #[arg(long)]
    pub primary_count: Option<usize>,
    /// Number of accessory exercises
    #[arg(long)]
    pub accessory_count: Option<usize>,
}

impl From<SessionArgs> for domain::SessionParams {
    fn from(value: SessionArgs) -> Self {
        Self {
            target_muscles: value.target_muscles,
            primary_count: value.primary_count,
            accessory_count: value.accessory_count,
            ..value.options.into()
        }
    }
}

#[derive(Args, Debug)]
pub struct ProgramArgs {
    #[arg(long, default_value_t = 4)]
    pub weeks: u32,
    #[arg(long, default_value_t = 3)]
    pub days_per_week: u32,
    #[command(flatten)]
    pub options: SessionOptions,
}

impl From<ProgramArgs> for domain::ProgramParams {
    fn from(value: ProgramArgs) -> Self {
        Self {
            weeks: value.weeks,
            days_per_week: value.days_per_week,
            session: value.options.into(),
        }
    }
}

pub fn run_session(args: SessionArgs, out: &mut impl Write) -> Result<()> {
    print_json(out, &domain::generate_session(&args.into()))
}

pub fn run_program(args: ProgramArgs, out: &mut impl Write) -> Result<()> {
    print_json(out, &domain::generate_plan(&args.into()))
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::{
        Cli,
        commands::{
            Command,
            tests::{config, exec},
        },
    };

    fn parse(args: &[&str]) -> Command {
        Cli::try_parse_from(["coachplan"].iter().chain(args)).unwrap().command
    }

    #[test]
    fn test_session_args() {
        let Command::Session(args) = parse(&[
            "session",
            "--goal",
            "Strength Training",
            "--duration",
            "45",
            "--level",
            "advanced",
            "--equipment",
            "Dumbbells,Barbell",
            "--target-muscles",
            "Legs",
            "Glutes",
            "--primary-count",
            "2",
        ]) else {
            panic!("unexpected command");
        };
        assert_eq!(
            domain::SessionParams::from(args),
            domain::SessionParams {
                goal: domain::Goal::StrengthTraining,
                duration_min: 45,
                fitness_level: domain::SkillLevel::Advanced,
                equipment: vec!["Dumbbells".to_string(), "Barbell".to_string()],
                target_muscles: vec!["Legs".to_string(), "Glutes".to_string()],
                intensity: None,
                primary_count: Some(2),
                accessory_count: None,
            }
        );
    }

    #[test]
    fn test_session_args_defaults() {
        let Command::Session(args) = parse(&["session"]) else {
            panic!("unexpected command");
        };
        assert_eq!(
            domain::SessionParams::from(args),
            domain::SessionParams::default()
        );
    }

    #[test]
    fn test_program_args() {
        let Command::Program(args) = parse(&["program", "--weeks", "2", "--goal", "Endurance"])
        else {
            panic!("unexpected command");
        };
        let params = domain::ProgramParams::from(args);
        assert_eq!(params.weeks, 2);
        assert_eq!(params.days_per_week, 3);
        assert_eq!(params.session.goal, domain::Goal::Endurance);
    }

    #[test]
    fn test_session_output() {
        let dir = tempfile::tempdir().unwrap();
        let Command::Session(args) = parse(&["session", "--goal", "Weight Loss"]) else {
            panic!("unexpected command");
        };
        let session = exec(&config(&dir), Command::Session(args));
        assert_eq!(session["goal"], json!("Weight Loss"));
        assert_eq!(session["target_duration_min"], json!(50));
        assert_eq!(session["blocks"][0]["name"], json!("Warm-up"));
    }

    #[test]
    fn test_program_output() {
        let dir = tempfile::tempdir().unwrap();
        let Command::Program(args) = parse(&["program", "--weeks", "2", "--days-per-week", "2"])
        else {
            panic!("unexpected command");
        };
        let program = exec(&config(&dir), Command::Program(args));
        let weeks = program["weeks"].as_array().unwrap();
        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[1]["days"][1]["day"], json!("Week 2 Day 2"));
    }
}
