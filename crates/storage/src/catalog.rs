//! Exercise catalog backed by a CSV file.
//!
//! The file has a header row with the canonical column names. Headers and fields are trimmed,
//! unknown columns are ignored and missing or malformed values take the catalog defaults.

use std::path::{Path, PathBuf};

use coachplan_domain as domain;
use log::{debug, warn};
use serde::Deserialize;

use domain::{CatalogProvider, ExerciseRow};

#[derive(Debug, Clone)]
pub struct CsvCatalog {
    path: PathBuf,
}

impl CsvCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<ExerciseRow>, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(&self.path)?;
        let mut rows = vec![];
        for (line, record) in reader.deserialize::<Record>().enumerate() {
            match record {
                Ok(record) => rows.push(ExerciseRow::from(record)),
                Err(err) => warn!(
                    "skipping record {} of {}: {err}",
                    line + 1,
                    self.path.display()
                ),
            }
        }
        Ok(rows)
    }
}

impl CatalogProvider for CsvCatalog {
    fn load_catalog(&self) -> Vec<ExerciseRow> {
        if !self.path.exists() {
            debug!("no exercise catalog at {}", self.path.display());
            return vec![];
        }
        match self.read() {
            Ok(rows) => rows,
            Err(err) => {
                warn!("failed to read {}: {err}", self.path.display());
                vec![]
            }
        }
    }
}

/// Catalog used for listing exercises: the CSV file if present, else the built-in rows.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    Csv(CsvCatalog),
    Builtin(domain::BuiltinCatalog),
}

impl CatalogSource {
    pub fn detect(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.is_file() {
            CatalogSource::Csv(CsvCatalog::new(path))
        } else {
            CatalogSource::Builtin(domain::BuiltinCatalog)
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            CatalogSource::Csv(_) => "csv",
            CatalogSource::Builtin(_) => "builtin",
        }
    }
}

impl CatalogProvider for CatalogSource {
    fn load_catalog(&self) -> Vec<ExerciseRow> {
        match self {
            CatalogSource::Csv(catalog) => catalog.load_catalog(),
            CatalogSource::Builtin(catalog) => catalog.load_catalog(),
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
struct Record {
    #[serde(rename = "Exercise ID")]
    id: String,
    #[serde(rename = "Exercise")]
    name: String,
    #[serde(rename = "Movement Pattern")]
    movement_pattern: String,
    #[serde(rename = "Equipment")]
    equipment: String,
    #[serde(rename = "Skill Level")]
    skill_level: String,
    #[serde(rename = "Default Sets")]
    default_sets: String,
    #[serde(rename = "Default Reps")]
    default_reps: String,
    #[serde(rename = "Default Rest (s)")]
    default_rest: String,
    #[serde(rename = "Est. Time/Set")]
    time_per_set: String,
    #[serde(rename = "Knee-Friendly")]
    knee_friendly: String,
    #[serde(rename = "Shoulder-Friendly")]
    shoulder_friendly: String,
    #[serde(rename = "Back-Friendly")]
    back_friendly: String,
    #[serde(rename = "Warm-Up Category")]
    warm_up_category: String,
    #[serde(rename = "Coaching Cues")]
    coaching_cues: String,
}

impl From<Record> for ExerciseRow {
    fn from(value: Record) -> Self {
        Self {
            id: value.id.trim().to_string(),
            name: domain::non_empty(&value.name).unwrap_or_else(|| "Exercise".to_string()),
            movement_pattern: domain::MovementPattern::parse(&value.movement_pattern),
            equipment: domain::non_empty(&value.equipment),
            skill_level: domain::SkillLevel::parse(&value.skill_level),
            default_sets: domain::parse_count(&value.default_sets, ExerciseRow::DEFAULT_SETS),
            default_reps: domain::Reps::parse(&value.default_reps, ExerciseRow::DEFAULT_REPS),
            default_rest_s: domain::parse_count(&value.default_rest, ExerciseRow::DEFAULT_REST_S),
            time_per_set_s: domain::parse_nonzero(
                &value.time_per_set,
                ExerciseRow::DEFAULT_TIME_PER_SET_S,
            ),
            knee_friendly: domain::parse_flag(&value.knee_friendly),
            shoulder_friendly: domain::parse_flag(&value.shoulder_friendly),
            back_friendly: domain::parse_flag(&value.back_friendly),
            warm_up_category: domain::non_empty(&value.warm_up_category),
            coaching_cues: domain::non_empty(&value.coaching_cues),
        }
    }
}
