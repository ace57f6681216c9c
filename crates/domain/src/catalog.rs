use std::slice::Iter;

use serde::{Deserialize, Serialize};

use crate::Reps;

/// Column names of the tabular exercise database, in file order.
pub const CANONICAL_COLUMNS: [&str; 32] = [
    "Exercise ID",
    "Exercise",
    "Compound",
    "Movement Pattern",
    "Default Reps",
    "Default Sets",
    "Default Rest (s)",
    "Unilateral/Bilateral",
    "Equipment",
    "Location Suitability",
    "Space Needed",
    "Impact Level",
    "Knee-Friendly",
    "Shoulder-Friendly",
    "Back-Friendly",
    "Skill Level",
    "Target RPE",
    "Tempo",
    "Metcon Score (1-5)",
    "Contraindications",
    "Coaching Cues",
    "Video URL",
    "Tags",
    "Body Region",
    "Primary Muscle Group",
    "Plane of Motion",
    "Force Vector",
    "Load Type",
    "Home-Friendly",
    "Outdoor-Friendly",
    "Warm-Up Category",
    "Est. Time/Set",
];

pub trait ExerciseService {
    /// Lists the catalog, or the built-in rows if no catalog is installed.
    fn list_exercises(&self) -> ExerciseListing;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExerciseListing {
    pub columns: Vec<&'static str>,
    pub rows: Vec<ExerciseRow>,
}

pub trait CatalogProvider {
    /// Returns the catalog rows in source order. An empty result means no catalog is
    /// available and callers should use the session library instead.
    fn load_catalog(&self) -> Vec<ExerciseRow>;
}

impl<T: CatalogProvider + ?Sized> CatalogProvider for &T {
    fn load_catalog(&self) -> Vec<ExerciseRow> {
        (**self).load_catalog()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExerciseRow {
    pub id: String,
    pub name: String,
    pub movement_pattern: Option<MovementPattern>,
    pub equipment: Option<String>,
    pub skill_level: SkillLevel,
    pub default_sets: u32,
    pub default_reps: Reps,
    pub default_rest_s: u32,
    pub time_per_set_s: u32,
    pub knee_friendly: bool,
    pub shoulder_friendly: bool,
    pub back_friendly: bool,
    pub warm_up_category: Option<String>,
    pub coaching_cues: Option<String>,
}

impl ExerciseRow {
    pub const DEFAULT_SETS: u32 = 3;
    pub const DEFAULT_REPS: u32 = 10;
    pub const DEFAULT_REST_S: u32 = 60;
    pub const DEFAULT_TIME_PER_SET_S: u32 = 60;

    /// Seconds needed for all sets including rest.
    #[must_use]
    pub fn estimated_seconds(&self) -> u32 {
        self.default_sets
            .saturating_mul(self.time_per_set_s.saturating_add(self.default_rest_s))
    }

    #[must_use]
    pub fn is_warm_up(&self) -> bool {
        self.warm_up_category.is_some()
    }

    #[must_use]
    pub fn is_pull(&self) -> bool {
        self.movement_pattern.is_some_and(MovementPattern::is_pull)
    }
}

/// Parses a non-negative count, falling back to `default` for empty or malformed values.
#[must_use]
pub fn parse_count(text: &str, default: u32) -> u32 {
    let text = text.trim();
    text.parse::<u32>()
        .ok()
        .or_else(|| {
            text.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0 && *v <= f64::from(u32::MAX))
                .map(|v| v.round() as u32)
        })
        .unwrap_or(default)
}

/// Like [`parse_count`], but zero also falls back to `default`.
#[must_use]
pub fn parse_nonzero(text: &str, default: u32) -> u32 {
    match parse_count(text, default) {
        0 => default,
        value => value,
    }
}

#[must_use]
pub fn parse_flag(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case("TRUE")
}

#[must_use]
pub fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

pub trait Property: Clone + Copy + Sized {
    fn iter() -> Iter<'static, Self>;
    fn name(self) -> &'static str;
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MovementPattern {
    Squat,
    Hinge,
    #[serde(rename = "Horizontal Push")]
    HorizontalPush,
    #[serde(rename = "Horizontal Pull")]
    HorizontalPull,
    #[serde(rename = "Vertical Push")]
    VerticalPush,
    #[serde(rename = "Vertical Pull")]
    VerticalPull,
    Lunge,
    #[serde(rename = "Core – Brace/Anti-Extension", alias = "Core")]
    Core,
    #[serde(rename = "Carry/Gait")]
    CarryGait,
    #[serde(rename = "Jump/Power")]
    JumpPower,
    Conditioning,
}

impl MovementPattern {
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        match text {
            "Core" | "Core - Brace/Anti-Extension" => Some(MovementPattern::Core),
            _ => MovementPattern::iter().copied().find(|p| p.name() == text),
        }
    }

    #[must_use]
    pub fn is_pull(self) -> bool {
        matches!(
            self,
            MovementPattern::HorizontalPull | MovementPattern::VerticalPull
        )
    }
}

impl Property for MovementPattern {
    fn iter() -> Iter<'static, MovementPattern> {
        static PATTERNS: [MovementPattern; 11] = [
            MovementPattern::Squat,
            MovementPattern::Hinge,
            MovementPattern::HorizontalPush,
            MovementPattern::HorizontalPull,
            MovementPattern::VerticalPush,
            MovementPattern::VerticalPull,
            MovementPattern::Lunge,
            MovementPattern::Core,
            MovementPattern::CarryGait,
            MovementPattern::JumpPower,
            MovementPattern::Conditioning,
        ];
        PATTERNS.iter()
    }

    fn name(self) -> &'static str {
        match self {
            MovementPattern::Squat => "Squat",
            MovementPattern::Hinge => "Hinge",
            MovementPattern::HorizontalPush => "Horizontal Push",
            MovementPattern::HorizontalPull => "Horizontal Pull",
            MovementPattern::VerticalPush => "Vertical Push",
            MovementPattern::VerticalPull => "Vertical Pull",
            MovementPattern::Lunge => "Lunge",
            MovementPattern::Core => "Core – Brace/Anti-Extension",
            MovementPattern::CarryGait => "Carry/Gait",
            MovementPattern::JumpPower => "Jump/Power",
            MovementPattern::Conditioning => "Conditioning",
        }
    }
}

impl std::fmt::Display for MovementPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    /// Unknown or empty text is treated as the lowest level.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        SkillLevel::iter()
            .copied()
            .find(|l| l.name().eq_ignore_ascii_case(text))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn from_training_age(years: Option<f64>) -> Self {
        match years {
            Some(years) if years.is_finite() && years >= 5.0 => SkillLevel::Advanced,
            Some(years) if years.is_finite() && years >= 1.5 => SkillLevel::Intermediate,
            _ => SkillLevel::Beginner,
        }
    }

    #[must_use]
    pub fn allows(self, floor: SkillLevel) -> bool {
        floor <= self
    }
}

impl Property for SkillLevel {
    fn iter() -> Iter<'static, SkillLevel> {
        static LEVELS: [SkillLevel; 3] = [
            SkillLevel::Beginner,
            SkillLevel::Intermediate,
            SkillLevel::Advanced,
        ];
        LEVELS.iter()
    }

    fn name(self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
        }
    }
}

impl std::fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Two-row development catalog used when no exercise database is installed.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinCatalog;

impl CatalogProvider for BuiltinCatalog {
    fn load_catalog(&self) -> Vec<ExerciseRow> {
        vec![
            ExerciseRow {
                id: "BW-001".to_string(),
                name: "Push-up".to_string(),
                movement_pattern: Some(MovementPattern::HorizontalPush),
                equipment: Some("Bodyweight".to_string()),
                skill_level: SkillLevel::Beginner,
                default_sets: 3,
                default_reps: Reps::Count(10),
                default_rest_s: 60,
                time_per_set_s: 60,
                knee_friendly: true,
                shoulder_friendly: true,
                back_friendly: true,
                warm_up_category: None,
                coaching_cues: Some("Brace core, full ROM".to_string()),
            },
            ExerciseRow {
                id: "KB-101".to_string(),
                name: "Kettlebell Swing".to_string(),
                movement_pattern: Some(MovementPattern::Hinge),
                equipment: Some("Kettlebell".to_string()),
                skill_level: SkillLevel::Intermediate,
                default_sets: 4,
                default_reps: Reps::Count(12),
                default_rest_s: 75,
                time_per_set_s: 60,
                knee_friendly: true,
                shoulder_friendly: true,
                back_friendly: true,
                warm_up_category: None,
                coaching_cues: Some("Hinge, snap hips".to_string()),
            },
        ]
    }
}
