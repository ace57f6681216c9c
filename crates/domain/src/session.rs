//! Session synthesis from an internal exercise library.
//!
//! Used when no exercise database is installed, and directly for one-off sessions and
//! multi-week programs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{PlanExerciseItem, Property, Reps, SkillLevel};

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Goal {
    #[serde(rename = "Weight Loss")]
    WeightLoss,
    #[serde(rename = "Muscle Building")]
    MuscleBuilding,
    #[serde(rename = "Strength Training")]
    StrengthTraining,
    Endurance,
    Flexibility,
    #[default]
    #[serde(rename = "General Fitness")]
    GeneralFitness,
}

impl Goal {
    /// Unknown text is treated as general fitness.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        Goal::iter()
            .copied()
            .find(|g| g.name().eq_ignore_ascii_case(text))
            .unwrap_or_default()
    }

    fn tempo_seconds_per_rep(self) -> f64 {
        match self {
            Goal::StrengthTraining => 3.0,
            Goal::Endurance => 1.5,
            _ => 2.0,
        }
    }

    fn has_finisher(self) -> bool {
        matches!(
            self,
            Goal::WeightLoss | Goal::Endurance | Goal::GeneralFitness
        )
    }

    fn is_conditioning(self) -> bool {
        matches!(self, Goal::WeightLoss | Goal::Endurance)
    }
}

impl Property for Goal {
    fn iter() -> std::slice::Iter<'static, Goal> {
        static GOALS: [Goal; 6] = [
            Goal::WeightLoss,
            Goal::MuscleBuilding,
            Goal::StrengthTraining,
            Goal::Endurance,
            Goal::Flexibility,
            Goal::GeneralFitness,
        ];
        GOALS.iter()
    }

    fn name(self) -> &'static str {
        match self {
            Goal::WeightLoss => "Weight Loss",
            Goal::MuscleBuilding => "Muscle Building",
            Goal::StrengthTraining => "Strength Training",
            Goal::Endurance => "Endurance",
            Goal::Flexibility => "Flexibility",
            Goal::GeneralFitness => "General Fitness",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionParams {
    pub goal: Goal,
    pub duration_min: u32,
    pub fitness_level: SkillLevel,
    pub equipment: Vec<String>,
    pub target_muscles: Vec<String>,
    pub intensity: Option<String>,
    pub primary_count: Option<usize>,
    pub accessory_count: Option<usize>,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            goal: Goal::GeneralFitness,
            duration_min: 50,
            fitness_level: SkillLevel::Intermediate,
            equipment: vec![],
            target_muscles: vec![],
            intensity: None,
            primary_count: None,
            accessory_count: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub goal: Goal,
    pub fitness_level: SkillLevel,
    pub estimated_duration_min: u32,
    pub target_duration_min: u32,
    pub blocks: Vec<SessionBlock>,
}

impl Session {
    #[must_use]
    pub fn block(&self, name: &str) -> Option<&SessionBlock> {
        self.blocks.iter().find(|b| b.name == name)
    }

    /// Flattens all blocks into plan items. Timed items carry no sets.
    #[must_use]
    pub fn plan_items(&self) -> Vec<PlanExerciseItem> {
        self.blocks
            .iter()
            .flat_map(|b| b.items.iter())
            .map(|item| match item {
                SessionItem::Timed {
                    exercise, protocol, ..
                } => PlanExerciseItem {
                    name: exercise.clone(),
                    notes: protocol.clone(),
                    ..PlanExerciseItem::default()
                },
                SessionItem::Strength {
                    exercise,
                    sets,
                    reps,
                    rest_s,
                    ..
                } => PlanExerciseItem {
                    name: exercise.clone(),
                    sets: Some(*sets),
                    reps: Some(Reps::Count(*reps)),
                    rest_s: Some(*rest_s),
                    ..PlanExerciseItem::default()
                },
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionBlock {
    pub name: String,
    pub items: Vec<SessionItem>,
    pub duration_min: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionItem {
    Timed {
        exercise: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        protocol: Option<String>,
        duration_min: u32,
    },
    Strength {
        exercise: String,
        sets: u32,
        reps: u32,
        rest_s: u32,
        pattern: String,
    },
}

impl SessionItem {
    fn strength(exercise: &str, sets: u32, reps: u32, rest_s: u32, pattern: &str) -> Self {
        SessionItem::Strength {
            exercise: exercise.to_string(),
            sets,
            reps,
            rest_s,
            pattern: pattern.to_string(),
        }
    }

    fn minutes(&self, tempo_seconds_per_rep: f64) -> f64 {
        match self {
            SessionItem::Timed { duration_min, .. } => f64::from(*duration_min),
            SessionItem::Strength {
                sets, reps, rest_s, ..
            } => estimate_minutes(*sets, *reps, *rest_s, tempo_seconds_per_rep),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeProfile {
    pub main_sets: u32,
    pub main_reps: u32,
    pub main_rest: u32,
    pub acc_sets: u32,
    pub acc_reps: u32,
    pub acc_rest: u32,
}

impl VolumeProfile {
    #[must_use]
    pub fn new(goal: Goal, level: SkillLevel) -> Self {
        let multiplier = match level {
            SkillLevel::Beginner => 0.75,
            SkillLevel::Intermediate => 1.0,
            SkillLevel::Advanced => 1.2,
        };
        let scale = |sets: u32, floor: u32| ((f64::from(sets) * multiplier).round() as u32).max(floor);
        match goal {
            Goal::StrengthTraining => Self {
                main_sets: scale(4, 3),
                main_reps: 4,
                main_rest: 150,
                acc_sets: scale(3, 2),
                acc_reps: 8,
                acc_rest: 90,
            },
            Goal::MuscleBuilding => Self {
                main_sets: scale(4, 3),
                main_reps: 10,
                main_rest: 75,
                acc_sets: scale(3, 2),
                acc_reps: 12,
                acc_rest: 60,
            },
            Goal::WeightLoss | Goal::Endurance => Self {
                main_sets: scale(3, 3),
                main_reps: 15,
                main_rest: 45,
                acc_sets: scale(2, 2),
                acc_reps: 15,
                acc_rest: 30,
            },
            Goal::GeneralFitness | Goal::Flexibility => Self {
                main_sets: scale(3, 2),
                main_reps: 10,
                main_rest: 60,
                acc_sets: scale(2, 2),
                acc_reps: 12,
                acc_rest: 45,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum LibraryCategory {
    Squat,
    Hinge,
    Push,
    Pull,
    Lunge,
    Core,
    Carry,
    Conditioning,
    Mobility,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct EquipmentSet {
    bodyweight: bool,
    dumbbells: bool,
    barbells: bool,
    bands: bool,
    kettlebells: bool,
}

impl EquipmentSet {
    fn new(equipment: &[String]) -> Self {
        let mut set = Self::default();
        for name in equipment {
            match name.trim().to_ascii_lowercase().as_str() {
                "bodyweight" => set.bodyweight = true,
                "dumbbell" | "dumbbells" => set.dumbbells = true,
                "barbell" | "barbells" => set.barbells = true,
                "band" | "bands" | "resistance band" | "resistance bands" => set.bands = true,
                "kettlebell" | "kettlebells" => set.kettlebells = true,
                _ => {}
            }
        }
        set
    }
}

/// Exercise names per category available with the given equipment. Categories without
/// any exercise are omitted.
#[must_use]
pub fn default_library(equipment: &[String]) -> BTreeMap<LibraryCategory, Vec<&'static str>> {
    let e = EquipmentSet::new(equipment);
    let choices: [(LibraryCategory, &[(&'static str, bool)]); 9] = [
        (
            LibraryCategory::Squat,
            &[
                ("Back Squat", e.barbells),
                ("Front Squat", e.barbells),
                ("Goblet Squat", e.dumbbells || e.kettlebells),
                ("Air Squat", e.bodyweight),
            ],
        ),
        (
            LibraryCategory::Hinge,
            &[
                ("Deadlift", e.barbells),
                ("Romanian Deadlift", e.barbells || e.dumbbells),
                ("Kettlebell Swing", e.kettlebells),
                ("Hip Hinge Good Morning (band)", e.bands),
            ],
        ),
        (
            LibraryCategory::Push,
            &[
                ("Bench Press", e.barbells),
                ("DB Bench Press", e.dumbbells),
                ("Push-up", e.bodyweight),
                ("Overhead Press", e.barbells || e.dumbbells),
            ],
        ),
        (
            LibraryCategory::Pull,
            &[
                ("Barbell Row", e.barbells),
                ("DB Row", e.dumbbells),
                ("Band Row", e.bands),
                ("Pull-up / Assisted", e.bodyweight),
            ],
        ),
        (
            LibraryCategory::Lunge,
            &[
                ("Walking Lunge", e.bodyweight || e.dumbbells || e.kettlebells),
                ("Split Squat", e.bodyweight || e.dumbbells || e.kettlebells),
            ],
        ),
        (
            LibraryCategory::Core,
            &[
                ("Plank", true),
                ("Side Plank", true),
                ("Dead Bug", true),
                ("Hollow Hold", e.bodyweight),
            ],
        ),
        (
            LibraryCategory::Carry,
            &[("Farmer Carry", e.dumbbells || e.kettlebells)],
        ),
        (
            LibraryCategory::Conditioning,
            &[
                ("Burpees", true),
                ("Mountain Climbers", true),
                ("KB Snatch", e.kettlebells),
                ("Jump Rope", e.bodyweight),
            ],
        ),
        (
            LibraryCategory::Mobility,
            &[
                ("T-Spine Opener", true),
                ("Hip Flexor Stretch", true),
                ("Ankle Dorsiflexion Drill", true),
                ("Shoulder CARs", true),
            ],
        ),
    ];

    choices
        .into_iter()
        .map(|(category, options)| {
            (
                category,
                options
                    .iter()
                    .filter(|(_, available)| *available)
                    .map(|(name, _)| *name)
                    .collect::<Vec<_>>(),
            )
        })
        .filter(|(_, names)| !names.is_empty())
        .collect()
}

/// Work time plus rest between sets, in minutes.
#[must_use]
pub fn estimate_minutes(sets: u32, reps: u32, rest_s: u32, tempo_seconds_per_rep: f64) -> f64 {
    let work = f64::from(sets) * f64::from(reps) * tempo_seconds_per_rep;
    let rest = f64::from(sets.saturating_sub(1)) * f64::from(rest_s);
    (work + rest) / 60.0
}

const ACCESSORY_TEMPO: f64 = 1.8;
const WARM_UP_MINUTES: u32 = 8;
const FINISHER_MINUTES: u32 = 8;

#[must_use]
pub fn generate_session(params: &SessionParams) -> Session {
    let library = default_library(&params.equipment);
    let profile = VolumeProfile::new(params.goal, params.fitness_level);
    let tempo = params.goal.tempo_seconds_per_rep();
    let first = |category: LibraryCategory| library.get(&category).and_then(|l| l.first()).copied();

    let warm_up = SessionBlock {
        name: "Warm-up".to_string(),
        items: vec![
            SessionItem::Timed {
                exercise: first(LibraryCategory::Mobility).unwrap_or_default().to_string(),
                details: None,
                protocol: None,
                duration_min: 4,
            },
            SessionItem::Timed {
                exercise: "Ramp-up Sets".to_string(),
                details: Some("2 light sets for first main lift".to_string()),
                protocol: None,
                duration_min: 4,
            },
        ],
        duration_min: WARM_UP_MINUTES,
    };

    let max_primaries = params.primary_count.filter(|n| *n > 0).unwrap_or(3);
    let mut primaries = vec![];
    for (category, pattern) in [
        (LibraryCategory::Squat, "Squat"),
        (LibraryCategory::Hinge, "Hinge"),
        (LibraryCategory::Push, "Push"),
        (LibraryCategory::Pull, "Pull"),
    ] {
        if let Some(exercise) = first(category) {
            primaries.push(SessionItem::strength(
                exercise,
                profile.main_sets,
                profile.main_reps,
                profile.main_rest,
                pattern,
            ));
        }
        if primaries.len() >= max_primaries {
            break;
        }
    }

    let mut accessories = vec![];
    let under_cap = |accessories: &Vec<SessionItem>| {
        params
            .accessory_count
            .is_none_or(|max| accessories.len() < max)
    };
    if let Some(exercise) = first(LibraryCategory::Lunge) {
        if under_cap(&accessories) {
            accessories.push(SessionItem::strength(
                exercise,
                profile.acc_sets,
                profile.acc_reps,
                profile.acc_rest,
                "Unilateral",
            ));
        }
    }
    if let Some(exercise) = first(LibraryCategory::Core) {
        if under_cap(&accessories) {
            let reps = if params.goal.is_conditioning() { 30 } else { 12 };
            accessories.push(SessionItem::strength(
                exercise,
                profile.acc_sets,
                reps,
                45,
                "Core",
            ));
        }
    }
    if let Some(exercise) = first(LibraryCategory::Carry) {
        if under_cap(&accessories) {
            accessories.push(SessionItem::strength(exercise, 3, 30, 60, "Carry"));
        }
    }

    let mut finisher = match first(LibraryCategory::Conditioning) {
        Some(exercise) if params.goal.has_finisher() => Some(SessionBlock {
            name: "Finisher".to_string(),
            items: vec![SessionItem::Timed {
                exercise: exercise.to_string(),
                details: None,
                protocol: Some("EMOM 8 min: 30s work / 30s rest".to_string()),
                duration_min: FINISHER_MINUTES,
            }],
            duration_min: FINISHER_MINUTES,
        }),
        _ => None,
    };

    let main_minutes: f64 = primaries.iter().map(|i| i.minutes(tempo)).sum();
    let accessory_minutes =
        |accessories: &Vec<SessionItem>| -> f64 { accessories.iter().map(|i| i.minutes(ACCESSORY_TEMPO)).sum() };
    let total = |accessory_minutes: f64, finisher: &Option<SessionBlock>| {
        f64::from(WARM_UP_MINUTES)
            + main_minutes
            + accessory_minutes
            + finisher.as_ref().map_or(0.0, |f| f64::from(f.duration_min))
    };

    let mut acc_minutes = accessory_minutes(&accessories);
    let mut total_minutes = total(acc_minutes, &finisher);

    let target = params.duration_min.clamp(20, 120);
    let lower = f64::from(target) * 0.9;
    let upper = f64::from(target) * 1.1;

    if total_minutes > upper {
        for item in &mut accessories {
            if let SessionItem::Strength { sets, .. } = item {
                if *sets > 2 {
                    *sets -= 1;
                }
            }
        }
        acc_minutes = accessory_minutes(&accessories);
        total_minutes = total(acc_minutes, &finisher);
    }
    if finisher.is_some() && total_minutes > upper {
        finisher = None;
        total_minutes = total(acc_minutes, &finisher);
    }
    if total_minutes < lower {
        if let Some(exercise) = first(LibraryCategory::Core) {
            accessories.push(SessionItem::strength(exercise, 2, 12, 45, "Core"));
            acc_minutes = accessory_minutes(&accessories);
            total_minutes = total(acc_minutes, &finisher);
        }
    }

    let mut blocks = vec![
        warm_up,
        SessionBlock {
            name: "Main".to_string(),
            items: primaries,
            duration_min: round_minutes(main_minutes),
        },
        SessionBlock {
            name: "Accessories".to_string(),
            items: accessories,
            duration_min: round_minutes(acc_minutes),
        },
    ];
    blocks.extend(finisher);

    Session {
        goal: params.goal,
        fitness_level: params.fitness_level,
        estimated_duration_min: round_minutes(total_minutes),
        target_duration_min: target,
        blocks,
    }
}

fn round_minutes(minutes: f64) -> u32 {
    minutes.max(0.0).round() as u32
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgramParams {
    pub weeks: u32,
    pub days_per_week: u32,
    pub session: SessionParams,
}

impl Default for ProgramParams {
    fn default() -> Self {
        Self {
            weeks: 4,
            days_per_week: 3,
            session: SessionParams::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub weeks: Vec<ProgramWeek>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramWeek {
    pub week: u32,
    pub days: Vec<ProgramDay>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramDay {
    pub day: String,
    pub session: Session,
}

/// Target muscle emphasis for a day, rotating lower / upper / full body.
#[must_use]
pub fn day_emphasis(day: u32) -> Vec<String> {
    let muscles: &[&str] = match day % 3 {
        1 => &["Legs", "Glutes", "Core"],
        2 => &["Chest", "Back", "Shoulders", "Arms", "Core"],
        _ => &["Full Body", "Core"],
    };
    muscles.iter().map(|m| (*m).to_string()).collect()
}

#[must_use]
pub fn generate_plan(params: &ProgramParams) -> Program {
    Program {
        weeks: (1..=params.weeks)
            .map(|week| ProgramWeek {
                week,
                days: (1..=params.days_per_week)
                    .map(|day| ProgramDay {
                        day: format!("Week {week} Day {day}"),
                        session: generate_session(&SessionParams {
                            target_muscles: day_emphasis(day),
                            ..params.session.clone()
                        }),
                    })
                    .collect(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn equipment(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    fn sets(block: &SessionBlock) -> Vec<u32> {
        block
            .items
            .iter()
            .filter_map(|i| match i {
                SessionItem::Strength { sets, .. } => Some(*sets),
                SessionItem::Timed { .. } => None,
            })
            .collect()
    }

    fn exercises(block: &SessionBlock) -> Vec<&str> {
        block
            .items
            .iter()
            .map(|i| match i {
                SessionItem::Strength { exercise, .. } | SessionItem::Timed { exercise, .. } => {
                    exercise.as_str()
                }
            })
            .collect()
    }

    #[rstest]
    #[case("Strength Training", Goal::StrengthTraining)]
    #[case("weight loss", Goal::WeightLoss)]
    #[case("Endurance", Goal::Endurance)]
    #[case("Powerlifting", Goal::GeneralFitness)]
    #[case("", Goal::GeneralFitness)]
    fn test_goal_parse(#[case] text: &str, #[case] expected: Goal) {
        assert_eq!(Goal::parse(text), expected);
    }

    #[test]
    fn test_volume_profile_strength_advanced() {
        assert_eq!(
            VolumeProfile::new(Goal::StrengthTraining, SkillLevel::Advanced),
            VolumeProfile {
                main_sets: 5,
                main_reps: 4,
                main_rest: 150,
                acc_sets: 4,
                acc_reps: 8,
                acc_rest: 90,
            }
        );
    }

    #[rstest]
    #[case(Goal::StrengthTraining, SkillLevel::Beginner, 3, 2)]
    #[case(Goal::MuscleBuilding, SkillLevel::Intermediate, 4, 3)]
    #[case(Goal::WeightLoss, SkillLevel::Beginner, 3, 2)]
    #[case(Goal::Endurance, SkillLevel::Advanced, 4, 2)]
    #[case(Goal::GeneralFitness, SkillLevel::Beginner, 2, 2)]
    #[case(Goal::Flexibility, SkillLevel::Advanced, 4, 2)]
    fn test_volume_profile_sets(
        #[case] goal: Goal,
        #[case] level: SkillLevel,
        #[case] main_sets: u32,
        #[case] acc_sets: u32,
    ) {
        let profile = VolumeProfile::new(goal, level);
        assert_eq!((profile.main_sets, profile.acc_sets), (main_sets, acc_sets));
    }

    #[test]
    fn test_default_library_bodyweight() {
        let library = default_library(&equipment(&["Bodyweight"]));
        assert_eq!(library[&LibraryCategory::Squat], vec!["Air Squat"]);
        assert_eq!(library[&LibraryCategory::Push], vec!["Push-up"]);
        assert_eq!(library[&LibraryCategory::Pull], vec!["Pull-up / Assisted"]);
        assert!(!library.contains_key(&LibraryCategory::Hinge));
        assert!(!library.contains_key(&LibraryCategory::Carry));
    }

    #[test]
    fn test_default_library_without_equipment() {
        let library = default_library(&[]);
        assert_eq!(
            library.keys().copied().collect::<Vec<_>>(),
            vec![
                LibraryCategory::Core,
                LibraryCategory::Conditioning,
                LibraryCategory::Mobility
            ]
        );
    }

    #[test]
    fn test_default_library_accepts_catalog_spellings() {
        let library = default_library(&equipment(&["Kettlebell", "Resistance Bands"]));
        assert_eq!(library[&LibraryCategory::Squat], vec!["Goblet Squat"]);
        assert_eq!(
            library[&LibraryCategory::Hinge],
            vec!["Kettlebell Swing", "Hip Hinge Good Morning (band)"]
        );
        assert_eq!(library[&LibraryCategory::Pull], vec!["Band Row"]);
    }

    #[rstest]
    #[case(3, 10, 60, 2.0, 3.0)]
    #[case(1, 10, 60, 2.0, 20.0 / 60.0)]
    #[case(0, 10, 60, 2.0, 0.0)]
    fn test_estimate_minutes(
        #[case] sets: u32,
        #[case] reps: u32,
        #[case] rest_s: u32,
        #[case] tempo: f64,
        #[case] expected: f64,
    ) {
        assert!((estimate_minutes(sets, reps, rest_s, tempo) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_generate_session_strength_advanced_barbells() {
        let session = generate_session(&SessionParams {
            goal: Goal::StrengthTraining,
            duration_min: 50,
            fitness_level: SkillLevel::Advanced,
            equipment: equipment(&["Barbells"]),
            ..SessionParams::default()
        });
        let main = session.block("Main").unwrap();
        assert_eq!(exercises(main), vec!["Back Squat", "Deadlift", "Bench Press"]);
        for item in &main.items {
            let SessionItem::Strength {
                sets, reps, rest_s, ..
            } = item
            else {
                panic!("unexpected timed item");
            };
            assert_eq!((*sets, *reps, *rest_s), (5, 4, 150));
        }
        assert!(session.block("Finisher").is_none());
        assert_eq!(session.target_duration_min, 50);
    }

    #[test]
    fn test_generate_session_block_order() {
        let session = generate_session(&SessionParams {
            goal: Goal::WeightLoss,
            duration_min: 90,
            fitness_level: SkillLevel::Intermediate,
            equipment: equipment(&["Bodyweight", "Dumbbells"]),
            ..SessionParams::default()
        });
        assert_eq!(
            session
                .blocks
                .iter()
                .map(|b| b.name.as_str())
                .collect::<Vec<_>>(),
            vec!["Warm-up", "Main", "Accessories", "Finisher"]
        );
        let warm_up = session.block("Warm-up").unwrap();
        assert_eq!(exercises(warm_up), vec!["T-Spine Opener", "Ramp-up Sets"]);
        assert_eq!(warm_up.duration_min, 8);
        assert_eq!(
            exercises(session.block("Accessories").unwrap())[..3].to_vec(),
            vec!["Walking Lunge", "Plank", "Farmer Carry"]
        );
    }

    #[test]
    fn test_generate_session_respects_counts() {
        let session = generate_session(&SessionParams {
            goal: Goal::MuscleBuilding,
            duration_min: 60,
            equipment: equipment(&["Barbells", "Dumbbells"]),
            primary_count: Some(2),
            accessory_count: Some(1),
            ..SessionParams::default()
        });
        assert_eq!(session.block("Main").unwrap().items.len(), 2);
        assert_eq!(
            exercises(session.block("Accessories").unwrap())[0],
            "Walking Lunge"
        );
    }

    #[test]
    fn test_generate_session_over_budget_trims_accessories_and_finisher() {
        // 8 min warm-up, 9 min main and 8 min finisher alone exceed 22 min.
        let session = generate_session(&SessionParams {
            goal: Goal::GeneralFitness,
            duration_min: 20,
            fitness_level: SkillLevel::Intermediate,
            equipment: equipment(&["Dumbbells"]),
            ..SessionParams::default()
        });
        assert!(session.block("Finisher").is_none());
        assert_eq!(sets(session.block("Accessories").unwrap()), vec![2, 2, 2]);
        assert_eq!(session.target_duration_min, 20);
    }

    #[test]
    fn test_generate_session_under_budget_adds_core() {
        let session = generate_session(&SessionParams {
            goal: Goal::Flexibility,
            duration_min: 120,
            fitness_level: SkillLevel::Beginner,
            equipment: vec![],
            ..SessionParams::default()
        });
        let accessories = session.block("Accessories").unwrap();
        assert_eq!(exercises(accessories), vec!["Plank", "Plank"]);
        assert_eq!(
            accessories.items[1],
            SessionItem::strength("Plank", 2, 12, 45, "Core")
        );
        assert!(session.block("Main").unwrap().items.is_empty());
    }

    #[rstest]
    #[case(5, 20)]
    #[case(45, 45)]
    #[case(200, 120)]
    fn test_generate_session_target_duration_is_clamped(
        #[case] duration_min: u32,
        #[case] expected: u32,
    ) {
        let session = generate_session(&SessionParams {
            duration_min,
            ..SessionParams::default()
        });
        assert_eq!(session.target_duration_min, expected);
    }

    #[test]
    fn test_session_plan_items() {
        let session = generate_session(&SessionParams {
            goal: Goal::GeneralFitness,
            duration_min: 60,
            equipment: equipment(&["Bodyweight"]),
            ..SessionParams::default()
        });
        let items = session.plan_items();
        assert_eq!(items[0].name, "T-Spine Opener");
        assert_eq!(items[0].sets, None);
        assert_eq!(items[2].name, "Air Squat");
        assert_eq!(items[2].sets, Some(3));
        assert_eq!(items[2].reps, Some(Reps::Count(10)));
        let last = items.last().unwrap();
        assert_eq!(last.name, "Burpees");
        assert_eq!(
            last.notes.as_deref(),
            Some("EMOM 8 min: 30s work / 30s rest")
        );
    }

    #[rstest]
    #[case(1, vec!["Legs", "Glutes", "Core"])]
    #[case(2, vec!["Chest", "Back", "Shoulders", "Arms", "Core"])]
    #[case(3, vec!["Full Body", "Core"])]
    #[case(4, vec!["Legs", "Glutes", "Core"])]
    fn test_day_emphasis(#[case] day: u32, #[case] expected: Vec<&str>) {
        assert_eq!(day_emphasis(day), expected);
    }

    #[test]
    fn test_generate_plan() {
        let program = generate_plan(&ProgramParams {
            weeks: 2,
            days_per_week: 5,
            session: SessionParams {
                equipment: equipment(&["Bodyweight"]),
                ..SessionParams::default()
            },
        });
        assert_eq!(program.weeks.len(), 2);
        assert_eq!(program.weeks[1].week, 2);
        assert_eq!(program.weeks[1].days.len(), 5);
        assert_eq!(program.weeks[1].days[4].day, "Week 2 Day 5");
        assert_eq!(program.weeks[0].days[0].session, program.weeks[1].days[0].session);
    }

    #[test]
    fn test_session_serialization() {
        let session = generate_session(&SessionParams::default());
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["goal"], "General Fitness");
        assert_eq!(json["fitness_level"], "Intermediate");
        assert_eq!(json["blocks"][0]["items"][0]["kind"], "timed");
        assert_eq!(
            serde_json::from_value::<Session>(json).unwrap(),
            session
        );
    }
}
