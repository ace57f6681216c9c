use std::io::Write;

use chrono::{DateTime, Utc};
use coachplan_domain as domain;

pub static CLIENTS: std::sync::LazyLock<Vec<domain::Client>> =
    std::sync::LazyLock::new(|| vec![CLIENT.clone(), CLIENT_2.clone()]);

pub static CLIENT: std::sync::LazyLock<domain::Client> =
    std::sync::LazyLock::new(|| domain::Client {
        id: 1.into(),
        first_name: String::from("Alice"),
        last_name: String::from("Smith"),
        preferred_name: String::from("Ali"),
        training_age_years: Some(2.0),
        days_per_week: 3,
        session_length_min: 45,
        primary_location: domain::Location::Home,
        space_available: domain::Space::Medium,
        impact_tolerance: domain::Impact::Moderate,
        goals: vec![String::from("Strength")],
        knee_issue: true,
        injuries: vec![domain::Injury {
            region: domain::InjuryRegion::Shoulder,
            description: String::from("Impingement"),
            active: true,
        }],
        equipment: vec![domain::ClientEquipment {
            location: domain::Location::Home,
            category: String::from("Dumbbell"),
        }],
        preferences: vec![domain::Preference {
            kind: domain::PreferenceKind::Exercise,
            value: String::from("Burpee"),
            sentiment: domain::Sentiment::HardNo,
        }],
        ..domain::Client::default()
    });

pub static CLIENT_2: std::sync::LazyLock<domain::Client> =
    std::sync::LazyLock::new(|| domain::Client {
        id: 2.into(),
        first_name: String::from("Bob"),
        last_name: String::from("Jones"),
        ..domain::Client::default()
    });

pub static CREATED_AT: std::sync::LazyLock<DateTime<Utc>> = std::sync::LazyLock::new(|| {
    DateTime::parse_from_rfc3339("2024-03-01T08:30:00Z")
        .unwrap()
        .with_timezone(&Utc)
});

pub static PLAN: std::sync::LazyLock<domain::WeekPlan> = std::sync::LazyLock::new(|| {
    let mut plan = domain::WeekPlan::new();
    plan.push_day(
        "Day 1",
        vec![
            domain::PlanExerciseItem {
                name: String::from("Goblet Squat"),
                movement_pattern: Some(domain::MovementPattern::Squat),
                equipment: Some(String::from("Dumbbell")),
                sets: Some(3),
                reps: Some(domain::Reps::Count(10)),
                rest_s: Some(60),
                notes: Some(String::from("Elbows inside knees, chest up")),
            },
            domain::PlanExerciseItem {
                name: String::from("Ring Row"),
                movement_pattern: Some(domain::MovementPattern::HorizontalPull),
                sets: Some(3),
                reps: Some(domain::Reps::Text(String::from("8-12"))),
                rest_s: Some(60),
                ..domain::PlanExerciseItem::default()
            },
        ],
    );
    plan.push_day(
        "Day 2",
        vec![domain::PlanExerciseItem {
            name: String::from("Romanian Deadlift"),
            movement_pattern: Some(domain::MovementPattern::Hinge),
            sets: Some(4),
            reps: Some(domain::Reps::Count(8)),
            rest_s: Some(90),
            ..domain::PlanExerciseItem::default()
        }],
    );
    plan
});

pub static BLOCK: std::sync::LazyLock<domain::Block> =
    std::sync::LazyLock::new(|| domain::Block {
        id: 1.into(),
        client_id: 1.into(),
        name: Some(domain::Name::new("Spring Block").unwrap()),
        created_at: *CREATED_AT,
        plan: PLAN.clone(),
    });

pub const CATALOG_CSV: &str = "\
Exercise ID,Exercise,Movement Pattern,Equipment,Skill Level,Default Sets,Default Reps,Default Rest (s),Est. Time/Set,Knee-Friendly,Shoulder-Friendly,Back-Friendly,Warm-Up Category,Coaching Cues
MB-001,World's Greatest Stretch,,Bodyweight,Beginner,1,5,0,60,TRUE,TRUE,TRUE,Mobility,Slow and controlled
SQ-002,Goblet Squat,Squat,Dumbbell,Beginner,3,10,60,45,TRUE,TRUE,FALSE,,Elbows inside knees
HG-003,Romanian Deadlift,Hinge,Dumbbell,Intermediate,4,8,90,50,TRUE,TRUE,FALSE,,\"Hips back, soft knees\"
PU-004,Push-up,Horizontal Push,Bodyweight,Beginner,3,10,60,40,TRUE,FALSE,TRUE,,Brace core
PL-005,Ring Row,Horizontal Pull,Suspension Trainer,Beginner,3,8-12,60,40,TRUE,TRUE,TRUE,,
CO-006,Dead Bug,Core – Brace/Anti-Extension,Bodyweight,Beginner,3,10,45,40,TRUE,TRUE,TRUE,,Low back down
PL-007,Pull-up,Vertical Pull,Pull-up Bar,Advanced,3,6,120,40,TRUE,FALSE,TRUE,,
";

/// Writes `content` to a temporary CSV file that lives as long as the returned handle.
pub fn catalog_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
