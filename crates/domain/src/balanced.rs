use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::{
    ExerciseRow, MovementPattern, PlanExerciseItem, Profile, Reps, WeekPlan,
    generator::{buckets, eligible_rows, session_seconds},
};

use crate::MovementPattern::{
    CarryGait as Carry, Conditioning as Cond, Core, Hinge, HorizontalPull as HPl,
    HorizontalPush as HPu, Lunge, Squat, VerticalPull as VPl, VerticalPush as VPu,
};

const THREE_DAY_SPLIT: &[&[MovementPattern]] = &[
    &[Squat, HPu, HPl, Core],
    &[Hinge, VPu, VPl, Core],
    &[Lunge, HPu, HPl, Carry],
];

const FOUR_DAY_SPLIT: &[&[MovementPattern]] = &[
    &[Squat, HPu, HPl, Core],
    &[Hinge, VPu, VPl],
    &[Lunge, HPu, HPl, Carry],
    &[Squat, VPu, VPl, Core],
];

const FIVE_DAY_SPLIT: &[&[MovementPattern]] = &[
    &[Squat, HPu, HPl],
    &[Hinge, VPl, Core],
    &[Lunge, HPu, Carry],
    &[Squat, VPu, HPl],
    &[Hinge, VPl, Core, Cond],
];

const ALTERNATING_SPLIT: &[&[MovementPattern]] =
    &[&[Squat, HPu, HPl, Core], &[Hinge, VPu, VPl, Core]];

const WARM_UP_SECONDS: i64 = 10 * 60;
const WARM_UP_REPS: &str = "5-10 minutes";
const OVERRUN_SECONDS: i64 = 10 * 60;

/// Day templates for the given number of training days.
#[must_use]
pub fn split(days_per_week: u32) -> Vec<&'static [MovementPattern]> {
    match days_per_week {
        3 => THREE_DAY_SPLIT.to_vec(),
        4 => FOUR_DAY_SPLIT.to_vec(),
        5 => FIVE_DAY_SPLIT.to_vec(),
        n => ALTERNATING_SPLIT
            .iter()
            .copied()
            .cycle()
            .take(n as usize)
            .collect(),
    }
}

/// Builds a week from day templates, preferring exercises not used earlier in the week.
#[must_use]
pub fn generate_balanced_week_plan(profile: &Profile, rows: &[ExerciseRow]) -> WeekPlan {
    let mut plan = WeekPlan::new();
    if rows.is_empty() {
        return plan;
    }

    let eligible = eligible_rows(profile, rows);
    let buckets = buckets(&eligible);
    let warm_up = eligible.iter().find(|row| row.is_warm_up());
    let mut used = HashSet::<&str>::new();

    for (day, patterns) in split(profile.days_per_week).into_iter().enumerate() {
        let mut items = vec![];
        let mut remaining = session_seconds(profile);

        if let Some(row) = warm_up {
            if remaining > WARM_UP_SECONDS {
                items.push(PlanExerciseItem {
                    name: row.name.clone(),
                    sets: Some(1),
                    reps: Some(Reps::Text(WARM_UP_REPS.to_string())),
                    rest_s: Some(0),
                    notes: Some(format!(
                        "Warm-up: {}",
                        row.warm_up_category.as_deref().unwrap_or("General")
                    )),
                    ..PlanExerciseItem::default()
                });
                remaining -= WARM_UP_SECONDS;
            }
        }

        for pattern in patterns {
            let Some(bucket) = buckets.get(pattern) else {
                continue;
            };
            let Some(row) = bucket
                .iter()
                .find(|row| !used.contains(row.name.as_str()))
                .or_else(|| bucket.first())
            else {
                continue;
            };
            used.insert(row.name.as_str());

            let cost = i64::from(row.estimated_seconds());
            if remaining - cost < -OVERRUN_SECONDS && items.len() > 1 {
                continue;
            }
            remaining -= cost;
            items.push(PlanExerciseItem {
                movement_pattern: Some(*pattern),
                ..PlanExerciseItem::from(*row)
            });
        }

        plan.push_day(WeekPlan::day_label(day + 1), items);
    }

    plan
}

/// Aggregate counts over a finished plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeSummary {
    pub total_exercises: usize,
    pub total_sets: u32,
    pub avg_exercises_per_day: f64,
    pub patterns_count: usize,
    pub equipment_count: usize,
    pub patterns: Vec<String>,
    pub equipment: Vec<String>,
}

#[must_use]
pub fn volume_summary(plan: &WeekPlan) -> VolumeSummary {
    let total_exercises = plan.items().count();
    let patterns = plan
        .items()
        .filter_map(|item| item.movement_pattern)
        .map(|pattern| pattern.to_string())
        .collect::<BTreeSet<_>>();
    let equipment = plan
        .items()
        .filter_map(|item| item.equipment.clone())
        .filter(|e| !e.is_empty())
        .collect::<BTreeSet<_>>();

    VolumeSummary {
        total_exercises,
        total_sets: plan.items().filter_map(|item| item.sets).sum(),
        avg_exercises_per_day: if plan.is_empty() {
            0.0
        } else {
            total_exercises as f64 / plan.len() as f64
        },
        patterns_count: patterns.len(),
        equipment_count: equipment.len(),
        patterns: patterns.into_iter().collect(),
        equipment: equipment.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::generator::tests::{profile, row};

    fn names(plan: &WeekPlan, day: &str) -> Vec<String> {
        plan.day(day)
            .unwrap()
            .iter()
            .map(|item| item.name.clone())
            .collect()
    }

    #[rstest]
    #[case(1, vec![4])]
    #[case(2, vec![4, 4])]
    #[case(3, vec![4, 4, 4])]
    #[case(4, vec![4, 3, 4, 4])]
    #[case(5, vec![3, 3, 3, 3, 4])]
    #[case(6, vec![4, 4, 4, 4, 4, 4])]
    #[case(7, vec![4, 4, 4, 4, 4, 4, 4])]
    fn test_split(#[case] days_per_week: u32, #[case] lengths: Vec<usize>) {
        assert_eq!(
            split(days_per_week)
                .iter()
                .map(|day| day.len())
                .collect::<Vec<_>>(),
            lengths
        );
    }

    #[test]
    fn test_split_alternates() {
        let days = split(6);
        assert_eq!(days[0][0], Squat);
        assert_eq!(days[1][0], Hinge);
        assert_eq!(days[4][0], Squat);
        assert_eq!(days[5][0], Hinge);
        assert!(split(0).is_empty());
    }

    #[test]
    fn test_generate_balanced_week_plan_prefers_unused() {
        let catalog = vec![
            row("Back Squat", Squat),
            row("Front Squat", Squat),
            row("Push-up", HPu),
            row("Row", HPl),
            row("Plank", Core),
            row("Deadlift", Hinge),
            row("Overhead Press", VPu),
            row("Pull-up", VPl),
            row("Split Squat", Lunge),
            row("Farmer Carry", Carry),
        ];
        let plan = generate_balanced_week_plan(&profile(3, 90), &catalog);
        assert_eq!(
            names(&plan, "Day 1"),
            vec!["Back Squat", "Push-up", "Row", "Plank"]
        );
        assert_eq!(
            names(&plan, "Day 2"),
            vec!["Deadlift", "Overhead Press", "Pull-up", "Plank"]
        );
        assert_eq!(
            names(&plan, "Day 3"),
            vec!["Split Squat", "Push-up", "Row", "Farmer Carry"]
        );
        let day = plan.day("Day 4");
        assert_eq!(day, None);
    }

    #[test]
    fn test_generate_balanced_week_plan_rotates_bucket() {
        let catalog = vec![
            row("Back Squat", Squat),
            row("Front Squat", Squat),
            row("Goblet Squat", Squat),
        ];
        let plan = generate_balanced_week_plan(&profile(4, 90), &catalog);
        assert_eq!(names(&plan, "Day 1"), vec!["Back Squat"]);
        assert!(names(&plan, "Day 2").is_empty());
        assert_eq!(names(&plan, "Day 4"), vec!["Front Squat"]);
    }

    #[test]
    fn test_generate_balanced_week_plan_items() {
        let catalog = vec![
            ExerciseRow {
                warm_up_category: Some("Mobility".to_string()),
                movement_pattern: None,
                ..row("World's Greatest Stretch", Squat)
            },
            ExerciseRow {
                equipment: Some("Bodyweight".to_string()),
                default_reps: Reps::Text("8-12".to_string()),
                coaching_cues: Some("Sit back".to_string()),
                ..row("Air Squat", Squat)
            },
        ];
        let plan = generate_balanced_week_plan(&profile(3, 60), &catalog);
        let day = plan.day("Day 1").unwrap();
        assert_eq!(
            day[0],
            PlanExerciseItem {
                name: "World's Greatest Stretch".to_string(),
                sets: Some(1),
                reps: Some(Reps::Text("5-10 minutes".to_string())),
                rest_s: Some(0),
                notes: Some("Warm-up: Mobility".to_string()),
                ..PlanExerciseItem::default()
            }
        );
        assert_eq!(
            day[1],
            PlanExerciseItem {
                name: "Air Squat".to_string(),
                movement_pattern: Some(Squat),
                equipment: Some("Bodyweight".to_string()),
                sets: Some(3),
                reps: Some(Reps::Text("8-12".to_string())),
                rest_s: Some(60),
                notes: Some("Sit back".to_string()),
            }
        );
    }

    #[test]
    fn test_generate_balanced_week_plan_short_session_has_no_warm_up() {
        let catalog = vec![
            ExerciseRow {
                warm_up_category: Some("Mobility".to_string()),
                ..row("Bodyweight Squat", Squat)
            },
        ];
        let plan = generate_balanced_week_plan(&profile(3, 10), &catalog);
        assert_eq!(names(&plan, "Day 1"), vec!["Bodyweight Squat"]);
        assert_eq!(
            plan.day("Day 1").unwrap()[0].notes.as_deref(),
            None
        );
    }

    #[test]
    fn test_generate_balanced_week_plan_budget() {
        // Each exercise costs 6 min of a 15 min session with a 10 min warm-up
        let catalog = vec![
            ExerciseRow {
                warm_up_category: Some("Mobility".to_string()),
                movement_pattern: None,
                ..row("Jumping Jacks", Squat)
            },
            row("Back Squat", Squat),
            row("Push-up", HPu),
            row("Row", HPl),
            row("Plank", Core),
        ];
        let plan = generate_balanced_week_plan(&profile(3, 15), &catalog);
        assert_eq!(
            names(&plan, "Day 1"),
            vec!["Jumping Jacks", "Back Squat", "Push-up"]
        );
    }

    #[test]
    fn test_generate_balanced_week_plan_empty_catalog() {
        assert!(generate_balanced_week_plan(&profile(3, 60), &[]).is_empty());
    }

    #[test]
    fn test_generate_balanced_week_plan_is_deterministic() {
        let catalog = vec![row("Back Squat", Squat), row("Row", HPl)];
        assert_eq!(
            generate_balanced_week_plan(&profile(5, 45), &catalog),
            generate_balanced_week_plan(&profile(5, 45), &catalog)
        );
    }

    #[test]
    fn test_volume_summary() {
        let catalog = vec![
            ExerciseRow {
                equipment: Some("Bodyweight".to_string()),
                ..row("Push-up", HPu)
            },
            row("Row", HPl),
        ];
        let plan = generate_balanced_week_plan(&profile(3, 60), &catalog);
        assert_eq!(
            volume_summary(&plan),
            VolumeSummary {
                total_exercises: 4,
                total_sets: 12,
                avg_exercises_per_day: 4.0 / 3.0,
                patterns_count: 2,
                equipment_count: 1,
                patterns: vec!["Horizontal Pull".to_string(), "Horizontal Push".to_string()],
                equipment: vec!["Bodyweight".to_string()],
            }
        );
    }

    #[test]
    fn test_volume_summary_empty_plan() {
        let summary = volume_summary(&WeekPlan::new());
        assert_eq!(summary.total_exercises, 0);
        assert_eq!(summary.avg_exercises_per_day, 0.0);
    }
}
