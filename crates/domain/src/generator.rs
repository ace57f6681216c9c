use std::collections::BTreeMap;

use log::debug;

use crate::{
    Block, Client, ClientID, CreateError, ExerciseRow, Goal, MovementPattern, Name,
    PlanExerciseItem, Profile, ReadError, SessionParams, WeekPlan, WeekPlanResponse,
    apply_progressive_overload, generate_session,
};

pub trait PlanService {
    fn generate_plan_for_client(&self, client_id: ClientID) -> Result<WeekPlanResponse, ReadError>;
    /// Generates a plan and stores it as a new block.
    fn save_plan_for_client(
        &self,
        client_id: ClientID,
        name: Option<Name>,
    ) -> Result<Block, CreateError>;
    fn generate_balanced_plan_for_client(&self, client_id: ClientID)
    -> Result<WeekPlan, ReadError>;
}

/// Patterns scheduled on every day, in order.
pub const DAILY_PATTERNS: [MovementPattern; 5] = [
    MovementPattern::Squat,
    MovementPattern::Hinge,
    MovementPattern::HorizontalPush,
    MovementPattern::HorizontalPull,
    MovementPattern::Core,
];

pub const MAX_WARM_UPS: usize = 2;
pub const WARM_UP_SECONDS: i64 = 5 * 60;
pub const WARM_UP_REST_S: u32 = 30;
/// How far a day may run over its session length.
pub const OVERRUN_SECONDS: i64 = 10 * 60;

/// Rows usable for the given profile, in catalog order.
#[must_use]
pub fn eligible_rows<'a>(profile: &Profile, rows: &'a [ExerciseRow]) -> Vec<&'a ExerciseRow> {
    rows.iter()
        .filter(|row| !profile.dislikes(&row.name))
        .filter(|row| profile.allows_equipment(row.equipment.as_deref()))
        .filter(|row| profile.skill_level.allows(row.skill_level))
        .filter(|row| !profile.require_knee_friendly || row.knee_friendly)
        .filter(|row| !profile.require_shoulder_friendly || row.shoulder_friendly)
        .filter(|row| !profile.require_back_friendly || row.back_friendly)
        .collect()
}

pub(crate) fn buckets<'a>(
    rows: &[&'a ExerciseRow],
) -> BTreeMap<MovementPattern, Vec<&'a ExerciseRow>> {
    let mut buckets = BTreeMap::<MovementPattern, Vec<&ExerciseRow>>::new();
    for row in rows {
        if let Some(pattern) = row.movement_pattern {
            buckets.entry(pattern).or_default().push(row);
        }
    }
    buckets
}

pub(crate) fn session_seconds(profile: &Profile) -> i64 {
    i64::from(profile.session_length_min) * 60
}

impl From<&ExerciseRow> for PlanExerciseItem {
    fn from(row: &ExerciseRow) -> Self {
        PlanExerciseItem {
            name: row.name.clone(),
            movement_pattern: row.movement_pattern,
            equipment: row.equipment.clone(),
            sets: Some(row.default_sets),
            reps: Some(row.default_reps.clone()),
            rest_s: Some(row.default_rest_s),
            notes: row.coaching_cues.clone(),
        }
    }
}

fn warm_up_item(row: &ExerciseRow) -> PlanExerciseItem {
    PlanExerciseItem {
        name: row.name.clone(),
        sets: Some(1),
        reps: Some(row.default_reps.clone()),
        rest_s: Some(WARM_UP_REST_S),
        notes: Some(format!(
            "Warm-up: {}",
            row.warm_up_category.as_deref().unwrap_or_default()
        )),
        ..PlanExerciseItem::default()
    }
}

/// Builds a week from catalog rows, selecting the first eligible row per pattern.
#[must_use]
pub fn generate_catalog_week(profile: &Profile, rows: &[ExerciseRow]) -> WeekPlan {
    let mut plan = WeekPlan::new();
    if rows.is_empty() {
        return plan;
    }

    let eligible = eligible_rows(profile, rows);
    let buckets = buckets(&eligible);
    let warm_ups = eligible
        .iter()
        .filter(|row| row.is_warm_up())
        .take(MAX_WARM_UPS)
        .copied()
        .collect::<Vec<_>>();

    for day in 1..=profile.days_per_week {
        let mut items = vec![];
        let mut remaining = session_seconds(profile);
        let mut scheduled = 0;

        for row in &warm_ups {
            items.push(warm_up_item(row));
            remaining -= WARM_UP_SECONDS;
        }

        for pattern in DAILY_PATTERNS {
            let Some(row) = buckets.get(&pattern).and_then(|bucket| bucket.first()) else {
                continue;
            };
            let cost = i64::from(row.estimated_seconds());
            if remaining - cost < -OVERRUN_SECONDS && scheduled > 0 {
                continue;
            }
            remaining -= cost;
            scheduled += 1;
            items.push(PlanExerciseItem::from(*row));
        }

        plan.push_day(WeekPlan::day_label(day as usize), items);
    }

    let has_pull = plan
        .items()
        .any(|item| item.movement_pattern.is_some_and(MovementPattern::is_pull));
    if !has_pull {
        let pull = [MovementPattern::HorizontalPull, MovementPattern::VerticalPull]
            .iter()
            .find_map(|pattern| buckets.get(pattern).and_then(|bucket| bucket.first()));
        if let Some(row) = pull {
            debug!("adding {} to cover pulling", row.name);
            plan.day_entry(&WeekPlan::day_label(1))
                .push(PlanExerciseItem::from(*row));
        }
    }

    plan
}

/// Builds a week of sessions from the internal exercise library.
#[must_use]
pub fn generate_library_week(profile: &Profile) -> WeekPlan {
    let session = generate_session(&SessionParams {
        goal: Goal::GeneralFitness,
        duration_min: profile.session_length_min,
        fitness_level: profile.skill_level,
        equipment: profile.equipment_allowed.iter().cloned().collect(),
        target_muscles: vec!["Full Body".to_string(), "Core".to_string()],
        ..SessionParams::default()
    });
    let items = session.plan_items();
    let mut plan = WeekPlan::new();
    for day in 1..=profile.days_per_week {
        plan.push_day(WeekPlan::day_label(day as usize), items.clone());
    }
    plan
}

/// Generates the week plan of a client. Without catalog rows the internal exercise library
/// is used. Set counts are progressed by the number of blocks completed before.
#[must_use]
pub fn generate_week_plan(
    client: &Client,
    profile: &Profile,
    rows: &[ExerciseRow],
    prior_blocks: usize,
) -> WeekPlanResponse {
    let mut plan = if rows.is_empty() {
        debug!("no exercise catalog, generating from session library");
        generate_library_week(profile)
    } else {
        generate_catalog_week(profile, rows)
    };
    apply_progressive_overload(&mut plan, prior_blocks);
    WeekPlanResponse {
        client: client.display_name(),
        plan,
    }
}
