use crate::{PlanExerciseItem, WeekPlan};

pub const MIN_SETS: u32 = 2;
pub const MAX_SETS: u32 = 6;
pub const MAX_BUMP: u32 = 2;

/// Number of leading items per day that are progressed.
const PROGRESSED_ITEMS: usize = 2;

/// Adds up to two sets to the first two items of every day, depending on how many blocks
/// the client has already completed. Afterwards every item carrying sets is within
/// [`MIN_SETS`, `MAX_SETS`].
pub fn apply_progressive_overload(plan: &mut WeekPlan, prior_blocks: usize) {
    if prior_blocks == 0 {
        return;
    }
    let bump = u32::try_from(prior_blocks).map_or(MAX_BUMP, |n| n.min(MAX_BUMP));
    for items in plan.days_mut() {
        bump_sets(items, bump);
    }
}

/// Copy of `plan` progressed by one set, used to derive the follow-up of a saved block.
#[must_use]
pub fn next_block_plan(plan: &WeekPlan) -> WeekPlan {
    let mut next = plan.clone();
    for items in next.days_mut() {
        bump_sets(items, 1);
    }
    next
}

fn bump_sets(items: &mut [PlanExerciseItem], bump: u32) {
    for (i, sets) in items
        .iter_mut()
        .filter_map(|item| item.sets.as_mut())
        .enumerate()
    {
        if i < PROGRESSED_ITEMS {
            *sets = sets.saturating_add(bump);
        }
        *sets = (*sets).clamp(MIN_SETS, MAX_SETS);
    }
}
