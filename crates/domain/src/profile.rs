use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{
    Client, ClientID, Impact, InjuryRegion, Location, MovementPattern, PreferenceKind, Property,
    ReadError, Sentiment, SkillLevel, Space, UpdateError,
};

/// Cache of normalized profiles. There is at most one profile per client.
pub trait ProfileRepository {
    fn read_profile(&self, client_id: ClientID) -> Result<Option<Profile>, ReadError>;
    fn upsert_profile(&self, client_id: ClientID, profile: Profile)
    -> Result<Profile, UpdateError>;
}

pub trait ProfileService {
    /// Returns the stored profile, normalizing and storing it first if there is none.
    fn get_profile(&self, client_id: ClientID) -> Result<Profile, UpdateError>;
    fn refresh_profile(&self, client_id: ClientID) -> Result<Profile, UpdateError>;
}

pub const MIN_MOVEMENT_WEIGHT: f64 = 0.2;
pub const MAX_MOVEMENT_WEIGHT: f64 = 2.0;

/// Generation-ready view of a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub equipment_allowed: BTreeSet<String>,
    pub location: Location,
    pub space_max: Space,
    pub impact_max: Impact,
    pub require_knee_friendly: bool,
    pub require_shoulder_friendly: bool,
    pub require_back_friendly: bool,
    /// Preference weights per pattern. Not consulted by the generators yet.
    pub movement_weights: BTreeMap<MovementPattern, f64>,
    pub days_per_week: u32,
    pub session_length_min: u32,
    pub target_rpe: String,
    pub skill_level: SkillLevel,
    pub disliked_exercises: Vec<String>,
    pub liked_exercises: Vec<String>,
}

impl Default for Profile {
    fn default() -> Self {
        normalize_profile(&Client::default())
    }
}

impl Profile {
    #[must_use]
    pub fn allows_equipment(&self, equipment: Option<&str>) -> bool {
        equipment.is_none_or(|e| self.equipment_allowed.contains(e))
    }

    #[must_use]
    pub fn dislikes(&self, exercise: &str) -> bool {
        self.disliked_exercises.iter().any(|d| d == exercise)
    }
}

#[must_use]
pub fn normalize_profile(client: &Client) -> Profile {
    let preferences = |kind: PreferenceKind, accept: fn(Sentiment) -> bool| {
        client
            .preferences
            .iter()
            .filter(|p| p.kind == kind && accept(p.sentiment))
            .map(|p| p.value.clone())
            .collect::<Vec<_>>()
    };

    Profile {
        equipment_allowed: equipment_allowed(client),
        location: client.primary_location,
        space_max: client.space_available,
        impact_max: client.impact_tolerance,
        require_knee_friendly: client.knee_issue || client.has_active_injury(InjuryRegion::Knee),
        require_shoulder_friendly: client.shoulder_issue
            || client.has_active_injury(InjuryRegion::Shoulder),
        require_back_friendly: client.back_issue || client.has_active_injury(InjuryRegion::Back),
        movement_weights: movement_weights(client),
        days_per_week: if client.days_per_week == 0 {
            3
        } else {
            client.days_per_week
        },
        session_length_min: if client.session_length_min == 0 {
            60
        } else {
            client.session_length_min
        },
        target_rpe: "7-9".to_string(),
        skill_level: SkillLevel::from_training_age(client.training_age_years),
        disliked_exercises: preferences(PreferenceKind::Exercise, Sentiment::is_negative),
        liked_exercises: preferences(PreferenceKind::Exercise, |s| s == Sentiment::Like),
    }
}

fn equipment_allowed(client: &Client) -> BTreeSet<String> {
    let categories = client
        .equipment
        .iter()
        .map(|e| e.category.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>();
    if categories.is_empty() {
        BTreeSet::from(["Bodyweight".to_string()])
    } else {
        categories
    }
}

fn movement_weights(client: &Client) -> BTreeMap<MovementPattern, f64> {
    let mut weights = MovementPattern::iter()
        .map(|p| {
            let base = match p {
                MovementPattern::JumpPower if client.power_interest => 0.8,
                MovementPattern::JumpPower => 0.6,
                _ => 1.0,
            };
            (*p, base)
        })
        .collect::<BTreeMap<_, _>>();

    for preference in client
        .preferences
        .iter()
        .filter(|p| p.kind == PreferenceKind::MovementPattern)
    {
        let Some(pattern) = MovementPattern::parse(&preference.value) else {
            continue;
        };
        let delta: f64 = match preference.sentiment {
            Sentiment::Like => 0.2,
            Sentiment::Dislike | Sentiment::HardNo => -0.4,
        };
        let weight = weights.entry(pattern).or_insert(1.0);
        *weight = (*weight + delta).clamp(MIN_MOVEMENT_WEIGHT, MAX_MOVEMENT_WEIGHT);
    }

    weights
}
