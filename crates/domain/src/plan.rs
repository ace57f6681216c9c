use std::fmt;

use chrono::{DateTime, Utc};
use derive_more::Deref;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, SeqAccess, Visitor},
    ser::SerializeMap,
};
use uuid::Uuid;

use crate::{ClientID, CreateError, DeleteError, MovementPattern, Name, ReadError};

pub trait BlockRepository {
    fn read_blocks(&self, client_id: ClientID) -> Result<Vec<Block>, ReadError>;
    fn read_block(&self, client_id: ClientID, id: BlockID) -> Result<Block, ReadError>;
    fn create_block(
        &self,
        client_id: ClientID,
        name: Option<Name>,
        plan: WeekPlan,
    ) -> Result<Block, CreateError>;
    fn delete_block(&self, client_id: ClientID, id: BlockID) -> Result<BlockID, DeleteError>;

    fn count_blocks(&self, client_id: ClientID) -> Result<usize, ReadError> {
        Ok(self.read_blocks(client_id)?.len())
    }
}

pub trait BlockService {
    /// Returns the blocks of a client, newest first.
    fn get_blocks(&self, client_id: ClientID) -> Result<Vec<Block>, ReadError>;
    fn get_block(&self, client_id: ClientID, id: BlockID) -> Result<Block, ReadError>;
    /// Stores a plan as a new block. Unnamed blocks are named after the client.
    fn save_block(
        &self,
        client_id: ClientID,
        name: Option<Name>,
        plan: WeekPlan,
    ) -> Result<Block, CreateError>;
    fn delete_block(&self, client_id: ClientID, id: BlockID) -> Result<BlockID, DeleteError>;
    /// Stores a copy of a block with one more set on the leading exercises of each day.
    fn next_block(
        &self,
        client_id: ClientID,
        id: BlockID,
        name: Option<Name>,
    ) -> Result<Block, CreateError>;
}

/// A persisted snapshot of a week plan.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: BlockID,
    pub client_id: ClientID,
    pub name: Option<Name>,
    pub created_at: DateTime<Utc>,
    pub plan: WeekPlan,
}

impl Block {
    #[must_use]
    pub fn title(&self) -> String {
        match &self.name {
            Some(name) => name.to_string(),
            None => format!("Block {}", *self.id),
        }
    }

    /// File name stem used for exports.
    #[must_use]
    pub fn export_stem(&self) -> String {
        match &self.name {
            Some(name) => name.as_ref().replace(' ', "_"),
            None => format!("plan_{}", *self.id),
        }
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BlockID(Uuid);

impl BlockID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for BlockID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for BlockID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Repetitions are a plain count for most exercises, but catalogs also carry ranges and
/// timed prescriptions such as "8-12" or "5-10 minutes".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reps {
    Count(u32),
    Text(String),
}

impl Reps {
    #[must_use]
    pub fn parse(text: &str, default: u32) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return Reps::Count(default);
        }
        match text.parse::<u32>() {
            Ok(count) => Reps::Count(count),
            Err(_) => Reps::Text(text.to_string()),
        }
    }

    #[must_use]
    pub fn count(&self) -> Option<u32> {
        match self {
            Reps::Count(count) => Some(*count),
            Reps::Text(_) => None,
        }
    }
}

impl Default for Reps {
    fn default() -> Self {
        Reps::Count(0)
    }
}

impl fmt::Display for Reps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reps::Count(count) => write!(f, "{count}"),
            Reps::Text(text) => write!(f, "{text}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanExerciseItem {
    #[serde(alias = "exercise", default = "default_item_name")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "lenient_pattern",
        skip_serializing_if = "Option::is_none"
    )]
    pub movement_pattern: Option<MovementPattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<Reps>,
    #[serde(alias = "rest", default, skip_serializing_if = "Option::is_none")]
    pub rest_s: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn default_item_name() -> String {
    "Exercise".to_string()
}

fn lenient_pattern<'de, D>(deserializer: D) -> Result<Option<MovementPattern>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .as_deref()
        .and_then(MovementPattern::parse))
}

/// Day label to exercises, in generation order.
///
/// Serialized as a JSON object. Blocks written by older versions stored the days as an
/// array of arrays; that shape is still accepted when reading and gets labelled
/// "Day 1".."Day N".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeekPlan {
    days: Vec<(String, Vec<PlanExerciseItem>)>,
}

impl WeekPlan {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn day_label(day: usize) -> String {
        format!("Day {day}")
    }

    /// Appends a day, replacing the items of an existing day with the same label.
    pub fn push_day(&mut self, label: impl Into<String>, items: Vec<PlanExerciseItem>) {
        let label = label.into();
        match self.days.iter_mut().find(|(l, _)| *l == label) {
            Some((_, existing)) => *existing = items,
            None => self.days.push((label, items)),
        }
    }

    #[must_use]
    pub fn day(&self, label: &str) -> Option<&[PlanExerciseItem]> {
        self.days
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, items)| items.as_slice())
    }

    /// Returns the items of a day, creating the day at the end if it is missing.
    pub fn day_entry(&mut self, label: &str) -> &mut Vec<PlanExerciseItem> {
        let index = match self.days.iter().position(|(l, _)| l == label) {
            Some(index) => index,
            None => {
                self.days.push((label.to_string(), vec![]));
                self.days.len() - 1
            }
        };
        &mut self.days[index].1
    }

    pub fn days(&self) -> impl Iterator<Item = (&str, &[PlanExerciseItem])> {
        self.days
            .iter()
            .map(|(label, items)| (label.as_str(), items.as_slice()))
    }

    pub fn days_mut(&mut self) -> impl Iterator<Item = &mut Vec<PlanExerciseItem>> {
        self.days.iter_mut().map(|(_, items)| items)
    }

    pub fn items(&self) -> impl Iterator<Item = &PlanExerciseItem> {
        self.days.iter().flat_map(|(_, items)| items.iter())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl Serialize for WeekPlan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for (label, items) in &self.days {
            map.serialize_entry(label, items)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for WeekPlan {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(WeekPlanVisitor)
    }
}

struct WeekPlanVisitor;

impl<'de> Visitor<'de> for WeekPlanVisitor {
    type Value = WeekPlan;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of day labels to exercises or a list of days")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<WeekPlan, A::Error> {
        let mut plan = WeekPlan::new();
        while let Some((label, items)) = access.next_entry::<String, Vec<PlanExerciseItem>>()? {
            plan.push_day(label, items);
        }
        Ok(plan)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<WeekPlan, A::Error> {
        let mut plan = WeekPlan::new();
        let mut day = 1;
        while let Some(items) = access.next_element::<Vec<PlanExerciseItem>>()? {
            plan.push_day(WeekPlan::day_label(day), items);
            day += 1;
        }
        Ok(plan)
    }
}

/// A generated week plan together with the name of the client it was made for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekPlanResponse {
    pub client: String,
    pub plan: WeekPlan,
}
