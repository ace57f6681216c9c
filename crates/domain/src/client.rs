use derive_more::Deref;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CreateError, DeleteError, ReadError, UpdateError};

pub trait ClientRepository {
    fn read_clients(&self) -> Result<Vec<Client>, ReadError>;
    fn read_client(&self, id: ClientID) -> Result<Client, ReadError>;
    /// Stores a new client. A nil ID is replaced by a freshly generated one.
    fn create_client(&self, client: Client) -> Result<Client, CreateError>;
    fn replace_client(&self, client: Client) -> Result<Client, UpdateError>;
    fn delete_client(&self, id: ClientID) -> Result<ClientID, DeleteError>;
}

pub trait ClientService {
    fn get_clients(&self) -> Result<Vec<Client>, ReadError>;
    fn get_client(&self, id: ClientID) -> Result<Client, ReadError>;
    /// Stores a new client together with its normalized profile.
    fn create_client(&self, client: Client) -> Result<Client, CreateError>;
    /// Replaces a client and regenerates its normalized profile.
    fn replace_client(&self, client: Client) -> Result<Client, UpdateError>;
    /// Deletes a client including its profile and blocks.
    fn delete_client(&self, id: ClientID) -> Result<ClientID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub id: ClientID,
    pub first_name: String,
    pub last_name: String,
    pub preferred_name: String,
    pub training_age_years: Option<f64>,
    pub days_per_week: u32,
    pub session_length_min: u32,
    pub primary_location: Location,
    pub space_available: Space,
    pub impact_tolerance: Impact,
    pub goals: Vec<String>,
    pub power_interest: bool,
    pub knee_issue: bool,
    pub shoulder_issue: bool,
    pub back_issue: bool,
    pub injuries: Vec<Injury>,
    pub equipment: Vec<ClientEquipment>,
    pub preferences: Vec<Preference>,
    pub archived: bool,
}

impl Client {
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.preferred_name.trim().is_empty() {
            format!("{} {}", self.first_name, self.last_name)
                .trim()
                .to_string()
        } else {
            self.preferred_name.trim().to_string()
        }
    }

    #[must_use]
    pub fn has_active_injury(&self, region: InjuryRegion) -> bool {
        self.injuries.iter().any(|i| i.active && i.region == region)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self {
            id: ClientID::nil(),
            first_name: String::new(),
            last_name: String::new(),
            preferred_name: String::new(),
            training_age_years: None,
            days_per_week: 3,
            session_length_min: 60,
            primary_location: Location::Gym,
            space_available: Space::Small,
            impact_tolerance: Impact::Low,
            goals: vec![],
            power_interest: false,
            knee_issue: false,
            shoulder_issue: false,
            back_issue: false,
            injuries: vec![],
            equipment: vec![],
            preferences: vec![],
            archived: false,
        }
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClientID(Uuid);

impl ClientID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ClientID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ClientID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Location {
    Home,
    Gym,
    Outdoor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Space {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Impact {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InjuryRegion {
    Knee,
    Shoulder,
    Back,
    Hip,
    Ankle,
    Wrist,
    Neck,
    Elbow,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Injury {
    pub region: InjuryRegion,
    #[serde(default)]
    pub description: String,
    #[serde(default = "active_default")]
    pub active: bool,
}

fn active_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientEquipment {
    pub location: Location,
    pub category: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PreferenceKind {
    Exercise,
    #[serde(rename = "Movement Pattern")]
    MovementPattern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Like,
    Dislike,
    #[serde(rename = "Hard No")]
    HardNo,
}

impl Sentiment {
    #[must_use]
    pub fn is_negative(self) -> bool {
        matches!(self, Sentiment::Dislike | Sentiment::HardNo)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    pub kind: PreferenceKind,
    pub value: String,
    pub sentiment: Sentiment,
}
