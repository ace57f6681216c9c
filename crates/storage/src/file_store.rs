//! JSON file store.
//!
//! Layout below the data directory:
//!
//! - `clients/<client>.json`
//! - `profiles/<client>.json`
//! - `blocks/<client>/<block>.json`

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use coachplan_domain as domain;
use log::warn;
use serde::{Serialize, de::DeserializeOwned};
use strum::AsRefStr;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn dir(&self, store: Store) -> PathBuf {
        self.root.join(store.as_ref())
    }

    fn client_path(&self, id: domain::ClientID) -> PathBuf {
        self.dir(Store::Clients).join(format!("{}.json", *id))
    }

    fn profile_path(&self, client_id: domain::ClientID) -> PathBuf {
        self.dir(Store::Profiles).join(format!("{}.json", *client_id))
    }

    fn blocks_dir(&self, client_id: domain::ClientID) -> PathBuf {
        self.dir(Store::Blocks).join((*client_id).to_string())
    }

    fn block_path(&self, client_id: domain::ClientID, id: domain::BlockID) -> PathBuf {
        self.blocks_dir(client_id).join(format!("{}.json", *id))
    }

    fn read<V: DeserializeOwned>(path: &Path) -> Result<V, domain::StorageError> {
        let content = fs::read(path).map_err(storage_error)?;
        serde_json::from_slice(&content).map_err(|err| domain::StorageError::Other(err.into()))
    }

    /// Reads every JSON file of a directory. Unreadable files are skipped.
    fn read_all<V: DeserializeOwned>(dir: &Path) -> Result<Vec<V>, domain::StorageError> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(vec![]),
            Err(err) => return Err(err.into()),
        };
        let mut paths = entries
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()?;
        paths.retain(|path| path.extension().is_some_and(|ext| ext == "json"));
        paths.sort();

        let mut values = vec![];
        for path in paths {
            match Self::read(&path) {
                Ok(value) => values.push(value),
                Err(err) => warn!("skipping {}: {err}", path.display()),
            }
        }
        Ok(values)
    }

    fn write<V: Serialize>(path: &Path, value: &V) -> Result<(), domain::StorageError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_vec_pretty(value)
            .map_err(|err| domain::StorageError::Other(err.into()))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Writes a new file, failing with `AlreadyExists` if it is present.
    fn write_new<V: Serialize>(path: &Path, value: &V) -> Result<(), io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = fs::File::create_new(path)?;
        serde_json::to_writer_pretty(file, value).map_err(io::Error::other)
    }

    fn remove(path: &Path) -> Result<(), domain::StorageError> {
        fs::remove_file(path).map_err(storage_error)
    }
}

fn storage_error(err: io::Error) -> domain::StorageError {
    if err.kind() == io::ErrorKind::NotFound {
        domain::StorageError::NotFound
    } else {
        domain::StorageError::Io(err)
    }
}

fn ignore_not_found(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        result => result,
    }
}

impl domain::ClientRepository for FileStore {
    fn read_clients(&self) -> Result<Vec<domain::Client>, domain::ReadError> {
        let mut clients = Self::read_all::<Client>(&self.dir(Store::Clients))?
            .into_iter()
            .map(domain::Client::from)
            .collect::<Vec<_>>();
        clients.sort_by(|a, b| {
            a.display_name()
                .cmp(&b.display_name())
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(clients)
    }

    fn read_client(&self, id: domain::ClientID) -> Result<domain::Client, domain::ReadError> {
        Ok(Self::read::<Client>(&self.client_path(id))?.into())
    }

    fn create_client(
        &self,
        client: domain::Client,
    ) -> Result<domain::Client, domain::CreateError> {
        let client = if client.id.is_nil() {
            domain::Client {
                id: Uuid::new_v4().into(),
                ..client
            }
        } else {
            client
        };
        match Self::write_new(&self.client_path(client.id), &Client::from(&client)) {
            Ok(()) => Ok(client),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                Err(domain::CreateError::Conflict)
            }
            Err(err) => Err(domain::StorageError::Io(err).into()),
        }
    }

    fn replace_client(
        &self,
        client: domain::Client,
    ) -> Result<domain::Client, domain::UpdateError> {
        let path = self.client_path(client.id);
        if !path.is_file() {
            return Err(domain::StorageError::NotFound.into());
        }
        Self::write(&path, &Client::from(&client))?;
        Ok(client)
    }

    fn delete_client(
        &self,
        id: domain::ClientID,
    ) -> Result<domain::ClientID, domain::DeleteError> {
        Self::remove(&self.client_path(id))?;
        ignore_not_found(fs::remove_file(self.profile_path(id)))
            .map_err(domain::StorageError::from)?;
        ignore_not_found(fs::remove_dir_all(self.blocks_dir(id)))
            .map_err(domain::StorageError::from)?;
        Ok(id)
    }
}

impl domain::ProfileRepository for FileStore {
    fn read_profile(
        &self,
        client_id: domain::ClientID,
    ) -> Result<Option<domain::Profile>, domain::ReadError> {
        match Self::read(&self.profile_path(client_id)) {
            Ok(profile) => Ok(Some(profile)),
            Err(domain::StorageError::NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn upsert_profile(
        &self,
        client_id: domain::ClientID,
        profile: domain::Profile,
    ) -> Result<domain::Profile, domain::UpdateError> {
        Self::write(&self.profile_path(client_id), &profile)?;
        Ok(profile)
    }
}

impl domain::BlockRepository for FileStore {
    fn read_blocks(
        &self,
        client_id: domain::ClientID,
    ) -> Result<Vec<domain::Block>, domain::ReadError> {
        let mut blocks = vec![];
        for block in Self::read_all::<Block>(&self.blocks_dir(client_id))? {
            match domain::Block::try_from(block) {
                Ok(block) if block.client_id == client_id => blocks.push(block),
                Ok(block) => warn!("block {} belongs to another client", *block.id),
                Err(err) => warn!("skipping invalid block: {err}"),
            }
        }
        blocks.sort_by_key(|block| block.created_at);
        Ok(blocks)
    }

    fn read_block(
        &self,
        client_id: domain::ClientID,
        id: domain::BlockID,
    ) -> Result<domain::Block, domain::ReadError> {
        let block = domain::Block::try_from(Self::read::<Block>(&self.block_path(client_id, id))?)
            .map_err(|err| domain::ReadError::Other(Box::new(err)))?;
        if block.client_id != client_id {
            return Err(domain::StorageError::NotFound.into());
        }
        Ok(block)
    }

    fn create_block(
        &self,
        client_id: domain::ClientID,
        name: Option<domain::Name>,
        plan: domain::WeekPlan,
    ) -> Result<domain::Block, domain::CreateError> {
        let block = domain::Block {
            id: Uuid::new_v4().into(),
            client_id,
            name,
            created_at: Utc::now(),
            plan,
        };
        match Self::write_new(&self.block_path(client_id, block.id), &Block::from(&block)) {
            Ok(()) => Ok(block),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                Err(domain::CreateError::Conflict)
            }
            Err(err) => Err(domain::StorageError::Io(err).into()),
        }
    }

    fn delete_block(
        &self,
        client_id: domain::ClientID,
        id: domain::BlockID,
    ) -> Result<domain::BlockID, domain::DeleteError> {
        Self::remove(&self.block_path(client_id, id))?;
        Ok(id)
    }
}

#[derive(AsRefStr, Debug, Clone, Copy)]
pub enum Store {
    #[strum(serialize = "clients")]
    Clients,
    #[strum(serialize = "profiles")]
    Profiles,
    #[strum(serialize = "blocks")]
    Blocks,
}

/// Stored client record. Every field is optional when reading, so the same shape is used
/// to import hand-written client files.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Client {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub preferred_name: String,
    pub training_age_years: Option<f64>,
    pub days_per_week: u32,
    pub session_length_min: u32,
    pub primary_location: domain::Location,
    pub space_available: domain::Space,
    pub impact_tolerance: domain::Impact,
    pub goals: Vec<String>,
    pub power_interest: bool,
    pub knee_issue: bool,
    pub shoulder_issue: bool,
    pub back_issue: bool,
    pub injuries: Vec<domain::Injury>,
    pub equipment: Vec<domain::ClientEquipment>,
    pub preferences: Vec<domain::Preference>,
    pub archived: bool,
}

impl Default for Client {
    fn default() -> Self {
        Self::from(domain::Client::default())
    }
}

impl From<domain::Client> for Client {
    fn from(value: domain::Client) -> Self {
        Self::from(&value)
    }
}

impl From<&domain::Client> for Client {
    fn from(value: &domain::Client) -> Self {
        Self {
            id: *value.id,
            first_name: value.first_name.clone(),
            last_name: value.last_name.clone(),
            preferred_name: value.preferred_name.clone(),
            training_age_years: value.training_age_years,
            days_per_week: value.days_per_week,
            session_length_min: value.session_length_min,
            primary_location: value.primary_location,
            space_available: value.space_available,
            impact_tolerance: value.impact_tolerance,
            goals: value.goals.clone(),
            power_interest: value.power_interest,
            knee_issue: value.knee_issue,
            shoulder_issue: value.shoulder_issue,
            back_issue: value.back_issue,
            injuries: value.injuries.clone(),
            equipment: value.equipment.clone(),
            preferences: value.preferences.clone(),
            archived: value.archived,
        }
    }
}

impl From<Client> for domain::Client {
    fn from(value: Client) -> Self {
        Self {
            id: value.id.into(),
            first_name: value.first_name,
            last_name: value.last_name,
            preferred_name: value.preferred_name,
            training_age_years: value.training_age_years,
            days_per_week: value.days_per_week,
            session_length_min: value.session_length_min,
            primary_location: value.primary_location,
            space_available: value.space_available,
            impact_tolerance: value.impact_tolerance,
            goals: value.goals,
            power_interest: value.power_interest,
            knee_issue: value.knee_issue,
            shoulder_issue: value.shoulder_issue,
            back_issue: value.back_issue,
            injuries: value.injuries,
            equipment: value.equipment,
            preferences: value.preferences,
            archived: value.archived,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Block {
    pub id: Uuid,
    pub client_id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub plan: domain::WeekPlan,
}

impl From<&domain::Block> for Block {
    fn from(value: &domain::Block) -> Self {
        Self {
            id: *value.id,
            client_id: *value.client_id,
            name: value.name.as_ref().map(ToString::to_string),
            created_at: value.created_at,
            plan: value.plan.clone(),
        }
    }
}

impl TryFrom<Block> for domain::Block {
    type Error = domain::NameError;

    fn try_from(value: Block) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            client_id: value.client_id.into(),
            name: value
                .name
                .filter(|name| !name.trim().is_empty())
                .map(|name| domain::Name::new(&name))
                .transpose()?,
            created_at: value.created_at,
            plan: value.plan,
        })
    }
}
