use log::{debug, error};

use crate::{
    Block, BlockID, BlockRepository, BlockService, BuiltinCatalog, CANONICAL_COLUMNS,
    CatalogProvider, Client, ClientID, ClientRepository, ClientService, CreateError, DeleteError,
    ExerciseListing, ExerciseService, Name, PlanService, Profile, ProfileRepository,
    ProfileService, ReadError, UpdateError, WeekPlan, WeekPlanResponse,
    generate_balanced_week_plan, generate_week_plan, next_block_plan, normalize_profile,
};

pub struct Service<R, C> {
    repository: R,
    catalog: C,
}

impl<R, C> Service<R, C>
where
    R: ClientRepository + ProfileRepository + BlockRepository,
    C: CatalogProvider,
{
    pub fn new(repository: R, catalog: C) -> Self {
        Self {
            repository,
            catalog,
        }
    }

    fn store_profile(&self, client: &Client) -> Result<Profile, UpdateError> {
        self.repository
            .upsert_profile(client.id, normalize_profile(client))
    }

    fn cached_profile(&self, client: &Client) -> Result<Profile, ReadError> {
        Ok(self
            .repository
            .read_profile(client.id)?
            .unwrap_or_else(|| normalize_profile(client)))
    }

    fn default_block_name(client: &Client) -> Option<Name> {
        Name::new(&format!("Plan {}", client.display_name())).ok()
    }

    fn create_client_with_profile(&self, client: Client) -> Result<Client, CreateError> {
        let client = self.repository.create_client(client)?;
        self.store_profile(&client)?;
        Ok(client)
    }

    fn replace_client_with_profile(&self, client: Client) -> Result<Client, UpdateError> {
        let client = self.repository.replace_client(client)?;
        self.store_profile(&client)?;
        Ok(client)
    }

    fn read_or_store_profile(&self, client_id: ClientID) -> Result<Profile, UpdateError> {
        match self.repository.read_profile(client_id)? {
            Some(profile) => Ok(profile),
            None => self.store_profile(&self.repository.read_client(client_id)?),
        }
    }

    fn refresh(&self, client_id: ClientID) -> Result<Profile, UpdateError> {
        self.store_profile(&self.repository.read_client(client_id)?)
    }

    fn generate(&self, client_id: ClientID) -> Result<WeekPlanResponse, ReadError> {
        let client = self.repository.read_client(client_id)?;
        let profile = self.cached_profile(&client)?;
        let prior_blocks = self.repository.count_blocks(client_id)?;
        Ok(generate_week_plan(
            &client,
            &profile,
            &self.catalog.load_catalog(),
            prior_blocks,
        ))
    }

    fn generate_and_save(
        &self,
        client_id: ClientID,
        name: Option<Name>,
    ) -> Result<Block, CreateError> {
        let client = self.repository.read_client(client_id)?;
        let response = self.generate(client_id)?;
        self.repository.create_block(
            client_id,
            name.or_else(|| Self::default_block_name(&client)),
            response.plan,
        )
    }

    fn generate_balanced(&self, client_id: ClientID) -> Result<WeekPlan, ReadError> {
        let client = self.repository.read_client(client_id)?;
        let profile = self.cached_profile(&client)?;
        Ok(generate_balanced_week_plan(
            &profile,
            &self.catalog.load_catalog(),
        ))
    }

    fn read_blocks_newest_first(&self, client_id: ClientID) -> Result<Vec<Block>, ReadError> {
        let mut blocks = self.repository.read_blocks(client_id)?;
        blocks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(blocks)
    }

    fn save(
        &self,
        client_id: ClientID,
        name: Option<Name>,
        plan: WeekPlan,
    ) -> Result<Block, CreateError> {
        let name = match name {
            Some(name) => Some(name),
            None => Self::default_block_name(&self.repository.read_client(client_id)?),
        };
        self.repository.create_block(client_id, name, plan)
    }

    fn progress(
        &self,
        client_id: ClientID,
        id: BlockID,
        name: Option<Name>,
    ) -> Result<Block, CreateError> {
        let block = self.repository.read_block(client_id, id)?;
        let name = name.or_else(|| Name::new(&format!("Next of {}", block.title())).ok());
        self.repository
            .create_block(client_id, name, next_block_plan(&block.plan))
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NotFound) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R, C> ClientService for Service<R, C>
where
    R: ClientRepository + ProfileRepository + BlockRepository,
    C: CatalogProvider,
{
    fn get_clients(&self) -> Result<Vec<Client>, ReadError> {
        log_on_error!(self.repository.read_clients(), ReadError, "get", "clients")
    }

    fn get_client(&self, id: ClientID) -> Result<Client, ReadError> {
        log_on_error!(self.repository.read_client(id), ReadError, "get", "client")
    }

    fn create_client(&self, client: Client) -> Result<Client, CreateError> {
        log_on_error!(
            self.create_client_with_profile(client),
            CreateError,
            "create",
            "client"
        )
    }

    fn replace_client(&self, client: Client) -> Result<Client, UpdateError> {
        log_on_error!(
            self.replace_client_with_profile(client),
            UpdateError,
            "replace",
            "client"
        )
    }

    fn delete_client(&self, id: ClientID) -> Result<ClientID, DeleteError> {
        log_on_error!(
            self.repository.delete_client(id),
            DeleteError,
            "delete",
            "client"
        )
    }
}

impl<R, C> ProfileService for Service<R, C>
where
    R: ClientRepository + ProfileRepository + BlockRepository,
    C: CatalogProvider,
{
    fn get_profile(&self, client_id: ClientID) -> Result<Profile, UpdateError> {
        log_on_error!(
            self.read_or_store_profile(client_id),
            UpdateError,
            "get",
            "profile"
        )
    }

    fn refresh_profile(&self, client_id: ClientID) -> Result<Profile, UpdateError> {
        log_on_error!(self.refresh(client_id), UpdateError, "refresh", "profile")
    }
}

impl<R, C> PlanService for Service<R, C>
where
    R: ClientRepository + ProfileRepository + BlockRepository,
    C: CatalogProvider,
{
    fn generate_plan_for_client(&self, client_id: ClientID) -> Result<WeekPlanResponse, ReadError> {
        log_on_error!(self.generate(client_id), ReadError, "generate", "plan")
    }

    fn save_plan_for_client(
        &self,
        client_id: ClientID,
        name: Option<Name>,
    ) -> Result<Block, CreateError> {
        log_on_error!(
            self.generate_and_save(client_id, name),
            CreateError,
            "save",
            "plan"
        )
    }

    fn generate_balanced_plan_for_client(
        &self,
        client_id: ClientID,
    ) -> Result<WeekPlan, ReadError> {
        log_on_error!(
            self.generate_balanced(client_id),
            ReadError,
            "generate",
            "balanced plan"
        )
    }
}

impl<R, C> BlockService for Service<R, C>
where
    R: ClientRepository + ProfileRepository + BlockRepository,
    C: CatalogProvider,
{
    fn get_blocks(&self, client_id: ClientID) -> Result<Vec<Block>, ReadError> {
        log_on_error!(
            self.read_blocks_newest_first(client_id),
            ReadError,
            "get",
            "blocks"
        )
    }

    fn get_block(&self, client_id: ClientID, id: BlockID) -> Result<Block, ReadError> {
        log_on_error!(
            self.repository.read_block(client_id, id),
            ReadError,
            "get",
            "block"
        )
    }

    fn save_block(
        &self,
        client_id: ClientID,
        name: Option<Name>,
        plan: WeekPlan,
    ) -> Result<Block, CreateError> {
        log_on_error!(
            self.save(client_id, name, plan),
            CreateError,
            "save",
            "block"
        )
    }

    fn delete_block(&self, client_id: ClientID, id: BlockID) -> Result<BlockID, DeleteError> {
        log_on_error!(
            self.repository.delete_block(client_id, id),
            DeleteError,
            "delete",
            "block"
        )
    }

    fn next_block(
        &self,
        client_id: ClientID,
        id: BlockID,
        name: Option<Name>,
    ) -> Result<Block, CreateError> {
        log_on_error!(
            self.progress(client_id, id, name),
            CreateError,
            "progress",
            "block"
        )
    }
}

impl<R, C> ExerciseService for Service<R, C>
where
    C: CatalogProvider,
{
    fn list_exercises(&self) -> ExerciseListing {
        let mut rows = self.catalog.load_catalog();
        if rows.is_empty() {
            debug!("no exercise catalog, listing built-in exercises");
            rows = BuiltinCatalog.load_catalog();
        }
        ExerciseListing {
            columns: CANONICAL_COLUMNS.to_vec(),
            rows,
        }
    }
}
