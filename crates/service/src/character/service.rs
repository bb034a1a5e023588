use std::sync::Arc;

use chrono::{SubsecRound, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{Character, CreateCharacterRequest, UpdateCharacterRequest};
use super::repository::CharacterRepository;
use super::valuation;
use crate::errors::ServiceError;
use crate::pagination::{Page, PageLimits, PageRequest, Pages};

/// Application service encapsulating character business rules.
/// Validates input, derives `character_value` and orchestrates the repository.
pub struct CharacterService<R: CharacterRepository + ?Sized> {
    repo: Arc<R>,
    limits: PageLimits,
}

// Postgres keeps microseconds; trimming here keeps returned records equal to stored ones.
fn now() -> DateTimeWithTimeZone { Utc::now().trunc_subsecs(6).into() }

impl<R: CharacterRepository + ?Sized> CharacterService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo, limits: PageLimits::default() } }

    pub fn with_page_limits(mut self, limits: PageLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Fetch one character; `NotFound` propagates unchanged.
    pub async fn get(&self, id: &str) -> Result<Character, ServiceError> { self.repo.get(id).await }

    /// Validate, derive the value, persist, and return the stored record.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::character::{CharacterService, CreateCharacterRequest};
    /// use service::character::repository::mock::InMemoryCharacterRepository;
    /// let svc = CharacterService::new(Arc::new(InMemoryCharacterRepository::default()));
    /// let req = CreateCharacterRequest { name: "Frodo".into(), character_code: 3, character_power: 100 };
    /// let frodo = tokio_test::block_on(svc.create(req)).unwrap();
    /// assert_eq!(frodo.character_value, 300);
    /// ```
    #[instrument(skip_all, fields(name = %req.name, code = req.character_code))]
    pub async fn create(&self, req: CreateCharacterRequest) -> Result<Character, ServiceError> {
        req.validate()?;
        let value = valuation::create_value(req.character_code, req.character_power)?;

        let id = Uuid::new_v4().to_string();
        let now = now();
        self.repo
            .create(Character {
                id: id.clone(),
                name: req.name,
                character_code: req.character_code,
                character_power: req.character_power,
                character_value: value,
                created_at: now,
                updated_at: now,
            })
            .await?;
        info!(id = %id, value, "character_created");
        self.get(&id).await
    }

    /// Rename and re-power an existing character. The value is recomputed
    /// from the stored code with the update-path rules.
    #[instrument(skip_all, fields(id = %id, name = %req.name))]
    pub async fn update(&self, id: &str, req: UpdateCharacterRequest) -> Result<Character, ServiceError> {
        req.validate()?;
        let mut character = self.get(id).await?;

        character.character_value = valuation::update_value(character.character_code, req.character_power)?;
        character.name = req.name;
        character.character_power = req.character_power;
        character.updated_at = now();

        self.repo.update(character.clone()).await?;
        info!(id = %character.id, value = character.character_value, "character_updated");
        Ok(character)
    }

    /// Delete and return the snapshot taken just before removal.
    #[instrument(skip_all, fields(id = %id))]
    pub async fn delete(&self, id: &str) -> Result<Character, ServiceError> {
        let character = self.get(id).await?;
        self.repo.delete(id).await?;
        info!(id = %id, "character_deleted");
        Ok(character)
    }

    pub async fn count(&self) -> Result<u64, ServiceError> { self.repo.count().await }

    pub async fn query(&self, offset: u64, limit: u64) -> Result<Vec<Character>, ServiceError> {
        self.repo.query(offset, limit).await
    }

    /// Count, normalize the requested page against the total, then fetch it.
    pub async fn list(&self, req: PageRequest) -> Result<Page<Character>, ServiceError> {
        let total = self.count().await?;
        let pages = Pages::new(req, total, self.limits);
        let items = self.query(pages.offset(), pages.limit()).await?;
        Ok(pages.into_page(items))
    }
}
