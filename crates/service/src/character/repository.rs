use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use models::character::{self, Entity as CharacterEntity};
use sea_orm::{
    ActiveValue, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Set,
};

use super::domain::Character;
use crate::errors::ServiceError;

/// Storage contract consumed by the character service.
#[async_trait]
pub trait CharacterRepository: Send + Sync {
    /// Fails with `NotFound` when no record has `id`.
    async fn get(&self, id: &str) -> Result<Character, ServiceError>;
    async fn count(&self) -> Result<u64, ServiceError>;
    /// Ordered by id ascending; an offset past the end yields an empty vec.
    async fn query(&self, offset: u64, limit: u64) -> Result<Vec<Character>, ServiceError>;
    async fn create(&self, character: Character) -> Result<(), ServiceError>;
    async fn update(&self, character: Character) -> Result<(), ServiceError>;
    /// Fails with `NotFound` when no record has `id`.
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
}

pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(15);

/// SeaORM-backed repository implementation.
pub struct SeaOrmCharacterRepository {
    db: DatabaseConnection,
    timeout: Duration,
}

impl SeaOrmCharacterRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db, timeout: DEFAULT_QUERY_TIMEOUT } }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run a storage call under the configured deadline.
    async fn deadline<T, F>(&self, fut: F) -> Result<Result<T, DbErr>, ServiceError>
    where
        F: Future<Output = Result<T, DbErr>> + Send,
    {
        tokio::time::timeout(self.timeout, fut).await.map_err(|_| ServiceError::Cancelled)
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, ServiceError>
    where
        F: Future<Output = Result<T, DbErr>> + Send,
    {
        Ok(self.deadline(fut).await??)
    }
}

fn active_model(c: Character) -> character::ActiveModel {
    character::ActiveModel {
        id: Set(c.id),
        name: Set(c.name),
        character_code: Set(c.character_code),
        character_power: Set(c.character_power),
        character_value: Set(c.character_value),
        created_at: Set(c.created_at),
        updated_at: Set(c.updated_at),
    }
}

#[async_trait]
impl CharacterRepository for SeaOrmCharacterRepository {
    async fn get(&self, id: &str) -> Result<Character, ServiceError> {
        self.bounded(CharacterEntity::find_by_id(id.to_string()).one(&self.db))
            .await?
            .ok_or_else(|| ServiceError::not_found("character", id))
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        self.bounded(CharacterEntity::find().count(&self.db)).await
    }

    async fn query(&self, offset: u64, limit: u64) -> Result<Vec<Character>, ServiceError> {
        let finder = CharacterEntity::find()
            .order_by_asc(character::Column::Id)
            .offset(offset)
            .limit(limit);
        self.bounded(finder.all(&self.db)).await
    }

    async fn create(&self, c: Character) -> Result<(), ServiceError> {
        let insert = CharacterEntity::insert(active_model(c)).exec_without_returning(&self.db);
        self.bounded(insert).await?;
        Ok(())
    }

    async fn update(&self, c: Character) -> Result<(), ServiceError> {
        let id = c.id.clone();
        let mut am = active_model(c);
        // The primary key selects the row; it is never rewritten.
        am.id = ActiveValue::Unchanged(id.clone());
        match self.deadline(CharacterEntity::update(am).exec(&self.db)).await? {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(ServiceError::not_found("character", &id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let res = self.bounded(CharacterEntity::delete_by_id(id.to_string()).exec(&self.db)).await?;
        if res.rows_affected == 0 {
            return Err(ServiceError::not_found("character", id));
        }
        Ok(())
    }
}

/// In-memory repository used by unit, HTTP and benchmark tests.
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, MutexGuard};

    /// Records are kept in a `BTreeMap`, so iteration is already id-ordered.
    #[derive(Default)]
    pub struct InMemoryCharacterRepository {
        items: Mutex<BTreeMap<String, Character>>,
        failing_name: Option<String>,
    }

    impl InMemoryCharacterRepository {
        pub fn with_items(items: impl IntoIterator<Item = Character>) -> Self {
            let map = items.into_iter().map(|c| (c.id.clone(), c)).collect();
            Self { items: Mutex::new(map), failing_name: None }
        }

        /// Make `create` and `update` fail with a storage error for records with this name.
        pub fn fail_on_name(mut self, name: impl Into<String>) -> Self {
            self.failing_name = Some(name.into());
            self
        }

        fn items(&self) -> MutexGuard<'_, BTreeMap<String, Character>> {
            self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
        }

        fn check_failure(&self, c: &Character) -> Result<(), ServiceError> {
            match &self.failing_name {
                Some(name) if *name == c.name => Err(ServiceError::Storage("injected failure".into())),
                _ => Ok(()),
            }
        }
    }

    #[async_trait]
    impl CharacterRepository for InMemoryCharacterRepository {
        async fn get(&self, id: &str) -> Result<Character, ServiceError> {
            self.items().get(id).cloned().ok_or_else(|| ServiceError::not_found("character", id))
        }

        async fn count(&self) -> Result<u64, ServiceError> { Ok(self.items().len() as u64) }

        async fn query(&self, offset: u64, limit: u64) -> Result<Vec<Character>, ServiceError> {
            let items = self.items();
            Ok(items.values().skip(offset as usize).take(limit as usize).cloned().collect())
        }

        async fn create(&self, c: Character) -> Result<(), ServiceError> {
            self.check_failure(&c)?;
            let mut items = self.items();
            if items.contains_key(&c.id) {
                return Err(ServiceError::Storage(format!("duplicate id {}", c.id)));
            }
            items.insert(c.id.clone(), c);
            Ok(())
        }

        async fn update(&self, c: Character) -> Result<(), ServiceError> {
            self.check_failure(&c)?;
            let mut items = self.items();
            match items.get_mut(&c.id) {
                Some(slot) => {
                    *slot = c;
                    Ok(())
                }
                None => Err(ServiceError::not_found("character", &c.id)),
            }
        }

        async fn delete(&self, id: &str) -> Result<(), ServiceError> {
            self.items().remove(id).map(|_| ()).ok_or_else(|| ServiceError::not_found("character", id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::InMemoryCharacterRepository;
    use super::*;
    use crate::test_support::get_db;
    use chrono::Utc;

    fn record(id: &str, name: &str) -> Character {
        let now = Utc::now().into();
        Character {
            id: id.to_string(),
            name: name.to_string(),
            character_code: 1,
            character_power: 100,
            character_value: 150,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn in_memory_query_is_ordered_and_bounded() {
        let repo = InMemoryCharacterRepository::with_items(["c", "a", "b"].map(|id| record(id, id)));
        let ids: Vec<_> = repo.query(0, 2).await.unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, ["a", "b"]);
        assert!(repo.query(3, 10).await.unwrap().is_empty());
        assert!(repo.query(10, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn in_memory_rejects_duplicates_and_missing_ids() {
        let repo = InMemoryCharacterRepository::default();
        repo.create(record("a", "x")).await.unwrap();
        assert!(matches!(repo.create(record("a", "y")).await, Err(ServiceError::Storage(_))));
        assert!(matches!(repo.update(record("zz", "y")).await, Err(ServiceError::NotFound(_))));
        repo.delete("a").await.unwrap();
        assert!(matches!(repo.delete("a").await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn expired_deadline_is_cancelled() {
        let repo = SeaOrmCharacterRepository::new(DatabaseConnection::Disconnected)
            .with_timeout(Duration::from_millis(10));
        let res: Result<u64, ServiceError> = repo.bounded(std::future::pending::<Result<u64, DbErr>>()).await;
        assert!(matches!(res, Err(ServiceError::Cancelled)));
    }

    #[tokio::test]
    async fn storage_errors_inside_deadline_pass_through() {
        let repo = SeaOrmCharacterRepository::new(DatabaseConnection::Disconnected)
            .with_timeout(Duration::from_millis(10));
        assert!(matches!(repo.count().await, Err(ServiceError::Storage(_))));
    }

    #[tokio::test]
    async fn sea_orm_repository_crud() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
        let Some(db) = get_db().await else { return Ok(()) };
        let repo = SeaOrmCharacterRepository::new(db);

        let id = format!("test-{}", uuid::Uuid::new_v4());
        let before = repo.count().await?;

        repo.create(record(&id, "character1")).await?;
        assert_eq!(repo.count().await? - before, 1);

        let found = repo.get(&id).await?;
        assert_eq!(found.name, "character1");
        assert_eq!(found.character_power, 100);
        assert_eq!(found.character_value, 150);

        assert!(matches!(repo.get("test0-missing").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(repo.create(record(&id, "dup")).await, Err(ServiceError::Storage(_))));

        let mut changed = found.clone();
        changed.name = "character1 updated".into();
        changed.character_power = 10;
        changed.character_value = 10;
        repo.update(changed).await?;
        let found = repo.get(&id).await?;
        assert_eq!(found.name, "character1 updated");
        assert_eq!(found.character_value, 10);

        let page = repo.query(0, before + 1).await?;
        assert!(page.windows(2).all(|w| w[0].id < w[1].id));
        assert!(repo.query(before + 1, 10).await?.is_empty());

        repo.delete(&id).await?;
        assert!(matches!(repo.get(&id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(repo.delete(&id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
