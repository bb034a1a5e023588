use crate::character;
use crate::db::connect;
use anyhow::Result;
use chrono::{TimeZone, Utc};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};
use uuid::Uuid;

fn sample(id: &str) -> character::Model {
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap().into();
    character::Model {
        id: id.to_string(),
        name: "Frodo".into(),
        character_code: 3,
        character_power: 100,
        character_value: 300,
        created_at: at,
        updated_at: at,
    }
}

#[test]
fn character_json_uses_fixed_field_names() {
    let json = serde_json::to_value(sample("abc")).unwrap();
    let obj = json.as_object().unwrap();
    let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        ["character_code", "character_power", "character_value", "created_at", "id", "name", "updated_at"]
    );
    let created = obj["created_at"].as_str().unwrap();
    let parsed = chrono::DateTime::parse_from_rfc3339(created).unwrap();
    assert_eq!(parsed.timestamp(), Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap().timestamp());
}

/// Setup test database with migrations, or `None` when no database is reachable.
async fn setup_test_db() -> Option<DatabaseConnection> {
    let db = match connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}

#[tokio::test]
async fn character_entity_crud() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let id = Uuid::new_v4().to_string();
    let before = character::Entity::find().count(&db).await?;

    let m = sample(&id);
    let am = character::ActiveModel {
        id: Set(m.id),
        name: Set(m.name),
        character_code: Set(m.character_code),
        character_power: Set(m.character_power),
        character_value: Set(m.character_value),
        created_at: Set(m.created_at),
        updated_at: Set(m.updated_at),
    };
    am.insert(&db).await?;
    assert_eq!(character::Entity::find().count(&db).await?, before + 1);

    let found = character::Entity::find_by_id(id.clone()).one(&db).await?.expect("inserted row");
    assert_eq!(found.name, "Frodo");
    assert_eq!(found.character_value, 300);

    let mut am: character::ActiveModel = found.into();
    am.name = Set("Frodo Baggins".into());
    let updated = am.update(&db).await?;
    assert_eq!(updated.name, "Frodo Baggins");

    let res = character::Entity::delete_by_id(id.clone()).exec(&db).await?;
    assert_eq!(res.rows_affected, 1);
    assert!(character::Entity::find_by_id(id).one(&db).await?.is_none());
    Ok(())
}
