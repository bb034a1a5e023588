#![cfg(test)]
use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

/// A migrated connection, or `None` when no database is reachable.
pub async fn get_db() -> Option<DatabaseConnection> {
    let migrated = MIGRATED
        .get_or_init(|| async {
            match models::db::connect().await {
                Ok(db) => match migration::Migrator::up(&db, None).await {
                    Ok(()) => true,
                    Err(e) => { eprintln!("skip: migrate up failed: {}", e); false }
                },
                Err(e) => { eprintln!("skip: cannot connect to db: {}", e); false }
            }
        })
        .await;
    if !*migrated { return None; }

    // Return a fresh connection for the current test's runtime
    models::db::connect().await.ok()
}
