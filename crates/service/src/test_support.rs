#![cfg(test)]
use std::time::Duration;

use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<bool> = OnceCell::const_new();

fn test_config() -> DatabaseConfig {
    let mut cfg = DatabaseConfig::from_file().unwrap_or_else(|_| DatabaseConfig::from_env());
    cfg.max_connections = cfg.max_connections.max(10);
    cfg.min_connections = 1;
    cfg.connect_timeout = Duration::from_secs(5);
    cfg.acquire_timeout = Duration::from_secs(5);
    cfg
}

/// A migrated connection, or `None` when `SKIP_DB_TESTS` is set or no
/// database is reachable.
pub async fn try_get_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let migrated = *MIGRATED
        .get_or_init(|| async {
            let db = match connect_with_config(&test_config()).await {
                Ok(db) => db,
                Err(e) => {
                    eprintln!("skip: cannot connect to db: {}", e);
                    return false;
                }
            };
            if let Err(e) = migration::Migrator::up(&db, None).await {
                eprintln!("skip: migrate up failed: {}", e);
                return false;
            }
            true
        })
        .await;
    if !migrated {
        return None;
    }

    // Fresh connection for the current test's runtime
    match connect_with_config(&test_config()).await {
        Ok(db) => Some(db),
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            None
        }
    }
}
