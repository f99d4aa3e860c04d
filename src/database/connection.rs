use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;

/// Lifetime of the single in-memory connection. The database is gone once it
/// closes, so it is never reaped. sqlx falls back to its own short defaults
/// when these are unset.
const IN_MEMORY_LIFETIME: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

pub async fn establish_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(connect_options(database_url)).await
}

fn connect_options(database_url: &str) -> ConnectOptions {
    let mut opt = ConnectOptions::new(database_url);
    let in_memory = is_in_memory(database_url);

    // SQLite serialises writes; a small pool avoids lock contention
    opt.max_connections(if in_memory { 1 } else { 8 })
        .min_connections(1)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(30))
        .sqlx_logging(true)
        .sqlx_logging_level(tracing::log::LevelFilter::Debug);

    if in_memory {
        opt.idle_timeout(IN_MEMORY_LIFETIME)
            .max_lifetime(IN_MEMORY_LIFETIME);
    } else {
        opt.idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(3600));
    }
    opt
}

pub fn get_database_url(database_path: Option<&str>) -> String {
    match database_path {
        Some(path) if path == ":memory:" => "sqlite::memory:".to_string(),
        Some(path) => format!("sqlite://{}?mode=rwc", path),
        None => "sqlite://workspaces.db?mode=rwc".to_string(),
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:")
}
