pub mod connection;
pub mod entities;
pub mod migrations;
pub mod seed_data;
pub mod test_utils;

pub use connection::*;

use anyhow::Result;
use clap::Subcommand;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use migrations::Migrator;

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateDirection {
    Up,
    Down,
    Fresh,
}

pub async fn migrate_database(db: &DatabaseConnection, direction: MigrateDirection) -> Result<()> {
    match direction {
        MigrateDirection::Up => {
            info!("Running migrations up");
            Migrator::up(db, None).await?;
        }
        MigrateDirection::Down => {
            info!("Running migrations down");
            Migrator::down(db, None).await?;
        }
        MigrateDirection::Fresh => {
            info!("Running fresh migrations (down then up)");
            Migrator::down(db, None).await?;
            Migrator::up(db, None).await?;
        }
    }

    info!("Database migration completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{CloneStore, SeaOrmStore};

    #[tokio::test]
    async fn test_fresh_migration_clears_data() {
        let db = establish_connection("sqlite::memory:").await.unwrap();
        migrate_database(&db, MigrateDirection::Up).await.unwrap();

        let store = SeaOrmStore::new(db.clone());
        store.save_setting("template_workspace_id", "ws-1").await.unwrap();

        migrate_database(&db, MigrateDirection::Fresh).await.unwrap();
        assert_eq!(store.find_setting("template_workspace_id").await.unwrap(), None);
    }
}
