use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::config::Config;
use crate::migration::Migrator;
use crate::store::PageStore;

#[derive(Clone)]
pub struct AppState {
    pub store: PageStore,
    pub config: Config,
}

impl AppState {
    /// Connects to the configured database and brings its schema up to date.
    pub async fn connect(config: Config) -> anyhow::Result<Self> {
        let mut options = ConnectOptions::new(config.database.url.clone());
        options.sqlx_logging(false);
        let db = Database::connect(options).await?;
        Migrator::up(&db, None).await?;
        info!(url = %config.database.url, "database ready");

        Ok(Self::new(db, config))
    }

    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        Self {
            store: PageStore::new(db),
            config,
        }
    }
}

/// Fresh migrated in-memory database. A single pooled connection keeps every
/// query on the same SQLite memory instance.
#[cfg(test)]
pub(crate) async fn test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("in-memory sqlite should open");
    Migrator::up(&db, None)
        .await
        .expect("migrations should apply");
    db
}
