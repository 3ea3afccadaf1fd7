use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::config::ServerSettings;
use crate::errors::InternalError;
use crate::errors::internal::DatabaseError;

/// Owns the catalog database connection pool and hands out transactions
#[derive(Clone)]
pub struct DatabaseConnections {
    pub catalog: DatabaseConnection,
}

impl DatabaseConnections {
    /// Connect to the database named by the settings
    ///
    /// Does NOT run migrations - call `migrate()` separately.
    ///
    /// # Returns
    /// * `Ok(DatabaseConnections)` - Connection established successfully
    /// * `Err(InternalError)` - Connection failed
    pub async fn init(settings: &ServerSettings) -> Result<Self, InternalError> {
        let mut options = ConnectOptions::new(settings.database_url().to_string());
        options.sqlx_logging(settings.debug());

        let catalog = Database::connect(options)
            .await
            .map_err(|e| InternalError::database("connect_database", e))?;

        tracing::debug!("Connected to catalog database: {}", settings.database_url());

        Ok(Self { catalog })
    }

    /// Wrap an already-open connection
    pub fn from_connection(catalog: DatabaseConnection) -> Self {
        Self { catalog }
    }

    /// Run all pending migrations on the catalog database
    pub async fn migrate(&self) -> Result<(), InternalError> {
        Migrator::up(&self.catalog, None)
            .await
            .map_err(|e| InternalError::database("run_migrations", e))?;

        tracing::debug!("Catalog database migrations completed");

        Ok(())
    }

    /// Start a unit of work; dropping the transaction without committing rolls it back
    pub async fn begin_transaction(&self) -> Result<DatabaseTransaction, InternalError> {
        self.catalog
            .begin()
            .await
            .map_err(|source| DatabaseError::TransactionBegin { source }.into())
    }

    pub async fn commit_transaction(txn: DatabaseTransaction) -> Result<(), InternalError> {
        txn.commit()
            .await
            .map_err(|source| DatabaseError::TransactionCommit { source }.into())
    }

    /// Round-trip a trivial statement to confirm the database is reachable
    pub async fn ping(&self) -> Result<(), InternalError> {
        self.catalog
            .execute_unprepared("SELECT 1")
            .await
            .map_err(|e| InternalError::database("ping", e))?;
        Ok(())
    }
}
