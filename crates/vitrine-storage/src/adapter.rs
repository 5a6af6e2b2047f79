// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the ConfigStore and CatalogProvider traits.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use vitrine_config::model::StorageConfig;
use vitrine_core::{
    AdapterType, CarouselConfig, CarouselId, CarouselRecord, CarouselSummary, CatalogProvider,
    CategoryNode, ConfigStore, HealthStatus, PluginAdapter, Product, ProductQuery, VitrineError,
};

use crate::database::Database;
use crate::models::{CatalogDocument, ImportSummary};
use crate::queries;

/// SQLite-backed config store and catalog.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is opened on the first call to
/// [`SqliteStorage::initialize`].
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    ///
    /// The database connection is not opened until [`initialize`](Self::initialize) is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Open the database and run migrations.
    pub async fn initialize(&self) -> Result<(), VitrineError> {
        let db = Database::open_with(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| VitrineError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    /// Checkpoint the WAL. The connection closes when the adapter is dropped.
    pub async fn close(&self) -> Result<(), VitrineError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    /// Replace the local catalog with the contents of `doc`.
    pub async fn import_catalog(&self, doc: &CatalogDocument) -> Result<ImportSummary, VitrineError> {
        let summary = queries::catalog::import_catalog(self.db()?, doc).await?;
        info!(
            categories = summary.categories,
            tags = summary.tags,
            products = summary.products,
            "catalog imported"
        );
        Ok(summary)
    }

    pub fn database_path(&self) -> &str {
        &self.config.database_path
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, VitrineError> {
        self.db.get().ok_or_else(|| VitrineError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::ConfigStore
    }

    async fn health_check(&self) -> Result<HealthStatus, VitrineError> {
        let db = self.db()?;
        let (carousels, categories) = db
            .connection()
            .call(|conn| -> Result<(i64, i64), rusqlite::Error> {
                let carousels = conn.query_row("SELECT COUNT(*) FROM carousels", [], |r| r.get(0))?;
                let categories =
                    conn.query_row("SELECT COUNT(*) FROM categories", [], |r| r.get(0))?;
                Ok((carousels, categories))
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        if categories == 0 {
            return Ok(HealthStatus::Degraded(format!(
                "catalog is empty ({carousels} carousels stored)"
            )));
        }
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ConfigStore for SqliteStorage {
    async fn load(&self, id: CarouselId) -> Result<Option<CarouselRecord>, VitrineError> {
        queries::carousels::get_carousel(self.db()?, id).await
    }

    async fn save(
        &self,
        id: Option<CarouselId>,
        title: &str,
        config: &CarouselConfig,
    ) -> Result<CarouselId, VitrineError> {
        let saved = queries::carousels::save_carousel(self.db()?, id, title, config).await?;
        info!(carousel_id = %saved, kind = %config.kind(), created = id.is_none(), "carousel saved");
        Ok(saved)
    }

    async fn delete(&self, id: CarouselId) -> Result<(), VitrineError> {
        let removed = queries::carousels::delete_carousel(self.db()?, id).await?;
        debug!(carousel_id = %id, removed, "carousel delete");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<CarouselSummary>, VitrineError> {
        queries::carousels::list_carousels(self.db()?).await
    }
}

#[async_trait]
impl CatalogProvider for SqliteStorage {
    async fn query_products(&self, query: &ProductQuery) -> Result<Vec<Product>, VitrineError> {
        let products = queries::catalog::query_products(self.db()?, query).await?;
        debug!(count = products.len(), limit = query.limit, "products queried");
        Ok(products)
    }

    async fn categories(&self) -> Result<Vec<CategoryNode>, VitrineError> {
        queries::catalog::list_categories(self.db()?).await
    }
}
