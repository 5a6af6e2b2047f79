// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` opens a temp SQLite database through the real
//! [`SqliteStorage`] adapter and optionally seeds it with a catalog.

use std::sync::Arc;

use vitrine_config::VitrineConfig;
use vitrine_config::model::StorageConfig;
use vitrine_core::{BoundsPolicy, VitrineError};
use vitrine_storage::{
    CatalogDocument, CategoryEntry, ProductEntry, SqliteStorage, TagEntry,
};

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    catalog: Option<CatalogDocument>,
    bounds_policy: BoundsPolicy,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            catalog: None,
            bounds_policy: BoundsPolicy::Clamp,
        }
    }

    /// Seed the catalog with [`sample_catalog`].
    pub fn with_sample_catalog(self) -> Self {
        self.with_catalog(sample_catalog())
    }

    pub fn with_catalog(mut self, doc: CatalogDocument) -> Self {
        self.catalog = Some(doc);
        self
    }

    pub fn with_bounds_policy(mut self, policy: BoundsPolicy) -> Self {
        self.bounds_policy = policy;
        self
    }

    /// Build the test harness, creating the temp database.
    pub async fn build(self) -> Result<TestHarness, VitrineError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| VitrineError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let mut config = VitrineConfig::default();
        config.storage = StorageConfig {
            database_path: db_path.to_string_lossy().to_string(),
            wal_mode: true,
        };
        config.schema.bounds_policy = self.bounds_policy;

        let storage = SqliteStorage::new(config.storage.clone());
        storage.initialize().await?;
        if let Some(doc) = &self.catalog {
            storage.import_catalog(doc).await?;
        }

        Ok(TestHarness {
            storage: Arc::new(storage),
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// A test environment with real SQLite storage in a temp directory.
pub struct TestHarness {
    /// SQLite config store and catalog (temp DB, cleaned up on drop).
    pub storage: Arc<SqliteStorage>,
    /// Configuration pointing at the temp database.
    pub config: VitrineConfig,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }
}

/// A small catalog used across tests.
///
/// Categories (in order): Lamps (7) with child Floor lamps (9), Rugs (8),
/// and an empty top-level Clearance (5). Category 7 holds five products
/// priced 10..50; two more products sit outside it.
pub fn sample_catalog() -> CatalogDocument {
    let lamp = |id: i64, price: f64| ProductEntry {
        id,
        title: format!("Lamp {id}"),
        price,
        total_sales: (60 - price as u64) / 10,
        published_at: Some(format!("2026-02-0{id}T09:00:00Z")),
        category_ids: vec![7],
        tag_ids: if id % 2 == 0 { vec![1] } else { Vec::new() },
    };
    let mut products: Vec<ProductEntry> = [(3, 30.0), (1, 10.0), (5, 50.0), (2, 20.0), (4, 40.0)]
        .into_iter()
        .map(|(id, price)| lamp(id, price))
        .collect();
    products.push(ProductEntry {
        id: 20,
        title: "Wool rug".into(),
        price: 5.0,
        total_sales: 40,
        published_at: Some("2026-03-01T09:00:00Z".into()),
        category_ids: vec![8],
        tag_ids: vec![1],
    });
    products.push(ProductEntry {
        id: 21,
        title: "Gift card".into(),
        price: 1.0,
        total_sales: 2,
        published_at: Some("2026-03-02T09:00:00Z".into()),
        category_ids: Vec::new(),
        tag_ids: Vec::new(),
    });

    CatalogDocument {
        categories: vec![
            CategoryEntry {
                id: 7,
                name: "Lamps".into(),
                parent_id: None,
            },
            CategoryEntry {
                id: 9,
                name: "Floor lamps".into(),
                parent_id: Some(7),
            },
            CategoryEntry {
                id: 8,
                name: "Rugs".into(),
                parent_id: None,
            },
            CategoryEntry {
                id: 5,
                name: "Clearance".into(),
                parent_id: None,
            },
        ],
        tags: vec![TagEntry {
            id: 1,
            name: "sale".into(),
        }],
        products,
    }
}
