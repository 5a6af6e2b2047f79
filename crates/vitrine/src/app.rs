// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Composition root: wires the SQLite adapter into the engine.
//!
//! Nothing registers itself. Every command receives an [`App`] built here
//! from the loaded configuration.

use std::sync::Arc;

use vitrine_config::VitrineConfig;
use vitrine_core::VitrineError;
use vitrine_engine::{CarouselResolver, ConfigSchema, PlaceholderSyntax};
use vitrine_storage::SqliteStorage;

pub struct App {
    pub config: VitrineConfig,
    pub storage: Arc<SqliteStorage>,
}

impl App {
    /// Open storage at the configured path.
    pub async fn open(config: VitrineConfig) -> Result<Self, VitrineError> {
        let storage = SqliteStorage::new(config.storage.clone());
        storage.initialize().await?;
        Ok(Self::from_parts(config, Arc::new(storage)))
    }

    pub fn from_parts(config: VitrineConfig, storage: Arc<SqliteStorage>) -> Self {
        Self { config, storage }
    }

    /// The SQLite adapter serves as both config store and catalog.
    pub fn resolver(&self) -> CarouselResolver {
        CarouselResolver::new(self.storage.clone(), self.storage.clone())
    }

    pub fn schema(&self) -> ConfigSchema {
        ConfigSchema::new(self.config.schema.bounds_policy)
    }

    pub fn placeholder_syntax(&self) -> Result<PlaceholderSyntax, VitrineError> {
        PlaceholderSyntax::new(&self.config.embed.placeholder_tag)
    }
}

/// Initializes the tracing subscriber with the given log level.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("vitrine={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}
