// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory config store for deterministic testing.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use vitrine_core::{
    AdapterType, CarouselConfig, CarouselId, CarouselRecord, CarouselSummary, ConfigStore,
    HealthStatus, PluginAdapter, VitrineError,
};

const MOCK_TIMESTAMP: &str = "2026-01-01T00:00:00Z";

/// A config store backed by a map.
///
/// New ids continue after the highest id ever stored. When built with
/// [`failing`](Self::failing) every operation returns a storage error.
pub struct MockConfigStore {
    records: Mutex<BTreeMap<CarouselId, CarouselRecord>>,
    next_id: Mutex<i64>,
    failure: Option<String>,
}

impl MockConfigStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(BTreeMap::new()),
            next_id: Mutex::new(1),
            failure: None,
        }
    }

    /// Pre-load a record under `id`.
    pub fn with_config(mut self, id: CarouselId, title: &str, config: CarouselConfig) -> Self {
        self.records.get_mut().insert(
            id,
            CarouselRecord {
                id,
                title: title.to_string(),
                config,
                created_at: MOCK_TIMESTAMP.to_string(),
                updated_at: MOCK_TIMESTAMP.to_string(),
            },
        );
        let next = self.next_id.get_mut();
        *next = (*next).max(id.0 + 1);
        self
    }

    /// Make every operation fail with `message`.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    fn check(&self) -> Result<(), VitrineError> {
        match &self.failure {
            Some(message) => Err(VitrineError::Storage {
                source: message.clone().into(),
            }),
            None => Ok(()),
        }
    }
}

impl Default for MockConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockConfigStore {
    fn name(&self) -> &str {
        "mock-store"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::ConfigStore
    }

    async fn health_check(&self) -> Result<HealthStatus, VitrineError> {
        Ok(match &self.failure {
            Some(message) => HealthStatus::Unhealthy(message.clone()),
            None => HealthStatus::Healthy,
        })
    }
}

#[async_trait]
impl ConfigStore for MockConfigStore {
    async fn load(&self, id: CarouselId) -> Result<Option<CarouselRecord>, VitrineError> {
        self.check()?;
        Ok(self.records.lock().await.get(&id).cloned())
    }

    async fn save(
        &self,
        id: Option<CarouselId>,
        title: &str,
        config: &CarouselConfig,
    ) -> Result<CarouselId, VitrineError> {
        self.check()?;
        let mut records = self.records.lock().await;
        match id {
            Some(id) => {
                let record = records.get_mut(&id).ok_or(VitrineError::NotFound {
                    entity: "carousel",
                    id: id.0,
                })?;
                record.title = title.to_string();
                record.config = config.clone();
                Ok(id)
            }
            None => {
                let mut next = self.next_id.lock().await;
                let id = CarouselId(*next);
                *next += 1;
                records.insert(
                    id,
                    CarouselRecord {
                        id,
                        title: title.to_string(),
                        config: config.clone(),
                        created_at: MOCK_TIMESTAMP.to_string(),
                        updated_at: MOCK_TIMESTAMP.to_string(),
                    },
                );
                Ok(id)
            }
        }
    }

    async fn delete(&self, id: CarouselId) -> Result<(), VitrineError> {
        self.check()?;
        self.records.lock().await.remove(&id);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<CarouselSummary>, VitrineError> {
        self.check()?;
        Ok(self
            .records
            .lock()
            .await
            .values()
            .map(|r| CarouselSummary {
                id: r.id,
                title: r.title.clone(),
                kind: r.config.kind(),
            })
            .collect())
    }
}
