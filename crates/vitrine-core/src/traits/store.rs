// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config store trait for carousel persistence backends.

use async_trait::async_trait;

use crate::carousel::CarouselConfig;
use crate::error::VitrineError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{CarouselId, CarouselRecord, CarouselSummary};

/// Persistence for carousel records.
///
/// Implementations must make [`save`](ConfigStore::save) an atomic full
/// replace: a concurrent [`load`](ConfigStore::load) observes either the old
/// or the new configuration, never a mix.
#[async_trait]
pub trait ConfigStore: PluginAdapter {
    /// Loads a carousel, or `None` if no record exists for `id`.
    async fn load(&self, id: CarouselId) -> Result<Option<CarouselRecord>, VitrineError>;

    /// Creates a carousel (`id = None`) or replaces an existing one.
    ///
    /// Replacing an id that does not exist fails with `NotFound`.
    async fn save(
        &self,
        id: Option<CarouselId>,
        title: &str,
        config: &CarouselConfig,
    ) -> Result<CarouselId, VitrineError>;

    /// Deletes a carousel. Deleting a missing id is a no-op.
    async fn delete(&self, id: CarouselId) -> Result<(), VitrineError>;

    /// Lists all carousels ordered by id.
    async fn list(&self) -> Result<Vec<CarouselSummary>, VitrineError>;
}
