// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Carousel resolution: stored configuration in, ordered entities out.
//!
//! The [`CarouselResolver`] loads a configuration from the [`ConfigStore`],
//! builds its [`SelectionSpec`], reads from the [`CatalogProvider`] and hands
//! back the entities together with the display parameters. Reads are awaited
//! one after another; everything between them is pure.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use vitrine_core::{
    CarouselId, CarouselKind, CatalogProvider, ConfigStore, DisplayParams, Entity, SelectionSpec,
    VitrineError,
};

use crate::embed::{Placeholder, PlaceholderSyntax};
use crate::selection::{build_spec, select_categories};
use crate::tree::CategoryForest;

/// Why a carousel could not be resolved.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// No id, or an id that cannot address a carousel (zero or negative).
    #[error("empty carousel reference")]
    EmptyReference,

    /// The id is well-formed but nothing is stored under it.
    #[error("carousel {id} not found")]
    NotFound { id: CarouselId },

    /// The config store or catalog failed.
    #[error(transparent)]
    Backend(#[from] VitrineError),
}

impl ResolutionError {
    /// True for outcomes that should render nothing rather than be reported.
    pub fn is_empty_outcome(&self) -> bool {
        matches!(
            self,
            ResolutionError::EmptyReference | ResolutionError::NotFound { .. }
        )
    }
}

/// A resolved carousel, ready for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCarousel {
    pub carousel_id: CarouselId,
    pub kind: CarouselKind,
    /// May be empty; an empty carousel is a valid result.
    pub entities: Vec<Entity>,
    pub display: DisplayParams,
}

impl ResolvedCarousel {
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Resolves carousel ids against a config store and a catalog.
///
/// Holds no state besides the two adapters, so one resolver can serve any
/// number of concurrent resolutions.
pub struct CarouselResolver {
    store: Arc<dyn ConfigStore + Send + Sync>,
    catalog: Arc<dyn CatalogProvider + Send + Sync>,
}

impl CarouselResolver {
    pub fn new(
        store: Arc<dyn ConfigStore + Send + Sync>,
        catalog: Arc<dyn CatalogProvider + Send + Sync>,
    ) -> Self {
        Self { store, catalog }
    }

    /// Resolve a carousel by id.
    pub async fn resolve(
        &self,
        id: Option<CarouselId>,
    ) -> Result<ResolvedCarousel, ResolutionError> {
        let id = match id {
            Some(id) if !id.is_empty() => id,
            _ => {
                debug!(?id, "empty carousel reference");
                return Err(ResolutionError::EmptyReference);
            }
        };

        let Some(record) = self.store.load(id).await? else {
            debug!(carousel_id = %id, "carousel not found");
            return Err(ResolutionError::NotFound { id });
        };
        let config = record.config;

        let entities = match build_spec(&config) {
            SelectionSpec::Products(query) => {
                let mut products = self.catalog.query_products(&query).await?;
                products.truncate(query.limit as usize);
                products.into_iter().map(Entity::Product).collect::<Vec<_>>()
            }
            SelectionSpec::Categories(query) => {
                let forest = CategoryForest::build(self.catalog.categories().await?);
                select_categories(&query, &forest)
                    .into_iter()
                    .map(Entity::Category)
                    .collect()
            }
        };

        info!(
            carousel_id = %id,
            kind = %config.kind(),
            count = entities.len(),
            "carousel resolved"
        );
        Ok(ResolvedCarousel {
            carousel_id: id,
            kind: config.kind(),
            entities,
            display: config.display_params(),
        })
    }

    /// Resolve the carousel a placeholder refers to.
    ///
    /// Empty references and unknown ids yield `Ok(None)`; only backend
    /// failures are errors.
    pub async fn resolve_placeholder(
        &self,
        placeholder: &Placeholder,
    ) -> Result<Option<ResolvedCarousel>, VitrineError> {
        match self.resolve(placeholder.carousel_id()).await {
            Ok(resolved) => Ok(Some(resolved)),
            Err(ResolutionError::Backend(e)) => Err(e),
            Err(_) => Ok(None),
        }
    }

    /// Resolve every placeholder in `text`, in order of appearance.
    pub async fn resolve_text(
        &self,
        syntax: &PlaceholderSyntax,
        text: &str,
    ) -> Result<Vec<(Placeholder, Option<ResolvedCarousel>)>, VitrineError> {
        let mut out = Vec::new();
        for placeholder in syntax.scan(text) {
            let resolved = self.resolve_placeholder(&placeholder).await?;
            out.push((placeholder, resolved));
        }
        Ok(out)
    }
}
