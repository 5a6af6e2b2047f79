// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Carousel configuration and selection engine.
//!
//! - [`schema`] turns raw form submissions into a [`CarouselConfig`](vitrine_core::CarouselConfig).
//! - [`tree`] arranges the category taxonomy as a forest.
//! - [`selection`] builds the selection for a configuration and evaluates
//!   category queries.
//! - [`resolver`] ties these to the config store and catalog adapters.
//! - [`embed`] finds and renders placeholder tokens.

pub mod embed;
pub mod resolver;
pub mod schema;
pub mod selection;
pub mod tree;

pub use embed::{Placeholder, PlaceholderSyntax};
pub use resolver::{CarouselResolver, ResolutionError, ResolvedCarousel};
pub use schema::{ConfigSchema, Flag, RawFields, SaveMode, normalize, sanitize_title, to_fields};
pub use selection::{build_spec, select_categories};
pub use tree::CategoryForest;
