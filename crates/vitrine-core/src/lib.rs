// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Vitrine carousel engine.
//!
//! This crate provides the carousel configuration model, the selection
//! spec handed to catalog providers, the error taxonomy, and the adapter
//! traits for the external config store and catalog.

pub mod carousel;
pub mod error;
pub mod selection;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use carousel::{
    BoundsPolicy, Breakpoint, CarouselConfig, CarouselKind, CarouselVariant, CategoryOrderBy,
    CategorySettings, DisplayParams, ItemsPerBreakpoint, OrderDirection, ProductOrderBy,
    ProductSettings,
};
pub use error::{FieldViolation, ValidationError, VitrineError};
pub use selection::{
    CategoryQuery, CategoryScope, ProductQuery, SelectionSpec, Taxonomy, TaxonomyFilter,
};
pub use types::{
    AdapterType, CarouselId, CarouselRecord, CarouselSummary, CategoryNode, Entity, HealthStatus,
    Product, ProductId, TermId,
};

// Re-export all adapter traits at crate root.
pub use traits::{CatalogProvider, ConfigStore, PluginAdapter};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_type_round_trips_through_display() {
        use std::str::FromStr;

        for variant in [AdapterType::ConfigStore, AdapterType::Catalog] {
            let s = variant.to_string();
            let parsed = AdapterType::from_str(&s).expect("should parse back");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn empty_carousel_ids() {
        assert!(CarouselId(0).is_empty());
        assert!(CarouselId(-3).is_empty());
        assert!(!CarouselId(1).is_empty());
    }

    #[test]
    fn entity_json_is_tagged_by_type() {
        let entity = Entity::Category(CategoryNode {
            id: 5,
            name: "Shoes".into(),
            parent_id: None,
            product_count: 0,
        });
        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json["type"], "category");
        assert_eq!(entity.id(), 5);
    }

    #[test]
    fn all_traits_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_config_store<T: ConfigStore>() {}
        fn _assert_catalog_provider<T: CatalogProvider>() {}
    }
}
