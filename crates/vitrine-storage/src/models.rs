// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Serialized catalog document accepted by the importer.
//!
//! ```json
//! {
//!   "categories": [{ "id": 1, "name": "Clothing" }, { "id": 2, "name": "Shirts", "parent_id": 1 }],
//!   "tags": [{ "id": 3, "name": "summer" }],
//!   "products": [{ "id": 10, "title": "Polo", "price": 25.0, "category_ids": [2], "tag_ids": [3] }]
//! }
//! ```

use serde::{Deserialize, Serialize};
use vitrine_core::{ProductId, TermId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogDocument {
    /// In display order; the position is kept as the provider order.
    #[serde(default)]
    pub categories: Vec<CategoryEntry>,
    #[serde(default)]
    pub tags: Vec<TagEntry>,
    #[serde(default)]
    pub products: Vec<ProductEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryEntry {
    pub id: TermId,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<TermId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TagEntry {
    pub id: TermId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductEntry {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub total_sales: u64,
    /// RFC 3339; defaults to the import time.
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub category_ids: Vec<TermId>,
    #[serde(default)]
    pub tag_ids: Vec<TermId>,
}

/// Row counts written by an import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub categories: usize,
    pub tags: usize,
    pub products: usize,
}
