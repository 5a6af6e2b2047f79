// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog provider trait for the external product catalog and taxonomy.

use async_trait::async_trait;

use crate::error::VitrineError;
use crate::selection::ProductQuery;
use crate::traits::adapter::PluginAdapter;
use crate::types::{CategoryNode, Product};

/// Read-only access to catalog products and the category taxonomy.
#[async_trait]
pub trait CatalogProvider: PluginAdapter {
    /// Executes a product query: filter clauses combined with AND, then
    /// ordering, then the limit.
    async fn query_products(&self, query: &ProductQuery) -> Result<Vec<Product>, VitrineError>;

    /// Returns every category node in provider order, with product counts.
    async fn categories(&self) -> Result<Vec<CategoryNode>, VitrineError>;
}
