// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory catalog provider.
//!
//! Executes a `ProductQuery` the way a real backend would: all filter
//! clauses must match, ties are broken by id, and the limit is applied last.

use async_trait::async_trait;
use rand::seq::SliceRandom;

use vitrine_core::{
    AdapterType, CatalogProvider, CategoryNode, HealthStatus, OrderDirection, PluginAdapter,
    Product, ProductOrderBy, ProductQuery, TermId, VitrineError,
};

struct Listing {
    product: Product,
    category_ids: Vec<TermId>,
    tag_ids: Vec<TermId>,
}

/// A catalog held in memory. Category product counts are derived from the
/// product assignments.
#[derive(Default)]
pub struct MockCatalog {
    categories: Vec<CategoryNode>,
    listings: Vec<Listing>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A product with a generated title and no sales.
    pub fn product(id: i64, price: f64) -> Product {
        Product {
            id,
            title: format!("Product {id}"),
            price,
            total_sales: 0,
            published_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    /// Add a category; its `product_count` is recomputed on read.
    pub fn with_category(mut self, node: CategoryNode) -> Self {
        self.categories.push(node);
        self
    }

    pub fn with_product(mut self, product: Product, categories: &[TermId], tags: &[TermId]) -> Self {
        self.listings.push(Listing {
            product,
            category_ids: categories.to_vec(),
            tag_ids: tags.to_vec(),
        });
        self
    }
}

#[async_trait]
impl PluginAdapter for MockCatalog {
    fn name(&self) -> &str {
        "mock-catalog"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Catalog
    }

    async fn health_check(&self) -> Result<HealthStatus, VitrineError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl CatalogProvider for MockCatalog {
    async fn query_products(&self, query: &ProductQuery) -> Result<Vec<Product>, VitrineError> {
        let mut matched: Vec<&Product> = self
            .listings
            .iter()
            .filter(|l| query.matches(&l.category_ids, &l.tag_ids))
            .map(|l| &l.product)
            .collect();

        if query.order_by == ProductOrderBy::Random {
            matched.shuffle(&mut rand::thread_rng());
        } else {
            matched.sort_by(|a, b| {
                let key = match query.order_by {
                    ProductOrderBy::Date => a.published_at.cmp(&b.published_at),
                    ProductOrderBy::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
                    ProductOrderBy::Price => a.price.total_cmp(&b.price),
                    ProductOrderBy::Popularity => a.total_sales.cmp(&b.total_sales),
                    ProductOrderBy::Random => std::cmp::Ordering::Equal,
                };
                key.then(a.id.cmp(&b.id))
            });
            if query.direction == OrderDirection::Desc {
                matched.reverse();
            }
        }

        Ok(matched
            .into_iter()
            .take(query.limit as usize)
            .cloned()
            .collect())
    }

    async fn categories(&self) -> Result<Vec<CategoryNode>, VitrineError> {
        Ok(self
            .categories
            .iter()
            .map(|c| CategoryNode {
                product_count: self
                    .listings
                    .iter()
                    .filter(|l| l.category_ids.contains(&c.id))
                    .count() as u32,
                ..c.clone()
            })
            .collect())
    }
}
