// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend-agnostic description of which entities a carousel shows.
//!
//! A [`SelectionSpec`] is pure data: catalog providers translate a
//! [`ProductQuery`] into their own query language, and the engine applies a
//! [`CategoryQuery`] to the taxonomy projection it receives.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::carousel::{CarouselKind, CategoryOrderBy, OrderDirection, ProductOrderBy};
use crate::types::TermId;

/// Taxonomy a filter clause applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Taxonomy {
    ProductCategory,
    ProductTag,
}

/// One filter clause: the entity must carry at least one of `ids`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyFilter {
    pub taxonomy: Taxonomy,
    pub ids: BTreeSet<TermId>,
}

impl TaxonomyFilter {
    pub fn matches(&self, term_ids: &[TermId]) -> bool {
        term_ids.iter().any(|id| self.ids.contains(id))
    }
}

/// Product selection: every clause in `filters` must match (AND).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuery {
    pub filters: Vec<TaxonomyFilter>,
    pub order_by: ProductOrderBy,
    pub direction: OrderDirection,
    pub limit: u32,
}

impl ProductQuery {
    pub fn is_unfiltered(&self) -> bool {
        self.filters.is_empty()
    }

    /// The clause for `taxonomy`, if one is present.
    pub fn filter(&self, taxonomy: Taxonomy) -> Option<&TaxonomyFilter> {
        self.filters.iter().find(|f| f.taxonomy == taxonomy)
    }

    /// Whether a product with the given term assignments passes every clause.
    pub fn matches(&self, category_ids: &[TermId], tag_ids: &[TermId]) -> bool {
        self.filters.iter().all(|f| match f.taxonomy {
            Taxonomy::ProductCategory => f.matches(category_ids),
            Taxonomy::ProductTag => f.matches(tag_ids),
        })
    }
}

/// Which category nodes are eligible before filtering and ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", content = "ids", rename_all = "snake_case")]
pub enum CategoryScope {
    /// Exactly these nodes; descendants are not included.
    Explicit(BTreeSet<TermId>),
    /// All nodes without a parent.
    TopLevel,
}

/// Category selection, applied by the engine over the taxonomy forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryQuery {
    pub scope: CategoryScope,
    pub only_non_empty: bool,
    pub order_by: CategoryOrderBy,
    pub direction: OrderDirection,
    /// `None` means every node in scope is shown.
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "entity_kind", rename_all = "snake_case")]
pub enum SelectionSpec {
    Products(ProductQuery),
    Categories(CategoryQuery),
}

impl SelectionSpec {
    pub fn entity_kind(&self) -> CarouselKind {
        match self {
            SelectionSpec::Products(_) => CarouselKind::Products,
            SelectionSpec::Categories(_) => CarouselKind::Categories,
        }
    }

    pub fn limit(&self) -> Option<u32> {
        match self {
            SelectionSpec::Products(q) => Some(q.limit),
            SelectionSpec::Categories(q) => q.limit,
        }
    }
}
