// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the engine.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::carousel::{CarouselConfig, CarouselKind};

/// Identifier of a taxonomy term (product category or product tag).
pub type TermId = i64;

/// Identifier of a catalog product.
pub type ProductId = i64;

/// Unique identifier of a carousel record.
///
/// Zero and negative values never address a stored carousel; they are
/// what an empty or malformed placeholder reference decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarouselId(pub i64);

impl CarouselId {
    /// Returns true if this id cannot refer to a stored carousel.
    pub fn is_empty(self) -> bool {
        self.0 <= 0
    }
}

impl fmt::Display for CarouselId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the role an adapter plays for the engine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    ConfigStore,
    Catalog,
}

/// A node of the external product-category taxonomy.
///
/// Read-only projection; the engine never owns or mutates categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub id: TermId,
    pub name: String,
    /// `None` for top-level categories.
    pub parent_id: Option<TermId>,
    pub product_count: u32,
}

impl CategoryNode {
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A catalog product as returned by the catalog provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    /// Units sold, used for popularity ordering.
    pub total_sales: u64,
    /// RFC 3339 publication timestamp, used for date ordering.
    pub published_at: String,
}

/// One item of a resolved carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Entity {
    Product(Product),
    Category(CategoryNode),
}

impl Entity {
    pub fn id(&self) -> i64 {
        match self {
            Entity::Product(p) => p.id,
            Entity::Category(c) => c.id,
        }
    }
}

/// A persisted carousel: title and configuration under a stable id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselRecord {
    pub id: CarouselId,
    pub title: String,
    pub config: CarouselConfig,
    pub created_at: String,
    pub updated_at: String,
}

/// Listing row for the carousel overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselSummary {
    pub id: CarouselId,
    pub title: String,
    pub kind: CarouselKind,
}
