// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vitrine catalog` commands.

use std::path::Path;

use vitrine_core::{CatalogProvider, VitrineError};
use vitrine_engine::CategoryForest;
use vitrine_storage::CatalogDocument;

use crate::app::App;

/// Load a JSON catalog document, replacing the current catalog.
pub async fn import(app: &App, path: &Path) -> Result<String, VitrineError> {
    let content = std::fs::read_to_string(path).map_err(|e| VitrineError::Catalog {
        message: format!("cannot read {}", path.display()),
        source: Some(Box::new(e)),
    })?;
    let doc: CatalogDocument = serde_json::from_str(&content)?;
    let summary = app.storage.import_catalog(&doc).await?;
    Ok(format!(
        "imported {} categories, {} tags, {} products",
        summary.categories, summary.tags, summary.products
    ))
}

/// The category taxonomy as an indented outline.
pub async fn tree(app: &App) -> Result<String, VitrineError> {
    let forest = CategoryForest::build(app.storage.categories().await?);
    if forest.is_empty() {
        return Ok("catalog has no categories".to_string());
    }
    let lines: Vec<String> = forest
        .walk()
        .into_iter()
        .map(|(depth, node)| {
            format!(
                "{}{} (#{}, {} products)",
                "  ".repeat(depth),
                node.name,
                node.id,
                node.product_count
            )
        })
        .collect();
    Ok(lines.join("\n"))
}
