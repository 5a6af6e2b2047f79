// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Catalog queries: product selection, the category projection, and import.

use std::collections::HashSet;

use rusqlite::params;
use vitrine_core::{
    CategoryNode, OrderDirection, Product, ProductOrderBy, ProductQuery, Taxonomy, VitrineError,
};

use crate::database::{Database, flatten_tr_err, map_tr_err, sql_err};
use crate::models::{CatalogDocument, ImportSummary};

/// SQL text and positional parameters for a product query.
///
/// Each filter clause becomes an `IN` subquery; the clauses are ANDed.
/// Ties in the ordering key are broken by id in the same direction.
pub fn product_sql(query: &ProductQuery) -> (String, Vec<i64>) {
    let mut sql = String::from(
        "SELECT p.id, p.title, p.price, p.total_sales, p.published_at FROM products p",
    );
    let mut params: Vec<i64> = Vec::new();
    let mut clauses: Vec<String> = Vec::new();

    for filter in &query.filters {
        if filter.ids.is_empty() {
            continue;
        }
        let (table, column) = match filter.taxonomy {
            Taxonomy::ProductCategory => ("product_categories", "category_id"),
            Taxonomy::ProductTag => ("product_tags", "tag_id"),
        };
        let placeholders = vec!["?"; filter.ids.len()].join(", ");
        clauses.push(format!(
            "p.id IN (SELECT product_id FROM {table} WHERE {column} IN ({placeholders}))"
        ));
        params.extend(filter.ids.iter().copied());
    }
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }

    let dir = match query.direction {
        OrderDirection::Asc => "ASC",
        OrderDirection::Desc => "DESC",
    };
    let order = match query.order_by {
        ProductOrderBy::Date => format!("p.published_at {dir}, p.id {dir}"),
        ProductOrderBy::Title => format!("p.title COLLATE NOCASE {dir}, p.id {dir}"),
        ProductOrderBy::Price => format!("p.price {dir}, p.id {dir}"),
        ProductOrderBy::Popularity => format!("p.total_sales {dir}, p.id {dir}"),
        ProductOrderBy::Random => "RANDOM()".to_string(),
    };
    sql.push_str(" ORDER BY ");
    sql.push_str(&order);
    sql.push_str(" LIMIT ?");
    params.push(i64::from(query.limit));
    (sql, params)
}

/// Run a product query.
pub async fn query_products(
    db: &Database,
    query: &ProductQuery,
) -> Result<Vec<Product>, VitrineError> {
    let (sql, params) = product_sql(query);
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&sql)?;
            let products = stmt
                .query_map(rusqlite::params_from_iter(params), |row| {
                    Ok(Product {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        price: row.get(2)?,
                        total_sales: row.get::<_, i64>(3)?.max(0) as u64,
                        published_at: row.get(4)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>();
            products
        })
        .await
        .map_err(map_tr_err)
}

/// Every category in import order, with counts of directly assigned products.
pub async fn list_categories(db: &Database) -> Result<Vec<CategoryNode>, VitrineError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT c.id, c.name, c.parent_id,
                        (SELECT COUNT(*) FROM product_categories pc WHERE pc.category_id = c.id)
                 FROM categories c
                 ORDER BY c.position, c.id",
            )?;
            let nodes = stmt
                .query_map([], |row| {
                    Ok(CategoryNode {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        parent_id: row.get(2)?,
                        product_count: row.get(3)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>();
            nodes
        })
        .await
        .map_err(map_tr_err)
}

/// Replace the whole catalog with `doc` in one transaction.
///
/// Product assignments must reference categories and tags present in the
/// document; otherwise nothing is written.
pub async fn import_catalog(
    db: &Database,
    doc: &CatalogDocument,
) -> Result<ImportSummary, VitrineError> {
    check_references(doc)?;
    let doc = doc.clone();
    let now = chrono::Utc::now().to_rfc3339();

    db.connection()
        .call(move |conn| -> Result<ImportSummary, VitrineError> {
            let tx = conn.transaction().map_err(sql_err)?;
            tx.execute_batch(
                "DELETE FROM product_tags;
                 DELETE FROM product_categories;
                 DELETE FROM products;
                 DELETE FROM tags;
                 DELETE FROM categories;",
            )
            .map_err(sql_err)?;

            for (position, c) in doc.categories.iter().enumerate() {
                tx.execute(
                    "INSERT INTO categories (id, name, parent_id, position) VALUES (?1, ?2, ?3, ?4)",
                    params![c.id, c.name, c.parent_id, position as i64],
                )
                .map_err(sql_err)?;
            }
            for t in &doc.tags {
                tx.execute(
                    "INSERT INTO tags (id, name) VALUES (?1, ?2)",
                    params![t.id, t.name],
                )
                .map_err(sql_err)?;
            }
            for p in &doc.products {
                let published_at = p.published_at.clone().unwrap_or_else(|| now.clone());
                let total_sales = i64::try_from(p.total_sales).unwrap_or(i64::MAX);
                tx.execute(
                    "INSERT INTO products (id, title, price, total_sales, published_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![p.id, p.title, p.price, total_sales, published_at],
                )
                .map_err(sql_err)?;
                for cid in &p.category_ids {
                    tx.execute(
                        "INSERT OR IGNORE INTO product_categories (product_id, category_id)
                         VALUES (?1, ?2)",
                        params![p.id, cid],
                    )
                    .map_err(sql_err)?;
                }
                for tid in &p.tag_ids {
                    tx.execute(
                        "INSERT OR IGNORE INTO product_tags (product_id, tag_id) VALUES (?1, ?2)",
                        params![p.id, tid],
                    )
                    .map_err(sql_err)?;
                }
            }
            tx.commit().map_err(sql_err)?;
            Ok(ImportSummary {
                categories: doc.categories.len(),
                tags: doc.tags.len(),
                products: doc.products.len(),
            })
        })
        .await
        .map_err(flatten_tr_err)
}

fn check_references(doc: &CatalogDocument) -> Result<(), VitrineError> {
    let categories: HashSet<_> = doc.categories.iter().map(|c| c.id).collect();
    let tags: HashSet<_> = doc.tags.iter().map(|t| t.id).collect();
    if categories.len() != doc.categories.len() {
        return Err(catalog_err("duplicate category id"));
    }
    if tags.len() != doc.tags.len() {
        return Err(catalog_err("duplicate tag id"));
    }
    let mut products = HashSet::new();
    for p in &doc.products {
        if !products.insert(p.id) {
            return Err(catalog_err(format!("duplicate product id {}", p.id)));
        }
        if let Some(missing) = p.category_ids.iter().find(|id| !categories.contains(id)) {
            return Err(catalog_err(format!(
                "product {} references unknown category {missing}",
                p.id
            )));
        }
        if let Some(missing) = p.tag_ids.iter().find(|id| !tags.contains(id)) {
            return Err(catalog_err(format!(
                "product {} references unknown tag {missing}",
                p.id
            )));
        }
    }
    Ok(())
}

fn catalog_err(message: impl Into<String>) -> VitrineError {
    VitrineError::Catalog {
        message: message.into(),
        source: None,
    }
}
