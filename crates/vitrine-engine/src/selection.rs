// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Translation of a configuration into a [`SelectionSpec`], and evaluation of
//! category queries over a [`CategoryForest`].

use std::cmp::Ordering;

use vitrine_core::{
    CarouselConfig, CarouselVariant, CategoryNode, CategoryOrderBy, CategoryQuery, CategoryScope,
    OrderDirection, ProductQuery, SelectionSpec, Taxonomy, TaxonomyFilter,
};

use crate::tree::CategoryForest;

/// Build the selection for a normalized configuration.
///
/// Products: one clause per non-empty taxonomy, limited to `total_items`.
/// Categories: explicit ids when any are selected, otherwise the top level,
/// with no limit.
pub fn build_spec(config: &CarouselConfig) -> SelectionSpec {
    match &config.variant {
        CarouselVariant::Products(p) => {
            let mut filters = Vec::new();
            if !p.category_ids.is_empty() {
                filters.push(TaxonomyFilter {
                    taxonomy: Taxonomy::ProductCategory,
                    ids: p.category_ids.clone(),
                });
            }
            if !p.tag_ids.is_empty() {
                filters.push(TaxonomyFilter {
                    taxonomy: Taxonomy::ProductTag,
                    ids: p.tag_ids.clone(),
                });
            }
            SelectionSpec::Products(ProductQuery {
                filters,
                order_by: p.order_by,
                direction: p.direction,
                limit: config.total_items,
            })
        }
        CarouselVariant::Categories(c) => {
            let scope = if c.selected.is_empty() {
                CategoryScope::TopLevel
            } else {
                CategoryScope::Explicit(c.selected.clone())
            };
            SelectionSpec::Categories(CategoryQuery {
                scope,
                only_non_empty: c.only_non_empty,
                order_by: c.order_by,
                direction: c.direction,
                limit: None,
            })
        }
    }
}

/// Evaluate a category query: scope, then the non-empty filter, then order.
///
/// Explicit ids missing from the taxonomy are skipped. Ties are broken by
/// id so the result is deterministic; `Desc` reverses the whole order.
pub fn select_categories(query: &CategoryQuery, forest: &CategoryForest) -> Vec<CategoryNode> {
    let scoped: Vec<&CategoryNode> = match &query.scope {
        CategoryScope::TopLevel => forest.default_scope(),
        CategoryScope::Explicit(ids) => ids.iter().filter_map(|id| forest.get(*id)).collect(),
    };

    let mut selected: Vec<CategoryNode> = scoped
        .into_iter()
        .filter(|n| !query.only_non_empty || n.product_count > 0)
        .cloned()
        .collect();

    selected.sort_by(|a, b| {
        let primary = match query.order_by {
            CategoryOrderBy::Name => compare_names(&a.name, &b.name),
            CategoryOrderBy::Id => Ordering::Equal,
            CategoryOrderBy::ProductCount => a.product_count.cmp(&b.product_count),
        };
        primary.then(a.id.cmp(&b.id))
    });
    if query.direction == OrderDirection::Desc {
        selected.reverse();
    }
    if let Some(limit) = query.limit {
        selected.truncate(limit as usize);
    }
    selected
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use vitrine_core::{
        CarouselKind, CategorySettings, ProductOrderBy, ProductSettings, TermId,
    };

    use super::*;

    fn node(id: TermId, name: &str, parent: Option<TermId>, count: u32) -> CategoryNode {
        CategoryNode {
            id,
            name: name.to_string(),
            parent_id: parent,
            product_count: count,
        }
    }

    fn forest() -> CategoryForest {
        CategoryForest::build(vec![
            node(1, "Clothing", None, 4),
            node(2, "Shirts", Some(1), 3),
            node(3, "accessories", None, 0),
            node(5, "Sale", Some(1), 0),
            node(6, "Books", None, 7),
        ])
    }

    fn categories(settings: CategorySettings) -> CategoryQuery {
        match build_spec(&CarouselConfig::with_variant(CarouselVariant::Categories(
            settings,
        ))) {
            SelectionSpec::Categories(q) => q,
            other => panic!("expected categories spec, got {other:?}"),
        }
    }

    fn ids(nodes: &[CategoryNode]) -> Vec<TermId> {
        nodes.iter().map(|n| n.id).collect()
    }

    #[test]
    fn product_spec_has_one_clause_per_non_empty_taxonomy() {
        let mut config = CarouselConfig::with_variant(CarouselVariant::Products(ProductSettings {
            category_ids: BTreeSet::from([7]),
            order_by: ProductOrderBy::Price,
            direction: OrderDirection::Asc,
            ..ProductSettings::default()
        }));
        config.total_items = 5;
        let SelectionSpec::Products(q) = build_spec(&config) else {
            panic!("expected products spec");
        };
        assert_eq!(q.filters.len(), 1);
        assert_eq!(q.filters[0].taxonomy, Taxonomy::ProductCategory);
        assert_eq!(q.limit, 5);
        assert_eq!(q.order_by, ProductOrderBy::Price);
    }

    #[test]
    fn unfiltered_products_use_total_items_as_limit() {
        let spec = build_spec(&CarouselConfig::default());
        assert_eq!(spec.entity_kind(), CarouselKind::Products);
        assert_eq!(spec.limit(), Some(12));
        let SelectionSpec::Products(q) = spec else {
            panic!("expected products spec");
        };
        assert!(q.is_unfiltered());
    }

    #[test]
    fn empty_selection_yields_top_level_only() {
        let q = categories(CategorySettings::default());
        assert_eq!(q.scope, CategoryScope::TopLevel);
        assert_eq!(q.limit, None);
        let picked = select_categories(&q, &forest());
        assert_eq!(ids(&picked), vec![3, 6, 1], "name ASC, case-insensitive");
    }

    #[test]
    fn explicit_selection_excludes_descendants() {
        let q = categories(CategorySettings {
            selected: BTreeSet::from([1]),
            ..CategorySettings::default()
        });
        assert_eq!(ids(&select_categories(&q, &forest())), vec![1]);
    }

    #[test]
    fn only_non_empty_can_empty_the_scope() {
        let q = categories(CategorySettings {
            selected: BTreeSet::from([5]),
            only_non_empty: true,
            ..CategorySettings::default()
        });
        assert!(select_categories(&q, &forest()).is_empty());
    }

    #[test]
    fn unknown_explicit_ids_are_skipped() {
        let q = categories(CategorySettings {
            selected: BTreeSet::from([2, 404]),
            ..CategorySettings::default()
        });
        assert_eq!(ids(&select_categories(&q, &forest())), vec![2]);
    }

    #[test]
    fn count_desc_breaks_ties_by_id() {
        let q = categories(CategorySettings {
            selected: BTreeSet::from([1, 2, 3, 5, 6]),
            order_by: CategoryOrderBy::ProductCount,
            direction: OrderDirection::Desc,
            ..CategorySettings::default()
        });
        assert_eq!(ids(&select_categories(&q, &forest())), vec![6, 1, 2, 5, 3]);
    }

    #[test]
    fn id_order_and_explicit_limit() {
        let mut q = categories(CategorySettings {
            selected: BTreeSet::from([6, 2, 1]),
            order_by: CategoryOrderBy::Id,
            ..CategorySettings::default()
        });
        q.limit = Some(2);
        assert_eq!(ids(&select_categories(&q, &forest())), vec![1, 2]);
    }
}
