// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests: raw form fields through normalization, SQLite
//! storage and resolution against the sample catalog.
//!
//! Each test creates an isolated TestHarness with a temp database.

use vitrine_core::{CarouselId, CarouselKind, ConfigStore, Entity};
use vitrine_engine::{
    CarouselResolver, PlaceholderSyntax, RawFields, ResolutionError, SaveMode, normalize,
};
use vitrine_test_utils::TestHarness;

async fn seeded() -> TestHarness {
    TestHarness::builder()
        .with_sample_catalog()
        .build()
        .await
        .unwrap()
}

fn resolver(harness: &TestHarness) -> CarouselResolver {
    CarouselResolver::new(harness.storage.clone(), harness.storage.clone())
}

async fn save(harness: &TestHarness, title: &str, raw: RawFields) -> CarouselId {
    let config = normalize(&raw, SaveMode::Create).unwrap();
    harness.storage.save(None, title, &config).await.unwrap()
}

fn ids(entities: &[Entity]) -> Vec<i64> {
    entities.iter().map(Entity::id).collect()
}

// ---- Products ----

#[tokio::test]
async fn cheapest_three_in_category() {
    let harness = seeded().await;
    let raw = RawFields::new()
        .with("kind", "products")
        .with("total_items", "3")
        .with("product_categories[]", "7")
        .with("products_orderby", "price")
        .with("products_order", "ASC");
    let id = save(&harness, "Cheap lamps", raw).await;

    let resolved = resolver(&harness).resolve(Some(id)).await.unwrap();
    assert_eq!(resolved.kind, CarouselKind::Products);
    assert_eq!(ids(&resolved.entities), vec![1, 2, 3]);
    assert!(resolved.display.show_arrows);
    assert!(!resolved.display.autoplay);
}

#[tokio::test]
async fn category_and_tag_filters_combine() {
    let harness = seeded().await;
    let raw = RawFields::new()
        .with("product_categories[]", "7")
        .with("product_tags[]", "1")
        .with("products_orderby", "price")
        .with("products_order", "DESC");
    let id = save(&harness, "Lamps on sale", raw).await;

    let resolved = resolver(&harness).resolve(Some(id)).await.unwrap();
    assert_eq!(ids(&resolved.entities), vec![4, 2]);
}

#[tokio::test]
async fn out_of_range_total_is_clamped_before_selection() {
    let harness = seeded().await;
    let raw = RawFields::new()
        .with("total_items", "0")
        .with("products_orderby", "price")
        .with("products_order", "ASC");
    let id = save(&harness, "Cheapest", raw).await;

    let record = harness.storage.load(id).await.unwrap().unwrap();
    assert_eq!(record.config.total_items, 1);
    let resolved = resolver(&harness).resolve(Some(id)).await.unwrap();
    assert_eq!(ids(&resolved.entities), vec![21]);
}

#[tokio::test]
async fn price_order_defaults_to_descending() {
    let harness = seeded().await;
    let raw = RawFields::new()
        .with("total_items", "1")
        .with("products_orderby", "price");
    let id = save(&harness, "Priciest", raw).await;

    let resolved = resolver(&harness).resolve(Some(id)).await.unwrap();
    assert_eq!(ids(&resolved.entities), vec![5]);
}

// ---- Categories ----

#[tokio::test]
async fn top_level_categories_skip_empty_ones() {
    let harness = seeded().await;
    let raw = RawFields::new()
        .with("kind", "categories")
        .with("only_non_empty", "1")
        .with("categories_orderby", "name");
    let id = save(&harness, "Shop by room", raw).await;

    let resolved = resolver(&harness).resolve(Some(id)).await.unwrap();
    assert_eq!(resolved.kind, CarouselKind::Categories);
    assert_eq!(ids(&resolved.entities), vec![7, 8]);
}

#[tokio::test]
async fn explicit_selection_is_exact_and_keeps_empties() {
    let harness = seeded().await;
    let raw = RawFields::new()
        .with("kind", "categories")
        .with("selected_categories[]", "9")
        .with("selected_categories[]", "5")
        .with("selected_categories[]", "404")
        .with("categories_orderby", "id");
    let id = save(&harness, "Picked", raw).await;

    let resolved = resolver(&harness).resolve(Some(id)).await.unwrap();
    assert_eq!(ids(&resolved.entities), vec![5, 9]);
}

// ---- References ----

#[tokio::test]
async fn placeholders_in_content_resolve_in_order() {
    let harness = seeded().await;
    let id = save(&harness, "Rooms", RawFields::new().with("kind", "categories")).await;

    let syntax = PlaceholderSyntax::new(&harness.config.embed.placeholder_tag).unwrap();
    let text = format!(
        "<p>Browse</p>{}<p>and</p>[carousel id=\"77\"][carousel]",
        syntax.render(id)
    );
    let resolved = resolver(&harness)
        .resolve_text(&syntax, &text)
        .await
        .unwrap();

    assert_eq!(resolved.len(), 3);
    assert_eq!(resolved[0].1.as_ref().unwrap().carousel_id, id);
    assert!(resolved[1].1.is_none());
    assert!(resolved[2].1.is_none());
}

#[tokio::test]
async fn deleted_carousel_is_not_found() {
    let harness = seeded().await;
    let id = save(&harness, "Short-lived", RawFields::new()).await;
    harness.storage.delete(id).await.unwrap();

    let err = resolver(&harness).resolve(Some(id)).await.unwrap_err();
    assert!(matches!(err, ResolutionError::NotFound { .. }));
    assert!(err.is_empty_outcome());
}

#[tokio::test]
async fn update_replaces_the_whole_configuration() {
    let harness = seeded().await;
    let id = save(
        &harness,
        "Mutable",
        RawFields::new().with("total_items", "2"),
    )
    .await;

    let updated = normalize(
        &RawFields::new()
            .with("kind", "categories")
            .with("show_dots", "1"),
        SaveMode::Update,
    )
    .unwrap();
    harness
        .storage
        .save(Some(id), "Mutable", &updated)
        .await
        .unwrap();

    let record = harness.storage.load(id).await.unwrap().unwrap();
    assert_eq!(record.config.kind(), CarouselKind::Categories);
    assert!(record.config.show_dots);
    assert!(!record.config.show_arrows);
    assert_eq!(harness.storage.list().await.unwrap().len(), 1);
}

// ---- Configuration ----

#[test]
#[serial_test::serial]
fn env_overrides_the_placeholder_tag() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vitrine.toml");
    std::fs::write(&path, "[embed]\nplaceholder_tag = \"slider\"\n").unwrap();

    let from_file = vitrine_config::load_and_validate_path(&path).unwrap();
    assert_eq!(from_file.embed.placeholder_tag, "slider");

    // SAFETY: serialized with every other test that touches the environment.
    unsafe { std::env::set_var("VITRINE_EMBED_PLACEHOLDER_TAG", "gallery") };
    let overridden = vitrine_config::load_and_validate_path(&path);
    unsafe { std::env::remove_var("VITRINE_EMBED_PLACEHOLDER_TAG") };
    assert_eq!(overridden.unwrap().embed.placeholder_tag, "gallery");
}
