// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Carousel commands: `resolve`, `embed`, `save`, `delete`, `list`.
//!
//! Each command returns the text to print so it can be tested without
//! capturing stdout.

use serde::Serialize;
use tracing::warn;
use vitrine_core::{
    CarouselId, ConfigStore, FieldViolation, ValidationError, VitrineError,
};
use vitrine_engine::{RawFields, ResolutionError, ResolvedCarousel, SaveMode, sanitize_title};

use crate::app::App;

/// Resolve one carousel as pretty JSON. Empty references and unknown ids
/// print nothing.
pub async fn resolve(app: &App, id: i64) -> Result<String, VitrineError> {
    match app.resolver().resolve(Some(CarouselId(id))).await {
        Ok(resolved) => Ok(serde_json::to_string_pretty(&resolved)?),
        Err(ResolutionError::Backend(e)) => Err(e),
        Err(e) => {
            warn!(carousel_id = id, "{e}");
            Ok(String::new())
        }
    }
}

#[derive(Serialize)]
struct EmbedResult<'a> {
    token: &'a str,
    carousel: Option<ResolvedCarousel>,
}

/// Resolve every placeholder in `text`, as a JSON array in order of
/// appearance. Placeholders that resolve to nothing carry `null`.
pub async fn embed(app: &App, text: &str) -> Result<String, VitrineError> {
    let syntax = app.placeholder_syntax()?;
    let resolved = app.resolver().resolve_text(&syntax, text).await?;
    let results: Vec<EmbedResult<'_>> = resolved
        .into_iter()
        .map(|(placeholder, carousel)| EmbedResult {
            token: &text[placeholder.span.clone()],
            carousel,
        })
        .collect();
    Ok(serde_json::to_string_pretty(&results)?)
}

/// Normalize raw fields and store them. Without `id` a new carousel is
/// created; with `id` the existing one is replaced.
pub async fn save(
    app: &App,
    id: Option<i64>,
    title: &str,
    fields: &[(String, String)],
) -> Result<String, VitrineError> {
    let title = sanitize_title(title);
    if title.is_empty() {
        return Err(ValidationError::new(vec![FieldViolation {
            field: "title".into(),
            value: String::new(),
            reason: "must not be empty".into(),
        }])
        .into());
    }

    let raw: RawFields = fields.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    let mode = if id.is_some() {
        SaveMode::Update
    } else {
        SaveMode::Create
    };
    let config = app.schema().normalize(&raw, mode)?;
    let saved = app
        .storage
        .save(id.map(CarouselId), &title, &config)
        .await?;
    Ok(format!(
        "saved carousel {saved} ({}): {}",
        config.kind(),
        app.placeholder_syntax()?.render(saved)
    ))
}

pub async fn delete(app: &App, id: i64) -> Result<String, VitrineError> {
    app.storage.delete(CarouselId(id)).await?;
    Ok(format!("deleted carousel {id}"))
}

/// Listing with the placeholder to paste for each carousel.
pub async fn list(app: &App) -> Result<String, VitrineError> {
    let syntax = app.placeholder_syntax()?;
    let summaries = app.storage.list().await?;
    if summaries.is_empty() {
        return Ok("no carousels".to_string());
    }
    let width = summaries
        .iter()
        .map(|s| s.title.chars().count())
        .max()
        .unwrap_or(0)
        .max(5);
    let mut out = format!("{:>4}  {:<width$}  {:<10}  PLACEHOLDER", "ID", "TITLE", "KIND");
    for s in summaries {
        out.push('\n');
        out.push_str(&format!(
            "{:>4}  {:<width$}  {:<10}  {}",
            s.id,
            s.title,
            s.kind.to_string(),
            syntax.render(s.id)
        ));
    }
    Ok(out)
}

/// Parse a `key=value` argument.
pub fn parse_field(arg: &str) -> Result<(String, String), String> {
    arg.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected key=value, got `{arg}`"))
}

#[cfg(test)]
mod tests {
    use vitrine_core::BoundsPolicy;
    use vitrine_test_utils::TestHarness;

    use super::*;

    async fn app() -> (App, TestHarness) {
        let harness = TestHarness::builder()
            .with_sample_catalog()
            .build()
            .await
            .unwrap();
        let app = App::from_parts(harness.config.clone(), harness.storage.clone());
        (app, harness)
    }

    fn fields(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn save_then_resolve_cheapest_lamps() {
        let (app, _h) = app().await;
        let out = save(
            &app,
            None,
            "Cheap <em>lamps</em>",
            &fields(&[
                ("kind", "products"),
                ("total_items", "3"),
                ("product_categories[]", "7"),
                ("products_orderby", "price"),
                ("products_order", "ASC"),
            ]),
        )
        .await
        .unwrap();
        assert_eq!(out, r#"saved carousel 1 (products): [carousel id="1"]"#);

        let json: serde_json::Value = serde_json::from_str(&resolve(&app, 1).await.unwrap()).unwrap();
        let ids: Vec<_> = json["entities"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(json["display"]["show_arrows"], true);

        let listing = list(&app).await.unwrap();
        assert!(listing.contains("Cheap lamps"));
    }

    #[tokio::test]
    async fn resolve_unknown_or_zero_prints_nothing() {
        let (app, _h) = app().await;
        assert_eq!(resolve(&app, 0).await.unwrap(), "");
        assert_eq!(resolve(&app, 99).await.unwrap(), "");
    }

    #[tokio::test]
    async fn update_mode_turns_absent_flags_off() {
        let (app, _h) = app().await;
        save(&app, None, "Cats", &fields(&[("kind", "categories")]))
            .await
            .unwrap();
        save(&app, Some(1), "Cats", &fields(&[("kind", "categories")]))
            .await
            .unwrap();
        let record = app.storage.load(CarouselId(1)).await.unwrap().unwrap();
        assert!(!record.config.show_arrows);
        assert!(!record.config.infinite_loop);
    }

    #[tokio::test]
    async fn empty_title_is_rejected() {
        let (app, _h) = app().await;
        let err = save(&app, None, "  <br> ", &[]).await.unwrap_err();
        assert!(matches!(err, VitrineError::Validation(ref v) if v.has_field("title")));
    }

    #[tokio::test]
    async fn reject_policy_surfaces_violations() {
        let harness = TestHarness::builder()
            .with_bounds_policy(BoundsPolicy::Reject)
            .build()
            .await
            .unwrap();
        let app = App::from_parts(harness.config.clone(), harness.storage.clone());
        let err = save(&app, None, "Big", &fields(&[("total_items", "500")]))
            .await
            .unwrap_err();
        assert!(matches!(err, VitrineError::Validation(ref v) if v.has_field("total_items")));
    }

    #[tokio::test]
    async fn embed_reports_each_token() {
        let (app, _h) = app().await;
        save(&app, None, "Top", &fields(&[("kind", "categories")]))
            .await
            .unwrap();
        let out = embed(&app, r#"Intro [carousel id="1"] and [carousel id="5"]"#)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json[0]["token"], r#"[carousel id="1"]"#);
        assert_eq!(json[0]["carousel"]["kind"], "categories");
        assert!(json[1]["carousel"].is_null());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (app, _h) = app().await;
        save(&app, None, "Gone", &[]).await.unwrap();
        assert_eq!(delete(&app, 1).await.unwrap(), "deleted carousel 1");
        delete(&app, 1).await.unwrap();
        assert_eq!(list(&app).await.unwrap(), "no carousels");
    }

    #[test]
    fn field_arguments_split_on_first_equals() {
        assert_eq!(
            parse_field("title=a=b").unwrap(),
            ("title".to_string(), "a=b".to_string())
        );
        assert!(parse_field("novalue").is_err());
        assert!(parse_field("=x").is_err());
    }
}
