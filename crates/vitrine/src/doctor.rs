// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `vitrine doctor` command implementation.
//!
//! Runs diagnostic checks against the configuration, the database and the
//! stored carousels.

use std::io::IsTerminal;
use std::time::{Duration, Instant};

use vitrine_config::VitrineConfig;
use vitrine_core::{ConfigStore, HealthStatus, PluginAdapter, VitrineError};
use vitrine_engine::PlaceholderSyntax;
use vitrine_storage::SqliteStorage;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>, start: Instant) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            duration: start.elapsed(),
        }
    }
}

/// Run the `vitrine doctor` command. With `plain`, disables colored output.
pub async fn run_doctor(config: &VitrineConfig, plain: bool) -> Result<String, VitrineError> {
    let use_color = !plain && std::io::stdout().is_terminal();
    let results = run_checks(config).await;
    Ok(render_report(&results, use_color))
}

pub async fn run_checks(config: &VitrineConfig) -> Vec<CheckResult> {
    let mut results = vec![check_config(config), check_placeholder(config)];

    let db_path = &config.storage.database_path;
    if !std::path::Path::new(db_path).exists() {
        let start = Instant::now();
        results.push(CheckResult::new(
            "Database",
            CheckStatus::Warn,
            format!("not found: {db_path} (will be created on first use)"),
            start,
        ));
        return results;
    }

    let start = Instant::now();
    let storage = SqliteStorage::new(config.storage.clone());
    match storage.initialize().await {
        Ok(()) => {
            results.push(check_storage_health(&storage, start).await);
            results.push(check_carousels(&storage).await);
        }
        Err(e) => results.push(CheckResult::new(
            "Database",
            CheckStatus::Fail,
            format!("open failed: {e}"),
            start,
        )),
    }
    results
}

fn check_config(config: &VitrineConfig) -> CheckResult {
    let start = Instant::now();
    match vitrine_config::validation::validate_config(config) {
        Ok(()) => CheckResult::new(
            "Configuration",
            CheckStatus::Pass,
            format!("valid (bounds policy: {})", config.schema.bounds_policy),
            start,
        ),
        Err(errors) => CheckResult::new(
            "Configuration",
            CheckStatus::Fail,
            format!("{} error(s)", errors.len()),
            start,
        ),
    }
}

fn check_placeholder(config: &VitrineConfig) -> CheckResult {
    let start = Instant::now();
    match PlaceholderSyntax::new(&config.embed.placeholder_tag) {
        Ok(syntax) => CheckResult::new(
            "Placeholder",
            CheckStatus::Pass,
            syntax.render(vitrine_core::CarouselId(1)),
            start,
        ),
        Err(e) => CheckResult::new("Placeholder", CheckStatus::Fail, e.to_string(), start),
    }
}

async fn check_storage_health(storage: &SqliteStorage, start: Instant) -> CheckResult {
    match storage.health_check().await {
        Ok(HealthStatus::Healthy) => {
            CheckResult::new("Database", CheckStatus::Pass, "connected", start)
        }
        Ok(HealthStatus::Degraded(reason)) => {
            CheckResult::new("Database", CheckStatus::Warn, reason, start)
        }
        Ok(HealthStatus::Unhealthy(reason)) => {
            CheckResult::new("Database", CheckStatus::Fail, reason, start)
        }
        Err(e) => CheckResult::new("Database", CheckStatus::Fail, e.to_string(), start),
    }
}

/// Every stored configuration must still decode.
async fn check_carousels(storage: &SqliteStorage) -> CheckResult {
    let start = Instant::now();
    let summaries = match storage.list().await {
        Ok(s) => s,
        Err(e) => return CheckResult::new("Carousels", CheckStatus::Fail, e.to_string(), start),
    };
    let mut broken = Vec::new();
    for summary in &summaries {
        if storage.load(summary.id).await.is_err() {
            broken.push(summary.id.to_string());
        }
    }
    if broken.is_empty() {
        CheckResult::new(
            "Carousels",
            CheckStatus::Pass,
            format!("{} stored", summaries.len()),
            start,
        )
    } else {
        CheckResult::new(
            "Carousels",
            CheckStatus::Fail,
            format!("unreadable: {}", broken.join(", ")),
            start,
        )
    }
}

pub fn render_report(results: &[CheckResult], use_color: bool) -> String {
    use colored::Colorize;

    let mut out = String::new();
    out.push_str("\n  vitrine doctor\n");
    out.push_str(&format!("  {}\n", "-".repeat(50)));

    let mut issues = 0;
    for result in results {
        let duration_ms = result.duration.as_millis();
        let (tag, message) = match (&result.status, use_color) {
            (CheckStatus::Pass, true) => ("✓".green().to_string(), result.message.normal()),
            (CheckStatus::Warn, true) => ("!".yellow().to_string(), result.message.yellow()),
            (CheckStatus::Fail, true) => ("✗".red().to_string(), result.message.red()),
            (CheckStatus::Pass, false) => ("[OK]  ".to_string(), result.message.normal()),
            (CheckStatus::Warn, false) => ("[WARN]".to_string(), result.message.normal()),
            (CheckStatus::Fail, false) => ("[FAIL]".to_string(), result.message.normal()),
        };
        if result.status != CheckStatus::Pass {
            issues += 1;
        }
        let message = if use_color {
            message.to_string()
        } else {
            result.message.clone()
        };
        out.push_str(&format!(
            "    {tag} {:<16} {message} ({duration_ms}ms)\n",
            result.name
        ));
    }

    out.push('\n');
    if issues > 0 {
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        out.push_str(&format!("  {issues} {issue_word} found.\n"));
    } else {
        out.push_str("  All checks passed.\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use vitrine_config::model::StorageConfig;
    use vitrine_test_utils::TestHarness;

    use super::*;

    fn find<'a>(results: &'a [CheckResult], name: &str) -> &'a CheckResult {
        results.iter().find(|r| r.name == name).unwrap()
    }

    #[tokio::test]
    async fn missing_database_warns_without_creating_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.db");
        let mut config = VitrineConfig::default();
        config.storage = StorageConfig {
            database_path: path.to_string_lossy().to_string(),
            wal_mode: true,
        };
        let results = run_checks(&config).await;
        assert_eq!(find(&results, "Database").status, CheckStatus::Warn);
        assert_eq!(find(&results, "Configuration").status, CheckStatus::Pass);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn seeded_database_passes() {
        let harness = TestHarness::builder()
            .with_sample_catalog()
            .build()
            .await
            .unwrap();
        let results = run_checks(&harness.config).await;
        assert_eq!(find(&results, "Database").status, CheckStatus::Pass);
        assert_eq!(find(&results, "Carousels").message, "0 stored");
        assert_eq!(find(&results, "Placeholder").message, r#"[carousel id="1"]"#);
    }

    #[tokio::test]
    async fn empty_catalog_warns() {
        let harness = TestHarness::builder().build().await.unwrap();
        let results = run_checks(&harness.config).await;
        assert_eq!(find(&results, "Database").status, CheckStatus::Warn);
    }

    #[test]
    fn empty_placeholder_tag_fails_both_checks() {
        let mut config = VitrineConfig::default();
        config.embed.placeholder_tag = String::new();
        assert_eq!(check_config(&config).status, CheckStatus::Fail);
        assert_eq!(check_placeholder(&config).status, CheckStatus::Fail);
    }

    #[test]
    fn plain_report_counts_issues() {
        let start = Instant::now();
        let report = render_report(
            &[
                CheckResult::new("Configuration", CheckStatus::Pass, "valid", start),
                CheckResult::new("Database", CheckStatus::Warn, "catalog is empty", start),
            ],
            false,
        );
        assert!(report.contains("[OK]   Configuration"));
        assert!(report.contains("[WARN] Database"));
        assert!(report.contains("1 issue found."));
    }
}
