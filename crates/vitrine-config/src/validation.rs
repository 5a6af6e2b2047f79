// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks constraints serde cannot express: non-empty paths, known log
//! levels, and a placeholder tag that can appear in content.

use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostic::ConfigError;
use crate::model::VitrineConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_-]*$").unwrap());

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first.
pub fn validate_config(config: &VitrineConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.general.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "general.log_level `{}` is not one of {}",
                config.general.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if !is_valid_tag(&config.embed.placeholder_tag) {
        errors.push(ConfigError::Validation {
            message: format!(
                "embed.placeholder_tag `{}` must start with a lowercase letter and contain \
                 only lowercase letters, digits, `_` or `-`",
                config.embed.placeholder_tag
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_valid_tag(tag: &str) -> bool {
    TAG_PATTERN.is_match(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_message(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&VitrineConfig::default()).is_ok());
    }

    #[test]
    fn empty_database_path_fails_validation() {
        let mut config = VitrineConfig::default();
        config.storage.database_path = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "database_path"));
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = VitrineConfig::default();
        config.general.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "log_level"));
    }

    #[test]
    fn log_level_is_case_insensitive() {
        let mut config = VitrineConfig::default();
        config.general.log_level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn placeholder_tag_rules() {
        assert!(is_valid_tag("carousel"));
        assert!(is_valid_tag("shop-slider_2"));
        assert!(!is_valid_tag(""));
        assert!(!is_valid_tag("2carousel"));
        assert!(!is_valid_tag("Carousel"));
        assert!(!is_valid_tag("car ousel"));
        assert!(!is_valid_tag("carousel]"));
        assert!(!is_valid_tag("carousel\n"));
    }

    #[test]
    fn all_failures_are_collected() {
        let mut config = VitrineConfig::default();
        config.general.log_level = "loud".to_string();
        config.storage.database_path = String::new();
        config.embed.placeholder_tag = "[x]".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
