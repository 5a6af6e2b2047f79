// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Vitrine carousel engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a typo in a config
//! file is reported instead of silently ignored.

use serde::{Deserialize, Serialize};
use vitrine_core::BoundsPolicy;

/// Top-level Vitrine configuration.
///
/// Every section is optional and falls back to its defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VitrineConfig {
    /// Process-wide settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// SQLite config store and catalog settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Raw carousel field normalization.
    #[serde(default)]
    pub schema: SchemaConfig,

    /// Placeholder token settings.
    #[serde(default)]
    pub embed: EmbedConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("vitrine").join("vitrine.db"))
        .and_then(|p| p.to_str().map(str::to_string))
        .unwrap_or_else(|| "vitrine.db".to_string())
}

fn default_wal_mode() -> bool {
    true
}

/// Normalization policy for raw carousel fields.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    /// `clamp` snaps out-of-range numbers to the nearest bound,
    /// `reject` refuses the submission.
    #[serde(default)]
    pub bounds_policy: BoundsPolicy,
}

/// Placeholder token configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EmbedConfig {
    /// Tag name of the placeholder, as in `[carousel id="3"]`.
    #[serde(default = "default_placeholder_tag")]
    pub placeholder_tag: String,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            placeholder_tag: default_placeholder_tag(),
        }
    }
}

fn default_placeholder_tag() -> String {
    "carousel".to_string()
}
