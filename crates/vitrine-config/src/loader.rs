// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Lookup order: `./vitrine.toml` > `~/.config/vitrine/vitrine.toml` >
//! `/etc/vitrine/vitrine.toml`, with `VITRINE_` environment overrides on top.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::VitrineConfig;

/// Config sections that environment variables may address.
const ENV_SECTIONS: &[&str] = &["general", "storage", "schema", "embed"];

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/vitrine/vitrine.toml";

/// Config file in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "vitrine.toml";

/// Per-user config file under the XDG config dir, if one can be determined.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("vitrine").join("vitrine.toml"))
}

/// Load configuration from the standard hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/vitrine/vitrine.toml`
/// 3. `~/.config/vitrine/vitrine.toml`
/// 4. `./vitrine.toml`
/// 5. `VITRINE_*` environment variables
pub fn load_config() -> Result<VitrineConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no file lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<VitrineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VitrineConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from an explicit file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<VitrineConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(VitrineConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The Figment used by [`load_config`], before extraction.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new()
        .merge(Serialized::defaults(VitrineConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH));
    if let Some(user) = user_config_path() {
        figment = figment.merge(Toml::file(user));
    }
    figment.merge(Toml::file(LOCAL_CONFIG_PATH)).merge(env_provider())
}

/// Environment provider mapping `VITRINE_<SECTION>_<KEY>` to `section.key`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `VITRINE_STORAGE_DATABASE_PATH` maps to `storage.database_path`.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("VITRINE_").map(|key| map_env_key(key.as_str()).into())
}

/// Figment hands the key over in its original (upper) case.
pub(crate) fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in ENV_SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(map_env_key("storage_database_path"), "storage.database_path");
        assert_eq!(map_env_key("schema_bounds_policy"), "schema.bounds_policy");
        assert_eq!(map_env_key("embed_placeholder_tag"), "embed.placeholder_tag");
        assert_eq!(map_env_key("general_log_level"), "general.log_level");
    }

    #[test]
    fn upper_case_env_keys_map_to_sections() {
        assert_eq!(map_env_key("STORAGE_WAL_MODE"), "storage.wal_mode");
        assert_eq!(map_env_key("EMBED_PLACEHOLDER_TAG"), "embed.placeholder_tag");
    }

    #[test]
    fn env_override_reaches_the_loaded_config() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("VITRINE_STORAGE_WAL_MODE", "false");
            jail.set_env("VITRINE_SCHEMA_BOUNDS_POLICY", "reject");
            let config = load_config().expect("env overrides should load");
            assert!(!config.storage.wal_mode);
            assert_eq!(config.schema.bounds_policy, vitrine_core::BoundsPolicy::Reject);
            Ok(())
        });
    }

    #[test]
    fn unknown_env_sections_pass_through() {
        assert_eq!(map_env_key("other_key"), "other_key");
        assert_eq!(map_env_key("storagex_path"), "storagex_path");
    }
}
