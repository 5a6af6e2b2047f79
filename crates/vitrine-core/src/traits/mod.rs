// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits for the collaborators the engine depends on.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod catalog;
pub mod store;

pub use adapter::PluginAdapter;
pub use catalog::CatalogProvider;
pub use store::ConfigStore;
