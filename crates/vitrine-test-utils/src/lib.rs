// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Vitrine integration tests.
//!
//! Provides mock adapters and test harness infrastructure for fast,
//! deterministic, CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockConfigStore`] - in-memory carousel store with failure injection
//! - [`MockCatalog`] - in-memory catalog that executes product queries
//! - [`TestHarness`] - temp SQLite storage seeded with a sample catalog

pub mod harness;
pub mod mock_catalog;
pub mod mock_store;

pub use harness::{TestHarness, sample_catalog};
pub use mock_catalog::MockCatalog;
pub use mock_store::MockConfigStore;
