// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules for carousel records and the catalog.

pub mod carousels;
pub mod catalog;
