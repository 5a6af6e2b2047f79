// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Normalization of raw form submissions into [`CarouselConfig`].
//!
//! Input arrives as untyped key/value pairs ([`RawFields`]). Numbers are
//! read with a leading-integer parse and brought inside their bounds
//! according to the [`BoundsPolicy`]. Checkboxes are read as a tri-state
//! [`Flag`] and collapsed to a boolean only together with the caller's
//! [`SaveMode`], because an unchecked checkbox is never submitted and so
//! looks exactly like a field that was never shown.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use vitrine_core::carousel::{FieldBounds, TOTAL_ITEMS, TRANSITION_SPEED_MS};
use vitrine_core::{
    BoundsPolicy, Breakpoint, CarouselConfig, CarouselKind, CarouselVariant, CategoryOrderBy,
    CategorySettings, FieldViolation, ItemsPerBreakpoint, OrderDirection, ProductOrderBy,
    ProductSettings, TermId, ValidationError,
};

/// Raw form keys.
pub mod field {
    pub const TITLE: &str = "title";
    pub const KIND: &str = "kind";
    pub const TOTAL_ITEMS: &str = "total_items";
    pub const AUTOPLAY: &str = "autoplay";
    pub const TRANSITION_SPEED: &str = "transition_speed";
    pub const SHOW_ARROWS: &str = "show_arrows";
    pub const SHOW_DOTS: &str = "show_dots";
    pub const INFINITE_LOOP: &str = "infinite_loop";
    pub const PRODUCT_CATEGORIES: &str = "product_categories";
    pub const PRODUCT_TAGS: &str = "product_tags";
    pub const PRODUCTS_ORDER_BY: &str = "products_orderby";
    pub const PRODUCTS_ORDER: &str = "products_order";
    pub const SELECTED_CATEGORIES: &str = "selected_categories";
    pub const ONLY_NON_EMPTY: &str = "only_non_empty";
    pub const CATEGORIES_ORDER_BY: &str = "categories_orderby";
    pub const CATEGORIES_ORDER: &str = "categories_order";
}

/// An untyped form submission: every key maps to the values submitted
/// under it, in submission order.
///
/// List keys may be written PHP-style (`product_tags[]`); the brackets are
/// dropped on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFields {
    values: BTreeMap<String, Vec<String>>,
}

impl RawFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` under `key`.
    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        let key = key.as_ref();
        let key = key.strip_suffix("[]").unwrap_or(key);
        self.values
            .entry(key.to_string())
            .or_default()
            .push(value.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Remove every value under `key`.
    pub fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// First value submitted under `key`.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// All values submitted under `key`.
    pub fn all(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .flat_map(|(k, vs)| vs.iter().map(move |v| (k.as_str(), v.as_str())))
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for RawFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = RawFields::new();
        for (k, v) in iter {
            fields.insert(k, v);
        }
        fields
    }
}

/// Whether a submission creates a carousel or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    /// First save; absent default-on checkboxes are on.
    Create,
    /// Resubmission of an edit form; absent checkboxes were unchecked.
    Update,
}

/// A checkbox as seen at the form boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Absent,
    Unchecked,
    Checked,
}

impl Flag {
    /// Read a checkbox. Any value other than an explicit false-like one
    /// (`0`, `false`, `off`, `no`, or empty) counts as checked.
    pub fn read(raw: &RawFields, key: &str) -> Flag {
        match raw.first(key) {
            None => Flag::Absent,
            Some(v) => match v.trim().to_ascii_lowercase().as_str() {
                "" | "0" | "false" | "off" | "no" => Flag::Unchecked,
                _ => Flag::Checked,
            },
        }
    }

    /// Collapse to a boolean. `default_on` only matters for an absent
    /// checkbox on the first save.
    pub fn resolve(self, default_on: bool, mode: SaveMode) -> bool {
        match self {
            Flag::Checked => true,
            Flag::Unchecked => false,
            Flag::Absent => default_on && mode == SaveMode::Create,
        }
    }
}

/// Converts raw submissions into complete configurations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigSchema {
    policy: BoundsPolicy,
}

impl ConfigSchema {
    pub fn new(policy: BoundsPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> BoundsPolicy {
        self.policy
    }

    /// Normalize a raw submission into a complete [`CarouselConfig`].
    ///
    /// Fields of the variant not selected by `kind` are parsed and then
    /// discarded. Under [`BoundsPolicy::Clamp`] this never fails; under
    /// [`BoundsPolicy::Reject`] every out-of-range or non-numeric bounded
    /// field is reported.
    pub fn normalize(
        &self,
        raw: &RawFields,
        mode: SaveMode,
    ) -> Result<CarouselConfig, ValidationError> {
        let mut violations = Vec::new();

        let total_items = self.bounded(raw, field::TOTAL_ITEMS, TOTAL_ITEMS, &mut violations);
        let mut items = ItemsPerBreakpoint::default();
        for bp in Breakpoint::ALL {
            let count = self.bounded(raw, bp.field_name(), bp.bounds(), &mut violations);
            items.set(bp, count);
        }
        let transition_speed_ms = self.bounded(
            raw,
            field::TRANSITION_SPEED,
            TRANSITION_SPEED_MS,
            &mut violations,
        );

        let products = ProductSettings {
            category_ids: term_ids(raw, field::PRODUCT_CATEGORIES),
            tag_ids: term_ids(raw, field::PRODUCT_TAGS),
            order_by: choice(raw, field::PRODUCTS_ORDER_BY, ProductOrderBy::Date),
            direction: choice(raw, field::PRODUCTS_ORDER, OrderDirection::Desc),
        };
        let categories = CategorySettings {
            selected: term_ids(raw, field::SELECTED_CATEGORIES),
            only_non_empty: Flag::read(raw, field::ONLY_NON_EMPTY).resolve(false, mode),
            order_by: choice(raw, field::CATEGORIES_ORDER_BY, CategoryOrderBy::Name),
            direction: choice(raw, field::CATEGORIES_ORDER, OrderDirection::Asc),
        };
        let variant = match read_kind(raw) {
            CarouselKind::Products => CarouselVariant::Products(products),
            CarouselKind::Categories => CarouselVariant::Categories(categories),
        };

        if !violations.is_empty() {
            return Err(ValidationError::new(violations));
        }

        Ok(CarouselConfig {
            total_items,
            items,
            autoplay: Flag::read(raw, field::AUTOPLAY).resolve(false, mode),
            transition_speed_ms,
            show_arrows: Flag::read(raw, field::SHOW_ARROWS).resolve(true, mode),
            show_dots: Flag::read(raw, field::SHOW_DOTS).resolve(true, mode),
            infinite_loop: Flag::read(raw, field::INFINITE_LOOP).resolve(true, mode),
            variant,
        })
    }

    fn bounded(
        &self,
        raw: &RawFields,
        key: &str,
        bounds: FieldBounds,
        violations: &mut Vec<FieldViolation>,
    ) -> u32 {
        let Some(text) = raw.first(key).map(str::trim).filter(|t| !t.is_empty()) else {
            return bounds.default;
        };
        let parsed = parse_leading_int(text);
        match (self.policy, parsed) {
            (BoundsPolicy::Clamp, value) => bounds.clamp(value.unwrap_or(0)),
            (BoundsPolicy::Reject, Some(value)) if bounds.contains(value) => bounds.clamp(value),
            (BoundsPolicy::Reject, value) => {
                let reason = match value {
                    Some(_) => format!("must be between {} and {}", bounds.min, bounds.max),
                    None => "not an integer".to_string(),
                };
                violations.push(FieldViolation {
                    field: key.to_string(),
                    value: text.to_string(),
                    reason,
                });
                bounds.default
            }
        }
    }
}

/// Normalize with the default clamp policy.
pub fn normalize(raw: &RawFields, mode: SaveMode) -> Result<CarouselConfig, ValidationError> {
    ConfigSchema::default().normalize(raw, mode)
}

/// Serialize a configuration back into the raw fields it normalizes from.
///
/// Every checkbox is written explicitly (`0`/`1`), so the result normalizes
/// to the same configuration under either [`SaveMode`].
pub fn to_fields(config: &CarouselConfig) -> RawFields {
    let mut raw = RawFields::new()
        .with(field::KIND, config.kind().to_string())
        .with(field::TOTAL_ITEMS, config.total_items.to_string())
        .with(field::TRANSITION_SPEED, config.transition_speed_ms.to_string())
        .with(field::AUTOPLAY, flag_value(config.autoplay))
        .with(field::SHOW_ARROWS, flag_value(config.show_arrows))
        .with(field::SHOW_DOTS, flag_value(config.show_dots))
        .with(field::INFINITE_LOOP, flag_value(config.infinite_loop));
    for (bp, count) in config.items.iter() {
        raw.insert(bp.field_name(), count.to_string());
    }
    match &config.variant {
        CarouselVariant::Products(p) => {
            for id in &p.category_ids {
                raw.insert(field::PRODUCT_CATEGORIES, id.to_string());
            }
            for id in &p.tag_ids {
                raw.insert(field::PRODUCT_TAGS, id.to_string());
            }
            raw.insert(field::PRODUCTS_ORDER_BY, p.order_by.to_string());
            raw.insert(field::PRODUCTS_ORDER, p.direction.to_string());
        }
        CarouselVariant::Categories(c) => {
            for id in &c.selected {
                raw.insert(field::SELECTED_CATEGORIES, id.to_string());
            }
            raw.insert(field::ONLY_NON_EMPTY, flag_value(c.only_non_empty));
            raw.insert(field::CATEGORIES_ORDER_BY, c.order_by.to_string());
            raw.insert(field::CATEGORIES_ORDER, c.direction.to_string());
        }
    }
    raw
}

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Clean a carousel title: markup removed, whitespace collapsed, trimmed.
pub fn sanitize_title(title: &str) -> String {
    let stripped = TAG_PATTERN.replace_all(title, " ");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn flag_value(on: bool) -> &'static str {
    if on { "1" } else { "0" }
}

/// Only the literal `products` selects a products carousel; an absent kind
/// defaults to products and any other value selects categories.
fn read_kind(raw: &RawFields) -> CarouselKind {
    match raw.first(field::KIND).map(str::trim) {
        None => CarouselKind::Products,
        Some(v) if v.eq_ignore_ascii_case("products") => CarouselKind::Products,
        Some(_) => CarouselKind::Categories,
    }
}

/// Parse an enumerated choice, falling back to `default` when the value is
/// absent or unknown.
fn choice<T: FromStr>(raw: &RawFields, key: &str, default: T) -> T {
    raw.first(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Collect positive integer ids; anything else is dropped.
fn term_ids(raw: &RawFields, key: &str) -> BTreeSet<TermId> {
    raw.all(key)
        .iter()
        .filter_map(|v| v.trim().parse::<TermId>().ok())
        .filter(|id| *id > 0)
        .collect()
}

/// Parse an optional sign followed by leading digits, ignoring the rest
/// (`"12px"` is 12). Saturates instead of overflowing. `None` when there
/// are no leading digits.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let mut value: i64 = 0;
    let mut seen = false;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }
    seen.then(|| if negative { -value } else { value })
}
