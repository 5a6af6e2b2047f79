// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The carousel configuration model.
//!
//! [`CarouselConfig`] is the persisted unit. Type-specific settings live in
//! [`CarouselVariant`], so only the fields of the selected kind can exist.
//! Bounded numeric fields carry their limits as [`FieldBounds`] constants;
//! producing values inside those limits is the job of the schema normalizer.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::types::TermId;

/// Inclusive range and default for a bounded integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldBounds {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl FieldBounds {
    pub const fn new(min: u32, max: u32, default: u32) -> Self {
        Self { min, max, default }
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= i64::from(self.min) && value <= i64::from(self.max)
    }

    /// Clamp `value` to the nearest bound.
    pub fn clamp(&self, value: i64) -> u32 {
        // Both bounds fit in u32, so the clamped value does too.
        value.clamp(i64::from(self.min), i64::from(self.max)) as u32
    }
}

/// Total number of entities fetched for a carousel.
pub const TOTAL_ITEMS: FieldBounds = FieldBounds::new(1, 50, 12);

/// Slide transition duration in milliseconds.
pub const TRANSITION_SPEED_MS: FieldBounds = FieldBounds::new(100, 3000, 300);

/// What normalization does with a bounded value outside its range.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BoundsPolicy {
    /// Snap to the nearest bound.
    #[default]
    Clamp,
    /// Fail with a `ValidationError`.
    Reject,
}

/// Discriminant selecting which entities a carousel shows.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum CarouselKind {
    #[default]
    Products,
    Categories,
}

/// Responsive display tier, widest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Breakpoint {
    Desktop,
    Laptop,
    Tablet,
    Mobile,
}

impl Breakpoint {
    /// All breakpoints in display order (desktop first).
    pub const ALL: [Breakpoint; 4] = [
        Breakpoint::Desktop,
        Breakpoint::Laptop,
        Breakpoint::Tablet,
        Breakpoint::Mobile,
    ];

    /// Allowed items-per-screen range for this tier.
    pub fn bounds(self) -> FieldBounds {
        match self {
            Breakpoint::Desktop => FieldBounds::new(1, 6, 4),
            Breakpoint::Laptop => FieldBounds::new(1, 5, 3),
            Breakpoint::Tablet => FieldBounds::new(1, 4, 2),
            Breakpoint::Mobile => FieldBounds::new(1, 2, 1),
        }
    }

    /// Widest viewport (in CSS pixels) this tier applies to.
    /// Desktop is unbounded.
    pub fn max_width_px(self) -> Option<u32> {
        match self {
            Breakpoint::Desktop => None,
            Breakpoint::Laptop => Some(1366),
            Breakpoint::Tablet => Some(1024),
            Breakpoint::Mobile => Some(767),
        }
    }

    /// Raw form key carrying this tier's item count.
    pub fn field_name(self) -> &'static str {
        match self {
            Breakpoint::Desktop => "items_desktop",
            Breakpoint::Laptop => "items_laptop",
            Breakpoint::Tablet => "items_tablet",
            Breakpoint::Mobile => "items_mobile",
        }
    }
}

/// Items shown per screen for each breakpoint.
///
/// Each count is bounded independently; no ordering between tiers is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemsPerBreakpoint {
    pub desktop: u32,
    pub laptop: u32,
    pub tablet: u32,
    pub mobile: u32,
}

impl ItemsPerBreakpoint {
    pub fn get(&self, breakpoint: Breakpoint) -> u32 {
        match breakpoint {
            Breakpoint::Desktop => self.desktop,
            Breakpoint::Laptop => self.laptop,
            Breakpoint::Tablet => self.tablet,
            Breakpoint::Mobile => self.mobile,
        }
    }

    pub fn set(&mut self, breakpoint: Breakpoint, count: u32) {
        match breakpoint {
            Breakpoint::Desktop => self.desktop = count,
            Breakpoint::Laptop => self.laptop = count,
            Breakpoint::Tablet => self.tablet = count,
            Breakpoint::Mobile => self.mobile = count,
        }
    }

    /// Iterate `(breakpoint, count)` pairs, desktop first.
    pub fn iter(&self) -> impl Iterator<Item = (Breakpoint, u32)> + '_ {
        Breakpoint::ALL.into_iter().map(|bp| (bp, self.get(bp)))
    }
}

impl Default for ItemsPerBreakpoint {
    fn default() -> Self {
        Self {
            desktop: Breakpoint::Desktop.bounds().default,
            laptop: Breakpoint::Laptop.bounds().default,
            tablet: Breakpoint::Tablet.bounds().default,
            mobile: Breakpoint::Mobile.bounds().default,
        }
    }
}

/// Product ordering keys. `Display`/`FromStr` use the form values.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum ProductOrderBy {
    #[default]
    #[strum(to_string = "date")]
    Date,
    #[strum(to_string = "title")]
    Title,
    #[strum(to_string = "price")]
    Price,
    #[strum(to_string = "popularity")]
    Popularity,
    #[strum(to_string = "rand", serialize = "random")]
    Random,
}

/// Category ordering keys. `Display`/`FromStr` use the form values.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum CategoryOrderBy {
    #[default]
    #[strum(to_string = "name")]
    Name,
    #[strum(to_string = "id")]
    Id,
    #[strum(to_string = "count", serialize = "product_count")]
    ProductCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum OrderDirection {
    #[strum(to_string = "ASC")]
    Asc,
    #[strum(to_string = "DESC")]
    Desc,
}

/// Settings of a products carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSettings {
    /// Restrict to products in any of these categories. Empty = unfiltered.
    pub category_ids: BTreeSet<TermId>,
    /// Restrict to products with any of these tags. Empty = unfiltered.
    pub tag_ids: BTreeSet<TermId>,
    pub order_by: ProductOrderBy,
    pub direction: OrderDirection,
}

impl Default for ProductSettings {
    fn default() -> Self {
        Self {
            category_ids: BTreeSet::new(),
            tag_ids: BTreeSet::new(),
            order_by: ProductOrderBy::Date,
            direction: OrderDirection::Desc,
        }
    }
}

/// Settings of a categories carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySettings {
    /// Exact categories to show. Empty = top-level categories.
    pub selected: BTreeSet<TermId>,
    /// Drop categories without products from the final scope.
    pub only_non_empty: bool,
    pub order_by: CategoryOrderBy,
    pub direction: OrderDirection,
}

impl Default for CategorySettings {
    fn default() -> Self {
        Self {
            selected: BTreeSet::new(),
            only_non_empty: false,
            order_by: CategoryOrderBy::Name,
            direction: OrderDirection::Asc,
        }
    }
}

/// Kind-specific carousel settings, tagged by `kind` when persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CarouselVariant {
    Products(ProductSettings),
    Categories(CategorySettings),
}

impl CarouselVariant {
    pub fn kind(&self) -> CarouselKind {
        match self {
            CarouselVariant::Products(_) => CarouselKind::Products,
            CarouselVariant::Categories(_) => CarouselKind::Categories,
        }
    }
}

/// A complete, normalized carousel configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselConfig {
    pub total_items: u32,
    pub items: ItemsPerBreakpoint,
    pub autoplay: bool,
    pub transition_speed_ms: u32,
    pub show_arrows: bool,
    pub show_dots: bool,
    pub infinite_loop: bool,
    #[serde(flatten)]
    pub variant: CarouselVariant,
}

impl CarouselConfig {
    /// A configuration with every shared field at its default and the
    /// given kind-specific settings.
    pub fn with_variant(variant: CarouselVariant) -> Self {
        Self {
            total_items: TOTAL_ITEMS.default,
            items: ItemsPerBreakpoint::default(),
            autoplay: false,
            transition_speed_ms: TRANSITION_SPEED_MS.default,
            show_arrows: true,
            show_dots: true,
            infinite_loop: true,
            variant,
        }
    }

    pub fn kind(&self) -> CarouselKind {
        self.variant.kind()
    }

    /// The presentation parameters handed to a renderer, copied verbatim.
    pub fn display_params(&self) -> DisplayParams {
        DisplayParams {
            items: self.items,
            autoplay: self.autoplay,
            transition_speed_ms: self.transition_speed_ms,
            show_arrows: self.show_arrows,
            show_dots: self.show_dots,
            infinite_loop: self.infinite_loop,
        }
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self::with_variant(CarouselVariant::Products(ProductSettings::default()))
    }
}

/// Responsive and slider-behaviour parameters for a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayParams {
    pub items: ItemsPerBreakpoint,
    pub autoplay: bool,
    pub transition_speed_ms: u32,
    pub show_arrows: bool,
    pub show_dots: bool,
    pub infinite_loop: bool,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn clamp_snaps_to_nearest_bound() {
        assert_eq!(TOTAL_ITEMS.clamp(0), 1);
        assert_eq!(TOTAL_ITEMS.clamp(-7), 1);
        assert_eq!(TOTAL_ITEMS.clamp(999), 50);
        assert_eq!(TOTAL_ITEMS.clamp(20), 20);
        assert_eq!(TRANSITION_SPEED_MS.clamp(i64::MAX), 3000);
    }

    #[test]
    fn breakpoints_are_ordered_widest_first() {
        let widths: Vec<_> = Breakpoint::ALL.iter().map(|b| b.max_width_px()).collect();
        assert_eq!(widths, vec![None, Some(1366), Some(1024), Some(767)]);
        assert_eq!(Breakpoint::Mobile.bounds().max, 2);
    }

    #[test]
    fn order_keys_parse_form_values() {
        assert_eq!(ProductOrderBy::from_str("rand").unwrap(), ProductOrderBy::Random);
        assert_eq!(ProductOrderBy::from_str("Price").unwrap(), ProductOrderBy::Price);
        assert_eq!(CategoryOrderBy::from_str("count").unwrap(), CategoryOrderBy::ProductCount);
        assert_eq!(OrderDirection::from_str("desc").unwrap(), OrderDirection::Desc);
        assert_eq!(OrderDirection::Asc.to_string(), "ASC");
        assert_eq!(ProductOrderBy::Random.to_string(), "rand");
        assert!(ProductOrderBy::from_str("menu_order").is_err());
    }

    #[test]
    fn config_json_is_tagged_by_kind() {
        let config = CarouselConfig::with_variant(CarouselVariant::Categories(
            CategorySettings {
                selected: BTreeSet::from([5, 9]),
                only_non_empty: true,
                ..CategorySettings::default()
            },
        ));
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["kind"], "categories");
        assert_eq!(json["selected"], serde_json::json!([5, 9]));
        assert!(json.get("tag_ids").is_none());

        let back: CarouselConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
        assert_eq!(back.kind(), CarouselKind::Categories);
    }

    #[test]
    fn display_params_copy_presentation_fields() {
        let mut config = CarouselConfig::default();
        config.autoplay = true;
        config.items.set(Breakpoint::Tablet, 3);
        let params = config.display_params();
        assert!(params.autoplay);
        assert_eq!(params.items.tablet, 3);
        assert_eq!(params.transition_speed_ms, 300);
        assert!(params.show_arrows && params.show_dots && params.infinite_loop);
    }
}
