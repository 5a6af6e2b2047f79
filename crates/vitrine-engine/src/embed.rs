// SPDX-FileCopyrightText: 2026 Vitrine Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embed placeholders of the form `[carousel id="N"]`.
//!
//! The tag name is configurable. The id attribute may be double-quoted,
//! single-quoted or bare; a missing or non-numeric id is kept as an empty
//! reference rather than rejected, so the caller can render nothing for it.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use vitrine_core::{CarouselId, VitrineError};

use crate::schema::parse_leading_int;

static ID_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?:^|\s)id\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"']+))"#).unwrap()
});

/// One placeholder found in a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// `None` when the id attribute is absent or has no leading integer.
    pub id: Option<i64>,
    /// Byte range of the whole placeholder in the scanned text.
    pub span: Range<usize>,
}

impl Placeholder {
    /// The referenced carousel, or `None` for an empty reference.
    pub fn carousel_id(&self) -> Option<CarouselId> {
        self.id.map(CarouselId).filter(|id| !id.is_empty())
    }
}

/// Scanner and renderer for one placeholder tag.
#[derive(Debug, Clone)]
pub struct PlaceholderSyntax {
    tag: String,
    pattern: Regex,
}

impl PlaceholderSyntax {
    pub fn new(tag: &str) -> Result<Self, VitrineError> {
        if tag.is_empty() {
            return Err(VitrineError::Config("placeholder tag must not be empty".into()));
        }
        let pattern = Regex::new(&format!(
            r"\[\s*{}(?:\s+([^\]]*?))?\s*/?\]",
            regex::escape(tag)
        ))
        .map_err(|e| VitrineError::Config(format!("invalid placeholder tag `{tag}`: {e}")))?;
        Ok(Self {
            tag: tag.to_string(),
            pattern,
        })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Every placeholder in `text`, in order of appearance.
    pub fn scan(&self, text: &str) -> Vec<Placeholder> {
        self.pattern
            .captures_iter(text)
            .map(|caps| placeholder_from(&caps))
            .collect()
    }

    /// Canonical placeholder text for a carousel.
    pub fn render(&self, id: CarouselId) -> String {
        format!("[{} id=\"{}\"]", self.tag, id)
    }

    /// Replace each placeholder with the output of `expand`.
    pub fn replace_with<F>(&self, text: &str, mut expand: F) -> String
    where
        F: FnMut(&Placeholder) -> String,
    {
        self.pattern
            .replace_all(text, |caps: &Captures<'_>| expand(&placeholder_from(caps)))
            .into_owned()
    }
}

fn placeholder_from(caps: &Captures<'_>) -> Placeholder {
    let whole = caps.get(0).map(|m| m.range()).unwrap_or_default();
    let id = caps
        .get(1)
        .and_then(|attrs| ID_ATTRIBUTE.captures(attrs.as_str()))
        .and_then(|c| c.get(1).or_else(|| c.get(2)).or_else(|| c.get(3)))
        .and_then(|m| parse_leading_int(m.as_str()));
    Placeholder { id, span: whole }
}
