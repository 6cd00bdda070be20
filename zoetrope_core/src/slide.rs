// Copyright 2026 the Zoetrope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slide data model.
//!
//! A [`SlideItem`] is one carousel entry: the icon asset, the accent tint,
//! the panel copy, and the link it opens. The per-item `fix_y` / `fix_scale`
//! corrections compensate for inconsistent asset framing and are carried as
//! declarative data so new assets never need code changes.
//!
//! A [`SlideDeck`] is the immutable ordered sequence. The index is the slide's
//! identity; all index arithmetic wraps modulo the deck length in both
//! directions.

use alloc::string::String;
use alloc::vec::Vec;

use crate::color::Tint;

/// One authored carousel entry.
#[derive(Clone, Debug, PartialEq)]
pub struct SlideItem {
    /// Backend-interpreted asset reference (a URL on the web).
    pub asset_ref: String,
    /// Accent color for the material tint and the UI panel.
    pub tint: Tint,
    /// Panel title.
    pub title: String,
    /// Panel subtitle.
    pub subtitle: String,
    /// Panel description line.
    pub description: String,
    /// External link opened when the icon is activated. Empty or `"#"` means
    /// the icon is inert.
    pub link_url: String,
    /// Vertical correction added to the resolved base height, in world units.
    pub fix_y: f32,
    /// Multiplier applied to the resolved icon scale.
    pub fix_scale: f32,
}

impl SlideItem {
    /// Returns `true` if activating this slide should open its link.
    #[must_use]
    pub fn has_link(&self) -> bool {
        !self.link_url.is_empty() && self.link_url != "#"
    }
}

/// The immutable ordered slide sequence.
#[derive(Clone, Debug)]
pub struct SlideDeck {
    items: Vec<SlideItem>,
}

impl SlideDeck {
    /// Creates a deck from authored items.
    ///
    /// Returns `None` for an empty list — a carousel with nothing to show
    /// never initializes (matching the silent no-op policy at the seam).
    #[must_use]
    pub fn new(items: Vec<SlideItem>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        Some(Self { items })
    }

    /// Number of slides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`: empty decks are rejected at construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the slide at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`; carousel indices are produced by
    /// [`wrap`](Self::wrap) and stay in range.
    #[must_use]
    pub fn item(&self, index: usize) -> &SlideItem {
        &self.items[index]
    }

    /// All slides in order.
    #[must_use]
    pub fn items(&self) -> &[SlideItem] {
        &self.items
    }

    /// Maps a signed index onto `0..len()`, wrapping in both directions.
    #[must_use]
    pub fn wrap(&self, index: isize) -> usize {
        let len = self.items.len() as isize;
        (((index % len) + len) % len) as usize
    }

    /// The slide after `index`, wrapping to 0 past the end.
    #[must_use]
    pub fn next(&self, index: usize) -> usize {
        self.wrap(index as isize + 1)
    }

    /// The slide before `index`, wrapping to the last slide below 0.
    #[must_use]
    pub fn previous(&self, index: usize) -> usize {
        self.wrap(index as isize - 1)
    }
}
