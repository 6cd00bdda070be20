// Copyright 2026 the Zoetrope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! The carousel core is sans-IO: it owns the state machine and the visual
//! store, and everything that touches a real surface lives behind the traits
//! in this module. A backend provides:
//!
//! - **Tick source** — Delivers [`FrameTick`]s from a platform mechanism
//!   (`requestAnimationFrame` on the web). Setup and lifecycle differ too
//!   much across platforms to abstract behind a trait.
//! - **Presenter** — Implements [`ScenePresenter`] to map incremental
//!   [`SceneChanges`] onto a native scene (DOM elements, a WebGL scene, a
//!   test recorder).
//! - **Panel** — Implements [`UiPanel`]: the complete capability set the
//!   core needs from the DOM/CSS layer. The core never sees document
//!   structure.
//! - **Navigator** — Implements [`Navigator`] to open a slide's external
//!   link in a new browsing context.
//! - **Events** — Forwards pointer, resize, and visibility changes to the
//!   carousel's event methods between ticks.
//!
//! # Frame loop pseudocode
//!
//! ```rust,ignore
//! fn on_frame(tick: FrameTick) {
//!     carousel.frame(tick, &mut out);
//!     presenter.apply(carousel.store(), &out.changes, out.time);
//!     for event in &out.events {
//!         event.dispatch(&mut panel, &mut navigator);
//!     }
//! }
//! ```
//!
//! [`FrameTick`]: crate::tick::FrameTick
//! [`SceneChanges`]: crate::scene::SceneChanges

use crate::color::Tint;
use crate::scene::{SceneChanges, VisualStore};

/// Pointer cursor style reflecting the current hit-test state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cursor {
    /// Nothing interactive under the pointer.
    #[default]
    Default,
    /// The pointer is over an arrow or the active icon.
    Pointer,
}

/// Applies evaluated scene changes to a platform-native scene.
///
/// `time` is the material clock: monotonic seconds since the carousel's
/// first frame, fed every frame regardless of whether anything changed (the
/// shader scanline/noise effects are driven by it continuously).
pub trait ScenePresenter {
    /// Applies the given [`SceneChanges`], reading current property values
    /// from `store` as needed.
    fn apply(&mut self, store: &VisualStore, changes: &SceneChanges, time: f64);
}

/// The capability set the core needs from the UI text panel.
///
/// One method per capability, so a DOM panel, a test double, and a terminal
/// HUD can all implement it without the core knowing document structure.
pub trait UiPanel {
    /// Sets the panel title.
    fn set_title(&mut self, title: &str);
    /// Sets the panel subtitle.
    fn set_subtitle(&mut self, subtitle: &str);
    /// Sets the panel description line.
    fn set_description(&mut self, description: &str);
    /// Sets the accent color (title text, panel border).
    fn set_accent(&mut self, accent: Tint);
    /// Toggles the panel's container opacity for the cross-fade.
    fn set_panel_visible(&mut self, visible: bool);
    /// Updates the pointer cursor style.
    fn set_cursor(&mut self, cursor: Cursor);
}

/// Opens external links when an icon is activated.
pub trait Navigator {
    /// Opens `url` in a new browsing context.
    fn open_external(&mut self, url: &str);
}
