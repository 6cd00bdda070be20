// Copyright 2026 the Zoetrope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM element management.
//!
//! Translates [`VisualStore`] state into a set of positioned `<div>`
//! elements by applying incremental updates from [`SceneChanges`]. Material
//! inputs that the hologram stylesheet consumes (tint, glitch strength, the
//! shared clock) are written as CSS custom properties, so the actual
//! scanline/noise/glitch look lives entirely in CSS.
//!
//! [`VisualStore`]: zoetrope_core::scene::VisualStore
//! [`SceneChanges`]: zoetrope_core::scene::SceneChanges

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use wasm_bindgen::JsCast as _;
use web_sys::HtmlElement;

use zoetrope_core::backend::ScenePresenter;
use zoetrope_core::color::Tint;
use zoetrope_core::layout::Layout;
use zoetrope_core::scene::{SceneChanges, SurfaceId, VisualStore};

/// World-to-pixel projection parameters derived from a [`Layout`].
#[derive(Clone, Copy, Debug, Default)]
struct Projection {
    /// Pixels per world unit at the icon plane.
    px_per_unit: f64,
    /// Container center, in pixels.
    center_x: f64,
    center_y: f64,
}

impl Projection {
    fn from_layout(layout: &Layout) -> Self {
        Self {
            px_per_unit: f64::from(layout.viewport.height / layout.visible_height()),
            center_x: f64::from(layout.viewport.width) / 2.0,
            center_y: f64::from(layout.viewport.height) / 2.0,
        }
    }
}

/// Maps a [`VisualStore`] to live DOM elements, applying incremental updates
/// from [`SceneChanges`].
///
/// The presenter owns a container `HtmlElement` to which one child `<div>`
/// per visual object is added lazily. Call
/// [`apply`](ScenePresenter::apply) each frame with the latest changes.
pub struct CssPresenter {
    container: HtmlElement,
    elements: Vec<Option<HtmlElement>>,
    surfaces: Vec<Option<String>>,
    projection: Projection,
}

impl core::fmt::Debug for CssPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CssPresenter")
            .field("container", &"HtmlElement")
            .field("elements_len", &self.elements.len())
            .finish_non_exhaustive()
    }
}

impl CssPresenter {
    /// Creates a presenter that manages child elements of `container`.
    #[must_use]
    pub fn new(container: HtmlElement, layout: &Layout) -> Self {
        Self {
            container,
            elements: Vec::new(),
            surfaces: Vec::new(),
            projection: Projection::from_layout(layout),
        }
    }

    /// Registers the image URL backing a [`SurfaceId`], so content rebinds
    /// can resolve it.
    pub fn register_surface(&mut self, surface: SurfaceId, url: String) {
        let slot = surface.0 as usize;
        if self.surfaces.len() <= slot {
            self.surfaces.resize(slot + 1, None);
        }
        self.surfaces[slot] = Some(url);
    }

    /// Updates the projection after a container resize. Element transforms
    /// refresh on the next frame's change lists.
    pub fn set_layout(&mut self, layout: &Layout) {
        self.projection = Projection::from_layout(layout);
        let size = format!("{}px", 2.0 * self.projection.px_per_unit);
        for el in self.elements.iter().flatten() {
            let s = el.style();
            let _ = s.set_property("width", &size);
            let _ = s.set_property("height", &size);
        }
    }

    fn get_or_create(&mut self, idx: u32) -> Option<HtmlElement> {
        let slot = idx as usize;
        if self.elements.len() <= slot {
            self.elements.resize_with(slot + 1, || None);
        }
        if self.elements[slot].is_none() {
            let doc = self.container.owner_document()?;
            let el: HtmlElement = doc.create_element("div").ok()?.unchecked_into();
            let s = el.style();
            let _ = s.set_property("position", "absolute");
            let _ = s.set_property("left", "0");
            let _ = s.set_property("top", "0");
            let _ = s.set_property("pointer-events", "none");
            let size = format!("{}px", 2.0 * self.projection.px_per_unit);
            let _ = s.set_property("width", &size);
            let _ = s.set_property("height", &size);
            let _ = s.set_property("display", "none");
            el.set_class_name("holo-object");
            let _ = self.container.append_child(&el);
            self.elements[slot] = Some(el);
        }
        self.elements[slot].clone()
    }

    fn apply_transform(&self, el: &HtmlElement, store: &VisualStore, idx: u32) {
        let [x, y, _z] = store.position_at(idx);
        let [sx, sy, _sz] = store.scale_at(idx);
        let [rot_x, rot_y] = store.rotation_at(idx);
        let px = self.projection.center_x + f64::from(x) * self.projection.px_per_unit;
        let py = self.projection.center_y - f64::from(y) * self.projection.px_per_unit;
        let css = format!(
            "translate(-50%, -50%) translate({px}px, {py}px) \
             rotateX({rot_x}rad) rotateY({rot_y}rad) scale({sx}, {sy})"
        );
        let _ = el.style().set_property("transform", &css);
    }
}

fn css_color(tint: Tint) -> String {
    let [r, g, b] = tint.to_rgb8();
    format!("#{r:02x}{g:02x}{b:02x}")
}

impl ScenePresenter for CssPresenter {
    fn apply(&mut self, store: &VisualStore, changes: &SceneChanges, time: f64) {
        // Shared clock for the stylesheet's scanline/noise animation.
        let _ = self
            .container
            .style()
            .set_property("--holo-time", &format!("{time}"));

        for &idx in &changes.transforms {
            if let Some(el) = self.get_or_create(idx) {
                self.apply_transform(&el, store, idx);
            }
        }

        for &idx in &changes.materials {
            if let Some(el) = self.get_or_create(idx) {
                let s = el.style();
                let _ = s.set_property("opacity", &format!("{}", store.opacity_at(idx)));
                let _ = s.set_property("--holo-glitch", &format!("{}", store.glitch_at(idx)));
                let _ = s.set_property("--holo-tint", &css_color(store.tint_at(idx)));
            }
        }

        for &idx in &changes.visibility {
            if let Some(el) = self.get_or_create(idx) {
                if store.visible_at(idx) {
                    let _ = el.style().remove_property("display");
                } else {
                    let _ = el.style().set_property("display", "none");
                }
            }
        }

        for &idx in &changes.content {
            if let Some(el) = self.get_or_create(idx) {
                let s = el.style();
                let url = store
                    .content_at(idx)
                    .and_then(|surface| self.surfaces.get(surface.0 as usize))
                    .and_then(Option::as_deref);
                match url {
                    Some(url) => {
                        // The image is a mask: the tint supplies the color,
                        // the asset supplies the shape.
                        let _ = s.set_property("-webkit-mask-image", &format!("url({url})"));
                        let _ = s.set_property("mask-image", &format!("url({url})"));
                        let _ = s.set_property("background-color", "var(--holo-tint)");
                    }
                    None => {
                        // Untextured fallback: a translucent tinted panel.
                        let _ = s.remove_property("mask-image");
                        let _ = s.remove_property("-webkit-mask-image");
                        let _ = s.set_property("background-color", "var(--holo-tint)");
                    }
                }
            }
        }
    }
}
