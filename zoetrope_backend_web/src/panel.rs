// Copyright 2026 the Zoetrope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM UI panel and window navigator.
//!
//! [`DomPanel`] builds the glass text panel under the carousel and
//! implements the [`UiPanel`] capability set against it. [`WindowNavigator`]
//! opens activated links in a new browsing context.

use alloc::format;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use zoetrope_core::backend::{Cursor, Navigator, UiPanel};
use zoetrope_core::color::Tint;

#[wasm_bindgen]
extern "C" {
    // Direct binding; avoids unwrapping the Window object per call.
    #[wasm_bindgen(js_namespace = window, js_name = "open")]
    fn window_open(url: &str, target: &str);
}

/// The glass text panel at the bottom of the carousel container.
pub struct DomPanel {
    container: HtmlElement,
    panel: HtmlElement,
    title: HtmlElement,
    subtitle: HtmlElement,
    description: HtmlElement,
    host: HtmlElement,
}

impl core::fmt::Debug for DomPanel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPanel").finish_non_exhaustive()
    }
}

impl DomPanel {
    /// Builds the panel DOM inside `host` and returns the capability
    /// implementation, or `None` if element creation fails.
    #[must_use]
    pub fn mount(host: HtmlElement) -> Option<Self> {
        let doc = host.owner_document()?;
        let make = |tag: &str, class: &str| -> Option<HtmlElement> {
            let el: HtmlElement = doc.create_element(tag).ok()?.unchecked_into();
            el.set_class_name(class);
            Some(el)
        };

        let container = make("div", "holo-ui-container")?;
        {
            let s = container.style();
            let _ = s.set_property("position", "absolute");
            let _ = s.set_property("bottom", "25px");
            let _ = s.set_property("left", "0");
            let _ = s.set_property("width", "100%");
            let _ = s.set_property("pointer-events", "none");
            let _ = s.set_property("display", "flex");
            let _ = s.set_property("justify-content", "center");
            let _ = s.set_property("transition", "opacity 0.4s ease");
        }

        let panel = make("div", "holo-glass-panel")?;
        let title = make("h1", "holo-title")?;
        let subtitle = make("div", "holo-subtitle")?;
        let description = make("div", "holo-desc")?;

        panel.append_child(&title).ok()?;
        panel.append_child(&subtitle).ok()?;
        panel.append_child(&description).ok()?;
        container.append_child(&panel).ok()?;
        host.append_child(&container).ok()?;

        Some(Self {
            container,
            panel,
            title,
            subtitle,
            description,
            host,
        })
    }
}

impl UiPanel for DomPanel {
    fn set_title(&mut self, title: &str) {
        self.title.set_text_content(Some(title));
    }

    fn set_subtitle(&mut self, subtitle: &str) {
        self.subtitle.set_text_content(Some(subtitle));
    }

    fn set_description(&mut self, description: &str) {
        self.description.set_text_content(Some(description));
    }

    fn set_accent(&mut self, accent: Tint) {
        let [r, g, b] = accent.to_rgb8();
        let color = format!("#{r:02x}{g:02x}{b:02x}");
        let _ = self.title.style().set_property("color", &color);
        let _ = self
            .panel
            .style()
            .set_property("border-top-color", &color);
        let _ = self
            .panel
            .style()
            .set_property("box-shadow", &format!("0 10px 40px {color}20"));
    }

    fn set_panel_visible(&mut self, visible: bool) {
        let _ = self
            .container
            .style()
            .set_property("opacity", if visible { "1" } else { "0" });
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        let _ = self.host.style().set_property(
            "cursor",
            match cursor {
                Cursor::Pointer => "pointer",
                Cursor::Default => "default",
            },
        );
    }
}

/// Opens activated links via `window.open(url, "_blank")`.
#[derive(Clone, Copy, Debug, Default)]
pub struct WindowNavigator;

impl Navigator for WindowNavigator {
    fn open_external(&mut self, url: &str) {
        window_open(url, "_blank");
    }
}
