// Copyright 2026 the Zoetrope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser wiring for the carousel.
//!
//! [`mount`] measures the container, kicks off the all-settle asset load,
//! and — once every texture has settled — constructs the carousel, builds
//! the DOM presenter and panel, registers pointer / visibility / resize
//! listeners, and starts the `requestAnimationFrame` loop.
//!
//! A missing or zero-size container is a silent no-op: the carousel simply
//! does not render, matching the surrounding components' defensive pattern.
//! The mounted component lives for the page's lifetime; the `Rc` cycle
//! between the frame callback and the app state is intentional.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::Point;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlElement, MouseEvent, ResizeObserver};

use zoetrope_core::backend::{ScenePresenter as _, UiPanel as _};
use zoetrope_core::carousel::{Carousel, CarouselConfig, FrameOutput, TextureStatus};
use zoetrope_core::layout::Viewport;
use zoetrope_core::slide::SlideDeck;

use crate::loader::load_textures;
use crate::panel::{DomPanel, WindowNavigator};
use crate::presenter::CssPresenter;
use crate::raf::RafLoop;

struct App {
    carousel: Carousel,
    presenter: CssPresenter,
    panel: DomPanel,
    navigator: WindowNavigator,
    out: FrameOutput,
    // Held only to keep the frame loop alive for the component lifetime.
    _raf: Option<RafLoop>,
}

#[expect(
    clippy::cast_precision_loss,
    reason = "container dimensions are small integers"
)]
fn measure(container: &HtmlElement) -> Viewport {
    Viewport::new(container.client_width() as f32, container.client_height() as f32)
}

/// Mounts a carousel into `container`.
///
/// Asset loading happens first; construction proceeds only after every
/// texture settles (failures degrade their own slide). A zero-size
/// container aborts silently.
pub fn mount(container: HtmlElement, deck: SlideDeck, config: CarouselConfig) {
    if measure(&container).is_degenerate() {
        return;
    }
    let urls: Vec<String> = deck
        .items()
        .iter()
        .map(|item| item.asset_ref.clone())
        .collect();
    load_textures(&urls, move |statuses| boot(container, deck, statuses, config));
}

fn boot(
    container: HtmlElement,
    deck: SlideDeck,
    statuses: Vec<TextureStatus>,
    config: CarouselConfig,
) {
    let viewport = measure(&container);
    let asset_urls: Vec<String> = deck
        .items()
        .iter()
        .map(|item| item.asset_ref.clone())
        .collect();
    let Some(carousel) = Carousel::new(deck, &statuses, viewport, config) else {
        return;
    };

    let _ = container.style().set_property("position", "relative");

    let mut presenter = CssPresenter::new(container.clone(), carousel.layout());
    for (url, status) in asset_urls.into_iter().zip(&statuses) {
        if let TextureStatus::Loaded(surface) = status {
            presenter.register_surface(*surface, url);
        }
    }

    let Some(panel) = DomPanel::mount(container.clone()) else {
        web_sys::console::warn_1(&"zoetrope: panel setup failed, not mounting".into());
        return;
    };

    let app = Rc::new(RefCell::new(App {
        carousel,
        presenter,
        panel,
        navigator: WindowNavigator,
        out: FrameOutput::new(),
        _raf: None,
    }));

    attach_pointer_listeners(&container, &app);
    attach_visibility_listener(&app);
    attach_resize_observer(&container, &app);

    let raf = {
        let app = Rc::clone(&app);
        RafLoop::new(move |tick| {
            let mut state = app.borrow_mut();
            let App {
                carousel,
                presenter,
                panel,
                navigator,
                out,
                ..
            } = &mut *state;
            carousel.frame(tick, out);
            presenter.apply(carousel.store(), &out.changes, out.time);
            for event in &out.events {
                event.dispatch(panel, navigator);
            }
        })
    };
    raf.start();
    app.borrow_mut()._raf = Some(raf);
}

/// Surface-local pointer position from a mouse event.
fn local_position(container: &HtmlElement, event: &MouseEvent) -> Point {
    let rect = container.get_bounding_client_rect();
    Point::new(
        f64::from(event.client_x()) - rect.left(),
        f64::from(event.client_y()) - rect.top(),
    )
}

fn attach_pointer_listeners(container: &HtmlElement, app: &Rc<RefCell<App>>) {
    let move_cb = {
        let app = Rc::clone(app);
        let container = container.clone();
        Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let pos = local_position(&container, &event);
            let mut state = app.borrow_mut();
            if let Some(cursor) = state.carousel.pointer_moved(pos) {
                state.panel.set_cursor(cursor);
            }
        })
    };
    let _ = container
        .add_event_listener_with_callback("mousemove", move_cb.as_ref().unchecked_ref());
    move_cb.forget();

    let click_cb = {
        let app = Rc::clone(app);
        let container = container.clone();
        Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            let pos = local_position(&container, &event);
            app.borrow_mut().carousel.pointer_clicked(pos);
        })
    };
    let _ = container
        .add_event_listener_with_callback("click", click_cb.as_ref().unchecked_ref());
    click_cb.forget();
}

fn attach_visibility_listener(app: &Rc<RefCell<App>>) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let cb = {
        let app = Rc::clone(app);
        let document = document.clone();
        Closure::<dyn FnMut()>::new(move || {
            app.borrow_mut().carousel.set_page_visible(!document.hidden());
        })
    };
    let _ = document
        .add_event_listener_with_callback("visibilitychange", cb.as_ref().unchecked_ref());
    cb.forget();
}

fn attach_resize_observer(container: &HtmlElement, app: &Rc<RefCell<App>>) {
    let cb = {
        let app = Rc::clone(app);
        let container = container.clone();
        Closure::<dyn FnMut()>::new(move || {
            let viewport = measure(&container);
            let mut state = app.borrow_mut();
            state.carousel.resized(viewport);
            let layout = *state.carousel.layout();
            state.presenter.set_layout(&layout);
        })
    };
    if let Ok(observer) = ResizeObserver::new(cb.as_ref().unchecked_ref()) {
        observer.observe(container);
        // Keep the observer referenced so it is never garbage collected.
        core::mem::forget(observer);
    }
    cb.forget();
}
