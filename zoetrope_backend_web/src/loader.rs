// Copyright 2026 the Zoetrope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! All-settle image loading.
//!
//! [`load_textures`] decodes every slide asset concurrently and invokes the
//! callback once per carousel, after *all* loads settle — success or
//! failure. A failed decode yields [`TextureStatus::Missing`] for that slide
//! only; nothing aborts, nothing retries. The carousel is constructed only
//! after settlement, so it never becomes interactive with assets in flight.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::HtmlImageElement;

use zoetrope_core::carousel::TextureStatus;
use zoetrope_core::scene::SurfaceId;

struct Pending {
    results: Vec<TextureStatus>,
    remaining: usize,
    on_settled: Option<Box<dyn FnOnce(Vec<TextureStatus>)>>,
}

impl Pending {
    fn settle_one(state: &Rc<RefCell<Self>>, index: usize, status: TextureStatus) {
        let mut pending = state.borrow_mut();
        pending.results[index] = status;
        pending.remaining -= 1;
        if pending.remaining == 0
            && let Some(callback) = pending.on_settled.take()
        {
            let results = core::mem::take(&mut pending.results);
            drop(pending);
            callback(results);
        }
    }
}

/// Starts decoding `urls` and calls `on_settled` with one
/// [`TextureStatus`] per URL (in order) once every load has settled.
///
/// Surface IDs are the URL indices. An empty list settles immediately.
pub fn load_textures(urls: &[String], on_settled: impl FnOnce(Vec<TextureStatus>) + 'static) {
    if urls.is_empty() {
        on_settled(Vec::new());
        return;
    }

    let state = Rc::new(RefCell::new(Pending {
        results: alloc::vec![TextureStatus::Missing; urls.len()],
        remaining: urls.len(),
        on_settled: Some(Box::new(on_settled)),
    }));

    for (index, url) in urls.iter().enumerate() {
        let Ok(img) = HtmlImageElement::new() else {
            Pending::settle_one(&state, index, TextureStatus::Missing);
            continue;
        };

        #[expect(
            clippy::cast_possible_truncation,
            reason = "slide counts are tiny"
        )]
        let surface = SurfaceId(index as u32);

        let on_load = {
            let state = Rc::clone(&state);
            Closure::once(move || {
                Pending::settle_one(&state, index, TextureStatus::Loaded(surface));
            })
        };
        let on_error = {
            let state = Rc::clone(&state);
            Closure::once(move || {
                Pending::settle_one(&state, index, TextureStatus::Missing);
            })
        };

        img.set_onload(Some(on_load.as_ref().unchecked_ref()));
        img.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        img.set_src(url);

        // One-shot init: the browser holds the image alive; the closures
        // are intentionally leaked so they survive until their single call.
        on_load.forget();
        on_error.forget();
    }
}
