// Copyright 2026 the Zoetrope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for zoetrope.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`RafLoop`]: `requestAnimationFrame` tick source
//! - [`CssPresenter`]: DOM/CSS scene presentation
//! - [`DomPanel`] / [`WindowNavigator`]: the UI capability set
//! - [`load_textures`]: all-settle slide asset loading
//! - [`mount`]: one-call wiring of the above into a container element

#![no_std]

extern crate alloc;

mod loader;
mod panel;
mod presenter;
mod raf;
mod runtime;

pub use loader::load_textures;
pub use panel::{DomPanel, WindowNavigator};
pub use presenter::CssPresenter;
pub use raf::RafLoop;
pub use runtime::mount;
pub use zoetrope_core::backend::{Navigator, ScenePresenter, UiPanel};
