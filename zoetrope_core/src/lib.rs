// Copyright 2026 the Zoetrope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core state machine, layout, and hit-testing for the hologram carousel.
//!
//! `zoetrope_core` owns everything about the carousel that is not a platform
//! concern: which slide is active, how transitions sequence, where objects
//! sit for a given container size, and what a pointer hit. It is `no_std`
//! compatible (with `alloc`) and completely sans-IO — wall time, pointer
//! positions, and decoded textures are all injected, which is what makes the
//! state machine deterministic and testable.
//!
//! # Architecture
//!
//! The crate is organized around a frame loop that turns platform display
//! callbacks into incremental scene updates:
//!
//! ```text
//!   Backend (tick source, pointer/resize/visibility events)
//!       │
//!       ▼
//!   Carousel::frame() ──► steps autoplay, transition, effects, idle motion
//!       │
//!       ▼
//!   VisualStore::evaluate_into() ──► SceneChanges ──► ScenePresenter::apply()
//!                                    CarouselEvents ──► UiPanel / Navigator
//! ```
//!
//! **[`slide`]** — Authored slide data and wrap-around index arithmetic.
//!
//! **[`layout`]** — Two-tier responsive parameter resolution from the
//! container size, via the visible-frustum math of the fixed 45° camera.
//!
//! **[`scene`]** — Struct-of-arrays visual object store with multi-channel
//! dirty tracking. Mutations mark channels; evaluation drains them into
//! [`SceneChanges`](scene::SceneChanges) for the presenter.
//!
//! **[`tween`]** — Scalar tweens and timelines: quadratic and elastic
//! easing, yoyo/repeat cycling, absolute-time sampling.
//!
//! **[`transition`]** — The show/hide state machine: glitch-out, flattened
//! elastic reveal, midpoint panel swap, deferred hide, single-flight guard.
//!
//! **[`pointer`]** — NDC conversion, ray/plane hit-testing against the
//! arrows' enlarged hit squares and the active icon, hover feedback.
//!
//! **[`autoplay`]** — Phase-preserving interval timer polled from the frame
//! loop.
//!
//! **[`carousel`]** — The orchestrator tying it all together.
//!
//! **[`backend`]** — The [`ScenePresenter`](backend::ScenePresenter),
//! [`UiPanel`](backend::UiPanel), and [`Navigator`](backend::Navigator)
//! traits platform backends implement.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types for
//! loop instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one
//!   branch per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates the
//!   per-frame scene-change count events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod autoplay;
pub mod backend;
pub mod carousel;
pub mod color;
pub mod dirty;
pub mod layout;
pub mod pointer;
pub mod scene;
pub mod slide;
pub mod tick;
pub mod time;
pub mod trace;
pub mod transition;
pub mod tween;
