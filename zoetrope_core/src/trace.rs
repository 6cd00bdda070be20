// Copyright 2026 the Zoetrope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the carousel loop.
//!
//! [`TraceSink`] is a trait with per-event methods that the carousel calls
//! at each notable point in its lifecycle. All methods default to no-ops, so
//! implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace`
//! feature is **off**, every `Tracer` method compiles to nothing; when
//! **on**, each performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies.
//! - `trace-rich` (implies `trace`) — gates the per-frame scene-change
//!   counts event.

use crate::pointer::HitTarget;
use crate::time::HostTime;

/// Emitted when the backend delivers a frame tick.
#[derive(Clone, Copy, Debug)]
pub struct FrameTickEvent {
    /// Monotonic frame counter.
    pub frame_index: u64,
    /// Host time of the tick.
    pub now: HostTime,
}

/// Emitted when a slide transition is accepted and begins.
#[derive(Clone, Copy, Debug)]
pub struct TransitionBeginEvent {
    /// Slide index being left.
    pub from: u32,
    /// Slide index being revealed.
    pub to: u32,
    /// Whether this is the initial activation.
    pub first: bool,
    /// Animation time at the request, in seconds.
    pub at: f64,
}

/// Emitted when a transition completes and the index commits.
#[derive(Clone, Copy, Debug)]
pub struct TransitionEndEvent {
    /// The now-current slide index.
    pub index: u32,
    /// Animation time at completion, in seconds.
    pub at: f64,
}

/// Emitted when a slide request is dropped by the mutual-exclusion guard.
#[derive(Clone, Copy, Debug)]
pub struct RequestDroppedEvent {
    /// The requested slide index.
    pub target: u32,
}

/// Emitted when the autoplay timer fires and issues a request.
#[derive(Clone, Copy, Debug)]
pub struct AutoplayFireEvent {
    /// The slide index being requested.
    pub target: u32,
}

/// Emitted when a click resolves against a hit target.
#[derive(Clone, Copy, Debug)]
pub struct PointerHitEvent {
    /// What the click hit.
    pub target: HitTarget,
}

/// Emitted when the panel copy swaps mid-transition.
#[derive(Clone, Copy, Debug)]
pub struct UiSwapEvent {
    /// The slide whose copy is now shown.
    pub index: u32,
}

/// Emitted when an icon activation opens its external link.
#[derive(Clone, Copy, Debug)]
pub struct LinkOpenEvent {
    /// The slide whose link opened.
    pub index: u32,
}

/// Per-frame change-list sizes (requires the `trace-rich` feature).
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug)]
pub struct SceneChangeCounts {
    /// Objects with transform changes.
    pub transforms: u32,
    /// Objects with material changes.
    pub materials: u32,
    /// Objects whose visibility flipped.
    pub visibility: u32,
    /// Objects whose texture binding changed.
    pub content: u32,
}

/// Receives trace events from the carousel.
///
/// All methods have default no-op implementations.
pub trait TraceSink {
    /// Called when a frame tick is received.
    fn on_frame_tick(&mut self, e: &FrameTickEvent) {
        _ = e;
    }

    /// Called when a transition begins.
    fn on_transition_begin(&mut self, e: &TransitionBeginEvent) {
        _ = e;
    }

    /// Called when a transition completes.
    fn on_transition_end(&mut self, e: &TransitionEndEvent) {
        _ = e;
    }

    /// Called when a slide request is dropped.
    fn on_request_dropped(&mut self, e: &RequestDroppedEvent) {
        _ = e;
    }

    /// Called when autoplay fires.
    fn on_autoplay_fire(&mut self, e: &AutoplayFireEvent) {
        _ = e;
    }

    /// Called when a click hits an interactive target.
    fn on_pointer_hit(&mut self, e: &PointerHitEvent) {
        _ = e;
    }

    /// Called when the panel copy swaps.
    fn on_ui_swap(&mut self, e: &UiSwapEvent) {
        _ = e;
    }

    /// Called when an external link opens.
    fn on_link_open(&mut self, e: &LinkOpenEvent) {
        _ = e;
    }

    /// Called with per-frame change counts (requires `trace-rich`).
    #[cfg(feature = "trace-rich")]
    fn on_scene_changes(&mut self, frame_index: u64, counts: &SceneChangeCounts) {
        _ = (frame_index, counts);
    }
}

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

/// Thin wrapper around an optional [`TraceSink`].
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to `sink`.
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that records nothing.
    #[must_use]
    pub fn disabled() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }
}

macro_rules! tracer_method {
    ($(#[$doc:meta])* $name:ident, $sink_method:ident, $event:ty) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&mut self, e: &$event) {
            #[cfg(feature = "trace")]
            if let Some(sink) = self.sink.as_deref_mut() {
                sink.$sink_method(e);
            }
            #[cfg(not(feature = "trace"))]
            {
                _ = e;
            }
        }
    };
}

impl Tracer<'_> {
    tracer_method!(
        /// Reports a frame tick.
        frame_tick, on_frame_tick, FrameTickEvent
    );
    tracer_method!(
        /// Reports a transition beginning.
        transition_begin, on_transition_begin, TransitionBeginEvent
    );
    tracer_method!(
        /// Reports a transition completing.
        transition_end, on_transition_end, TransitionEndEvent
    );
    tracer_method!(
        /// Reports a dropped slide request.
        request_dropped, on_request_dropped, RequestDroppedEvent
    );
    tracer_method!(
        /// Reports an autoplay fire.
        autoplay_fire, on_autoplay_fire, AutoplayFireEvent
    );
    tracer_method!(
        /// Reports a click hit.
        pointer_hit, on_pointer_hit, PointerHitEvent
    );
    tracer_method!(
        /// Reports a panel copy swap.
        ui_swap, on_ui_swap, UiSwapEvent
    );
    tracer_method!(
        /// Reports an external link opening.
        link_open, on_link_open, LinkOpenEvent
    );

    /// Reports per-frame scene-change counts (requires `trace-rich`).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn scene_changes(&mut self, frame_index: u64, counts: &SceneChangeCounts) {
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.on_scene_changes(frame_index, counts);
        }
    }
}
