// Copyright 2026 the Zoetrope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame opportunities delivered by the backend.
//!
//! The carousel is driven by a per-frame callback (`requestAnimationFrame` on
//! the web). Each callback delivers a [`FrameTick`]; the carousel converts it
//! into an animation time, steps whatever is in flight, and produces scene
//! changes for the presenter. Pointer, resize, and visibility events arrive
//! between ticks on the same single-threaded loop.

use crate::time::HostTime;

/// A frame opportunity delivered by the backend's tick source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameTick {
    /// Host time when the tick was generated.
    pub now: HostTime,
    /// Monotonically increasing frame counter.
    pub frame_index: u64,
}

impl FrameTick {
    /// Creates a tick at the given time with the given frame counter.
    #[must_use]
    pub const fn new(now: HostTime, frame_index: u64) -> Self {
        Self { now, frame_index }
    }
}
