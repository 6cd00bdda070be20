// Copyright 2026 the Zoetrope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The visual store uses multi-channel dirty tracking (via
//! [`understory_dirty`]) so the presenter only rewrites what actually
//! changed. The carousel's scene is a flat set of objects — no hierarchy, so
//! no propagation edges; every channel is local-only.
//!
//! Callers never query dirty state directly. Each
//! [`VisualStore::evaluate_into`](crate::scene::VisualStore::evaluate_into)
//! call drains all channels and surfaces the results as
//! [`SceneChanges`](crate::scene::SceneChanges), which presenters consume to
//! apply incremental updates.

use understory_dirty::Channel;

/// Position, scale, or rotation changed.
pub const TRANSFORM: Channel = Channel::new(0);

/// Material inputs changed (tint, opacity, or glitch strength).
pub const MATERIAL: Channel = Channel::new(1);

/// Visibility flag flipped.
pub const VISIBILITY: Channel = Channel::new(2);

/// Texture binding changed.
pub const CONTENT: Channel = Channel::new(3);
