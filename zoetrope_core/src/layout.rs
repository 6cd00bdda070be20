// Copyright 2026 the Zoetrope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Responsive layout resolution.
//!
//! Given the container's pixel dimensions, [`Layout::resolve`] derives the
//! world-space parameters for one of two tiers: a mobile tier that pulls the
//! camera back and lifts the icon clear of the text panel, and a desktop tier
//! that frames the icon larger and keeps the arrows compositionally closer to
//! center. There is deliberately no interpolation between tiers — each tier
//! is a tuned parameter set, selected by a single width threshold.
//!
//! The arrow offsets are expressed as fractions of the visible frustum width
//! at the camera distance, so the arrows hug the container edges on narrow
//! screens regardless of aspect ratio.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Viewport width below which the mobile tier is selected, in pixels.
pub const MOBILE_BREAKPOINT: f32 = 768.0;

/// Vertical field of view of the carousel camera, in radians (45 degrees).
pub const FOV_Y: f32 = 45.0 * core::f32::consts::PI / 180.0;

/// Measured container dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Container width.
    pub width: f32,
    /// Container height.
    pub height: f32,
}

impl Viewport {
    /// Creates a viewport from pixel dimensions.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns `true` when either dimension is zero or non-finite — such a
    /// container silently refuses to initialize.
    #[must_use]
    pub fn is_degenerate(self) -> bool {
        !(self.width.is_finite() && self.height.is_finite()) || self.width <= 0.0 || self.height <= 0.0
    }

    /// Width over height.
    #[must_use]
    pub fn aspect(self) -> f32 {
        self.width / self.height
    }
}

/// Responsive layout mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Narrow containers (width < [`MOBILE_BREAKPOINT`]).
    Mobile,
    /// Everything else.
    Desktop,
}

/// World-space parameters resolved from the container size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    /// The viewport this layout was resolved from.
    pub viewport: Viewport,
    /// Selected responsive tier.
    pub tier: Tier,
    /// Camera distance from the icon plane, in world units.
    pub camera_distance: f32,
    /// Uniform icon scale before per-slide corrections.
    pub icon_scale: f32,
    /// Icon base height (the bob anchor) before per-slide corrections.
    pub icon_base_y: f32,
    /// Horizontal distance of each arrow from center, in world units.
    pub arrow_offset_x: f32,
    /// Uniform arrow scale.
    pub arrow_scale: f32,
}

impl Layout {
    /// Resolves the layout for a container size.
    ///
    /// Tier parameters (camera distance, icon scale and height, arrow scale)
    /// are fixed per tier; only the arrow offset depends on the actual aspect
    /// ratio, via the visible frustum width at the camera distance.
    #[must_use]
    pub fn resolve(viewport: Viewport) -> Self {
        let aspect = viewport.aspect();
        if viewport.width < MOBILE_BREAKPOINT {
            let camera_distance = 9.5;
            Self {
                viewport,
                tier: Tier::Mobile,
                camera_distance,
                icon_scale: 0.9,
                icon_base_y: 1.3,
                arrow_offset_x: visible_width(camera_distance, aspect) * 0.42,
                arrow_scale: 0.65,
            }
        } else {
            let camera_distance = 6.0;
            Self {
                viewport,
                tier: Tier::Desktop,
                camera_distance,
                icon_scale: 1.35,
                icon_base_y: 0.8,
                arrow_offset_x: (visible_width(camera_distance, aspect) * 0.35).min(4.5),
                arrow_scale: 1.1,
            }
        }
    }

    /// Returns `true` for the mobile tier.
    #[must_use]
    pub fn is_mobile(&self) -> bool {
        self.tier == Tier::Mobile
    }

    /// Height of the visible frustum slice at the icon plane.
    #[must_use]
    pub fn visible_height(&self) -> f32 {
        visible_height(self.camera_distance)
    }

    /// Width of the visible frustum slice at the icon plane.
    #[must_use]
    pub fn visible_width(&self) -> f32 {
        visible_width(self.camera_distance, self.viewport.aspect())
    }
}

/// Visible frustum height at `distance` for the fixed [`FOV_Y`].
fn visible_height(distance: f32) -> f32 {
    2.0 * (FOV_Y / 2.0).tan() * distance
}

/// Visible frustum width at `distance` for the given aspect ratio.
fn visible_width(distance: f32, aspect: f32) -> f32 {
    visible_height(distance) * aspect
}
