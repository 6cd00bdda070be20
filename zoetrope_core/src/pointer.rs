// Copyright 2026 the Zoetrope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer hit-testing and hover feedback.
//!
//! The camera sits on the +Z axis looking at the origin and every visual
//! object lives on the Z = 0 plane, so casting a ray through a pointer's
//! normalized device coordinates reduces to scaling the NDC by the half
//! extents of the visible frustum slice at the icon plane. Hit testing is
//! then point-in-rect against each candidate's current position and scale.
//!
//! Arrows are tested through an enlarged invisible hit square
//! ([`ARROW_HIT_HALF_EXTENT`]) so a near miss on the chevron still counts;
//! the icon is tested against its actual quad. Arrows win ties — they sit at
//! the edges where a generous icon quad could otherwise swallow clicks.

use kurbo::Point;

use crate::layout::Layout;
use crate::scene::{NavDir, VisualId, VisualStore};

/// Half extent of an arrow's invisible hit square, in world units, before
/// the arrow group scale is applied.
pub const ARROW_HIT_HALF_EXTENT: f32 = 1.25;

/// Half extent of an icon quad, in world units, before scaling.
pub const ICON_HALF_EXTENT: f32 = 1.0;

/// On the mobile tier a tap within this NDC band around center activates the
/// icon even when the quad itself is missed.
pub const MOBILE_TAP_TOLERANCE: f32 = 0.6;

/// Hover grows an arrow to this multiple of its resting scale.
const HOVER_SCALE_FACTOR: f32 = 1.2;
/// Hovered arrow opacity target.
const HOVER_OPACITY: f32 = 0.9;
/// Resting arrow opacity target.
const IDLE_OPACITY: f32 = 0.5;

// Fixed-fraction per-frame lerp factors. Frame-coupled on purpose: the feel
// is tuned against a ~60Hz callback cadence, and correcting for frame time
// would change it.
const SCALE_LERP: f32 = 0.15;
const OPACITY_LERP: f32 = 0.1;

/// Pointer position in normalized device coordinates (`-1..=1` on both
/// axes, +Y up).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ndc {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate, +Y up.
    pub y: f32,
}

impl Ndc {
    /// Converts surface-local pixel coordinates to NDC.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "pixel coordinates comfortably fit f32"
    )]
    pub fn from_surface(pos: Point, layout: &Layout) -> Self {
        let vp = layout.viewport;
        Self {
            x: (pos.x as f32 / vp.width) * 2.0 - 1.0,
            y: -((pos.y as f32 / vp.height) * 2.0 - 1.0),
        }
    }

    /// Projects the pointer ray onto the Z = 0 icon plane, in world units.
    #[must_use]
    pub fn to_icon_plane(self, layout: &Layout) -> (f32, f32) {
        (
            self.x * layout.visible_width() / 2.0,
            self.y * layout.visible_height() / 2.0,
        )
    }
}

/// What the pointer ray intersected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    /// A navigation arrow (via its enlarged hit square).
    Arrow(NavDir),
    /// The currently visible icon.
    Icon,
}

/// Casts the pointer against both arrows and the active icon.
///
/// `active_icon` is the icon currently shown; hidden icons are never hit.
#[must_use]
pub fn hit_test(
    store: &VisualStore,
    layout: &Layout,
    ndc: Ndc,
    arrows: [VisualId; 2],
    active_icon: VisualId,
) -> Option<HitTarget> {
    let (wx, wy) = ndc.to_icon_plane(layout);

    for arrow in arrows {
        let [px, py, _] = store.position(arrow);
        let half = ARROW_HIT_HALF_EXTENT * store.scale(arrow)[0];
        if (wx - px).abs() <= half && (wy - py).abs() <= half {
            if let crate::scene::VisualKind::Arrow { dir } = store.kind(arrow) {
                return Some(HitTarget::Arrow(dir));
            }
        }
    }

    if store.visible(active_icon) {
        let [px, py, _] = store.position(active_icon);
        let [sx, sy, _] = store.scale(active_icon);
        if (wx - px).abs() <= ICON_HALF_EXTENT * sx && (wy - py).abs() <= ICON_HALF_EXTENT * sy {
            return Some(HitTarget::Icon);
        }
    }

    None
}

/// Action derived from a click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickAction {
    /// Navigate one slide in the given direction.
    Navigate(NavDir),
    /// Activate the current icon (flash, then open its link).
    Activate,
}

/// Routes a click to an action, applying the mobile tap tolerance band when
/// the ray misses everything.
#[must_use]
pub fn route_click(
    store: &VisualStore,
    layout: &Layout,
    ndc: Ndc,
    arrows: [VisualId; 2],
    active_icon: VisualId,
) -> Option<ClickAction> {
    match hit_test(store, layout, ndc, arrows, active_icon) {
        Some(HitTarget::Arrow(dir)) => Some(ClickAction::Navigate(dir)),
        Some(HitTarget::Icon) => Some(ClickAction::Activate),
        None => {
            let central = ndc.x.abs() < MOBILE_TAP_TOLERANCE && ndc.y.abs() < MOBILE_TAP_TOLERANCE;
            (layout.is_mobile() && central && store.visible(active_icon))
                .then_some(ClickAction::Activate)
        }
    }
}

/// Per-frame hover feedback: the hovered arrow eases toward its enlarged
/// scale and bright opacity, the rest relax toward resting values.
///
/// The interpolation is a fixed fraction per frame (not time-corrected).
pub fn apply_hover_feedback(store: &mut VisualStore, arrows: [VisualId; 2], hovered: Option<NavDir>) {
    for arrow in arrows {
        let crate::scene::VisualKind::Arrow { dir } = store.kind(arrow) else {
            continue;
        };
        let base = store.base_scale(arrow);
        let is_hovered = hovered == Some(dir);
        let target_scale = if is_hovered {
            base * HOVER_SCALE_FACTOR
        } else {
            base
        };
        let target_opacity = if is_hovered { HOVER_OPACITY } else { IDLE_OPACITY };

        let scale = store.scale(arrow)[0];
        store.set_scale_xy(arrow, scale + (target_scale - scale) * SCALE_LERP);

        let opacity = store.opacity(arrow);
        store.set_opacity(arrow, opacity + (target_opacity - opacity) * OPACITY_LERP);
    }
}

#[cfg(test)]
mod tests {
    use crate::color::Tint;
    use crate::layout::Viewport;
    use crate::scene::VisualKind;

    use super::*;

    fn scene(viewport: Viewport) -> (VisualStore, Layout, [VisualId; 2], VisualId) {
        let mut store = VisualStore::new();
        let icon = store.add_icon(0, Tint::new(1.0, 1.0, 1.0), None);
        let left = store.add_arrow(NavDir::Previous, Tint::new(0.0, 0.8, 1.0));
        let right = store.add_arrow(NavDir::Next, Tint::new(0.0, 0.8, 1.0));
        let layout = Layout::resolve(viewport);

        // Place objects the way the carousel does after a resolve.
        for (arrow, dir) in [(left, NavDir::Previous), (right, NavDir::Next)] {
            store.set_position(arrow, [dir.sign() * layout.arrow_offset_x, layout.icon_base_y, 0.0]);
            store.set_scale(arrow, [layout.arrow_scale, layout.arrow_scale, 1.0]);
            store.set_base_scale(arrow, layout.arrow_scale);
        }
        store.set_visible(icon, true);
        store.set_position(icon, [0.0, layout.icon_base_y, 0.0]);
        store.set_scale_xyz(icon, layout.icon_scale);

        (store, layout, [left, right], icon)
    }

    /// NDC that lands exactly on the given world point.
    fn ndc_at(layout: &Layout, wx: f32, wy: f32) -> Ndc {
        Ndc {
            x: wx / (layout.visible_width() / 2.0),
            y: wy / (layout.visible_height() / 2.0),
        }
    }

    #[test]
    fn ndc_conversion_centers_and_flips_y() {
        let layout = Layout::resolve(Viewport::new(800.0, 600.0));
        let center = Ndc::from_surface(Point::new(400.0, 300.0), &layout);
        assert!((center.x).abs() < 1e-6 && (center.y).abs() < 1e-6);

        let top_left = Ndc::from_surface(Point::new(0.0, 0.0), &layout);
        assert_eq!((top_left.x, top_left.y), (-1.0, 1.0));
    }

    #[test]
    fn hits_icon_at_center() {
        let (store, layout, arrows, icon) = scene(Viewport::new(1440.0, 900.0));
        let ndc = ndc_at(&layout, 0.0, layout.icon_base_y);
        assert_eq!(
            hit_test(&store, &layout, ndc, arrows, icon),
            Some(HitTarget::Icon)
        );
    }

    #[test]
    fn hidden_icon_is_not_hit() {
        let (mut store, layout, arrows, icon) = scene(Viewport::new(1440.0, 900.0));
        store.set_visible(icon, false);
        let ndc = ndc_at(&layout, 0.0, layout.icon_base_y);
        assert_eq!(hit_test(&store, &layout, ndc, arrows, icon), None);
    }

    #[test]
    fn hits_arrow_through_enlarged_square() {
        let (store, layout, arrows, icon) = scene(Viewport::new(1440.0, 900.0));
        // Just outside the visible chevron but inside the hit square.
        let off = ARROW_HIT_HALF_EXTENT * layout.arrow_scale * 0.9;
        let ndc = ndc_at(&layout, -layout.arrow_offset_x + off, layout.icon_base_y);
        assert_eq!(
            hit_test(&store, &layout, ndc, arrows, icon),
            Some(HitTarget::Arrow(NavDir::Previous))
        );
    }

    #[test]
    fn miss_everything() {
        let (store, layout, arrows, icon) = scene(Viewport::new(1440.0, 900.0));
        let ndc = Ndc { x: 0.0, y: -0.95 };
        assert_eq!(hit_test(&store, &layout, ndc, arrows, icon), None);
    }

    #[test]
    fn mobile_tap_tolerance_activates_on_miss() {
        let (store, layout, arrows, icon) = scene(Viewport::new(375.0, 667.0));
        // Near-center NDC that misses the (small, lifted) icon quad.
        let ndc = Ndc { x: 0.5, y: -0.5 };
        assert_eq!(hit_test(&store, &layout, ndc, arrows, icon), None);
        assert_eq!(
            route_click(&store, &layout, ndc, arrows, icon),
            Some(ClickAction::Activate)
        );
    }

    #[test]
    fn desktop_miss_does_not_activate() {
        let (store, layout, arrows, icon) = scene(Viewport::new(1440.0, 900.0));
        let ndc = Ndc { x: 0.5, y: -0.5 };
        assert_eq!(route_click(&store, &layout, ndc, arrows, icon), None);
    }

    #[test]
    fn arrow_click_routes_to_navigation() {
        let (store, layout, arrows, icon) = scene(Viewport::new(1440.0, 900.0));
        let ndc = ndc_at(&layout, layout.arrow_offset_x, layout.icon_base_y);
        assert_eq!(
            route_click(&store, &layout, ndc, arrows, icon),
            Some(ClickAction::Navigate(NavDir::Next))
        );
    }

    #[test]
    fn hover_feedback_converges_on_targets() {
        let (mut store, layout, arrows, _icon) = scene(Viewport::new(1440.0, 900.0));
        let [left, right] = arrows;

        for _ in 0..120 {
            apply_hover_feedback(&mut store, arrows, Some(NavDir::Previous));
        }
        let grown = layout.arrow_scale * HOVER_SCALE_FACTOR;
        assert!((store.scale(left)[0] - grown).abs() < 1e-3);
        assert!((store.opacity(left) - HOVER_OPACITY).abs() < 1e-3);
        assert!((store.scale(right)[0] - layout.arrow_scale).abs() < 1e-3);
        assert!((store.opacity(right) - IDLE_OPACITY).abs() < 1e-3);

        // Relaxes back once the hover leaves.
        for _ in 0..120 {
            apply_hover_feedback(&mut store, arrows, None);
        }
        assert!((store.scale(left)[0] - layout.arrow_scale).abs() < 1e-3);
        assert!((store.opacity(left) - IDLE_OPACITY).abs() < 1e-3);
    }

    #[test]
    fn arrow_kind_is_preserved() {
        let (store, _, [left, right], _) = scene(Viewport::new(1440.0, 900.0));
        assert_eq!(store.kind(left), VisualKind::Arrow { dir: NavDir::Previous });
        assert_eq!(store.kind(right), VisualKind::Arrow { dir: NavDir::Next });
    }
}
