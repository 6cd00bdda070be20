// Copyright 2026 the Zoetrope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slide transition sequencing.
//!
//! A [`Transition`] is the in-flight show/hide choreography between two
//! icons: the outgoing icon glitches, fades, and swells; the incoming icon
//! unfolds from a flattened strip with an elastic overshoot while its glitch
//! decays. The carousel holds at most one `Transition` — the option being
//! `Some` *is* the mutual-exclusion flag, and competing requests are dropped,
//! not queued.
//!
//! The panel copy swaps at [`UI_SWAP_DELAY`] after the request, halfway
//! through the outgoing fade, so the text changes "through" the cross-fade
//! instead of at request time. The slide index commits only at completion;
//! the outgoing icon is hidden at the same moment (deferred, so it never
//! pops out before its fade ends).

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::layout::Layout;
use crate::scene::{VisualId, VisualStore};
use crate::slide::SlideItem;
use crate::tween::{Easing, Timeline, Tween, TweenTarget};

/// Outgoing glitch ramp peak.
const OUT_GLITCH_PEAK: f32 = 4.0;
/// Outgoing glitch/fade/swell duration.
const OUT_DUR: f64 = 0.3;
/// Offset of the outgoing fade within the sequence.
const OUT_FADE_DELAY: f64 = 0.1;
/// Outgoing swell factor.
const OUT_SCALE_FACTOR: f32 = 1.2;

/// Incoming sequence delay on non-initial activations.
const IN_DELAY: f64 = 0.2;
/// Incoming glitch start value.
const IN_START_GLITCH: f32 = 3.0;
/// Incoming flattened-strip fraction of the target scale.
const IN_FLAT_FRACTION: f32 = 0.1;
/// Incoming elastic reveal duration.
const IN_SCALE_DUR: f64 = 0.8;
/// Incoming fade-in duration.
const IN_FADE_DUR: f64 = 0.4;
/// Incoming glitch decay duration.
const IN_GLITCH_DUR: f64 = 0.6;
/// Offset of the glitch decay after the incoming delay.
const IN_GLITCH_DELAY: f64 = 0.1;

/// Delay from request to the panel text swap.
pub const UI_SWAP_DELAY: f64 = 0.3;

/// Rate and amplitude of the bob-phase seed, matching the idle motion well
/// enough that the incoming icon does not visually snap.
const SEED_BOB_RATE: f64 = 1.5;
const SEED_BOB_AMPLITUDE: f32 = 0.08;

/// Whether a request is the initial activation (which may start while the
/// guard flag is set and skips the outgoing sequence).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    /// The very first reveal after initialization.
    First,
    /// Every later navigation.
    Normal,
}

/// Per-frame outcome of stepping a transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransitionTick {
    /// The panel copy should swap to the target slide this frame.
    pub ui_swap: bool,
    /// The transition reached its terminal state this frame.
    pub completed: bool,
}

/// An in-flight slide transition.
#[derive(Clone, Debug)]
pub struct Transition {
    target: usize,
    outgoing: VisualId,
    incoming: VisualId,
    timeline: Timeline,
    ui_swap_at: f64,
    ui_swapped: bool,
}

impl Transition {
    /// Starts a transition at animation time `now`, writing the incoming
    /// icon's setup state into the store and building the tween timeline.
    ///
    /// `outgoing` is the currently shown icon; on the first activation it is
    /// the same object as `incoming` and the outgoing sequence is skipped.
    #[must_use]
    pub fn begin(
        store: &mut VisualStore,
        layout: &Layout,
        item: &SlideItem,
        target: usize,
        outgoing: VisualId,
        incoming: VisualId,
        now: f64,
        activation: Activation,
    ) -> Self {
        let first = activation == Activation::First;
        let target_y = layout.icon_base_y + item.fix_y;
        let target_scale = layout.icon_scale * item.fix_scale;

        let mut timeline = Timeline::new();

        if !first {
            let out_scale = store.scale(outgoing)[0];
            timeline.add(Tween::new(
                TweenTarget::Glitch(outgoing),
                store.glitch(outgoing),
                OUT_GLITCH_PEAK,
                now,
                OUT_DUR,
                Easing::QuadOut,
            ));
            timeline.add(Tween::new(
                TweenTarget::Opacity(outgoing),
                store.opacity(outgoing),
                0.0,
                now + OUT_FADE_DELAY,
                OUT_DUR,
                Easing::QuadOut,
            ));
            timeline.add(Tween::new(
                TweenTarget::ScaleXy(outgoing),
                out_scale,
                out_scale * OUT_SCALE_FACTOR,
                now,
                OUT_DUR,
                Easing::QuadOut,
            ));
        }

        // Incoming setup: visible immediately, flattened, glitched, clear.
        store.set_visible(incoming, true);
        store.set_base_y(incoming, target_y);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "sine output is unit-range; f32 is plenty"
        )]
        let seeded_bob = ((now * SEED_BOB_RATE).sin() as f32) * SEED_BOB_AMPLITUDE;
        store.set_position_y(incoming, target_y + seeded_bob);
        store.set_scale(
            incoming,
            [
                target_scale * IN_FLAT_FRACTION,
                target_scale * IN_FLAT_FRACTION,
                target_scale,
            ],
        );
        store.set_opacity(incoming, 0.0);
        store.set_glitch(incoming, IN_START_GLITCH);

        let delay = if first { 0.0 } else { IN_DELAY };
        timeline.add(Tween::new(
            TweenTarget::ScaleXy(incoming),
            target_scale * IN_FLAT_FRACTION,
            target_scale,
            now + delay,
            IN_SCALE_DUR,
            Easing::REVEAL,
        ));
        timeline.add(Tween::new(
            TweenTarget::Opacity(incoming),
            0.0,
            1.0,
            now + delay,
            IN_FADE_DUR,
            Easing::QuadOut,
        ));
        timeline.add(Tween::new(
            TweenTarget::Glitch(incoming),
            IN_START_GLITCH,
            0.0,
            now + delay + IN_GLITCH_DELAY,
            IN_GLITCH_DUR,
            Easing::QuadOut,
        ));

        Self {
            target,
            outgoing,
            incoming,
            timeline,
            ui_swap_at: now + UI_SWAP_DELAY,
            ui_swapped: false,
        }
    }

    /// The slide index this transition reveals.
    #[must_use]
    pub fn target(&self) -> usize {
        self.target
    }

    /// Samples the timeline at animation time `t` and reports frame events.
    ///
    /// On the completing frame the outgoing icon is hidden here — unless it
    /// is the same object as the incoming one (the initial activation).
    pub fn step(&mut self, t: f64, store: &mut VisualStore) -> TransitionTick {
        self.timeline.sample(t, store);

        let mut tick = TransitionTick::default();
        if !self.ui_swapped && t >= self.ui_swap_at {
            self.ui_swapped = true;
            tick.ui_swap = true;
        }
        if self.timeline.finished(t) {
            if self.outgoing != self.incoming {
                store.set_visible(self.outgoing, false);
            }
            tick.completed = true;
        }
        tick
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use crate::color::Tint;
    use crate::layout::Viewport;

    use super::*;

    fn fixture() -> (VisualStore, Layout, SlideItem, VisualId, VisualId) {
        let mut store = VisualStore::new();
        let a = store.add_icon(0, Tint::new(1.0, 0.0, 0.0), None);
        let b = store.add_icon(1, Tint::new(0.0, 1.0, 0.0), None);
        let layout = Layout::resolve(Viewport::new(1440.0, 900.0));
        let item = SlideItem {
            asset_ref: String::new(),
            tint: Tint::new(0.0, 1.0, 0.0),
            title: String::new(),
            subtitle: String::new(),
            description: String::new(),
            link_url: String::new(),
            fix_y: -0.1,
            fix_scale: 0.95,
        };
        (store, layout, item, a, b)
    }

    #[test]
    fn incoming_setup_is_flattened_and_glitched() {
        let (mut store, layout, item, a, b) = fixture();
        store.set_visible(a, true);
        store.set_opacity(a, 1.0);
        store.set_scale_xyz(a, layout.icon_scale);

        let _tr = Transition::begin(
            &mut store,
            &layout,
            &item,
            1,
            a,
            b,
            0.0,
            Activation::Normal,
        );

        let target_scale = layout.icon_scale * item.fix_scale;
        assert!(store.visible(b), "incoming becomes visible immediately");
        assert_eq!(store.opacity(b), 0.0);
        assert_eq!(store.glitch(b), 3.0);
        let scale = store.scale(b);
        assert!((scale[0] - target_scale * 0.1).abs() < 1e-6);
        assert!((scale[2] - target_scale).abs() < 1e-6, "z stays full");
        assert!((store.base_y(b) - (layout.icon_base_y + item.fix_y)).abs() < 1e-6);
    }

    #[test]
    fn ui_swap_fires_once_at_midpoint() {
        let (mut store, layout, item, a, b) = fixture();
        let mut tr = Transition::begin(
            &mut store,
            &layout,
            &item,
            1,
            a,
            b,
            1.0,
            Activation::Normal,
        );

        assert!(!tr.step(1.2, &mut store).ui_swap, "too early");
        assert!(tr.step(1.31, &mut store).ui_swap, "fires at +0.3s");
        assert!(!tr.step(1.4, &mut store).ui_swap, "fires only once");
    }

    #[test]
    fn completes_when_longest_track_ends() {
        let (mut store, layout, item, a, b) = fixture();
        store.set_visible(a, true);
        let mut tr = Transition::begin(
            &mut store,
            &layout,
            &item,
            1,
            a,
            b,
            0.0,
            Activation::Normal,
        );

        // Longest incoming track: 0.2s delay + 0.8s elastic reveal.
        assert!(!tr.step(0.95, &mut store).completed);
        assert!(store.visible(a), "outgoing stays visible until the end");

        let tick = tr.step(1.0, &mut store);
        assert!(tick.completed);
        assert!(!store.visible(a), "deferred hide at completion");
        assert!(store.visible(b));
        assert_eq!(store.opacity(b), 1.0);
        let target_scale = layout.icon_scale * item.fix_scale;
        assert!((store.scale(b)[0] - target_scale).abs() < 1e-5);
        assert_eq!(store.glitch(b), 0.0);
    }

    #[test]
    fn first_activation_skips_outgoing_and_delay() {
        let (mut store, layout, item, _a, b) = fixture();
        let mut tr = Transition::begin(
            &mut store,
            &layout,
            &item,
            1,
            b,
            b,
            0.0,
            Activation::First,
        );

        // Longest track is the reveal alone: 0.8s.
        assert!(!tr.step(0.75, &mut store).completed);
        let tick = tr.step(0.8, &mut store);
        assert!(tick.completed);
        assert!(store.visible(b), "self-hide is guarded");
        assert_eq!(store.opacity(b), 1.0);
    }

    #[test]
    fn outgoing_sequence_fades_and_swells() {
        let (mut store, layout, item, a, b) = fixture();
        store.set_visible(a, true);
        store.set_opacity(a, 1.0);
        store.set_scale_xyz(a, 1.0);

        let mut tr = Transition::begin(
            &mut store,
            &layout,
            &item,
            1,
            a,
            b,
            0.0,
            Activation::Normal,
        );

        tr.step(0.45, &mut store);
        assert_eq!(store.opacity(a), 0.0, "fade done at 0.1 + 0.3");
        assert!((store.scale(a)[0] - 1.2).abs() < 1e-5, "swelled by 1.2x");
        assert_eq!(store.glitch(a), 4.0);
    }
}
