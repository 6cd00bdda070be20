// Copyright 2026 the Zoetrope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar tweens and timelines.
//!
//! Transitions are authored as a [`Timeline`]: a set of [`Tween`]s with
//! absolute start times, fixed durations, an easing curve, and optional
//! yoyo/repeat cycling. Sampling a timeline at an animation time writes the
//! current values straight into the [`VisualStore`]; there are no callbacks
//! and no retained per-frame state, so a timeline can be sampled at any time
//! in any order and always lands on its terminal values.
//!
//! Before a tween's start time it contributes nothing (the property keeps
//! whatever value the setup wrote). Tweens are applied in declaration order,
//! so a later tween targeting the same property wins.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use alloc::vec::Vec;

use crate::scene::{VisualId, VisualStore};

/// Interpolation curve over normalized time `t ∈ [0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    /// Straight interpolation.
    Linear,
    /// Quadratic ease-out (starts fast, settles). The default curve for
    /// fades and glitch ramps.
    QuadOut,
    /// Elastic overshoot-then-settle with amplitude 1 and the given period.
    /// Used for the incoming icon's reveal and arrow press feedback.
    ElasticOut {
        /// Oscillation period; smaller is snappier.
        period: f32,
    },
}

impl Easing {
    /// The elastic curve of the incoming icon reveal.
    pub const REVEAL: Self = Self::ElasticOut { period: 0.75 };

    /// The elastic curve of the arrow press bounce.
    pub const BOUNCE: Self = Self::ElasticOut { period: 0.3 };

    /// Applies the curve to a normalized time, clamped to `[0, 1]` outside
    /// the unit interval.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Linear => t,
            Self::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::ElasticOut { period } => {
                let p = period.max(1e-3);
                2.0_f32.powf(-10.0 * t) * ((t - p / 4.0) * core::f32::consts::TAU / p).sin() + 1.0
            }
        }
    }
}

/// Which store property a tween drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenTarget {
    /// Material opacity.
    Opacity(VisualId),
    /// Material glitch strength.
    Glitch(VisualId),
    /// X and Y scale (the flattened reveal keeps Z).
    ScaleXy(VisualId),
    /// Uniform scale on all axes.
    ScaleXyz(VisualId),
    /// The vertical bob anchor (used for resize retargeting).
    BaseY(VisualId),
}

/// A single scalar animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    /// Property being driven.
    pub target: TweenTarget,
    /// Value at the start of each forward cycle.
    pub from: f32,
    /// Value at the end of each forward cycle.
    pub to: f32,
    /// Absolute animation time at which the tween begins, in seconds.
    pub start: f64,
    /// Duration of one cycle, in seconds.
    pub duration: f64,
    /// Easing curve applied within each cycle.
    pub easing: Easing,
    /// Extra cycles after the first (`1` plays twice).
    pub repeat: u32,
    /// Reverse direction on odd cycles; with `repeat: 1` the tween returns
    /// to `from` (the glitch double-pulse).
    pub yoyo: bool,
}

impl Tween {
    /// A plain one-shot tween with the given curve.
    #[must_use]
    pub fn new(
        target: TweenTarget,
        from: f32,
        to: f32,
        start: f64,
        duration: f64,
        easing: Easing,
    ) -> Self {
        Self {
            target,
            from,
            to,
            start,
            duration,
            easing,
            repeat: 0,
            yoyo: false,
        }
    }

    /// Adds yoyo cycling with `repeat` extra cycles.
    #[must_use]
    pub fn with_yoyo(mut self, repeat: u32) -> Self {
        self.repeat = repeat;
        self.yoyo = true;
        self
    }

    /// Absolute time at which the last cycle ends.
    #[must_use]
    pub fn end_time(&self) -> f64 {
        self.start + self.duration * f64::from(self.repeat + 1)
    }

    /// Returns `true` once the tween has reached its terminal value.
    #[must_use]
    pub fn finished(&self, t: f64) -> bool {
        t >= self.end_time()
    }

    /// The tween's value at animation time `t`, or `None` before its start.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "cycle indices are small and local progress is clamped to [0, 1]"
    )]
    pub fn value_at(&self, t: f64) -> Option<f32> {
        if t < self.start {
            return None;
        }
        let cycles = f64::from(self.repeat + 1);
        if self.duration <= 0.0 {
            // Instant set: land on the terminal value immediately.
            let end = if self.yoyo && self.repeat % 2 == 1 { 0.0 } else { 1.0 };
            return Some(self.cycle_value(end, 0));
        }
        let u_total = ((t - self.start) / self.duration).min(cycles);
        let cycle = (u_total as u32).min(self.repeat);
        let local = (u_total - f64::from(cycle)).clamp(0.0, 1.0) as f32;
        Some(self.cycle_value(local, cycle))
    }

    fn cycle_value(&self, local: f32, cycle: u32) -> f32 {
        let local = if self.yoyo && cycle % 2 == 1 {
            1.0 - local
        } else {
            local
        };
        self.from + (self.to - self.from) * self.easing.apply(local)
    }
}

/// An ordered set of tweens sharing one animation clock.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    tweens: Vec<Tween>,
}

impl Timeline {
    /// Creates an empty timeline.
    #[must_use]
    pub fn new() -> Self {
        Self { tweens: Vec::new() }
    }

    /// Appends a tween. Later tweens win on shared targets.
    pub fn add(&mut self, tween: Tween) {
        self.tweens.push(tween);
    }

    /// Returns `true` when the timeline holds no tweens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Absolute time at which the longest tween ends (`0.0` when empty).
    #[must_use]
    pub fn end_time(&self) -> f64 {
        self.tweens
            .iter()
            .map(Tween::end_time)
            .fold(0.0, f64::max)
    }

    /// Returns `true` once every tween has reached its terminal value.
    #[must_use]
    pub fn finished(&self, t: f64) -> bool {
        self.tweens.iter().all(|tw| tw.finished(t))
    }

    /// Drops tweens that have reached their terminal value by `t`.
    ///
    /// Call after [`sample`](Self::sample) so terminal values have landed.
    pub fn retain_unfinished(&mut self, t: f64) {
        self.tweens.retain(|tw| !tw.finished(t));
    }

    /// Writes every active tween's current value into the store.
    pub fn sample(&self, t: f64, store: &mut VisualStore) {
        for tween in &self.tweens {
            let Some(value) = tween.value_at(t) else {
                continue;
            };
            match tween.target {
                TweenTarget::Opacity(id) => store.set_opacity(id, value),
                TweenTarget::Glitch(id) => store.set_glitch(id, value),
                TweenTarget::ScaleXy(id) => store.set_scale_xy(id, value),
                TweenTarget::ScaleXyz(id) => store.set_scale_xyz(id, value),
                TweenTarget::BaseY(id) => store.set_base_y(id, value),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::color::Tint;

    use super::*;

    fn icon() -> (VisualStore, VisualId) {
        let mut store = VisualStore::new();
        let id = store.add_icon(0, Tint::new(1.0, 1.0, 1.0), None);
        (store, id)
    }

    #[test]
    fn easing_endpoints() {
        for easing in [Easing::Linear, Easing::QuadOut, Easing::REVEAL, Easing::BOUNCE] {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?} at 1");
            assert_eq!(easing.apply(-0.5), 0.0, "{easing:?} clamps below");
            assert_eq!(easing.apply(1.5), 1.0, "{easing:?} clamps above");
        }
    }

    #[test]
    fn elastic_overshoots_then_settles() {
        // Quarter period past the first zero crossing sits on a crest.
        let v = Easing::REVEAL.apply(0.375);
        assert!(v > 1.0, "expected overshoot, got {v}");
        let late = Easing::REVEAL.apply(0.95);
        assert!((late - 1.0).abs() < 0.05, "expected settling, got {late}");
    }

    #[test]
    fn quad_out_front_loads() {
        assert!(Easing::QuadOut.apply(0.5) > 0.5);
    }

    #[test]
    fn tween_holds_before_start() {
        let (_, id) = icon();
        let tw = Tween::new(TweenTarget::Opacity(id), 0.0, 1.0, 0.2, 0.4, Easing::Linear);
        assert_eq!(tw.value_at(0.1), None);
        assert_eq!(tw.value_at(0.2), Some(0.0));
        assert_eq!(tw.value_at(0.4), Some(0.5));
        assert_eq!(tw.value_at(0.6), Some(1.0));
        assert_eq!(tw.value_at(9.0), Some(1.0), "clamps at terminal value");
    }

    #[test]
    fn yoyo_returns_to_start() {
        let (_, id) = icon();
        let pulse =
            Tween::new(TweenTarget::Glitch(id), 0.0, 3.0, 0.0, 0.2, Easing::Linear).with_yoyo(1);
        assert_eq!(pulse.end_time(), 0.4);
        assert_eq!(pulse.value_at(0.2), Some(3.0), "peak between cycles");
        assert_eq!(pulse.value_at(0.3), Some(1.5), "descending");
        assert_eq!(pulse.value_at(0.4), Some(0.0), "back at rest");
        assert!(pulse.finished(0.4));
    }

    #[test]
    fn timeline_end_time_is_longest_track() {
        let (_, id) = icon();
        let mut tl = Timeline::new();
        tl.add(Tween::new(TweenTarget::Opacity(id), 0.0, 1.0, 0.2, 0.4, Easing::QuadOut));
        tl.add(Tween::new(TweenTarget::ScaleXy(id), 0.1, 1.0, 0.2, 0.8, Easing::REVEAL));
        assert!((tl.end_time() - 1.0).abs() < 1e-9);
        assert!(!tl.finished(0.9));
        assert!(tl.finished(1.0));
    }

    #[test]
    fn sample_writes_through_to_store() {
        let (mut store, id) = icon();
        let mut tl = Timeline::new();
        tl.add(Tween::new(TweenTarget::Opacity(id), 0.0, 1.0, 0.0, 1.0, Easing::Linear));
        tl.add(Tween::new(TweenTarget::ScaleXyz(id), 0.0, 2.0, 0.0, 1.0, Easing::Linear));

        tl.sample(0.5, &mut store);
        assert_eq!(store.opacity(id), 0.5);
        assert_eq!(store.scale(id), [1.0, 1.0, 1.0]);

        tl.sample(1.0, &mut store);
        assert_eq!(store.opacity(id), 1.0);
        assert_eq!(store.scale(id), [2.0, 2.0, 2.0]);
    }

    #[test]
    fn pending_tween_leaves_setup_value() {
        let (mut store, id) = icon();
        store.set_opacity(id, 0.25);
        let mut tl = Timeline::new();
        tl.add(Tween::new(TweenTarget::Opacity(id), 0.0, 1.0, 0.5, 0.5, Easing::Linear));
        tl.sample(0.4, &mut store);
        assert_eq!(store.opacity(id), 0.25, "untouched before start");
    }
}
