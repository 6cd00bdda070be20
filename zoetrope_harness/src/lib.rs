// Copyright 2026 the Zoetrope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic drive harness for zoetrope tests and demos.
//!
//! The carousel core is clock-free: all wall time arrives through
//! [`FrameTick`]s. This crate supplies the pieces a test (or an offline
//! demo) needs to drive it reproducibly:
//!
//! - [`TickScript`] — an infinite fixed-cadence tick generator.
//! - [`RecordingPanel`] / [`RecordingNavigator`] — capability doubles that
//!   log every call.
//! - [`CountingPresenter`] — a [`ScenePresenter`] that tallies change
//!   volumes instead of rendering.
//! - [`Host`] — the three doubles bundled behind one `apply` call.
//!
//! Two identical scripts against identical carousels produce identical logs;
//! there is no hidden wall-clock read anywhere in the loop.

#![no_std]

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use zoetrope_core::backend::{Cursor, Navigator, ScenePresenter, UiPanel};
use zoetrope_core::carousel::{Carousel, FrameOutput};
use zoetrope_core::color::Tint;
use zoetrope_core::scene::{SceneChanges, VisualStore};
use zoetrope_core::tick::FrameTick;
use zoetrope_core::time::{HostTime, TickDuration};

/// A 60Hz-ish frame period (16.667ms in microsecond ticks).
pub const SIXTY_HZ: TickDuration = TickDuration(16_667);

/// An infinite fixed-cadence [`FrameTick`] generator.
#[derive(Clone, Debug)]
pub struct TickScript {
    next: HostTime,
    period: TickDuration,
    frame_index: u64,
}

impl TickScript {
    /// Creates a script starting at `start` and ticking every `period`.
    #[must_use]
    pub const fn new(start: HostTime, period: TickDuration) -> Self {
        Self {
            next: start,
            period,
            frame_index: 0,
        }
    }

    /// Creates a 60Hz script starting at time zero.
    #[must_use]
    pub const fn sixty_hz() -> Self {
        Self::new(HostTime(0), SIXTY_HZ)
    }

    /// The host time the next tick will carry.
    #[must_use]
    pub const fn now(&self) -> HostTime {
        self.next
    }
}

impl Iterator for TickScript {
    type Item = FrameTick;

    fn next(&mut self) -> Option<FrameTick> {
        let tick = FrameTick::new(self.next, self.frame_index);
        self.next = self.next + self.period;
        self.frame_index += 1;
        Some(tick)
    }
}

/// A panel call, in the order it arrived.
#[derive(Clone, Debug, PartialEq)]
pub enum PanelCall {
    /// `set_title`.
    Title(String),
    /// `set_subtitle`.
    Subtitle(String),
    /// `set_description`.
    Description(String),
    /// `set_accent`.
    Accent(Tint),
    /// `set_panel_visible`.
    Visible(bool),
    /// `set_cursor`.
    Cursor(Cursor),
}

/// A [`UiPanel`] double that logs every call.
#[derive(Clone, Debug, Default)]
pub struct RecordingPanel {
    /// Every call, in order.
    pub calls: Vec<PanelCall>,
}

impl RecordingPanel {
    /// The most recent title, if any was set.
    #[must_use]
    pub fn last_title(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|c| match c {
            PanelCall::Title(t) => Some(t.as_str()),
            _ => None,
        })
    }

    /// The most recent panel visibility, if any was set.
    #[must_use]
    pub fn last_visible(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|c| match c {
            PanelCall::Visible(v) => Some(*v),
            _ => None,
        })
    }
}

impl UiPanel for RecordingPanel {
    fn set_title(&mut self, title: &str) {
        self.calls.push(PanelCall::Title(title.to_string()));
    }

    fn set_subtitle(&mut self, subtitle: &str) {
        self.calls.push(PanelCall::Subtitle(subtitle.to_string()));
    }

    fn set_description(&mut self, description: &str) {
        self.calls.push(PanelCall::Description(description.to_string()));
    }

    fn set_accent(&mut self, accent: Tint) {
        self.calls.push(PanelCall::Accent(accent));
    }

    fn set_panel_visible(&mut self, visible: bool) {
        self.calls.push(PanelCall::Visible(visible));
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.calls.push(PanelCall::Cursor(cursor));
    }
}

/// A [`Navigator`] double that logs opened URLs.
#[derive(Clone, Debug, Default)]
pub struct RecordingNavigator {
    /// Every opened URL, in order.
    pub opened: Vec<String>,
}

impl Navigator for RecordingNavigator {
    fn open_external(&mut self, url: &str) {
        self.opened.push(url.to_string());
    }
}

/// A [`ScenePresenter`] that tallies change volumes instead of rendering.
#[derive(Clone, Copy, Debug, Default)]
pub struct CountingPresenter {
    /// Frames applied.
    pub frames: u64,
    /// Total transform-change entries seen.
    pub transforms: u64,
    /// Total material-change entries seen.
    pub materials: u64,
    /// Total visibility flips seen.
    pub visibility: u64,
    /// Total content rebinds seen.
    pub content: u64,
    /// The material clock from the most recent frame.
    pub last_time: f64,
}

impl ScenePresenter for CountingPresenter {
    fn apply(&mut self, _store: &VisualStore, changes: &SceneChanges, time: f64) {
        self.frames += 1;
        self.transforms += changes.transforms.len() as u64;
        self.materials += changes.materials.len() as u64;
        self.visibility += changes.visibility.len() as u64;
        self.content += changes.content.len() as u64;
        self.last_time = time;
    }
}

/// The collaborator doubles bundled the way a backend wires them.
#[derive(Clone, Debug, Default)]
pub struct Host {
    /// UI panel double.
    pub panel: RecordingPanel,
    /// Navigator double.
    pub navigator: RecordingNavigator,
    /// Presenter double.
    pub presenter: CountingPresenter,
}

impl Host {
    /// Creates an empty host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one frame's output the way a real backend would: presenter
    /// first, then events in order.
    pub fn apply(&mut self, carousel: &Carousel, out: &FrameOutput) {
        self.presenter.apply(carousel.store(), &out.changes, out.time);
        for event in &out.events {
            event.dispatch(&mut self.panel, &mut self.navigator);
        }
    }
}

/// Drives `carousel` for `frames` ticks from `script`, applying each frame
/// to `host`. Returns the reused output buffer's final state.
pub fn run_frames(
    carousel: &mut Carousel,
    script: &mut TickScript,
    frames: usize,
    host: &mut Host,
) -> FrameOutput {
    let mut out = FrameOutput::new();
    for tick in script.by_ref().take(frames) {
        carousel.frame(tick, &mut out);
        host.apply(carousel, &out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_script_is_monotonic_and_indexed() {
        let mut script = TickScript::sixty_hz();
        let a = script.next().unwrap();
        let b = script.next().unwrap();
        assert_eq!(a.frame_index, 0);
        assert_eq!(b.frame_index, 1);
        assert_eq!(b.now - a.now, SIXTY_HZ);
    }

    #[test]
    fn recording_panel_tracks_latest_state() {
        let mut panel = RecordingPanel::default();
        panel.set_title("A");
        panel.set_panel_visible(false);
        panel.set_title("B");
        panel.set_panel_visible(true);
        assert_eq!(panel.last_title(), Some("B"));
        assert_eq!(panel.last_visible(), Some(true));
    }
}
