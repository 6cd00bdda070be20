// Copyright 2026 the Zoetrope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Autoplay interval timer.
//!
//! [`Autoplay`] advances the carousel on a fixed period. It is polled from
//! the frame loop rather than owning a platform timer: each poll checks
//! whether the next deadline has passed and, if so, moves the deadline one
//! period forward. A due tick *fires* only when the caller is eligible
//! (page visible, no transition running); an ineligible due tick is skipped
//! but still advances the deadline, so hiding the page never cancels the
//! cadence and showing it again resumes firing without a restart.
//!
//! Any manual interaction calls [`reset`](Autoplay::reset), which restarts
//! the phase so autoplay always waits one full period after the last user
//! action.

use crate::time::{HostTime, TickDuration};

/// Default period between automatic slide advances.
pub const DEFAULT_INTERVAL: TickDuration = TickDuration::from_millis(4_000);

/// The autoplay deadline tracker.
#[derive(Clone, Copy, Debug)]
pub struct Autoplay {
    interval: TickDuration,
    next_due: Option<HostTime>,
}

impl Autoplay {
    /// Creates a timer with the given period. The first deadline is armed by
    /// the first [`poll`](Self::poll).
    #[must_use]
    pub const fn new(interval: TickDuration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// The configured period.
    #[must_use]
    pub const fn interval(&self) -> TickDuration {
        self.interval
    }

    /// Polls the timer at `now`. Returns `true` when a due tick fires —
    /// i.e. the deadline passed *and* the caller is `eligible`.
    ///
    /// A due-but-ineligible tick is skipped: the deadline still advances.
    pub fn poll(&mut self, now: HostTime, eligible: bool) -> bool {
        let Some(due) = self.next_due else {
            self.next_due = Some(now + self.interval);
            return false;
        };
        if now < due {
            return false;
        }
        // Keep the phase when we are less than one period behind; re-anchor
        // if the loop stalled longer than that (a backgrounded tab can stop
        // delivering frames entirely).
        let mut next = due + self.interval;
        if next <= now {
            next = now + self.interval;
        }
        self.next_due = Some(next);
        eligible
    }

    /// Restarts the phase: the next fire is one full period after `now`.
    pub fn reset(&mut self, now: HostTime) {
        self.next_due = Some(now + self.interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u64) -> HostTime {
        HostTime::from_millis(ms)
    }

    #[test]
    fn fires_once_per_interval() {
        let mut ap = Autoplay::new(DEFAULT_INTERVAL);
        assert!(!ap.poll(at(0), true), "first poll only arms");

        let mut fires = 0;
        // 60Hz-ish polling over 12 seconds.
        for ms in (16..=12_000).step_by(16) {
            if ap.poll(at(ms), true) {
                fires += 1;
            }
        }
        assert_eq!(fires, 3, "one fire per 4s interval");
    }

    #[test]
    fn ineligible_due_tick_is_skipped_not_deferred() {
        let mut ap = Autoplay::new(DEFAULT_INTERVAL);
        ap.poll(at(0), true);

        // Due at 4000, but hidden: skipped, deadline moves to 8000.
        assert!(!ap.poll(at(4_000), false));
        assert!(!ap.poll(at(5_000), true), "not due again until 8000");
        assert!(ap.poll(at(8_000), true), "resumes without a restart");
    }

    #[test]
    fn reset_restarts_the_phase() {
        let mut ap = Autoplay::new(DEFAULT_INTERVAL);
        ap.poll(at(0), true);

        // Interaction at 3.9s: next fire is a full period later.
        ap.reset(at(3_900));
        assert!(!ap.poll(at(4_000), true));
        assert!(!ap.poll(at(7_800), true));
        assert!(ap.poll(at(7_900), true));
    }

    #[test]
    fn long_stall_reanchors_instead_of_bursting() {
        let mut ap = Autoplay::new(DEFAULT_INTERVAL);
        ap.poll(at(0), true);

        // Loop frozen for 20s, then one poll: fires once, next due a full
        // period out — not five queued fires.
        assert!(ap.poll(at(20_000), true));
        assert!(!ap.poll(at(20_100), true));
        assert!(!ap.poll(at(23_900), true));
        assert!(ap.poll(at(24_000), true));
    }
}
