// Copyright 2026 the Zoetrope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic host time in microsecond ticks.
//!
//! [`HostTime`] is a point on the host's monotonic clock, expressed in
//! microseconds (the resolution `performance.now()` offers on the web once
//! converted from fractional milliseconds). Backends are responsible for the
//! conversion; everything inside the carousel works in these ticks.
//!
//! Animation math wants seconds as `f64`, so [`HostTime::seconds_since`]
//! derives the elapsed-seconds value fed to materials and tweens. That value
//! is monotonic, starts at zero at the carousel's first frame, and advances
//! independently of transitions.

use core::fmt;
use core::ops::{Add, Sub};

/// Microseconds per second, as `f64`.
const MICROS_PER_SEC: f64 = 1_000_000.0;

/// A point in time expressed as monotonic microsecond ticks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HostTime(pub u64);

impl HostTime {
    /// Returns the raw microsecond tick value.
    #[inline]
    #[must_use]
    pub const fn micros(self) -> u64 {
        self.0
    }

    /// Creates a `HostTime` from whole milliseconds.
    #[inline]
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis * 1_000)
    }

    /// Returns the elapsed seconds from `epoch` to `self`, or `0.0` if
    /// `epoch` is later.
    #[inline]
    #[must_use]
    pub fn seconds_since(self, epoch: Self) -> f64 {
        self.0.saturating_sub(epoch.0) as f64 / MICROS_PER_SEC
    }

    /// Returns the duration between `self` and an earlier time, or zero if
    /// `earlier` is after `self`.
    #[inline]
    #[must_use]
    pub const fn saturating_duration_since(self, earlier: Self) -> TickDuration {
        TickDuration(self.0.saturating_sub(earlier.0))
    }

    /// Checked addition of a duration.
    #[inline]
    #[must_use]
    pub const fn checked_add(self, duration: TickDuration) -> Option<Self> {
        match self.0.checked_add(duration.0) {
            Some(t) => Some(Self(t)),
            None => None,
        }
    }
}

impl Add<TickDuration> for HostTime {
    type Output = Self;

    #[inline]
    fn add(self, rhs: TickDuration) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub<TickDuration> for HostTime {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: TickDuration) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Sub for HostTime {
    type Output = TickDuration;

    #[inline]
    fn sub(self, rhs: Self) -> TickDuration {
        TickDuration(self.0 - rhs.0)
    }
}

impl fmt::Debug for HostTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostTime({}us)", self.0)
    }
}

/// A span of time in microsecond ticks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TickDuration(pub u64);

impl TickDuration {
    /// A zero-length duration.
    pub const ZERO: Self = Self(0);

    /// Returns the raw microsecond tick value.
    #[inline]
    #[must_use]
    pub const fn micros(self) -> u64 {
        self.0
    }

    /// Creates a duration from whole milliseconds.
    #[inline]
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis * 1_000)
    }

    /// Returns this duration as fractional seconds.
    #[inline]
    #[must_use]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / MICROS_PER_SEC
    }

    /// Saturating subtraction.
    #[inline]
    #[must_use]
    pub const fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Add for TickDuration {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for TickDuration {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Debug for TickDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TickDuration({}us)", self.0)
    }
}
