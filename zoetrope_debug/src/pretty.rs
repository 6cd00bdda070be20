// Copyright 2026 the Zoetrope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per
//! event to a [`Write`](std::io::Write) destination (default: stderr).
//! Write errors are swallowed — diagnostics must never take the frame loop
//! down with them.

use std::io::Write;

use zoetrope_core::trace::{
    AutoplayFireEvent, FrameTickEvent, LinkOpenEvent, PointerHitEvent, RequestDroppedEvent,
    SceneChangeCounts, TraceSink, TransitionBeginEvent, TransitionEndEvent, UiSwapEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write)
/// destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the writer back (for inspecting buffered output in tests).
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_frame_tick(&mut self, e: &FrameTickEvent) {
        let _ = writeln!(
            self.writer,
            "tick   #{:<6} now={}us",
            e.frame_index,
            e.now.micros()
        );
    }

    fn on_transition_begin(&mut self, e: &TransitionBeginEvent) {
        let _ = writeln!(
            self.writer,
            "trans  {} -> {} at {:.3}s{}",
            e.from,
            e.to,
            e.at,
            if e.first { " (first)" } else { "" }
        );
    }

    fn on_transition_end(&mut self, e: &TransitionEndEvent) {
        let _ = writeln!(self.writer, "done   index={} at {:.3}s", e.index, e.at);
    }

    fn on_request_dropped(&mut self, e: &RequestDroppedEvent) {
        let _ = writeln!(self.writer, "drop   target={}", e.target);
    }

    fn on_autoplay_fire(&mut self, e: &AutoplayFireEvent) {
        let _ = writeln!(self.writer, "auto   target={}", e.target);
    }

    fn on_pointer_hit(&mut self, e: &PointerHitEvent) {
        let _ = writeln!(self.writer, "hit    {:?}", e.target);
    }

    fn on_ui_swap(&mut self, e: &UiSwapEvent) {
        let _ = writeln!(self.writer, "panel  index={}", e.index);
    }

    fn on_link_open(&mut self, e: &LinkOpenEvent) {
        let _ = writeln!(self.writer, "link   index={}", e.index);
    }

    fn on_scene_changes(&mut self, frame_index: u64, counts: &SceneChangeCounts) {
        let _ = writeln!(
            self.writer,
            "delta  #{:<6} xf={} mat={} vis={} tex={}",
            frame_index, counts.transforms, counts.materials, counts.visibility, counts.content
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_line_per_event() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_transition_begin(&TransitionBeginEvent {
            from: 0,
            to: 2,
            first: true,
            at: 0.0,
        });
        sink.on_ui_swap(&UiSwapEvent { index: 2 });
        sink.on_transition_end(&TransitionEndEvent { index: 2, at: 0.8 });

        let text = String::from_utf8(sink.into_writer()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("0 -> 2"));
        assert!(lines[0].contains("(first)"));
        assert!(lines[2].contains("index=2"));
    }
}
