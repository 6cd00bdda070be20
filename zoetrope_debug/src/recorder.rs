// Copyright 2026 the Zoetrope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! Times are stored as raw microsecond ticks ([`HostTime`]) or as
//! animation-seconds bit patterns (`f64::to_bits`), matching the event
//! structs they came from.

use zoetrope_core::pointer::HitTarget;
use zoetrope_core::scene::NavDir;
use zoetrope_core::time::HostTime;
use zoetrope_core::trace::{
    AutoplayFireEvent, FrameTickEvent, LinkOpenEvent, PointerHitEvent, RequestDroppedEvent,
    SceneChangeCounts, TraceSink, TransitionBeginEvent, TransitionEndEvent, UiSwapEvent,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_FRAME_TICK: u8 = 1;
const TAG_TRANSITION_BEGIN: u8 = 2;
const TAG_TRANSITION_END: u8 = 3;
const TAG_REQUEST_DROPPED: u8 = 4;
const TAG_AUTOPLAY_FIRE: u8 = 5;
const TAG_POINTER_HIT: u8 = 6;
const TAG_UI_SWAP: u8 = 7;
const TAG_LINK_OPEN: u8 = 8;
const TAG_SCENE_CHANGES: u8 = 9;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_hit(&mut self, target: HitTarget) {
        self.write_u8(match target {
            HitTarget::Arrow(NavDir::Previous) => 0,
            HitTarget::Arrow(NavDir::Next) => 1,
            HitTarget::Icon => 2,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_frame_tick(&mut self, e: &FrameTickEvent) {
        self.write_u8(TAG_FRAME_TICK);
        self.write_u64(e.frame_index);
        self.write_u64(e.now.micros());
    }

    fn on_transition_begin(&mut self, e: &TransitionBeginEvent) {
        self.write_u8(TAG_TRANSITION_BEGIN);
        self.write_u32(e.from);
        self.write_u32(e.to);
        self.write_u8(u8::from(e.first));
        self.write_f64(e.at);
    }

    fn on_transition_end(&mut self, e: &TransitionEndEvent) {
        self.write_u8(TAG_TRANSITION_END);
        self.write_u32(e.index);
        self.write_f64(e.at);
    }

    fn on_request_dropped(&mut self, e: &RequestDroppedEvent) {
        self.write_u8(TAG_REQUEST_DROPPED);
        self.write_u32(e.target);
    }

    fn on_autoplay_fire(&mut self, e: &AutoplayFireEvent) {
        self.write_u8(TAG_AUTOPLAY_FIRE);
        self.write_u32(e.target);
    }

    fn on_pointer_hit(&mut self, e: &PointerHitEvent) {
        self.write_u8(TAG_POINTER_HIT);
        self.write_hit(e.target);
    }

    fn on_ui_swap(&mut self, e: &UiSwapEvent) {
        self.write_u8(TAG_UI_SWAP);
        self.write_u32(e.index);
    }

    fn on_link_open(&mut self, e: &LinkOpenEvent) {
        self.write_u8(TAG_LINK_OPEN);
        self.write_u32(e.index);
    }

    fn on_scene_changes(&mut self, frame_index: u64, counts: &SceneChangeCounts) {
        self.write_u8(TAG_SCENE_CHANGES);
        self.write_u64(frame_index);
        self.write_u32(counts.transforms);
        self.write_u32(counts.materials);
        self.write_u32(counts.visibility);
        self.write_u32(counts.content);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`FrameTickEvent`].
    FrameTick(FrameTickEvent),
    /// A [`TransitionBeginEvent`].
    TransitionBegin(TransitionBeginEvent),
    /// A [`TransitionEndEvent`].
    TransitionEnd(TransitionEndEvent),
    /// A [`RequestDroppedEvent`].
    RequestDropped(RequestDroppedEvent),
    /// An [`AutoplayFireEvent`].
    AutoplayFire(AutoplayFireEvent),
    /// A [`PointerHitEvent`].
    PointerHit(PointerHitEvent),
    /// A [`UiSwapEvent`].
    UiSwap(UiSwapEvent),
    /// A [`LinkOpenEvent`].
    LinkOpen(LinkOpenEvent),
    /// Per-frame scene-change counts.
    SceneChanges {
        /// Frame counter.
        frame_index: u64,
        /// Change-list sizes for that frame.
        counts: SceneChangeCounts,
    },
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Iteration stops at the first truncated or unknown record.
#[must_use]
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over recorded events. Created by [`decode`].
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn read_u8(&mut self) -> Option<u8> {
        let v = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        let bytes = self.data.get(self.pos..self.pos + 4)?;
        self.pos += 4;
        Some(u32::from_le_bytes(bytes.try_into().ok()?))
    }

    fn read_u64(&mut self) -> Option<u64> {
        let bytes = self.data.get(self.pos..self.pos + 8)?;
        self.pos += 8;
        Some(u64::from_le_bytes(bytes.try_into().ok()?))
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.read_u64().map(f64::from_bits)
    }

    fn read_hit(&mut self) -> Option<HitTarget> {
        match self.read_u8()? {
            0 => Some(HitTarget::Arrow(NavDir::Previous)),
            1 => Some(HitTarget::Arrow(NavDir::Next)),
            2 => Some(HitTarget::Icon),
            _ => None,
        }
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<RecordedEvent> {
        match self.read_u8()? {
            TAG_FRAME_TICK => Some(RecordedEvent::FrameTick(FrameTickEvent {
                frame_index: self.read_u64()?,
                now: HostTime(self.read_u64()?),
            })),
            TAG_TRANSITION_BEGIN => Some(RecordedEvent::TransitionBegin(TransitionBeginEvent {
                from: self.read_u32()?,
                to: self.read_u32()?,
                first: self.read_u8()? != 0,
                at: self.read_f64()?,
            })),
            TAG_TRANSITION_END => Some(RecordedEvent::TransitionEnd(TransitionEndEvent {
                index: self.read_u32()?,
                at: self.read_f64()?,
            })),
            TAG_REQUEST_DROPPED => Some(RecordedEvent::RequestDropped(RequestDroppedEvent {
                target: self.read_u32()?,
            })),
            TAG_AUTOPLAY_FIRE => Some(RecordedEvent::AutoplayFire(AutoplayFireEvent {
                target: self.read_u32()?,
            })),
            TAG_POINTER_HIT => Some(RecordedEvent::PointerHit(PointerHitEvent {
                target: self.read_hit()?,
            })),
            TAG_UI_SWAP => Some(RecordedEvent::UiSwap(UiSwapEvent {
                index: self.read_u32()?,
            })),
            TAG_LINK_OPEN => Some(RecordedEvent::LinkOpen(LinkOpenEvent {
                index: self.read_u32()?,
            })),
            TAG_SCENE_CHANGES => Some(RecordedEvent::SceneChanges {
                frame_index: self.read_u64()?,
                counts: SceneChangeCounts {
                    transforms: self.read_u32()?,
                    materials: self.read_u32()?,
                    visibility: self.read_u32()?,
                    content: self.read_u32()?,
                },
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_all_event_kinds() {
        let mut rec = RecorderSink::new();
        rec.on_frame_tick(&FrameTickEvent {
            frame_index: 3,
            now: HostTime::from_millis(48),
        });
        rec.on_transition_begin(&TransitionBeginEvent {
            from: 0,
            to: 4,
            first: false,
            at: 1.25,
        });
        rec.on_ui_swap(&UiSwapEvent { index: 4 });
        rec.on_transition_end(&TransitionEndEvent { index: 4, at: 2.25 });
        rec.on_request_dropped(&RequestDroppedEvent { target: 1 });
        rec.on_autoplay_fire(&AutoplayFireEvent { target: 0 });
        rec.on_pointer_hit(&PointerHitEvent {
            target: HitTarget::Arrow(NavDir::Next),
        });
        rec.on_link_open(&LinkOpenEvent { index: 2 });
        rec.on_scene_changes(
            7,
            &SceneChangeCounts {
                transforms: 3,
                materials: 2,
                visibility: 1,
                content: 0,
            },
        );

        let events: Vec<RecordedEvent> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 9);

        match &events[0] {
            RecordedEvent::FrameTick(e) => {
                assert_eq!(e.frame_index, 3);
                assert_eq!(e.now, HostTime::from_millis(48));
            }
            other => panic!("expected FrameTick, got {other:?}"),
        }
        match &events[1] {
            RecordedEvent::TransitionBegin(e) => {
                assert_eq!((e.from, e.to, e.first), (0, 4, false));
                assert_eq!(e.at, 1.25);
            }
            other => panic!("expected TransitionBegin, got {other:?}"),
        }
        match &events[6] {
            RecordedEvent::PointerHit(e) => {
                assert_eq!(e.target, HitTarget::Arrow(NavDir::Next));
            }
            other => panic!("expected PointerHit, got {other:?}"),
        }
        match &events[8] {
            RecordedEvent::SceneChanges { frame_index, counts } => {
                assert_eq!(*frame_index, 7);
                assert_eq!(counts.transforms, 3);
                assert_eq!(counts.content, 0);
            }
            other => panic!("expected SceneChanges, got {other:?}"),
        }
    }

    #[test]
    fn truncated_record_stops_iteration() {
        let mut rec = RecorderSink::new();
        rec.on_ui_swap(&UiSwapEvent { index: 1 });
        rec.on_link_open(&LinkOpenEvent { index: 2 });

        let bytes = rec.as_bytes();
        // Chop the last record mid-payload.
        let events: Vec<RecordedEvent> = decode(&bytes[..bytes.len() - 2]).collect();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn unknown_tag_stops_iteration() {
        let events: Vec<RecordedEvent> = decode(&[0xFF, 1, 2, 3]).collect();
        assert!(events.is_empty());
    }
}
