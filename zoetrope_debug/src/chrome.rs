// Copyright 2026 the Zoetrope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a
//! [`RecorderSink`](super::recorder::RecorderSink) and writes
//! [Chrome Trace Event Format][spec] JSON to the given writer, suitable for
//! `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
//!
//! Frame ticks carry microsecond host times directly; transition events
//! carry animation seconds and are scaled to microseconds on the same axis
//! (the carousel's animation clock starts at zero on its first frame, so
//! both land on one coherent timeline when the recording starts at frame 0).
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Converts animation seconds to trace microseconds.
fn secs_to_us(secs: f64) -> f64 {
    secs * 1_000_000.0
}

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::FrameTick(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "FrameTick",
                    "cat": "Loop",
                    "ts": e.now.micros(),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": { "frame_index": e.frame_index }
                }));
            }
            RecordedEvent::TransitionBegin(e) => {
                events.push(json!({
                    "ph": "B",
                    "name": "Transition",
                    "cat": "Carousel",
                    "ts": secs_to_us(e.at),
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "from": e.from,
                        "to": e.to,
                        "first": e.first,
                    }
                }));
            }
            RecordedEvent::TransitionEnd(e) => {
                events.push(json!({
                    "ph": "E",
                    "name": "Transition",
                    "cat": "Carousel",
                    "ts": secs_to_us(e.at),
                    "pid": 0,
                    "tid": 0,
                    "args": { "index": e.index }
                }));
            }
            RecordedEvent::RequestDropped(e) => {
                events.push(instant("RequestDropped", json!({ "target": e.target })));
            }
            RecordedEvent::AutoplayFire(e) => {
                events.push(instant("AutoplayFire", json!({ "target": e.target })));
            }
            RecordedEvent::PointerHit(e) => {
                events.push(instant(
                    "PointerHit",
                    json!({ "target": format!("{:?}", e.target) }),
                ));
            }
            RecordedEvent::UiSwap(e) => {
                events.push(instant("UiSwap", json!({ "index": e.index })));
            }
            RecordedEvent::LinkOpen(e) => {
                events.push(instant("LinkOpen", json!({ "index": e.index })));
            }
            RecordedEvent::SceneChanges { frame_index, counts } => {
                events.push(json!({
                    "ph": "C",
                    "name": "SceneChanges",
                    "cat": "Carousel",
                    "ts": frame_index * 16_667,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "transforms": counts.transforms,
                        "materials": counts.materials,
                        "visibility": counts.visibility,
                        "content": counts.content,
                    }
                }));
            }
        }
    }

    let doc = Value::Array(events);
    serde_json::to_writer(&mut *writer, &doc)?;
    writer.flush()
}

/// An instant event without a meaningful own timestamp; Chrome renders it at
/// ts 0 on the interaction row.
fn instant(name: &str, args: Value) -> Value {
    json!({
        "ph": "i",
        "name": name,
        "cat": "Interaction",
        "ts": 0,
        "pid": 0,
        "tid": 1,
        "s": "t",
        "args": args
    })
}

#[cfg(test)]
mod tests {
    use zoetrope_core::time::HostTime;
    use zoetrope_core::trace::{
        FrameTickEvent, TraceSink, TransitionBeginEvent, TransitionEndEvent,
    };

    use crate::recorder::RecorderSink;

    use super::*;

    #[test]
    fn export_is_valid_json_with_one_object_per_event() {
        let mut rec = RecorderSink::new();
        rec.on_frame_tick(&FrameTickEvent {
            frame_index: 0,
            now: HostTime::from_millis(0),
        });
        rec.on_transition_begin(&TransitionBeginEvent {
            from: 0,
            to: 1,
            first: false,
            at: 0.5,
        });
        rec.on_transition_end(&TransitionEndEvent { index: 1, at: 1.5 });

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();

        let doc: Value = serde_json::from_slice(&out).unwrap();
        let events = doc.as_array().unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[1]["ph"], "B");
        assert_eq!(events[1]["args"]["to"], 1);
        assert_eq!(events[2]["ph"], "E");
        assert_eq!(events[2]["ts"], 1_500_000.0);
    }
}
