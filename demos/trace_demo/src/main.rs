// Copyright 2026 the Zoetrope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Offline carousel run that exercises the tracing and diagnostics pipeline.
//!
//! Drives a five-slide carousel for ten simulated seconds at 60Hz with a
//! couple of scripted interactions, recording events to both a
//! [`PrettyPrintSink`](zoetrope_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](zoetrope_debug::recorder::RecorderSink), then exports a
//! Chrome trace JSON file (first CLI argument, default
//! `zoetrope_trace.json`).

use std::fs::File;
use std::io::BufWriter;

use kurbo::Point;

use zoetrope_core::carousel::{Carousel, CarouselConfig, TextureStatus};
use zoetrope_core::color::Tint;
use zoetrope_core::layout::{Layout, Viewport};
use zoetrope_core::scene::SurfaceId;
use zoetrope_core::slide::{SlideDeck, SlideItem};
use zoetrope_core::trace::{
    AutoplayFireEvent, FrameTickEvent, LinkOpenEvent, PointerHitEvent, RequestDroppedEvent,
    SceneChangeCounts, TraceSink, TransitionBeginEvent, TransitionEndEvent, UiSwapEvent,
};
use zoetrope_debug::chrome;
use zoetrope_debug::pretty::PrettyPrintSink;
use zoetrope_debug::recorder::RecorderSink;
use zoetrope_harness::{Host, TickScript};

const FRAME_COUNT: usize = 600;
const CLICK_PREV_AT: usize = 200;
const CLICK_ICON_AT: usize = 400;

/// Forwards every event to two sinks.
struct Tee<'a>(&'a mut dyn TraceSink, &'a mut dyn TraceSink);

impl TraceSink for Tee<'_> {
    fn on_frame_tick(&mut self, e: &FrameTickEvent) {
        self.0.on_frame_tick(e);
        self.1.on_frame_tick(e);
    }

    fn on_transition_begin(&mut self, e: &TransitionBeginEvent) {
        self.0.on_transition_begin(e);
        self.1.on_transition_begin(e);
    }

    fn on_transition_end(&mut self, e: &TransitionEndEvent) {
        self.0.on_transition_end(e);
        self.1.on_transition_end(e);
    }

    fn on_request_dropped(&mut self, e: &RequestDroppedEvent) {
        self.0.on_request_dropped(e);
        self.1.on_request_dropped(e);
    }

    fn on_autoplay_fire(&mut self, e: &AutoplayFireEvent) {
        self.0.on_autoplay_fire(e);
        self.1.on_autoplay_fire(e);
    }

    fn on_pointer_hit(&mut self, e: &PointerHitEvent) {
        self.0.on_pointer_hit(e);
        self.1.on_pointer_hit(e);
    }

    fn on_ui_swap(&mut self, e: &UiSwapEvent) {
        self.0.on_ui_swap(e);
        self.1.on_ui_swap(e);
    }

    fn on_link_open(&mut self, e: &LinkOpenEvent) {
        self.0.on_link_open(e);
        self.1.on_link_open(e);
    }

    fn on_scene_changes(&mut self, frame_index: u64, counts: &SceneChangeCounts) {
        self.0.on_scene_changes(frame_index, counts);
        self.1.on_scene_changes(frame_index, counts);
    }
}

fn demo_deck() -> SlideDeck {
    let slides = [
        ("ARCHIVE", "SYSTEM // CORE", "Project archive hub.", "#ff9d0b"),
        ("SIGNAL", "COMMUNICATION", "Direct secure channel.", "#2aabee"),
        ("DOSSIER", "NETWORK", "Professional dossier.", "#0077b5"),
        ("SANDBOX", "EXPERIMENTS", "Experimental code.", "#39b906"),
        ("CONTACT", "TRANSMISSION", "Send electronic mail.", "#c300ff"),
    ];
    let items = slides
        .iter()
        .enumerate()
        .map(|(i, (title, subtitle, description, tint))| SlideItem {
            asset_ref: format!("assets/icon-{i}.svg"),
            tint: Tint::from_hex(tint).expect("authored hex"),
            title: (*title).into(),
            subtitle: (*subtitle).into(),
            description: (*description).into(),
            link_url: format!("https://example.org/{i}"),
            fix_y: if i == 1 { -0.15 } else { 0.0 },
            fix_scale: if i == 1 { 0.95 } else { 1.0 },
        })
        .collect();
    SlideDeck::new(items).expect("non-empty deck")
}

/// Surface-pixel coordinates that project onto the given world point.
fn surface_at(layout: &Layout, wx: f32, wy: f32) -> Point {
    let ndc_x = wx / (layout.visible_width() / 2.0);
    let ndc_y = wy / (layout.visible_height() / 2.0);
    Point::new(
        f64::from((ndc_x + 1.0) / 2.0 * layout.viewport.width),
        f64::from((1.0 - ndc_y) / 2.0 * layout.viewport.height),
    )
}

fn main() {
    let trace_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "zoetrope_trace.json".into());

    let deck = demo_deck();
    let textures: Vec<TextureStatus> = (0..deck.len())
        .map(|i| {
            #[expect(clippy::cast_possible_truncation, reason = "five slides")]
            let surface = SurfaceId(i as u32);
            // One deliberately failed load shows the degraded path.
            if i == 3 {
                TextureStatus::Missing
            } else {
                TextureStatus::Loaded(surface)
            }
        })
        .collect();

    let mut carousel = Carousel::new(
        deck,
        &textures,
        Viewport::new(1280.0, 720.0),
        CarouselConfig::default(),
    )
    .expect("viewport is non-degenerate");

    let mut pretty = PrettyPrintSink::with_writer(std::io::stdout());
    let mut recorder = RecorderSink::new();

    let mut host = Host::new();
    let mut out = zoetrope_core::carousel::FrameOutput::new();
    let mut script = TickScript::sixty_hz();

    for (i, tick) in script.by_ref().take(FRAME_COUNT).enumerate() {
        if i == CLICK_PREV_AT {
            let layout = *carousel.layout();
            let pos = surface_at(&layout, -layout.arrow_offset_x, layout.icon_base_y);
            carousel.pointer_clicked_traced(pos, &mut zoetrope_core::trace::Tracer::new(
                &mut Tee(&mut pretty, &mut recorder),
            ));
        }
        if i == CLICK_ICON_AT {
            let layout = *carousel.layout();
            let pos = surface_at(&layout, 0.0, layout.icon_base_y);
            carousel.pointer_clicked_traced(pos, &mut zoetrope_core::trace::Tracer::new(
                &mut Tee(&mut pretty, &mut recorder),
            ));
        }

        let mut tee = Tee(&mut pretty, &mut recorder);
        carousel.frame_with_sink(tick, &mut out, &mut tee);
        host.apply(&carousel, &out);
    }

    eprintln!(
        "ran {FRAME_COUNT} frames: index={} transforms={} materials={} \
         visibility={} opened={:?}",
        carousel.current_index(),
        host.presenter.transforms,
        host.presenter.materials,
        host.presenter.visibility,
        host.navigator.opened,
    );

    let file = File::create(&trace_path).expect("create trace file");
    let mut writer = BufWriter::new(file);
    chrome::export(recorder.as_bytes(), &mut writer).expect("write chrome trace");
    eprintln!("wrote {trace_path}");
}
