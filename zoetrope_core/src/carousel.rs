// Copyright 2026 the Zoetrope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The carousel orchestrator.
//!
//! [`Carousel`] wires the pieces together: the slide deck, the resolved
//! layout, the visual store, the transition state machine, the autoplay
//! timer, and the pointer router. It is driven entirely from outside —
//! [`frame`](Carousel::frame) once per display refresh, plus pointer /
//! resize / visibility events in between — and communicates outward through
//! [`FrameOutput`]: incremental scene changes for the presenter and a small
//! event list for the UI panel and navigator.
//!
//! Per frame, in order: the autoplay timer is polled, the in-flight
//! transition (if any) is stepped, one-shot effect tweens (press bounces,
//! activation pulses, resize retargets) are sampled, a matured deferred link
//! open is emitted, hover feedback relaxes the arrows, and the idle motion
//! layer writes bob/rotation/breathing around the animation anchors. Only
//! then is the store evaluated, so a frame's changes are drained exactly
//! once.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;

use crate::autoplay::Autoplay;
use crate::backend::{Cursor, Navigator, UiPanel};
use crate::color::Tint;
use crate::layout::{Layout, Viewport};
use crate::pointer::{self, ClickAction, HitTarget, Ndc};
use crate::scene::{NavDir, SceneChanges, SurfaceId, VisualId, VisualStore};
use crate::slide::SlideDeck;
use crate::tick::FrameTick;
use crate::time::{HostTime, TickDuration};
use crate::trace::{
    AutoplayFireEvent, FrameTickEvent, LinkOpenEvent, PointerHitEvent, RequestDroppedEvent,
    TraceSink, Tracer, TransitionBeginEvent, TransitionEndEvent, UiSwapEvent,
};
use crate::transition::{Activation, Transition};
use crate::tween::{Easing, Timeline, Tween, TweenTarget};

// Idle motion layer. Rates in radians/second, amplitudes in world units.
const BOB_RATE: f64 = 2.0;
const BOB_AMPLITUDE: f32 = 0.05;
const ROT_Y_RATE: f64 = 0.5;
const ROT_Y_AMPLITUDE: f32 = 0.1;
const ROT_X_RATE: f64 = 0.3;
const ROT_X_AMPLITUDE: f32 = 0.05;
const BREATHE_RATE: f64 = 1.5;
const BREATHE_AMPLITUDE: f32 = 0.03;

/// Delay between an icon activation's glitch flash and the link opening.
const LINK_OPEN_DELAY: f64 = 0.3;
/// Activation pulse: glitch peak and single-cycle duration (yoyo doubles it).
const PULSE_GLITCH: f32 = 3.0;
const PULSE_DUR: f64 = 0.2;
/// Arrow press feedback: dip fraction and bounce-back duration.
const PRESS_DIP: f32 = 0.8;
const PRESS_BOUNCE_DUR: f64 = 0.4;
/// Resize retarget duration for the visible icon.
const RETARGET_DUR: f64 = 0.4;

/// Outcome of a slide asset load, one per slide, in deck order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureStatus {
    /// The asset decoded; the icon binds this surface.
    Loaded(SurfaceId),
    /// The asset failed to decode; the icon renders as an untextured tinted
    /// surface.
    Missing,
}

/// Construction-time options.
#[derive(Clone, Copy, Debug)]
pub struct CarouselConfig {
    /// Autoplay period.
    pub autoplay_interval: TickDuration,
    /// Tint shared by both navigation arrows.
    pub arrow_tint: Tint,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay_interval: crate::autoplay::DEFAULT_INTERVAL,
            // The hologram cyan.
            arrow_tint: Tint::new(0.0, 0.835, 1.0),
        }
    }
}

/// Panel copy for one slide, emitted at the transition midpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct UiUpdate {
    /// Slide index the copy belongs to.
    pub index: usize,
    /// Title text.
    pub title: String,
    /// Subtitle text.
    pub subtitle: String,
    /// Description text.
    pub description: String,
    /// Accent color.
    pub accent: Tint,
}

/// An outward-facing event produced by a frame.
#[derive(Clone, Debug, PartialEq)]
pub enum CarouselEvent {
    /// Swap the panel copy.
    Ui(UiUpdate),
    /// Toggle the panel container's opacity.
    PanelVisible(bool),
    /// Open a slide's external link in a new browsing context.
    OpenLink {
        /// Slide index whose link is opening.
        index: usize,
        /// The link URL.
        url: String,
    },
}

impl CarouselEvent {
    /// Dispatches this event to the panel / navigator capability set.
    pub fn dispatch(&self, panel: &mut dyn UiPanel, navigator: &mut dyn Navigator) {
        match self {
            Self::Ui(update) => {
                panel.set_title(&update.title);
                panel.set_subtitle(&update.subtitle);
                panel.set_description(&update.description);
                panel.set_accent(update.accent);
            }
            Self::PanelVisible(visible) => panel.set_panel_visible(*visible),
            Self::OpenLink { url, .. } => navigator.open_external(url),
        }
    }
}

/// Everything one frame produces.
#[derive(Debug, Default)]
pub struct FrameOutput {
    /// Animation time fed to materials, in seconds since the first frame.
    pub time: f64,
    /// Incremental scene changes for the presenter.
    pub changes: SceneChanges,
    /// UI / navigation events, in occurrence order.
    pub events: Vec<CarouselEvent>,
}

impl FrameOutput {
    /// Creates an empty output buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn clear(&mut self) {
        self.time = 0.0;
        self.changes.clear();
        self.events.clear();
    }
}

/// The hologram carousel.
#[derive(Debug)]
pub struct Carousel {
    deck: SlideDeck,
    layout: Layout,
    store: VisualStore,
    icons: Vec<VisualId>,
    arrows: [VisualId; 2],

    current: usize,
    transition: Option<Transition>,
    effects: Timeline,

    autoplay: Autoplay,
    page_visible: bool,
    hovered: Option<NavDir>,
    pending_link: Option<(usize, f64)>,
    queued: Vec<CarouselEvent>,

    epoch: Option<HostTime>,
    now_secs: f64,
    last_now: Option<HostTime>,
}

impl Carousel {
    /// Builds a carousel, or `None` when the container cannot host one.
    ///
    /// Returns `None` for a degenerate (zero-size) viewport or when
    /// `textures` does not line up with the deck — the silent-no-op policy
    /// at the initialization seam. Failed loads arrive as
    /// [`TextureStatus::Missing`] and degrade only their own slide.
    ///
    /// The first activation of slide 0 is queued immediately; it plays out
    /// over the first frames.
    #[must_use]
    pub fn new(
        deck: SlideDeck,
        textures: &[TextureStatus],
        viewport: Viewport,
        config: CarouselConfig,
    ) -> Option<Self> {
        if viewport.is_degenerate() || textures.len() != deck.len() {
            return None;
        }

        let layout = Layout::resolve(viewport);
        let mut store = VisualStore::new();

        let icons: Vec<VisualId> = deck
            .items()
            .iter()
            .zip(textures)
            .enumerate()
            .map(|(i, (item, texture))| {
                let content = match *texture {
                    TextureStatus::Loaded(surface) => Some(surface),
                    TextureStatus::Missing => None,
                };
                #[expect(clippy::cast_possible_truncation, reason = "slide counts are tiny")]
                let slide = i as u32;
                store.add_icon(slide, item.tint, content)
            })
            .collect();

        let arrows = [
            store.add_arrow(NavDir::Previous, config.arrow_tint),
            store.add_arrow(NavDir::Next, config.arrow_tint),
        ];

        let mut carousel = Self {
            deck,
            layout,
            store,
            icons,
            arrows,
            current: 0,
            transition: None,
            effects: Timeline::new(),
            autoplay: Autoplay::new(config.autoplay_interval),
            page_visible: true,
            hovered: None,
            pending_link: None,
            queued: Vec::new(),
            epoch: None,
            now_secs: 0.0,
            last_now: None,
        };
        carousel.place_arrows();
        carousel.request(0, Activation::First, &mut Tracer::disabled());
        Some(carousel)
    }

    // -- Reads -------------------------------------------------------------

    /// The visual store, for presenters.
    #[must_use]
    pub fn store(&self) -> &VisualStore {
        &self.store
    }

    /// The currently committed slide index.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Returns `true` while a transition is in flight.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// The currently resolved layout.
    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The slide deck.
    #[must_use]
    pub fn deck(&self) -> &SlideDeck {
        &self.deck
    }

    /// The icon handle for a slide index.
    #[must_use]
    pub fn icon(&self, index: usize) -> VisualId {
        self.icons[index]
    }

    /// The arrow handle for a direction.
    #[must_use]
    pub fn arrow(&self, dir: NavDir) -> VisualId {
        match dir {
            NavDir::Previous => self.arrows[0],
            NavDir::Next => self.arrows[1],
        }
    }

    // -- External events ---------------------------------------------------

    /// Records a page visibility change. Autoplay keeps its cadence while
    /// hidden but skips firing.
    pub fn set_page_visible(&mut self, visible: bool) {
        self.page_visible = visible;
    }

    /// Requests a transition to `target` (wrapped into range). Dropped
    /// silently while a transition is in flight.
    pub fn request_slide(&mut self, target: usize) {
        let target = target % self.deck.len();
        self.request(target, Activation::Normal, &mut Tracer::disabled());
    }

    /// Recomputes the layout for a new container size.
    ///
    /// Arrows snap to their new offsets and scale immediately. The visible
    /// icon retargets its scale and base height over a short tween — unless
    /// a transition is running, in which case in-flight objects are left
    /// alone and pick up the new layout on their next activation.
    pub fn resized(&mut self, viewport: Viewport) {
        if viewport.is_degenerate() {
            return;
        }
        self.layout = Layout::resolve(viewport);
        self.place_arrows();

        let icon = self.icons[self.current];
        if self.transition.is_none() && self.store.visible(icon) {
            let item = self.deck.item(self.current);
            let target_scale = self.layout.icon_scale * item.fix_scale;
            let target_y = self.layout.icon_base_y + item.fix_y;
            self.effects.add(Tween::new(
                TweenTarget::ScaleXyz(icon),
                self.store.scale(icon)[0],
                target_scale,
                self.now_secs,
                RETARGET_DUR,
                Easing::QuadOut,
            ));
            self.effects.add(Tween::new(
                TweenTarget::BaseY(icon),
                self.store.base_y(icon),
                target_y,
                self.now_secs,
                RETARGET_DUR,
                Easing::QuadOut,
            ));
        }
    }

    /// Routes a pointer move. Returns the cursor style to show, or `None`
    /// while a transition has interaction frozen.
    pub fn pointer_moved(&mut self, pos: Point) -> Option<Cursor> {
        if self.transition.is_some() {
            return None;
        }
        let ndc = Ndc::from_surface(pos, &self.layout);
        let hit = pointer::hit_test(
            &self.store,
            &self.layout,
            ndc,
            self.arrows,
            self.icons[self.current],
        );
        self.hovered = match hit {
            Some(HitTarget::Arrow(dir)) => Some(dir),
            _ => None,
        };
        Some(if hit.is_some() {
            Cursor::Pointer
        } else {
            Cursor::Default
        })
    }

    /// Routes a click. Ignored while transitioning.
    pub fn pointer_clicked(&mut self, pos: Point) {
        self.pointer_clicked_traced(pos, &mut Tracer::disabled());
    }

    /// Like [`pointer_clicked`](Self::pointer_clicked), with tracing.
    pub fn pointer_clicked_traced(&mut self, pos: Point, tracer: &mut Tracer<'_>) {
        if self.transition.is_some() {
            return;
        }
        let ndc = Ndc::from_surface(pos, &self.layout);
        let action = pointer::route_click(
            &self.store,
            &self.layout,
            ndc,
            self.arrows,
            self.icons[self.current],
        );
        match action {
            Some(ClickAction::Navigate(dir)) => {
                tracer.pointer_hit(&PointerHitEvent {
                    target: HitTarget::Arrow(dir),
                });
                self.reset_autoplay_phase();
                self.press_bounce(dir);
                let target = self.deck.wrap(self.current as isize + dir.delta());
                self.request(target, Activation::Normal, tracer);
            }
            Some(ClickAction::Activate) => {
                tracer.pointer_hit(&PointerHitEvent {
                    target: HitTarget::Icon,
                });
                self.reset_autoplay_phase();
                let icon = self.icons[self.current];
                self.effects.add(
                    Tween::new(
                        TweenTarget::Glitch(icon),
                        self.store.glitch(icon),
                        PULSE_GLITCH,
                        self.now_secs,
                        PULSE_DUR,
                        Easing::QuadOut,
                    )
                    .with_yoyo(1),
                );
                if self.deck.item(self.current).has_link() {
                    self.pending_link = Some((self.current, self.now_secs + LINK_OPEN_DELAY));
                }
            }
            None => {}
        }
    }

    // -- Frame loop --------------------------------------------------------

    /// Advances one frame without tracing.
    pub fn frame(&mut self, tick: FrameTick, out: &mut FrameOutput) {
        self.frame_traced(tick, out, &mut Tracer::disabled());
    }

    /// Advances one frame, writing scene changes and events into `out`.
    pub fn frame_traced(&mut self, tick: FrameTick, out: &mut FrameOutput, tracer: &mut Tracer<'_>) {
        let epoch = *self.epoch.get_or_insert(tick.now);
        let t = tick.now.seconds_since(epoch);
        self.now_secs = t;
        self.last_now = Some(tick.now);

        tracer.frame_tick(&FrameTickEvent {
            frame_index: tick.frame_index,
            now: tick.now,
        });

        out.clear();
        out.time = t;

        // Autoplay advances only when idle and watched.
        let eligible = self.page_visible && self.transition.is_none();
        if self.autoplay.poll(tick.now, eligible) {
            let target = self.deck.next(self.current);
            #[expect(clippy::cast_possible_truncation, reason = "slide counts are tiny")]
            tracer.autoplay_fire(&AutoplayFireEvent {
                target: target as u32,
            });
            self.request(target, Activation::Normal, tracer);
        }

        // Step the in-flight transition.
        if let Some(mut tr) = self.transition.take() {
            let step = tr.step(t, &mut self.store);
            if step.ui_swap {
                let item = self.deck.item(tr.target());
                self.queued.push(CarouselEvent::Ui(UiUpdate {
                    index: tr.target(),
                    title: item.title.clone(),
                    subtitle: item.subtitle.clone(),
                    description: item.description.clone(),
                    accent: item.tint,
                }));
                self.queued.push(CarouselEvent::PanelVisible(true));
                #[expect(clippy::cast_possible_truncation, reason = "slide counts are tiny")]
                tracer.ui_swap(&UiSwapEvent {
                    index: tr.target() as u32,
                });
            }
            if step.completed {
                self.current = tr.target();
                #[expect(clippy::cast_possible_truncation, reason = "slide counts are tiny")]
                tracer.transition_end(&TransitionEndEvent {
                    index: self.current as u32,
                    at: t,
                });
            } else {
                self.transition = Some(tr);
            }
        }

        // One-shot effect tweens; drop the ones that just landed.
        self.effects.sample(t, &mut self.store);
        self.effects.retain_unfinished(t);

        // A matured activation flash opens its link.
        if let Some((index, open_at)) = self.pending_link
            && t >= open_at
        {
            self.pending_link = None;
            let url = self.deck.item(index).link_url.clone();
            #[expect(clippy::cast_possible_truncation, reason = "slide counts are tiny")]
            tracer.link_open(&LinkOpenEvent {
                index: index as u32,
            });
            self.queued.push(CarouselEvent::OpenLink { index, url });
        }

        pointer::apply_hover_feedback(&mut self.store, self.arrows, self.hovered);
        self.idle_motion(t);

        self.store.evaluate_into(&mut out.changes);
        out.events.append(&mut self.queued);

        #[cfg(feature = "trace-rich")]
        {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "change lists hold at most one entry per object"
            )]
            let counts = crate::trace::SceneChangeCounts {
                transforms: out.changes.transforms.len() as u32,
                materials: out.changes.materials.len() as u32,
                visibility: out.changes.visibility.len() as u32,
                content: out.changes.content.len() as u32,
            };
            tracer.scene_changes(tick.frame_index, &counts);
        }
    }

    // -- Internals ---------------------------------------------------------

    /// The idle motion layer: additive around the animation anchors so it
    /// composes with, rather than fights, a running transition tween.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "sine outputs are unit-range; f32 is plenty"
    )]
    fn idle_motion(&mut self, t: f64) {
        let bob = ((t * BOB_RATE).sin() as f32) * BOB_AMPLITUDE;
        let rot_y = ((t * ROT_Y_RATE).sin() as f32) * ROT_Y_AMPLITUDE;
        let rot_x = ((t * ROT_X_RATE).sin() as f32) * ROT_X_AMPLITUDE;
        for &icon in &self.icons {
            if self.store.visible(icon) {
                let y = self.store.base_y(icon) + bob;
                self.store.set_position_y(icon, y);
                self.store.set_rotation(icon, rot_x, rot_y);
            }
        }

        let breathe = ((t * BREATHE_RATE).sin() as f32) * BREATHE_AMPLITUDE;
        for &arrow in &self.arrows {
            let crate::scene::VisualKind::Arrow { dir } = self.store.kind(arrow) else {
                continue;
            };
            let x = self.store.base_x(arrow) + breathe * dir.sign();
            self.store
                .set_position(arrow, [x, self.layout.icon_base_y, 0.0]);
        }
    }

    /// Snaps both arrows to the current layout (no animation; they are
    /// always visible).
    fn place_arrows(&mut self) {
        for &arrow in &self.arrows {
            let crate::scene::VisualKind::Arrow { dir } = self.store.kind(arrow) else {
                continue;
            };
            let x = dir.sign() * self.layout.arrow_offset_x;
            self.store
                .set_position(arrow, [x, self.layout.icon_base_y, 0.0]);
            self.store
                .set_scale(arrow, [self.layout.arrow_scale, self.layout.arrow_scale, 1.0]);
            self.store.set_base_x(arrow, x);
            self.store.set_base_scale(arrow, self.layout.arrow_scale);
        }
    }

    fn press_bounce(&mut self, dir: NavDir) {
        let arrow = self.arrow(dir);
        let base = self.store.base_scale(arrow);
        self.effects.add(Tween::new(
            TweenTarget::ScaleXy(arrow),
            base * PRESS_DIP,
            base,
            self.now_secs,
            PRESS_BOUNCE_DUR,
            Easing::BOUNCE,
        ));
    }

    fn reset_autoplay_phase(&mut self) {
        if let Some(now) = self.last_now {
            self.autoplay.reset(now);
        }
    }

    fn request(&mut self, target: usize, activation: Activation, tracer: &mut Tracer<'_>) -> bool {
        if self.transition.is_some() && activation == Activation::Normal {
            #[expect(clippy::cast_possible_truncation, reason = "slide counts are tiny")]
            tracer.request_dropped(&RequestDroppedEvent {
                target: target as u32,
            });
            return false;
        }
        let outgoing = self.icons[self.current];
        let incoming = self.icons[target];
        let item = self.deck.item(target);
        let transition = Transition::begin(
            &mut self.store,
            &self.layout,
            item,
            target,
            outgoing,
            incoming,
            self.now_secs,
            activation,
        );
        #[expect(clippy::cast_possible_truncation, reason = "slide counts are tiny")]
        tracer.transition_begin(&TransitionBeginEvent {
            from: self.current as u32,
            to: target as u32,
            first: activation == Activation::First,
            at: self.now_secs,
        });
        self.transition = Some(transition);
        self.queued.push(CarouselEvent::PanelVisible(false));
        true
    }

    /// Drives the carousel with a tracing sink attached (convenience for
    /// diagnostics harnesses).
    pub fn frame_with_sink(&mut self, tick: FrameTick, out: &mut FrameOutput, sink: &mut dyn TraceSink) {
        self.frame_traced(tick, out, &mut Tracer::new(sink));
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use crate::slide::SlideItem;

    use super::*;

    fn deck(n: usize) -> SlideDeck {
        let items = (0..n)
            .map(|i| SlideItem {
                asset_ref: "icon.svg".to_string(),
                tint: Tint::new(0.2 * i as f32, 0.5, 0.5),
                title: i.to_string(),
                subtitle: "SYS".to_string(),
                description: "desc".to_string(),
                link_url: "https://example.org".to_string(),
                fix_y: 0.0,
                fix_scale: 1.0,
            })
            .collect();
        SlideDeck::new(items).unwrap()
    }

    fn carousel(n: usize) -> Carousel {
        Carousel::new(
            deck(n),
            &vec![TextureStatus::Loaded(SurfaceId(0)); n],
            Viewport::new(1440.0, 900.0),
            CarouselConfig::default(),
        )
        .unwrap()
    }

    /// Runs frames at ~60Hz from `from_ms` to `to_ms` inclusive.
    fn drive(c: &mut Carousel, out: &mut FrameOutput, from_ms: u64, to_ms: u64) -> Vec<CarouselEvent> {
        let mut events = Vec::new();
        let mut frame_index = from_ms / 16;
        let mut ms = from_ms;
        while ms <= to_ms {
            c.frame(FrameTick::new(HostTime::from_millis(ms), frame_index), out);
            events.extend(out.events.iter().cloned());
            frame_index += 1;
            ms += 16;
        }
        events
    }

    #[test]
    fn zero_size_container_is_a_silent_no_op() {
        assert!(
            Carousel::new(
                deck(3),
                &[TextureStatus::Missing; 3],
                Viewport::new(0.0, 0.0),
                CarouselConfig::default(),
            )
            .is_none()
        );
    }

    #[test]
    fn mismatched_texture_list_is_rejected() {
        assert!(
            Carousel::new(
                deck(3),
                &[TextureStatus::Missing; 2],
                Viewport::new(800.0, 600.0),
                CarouselConfig::default(),
            )
            .is_none()
        );
    }

    #[test]
    fn one_failed_asset_degrades_only_its_slide() {
        let c = Carousel::new(
            deck(4),
            &[
                TextureStatus::Loaded(SurfaceId(0)),
                TextureStatus::Missing,
                TextureStatus::Loaded(SurfaceId(2)),
                TextureStatus::Loaded(SurfaceId(3)),
            ],
            Viewport::new(800.0, 600.0),
            CarouselConfig::default(),
        )
        .unwrap();
        assert_eq!(c.store().len(), 6, "4 icons + 2 arrows, none missing");
        assert_eq!(c.store().content(c.icon(1)), None);
        assert_eq!(c.store().content(c.icon(2)), Some(SurfaceId(2)));
    }

    #[test]
    fn first_activation_reveals_slide_zero() {
        let mut c = carousel(5);
        let mut out = FrameOutput::new();
        assert!(c.is_transitioning(), "initial activation is in flight");

        let events = drive(&mut c, &mut out, 0, 1_000);
        assert!(!c.is_transitioning());
        assert_eq!(c.current_index(), 0);
        let icon = c.icon(0);
        assert!(c.store().visible(icon));
        assert_eq!(c.store().opacity(icon), 1.0);

        // Panel hid at request, copy swapped at the midpoint, panel back.
        assert!(matches!(events[0], CarouselEvent::PanelVisible(false)));
        assert!(events.iter().any(
            |e| matches!(e, CarouselEvent::Ui(u) if u.index == 0 && u.title == "0")
        ));
        assert!(events.contains(&CarouselEvent::PanelVisible(true)));
    }

    #[test]
    fn requests_are_dropped_while_transitioning() {
        let mut c = carousel(5);
        let mut out = FrameOutput::new();
        drive(&mut c, &mut out, 0, 1_000);

        c.request_slide(2);
        assert!(c.is_transitioning());
        // A competing request must leave the in-flight transition alone.
        c.request_slide(4);
        drive(&mut c, &mut out, 1_016, 2_100);
        assert_eq!(c.current_index(), 2, "second request was dropped");
    }

    #[test]
    fn request_wraps_modulo_item_count() {
        let mut c = carousel(5);
        let mut out = FrameOutput::new();
        drive(&mut c, &mut out, 0, 1_000);

        c.request_slide(12); // 12 mod 5 == 2
        drive(&mut c, &mut out, 1_016, 2_100);
        assert_eq!(c.current_index(), 2);
    }

    #[test]
    fn end_to_end_previous_wrap_to_last_slide() {
        let mut c = carousel(5);
        let mut out = FrameOutput::new();
        drive(&mut c, &mut out, 0, 1_000);

        c.request_slide(4);
        drive(&mut c, &mut out, 1_016, 2_200);

        assert_eq!(c.current_index(), 4);
        assert!(!c.store().visible(c.icon(0)), "item 0 hidden");
        let icon = c.icon(4);
        assert!(c.store().visible(icon));
        assert_eq!(c.store().opacity(icon), 1.0);
        let expected = c.layout().icon_scale * c.deck().item(4).fix_scale;
        assert!((c.store().scale(icon)[0] - expected).abs() < 1e-4);

        // Exactly one icon ends visible.
        let visible = (0..5).filter(|&i| c.store().visible(c.icon(i))).count();
        assert_eq!(visible, 1);
    }

    #[test]
    fn autoplay_advances_once_per_interval_and_wraps() {
        let mut c = carousel(3);
        let mut out = FrameOutput::new();
        // First activation settles well before the first autoplay fire.
        drive(&mut c, &mut out, 0, 1_000);
        assert_eq!(c.current_index(), 0);

        drive(&mut c, &mut out, 1_016, 5_100);
        assert_eq!(c.current_index(), 1, "one advance after ~4s");

        drive(&mut c, &mut out, 5_116, 9_100);
        assert_eq!(c.current_index(), 2);

        drive(&mut c, &mut out, 9_116, 13_100);
        assert_eq!(c.current_index(), 0, "wraps from last to first");
    }

    #[test]
    fn autoplay_skips_while_hidden_and_resumes() {
        let mut c = carousel(3);
        let mut out = FrameOutput::new();
        drive(&mut c, &mut out, 0, 1_000);

        c.set_page_visible(false);
        drive(&mut c, &mut out, 1_016, 9_000);
        assert_eq!(c.current_index(), 0, "hidden page never advances");

        c.set_page_visible(true);
        drive(&mut c, &mut out, 9_016, 14_000);
        assert_eq!(c.current_index(), 1, "resumes without an external restart");
    }

    #[test]
    fn arrow_click_navigates_and_resets_autoplay() {
        let mut c = carousel(5);
        let mut out = FrameOutput::new();
        drive(&mut c, &mut out, 0, 3_900);
        assert_eq!(c.current_index(), 0);

        // Click the "previous" arrow dead center.
        let layout = *c.layout();
        let wx = -layout.arrow_offset_x;
        let px = (wx / (layout.visible_width() / 2.0) + 1.0) / 2.0 * layout.viewport.width;
        let py = (1.0 - layout.icon_base_y / (layout.visible_height() / 2.0)) / 2.0
            * layout.viewport.height;
        c.pointer_clicked(Point::new(f64::from(px), f64::from(py)));

        assert!(c.is_transitioning(), "click issued a request");
        drive(&mut c, &mut out, 3_916, 5_100);
        assert_eq!(c.current_index(), 4, "previous from 0 wraps to last");

        // Autoplay phase restarted at the click: no fire within the next
        // partial interval.
        drive(&mut c, &mut out, 5_116, 7_800);
        assert_eq!(c.current_index(), 4);
    }

    #[test]
    fn icon_click_flashes_then_opens_link() {
        let mut c = carousel(3);
        let mut out = FrameOutput::new();
        drive(&mut c, &mut out, 0, 1_000);

        // Click the icon dead center.
        let layout = *c.layout();
        let py = (1.0 - layout.icon_base_y / (layout.visible_height() / 2.0)) / 2.0
            * layout.viewport.height;
        c.pointer_clicked(Point::new(
            f64::from(layout.viewport.width) / 2.0,
            f64::from(py),
        ));

        assert!(c.pending_link.is_some());
        let events = drive(&mut c, &mut out, 1_016, 1_400);
        let opened = events
            .iter()
            .find_map(|e| match e {
                CarouselEvent::OpenLink { index, url } => Some((*index, url.clone())),
                _ => None,
            })
            .expect("link opens after the flash delay");
        assert_eq!(opened, (0, "https://example.org".to_string()));
        assert!(!c.is_transitioning(), "activation does not navigate");
    }

    #[test]
    fn clicks_are_ignored_while_transitioning() {
        let mut c = carousel(5);
        let mut out = FrameOutput::new();
        drive(&mut c, &mut out, 0, 1_000);

        c.request_slide(1);
        // Mid-transition click on an arrow must do nothing.
        drive(&mut c, &mut out, 1_016, 1_100);
        let layout = *c.layout();
        let wx = layout.arrow_offset_x;
        let px = (wx / (layout.visible_width() / 2.0) + 1.0) / 2.0 * layout.viewport.width;
        let py = (1.0 - layout.icon_base_y / (layout.visible_height() / 2.0)) / 2.0
            * layout.viewport.height;
        c.pointer_clicked(Point::new(f64::from(px), f64::from(py)));

        drive(&mut c, &mut out, 1_116, 2_200);
        assert_eq!(c.current_index(), 1, "mid-flight click changed nothing");
    }

    #[test]
    fn pointer_move_reports_cursor_and_hover() {
        let mut c = carousel(3);
        let mut out = FrameOutput::new();
        drive(&mut c, &mut out, 0, 1_000);

        let layout = *c.layout();
        let wx = layout.arrow_offset_x;
        let px = (wx / (layout.visible_width() / 2.0) + 1.0) / 2.0 * layout.viewport.width;
        let py = (1.0 - layout.icon_base_y / (layout.visible_height() / 2.0)) / 2.0
            * layout.viewport.height;
        let cursor = c.pointer_moved(Point::new(f64::from(px), f64::from(py)));
        assert_eq!(cursor, Some(Cursor::Pointer));

        let cursor = c.pointer_moved(Point::new(5.0, 5.0));
        assert_eq!(cursor, Some(Cursor::Default));
    }

    #[test]
    fn resize_snaps_arrows_and_retargets_visible_icon() {
        let mut c = carousel(3);
        let mut out = FrameOutput::new();
        drive(&mut c, &mut out, 0, 1_000);
        let desktop_scale = c.layout().icon_scale;
        assert!((c.store().scale(c.icon(0))[0] - desktop_scale).abs() < 1e-4);

        c.resized(Viewport::new(375.0, 667.0));
        assert!(c.layout().is_mobile());
        let arrow = c.arrow(NavDir::Next);
        assert_eq!(c.store().scale(arrow)[0], 0.65, "arrows snap immediately");

        // The icon eases to the mobile parameters over 0.4s.
        drive(&mut c, &mut out, 1_016, 1_600);
        assert!((c.store().scale(c.icon(0))[0] - 0.9).abs() < 1e-3);
        assert!((c.store().base_y(c.icon(0)) - 1.3).abs() < 1e-3);
    }

    #[test]
    fn resize_during_transition_leaves_inflight_objects_alone() {
        let mut c = carousel(3);
        let mut out = FrameOutput::new();
        drive(&mut c, &mut out, 0, 1_000);

        c.request_slide(1);
        drive(&mut c, &mut out, 1_016, 1_100);
        c.resized(Viewport::new(375.0, 667.0));

        // Transition still completes to the scale it was planned with
        // (the desktop layout), not the new mobile one.
        drive(&mut c, &mut out, 1_116, 2_200);
        assert_eq!(c.current_index(), 1);
        assert!((c.store().scale(c.icon(1))[0] - 1.35).abs() < 1e-3);
    }

    #[test]
    fn time_feed_is_monotonic_seconds_from_first_frame() {
        let mut c = carousel(2);
        let mut out = FrameOutput::new();
        c.frame(FrameTick::new(HostTime::from_millis(10_000), 0), &mut out);
        assert_eq!(out.time, 0.0, "epoch is the first frame");
        c.frame(FrameTick::new(HostTime::from_millis(10_500), 1), &mut out);
        assert!((out.time - 0.5).abs() < 1e-9);
    }

    #[test]
    fn idle_motion_only_touches_visible_icons() {
        let mut c = carousel(3);
        let mut out = FrameOutput::new();
        drive(&mut c, &mut out, 0, 1_000);

        let hidden = c.icon(1);
        let pos = c.store().position(hidden);
        drive(&mut c, &mut out, 1_016, 1_200);
        assert_eq!(c.store().position(hidden), pos, "hidden icons hold still");

        let shown = c.icon(0);
        let y0 = c.store().position(shown)[1];
        drive(&mut c, &mut out, 1_216, 1_900);
        let y1 = c.store().position(shown)[1];
        assert!((y0 - y1).abs() > 1e-4, "visible icon bobs");
    }
}
