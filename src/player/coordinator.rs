use std::sync::mpsc;
use std::time::Duration;

use crate::assets::fetch::{FetchRequest, FrameFetcher};
use crate::config::PlayerConfig;
use crate::foundation::core::{SlotIndex, VerticalBias, ViewportGeometry};
use crate::foundation::error::{ScrollreelError, ScrollreelResult};
use crate::loader::{AssetLoader, LoadTrigger};
use crate::player::clock::{FrameClock, ManualClock};
use crate::player::event::{EventSender, FrameRequestId, PlayerEvent};
use crate::progress::{ScrollGeometry, frame_for_progress};
use crate::render::renderer::{FrameRenderer, RenderOutcome};
use crate::render::surface::Surface;
use crate::reporter::ProgressReporter;
use crate::sequence::descriptor::SequenceDescriptor;
use crate::sequence::slot::{SlotTable, SlotTransition};

/// Player lifecycle. Only ever moves forward; `TornDown` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerState {
    /// Constructed, nothing requested.
    Idle,
    /// Mounted; waiting on frame 0.
    Priming,
    /// Frame 0 resolved; scroll-driven rendering and look-ahead loading are live.
    Active,
    TornDown,
}

/// Counters for one player's lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct PlayerStats {
    /// Fetches handed to the fetcher.
    pub frames_requested: u64,
    pub frames_loaded: u64,
    pub frames_failed: u64,
    /// Animation frames that ran (stale ids excluded).
    pub ticks: u64,
    /// Render passes that cleared the surface (drawn, fallback or blank).
    pub renders: u64,
    /// Render calls skipped because the frame index did not change.
    pub renders_skipped: u64,
}

/// Scroll-synchronized frame player.
///
/// Single-threaded coordinator: scroll, resize, animation-frame and load-completion events are
/// queued on an mpsc channel (see [`ScrollPlayer::sender`]) and applied one at a time by
/// [`ScrollPlayer::pump`], or passed straight to [`ScrollPlayer::handle`]. Bursts of scroll events
/// between two display refreshes collapse into one render: each event cancels the pending
/// animation frame and schedules a fresh one, and the frame reads the latest geometry.
pub struct ScrollPlayer<F, S, C>
where
    F: FrameFetcher,
    S: Surface<Image = F::Image>,
    C: FrameClock,
{
    sequence: SequenceDescriptor,
    config: PlayerConfig,
    slots: SlotTable<F::Image>,
    loader: AssetLoader,
    renderer: FrameRenderer,
    fetcher: F,
    surface: S,
    clock: C,
    reporter: Option<Box<dyn ProgressReporter>>,
    state: PlayerState,
    pending_frame: Option<FrameRequestId>,
    scroll: Option<ScrollGeometry>,
    viewport: Option<ViewportGeometry>,
    stats: PlayerStats,
    tx: EventSender<F::Image>,
    rx: mpsc::Receiver<PlayerEvent<F::Image>>,
}

impl<F, S, C> ScrollPlayer<F, S, C>
where
    F: FrameFetcher,
    S: Surface<Image = F::Image>,
    C: FrameClock,
{
    pub fn new(
        sequence: SequenceDescriptor,
        config: PlayerConfig,
        fetcher: F,
        surface: S,
        clock: C,
    ) -> ScrollreelResult<Self> {
        config.validate()?;
        let (tx, rx) = mpsc::channel();
        Ok(Self {
            slots: SlotTable::new(sequence.len()),
            loader: AssetLoader::new(
                config.lookahead,
                config.max_in_flight,
                LoadTrigger::from_distance(config.trigger_distance),
            ),
            renderer: FrameRenderer::new(VerticalBias::Center),
            sequence,
            config,
            fetcher,
            surface,
            clock,
            reporter: None,
            state: PlayerState::Idle,
            pending_frame: None,
            scroll: None,
            viewport: None,
            stats: PlayerStats::default(),
            tx: EventSender::new(tx),
            rx,
        })
    }

    /// Report load progress to `reporter` (typically a [`crate::ProgressHandle`]).
    pub fn with_reporter(mut self, reporter: impl ProgressReporter + 'static) -> Self {
        self.reporter = Some(Box::new(reporter));
        self
    }

    /// Producer for this player's event queue; hand clones to event sources and fetchers.
    pub fn sender(&self) -> EventSender<F::Image> {
        self.tx.clone()
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn stats(&self) -> PlayerStats {
        self.stats
    }

    pub fn sequence(&self) -> &SequenceDescriptor {
        &self.sequence
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn slots(&self) -> &SlotTable<F::Image> {
        &self.slots
    }

    pub fn loader(&self) -> &AssetLoader {
        &self.loader
    }

    pub fn renderer(&self) -> &FrameRenderer {
        &self.renderer
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn fetcher_mut(&mut self) -> &mut F {
        &mut self.fetcher
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Last viewport reported through a resize.
    pub fn viewport(&self) -> Option<ViewportGeometry> {
        self.viewport
    }

    pub fn pending_frame(&self) -> Option<FrameRequestId> {
        self.pending_frame
    }

    /// Slot the current scroll position maps to (slot 0 before any scroll is known).
    pub fn current_slot(&self) -> SlotIndex {
        let progress = self.scroll.as_ref().map_or(0.0, ScrollGeometry::progress);
        frame_for_progress(progress, self.sequence.len())
    }

    /// Start playback: register with the reporter, request frame 0 and schedule a first render.
    pub fn mount(&mut self) {
        if self.state != PlayerState::Idle {
            return;
        }
        self.state = PlayerState::Priming;
        if let Some(r) = &self.reporter {
            r.set_total(self.sequence.len());
        }
        tracing::debug!(frames = self.sequence.len(), "player mounted");
        let reqs = self.loader.prime(&self.sequence, &mut self.slots);
        self.dispatch(reqs);
        self.schedule_frame();
    }

    /// Remove the player: cancel the pending frame and drop every decoded frame.
    pub fn unmount(&mut self) {
        self.handle(PlayerEvent::Unmount);
    }

    /// Force a full redraw on the next animation frame.
    pub fn request_redraw(&mut self) {
        if matches!(self.state, PlayerState::Idle | PlayerState::TornDown) {
            return;
        }
        self.renderer.invalidate();
        self.schedule_frame();
    }

    /// Apply everything currently queued. Returns the number of events handled.
    pub fn pump(&mut self) -> usize {
        let mut n = 0;
        while let Ok(event) = self.rx.try_recv() {
            self.handle(event);
            n += 1;
        }
        n
    }

    /// Wait up to `timeout` for one event, then drain the rest of the queue.
    pub fn pump_timeout(&mut self, timeout: Duration) -> usize {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => {
                self.handle(event);
                1 + self.pump()
            }
            Err(_) => 0,
        }
    }

    /// Apply one event. Returns the render outcome when the event ran an animation frame.
    pub fn handle(&mut self, event: PlayerEvent<F::Image>) -> Option<RenderOutcome> {
        if self.state == PlayerState::TornDown {
            tracing::trace!("event after teardown ignored");
            return None;
        }
        match event {
            PlayerEvent::Scroll(geometry) => {
                self.scroll = Some(geometry);
                if self.state != PlayerState::Idle {
                    self.schedule_frame();
                }
                None
            }
            PlayerEvent::Resize(viewport) => {
                self.apply_resize(viewport);
                None
            }
            PlayerEvent::AnimationFrame(id) => {
                if self.pending_frame != Some(id) {
                    tracing::trace!(id = id.0, "stale animation frame ignored");
                    return None;
                }
                self.pending_frame = None;
                Some(self.run_frame())
            }
            PlayerEvent::FrameLoaded { slot, result } => {
                self.apply_loaded(slot, result);
                None
            }
            PlayerEvent::Unmount => {
                self.teardown();
                None
            }
        }
    }

    fn apply_resize(&mut self, viewport: ViewportGeometry) {
        let cfg = &self.config;
        let size = viewport.canvas_size(cfg.max_dpr, cfg.mobile_unit_dpr, cfg.mobile_breakpoint);
        let bias = if viewport.is_mobile(cfg.mobile_breakpoint) {
            cfg.vertical_bias
        } else {
            VerticalBias::Center
        };
        tracing::debug!(width = size.width, height = size.height, "canvas resized");
        self.viewport = Some(viewport);
        self.surface.resize(size);
        self.renderer.set_bias(bias);
        self.renderer.invalidate();
        if self.state != PlayerState::Idle {
            self.schedule_frame();
        }
    }

    fn apply_loaded(&mut self, slot: SlotIndex, result: Result<F::Image, ScrollreelError>) {
        let transition = match result {
            Ok(img) => self.slots.complete::<()>(slot, Ok(img)),
            Err(e) => {
                tracing::debug!(slot = slot.0, error = %e, "frame skipped");
                self.slots.complete::<()>(slot, Err(()))
            }
        };
        match transition {
            SlotTransition::Ignored => {
                tracing::debug!(slot = slot.0, "completion for slot not loading ignored");
                return;
            }
            SlotTransition::Filled => self.stats.frames_loaded += 1,
            SlotTransition::Failed => self.stats.frames_failed += 1,
        }
        if let Some(r) = &self.reporter {
            r.increment_loaded();
        }

        let reqs = self.loader.complete(&self.sequence, &mut self.slots);
        self.dispatch(reqs);

        if slot == SlotIndex(0) && self.state == PlayerState::Priming {
            self.state = PlayerState::Active;
            if transition == SlotTransition::Filled {
                self.renderer.seed_fallback(slot);
            }
            tracing::debug!(?transition, "first frame resolved, player active");
            self.request_redraw();
        } else if transition == SlotTransition::Filled && self.renderer.is_standing_in_for(slot) {
            self.request_redraw();
        }
    }

    fn run_frame(&mut self) -> RenderOutcome {
        self.stats.ticks += 1;
        if let Some(g) = &self.scroll {
            self.loader.observe(g);
        }
        let current = self.current_slot();
        if self.state == PlayerState::Active {
            let reqs = self
                .loader
                .advance(current, &self.sequence, &mut self.slots);
            self.dispatch(reqs);
        }

        let outcome = self.renderer.render(current, &self.slots, &mut self.surface);
        match outcome {
            RenderOutcome::Skipped => self.stats.renders_skipped += 1,
            RenderOutcome::Unavailable => {}
            RenderOutcome::Drawn(_) | RenderOutcome::Fallback { .. } | RenderOutcome::Blank(_) => {
                self.stats.renders += 1
            }
        }
        tracing::trace!(slot = current.0, ?outcome, "frame rendered");
        outcome
    }

    fn teardown(&mut self) {
        if let Some(id) = self.pending_frame.take() {
            self.clock.cancel_animation_frame(id);
        }
        self.slots.release();
        self.state = PlayerState::TornDown;
        tracing::debug!("player torn down");
    }

    fn schedule_frame(&mut self) {
        if let Some(id) = self.pending_frame.take() {
            self.clock.cancel_animation_frame(id);
        }
        self.pending_frame = Some(self.clock.request_animation_frame());
    }

    fn dispatch(&mut self, reqs: Vec<FetchRequest>) {
        for req in reqs {
            self.stats.frames_requested += 1;
            self.fetcher.fetch(req, self.tx.clone());
        }
    }
}

impl<F, S> ScrollPlayer<F, S, ManualClock>
where
    F: FrameFetcher,
    S: Surface<Image = F::Image>,
{
    /// Deliver the pending animation frame, if one is scheduled.
    pub fn tick(&mut self) -> Option<RenderOutcome> {
        let id = self.clock.take_due()?;
        self.handle(PlayerEvent::AnimationFrame(id))
    }

    /// Pump queued events and deliver animation frames until neither produces more work.
    pub fn settle(&mut self) -> Option<RenderOutcome> {
        let mut last = None;
        loop {
            let handled = self.pump();
            let outcome = self.tick();
            if outcome.is_some() {
                last = outcome;
            }
            if handled == 0 && outcome.is_none() {
                return last;
            }
        }
    }
}
