//! The scheduling loop.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, trace};
use vidscope_core::{FrameBuffer, SettingsStore};
use vidscope_overlays::{Overlay, OverlayKind, OverlayStack};

use crate::source::FrameSource;

/// Default cap on the continuous-redraw cadence.
pub const DEFAULT_TICK_RATE_HZ: f64 = 25.0;

/// Owns the shared frame buffer and the overlay stack.
///
/// Single-threaded by construction: `tick` runs every enabled overlay to
/// completion against an immutable borrow of the freshly written buffer, so
/// no overlay ever observes a half-written frame and no locking is needed.
pub struct ScopeEngine {
    frame: FrameBuffer,
    overlays: OverlayStack,
    settings: Arc<dyn SettingsStore>,
    min_tick_interval: Duration,
    last_tick: Option<Instant>,
    stopped: bool,
}

impl ScopeEngine {
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self::with_tick_rate(settings, DEFAULT_TICK_RATE_HZ)
    }

    /// An engine capped at `tick_rate_hz` redraws per second.
    pub fn with_tick_rate(settings: Arc<dyn SettingsStore>, tick_rate_hz: f64) -> Self {
        info!(tick_rate_hz, "creating analysis engine");
        Self {
            frame: FrameBuffer::default(),
            overlays: OverlayStack::standard(),
            settings,
            min_tick_interval: Duration::from_secs_f64(1.0 / tick_rate_hz),
            last_tick: None,
            stopped: false,
        }
    }

    pub fn overlays(&self) -> &OverlayStack {
        &self.overlays
    }

    pub fn overlays_mut(&mut self) -> &mut OverlayStack {
        &mut self.overlays
    }

    pub fn overlay(&self, kind: OverlayKind) -> Option<&dyn Overlay> {
        self.overlays.get(kind)
    }

    /// Apply the enablement set: named overlays turn on, the rest turn off
    /// and clear their surfaces. Takes effect before the next tick.
    pub fn set_active(&mut self, active: &HashSet<OverlayKind>) {
        debug!(count = active.len(), "applying enablement set");
        self.overlays.apply_enablement(active);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// One scheduling tick, normally driven by the display refresh signal.
    ///
    /// Refreshes the shared buffer from `source` and updates every overlay
    /// in stack order. Returns true when a frame was processed; false when
    /// the engine is stopped, the internal rate cap has not elapsed, or the
    /// source had nothing to offer.
    pub fn tick(&mut self, source: &mut dyn FrameSource) -> bool {
        if self.stopped {
            return false;
        }
        let now = Instant::now();
        if let Some(last) = self.last_tick {
            if now.duration_since(last) < self.min_tick_interval {
                return false;
            }
        }
        self.last_tick = Some(now);

        let (width, height) = source.dimensions();
        if width == 0 || height == 0 {
            trace!("frame source not ready, skipping tick");
            return false;
        }
        if (width, height) != (self.frame.width(), self.frame.height()) {
            debug!(width, height, "resizing shared frame buffer");
            self.frame.resize(width, height);
        }
        if !source.fill(&mut self.frame) {
            trace!("no new frame this tick");
            return false;
        }

        let view = self.frame.view();
        for overlay in self.overlays.iter_mut() {
            overlay.update(view, self.settings.as_ref());
        }
        true
    }

    /// Tear down. No tick runs after this; surfaces keep their last state
    /// until the overlays are dropped with the engine.
    pub fn shutdown(&mut self) {
        if !self.stopped {
            info!("analysis engine shut down");
        }
        self.stopped = true;
    }
}
