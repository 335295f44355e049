//! VidScope Overlays - the video analysis overlay set
//!
//! Seven analyzers share one capability contract: enable/disable with an
//! immediate clear on disable, wall-clock rate-gated updates, and a private
//! render surface. The scheduling loop iterates them uniformly; each one
//! reads the shared frame through a borrowed view and writes only to its own
//! surface.

pub mod el_zone;
pub mod false_color;
pub mod histogram;
pub mod peaking;
pub mod surface;
pub mod vectorscope;
pub mod waveform;
pub mod zebra;

pub use el_zone::ElZoneOverlay;
pub use false_color::FalseColorOverlay;
pub use histogram::HistogramOverlay;
pub use peaking::FocusPeakingOverlay;
pub use surface::PixelSurface;
pub use vectorscope::VectorscopeOverlay;
pub use waveform::WaveformOverlay;
pub use zebra::ExposureOverlay;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::time::Instant;
use vidscope_core::{FrameView, SettingsStore};

/// Update rate for analyzers that are cheap enough to run at the main loop's
/// native cadence.
pub const NATIVE_RATE_HZ: f64 = 25.0;

/// Update rate for the heavier scope-style analyzers.
pub const SCOPE_RATE_HZ: f64 = 10.0;

/// Identifier for each overlay kind. The serialized/string forms are the
/// identifiers the enablement set carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayKind {
    Vectorscope,
    Histogram,
    Exposure,
    FocusPeaking,
    Waveform,
    ElColor,
    FalseColor,
}

impl OverlayKind {
    /// All kinds, in the stack's fixed update order.
    pub const ALL: [OverlayKind; 7] = [
        OverlayKind::Exposure,
        OverlayKind::FocusPeaking,
        OverlayKind::Histogram,
        OverlayKind::Vectorscope,
        OverlayKind::Waveform,
        OverlayKind::ElColor,
        OverlayKind::FalseColor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OverlayKind::Vectorscope => "vectorscope",
            OverlayKind::Histogram => "histogram",
            OverlayKind::Exposure => "exposure",
            OverlayKind::FocusPeaking => "focus-peaking",
            OverlayKind::Waveform => "waveform",
            OverlayKind::ElColor => "el-color",
            OverlayKind::FalseColor => "false-color",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

impl fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shared enable/rate-gate state embedded by every analyzer.
#[derive(Debug)]
pub struct UpdateGate {
    enabled: bool,
    target_rate_hz: f64,
    last_update: Option<Instant>,
}

impl UpdateGate {
    pub fn new(target_rate_hz: f64) -> Self {
        Self {
            enabled: false,
            target_rate_hz,
            last_update: None,
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn target_rate_hz(&self) -> f64 {
        self.target_rate_hz
    }

    /// Set the enabled flag. Returns true on the enabled-to-disabled
    /// transition, when the caller must clear its render surface.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        let was_enabled = self.enabled;
        self.enabled = enabled;
        was_enabled && !enabled
    }

    /// Rate gate: false unless enabled and at least `1/target_rate_hz`
    /// seconds have passed since the last granted update. Granting records
    /// the new timestamp.
    pub fn should_update(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        let now = Instant::now();
        if let Some(last) = self.last_update {
            if now.duration_since(last).as_secs_f64() < 1.0 / self.target_rate_hz {
                return false;
            }
        }
        self.last_update = Some(now);
        true
    }
}

/// Capability contract implemented by all seven analyzers.
pub trait Overlay: Send {
    fn kind(&self) -> OverlayKind;

    fn is_enabled(&self) -> bool;

    /// Enable or disable. Disabling clears the render surface immediately so
    /// no stale pixels survive.
    fn set_enabled(&mut self, enabled: bool);

    /// Run the analyzer against the current frame. A silent no-op unless the
    /// overlay is enabled, its refresh interval has elapsed, and the frame
    /// has nonzero dimensions.
    fn update(&mut self, frame: FrameView<'_>, settings: &dyn SettingsStore);

    /// Erase the render surface. Idempotent, safe before any update ran.
    fn clear(&mut self);

    /// The finished output raster for the surrounding view to display.
    fn surface(&self) -> &PixelSurface;

    fn target_rate_hz(&self) -> f64;
}

/// The seven analyzers in their fixed, deterministic update order.
pub struct OverlayStack {
    overlays: Vec<Box<dyn Overlay>>,
}

impl OverlayStack {
    /// Construct the standard set. Order is stable; it is the order the
    /// scheduling loop updates in.
    pub fn standard() -> Self {
        Self {
            overlays: vec![
                Box::new(ExposureOverlay::new()),
                Box::new(FocusPeakingOverlay::new()),
                Box::new(HistogramOverlay::new()),
                Box::new(VectorscopeOverlay::new()),
                Box::new(WaveformOverlay::new()),
                Box::new(ElZoneOverlay::new()),
                Box::new(FalseColorOverlay::new()),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    /// Kinds in update order.
    pub fn kinds(&self) -> Vec<OverlayKind> {
        self.overlays.iter().map(|o| o.kind()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Overlay> {
        self.overlays.iter().map(|o| o.as_ref())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Overlay>> {
        self.overlays.iter_mut()
    }

    pub fn get(&self, kind: OverlayKind) -> Option<&dyn Overlay> {
        self.overlays
            .iter()
            .find(|o| o.kind() == kind)
            .map(|o| o.as_ref())
    }

    pub fn get_mut(&mut self, kind: OverlayKind) -> Option<&mut Box<dyn Overlay>> {
        self.overlays.iter_mut().find(|o| o.kind() == kind)
    }

    /// Apply an enablement set: members are enabled, everything else is
    /// disabled (and thereby cleared).
    pub fn apply_enablement(&mut self, active: &HashSet<OverlayKind>) {
        for overlay in &mut self.overlays {
            overlay.set_enabled(active.contains(&overlay.kind()));
        }
    }
}

impl Default for OverlayStack {
    fn default() -> Self {
        Self::standard()
    }
}
