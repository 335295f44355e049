//! Overlay integration tests: settings round trips and frame-to-surface
//! behavior across crate boundaries.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use vidscope_core::{MemorySettings, SettingsStore};
use vidscope_engine::{ScopeEngine, TestPatternSource};
use vidscope_overlays::peaking::PEAKING_THRESHOLD_KEY;
use vidscope_overlays::zebra::ZEBRA_THRESHOLD_KEY;
use vidscope_overlays::{ExposureOverlay, FocusPeakingOverlay, OverlayKind};

#[test]
fn threshold_constants_bound_settings_domain() {
    assert_eq!(ExposureOverlay::DEFAULT_THRESHOLD, 230);
    assert_eq!(FocusPeakingOverlay::DEFAULT_THRESHOLD, 80);
    assert_eq!(ExposureOverlay::MIN_THRESHOLD, 0);
    assert_eq!(ExposureOverlay::MAX_THRESHOLD, 255);
}

#[test]
fn settings_write_reaches_overlay_within_one_frame() {
    let settings = Arc::new(MemorySettings::new());
    let mut engine = ScopeEngine::with_tick_rate(settings.clone(), f64::INFINITY);
    let zebra_only: HashSet<OverlayKind> = [OverlayKind::Exposure].into_iter().collect();
    engine.set_active(&zebra_only);

    // Mid-gray bars sit below the default threshold of 230: no stripes.
    let mut source = TestPatternSource::new(64, 64);
    engine.tick(&mut source);
    let zebra = engine.overlay(OverlayKind::Exposure).unwrap();
    let initially_covered = zebra.surface().pixels().iter().filter(|p| p.a != 0).count();

    // Drop the threshold to zero; the very next eligible update reflects it.
    settings.set(ZEBRA_THRESHOLD_KEY, "0");
    std::thread::sleep(Duration::from_millis(45));
    engine.tick(&mut source);
    let zebra = engine.overlay(OverlayKind::Exposure).unwrap();
    let now_covered = zebra.surface().pixels().iter().filter(|p| p.a != 0).count();
    assert!(
        now_covered > initially_covered,
        "threshold 0 must stripe far more pixels ({now_covered} vs {initially_covered})"
    );
}

#[test]
fn peaking_threshold_maximum_suppresses_bar_edges() {
    let settings = Arc::new(MemorySettings::new());
    let mut engine = ScopeEngine::with_tick_rate(settings.clone(), f64::INFINITY);
    let peaking_only: HashSet<OverlayKind> = [OverlayKind::FocusPeaking].into_iter().collect();
    engine.set_active(&peaking_only);

    let mut source = TestPatternSource::new(128, 64);
    engine.tick(&mut source);
    let peaking = engine.overlay(OverlayKind::FocusPeaking).unwrap();
    assert!(
        peaking.surface().pixels().iter().any(|p| p.a != 0),
        "color-bar boundaries should peak at the default threshold"
    );

    // At the ceiling nothing clears the gate: neighboring bars differ by
    // less than 64 luma, so every Sobel magnitude stays under 256.
    settings.set(PEAKING_THRESHOLD_KEY, "255");
    std::thread::sleep(Duration::from_millis(45));
    engine.tick(&mut source);
    let peaking = engine.overlay(OverlayKind::FocusPeaking).unwrap();
    let flagged = peaking.surface().pixels().iter().filter(|p| p.a != 0).count();
    assert_eq!(flagged, 0, "threshold 255 should suppress every bar edge");
}

#[test]
fn scope_overlays_rate_limit_between_ticks() {
    let settings = Arc::new(MemorySettings::new());
    let mut engine = ScopeEngine::with_tick_rate(settings, f64::INFINITY);
    let active: HashSet<OverlayKind> = [OverlayKind::Waveform].into_iter().collect();
    engine.set_active(&active);

    // Bars drift between frames; a second immediate tick must not redraw
    // the 10 Hz waveform, so its surface stays byte-identical.
    let mut source = TestPatternSource::with_motion(256, 128, 16);
    engine.tick(&mut source);
    let first: Vec<u8> = engine
        .overlay(OverlayKind::Waveform)
        .unwrap()
        .surface()
        .data()
        .to_vec();
    engine.tick(&mut source);
    let second = engine.overlay(OverlayKind::Waveform).unwrap().surface().data();
    assert_eq!(first, second);
}

#[test]
fn legends_are_available_to_the_view_layer() {
    use vidscope_overlays::el_zone::EL_ZONE_TABLE;
    use vidscope_overlays::false_color::FALSE_COLOR_BANDS;

    assert_eq!(FALSE_COLOR_BANDS.len(), 13);
    assert_eq!(EL_ZONE_TABLE.len(), 15);
    // Zone labels are ordered from -6 to +6 for the legend bar.
    assert_eq!(EL_ZONE_TABLE.first().unwrap().label, "-6");
    assert_eq!(EL_ZONE_TABLE.last().unwrap().label, "6");
}
