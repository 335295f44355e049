//! VidScope demo runner.
//!
//! Drives the analysis engine against a synthetic color-bar source for a
//! couple of seconds and reports what each overlay produced. Overlay names
//! on the command line select the active set; with no arguments all seven
//! run.

use anyhow::Result;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;
use vidscope_core::MemorySettings;
use vidscope_engine::{ScopeEngine, TestPatternSource};
use vidscope_overlays::OverlayKind;

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("VidScope starting...");

    let mut active: HashSet<OverlayKind> = HashSet::new();
    for arg in std::env::args().skip(1) {
        match OverlayKind::parse(&arg) {
            Some(kind) => {
                active.insert(kind);
            }
            None => warn!(name = %arg, "unknown overlay name, ignoring"),
        }
    }
    if active.is_empty() {
        active = OverlayKind::ALL.into_iter().collect();
    }

    let settings = Arc::new(MemorySettings::new());
    let mut engine = ScopeEngine::new(settings);
    engine.set_active(&active);

    let mut source = TestPatternSource::with_motion(1280, 720, 8);
    let deadline = Instant::now() + Duration::from_secs(2);
    let mut processed = 0u32;
    while Instant::now() < deadline {
        if engine.tick(&mut source) {
            processed += 1;
        }
        // Stand-in for the display refresh signal.
        std::thread::sleep(Duration::from_millis(4));
    }
    engine.shutdown();

    info!(processed, "run complete");
    for overlay in engine.overlays().iter() {
        let surface = overlay.surface();
        let covered = surface.pixels().iter().filter(|p| p.a > 0).count();
        info!(
            kind = %overlay.kind(),
            width = surface.width(),
            height = surface.height(),
            covered,
            "overlay output"
        );
    }

    Ok(())
}
