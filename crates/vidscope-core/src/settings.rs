//! Settings store contract.
//!
//! Threshold-bearing analyzers pull their settings fresh on every eligible
//! update, so a write is visible within one frame. The store itself is a
//! plain keyed lookup; persistence lives outside this crate.

use parking_lot::RwLock;
use std::collections::HashMap;

/// External key/value settings, string-typed at the boundary.
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// Read an integer setting, falling back to `default` when the key is absent
/// or unparseable, then clamping into `[min, max]`.
pub fn int_setting(store: &dyn SettingsStore, key: &str, default: i32, min: i32, max: i32) -> i32 {
    store
        .get(key)
        .and_then(|v| v.trim().parse::<i32>().ok())
        .unwrap_or(default)
        .clamp(min, max)
}

/// In-memory settings store.
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values.write().insert(key.to_owned(), value.to_owned());
    }
}
