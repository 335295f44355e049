//! VidScope Core - Foundation types for the video analysis engine
//!
//! This crate provides the fundamental types used throughout VidScope:
//! - Frame buffers and the read-only frame view handed to analyzers
//! - Limited-range color model utilities (luma, chroma)
//! - The settings store contract and an in-memory implementation

pub mod color;
pub mod error;
pub mod frame;
pub mod settings;

pub use color::{chroma, limited_to_full, luma, Rgba8};
pub use error::{Result, ScopeError};
pub use frame::{FrameBuffer, FrameView};
pub use settings::{int_setting, MemorySettings, SettingsStore};
