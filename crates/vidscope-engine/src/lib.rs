//! VidScope Engine - the frame scheduling loop
//!
//! Owns the shared frame buffer and the overlay stack. The embedder drives
//! [`ScopeEngine::tick`] from its display refresh signal; the engine caps
//! itself at a configurable native rate, refreshes the buffer from the
//! [`FrameSource`], and updates every overlay in stack order.

pub mod engine;
pub mod source;

pub use engine::ScopeEngine;
pub use source::{FrameSource, TestPatternSource};
