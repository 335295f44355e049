//! Integration test crate for VidScope.
//!
//! This crate exists solely to hold cross-crate integration tests. It
//! depends on the core, overlay, and engine crates to verify they work
//! together.

#[cfg(test)]
mod engine;

#[cfg(test)]
mod overlays;
