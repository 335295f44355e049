//! Error types for VidScope.
//!
//! The analysis path itself never fails: a missing frame or an unparseable
//! threshold is skipped or defaulted. Errors exist only at construction
//! surfaces where a caller hands us data that cannot be used at all.

use thiserror::Error;

/// Main error type for VidScope operations.
#[derive(Error, Debug)]
pub enum ScopeError {
    #[error("frame buffer for {width}x{height} needs {expected} bytes, got {got}")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        got: usize,
    },
}

/// Result type alias for VidScope operations.
pub type Result<T> = std::result::Result<T, ScopeError>;
