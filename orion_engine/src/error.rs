//! Error types for the Orion engine
//!
//! This module defines the error types used throughout the engine,
//! including frame target allocation, binding, and backend failures.

use std::fmt;

/// Result type for Orion engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Orion engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (GL, Vulkan, mock, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (texture, framebuffer, target id, etc.)
    InvalidResource(String),

    /// Attachment allocation requested with a zero dimension
    InvalidSize {
        width: u32,
        height: u32,
    },

    /// A frame target was bound while its attachments are not allocated
    TargetNotReady(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InvalidSize { width, height } => {
                write!(f, "Invalid size: {}x{} (both dimensions must be > 0)", width, height)
            }
            Error::TargetNotReady(name) => {
                write!(f, "Target not ready: '{}' has no allocated attachments", name)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
