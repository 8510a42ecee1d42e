//! Error types for vx-core operations.
//!
//! The [`Error`] enum covers the failure modes of buffer and format
//! handling: bad dimensions, buffers that are too small for their
//! descriptor, unsupported pixel layouts and I/O.
//!
//! # Usage
//!
//! ```rust
//! use vx_core::{Error, Result};
//!
//! fn check_buffer(len: usize, needed: usize) -> Result<()> {
//!     if len < needed {
//!         return Err(Error::buffer_too_small(needed, len));
//!     }
//!     Ok(())
//! }
//! assert!(check_buffer(3, 4).is_err());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while handling pixel buffers and descriptors.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid image dimensions.
    ///
    /// Returned when width or height is zero, or the dimensions would
    /// overflow a buffer size computation.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Pixel format is not supported for this operation.
    #[error("unsupported pixel format: {format}")]
    UnsupportedFormat {
        /// Format name or description
        format: String,
    },

    /// A pixel buffer is shorter than its descriptor requires.
    #[error("buffer too small: need {needed} bytes, got {got}")]
    BufferTooSmall {
        /// Bytes required by the descriptor
        needed: usize,
        /// Bytes actually provided
        got: usize,
    },

    /// A parameter is out of its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with custom message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::UnsupportedFormat`] error.
    #[inline]
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Creates an [`Error::BufferTooSmall`] error.
    #[inline]
    pub fn buffer_too_small(needed: usize, got: usize) -> Self {
        Self::BufferTooSmall { needed, got }
    }

    /// Creates an [`Error::InvalidParameter`] error.
    #[inline]
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Creates an [`Error::Other`] error.
    #[inline]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Returns `true` if this error is about buffer sizes or dimensions.
    #[inline]
    pub fn is_size_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimensions { .. } | Self::BufferTooSmall { .. }
        )
    }

    /// Returns `true` if this is an I/O error.
    #[inline]
    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
