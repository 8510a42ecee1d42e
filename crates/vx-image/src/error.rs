//! Error types for image operations.

use thiserror::Error;

/// Error type for image operations.
#[derive(Error, Debug)]
pub enum ImageError {
    /// Invalid dimensions specified, or source and destination disagree.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// A pixel buffer is shorter than its dimensions require.
    #[error("buffer too small: need {needed}, got {got}")]
    BufferTooSmall {
        /// Elements required
        needed: usize,
        /// Elements provided
        got: usize,
    },

    /// Operation not supported for this pixel format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Descriptor error from vx-core.
    #[error(transparent)]
    Core(#[from] vx_core::Error),
}

impl ImageError {
    /// Creates an [`ImageError::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(msg: impl Into<String>) -> Self {
        Self::InvalidDimensions(msg.into())
    }

    /// Creates an [`ImageError::BufferTooSmall`] error.
    #[inline]
    pub fn buffer_too_small(needed: usize, got: usize) -> Self {
        Self::BufferTooSmall { needed, got }
    }

    /// Creates an [`ImageError::UnsupportedFormat`] error.
    #[inline]
    pub fn unsupported_format(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    /// Creates an [`ImageError::InvalidParameter`] error.
    #[inline]
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Returns `true` for dimension and buffer size errors, including
    /// the ones raised by vx-core descriptors.
    pub fn is_size_error(&self) -> bool {
        match self {
            Self::InvalidDimensions(_) | Self::BufferTooSmall { .. } => true,
            Self::Core(e) => e.is_size_error(),
            _ => false,
        }
    }

    /// Returns `true` if the pixel format was rejected.
    #[inline]
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat(_) | Self::Core(vx_core::Error::UnsupportedFormat { .. })
        )
    }
}

/// Result type for image operations.
pub type ImageResult<T> = Result<T, ImageError>;

/// Checks `w * h` against a buffer length without overflowing.
pub(crate) fn check_pixels(len: usize, width: u32, height: u32) -> ImageResult<usize> {
    if width == 0 || height == 0 {
        return Err(ImageError::invalid_dimensions(format!(
            "{width}x{height}: width and height must be > 0"
        )));
    }
    let needed = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| ImageError::invalid_dimensions("image dimensions overflow"))?;
    if len < needed {
        return Err(ImageError::buffer_too_small(needed, len));
    }
    Ok(needed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(ImageError::buffer_too_small(16, 4).is_size_error());
        assert!(ImageError::unsupported_format("DXT1").is_unsupported());
        let core: ImageError = vx_core::Error::buffer_too_small(8, 2).into();
        assert!(core.is_size_error());
        assert!(!core.is_unsupported());
        assert!(core.to_string().contains('8'));
    }

    #[test]
    fn test_check_pixels() {
        assert_eq!(check_pixels(12, 4, 3).unwrap(), 12);
        assert!(check_pixels(11, 4, 3).unwrap_err().is_size_error());
        assert!(check_pixels(100, 0, 3).is_err());
    }
}
