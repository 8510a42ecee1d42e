//! # vx-core
//!
//! Core types shared by every crate of the vx toolkit.
//!
//! - [`PixelFormat`] and [`ImageDesc`] - pixel layouts described by channel masks
//! - [`Color`] - floating point RGBA color with packed ARGB conversion
//! - [`Rect`] - floating point 2D rectangle
//! - [`Error`] - shared error type
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. The rest of the workspace builds on it:
//!
//! ```text
//! vx-core (this crate)
//!    ^
//!    |
//!    +-- vx-math (vectors, matrices, intersection kernel)
//!    +-- vx-image (blitting, resize, DXT codec)
//!    +-- vx-system (configuration, directory parsing)
//!    +-- vx-cli
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod color;
pub mod error;
pub mod format;
pub mod rect;

pub use color::*;
pub use error::*;
pub use format::*;
pub use rect::*;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use vx_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Color;
    pub use crate::error::{Error, Result};
    pub use crate::format::{bit_count, bit_shift, Encoding, ImageDesc, PixelFormat};
    pub use crate::rect::Rect;
}
