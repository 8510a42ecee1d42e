//! # vx-image
//!
//! Pixel utilities for the vx toolkit.
//!
//! # Modules
//!
//! - [`convert`] - pixel access, format conversion and blitting between
//!   mask-described layouts
//! - [`resize`] - separable resampling of float and ARGB images
//! - [`mipmap`] - box-filtered mip chains
//! - [`normalmap`] - normal and bump maps from height images
//! - [`dxt`] - DXT1, DXT3 and DXT5 block compression
//!
//! Apart from [`convert`], which works on raw bytes described by a
//! [`vx_core::ImageDesc`], every operation takes 32-bit ARGB pixels
//! (`0xAARRGGBB`) in row order.
//!
//! # Example
//!
//! ```rust
//! use vx_core::{ImageDesc, PixelFormat};
//! use vx_image::{convert, dxt, mipmap};
//!
//! let desc = ImageDesc::for_format(PixelFormat::Rgb565, 4, 4).unwrap();
//! let mut raw = vec![0u8; desc.min_buffer_len()];
//! convert::fill(&desc, &mut raw, 0xFF00_FF00).unwrap();
//!
//! let argb = convert::convert_to_argb32(&desc, &raw).unwrap();
//! let chain = mipmap::generate_mip_chain(&argb, 4, 4).unwrap();
//! assert_eq!(chain.len(), 3);
//!
//! let blocks = dxt::compress(&argb, 4, 4, dxt::DxtFormat::Dxt1, dxt::Quality::Fast).unwrap();
//! assert_eq!(blocks.len(), 8);
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - row-parallel resize passes and DXT block rows via rayon

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod convert;
pub mod dxt;
pub mod mipmap;
pub mod normalmap;
pub mod resize;

pub use error::{ImageError, ImageResult};
pub use dxt::{DxtFormat, Quality};
pub use mipmap::MipLevel;
pub use resize::Filter;
