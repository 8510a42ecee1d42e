//! Pixel formats and image descriptors.
//!
//! Every uncompressed layout in the toolkit is described by its bit depth
//! and four channel masks. Conversion code never switches on the format
//! enum: it reads the masks from an [`ImageDesc`] and derives shifts and
//! widths with [`bit_shift`] and [`bit_count`]. [`PixelFormat`] names the
//! layouts the toolkit knows about and maps them to and from masks.
//!
//! # Types
//!
//! - [`PixelFormat`] - named pixel layouts (packed RGB, bump maps, DXT)
//! - [`Masks`] - red/green/blue/alpha bit masks
//! - [`ImageDesc`] - dimensions, pitch, depth and masks of a pixel buffer
//!
//! # Usage
//!
//! ```rust
//! use vx_core::{ImageDesc, PixelFormat};
//!
//! let desc = ImageDesc::for_format(PixelFormat::Rgb565, 64, 32).unwrap();
//! assert_eq!(desc.bytes_per_line, 128);
//! assert_eq!(desc.format(), PixelFormat::Rgb565);
//!
//! // DXT1 stores a 4x4 block in 8 bytes
//! assert_eq!(PixelFormat::Dxt1.compressed_size(64, 32), 16 * 8 * 8);
//! ```

use crate::{Error, Result};
use std::fmt;

/// Number of bits set in a channel mask.
///
/// # Example
///
/// ```rust
/// use vx_core::bit_count;
/// assert_eq!(bit_count(0x07E0), 6);
/// ```
#[inline]
pub const fn bit_count(mask: u32) -> u32 {
    mask.count_ones()
}

/// Position of the lowest set bit of a channel mask (0 for an empty mask).
///
/// # Example
///
/// ```rust
/// use vx_core::bit_shift;
/// assert_eq!(bit_shift(0xF800), 11);
/// assert_eq!(bit_shift(0), 0);
/// ```
#[inline]
pub const fn bit_shift(mask: u32) -> u32 {
    if mask == 0 { 0 } else { mask.trailing_zeros() }
}

/// Channel masks of a packed pixel.
///
/// For bump formats the channels are reinterpreted: red holds U, green
/// holds V and blue holds the luminance term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Masks {
    /// Red (or U) channel mask
    pub red: u32,
    /// Green (or V) channel mask
    pub green: u32,
    /// Blue (or luminance) channel mask
    pub blue: u32,
    /// Alpha channel mask
    pub alpha: u32,
}

impl Masks {
    /// Creates masks in ARGB order.
    #[inline]
    pub const fn new(alpha: u32, red: u32, green: u32, blue: u32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// All masks empty.
    pub const NONE: Self = Self::new(0, 0, 0, 0);

    /// Masks as an array ordered `[a, r, g, b]`.
    #[inline]
    pub const fn to_argb_array(self) -> [u32; 4] {
        [self.alpha, self.red, self.green, self.blue]
    }
}

/// Named pixel layouts.
///
/// Names list channels from the most significant bit to the least
/// significant one, so `Argb8888` stores alpha in the top byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelFormat {
    /// Unknown or unsupported layout.
    #[default]
    Unknown,
    /// 32-bit ARGB, 8 bits per channel.
    Argb8888,
    /// 32-bit RGB, top byte unused.
    Rgb888X,
    /// 24-bit RGB.
    Rgb888,
    /// 16-bit RGB 5-6-5.
    Rgb565,
    /// 16-bit RGB 5-5-5, top bit unused.
    Rgb555,
    /// 16-bit ARGB 1-5-5-5.
    Argb1555,
    /// 16-bit ARGB 4-4-4-4.
    Argb4444,
    /// 8-bit RGB 3-3-2.
    Rgb332,
    /// 8-bit ARGB 2-2-2-2.
    Argb2222,
    /// 32-bit ABGR, 8 bits per channel.
    Abgr8888,
    /// 32-bit RGBA, 8 bits per channel.
    Rgba8888,
    /// 32-bit BGRA, 8 bits per channel.
    Bgra8888,
    /// 32-bit BGR, top byte unused.
    Bgr888X,
    /// 24-bit BGR.
    Bgr888,
    /// 16-bit BGR 5-6-5.
    Bgr565,
    /// 16-bit BGR 5-5-5.
    Bgr555,
    /// 16-bit ABGR 1-5-5-5.
    Abgr1555,
    /// 16-bit ABGR 4-4-4-4.
    Abgr4444,
    /// S3TC DXT1 (opaque or 1-bit alpha).
    Dxt1,
    /// S3TC DXT2 (explicit premultiplied alpha).
    Dxt2,
    /// S3TC DXT3 (explicit alpha).
    Dxt3,
    /// S3TC DXT4 (interpolated premultiplied alpha).
    Dxt4,
    /// S3TC DXT5 (interpolated alpha).
    Dxt5,
    /// 16-bit signed bump map, 8 bits each for U and V.
    V8U8,
    /// 32-bit signed bump map, 16 bits each for U and V.
    V16U16,
    /// 16-bit bump map with 6-bit luminance.
    L6V5U5,
    /// 32-bit bump map with 8-bit luminance.
    X8L8V8U8,
}

/// Uncompressed color formats in detection order.
const COLOR_FORMATS: [PixelFormat; 18] = [
    PixelFormat::Argb8888,
    PixelFormat::Rgb888X,
    PixelFormat::Rgb888,
    PixelFormat::Rgb565,
    PixelFormat::Rgb555,
    PixelFormat::Argb1555,
    PixelFormat::Argb4444,
    PixelFormat::Rgb332,
    PixelFormat::Argb2222,
    PixelFormat::Abgr8888,
    PixelFormat::Rgba8888,
    PixelFormat::Bgra8888,
    PixelFormat::Bgr888X,
    PixelFormat::Bgr888,
    PixelFormat::Bgr565,
    PixelFormat::Bgr555,
    PixelFormat::Abgr1555,
    PixelFormat::Abgr4444,
];

const BUMP_FORMATS: [PixelFormat; 4] = [
    PixelFormat::V8U8,
    PixelFormat::V16U16,
    PixelFormat::L6V5U5,
    PixelFormat::X8L8V8U8,
];

impl PixelFormat {
    /// Every known format except [`PixelFormat::Unknown`].
    pub fn all() -> impl Iterator<Item = PixelFormat> {
        COLOR_FORMATS
            .into_iter()
            .chain([
                Self::Dxt1,
                Self::Dxt2,
                Self::Dxt3,
                Self::Dxt4,
                Self::Dxt5,
            ])
            .chain(BUMP_FORMATS)
    }

    /// Channel masks of this format. Compressed formats report [`Masks::NONE`].
    pub const fn masks(&self) -> Masks {
        match self {
            Self::Argb8888 => Masks::new(0xFF00_0000, 0x00FF_0000, 0x0000_FF00, 0x0000_00FF),
            Self::Rgb888X | Self::Rgb888 => Masks::new(0, 0x00FF_0000, 0x0000_FF00, 0x0000_00FF),
            Self::Rgb565 => Masks::new(0, 0xF800, 0x07E0, 0x001F),
            Self::Rgb555 => Masks::new(0, 0x7C00, 0x03E0, 0x001F),
            Self::Argb1555 => Masks::new(0x8000, 0x7C00, 0x03E0, 0x001F),
            Self::Argb4444 => Masks::new(0xF000, 0x0F00, 0x00F0, 0x000F),
            Self::Rgb332 => Masks::new(0, 0xE0, 0x1C, 0x03),
            Self::Argb2222 => Masks::new(0xC0, 0x30, 0x0C, 0x03),
            Self::Abgr8888 => Masks::new(0xFF00_0000, 0x0000_00FF, 0x0000_FF00, 0x00FF_0000),
            Self::Rgba8888 => Masks::new(0x0000_00FF, 0xFF00_0000, 0x00FF_0000, 0x0000_FF00),
            Self::Bgra8888 => Masks::new(0x0000_00FF, 0x0000_FF00, 0x00FF_0000, 0xFF00_0000),
            Self::Bgr888X | Self::Bgr888 => Masks::new(0, 0x0000_00FF, 0x0000_FF00, 0x00FF_0000),
            Self::Bgr565 => Masks::new(0, 0x001F, 0x07E0, 0xF800),
            Self::Bgr555 => Masks::new(0, 0x001F, 0x03E0, 0x7C00),
            Self::Abgr1555 => Masks::new(0x8000, 0x001F, 0x03E0, 0x7C00),
            Self::Abgr4444 => Masks::new(0xF000, 0x000F, 0x00F0, 0x0F00),
            Self::V8U8 => Masks::new(0, 0x00FF, 0xFF00, 0),
            Self::V16U16 => Masks::new(0, 0x0000_FFFF, 0xFFFF_0000, 0),
            Self::L6V5U5 => Masks::new(0, 0x001F, 0x03E0, 0xFC00),
            Self::X8L8V8U8 => Masks::new(0, 0x0000_00FF, 0x0000_FF00, 0x00FF_0000),
            Self::Unknown
            | Self::Dxt1
            | Self::Dxt2
            | Self::Dxt3
            | Self::Dxt4
            | Self::Dxt5 => Masks::NONE,
        }
    }

    /// Bits per pixel. DXT formats report their average rate (4 or 8).
    pub const fn bits_per_pixel(&self) -> u32 {
        match self {
            Self::Unknown => 0,
            Self::Argb8888
            | Self::Rgb888X
            | Self::Abgr8888
            | Self::Rgba8888
            | Self::Bgra8888
            | Self::Bgr888X
            | Self::V16U16
            | Self::X8L8V8U8 => 32,
            Self::Rgb888 | Self::Bgr888 => 24,
            Self::Rgb565
            | Self::Rgb555
            | Self::Argb1555
            | Self::Argb4444
            | Self::Bgr565
            | Self::Bgr555
            | Self::Abgr1555
            | Self::Abgr4444
            | Self::V8U8
            | Self::L6V5U5 => 16,
            Self::Rgb332 | Self::Argb2222 => 8,
            Self::Dxt1 => 4,
            Self::Dxt2 | Self::Dxt3 | Self::Dxt4 | Self::Dxt5 => 8,
        }
    }

    /// Whether the format carries an alpha channel.
    pub const fn has_alpha(&self) -> bool {
        self.masks().alpha != 0
            || matches!(
                self,
                Self::Dxt1 | Self::Dxt2 | Self::Dxt3 | Self::Dxt4 | Self::Dxt5
            )
    }

    /// Whether the format is block compressed.
    #[inline]
    pub const fn is_compressed(&self) -> bool {
        matches!(
            self,
            Self::Dxt1 | Self::Dxt2 | Self::Dxt3 | Self::Dxt4 | Self::Dxt5
        )
    }

    /// Whether the format stores bump map offsets rather than colors.
    #[inline]
    pub const fn is_bump(&self) -> bool {
        matches!(self, Self::V8U8 | Self::V16U16 | Self::L6V5U5 | Self::X8L8V8U8)
    }

    /// Bytes per 4x4 block for compressed formats.
    #[inline]
    pub const fn block_bytes(&self) -> Option<usize> {
        match self {
            Self::Dxt1 => Some(8),
            Self::Dxt2 | Self::Dxt3 | Self::Dxt4 | Self::Dxt5 => Some(16),
            _ => None,
        }
    }

    /// DXT variant number (1-5) for compressed formats.
    #[inline]
    pub const fn dxt_index(&self) -> Option<u8> {
        match self {
            Self::Dxt1 => Some(1),
            Self::Dxt2 => Some(2),
            Self::Dxt3 => Some(3),
            Self::Dxt4 => Some(4),
            Self::Dxt5 => Some(5),
            _ => None,
        }
    }

    /// Compressed format for a DXT variant number.
    #[inline]
    pub const fn from_dxt_index(index: u8) -> Self {
        match index {
            1 => Self::Dxt1,
            2 => Self::Dxt2,
            3 => Self::Dxt3,
            4 => Self::Dxt4,
            5 => Self::Dxt5,
            _ => Self::Unknown,
        }
    }

    /// Byte size of a `width` x `height` image in this format.
    ///
    /// Compressed formats round each axis up to whole 4x4 blocks, with at
    /// least one block per axis.
    pub fn compressed_size(&self, width: u32, height: u32) -> usize {
        match self.block_bytes() {
            Some(block) => {
                let bx = (width as usize).div_ceil(4).max(1);
                let by = (height as usize).div_ceil(4).max(1);
                bx * by * block
            }
            None => width as usize * height as usize * (self.bits_per_pixel() as usize / 8),
        }
    }

    /// Finds the uncompressed color format matching a bit depth and masks.
    pub fn from_masks(bits_per_pixel: u32, masks: Masks) -> Self {
        COLOR_FORMATS
            .into_iter()
            .find(|f| f.bits_per_pixel() == bits_per_pixel && f.masks() == masks)
            .unwrap_or(Self::Unknown)
    }

    /// Finds the bump format matching a bit depth and masks.
    pub fn bump_from_masks(bits_per_pixel: u32, masks: Masks) -> Self {
        BUMP_FORMATS
            .into_iter()
            .find(|f| f.bits_per_pixel() == bits_per_pixel && f.masks() == masks)
            .unwrap_or(Self::Unknown)
    }

    /// Short human readable name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Argb8888 => "32 ARGB8888",
            Self::Rgb888X => "32 RGB888",
            Self::Rgb888 => "24 RGB888",
            Self::Rgb565 => "16 RGB565",
            Self::Rgb555 => "16 RGB555",
            Self::Argb1555 => "16 ARGB1555",
            Self::Argb4444 => "16 ARGB4444",
            Self::Rgb332 => "8 RGB332",
            Self::Argb2222 => "8 ARGB2222",
            Self::Abgr8888 => "32 ABGR8888",
            Self::Rgba8888 => "32 RGBA8888",
            Self::Bgra8888 => "32 BGRA8888",
            Self::Bgr888X => "32 BGR888",
            Self::Bgr888 => "24 BGR888",
            Self::Bgr565 => "16 BGR565",
            Self::Bgr555 => "16 BGR555",
            Self::Abgr1555 => "16 ABGR1555",
            Self::Abgr4444 => "16 ABGR4444",
            Self::Dxt1 => "DXT1",
            Self::Dxt2 => "DXT2",
            Self::Dxt3 => "DXT3",
            Self::Dxt4 => "DXT4",
            Self::Dxt5 => "DXT5",
            Self::V8U8 => "16 V8U8",
            Self::V16U16 => "32 V16U16",
            Self::L6V5U5 => "16 L6V5U5",
            Self::X8L8V8U8 => "32 X8L8V8U8",
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the bits of an [`ImageDesc`] buffer are to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// Packed color pixels described by the masks.
    #[default]
    Color,
    /// Packed bump map offsets described by the masks.
    Bump,
    /// S3TC blocks; the value is the DXT variant (1-5).
    Dxt(u8),
}

/// Layout of a pixel buffer.
///
/// # Invariants
///
/// - `bytes_per_line` is at least `width * bits_per_pixel / 8` for
///   uncompressed layouts, and the byte size of one row of blocks for DXT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ImageDesc {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Distance in bytes between the starts of two consecutive rows
    pub bytes_per_line: usize,
    /// Bits per pixel (8, 16, 24 or 32 for uncompressed layouts)
    pub bits_per_pixel: u32,
    /// Channel masks
    pub masks: Masks,
    /// Interpretation of the data
    pub encoding: Encoding,
}

impl ImageDesc {
    /// Builds the descriptor of a tightly packed buffer in `format`.
    ///
    /// # Errors
    ///
    /// Fails for [`PixelFormat::Unknown`] and for zero dimensions.
    pub fn for_format(format: PixelFormat, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(width, height, "width and height must be > 0"));
        }
        let encoding = if let Some(n) = format.dxt_index() {
            Encoding::Dxt(n)
        } else if format.is_bump() {
            Encoding::Bump
        } else if format == PixelFormat::Unknown {
            return Err(Error::unsupported_format(format.name()));
        } else {
            Encoding::Color
        };

        let bytes_per_line = match format.block_bytes() {
            Some(block) => (width as usize).div_ceil(4).max(1) * block,
            None => width as usize * (format.bits_per_pixel() as usize / 8),
        };

        Ok(Self {
            width,
            height,
            bytes_per_line,
            bits_per_pixel: format.bits_per_pixel(),
            masks: format.masks(),
            encoding,
        })
    }

    /// Builds a color descriptor from arbitrary masks.
    pub fn from_masks(width: u32, height: u32, bits_per_pixel: u32, masks: Masks) -> Result<Self> {
        if !matches!(bits_per_pixel, 8 | 16 | 24 | 32) {
            return Err(Error::unsupported_format(format!("{bits_per_pixel} bits per pixel")));
        }
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(width, height, "width and height must be > 0"));
        }
        Ok(Self {
            width,
            height,
            bytes_per_line: width as usize * (bits_per_pixel as usize / 8),
            bits_per_pixel,
            masks,
            encoding: Encoding::Color,
        })
    }

    /// Returns a copy with a custom row pitch.
    pub fn with_pitch(mut self, bytes_per_line: usize) -> Result<Self> {
        let min = self.row_bytes();
        if bytes_per_line < min {
            return Err(Error::invalid_parameter(format!(
                "pitch {bytes_per_line} is less than minimum {min} for width {}",
                self.width
            )));
        }
        self.bytes_per_line = bytes_per_line;
        Ok(self)
    }

    /// Detects the named format of this descriptor.
    pub fn format(&self) -> PixelFormat {
        match self.encoding {
            Encoding::Dxt(n) => PixelFormat::from_dxt_index(n),
            Encoding::Bump => PixelFormat::bump_from_masks(self.bits_per_pixel, self.masks),
            Encoding::Color => PixelFormat::from_masks(self.bits_per_pixel, self.masks),
        }
    }

    /// Whether the data is block compressed.
    #[inline]
    pub fn is_compressed(&self) -> bool {
        matches!(self.encoding, Encoding::Dxt(_))
    }

    /// Bytes per pixel for uncompressed layouts.
    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        self.bits_per_pixel as usize / 8
    }

    /// Bytes holding pixel data in a single row (without padding).
    pub fn row_bytes(&self) -> usize {
        match self.encoding {
            Encoding::Dxt(n) => {
                let block = PixelFormat::from_dxt_index(n).block_bytes().unwrap_or(16);
                (self.width as usize).div_ceil(4).max(1) * block
            }
            _ => self.width as usize * self.bytes_per_pixel(),
        }
    }

    /// Number of rows stored in the buffer (block rows for DXT).
    pub fn rows(&self) -> usize {
        match self.encoding {
            Encoding::Dxt(_) => (self.height as usize).div_ceil(4).max(1),
            _ => self.height as usize,
        }
    }

    /// Smallest buffer length that holds every pixel of this descriptor.
    ///
    /// The last row is not required to carry pitch padding.
    pub fn min_buffer_len(&self) -> usize {
        let rows = self.rows();
        if rows == 0 {
            return 0;
        }
        self.bytes_per_line * (rows - 1) + self.row_bytes()
    }

    /// Checks that `len` bytes are enough for this descriptor.
    pub fn check_buffer(&self, len: usize) -> Result<()> {
        let needed = self.min_buffer_len();
        if len < needed {
            return Err(Error::buffer_too_small(needed, len));
        }
        Ok(())
    }

    /// Whether both descriptors have the same dimensions.
    #[inline]
    pub fn same_size(&self, other: &ImageDesc) -> bool {
        self.width == other.width && self.height == other.height
    }
}
