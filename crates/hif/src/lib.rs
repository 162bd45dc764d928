//! # hif
//!
//! Reader and writer for HIF images.
//!
//! A HIF file is a 12-byte positional header followed by an xz (or legacy
//! lzma) stream holding raw RGB pixel data.
//!
//! ## File layout
//!
//! ```text
//! offset  size  field
//! 0       6     reserved
//! 6       2     width  (big-endian u16)
//! 8       2     reserved
//! 10      2     height (big-endian u16)
//! 12      ..    compressed payload, width * height * 3 bytes once inflated
//! ```
//!
//! ## Quick Start
//!
//! ### Decoding a HIF file
//!
//! ```ignore
//! use hif::hif_decode;
//!
//! let data = std::fs::read("picture.hif")?;
//! let image = hif_decode(&data)?;
//! // image.pixels contains RGB pixel data (3 bytes per pixel)
//! println!("{}x{}", image.width(), image.height());
//! ```
//!
//! ### Encoding RGB data
//!
//! ```ignore
//! use hif::{hif_encode, EncodeOptions};
//!
//! let rgb = vec![255u8, 0, 0, 0, 255, 0]; // 2 pixels: red, green
//! let file = hif_encode(&rgb, 2, 1, &EncodeOptions::default())?;
//! ```

use thiserror::Error;

pub mod decoder;
pub mod encoder;
pub mod header;

pub use decoder::{
    decompress_payload, hex_dump, hif_decode, DecompressError, HifImage, DUMP_LEN, INITIAL_OUTPUT,
};
pub use encoder::{hif_encode, hif_encode_default, Container, EncodeOptions};
pub use header::{HifHeader, HEADER_LEN};

/// Bytes per decoded pixel (R, G, B).
pub const BYTES_PER_PIXEL: usize = 3;

/// Errors that can occur during HIF encoding or decoding.
#[derive(Debug, Error)]
pub enum HifError {
    /// The input is shorter than the fixed header
    #[error("file too short for a HIF header: {len} bytes, need 12")]
    TruncatedHeader { len: usize },

    /// Width or height is zero, or too large for the header fields
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// The header is not followed by any payload bytes
    #[error("file has a header but no compressed payload")]
    EmptyPayload,

    /// The payload inflated to a different size than the header declares
    #[error("corrupt or truncated HIF: header declares {expected} pixel bytes, stream holds {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Pixel buffer handed to the encoder has the wrong length
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// The xz/lzma decoder rejected the payload
    #[error(transparent)]
    Decompress(#[from] DecompressError),

    /// The xz encoder failed
    #[error("compression failed: {0}")]
    Encode(String),
}

/// Result type for HIF operations.
pub type Result<T> = core::result::Result<T, HifError>;
