//! HIF encoder: writes the 12-byte header and an xz or lzma payload.

use std::io::Write;

use log::debug;
use xz2::stream::{Check, LzmaOptions, Stream};
use xz2::write::XzEncoder;

use crate::header::{HifHeader, HEADER_LEN};
use crate::{HifError, Result, BYTES_PER_PIXEL};

/// Compression container written after the header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Container {
    /// `.xz` stream with a CRC64 check
    #[default]
    Xz,
    /// Legacy `.lzma` ("lzma_alone") stream
    Lzma,
}

/// Options for the HIF encoder.
#[derive(Clone, Debug)]
pub struct EncodeOptions {
    /// xz preset level (0-9). Higher = smaller payload, slower encode.
    pub preset: u32,

    /// Container format for the payload. Both are accepted by the decoder.
    pub container: Container,

    /// Reserved header bytes 0..6, written verbatim
    pub lead: [u8; 6],

    /// Reserved header bytes 8..10, written verbatim
    pub gap: [u8; 2],
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            preset: 6,
            container: Container::Xz,
            lead: [0; 6],
            gap: [0; 2],
        }
    }
}

/// Encode RGB image data into a complete HIF file.
///
/// # Arguments
/// * `rgb` - Raw RGB pixel data (3 bytes per pixel: R, G, B), row-major
/// * `width` - Image width in pixels (1-65535)
/// * `height` - Image height in pixels (1-65535)
/// * `opts` - Encoding options
///
/// # Example
/// ```ignore
/// use hif::{hif_encode, EncodeOptions};
///
/// let rgb = vec![255u8, 0, 0, 0, 255, 0]; // 2 pixels: red, green
/// let file = hif_encode(&rgb, 2, 1, &EncodeOptions::default())?;
/// std::fs::write("two.hif", file)?;
/// ```
#[must_use = "this returns the encoded HIF bytes"]
pub fn hif_encode(rgb: &[u8], width: usize, height: usize, opts: &EncodeOptions) -> Result<Vec<u8>> {
    let (w, h) = match (u16::try_from(width), u16::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
        _ => return Err(HifError::InvalidDimensions { width, height }),
    };
    let expected = width * height * BYTES_PER_PIXEL;
    if rgb.len() != expected {
        return Err(HifError::BufferSizeMismatch {
            expected,
            actual: rgb.len(),
        });
    }
    if opts.preset > 9 {
        return Err(HifError::Encode(format!(
            "preset {} out of range 0-9",
            opts.preset
        )));
    }

    let header = HifHeader {
        lead: opts.lead,
        width: w,
        gap: opts.gap,
        height: h,
    };
    let mut out = Vec::with_capacity(HEADER_LEN + expected / 2);
    out.extend_from_slice(&header.to_bytes());

    let stream = match opts.container {
        Container::Xz => Stream::new_easy_encoder(opts.preset, Check::Crc64),
        Container::Lzma => LzmaOptions::new_preset(opts.preset)
            .and_then(|lzma| Stream::new_lzma_encoder(&lzma)),
    }
    .map_err(|e| HifError::Encode(e.to_string()))?;

    let mut encoder = XzEncoder::new_stream(out, stream);
    encoder
        .write_all(rgb)
        .map_err(|e| HifError::Encode(e.to_string()))?;
    let out = encoder
        .finish()
        .map_err(|e| HifError::Encode(e.to_string()))?;

    debug!(
        "encoded {}x{} image: {} pixel bytes -> {} byte payload",
        width,
        height,
        expected,
        out.len() - HEADER_LEN
    );
    Ok(out)
}

/// Encode RGB with default options.
#[inline]
#[must_use = "this returns the encoded HIF bytes"]
pub fn hif_encode_default(rgb: &[u8], width: usize, height: usize) -> Result<Vec<u8>> {
    hif_encode(rgb, width, height, &EncodeOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_written_first() {
        let rgb = vec![0u8; 3 * 2 * 5];
        let opts = EncodeOptions {
            lead: *b"HIF\0\0\0",
            ..EncodeOptions::default()
        };
        let file = hif_encode(&rgb, 2, 5, &opts).unwrap();

        assert_eq!(&file[..6], b"HIF\0\0\0");
        assert_eq!(&file[6..8], &[0, 2]);
        assert_eq!(&file[10..12], &[0, 5]);
        // xz magic
        assert_eq!(&file[12..18], &[0xFD, b'7', b'z', b'X', b'Z', 0x00]);
    }

    #[test]
    fn test_rejects_bad_preset() {
        let opts = EncodeOptions {
            preset: 10,
            ..EncodeOptions::default()
        };
        assert!(matches!(
            hif_encode(&[0, 0, 0], 1, 1, &opts),
            Err(HifError::Encode(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_dimensions() {
        let result = hif_encode_default(&[], 70_000, 1);
        assert!(matches!(
            result,
            Err(HifError::InvalidDimensions { width: 70_000, .. })
        ));
    }
}
