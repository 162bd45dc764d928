use std::fmt::Write as _;

use log::{debug, info, log_enabled, warn, Level};
use thiserror::Error;
use xz2::stream::{Action, Status, Stream};

use crate::header::{HifHeader, HEADER_LEN};
use crate::{HifError, Result, BYTES_PER_PIXEL};

/// How many leading bytes of a buffer go into a debug hex dump.
pub const DUMP_LEN: usize = 255;

const SCRATCH_LEN: usize = 64 * 1024;

/// First output reservation; later ones double the buffer.
pub const INITIAL_OUTPUT: usize = 1 << 20;

/// Why the xz/lzma decoder gave up on a payload.
///
/// The `Display` text is the diagnostic shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecompressError {
    #[error("Memory allocation failed")]
    Memory,

    /// No xz or lzma magic bytes at the start of the payload
    #[error("The input is not in the .xz format")]
    Format,

    /// The stream asks for a filter this liblzma does not support
    #[error("Unsupported compression options")]
    Options,

    #[error("Compressed file is corrupt")]
    Corrupt,

    /// The stream stops before its end marker
    #[error("Compressed file is truncated or otherwise corrupt")]
    Truncated,

    #[error("Unknown error, possibly a bug")]
    Unknown,
}

impl From<xz2::stream::Error> for DecompressError {
    fn from(err: xz2::stream::Error) -> Self {
        use xz2::stream::Error;
        match err {
            Error::Mem | Error::MemLimit => DecompressError::Memory,
            Error::Format => DecompressError::Format,
            Error::Options => DecompressError::Options,
            Error::Data => DecompressError::Corrupt,
            _ => DecompressError::Unknown,
        }
    }
}

/// A decoded HIF image.
#[derive(Debug, Clone)]
pub struct HifImage {
    /// Header the image was read from, reserved bytes included
    pub header: HifHeader,
    /// RGB pixel data, row-major, `width * height * 3` bytes
    pub pixels: Vec<u8>,
}

impl HifImage {
    #[inline]
    pub fn width(&self) -> usize {
        self.header.width as usize
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.header.height as usize
    }

    /// Returns the `[R, G, B]` triple at column `x`, row `y`.
    ///
    /// Panics if the coordinate lies outside the image.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        assert!(x < self.width() && y < self.height(), "pixel ({x}, {y}) out of bounds");
        let i = (y * self.width() + x) * BYTES_PER_PIXEL;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }
}

/// Decodes a complete HIF file held in memory.
///
/// # Errors
///
/// - [`HifError::TruncatedHeader`] if `data` is shorter than 12 bytes
/// - [`HifError::InvalidDimensions`] if width or height is zero
/// - [`HifError::EmptyPayload`] if nothing follows the header
/// - [`HifError::Decompress`] if the payload is not a valid xz/lzma stream
/// - [`HifError::SizeMismatch`] if the stream inflates to anything other
///   than `width * height * 3` bytes
///
/// # Example
///
/// ```ignore
/// let image = hif::hif_decode(&std::fs::read("picture.hif")?)?;
/// let [r, g, b] = image.pixel(0, 0);
/// ```
pub fn hif_decode(data: &[u8]) -> Result<HifImage> {
    if log_enabled!(Level::Debug) {
        debug!("file head: {}", hex_dump(data, DUMP_LEN));
    }

    let header = HifHeader::parse(data)?;
    let payload = &data[HEADER_LEN..];
    info!(
        "{}x{} image, {} byte payload",
        header.width,
        header.height,
        payload.len()
    );
    header.validate()?;

    if log_enabled!(Level::Debug) {
        debug!("payload head: {}", hex_dump(payload, DUMP_LEN));
    }

    let pixels = decompress_payload(payload, header.pixel_bytes())?;
    Ok(HifImage { header, pixels })
}

/// Inflates an xz or lzma `payload` that must hold exactly `expected` bytes.
///
/// The container is detected from its magic bytes. The output buffer grows
/// only as the stream fills it, doubling from [`INITIAL_OUTPUT`] and never
/// asking for more than `expected`, so a header that overstates the image
/// size is reported as a size mismatch rather than a failed allocation.
pub fn decompress_payload(payload: &[u8], expected: usize) -> Result<Vec<u8>> {
    if payload.is_empty() {
        return Err(HifError::EmptyPayload);
    }

    let mut stream = Stream::new_auto_decoder(u64::MAX, 0).map_err(DecompressError::from)?;

    let mut pixels: Vec<u8> = Vec::new();
    let mut input = payload;
    loop {
        if pixels.len() == pixels.capacity() && pixels.len() < expected {
            let grow = (expected - pixels.len()).min(pixels.len().max(INITIAL_OUTPUT));
            pixels
                .try_reserve_exact(grow)
                .map_err(|_| DecompressError::Memory)?;
        }

        let (in_before, out_before) = (stream.total_in(), stream.total_out());
        let status = stream
            .process_vec(input, &mut pixels, Action::Finish)
            .map_err(DecompressError::from)?;
        let consumed = (stream.total_in() - in_before) as usize;
        let written = (stream.total_out() - out_before) as usize;
        input = &input[consumed..];

        match status {
            Status::StreamEnd => {
                debug!(
                    "stream ended: consumed {} of {} bytes, produced {}",
                    stream.total_in(),
                    payload.len(),
                    pixels.len()
                );
                if pixels.len() != expected {
                    return Err(HifError::SizeMismatch {
                        expected,
                        actual: pixels.len(),
                    });
                }
                if !input.is_empty() {
                    warn!(
                        "ignoring {} bytes after the end of the compressed stream",
                        input.len()
                    );
                }
                return Ok(pixels);
            }
            _ if pixels.len() >= expected => {
                // The declared size is exhausted but the stream goes on.
                let rest = count_remaining(&mut stream, input)?;
                return Err(HifError::SizeMismatch {
                    expected,
                    actual: pixels.len() + rest,
                });
            }
            _ if consumed == 0 && written == 0 => {
                debug!(
                    "decoder stalled with status {:?} after {} of {} bytes",
                    status,
                    stream.total_in(),
                    payload.len()
                );
                return Err(DecompressError::Truncated.into());
            }
            _ => {}
        }
    }
}

/// Drains the rest of `stream` through a scratch buffer, returning how many
/// bytes it still produces.
fn count_remaining(stream: &mut Stream, mut input: &[u8]) -> Result<usize> {
    let mut scratch = vec![0u8; SCRATCH_LEN];
    let mut produced = 0usize;
    loop {
        let (in_before, out_before) = (stream.total_in(), stream.total_out());
        let status = stream
            .process(input, &mut scratch, Action::Finish)
            .map_err(DecompressError::from)?;
        let consumed = (stream.total_in() - in_before) as usize;
        let written = (stream.total_out() - out_before) as usize;
        input = &input[consumed..];
        produced += written;

        match status {
            Status::StreamEnd => return Ok(produced),
            _ if consumed == 0 && written == 0 => return Err(DecompressError::Truncated.into()),
            _ => {}
        }
    }
}

/// Formats up to `limit` leading bytes of `data` as space-separated hex.
pub fn hex_dump(data: &[u8], limit: usize) -> String {
    let mut out = String::with_capacity(limit.min(data.len()) * 3);
    for (i, byte) in data.iter().take(limit).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{byte:x}");
    }
    out
}
