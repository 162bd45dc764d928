use crate::{HifError, Result, BYTES_PER_PIXEL};

/// Size of the fixed HIF header in bytes.
pub const HEADER_LEN: usize = 12;

const WIDTH_OFFSET: usize = 6;
const HEIGHT_OFFSET: usize = 10;

/// The 12-byte HIF header.
///
/// Only width and height carry meaning for this reader. The remaining bytes
/// are kept as-is so a header can be written back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HifHeader {
    /// Bytes 0..6, reserved
    pub lead: [u8; 6],
    /// Image width in pixels (bytes 6..8, big-endian)
    pub width: u16,
    /// Bytes 8..10, reserved
    pub gap: [u8; 2],
    /// Image height in pixels (bytes 10..12, big-endian)
    pub height: u16,
}

impl HifHeader {
    /// Creates a header with zeroed reserved bytes.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Reads the header from the start of `data`.
    ///
    /// No validation beyond length is done here; see [`HifHeader::validate`].
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_LEN {
            return Err(HifError::TruncatedHeader { len: data.len() });
        }

        let mut lead = [0u8; 6];
        lead.copy_from_slice(&data[..WIDTH_OFFSET]);
        let mut gap = [0u8; 2];
        gap.copy_from_slice(&data[WIDTH_OFFSET + 2..HEIGHT_OFFSET]);

        Ok(Self {
            lead,
            width: u16::from_be_bytes([data[WIDTH_OFFSET], data[WIDTH_OFFSET + 1]]),
            gap,
            height: u16::from_be_bytes([data[HEIGHT_OFFSET], data[HEIGHT_OFFSET + 1]]),
        })
    }

    /// Serializes the header back into its 12-byte form.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[..WIDTH_OFFSET].copy_from_slice(&self.lead);
        out[WIDTH_OFFSET..WIDTH_OFFSET + 2].copy_from_slice(&self.width.to_be_bytes());
        out[WIDTH_OFFSET + 2..HEIGHT_OFFSET].copy_from_slice(&self.gap);
        out[HEIGHT_OFFSET..].copy_from_slice(&self.height.to_be_bytes());
        out
    }

    /// Rejects zero-sized images.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(HifError::InvalidDimensions {
                width: self.width as usize,
                height: self.height as usize,
            });
        }
        Ok(())
    }

    /// Number of bytes the payload must inflate to.
    #[inline]
    pub fn pixel_bytes(&self) -> usize {
        self.width as usize * self.height as usize * BYTES_PER_PIXEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_reads_big_endian_dimensions() {
        let data = [0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF, 0x01, 0x40, 0x11, 0x22, 0x00, 0xF0];
        let header = HifHeader::parse(&data).unwrap();

        assert_eq!(header.width, 0x01 * 256 + 0x40);
        assert_eq!(header.height, 0xF0);
        assert_eq!(header.lead, [0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
        assert_eq!(header.gap, [0x11, 0x22]);
    }

    #[test]
    fn test_reserved_bytes_survive_rewrite() {
        let data = [1, 2, 3, 4, 5, 6, 0x12, 0x34, 7, 8, 0x56, 0x78];
        let header = HifHeader::parse(&data).unwrap();
        assert_eq!(header.to_bytes(), data);
    }

    #[test]
    fn test_parse_short_input() {
        let result = HifHeader::parse(&[0u8; 11]);
        assert!(matches!(result, Err(HifError::TruncatedHeader { len: 11 })));
    }

    #[test]
    fn test_validate_rejects_zero_dimensions() {
        assert!(HifHeader::new(0, 5).validate().is_err());
        assert!(HifHeader::new(5, 0).validate().is_err());
        assert!(HifHeader::new(1, 1).validate().is_ok());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_pixel_bytes_does_not_overflow() {
        let header = HifHeader::new(u16::MAX, u16::MAX);
        assert_eq!(header.pixel_bytes(), 65535 * 65535 * 3);
    }
}
