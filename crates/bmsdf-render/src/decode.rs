//! Renderer output decoding
//!
//! msdfgen's text format is one hex byte per channel sample, whitespace
//! separated, channels interleaved per pixel.

use crate::FieldType;

/// Decoding failures for a single glyph
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid sample token `{0}`")]
    InvalidToken(String),

    #[error("{samples} samples do not divide into {pixels} pixels")]
    ChannelMismatch { samples: usize, pixels: usize },

    #[error("no samples for {pixels} pixels")]
    Empty { pixels: usize },

    #[error("{channels} channel(s) per pixel, expected at least {expected}")]
    MissingChannels { channels: usize, expected: usize },
}

/// Decoded glyph image
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlyphBitmap {
    pub width: u32,
    pub height: u32,
    /// RGBA pixels, row major. Empty for blank glyphs.
    pub pixels: Vec<u8>,
}

impl GlyphBitmap {
    /// Zero-size bitmap for glyphs with nothing to draw
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.is_empty()
    }
}

/// Parse the hex sample stream
pub fn parse_samples(text: &str) -> Result<Vec<u8>, DecodeError> {
    text.split_whitespace()
        .map(|token| {
            let digits = token
                .strip_prefix("0x")
                .or_else(|| token.strip_prefix("0X"))
                .unwrap_or(token);
            u8::from_str_radix(digits, 16).map_err(|_| DecodeError::InvalidToken(token.to_string()))
        })
        .collect()
}

/// Decode renderer output into an RGBA bitmap of `width` x `height`.
///
/// A zero-sized grid, or well-formed output that is all zero, yields a
/// blank bitmap. Output that does not fill the grid is an error.
pub fn decode_bitmap(
    text: &str,
    width: u32,
    height: u32,
    field_type: FieldType,
) -> Result<GlyphBitmap, DecodeError> {
    let samples = parse_samples(text)?;
    let pixels = width as usize * height as usize;

    if pixels == 0 {
        return Ok(GlyphBitmap::blank());
    }
    if samples.is_empty() {
        return Err(DecodeError::Empty { pixels });
    }
    if samples.len() % pixels != 0 {
        return Err(DecodeError::ChannelMismatch {
            samples: samples.len(),
            pixels,
        });
    }
    if samples.iter().all(|&s| s == 0) {
        return Ok(GlyphBitmap::blank());
    }

    let channels = samples.len() / pixels;
    let mut rgba = Vec::with_capacity(pixels * 4);

    if field_type.is_multichannel() {
        if channels < 3 {
            return Err(DecodeError::MissingChannels { channels, expected: 3 });
        }
        for px in samples.chunks_exact(channels) {
            rgba.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
    } else {
        // Coverage doubles as alpha
        for px in samples.chunks_exact(channels) {
            rgba.extend_from_slice(&[px[0], px[0], px[0], px[0]]);
        }
    }

    Ok(GlyphBitmap {
        width,
        height,
        pixels: rgba,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_samples() {
        assert_eq!(parse_samples("00 ff 7F\n0x10"), Ok(vec![0, 255, 127, 16]));
        assert!(matches!(parse_samples("00 zz"), Err(DecodeError::InvalidToken(t)) if t == "zz"));
        assert_eq!(parse_samples(""), Ok(vec![]));
    }

    #[test]
    fn test_decode_msdf() {
        let bitmap = decode_bitmap("10 20 30 40 50 60", 2, 1, FieldType::Msdf).unwrap();
        assert_eq!(bitmap.pixels, vec![0x10, 0x20, 0x30, 255, 0x40, 0x50, 0x60, 255]);
    }

    #[test]
    fn test_decode_single_channel() {
        let bitmap = decode_bitmap("80 00", 1, 2, FieldType::Sdf).unwrap();
        assert_eq!(bitmap.pixels, vec![0x80, 0x80, 0x80, 0x80, 0, 0, 0, 0]);
        assert_eq!((bitmap.width, bitmap.height), (1, 2));
    }

    #[test]
    fn test_single_channel_ignores_extra_channels() {
        let bitmap = decode_bitmap("80 81 82 00 00 00", 2, 1, FieldType::Psdf).unwrap();
        assert_eq!(&bitmap.pixels[..4], &[0x80, 0x80, 0x80, 0x80]);
    }

    #[test]
    fn test_all_zero_is_blank() {
        let bitmap = decode_bitmap("00 00 00 00", 2, 2, FieldType::Sdf).unwrap();
        assert!(bitmap.is_blank());
        assert_eq!((bitmap.width, bitmap.height), (0, 0));
    }

    #[test]
    fn test_all_zero_must_still_fill_grid() {
        let err = decode_bitmap("00 00 00", 2, 1, FieldType::Sdf).unwrap_err();
        assert_eq!(err, DecodeError::ChannelMismatch { samples: 3, pixels: 2 });
    }

    #[test]
    fn test_empty_output_is_error() {
        let err = decode_bitmap("", 4, 4, FieldType::Msdf).unwrap_err();
        assert_eq!(err, DecodeError::Empty { pixels: 16 });
        assert!(decode_bitmap(" \n ", 1, 1, FieldType::Sdf).is_err());
    }

    #[test]
    fn test_zero_size_is_blank() {
        assert!(decode_bitmap("ff", 0, 4, FieldType::Msdf).unwrap().is_blank());
    }

    #[test]
    fn test_channel_mismatch() {
        let err = decode_bitmap("01 02 03 04 05", 2, 1, FieldType::Sdf).unwrap_err();
        assert_eq!(err, DecodeError::ChannelMismatch { samples: 5, pixels: 2 });
    }

    #[test]
    fn test_msdf_needs_three_channels() {
        let err = decode_bitmap("01 02", 2, 1, FieldType::Msdf).unwrap_err();
        assert_eq!(err, DecodeError::MissingChannels { channels: 1, expected: 3 });
    }
}
