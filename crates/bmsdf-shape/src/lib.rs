//! bmsdf Shape - Glyph outlines to shape descriptions
//!
//! This crate covers the front of the atlas pipeline:
//! - Font access behind the `OutlineSource` capability (ttf-parser backed)
//! - Outline command capture
//! - Contour splitting and bounding boxes
//! - The textual shape description consumed by the SDF renderer

pub mod outline;
pub mod shape;
pub mod source;

pub use outline::{GlyphOutline, OutlineCommand};
pub use shape::{BoundingBox, Contour, Point, Segment, ShapeBuilder, ShapeDescription, describe};
pub use source::{FontMetrics, OutlineSource, TtfFont};

/// Shape and font access errors
#[derive(Debug, thiserror::Error)]
pub enum ShapeError {
    #[error("Failed to parse font: {0}")]
    FontParsing(String),

    #[error("Font has invalid metrics: {0}")]
    InvalidMetrics(String),
}

pub type Result<T> = std::result::Result<T, ShapeError>;

/// Round `value` to `decimals` places after the point.
pub fn round_to(value: f32, decimals: u32) -> f32 {
    let factor = 10f64.powi(decimals as i32);
    ((value as f64 * factor).round() / factor) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(-1.235, 0), -1.0);
        assert_eq!(round_to(7.5, 0), 8.0);
    }
}
