//! bmsdf Canvas - Page compositing
//!
//! Blits packed glyph bitmaps into page sized RGBA buffers and encodes
//! each page as PNG.

mod canvas;
mod compositor;

pub use canvas::PageCanvas;
pub use compositor::{PageImage, PageLayout, composite_pages, page_filename};

/// Color (RGBA)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Canvas error types
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    #[error("Invalid canvas size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("Bitmap {width}x{height} at ({x}, {y}) exceeds {page_width}x{page_height} page")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        page_width: u32,
        page_height: u32,
    },

    #[error("Bitmap has {actual} bytes, expected {expected}")]
    BadBitmap { expected: usize, actual: usize },

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, CanvasError>;
