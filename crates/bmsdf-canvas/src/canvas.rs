//! Canvas - page pixel buffer

use bmsdf_render::GlyphBitmap;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;

use crate::{CanvasError, Color, Result};

/// RGBA8 page buffer, reused from page to page
#[derive(Debug, Clone)]
pub struct PageCanvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PageCanvas {
    /// Create a new transparent canvas
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CanvasError::InvalidSize { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Fill the whole canvas with one color
    pub fn reset(&mut self, color: Color) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }

    /// Copy a bitmap verbatim at (x, y). No blending.
    pub fn blit(&mut self, x: u32, y: u32, bitmap: &GlyphBitmap) -> Result<()> {
        if bitmap.is_blank() {
            return Ok(());
        }
        if x + bitmap.width > self.width || y + bitmap.height > self.height {
            return Err(CanvasError::OutOfBounds {
                x,
                y,
                width: bitmap.width,
                height: bitmap.height,
                page_width: self.width,
                page_height: self.height,
            });
        }

        let row_bytes = bitmap.width as usize * 4;
        let expected = row_bytes * bitmap.height as usize;
        if bitmap.pixels.len() != expected {
            return Err(CanvasError::BadBitmap {
                expected,
                actual: bitmap.pixels.len(),
            });
        }

        let stride = self.width as usize * 4;
        for (row, src) in bitmap.pixels.chunks_exact(row_bytes).enumerate() {
            let start = (y as usize + row) * stride + x as usize * 4;
            self.pixels[start..start + row_bytes].copy_from_slice(src);
        }
        Ok(())
    }

    /// Pixel at (x, y)
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let p = &self.pixels[i..i + 4];
        Some(Color::rgba(p[0], p[1], p[2], p[3]))
    }

    /// Raw bytes (RGBA)
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Encode the canvas as PNG
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        PngEncoder::new(&mut out).write_image(
            &self.pixels,
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
        )?;
        Ok(out)
    }
}
