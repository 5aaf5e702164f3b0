//! Page compositor

use bmsdf_render::{FieldType, RenderedGlyph};

use crate::{Color, PageCanvas, Result};

/// Page geometry shared by every page of an atlas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub count: u32,
    pub width: u32,
    pub height: u32,
    pub field_type: FieldType,
}

impl PageLayout {
    /// Multi-channel fields sit on opaque black, single channel on transparent
    pub fn background(&self) -> Color {
        if self.field_type.is_multichannel() {
            Color::BLACK
        } else {
            Color::TRANSPARENT
        }
    }
}

/// One encoded page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    pub filename: String,
    pub png: Vec<u8>,
}

/// `{base}.{index}.png`
pub fn page_filename(base_name: &str, index: u32) -> String {
    format!("{base_name}.{index}.png")
}

/// Composite every page in order. Glyphs without a page are skipped.
pub fn composite_pages(
    glyphs: &[RenderedGlyph],
    layout: &PageLayout,
    base_name: &str,
) -> Result<Vec<PageImage>> {
    let mut pages = Vec::with_capacity(layout.count as usize);
    if layout.count == 0 {
        return Ok(pages);
    }

    let mut canvas = PageCanvas::new(layout.width, layout.height)?;
    for index in 0..layout.count {
        canvas.reset(layout.background());

        let mut blitted = 0;
        for glyph in glyphs.iter().filter(|g| g.metrics.page == Some(index)) {
            canvas.blit(glyph.metrics.x, glyph.metrics.y, &glyph.bitmap)?;
            blitted += 1;
        }

        let filename = page_filename(base_name, index);
        tracing::debug!("Encoding {} with {} glyphs", filename, blitted);
        pages.push(PageImage {
            png: canvas.encode_png()?,
            filename,
        });
    }

    Ok(pages)
}
