//! Descriptor records and their construction

use bmsdf_render::{FieldType, GlyphMetrics};
use bmsdf_shape::{FontMetrics, OutlineSource};
use serde::Serialize;

/// Complete BMFont descriptor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontDescriptor {
    /// Page image file names, in page order
    pub pages: Vec<String>,
    pub chars: Vec<CharEntry>,
    pub info: InfoBlock,
    pub common: CommonBlock,
    #[serde(rename = "distanceField")]
    pub distance_field: DistanceFieldBlock,
    pub kernings: Vec<KerningPair>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoBlock {
    pub face: String,
    pub size: f32,
    pub bold: u8,
    pub italic: u8,
    pub charset: Vec<String>,
    pub unicode: u8,
    #[serde(rename = "stretchH")]
    pub stretch_h: u32,
    pub smooth: u8,
    pub aa: u8,
    pub padding: [u32; 4],
    pub spacing: [u32; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonBlock {
    pub line_height: f32,
    pub base: f32,
    #[serde(rename = "scaleW")]
    pub scale_w: u32,
    #[serde(rename = "scaleH")]
    pub scale_h: u32,
    pub pages: u32,
    pub packed: u8,
    pub alpha_chnl: u8,
    pub red_chnl: u8,
    pub green_chnl: u8,
    pub blue_chnl: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceFieldBlock {
    pub field_type: FieldType,
    pub distance_range: u32,
}

/// One `char` record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharEntry {
    pub id: u32,
    pub index: u16,
    #[serde(rename = "char")]
    pub character: String,
    pub width: u32,
    pub height: u32,
    pub xoffset: f32,
    pub yoffset: f32,
    pub xadvance: f32,
    pub chnl: u8,
    pub x: u32,
    pub y: u32,
    pub page: u32,
}

impl From<&GlyphMetrics> for CharEntry {
    fn from(m: &GlyphMetrics) -> Self {
        Self {
            id: m.id,
            index: m.index,
            character: m.character.to_string(),
            width: m.width,
            height: m.height,
            xoffset: m.xoffset,
            yoffset: m.yoffset,
            xadvance: m.xadvance,
            chnl: m.chnl,
            x: m.x,
            y: m.y,
            // Blank glyphs sit on page 0 with zero size
            page: m.page.unwrap_or(0),
        }
    }
}

/// Scaled kerning between two character codes
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KerningPair {
    pub first: u32,
    pub second: u32,
    pub amount: f32,
}

/// Inputs of the descriptor that do not come from the glyphs
#[derive(Debug, Clone)]
pub struct DescriptorSettings {
    pub face: String,
    pub font_size: f32,
    pub charset: Vec<char>,
    pub texture_padding: u32,
    pub field_type: FieldType,
    pub distance_range: u32,
    pub page_width: u32,
    pub page_height: u32,
    pub page_files: Vec<String>,
}

/// Line height and base in pixels
pub fn line_metrics(metrics: &FontMetrics, font_size: f32, distance_range: u32) -> (f32, f32) {
    let scale = metrics.scale(font_size);
    let line_height = metrics.line_height() as f32 * scale;
    let base = metrics.ascender as f32 * scale + distance_range as f32;
    (line_height, base)
}

/// Every ordered pair of the charset (self pairs included) with non-zero kerning
pub fn kerning_pairs<S: OutlineSource + ?Sized>(source: &S, charset: &[char], scale: f32) -> Vec<KerningPair> {
    let mut pairs = Vec::new();
    for &first in charset {
        for &second in charset {
            let amount = source.kerning(first, second);
            if amount != 0 {
                pairs.push(KerningPair {
                    first: first as u32,
                    second: second as u32,
                    amount: amount as f32 * scale,
                });
            }
        }
    }
    tracing::debug!("Found {} kerning pairs in {} characters", pairs.len(), charset.len());
    pairs
}

/// Assemble the descriptor. `glyphs` are in packing order.
pub fn build_descriptor<S: OutlineSource + ?Sized>(
    source: &S,
    glyphs: &[GlyphMetrics],
    settings: &DescriptorSettings,
) -> FontDescriptor {
    let metrics = source.metrics();
    let scale = metrics.scale(settings.font_size);
    let (line_height, base) = line_metrics(&metrics, settings.font_size, settings.distance_range);

    FontDescriptor {
        pages: settings.page_files.clone(),
        chars: glyphs.iter().map(CharEntry::from).collect(),
        info: InfoBlock {
            face: settings.face.clone(),
            size: settings.font_size,
            bold: 0,
            italic: 0,
            charset: settings.charset.iter().map(|c| c.to_string()).collect(),
            unicode: 1,
            stretch_h: 100,
            smooth: 1,
            aa: 1,
            padding: [0; 4],
            spacing: [settings.texture_padding; 2],
        },
        common: CommonBlock {
            line_height,
            base,
            scale_w: settings.page_width,
            scale_h: settings.page_height,
            pages: settings.page_files.len() as u32,
            packed: 0,
            alpha_chnl: 0,
            red_chnl: 0,
            green_chnl: 0,
            blue_chnl: 0,
        },
        distance_field: DistanceFieldBlock {
            field_type: settings.field_type,
            distance_range: settings.distance_range,
        },
        kernings: kerning_pairs(source, &settings.charset, scale),
    }
}
