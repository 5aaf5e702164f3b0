//! Atlas pipeline
//!
//! Outline -> render -> pack -> composite -> describe. Every stage runs to
//! completion before the next starts, and the first error ends the run
//! with nothing emitted.

use std::path::{Path, PathBuf};

use bmsdf_canvas::{PageImage, PageLayout, composite_pages};
use bmsdf_descriptor::{DescriptorSettings, build_descriptor, render};
use bmsdf_pack::AtlasPacker;
use bmsdf_render::{
    GlyphRenderRequest, MsdfgenProcess, RenderSettings, SdfRenderer, locate_renderer, render_glyphs,
};
use bmsdf_shape::{OutlineSource, ShapeBuilder, TtfFont};

use crate::{AtlasError, Config, Result};

/// Serialized descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorFile {
    pub filename: String,
    pub text: String,
}

/// Everything one run produces
#[derive(Debug, Clone)]
pub struct AtlasOutput {
    /// Encoded pages, in page order
    pub pages: Vec<PageImage>,
    pub descriptor: DescriptorFile,
}

impl AtlasOutput {
    /// Write every page and the descriptor into `dir`, creating it if needed
    pub fn write_all(&self, dir: &Path) -> std::io::Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(self.pages.len() + 1);
        for page in &self.pages {
            let path = dir.join(&page.filename);
            std::fs::write(&path, &page.png)?;
            written.push(path);
        }

        let path = dir.join(&self.descriptor.filename);
        std::fs::write(&path, &self.descriptor.text)?;
        written.push(path);

        Ok(written)
    }
}

/// Build an atlas from a font source and a renderer
pub async fn generate<S, R>(font: &S, renderer: &R, config: &Config) -> Result<AtlasOutput>
where
    S: OutlineSource + ?Sized,
    R: SdfRenderer,
{
    config.validate()?;

    let metrics = font.metrics();
    let scale = metrics.scale(config.font_size);
    let face = font.family_name();
    let base_name = base_name(config.filename.as_deref(), &face);
    let charset = config.charset.chars();

    tracing::info!(
        "Generating {} atlas for {:?}: {} characters at {}px",
        config.field_type,
        face,
        charset.len(),
        config.font_size
    );

    // Outlines
    let builder = ShapeBuilder::new(scale).with_round_decimal(config.round_decimal);
    let requests: Vec<GlyphRenderRequest> = charset
        .iter()
        .map(|&character| {
            let outline = font.glyph(character);
            GlyphRenderRequest {
                character,
                glyph_index: outline.glyph_index,
                shape: builder.build(&outline.commands),
                advance: outline.advance,
            }
        })
        .collect();

    // Render
    let settings = RenderSettings {
        field_type: config.field_type,
        distance_range: config.distance_range,
        scale,
        baseline: metrics.ascender as f32 * scale,
        concurrency: config.concurrency,
        round_decimal: config.round_decimal,
    };
    let mut glyphs = render_glyphs(renderer, &requests, &settings).await?;

    // Pack, in charset order
    let sizes: Vec<(u32, u32)> = glyphs.iter().map(|g| (g.bitmap.width, g.bitmap.height)).collect();
    let packed = AtlasPacker::pack_all(config.packer_config(), &sizes)?;
    for (glyph, placement) in glyphs.iter_mut().zip(&packed.placements) {
        if let Some(rect) = placement {
            glyph.metrics.page = Some(rect.page);
            glyph.metrics.x = rect.x;
            glyph.metrics.y = rect.y;
        }
    }

    // Blank glyphs still point at page 0
    let page_count = packed.page_count.max(1);
    let layout = PageLayout {
        count: page_count,
        width: packed.page_width,
        height: packed.page_height,
        field_type: config.field_type,
    };
    let pages = composite_pages(&glyphs, &layout, &base_name)?;

    // Describe
    let descriptor_settings = DescriptorSettings {
        face,
        font_size: config.font_size,
        charset: charset.to_vec(),
        texture_padding: config.texture_padding,
        field_type: config.field_type,
        distance_range: config.distance_range,
        page_width: packed.page_width,
        page_height: packed.page_height,
        page_files: pages.iter().map(|p| p.filename.clone()).collect(),
    };
    let metrics_list: Vec<_> = glyphs.iter().map(|g| g.metrics.clone()).collect();
    let descriptor = build_descriptor(font, &metrics_list, &descriptor_settings);
    let text = render(&descriptor, config.output_type, config.round_decimal)?;

    tracing::info!(
        "Atlas {:?} done: {} page(s), {} chars, {} kerning pairs",
        base_name,
        pages.len(),
        descriptor.chars.len(),
        descriptor.kernings.len()
    );

    Ok(AtlasOutput {
        pages,
        descriptor: DescriptorFile {
            filename: format!("{}.{}", base_name, config.output_type.extension()),
            text,
        },
    })
}

/// Blocking wrapper around [`generate`]
pub fn generate_blocking<S, R>(font: &S, renderer: &R, config: &Config) -> Result<AtlasOutput>
where
    S: OutlineSource + ?Sized,
    R: SdfRenderer,
{
    smol::block_on(generate(font, renderer, config))
}

/// Load a font file and build its atlas with the msdfgen process
pub fn generate_from_file(path: impl AsRef<Path>, config: &Config) -> Result<AtlasOutput> {
    let path = path.as_ref();
    config.validate()?;

    let data = std::fs::read(path).map_err(|source| AtlasError::FontRead {
        path: path.to_path_buf(),
        source,
    })?;
    let font = TtfFont::parse(&data, 0)?;

    let binary = locate_renderer(config.renderer_path.as_deref())?;
    tracing::debug!("Using renderer {}", binary.display());
    let renderer = MsdfgenProcess::new(binary).with_timeout(config.render_timeout());

    let mut config = config.clone();
    if config.filename.is_none() {
        config.filename = path.file_stem().map(|s| s.to_string_lossy().into_owned());
    }

    generate_blocking(&font, &renderer, &config)
}

/// Output file base name
fn base_name(filename: Option<&str>, face: &str) -> String {
    if let Some(name) = filename {
        return name.to_string();
    }

    let sanitized: String = face
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect();
    if sanitized.is_empty() { "font".to_string() } else { sanitized }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name() {
        assert_eq!(base_name(Some("atlas"), "Demo Sans"), "atlas");
        assert_eq!(base_name(None, "Demo Sans"), "Demo-Sans");
        assert_eq!(base_name(None, "  "), "font");
    }

    #[test]
    fn test_missing_font_file() {
        let err = generate_from_file("/nonexistent/font.ttf", &Config::default()).unwrap_err();
        assert!(matches!(err, AtlasError::FontRead { .. }));
    }

    #[test]
    fn test_invalid_config_checked_first() {
        let config = Config { distance_range: 0, ..Config::default() };
        let err = generate_from_file("/nonexistent/font.ttf", &config).unwrap_err();
        assert!(matches!(err, AtlasError::Config(_)));
    }
}
