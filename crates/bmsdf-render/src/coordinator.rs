//! Glyph render coordination
//!
//! Runs up to `concurrency` renderer invocations at once on a local
//! executor. Every task reports `(index, result)` through one channel; the
//! collector slots results by index, so output order is request order no
//! matter which render finishes first. The first failure returns early and
//! dropping the executor cancels whatever is still in flight.

use bmsdf_shape::{BoundingBox, ShapeDescription, round_to};
use smol::LocalExecutor;
use smol::lock::Semaphore;

use crate::{FieldType, GlyphBitmap, RenderError, RenderInvocation, Result, SdfRenderer, decode_bitmap};

/// Default cap on simultaneous renderer processes
pub const DEFAULT_CONCURRENCY: usize = 15;

/// Channel mask with all four channels in use
pub const CHANNEL_MASK_ALL: u8 = 15;

/// One character to render
#[derive(Debug, Clone)]
pub struct GlyphRenderRequest {
    pub character: char,
    pub glyph_index: u16,
    pub shape: ShapeDescription,
    /// Horizontal advance in font units
    pub advance: f32,
}

/// Settings shared by every glyph in a batch
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub field_type: FieldType,
    /// Distance range in pixels, also used as padding around the glyph
    pub distance_range: u32,
    /// Font units to pixels
    pub scale: f32,
    /// Ascender in pixels
    pub baseline: f32,
    pub concurrency: usize,
    pub round_decimal: Option<u32>,
}

/// Per-glyph metrics, as written to the descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphMetrics {
    /// Character code
    pub id: u32,
    /// Glyph index in the font
    pub index: u16,
    pub character: char,
    pub width: u32,
    pub height: u32,
    pub xoffset: f32,
    pub yoffset: f32,
    pub xadvance: f32,
    pub chnl: u8,
    /// Position on the page, set by packing
    pub x: u32,
    pub y: u32,
    /// Page index, None for glyphs that were not packed
    pub page: Option<u32>,
}

/// Decoded bitmap plus its metrics
#[derive(Debug, Clone)]
pub struct RenderedGlyph {
    pub bitmap: GlyphBitmap,
    pub metrics: GlyphMetrics,
}

/// Pixel size and translation of a glyph bitmap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub width: u32,
    pub height: u32,
    pub translate_x: f32,
    pub translate_y: f32,
}

/// Derive bitmap size and renderer translation from a bounding box
pub fn placement(bbox: &BoundingBox, pad: u32, round_decimal: Option<u32>) -> Placement {
    let pad_f = pad as f32;
    let mut translate_x = -bbox.left + pad_f;
    let mut translate_y = -bbox.bottom + pad_f;
    if let Some(d) = round_decimal {
        translate_x = round_to(translate_x, d);
        translate_y = round_to(translate_y, d);
    }

    Placement {
        width: bbox.width().round().max(0.0) as u32 + 2 * pad,
        height: bbox.height().round().max(0.0) as u32 + 2 * pad,
        translate_x,
        translate_y,
    }
}

/// Render every request, returning results in request order
pub async fn render_glyphs<R: SdfRenderer>(
    renderer: &R,
    requests: &[GlyphRenderRequest],
    settings: &RenderSettings,
) -> Result<Vec<RenderedGlyph>> {
    if requests.is_empty() {
        return Ok(Vec::new());
    }

    let limit = Semaphore::new(settings.concurrency.max(1));
    let (tx, rx) = smol::channel::unbounded();
    let executor = LocalExecutor::new();

    for (index, request) in requests.iter().enumerate() {
        let tx = tx.clone();
        let limit = &limit;
        executor
            .spawn(async move {
                let _permit = limit.acquire().await;
                let result = render_one(renderer, request, settings).await;
                let _ = tx.send((index, result)).await;
            })
            .detach();
    }
    drop(tx);

    tracing::info!(
        "Rendering {} glyphs, up to {} at a time",
        requests.len(),
        settings.concurrency.max(1)
    );

    executor
        .run(async {
            let mut slots: Vec<Option<RenderedGlyph>> = vec![None; requests.len()];
            for _ in 0..requests.len() {
                let (index, result) = rx.recv().await.map_err(|_| RenderError::Cancelled)?;
                slots[index] = Some(result?);
            }
            Ok(slots.into_iter().flatten().collect())
        })
        .await
}

async fn render_one<R: SdfRenderer>(
    renderer: &R,
    request: &GlyphRenderRequest,
    settings: &RenderSettings,
) -> Result<RenderedGlyph> {
    let pad = settings.distance_range;
    let bbox = request.shape.bbox;
    let place = placement(&bbox, pad, settings.round_decimal);

    let bitmap = if request.shape.is_empty() {
        tracing::debug!("Glyph {:?} has no contours, skipping renderer", request.character);
        GlyphBitmap::blank()
    } else {
        let invocation = RenderInvocation {
            field_type: settings.field_type,
            width: place.width,
            height: place.height,
            translate_x: place.translate_x,
            translate_y: place.translate_y,
            distance_range: settings.distance_range,
            shape: request.shape.description.clone(),
        };
        let output = renderer.render(&invocation).await?;
        decode_bitmap(&output, place.width, place.height, settings.field_type).map_err(|source| {
            RenderError::Decode {
                character: request.character,
                command: invocation.to_string(),
                source,
            }
        })?
    };

    if bitmap.is_blank() {
        tracing::debug!("Glyph {:?} is blank", request.character);
    }

    let pad_f = pad as f32;
    let metrics = GlyphMetrics {
        id: request.character as u32,
        index: request.glyph_index,
        character: request.character,
        width: bitmap.width,
        height: bitmap.height,
        xoffset: bbox.left - pad_f,
        yoffset: bbox.bottom - pad_f + settings.baseline,
        xadvance: request.advance * settings.scale,
        chnl: CHANNEL_MASK_ALL,
        x: 0,
        y: 0,
        page: None,
    };

    Ok(RenderedGlyph { bitmap, metrics })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement() {
        let bbox = BoundingBox { left: 1.2, bottom: -20.4, right: 11.0, top: 0.3 };
        let place = placement(&bbox, 3, None);
        // round(9.8) + 6, round(20.7) + 6
        assert_eq!(place.width, 16);
        assert_eq!(place.height, 27);
        assert!((place.translate_x - 1.8).abs() < 1e-5);
        assert!((place.translate_y - 23.4).abs() < 1e-5);
    }

    #[test]
    fn test_placement_rounded() {
        let bbox = BoundingBox { left: 0.123, bottom: -1.987, right: 4.0, top: 0.0 };
        let place = placement(&bbox, 2, Some(1));
        assert_eq!(place.translate_x, 1.9);
        assert_eq!(place.translate_y, 4.0);
    }

    #[test]
    fn test_placement_blank() {
        let place = placement(&BoundingBox::default(), 3, None);
        assert_eq!((place.width, place.height), (6, 6));
        assert_eq!((place.translate_x, place.translate_y), (3.0, 3.0));
    }
}
