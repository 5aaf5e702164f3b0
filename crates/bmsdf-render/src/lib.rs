//! bmsdf Render - Glyph render coordination
//!
//! Turns shape descriptions into decoded glyph bitmaps and metrics:
//! - Pixel placement (padding, translation, size) from the bounding box
//! - External SDF renderer invocation (msdfgen) with bounded concurrency
//! - Decoding of the renderer's hex output into RGBA pixels
//! - Per-glyph metrics for the font descriptor

mod coordinator;
mod decode;
mod field;
mod invocation;
mod renderer;

pub use coordinator::{
    CHANNEL_MASK_ALL, DEFAULT_CONCURRENCY, GlyphMetrics, GlyphRenderRequest, Placement,
    RenderSettings, RenderedGlyph, placement, render_glyphs,
};
pub use decode::{DecodeError, GlyphBitmap, decode_bitmap, parse_samples};
pub use field::FieldType;
pub use invocation::RenderInvocation;
pub use renderer::{MsdfgenProcess, RENDERER_ENV, SdfRenderer, locate_renderer};

use std::time::Duration;

/// Rendering error types
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("No msdfgen renderer found: {0}")]
    RendererNotFound(String),

    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Renderer exited with {status}: {stderr} (`{command}`)")]
    Process {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Renderer timed out after {after:?} (`{command}`)")]
    Timeout { command: String, after: Duration },

    #[error("Failed to decode glyph {character:?}: {source} (`{command}`)")]
    Decode {
        character: char,
        command: String,
        #[source]
        source: DecodeError,
    },

    #[error("Render batch cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, RenderError>;
