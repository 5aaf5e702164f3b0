//! bmsdf Engine
//!
//! Builds signed distance field bitmap font atlases: every character of a
//! charset is outlined, rendered by an external SDF renderer, packed onto
//! texture pages and described in a BMFont descriptor.
//!
//! # Example
//! ```rust,ignore
//! use bmsdf_engine::{Config, generate_from_file};
//!
//! let output = generate_from_file("Roboto-Regular.ttf", &Config::default())?;
//! output.write_all("out".as_ref())?;
//! ```

mod config;
mod pipeline;

pub use config::{Charset, Config, DEFAULT_CHARSET};
pub use pipeline::{AtlasOutput, DescriptorFile, generate, generate_blocking, generate_from_file};

// Re-export stages for callers that plug in their own font source or renderer
pub use bmsdf_canvas as canvas;
pub use bmsdf_descriptor as descriptor;
pub use bmsdf_pack as pack;
pub use bmsdf_render as render;
pub use bmsdf_shape as shape;

pub use bmsdf_canvas::PageImage;
pub use bmsdf_descriptor::OutputType;
pub use bmsdf_render::{FieldType, MsdfgenProcess, SdfRenderer};
pub use bmsdf_shape::{OutlineSource, TtfFont};

use std::path::PathBuf;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Atlas generation error
#[derive(Debug, thiserror::Error)]
pub enum AtlasError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to read font {path}: {source}")]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Shape(#[from] bmsdf_shape::ShapeError),

    #[error(transparent)]
    Render(#[from] bmsdf_render::RenderError),

    #[error(transparent)]
    Pack(#[from] bmsdf_pack::PackError),

    #[error(transparent)]
    Canvas(#[from] bmsdf_canvas::CanvasError),

    #[error(transparent)]
    Descriptor(#[from] bmsdf_descriptor::DescriptorError),
}

pub type Result<T> = std::result::Result<T, AtlasError>;
