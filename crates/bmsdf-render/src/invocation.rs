//! One external renderer call

use std::fmt;

use crate::FieldType;

/// Everything the renderer needs to rasterize one glyph
#[derive(Debug, Clone, PartialEq)]
pub struct RenderInvocation {
    pub field_type: FieldType,
    /// Output bitmap width in pixels
    pub width: u32,
    /// Output bitmap height in pixels
    pub height: u32,
    pub translate_x: f32,
    pub translate_y: f32,
    /// Distance range in pixels
    pub distance_range: u32,
    /// Shape in the renderer's `-defineshape` grammar
    pub shape: String,
}

impl RenderInvocation {
    /// Command line arguments, without the program name
    pub fn args(&self) -> Vec<String> {
        vec![
            self.field_type.as_str().to_string(),
            "-format".into(),
            "text".into(),
            "-stdout".into(),
            "-size".into(),
            self.width.to_string(),
            self.height.to_string(),
            "-translate".into(),
            self.translate_x.to_string(),
            self.translate_y.to_string(),
            "-pxrange".into(),
            self.distance_range.to_string(),
            "-defineshape".into(),
            self.shape.clone(),
        ]
    }
}

impl fmt::Display for RenderInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "msdfgen {} -format text -stdout -size {} {} -translate {} {} -pxrange {} -defineshape \"{}\"",
            self.field_type,
            self.width,
            self.height,
            self.translate_x,
            self.translate_y,
            self.distance_range,
            self.shape
        )
    }
}
