//! Atlas Configuration

use std::path::PathBuf;
use std::time::Duration;

use bmsdf_descriptor::OutputType;
use bmsdf_pack::PackerConfig;
use bmsdf_render::{DEFAULT_CONCURRENCY, FieldType};
use serde::Deserialize;

use crate::{AtlasError, Result};

/// Printable ASCII, 32 through 126
pub const DEFAULT_CHARSET: &str = " !\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~";

/// Ordered set of characters to render
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "CharsetRepr")]
pub struct Charset(Vec<char>);

#[derive(Deserialize)]
#[serde(untagged)]
enum CharsetRepr {
    Text(String),
    List(Vec<String>),
}

impl From<CharsetRepr> for Charset {
    fn from(repr: CharsetRepr) -> Self {
        match repr {
            CharsetRepr::Text(text) => Charset::from_text(&text),
            CharsetRepr::List(items) => Charset::from_chars(items.iter().flat_map(|s| s.chars())),
        }
    }
}

impl Charset {
    /// Characters in order, duplicates dropped after their first occurrence
    pub fn from_chars(chars: impl IntoIterator<Item = char>) -> Self {
        let mut out: Vec<char> = Vec::new();
        for c in chars {
            if !out.contains(&c) {
                out.push(c);
            }
        }
        Self(out)
    }

    pub fn from_text(text: &str) -> Self {
        Self::from_chars(text.chars())
    }

    pub fn chars(&self) -> &[char] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self::from_text(DEFAULT_CHARSET)
    }
}

/// Atlas generation options
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Descriptor flavour
    pub output_type: OutputType,

    /// Base name of every output file
    pub filename: Option<String>,

    /// Font size in pixels
    pub font_size: f32,

    pub charset: Charset,

    /// Page size
    pub texture_width: u32,
    pub texture_height: u32,

    /// Gap between glyphs on a page
    pub texture_padding: u32,

    /// Free margin along page edges
    pub border: u32,

    /// Distance range in pixels
    pub distance_range: u32,

    pub field_type: FieldType,

    /// Decimal places kept in shape coordinates and descriptor numbers
    pub round_decimal: Option<u32>,

    /// Shrink pages to the used area
    pub smart_size: bool,

    /// Power of two page sizes
    pub pot: bool,

    /// Square pages
    pub square: bool,

    /// msdfgen binary, looked up on PATH when unset
    pub renderer_path: Option<PathBuf>,

    /// Maximum simultaneous renderer processes
    pub concurrency: usize,

    /// Per-glyph renderer timeout
    pub render_timeout_ms: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_type: OutputType::Xml,
            filename: None,
            font_size: 42.0,
            charset: Charset::default(),
            texture_width: 512,
            texture_height: 512,
            texture_padding: 2,
            border: 0,
            distance_range: 3,
            field_type: FieldType::Msdf,
            round_decimal: None,
            smart_size: false,
            pot: false,
            square: false,
            renderer_path: None,
            concurrency: DEFAULT_CONCURRENCY,
            render_timeout_ms: None,
        }
    }
}

impl Config {
    /// Parse a JSON config; missing keys keep their defaults
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| AtlasError::Config(e.to_string()))
    }

    /// Reject settings that cannot produce an atlas
    pub fn validate(&self) -> Result<()> {
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(AtlasError::Config(format!("font size must be positive, got {}", self.font_size)));
        }
        if self.texture_width == 0 || self.texture_height == 0 {
            return Err(AtlasError::Config(format!(
                "texture size must be positive, got {}x{}",
                self.texture_width, self.texture_height
            )));
        }
        let border = self.border.saturating_mul(2);
        if self.texture_width <= border || self.texture_height <= border {
            return Err(AtlasError::Config(format!("border {} leaves no room on the page", self.border)));
        }
        if self.distance_range == 0 {
            return Err(AtlasError::Config("distance range must be positive".into()));
        }
        if self.concurrency == 0 {
            return Err(AtlasError::Config("concurrency must be at least 1".into()));
        }
        if self.charset.is_empty() {
            return Err(AtlasError::Config("charset is empty".into()));
        }
        if self.filename.as_deref().is_some_and(|f| f.trim().is_empty()) {
            return Err(AtlasError::Config("filename is empty".into()));
        }
        Ok(())
    }

    pub fn render_timeout(&self) -> Option<Duration> {
        self.render_timeout_ms.map(Duration::from_millis)
    }

    pub fn packer_config(&self) -> PackerConfig {
        PackerConfig {
            width: self.texture_width,
            height: self.texture_height,
            padding: self.texture_padding,
            border: self.border,
            smart_size: self.smart_size,
            pot: self.pot,
            square: self.square,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.font_size, 42.0);
        assert_eq!(config.charset.len(), 95);
        assert_eq!(config.charset.chars()[0], ' ');
        assert_eq!(config.charset.chars()[94], '~');
        assert_eq!((config.texture_width, config.texture_height), (512, 512));
        assert_eq!(config.texture_padding, 2);
        assert_eq!(config.distance_range, 3);
        assert_eq!(config.field_type, FieldType::Msdf);
        assert_eq!(config.concurrency, 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_charset_dedup() {
        assert_eq!(Charset::from_text("abca").chars(), &['a', 'b', 'c']);
    }

    #[test]
    fn test_from_json() {
        let config = Config::from_json(
            r#"{"fontSize": 32, "charset": ["A", "BC"], "fieldType": "sdf", "outputType": "json", "roundDecimal": 2}"#,
        )
        .unwrap();
        assert_eq!(config.font_size, 32.0);
        assert_eq!(config.charset.chars(), &['A', 'B', 'C']);
        assert_eq!(config.field_type, FieldType::Sdf);
        assert_eq!(config.output_type, OutputType::Json);
        assert_eq!(config.round_decimal, Some(2));
        assert_eq!(config.texture_width, 512);

        let config = Config::from_json(r#"{"charset": "xyz"}"#).unwrap();
        assert_eq!(config.charset.chars(), &['x', 'y', 'z']);
    }

    #[test]
    fn test_bad_field_type_rejected() {
        assert!(matches!(Config::from_json(r#"{"fieldType": "bitmap"}"#), Err(AtlasError::Config(_))));
    }

    #[test]
    fn test_validate() {
        let bad = [
            Config { font_size: 0.0, ..Config::default() },
            Config { texture_width: 0, ..Config::default() },
            Config { distance_range: 0, ..Config::default() },
            Config { concurrency: 0, ..Config::default() },
            Config { charset: Charset::from_text(""), ..Config::default() },
            Config { border: 256, ..Config::default() },
            Config { border: u32::MAX, ..Config::default() },
            Config { border: u32::MAX / 2 + 1, texture_width: u32::MAX, texture_height: u32::MAX, ..Config::default() },
            Config { filename: Some(" ".into()), ..Config::default() },
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(AtlasError::Config(_))), "{config:?}");
        }
    }
}
