//! Command line arguments
//!
//! Flags override values loaded from `--config`, which in turn override
//! the built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bmsdf_engine::{Charset, Config, FieldType, OutputType};
use clap::Parser;

/// bmsdf CLI arguments
///
/// Examples:
///   bmsdf Roboto-Regular.ttf                       # msdf atlas, BMFont XML
///   bmsdf Roboto-Regular.ttf -o json -s 64          # JSON descriptor at 64px
///   bmsdf Roboto-Regular.ttf -i glyphs.txt -m 1024,1024 --pot
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "bmsdf",
    version,
    about = "Signed distance field bitmap font atlas generator"
)]
pub struct Args {
    /// Font file (TrueType or OpenType)
    pub font: PathBuf,

    /// Descriptor format: xml (.fnt) or json
    #[clap(short = 'o', long = "output-type")]
    pub output_type: Option<OutputType>,

    /// Base name of the output files, defaults to the font file name
    #[clap(short = 'f', long = "filename")]
    pub filename: Option<String>,

    /// Font size in pixels
    #[clap(short = 's', long = "font-size")]
    pub font_size: Option<f32>,

    /// Text file holding the characters to render
    #[clap(short = 'i', long = "charset-file")]
    pub charset_file: Option<PathBuf>,

    /// Page size as WIDTH,HEIGHT
    #[clap(short = 'm', long = "texture-size", value_parser = parse_size)]
    pub texture_size: Option<(u32, u32)>,

    /// Pixels kept between glyphs
    #[clap(short = 'p', long = "texture-padding")]
    pub texture_padding: Option<u32>,

    /// Distance range in pixels
    #[clap(short = 'r', long = "distance-range")]
    pub distance_range: Option<u32>,

    /// Field type: msdf, sdf or psdf
    #[clap(short = 't', long = "field-type")]
    pub field_type: Option<FieldType>,

    /// Round shape coordinates and descriptor numbers to this many decimals
    #[clap(short = 'd', long = "round-decimal")]
    pub round_decimal: Option<u32>,

    /// Margin kept free along page edges
    #[clap(long)]
    pub border: Option<u32>,

    /// Shrink pages to the area in use
    #[clap(long)]
    pub smart_size: bool,

    /// Round page sizes up to a power of two
    #[clap(long)]
    pub pot: bool,

    /// Make pages square
    #[clap(long)]
    pub square: bool,

    /// JSON config file; flags take precedence over its values
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// msdfgen binary
    #[clap(long)]
    pub msdfgen: Option<PathBuf>,

    /// Directory the atlas is written to
    #[clap(long, default_value = ".")]
    pub out_dir: PathBuf,
}

impl Args {
    /// Build the effective config
    pub fn to_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => Config::default(),
        };

        if let Some(output_type) = self.output_type {
            config.output_type = output_type;
        }
        if let Some(filename) = &self.filename {
            config.filename = Some(filename.clone());
        }
        if let Some(font_size) = self.font_size {
            config.font_size = font_size;
        }
        if let Some(path) = &self.charset_file {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read charset file {}", path.display()))?;
            config.charset = Charset::from_chars(text.chars().filter(|&c| c != '\n' && c != '\r'));
        }
        if let Some((width, height)) = self.texture_size {
            config.texture_width = width;
            config.texture_height = height;
        }
        if let Some(padding) = self.texture_padding {
            config.texture_padding = padding;
        }
        if let Some(range) = self.distance_range {
            config.distance_range = range;
        }
        if let Some(field_type) = self.field_type {
            config.field_type = field_type;
        }
        if let Some(decimals) = self.round_decimal {
            config.round_decimal = Some(decimals);
        }
        if let Some(border) = self.border {
            config.border = border;
        }
        config.smart_size |= self.smart_size;
        config.pot |= self.pot;
        config.square |= self.square;
        if let Some(path) = &self.msdfgen {
            config.renderer_path = Some(path.clone());
        }

        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    Config::from_json(&text).with_context(|| format!("Invalid config {}", path.display()))
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(',')
        .ok_or_else(|| format!("expected WIDTH,HEIGHT, got `{s}`"))?;
    let parse = |v: &str| v.trim().parse::<u32>().map_err(|e| format!("`{v}`: {e}"));
    Ok((parse(w)?, parse(h)?))
}
