//! bmsdf Descriptor - BMFont font descriptor
//!
//! Aggregates packed glyph metrics, font-wide line metrics and kerning
//! into the BMFont descriptor, then renders it as XML (`.fnt`) or JSON.

mod format;
mod model;

pub use format::{normalize_numbers, render, to_xml};
pub use model::{
    CharEntry, CommonBlock, DescriptorSettings, DistanceFieldBlock, FontDescriptor, InfoBlock,
    KerningPair, build_descriptor, kerning_pairs, line_metrics,
};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Descriptor text format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    #[default]
    Xml,
    Json,
}

impl OutputType {
    /// File extension of the descriptor
    pub fn extension(self) -> &'static str {
        match self {
            OutputType::Xml => "fnt",
            OutputType::Json => "json",
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputType::Xml => "xml",
            OutputType::Json => "json",
        })
    }
}

impl FromStr for OutputType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xml" => Ok(OutputType::Xml),
            "json" => Ok(OutputType::Json),
            other => Err(format!("unknown output type `{other}` (expected xml or json)")),
        }
    }
}

/// Descriptor error types
#[derive(Debug, thiserror::Error)]
pub enum DescriptorError {
    #[error("Failed to serialize descriptor: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Descriptor field `{0}` is missing or malformed")]
    Malformed(&'static str),
}

pub type Result<T> = std::result::Result<T, DescriptorError>;
