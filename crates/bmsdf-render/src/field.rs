//! Distance field flavours

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Distance field type passed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Multi-channel (RGB) distance field
    #[default]
    Msdf,
    /// Single-channel signed distance field
    Sdf,
    /// Single-channel pseudo distance field
    Psdf,
}

impl FieldType {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Msdf => "msdf",
            FieldType::Sdf => "sdf",
            FieldType::Psdf => "psdf",
        }
    }

    /// Whether the renderer writes three channels per pixel
    pub fn is_multichannel(self) -> bool {
        matches!(self, FieldType::Msdf)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "msdf" => Ok(FieldType::Msdf),
            "sdf" => Ok(FieldType::Sdf),
            "psdf" => Ok(FieldType::Psdf),
            other => Err(format!("unknown field type `{other}` (expected msdf, sdf or psdf)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("MSDF".parse::<FieldType>(), Ok(FieldType::Msdf));
        assert_eq!("psdf".parse::<FieldType>(), Ok(FieldType::Psdf));
        assert!("mtsdf".parse::<FieldType>().is_err());
    }
}
