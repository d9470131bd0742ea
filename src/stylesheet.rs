//! Stylesheets for the SVG renderer
//!
//! A stylesheet maps role tokens (`window`, `view`, `stack`, `spacer`,
//! `text`, `outline`) to colors. Tokens missing from a loaded stylesheet fall
//! back to the default palette.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing stylesheets
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("failed to read stylesheet file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("failed to parse stylesheet TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// A stylesheet mapping role tokens to colors
#[derive(Debug, Clone, PartialEq)]
pub struct Stylesheet {
    pub name: Option<String>,
    /// Token name -> CSS color
    pub colors: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    colors: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
}

const DEFAULT_PALETTE: [(&str, &str); 6] = [
    ("window", "#ffffff"),
    ("view", "#e3f2fd"),
    ("stack", "#1565c0"),
    ("spacer", "#ff9800"),
    ("text", "#1a1a1a"),
    ("outline", "#333333"),
];

const FALLBACK_COLOR: &str = "#333333";

impl Stylesheet {
    /// Load stylesheet from TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// Resolve a token defined in this stylesheet
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(|s| s.as_str())
    }

    /// Resolve a token, falling back to the default palette and then to a
    /// neutral dark gray
    pub fn resolve_or_default(&self, token: &str) -> String {
        self.resolve(token)
            .or_else(|| {
                DEFAULT_PALETTE
                    .iter()
                    .find(|(name, _)| *name == token)
                    .map(|(_, color)| *color)
            })
            .unwrap_or(FALLBACK_COLOR)
            .to_string()
    }
}

impl FromStr for Stylesheet {
    type Err = StylesheetError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let parsed: TomlStylesheet = toml::from_str(content)?;
        Ok(Stylesheet {
            name: parsed.metadata.and_then(|m| m.name),
            colors: parsed.colors,
        })
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self {
            name: None,
            colors: DEFAULT_PALETTE
                .iter()
                .map(|(token, color)| (token.to_string(), color.to_string()))
                .collect(),
        }
    }
}
