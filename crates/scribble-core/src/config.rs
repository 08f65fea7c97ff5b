//! Editor configuration.

use crate::color::Rgba8;
use crate::drawings::DRAWINGS_KEY;
use crate::tools::ToolKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(String),
    #[error("Failed to serialize config: {0}")]
    Serialize(String),
}

/// Defaults and limits for an editor instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Title given to drawings that have none.
    pub default_title: String,
    /// Initial stroke color.
    pub stroke_color: Rgba8,
    /// Initial brush width in pixels.
    pub brush_width: u32,
    /// Tool selected when the editor opens.
    pub default_tool: ToolKind,
    /// Key the drawing collection is stored under.
    pub storage_key: String,
    /// Maximum number of history entries, unbounded when `None`.
    pub history_limit: Option<usize>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_title: "Untitled Drawing".to_string(),
            stroke_color: Rgba8::BLACK,
            brush_width: 5,
            default_tool: ToolKind::Pencil,
            storage_key: DRAWINGS_KEY.to_string(),
            history_limit: None,
        }
    }
}

impl EditorConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}
