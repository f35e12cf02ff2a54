//! Page geometry, color, threshold and font settings for a render.
//!
//! A `LayoutConfig` is created once and passed by reference to every
//! component. All fields have defaults calibrated against the reference
//! document, so a configuration file only needs the values it overrides.

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use vitae_types::Rgb;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    /// Added to every transformed text Y; positive moves content up.
    pub y_global_offset: f32,
    pub color_primary: Rgb,
    /// Per-channel tolerance for matching shapes against `color_primary`.
    pub color_tolerance: f32,

    pub threshold_right_column_x: f32,
    /// Right-column text at or beyond this X is treated as location text (no bullet).
    pub threshold_location_text_x: f32,
    pub threshold_date_align_x: f32,
    pub threshold_date_align_y_limit: f32,
    pub threshold_link_disambiguation_y: f32,

    pub offset_date_correction: f32,
    pub offset_bullet_indent: f32,
    pub link_hitbox_padding: f32,
    pub bullet_marker: String,

    /// Maximum number of memoized text widths.
    pub width_cache_capacity: usize,

    pub links: LinkTargets,
    pub fonts: FontConfig,
    pub ink_spread: Option<InkSpread>,
    pub metadata: DocumentMetadata,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: 623.0,
            page_height: 806.0,
            y_global_offset: 32.0,
            color_primary: Rgb::new(0.227, 0.42, 0.663),
            color_tolerance: 0.2,
            threshold_right_column_x: 215.0,
            threshold_location_text_x: 250.0,
            threshold_date_align_x: 380.0,
            threshold_date_align_y_limit: 750.0,
            threshold_link_disambiguation_y: 150.0,
            offset_date_correction: 1.5,
            offset_bullet_indent: 8.5,
            link_hitbox_padding: 2.0,
            bullet_marker: "\u{2022}".to_string(),
            width_cache_capacity: 1000,
            links: LinkTargets::default(),
            fonts: FontConfig::default(),
            ink_spread: None,
            metadata: DocumentMetadata::default(),
        }
    }
}

impl LayoutConfig {
    /// Reads a JSON object whose keys override the defaults.
    pub fn from_json_str(json: &str) -> Result<Self, PipelineError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| PipelineError::Config(e.to_string()))?;
        if !value.is_object() {
            return Err(PipelineError::Config(format!(
                "expected a JSON object of settings, got {}",
                json_kind(&value)
            )));
        }
        let config: LayoutConfig =
            serde_json::from_value(value).map_err(|e| PipelineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| PipelineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json).map_err(|e| match e {
            PipelineError::Config(msg) => PipelineError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Rejects values that would make rendering meaningless.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if !(self.page_width > 0.0 && self.page_height > 0.0) {
            return Err(PipelineError::Config(format!(
                "page dimensions must be positive, got {}x{}",
                self.page_width, self.page_height
            )));
        }
        if !(self.color_tolerance >= 0.0) {
            return Err(PipelineError::Config(format!(
                "color_tolerance must be non-negative, got {}",
                self.color_tolerance
            )));
        }
        if self.width_cache_capacity == 0 {
            return Err(PipelineError::Config("width_cache_capacity must be at least 1".into()));
        }
        if !self.color_primary.is_normalized() {
            return Err(PipelineError::Config(format!(
                "color_primary channels must lie in [0, 1], got {:?}",
                self.color_primary
            )));
        }
        Ok(())
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Substrings recognized as hyperlinks and the destinations they resolve to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkTargets {
    pub email: String,
    pub doi_marker: String,
    pub doi_url: String,
    pub short_handle: String,
    pub short_handle_url: String,
    /// Shared by two destinations; told apart by vertical position.
    pub long_handle: String,
    /// Destination for the long handle above the disambiguation line.
    pub upper_url: String,
    /// Destination for the long handle at or below the disambiguation line.
    pub lower_url: String,
}

impl Default for LinkTargets {
    fn default() -> Self {
        Self {
            email: "someone@example.com".to_string(),
            doi_marker: "DOI: 10.1109".to_string(),
            doi_url: "https://doi.org/10.1109/ACCESS.2021.3094723".to_string(),
            short_handle: "jdoe".to_string(),
            short_handle_url: "https://twitter.com/jdoe".to_string(),
            long_handle: "jdoe-dev".to_string(),
            upper_url: "https://github.com/jdoe-dev".to_string(),
            lower_url: "https://www.linkedin.com/in/jdoe-dev".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Family used when a text element names none.
    pub default_family: String,
    /// Family used when a requested variant is not registered.
    pub fallback_family: String,
    /// Variant name -> font file name inside the assets directory.
    pub files: BTreeMap<String, String>,
}

impl Default for FontConfig {
    fn default() -> Self {
        let files = [
            ("TrebuchetMS", "trebuc.ttf"),
            ("TrebuchetMS-Bold", "trebucbd.ttf"),
            ("TrebuchetMS-Italic", "trebucit.ttf"),
        ]
        .into_iter()
        .map(|(name, file)| (name.to_string(), file.to_string()))
        .collect();
        Self {
            default_family: "TrebuchetMS".to_string(),
            fallback_family: "Helvetica".to_string(),
            files,
        }
    }
}

/// Simulated ink spread: text is filled and stroked in its own color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InkSpread {
    pub header_min_size: f32,
    pub header_max_x: f32,
    pub header_labels: Vec<String>,
    pub header_stroke: f32,
    pub body_stroke: f32,
}

impl Default for InkSpread {
    fn default() -> Self {
        Self {
            header_min_size: 11.0,
            header_max_x: 200.0,
            header_labels: Vec::new(),
            header_stroke: 0.3,
            body_stroke: 0.05,
        }
    }
}

impl InkSpread {
    /// Stroke width for a run of `text` at `x` set in `size` points.
    pub fn stroke_width(&self, text: &str, x: f32, size: f32) -> f32 {
        let trimmed = text.trim();
        let is_header = (size > self.header_min_size && x < self.header_max_x)
            || self.header_labels.iter().any(|label| label == trimmed);
        if is_header { self.header_stroke } else { self.body_stroke }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
}
