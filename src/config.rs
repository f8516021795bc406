//! Tool configuration.
//!
//! Handles loading, validating, and merging `thumbnails.toml`. Stock defaults
//! are serialized to a TOML table and the user file is deep-merged on top, so
//! a config file only needs the keys it wants to change.
//!
//! ## Config File Location
//!
//! By default `thumbnails.toml` is read from the working directory; the
//! `--config` flag points somewhere else. A missing file means stock defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content_root = "src"      # Directory scanned when no files are given
//!
//! [font]
//! path = "fonts/NotoSansKR-Regular.ttf"
//! family = "Noto Sans KR"   # Family name the title text is set in
//! weight = 400              # 100-900
//! style = "normal"          # normal | italic | oblique
//! ```
//!
//! Canvas size and the thumbnail layout are fixed and deliberately absent
//! from this file.
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name, resolved against the working directory.
pub const CONFIG_FILE: &str = "thumbnails.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `thumbnails.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailConfig {
    /// Directory scanned recursively when no file arguments are given.
    pub content_root: PathBuf,
    /// The single embedded font used for title text.
    pub font: FontConfig,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            content_root: PathBuf::from("src"),
            font: FontConfig::default(),
        }
    }
}

impl ThumbnailConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content_root.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "content_root must not be empty".into(),
            ));
        }
        if self.font.family.trim().is_empty() {
            return Err(ConfigError::Validation(
                "font.family must not be empty".into(),
            ));
        }
        if !(100..=900).contains(&self.font.weight) {
            return Err(ConfigError::Validation(
                "font.weight must be 100-900".into(),
            ));
        }
        Ok(())
    }
}

/// Embedded font registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    /// Font file path, relative to the working directory.
    pub path: PathBuf,
    /// Family name the font is registered and referenced under.
    pub family: String,
    /// Declared weight of the font file.
    pub weight: u16,
    pub style: FontStyle,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("fonts/NotoSansKR-Regular.ttf"),
            family: "Noto Sans KR".to_string(),
            weight: 400,
            style: FontStyle::Normal,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

impl FontStyle {
    /// CSS/SVG keyword for this style.
    pub fn as_css(self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
            FontStyle::Oblique => "oblique",
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ThumbnailConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the base, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ThumbnailConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ThumbnailConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given file path, falling back to stock defaults.
pub fn load_config(path: &Path) -> Result<ThumbnailConfig, ConfigError> {
    let overlay = load_raw_config(path)?;
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `thumbnails.toml`.
///
/// Used by the `--print-config` flag.
pub fn stock_config_toml() -> &'static str {
    r##"# og-thumbnail Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.
#
# The thumbnail itself (1200x630, gradient background, centered title)
# is fixed and cannot be configured here.

# Directory scanned recursively for .md/.mdx files when no files are given.
content_root = "src"

# ---------------------------------------------------------------------------
# Title font
# ---------------------------------------------------------------------------
[font]
# Font file, relative to the working directory. When it cannot be read the
# system fonts are used instead.
path = "fonts/NotoSansKR-Regular.ttf"

# Family name the font is registered under.
family = "Noto Sans KR"

# Declared weight of the font file (100-900).
weight = 400

# normal | italic | oblique
style = "normal"
"##
}
