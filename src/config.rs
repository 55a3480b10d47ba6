//! Tool configuration module.
//!
//! Handles loading, validating, and merging the optional `--config` TOML file.
//! The file is layered over the stock defaults, so it only needs the keys it
//! wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [output]
//! quality = 90              # JPEG quality (1-100)
//!
//! [resize]
//! filter = "lanczos3"       # nearest | triangle | catmull-rom | gaussian | lanczos3
//! keep_aspect_ratio = true  # fit inside --width/--height instead of stretching
//!
//! [walk]
//! follow_links = true       # descend through symbolic links
//! sort_entries = true       # visit siblings in file-name order
//! ```
//!
//! ## Partial Configuration
//!
//! ```toml
//! # Only lower the quality
//! [output]
//! quality = 75
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{Filter, Quality, ResizeOptions};
use crate::walk::WalkOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from the `--config` file.
///
/// All fields have defaults. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Encoding settings for written files.
    pub output: OutputConfig,
    /// How target sizes are reached.
    pub resize: ResizeConfig,
    /// Directory traversal behaviour.
    pub walk: WalkConfig,
}

impl ToolConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.output.quality) {
            return Err(ConfigError::Validation(
                "output.quality must be 1-100".into(),
            ));
        }
        Ok(())
    }

    pub fn resize_options(&self) -> ResizeOptions {
        ResizeOptions {
            quality: Quality::new(self.output.quality),
            filter: self.resize.filter,
            keep_aspect_ratio: self.resize.keep_aspect_ratio,
        }
    }

    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            follow_links: self.walk.follow_links,
            sort_entries: self.walk.sort_entries,
        }
    }
}

/// Output encoding settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// JPEG quality (1-100).
    pub quality: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quality: Quality::default().value(),
        }
    }
}

/// Resize settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    /// Resampling filter.
    pub filter: Filter,
    /// With `--width`/`--height`, preserve the source aspect ratio by fitting
    /// inside the box. When false the output is exactly the requested size.
    pub keep_aspect_ratio: bool,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            filter: Filter::default(),
            keep_aspect_ratio: true,
        }
    }
}

/// Traversal settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WalkConfig {
    pub follow_links: bool,
    pub sort_entries: bool,
}

impl Default for WalkConfig {
    fn default() -> Self {
        let options = WalkOptions::default();
        Self {
            follow_links: options.follow_links,
            sort_entries: options.sort_entries,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    // An empty table deserializes to the same defaults via `#[serde(default)]`.
    toml::Value::try_from(ToolConfig::default())
        .unwrap_or_else(|_| toml::Value::Table(toml::Table::new()))
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
/// The file was named explicitly, so a missing file is an error.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(value)
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ToolConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ToolConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the tool config.
///
/// With no path the stock defaults are used. Otherwise the file is merged
/// over the defaults, unknown keys are rejected, and the result is validated.
pub fn load_config(path: Option<&Path>) -> Result<ToolConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = path.map(load_raw_config).transpose()?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock config with all keys and explanations.
///
/// Printed by `--gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# thumbtree configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Use with: thumbtree --config thumbtree.toml -d OUT -r 0.5
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Output encoding
# ---------------------------------------------------------------------------
[output]
# JPEG quality (1-100). Every output is written as JPEG.
quality = 90

# ---------------------------------------------------------------------------
# Resizing
# ---------------------------------------------------------------------------
[resize]
# Resampling filter: nearest, triangle, catmull-rom, gaussian, lanczos3.
# nearest is fastest, lanczos3 is sharpest.
filter = "lanczos3"

# With --width/--height: true fits the image inside the box and keeps its
# proportions; false stretches it to exactly that size.
keep_aspect_ratio = true

# ---------------------------------------------------------------------------
# Directory traversal
# ---------------------------------------------------------------------------
[walk]
# Descend through symbolic links to files and directories.
follow_links = true

# Visit entries in file-name order within each directory.
sort_entries = true
"##
}
