//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They sit between
//! [`operations`](super::operations), which decides the target size of each
//! output, and the [`backend`](super::backend), which does the pixel work.
//! Tests swap in a mock backend without touching operation logic.
//!
//! ## Types
//!
//! - [`Quality`] — JPEG encoding quality (1–100, default 90). Clamped on construction.
//! - [`Filter`] — Resampling filter used for every resize in a run.
//! - [`ResizeOptions`] — Per-run encoding settings taken from the tool config.
//! - [`ResizeParams`] — Full specification for one resize: source, output, target size.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// Resampling filter, named as in the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Filter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    #[default]
    Lanczos3,
}

impl Filter {
    pub(crate) fn filter_type(self) -> image::imageops::FilterType {
        use image::imageops::FilterType;
        match self {
            Filter::Nearest => FilterType::Nearest,
            Filter::Triangle => FilterType::Triangle,
            Filter::CatmullRom => FilterType::CatmullRom,
            Filter::Gaussian => FilterType::Gaussian,
            Filter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Encoding settings shared by every resize in a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeOptions {
    pub quality: Quality,
    pub filter: Filter,
    /// In dimensions mode, fit inside the box instead of stretching to it.
    pub keep_aspect_ratio: bool,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            quality: Quality::default(),
            filter: Filter::default(),
            keep_aspect_ratio: true,
        }
    }
}

/// Parameters for a single resize operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub quality: Quality,
    pub filter: Filter,
}
