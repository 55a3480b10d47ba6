//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the seam between the walker and the pixel
//! work. It has two operations: identify (read dimensions) and resize.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) — pure Rust, everything
//! statically linked into the binary. Tests use the recording `MockBackend`
//! from this module's test submodule.

use super::params::ResizeParams;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// `resize` receives a destination whose parent directory already exists.
/// A failed resize may leave a partial file behind; callers do not clean up.
pub trait ImageBackend {
    /// Get image dimensions.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode `params.source`, resize to exactly `width`x`height`, and write
    /// the result to `params.output`.
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError>;
}
