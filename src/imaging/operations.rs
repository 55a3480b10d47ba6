//! High-level image operations.
//!
//! These functions combine calculations with backend execution: read the
//! source dimensions, work out the target size for the run's resize mode,
//! and hand a fully specified [`ResizeParams`] to the backend.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::{calculate_target_dimensions, ensure_within_output_limits};
use super::params::{ResizeOptions, ResizeParams};
use crate::types::ResizeMode;
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// Plan a resize without executing it.
pub fn plan_resize(
    source: &Path,
    output: &Path,
    source_dims: (u32, u32),
    mode: ResizeMode,
    options: &ResizeOptions,
) -> ResizeParams {
    let (width, height) = calculate_target_dimensions(source_dims, mode, options.keep_aspect_ratio);

    ResizeParams {
        source: source.to_path_buf(),
        output: output.to_path_buf(),
        width,
        height,
        quality: options.quality,
        filter: options.filter,
    }
}

/// Resize one image file into `output`.
///
/// Returns the dimensions written. A target too large to allocate or encode
/// fails before the backend is asked to resize.
pub fn resize_file(
    backend: &impl ImageBackend,
    source: &Path,
    output: &Path,
    mode: ResizeMode,
    options: &ResizeOptions,
) -> Result<Dimensions> {
    let source_dims = get_dimensions(backend, source)?;
    let params = plan_resize(source, output, source_dims, mode, options);
    ensure_within_output_limits(params.width, params.height)?;
    backend.resize(&params)?;

    Ok(Dimensions {
        width: params.width,
        height: params.height,
    })
}
