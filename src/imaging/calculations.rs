//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.
//! Every result is at least 1x1 so the encoder never sees an empty image.

use super::backend::BackendError;
use crate::types::ResizeMode;

fn to_side(value: f64) -> u32 {
    value.round().clamp(1.0, u32::MAX as f64) as u32
}

/// Scale both sides by `factor`.
///
/// # Examples
/// ```
/// # use thumbtree::imaging::calculate_scaled_dimensions;
/// // 30% of 1000x800 → 300x240
/// assert_eq!(calculate_scaled_dimensions((1000, 800), 0.3), (300, 240));
/// ```
pub fn calculate_scaled_dimensions(source: (u32, u32), factor: f64) -> (u32, u32) {
    let (src_w, src_h) = source;
    (to_side(src_w as f64 * factor), to_side(src_h as f64 * factor))
}

/// Largest size with the source aspect ratio that fits inside `bounds`.
///
/// One side matches the bound exactly, the other is at most its bound.
/// Scales up as well as down.
///
/// # Examples
/// ```
/// # use thumbtree::imaging::calculate_fit_dimensions;
/// // 4:3 landscape into a 400x400 box → 400x300
/// assert_eq!(calculate_fit_dimensions((800, 600), (400, 400)), (400, 300));
/// ```
pub fn calculate_fit_dimensions(source: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (max_w, max_h) = bounds;

    let src_aspect = src_w as f64 / src_h as f64;
    let box_aspect = max_w as f64 / max_h as f64;

    if src_aspect > box_aspect {
        // Source is wider: width matches, height shrinks
        (max_w, to_side(max_w as f64 / src_aspect))
    } else {
        // Source is taller (or same shape): height matches
        (to_side(max_h as f64 * src_aspect), max_h)
    }
}

/// Output dimensions for one image under the run's resize mode.
pub fn calculate_target_dimensions(
    source: (u32, u32),
    mode: ResizeMode,
    keep_aspect_ratio: bool,
) -> (u32, u32) {
    match mode {
        ResizeMode::Ratio { factor } => calculate_scaled_dimensions(source, factor),
        ResizeMode::Dimensions { width, height } if keep_aspect_ratio => {
            calculate_fit_dimensions(source, (width, height))
        }
        ResizeMode::Dimensions { width, height } => (width, height),
    }
}

/// Largest output, in pixels, a single resize may allocate.
///
/// 256 megapixels is about 768 MB as RGB8.
pub const MAX_OUTPUT_PIXELS: u64 = 256 * 1024 * 1024;

/// Largest side a baseline JPEG can encode.
pub const MAX_JPEG_SIDE: u32 = 65_535;

/// Whether an output of `dims` can be allocated and encoded.
///
/// # Examples
/// ```
/// # use thumbtree::imaging::within_output_limits;
/// assert!(within_output_limits((6000, 4000)));
/// assert!(!within_output_limits((60_000, 60_000)));
/// ```
pub fn within_output_limits(dims: (u32, u32)) -> bool {
    let (width, height) = dims;
    width <= MAX_JPEG_SIDE
        && height <= MAX_JPEG_SIDE
        && u64::from(width)
            .checked_mul(u64::from(height))
            .is_some_and(|pixels| pixels <= MAX_OUTPUT_PIXELS)
}

/// [`within_output_limits`] as a backend error naming the rejected size.
pub(crate) fn ensure_within_output_limits(width: u32, height: u32) -> Result<(), BackendError> {
    if within_output_limits((width, height)) {
        return Ok(());
    }
    Err(BackendError::ProcessingFailed(format!(
        "Target size {}x{} exceeds the output limit ({} pixels, {} per side)",
        width, height, MAX_OUTPUT_PIXELS, MAX_JPEG_SIDE
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // calculate_scaled_dimensions tests
    // =========================================================================

    #[test]
    fn scale_down_by_ratio() {
        assert_eq!(calculate_scaled_dimensions((1000, 800), 0.3), (300, 240));
    }

    #[test]
    fn scale_up_by_ratio() {
        assert_eq!(calculate_scaled_dimensions((100, 50), 2.0), (200, 100));
    }

    #[test]
    fn scale_rounds_to_nearest() {
        // 333 * 0.5 = 166.5 → 167
        assert_eq!(calculate_scaled_dimensions((333, 100), 0.5), (167, 50));
    }

    #[test]
    fn scale_never_produces_zero() {
        assert_eq!(calculate_scaled_dimensions((10, 10), 0.01), (1, 1));
    }

    // =========================================================================
    // calculate_fit_dimensions tests
    // =========================================================================

    #[test]
    fn fit_landscape_into_square() {
        assert_eq!(calculate_fit_dimensions((800, 600), (400, 400)), (400, 300));
    }

    #[test]
    fn fit_portrait_into_square() {
        assert_eq!(calculate_fit_dimensions((600, 800), (400, 400)), (300, 400));
    }

    #[test]
    fn fit_same_aspect_matches_box() {
        assert_eq!(calculate_fit_dimensions((800, 600), (400, 300)), (400, 300));
    }

    #[test]
    fn fit_scales_up_small_source() {
        assert_eq!(calculate_fit_dimensions((100, 50), (400, 400)), (400, 200));
    }

    #[test]
    fn fit_extreme_panorama_keeps_one_pixel() {
        assert_eq!(calculate_fit_dimensions((10000, 1), (100, 100)), (100, 1));
    }

    // =========================================================================
    // calculate_target_dimensions tests
    // =========================================================================

    #[test]
    fn target_ratio_mode_scales() {
        let mode = ResizeMode::Ratio { factor: 0.5 };
        assert_eq!(calculate_target_dimensions((200, 100), mode, true), (100, 50));
    }

    #[test]
    fn target_dimensions_mode_fits_when_keeping_aspect() {
        let mode = ResizeMode::Dimensions {
            width: 100,
            height: 100,
        };
        assert_eq!(calculate_target_dimensions((200, 100), mode, true), (100, 50));
    }

    #[test]
    fn target_dimensions_mode_stretches_without_aspect() {
        let mode = ResizeMode::Dimensions {
            width: 100,
            height: 100,
        };
        assert_eq!(
            calculate_target_dimensions((200, 100), mode, false),
            (100, 100)
        );
    }

    #[test]
    fn target_ratio_mode_ignores_aspect_flag() {
        let mode = ResizeMode::Ratio { factor: 2.0 };
        assert_eq!(calculate_target_dimensions((30, 20), mode, false), (60, 40));
    }

    // =========================================================================
    // within_output_limits tests
    // =========================================================================

    #[test]
    fn camera_sized_output_is_within_limits() {
        assert!(within_output_limits((8192, 5464)));
        assert!(within_output_limits((1, 1)));
    }

    #[test]
    fn pixel_budget_is_inclusive() {
        assert!(within_output_limits((16_384, 16_384)));
        assert!(!within_output_limits((16_384, 16_385)));
    }

    #[test]
    fn side_longer_than_jpeg_allows_is_rejected() {
        assert!(!within_output_limits((65_536, 1)));
        assert!(!within_output_limits((1, 65_536)));
    }

    #[test]
    fn huge_ratio_target_is_rejected() {
        let target = calculate_target_dimensions((1, 1), ResizeMode::Ratio { factor: 1e10 }, true);
        assert_eq!(target, (u32::MAX, u32::MAX));
        assert!(!within_output_limits(target));
    }
}
