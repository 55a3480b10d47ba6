//! Pure Rust image processing backend.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::ImageReader::into_dimensions` (header only) |
//! | Decode | `image::ImageReader` with content sniffing |
//! | Resize | `image::DynamicImage::resize_exact` with the configured filter |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder::new_with_quality` |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::ensure_within_output_limits;
use super::params::ResizeParams;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageReader};
use std::path::Path;

/// Pure Rust backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Open an image for reading, trusting its bytes over its file name.
fn open_reader(path: &Path) -> Result<ImageReader<std::io::BufReader<std::fs::File>>, BackendError> {
    Ok(ImageReader::open(path)?.with_guessed_format()?)
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    open_reader(path)?.decode().map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
    })
}

/// Encode and save as JPEG.
///
/// JPEG has no alpha and no 16-bit samples, so anything other than 8-bit
/// gray or RGB is converted to RGB8 first.
fn save_jpeg(img: DynamicImage, path: &Path, quality: u32) -> Result<(), BackendError> {
    let img = match img {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => img,
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    };
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(writer, quality.clamp(1, 100) as u8);
    img.write_with_encoder(encoder)
        .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {}", e)))
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = open_reader(path)?.into_dimensions().map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to read dimensions: {}", e))
        })?;
        Ok(Dimensions { width, height })
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        ensure_within_output_limits(params.width, params.height)?;
        let img = load_image(&params.source)?;
        let resized = img.resize_exact(params.width, params.height, params.filter.filter_type());
        save_jpeg(resized, &params.output, params.quality.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::params::{Filter, Quality};
    use crate::test_helpers::create_test_jpeg;

    fn params(source: &Path, output: &Path, width: u32, height: u32) -> ResizeParams {
        ResizeParams {
            source: source.to_path_buf(),
            output: output.to_path_buf(),
            width,
            height,
            quality: Quality::new(85),
            filter: Filter::Lanczos3,
        }
    }

    #[test]
    fn identify_synthetic_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        create_test_jpeg(&path, 200, 150);

        let backend = RustBackend::new();
        let dims = backend.identify(&path).unwrap();
        assert_eq!(dims.width, 200);
        assert_eq!(dims.height, 150);
    }

    #[test]
    fn identify_nonexistent_file_errors() {
        let backend = RustBackend::new();
        let result = backend.identify(Path::new("/nonexistent/image.jpg"));
        assert!(matches!(result, Err(BackendError::Io(_))));
    }

    #[test]
    fn resize_synthetic_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        create_test_jpeg(&source, 400, 300);

        let output = tmp.path().join("resized.jpg");
        let backend = RustBackend::new();
        backend.resize(&params(&source, &output, 200, 150)).unwrap();

        assert_eq!(image::image_dimensions(&output).unwrap(), (200, 150));
    }

    #[test]
    fn resize_keeps_jpeg_for_uppercase_extension() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("SOURCE.JPEG");
        create_test_jpeg(&source, 64, 64);

        let output = tmp.path().join("OUT.JPEG");
        let backend = RustBackend::new();
        backend.resize(&params(&source, &output, 32, 32)).unwrap();

        let format = ImageReader::open(&output)
            .unwrap()
            .with_guessed_format()
            .unwrap()
            .format();
        assert_eq!(format, Some(image::ImageFormat::Jpeg));
    }

    #[test]
    fn resize_corrupt_source_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("broken.jpg");
        std::fs::write(&source, b"definitely not a jpeg").unwrap();

        let output = tmp.path().join("out.jpg");
        let backend = RustBackend::new();
        let result = backend.resize(&params(&source, &output, 10, 10));
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }

    #[test]
    fn resize_into_missing_directory_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("source.jpg");
        create_test_jpeg(&source, 40, 40);

        let output = tmp.path().join("missing/out.jpg");
        let backend = RustBackend::new();
        let result = backend.resize(&params(&source, &output, 20, 20));
        assert!(matches!(result, Err(BackendError::Io(_))));
    }

    #[test]
    fn resize_oversized_target_errors_without_allocating() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("tiny.jpg");
        create_test_jpeg(&source, 1, 1);

        let output = tmp.path().join("huge.jpg");
        let backend = RustBackend::new();
        let result = backend.resize(&params(&source, &output, u32::MAX, u32::MAX));

        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
        assert!(!output.exists());
    }
}
