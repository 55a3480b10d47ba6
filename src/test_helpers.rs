//! Shared test utilities for the thumbtree test suite.
//!
//! Provides fixture builders for source trees and lookups over the files a
//! run produced.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! build_tree(tmp.path(), &["a.jpg", "sub/b.JPEG", "notes.txt"]);
//!
//! // ... run the walker ...
//!
//! assert_eq!(relative_files(&dst), vec!["a.jpg", "sub/b.JPEG"]);
//! ```

use image::{ImageEncoder, RgbImage};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// =========================================================================
// Fixture setup
// =========================================================================

/// Create a small valid JPEG file with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Create an empty file, along with any missing parent directories.
pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, b"").unwrap();
}

/// Create empty files for each `/`-separated relative path under `root`.
///
/// The mock backend never reads file contents, so empty files are enough.
pub fn build_tree(root: &Path, files: &[&str]) -> Vec<PathBuf> {
    files
        .iter()
        .map(|rel| {
            let path = root.join(rel);
            touch(&path);
            path
        })
        .collect()
}

// =========================================================================
// Lookups over produced trees
// =========================================================================

/// All regular files under `root`, as sorted `/`-separated relative paths.
pub fn relative_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| to_slash(e.path().strip_prefix(root).unwrap()))
        .collect();
    files.sort();
    files
}

/// Render a relative path with `/` separators on every platform.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Strip `root` from each absolute path string and sort the result.
pub fn relative_to(root: &Path, paths: &[String]) -> Vec<String> {
    let mut rel: Vec<String> = paths
        .iter()
        .map(|p| {
            let stripped = Path::new(p).strip_prefix(root).unwrap_or_else(|_| {
                panic!("{p} is not under {}", root.display());
            });
            to_slash(stripped)
        })
        .collect();
    rel.sort();
    rel
}
