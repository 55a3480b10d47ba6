//! Parameter resolution: raw command-line strings to a [`ScanConfig`].
//!
//! Everything here is a plain function of its inputs plus the filesystem
//! checks on the two roots. The resolver never prints and never holds state;
//! the caller decides how to report a [`ResolveError`].
//!
//! ## Resize mode selection
//!
//! | width | height | ratio | result |
//! |---|---|---|---|
//! | ✓ | ✓ | — | [`ResizeMode::Dimensions`] |
//! | — or partial | | ✓ | [`ResizeMode::Ratio`] |
//! | ✓ | ✓ | ✓ | [`ResolveError::ConflictingResizeMode`] |
//! | — or partial | | — | [`ResolveError::MissingResizeMode`] |
//!
//! A lone `--width` or `--height` counts as no dimensions at all.
//!
//! ## Ordering
//!
//! [`resolve`] checks the resize mode before it looks at the roots, because
//! resolving the destination may create it. A run that fails with a usage
//! error leaves the filesystem untouched.

use crate::types::{MaxDepth, ResizeMode, ScanConfig};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Destination directory is required (--dst)")]
    MissingDestination,
    #[error("Source directory does not exist: {0}")]
    SourceNotFound(PathBuf),
    #[error("Destination is not a directory: {0}")]
    DestinationNotDirectory(PathBuf),
    #[error("Failed to create destination directory {path}: {source}")]
    DestinationCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid width/height: {width:?} x {height:?} (expected positive integers)")]
    InvalidDimensions { width: String, height: String },
    #[error("Invalid ratio: {0:?} (expected a positive number, e.g. 0.3)")]
    InvalidRatio(String),
    #[error("Width/height and ratio cannot be given together")]
    ConflictingResizeMode,
    #[error("Either --width and --height, or --ratio, is required")]
    MissingResizeMode,
}

impl ResolveError {
    /// Whether this is a usage error (bad or missing arguments) rather than a
    /// problem with the directories themselves.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            ResolveError::MissingDestination
                | ResolveError::InvalidDimensions { .. }
                | ResolveError::InvalidRatio(_)
                | ResolveError::ConflictingResizeMode
                | ResolveError::MissingResizeMode
        )
    }
}

/// Raw, unparsed argument values as the user typed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawArgs {
    pub src: Option<String>,
    pub dst: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub ratio: Option<String>,
    pub recursive: bool,
}

/// Resolve every parameter of a run.
///
/// `cwd` is the directory relative paths are resolved against; it must be
/// absolute.
pub fn resolve(raw: &RawArgs, cwd: &Path) -> Result<ScanConfig, ResolveError> {
    let mode = resolve_mode(
        raw.width.as_deref(),
        raw.height.as_deref(),
        raw.ratio.as_deref(),
    )?;
    let max_depth = resolve_depth(raw.recursive);
    let (source_root, dest_root) = resolve_roots(raw.src.as_deref(), raw.dst.as_deref(), cwd)?;

    Ok(ScanConfig {
        source_root,
        dest_root,
        max_depth,
        mode,
    })
}

/// Resolve and validate the source and destination roots.
///
/// The source defaults to `cwd`. A missing destination is created, including
/// any missing ancestors.
pub fn resolve_roots(
    src_arg: Option<&str>,
    dst_arg: Option<&str>,
    cwd: &Path,
) -> Result<(PathBuf, PathBuf), ResolveError> {
    let source_root = match src_arg {
        Some(src) => absolutize(src, cwd),
        None => absolutize(".", cwd),
    };
    let dest_root = dst_arg
        .map(|dst| absolutize(dst, cwd))
        .ok_or(ResolveError::MissingDestination)?;

    if !source_root.is_dir() {
        return Err(ResolveError::SourceNotFound(source_root));
    }

    if dest_root.exists() {
        if !dest_root.is_dir() {
            return Err(ResolveError::DestinationNotDirectory(dest_root));
        }
    } else {
        std::fs::create_dir_all(&dest_root).map_err(|source| {
            ResolveError::DestinationCreateFailed {
                path: dest_root.clone(),
                source,
            }
        })?;
        debug!(path = %dest_root.display(), "created destination root");
    }

    Ok((source_root, dest_root))
}

/// Pick the resize mode from the raw width, height and ratio arguments.
pub fn resolve_mode(
    width_arg: Option<&str>,
    height_arg: Option<&str>,
    ratio_arg: Option<&str>,
) -> Result<ResizeMode, ResolveError> {
    let pair = width_arg.zip(height_arg);

    match (pair, ratio_arg) {
        (Some(_), Some(_)) => Err(ResolveError::ConflictingResizeMode),
        (None, None) => Err(ResolveError::MissingResizeMode),
        (Some((width, height)), None) => parse_dimensions(width, height),
        (None, Some(ratio)) => parse_ratio(ratio),
    }
}

/// `true` walks the whole tree; `false` only the source root's own entries.
pub fn resolve_depth(recursive: bool) -> MaxDepth {
    if recursive {
        MaxDepth::Unbounded
    } else {
        MaxDepth::DIRECT_CHILDREN
    }
}

fn parse_dimensions(width: &str, height: &str) -> Result<ResizeMode, ResolveError> {
    let invalid = || ResolveError::InvalidDimensions {
        width: width.to_string(),
        height: height.to_string(),
    };
    let w = width.parse::<u32>().map_err(|_| invalid())?;
    let h = height.parse::<u32>().map_err(|_| invalid())?;
    if w == 0 || h == 0 {
        return Err(invalid());
    }
    Ok(ResizeMode::Dimensions {
        width: w,
        height: h,
    })
}

fn parse_ratio(ratio: &str) -> Result<ResizeMode, ResolveError> {
    match ratio.parse::<f64>() {
        Ok(factor) if factor.is_finite() && factor > 0.0 => Ok(ResizeMode::Ratio { factor }),
        _ => Err(ResolveError::InvalidRatio(ratio.to_string())),
    }
}

/// Join `arg` onto `cwd` (absolute args win) and normalize lexically:
/// `.` is dropped and `..` removes the component before it.
fn absolutize(arg: &str, cwd: &Path) -> PathBuf {
    let mut path = PathBuf::new();
    for component in cwd.join(arg).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                path.pop();
            }
            other => path.push(other),
        }
    }
    path
}
