//! Tree mirror walker: resize every JPEG under the source root into the
//! same relative location under the destination root.
//!
//! ## Traversal
//!
//! The source tree is enumerated lazily with [`walkdir`], bounded by the
//! run's [`MaxDepth`](crate::types::MaxDepth). Symbolic links are followed
//! and entries are visited in file-name order within each directory; both are
//! configurable through [`WalkOptions`].
//!
//! ```text
//! src/                      dst/
//! ├── a.jpg          →      ├── a.jpg
//! ├── notes.txt             │
//! └── 2019/                 └── 2019/          (created on demand)
//!     └── B.JPEG     →          └── B.JPEG
//! ```
//!
//! ## Per-file outcome
//!
//! Each entry becomes exactly one [`Visit`]:
//!
//! | Visit | Cause | Walk continues |
//! |---|---|---|
//! | `Resized` | backend wrote the output | yes |
//! | `Skip` | name does not end in `.jpg`/`.jpeg` | yes |
//! | `RecoverableFailure` | parent dir creation or resize failed | yes |
//! | `FatalFailure` | the traversal itself failed (e.g. unreadable dir, link loop) | no |
//!
//! Files already written before a fatal failure are left in place.
//!
//! ## Destination inside the source
//!
//! When the destination root sits strictly inside the source root, that
//! subtree is pruned so the walker never feeds its own output back in.

use crate::imaging::{BackendError, ImageBackend, ResizeOptions, RustBackend, resize_file};
use crate::types::ScanConfig;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// File name suffixes (lowercase) that make a file eligible.
pub const ELIGIBLE_SUFFIXES: &[&str] = &[".jpg", ".jpeg"];

/// Why one file could not be mirrored. The walk carries on after any of these.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Resize failed: {0}")]
    Resize(#[from] BackendError),
    #[error("Cannot read file: {0}")]
    Unreadable(String),
    #[error("File is outside the source root: {0}")]
    OutsideSourceRoot(PathBuf),
}

/// A failure that stops the walk.
#[derive(Error, Debug)]
pub enum WalkError {
    #[error("Directory traversal failed: {0}")]
    Traversal(#[from] walkdir::Error),
}

/// Traversal settings from the tool config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    pub follow_links: bool,
    pub sort_entries: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            follow_links: true,
            sort_entries: true,
        }
    }
}

/// A file that was resized into the destination tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResizedFile {
    pub relative: PathBuf,
    pub source: PathBuf,
    pub dest: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// A file that could not be resized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileFailure {
    pub relative: PathBuf,
    pub source: PathBuf,
    pub dest: PathBuf,
    pub reason: String,
}

/// Everything that happened during one walk.
#[derive(Debug, Default, Serialize)]
pub struct WalkSummary {
    pub resized: Vec<ResizedFile>,
    /// Regular files ignored by the extension filter.
    pub skipped: usize,
    pub failures: Vec<FileFailure>,
}

impl WalkSummary {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Progress events streamed to the output printer while walking.
#[derive(Debug, Clone)]
pub enum WalkEvent {
    /// `index` is 1-based among resized files.
    Resized { index: usize, file: ResizedFile },
    Failed(FileFailure),
}

/// Outcome of visiting one traversal entry.
#[derive(Debug)]
pub enum Visit {
    Resized(ResizedFile),
    Skip,
    RecoverableFailure {
        source: PathBuf,
        dest: PathBuf,
        reason: FileError,
    },
    FatalFailure(WalkError),
}

/// Whether `path` names an eligible JPEG, judged on the file name alone.
///
/// `photo.JPG` and `.jpeg` qualify; `photo.jpg.txt` does not.
pub fn is_eligible(path: &Path) -> bool {
    path.file_name()
        .map(|name| {
            let lower = name.to_string_lossy().to_lowercase();
            ELIGIBLE_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
        })
        .unwrap_or(false)
}

/// Destination for `file`: the same relative suffix under `dest_root`.
///
/// Returns `None` when `file` is not under `source_root`.
pub fn mirror_path(source_root: &Path, dest_root: &Path, file: &Path) -> Option<PathBuf> {
    file.strip_prefix(source_root)
        .ok()
        .map(|relative| dest_root.join(relative))
}

/// Lazily enumerate the regular files the walk will visit.
///
/// Directories are never yielded. Traversal errors are yielded in place so
/// the caller decides whether to stop.
pub fn source_files(
    scan: &ScanConfig,
    options: &WalkOptions,
) -> impl Iterator<Item = Result<DirEntry, walkdir::Error>> {
    let mut walker = WalkDir::new(&scan.source_root)
        .follow_links(options.follow_links)
        .min_depth(1);
    if let Some(levels) = scan.max_depth.levels() {
        walker = walker.max_depth(levels);
    }
    if options.sort_entries {
        walker = walker.sort_by_file_name();
    }

    let pruned = nested_dest_root(scan);
    walker
        .into_iter()
        .filter_entry(move |entry| pruned.as_deref().is_none_or(|dest| entry.path() != dest))
        .filter(|entry| match entry {
            Ok(entry) => entry.file_type().is_file(),
            Err(_) => true,
        })
}

/// The destination root as the walker will see it, if it lies strictly
/// inside the source root.
///
/// Both roots are compared canonicalized, so `..` and symbolic links in
/// either path cannot hide the nesting. The returned path is spelled under
/// `source_root`, matching the entry paths `walkdir` yields.
fn nested_dest_root(scan: &ScanConfig) -> Option<PathBuf> {
    let canonical = |path: &Path| fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let source = canonical(&scan.source_root);
    let dest = canonical(&scan.dest_root);
    let relative = dest.strip_prefix(&source).ok()?;
    (!relative.as_os_str().is_empty()).then(|| scan.source_root.join(relative))
}

/// Walk using the pure Rust backend.
pub fn walk(
    scan: &ScanConfig,
    walk_options: &WalkOptions,
    resize_options: &ResizeOptions,
    events: Option<Sender<WalkEvent>>,
) -> Result<WalkSummary, WalkError> {
    let backend = RustBackend::new();
    walk_with_backend(&backend, scan, walk_options, resize_options, events)
}

/// Walk using a specific backend (allows testing with mock).
pub fn walk_with_backend(
    backend: &impl ImageBackend,
    scan: &ScanConfig,
    walk_options: &WalkOptions,
    resize_options: &ResizeOptions,
    events: Option<Sender<WalkEvent>>,
) -> Result<WalkSummary, WalkError> {
    let mut summary = WalkSummary::default();

    for entry in source_files(scan, walk_options) {
        match visit(backend, scan, resize_options, entry) {
            Visit::Resized(file) => {
                info!(
                    source = %file.source.display(),
                    dest = %file.dest.display(),
                    width = file.width,
                    height = file.height,
                    "resized"
                );
                summary.resized.push(file.clone());
                if let Some(tx) = &events {
                    let index = summary.resized.len();
                    tx.send(WalkEvent::Resized { index, file }).ok();
                }
            }
            Visit::Skip => summary.skipped += 1,
            Visit::RecoverableFailure {
                source,
                dest,
                reason,
            } => {
                warn!(
                    source = %source.display(),
                    dest = %dest.display(),
                    error = %reason,
                    "failed to resize, continuing"
                );
                let failure = FileFailure {
                    relative: relative_or_full(&scan.source_root, &source),
                    source,
                    dest,
                    reason: reason.to_string(),
                };
                if let Some(tx) = &events {
                    tx.send(WalkEvent::Failed(failure.clone())).ok();
                }
                summary.failures.push(failure);
            }
            Visit::FatalFailure(err) => return Err(err),
        }
    }

    Ok(summary)
}

/// Decide and carry out what happens to one traversal entry.
pub fn visit(
    backend: &impl ImageBackend,
    scan: &ScanConfig,
    resize_options: &ResizeOptions,
    entry: Result<DirEntry, walkdir::Error>,
) -> Visit {
    let source = match entry {
        Ok(entry) => entry.into_path(),
        Err(err) => return visit_traversal_error(scan, err),
    };

    let Some(dest) = mirror_path(&scan.source_root, &scan.dest_root, &source) else {
        return Visit::RecoverableFailure {
            reason: FileError::OutsideSourceRoot(source.clone()),
            source,
            dest: scan.dest_root.clone(),
        };
    };

    if !is_eligible(&source) {
        debug!(path = %source.display(), "skipped, not a JPEG");
        return Visit::Skip;
    }

    if let Err(reason) = ensure_parent_dir(&dest) {
        return Visit::RecoverableFailure {
            source,
            dest,
            reason,
        };
    }

    match resize_file(backend, &source, &dest, scan.mode, resize_options) {
        Ok(dims) => Visit::Resized(ResizedFile {
            relative: relative_or_full(&scan.source_root, &source),
            source,
            dest,
            width: dims.width,
            height: dims.height,
        }),
        Err(e) => Visit::RecoverableFailure {
            source,
            dest,
            reason: FileError::Resize(e),
        },
    }
}

/// A dangling link (or an entry deleted mid-walk) only affects that entry;
/// anything else means the traversal cannot go on.
fn visit_traversal_error(scan: &ScanConfig, err: walkdir::Error) -> Visit {
    let missing_entry = err.depth() > 0
        && err.loop_ancestor().is_none()
        && err
            .io_error()
            .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound);

    match err.path().map(Path::to_path_buf) {
        Some(source) if missing_entry => {
            if !is_eligible(&source) {
                return Visit::Skip;
            }
            let dest = mirror_path(&scan.source_root, &scan.dest_root, &source)
                .unwrap_or_else(|| scan.dest_root.clone());
            Visit::RecoverableFailure {
                source,
                dest,
                reason: FileError::Unreadable(err.to_string()),
            }
        }
        _ => Visit::FatalFailure(WalkError::Traversal(err)),
    }
}

/// Create the parent of `dest` and any missing ancestors.
///
/// Succeeds when the directory already exists, including when it appears
/// concurrently.
fn ensure_parent_dir(dest: &Path) -> Result<(), FileError> {
    let Some(parent) = dest.parent() else {
        return Ok(());
    };
    if parent.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(parent).map_err(|source| FileError::CreateDir {
        path: parent.to_path_buf(),
        source,
    })?;
    debug!(path = %parent.display(), "created directory");
    Ok(())
}

fn relative_or_full(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}
