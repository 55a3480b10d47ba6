//! Shared types passed from the resolver to the walker and the imaging layer.

use serde::Serialize;
use std::fmt;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// How every eligible image in a run is resized.
///
/// Exactly one variant is active per run; the resolver rejects input that
/// specifies neither or both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResizeMode {
    /// Absolute target box in pixels. Both sides are non-zero.
    Dimensions { width: u32, height: u32 },
    /// Proportional scale factor, finite and greater than zero.
    Ratio { factor: f64 },
}

impl fmt::Display for ResizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResizeMode::Dimensions { width, height } => write!(f, "{}x{}", width, height),
            ResizeMode::Ratio { factor } => write!(f, "ratio {}", factor),
        }
    }
}

/// How many directory levels below the source root are visited.
///
/// `Limited(1)` means only entries directly inside the source root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxDepth {
    Limited(NonZeroUsize),
    Unbounded,
}

impl MaxDepth {
    /// Direct children of the source root only.
    pub const DIRECT_CHILDREN: MaxDepth = MaxDepth::Limited(NonZeroUsize::MIN);

    /// The limit in `walkdir` terms, where the root itself is depth 0.
    pub fn levels(self) -> Option<usize> {
        match self {
            MaxDepth::Limited(n) => Some(n.get()),
            MaxDepth::Unbounded => None,
        }
    }
}

impl fmt::Display for MaxDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxDepth::Limited(n) if n.get() == 1 => write!(f, "top level only"),
            MaxDepth::Limited(n) => write!(f, "{} levels", n),
            MaxDepth::Unbounded => write!(f, "recursive"),
        }
    }
}

/// Everything a run needs to know, resolved once at startup.
///
/// Both roots are absolute. Nothing mutates a `ScanConfig` after the
/// resolver hands it out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanConfig {
    pub source_root: PathBuf,
    pub dest_root: PathBuf,
    pub max_depth: MaxDepth,
    pub mode: ResizeMode,
}
