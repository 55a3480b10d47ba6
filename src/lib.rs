//! # thumbtree
//!
//! Batch-resize every JPEG in a directory tree into a mirrored destination
//! tree. The source is never modified; each `a/b/c.jpg` under the source root
//! becomes a resized `a/b/c.jpg` under the destination root.
//!
//! ```text
//! thumbtree -s photos -d thumbs -r 0.3 -R
//!
//! photos/                       thumbs/
//! ├── a.jpg       (2000x1500)   ├── a.jpg       (600x450)
//! ├── notes.txt                 │
//! └── 2019/                     └── 2019/
//!     └── b.JPEG  (4000x3000)       └── b.JPEG  (1200x900)
//! ```
//!
//! # Flow
//!
//! ```text
//! 1. Resolve   raw CLI strings  →  ScanConfig   (roots, depth, resize mode)
//! 2. Walk      ScanConfig       →  dst tree     (one resize per eligible file)
//! 3. Report    WalkSummary      →  stdout / JSON
//! ```
//!
//! Resolution is a pure function of its inputs and the filesystem, so every
//! usage error is caught before a single file is touched. The walk keeps
//! going when one file fails and stops only when the traversal itself does.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`resolve`] | Turns raw `--src`/`--dst`/`--width`/`--height`/`--ratio`/`--recursive` strings into a [`types::ScanConfig`] |
//! | [`walk`] | Traverses the source tree, filters JPEGs, mirrors paths, drives the backend |
//! | [`imaging`] | Dimension math and the [`imaging::ImageBackend`] seam with its pure-Rust implementation |
//! | [`config`] | Optional TOML tool config: quality, filter, aspect handling, traversal |
//! | [`types`] | Shared run types (`ScanConfig`, `ResizeMode`, `MaxDepth`) |
//! | [`output`] | CLI output formatting for the header, per-file lines and summary |
//!
//! # Design Decisions
//!
//! ## Aspect Ratio Is Preserved
//!
//! `--width`/`--height` describe a bounding box. The output is the largest
//! image with the source's proportions that fits inside it, so a 200x100
//! source asked for 50x50 comes out 50x25. Set `resize.keep_aspect_ratio =
//! false` in the config to stretch to the exact box instead.
//!
//! ## Output Is Always JPEG
//!
//! Destination names keep their `.jpg`/`.jpeg` extension, so the file written
//! there is a JPEG regardless of what the source bytes really were.
//!
//! ## Deterministic Order
//!
//! Siblings are visited in file-name order. Two runs over the same tree print
//! the same lines in the same order.

pub mod config;
pub mod imaging;
pub mod output;
pub mod resolve;
pub mod types;
pub mod walk;

#[cfg(test)]
pub(crate) mod test_helpers;
