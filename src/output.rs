//! CLI output formatting.
//!
//! # Output Format
//!
//! ```text
//! Source: /home/me/photos
//! Destination: /home/me/thumbs
//! Mode: ratio 0.3
//! Depth: recursive
//!
//! 001 a.jpg → 600x400
//! 002 2019/beach.JPG → 600x450
//! FAILED 2019/broken.jpg
//!     Source: /home/me/photos/2019/broken.jpg
//!     Destination: /home/me/thumbs/2019/broken.jpg
//!     Reason: Resize failed: Processing failed: Failed to decode ...
//! 003 2019/sunset.jpeg → 600x338
//!
//! Resized 3 files, skipped 1, failed 1
//! ```
//!
//! Resized files are numbered in visit order; failures carry their full
//! paths as indented context lines so they can be traced back on disk.
//!
//! # Architecture
//!
//! Each part has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure.

use crate::types::ScanConfig;
use crate::walk::{WalkEvent, WalkSummary};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

// ============================================================================
// Run header
// ============================================================================

pub fn format_header(scan: &ScanConfig) -> Vec<String> {
    vec![
        format!("Source: {}", scan.source_root.display()),
        format!("Destination: {}", scan.dest_root.display()),
        format!("Mode: {}", scan.mode),
        format!("Depth: {}", scan.max_depth),
    ]
}

pub fn print_header(scan: &ScanConfig) {
    for line in format_header(scan) {
        println!("{}", line);
    }
    println!();
}

// ============================================================================
// Per-file events
// ============================================================================

/// Format a single walk event for display.
pub fn format_walk_event(event: &WalkEvent) -> Vec<String> {
    match event {
        WalkEvent::Resized { index, file } => vec![format!(
            "{} {} → {}x{}",
            format_index(*index),
            file.relative.display(),
            file.width,
            file.height
        )],
        WalkEvent::Failed(failure) => vec![
            format!("FAILED {}", failure.relative.display()),
            format!("{}Source: {}", indent(1), failure.source.display()),
            format!("{}Destination: {}", indent(1), failure.dest.display()),
            format!("{}Reason: {}", indent(1), failure.reason),
        ],
    }
}

// ============================================================================
// Summary
// ============================================================================

pub fn format_summary(summary: &WalkSummary) -> Vec<String> {
    vec![format!(
        "Resized {}, skipped {}, failed {}",
        plural(summary.resized.len(), "file"),
        summary.skipped,
        summary.failures.len()
    )]
}

pub fn print_summary(summary: &WalkSummary) {
    println!();
    for line in format_summary(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
