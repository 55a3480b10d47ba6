//! Image processing — pure Rust.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::ImageReader::into_dimensions` |
//! | **Resize → JPEG** | `resize_exact` + `JpegEncoder` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{
    MAX_JPEG_SIDE, MAX_OUTPUT_PIXELS, calculate_fit_dimensions, calculate_scaled_dimensions,
    calculate_target_dimensions, within_output_limits,
};
pub use operations::{get_dimensions, plan_resize, resize_file};
pub use params::{Filter, Quality, ResizeOptions, ResizeParams};
pub use rust_backend::RustBackend;
