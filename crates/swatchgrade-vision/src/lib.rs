//! # Swatchgrade Vision
//!
//! Design analysis (C3): turns a decoded RGBA raster into the
//! [`DesignFeatures`] record consumed by the raw evaluator and scoring
//! engine. One analysis pass per image, shared read-only across every
//! candidate background color evaluated against it.
//!
//! ## Architecture
//!
//! - **[`image`]**: decoded raster type and deterministic bilinear resampling
//! - **[`sobel`]**: edge magnitude and Gaussian low-pass smoothing
//! - **[`percentile`]**: sort-based percentile helper
//! - **[`features`]**: the `DesignFeatures` output record
//! - **[`analyzer`]**: the pipeline tying the above together
//!
//! ## Quick Start
//!
//! ```rust
//! use swatchgrade_vision::{analyze, PixelImage};
//!
//! let rgba = vec![255u8; 4 * 4 * 4];
//! let image = PixelImage::from_rgba8(4, 4, rgba).unwrap();
//! let features = analyze(&image, 8, 10_000);
//! assert_eq!(features.foreground_pixel_count, 16);
//! ```

#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms, unreachable_pub)]

pub mod analyzer;
pub mod features;
pub mod image;
pub mod percentile;
pub mod sobel;

pub use analyzer::analyze;
pub use features::DesignFeatures;
pub use image::PixelImage;
