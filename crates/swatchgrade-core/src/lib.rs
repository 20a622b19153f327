//! # Swatchgrade Core
//!
//! Color math foundation for the swatchgrade background-scoring pipeline.
//!
//! ## Design Principles
//!
//! 1. **Deterministic** - no randomness, no reduction-order drift
//! 2. **Pure functions** - no process-wide mutable state
//! 3. **Explicit precision** - `f64` throughout, matching the rest of the pipeline
//!
//! ## Architecture
//!
//! - **[`color`]**: sRGB representation, gamma transfer functions, hex parsing
//! - **[`lab`]**: CIELAB (D65) color space and hue helpers
//! - **[`ciede2000`]**: CIEDE2000 perceptual color distance (Sharma 2005)
//! - **[`luminance`]**: relative luminance (WCAG / ITU-R BT.709)
//! - **[`quantize`]**: median-cut color quantization
//!
//! ## Quick Start
//!
//! ```rust
//! use swatchgrade_core::color::Color;
//! use swatchgrade_core::lab::srgb_to_lab;
//! use swatchgrade_core::ciede2000::ciede2000;
//!
//! let fg = Color::from_hex("#FFFFFF").unwrap();
//! let bg = Color::from_hex("#000000").unwrap();
//! let delta = ciede2000(srgb_to_lab(&fg), srgb_to_lab(&bg));
//! assert!(delta > 90.0);
//! ```

#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms, unreachable_pub)]

pub mod ciede2000;
pub mod color;
pub mod config;
pub mod error;
pub mod lab;
pub mod luminance;
pub mod quantize;

pub use color::Color;
pub use config::ScoringConfig;
pub use error::SwatchError;
pub use lab::Lab;
pub use luminance::RelativeLuminance;
pub use quantize::DominantColor;
