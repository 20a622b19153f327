//! # Swatchgrade Engine
//!
//! Orchestrates the full background-scoring pipeline (C5): one design
//! analysis, N raw physics evaluations, distribution-aware reward
//! budgeting, and a bounded retry loop applying harmony, outline, flatness,
//! and market-bias layers on top of the physics score.
//!
//! ## Architecture
//!
//! - **[`result`]**: `EvaluationResult`, `Suitability`, the ordered result map
//! - **[`market`]**: background-intrinsic commercial bias, independent of design
//! - **[`engine`]**: the public entry points and the retry loop
//!
//! ## Quick Start
//!
//! ```rust
//! use swatchgrade_engine::score_image;
//! use swatchgrade_vision::PixelImage;
//!
//! let rgba = vec![255u8; 200 * 200 * 4];
//! let image = PixelImage::from_rgba8(200, 200, rgba).unwrap();
//! let hexes = vec!["#000000".to_string(), "#FFFFFF".to_string()];
//! let results = score_image(&image, &hexes).unwrap();
//! assert_eq!(results.len(), 2);
//! ```

#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms, unreachable_pub)]

mod engine;
mod market;
mod result;

pub use engine::{evaluate_one, evaluate_one_with_config, score, score_image, score_image_with_config, score_with_config};
pub use result::{EvaluationMap, EvaluationResult, Suitability};
