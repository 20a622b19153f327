//! # Swatchgrade Eval
//!
//! Per-background physics scoring (C4): given a design's
//! [`DesignFeatures`](swatchgrade_vision::DesignFeatures) and one candidate
//! background hex, produces a [`RawScore`] — CIEDE2000 cluster and pixel
//! deltas, a design-fragility curve, and tonal/vibration penalties. No
//! aesthetic or commercial layer; that belongs to the scoring engine.
//!
//! ## Quick Start
//!
//! ```rust
//! use swatchgrade_core::ScoringConfig;
//! use swatchgrade_vision::{analyze, PixelImage};
//! use swatchgrade_eval::evaluate;
//!
//! let rgba = vec![255u8; 4 * 4 * 4];
//! let image = PixelImage::from_rgba8(4, 4, rgba).unwrap();
//! let config = ScoringConfig::default();
//! let features = analyze(&image, config.dominant_colors_k, config.max_samples);
//! let score = evaluate(&features, "#000000", &config).unwrap();
//! assert!(score.net_raw() > 0.0);
//! ```

#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms, unreachable_pub)]

mod quickselect;
mod raw_score;

pub use raw_score::{evaluate, RawScore};
