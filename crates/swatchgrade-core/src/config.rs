//! Tunable constants and catalog overrides for the scoring pipeline.

use std::collections::BTreeMap;

/// All tunable constants recognized by the scoring pipeline, plus optional
/// per-hex market-bonus overrides.
///
/// A plain data record, not a builder: construct via
/// [`ScoringConfig::default`] and mutate fields directly. `BTreeMap` keeps
/// catalog iteration order deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    /// `final_score` threshold for PROMOTED.
    pub good_floor: f64,
    /// `final_score` threshold for PASSED.
    pub borderline_floor: f64,
    /// Minimum P10 ΔE to be considered "tail strong".
    pub tail_veto_floor: f64,
    /// Multiplier on `tail_veto_floor` for the tonal-penalty trigger.
    pub tonal_trigger_ratio: f64,
    /// Background chroma threshold as a multiple of foreground P75 chroma.
    pub vibration_chroma_ratio: f64,
    /// Magnitude scale of the flatness dampener.
    pub flatness_penalty_scale: f64,
    /// Width (degrees) of the hue-harmony gaussian.
    pub harmony_sigma: f64,
    /// Reference raw-score standard deviation used for budget derivation.
    pub raw_baseline_std: f64,
    /// Lower clamp on the aesthetic influence ratio.
    pub aesthetic_influence_min: f64,
    /// Upper clamp on the aesthetic influence ratio.
    pub aesthetic_influence_max: f64,
    /// `final_std` must stay within `std_raw * this` after the retry loop.
    pub per_design_variance_guard: f64,
    /// Maximum absolute drift in promotion rate tolerated by the retry loop.
    pub promotion_drift_guard: f64,
    /// Cap on the size of the sampled foreground Lab array.
    pub max_samples: usize,
    /// Median-cut target bucket count.
    pub dominant_colors_k: usize,
    /// Opaque version tag surfaced in reports.
    pub scoring_model_version: &'static str,
    /// Per-hex market-bonus overrides; supersede the formula when present.
    pub catalog_overrides: BTreeMap<String, f64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            good_floor: 34.0,
            borderline_floor: 26.0,
            tail_veto_floor: 8.0,
            tonal_trigger_ratio: 1.8,
            vibration_chroma_ratio: 1.2,
            flatness_penalty_scale: 1.5,
            harmony_sigma: 25.0,
            raw_baseline_std: 7.42,
            aesthetic_influence_min: 1.15,
            aesthetic_influence_max: 1.30,
            per_design_variance_guard: 1.4,
            promotion_drift_guard: 0.05,
            max_samples: 10_000,
            dominant_colors_k: 8,
            scoring_model_version: "3.0",
            catalog_overrides: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_recognized_constants() {
        let config = ScoringConfig::default();
        assert_eq!(config.good_floor, 34.0);
        assert_eq!(config.tail_veto_floor, 8.0);
        assert_eq!(config.max_samples, 10_000);
        assert!(config.catalog_overrides.is_empty());
    }
}
