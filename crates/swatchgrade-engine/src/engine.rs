//! ScoringEngine (C5): orchestrates analysis, raw evaluation, distribution
//! statistics, reward budgeting, and the bounded aesthetic retry loop.

use log::{debug, warn};

use swatchgrade_core::{ScoringConfig, SwatchError};
use swatchgrade_eval::{evaluate, RawScore};
use swatchgrade_vision::{analyze, DesignFeatures, PixelImage};

use crate::market::market_bonus;
use crate::result::{EvaluationMap, EvaluationResult, Suitability};

const MAX_RETRIES: u32 = 3;
const EVALUATE_ONE_DEFAULT_BUDGET: f64 = 6.0;
const HARMONY_REWARD_SCALE: f64 = 4.0;
const HARMONY_CONTRAST_CEILING: f64 = 60.0;
const OUTLINE_BOOST_CAP: f64 = 3.5;
const OUTLINE_BOOST_SCALE: f64 = 10.0;
const NEAR_BLACK_BG_L: f64 = 15.0;
const FLATNESS_CHROMA_SIGMA: f64 = 12.0;
const FLATNESS_LIGHTNESS_CENTER: f64 = 60.0;
const FLATNESS_LIGHTNESS_SIGMA: f64 = 30.0;
const FLATNESS_P10_CEILING: f64 = 50.0;
const DOUBLE_COUNT_HARMONY_THRESHOLD: f64 = 2.0;
const DOUBLE_COUNT_MARKET_SCALE: f64 = 0.5;
const RETRY_SCALE_CAP: f64 = 0.9;
const DRIFT_RETRY_SCALE: f64 = 0.9;

/// Scores `candidate_hexes` against `features` using the default
/// [`ScoringConfig`].
///
/// # Errors
///
/// Returns [`SwatchError::InvalidHex`] on the first unparseable candidate.
pub fn score(features: &DesignFeatures, candidate_hexes: &[String]) -> Result<EvaluationMap, SwatchError> {
    score_with_config(features, candidate_hexes, &ScoringConfig::default())
}

/// As [`score`], with an explicit [`ScoringConfig`].
///
/// # Errors
///
/// Returns [`SwatchError::InvalidHex`] on the first unparseable candidate.
pub fn score_with_config(
    features: &DesignFeatures,
    candidate_hexes: &[String],
    config: &ScoringConfig,
) -> Result<EvaluationMap, SwatchError> {
    if candidate_hexes.is_empty() {
        return Ok(EvaluationMap::new(Vec::new()));
    }

    if features.degenerate {
        let results = candidate_hexes
            .iter()
            .map(|hex| (hex.clone(), EvaluationResult::degenerate(hex.clone())))
            .collect();
        return Ok(EvaluationMap::new(results));
    }

    let raw_scores: Vec<RawScore> = candidate_hexes
        .iter()
        .map(|hex| evaluate(features, hex, config))
        .collect::<Result<_, _>>()?;

    let net_raws: Vec<f64> = raw_scores.iter().map(RawScore::net_raw).collect();
    let n = net_raws.len() as f64;
    let mean_raw = mean(&net_raws);
    let std_raw = population_stddev(&net_raws, mean_raw);
    let raw_promotion_rate = net_raws.iter().filter(|&&v| v >= config.good_floor).count() as f64 / n;

    let effective_std = std_raw.max(config.raw_baseline_std * 0.7);
    let target_std = config.raw_baseline_std * 1.20;
    let influence_ratio =
        (target_std / effective_std).clamp(config.aesthetic_influence_min, config.aesthetic_influence_max);
    let reward_budget = std_raw * influence_ratio;

    let mut aesthetic_scale = 1.0;
    let mut results: Vec<EvaluationResult> = Vec::new();

    for attempt in 0..=MAX_RETRIES {
        results = candidate_hexes
            .iter()
            .zip(&raw_scores)
            .map(|(hex, raw)| finalize_one(hex.clone(), raw, features, config, reward_budget, aesthetic_scale))
            .collect();

        let finals: Vec<f64> = results.iter().map(|r| r.final_score).collect();
        let final_mean = mean(&finals);
        let final_std = population_stddev(&finals, final_mean);
        let final_promotion_rate =
            results.iter().filter(|r| r.suitability == Suitability::Promoted).count() as f64 / n;

        if attempt == MAX_RETRIES {
            break;
        }

        if final_std > std_raw * config.per_design_variance_guard {
            let correction = (std_raw * config.per_design_variance_guard) / final_std;
            aesthetic_scale *= correction.min(RETRY_SCALE_CAP);
            debug!("retry {attempt}: variance guard breached (final_std={final_std:.3}), scale={aesthetic_scale:.3}");
        } else if (final_promotion_rate - raw_promotion_rate).abs() > config.promotion_drift_guard {
            aesthetic_scale *= DRIFT_RETRY_SCALE;
            debug!("retry {attempt}: promotion drift breached (rate={final_promotion_rate:.3}), scale={aesthetic_scale:.3}");
        } else {
            break;
        }
    }

    Ok(EvaluationMap::new(
        candidate_hexes.iter().cloned().zip(results).collect(),
    ))
}

/// Runs analysis (C3) then [`score`].
///
/// # Errors
///
/// Returns [`SwatchError`] from either analysis input validation or scoring.
pub fn score_image(image: &PixelImage, candidate_hexes: &[String]) -> Result<EvaluationMap, SwatchError> {
    score_image_with_config(image, candidate_hexes, &ScoringConfig::default())
}

/// As [`score_image`], with an explicit [`ScoringConfig`].
///
/// # Errors
///
/// Returns [`SwatchError`] from either analysis input validation or scoring.
pub fn score_image_with_config(
    image: &PixelImage,
    candidate_hexes: &[String],
    config: &ScoringConfig,
) -> Result<EvaluationMap, SwatchError> {
    let features = analyze(image, config.dominant_colors_k, config.max_samples);
    score_with_config(&features, candidate_hexes, config)
}

/// Single-candidate evaluation for testing: `aesthetic_scale = 1.0` and a
/// default `reward_budget = 6.0`, since no candidate distribution exists to
/// derive one from.
///
/// # Errors
///
/// Returns [`SwatchError::InvalidHex`] if `hex` does not parse.
pub fn evaluate_one(features: &DesignFeatures, hex: &str) -> Result<EvaluationResult, SwatchError> {
    evaluate_one_with_config(features, hex, &ScoringConfig::default())
}

/// As [`evaluate_one`], with an explicit [`ScoringConfig`].
///
/// # Errors
///
/// Returns [`SwatchError::InvalidHex`] if `hex` does not parse.
pub fn evaluate_one_with_config(
    features: &DesignFeatures,
    hex: &str,
    config: &ScoringConfig,
) -> Result<EvaluationResult, SwatchError> {
    if features.degenerate {
        return Ok(EvaluationResult::degenerate(hex.to_string()));
    }
    let raw = evaluate(features, hex, config)?;
    Ok(finalize_one(hex.to_string(), &raw, features, config, EVALUATE_ONE_DEFAULT_BUDGET, 1.0))
}

fn finalize_one(
    hex: String,
    raw: &RawScore,
    features: &DesignFeatures,
    config: &ScoringConfig,
    reward_budget: f64,
    aesthetic_scale: f64,
) -> EvaluationResult {
    let bg_lab = raw.bg_lab;
    let net_raw = raw.net_raw();

    let mut harmony_reward = if raw.tonal_penalty == 0.0 && raw.vibration_penalty == 0.0 {
        let hue_factor = (-(raw.min_hue_dist / config.harmony_sigma).powi(2)).exp();
        let contrast_confidence = (raw.raw_contrast / HARMONY_CONTRAST_CEILING).min(1.0);
        HARMONY_REWARD_SCALE * hue_factor * contrast_confidence
    } else {
        0.0
    };

    let mut outline_boost = if bg_lab.l < NEAR_BLACK_BG_L {
        (OUTLINE_BOOST_SCALE * features.white_black_edge_ratio).min(OUTLINE_BOOST_CAP)
    } else {
        0.0
    };

    let chroma_risk = (-(bg_lab.chroma() / FLATNESS_CHROMA_SIGMA).powi(2)).exp();
    let l_risk = (-((bg_lab.l - FLATNESS_LIGHTNESS_CENTER) / FLATNESS_LIGHTNESS_SIGMA).powi(2)).exp();
    let flatness_risk = chroma_risk * l_risk;
    let norm_p10 = (raw.p10_delta_e / FLATNESS_P10_CEILING).min(1.0);
    let flatness_dampener = -config.flatness_penalty_scale * flatness_risk * (1.0 - norm_p10);

    let mut market = config
        .catalog_overrides
        .get(&hex)
        .copied()
        .unwrap_or_else(|| market_bonus(bg_lab));

    if harmony_reward > DOUBLE_COUNT_HARMONY_THRESHOLD {
        market *= DOUBLE_COUNT_MARKET_SCALE;
        warn!("double-counting guard fired for {hex}: harmony_reward={harmony_reward:.3}");
    }

    let positives = harmony_reward + outline_boost + market.max(0.0);
    if positives > reward_budget {
        let scale = reward_budget / positives;
        harmony_reward *= scale;
        outline_boost *= scale;
        if market > 0.0 {
            market *= scale;
        }
        debug!("positive cap fired for {hex}: positives={positives:.3} > budget={reward_budget:.3}");
    }

    let aesthetic_total = (harmony_reward + outline_boost + flatness_dampener) * aesthetic_scale;
    let final_score = (net_raw + aesthetic_total + market).clamp(0.0, 100.0);

    let tail_strong = raw.p10_delta_e >= config.tail_veto_floor;
    let suitability = if final_score >= config.good_floor {
        if tail_strong { Suitability::Promoted } else { Suitability::Passed }
    } else if final_score >= config.borderline_floor {
        if tail_strong { Suitability::Passed } else { Suitability::Rejected }
    } else {
        Suitability::Rejected
    };

    EvaluationResult {
        hex,
        p10_delta_e: raw.p10_delta_e,
        min_cluster_delta_e: raw.min_cluster_delta_e,
        raw_score: net_raw,
        aesthetic_total,
        market_bonus: market,
        final_score,
        suitability,
        override_reason: None,
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sum = 0.0;
    for &v in values {
        sum += v;
    }
    sum / values.len() as f64
}

fn population_stddev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sum_sq = 0.0;
    for &v in values {
        let d = v - mean;
        sum_sq += d * d;
    }
    (sum_sq / values.len() as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use swatchgrade_vision::PixelImage;

    fn solid_image(r: u8, g: u8, b: u8, size: u32) -> PixelImage {
        let mut rgba = Vec::with_capacity(size as usize * size as usize * 4);
        for _ in 0..(size * size) {
            rgba.extend_from_slice(&[r, g, b, 255]);
        }
        PixelImage::from_rgba8(size, size, rgba).unwrap()
    }

    #[test]
    fn empty_candidate_list_yields_empty_map() {
        let image = solid_image(0, 0, 0, 50);
        let results = score_image(&image, &[]).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn invalid_hex_propagates_error() {
        let image = solid_image(0, 0, 0, 50);
        let hexes = vec!["not-a-hex".to_string()];
        assert!(score_image(&image, &hexes).is_err());
    }

    #[test]
    fn determinism_across_repeated_runs() {
        let image = solid_image(200, 30, 30, 200);
        let hexes = vec!["#FFFFFF".to_string(), "#000000".to_string(), "#E74C3C".to_string()];
        let first = score_image(&image, &hexes).unwrap();
        let second = score_image(&image, &hexes).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn final_score_always_in_bounds() {
        let image = solid_image(120, 80, 200, 200);
        let hexes: Vec<String> = (0u32..16)
            .map(|i| format!("#{:02X}{:02X}{:02X}", (i * 16) % 256, (i * 37) % 256, (i * 53) % 256))
            .collect();
        let results = score_image(&image, &hexes).unwrap();
        for (_, result) in results.iter() {
            assert!((0.0..=100.0).contains(&result.final_score), "final={}", result.final_score);
        }
    }
}
