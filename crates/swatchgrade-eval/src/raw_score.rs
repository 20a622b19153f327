//! RawScore: the physics-only per-background evaluation (C4).

use log::trace;

use swatchgrade_core::ciede2000::ciede2000;
use swatchgrade_core::color::Color;
use swatchgrade_core::lab::{circular_hue_distance, srgb_to_lab};
use swatchgrade_core::{Lab, ScoringConfig, SwatchError};
use swatchgrade_vision::DesignFeatures;

use crate::quickselect::select_nth;

const TONAL_PENALTY: f64 = -8.0;
const TONAL_HUE_TRIGGER: f64 = 15.0;
const TONAL_DELTA_TRIGGER: f64 = 25.0;
const VIBRATION_PENALTY: f64 = -5.0;
const VIBRATION_HUE_LOW: f64 = 160.0;
const VIBRATION_HUE_HIGH: f64 = 200.0;
const VIBRATION_LUMINANCE_TOLERANCE: f64 = 30.0;
const VIBRATION_CHROMA_FLOOR: f64 = 15.0;
const COVERAGE_DAMPENING_THRESHOLD: f64 = 0.15;
const COVERAGE_DAMPENING_FACTOR: f64 = 0.85;
const FRAGILITY_EXPONENT: f64 = 2.2;
const FRAGILITY_BOOST_SCALE: f64 = 0.6;
const FRAGILITY_BOOST_CAP: f64 = 1.6;
const SMALL_SAMPLE_FLOOR: f64 = 200.0;
const TONAL_CHROMA_FLOOR: f64 = 5.0;

/// Physics-only contrast evaluation of one background color against one
/// design's [`DesignFeatures`]. Pure: no distribution-aware adjustment.
#[derive(Debug, Clone, PartialEq)]
pub struct RawScore {
    /// Composite contrast energy before any aesthetic layer.
    pub raw_contrast: f64,
    /// 10th-percentile CIEDE2000 delta over sampled foreground pixels.
    pub p10_delta_e: f64,
    /// Minimum CIEDE2000 delta over dominant clusters.
    pub min_cluster_delta_e: f64,
    /// Coverage-weighted mean CIEDE2000 delta over dominant clusters.
    pub weighted_mean_delta_e: f64,
    /// `(1 - design_resistance)^2.2`, in `[0, 1]`.
    pub fragility: f64,
    /// Non-positive penalty for near-hue, weak-contrast pairings.
    pub tonal_penalty: f64,
    /// Non-positive penalty for near-complementary vibration pairings.
    pub vibration_penalty: f64,
    /// Cached CIELAB of the evaluated background.
    pub bg_lab: Lab,
    /// Smallest circular hue distance (degrees) between the background and
    /// any dominant cluster. `180.0` when the design has no dominants.
    /// Cached here so the scoring engine's harmony pass need not recompute
    /// cluster deltas.
    pub min_hue_dist: f64,
}

impl RawScore {
    /// `raw_contrast + tonal_penalty + vibration_penalty`.
    #[must_use]
    pub fn net_raw(&self) -> f64 {
        self.raw_contrast + self.tonal_penalty + self.vibration_penalty
    }
}

/// Evaluates one background hex against a design's features.
///
/// # Errors
///
/// Returns [`SwatchError::InvalidHex`] if `hex` does not parse.
pub fn evaluate(features: &DesignFeatures, hex: &str, config: &ScoringConfig) -> Result<RawScore, SwatchError> {
    let bg_color = Color::from_hex(hex)?;
    let bg_lab = srgb_to_lab(&bg_color);
    let bg_chroma = bg_lab.chroma();
    let bg_hue = bg_lab.hue_degrees();

    let (min_cluster_delta_e, weighted_mean_delta_e, min_hue_dist, min_hue_dist_chroma) =
        cluster_deltas(features, bg_lab, bg_hue);
    let p10_delta_e = p10_pixel_delta(features, bg_lab, min_cluster_delta_e);

    let r_darkness = 1.0 - features.near_white_ratio;
    let r_structure = features.edge_density;
    let r_solidity = 1.0 - features.transparency_ratio;
    let resistance = (0.55 * r_darkness + 0.15 * r_structure + 0.30 * r_solidity).clamp(0.0, 1.0);
    let fragility = (1.0 - resistance).powf(FRAGILITY_EXPONENT);
    let fragility_boost = (1.0 + FRAGILITY_BOOST_SCALE * fragility).min(FRAGILITY_BOOST_CAP);

    let mut raw_contrast =
        0.45 * weighted_mean_delta_e + 0.30 * p10_delta_e * fragility_boost + 0.20 * min_cluster_delta_e;

    if features.total_pixel_count > 0 {
        let coverage = features.foreground_pixel_count as f64 / features.total_pixel_count as f64;
        if coverage < COVERAGE_DAMPENING_THRESHOLD {
            raw_contrast *= COVERAGE_DAMPENING_FACTOR;
        }
    }

    let tonal_trigger_floor = config.tail_veto_floor * config.tonal_trigger_ratio;
    let tonal_penalty = if !features.dominant_colors.is_empty()
        && bg_chroma > TONAL_CHROMA_FLOOR
        && min_hue_dist_chroma > TONAL_CHROMA_FLOOR
        && min_hue_dist < TONAL_HUE_TRIGGER
        && min_cluster_delta_e < TONAL_DELTA_TRIGGER
        && p10_delta_e < tonal_trigger_floor
    {
        // Hue is undefined noise for near-neutral pairs; require both sides
        // to carry meaningful chroma before treating hue proximity as a clash.
        TONAL_PENALTY
    } else {
        0.0
    };

    let vibration_penalty = if !features.dominant_colors.is_empty()
        && (VIBRATION_HUE_LOW..=VIBRATION_HUE_HIGH).contains(&min_hue_dist)
        && (bg_lab.l - features.foreground_mean_l).abs() < VIBRATION_LUMINANCE_TOLERANCE
        && bg_chroma > config.vibration_chroma_ratio * features.foreground_p75_chroma
        && features.foreground_p75_chroma > VIBRATION_CHROMA_FLOOR
    {
        VIBRATION_PENALTY
    } else {
        0.0
    };

    trace!(
        "raw_contrast={raw_contrast:.3} p10={p10_delta_e:.3} min_cluster={min_cluster_delta_e:.3} tonal={tonal_penalty} vibration={vibration_penalty}"
    );

    Ok(RawScore {
        raw_contrast,
        p10_delta_e,
        min_cluster_delta_e,
        weighted_mean_delta_e,
        fragility,
        tonal_penalty,
        vibration_penalty,
        bg_lab,
        min_hue_dist,
    })
}

/// Returns `(min_cluster_delta_e, weighted_mean_delta_e, min_hue_dist, min_hue_dist_chroma)`,
/// where the last element is the chroma of whichever dominant achieved `min_hue_dist`.
fn cluster_deltas(features: &DesignFeatures, bg_lab: Lab, bg_hue: f64) -> (f64, f64, f64, f64) {
    if features.dominant_colors.is_empty() {
        return (0.0, 0.0, 180.0, 0.0);
    }

    let mut min_delta = f64::INFINITY;
    let mut min_hue_dist = f64::INFINITY;
    let mut min_hue_dist_chroma = 0.0;
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;

    for cluster in &features.dominant_colors {
        let delta = ciede2000(cluster.lab, bg_lab);
        if delta < min_delta {
            min_delta = delta;
        }
        let hue_dist = circular_hue_distance(bg_hue, cluster.lab.hue_degrees());
        if hue_dist < min_hue_dist {
            min_hue_dist = hue_dist;
            min_hue_dist_chroma = cluster.lab.chroma();
        }
        weighted_sum += cluster.weight * delta;
        weight_total += cluster.weight;
    }

    let weighted_mean = if weight_total > 0.0 { weighted_sum / weight_total } else { 0.0 };
    (min_delta, weighted_mean, min_hue_dist, min_hue_dist_chroma)
}

fn p10_pixel_delta(features: &DesignFeatures, bg_lab: Lab, min_cluster_delta_e: f64) -> f64 {
    let sample = &features.foreground_pixels_lab;
    if sample.is_empty() {
        return min_cluster_delta_e;
    }

    let mut deltas: Vec<f64> = sample.iter().map(|lab| ciede2000(*lab, bg_lab)).collect();
    let m = deltas.len();
    let k = ((0.10 * m as f64).floor() as usize).min(m - 1);
    let p10_raw = select_nth(&mut deltas, k);

    if (m as f64) < SMALL_SAMPLE_FLOOR {
        let blend = m as f64 / SMALL_SAMPLE_FLOOR;
        blend * p10_raw + (1.0 - blend) * min_cluster_delta_e
    } else {
        p10_raw
    }
}
