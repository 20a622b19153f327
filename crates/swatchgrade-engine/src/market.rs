//! Background-intrinsic commercial bias, independent of any design.

use swatchgrade_core::Lab;

const NEUTRAL_CHROMA_SIGMA: f64 = 20.0;
const MID_LIGHTNESS_CENTER: f64 = 55.0;
const MID_LIGHTNESS_SIGMA: f64 = 25.0;
const VIBRANCY_PENALTY_SCALE: f64 = 0.5;
const VIBRANCY_CHROMA_CEILING: f64 = 50.0;
const RED_HUE_DEGREES: f64 = 20.0;
const RED_PROTECTION_SIGMA: f64 = 30.0;
const COOL_HUE_RANGE: (f64, f64) = (200.0, 260.0);
const COOL_HUE_BONUS: f64 = 0.3;
const WARM_HUE_RANGE: (f64, f64) = (30.0, 70.0);
const WARM_HUE_BONUS: f64 = 0.2;
const MAGENTA_HUE_RANGE: (f64, f64) = (300.0, 340.0);
const MAGENTA_HUE_PENALTY: f64 = -0.2;
const VERSATILITY_WEIGHT: f64 = 0.3;
const CENTERING_OFFSET: f64 = -0.35;
const CLAMP_RANGE: f64 = 2.0;
const CALLER_SCALE: f64 = 2.0;

/// Background-intrinsic commercial bias formula, clamped to `[-2, 2]` and
/// scaled by 2 for the caller. Depends only on `bg_lab`; no design
/// knowledge is consulted.
#[must_use]
pub(crate) fn market_bonus(bg_lab: Lab) -> f64 {
    use swatchgrade_core::lab::circular_hue_distance;

    let chroma = bg_lab.chroma();
    let hue = bg_lab.hue_degrees();

    let neutral_chroma_gaussian = (-(chroma / NEUTRAL_CHROMA_SIGMA).powi(2)).exp();
    let mid_l_gaussian = (-((bg_lab.l - MID_LIGHTNESS_CENTER) / MID_LIGHTNESS_SIGMA).powi(2)).exp();

    let red_protection = (-(circular_hue_distance(hue, RED_HUE_DEGREES) / RED_PROTECTION_SIGMA).powi(2)).exp();
    let vibrancy_penalty =
        -VIBRANCY_PENALTY_SCALE * (chroma / VIBRANCY_CHROMA_CEILING).min(1.0) * (1.0 - red_protection);

    let hue_band_bonus = if in_range(hue, COOL_HUE_RANGE) {
        COOL_HUE_BONUS
    } else if in_range(hue, WARM_HUE_RANGE) {
        WARM_HUE_BONUS
    } else if in_range(hue, MAGENTA_HUE_RANGE) {
        MAGENTA_HUE_PENALTY
    } else {
        0.0
    };

    let versatility = VERSATILITY_WEIGHT * (1.0 - ((bg_lab.l - 50.0).abs() / 50.0).min(1.0));

    let raw = 0.5 * neutral_chroma_gaussian
        + 0.5 * mid_l_gaussian
        + vibrancy_penalty
        + hue_band_bonus
        + versatility
        + CENTERING_OFFSET;

    raw.clamp(-CLAMP_RANGE, CLAMP_RANGE) * CALLER_SCALE
}

fn in_range(value: f64, (lo, hi): (f64, f64)) -> bool {
    value >= lo && value <= hi
}
