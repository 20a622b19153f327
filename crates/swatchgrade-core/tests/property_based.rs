//! Property-based tests using proptest.
//!
//! Tests invariants that should hold for all possible inputs.

use proptest::prelude::*;

use swatchgrade_core::ciede2000::ciede2000;
use swatchgrade_core::color::Color;
use swatchgrade_core::lab::{circular_hue_distance, srgb_to_lab, Lab};
use swatchgrade_core::quantize::median_cut;

fn lab_strategy() -> impl Strategy<Value = Lab> {
    (0.0f64..=100.0, -128.0f64..=128.0, -128.0f64..=128.0).prop_map(|(l, a, b)| Lab::new(l, a, b))
}

proptest! {
    #[test]
    fn prop_ciede2000_is_never_negative(a in lab_strategy(), b in lab_strategy()) {
        prop_assert!(ciede2000(a, b) >= 0.0);
    }

    #[test]
    fn prop_ciede2000_is_zero_on_identical_inputs(a in lab_strategy()) {
        prop_assert_eq!(ciede2000(a, a), 0.0);
    }

    #[test]
    fn prop_ciede2000_is_symmetric(a in lab_strategy(), b in lab_strategy()) {
        prop_assert!((ciede2000(a, b) - ciede2000(b, a)).abs() < 1e-2);
    }

    #[test]
    fn prop_srgb_to_lab_stays_in_nominal_envelope(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
        let lab = srgb_to_lab(&Color::from_srgb8(r, g, b));
        prop_assert!((-0.5..=100.5).contains(&lab.l), "L*={}", lab.l);
        prop_assert!(lab.a.is_finite());
        prop_assert!(lab.b.is_finite());
    }

    #[test]
    fn prop_hex_roundtrip(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
        let color = Color::from_srgb8(r, g, b);
        let reparsed = Color::from_hex(&color.to_hex()).unwrap();
        prop_assert_eq!(reparsed.to_srgb8(), [r, g, b]);
    }

    #[test]
    fn prop_circular_hue_distance_is_bounded_and_symmetric(a in 0.0f64..360.0, b in 0.0f64..360.0) {
        let forward = circular_hue_distance(a, b);
        let backward = circular_hue_distance(b, a);
        prop_assert!((0.0..=180.0).contains(&forward));
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn prop_median_cut_weights_never_exceed_total(pixels in proptest::collection::vec((0u8..=255, 0u8..=255, 0u8..=255), 1..200)) {
        let rgb: Vec<[u8; 3]> = pixels.into_iter().map(|(r, g, b)| [r, g, b]).collect();
        let n = rgb.len();
        let clusters = median_cut(&rgb, 8, n);
        prop_assert!(clusters.len() <= 8);
        let total_weight: f64 = clusters.iter().map(|c| c.weight).sum();
        prop_assert!(total_weight <= 1.0 + 1e-9, "total_weight={total_weight}");
        for window in clusters.windows(2) {
            prop_assert!(window[0].weight >= window[1].weight);
        }
    }

    #[test]
    fn prop_median_cut_is_deterministic(pixels in proptest::collection::vec((0u8..=255, 0u8..=255, 0u8..=255), 1..200)) {
        let rgb: Vec<[u8; 3]> = pixels.into_iter().map(|(r, g, b)| [r, g, b]).collect();
        let n = rgb.len();
        let a = median_cut(&rgb, 8, n);
        let b = median_cut(&rgb, 8, n);
        prop_assert_eq!(a, b);
    }
}
