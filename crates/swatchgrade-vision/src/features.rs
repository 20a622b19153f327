//! The `DesignFeatures` record produced by the analyzer.

use swatchgrade_core::Lab;
use swatchgrade_core::DominantColor;

/// Sentinel value for legibility percentiles when the detector declines
/// (too few high-frequency pixels found).
pub const LEGIBILITY_SENTINEL: f64 = -1.0;

/// Immutable per-image feature record consumed by the raw evaluator and the
/// scoring engine. Produced once per image and shared read-only across all
/// candidate background evaluations.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignFeatures {
    /// Up to `K` dominant foreground color clusters, sorted by weight descending.
    pub dominant_colors: Vec<DominantColor>,
    /// Normalized 16-bin histogram of foreground relative luminance.
    pub luminance_histogram: [f64; 16],
    /// Mean foreground relative luminance, `[0, 1]`.
    pub mean_luminance: f64,
    /// Standard deviation of foreground relative luminance.
    pub luminance_spread: f64,
    /// Fraction of interior foreground pixels with Sobel magnitude > 0.1.
    pub edge_density: f64,
    /// Fraction of all pixels with alpha below the foreground threshold.
    pub transparency_ratio: f64,
    /// Sampled foreground Lab triples, at most `MAX_SAMPLES` entries.
    pub foreground_pixels_lab: Vec<Lab>,
    /// Mean L* over all foreground pixels, `[0, 100]`.
    pub foreground_mean_l: f64,
    /// 75th-percentile chroma over all foreground pixels.
    pub foreground_p75_chroma: f64,
    /// Fraction of foreground pixels with L* > 70 and chroma < 30.
    pub near_white_ratio: f64,
    /// Fraction of foreground pixels with L* < 15 and chroma < 30.
    pub near_black_ratio: f64,
    /// Count of foreground pixels in the downsampled grid.
    pub foreground_pixel_count: usize,
    /// Total pixel count of the downsampled grid (`W' * H'`).
    pub total_pixel_count: usize,
    /// 25th percentile luminance over probable-text pixels, or [`LEGIBILITY_SENTINEL`].
    pub legibility_p25: f64,
    /// 50th percentile luminance over probable-text pixels, or [`LEGIBILITY_SENTINEL`].
    pub legibility_p50: f64,
    /// 75th percentile luminance over probable-text pixels, or [`LEGIBILITY_SENTINEL`].
    pub legibility_p75: f64,
    /// Fraction of the legibility-pass grid classified as high-frequency text-like.
    pub legibility_area_ratio: f64,
    /// Among edge pixels, fraction whose 3x3 neighborhood touches both a
    /// near-white and a near-black pixel.
    pub white_black_edge_ratio: f64,
    /// Set when `foreground_pixel_count == 0`: every foreground-derived
    /// field above is a zero/sentinel placeholder, not a measurement.
    pub degenerate: bool,
}

impl DesignFeatures {
    /// The well-formed all-zero/sentinel record for a foreground-free image.
    #[must_use]
    pub fn degenerate(total_pixel_count: usize, transparency_ratio: f64) -> Self {
        Self {
            dominant_colors: Vec::new(),
            luminance_histogram: [0.0; 16],
            mean_luminance: 0.0,
            luminance_spread: 0.0,
            edge_density: 0.0,
            transparency_ratio,
            foreground_pixels_lab: Vec::new(),
            foreground_mean_l: 0.0,
            foreground_p75_chroma: 0.0,
            near_white_ratio: 0.0,
            near_black_ratio: 0.0,
            foreground_pixel_count: 0,
            total_pixel_count,
            legibility_p25: LEGIBILITY_SENTINEL,
            legibility_p50: LEGIBILITY_SENTINEL,
            legibility_p75: LEGIBILITY_SENTINEL,
            legibility_area_ratio: 0.0,
            white_black_edge_ratio: 0.0,
            degenerate: true,
        }
    }
}
