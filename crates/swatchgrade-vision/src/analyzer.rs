//! Design analysis pipeline (C3): one-shot per-image feature extraction.

use log::trace;

use swatchgrade_core::color::Color;
use swatchgrade_core::lab::srgb_to_lab;
use swatchgrade_core::luminance::relative_luminance_srgb;
use swatchgrade_core::quantize::median_cut;
use swatchgrade_core::Lab;

use crate::features::{DesignFeatures, LEGIBILITY_SENTINEL};
use crate::image::{fit_dimensions, resize_bilinear, PixelImage};
use crate::percentile::percentile;
use crate::sobel::{gaussian_blur_5x5, sobel_magnitude};

const DOWNSAMPLE_MAX: u32 = 256;
const LEGIBILITY_MAX: u32 = 1024;
const FOREGROUND_ALPHA_THRESHOLD: u8 = 128;
const NEAR_WHITE_L: f64 = 70.0;
const NEAR_BLACK_L: f64 = 15.0;
const NEAR_NEUTRAL_CHROMA: f64 = 30.0;
const HISTOGRAM_BINS: usize = 16;
const EDGE_MAGNITUDE_THRESHOLD: f64 = 0.1;

/// Runs the full design-analysis pipeline (C3) over a decoded image.
///
/// Uses the median-cut quantizer (C2) and color math (C1). `max_samples`
/// bounds the size of the returned `foreground_pixels_lab` sample (see
/// [`ScoringConfig::max_samples`](swatchgrade_core::ScoringConfig::max_samples)).
/// Determinism is load-bearing: identical input bytes must yield a
/// bit-identical `DesignFeatures`.
#[must_use]
pub fn analyze(image: &PixelImage, k: usize, max_samples: usize) -> DesignFeatures {
    let (dw, dh) = fit_dimensions(image.width, image.height, DOWNSAMPLE_MAX);
    let grid = resize_bilinear(image, dw, dh);
    let width = grid.width as usize;
    let height = grid.height as usize;
    let total_pixel_count = width * height;

    let mut luminance = vec![0.0f64; total_pixel_count];
    let mut lab = vec![Lab::new(0.0, 0.0, 0.0); total_pixel_count];
    let mut is_foreground = vec![false; total_pixel_count];
    let mut near_white = vec![false; total_pixel_count];
    let mut near_black = vec![false; total_pixel_count];

    let mut transparent_count = 0usize;
    let mut foreground_count = 0usize;
    let mut sum_luminance = 0.0f64;
    let mut sum_l = 0.0f64;
    let mut histogram = [0.0f64; HISTOGRAM_BINS];
    let mut near_white_count = 0usize;
    let mut near_black_count = 0usize;
    let mut chromas: Vec<f64> = Vec::new();
    let mut foreground_pixels_rgb: Vec<[u8; 3]> = Vec::new();

    for y in 0..grid.height {
        for x in 0..grid.width {
            let idx = y as usize * width + x as usize;
            let px = grid.pixel(x, y);
            let foreground = px[3] >= FOREGROUND_ALPHA_THRESHOLD;
            if !foreground {
                transparent_count += 1;
                continue;
            }
            let color = Color::from_srgb8(px[0], px[1], px[2]);
            let y_lum = relative_luminance_srgb(&color).value();
            let pixel_lab = srgb_to_lab(&color);
            let chroma = pixel_lab.chroma();

            luminance[idx] = y_lum;
            lab[idx] = pixel_lab;
            is_foreground[idx] = true;

            let nw = pixel_lab.l > NEAR_WHITE_L && chroma < NEAR_NEUTRAL_CHROMA;
            let nb = pixel_lab.l < NEAR_BLACK_L && chroma < NEAR_NEUTRAL_CHROMA;
            near_white[idx] = nw;
            near_black[idx] = nb;

            foreground_count += 1;
            sum_luminance += y_lum;
            sum_l += pixel_lab.l;
            if nw {
                near_white_count += 1;
            }
            if nb {
                near_black_count += 1;
            }
            let bin = ((y_lum * HISTOGRAM_BINS as f64) as usize).min(HISTOGRAM_BINS - 1);
            histogram[bin] += 1.0;
            chromas.push(chroma);
            foreground_pixels_rgb.push([px[0], px[1], px[2]]);
        }
    }

    let transparency_ratio = transparent_count as f64 / total_pixel_count as f64;

    if foreground_count == 0 {
        trace!("degenerate design: no foreground pixels ({dw}x{dh}, transparency_ratio={transparency_ratio:.3})");
        return DesignFeatures::degenerate(total_pixel_count, transparency_ratio);
    }

    for bin in &mut histogram {
        *bin /= foreground_count as f64;
    }

    let mean_luminance = sum_luminance / foreground_count as f64;
    let variance = {
        let mut acc = 0.0;
        for y in 0..grid.height {
            for x in 0..grid.width {
                let idx = y as usize * width + x as usize;
                if is_foreground[idx] {
                    let d = luminance[idx] - mean_luminance;
                    acc += d * d;
                }
            }
        }
        acc / foreground_count as f64
    };
    let luminance_spread = variance.sqrt();
    let foreground_mean_l = sum_l / foreground_count as f64;
    let foreground_p75_chroma = percentile(&chromas, 0.75);
    let near_white_ratio = near_white_count as f64 / foreground_count as f64;
    let near_black_ratio = near_black_count as f64 / foreground_count as f64;

    let (edges, interior, wb_edges) = edge_statistics(&luminance, &near_white, &near_black, &is_foreground, width, height);
    let edge_density = if interior > 0 { edges as f64 / interior as f64 } else { 0.0 };
    let white_black_edge_ratio = if edges > 0 { wb_edges as f64 / edges as f64 } else { 0.0 };

    let dominant_colors = median_cut(&foreground_pixels_rgb, k, foreground_count);

    let (legibility_p25, legibility_p50, legibility_p75, legibility_area_ratio) = legibility_pass(image);

    let foreground_pixels_lab =
        sample_foreground_lab(&lab, &luminance, &is_foreground, width, height, foreground_count, max_samples);

    DesignFeatures {
        dominant_colors,
        luminance_histogram: histogram,
        mean_luminance,
        luminance_spread,
        edge_density,
        transparency_ratio,
        foreground_pixels_lab,
        foreground_mean_l,
        foreground_p75_chroma,
        near_white_ratio,
        near_black_ratio,
        foreground_pixel_count: foreground_count,
        total_pixel_count,
        legibility_p25,
        legibility_p50,
        legibility_p75,
        legibility_area_ratio,
        white_black_edge_ratio,
        degenerate: false,
    }
}

fn edge_statistics(
    luminance: &[f64],
    near_white: &[bool],
    near_black: &[bool],
    is_foreground: &[bool],
    width: usize,
    height: usize,
) -> (usize, usize, usize) {
    if width < 3 || height < 3 {
        return (0, 0, 0);
    }
    let mut edges = 0usize;
    let mut interior = 0usize;
    let mut wb_edges = 0usize;

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let idx = y * width + x;
            if !is_foreground[idx] {
                continue;
            }
            let fully_surrounded = (y - 1..=y + 1)
                .all(|ny| (x - 1..=x + 1).all(|nx| is_foreground[ny * width + nx]));
            if !fully_surrounded {
                continue;
            }
            interior += 1;
            let magnitude = sobel_magnitude(luminance, width, x, y);
            if magnitude > EDGE_MAGNITUDE_THRESHOLD {
                edges += 1;
                let mut has_white = false;
                let mut has_black = false;
                for ny in y - 1..=y + 1 {
                    for nx in x - 1..=x + 1 {
                        let nidx = ny * width + nx;
                        has_white |= near_white[nidx];
                        has_black |= near_black[nidx];
                    }
                }
                if has_white && has_black {
                    wb_edges += 1;
                }
            }
        }
    }
    (edges, interior, wb_edges)
}

fn legibility_pass(image: &PixelImage) -> (f64, f64, f64, f64) {
    let (lw, lh) = fit_dimensions(image.width, image.height, LEGIBILITY_MAX);
    let grid = resize_bilinear(image, lw, lh);
    let width = grid.width as usize;
    let height = grid.height as usize;
    let total = width * height;

    if width < 3 || height < 3 {
        return (LEGIBILITY_SENTINEL, LEGIBILITY_SENTINEL, LEGIBILITY_SENTINEL, 0.0);
    }

    let mut luminance = vec![0.0f64; total];
    let mut alpha = vec![0u8; total];
    for y in 0..grid.height {
        for x in 0..grid.width {
            let idx = y as usize * width + x as usize;
            let px = grid.pixel(x, y);
            let color = Color::from_srgb8(px[0], px[1], px[2]);
            luminance[idx] = relative_luminance_srgb(&color).value();
            alpha[idx] = px[3];
        }
    }

    let mut magnitudes = Vec::with_capacity(total);
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            magnitudes.push(sobel_magnitude(&luminance, width, x, y));
        }
    }
    if magnitudes.is_empty() {
        return (LEGIBILITY_SENTINEL, LEGIBILITY_SENTINEL, LEGIBILITY_SENTINEL, 0.0);
    }

    let mean: f64 = magnitudes.iter().sum::<f64>() / magnitudes.len() as f64;
    let variance: f64 =
        magnitudes.iter().map(|m| (m - mean) * (m - mean)).sum::<f64>() / magnitudes.len() as f64;
    let threshold = (mean + 2.0 * variance.sqrt()).max(0.08);

    let mut collected = Vec::new();
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let idx = y * width + x;
            let magnitude = sobel_magnitude(&luminance, width, x, y);
            if magnitude > threshold && alpha[idx] > FOREGROUND_ALPHA_THRESHOLD {
                collected.push(luminance[idx]);
            }
        }
    }

    let min_required = (total as f64 * 0.0001).max(100.0) as usize;
    if collected.len() < min_required {
        return (LEGIBILITY_SENTINEL, LEGIBILITY_SENTINEL, LEGIBILITY_SENTINEL, 0.0);
    }

    let area_ratio = collected.len() as f64 / total as f64;
    (
        percentile(&collected, 0.25),
        percentile(&collected, 0.50),
        percentile(&collected, 0.75),
        area_ratio,
    )
}

fn sample_foreground_lab(
    lab: &[Lab],
    luminance: &[f64],
    is_foreground: &[bool],
    width: usize,
    height: usize,
    foreground_count: usize,
    max_samples: usize,
) -> Vec<Lab> {
    if foreground_count <= max_samples {
        let mut out = Vec::with_capacity(foreground_count);
        for (idx, &fg) in is_foreground.iter().enumerate() {
            if fg {
                out.push(lab[idx]);
            }
        }
        return out;
    }

    let blurred = gaussian_blur_5x5(luminance, width, height);

    let border = 3usize;
    let mut candidates: Vec<(usize, f64)> = Vec::new();
    if width > 2 * border && height > 2 * border {
        for y in border..height - border {
            for x in border..width - border {
                let idx = y * width + x;
                if is_foreground[idx] {
                    candidates.push((idx, sobel_magnitude(&blurred, width, x, y)));
                }
            }
        }
    }

    let k_edge = ((0.02 * foreground_count as f64).floor() as usize).clamp(100, 500);
    candidates.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut picked: Vec<usize> = candidates.into_iter().take(k_edge).map(|(idx, _)| idx).collect();
    let picked_set: std::collections::BTreeSet<usize> = picked.iter().copied().collect();

    const GRID_CELLS: usize = 10;
    let cell_w = ((width + GRID_CELLS - 1) / GRID_CELLS).max(1);
    let cell_h = ((height + GRID_CELLS - 1) / GRID_CELLS).max(1);
    let mut cells: Vec<Vec<usize>> = vec![Vec::new(); GRID_CELLS * GRID_CELLS];
    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            if is_foreground[idx] && !picked_set.contains(&idx) {
                let cx = (x / cell_w).min(GRID_CELLS - 1);
                let cy = (y / cell_h).min(GRID_CELLS - 1);
                cells[cy * GRID_CELLS + cx].push(idx);
            }
        }
    }

    let mut budget = max_samples - picked.len();
    let mut pointers = vec![0usize; cells.len()];
    'rounds: loop {
        let mut progressed = false;
        for (cell_idx, cell) in cells.iter().enumerate() {
            if budget == 0 {
                break 'rounds;
            }
            if pointers[cell_idx] < cell.len() {
                picked.push(cell[pointers[cell_idx]]);
                pointers[cell_idx] += 1;
                budget -= 1;
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }

    picked.into_iter().map(|idx| lab[idx]).collect()
}
