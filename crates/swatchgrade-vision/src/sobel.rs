//! Sobel edge magnitude and Gaussian low-pass smoothing over a luminance grid.

/// Sobel magnitude at interior point `(x, y)` of a `width`x`height` field.
///
/// Caller must ensure `0 < x < width - 1` and `0 < y < height - 1`.
#[must_use]
pub(crate) fn sobel_magnitude(field: &[f64], width: usize, x: usize, y: usize) -> f64 {
    let at = |dx: isize, dy: isize| -> f64 {
        let sx = (x as isize + dx) as usize;
        let sy = (y as isize + dy) as usize;
        field[sy * width + sx]
    };

    let gx = -at(-1, -1) + at(1, -1) - 2.0 * at(-1, 0) + 2.0 * at(1, 0) - at(-1, 1) + at(1, 1);
    let gy = -at(-1, -1) - 2.0 * at(0, -1) - at(1, -1) + at(-1, 1) + 2.0 * at(0, 1) + at(1, 1);

    (gx * gx + gy * gy).sqrt()
}

/// Classic 5x5 Gaussian kernel (outer product of `[1, 4, 6, 4, 1]`, sum 256).
const GAUSSIAN_1D: [f64; 5] = [1.0, 4.0, 6.0, 4.0, 1.0];

/// Applies a 5x5 Gaussian low-pass to `field`, skipping the 2-pixel border.
/// Border pixels are copied through unchanged; callers must not treat them
/// as valid smoothed samples.
#[must_use]
pub(crate) fn gaussian_blur_5x5(field: &[f64], width: usize, height: usize) -> Vec<f64> {
    let mut out = field.to_vec();
    if width < 5 || height < 5 {
        return out;
    }
    for y in 2..height - 2 {
        for x in 2..width - 2 {
            let mut acc = 0.0;
            for (ky, &wy) in GAUSSIAN_1D.iter().enumerate() {
                let sy = y + ky - 2;
                for (kx, &wx) in GAUSSIAN_1D.iter().enumerate() {
                    let sx = x + kx - 2;
                    acc += wx * wy * field[sy * width + sx];
                }
            }
            out[y * width + x] = acc / 256.0;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sobel_zero_on_constant_field() {
        let field = vec![0.5; 9];
        assert_eq!(sobel_magnitude(&field, 3, 1, 1), 0.0);
    }

    #[test]
    fn sobel_detects_sharp_edge() {
        // Left half 0.0, right half 1.0, vertical edge through the middle.
        let width = 5;
        let height = 3;
        let mut field = vec![0.0; width * height];
        for y in 0..height {
            for x in 0..width {
                field[y * width + x] = if x >= width / 2 { 1.0 } else { 0.0 };
            }
        }
        let magnitude = sobel_magnitude(&field, width, width / 2, height / 2);
        assert!(magnitude > 0.1);
    }

    #[test]
    fn gaussian_blur_preserves_constant_field() {
        let width = 7;
        let height = 7;
        let field = vec![0.3; width * height];
        let blurred = gaussian_blur_5x5(&field, width, height);
        for &v in &blurred {
            assert!((v - 0.3).abs() < 1e-9);
        }
    }

    #[test]
    fn gaussian_blur_smooths_impulse() {
        let width = 7;
        let height = 7;
        let mut field = vec![0.0; width * height];
        field[3 * width + 3] = 1.0;
        let blurred = gaussian_blur_5x5(&field, width, height);
        assert!(blurred[3 * width + 3] < 1.0);
        assert!(blurred[3 * width + 3] > 0.0);
    }
}
