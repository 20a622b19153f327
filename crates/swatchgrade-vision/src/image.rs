//! Decoded raster input and deterministic bilinear resampling.

use swatchgrade_core::error::SwatchError;

/// A decoded RGBA raster, 8 bits per channel, non-premultiplied.
///
/// Decoding itself (file bytes → pixels) is out of scope; this is the
/// boundary type a decoder hands to the analyzer.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Flat RGBA bytes, length `width * height * 4`, row-major.
    pub rgba: Vec<u8>,
}

impl PixelImage {
    /// Builds a `PixelImage` from a flat RGBA byte buffer.
    pub fn from_rgba8(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, SwatchError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(SwatchError::DimensionMismatch {
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self { width, height, rgba })
    }

    #[inline]
    pub(crate) fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        [self.rgba[idx], self.rgba[idx + 1], self.rgba[idx + 2], self.rgba[idx + 3]]
    }
}

/// Scales `(w, h)` to fit within `max` on both axes, preserving aspect
/// ratio. Returns the input unchanged if it already fits.
#[must_use]
pub(crate) fn fit_dimensions(w: u32, h: u32, max: u32) -> (u32, u32) {
    if w <= max && h <= max {
        return (w, h);
    }
    let scale = f64::from(max) / f64::from(w.max(h));
    let new_w = ((f64::from(w) * scale).round() as u32).max(1);
    let new_h = ((f64::from(h) * scale).round() as u32).max(1);
    (new_w, new_h)
}

/// Bilinear-resamples `image` to `new_w` x `new_h`, including alpha.
#[must_use]
pub(crate) fn resize_bilinear(image: &PixelImage, new_w: u32, new_h: u32) -> PixelImage {
    if new_w == image.width && new_h == image.height {
        return image.clone();
    }

    let (sw, sh) = (f64::from(image.width), f64::from(image.height));
    let (dw, dh) = (f64::from(new_w), f64::from(new_h));
    let scale_x = sw / dw;
    let scale_y = sh / dh;

    let mut out = vec![0u8; new_w as usize * new_h as usize * 4];

    for dy in 0..new_h {
        let src_y = ((f64::from(dy) + 0.5) * scale_y - 0.5).clamp(0.0, sh - 1.0);
        let y0 = src_y.floor() as u32;
        let y1 = (y0 + 1).min(image.height - 1);
        let fy = src_y - f64::from(y0);

        for dx in 0..new_w {
            let src_x = ((f64::from(dx) + 0.5) * scale_x - 0.5).clamp(0.0, sw - 1.0);
            let x0 = src_x.floor() as u32;
            let x1 = (x0 + 1).min(image.width - 1);
            let fx = src_x - f64::from(x0);

            let p00 = image.pixel(x0, y0);
            let p10 = image.pixel(x1, y0);
            let p01 = image.pixel(x0, y1);
            let p11 = image.pixel(x1, y1);

            let out_idx = (dy as usize * new_w as usize + dx as usize) * 4;
            for c in 0..4 {
                let top = f64::from(p00[c]) * (1.0 - fx) + f64::from(p10[c]) * fx;
                let bottom = f64::from(p01[c]) * (1.0 - fx) + f64::from(p11[c]) * fx;
                let value = top * (1.0 - fy) + bottom * fy;
                out[out_idx + c] = value.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    PixelImage {
        width: new_w,
        height: new_h,
        rgba: out,
    }
}
