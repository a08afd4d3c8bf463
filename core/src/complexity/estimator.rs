//! complexity/estimator.rs
//! Mean edge response of the luminance plane, mapped to a bit depth.
//!
//! Design notes:
//! - Luminance uses ITU-R 601 weights in 16.16 fixed point.
//! - Edge response is the 3x3 kernel [-1 -1 -1; -1 8 -1; -1 -1 -1], clipped
//!   to 0..=255. Borders replicate the nearest pixel, so flat regions and
//!   1x1 images score exactly 0.
//! - Pure function of the samples: no randomness, no failure modes.

use crate::config::DepthThresholds;
use crate::headers::BitDepth;
use crate::pixels::PixelBuffer;

/// 8-bit luma for every pixel in raster order.
pub fn luminance(pixels: &PixelBuffer) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixels.pixel_count());
    let mut rgb = pixels.rgb_samples();
    while let (Some(r), Some(g), Some(b)) = (rgb.next(), rgb.next(), rgb.next()) {
        let y = (r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16;
        out.push(y as u8);
    }
    out
}

/// Mean clipped edge response over the whole image.
pub fn measure_complexity(pixels: &PixelBuffer) -> f64 {
    let w = pixels.width() as usize;
    let h = pixels.height() as usize;
    let luma = luminance(pixels);
    let at = |x: usize, y: usize| luma[y * w + x] as i32;

    let mut total: u64 = 0;
    for y in 0..h {
        let ys = [y.saturating_sub(1), y, (y + 1).min(h - 1)];
        for x in 0..w {
            let xs = [x.saturating_sub(1), x, (x + 1).min(w - 1)];
            let centre = at(x, y);
            let mut response = 9 * centre;
            for &ny in &ys {
                for &nx in &xs {
                    response -= at(nx, ny);
                }
            }
            total += response.clamp(0, 255) as u64;
        }
    }
    total as f64 / (w * h) as f64
}

/// Map a complexity score to a depth using the given thresholds.
pub fn depth_for_complexity(complexity: f64, t: &DepthThresholds) -> BitDepth {
    if complexity < t.depth_1_below {
        BitDepth::One
    } else if complexity < t.depth_2_below {
        BitDepth::Two
    } else if complexity < t.depth_3_below {
        BitDepth::Three
    } else {
        BitDepth::Four
    }
}

/// Pick an embedding depth with explicit thresholds.
pub fn estimate_depth_with(pixels: &PixelBuffer, t: &DepthThresholds) -> BitDepth {
    let complexity = measure_complexity(pixels);
    let depth = depth_for_complexity(complexity, t);
    log::debug!("complexity {:.3} -> {}", complexity, depth);
    depth
}

/// Pick an embedding depth with the default thresholds. Returns 1..=4.
pub fn estimate_depth(pixels: &PixelBuffer) -> u8 {
    estimate_depth_with(pixels, &DepthThresholds::default()).bits()
}
