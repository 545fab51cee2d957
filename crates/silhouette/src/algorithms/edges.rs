use image::{GrayImage, Luma, RgbImage};
use imageproc::gradients::{horizontal_sobel, vertical_sobel};
use tracing::debug;

use crate::{error::Result, traits::EdgeDetector, types::Thresholds};

const TAN_22_5: f64 = 0.414_213_562_373_095;
const TAN_67_5: f64 = 2.414_213_562_373_095;

/// Canny edge detector over a 3x3 Sobel aperture.
///
/// The colour image is reduced to luminance, the gradient magnitude is taken as
/// `|gx| + |gy|`, thinned by non-maximum suppression and finally linked by
/// hysteresis between the two thresholds. No smoothing is applied first.
#[derive(Debug, Clone, Copy, Default)]
pub struct CannyEdgeDetector {
    pub thresholds: Thresholds,
}

impl CannyEdgeDetector {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }
}

impl EdgeDetector for CannyEdgeDetector {
    fn detect_edges(&self, image: &RgbImage) -> Result<GrayImage> {
        let gray = image::imageops::grayscale(image);
        let edges = canny(&gray, self.thresholds);
        debug!(
            width = edges.width(),
            height = edges.height(),
            low = self.thresholds.low(),
            high = self.thresholds.high(),
            "edge map computed"
        );
        Ok(edges)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeState {
    Suppressed,
    Weak,
    Strong,
}

/// Binary Canny edge map of a grayscale image: 255 on edges, 0 elsewhere.
pub fn canny(gray: &GrayImage, thresholds: Thresholds) -> GrayImage {
    let (width, height) = gray.dimensions();
    let mut edges = GrayImage::new(width, height);
    if width == 0 || height == 0 {
        return edges;
    }

    let gx = horizontal_sobel(gray);
    let gy = vertical_sobel(gray);
    let w = width as usize;
    let h = height as usize;

    let magnitude: Vec<i32> = gx
        .pixels()
        .zip(gy.pixels())
        .map(|(dx, dy)| i32::from(dx[0]).abs() + i32::from(dy[0]).abs())
        .collect();

    let mag_at = |x: i64, y: i64| -> i32 {
        if x < 0 || y < 0 || x >= w as i64 || y >= h as i64 {
            0
        } else {
            magnitude[y as usize * w + x as usize]
        }
    };

    let mut states = vec![EdgeState::Suppressed; w * h];
    let mut stack = Vec::new();

    for y in 0..h {
        for x in 0..w {
            let idx = y * w + x;
            let m = magnitude[idx];
            if f64::from(m) <= thresholds.low() {
                continue;
            }

            let sx = f64::from(gx.get_pixel(x as u32, y as u32)[0]);
            let sy = f64::from(gy.get_pixel(x as u32, y as u32)[0]);
            let (ax, ay) = (sx.abs(), sy.abs());
            let (xi, yi) = (x as i64, y as i64);

            // Ties are broken towards the lower/left neighbour so plateaus stay one pixel wide.
            let is_peak = if ay < ax * TAN_22_5 {
                m > mag_at(xi - 1, yi) && m >= mag_at(xi + 1, yi)
            } else if ay > ax * TAN_67_5 {
                m > mag_at(xi, yi - 1) && m >= mag_at(xi, yi + 1)
            } else {
                let s = if (sx < 0.0) != (sy < 0.0) { -1 } else { 1 };
                m > mag_at(xi - s, yi - 1) && m > mag_at(xi + s, yi + 1)
            };

            if !is_peak {
                continue;
            }

            if f64::from(m) > thresholds.high() {
                states[idx] = EdgeState::Strong;
                stack.push((x, y));
            } else {
                states[idx] = EdgeState::Weak;
            }
        }
    }

    // Hysteresis: promote weak pixels 8-connected to a strong one.
    while let Some((x, y)) = stack.pop() {
        for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                let idx = ny * w + nx;
                if states[idx] == EdgeState::Weak {
                    states[idx] = EdgeState::Strong;
                    stack.push((nx, ny));
                }
            }
        }
    }

    for (pixel, state) in edges.pixels_mut().zip(&states) {
        if *state == EdgeState::Strong {
            *pixel = Luma([255u8]);
        }
    }

    edges
}
