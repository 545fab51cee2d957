use image::{GrayImage, Rgba, RgbaImage, RgbImage};
use crate::{
    error::{Result, SilhouetteError},
    traits::AlphaCompositor,
};

/// Copies RGB from the source and takes alpha straight from the mask.
#[derive(Debug, Clone, Default)]
pub struct MaskAlphaCompositor;

impl AlphaCompositor for MaskAlphaCompositor {
    fn composite(&self, image: &RgbImage, mask: &GrayImage) -> Result<RgbaImage> {
        if image.dimensions() != mask.dimensions() {
            return Err(SilhouetteError::DimensionMismatch {
                expected: image.dimensions(),
                actual: mask.dimensions(),
            });
        }

        let mut output = RgbaImage::new(image.width(), image.height());
        for ((out, rgb), alpha) in output.pixels_mut().zip(image.pixels()).zip(mask.pixels()) {
            let [r, g, b] = rgb.0;
            *out = Rgba([r, g, b, alpha[0]]);
        }

        Ok(output)
    }
}
