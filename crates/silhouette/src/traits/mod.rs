use image::{GrayImage, RgbImage, RgbaImage};
use crate::{error::Result, types::Contour};

/// Trait for edge detection algorithms
pub trait EdgeDetector: Send + Sync {
    /// Produce a binary edge map (255 = edge) with the dimensions of `image`
    fn detect_edges(&self, image: &RgbImage) -> Result<GrayImage>;
}

/// Trait for contour extraction algorithms
pub trait ContourExtractor: Send + Sync {
    /// Extract every contour of a binary image as a flat sibling list
    fn extract_contours(&self, image: &GrayImage) -> Result<Vec<Contour>>;
}

/// Trait for turning an edge map into a foreground mask
pub trait MaskBuilder: Send + Sync {
    /// Build a mask whose pixels are exactly 0 (background) or 255 (foreground)
    fn build_mask(&self, edges: &GrayImage) -> Result<GrayImage>;
}

/// Trait for merging a colour image with its mask
pub trait AlphaCompositor: Send + Sync {
    fn composite(&self, image: &RgbImage, mask: &GrayImage) -> Result<RgbaImage>;
}
