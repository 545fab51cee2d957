use image::GrayImage;
use crate::{error::Result, traits::ContourExtractor, types::Contour};

/// Imageproc-based contour extractor.
///
/// Every non-zero pixel counts as foreground. Outer borders and hole borders
/// come back as one flat list and keep every traced point.
#[derive(Debug, Clone, Default)]
pub struct ImageprocContourExtractor;

impl ContourExtractor for ImageprocContourExtractor {
    fn extract_contours(&self, binary_image: &GrayImage) -> Result<Vec<Contour>> {
        let contours = imageproc::contours::find_contours::<i32>(binary_image);

        let result = contours
            .into_iter()
            .map(|contour| contour.points)
            .collect();

        Ok(result)
    }
}
