use image::GrayImage;
use tracing::debug;

use crate::{
    algorithms::{
        drawing::{draw_contour_outline, fill_contour},
        extraction::ImageprocContourExtractor,
    },
    error::Result,
    traits::{ContourExtractor, MaskBuilder},
};

/// Outline thickness of each growth pass, in order.
const GROWTH_PASSES: [u32; 2] = [1, 2];

/// Grows a solid foreground mask out of a sparse edge map.
///
/// Gradient edges are thin and broken, so their contours are first redrawn
/// as antialiased outlines of thickness 1 and then 2, re-tracing the drawn
/// result after each pass. The thickened shapes bridge small gaps and their
/// final contours are filled solid. Each pass grows the silhouette slightly.
#[derive(Debug, Clone, Default)]
pub struct ContourGrowthMaskBuilder<C = ImageprocContourExtractor>
where
    C: ContourExtractor,
{
    pub contour_extractor: C,
}

impl<C> ContourGrowthMaskBuilder<C>
where
    C: ContourExtractor,
{
    pub fn new(contour_extractor: C) -> Self {
        Self { contour_extractor }
    }
}

impl<C> MaskBuilder for ContourGrowthMaskBuilder<C>
where
    C: ContourExtractor,
{
    fn build_mask(&self, edges: &GrayImage) -> Result<GrayImage> {
        let mut mask = GrayImage::new(edges.width(), edges.height());
        let mut contours = self.contour_extractor.extract_contours(edges)?;
        debug!(contours = contours.len(), "traced edge map");

        for thickness in GROWTH_PASSES {
            for contour in contours.iter().filter(|c| !c.is_empty()) {
                draw_contour_outline(&mut mask, contour, thickness);
            }
            contours = self.contour_extractor.extract_contours(&mask)?;
            debug!(thickness, contours = contours.len(), "growth pass done");
        }

        for contour in contours.iter().filter(|c| !c.is_empty()) {
            fill_contour(&mut mask, contour);
        }

        // Antialiasing residue may survive outside the filled regions.
        Ok(imageproc::contrast::threshold(&mask, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;
    use crate::algorithms::StandardMaskBuilder;

    fn rectangle_outline(size: u32, start: u32, end: u32) -> GrayImage {
        let mut edges = GrayImage::new(size, size);
        for i in start..=end {
            edges.put_pixel(i, start, Luma([255u8]));
            edges.put_pixel(i, end, Luma([255u8]));
            edges.put_pixel(start, i, Luma([255u8]));
            edges.put_pixel(end, i, Luma([255u8]));
        }
        edges
    }

    #[test]
    fn test_empty_edge_map_yields_empty_mask() {
        let edges = GrayImage::new(50, 40);
        let mask = StandardMaskBuilder::default().build_mask(&edges).unwrap();
        assert_eq!(mask.dimensions(), (50, 40));
        assert!(mask.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn test_closed_outline_is_filled() {
        let edges = rectangle_outline(64, 16, 47);
        let mask = StandardMaskBuilder::default().build_mask(&edges).unwrap();

        for y in 17..47 {
            for x in 17..47 {
                assert_eq!(mask.get_pixel(x, y)[0], 255, "({x}, {y})");
            }
        }
        for (x, y) in [(0, 0), (5, 32), (60, 32), (32, 58)] {
            assert_eq!(mask.get_pixel(x, y)[0], 0, "({x}, {y})");
        }
    }

    #[test]
    fn test_mask_is_binary() {
        let mut edges = rectangle_outline(64, 10, 40);
        // An open diagonal stroke leaves antialiased residue before the fill pass.
        for i in 0..12 {
            edges.put_pixel(45 + i, 50 + i / 2, Luma([255u8]));
        }
        let mask = StandardMaskBuilder::default().build_mask(&edges).unwrap();
        assert!(mask.pixels().all(|p| p[0] == 0 || p[0] == 255));
        assert!(mask.pixels().any(|p| p[0] == 255));
    }

    #[test]
    fn test_growth_enlarges_silhouette_by_a_few_pixels_at_most() {
        let edges = rectangle_outline(64, 16, 47);
        let mask = StandardMaskBuilder::default().build_mask(&edges).unwrap();
        for y in 0..64 {
            for x in 0..64 {
                let far_outside = x < 12 || x > 51 || y < 12 || y > 51;
                if far_outside {
                    assert_eq!(mask.get_pixel(x, y)[0], 0, "({x}, {y})");
                }
            }
        }
    }
}
