use crate::{
    pipeline::Pipeline,
    traits::{AlphaCompositor, EdgeDetector, MaskBuilder},
    algorithms::{CannyEdgeDetector, MaskAlphaCompositor, StandardMaskBuilder},
    types::Thresholds,
};

/// Builder for creating processing pipelines with a fluent API
pub struct PipelineBuilder {
    edge_detector: Option<Box<dyn EdgeDetector>>,
    mask_builder: Option<Box<dyn MaskBuilder>>,
    compositor: Option<Box<dyn AlphaCompositor>>,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            edge_detector: None,
            mask_builder: None,
            compositor: None,
        }
    }

    /// Use the Canny detector with the given thresholds
    pub fn with_thresholds(self, thresholds: Thresholds) -> Self {
        self.set_edge_detector(CannyEdgeDetector::new(thresholds))
    }

    /// Set the edge detector (replaces any existing one)
    pub fn set_edge_detector<E>(mut self, detector: E) -> Self
    where
        E: EdgeDetector + 'static,
    {
        self.edge_detector = Some(Box::new(detector));
        self
    }

    /// Set the mask builder (replaces any existing one)
    pub fn set_mask_builder<M>(mut self, builder: M) -> Self
    where
        M: MaskBuilder + 'static,
    {
        self.mask_builder = Some(Box::new(builder));
        self
    }

    /// Set the alpha compositor (replaces any existing one)
    pub fn set_compositor<A>(mut self, compositor: A) -> Self
    where
        A: AlphaCompositor + 'static,
    {
        self.compositor = Some(Box::new(compositor));
        self
    }

    /// Build the pipeline with default components if not specified
    pub fn build(self) -> Pipeline {
        let edge_detector = self.edge_detector
            .unwrap_or_else(|| Box::new(CannyEdgeDetector::default()));

        let mask_builder = self.mask_builder
            .unwrap_or_else(|| Box::new(StandardMaskBuilder::default()));

        let compositor = self.compositor
            .unwrap_or_else(|| Box::new(MaskAlphaCompositor));

        Pipeline::new(edge_detector, mask_builder, compositor)
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use image::{GrayImage, Luma, RgbImage};

    struct FullFrameMask;

    impl MaskBuilder for FullFrameMask {
        fn build_mask(&self, edges: &GrayImage) -> Result<GrayImage> {
            Ok(GrayImage::from_pixel(edges.width(), edges.height(), Luma([255u8])))
        }
    }

    #[test]
    fn test_custom_mask_builder_is_used() {
        let pipeline = PipelineBuilder::new().set_mask_builder(FullFrameMask).build();
        let output = pipeline.process(&RgbImage::new(8, 8)).unwrap();
        assert!(output.pixels().all(|p| p[3] == 255));
    }
}
