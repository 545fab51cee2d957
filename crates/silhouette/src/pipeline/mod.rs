pub mod builder;

use std::path::{Path, PathBuf};

use image::{GrayImage, RgbImage, RgbaImage};
use tracing::debug;

use crate::{
    error::{Result, SilhouetteError},
    output,
    traits::{AlphaCompositor, EdgeDetector, MaskBuilder},
};

/// Per-image background removal: edges, then mask, then alpha.
pub struct Pipeline {
    edge_detector: Box<dyn EdgeDetector>,
    mask_builder: Box<dyn MaskBuilder>,
    compositor: Box<dyn AlphaCompositor>,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    /// Create a new pipeline with the given components
    pub fn new(
        edge_detector: Box<dyn EdgeDetector>,
        mask_builder: Box<dyn MaskBuilder>,
        compositor: Box<dyn AlphaCompositor>,
    ) -> Self {
        Self {
            edge_detector,
            mask_builder,
            compositor,
        }
    }

    /// Foreground mask of a colour image
    pub fn mask(&self, image: &RgbImage) -> Result<GrayImage> {
        let edges = self.edge_detector.detect_edges(image)?;
        self.mask_builder.build_mask(&edges)
    }

    /// Process an image through the entire pipeline
    pub fn process(&self, image: &RgbImage) -> Result<RgbaImage> {
        let mask = self.mask(image)?;
        self.compositor.composite(image, &mask)
    }

    /// Decode `path`, remove its background and write the PNG next to it.
    ///
    /// Returns the path of the written file.
    pub fn process_file(&self, path: &Path) -> Result<PathBuf> {
        let image = image::open(path)
            .map_err(|source| SilhouetteError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgb8();
        debug!(path = %path.display(), width = image.width(), height = image.height(), "decoded");

        let result = self.process(&image)?;
        output::write_png(path, &result)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::builder().build()
    }
}
