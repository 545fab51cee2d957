pub mod edges;
pub mod extraction;
pub mod drawing;
pub mod mask;
pub mod compositing;

pub use edges::*;
pub use extraction::*;
pub use mask::*;
pub use compositing::*;

/// Mask builder tracing contours with imageproc
pub type StandardMaskBuilder = ContourGrowthMaskBuilder<ImageprocContourExtractor>;
