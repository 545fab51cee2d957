//! # Silhouette Background Removal Library
//!
//! Removes the background from photographs without any learned model: the
//! foreground outline is grown from gradient edges and turned into an alpha
//! channel.
//!
//! ## Stages
//!
//! - **Edge detection**: Canny over a 3x3 Sobel aperture with two hysteresis thresholds
//! - **Mask building**: contours are traced, redrawn thicker twice, then filled solid
//! - **Compositing**: RGB is kept, alpha comes from the mask
//! - **Batching**: files are split into halves recursively and processed on a rayon pool
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use silhouette::{remove_backgrounds, Thresholds};
//! use std::path::PathBuf;
//!
//! let files = vec![PathBuf::from("cat.jpg"), PathBuf::from("dog.jpg")];
//! let report = remove_backgrounds(&files, Thresholds::new(5.0, 50.0))?;
//! println!("{} written, {} skipped", report.written, report.skipped);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Single Image
//!
//! ```rust,no_run
//! use silhouette::{Pipeline, Thresholds};
//!
//! let pipeline = Pipeline::builder()
//!     .with_thresholds(Thresholds::new(10.0, 80.0))
//!     .build();
//! let image = image::open("cat.jpg")?.to_rgb8();
//! let cutout = pipeline.process(&image)?;
//! cutout.save("cat-cutout.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod types;
pub mod traits;
pub mod algorithms;
pub mod pipeline;
pub mod batch;
pub mod output;
pub mod config;

// Re-exports for convenience
pub use error::{SilhouetteError, Result};
pub use types::{BatchReport, Contour, Thresholds};
pub use traits::*;
pub use algorithms::*;
pub use pipeline::{Pipeline, builder::PipelineBuilder};
pub use batch::{fork_join, BatchPartitioner, DEFAULT_SPLIT_THRESHOLD};
pub use config::RunConfig;

use std::path::PathBuf;

/// Remove the background of every file, writing `<file>-<timestamp>.png` next
/// to each successfully processed input.
///
/// Blocks until the whole batch is done. Files that cannot be read or written
/// are logged and skipped; the only error is failing to start the worker pool.
pub fn remove_backgrounds(files: &[PathBuf], thresholds: Thresholds) -> Result<BatchReport> {
    let pipeline = Pipeline::builder().with_thresholds(thresholds).build();
    BatchPartitioner::new(pipeline).run(files)
}
