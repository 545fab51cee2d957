use std::{
    fs::{self, File, OpenOptions},
    io::{BufWriter, ErrorKind},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};
use image::{ImageFormat, RgbaImage};
use tracing::debug;

use crate::error::{Result, SilhouetteError};

/// Timestamp layout embedded in output file names, millisecond precision.
pub const TIMESTAMP_FORMAT: &str = "%Y.%m.%d-%H.%M.%S%.3f";

/// Upper bound on numbered fallbacks tried after a name collision.
const MAX_COLLISION_SUFFIX: u32 = 1000;

/// `<source>-<timestamp>.png`, next to the source file.
pub fn timestamped_output_path(source: &Path, at: DateTime<Local>) -> PathBuf {
    let stamp = at.format(TIMESTAMP_FORMAT);
    PathBuf::from(format!("{}-{}.png", source.display(), stamp))
}

/// Same as [`timestamped_output_path`] with a numeric suffix, used when the
/// plain name is already taken.
pub fn numbered_output_path(source: &Path, at: DateTime<Local>, n: u32) -> PathBuf {
    let stamp = at.format(TIMESTAMP_FORMAT);
    PathBuf::from(format!("{}-{}-{}.png", source.display(), stamp, n))
}

/// Encode `image` as PNG next to `source` and return the path written.
///
/// The destination is claimed with create-new semantics so two tasks can never
/// write the same file. If encoding fails the partial file is removed.
pub fn write_png(source: &Path, image: &RgbaImage) -> Result<PathBuf> {
    let now = Local::now();
    let (path, file) = claim_output_file(source, now)?;

    let mut writer = BufWriter::new(file);
    let encoded = image
        .write_to(&mut writer, ImageFormat::Png)
        .map_err(|source| SilhouetteError::Encode { path: path.clone(), source })
        .and_then(|_| {
            writer
                .into_inner()
                .map(drop)
                .map_err(|e| SilhouetteError::Write { path: path.clone(), source: e.into_error() })
        });

    if let Err(err) = encoded {
        let _ = fs::remove_file(&path);
        return Err(err);
    }

    Ok(path)
}

fn claim_output_file(source: &Path, at: DateTime<Local>) -> Result<(PathBuf, File)> {
    let mut path = timestamped_output_path(source, at);

    for n in 1..=MAX_COLLISION_SUFFIX {
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!(path = %path.display(), "output name taken");
                path = numbered_output_path(source, at, n);
            }
            Err(e) => return Err(SilhouetteError::Write { path, source: e }),
        }
    }

    Err(SilhouetteError::Write {
        path,
        source: ErrorKind::AlreadyExists.into(),
    })
}
