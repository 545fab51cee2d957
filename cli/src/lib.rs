use std::{collections::HashSet, fs, path::PathBuf};

use rand::seq::SliceRandom;
use silhouette::{RunConfig, SilhouetteError, Thresholds};
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("No readable input files were given")]
    NoInputs,
    #[error(transparent)]
    Config(#[from] SilhouetteError),
}

/// Overrides given on the command line, applied on top of a [`RunConfig`].
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub thresholds: Vec<String>,
    pub threads: Option<usize>,
    pub split_threshold: Option<usize>,
    pub no_shuffle: bool,
}

impl Overrides {
    pub fn apply(&self, mut config: RunConfig) -> RunConfig {
        if !self.thresholds.is_empty() {
            config.thresholds = parse_threshold_values(&self.thresholds);
        }
        if self.threads.is_some() {
            config.threads = self.threads;
        }
        if let Some(split_threshold) = self.split_threshold {
            config.split_threshold = split_threshold;
        }
        if self.no_shuffle {
            config.shuffle = false;
        }
        config
    }
}

/// Parse threshold tokens, dropping (and logging) anything that is not a number.
pub fn parse_threshold_values(tokens: &[String]) -> Vec<f64> {
    tokens
        .iter()
        .filter_map(|token| match token.trim().parse::<f64>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring non-numeric threshold '{}'", token);
                None
            }
        })
        .collect()
}

/// Thresholds from raw command-line tokens, falling back to the default pair.
pub fn parse_thresholds(tokens: &[String]) -> Thresholds {
    Thresholds::from_values(&parse_threshold_values(tokens))
}

/// Keep existing regular files only, dropping duplicates by canonical path.
///
/// The first spelling of each file is kept.
pub fn resolve_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>, CliError> {
    let mut seen = HashSet::new();
    let mut result = Vec::new();

    for path in paths {
        let is_file = fs::metadata(path).map(|m| m.is_file()).unwrap_or(false);
        if !is_file {
            warn!("Skipping {:?}: not an existing file", path);
            continue;
        }

        let canonical = match fs::canonicalize(path) {
            Ok(canonical) => canonical,
            Err(e) => {
                warn!("Skipping {:?}: {}", path, e);
                continue;
            }
        };

        if seen.insert(canonical) {
            result.push(path.clone());
        }
    }

    if result.is_empty() {
        return Err(CliError::NoInputs);
    }
    Ok(result)
}

/// Randomize processing order.
pub fn shuffle_inputs(files: &mut [PathBuf]) {
    files.shuffle(&mut rand::thread_rng());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_thresholds() {
        assert_eq!(parse_thresholds(&strings(&["70", "15"])), Thresholds::new(15.0, 70.0));
        assert_eq!(parse_thresholds(&strings(&["12"])), Thresholds::default());
        assert_eq!(parse_thresholds(&strings(&["12", "abc"])), Thresholds::default());
        assert_eq!(parse_thresholds(&[]), Thresholds::default());
    }

    #[test]
    fn test_resolve_inputs_dedups_and_skips_missing() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.jpg");
        let b = dir.path().join("b.jpg");
        fs::write(&a, b"x").unwrap();
        fs::write(&b, b"y").unwrap();
        let a_again = dir.path().join(".").join("a.jpg");
        let missing = dir.path().join("missing.jpg");
        let directory = dir.path().to_path_buf();

        let resolved = resolve_inputs(&[a.clone(), missing, a_again, directory, b.clone()]).unwrap();
        assert_eq!(resolved, vec![a, b]);
    }

    #[test]
    fn test_resolve_inputs_without_files_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_inputs(&[dir.path().join("nope.png")]).unwrap_err();
        assert!(matches!(err, CliError::NoInputs));
        assert!(matches!(resolve_inputs(&[]), Err(CliError::NoInputs)));
    }

    #[test]
    fn test_overrides_win_over_config() {
        let config = RunConfig {
            thresholds: vec![1.0, 2.0],
            split_threshold: 4,
            threads: Some(8),
            shuffle: true,
        };
        let overrides = Overrides {
            thresholds: strings(&["30", "10"]),
            threads: None,
            split_threshold: Some(16),
            no_shuffle: true,
        };

        let merged = overrides.apply(config);
        assert_eq!(merged.thresholds(), Thresholds::new(10.0, 30.0));
        assert_eq!(merged.threads, Some(8));
        assert_eq!(merged.split_threshold, 16);
        assert!(!merged.shuffle);
    }

    #[test]
    fn test_shuffle_keeps_every_file() {
        let mut files: Vec<PathBuf> = (0..20).map(|i| PathBuf::from(format!("{i}.png"))).collect();
        let original = files.clone();
        shuffle_inputs(&mut files);
        let mut sorted = files.clone();
        sorted.sort();
        let mut expected = original;
        expected.sort();
        assert_eq!(sorted, expected);
    }
}
