//! Apply one filter to many files.
//!
//! Each file is an independent filter call, so items run on the rayon pool
//! when parallelism is enabled. One failing file does not stop the rest.
//! Every input gets its own output path: inputs sharing a file name (from
//! different directories) get a numeric suffix instead of overwriting each
//! other.

use crate::core::error::{BatchError, ChitraResult};
use crate::core::kind::FilterKind;
use crate::filters::registry::FilterRegistry;
use crate::io::{load_image, output_file_name, save_image, OutputFormat};
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// A set of input files, one filter, one output directory.
#[derive(Debug, Clone)]
pub struct BatchJob {
    /// Files to process.
    pub inputs: Vec<PathBuf>,
    /// Directory receiving `filtered_<filter>_<stem>.<ext>` outputs.
    pub output_dir: PathBuf,
    /// Filter applied to every file.
    pub filter: FilterKind,
    /// Strength passed to the filter.
    pub strength: f32,
    /// JPEG quality for JPEG outputs.
    pub jpeg_quality: u8,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Output paths written.
    pub succeeded: Vec<PathBuf>,
    /// Inputs that failed, with the reason.
    pub failed: Vec<BatchError>,
    /// Wall-clock time of the run in milliseconds.
    pub duration_ms: u64,
}

impl BatchReport {
    /// Whether every item succeeded.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Get a human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "{} succeeded, {} failed in {}ms",
            self.succeeded.len(),
            self.failed.len(),
            self.duration_ms
        )
    }
}

impl BatchJob {
    /// Build a job from a glob pattern such as `photos/*.jpg`.
    pub fn from_pattern(
        pattern: &str,
        output_dir: impl Into<PathBuf>,
        filter: FilterKind,
        strength: f32,
        jpeg_quality: u8,
    ) -> Result<Self, BatchError> {
        let paths = glob::glob(pattern).map_err(|e| BatchError::InvalidPattern {
            pattern: pattern.to_string(),
            error: e.to_string(),
        })?;

        let mut inputs: Vec<PathBuf> = paths
            .filter_map(|entry| match entry {
                Ok(path) if path.is_file() => Some(path),
                Ok(_) => None,
                Err(e) => {
                    log::warn!("Skipping unreadable path: {}", e);
                    None
                }
            })
            .collect();
        inputs.sort();

        if inputs.is_empty() {
            return Err(BatchError::NoInputsFound {
                pattern: pattern.to_string(),
            });
        }

        Ok(Self {
            inputs,
            output_dir: output_dir.into(),
            filter,
            strength,
            jpeg_quality,
        })
    }

    fn candidate_path(&self, input: &Path, copy: usize) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let stem = if copy > 1 {
            format!("{}_{}", stem, copy)
        } else {
            stem
        };
        let extension = OutputFormat::from_path(input).extension();
        self.output_dir
            .join(output_file_name(self.filter, Some(&stem), extension))
    }

    /// Output path for each input, in input order. No two are equal.
    pub fn output_paths(&self) -> Vec<PathBuf> {
        let mut taken = HashSet::with_capacity(self.inputs.len());
        self.inputs
            .iter()
            .map(|input| {
                let mut copy = 1;
                let mut path = self.candidate_path(input, copy);
                while taken.contains(&path) {
                    copy += 1;
                    path = self.candidate_path(input, copy);
                }
                if copy > 1 {
                    log::debug!("{} renamed to {} to avoid a clash", input.display(), path.display());
                }
                taken.insert(path.clone());
                path
            })
            .collect()
    }

    /// Process every input.
    pub fn run(&self, registry: &FilterRegistry, parallel: bool) -> Result<BatchReport, BatchError> {
        if !self.output_dir.is_dir() {
            return Err(BatchError::OutputDirectoryMissing {
                path: self.output_dir.clone(),
            });
        }

        let start = Instant::now();
        log::info!(
            "Applying {} (strength {}) to {} file(s)",
            self.filter,
            self.strength,
            self.inputs.len()
        );

        let plan: Vec<(&PathBuf, PathBuf)> = self.inputs.iter().zip(self.output_paths()).collect();
        let process = |(input, output): &(&PathBuf, PathBuf)| -> Result<PathBuf, BatchError> {
            self.process_one(registry, input, output)
                .map(|()| output.clone())
                .map_err(|e| BatchError::ItemFailed {
                    path: input.to_path_buf(),
                    error: e.to_string(),
                })
        };

        let results: Vec<Result<PathBuf, BatchError>> = if parallel {
            plan.par_iter().map(process).collect()
        } else {
            plan.iter().map(process).collect()
        };

        let mut report = BatchReport::default();
        for result in results {
            match result {
                Ok(path) => report.succeeded.push(path),
                Err(e) => {
                    log::warn!("{}", e);
                    report.failed.push(e);
                }
            }
        }
        report.duration_ms = start.elapsed().as_millis() as u64;

        log::info!("Batch finished: {}", report.summary());
        Ok(report)
    }

    fn process_one(&self, registry: &FilterRegistry, input: &Path, output: &Path) -> ChitraResult<()> {
        let image = load_image(input)?;
        let filtered = registry.apply_kind(&image, self.filter, self.strength);
        save_image(&filtered, output, self.jpeg_quality)?;
        log::debug!("{} -> {}", input.display(), output.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Image;
    use crate::io::load_image;

    fn write_sample(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        let image = Image::filled(6, 4, [200, 100, 50]).unwrap();
        save_image(&image, &path, 90).unwrap();
        path
    }

    #[test]
    fn test_no_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = format!("{}/*.png", dir.path().display());
        assert!(matches!(
            BatchJob::from_pattern(&pattern, dir.path(), FilterKind::Negative, 1.0, 90),
            Err(BatchError::NoInputsFound { .. })
        ));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            BatchJob::from_pattern("[", ".", FilterKind::Negative, 1.0, 90),
            Err(BatchError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        write_sample(dir.path(), "a.png");
        let pattern = format!("{}/*.png", dir.path().display());
        let job = BatchJob::from_pattern(
            &pattern,
            dir.path().join("missing"),
            FilterKind::Negative,
            1.0,
            90,
        )
        .unwrap();
        assert!(matches!(
            job.run(FilterRegistry::global(), false),
            Err(BatchError::OutputDirectoryMissing { .. })
        ));
    }

    #[test]
    fn test_batch_writes_outputs() {
        let input_dir = tempfile::tempdir().unwrap();
        let output_dir = tempfile::tempdir().unwrap();
        write_sample(input_dir.path(), "a.png");
        write_sample(input_dir.path(), "b.png");
        std::fs::write(input_dir.path().join("c.png"), b"broken").unwrap();

        let pattern = format!("{}/*.png", input_dir.path().display());
        let job = BatchJob::from_pattern(&pattern, output_dir.path(), FilterKind::Negative, 1.0, 90)
            .unwrap();
        assert_eq!(job.inputs.len(), 3);

        let report = job.run(FilterRegistry::global(), true).unwrap();
        assert_eq!(report.succeeded.len(), 2);
        assert_eq!(report.failed.len(), 1);
        assert!(!report.is_success());

        let negated = load_image(output_dir.path().join("filtered_negative_a.png")).unwrap();
        assert_eq!(negated.pixel(0, 0), [55, 155, 205]);
    }

    #[test]
    fn test_same_file_name_in_two_directories() {
        let input_dir = tempfile::tempdir().unwrap();
        let output_dir = tempfile::tempdir().unwrap();
        for sub in ["x", "y"] {
            std::fs::create_dir(input_dir.path().join(sub)).unwrap();
        }
        let first = input_dir.path().join("x").join("a.png");
        let second = input_dir.path().join("y").join("a.png");
        save_image(&Image::filled(4, 4, [10, 20, 30]).unwrap(), &first, 90).unwrap();
        save_image(&Image::filled(4, 4, [200, 100, 50]).unwrap(), &second, 90).unwrap();

        let pattern = format!("{}/*/a.png", input_dir.path().display());
        let job = BatchJob::from_pattern(&pattern, output_dir.path(), FilterKind::Negative, 1.0, 90)
            .unwrap();
        let report = job.run(FilterRegistry::global(), true).unwrap();
        assert_eq!(report.succeeded.len(), 2);
        assert!(report.is_success());

        let written: HashSet<_> = report.succeeded.iter().collect();
        assert_eq!(written.len(), 2);
        assert_eq!(std::fs::read_dir(output_dir.path()).unwrap().count(), 2);

        let from_x = load_image(output_dir.path().join("filtered_negative_a.png")).unwrap();
        let from_y = load_image(output_dir.path().join("filtered_negative_a_2.png")).unwrap();
        assert_eq!(from_x.pixel(0, 0), [245, 235, 225]);
        assert_eq!(from_y.pixel(0, 0), [55, 155, 205]);
    }

    #[test]
    fn test_output_paths_skip_existing_suffix() {
        let job = BatchJob {
            inputs: vec![
                PathBuf::from("x/a.png"),
                PathBuf::from("y/a_2.png"),
                PathBuf::from("z/a.png"),
                PathBuf::from("w/a.jpeg"),
            ],
            output_dir: PathBuf::from("out"),
            filter: FilterKind::Sepia,
            strength: 1.0,
            jpeg_quality: 90,
        };
        let paths = job.output_paths();
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            [
                "filtered_sepia_a.png",
                "filtered_sepia_a_2.png",
                "filtered_sepia_a_3.png",
                "filtered_sepia_a.jpg",
            ]
        );
    }
}
