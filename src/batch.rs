//! Directory batch processing.
//!
//! Every `*.json` layout dump in an input directory becomes a `<stem>.json`
//! outline in the output directory, which must not be the input directory.
//! Documents are independent; a dump that cannot be read or parsed is
//! reported and skipped.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::render::{self, JsonFormat};
use crate::{OutlineOptions, Outliner};

const DUMP_EXTENSION: &str = "json";

/// Outcome of processing one document.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    /// The outline was written.
    Written {
        /// Layout dump read
        input: PathBuf,
        /// Outline file written
        output: PathBuf,
        /// Number of outline entries
        headings: usize,
        /// Non-fatal provider problems
        failures: Vec<String>,
    },
    /// The document was skipped.
    Failed {
        /// Layout dump that failed
        input: PathBuf,
        /// Error message
        error: String,
    },
}

impl BatchOutcome {
    /// Path of the input dump.
    pub fn input(&self) -> &Path {
        match self {
            BatchOutcome::Written { input, .. } | BatchOutcome::Failed { input, .. } => input,
        }
    }

    /// Check if the outline was written.
    pub fn is_success(&self) -> bool {
        matches!(self, BatchOutcome::Written { .. })
    }
}

/// Per-document outcomes of a batch run, in input file name order.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// One outcome per input dump
    pub outcomes: Vec<BatchOutcome>,
}

impl BatchSummary {
    /// Number of documents processed.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Check if no documents were found.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of outlines written.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of documents skipped.
    pub fn failed(&self) -> usize {
        self.len() - self.succeeded()
    }
}

/// Runs the outline pipeline over a directory of layout dumps.
#[derive(Debug, Clone, Default)]
pub struct BatchProcessor {
    outliner: Outliner,
    format: JsonFormat,
}

impl BatchProcessor {
    /// Create a processor with the given options.
    pub fn new(options: OutlineOptions) -> Self {
        Self {
            outliner: Outliner::new().with_options(options),
            format: JsonFormat::Pretty,
        }
    }

    /// Set the JSON format of written outlines.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// Process every dump in `input_dir`, writing outlines to `output_dir`.
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_dir: P,
        output_dir: Q,
    ) -> Result<BatchSummary> {
        self.run_with_progress(input_dir, output_dir, |_| {})
    }

    /// Like [`run`](Self::run), calling `on_done` as each document finishes.
    pub fn run_with_progress<P, Q, F>(
        &self,
        input_dir: P,
        output_dir: Q,
        on_done: F,
    ) -> Result<BatchSummary>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
        F: Fn(&BatchOutcome) + Sync,
    {
        let input_dir = input_dir.as_ref();
        let inputs = collect_inputs(input_dir)?;
        let output_dir = output_dir.as_ref();
        fs::create_dir_all(output_dir)?;

        if fs::canonicalize(input_dir)? == fs::canonicalize(output_dir)? {
            return Err(Error::InvalidInput(format!(
                "output directory must differ from input directory: {}",
                output_dir.display()
            )));
        }

        log::info!(
            "processing {} layout dumps into {}",
            inputs.len(),
            output_dir.display()
        );

        let process = |input: &PathBuf| {
            let outcome = self.process_one(input, output_dir);
            on_done(&outcome);
            outcome
        };

        let outcomes = if self.outliner.options().parallel {
            inputs.par_iter().map(process).collect()
        } else {
            inputs.iter().map(process).collect()
        };

        Ok(BatchSummary { outcomes })
    }

    fn process_one(&self, input: &Path, output_dir: &Path) -> BatchOutcome {
        match self.write_outline(input, output_dir) {
            Ok((output, headings, failures)) => {
                log::debug!("{} -> {}", input.display(), output.display());
                BatchOutcome::Written {
                    input: input.to_path_buf(),
                    output,
                    headings,
                    failures,
                }
            }
            Err(e) => {
                log::warn!("skipping {}: {}", input.display(), e);
                BatchOutcome::Failed {
                    input: input.to_path_buf(),
                    error: e.to_string(),
                }
            }
        }
    }

    fn write_outline(
        &self,
        input: &Path,
        output_dir: &Path,
    ) -> Result<(PathBuf, usize, Vec<String>)> {
        let report = self.outliner.run_file(input)?;
        let json = render::to_json(&report.outline, self.format)?;

        let stem = input
            .file_stem()
            .ok_or_else(|| Error::InvalidInput(format!("no file name: {}", input.display())))?;
        let output = output_dir.join(format!("{}.{}", stem.to_string_lossy(), DUMP_EXTENSION));
        fs::write(&output, json)?;

        Ok((output, report.outline.len(), report.failures))
    }
}

/// List the layout dumps in a directory, sorted by path.
pub fn collect_inputs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::InvalidInput(format!(
            "not a directory: {}",
            dir.display()
        )));
    }

    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_dump = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(DUMP_EXTENSION));
        if path.is_file() && is_dump {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_collect_inputs_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.json"), "{}").unwrap();
        fs::write(dir.path().join("a.JSON"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let inputs = collect_inputs(dir.path()).unwrap();
        let names: Vec<_> = inputs
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.JSON", "b.json"]);
    }

    #[test]
    fn test_collect_inputs_missing_dir() {
        let result = collect_inputs(Path::new("/nonexistent/batch/input"));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_summary_counts() {
        let summary = BatchSummary {
            outcomes: vec![
                BatchOutcome::Written {
                    input: "a.json".into(),
                    output: "out/a.json".into(),
                    headings: 2,
                    failures: Vec::new(),
                },
                BatchOutcome::Failed {
                    input: "b.json".into(),
                    error: "bad".to_string(),
                },
            ],
        };
        assert_eq!(summary.len(), 2);
        assert_eq!(summary.succeeded(), 1);
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.outcomes[1].input(), Path::new("b.json"));
    }
}
