use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{SvgVariantsError, SvgVariantsResult};
use crate::variant::spec::{VariantSpec, is_contained};

/// Terminal state of one variant, delivered in completion order.
#[derive(Debug)]
pub struct VariantOutcome {
    /// Position of the variant in the input list.
    pub index: usize,
    /// The variant descriptor.
    pub variant: VariantSpec,
    /// Output path relative to the destination root, extension included.
    pub output_path: PathBuf,
    /// Raster bytes, or why this variant failed.
    pub result: SvgVariantsResult<Vec<u8>>,
}

/// Counters for a finished run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Variants submitted.
    pub total: usize,
    /// Variants that produced a raster.
    pub succeeded: usize,
    /// Variants that reported an error.
    pub failed: usize,
    /// Highest number of simultaneously running jobs.
    pub peak_active: usize,
}

/// Consumer of variant outcomes.
///
/// Ordering contract: `begin` once, then `push` once per variant in completion order (not input
/// order), then `end` once. An error from `push` aborts the run and `end` is not called.
pub trait VariantSink {
    /// Called once before any job starts.
    fn begin(&mut self, _total: usize) -> SvgVariantsResult<()> {
        Ok(())
    }
    /// Receive one finished variant.
    fn push(&mut self, outcome: VariantOutcome) -> SvgVariantsResult<()>;
    /// Completion signal, after the last `push`.
    fn end(&mut self, stats: &RunStats) -> SvgVariantsResult<()>;
}

/// In-memory sink for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemorySink {
    total: Option<usize>,
    outcomes: Vec<VariantOutcome>,
    stats: Option<RunStats>,
    end_calls: usize,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total announced by `begin`, if called.
    pub fn total(&self) -> Option<usize> {
        self.total
    }

    /// Outcomes in arrival order.
    pub fn outcomes(&self) -> &[VariantOutcome] {
        &self.outcomes
    }

    /// Stats passed to `end`, if the run completed.
    pub fn stats(&self) -> Option<RunStats> {
        self.stats
    }

    /// How many times `end` was called.
    pub fn end_calls(&self) -> usize {
        self.end_calls
    }
}

impl VariantSink for InMemorySink {
    fn begin(&mut self, total: usize) -> SvgVariantsResult<()> {
        self.total = Some(total);
        self.outcomes.clear();
        Ok(())
    }

    fn push(&mut self, outcome: VariantOutcome) -> SvgVariantsResult<()> {
        self.outcomes.push(outcome);
        Ok(())
    }

    fn end(&mut self, stats: &RunStats) -> SvgVariantsResult<()> {
        self.stats = Some(*stats);
        self.end_calls += 1;
        Ok(())
    }
}

/// Sink that writes every successful raster below `out_dir`.
///
/// Failed variants are recorded, not written. Failing to write an output, or an output path that
/// leaves `out_dir`, aborts the run.
#[derive(Debug)]
pub struct DirSink {
    out_dir: PathBuf,
    written: Vec<PathBuf>,
    failures: Vec<(PathBuf, String)>,
    stats: Option<RunStats>,
}

impl DirSink {
    /// Write outputs below `out_dir`.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            written: Vec::new(),
            failures: Vec::new(),
            stats: None,
        }
    }

    /// Files written so far, in completion order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// `(output path, error message)` for every failed variant.
    pub fn failures(&self) -> &[(PathBuf, String)] {
        &self.failures
    }

    /// Stats passed to `end`, if the run completed.
    pub fn stats(&self) -> Option<RunStats> {
        self.stats
    }
}

impl VariantSink for DirSink {
    fn push(&mut self, outcome: VariantOutcome) -> SvgVariantsResult<()> {
        if !is_contained(&outcome.output_path) {
            return Err(SvgVariantsError::validation(format!(
                "output path '{}' escapes the output directory",
                outcome.output_path.display()
            )));
        }
        let path = self.out_dir.join(&outcome.output_path);
        match outcome.result {
            Ok(bytes) => {
                ensure_parent_dir(&path)?;
                std::fs::write(&path, bytes)
                    .with_context(|| format!("write output '{}'", path.display()))?;
                self.written.push(path);
            }
            Err(e) => self.failures.push((path, e.to_string())),
        }
        Ok(())
    }

    fn end(&mut self, stats: &RunStats) -> SvgVariantsResult<()> {
        self.stats = Some(*stats);
        Ok(())
    }
}

/// Create the parent directory of `path` if it does not exist.
pub fn ensure_parent_dir(path: &Path) -> SvgVariantsResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/scheduler/sink.rs"]
mod tests;
