use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::mpsc;

use crate::foundation::core::SourceDocument;
use crate::foundation::error::{SvgVariantsError, SvgVariantsResult};
use crate::render::backend::{RenderRequest, Renderer};
use crate::render::invoke::{render_to_bytes, temp_raster_path};
use crate::scheduler::sink::{RunStats, VariantOutcome, VariantSink};
use crate::scheduler::state::SchedulerState;
use crate::variant::spec::VariantSpec;

/// Default concurrency ceiling. Each job may hold a renderer process and a temp file.
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Options for [`convert`].
#[derive(Clone, Debug)]
pub struct ConvertOpts {
    /// Maximum number of variants rendering at once.
    pub max_concurrency: usize,
    /// Global scale factor, applied only to explicitly sized documents.
    pub scale: Option<f64>,
    /// Directory for per-job temporary rasters.
    pub temp_dir: PathBuf,
}

impl Default for ConvertOpts {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            scale: None,
            temp_dir: std::env::temp_dir(),
        }
    }
}

impl ConvertOpts {
    /// Reject options the scheduler cannot run with.
    pub fn validate(&self) -> SvgVariantsResult<()> {
        if self.max_concurrency == 0 {
            return Err(SvgVariantsError::validation(
                "max_concurrency must be >= 1",
            ));
        }
        if let Some(s) = self.scale
            && !(s.is_finite() && s >= 0.0)
        {
            return Err(SvgVariantsError::validation(format!(
                "scale must be a finite, non-negative number, got {s}"
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum JobState {
    Pending,
    Running,
    Succeeded,
    Failed,
}

#[derive(Debug)]
struct JobDone {
    index: usize,
    result: SvgVariantsResult<Vec<u8>>,
}

/// Render every variant of `source` with at most `opts.max_concurrency` jobs in flight.
///
/// Variants start in input order; overflow waits in a FIFO queue and takes the next free slot.
/// Outcomes reach `sink` in completion order. A failed variant is reported to the sink and does
/// not affect its siblings. `sink.end` fires exactly once, after the last outcome (immediately for
/// an empty variant list).
///
/// An error from `sink.push` is fatal: queued variants are dropped, running ones are awaited and
/// discarded, and the error is returned without calling `sink.end`.
pub fn convert(
    source: &SourceDocument,
    variants: &[VariantSpec],
    renderer: &dyn Renderer,
    opts: &ConvertOpts,
    sink: &mut dyn VariantSink,
) -> SvgVariantsResult<RunStats> {
    opts.validate()?;
    let mut state = SchedulerState::new(opts.max_concurrency)?;
    let mut stats = RunStats {
        total: variants.len(),
        ..RunStats::default()
    };

    sink.begin(variants.len())?;
    if variants.is_empty() {
        sink.end(&stats)?;
        return Ok(stats);
    }

    let base_name = source.base_name();
    let source_path = source.path();
    let mut jobs = vec![JobState::Pending; variants.len()];

    std::thread::scope(|scope| -> SvgVariantsResult<RunStats> {
        let (tx, rx) = mpsc::channel::<JobDone>();

        let dispatch = |index: usize, jobs: &mut [JobState]| {
            let variant = &variants[index];
            let request = RenderRequest {
                width: variant.width,
                height: variant.height,
                scale: opts.scale,
            };
            let temp_path = temp_raster_path(&opts.temp_dir);
            let tx = tx.clone();
            jobs[index] = JobState::Running;
            scope.spawn(move || {
                let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
                    render_to_bytes(renderer, source_path, &request, &temp_path)
                }))
                .unwrap_or_else(|_| Err(SvgVariantsError::render("renderer panicked")));
                let _ = tx.send(JobDone { index, result });
            });
        };

        for (index, variant) in variants.iter().enumerate() {
            let output = variant.output_path(base_name);
            match state.submit(index) {
                Some(index) => {
                    tracing::info!(output = %output.display(), "rendering variant");
                    dispatch(index, &mut jobs);
                }
                None => tracing::debug!(output = %output.display(), "queued variant"),
            }
        }

        let mut fatal = None;
        while !state.is_idle() {
            let done = rx.recv().map_err(|_| {
                SvgVariantsError::render("worker channel disconnected unexpectedly")
            })?;
            let variant = &variants[done.index];
            let output_path = variant.output_path(base_name);

            match &done.result {
                Ok(bytes) => {
                    jobs[done.index] = JobState::Succeeded;
                    stats.succeeded += 1;
                    tracing::info!(
                        output = %output_path.display(),
                        bytes = bytes.len(),
                        "converted variant"
                    );
                }
                Err(e) => {
                    jobs[done.index] = JobState::Failed;
                    stats.failed += 1;
                    tracing::warn!(
                        output = %output_path.display(),
                        error = %e,
                        "variant failed"
                    );
                }
            }

            if fatal.is_none() {
                let outcome = VariantOutcome {
                    index: done.index,
                    variant: variant.clone(),
                    output_path,
                    result: done.result,
                };
                if let Err(e) = sink.push(outcome) {
                    let dropped = state.abandon_pending();
                    tracing::error!(
                        error = %e,
                        dropped = dropped.len(),
                        "sink failed, stopping run"
                    );
                    fatal = Some(e);
                }
            }

            if let Some(next) = state.complete() {
                tracing::info!(
                    output = %variants[next].output_path(base_name).display(),
                    "rendering queued variant"
                );
                dispatch(next, &mut jobs);
            }
        }

        stats.peak_active = state.peak_active();
        if let Some(e) = fatal {
            return Err(e);
        }

        debug_assert!(
            jobs.iter()
                .all(|j| matches!(j, JobState::Succeeded | JobState::Failed))
        );
        sink.end(&stats)?;
        Ok(stats)
    })
}

#[cfg(test)]
#[path = "../../tests/unit/scheduler/run.rs"]
mod tests;
