//! Chunked sampling and relocation.
//!
//! For every chunk of the candidate list a fixed number of positions is drawn
//! (with replacement); each draw that lands on a file still in the input
//! directory is renamed into the output directory and logged to the ledger.

pub mod partition;
pub mod relocate;
pub mod sampler;

pub use partition::{CHUNK_SIZE, Chunk, SamplingPlan, chunk_count, chunks};
pub use relocate::{RelocateOutcome, Relocator, prepare_output_dir};
pub use sampler::{RandomSource, SeededSource, draw_chunk};

use anyhow::Result;
use std::fmt;
use std::io::Write;
use std::num::NonZeroUsize;
use tracing::{debug, info, trace, warn};

use crate::config::{SelectConfig, ensure_same_volume};
use crate::ledger::{Ledger, SelectionRecord};
use crate::lister::CandidateList;
use crate::shutdown;

/// Totals for one run. `moved` always equals the ledger rows written by the run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionReport {
    pub candidates: usize,
    pub chunks: usize,
    pub picks_per_chunk: usize,
    /// Naive `floor(candidates * percentage / 100)`.
    pub estimated: usize,
    pub draws: usize,
    /// Draws past the end of the list.
    pub discarded: usize,
    /// Draws whose file was no longer in the input directory.
    pub already_gone: usize,
    pub failed: usize,
    pub moved: usize,
    /// Run stopped early on an interrupt request.
    pub interrupted: bool,
}

impl fmt::Display for SelectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Picked files : {} (estimated {})", self.moved, self.estimated)
    }
}

/// Runs the sampling loop over one candidate snapshot.
pub struct Selector<'a> {
    candidates: &'a CandidateList,
    plan: SamplingPlan,
    relocator: Relocator,
}

impl<'a> Selector<'a> {
    pub fn new(cfg: &SelectConfig, candidates: &'a CandidateList) -> Self {
        Self {
            candidates,
            plan: SamplingPlan::new(candidates.len(), cfg.percentage),
            relocator: Relocator::new(&cfg.input_path, &cfg.output_path),
        }
    }

    /// Override the window size (tests and small collections).
    pub fn with_chunk_size(mut self, chunk_size: NonZeroUsize) -> Self {
        let SamplingPlan { total, percentage, .. } = self.plan;
        self.plan = SamplingPlan::with_chunk_size(total, percentage, chunk_size);
        self
    }

    /// Draw, relocate and log. Relocation failures are counted and skipped;
    /// a ledger failure aborts the run.
    pub fn run<R, W>(&self, rng: &mut R, ledger: &mut Ledger<W>) -> Result<SelectionReport>
    where
        R: RandomSource + ?Sized,
        W: Write,
    {
        let total = self.candidates.len();
        let mut report = SelectionReport {
            candidates: total,
            chunks: self.plan.chunk_count(),
            picks_per_chunk: self.plan.picks_per_chunk(),
            estimated: self.plan.estimated(),
            ..Default::default()
        };
        debug!(
            chunks = report.chunks,
            picks_per_chunk = report.picks_per_chunk,
            "Sampling plan"
        );

        'chunks: for chunk in self.plan.chunks() {
            trace!(
                chunk = chunk.index,
                start = chunk.start,
                populated = chunk.populated(total),
                "Sampling chunk"
            );
            for index in draw_chunk(&mut *rng, chunk, report.picks_per_chunk, total) {
                if shutdown::is_requested() {
                    warn!(chunk = chunk.index, "Interrupt requested; stopping selection");
                    report.interrupted = true;
                    break 'chunks;
                }
                report.draws += 1;
                let Some(index) = index else {
                    report.discarded += 1;
                    continue;
                };
                let name = &self.candidates[index];
                match self.relocator.relocate(name) {
                    RelocateOutcome::Moved => {
                        report.moved += 1;
                        ledger.append(&SelectionRecord::new(name))?;
                    }
                    RelocateOutcome::AlreadyGone => report.already_gone += 1,
                    RelocateOutcome::Failed(e) => {
                        report.failed += 1;
                        warn!(file = %name, error = %e, "Pick skipped");
                    }
                }
            }
        }

        info!(
            moved = report.moved,
            estimated = report.estimated,
            draws = report.draws,
            discarded = report.discarded,
            already_gone = report.already_gone,
            failed = report.failed,
            "Selection finished"
        );
        Ok(report)
    }
}

/// Full relocation phase for a listed snapshot: partition check, output
/// directory, ledger, sampling loop.
pub fn select_panoramics<R: RandomSource + ?Sized>(
    cfg: &SelectConfig,
    candidates: &CandidateList,
    rng: &mut R,
) -> Result<SelectionReport> {
    ensure_same_volume(&cfg.input_path, &cfg.output_path)?;
    prepare_output_dir(&cfg.output_path)?;
    let mut ledger = Ledger::create(&cfg.output_path, &cfg.ledger_fields, cfg.ledger_mode)?;
    info!("Selected panoramics are saved in {}", ledger.path().display());
    let report = Selector::new(cfg, candidates).run(rng, &mut ledger)?;
    debug_assert_eq!(report.moved, ledger.rows_written());
    Ok(report)
}
