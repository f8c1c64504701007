//! Core library for `pano_select`.
//!
//! Thins a large flat folder of panoramic images down to a random sample for
//! review: the candidate list is cut into fixed chunks, a percentage of each
//! chunk is drawn (with replacement), each drawn file still present is renamed
//! into the output folder and recorded in a CSV ledger.
//!
//! Modules:
//! - config: SelectConfig, JSON descriptor loading, validation.
//! - lister: candidate snapshot of the input folder.
//! - select: partitioning, sampling, relocation, the run loop.
//! - ledger: append-only CSV record of moved files.

pub mod cli;
pub mod config;
pub mod errors;
pub mod helpers;
pub mod ledger;
pub mod lister;
pub mod output;
pub mod select;
pub mod shutdown;

pub use config::{
    CandidateFilter, LedgerMode, LogLevel, Percentage, SelectConfig, default_config_path,
    ensure_same_volume, load_config_from_json_path,
};
pub use errors::SelectError;
pub use ledger::{LEDGER_FILE_NAME, Ledger, SelectionRecord};
pub use lister::{CandidateList, list_candidates};
pub use select::{
    CHUNK_SIZE, RandomSource, SamplingPlan, SeededSource, SelectionReport, Selector,
    select_panoramics,
};

/// Common imports for callers embedding the sampler.
pub mod prelude {
    pub use crate::config::{Percentage, SelectConfig};
    pub use crate::lister::{CandidateList, list_candidates};
    pub use crate::select::{RandomSource, SeededSource, SelectionReport, select_panoramics};
}
