//! Relocation of picked files.
//! - Each pick is moved at most once: a missing source is a silent no-op.
//! - Moves are plain renames (same partition); errors are per-pick, never fatal.
//! - An existing file of the same name in the output directory is never overwritten,
//!   unlike a bare rename which would replace it. The destination check runs just
//!   before the rename, so like `source_present` it is check-then-act and only
//!   holds for a single process working on the output directory.

use anyhow::{Result, anyhow};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

use crate::helpers::{describe_io_error, io_error_with_help, is_cross_device};

/// Result of trying to relocate one pick.
#[derive(Debug)]
pub enum RelocateOutcome {
    /// Renamed into the output directory.
    Moved,
    /// Source no longer present (moved earlier in this run or by a previous run).
    AlreadyGone,
    /// Rename refused or failed; the pick is abandoned.
    Failed(anyhow::Error),
}

/// Create the output directory; an existing directory counts as success.
pub fn prepare_output_dir(output: &Path) -> Result<()> {
    if output.is_dir() {
        debug!(output = %output.display(), "Output directory already exists");
        return Ok(());
    }
    fs::create_dir_all(output).map_err(io_error_with_help("create output directory", output))?;
    info!("Created output directory: {}", output.display());
    Ok(())
}

/// Moves candidate files from `input` to `output` by name.
#[derive(Debug, Clone)]
pub struct Relocator {
    input: PathBuf,
    output: PathBuf,
}

impl Relocator {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    pub fn source_of(&self, name: &str) -> PathBuf {
        self.input.join(name)
    }

    pub fn destination_of(&self, name: &str) -> PathBuf {
        self.output.join(name)
    }

    /// Precondition for a move: the source is still in the input directory.
    ///
    /// This is check-then-act and not safe against a concurrent mover; a
    /// concurrent-safe version needs a rename whose failure tells "already
    /// gone" apart from other errors. The NotFound mapping in `relocate`
    /// covers the single-process case.
    pub fn source_present(&self, name: &str) -> io::Result<bool> {
        match fs::symlink_metadata(self.source_of(name)) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Relocate one candidate by name.
    pub fn relocate(&self, name: &str) -> RelocateOutcome {
        let src = self.source_of(name);
        match self.source_present(name) {
            Ok(true) => {}
            Ok(false) => {
                trace!(file = %name, "Source already gone; skipping");
                return RelocateOutcome::AlreadyGone;
            }
            Err(e) => {
                return RelocateOutcome::Failed(anyhow!(describe_io_error("stat source", &src, &e)));
            }
        }

        let dst = self.destination_of(name);
        if dst.exists() {
            return RelocateOutcome::Failed(anyhow!(
                "destination '{}' already exists; refusing to overwrite",
                dst.display()
            ));
        }

        match fs::rename(&src, &dst) {
            Ok(()) => {
                debug!(file = %name, dest = %dst.display(), "Moved");
                RelocateOutcome::Moved
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound && !src.exists() => {
                RelocateOutcome::AlreadyGone
            }
            Err(e) => {
                let op = if is_cross_device(&e) {
                    "rename across partitions"
                } else {
                    "rename"
                };
                RelocateOutcome::Failed(anyhow!(describe_io_error(op, &src, &e)))
            }
        }
    }
}
