//! Candidate listing.
//! Produces the ordered, immutable list of filenames the sampler draws from.

use anyhow::{Context, Result};
use std::ops::Index;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::CandidateFilter;

/// Snapshot of the input directory taken once at the start of a run.
/// Index `i` identifies item `i`; nothing else about the order is relied on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateList(Vec<String>);

impl CandidateList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }
}

impl From<Vec<String>> for CandidateList {
    fn from(names: Vec<String>) -> Self {
        Self(names)
    }
}

impl Index<usize> for CandidateList {
    type Output = str;
    fn index(&self, index: usize) -> &str {
        &self.0[index]
    }
}

/// List the non-directory entries directly under `input` whose names pass `filter`,
/// sorted by name. Symlinks are kept as entries (the link itself is what gets moved).
/// Subdirectories (including an output folder nested in the input) are skipped.
pub fn list_candidates(input: &Path, filter: &CandidateFilter) -> Result<CandidateList> {
    let mut names = Vec::new();
    for entry in WalkDir::new(input).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("list input directory '{}'", input.display()))?;
        if entry.file_type().is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            warn!(path = %entry.path().display(), "Skipping non UTF-8 filename");
            continue;
        };
        if filter.matches(name) {
            names.push(name.to_string());
        }
    }
    debug!(count = names.len(), input = %input.display(), "Listed candidates");
    Ok(CandidateList(names))
}
