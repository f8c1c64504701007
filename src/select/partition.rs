//! Chunking of the candidate list.
//!
//! The list is cut into fixed windows of `CHUNK_SIZE` indices and each window
//! gets the same pick budget, so the cost of one sampling step never depends
//! on how large the collection is.

use std::num::NonZeroUsize;

use crate::config::Percentage;

/// Window size used for real runs.
pub const CHUNK_SIZE: NonZeroUsize = NonZeroUsize::new(1000).unwrap();

/// `floor(total / chunk_size) + 1`.
///
/// Always at least one chunk, and one trailing empty chunk when `total` is an
/// exact multiple of `chunk_size`. Kept as is: the number of rounds feeds the
/// reported draw counts.
pub fn chunk_count(total: usize, chunk_size: NonZeroUsize) -> usize {
    total / chunk_size.get() + 1
}

/// Half-open index window `[start, start + size)` over the candidate list.
/// Only the last chunk can extend past the end of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub index: usize,
    pub start: usize,
    pub size: NonZeroUsize,
}

impl Chunk {
    /// Absolute candidate index for a within-chunk pick, or None when it falls
    /// outside the chunk or past the end of the list.
    pub fn resolve(&self, pick: usize, total: usize) -> Option<usize> {
        if pick >= self.size.get() {
            return None;
        }
        self.start.checked_add(pick).filter(|&abs| abs < total)
    }

    /// Number of real candidates inside this window.
    pub fn populated(&self, total: usize) -> usize {
        total.saturating_sub(self.start).min(self.size.get())
    }
}

/// All chunks for a list of `total` candidates, in order.
pub fn chunks(total: usize, chunk_size: NonZeroUsize) -> impl Iterator<Item = Chunk> {
    (0..chunk_count(total, chunk_size)).map(move |index| Chunk {
        index,
        start: index * chunk_size.get(),
        size: chunk_size,
    })
}

/// Sizing for one run, computed once from the list length and the percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingPlan {
    pub total: usize,
    pub chunk_size: NonZeroUsize,
    pub percentage: Percentage,
}

impl SamplingPlan {
    pub fn new(total: usize, percentage: Percentage) -> Self {
        Self::with_chunk_size(total, percentage, CHUNK_SIZE)
    }

    pub fn with_chunk_size(total: usize, percentage: Percentage, chunk_size: NonZeroUsize) -> Self {
        Self {
            total,
            chunk_size,
            percentage,
        }
    }

    pub fn chunk_count(&self) -> usize {
        chunk_count(self.total, self.chunk_size)
    }

    /// `floor(chunk_size * percentage / 100)`; the same for every chunk, partial or not.
    pub fn picks_per_chunk(&self) -> usize {
        self.percentage.of(self.chunk_size.get())
    }

    /// Upper bound on draws over the whole run.
    pub fn max_draws(&self) -> usize {
        self.chunk_count() * self.picks_per_chunk()
    }

    /// Naive estimate `floor(total * percentage / 100)`, reported next to the actual count.
    pub fn estimated(&self) -> usize {
        self.percentage.of(self.total)
    }

    pub fn chunks(&self) -> impl Iterator<Item = Chunk> {
        chunks(self.total, self.chunk_size)
    }
}
