use pano_select::select::partition::{chunk_count, chunks};
use pano_select::{CHUNK_SIZE, Percentage, SamplingPlan};
use std::num::NonZeroUsize;

#[test]
fn chunk_count_is_floor_plus_one_for_many_sizes() {
    for size in [1usize, 2, 7, 10, 1000] {
        let nz = NonZeroUsize::new(size).unwrap();
        for total in [0usize, 1, size - 1, size, size + 1, 3 * size, 3 * size + 5] {
            assert_eq!(chunk_count(total, nz), total / size + 1, "total={total} size={size}");
            assert_eq!(chunks(total, nz).count(), total / size + 1);
        }
    }
}

#[test]
fn ten_percent_of_default_chunk_is_one_hundred() {
    let plan = SamplingPlan::new(0, Percentage::try_from(10).unwrap());
    assert_eq!(plan.chunk_size, CHUNK_SIZE);
    assert_eq!(plan.picks_per_chunk(), 100);
}

#[test]
fn reference_collection_of_2500() {
    let plan = SamplingPlan::new(2500, Percentage::try_from(10).unwrap());
    assert_eq!(plan.chunk_count(), 3);
    assert_eq!(plan.max_draws(), 300);
    assert_eq!(plan.estimated(), 250);
}

#[test]
fn every_in_range_index_belongs_to_exactly_one_chunk() {
    let size = NonZeroUsize::new(7).unwrap();
    let total = 30;
    let mut seen = vec![0u32; total];
    for chunk in chunks(total, size) {
        for pick in 0..size.get() {
            if let Some(abs) = chunk.resolve(pick, total) {
                seen[abs] += 1;
            }
        }
    }
    assert!(seen.iter().all(|&n| n == 1));
}
