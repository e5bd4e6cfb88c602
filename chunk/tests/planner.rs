// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property tests for missing-chunk planning and assemble timeouts.

use nimbus_chunk::{Chunk, calculate_assemble_timeout, compute_missing_chunks, plan_upload};
use proptest::prelude::*;

fn existing_chunks() -> impl Strategy<Value = Vec<Chunk>> {
    prop::collection::vec((0u64..6_000, 0u64..1_500), 0..12).prop_map(|ranges| {
        ranges
            .into_iter()
            .map(|(start, len)| Chunk::new(start, start + len).unwrap())
            .collect()
    })
}

fn covered_by(chunks: &[Chunk], offset: u64) -> bool {
    chunks.iter().any(|c| c.contains(offset))
}

/// Same as [`covered_by`] for a sorted, non-overlapping list.
fn covered_by_sorted(chunks: &[Chunk], offset: u64) -> bool {
    let i = chunks.partition_point(|c| c.end() < offset);
    chunks.get(i).is_some_and(|c| c.contains(offset))
}

proptest! {
    /// Existing and missing chunks together cover every offset of the file.
    #[test]
    fn missing_chunks_fill_every_gap(
        existing in existing_chunks(),
        total_length in 0u64..5_000,
        chunk_size in 1u64..2_048,
    ) {
        let missing = compute_missing_chunks(&existing, total_length, chunk_size).unwrap();
        for offset in 0..=total_length {
            prop_assert!(
                covered_by(&existing, offset) || covered_by_sorted(&missing, offset),
                "offset {offset} left uncovered"
            );
        }
    }

    /// Missing chunks never re-send bytes the server already has.
    #[test]
    fn missing_chunks_skip_existing_bytes(
        existing in existing_chunks(),
        total_length in 0u64..5_000,
        chunk_size in 1u64..2_048,
    ) {
        let missing = compute_missing_chunks(&existing, total_length, chunk_size).unwrap();
        for chunk in &missing {
            prop_assert!(chunk.end() <= total_length);
            prop_assert!(chunk.len() <= chunk_size);
            for offset in chunk.start()..=chunk.end() {
                prop_assert!(!covered_by(&existing, offset));
            }
        }
    }

    /// Output is ascending and non-overlapping; neighbours only touch where a
    /// gap was cut at the chunk size.
    #[test]
    fn missing_chunks_are_ordered(
        existing in existing_chunks(),
        total_length in 0u64..20_000,
        chunk_size in 1u64..2_048,
    ) {
        let missing = compute_missing_chunks(&existing, total_length, chunk_size).unwrap();
        for pair in missing.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            prop_assert!(a.end() < b.start(), "{a} overlaps {b}");
            if a.end() + 1 == b.start() {
                prop_assert_eq!(a.len(), chunk_size);
            }
        }
    }

    /// Acknowledging every missing chunk completes the upload.
    #[test]
    fn missing_chunks_idempotent(
        existing in existing_chunks(),
        total_length in 0u64..20_000,
        chunk_size in 1u64..2_048,
    ) {
        let missing = compute_missing_chunks(&existing, total_length, chunk_size).unwrap();
        let mut all = existing.clone();
        all.extend(missing);
        let plan = plan_upload(&all, total_length, chunk_size).unwrap();
        prop_assert!(plan.is_complete());
        prop_assert_eq!(plan.pending_bytes, 0);
    }

    /// A larger file never gets a shorter assemble timeout.
    #[test]
    fn assemble_timeout_monotonic(a in any::<u64>(), b in any::<u64>()) {
        let (small, large) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(calculate_assemble_timeout(small) <= calculate_assemble_timeout(large));
    }
}

#[test]
fn planner_resume_after_partial_upload() {
    let chunk_size = 512;
    let total_length = 2048;

    let first = compute_missing_chunks(&[], total_length, chunk_size).unwrap();
    assert_eq!(first.len(), 5);

    // server acknowledged the first two chunks before the connection dropped
    let acknowledged: Vec<Chunk> = first.iter().take(2).copied().collect();
    let resumed = compute_missing_chunks(&acknowledged, total_length, chunk_size).unwrap();
    assert_eq!(resumed, first[2..].to_vec());
}

#[test]
fn planner_accepts_any_collection() {
    let existing: std::collections::HashSet<Chunk> =
        [Chunk::new(0, 1023).unwrap()].into_iter().collect();
    let missing = compute_missing_chunks(&existing, 1024, 1024).unwrap();
    assert_eq!(missing, [Chunk::new(1024, 1024).unwrap()]);
}
