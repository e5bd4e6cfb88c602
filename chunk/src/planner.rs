// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Missing-chunk computation.
//!
//! The coverage domain of a file of `total_length` bytes is the inclusive
//! range `[0, total_length]`: the final chunk of a plan ends at
//! `total_length` itself, which servers rely on to recognise the terminal
//! offset.

use std::time::Duration;

use crate::chunk::Chunk;
use crate::error::ChunkError;
use crate::timeout::calculate_assemble_timeout;

/// Default size of an uploaded chunk, 10 MiB.
pub const DEFAULT_CHUNK_SIZE: u64 = 10 * 1024 * 1024;

/// Computes the chunks of a file that still need to be uploaded.
///
/// `existing` holds the chunks already present on the server. They may
/// overlap, come in any order, ignore chunk boundaries or reach past
/// `total_length`; they are normalized before use. Every uncovered span of
/// `[0, total_length]` is split into pieces of at most `chunk_size` offsets,
/// returned in ascending order.
///
/// # Errors
///
/// Returns [`ChunkError::InvalidArgument`] if `chunk_size` is zero.
///
/// # Example
///
/// ```
/// use nimbus_chunk::{Chunk, compute_missing_chunks};
///
/// let existing = [Chunk::new(0, 1023)?, Chunk::new(1028, 1100)?];
/// let missing = compute_missing_chunks(&existing, 2048, 1024)?;
/// assert_eq!(missing, [Chunk::new(1024, 1027)?, Chunk::new(1101, 2048)?]);
/// # Ok::<(), nimbus_chunk::ChunkError>(())
/// ```
pub fn compute_missing_chunks<'a, I>(
    existing: I,
    total_length: u64,
    chunk_size: u64,
) -> Result<Vec<Chunk>, ChunkError>
where
    I: IntoIterator<Item = &'a Chunk>,
{
    if chunk_size == 0 {
        return Err(ChunkError::InvalidArgument(
            "chunk size must be positive".to_string(),
        ));
    }

    let mut missing = Vec::new();
    let mut cursor = 0;
    for covered in merge_covered(existing, total_length) {
        if covered.start() > cursor {
            split_span(cursor, covered.start() - 1, chunk_size, &mut missing);
        }
        match covered.end().checked_add(1) {
            Some(next) => cursor = next,
            None => return Ok(missing),
        }
    }

    if cursor <= total_length {
        split_span(cursor, total_length, chunk_size, &mut missing);
    }
    Ok(missing)
}

/// Sorts the known chunks, clamps them to the coverage domain and merges
/// every overlapping or adjacent pair.
fn merge_covered<'a, I>(existing: I, total_length: u64) -> Vec<Chunk>
where
    I: IntoIterator<Item = &'a Chunk>,
{
    let mut ranges: Vec<Chunk> = existing
        .into_iter()
        .filter_map(|chunk| {
            if chunk.start() > total_length {
                tracing::debug!(%chunk, total_length, "ignoring chunk past end of file");
                None
            } else {
                let end = chunk.end().min(total_length);
                Some(Chunk::new_unchecked(chunk.start(), end))
            }
        })
        .collect();
    ranges.sort_unstable();

    let mut merged: Vec<Chunk> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start() <= last.end().saturating_add(1) => {
                let end = last.end().max(range.end());
                *last = Chunk::new_unchecked(last.start(), end);
            }
            _ => merged.push(range),
        }
    }
    merged
}

/// Splits the uncovered span `from..=to` into pieces of at most `chunk_size`.
fn split_span(from: u64, to: u64, chunk_size: u64, out: &mut Vec<Chunk>) {
    let mut start = from;
    loop {
        let end = start.saturating_add(chunk_size - 1).min(to);
        out.push(Chunk::new_unchecked(start, end));
        if end == to {
            break;
        }
        start = end + 1;
    }
}

/// Everything the caller needs to resume an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPlan {
    /// Chunks still to upload, ascending by start offset.
    pub missing: Vec<Chunk>,
    /// File bytes carried by the missing chunks.
    pub pending_bytes: u64,
    /// Timeout for the final assemble request.
    pub assemble_timeout: Duration,
}

impl UploadPlan {
    /// Returns `true` once nothing is left to upload.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Computes the missing chunks together with the assemble timeout.
///
/// # Errors
///
/// Returns [`ChunkError::InvalidArgument`] if `chunk_size` is zero.
pub fn plan_upload<'a, I>(
    existing: I,
    total_length: u64,
    chunk_size: u64,
) -> Result<UploadPlan, ChunkError>
where
    I: IntoIterator<Item = &'a Chunk>,
{
    let missing = compute_missing_chunks(existing, total_length, chunk_size)?;
    let pending_bytes = missing.iter().map(|c| c.payload_len(total_length)).sum();
    Ok(UploadPlan {
        missing,
        pending_bytes,
        assemble_timeout: calculate_assemble_timeout(total_length),
    })
}
