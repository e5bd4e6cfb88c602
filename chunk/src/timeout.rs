// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

/// Shortest timeout granted to an assemble request.
pub const ASSEMBLE_TIME_MIN: Duration = Duration::from_secs(30);

/// Longest timeout granted to an assemble request.
pub const ASSEMBLE_TIME_MAX: Duration = Duration::from_secs(30 * 60);

/// Timeout granted per started (decimal) gigabyte of file size.
pub const ASSEMBLE_TIME_PER_GB: Duration = Duration::from_secs(3 * 60);

const BYTES_PER_GB: u64 = 1_000_000_000;

/// Computes the timeout for the request that assembles the uploaded chunks.
///
/// The server needs time proportional to the file size to concatenate the
/// chunks, so the timeout grows by [`ASSEMBLE_TIME_PER_GB`] for each started
/// gigabyte, bounded by [`ASSEMBLE_TIME_MIN`] and [`ASSEMBLE_TIME_MAX`].
#[must_use]
pub fn calculate_assemble_timeout(file_size: u64) -> Duration {
    let gigabytes = file_size.div_ceil(BYTES_PER_GB);
    let scaled = u32::try_from(gigabytes)
        .map_or(ASSEMBLE_TIME_MAX, |gb| ASSEMBLE_TIME_PER_GB.saturating_mul(gb));
    scaled.clamp(ASSEMBLE_TIME_MIN, ASSEMBLE_TIME_MAX)
}
