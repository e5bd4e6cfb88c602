// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Errors raised while building or planning chunks.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChunkError {
    /// An argument is outside the domain of the operation.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A range whose start lies after its end.
    #[error("Invalid chunk range: {start}-{end}")]
    InvalidRange {
        /// First byte offset of the range
        start: u64,
        /// Last byte offset of the range
        end: u64,
    },

    /// A chunk name that is not of the form `<start>-<end>`.
    #[error("Invalid chunk name '{0}'")]
    Parse(String),
}
