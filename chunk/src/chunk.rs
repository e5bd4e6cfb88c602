// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;

use crate::error::ChunkError;

/// An inclusive byte range `[start, end]` of a file.
///
/// A `Chunk` is a plain value: two chunks are equal when both offsets are
/// equal. Its textual form `<start>-<end>` is also the name of the chunk
/// resource inside a server-side upload collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Chunk {
    start: u64,
    end: u64,
}

impl Chunk {
    /// Creates a new chunk covering `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidRange`] if `start > end`.
    pub fn new(start: u64, end: u64) -> Result<Self, ChunkError> {
        if start > end {
            return Err(ChunkError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub(crate) const fn new_unchecked(start: u64, end: u64) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// First byte offset covered by the chunk.
    #[must_use]
    pub const fn start(&self) -> u64 {
        self.start
    }

    /// Last byte offset covered by the chunk, inclusive.
    #[must_use]
    pub const fn end(&self) -> u64 {
        self.end
    }

    /// Number of offsets covered. A chunk is never empty.
    ///
    /// Saturates at `u64::MAX` for the chunk `0-18446744073709551615`, which
    /// covers one offset more than `u64` can count.
    #[must_use]
    #[expect(clippy::len_without_is_empty)]
    pub const fn len(&self) -> u64 {
        (self.end - self.start).saturating_add(1)
    }

    /// Returns `true` if `offset` lies inside the chunk.
    #[must_use]
    pub const fn contains(&self, offset: u64) -> bool {
        self.start <= offset && offset <= self.end
    }

    /// Number of real file bytes in the chunk for a file of `total_length`
    /// bytes.
    ///
    /// The terminal chunk of a plan ends at `total_length` itself, one past
    /// the last byte, so its payload is one byte shorter than [`Chunk::len`].
    #[must_use]
    pub const fn payload_len(&self, total_length: u64) -> u64 {
        if self.start >= total_length {
            return 0;
        }
        let last = if self.end < total_length {
            self.end
        } else {
            total_length - 1
        };
        last - self.start + 1
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for Chunk {
    type Err = ChunkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| ChunkError::Parse(s.to_string()))?;
        let start = start
            .parse()
            .map_err(|_| ChunkError::Parse(s.to_string()))?;
        let end = end.parse().map_err(|_| ChunkError::Parse(s.to_string()))?;
        Self::new(start, end)
    }
}

impl TryFrom<String> for Chunk {
    type Error = ChunkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Chunk> for String {
    fn from(chunk: Chunk) -> Self {
        chunk.to_string()
    }
}
