// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use nimbus_chunk::ChunkError;

use crate::types::Href;

/// Chunked upload errors.
#[non_exhaustive]
#[derive(Debug)]
pub enum DavError {
    /// HTTP layer error.
    Http(String),

    /// Local file or state file I/O error.
    Io(String),

    /// Authentication rejected by the server.
    Auth(String),

    /// Resource not found.
    NotFound(Href),

    /// Precondition failed, e.g. the destination changed meanwhile.
    PreconditionFailed(String),

    /// The server has no room left for the upload.
    InsufficientStorage,

    /// Chunk planning error.
    Chunk(ChunkError),

    /// Upload state file could not be read or written.
    State(String),

    /// The local file no longer matches the recorded upload state.
    StateMismatch {
        /// Length recorded when the upload started.
        expected: u64,
        /// Current length of the local file.
        actual: u64,
    },

    /// Configuration error.
    Config(String),
}

impl fmt::Display for DavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "HTTP error: {e}"),
            Self::Io(e) => write!(f, "IO error: {e}"),
            Self::Auth(e) => write!(f, "Authentication failed: {e}"),
            Self::NotFound(href) => write!(f, "Resource not found: {href}"),
            Self::PreconditionFailed(e) => write!(f, "Precondition failed: {e}"),
            Self::InsufficientStorage => write!(f, "Insufficient storage on server"),
            Self::Chunk(e) => write!(f, "Chunk error: {e}"),
            Self::State(e) => write!(f, "Upload state error: {e}"),
            Self::StateMismatch { expected, actual } => write!(
                f,
                "Local file changed since the upload started: expected {expected} bytes, found {actual}"
            ),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for DavError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Chunk(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DavError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

impl From<std::io::Error> for DavError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for DavError {
    fn from(e: serde_json::Error) -> Self {
        Self::State(e.to_string())
    }
}

impl From<ChunkError> for DavError {
    fn from(e: ChunkError) -> Self {
        Self::Chunk(e)
    }
}
