// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Resumable record of a single chunked upload.

use std::path::{Path, PathBuf};

use nimbus_chunk::Chunk;
use tokio::fs;

use crate::error::DavError;
use crate::types::{Href, TransferId};

/// Progress of one upload, persisted by the caller between attempts.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UploadState {
    /// Name of the upload collection on the server.
    pub transfer_id: TransferId,
    /// File being uploaded.
    pub local_path: PathBuf,
    /// Final location of the file, relative to the files home.
    pub destination: Href,
    /// Length of the local file when the upload started.
    pub total_length: u64,
    /// Chunk size the upload was planned with.
    pub chunk_size: u64,
    /// Whether the upload collection was created on the server.
    #[serde(default)]
    pub started: bool,
    /// Chunks the server has acknowledged so far.
    #[serde(default)]
    pub acknowledged: Vec<Chunk>,
}

impl UploadState {
    /// Creates the state of a fresh upload under a new transfer id.
    #[must_use]
    pub fn new(
        local_path: impl Into<PathBuf>,
        destination: Href,
        total_length: u64,
        chunk_size: u64,
    ) -> Self {
        Self {
            transfer_id: TransferId::new(),
            local_path: local_path.into(),
            destination,
            total_length,
            chunk_size,
            started: false,
            acknowledged: Vec::new(),
        }
    }

    /// Returns `true` once the upload collection exists on the server.
    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.started
    }

    /// Records that the upload collection was created.
    pub const fn mark_started(&mut self) {
        self.started = true;
    }

    /// Records a chunk the server accepted.
    pub fn acknowledge(&mut self, chunk: Chunk) {
        self.acknowledged.push(chunk);
    }

    /// Loads a state previously written by [`UploadState::save`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid state.
    pub async fn load(path: &Path) -> Result<Self, DavError> {
        let json = fs::read_to_string(path).await.map_err(|e| {
            DavError::State(format!(
                "Failed to read upload state at {}: {e}",
                path.display()
            ))
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Writes the state as JSON, replacing any previous content.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn save(&self, path: &Path) -> Result<(), DavError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).await.map_err(|e| {
            DavError::State(format!(
                "Failed to write upload state at {}: {e}",
                path.display()
            ))
        })
    }
}
