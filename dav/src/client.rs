// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Chunked upload client.

use std::io::SeekFrom;
use std::sync::Arc;

use jiff::Timestamp;
use nimbus_chunk::{Chunk, calculate_assemble_timeout, plan_upload};
use reqwest::Method;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::config::DavConfig;
use crate::error::DavError;
use crate::http::HttpClient;
use crate::state::UploadState;
use crate::types::{ETag, Href, TransferId};

/// Name of the virtual resource that stands for the assembled file.
const ASSEMBLE_TARGET: &str = ".file";

/// Client for the `WebDAV` chunked-upload protocol.
///
/// An upload lives in its own collection below the uploads home. Each chunk
/// is `PUT` as `<start>-<end>` inside it, and a final `MOVE` of the virtual
/// `.file` resource asks the server to assemble the chunks at the
/// destination.
///
/// # Example
///
/// ```no_run
/// use nimbus_dav::{AuthMethod, ChunkedUploadClient, DavConfig, Href, UploadState};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = DavConfig {
///     base_url: "https://cloud.example.com".to_string(),
///     files_home: "/remote.php/dav/files/alice/".to_string(),
///     uploads_home: "/remote.php/dav/uploads/alice/".to_string(),
///     auth: AuthMethod::Basic {
///         username: "alice".to_string(),
///         password: "app-password".to_string(),
///     },
///     ..Default::default()
/// };
///
/// let client = ChunkedUploadClient::new(config)?;
/// let len = std::fs::metadata("video.mp4")?.len();
/// let mut state = UploadState::new("video.mp4", Href::from("Videos/video.mp4"), len, client.config().chunk_size);
/// client.upload_file(&mut state).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ChunkedUploadClient {
    http: Arc<HttpClient>,
    config: DavConfig,
}

impl ChunkedUploadClient {
    /// Creates a new chunked upload client.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client initialization fails.
    pub fn new(config: DavConfig) -> Result<Self, DavError> {
        if config.chunk_size == 0 {
            return Err(DavError::Config("chunk_size must be positive".to_string()));
        }
        let http = HttpClient::new(config.clone())?;
        Ok(Self {
            http: Arc::new(http),
            config,
        })
    }

    /// Returns the configuration the client was built with.
    #[must_use]
    pub const fn config(&self) -> &DavConfig {
        &self.config
    }

    /// Creates the upload collection for `transfer`.
    ///
    /// # Errors
    ///
    /// Returns an error if MKCOL fails.
    pub async fn create_upload(
        &self,
        transfer: &TransferId,
        destination: &Href,
    ) -> Result<(), DavError> {
        let href = self.upload_href(transfer);
        tracing::debug!(%href, "creating upload collection");

        let req = self
            .http
            .build_request(HttpClient::method("MKCOL")?, &self.full_url(&href))
            .header("Destination", self.destination_url(destination));
        self.http.execute(req, &href).await?;
        Ok(())
    }

    /// Uploads the bytes of `chunk` into the upload collection.
    ///
    /// Returns the `ETag` the server assigned to the chunk, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if PUT fails.
    pub async fn put_chunk(
        &self,
        transfer: &TransferId,
        destination: &Href,
        total_length: u64,
        chunk: Chunk,
        body: Vec<u8>,
    ) -> Result<Option<ETag>, DavError> {
        let href = self.upload_href(transfer).join(&chunk.to_string());
        tracing::debug!(%href, bytes = body.len(), "uploading chunk");

        let req = self
            .http
            .build_request(Method::PUT, &self.full_url(&href))
            .header("Destination", self.destination_url(destination))
            .header("OC-Total-Length", total_length)
            .header("Content-Type", "application/octet-stream")
            .body(body);
        let resp = self.http.execute(req, &href).await?;
        Ok(HttpClient::extract_etag(&resp))
    }

    /// Asks the server to assemble the uploaded chunks at `destination`.
    ///
    /// The request timeout scales with `total_length`, see
    /// [`calculate_assemble_timeout`].
    ///
    /// # Errors
    ///
    /// Returns an error if MOVE fails or times out.
    pub async fn assemble(
        &self,
        transfer: &TransferId,
        destination: &Href,
        total_length: u64,
        mtime: Option<Timestamp>,
    ) -> Result<Option<ETag>, DavError> {
        let href = self.upload_href(transfer).join(ASSEMBLE_TARGET);
        let timeout = calculate_assemble_timeout(total_length);
        tracing::debug!(%href, ?timeout, "assembling chunks");

        let mut req = self
            .http
            .build_request(HttpClient::method("MOVE")?, &self.full_url(&href))
            .header("Destination", self.destination_url(destination))
            .header("OC-Total-Length", total_length)
            .header("Overwrite", "T")
            .timeout(timeout);
        if let Some(mtime) = mtime {
            req = req.header("X-OC-Mtime", mtime.as_second());
        }

        let resp = self.http.execute(req, &href).await?;
        Ok(HttpClient::extract_etag(&resp))
    }

    /// Deletes the upload collection and every chunk in it.
    ///
    /// A collection that no longer exists counts as aborted.
    ///
    /// # Errors
    ///
    /// Returns an error if DELETE fails.
    pub async fn abort(&self, transfer: &TransferId) -> Result<(), DavError> {
        let href = self.upload_href(transfer);
        tracing::debug!(%href, "aborting upload");

        let req = self
            .http
            .build_request(Method::DELETE, &self.full_url(&href));
        match self.http.execute(req, &href).await {
            Ok(_) => Ok(()),
            Err(DavError::NotFound(_)) => {
                tracing::warn!(%href, "upload collection already gone");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Uploads the file described by `state`, resuming after the chunks it
    /// already records.
    ///
    /// Every chunk the server accepts is appended to `state` immediately, so
    /// when this fails the caller can persist `state` and call again later.
    ///
    /// # Errors
    ///
    /// Returns an error if the local file cannot be read, changed length since
    /// the upload started, or any request fails.
    #[tracing::instrument(
        skip(self, state),
        fields(transfer = %state.transfer_id, destination = %state.destination)
    )]
    pub async fn upload_file(&self, state: &mut UploadState) -> Result<UploadOutcome, DavError> {
        let mut file = File::open(&state.local_path).await?;
        let metadata = file.metadata().await?;
        let total_length = metadata.len();
        if total_length != state.total_length {
            return Err(DavError::StateMismatch {
                expected: state.total_length,
                actual: total_length,
            });
        }

        let plan = plan_upload(&state.acknowledged, total_length, state.chunk_size)?;
        tracing::info!(
            missing = plan.missing.len(),
            pending_bytes = plan.pending_bytes,
            "planned upload"
        );

        if !state.is_started() {
            self.create_upload(&state.transfer_id, &state.destination)
                .await?;
            state.mark_started();
        }

        let mut uploaded_bytes = 0;
        for &chunk in &plan.missing {
            let body = read_chunk(&mut file, chunk, total_length).await?;
            self.put_chunk(
                &state.transfer_id,
                &state.destination,
                total_length,
                chunk,
                body,
            )
            .await?;
            state.acknowledge(chunk);
            uploaded_bytes += chunk.payload_len(total_length);
        }

        let mtime = metadata
            .modified()
            .ok()
            .and_then(|t| Timestamp::try_from(t).ok());
        let etag = self
            .assemble(&state.transfer_id, &state.destination, total_length, mtime)
            .await?;
        tracing::info!(uploaded_bytes, "upload assembled");

        Ok(UploadOutcome {
            destination: state.destination.clone(),
            etag,
            uploaded_chunks: plan.missing.len(),
            uploaded_bytes,
        })
    }

    fn upload_href(&self, transfer: &TransferId) -> Href {
        Href::from(self.config.uploads_home.as_str()).join(&transfer.to_string())
    }

    fn destination_url(&self, destination: &Href) -> String {
        let href = Href::from(self.config.files_home.as_str()).join(destination);
        self.full_url(&href)
    }

    /// Builds full URL from href.
    fn full_url(&self, href: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), href)
    }
}

/// Reads the file bytes of `chunk`; the terminal marker chunk has none.
async fn read_chunk(file: &mut File, chunk: Chunk, total_length: u64) -> Result<Vec<u8>, DavError> {
    let len = usize::try_from(chunk.payload_len(total_length))
        .map_err(|_| DavError::Config(format!("Chunk {chunk} does not fit in memory")))?;
    let mut buf = vec![0; len];
    if len > 0 {
        file.seek(SeekFrom::Start(chunk.start())).await?;
        file.read_exact(&mut buf).await?;
    }
    Ok(buf)
}

/// Result of a completed upload.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    /// Where the assembled file now lives.
    pub destination: Href,
    /// `ETag` of the assembled file, if the server reported one.
    pub etag: Option<ETag>,
    /// Number of chunks sent by this call.
    pub uploaded_chunks: usize,
    /// Number of file bytes sent by this call.
    pub uploaded_bytes: u64,
}
