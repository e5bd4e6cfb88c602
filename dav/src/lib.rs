// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! `WebDAV` chunked-upload client for cloud-storage servers.
//!
//! Files are uploaded into a server-side upload collection one chunk at a
//! time, then assembled into their destination with a single `MOVE`. An
//! [`UploadState`] records the acknowledged chunks so an interrupted upload
//! resumes where it stopped.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(clippy::similar_names, clippy::single_match_else)]

mod client;
mod config;
mod error;
mod http;
mod state;
mod types;

pub use crate::client::{ChunkedUploadClient, UploadOutcome};
pub use crate::config::{AuthMethod, DavConfig};
pub use crate::error::DavError;
pub use crate::state::UploadState;
pub use crate::types::{ETag, Href, TransferId};
pub use nimbus_chunk::{Chunk, ChunkError};
