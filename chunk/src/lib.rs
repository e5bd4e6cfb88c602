// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Plan the byte ranges of a chunked upload.
//!
//! Given the length of a file, a chunk size and the chunks the server already
//! holds, [`compute_missing_chunks`] returns the ranges that still need to be
//! transferred, and [`calculate_assemble_timeout`] returns how long the final
//! assemble request may take.

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

mod chunk;
mod error;
mod planner;
mod timeout;

pub use crate::chunk::Chunk;
pub use crate::error::ChunkError;
pub use crate::planner::{DEFAULT_CHUNK_SIZE, UploadPlan, compute_missing_chunks, plan_upload};
pub use crate::timeout::{
    ASSEMBLE_TIME_MAX, ASSEMBLE_TIME_MIN, ASSEMBLE_TIME_PER_GB, calculate_assemble_timeout,
};
