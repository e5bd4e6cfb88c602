// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line front-end for planning and running chunked uploads.

mod arg;
mod cli;
mod cmd_generate_completion;
mod cmd_plan;
mod cmd_timeout;
mod cmd_upload;
mod config;
mod formatter;

pub use crate::cli::{Cli, Commands, run};
pub use crate::config::parse_config;

/// Application name, used for the config directory.
pub const APP_NAME: &str = "nimbus";
