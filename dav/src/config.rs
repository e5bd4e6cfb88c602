// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use nimbus_chunk::DEFAULT_CHUNK_SIZE;

/// Credentials attached to every request.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(tag = "type")]
pub enum AuthMethod {
    /// No authentication.
    #[serde(rename = "none")]
    #[default]
    None,
    /// Basic authentication (username/app password).
    #[serde(rename = "basic")]
    Basic {
        /// Username for authentication.
        username: String,
        /// Password or app password for authentication.
        password: String,
    },
    /// Bearer token authentication (OAuth).
    #[serde(rename = "bearer")]
    Bearer {
        /// Bearer token.
        token: String,
    },
}

/// `WebDAV` server configuration.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct DavConfig {
    /// Base URL of the server, e.g. `https://cloud.example.com`.
    pub base_url: String,
    /// Root of the user's files (e.g., /remote.php/dav/files/user/).
    pub files_home: String,
    /// Root of the user's upload collections (e.g., /remote.php/dav/uploads/user/).
    pub uploads_home: String,
    /// Authentication method.
    #[serde(default)]
    pub auth: AuthMethod,
    /// Request timeout in seconds, except for assembling.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Size of each uploaded chunk in bytes.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: u64,
}

const fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("nimbus-dav/", env!("CARGO_PKG_VERSION")).to_string()
}

const fn default_chunk_size() -> u64 {
    DEFAULT_CHUNK_SIZE
}

impl Default for DavConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            files_home: String::new(),
            uploads_home: String::new(),
            auth: AuthMethod::default(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
            chunk_size: default_chunk_size(),
        }
    }
}
