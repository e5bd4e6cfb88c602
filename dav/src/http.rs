// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client wrapper with authentication and status mapping.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};

use crate::config::{AuthMethod, DavConfig};
use crate::error::DavError;
use crate::types::{ETag, Href};

/// HTTP client for `WebDAV` operations.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    config: DavConfig,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client creation fails.
    pub fn new(config: DavConfig) -> Result<Self, DavError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client, config })
    }

    /// Builds a request with authentication headers.
    pub fn build_request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut req = self.client.request(method, url);

        match &self.config.auth {
            AuthMethod::Basic { username, password } => {
                req = req.basic_auth(username, Some(password));
            }
            AuthMethod::Bearer { token } => {
                req = req.bearer_auth(token);
            }
            AuthMethod::None => {}
        }

        req
    }

    /// Executes a request and checks for HTTP errors.
    ///
    /// `href` names the target resource in [`DavError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or returns an error status code.
    pub async fn execute(&self, req: RequestBuilder, href: &Href) -> Result<Response, DavError> {
        let resp = req.send().await?;
        let status = resp.status();
        tracing::debug!(%href, %status, "request completed");

        match status {
            s if s.is_success() => Ok(resp),
            StatusCode::NOT_FOUND => Err(DavError::NotFound(href.clone())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(DavError::Auth(status.to_string()))
            }
            StatusCode::PRECONDITION_FAILED => Err(DavError::PreconditionFailed(
                Self::read_body(resp).await,
            )),
            StatusCode::INSUFFICIENT_STORAGE => Err(DavError::InsufficientStorage),
            status => {
                let text = Self::read_body(resp).await;
                Err(DavError::Http(format!("{status}: {text}")))
            }
        }
    }

    async fn read_body(resp: Response) -> String {
        resp.text()
            .await
            .unwrap_or_else(|_| "Unable to read response".to_string())
    }

    /// Returns a `WebDAV` extension method such as `MKCOL` or `MOVE`.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is not a valid method token.
    pub fn method(name: &str) -> Result<Method, DavError> {
        Method::from_bytes(name.as_bytes())
            .map_err(|e| DavError::Http(format!("Invalid method: {e}")))
    }

    /// Extracts `ETag` from response headers, if present.
    pub fn extract_etag(resp: &Response) -> Option<ETag> {
        resp.headers()
            .get("OC-ETag")
            .or_else(|| resp.headers().get("ETag"))
            .and_then(|v| v.to_str().ok())
            .map(ETag::from)
    }
}
