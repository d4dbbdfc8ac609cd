//! CDP browser client.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tracing::debug;

use crate::connection::Connection;
use crate::error::CdpError;
use crate::protocol::{BrowserVersion, PageInfo};
use crate::session::PageSession;

/// CDP client bound to one browser.
pub struct CdpClient {
    /// HTTP endpoint for page discovery.
    http_endpoint: String,
    connection: Arc<Connection>,
}

impl CdpClient {
    /// Connect to Chrome at the given HTTP debugging endpoint
    /// (e.g. `http://localhost:9222`).
    pub async fn connect(endpoint: &str, call_timeout: Duration) -> Result<Self, CdpError> {
        let http_endpoint = endpoint.trim_end_matches('/').to_string();
        url::Url::parse(&http_endpoint)?;

        let version = Self::fetch_version(&http_endpoint).await?;
        debug!("Connected to browser: {}", version.browser);

        let connection = Connection::open(&version.web_socket_debugger_url, call_timeout).await?;

        Ok(Self {
            http_endpoint,
            connection,
        })
    }

    /// Read `/json/version` to discover the browser WebSocket URL.
    pub async fn fetch_version(http_endpoint: &str) -> Result<BrowserVersion, CdpError> {
        let version_url = format!("{}/json/version", http_endpoint);
        debug!("Fetching browser version from {}", version_url);

        reqwest::get(&version_url)
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| CdpError::BrowserUnavailable(format!("{}: {}", http_endpoint, e)))?
            .json()
            .await
            .map_err(|e| CdpError::BrowserUnavailable(format!("{}: {}", http_endpoint, e)))
    }

    /// Send a browser-level CDP command.
    async fn call(
        &self,
        method: &str,
        params: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, CdpError> {
        self.connection.call(method, params, None).await
    }

    /// List all targets known to the HTTP endpoint, most recently focused first.
    async fn list_pages(&self) -> Result<Vec<PageInfo>, CdpError> {
        let url = format!("{}/json/list", self.http_endpoint);
        let pages: Vec<PageInfo> = reqwest::get(&url).await?.json().await?;
        Ok(pages)
    }

    /// First tab whose URL contains `url_contains` (any tab when empty).
    pub async fn find_page(&self, url_contains: &str) -> Result<Option<PageInfo>, CdpError> {
        let pages = self.list_pages().await?;
        Ok(select_page(pages, url_contains))
    }

    /// Attach to an existing page.
    pub async fn attach_page(&self, target_id: &str) -> Result<PageSession, CdpError> {
        let result = self
            .call(
                "Target.attachToTarget",
                Some(json!({
                    "targetId": target_id,
                    "flatten": true
                })),
            )
            .await?;

        let session_id = result["sessionId"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("Missing sessionId".to_string()))?
            .to_string();

        let session = PageSession::new(target_id.to_string(), session_id, self.connection.clone());
        session.enable_domains().await?;

        Ok(session)
    }
}

/// Pick the first regular tab matching the URL filter.
pub(crate) fn select_page(pages: Vec<PageInfo>, url_contains: &str) -> Option<PageInfo> {
    pages
        .into_iter()
        .filter(PageInfo::is_page)
        .find(|p| url_contains.is_empty() || p.url.contains(url_contains))
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
