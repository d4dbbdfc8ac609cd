//! Delivering requests to the active course tab.

use std::time::Duration;

use async_trait::async_trait;
use progress_helper_cdp::CdpClient;
use progress_helper_config::Config;
use tracing::info;

use crate::cdp_page::CdpPage;
use crate::error::{PageError, TransportError};
use crate::handler::ContentHandler;
use crate::locator::PageLayout;
use crate::message::{Request, Response};

/// Sends one request to a page and waits for its response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response, TransportError>;
}

/// Transport over the Chrome DevTools Protocol.
///
/// Every request opens a fresh connection, picks the first regular tab whose
/// URL contains the configured filter and runs the request there.
pub struct TabTransport {
    endpoint: String,
    tab_url_contains: String,
    call_timeout: Duration,
    default_delay: Duration,
    layout: PageLayout,
}

impl TabTransport {
    pub fn from_config(config: &Config) -> Result<Self, PageError> {
        Ok(Self {
            endpoint: config.browser.endpoint.clone(),
            tab_url_contains: config.browser.tab_url_contains.clone(),
            call_timeout: Duration::from_secs(config.browser.call_timeout_secs),
            default_delay: Duration::from_millis(config.ticker.default_delay_ms),
            layout: PageLayout::from_config(config)?,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for TabTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let client = CdpClient::connect(&self.endpoint, self.call_timeout).await?;

        let Some(tab) = client.find_page(&self.tab_url_contains).await? else {
            return Err(TransportError::NoActiveTab);
        };
        info!("Sending {} to '{}' ({})", request.action(), tab.title, tab.url);

        let session = client.attach_page(&tab.id).await?;
        let page = CdpPage::attach(session).await?;
        let handler = ContentHandler::new(page, self.layout.clone(), self.default_delay);

        Ok(handler.handle(request).await)
    }
}
