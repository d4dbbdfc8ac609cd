//! Page and transport errors.

use progress_helper_cdp::CdpError;
use thiserror::Error;

/// Errors raised while reading or driving the page.
#[derive(Debug, Error)]
pub enum PageError {
    /// Underlying CDP failure.
    #[error(transparent)]
    Cdp(#[from] CdpError),

    /// The element no longer exists or cannot be resolved.
    #[error("Element {0} is gone")]
    ElementGone(i64),

    /// Page-side script threw.
    #[error("Script error: {0}")]
    Script(String),

    /// Page layout configuration could not be used.
    #[error("Invalid page layout: {0}")]
    Layout(String),
}

/// Errors delivering a request to the page.
#[derive(Debug, Error)]
pub enum TransportError {
    /// No tab matches the configured filter.
    #[error("No active tab found")]
    NoActiveTab,

    /// The browser could not be reached.
    #[error("Browser unreachable: {0}")]
    Unreachable(String),

    /// The tab was found but could not be attached or read.
    #[error("Page error: {0}")]
    Page(#[from] PageError),
}

impl From<CdpError> for TransportError {
    fn from(e: CdpError) -> Self {
        if e.is_unreachable() {
            TransportError::Unreachable(e.to_string())
        } else {
            TransportError::Page(PageError::Cdp(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_from_cdp() {
        let cdp = CdpError::BrowserUnavailable("http://localhost:9222".into());
        let err = TransportError::from(cdp);
        assert!(matches!(err, TransportError::Unreachable(_)));
        assert!(err.to_string().contains("localhost:9222"));
    }

    #[test]
    fn test_other_cdp_errors_are_page_errors() {
        let err = TransportError::from(CdpError::Timeout("DOM.getDocument".into()));
        assert!(matches!(err, TransportError::Page(PageError::Cdp(_))));
    }

    #[test]
    fn test_no_active_tab_message() {
        assert_eq!(TransportError::NoActiveTab.to_string(), "No active tab found");
    }
}
