//! Chrome DevTools Protocol (CDP) client.
//!
//! A small pure-Rust CDP client: endpoint discovery over HTTP, one WebSocket
//! connection to the browser, and flattened sessions attached to pages.
//!
//! ## Usage
//!
//! 1. Start Chrome with remote debugging:
//!    ```bash
//!    google-chrome --remote-debugging-port=9222
//!    ```
//!
//! 2. Attach to an open tab:
//!    ```rust,ignore
//!    let client = CdpClient::connect("http://localhost:9222", Duration::from_secs(30)).await?;
//!    let page = client.find_page("udemy.com/course").await?.expect("tab open");
//!    let session = client.attach_page(&page.id).await?;
//!    let root = session.get_document().await?;
//!    let headings = session.query_selector_all(root.node_id, "h3").await?;
//!    ```

mod client;
mod connection;
mod error;
mod protocol;
mod session;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::*;
pub use session::PageSession;
