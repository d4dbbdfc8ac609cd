//! # Progress Helper Page
//!
//! Everything that touches the course page: finding section panels and
//! their completion controls, marking controls with a pause between each,
//! summarizing sections, and the request/response messages used to drive a
//! page from outside.
//!
//! The DOM is reached through the [`CoursePage`] trait. [`CdpPage`] implements
//! it over a Chrome DevTools session and [`TabTransport`] wires the pieces
//! together for the active tab.

pub mod actuator;
pub mod cdp_page;
pub mod error;
pub mod handler;
pub mod locator;
pub mod message;
pub mod page;
pub mod sections;
pub mod transport;

#[cfg(test)]
mod testing;

pub use actuator::{Actuator, TickReport, NO_SPECS_PARSED};
pub use cdp_page::CdpPage;
pub use error::{PageError, TransportError};
pub use handler::ContentHandler;
pub use locator::{
    ByHeading, ByOrdinal, HeadingMatcher, PageLayout, Panel, PanelIndex, PanelLocator,
    PanelStrategy,
};
pub use message::{Request, Response};
pub use page::{CoursePage, DomEvent, ElementRef};
pub use sections::{section_summaries, SectionInfo};
pub use transport::{TabTransport, Transport};
