//! Executes requests against one course page.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::actuator::Actuator;
use crate::locator::PageLayout;
use crate::message::{Request, Response};
use crate::page::CoursePage;
use crate::sections::section_summaries;

pub struct ContentHandler<P: CoursePage> {
    page: P,
    layout: PageLayout,
    default_delay: Duration,
}

impl<P: CoursePage> ContentHandler<P> {
    pub fn new(page: P, layout: PageLayout, default_delay: Duration) -> Self {
        Self {
            page,
            layout,
            default_delay,
        }
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    /// Pause to use for a requested delay in milliseconds.
    pub fn effective_delay(&self, requested: Option<u64>) -> Duration {
        match requested {
            Some(ms) if ms > 0 => Duration::from_millis(ms),
            _ => self.default_delay,
        }
    }

    pub async fn handle(&self, request: Request) -> Response {
        debug!("Handling {} request", request.action());
        match request {
            Request::TickSpec { spec, delay } => {
                let delay = self.effective_delay(delay);
                let actuator = Actuator::new(&self.page, &self.layout);
                match actuator.run_spec(&spec, delay).await {
                    Ok(report) => Response::Ticked {
                        clicked: report.clicked,
                        message: report.message,
                    },
                    Err(e) => {
                        warn!("tickSpec failed: {}", e);
                        Response::error(e.to_string())
                    }
                }
            }
            Request::GetSections => Response::Sections {
                sections: section_summaries(&self.page, &self.layout).await,
            },
        }
    }

    /// Decode a raw JSON message and handle it.
    pub async fn handle_value(&self, message: &Value) -> Response {
        match serde_json::from_value::<Request>(message.clone()) {
            Ok(request) => self.handle(request).await,
            Err(e) => {
                warn!("Rejected malformed request: {}", e);
                Response::error(format!("Malformed request: {}", e))
            }
        }
    }
}
