//! Request and response messages exchanged with a course page.
//!
//! The wire shape is plain JSON tagged by `action`:
//!
//! ```json
//! {"action": "tickSpec", "spec": "1;2:1,3", "delay": 200}
//! {"action": "getSections"}
//! ```

use progress_helper_config::TickerConfig;
use serde::{Deserialize, Serialize};

use crate::sections::SectionInfo;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum Request {
    /// Parse and apply a spec string.
    #[serde(rename = "tickSpec")]
    TickSpec {
        #[serde(default)]
        spec: String,
        /// Milliseconds between activations. Missing or zero means the default.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        delay: Option<u64>,
    },

    /// Describe the section panels.
    #[serde(rename = "getSections")]
    GetSections,
}

impl Request {
    pub fn tick(spec: impl Into<String>, delay: Option<u64>) -> Self {
        Request::TickSpec {
            spec: spec.into(),
            delay,
        }
    }

    /// The request sent by the mark-everything command.
    pub fn mark_all(ticker: &TickerConfig) -> Self {
        Self::tick(ticker.mark_all_spec.clone(), Some(ticker.command_delay_ms))
    }

    pub fn action(&self) -> &'static str {
        match self {
            Request::TickSpec { .. } => "tickSpec",
            Request::GetSections => "getSections",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Ticked {
        clicked: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Sections {
        sections: Vec<SectionInfo>,
    },
    Error {
        error: String,
    },
}

impl Response {
    pub fn error(message: impl Into<String>) -> Self {
        Response::Error {
            error: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error { .. })
    }
}
