//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `~/.progress-helper`, or a relative `.progress-helper` without a home dir.
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".progress-helper"))
        .unwrap_or_else(|| PathBuf::from(".progress-helper"))
}

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub ticker: TickerConfig,

    #[serde(default)]
    pub selectors: SelectorConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

/// Where to find the browser and which tab to drive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Chrome remote debugging HTTP endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Only pages whose URL contains this text are considered. Empty matches any page.
    #[serde(default)]
    pub tab_url_contains: String,

    /// Timeout for a single CDP call.
    #[serde(default = "default_call_timeout")]
    pub call_timeout_secs: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            tab_url_contains: String::new(),
            call_timeout_secs: default_call_timeout(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:9222".to_string()
}

fn default_call_timeout() -> u64 {
    30
}

/// Pacing and matching behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerConfig {
    /// Delay between activations when a request does not carry one.
    #[serde(default = "default_delay")]
    pub default_delay_ms: u64,

    /// Delay used by the mark-all command.
    #[serde(default = "default_command_delay")]
    pub command_delay_ms: u64,

    /// Spec sent by the mark-all command.
    #[serde(default = "default_mark_all_spec")]
    pub mark_all_spec: String,

    /// Word preceding the section number in panel headings, e.g. "Section 3".
    #[serde(default = "default_heading_label")]
    pub heading_label: String,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            default_delay_ms: default_delay(),
            command_delay_ms: default_command_delay(),
            mark_all_spec: default_mark_all_spec(),
            heading_label: default_heading_label(),
        }
    }
}

fn default_delay() -> u64 {
    200
}

fn default_command_delay() -> u64 {
    250
}

fn default_mark_all_spec() -> String {
    "1-9999".to_string()
}

fn default_heading_label() -> String {
    "Section".to_string()
}

/// CSS selector groups used to find things on the course page.
///
/// Each list is joined with `", "` into a single selector group, so matches
/// come back in document order regardless of which entry matched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Section containers.
    #[serde(default = "default_panel_selectors")]
    pub panel: Vec<String>,

    /// Heading inside a section container.
    #[serde(default = "default_heading_selectors")]
    pub heading: Vec<String>,

    /// Togglable completion controls inside a section container.
    #[serde(default = "default_control_selectors")]
    pub control: Vec<String>,

    /// Ancestors preferred over the control itself when clicking, tried in order.
    #[serde(default = "default_clickable_selectors")]
    pub clickable: Vec<String>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            panel: default_panel_selectors(),
            heading: default_heading_selectors(),
            control: default_control_selectors(),
            clickable: default_clickable_selectors(),
        }
    }
}

impl SelectorConfig {
    pub fn panel_group(&self) -> String {
        self.panel.join(", ")
    }

    pub fn heading_group(&self) -> String {
        self.heading.join(", ")
    }

    pub fn control_group(&self) -> String {
        self.control.join(", ")
    }
}

fn default_panel_selectors() -> Vec<String> {
    vec![
        r#"[data-purpose^="section-panel-"]"#.to_string(),
        r#"[data-purpose="section-panel"]"#.to_string(),
    ]
}

fn default_heading_selectors() -> Vec<String> {
    vec![
        r#"[data-purpose="section-heading"]"#.to_string(),
        ".section--section-heading--gDf8W".to_string(),
        "h3".to_string(),
        "button".to_string(),
    ]
}

fn default_control_selectors() -> Vec<String> {
    vec![
        r#"input[data-purpose="progress-toggle-button"]"#.to_string(),
        "input.ud-real-toggle-input".to_string(),
        r#"input[type="checkbox"]"#.to_string(),
    ]
}

fn default_clickable_selectors() -> Vec<String> {
    vec![
        "label".to_string(),
        r#"[id^="popper-trigger"], .popper-module--popper--mM5Ie"#.to_string(),
    ]
}

/// Persisted state location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
        }
    }
}

fn default_state_file() -> PathBuf {
    home_dir().join("state.json")
}
