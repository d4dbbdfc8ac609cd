//! Subcommand handlers for Progress Helper.
//!
//! Each handler returns the text to print so it can be checked without a
//! terminal.

use progress_helper_config::TickerConfig;
use progress_helper_page::{Request, Response, SectionInfo, Transport, TransportError};
use progress_helper_spec::{canonical, ItemSelection};
use progress_helper_store::{LastSpec, StoreError};
use thiserror::Error;
use tracing::{info, warn};

use crate::cli::OutputFormat;

#[derive(Debug, Error)]
pub(crate) enum CommandError {
    /// The user asked for something that cannot run.
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The page answered with an error.
    #[error("{0}")]
    Page(String),

    #[error("Unexpected response: {0:?}")]
    Unexpected(Response),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Run a spec on the active tab and remember it.
pub(crate) async fn tick(
    transport: &dyn Transport,
    last_spec: &LastSpec,
    spec: Option<String>,
    delay: Option<u64>,
) -> Result<String, CommandError> {
    let spec = match spec.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) {
        Some(spec) => spec,
        None => last_spec
            .load()
            .await?
            .ok_or_else(|| CommandError::Usage("Enter a spec".to_string()))?,
    };

    let response = transport.send(Request::tick(spec.clone(), delay)).await?;
    let output = describe_tick(response)?;
    last_spec.save(&spec).await?;
    Ok(output)
}

/// Run whole sections by number.
pub(crate) async fn select(
    transport: &dyn Transport,
    last_spec: &LastSpec,
    sections: &[u32],
) -> Result<String, CommandError> {
    if sections.is_empty() {
        return Err(CommandError::Usage("Select at least one section".to_string()));
    }
    let spec = sections
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(",");
    tick(transport, last_spec, Some(spec), None).await
}

/// Mark everything with the configured spec and pacing. Not remembered.
pub(crate) async fn mark_all(
    transport: &dyn Transport,
    ticker: &TickerConfig,
) -> Result<String, CommandError> {
    let response = transport.send(Request::mark_all(ticker)).await?;
    info!("mark-all response: {:?}", response);
    describe_tick(response)
}

pub(crate) async fn sections(
    transport: &dyn Transport,
    format: OutputFormat,
) -> Result<String, CommandError> {
    match transport.send(Request::GetSections).await? {
        Response::Sections { sections } => render_sections(&sections, format),
        Response::Error { error } => Err(CommandError::Page(error)),
        other => Err(CommandError::Unexpected(other)),
    }
}

pub(crate) async fn save(last_spec: &LastSpec, spec: &str) -> Result<String, CommandError> {
    if spec.trim().is_empty() {
        return Err(CommandError::Usage("Nothing to save".to_string()));
    }
    last_spec.save(spec).await?;
    Ok("Saved".to_string())
}

pub(crate) async fn last(last_spec: &LastSpec) -> Result<String, CommandError> {
    Ok(last_spec
        .load()
        .await?
        .unwrap_or_else(|| "No spec saved".to_string()))
}

/// Describe how a spec parses.
pub(crate) fn parse(spec: &str) -> String {
    let directives = progress_helper_spec::parse(spec);
    if directives.is_empty() {
        return "No valid specs parsed".to_string();
    }

    let mut lines: Vec<String> = directives
        .iter()
        .map(|d| match &d.items {
            ItemSelection::All => format!("Section {}: all items", d.section),
            ItemSelection::Items(items) => {
                let items: Vec<String> = items.iter().map(|i| i.to_string()).collect();
                format!("Section {}: items {}", d.section, items.join(", "))
            }
        })
        .collect();
    lines.push(format!("Canonical: {}", canonical(&directives)));
    lines.join("\n")
}

fn describe_tick(response: Response) -> Result<String, CommandError> {
    match response {
        Response::Ticked { clicked, message } => Ok(match message {
            Some(message) => format!("Clicked {} ({})", clicked, message),
            None => format!("Clicked {}", clicked),
        }),
        Response::Error { error } => {
            warn!("Page reported an error: {}", error);
            Err(CommandError::Page(error))
        }
        other => Err(CommandError::Unexpected(other)),
    }
}

fn render_sections(
    sections: &[SectionInfo],
    format: OutputFormat,
) -> Result<String, CommandError> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(sections)?);
    }
    if sections.is_empty() {
        return Ok("No sections found on this page.".to_string());
    }

    let mut lines = vec![
        format!("{:<8} {:<60} {}", "SECTION", "TITLE", "ITEMS"),
        "-".repeat(76),
    ];
    for s in sections {
        lines.push(format!("{:<8} {:<60} {}", s.number, s.title, s.count));
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
