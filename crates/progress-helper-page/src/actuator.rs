//! Marks controls complete, one at a time, with a pause between each.

use std::time::Duration;

use progress_helper_spec::Directive;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::PageError;
use crate::locator::{PageLayout, PanelLocator};
use crate::page::{CoursePage, DomEvent, ElementRef};

/// Outcome message when a spec yields no directives.
pub const NO_SPECS_PARSED: &str = "no specs parsed";

/// Result of one actuation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Controls activated successfully.
    pub clicked: usize,
    /// Controls whose activation failed.
    pub failed: usize,
    /// Directives skipped because their section, controls or items were not found.
    pub skipped: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Drives one page through a list of directives.
pub struct Actuator<'a> {
    page: &'a dyn CoursePage,
    layout: &'a PageLayout,
    locator: PanelLocator,
}

impl<'a> Actuator<'a> {
    pub fn new(page: &'a dyn CoursePage, layout: &'a PageLayout) -> Self {
        Self {
            page,
            layout,
            locator: PanelLocator::default(),
        }
    }

    pub fn with_locator(mut self, locator: PanelLocator) -> Self {
        self.locator = locator;
        self
    }

    /// Parse `spec` and apply it.
    pub async fn run_spec(&self, spec: &str, delay: Duration) -> Result<TickReport, PageError> {
        let directives = progress_helper_spec::parse(spec);
        if directives.is_empty() {
            warn!("No valid specs parsed from '{}'", spec);
            return Ok(TickReport {
                message: Some(NO_SPECS_PARSED.to_string()),
                ..Default::default()
            });
        }
        self.apply(&directives, delay).await
    }

    /// Apply directives in order, sleeping `delay` after every target.
    ///
    /// Only a failure to list the panels aborts the run. Anything narrower
    /// is logged and skipped.
    pub async fn apply(
        &self,
        directives: &[Directive],
        delay: Duration,
    ) -> Result<TickReport, PageError> {
        let panels = self.layout.index(self.page).await?;
        debug!("Found {} section panels", panels.len());

        let mut report = TickReport::default();
        let mut missing = Vec::new();

        for directive in directives {
            let section = directive.section;
            let Some(panel) = self.locator.locate(self.layout, &panels, section) else {
                missing.push(section);
                report.skipped += 1;
                continue;
            };

            let targets = match self.targets(directive, panel).await {
                Ok(Some(targets)) => targets,
                Ok(None) => {
                    report.skipped += 1;
                    continue;
                }
                Err(e) => {
                    warn!("Section {}: resolution failed: {}", section, e);
                    report.skipped += 1;
                    continue;
                }
            };

            for control in targets {
                match self.activate(control).await {
                    Ok(()) => report.clicked += 1,
                    Err(e) => {
                        warn!("Section {}: failed to mark {:?}: {}", section, control, e);
                        report.failed += 1;
                    }
                }
                tokio::time::sleep(delay).await;
            }
        }

        if !missing.is_empty() {
            warn!(
                "{} section(s) not found: {}",
                missing.len(),
                describe_sections(&missing)
            );
        }

        info!(
            "Tick run completed: {} clicked, {} failed, {} skipped",
            report.clicked, report.failed, report.skipped
        );
        Ok(report)
    }

    /// Controls of `panel` to activate, or `None` when the directive is skipped.
    async fn targets(
        &self,
        directive: &Directive,
        panel: ElementRef,
    ) -> Result<Option<Vec<ElementRef>>, PageError> {
        let section = directive.section;

        let controls = self.layout.controls(self.page, panel).await?;
        if controls.is_empty() {
            warn!("No checkboxes in section {}", section);
            return Ok(None);
        }

        let offsets = directive.items.offsets(controls.len());
        if offsets.is_empty() {
            warn!(
                "No valid item indices for section {}. Available 1..{}",
                section,
                controls.len()
            );
            return Ok(None);
        }

        Ok(Some(offsets.into_iter().map(|i| controls[i]).collect()))
    }

    /// Click the control's best click target, then force it checked.
    async fn activate(&self, control: ElementRef) -> Result<(), PageError> {
        let clickable = self.layout.clickable_for(self.page, control).await?;

        self.page.force_enabled(control).await?;

        if self.page.supports_native_click(clickable).await? {
            self.page.native_click(clickable).await?;
        } else {
            for event in [DomEvent::MouseDown, DomEvent::MouseUp, DomEvent::Click] {
                self.page.dispatch(clickable, event).await?;
            }
        }

        self.page.force_checked(control).await?;
        self.page.dispatch(control, DomEvent::Change).await?;
        Ok(())
    }
}

/// Render section numbers compactly, folding consecutive runs: `2, 5-9`.
fn describe_sections(sections: &[u32]) -> String {
    let mut runs: Vec<(u32, u32)> = Vec::new();
    for &n in sections {
        match runs.last_mut() {
            Some((_, end)) if end.checked_add(1) == Some(n) => *end = n,
            _ => runs.push((n, n)),
        }
    }
    runs.iter()
        .map(|&(start, end)| {
            if start == end {
                start.to_string()
            } else {
                format!("{}-{}", start, end)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "actuator_tests.rs"]
mod tests;
