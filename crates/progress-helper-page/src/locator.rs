//! Mapping section numbers and controls onto page elements.
//!
//! Panels and their headings are read once per run into a [`PanelIndex`].
//! Panel lookup is an ordered list of strategies over that index; the first
//! one that returns a panel wins. Clickable lookup works the same way over a
//! list of ancestor selectors, falling back to the control itself.

use progress_helper_config::Config;
use regex::Regex;
use tracing::{trace, warn};

use crate::error::PageError;
use crate::page::{CoursePage, ElementRef};

/// Matches panel headings such as "Section 3: Ownership".
#[derive(Debug, Clone)]
pub struct HeadingMatcher {
    label: String,
    pattern: Regex,
}

impl HeadingMatcher {
    /// Build a case-insensitive matcher for `<label> <n>` at word boundaries.
    pub fn new(label: &str) -> Result<Self, PageError> {
        let label = label.trim();
        let pattern = Regex::new(&format!(r"(?i)\b{}\s*([0-9]+)\b", regex::escape(label)))
            .map_err(|e| PageError::Layout(format!("heading label '{}': {}", label, e)))?;
        Ok(Self {
            label: label.to_string(),
            pattern,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether `text` names section `section`.
    pub fn matches(&self, text: &str, section: u32) -> bool {
        let wanted = section.to_string();
        self.pattern
            .captures_iter(text)
            .any(|caps| &caps[1] == wanted.as_str())
    }

    /// Title used when a panel has no heading.
    pub fn fallback_title(&self, number: usize) -> String {
        format!("{} {}", self.label, number)
    }
}

/// Selector groups and matchers describing the course page markup.
#[derive(Debug, Clone)]
pub struct PageLayout {
    pub panel_selector: String,
    pub heading_selector: String,
    pub control_selector: String,
    /// Ancestor selectors preferred as click targets, in priority order.
    pub clickable_selectors: Vec<String>,
    pub heading: HeadingMatcher,
}

impl PageLayout {
    pub fn from_config(config: &Config) -> Result<Self, PageError> {
        let selectors = &config.selectors;
        Ok(Self {
            panel_selector: selectors.panel_group(),
            heading_selector: selectors.heading_group(),
            control_selector: selectors.control_group(),
            clickable_selectors: selectors.clickable.clone(),
            heading: HeadingMatcher::new(&config.ticker.heading_label)?,
        })
    }

    /// All section panels in document order.
    pub async fn panels(&self, page: &dyn CoursePage) -> Result<Vec<ElementRef>, PageError> {
        page.query_all(None, &self.panel_selector).await
    }

    /// Every panel with its heading text, read once.
    ///
    /// A heading that cannot be read is treated as missing.
    pub async fn index(&self, page: &dyn CoursePage) -> Result<PanelIndex, PageError> {
        let elements = self.panels(page).await?;
        let mut panels = Vec::with_capacity(elements.len());
        for element in elements {
            let heading = match self.heading_text(page, element).await {
                Ok(heading) => heading,
                Err(e) => {
                    warn!("Failed to read heading of panel {:?}: {}", element, e);
                    None
                }
            };
            panels.push(Panel { element, heading });
        }
        Ok(PanelIndex { panels })
    }

    /// Completion controls of a panel in document order.
    pub async fn controls(
        &self,
        page: &dyn CoursePage,
        panel: ElementRef,
    ) -> Result<Vec<ElementRef>, PageError> {
        page.query_all(Some(panel), &self.control_selector).await
    }

    /// Normalized heading text of a panel, if it has a heading.
    pub async fn heading_text(
        &self,
        page: &dyn CoursePage,
        panel: ElementRef,
    ) -> Result<Option<String>, PageError> {
        let Some(heading) = page.query_first(Some(panel), &self.heading_selector).await? else {
            return Ok(None);
        };
        let text = page.text_content(heading).await?;
        Ok(text.map(|t| collapse_whitespace(&t)))
    }

    /// The element to click for `control`.
    pub async fn clickable_for(
        &self,
        page: &dyn CoursePage,
        control: ElementRef,
    ) -> Result<ElementRef, PageError> {
        for selector in &self.clickable_selectors {
            if let Some(found) = page.closest(control, selector).await? {
                trace!("Clickable for {:?} via '{}': {:?}", control, selector, found);
                return Ok(found);
            }
        }
        Ok(control)
    }
}

/// A section panel and its normalized heading text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub element: ElementRef,
    /// `None` when the panel has no heading element.
    pub heading: Option<String>,
}

/// The panels of one page in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelIndex {
    panels: Vec<Panel>,
}

impl PanelIndex {
    pub fn new(panels: Vec<Panel>) -> Self {
        Self { panels }
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Panel> {
        self.panels.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Panel> {
        self.panels.iter()
    }
}

/// One way of finding the panel for a section number.
pub trait PanelStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn locate(&self, layout: &PageLayout, panels: &PanelIndex, section: u32)
        -> Option<ElementRef>;
}

/// Section N is the N-th panel.
pub struct ByOrdinal;

impl PanelStrategy for ByOrdinal {
    fn name(&self) -> &'static str {
        "ordinal"
    }

    fn locate(
        &self,
        _layout: &PageLayout,
        panels: &PanelIndex,
        section: u32,
    ) -> Option<ElementRef> {
        let index = section.checked_sub(1)?;
        panels.get(index as usize).map(|panel| panel.element)
    }
}

/// Section N is the first panel whose heading reads "<label> N".
pub struct ByHeading;

impl PanelStrategy for ByHeading {
    fn name(&self) -> &'static str {
        "heading"
    }

    fn locate(
        &self,
        layout: &PageLayout,
        panels: &PanelIndex,
        section: u32,
    ) -> Option<ElementRef> {
        panels
            .iter()
            .find(|panel| {
                panel
                    .heading
                    .as_deref()
                    .is_some_and(|text| layout.heading.matches(text, section))
            })
            .map(|panel| panel.element)
    }
}

/// Ordered panel strategies; the first match wins.
pub struct PanelLocator {
    strategies: Vec<Box<dyn PanelStrategy>>,
}

impl Default for PanelLocator {
    fn default() -> Self {
        Self::new(vec![Box::new(ByOrdinal), Box::new(ByHeading)])
    }
}

impl PanelLocator {
    pub fn new(strategies: Vec<Box<dyn PanelStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn locate(
        &self,
        layout: &PageLayout,
        panels: &PanelIndex,
        section: u32,
    ) -> Option<ElementRef> {
        self.strategies.iter().find_map(|strategy| {
            let found = strategy.locate(layout, panels, section)?;
            trace!("Section {} resolved by {} strategy", section, strategy.name());
            Some(found)
        })
    }
}

/// Trim and collapse runs of whitespace into single spaces.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "locator_tests.rs"]
mod tests;
