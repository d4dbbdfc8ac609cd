//! Section metadata for listing a course's curriculum.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::PageError;
use crate::locator::PageLayout;
use crate::page::CoursePage;

/// One section panel as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionInfo {
    /// 0-based position among the panels.
    pub index: usize,
    /// 1-based section number.
    pub number: usize,
    pub title: String,
    /// Number of completion controls in the panel.
    pub count: usize,
}

/// Summaries of every panel on the page. Failures yield an empty list.
pub async fn section_summaries(page: &dyn CoursePage, layout: &PageLayout) -> Vec<SectionInfo> {
    match collect(page, layout).await {
        Ok(sections) => sections,
        Err(e) => {
            warn!("Failed to read section metadata: {}", e);
            Vec::new()
        }
    }
}

async fn collect(
    page: &dyn CoursePage,
    layout: &PageLayout,
) -> Result<Vec<SectionInfo>, PageError> {
    let panels = layout.index(page).await?;
    let mut sections = Vec::with_capacity(panels.len());

    for (index, panel) in panels.iter().enumerate() {
        let number = index + 1;
        // A blank heading stays blank; only a missing one gets a fallback.
        let title = panel
            .heading
            .clone()
            .unwrap_or_else(|| layout.heading.fallback_title(number));
        let count = layout.controls(page, panel.element).await?.len();
        sections.push(SectionInfo {
            index,
            number,
            title,
            count,
        });
    }

    Ok(sections)
}
