//! The DOM operations the resolver and actuator need from a live page.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::PageError;

/// Opaque handle to an element of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementRef(pub i64);

/// Events dispatched on elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomEvent {
    MouseDown,
    MouseUp,
    Click,
    Change,
}

impl DomEvent {
    /// Event type name as seen by page scripts.
    pub fn name(&self) -> &'static str {
        match self {
            DomEvent::MouseDown => "mousedown",
            DomEvent::MouseUp => "mouseup",
            DomEvent::Click => "click",
            DomEvent::Change => "change",
        }
    }

    /// Whether the event is a `MouseEvent` rather than a plain `Event`.
    pub fn is_mouse(&self) -> bool {
        !matches!(self, DomEvent::Change)
    }
}

/// A course page the resolver can read and the actuator can drive.
///
/// All events are dispatched bubbling.
#[async_trait]
pub trait CoursePage: Send + Sync {
    /// Elements matching `selector` below `scope` (the document when `None`),
    /// in document order.
    async fn query_all(
        &self,
        scope: Option<ElementRef>,
        selector: &str,
    ) -> Result<Vec<ElementRef>, PageError>;

    /// First element matching `selector` below `scope`.
    async fn query_first(
        &self,
        scope: Option<ElementRef>,
        selector: &str,
    ) -> Result<Option<ElementRef>, PageError> {
        Ok(self.query_all(scope, selector).await?.into_iter().next())
    }

    /// Text content of the element and its descendants.
    async fn text_content(&self, element: ElementRef) -> Result<Option<String>, PageError>;

    /// Nearest inclusive ancestor matching `selector`.
    async fn closest(
        &self,
        element: ElementRef,
        selector: &str,
    ) -> Result<Option<ElementRef>, PageError>;

    /// Clear the element's disabled flag if it is set.
    async fn force_enabled(&self, element: ElementRef) -> Result<(), PageError>;

    /// Whether the element exposes a native `click()` activation.
    async fn supports_native_click(&self, element: ElementRef) -> Result<bool, PageError>;

    /// Run the element's native activation.
    async fn native_click(&self, element: ElementRef) -> Result<(), PageError>;

    /// Dispatch a synthetic event on the element.
    async fn dispatch(&self, element: ElementRef, event: DomEvent) -> Result<(), PageError>;

    /// Set the element's checked state to true.
    async fn force_checked(&self, element: ElementRef) -> Result<(), PageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(DomEvent::MouseDown.name(), "mousedown");
        assert_eq!(DomEvent::Change.name(), "change");
        assert!(DomEvent::Click.is_mouse());
        assert!(!DomEvent::Change.is_mouse());
    }
}
