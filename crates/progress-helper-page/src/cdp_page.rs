//! `CoursePage` backed by a live Chrome tab.
//!
//! Elements are DOM node ids. Each operation resolves the node to a runtime
//! object, runs a small function on it and releases the object again.

use async_trait::async_trait;
use progress_helper_cdp::{CdpError, PageSession};
use serde_json::{json, Value};
use tracing::{debug, trace};

use crate::error::PageError;
use crate::page::{CoursePage, DomEvent, ElementRef};

const TEXT_CONTENT: &str = "function() { return this.textContent; }";
const CLOSEST: &str = "function(selector) { return this.closest(selector); }";
const FORCE_ENABLED: &str = "function() { if (this.disabled) { this.disabled = false; } }";
const HAS_NATIVE_CLICK: &str = "function() { return typeof this.click === 'function'; }";
const NATIVE_CLICK: &str = "function() { this.click(); }";
const DISPATCH_MOUSE: &str =
    "function(type) { this.dispatchEvent(new MouseEvent(type, { bubbles: true, cancelable: true })); }";
const DISPATCH_EVENT: &str = "function(type) { this.dispatchEvent(new Event(type, { bubbles: true })); }";
const FORCE_CHECKED: &str = "function() { this.checked = true; }";

pub struct CdpPage {
    session: PageSession,
    root: i64,
}

impl CdpPage {
    /// Fetch the document root of an attached session.
    pub async fn attach(session: PageSession) -> Result<Self, PageError> {
        let document = session.get_document().await?;
        debug!(
            "Attached to {} (document node {})",
            session.target_id(),
            document.node_id
        );
        Ok(Self {
            session,
            root: document.node_id,
        })
    }

    async fn object_id(&self, element: ElementRef) -> Result<String, PageError> {
        let object = self
            .session
            .resolve_node(element.0)
            .await
            .map_err(|e| element_error(element, e))?;
        object.object_id.ok_or(PageError::ElementGone(element.0))
    }

    async fn release(&self, object_id: &str) {
        if let Err(e) = self.session.release_object(object_id).await {
            trace!("Failed to release {}: {}", object_id, e);
        }
    }

    /// Run `function` with `this` bound to the element.
    async fn call_on(
        &self,
        element: ElementRef,
        function: &str,
        args: Vec<Value>,
    ) -> Result<Value, PageError> {
        let object_id = self.object_id(element).await?;
        let result = self
            .session
            .call_function_on(&object_id, function, args)
            .await;
        self.release(&object_id).await;
        result.map_err(script_error)
    }
}

#[async_trait]
impl CoursePage for CdpPage {
    async fn query_all(
        &self,
        scope: Option<ElementRef>,
        selector: &str,
    ) -> Result<Vec<ElementRef>, PageError> {
        let node = scope.map(|el| el.0).unwrap_or(self.root);
        let ids = self
            .session
            .query_selector_all(node, selector)
            .await
            .map_err(|e| element_error(ElementRef(node), e))?;
        Ok(ids.into_iter().map(ElementRef).collect())
    }

    async fn text_content(&self, element: ElementRef) -> Result<Option<String>, PageError> {
        let value = self.call_on(element, TEXT_CONTENT, vec![]).await?;
        Ok(value.as_str().map(str::to_string))
    }

    async fn closest(
        &self,
        element: ElementRef,
        selector: &str,
    ) -> Result<Option<ElementRef>, PageError> {
        let object_id = self.object_id(element).await?;
        let result = self
            .session
            .call_function_on_handle(&object_id, CLOSEST, vec![json!(selector)])
            .await;
        self.release(&object_id).await;

        let handle = result.map_err(script_error)?;
        let Some(found_id) = handle.object_id.as_deref().filter(|_| !handle.is_null()) else {
            return Ok(None);
        };
        let node = self.session.request_node(found_id).await;
        self.release(found_id).await;
        Ok(Some(ElementRef(node?)))
    }

    async fn force_enabled(&self, element: ElementRef) -> Result<(), PageError> {
        self.call_on(element, FORCE_ENABLED, vec![]).await?;
        Ok(())
    }

    async fn supports_native_click(&self, element: ElementRef) -> Result<bool, PageError> {
        let value = self.call_on(element, HAS_NATIVE_CLICK, vec![]).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn native_click(&self, element: ElementRef) -> Result<(), PageError> {
        self.call_on(element, NATIVE_CLICK, vec![]).await?;
        Ok(())
    }

    async fn dispatch(&self, element: ElementRef, event: DomEvent) -> Result<(), PageError> {
        let function = if event.is_mouse() {
            DISPATCH_MOUSE
        } else {
            DISPATCH_EVENT
        };
        self.call_on(element, function, vec![json!(event.name())])
            .await?;
        Ok(())
    }

    async fn force_checked(&self, element: ElementRef) -> Result<(), PageError> {
        self.call_on(element, FORCE_CHECKED, vec![]).await?;
        Ok(())
    }
}

/// Protocol errors about a node mean it no longer exists.
fn element_error(element: ElementRef, e: CdpError) -> PageError {
    match e {
        CdpError::Protocol { .. } => PageError::ElementGone(element.0),
        other => PageError::Cdp(other),
    }
}

fn script_error(e: CdpError) -> PageError {
    match e {
        CdpError::JavaScript(message) => PageError::Script(message),
        other => PageError::Cdp(other),
    }
}
