//! In-memory page used by unit tests.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::PageError;
use crate::page::{CoursePage, DomEvent, ElementRef};

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeNode {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub text: String,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub disabled: bool,
    pub checked: bool,
    pub native_click: bool,
    pub fail_activation: bool,
}

impl FakeNode {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }
}

/// A tiny DOM with a recorded event log.
pub(crate) struct FakePage {
    nodes: Mutex<Vec<FakeNode>>,
    log: Mutex<Vec<String>>,
    fail_queries: Mutex<bool>,
}

impl FakePage {
    pub fn new() -> Self {
        let root = FakeNode {
            tag: "#document".to_string(),
            ..Default::default()
        };
        Self {
            nodes: Mutex::new(vec![root]),
            log: Mutex::new(Vec::new()),
            fail_queries: Mutex::new(false),
        }
    }

    /// Append an element under `parent` and return its id.
    pub fn add(&self, parent: usize, tag: &str, attrs: &[(&str, &str)]) -> usize {
        let mut nodes = self.nodes.lock();
        let id = nodes.len();
        nodes.push(FakeNode {
            tag: tag.to_string(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            parent: Some(parent),
            native_click: true,
            ..Default::default()
        });
        nodes[parent].children.push(id);
        id
    }

    pub fn set_text(&self, id: usize, text: &str) {
        self.nodes.lock()[id].text = text.to_string();
    }

    pub fn update(&self, id: usize, f: impl FnOnce(&mut FakeNode)) {
        f(&mut self.nodes.lock()[id]);
    }

    pub fn node(&self, id: usize) -> FakeNode {
        self.nodes.lock()[id].clone()
    }

    pub fn log(&self) -> Vec<String> {
        self.log.lock().clone()
    }

    pub fn fail_queries(&self) {
        *self.fail_queries.lock() = true;
    }

    /// Course page markup: one panel per entry with that many checkbox items,
    /// each checkbox wrapped in a label. Returns `(panels, controls per panel)`.
    pub fn course(items_per_section: &[usize]) -> (Self, Vec<usize>, Vec<Vec<usize>>) {
        let page = Self::new();
        let curriculum = page.add(0, "div", &[("data-purpose", "curriculum")]);
        let mut panels = Vec::new();
        let mut controls = Vec::new();

        for (index, &count) in items_per_section.iter().enumerate() {
            let purpose = format!("section-panel-{}", index);
            let panel = page.add(curriculum, "div", &[("data-purpose", purpose.as_str())]);
            let heading = page.add(panel, "div", &[("data-purpose", "section-heading")]);
            page.set_text(heading, &format!("  Section {}:\n   Topic {}  ", index + 1, index + 1));

            let list = page.add(panel, "ul", &[]);
            let mut section_controls = Vec::new();
            for _ in 0..count {
                let item = page.add(list, "li", &[]);
                let label = page.add(item, "label", &[("class", "ud-toggle-input-container")]);
                let input = page.add(
                    label,
                    "input",
                    &[
                        ("type", "checkbox"),
                        ("data-purpose", "progress-toggle-button"),
                    ],
                );
                section_controls.push(input);
            }
            panels.push(panel);
            controls.push(section_controls);
        }

        (page, panels, controls)
    }

    fn id(&self, element: ElementRef) -> Result<usize, PageError> {
        let id = element.0 as usize;
        if element.0 < 0 || id >= self.nodes.lock().len() {
            return Err(PageError::ElementGone(element.0));
        }
        Ok(id)
    }

    fn descendants(nodes: &[FakeNode], id: usize, out: &mut Vec<usize>) {
        for &child in &nodes[id].children {
            out.push(child);
            Self::descendants(nodes, child, out);
        }
    }

    fn collect_text(nodes: &[FakeNode], id: usize, out: &mut String) {
        out.push_str(&nodes[id].text);
        for &child in &nodes[id].children {
            Self::collect_text(nodes, child, out);
        }
    }

    fn activate(&self, id: usize, what: &str) -> Result<(), PageError> {
        if self.nodes.lock()[id].fail_activation {
            return Err(PageError::Script(format!("{} handler threw", what)));
        }
        self.log.lock().push(format!("{}:{}", what, id));
        Ok(())
    }
}

#[async_trait]
impl CoursePage for FakePage {
    async fn query_all(
        &self,
        scope: Option<ElementRef>,
        selector: &str,
    ) -> Result<Vec<ElementRef>, PageError> {
        if *self.fail_queries.lock() {
            return Err(PageError::Script("document is detached".to_string()));
        }
        let scope = match scope {
            Some(el) => self.id(el)?,
            None => 0,
        };
        let group = SelectorGroup::parse(selector);
        let nodes = self.nodes.lock();
        let mut ids = Vec::new();
        Self::descendants(&nodes, scope, &mut ids);
        Ok(ids
            .into_iter()
            .filter(|&id| group.matches(&nodes[id]))
            .map(|id| ElementRef(id as i64))
            .collect())
    }

    async fn text_content(&self, element: ElementRef) -> Result<Option<String>, PageError> {
        let id = self.id(element)?;
        let nodes = self.nodes.lock();
        let mut text = String::new();
        Self::collect_text(&nodes, id, &mut text);
        Ok(Some(text))
    }

    async fn closest(
        &self,
        element: ElementRef,
        selector: &str,
    ) -> Result<Option<ElementRef>, PageError> {
        let start = self.id(element)?;
        let group = SelectorGroup::parse(selector);
        let nodes = self.nodes.lock();
        let mut current = Some(start);
        while let Some(id) = current {
            if id == 0 {
                break;
            }
            if group.matches(&nodes[id]) {
                return Ok(Some(ElementRef(id as i64)));
            }
            current = nodes[id].parent;
        }
        Ok(None)
    }

    async fn force_enabled(&self, element: ElementRef) -> Result<(), PageError> {
        let id = self.id(element)?;
        self.nodes.lock()[id].disabled = false;
        Ok(())
    }

    async fn supports_native_click(&self, element: ElementRef) -> Result<bool, PageError> {
        let id = self.id(element)?;
        Ok(self.nodes.lock()[id].native_click)
    }

    async fn native_click(&self, element: ElementRef) -> Result<(), PageError> {
        let id = self.id(element)?;
        self.activate(id, "native-click")
    }

    async fn dispatch(&self, element: ElementRef, event: DomEvent) -> Result<(), PageError> {
        let id = self.id(element)?;
        if event == DomEvent::Change {
            self.log.lock().push(format!("change:{}", id));
            return Ok(());
        }
        self.activate(id, event.name())
    }

    async fn force_checked(&self, element: ElementRef) -> Result<(), PageError> {
        let id = self.id(element)?;
        self.nodes.lock()[id].checked = true;
        Ok(())
    }
}

/// Wraps a [`FakePage`] and counts calls per page operation.
pub(crate) struct CountingPage {
    inner: FakePage,
    calls: Mutex<HashMap<&'static str, usize>>,
}

impl CountingPage {
    pub fn new(inner: FakePage) -> Self {
        Self {
            inner,
            calls: Mutex::new(HashMap::new()),
        }
    }

    pub fn calls(&self, operation: &str) -> usize {
        self.calls.lock().get(operation).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().values().sum()
    }

    fn count(&self, operation: &'static str) {
        *self.calls.lock().entry(operation).or_default() += 1;
    }
}

#[async_trait]
impl CoursePage for CountingPage {
    async fn query_all(
        &self,
        scope: Option<ElementRef>,
        selector: &str,
    ) -> Result<Vec<ElementRef>, PageError> {
        self.count("query_all");
        self.inner.query_all(scope, selector).await
    }

    async fn text_content(&self, element: ElementRef) -> Result<Option<String>, PageError> {
        self.count("text_content");
        self.inner.text_content(element).await
    }

    async fn closest(
        &self,
        element: ElementRef,
        selector: &str,
    ) -> Result<Option<ElementRef>, PageError> {
        self.count("closest");
        self.inner.closest(element, selector).await
    }

    async fn force_enabled(&self, element: ElementRef) -> Result<(), PageError> {
        self.count("force_enabled");
        self.inner.force_enabled(element).await
    }

    async fn supports_native_click(&self, element: ElementRef) -> Result<bool, PageError> {
        self.count("supports_native_click");
        self.inner.supports_native_click(element).await
    }

    async fn native_click(&self, element: ElementRef) -> Result<(), PageError> {
        self.count("native_click");
        self.inner.native_click(element).await
    }

    async fn dispatch(&self, element: ElementRef, event: DomEvent) -> Result<(), PageError> {
        self.count("dispatch");
        self.inner.dispatch(element, event).await
    }

    async fn force_checked(&self, element: ElementRef) -> Result<(), PageError> {
        self.count("force_checked");
        self.inner.force_checked(element).await
    }
}

/// Comma-separated compound selectors: `tag`, `.class`, `#id`,
/// `[attr]`, `[attr="v"]` and `[attr^="v"]`.
struct SelectorGroup {
    compounds: Vec<Vec<Simple>>,
}

enum Simple {
    Tag(String),
    Class(String),
    Id(String),
    Attr(String, AttrOp),
}

enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
}

impl SelectorGroup {
    fn parse(selector: &str) -> Self {
        let compounds = selector
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Self::parse_compound)
            .collect();
        Self { compounds }
    }

    fn parse_compound(s: &str) -> Vec<Simple> {
        let mut parts = Vec::new();
        let mut rest = s;

        let tag_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
            .unwrap_or(rest.len());
        if tag_len > 0 {
            parts.push(Simple::Tag(rest[..tag_len].to_ascii_lowercase()));
            rest = &rest[tag_len..];
        }

        while !rest.is_empty() {
            if let Some(after) = rest.strip_prefix('[') {
                let end = after.find(']').unwrap_or(after.len());
                parts.push(Self::parse_attr(&after[..end]));
                rest = after.get(end + 1..).unwrap_or("");
            } else {
                let marker = rest.as_bytes()[0];
                let body = &rest[1..];
                let len = body
                    .find(|c: char| c == '.' || c == '#' || c == '[')
                    .unwrap_or(body.len());
                let name = body[..len].to_string();
                parts.push(if marker == b'#' {
                    Simple::Id(name)
                } else {
                    Simple::Class(name)
                });
                rest = &body[len..];
            }
        }

        parts
    }

    fn parse_attr(body: &str) -> Simple {
        let unquote = |v: &str| v.trim().trim_matches('"').to_string();
        if let Some((name, value)) = body.split_once("^=") {
            Simple::Attr(name.trim().to_string(), AttrOp::Prefix(unquote(value)))
        } else if let Some((name, value)) = body.split_once('=') {
            Simple::Attr(name.trim().to_string(), AttrOp::Equals(unquote(value)))
        } else {
            Simple::Attr(body.trim().to_string(), AttrOp::Exists)
        }
    }

    fn matches(&self, node: &FakeNode) -> bool {
        self.compounds
            .iter()
            .any(|compound| compound.iter().all(|simple| simple.matches(node)))
    }
}

impl Simple {
    fn matches(&self, node: &FakeNode) -> bool {
        match self {
            Simple::Tag(tag) => node.tag == *tag,
            Simple::Class(class) => node.has_class(class),
            Simple::Id(id) => node.attr("id") == Some(id.as_str()),
            Simple::Attr(name, op) => match (node.attr(name), op) {
                (None, _) => false,
                (Some(_), AttrOp::Exists) => true,
                (Some(v), AttrOp::Equals(want)) => v == want,
                (Some(v), AttrOp::Prefix(want)) => v.starts_with(want.as_str()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_selector_group_matches_in_document_order() {
        let (page, panels, controls) = FakePage::course(&[2, 1]);
        let found = page
            .query_all(None, r#"[data-purpose^="section-panel-"], [data-purpose="section-panel"]"#)
            .await
            .unwrap();
        assert_eq!(found, panels.iter().map(|&p| ElementRef(p as i64)).collect::<Vec<_>>());

        let inputs = page
            .query_all(Some(ElementRef(panels[0] as i64)), r#"input[type="checkbox"]"#)
            .await
            .unwrap();
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0], ElementRef(controls[0][0] as i64));
    }

    #[tokio::test]
    async fn test_closest_includes_self_and_stops_at_root() {
        let (page, _, controls) = FakePage::course(&[1]);
        let input = ElementRef(controls[0][0] as i64);
        assert_eq!(page.closest(input, "input").await.unwrap(), Some(input));
        assert!(page.closest(input, "label").await.unwrap().is_some());
        assert!(page.closest(input, ".missing").await.unwrap().is_none());
    }

    #[test]
    fn test_class_and_id_selectors() {
        let node = FakeNode {
            tag: "input".to_string(),
            attrs: vec![
                ("class".to_string(), "a ud-real-toggle-input".to_string()),
                ("id".to_string(), "popper-trigger--12".to_string()),
            ],
            ..Default::default()
        };
        assert!(SelectorGroup::parse("input.ud-real-toggle-input").matches(&node));
        assert!(SelectorGroup::parse(r#"[id^="popper-trigger"]"#).matches(&node));
        assert!(SelectorGroup::parse("#popper-trigger--12").matches(&node));
        assert!(!SelectorGroup::parse("button.ud-real-toggle-input").matches(&node));
    }
}
