//! In-memory [`Dom`] implementation.
//!
//! Keeps a flat table of elements keyed by id, each with an optional parent,
//! text, class list and computed styles. Focus and clicks are recorded so a
//! headless host (or a test) can observe what the components did.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::backend::Dom;

type ClickHandler = Rc<dyn Fn()>;

#[derive(Debug, Default, Clone)]
struct Node {
    parent: Option<String>,
    text: String,
    classes: Vec<String>,
    styles: HashMap<String, String>,
}

/// A document held entirely in memory.
///
/// Elements touched through class or style setters are created on demand.
///
/// # Example
///
/// ```
/// use headless_ui::dom::{Dom, MemoryDom};
///
/// let dom = MemoryDom::new();
/// dom.insert("menu", None);
/// dom.insert("item", Some("menu"));
/// assert!(dom.contains("menu", "item"));
/// assert!(!dom.contains("item", "menu"));
/// ```
#[derive(Default)]
pub struct MemoryDom {
    nodes: RefCell<HashMap<String, Node>>,
    focused: RefCell<Option<String>>,
    clicks: RefCell<Vec<String>>,
    click_handlers: RefCell<HashMap<String, ClickHandler>>,
}

impl MemoryDom {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts (or re-parents) element `id`.
    pub fn insert(&self, id: &str, parent: Option<&str>) {
        self.nodes.borrow_mut().entry(id.to_string()).or_default().parent = parent.map(String::from);
    }

    /// Removes element `id` along with its click handler.
    pub fn remove(&self, id: &str) {
        self.nodes.borrow_mut().remove(id);
        self.click_handlers.borrow_mut().remove(id);
    }

    /// Whether element `id` exists.
    pub fn exists(&self, id: &str) -> bool {
        self.nodes.borrow().contains_key(id)
    }

    /// Sets the text content of element `id`.
    pub fn set_text(&self, id: &str, text: &str) {
        self.nodes.borrow_mut().entry(id.to_string()).or_default().text = text.to_string();
    }

    /// Sets a computed style property of element `id`.
    pub fn set_style(&self, id: &str, property: &str, value: &str) {
        self.nodes
            .borrow_mut()
            .entry(id.to_string())
            .or_default()
            .styles
            .insert(property.to_string(), value.to_string());
    }

    /// Current class list of element `id`, in insertion order.
    pub fn classes(&self, id: &str) -> Vec<String> {
        self.nodes
            .borrow()
            .get(id)
            .map(|node| node.classes.clone())
            .unwrap_or_default()
    }

    /// Whether element `id` currently carries `class`.
    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.nodes
            .borrow()
            .get(id)
            .is_some_and(|node| node.classes.iter().any(|c| c == class))
    }

    /// Id of the focused element, if any.
    pub fn focused(&self) -> Option<String> {
        self.focused.borrow().clone()
    }

    /// Ids of every element clicked so far, oldest first.
    pub fn clicks(&self) -> Vec<String> {
        self.clicks.borrow().clone()
    }

    /// Routes synthetic clicks on `id` to `handler`.
    pub fn on_click(&self, id: &str, handler: impl Fn() + 'static) {
        self.click_handlers
            .borrow_mut()
            .insert(id.to_string(), Rc::new(handler));
    }
}

impl Dom for MemoryDom {
    fn focus(&self, id: &str) {
        tracing::trace!(id = %id, "focus");
        *self.focused.borrow_mut() = Some(id.to_string());
    }

    fn contains(&self, ancestor: &str, target: &str) -> bool {
        let nodes = self.nodes.borrow();
        let mut current = Some(target.to_string());
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = nodes.get(&id).and_then(|node| node.parent.clone());
        }
        false
    }

    fn text_content(&self, id: &str) -> Option<String> {
        self.nodes.borrow().get(id).map(|node| node.text.clone())
    }

    fn click(&self, id: &str) {
        self.clicks.borrow_mut().push(id.to_string());
        let handler = self.click_handlers.borrow().get(id).cloned();
        if let Some(handler) = handler {
            handler();
        }
    }

    fn add_classes(&self, id: &str, classes: &[String]) {
        let mut nodes = self.nodes.borrow_mut();
        let node = nodes.entry(id.to_string()).or_default();
        for class in classes {
            if !node.classes.contains(class) {
                node.classes.push(class.clone());
            }
        }
    }

    fn remove_classes(&self, id: &str, classes: &[String]) {
        if let Some(node) = self.nodes.borrow_mut().get_mut(id) {
            node.classes.retain(|c| !classes.contains(c));
        }
    }

    fn computed_style(&self, id: &str, property: &str) -> Option<String> {
        self.nodes
            .borrow()
            .get(id)
            .and_then(|node| node.styles.get(property).cloned())
    }
}

impl fmt::Debug for MemoryDom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryDom")
            .field("nodes", &self.nodes.borrow().len())
            .field("focused", &self.focused.borrow())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn contains_walks_ancestors_and_includes_self() {
        let dom = MemoryDom::new();
        dom.insert("root", None);
        dom.insert("list", Some("root"));
        dom.insert("row", Some("list"));

        assert!(dom.contains("root", "row"));
        assert!(dom.contains("row", "row"));
        assert!(!dom.contains("list", "root"));
        assert!(!dom.contains("list", "detached"));
    }

    #[test]
    fn class_list_is_a_set_in_insertion_order() {
        let dom = MemoryDom::new();
        dom.add_classes("panel", &strings(&["a", "b", "a"]));
        dom.add_classes("panel", &strings(&["c"]));
        dom.remove_classes("panel", &strings(&["b"]));

        assert_eq!(dom.classes("panel"), strings(&["a", "c"]));
        assert!(dom.has_class("panel", "c"));
    }

    #[test]
    fn click_records_and_routes_to_handler() {
        let dom = MemoryDom::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        dom.on_click("item", move || counter.set(counter.get() + 1));

        dom.click("item");
        dom.click("other");
        assert_eq!(hits.get(), 1);
        assert_eq!(dom.clicks(), strings(&["item", "other"]));
    }

    #[test]
    fn focus_is_tracked() {
        let dom = MemoryDom::new();
        assert_eq!(dom.focused(), None);
        dom.focus("button");
        assert_eq!(dom.focused().as_deref(), Some("button"));
    }
}
