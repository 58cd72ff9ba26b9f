//! Render output and the "render as any element" collaborator.
//!
//! Components describe their markup as an [`Element`]; hosts turn that into
//! real nodes. [`render_as`] is the single place where a component's prop bag
//! becomes an element: it resolves the target tag, lifts `id` and `class`
//! into dedicated fields and drops undefined (`None`) props.

use std::collections::BTreeMap;

use serde::Serialize;

/// A rendered element description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Element {
    /// Element type, e.g. `button` or `div`.
    pub tag: String,
    /// Element id, the handle [`Dom`](super::Dom) operations use.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Resolved class attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Every other attribute, sorted by name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    /// Text content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Child elements.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Element {
    /// Creates a bare element of type `tag`.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    /// Looks up an attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Appends a child.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Sets the text content.
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    /// Serializes the element tree for snapshots and host bridges.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// A bag of optional props; `None` means "undefined" and is never rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Props(BTreeMap<String, Option<String>>);

impl Props {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, replacing any previous value.
    #[must_use]
    pub fn with(mut self, name: &str, value: Option<String>) -> Self {
        self.0.insert(name.to_string(), value);
        self
    }

    /// Sets `name` to `value`.
    pub fn set(&mut self, name: &str, value: Option<String>) {
        self.0.insert(name.to_string(), value);
    }

    /// The defined value of `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|v| v.as_deref())
    }

    /// Layers `overrides` on top of `self`.
    ///
    /// Defined override values win; undefined overrides do not erase a defined
    /// value underneath.
    #[must_use]
    pub fn merge(mut self, overrides: Self) -> Self {
        for (name, value) in overrides.0 {
            match value {
                Some(v) => {
                    self.0.insert(name, Some(v));
                }
                None => {
                    self.0.entry(name).or_insert(None);
                }
            }
        }
        self
    }
}

/// Renders `props` as an element of type `tag`.
///
/// # Example
///
/// ```
/// use headless_ui::dom::{render_as, Props};
///
/// let props = Props::new()
///     .with("id", Some("menu-button".to_string()))
///     .with("aria-expanded", None);
/// let el = render_as("button", props, Vec::new());
/// assert_eq!(el.id.as_deref(), Some("menu-button"));
/// assert!(el.attributes.is_empty());
/// ```
#[must_use]
pub fn render_as(tag: &str, props: Props, children: Vec<Element>) -> Element {
    let mut element = Element::new(tag);
    for (name, value) in props.0 {
        let Some(value) = value else {
            continue;
        };
        match name.as_str() {
            "id" => element.id = Some(value),
            "class" => element.class = Some(value),
            _ => {
                element.attributes.insert(name, value);
            }
        }
    }
    element.children = children;
    element
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn merge_keeps_defined_values_under_undefined_overrides() {
        let base = Props::new()
            .with("role", Some("menu".to_string()))
            .with("title", Some("consumer".to_string()));
        let library = Props::new()
            .with("role", None)
            .with("title", Some("library".to_string()));

        let merged = base.merge(library);
        assert_eq!(merged.get("role"), Some("menu"));
        assert_eq!(merged.get("title"), Some("library"));
    }

    #[test]
    fn render_lifts_id_and_class() {
        let props = Props::new()
            .with("id", Some("items".to_string()))
            .with("class", Some("panel".to_string()))
            .with("role", Some("menu".to_string()));
        let el = render_as("div", props, vec![Element::new("a").with_text("Edit")]);

        assert_eq!(
            el.to_json(),
            json!({
                "tag": "div",
                "id": "items",
                "class": "panel",
                "attributes": { "role": "menu" },
                "children": [{ "tag": "a", "text": "Edit" }]
            })
        );
    }
}
