//! Host document abstraction.
//!
//! This module defines the [`Dom`] trait: the handful of document operations
//! the components need. The library never owns a document; it addresses
//! elements by id and asks the host to act on them. This keeps the state
//! machines testable and lets any front-end (a browser binding, a TUI, a
//! game overlay) host the same behaviour.
//!
//! The trait is deliberately minimal: each method maps directly to a use in
//! the menu or transition layers.

/// Abstraction over the host's element tree.
///
/// All methods take `&self`; implementations needing mutation use interior
/// mutability, matching the single-threaded UI model.
///
/// # Implementations
///
/// - [`MemoryDom`](super::MemoryDom): in-memory element table
pub trait Dom {
    /// Moves keyboard focus to the element `id`.
    fn focus(&self, id: &str);

    /// Whether `target` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &str, target: &str) -> bool;

    /// The rendered text of element `id`, if the element exists.
    fn text_content(&self, id: &str) -> Option<String>;

    /// Dispatches a synthetic click on element `id`.
    fn click(&self, id: &str);

    /// Adds class tokens to element `id`, skipping ones already present.
    fn add_classes(&self, id: &str, classes: &[String]);

    /// Removes class tokens from element `id`.
    fn remove_classes(&self, id: &str, classes: &[String]);

    /// The computed value of a style property, e.g. `transition-duration`.
    fn computed_style(&self, id: &str, property: &str) -> Option<String>;
}
