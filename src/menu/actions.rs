//! Actions accepted by the menu reducer.
//!
//! Components never mutate [`MenuState`](super::MenuState) directly; they
//! translate host events into [`MenuAction`]s and dispatch them through the
//! shared [`MenuContext`](super::MenuContext), which feeds them to
//! [`reduce`](super::reduce) one at a time.

use super::modes::Focus;
use super::state::ItemDataRef;

/// A menu state transition request.
#[derive(Debug, Clone)]
pub enum MenuAction {
    /// Flips between open and closed.
    ToggleMenu,
    /// Opens the menu.
    OpenMenu,
    /// Closes the menu.
    CloseMenu,
    /// Recomputes the active item and clears the search query.
    GoToItem(Focus),
    /// Appends to the typeahead query and jumps to the first match.
    Search(String),
    /// Empties the typeahead query.
    ClearSearch,
    /// Appends an item in registration order.
    RegisterItem {
        /// Element id of the item.
        id: String,
        /// Capability cell shared with the item component.
        data: ItemDataRef,
    },
    /// Removes an item, keeping the active item's identity stable.
    UnregisterItem(String),
}
