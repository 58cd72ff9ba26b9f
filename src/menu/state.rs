//! Menu state and its pure reducer.
//!
//! This module defines [`MenuState`], the single source of truth for one
//! menu instance, and [`reduce`], the only function that produces new states.
//!
//! # State Components
//!
//! - **Open state**: [`MenuStates::Open`] or [`MenuStates::Closed`]
//! - **Items**: registered items in registration order, each with a shared
//!   [`ItemDataRef`] capability cell
//! - **Active item**: optional index into the items, always valid
//! - **Search query**: typeahead buffer, lowercased
//!
//! # Reference stability
//!
//! States are shared behind `Rc`. When an action changes nothing the reducer
//! hands back the very same `Rc`, so hosts can skip re-rendering with a
//! pointer comparison.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use headless_ui::menu::{reduce, Focus, ItemDataRef, MenuAction, MenuState};
//!
//! let mut state = Rc::new(MenuState::new());
//! for id in ["a", "b", "c"] {
//!     let action = MenuAction::RegisterItem { id: id.to_string(), data: ItemDataRef::new() };
//!     state = reduce(&state, &action);
//! }
//! state = reduce(&state, &MenuAction::GoToItem(Focus::LastItem));
//! assert_eq!(state.active_item_index(), Some(2));
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::actions::MenuAction;
use super::modes::{Focus, MenuStates};

/// Item capabilities read by the reducer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemData {
    /// Disabled items are skipped by relative navigation and typeahead.
    pub disabled: bool,
    /// Lowercased text content, read lazily from the host.
    pub text_value: Option<String>,
}

/// Capability cell shared between an item component and the state machine.
///
/// The item writes it from its lifecycle hooks (mount, disabled change);
/// the reducer only reads it. Updates do not go through dispatch.
#[derive(Clone, Default)]
pub struct ItemDataRef(Rc<RefCell<ItemData>>);

impl ItemDataRef {
    /// Creates a cell for an enabled item with no text yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cell with the given contents.
    #[must_use]
    pub fn with(data: ItemData) -> Self {
        Self(Rc::new(RefCell::new(data)))
    }

    /// Snapshot of the current contents.
    #[must_use]
    pub fn get(&self) -> ItemData {
        self.0.borrow().clone()
    }

    /// Whether the item is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.0.borrow().disabled
    }

    /// Whether the item's text starts with `query`.
    #[must_use]
    pub fn text_starts_with(&self, query: &str) -> bool {
        self.0
            .borrow()
            .text_value
            .as_deref()
            .is_some_and(|text| text.starts_with(query))
    }

    /// Updates the disabled flag.
    pub fn set_disabled(&self, disabled: bool) {
        self.0.borrow_mut().disabled = disabled;
    }

    /// Updates the cached text value.
    pub fn set_text_value(&self, text_value: Option<String>) {
        self.0.borrow_mut().text_value = text_value;
    }

    /// Whether two handles point at the same cell.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ItemDataRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ItemDataRef").field(&*self.0.borrow()).finish()
    }
}

/// One registered item.
#[derive(Debug, Clone)]
pub struct MenuItemEntry {
    /// Element id of the item.
    pub id: String,
    /// Its capability cell.
    pub data: ItemDataRef,
}

/// State of one menu instance.
///
/// Invariants: `active_item_index`, when set, indexes into `items`; items keep
/// registration order; item ids are unique.
#[derive(Debug, Clone, Default)]
pub struct MenuState {
    menu_state: MenuStates,
    items: Vec<MenuItemEntry>,
    active_item_index: Option<usize>,
    search_query: String,
}

impl MenuState {
    /// A closed menu with no items.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open or closed.
    #[must_use]
    pub const fn menu_state(&self) -> MenuStates {
        self.menu_state
    }

    /// Whether the menu is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.menu_state == MenuStates::Open
    }

    /// Registered items, in registration order.
    #[must_use]
    pub fn items(&self) -> &[MenuItemEntry] {
        &self.items
    }

    /// Index of the active item.
    #[must_use]
    pub const fn active_item_index(&self) -> Option<usize> {
        self.active_item_index
    }

    /// The active item.
    #[must_use]
    pub fn active_item(&self) -> Option<&MenuItemEntry> {
        self.active_item_index.and_then(|idx| self.items.get(idx))
    }

    /// Current typeahead query.
    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    fn is_enabled(&self, idx: usize) -> bool {
        !self.items[idx].data.is_disabled()
    }

    /// Index `focus` resolves to against the current items.
    fn resolve_focus(&self, focus: &Focus) -> Option<usize> {
        let len = self.items.len();
        match focus {
            Focus::FirstItem => (0..len).find(|&idx| self.is_enabled(idx)),
            Focus::LastItem => (0..len).rev().find(|&idx| self.is_enabled(idx)),
            Focus::PreviousItem => {
                let end = self.active_item_index.unwrap_or(len);
                (0..end)
                    .rev()
                    .find(|&idx| self.is_enabled(idx))
                    .or(self.active_item_index)
            }
            Focus::NextItem => {
                let start = self.active_item_index.map_or(0, |idx| idx + 1);
                (start..len)
                    .find(|&idx| self.is_enabled(idx))
                    .or(self.active_item_index)
            }
            Focus::SpecificItem(id) => self.items.iter().position(|item| &item.id == id),
            Focus::Nothing => None,
        }
    }
}

/// Applies `action` to `state`.
///
/// Returns `state` itself (same `Rc`) when the action is a no-op.
#[must_use]
pub fn reduce(state: &Rc<MenuState>, action: &MenuAction) -> Rc<MenuState> {
    let _span = tracing::debug_span!("reduce", action = ?action).entered();

    match action {
        MenuAction::ToggleMenu => Rc::new(MenuState {
            menu_state: state.menu_state.toggled(),
            ..(**state).clone()
        }),
        MenuAction::OpenMenu => set_menu_state(state, MenuStates::Open),
        MenuAction::CloseMenu => set_menu_state(state, MenuStates::Closed),
        MenuAction::GoToItem(focus) => {
            let active_item_index = state.resolve_focus(focus);
            if state.search_query.is_empty() && state.active_item_index == active_item_index {
                return Rc::clone(state);
            }
            tracing::trace!(from = ?state.active_item_index, to = ?active_item_index, "active item moved");
            Rc::new(MenuState {
                active_item_index,
                search_query: String::new(),
                ..(**state).clone()
            })
        }
        MenuAction::Search(value) => {
            let search_query = format!("{}{}", state.search_query, value.to_lowercase());
            let matched = state
                .items
                .iter()
                .position(|item| !item.data.is_disabled() && item.data.text_starts_with(&search_query));
            tracing::trace!(query = %search_query, matched = ?matched, "typeahead search");
            let active_item_index = match matched {
                Some(idx) if Some(idx) != state.active_item_index => Some(idx),
                _ => state.active_item_index,
            };
            Rc::new(MenuState {
                active_item_index,
                search_query,
                ..(**state).clone()
            })
        }
        MenuAction::ClearSearch => {
            if state.search_query.is_empty() {
                return Rc::clone(state);
            }
            Rc::new(MenuState {
                search_query: String::new(),
                ..(**state).clone()
            })
        }
        MenuAction::RegisterItem { id, data } => {
            let mut next = (**state).clone();
            match next.items.iter_mut().find(|item| &item.id == id) {
                Some(existing) => existing.data = data.clone(),
                None => next.items.push(MenuItemEntry {
                    id: id.clone(),
                    data: data.clone(),
                }),
            }
            tracing::debug!(id = %id, count = next.items.len(), "item registered");
            Rc::new(next)
        }
        MenuAction::UnregisterItem(id) => {
            let Some(removed) = state.items.iter().position(|item| &item.id == id) else {
                return Rc::clone(state);
            };
            let mut next = (**state).clone();
            next.items.remove(removed);
            next.active_item_index = match state.active_item_index {
                Some(active) if active == removed => None,
                Some(active) if active > removed => Some(active - 1),
                other => other,
            };
            tracing::debug!(id = %id, count = next.items.len(), "item unregistered");
            Rc::new(next)
        }
    }
}

fn set_menu_state(state: &Rc<MenuState>, menu_state: MenuStates) -> Rc<MenuState> {
    if state.menu_state == menu_state {
        return Rc::clone(state);
    }
    Rc::new(MenuState {
        menu_state,
        ..(**state).clone()
    })
}
