//! The menu widget: a button that opens a list of selectable items.
//!
//! # Architecture
//!
//! ```text
//! host events ─► MenuButton / MenuItems / MenuItem
//!                         │ MenuAction
//!                         ▼
//!                MenuContext::dispatch (single queue)
//!                         │
//!                         ▼
//!                reduce(&MenuState, &MenuAction) ─► new MenuState ─► listeners
//! ```
//!
//! All state lives in [`MenuState`]; [`reduce`] is pure. Components own
//! their deferred work (focus moves after paint, typeahead reset) through
//! per-instance [`Disposables`](crate::runtime::Disposables), so dropping a
//! component cancels it.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use headless_ui::dom::{Key, KeyboardEvent, MemoryDom};
//! use headless_ui::menu::{ItemProps, Menu, MenuButton, MenuItem, MenuItems};
//! use headless_ui::runtime::ManualScheduler;
//!
//! let dom = Rc::new(MemoryDom::new());
//! let scheduler = Rc::new(ManualScheduler::new());
//! let menu = Menu::new(dom.clone(), scheduler.clone());
//! let button = MenuButton::new(Some(menu.context())).unwrap();
//! let _items = MenuItems::new(Some(menu.context())).unwrap();
//! let first = MenuItem::mount(Some(menu.context()), ItemProps::new()).unwrap();
//!
//! button.on_key_down(&mut KeyboardEvent::new(Key::ArrowDown));
//! scheduler.run_frame();
//! assert!(first.is_active());
//! ```

mod actions;
mod components;
mod context;
mod modes;
mod state;

pub use actions::MenuAction;
pub use components::{
    ClassName, ItemProps, ItemRenderProps, MenuButton, MenuItem, MenuItems,
};
pub use context::{use_menu_context, Menu, MenuContext, MenuRenderProps, Subscription};
pub use modes::{Focus, MenuStates};
pub use state::{reduce, ItemData, ItemDataRef, MenuItemEntry, MenuState};
