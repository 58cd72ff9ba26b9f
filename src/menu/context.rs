//! Shared menu instance: state, dispatch queue and host handles.
//!
//! A [`Menu`] root creates one [`MenuContext`] and hands clones of it to its
//! button, items container and items. Subcomponents receive it explicitly;
//! constructing one without it fails with
//! [`HeadlessError::MissingParent`].
//!
//! # Dispatch
//!
//! Actions are processed strictly in call order. A dispatch issued while
//! another is running (from a listener, or from a host callback triggered by
//! a listener) is queued and processed after the current one, never
//! interleaved with it. Listeners are notified after every action that
//! changed the state.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

use serde::Serialize;

use super::actions::MenuAction;
use super::state::{reduce, MenuState};
use crate::domain::{generate_id, HeadlessError, Result};
use crate::dom::{Dom, Element, PointerEvent};
use crate::runtime::Scheduler;
use crate::Config;

type Listener = Rc<dyn Fn(&MenuState)>;

struct ContextInner {
    state: RefCell<Rc<MenuState>>,
    queue: RefCell<VecDeque<MenuAction>>,
    dispatching: Cell<bool>,
    listeners: RefCell<Vec<(usize, Listener)>>,
    next_listener: Cell<usize>,
    button_id: String,
    items_id: String,
    dom: Rc<dyn Dom>,
    scheduler: Rc<dyn Scheduler>,
    search_clear_delay: Duration,
}

/// Handle to one menu instance, cheap to clone.
#[derive(Clone)]
pub struct MenuContext(Rc<ContextInner>);

impl MenuContext {
    fn new(dom: Rc<dyn Dom>, scheduler: Rc<dyn Scheduler>, config: &Config) -> Self {
        Self(Rc::new(ContextInner {
            state: RefCell::new(Rc::new(MenuState::new())),
            queue: RefCell::new(VecDeque::new()),
            dispatching: Cell::new(false),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
            button_id: generate_id("menu-button"),
            items_id: generate_id("menu-items"),
            dom,
            scheduler,
            search_clear_delay: Duration::from_millis(config.search_clear_delay_ms),
        }))
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> Rc<MenuState> {
        Rc::clone(&self.0.state.borrow())
    }

    /// Feeds `action` through the reducer.
    ///
    /// Re-entrant calls are queued behind the action being processed.
    pub fn dispatch(&self, action: MenuAction) {
        let inner = &self.0;
        inner.queue.borrow_mut().push_back(action);
        if inner.dispatching.get() {
            tracing::trace!(queued = inner.queue.borrow().len(), "dispatch queued");
            return;
        }

        inner.dispatching.set(true);
        loop {
            let Some(action) = inner.queue.borrow_mut().pop_front() else {
                break;
            };
            let current = self.state();
            let next = reduce(&current, &action);
            if Rc::ptr_eq(&current, &next) {
                continue;
            }
            *inner.state.borrow_mut() = Rc::clone(&next);

            let listeners: Vec<Listener> = inner
                .listeners
                .borrow()
                .iter()
                .map(|(_, listener)| Rc::clone(listener))
                .collect();
            for listener in listeners {
                listener(next.as_ref());
            }
        }
        inner.dispatching.set(false);
    }

    /// Calls `listener` after every state change until the returned
    /// [`Subscription`] is dropped.
    #[must_use = "the listener is removed when the subscription is dropped"]
    pub fn subscribe(&self, listener: impl Fn(&MenuState) + 'static) -> Subscription {
        let id = self.0.next_listener.get();
        self.0.next_listener.set(id + 1);
        self.0
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        Subscription {
            context: Rc::downgrade(&self.0),
            id,
        }
    }

    /// Element id of the button.
    #[must_use]
    pub fn button_id(&self) -> &str {
        &self.0.button_id
    }

    /// Element id of the items container.
    #[must_use]
    pub fn items_id(&self) -> &str {
        &self.0.items_id
    }

    /// The host document.
    #[must_use]
    pub fn dom(&self) -> &Rc<dyn Dom> {
        &self.0.dom
    }

    /// The host scheduler.
    #[must_use]
    pub fn scheduler(&self) -> Rc<dyn Scheduler> {
        Rc::clone(&self.0.scheduler)
    }

    /// How long typeahead input is kept before the query resets.
    #[must_use]
    pub fn search_clear_delay(&self) -> Duration {
        self.0.search_clear_delay
    }

    /// Moves focus to element `id`.
    pub(crate) fn focus(&self, id: &str) {
        tracing::debug!(target_id = %id, "focus");
        self.0.dom.focus(id);
    }
}

impl fmt::Debug for MenuContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuContext")
            .field("button_id", &self.0.button_id)
            .field("items_id", &self.0.items_id)
            .field("state", &self.0.state.borrow())
            .field("listeners", &self.0.listeners.borrow().len())
            .finish_non_exhaustive()
    }
}

/// Listener registration returned by [`MenuContext::subscribe`].
#[derive(Debug)]
pub struct Subscription {
    context: Weak<ContextInner>,
    id: usize,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(context) = self.context.upgrade() {
            context
                .listeners
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }
}

/// Resolves the menu context a subcomponent was given.
///
/// # Errors
///
/// Returns [`HeadlessError::MissingParent`] naming `component` when `context`
/// is `None`.
pub fn use_menu_context(component: &'static str, context: Option<&MenuContext>) -> Result<MenuContext> {
    context.cloned().ok_or_else(|| {
        tracing::error!(component, "mounted outside of a menu");
        HeadlessError::MissingParent {
            component,
            parent: "Menu",
        }
    })
}

/// Render-prop bag of the menu root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuRenderProps {
    /// Whether the menu is open.
    pub open: bool,
}

/// Root of a menu. Owns the [`MenuContext`] and the document-level
/// outside-click handling.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use headless_ui::dom::MemoryDom;
/// use headless_ui::menu::{Menu, MenuAction};
/// use headless_ui::runtime::ManualScheduler;
///
/// let menu = Menu::new(Rc::new(MemoryDom::new()), Rc::new(ManualScheduler::new()));
/// menu.context().dispatch(MenuAction::OpenMenu);
/// assert!(menu.render_props().open);
/// ```
#[derive(Debug, Clone)]
pub struct Menu {
    context: MenuContext,
}

impl Menu {
    /// Mounts a closed menu with default settings.
    pub fn new(dom: Rc<dyn Dom>, scheduler: Rc<dyn Scheduler>) -> Self {
        Self::with_config(dom, scheduler, &Config::default())
    }

    /// Mounts a closed menu using `config`.
    pub fn with_config(dom: Rc<dyn Dom>, scheduler: Rc<dyn Scheduler>, config: &Config) -> Self {
        let context = MenuContext::new(dom, scheduler, config);
        tracing::debug!(button = %context.button_id(), items = %context.items_id(), "menu mounted");
        Self { context }
    }

    /// Handle to pass to the subcomponents.
    #[must_use]
    pub fn context(&self) -> &MenuContext {
        &self.context
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> Rc<MenuState> {
        self.context.state()
    }

    /// `{open}` bag for the consumer's render function.
    #[must_use]
    pub fn render_props(&self) -> MenuRenderProps {
        MenuRenderProps {
            open: self.context.state().is_open(),
        }
    }

    /// The root renders no element of its own; `children` pass through.
    #[must_use]
    pub fn render(&self, children: Vec<Element>) -> Vec<Element> {
        children
    }

    /// Document-level pointer-down handler.
    ///
    /// While open, a pointer-down outside both the button and the items
    /// container closes the menu and, unless the event's default was
    /// prevented, returns focus to the button. Events whose propagation the
    /// button stopped are ignored.
    pub fn on_document_pointer_down(&self, event: &PointerEvent) {
        if !self.context.state().is_open() || event.is_propagation_stopped() {
            return;
        }
        let dom = self.context.dom();
        let Some(target) = event.target.as_deref() else {
            return;
        };
        if dom.contains(self.context.button_id(), target) {
            return;
        }
        if dom.contains(self.context.items_id(), target) {
            return;
        }

        tracing::debug!(target_id = %target, "pointer down outside menu");
        self.context.dispatch(MenuAction::CloseMenu);
        if !event.is_default_prevented() {
            self.context.focus(self.context.button_id());
        }
    }
}
