//! `Menu.Items`: the popup container and its keyboard handling.

use crate::domain::Result;
use crate::dom::{render_as, Element, Key, KeyboardEvent, Props};
use crate::menu::context::{use_menu_context, MenuContext, Subscription};
use crate::menu::{Focus, MenuAction};
use crate::runtime::Disposables;
use crate::transition::{Transition, TransitionClasses, TransitionProps, TransitionStatus};

/// The items container.
///
/// Visibility follows the menu's open state through an owned [`Transition`]
/// rooted on the container element, so a close plays the leave classes
/// before the container stops rendering.
#[derive(Debug)]
pub struct MenuItems {
    context: MenuContext,
    transition: Transition,
    disposables: Disposables,
    search: Disposables,
    _subscription: Subscription,
}

impl MenuItems {
    /// Mounts the container with no transition classes.
    ///
    /// # Errors
    ///
    /// Returns [`HeadlessError::MissingParent`](crate::domain::HeadlessError::MissingParent)
    /// when `context` is `None`.
    pub fn new(context: Option<&MenuContext>) -> Result<Self> {
        Self::with_transition(context, TransitionClasses::default())
    }

    /// Mounts the container, animating open and close with `classes`.
    ///
    /// # Errors
    ///
    /// Returns [`HeadlessError::MissingParent`](crate::domain::HeadlessError::MissingParent)
    /// when `context` is `None`.
    pub fn with_transition(context: Option<&MenuContext>, classes: TransitionClasses) -> Result<Self> {
        let context = use_menu_context("Menu.Items", context)?;
        let transition = Transition::new(
            context.dom().clone(),
            context.scheduler(),
            context.state().is_open(),
            TransitionProps::with_classes(classes).id(context.items_id()),
        );
        let driven = transition.clone();
        let subscription = context.subscribe(move |state| driven.set_show(state.is_open()));

        Ok(Self {
            disposables: Disposables::new(context.scheduler()),
            search: Disposables::new(context.scheduler()),
            context,
            transition,
            _subscription: subscription,
        })
    }

    /// Element id of the container.
    #[must_use]
    pub fn id(&self) -> &str {
        self.context.items_id()
    }

    /// Lifecycle status of the container's transition.
    #[must_use]
    pub fn transition_status(&self) -> TransitionStatus {
        self.transition.status()
    }

    /// The transition rooted on the container, for nesting children under it.
    #[must_use]
    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    /// Keyboard contract of the open menu.
    ///
    /// | Key                 | Effect                                    |
    /// |---------------------|-------------------------------------------|
    /// | Enter               | click active item, close, refocus button  |
    /// | Space               | typeahead when a query is pending, else Enter |
    /// | ArrowDown / ArrowUp | next / previous enabled item              |
    /// | Home, PageUp        | first enabled item                        |
    /// | End, PageDown       | last enabled item                         |
    /// | Escape              | close, refocus button                     |
    /// | Tab                 | suppressed                                |
    /// | any character       | typeahead                                 |
    pub fn on_key_down(&self, event: &mut KeyboardEvent) {
        let searching = !self.context.state().search_query().is_empty();
        let key = event.key.clone();
        match key {
            Key::Space if searching => {
                event.prevent_default();
                event.stop_propagation();
                self.search(' ');
            }
            Key::Enter | Key::Space => {
                event.prevent_default();
                self.activate_and_close();
            }
            Key::ArrowDown => self.go_to(event, Focus::NextItem),
            Key::ArrowUp => self.go_to(event, Focus::PreviousItem),
            Key::Home | Key::PageUp => self.go_to(event, Focus::FirstItem),
            Key::End | Key::PageDown => self.go_to(event, Focus::LastItem),
            Key::Escape => {
                event.prevent_default();
                self.context.dispatch(MenuAction::CloseMenu);
                self.refocus_button();
            }
            Key::Tab => event.prevent_default(),
            other => {
                if let Some(ch) = other.printable() {
                    self.search(ch);
                }
            }
        }
    }

    fn go_to(&self, event: &mut KeyboardEvent, focus: Focus) {
        event.prevent_default();
        self.context.dispatch(MenuAction::GoToItem(focus));
    }

    fn activate_and_close(&self) {
        let active = self.context.state().active_item().map(|item| item.id.clone());
        self.context.dispatch(MenuAction::CloseMenu);
        if let Some(id) = active {
            tracing::debug!(item = %id, "activating item");
            self.context.dom().click(&id);
        }
        self.refocus_button();
    }

    fn search(&self, ch: char) {
        self.context.dispatch(MenuAction::Search(ch.to_string()));
        self.search.dispose();
        let context = self.context.clone();
        self.search
            .set_timeout(self.context.search_clear_delay(), move || {
                context.dispatch(MenuAction::ClearSearch);
            });
    }

    fn refocus_button(&self) {
        let context = self.context.clone();
        self.disposables
            .next_frame(move || context.focus(context.button_id()));
    }

    /// Renders the container, or `None` once its transition is hidden.
    #[must_use]
    pub fn render(&self, props: Props, children: Vec<Element>) -> Option<Element> {
        let state = self.context.state();
        let wiring = Props::new()
            .with("id", Some(self.id().to_string()))
            .with("role", Some("menu".to_string()))
            .with("tabindex", Some("0".to_string()))
            .with(
                "aria-activedescendant",
                state.active_item().map(|item| item.id.clone()),
            )
            .with("aria-labelledby", Some(self.context.button_id().to_string()));
        self.transition
            .render_with(|element| render_as(&element.tag, props.merge(wiring), children))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;
    use crate::menu::Menu;
    use crate::runtime::ManualScheduler;
    use std::rc::Rc;

    fn mounted() -> (Rc<ManualScheduler>, Menu, MenuItems) {
        let scheduler = Rc::new(ManualScheduler::new());
        let menu = Menu::new(Rc::new(MemoryDom::new()), scheduler.clone());
        let items = MenuItems::new(Some(menu.context())).unwrap();
        (scheduler, menu, items)
    }

    #[test]
    fn hidden_until_opened() {
        let (_, menu, items) = mounted();
        assert!(items.render(Props::new(), vec![]).is_none());

        menu.context().dispatch(MenuAction::OpenMenu);
        let element = items.render(Props::new(), vec![]).unwrap();
        assert_eq!(element.attribute("role"), Some("menu"));
        assert_eq!(element.attribute("tabindex"), Some("0"));
        assert_eq!(element.attribute("aria-labelledby"), Some(menu.context().button_id()));
        assert_eq!(element.attribute("aria-activedescendant"), None);
    }

    #[test]
    fn escape_closes_and_refocuses_after_paint() {
        let dom = Rc::new(MemoryDom::new());
        let scheduler = Rc::new(ManualScheduler::new());
        let menu = Menu::new(dom.clone(), scheduler.clone());
        let items = MenuItems::new(Some(menu.context())).unwrap();
        menu.context().dispatch(MenuAction::OpenMenu);

        let mut event = KeyboardEvent::new(Key::Escape);
        items.on_key_down(&mut event);
        assert!(event.is_default_prevented());
        assert!(!menu.state().is_open());
        assert_eq!(dom.focused(), None);

        scheduler.run_frame();
        assert_eq!(dom.focused().as_deref(), Some(menu.context().button_id()));
    }

    #[test]
    fn tab_is_suppressed() {
        let (_, menu, items) = mounted();
        menu.context().dispatch(MenuAction::OpenMenu);
        let mut event = KeyboardEvent::new(Key::Tab);
        items.on_key_down(&mut event);
        assert!(event.is_default_prevented());
        assert!(menu.state().is_open());
    }

    #[test]
    fn without_context_is_rejected() {
        let err = MenuItems::new(None).unwrap_err();
        assert!(err.to_string().contains("<Menu.Items />"));
    }
}
