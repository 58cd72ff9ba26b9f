//! `Menu.Button`: the control that opens the menu.

use crate::domain::Result;
use crate::dom::{render_as, Element, Key, KeyboardEvent, PointerEvent, Props};
use crate::menu::context::{use_menu_context, MenuContext};
use crate::menu::{Focus, MenuAction};
use crate::runtime::Disposables;

/// The menu's trigger button.
#[derive(Debug)]
pub struct MenuButton {
    context: MenuContext,
    disposables: Disposables,
}

impl MenuButton {
    /// Mounts the button inside the menu owning `context`.
    ///
    /// # Errors
    ///
    /// Returns [`HeadlessError::MissingParent`](crate::domain::HeadlessError::MissingParent)
    /// when `context` is `None`.
    pub fn new(context: Option<&MenuContext>) -> Result<Self> {
        let context = use_menu_context("Menu.Button", context)?;
        let disposables = Disposables::new(context.scheduler());
        Ok(Self {
            context,
            disposables,
        })
    }

    /// Element id of the button.
    #[must_use]
    pub fn id(&self) -> &str {
        self.context.button_id()
    }

    /// Keyboard contract: Space, Enter and ArrowDown open the menu on the
    /// first item; ArrowUp opens it on the last. Focus moves to the items
    /// container after the next paint.
    pub fn on_key_down(&self, event: &mut KeyboardEvent) {
        let focus = match event.key {
            Key::Space | Key::Enter | Key::ArrowDown => Focus::FirstItem,
            Key::ArrowUp => Focus::LastItem,
            _ => return,
        };
        event.prevent_default();
        self.context.dispatch(MenuAction::OpenMenu);

        let context = self.context.clone();
        self.disposables.next_frame(move || {
            context.focus(context.items_id());
            context.dispatch(MenuAction::GoToItem(focus));
        });
    }

    /// Keeps the document-level outside-click handler from seeing this press.
    pub fn on_pointer_down(&self, event: &mut PointerEvent) {
        event.stop_propagation();
    }

    /// Toggles the menu; on open, focuses the items container after the next paint.
    pub fn on_pointer_up(&self, _event: &mut PointerEvent) {
        self.context.dispatch(MenuAction::ToggleMenu);
        if self.context.state().is_open() {
            let context = self.context.clone();
            self.disposables.next_frame(move || context.focus(context.items_id()));
        }
    }

    /// Renders the button. Consumer `props` are layered under the ARIA wiring.
    #[must_use]
    pub fn render(&self, props: Props, children: Vec<Element>) -> Element {
        let open = self.context.state().is_open();
        let wiring = Props::new()
            .with("id", Some(self.id().to_string()))
            .with("type", Some("button".to_string()))
            .with("aria-haspopup", Some("true".to_string()))
            .with("aria-controls", open.then(|| self.context.items_id().to_string()))
            .with("aria-expanded", open.then(|| "true".to_string()));
        render_as("button", props.merge(wiring), children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;
    use crate::menu::Menu;
    use crate::runtime::ManualScheduler;
    use std::rc::Rc;

    #[test]
    fn aria_controls_only_while_open() {
        let menu = Menu::new(Rc::new(MemoryDom::new()), Rc::new(ManualScheduler::new()));
        let button = MenuButton::new(Some(menu.context())).unwrap();

        let closed = button.render(Props::new(), vec![]);
        assert_eq!(closed.attribute("aria-haspopup"), Some("true"));
        assert_eq!(closed.attribute("aria-controls"), None);
        assert_eq!(closed.attribute("aria-expanded"), None);

        menu.context().dispatch(MenuAction::OpenMenu);
        let open = button.render(Props::new(), vec![]);
        assert_eq!(open.attribute("aria-controls"), Some(menu.context().items_id()));
        assert_eq!(open.attribute("aria-expanded"), Some("true"));
    }

    #[test]
    fn consumer_props_cannot_override_wiring() {
        let menu = Menu::new(Rc::new(MemoryDom::new()), Rc::new(ManualScheduler::new()));
        let button = MenuButton::new(Some(menu.context())).unwrap();
        let props = Props::new()
            .with("type", Some("submit".to_string()))
            .with("class", Some("btn".to_string()));
        let element = button.render(props, vec![]);
        assert_eq!(element.attribute("type"), Some("button"));
        assert_eq!(element.class.as_deref(), Some("btn"));
    }

    #[test]
    fn unrelated_keys_are_left_alone() {
        let menu = Menu::new(Rc::new(MemoryDom::new()), Rc::new(ManualScheduler::new()));
        let button = MenuButton::new(Some(menu.context())).unwrap();
        let mut event = KeyboardEvent::new(Key::Tab);
        button.on_key_down(&mut event);
        assert!(!event.is_default_prevented());
        assert!(!menu.state().is_open());
    }

    #[test]
    fn pointer_down_stops_propagation() {
        let menu = Menu::new(Rc::new(MemoryDom::new()), Rc::new(ManualScheduler::new()));
        let button = MenuButton::new(Some(menu.context())).unwrap();
        let mut event = PointerEvent::on(button.id());
        button.on_pointer_down(&mut event);
        assert!(event.is_propagation_stopped());
    }
}
