//! `Menu.Item`: one selectable entry.
//!
//! An item registers itself with the menu on mount and unregisters on drop.
//! Its disabled flag and text value live in an [`ItemDataRef`] shared with
//! the state machine; the text is read from the host document and
//! normalised (trimmed, lowercased) so typeahead can match against it.

use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::domain::{generate_id, HeadlessError, Result};
use crate::dom::{render_as, Element, PointerEvent, Props};
use crate::menu::context::{use_menu_context, MenuContext};
use crate::menu::state::{ItemData, ItemDataRef};
use crate::menu::{Focus, MenuAction};
use crate::runtime::Disposables;

/// Render-prop bag of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ItemRenderProps {
    /// Whether the item is the active one.
    pub active: bool,
    /// Whether the item is disabled.
    pub disabled: bool,
}

/// Class name of an item: fixed, or computed from its render props.
#[derive(Clone, Default)]
pub enum ClassName {
    /// No class attribute.
    #[default]
    None,
    /// A fixed class string.
    Static(String),
    /// Computed on every render.
    Dynamic(Rc<dyn Fn(&ItemRenderProps) -> String>),
}

impl ClassName {
    /// A class computed from the item's render props.
    pub fn dynamic(f: impl Fn(&ItemRenderProps) -> String + 'static) -> Self {
        Self::Dynamic(Rc::new(f))
    }

    fn resolve(&self, bag: &ItemRenderProps) -> Option<String> {
        match self {
            Self::None => None,
            Self::Static(class) => Some(class.clone()),
            Self::Dynamic(f) => Some(f(bag)),
        }
    }
}

impl fmt::Debug for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Static(class) => f.debug_tuple("Static").field(class).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

type Action = Rc<dyn Fn()>;

/// Options for [`MenuItem::mount`].
#[derive(Clone)]
pub struct ItemProps {
    disabled: bool,
    class_name: ClassName,
    on_click: Option<Action>,
    tag: String,
    id: Option<String>,
}

impl Default for ItemProps {
    fn default() -> Self {
        Self {
            disabled: false,
            class_name: ClassName::None,
            on_click: None,
            tag: "a".to_string(),
            id: None,
        }
    }
}

impl ItemProps {
    /// An enabled `a` item with no action.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the disabled flag.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Sets the class name.
    #[must_use]
    pub fn class_name(mut self, class_name: ClassName) -> Self {
        self.class_name = class_name;
        self
    }

    /// The item's click action.
    #[must_use]
    pub fn on_click(mut self, f: impl Fn() + 'static) -> Self {
        self.on_click = Some(Rc::new(f));
        self
    }

    /// Renders as `tag` instead of `a`.
    #[must_use]
    pub fn as_tag(mut self, tag: &str) -> Self {
        self.tag = tag.to_string();
        self
    }

    /// Uses a fixed element id instead of a generated one.
    #[must_use]
    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }
}

impl fmt::Debug for ItemProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemProps")
            .field("disabled", &self.disabled)
            .field("class_name", &self.class_name)
            .field("on_click", &self.on_click.is_some())
            .field("tag", &self.tag)
            .field("id", &self.id)
            .finish()
    }
}

/// A mounted menu item.
#[derive(Debug)]
pub struct MenuItem {
    context: MenuContext,
    id: String,
    data: ItemDataRef,
    props: ItemProps,
    disposables: Disposables,
}

impl MenuItem {
    /// Mounts an item and registers it after any items already mounted.
    ///
    /// # Errors
    ///
    /// Returns [`HeadlessError::MissingParent`] when `context` is `None`, and
    /// [`HeadlessError::Config`] when an explicit id is already taken by a
    /// mounted item of the same menu.
    pub fn mount(context: Option<&MenuContext>, props: ItemProps) -> Result<Self> {
        let context = use_menu_context("Menu.Item", context)?;
        let id = match &props.id {
            Some(id) => {
                if context.state().items().iter().any(|item| &item.id == id) {
                    tracing::error!(item = %id, "duplicate menu item id");
                    return Err(HeadlessError::Config(format!(
                        "menu item id \"{id}\" is already registered"
                    )));
                }
                id.clone()
            }
            None => generate_id("menu-item"),
        };
        let data = ItemDataRef::with(ItemData {
            disabled: props.disabled,
            text_value: None,
        });
        let item = Self {
            disposables: Disposables::new(context.scheduler()),
            context,
            id,
            data,
            props,
        };
        item.sync_text_value();
        tracing::debug!(item = %item.id, disabled = item.props.disabled, "item mounted");
        item.context.dispatch(MenuAction::RegisterItem {
            id: item.id.clone(),
            data: item.data.clone(),
        });
        Ok(item)
    }

    /// Element id of the item.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the item is disabled.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.props.disabled
    }

    /// Whether the item is the menu's active item.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.context
            .state()
            .active_item()
            .is_some_and(|item| item.id == self.id)
    }

    /// Updates the disabled flag and re-reads the text value.
    ///
    /// Disabling the active item clears the active item.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.props.disabled = disabled;
        self.data.set_disabled(disabled);
        self.sync_text_value();
        if disabled && self.is_active() {
            self.context.dispatch(MenuAction::GoToItem(Focus::Nothing));
        }
    }

    /// Re-reads the item's text from the host document.
    pub fn sync_text_value(&self) {
        let text = self
            .context
            .dom()
            .text_content(&self.id)
            .map(|text| text.trim().to_lowercase());
        self.data.set_text_value(text);
    }

    /// Click handler: runs the action unless the item is disabled, in which
    /// case the click is prevented.
    pub fn on_click(&self, event: &mut PointerEvent) {
        if self.props.disabled {
            event.prevent_default();
            return;
        }
        if let Some(action) = &self.props.on_click {
            action();
        }
    }

    /// A detached click handler for hosts that route synthetic clicks by id,
    /// e.g. [`MemoryDom::on_click`](crate::dom::MemoryDom::on_click).
    ///
    /// Reads the live disabled flag, so later [`set_disabled`](Self::set_disabled)
    /// calls are honoured.
    #[must_use]
    pub fn click_handler(&self) -> impl Fn() + 'static {
        let data = self.data.clone();
        let action = self.props.on_click.clone();
        move || {
            if data.is_disabled() {
                return;
            }
            if let Some(action) = &action {
                action();
            }
        }
    }

    /// Focus makes an enabled item active; a disabled one clears the active item.
    pub fn on_focus(&self) {
        self.target_self();
    }

    /// Blur on a disabled item clears the active item.
    pub fn on_blur(&self) {
        if self.props.disabled {
            self.context.dispatch(MenuAction::GoToItem(Focus::Nothing));
        }
    }

    /// Same as [`on_focus`](Self::on_focus).
    pub fn on_pointer_enter(&self) {
        self.target_self();
    }

    /// Leaving a disabled or active item clears the active item.
    pub fn on_pointer_leave(&self) {
        if self.props.disabled || self.is_active() {
            self.context.dispatch(MenuAction::GoToItem(Focus::Nothing));
        }
    }

    /// Moving over an enabled, inactive item activates it.
    pub fn on_mouse_move(&self) {
        if self.props.disabled || self.is_active() {
            return;
        }
        self.context
            .dispatch(MenuAction::GoToItem(Focus::SpecificItem(self.id.clone())));
    }

    /// Activates the item: clicks it through the host, closes the menu and
    /// returns focus to the button after the next paint.
    pub fn on_pointer_up(&self) {
        if self.props.disabled {
            return;
        }
        self.context.dispatch(MenuAction::CloseMenu);
        self.context.dom().click(&self.id);
        let context = self.context.clone();
        self.disposables
            .next_frame(move || context.focus(context.button_id()));
    }

    fn target_self(&self) {
        let focus = if self.props.disabled {
            Focus::Nothing
        } else {
            Focus::SpecificItem(self.id.clone())
        };
        self.context.dispatch(MenuAction::GoToItem(focus));
    }

    /// `{active, disabled}` bag for the consumer's render function.
    #[must_use]
    pub fn render_props(&self) -> ItemRenderProps {
        ItemRenderProps {
            active: self.is_active(),
            disabled: self.props.disabled,
        }
    }

    /// Renders the item. Consumer `props` are layered under the ARIA wiring.
    #[must_use]
    pub fn render(&self, props: Props, children: Vec<Element>) -> Element {
        let bag = self.render_props();
        let wiring = Props::new()
            .with("id", Some(self.id.clone()))
            .with("role", Some("menuitem".to_string()))
            .with("tabindex", Some("-1".to_string()))
            .with("aria-disabled", bag.disabled.then(|| "true".to_string()))
            .with("class", self.props.class_name.resolve(&bag));
        render_as(&self.props.tag, props.merge(wiring), children)
    }
}

impl Drop for MenuItem {
    fn drop(&mut self) {
        tracing::debug!(item = %self.id, "item unmounted");
        self.context
            .dispatch(MenuAction::UnregisterItem(self.id.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;
    use crate::menu::Menu;
    use crate::runtime::ManualScheduler;
    use std::cell::Cell;

    fn menu_with_dom() -> (Rc<MemoryDom>, Menu) {
        let dom = Rc::new(MemoryDom::new());
        let menu = Menu::new(dom.clone(), Rc::new(ManualScheduler::new()));
        (dom, menu)
    }

    #[test]
    fn mount_reads_normalised_text() {
        let (dom, menu) = menu_with_dom();
        dom.set_text("edit", "  Edit File \n");
        let item = MenuItem::mount(Some(menu.context()), ItemProps::new().id("edit")).unwrap();
        assert_eq!(
            menu.state().items()[0].data.get().text_value.as_deref(),
            Some("edit file")
        );
        assert_eq!(item.id(), "edit");
    }

    #[test]
    fn drop_unregisters() {
        let (_, menu) = menu_with_dom();
        let item = MenuItem::mount(Some(menu.context()), ItemProps::new()).unwrap();
        assert_eq!(menu.state().items().len(), 1);
        drop(item);
        assert!(menu.state().items().is_empty());
    }

    #[test]
    fn disabled_click_is_prevented() {
        let (_, menu) = menu_with_dom();
        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);
        let item = MenuItem::mount(
            Some(menu.context()),
            ItemProps::new().disabled(true).on_click(move || flag.set(true)),
        )
        .unwrap();

        let mut event = PointerEvent::on(item.id());
        item.on_click(&mut event);
        assert!(event.is_default_prevented());
        assert!(!ran.get());

        item.click_handler()();
        assert!(!ran.get());
    }

    #[test]
    fn disabled_item_focus_clears_active() {
        let (_, menu) = menu_with_dom();
        let enabled = MenuItem::mount(Some(menu.context()), ItemProps::new()).unwrap();
        let disabled =
            MenuItem::mount(Some(menu.context()), ItemProps::new().disabled(true)).unwrap();

        enabled.on_pointer_enter();
        assert!(enabled.is_active());
        disabled.on_focus();
        assert_eq!(menu.state().active_item_index(), None);
    }

    #[test]
    fn pointer_leave_clears_only_when_active() {
        let (_, menu) = menu_with_dom();
        let a = MenuItem::mount(Some(menu.context()), ItemProps::new()).unwrap();
        let b = MenuItem::mount(Some(menu.context()), ItemProps::new()).unwrap();

        a.on_mouse_move();
        b.on_pointer_leave();
        assert!(a.is_active());
        a.on_pointer_leave();
        assert!(!a.is_active());
    }

    #[test]
    fn render_resolves_dynamic_class() {
        let (_, menu) = menu_with_dom();
        let class = ClassName::dynamic(|bag| {
            if bag.active { "bg-blue".to_string() } else { "bg-white".to_string() }
        });
        let item = MenuItem::mount(Some(menu.context()), ItemProps::new().class_name(class))
            .unwrap();

        assert_eq!(item.render(Props::new(), vec![]).class.as_deref(), Some("bg-white"));
        item.on_focus();
        let element = item.render(Props::new(), vec![]);
        assert_eq!(element.class.as_deref(), Some("bg-blue"));
        assert_eq!(element.tag, "a");
        assert_eq!(element.attribute("role"), Some("menuitem"));
        assert_eq!(element.attribute("tabindex"), Some("-1"));
        assert_eq!(element.attribute("aria-disabled"), None);
    }

    #[test]
    fn duplicate_explicit_id_is_rejected() {
        let (_, menu) = menu_with_dom();
        let first = MenuItem::mount(Some(menu.context()), ItemProps::new().id("x")).unwrap();
        let err = MenuItem::mount(Some(menu.context()), ItemProps::new().id("x")).unwrap_err();
        assert!(matches!(err, HeadlessError::Config(_)));
        assert_eq!(menu.state().items().len(), 1);

        drop(first);
        assert!(menu.state().items().is_empty());
        let again = MenuItem::mount(Some(menu.context()), ItemProps::new().id("x")).unwrap();
        assert_eq!(menu.state().items().len(), 1);
        assert_eq!(again.id(), "x");
    }

    #[test]
    fn disabling_the_active_item_clears_it() {
        let (_, menu) = menu_with_dom();
        let mut item = MenuItem::mount(Some(menu.context()), ItemProps::new()).unwrap();
        let other = MenuItem::mount(Some(menu.context()), ItemProps::new()).unwrap();
        item.on_focus();
        assert!(item.is_active());

        item.set_disabled(true);
        assert_eq!(menu.state().active_item_index(), None);

        other.on_focus();
        item.set_disabled(false);
        item.set_disabled(true);
        assert!(other.is_active());
    }

    #[test]
    fn disabling_updates_the_shared_cell() {
        let (dom, menu) = menu_with_dom();
        let mut item = MenuItem::mount(Some(menu.context()), ItemProps::new().id("late")).unwrap();
        dom.set_text("late", "Late Text");
        item.set_disabled(true);

        let data = menu.state().items()[0].data.get();
        assert!(data.disabled);
        assert_eq!(data.text_value.as_deref(), Some("late text"));
        assert_eq!(
            item.render(Props::new(), vec![]).attribute("aria-disabled"),
            Some("true")
        );
    }
}
