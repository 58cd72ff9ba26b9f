//! Host input events.
//!
//! Hosts translate their native keyboard and pointer events into these types
//! before handing them to component handlers. Handlers mark events the same
//! way DOM listeners do, through [`prevent_default`](KeyboardEvent::prevent_default)
//! and [`stop_propagation`](KeyboardEvent::stop_propagation), and the host
//! reads the flags back afterwards.

/// A keyboard key, resolved from the DOM `KeyboardEvent.key` name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    /// A single printable character other than space.
    Character(char),
    /// The space bar.
    Space,
    /// Enter / Return.
    Enter,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// Backspace.
    Backspace,
    /// Arrow up.
    ArrowUp,
    /// Arrow down.
    ArrowDown,
    /// Arrow left.
    ArrowLeft,
    /// Arrow right.
    ArrowRight,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Any other named key (modifiers, function keys, ...).
    Other(String),
}

impl Key {
    /// Maps a DOM key name to a [`Key`].
    ///
    /// # Example
    ///
    /// ```
    /// use headless_ui::dom::Key;
    ///
    /// assert_eq!(Key::from_dom_key("ArrowDown"), Key::ArrowDown);
    /// assert_eq!(Key::from_dom_key(" "), Key::Space);
    /// assert_eq!(Key::from_dom_key("q"), Key::Character('q'));
    /// assert_eq!(Key::from_dom_key("Shift"), Key::Other("Shift".to_string()));
    /// ```
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            " " | "Spacebar" => Self::Space,
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            "Tab" => Self::Tab,
            "Backspace" => Self::Backspace,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Character(c),
                    _ => Self::Other(other.to_string()),
                }
            }
        }
    }

    /// The character this key types, if it is a single printable character.
    #[must_use]
    pub const fn printable(&self) -> Option<char> {
        match self {
            Self::Character(c) => Some(*c),
            Self::Space => Some(' '),
            _ => None,
        }
    }
}

/// A keyboard event delivered to a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// The key pressed.
    pub key: Key,
    /// Id of the element the event was dispatched to.
    pub target: Option<String>,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl KeyboardEvent {
    /// Creates an untargeted key event.
    #[must_use]
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            target: None,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Creates an event from a DOM key name.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        Self::new(Key::from_dom_key(key))
    }

    /// Suppresses the host's default action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Stops the event reaching further listeners.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Whether a handler suppressed the default action.
    #[must_use]
    pub const fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Whether a handler stopped propagation.
    #[must_use]
    pub const fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// A pointer (or click) event delivered to a component or document listener.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointerEvent {
    /// Id of the element under the pointer.
    pub target: Option<String>,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl PointerEvent {
    /// Creates a pointer event aimed at `target`.
    #[must_use]
    pub fn on(target: &str) -> Self {
        Self {
            target: Some(target.to_string()),
            ..Self::default()
        }
    }

    /// Suppresses the host's default action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Stops the event reaching further listeners.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Whether a handler suppressed the default action.
    #[must_use]
    pub const fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Whether a handler stopped propagation.
    #[must_use]
    pub const fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_char_names_are_not_printable() {
        assert_eq!(Key::from_dom_key("F5").printable(), None);
        assert_eq!(Key::from_dom_key("Escape").printable(), None);
    }

    #[test]
    fn unicode_characters_are_printable() {
        assert_eq!(Key::from_dom_key("é"), Key::Character('é'));
        assert_eq!(Key::from_dom_key(" ").printable(), Some(' '));
    }

    #[test]
    fn flags_start_clear() {
        let mut event = PointerEvent::on("button");
        assert!(!event.is_default_prevented());
        assert!(!event.is_propagation_stopped());
        event.stop_propagation();
        assert!(event.is_propagation_stopped());
    }
}
