//! Menu open/closed state and focus-target kinds.
//!
//! # State Machine
//!
//! A menu is in one of two states for its whole lifetime:
//! - **Closed**: initial state; the items container is not rendered
//! - **Open**: the items container is shown and keyboard navigation is live
//!
//! There is no terminal state; the menu toggles until it is unmounted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::HeadlessError;
use crate::domain::tag::match_tag;

/// Open/closed state of a menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MenuStates {
    /// The items container is visible.
    Open,
    /// The items container is hidden.
    #[default]
    Closed,
}

impl MenuStates {
    const CASES: [(&'static str, Self); 2] = [("Open", Self::Open), ("Closed", Self::Closed)];

    /// The opposite state.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }

    /// Tag name, as exposed to hosts.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
        }
    }
}

impl fmt::Display for MenuStates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MenuStates {
    type Err = HeadlessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match_tag(s, &Self::CASES)
    }
}

/// Which item a `GoToItem` action should make active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Focus {
    /// The first enabled item.
    FirstItem,
    /// The nearest enabled item before the active one.
    PreviousItem,
    /// The nearest enabled item after the active one.
    NextItem,
    /// The last enabled item.
    LastItem,
    /// The item with this id, enabled or not.
    SpecificItem(String),
    /// No item.
    Nothing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_states() {
        assert_eq!("Open".parse::<MenuStates>(), Ok(MenuStates::Open));
        assert_eq!("Closed".parse::<MenuStates>(), Ok(MenuStates::Closed));
    }

    #[test]
    fn unknown_state_is_an_exhaustiveness_error() {
        let err = "open".parse::<MenuStates>().unwrap_err();
        assert!(matches!(err, HeadlessError::Unmatched { ref cases, .. } if cases == &vec!["Open", "Closed"]));
    }

    #[test]
    fn toggling_twice_is_identity() {
        assert_eq!(MenuStates::Closed.toggled().toggled(), MenuStates::Closed);
        assert_eq!(MenuStates::default(), MenuStates::Closed);
    }
}
