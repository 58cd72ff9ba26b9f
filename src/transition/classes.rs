//! Class-list configuration for enter and leave phases.
//!
//! Each phase has three class sets, given as space-separated tokens:
//!
//! - **base** (`enter` / `leave`): applied for the whole phase
//! - **from** (`enter_from` / `leave_from`): applied for the first frame only
//! - **to** (`enter_to` / `leave_to`): replaces *from* after one frame and
//!   stays until the measured transition time has elapsed
//!
//! # Presets
//!
//! Named presets are TOML documents with the same six keys:
//!
//! ```toml
//! enter = "transition-opacity duration-150"
//! enter_from = "opacity-0"
//! enter_to = "opacity-100"
//! leave = "transition-opacity duration-100"
//! leave_from = "opacity-100"
//! leave_to = "opacity-0"
//! ```
//!
//! Built in: `fade`, `scale`. Custom presets are loaded through
//! [`Config`](crate::Config).

use serde::{Deserialize, Serialize};

/// Direction of a transition phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Becoming visible.
    Enter,
    /// Becoming hidden.
    Leave,
}

/// Class tokens for one phase, already split.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseClasses {
    /// Applied for the whole phase.
    pub base: Vec<String>,
    /// Applied for the first frame.
    pub from: Vec<String>,
    /// Applied from the second frame until completion.
    pub to: Vec<String>,
}

impl PhaseClasses {
    /// Whether the phase applies no classes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.base.is_empty() && self.from.is_empty() && self.to.is_empty()
    }
}

/// Enter/leave class configuration of a transition node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionClasses {
    /// Base classes while entering.
    pub enter: String,
    /// Starting classes of the enter phase.
    pub enter_from: String,
    /// Ending classes of the enter phase.
    pub enter_to: String,
    /// Base classes while leaving.
    pub leave: String,
    /// Starting classes of the leave phase.
    pub leave_from: String,
    /// Ending classes of the leave phase.
    pub leave_to: String,
}

impl TransitionClasses {
    /// An empty configuration; both phases complete immediately.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a built-in preset by name.
    ///
    /// # Example
    ///
    /// ```
    /// use headless_ui::transition::TransitionClasses;
    ///
    /// let fade = TransitionClasses::preset("fade").unwrap();
    /// assert_eq!(fade.enter_from, "opacity-0");
    /// assert!(TransitionClasses::preset("spin").is_none());
    /// ```
    #[must_use]
    pub fn preset(name: &str) -> Option<Self> {
        let toml_str = match name {
            "fade" => include_str!("../../presets/fade.toml"),
            "scale" => include_str!("../../presets/scale.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Sets the base enter classes.
    #[must_use]
    pub fn enter(mut self, classes: &str) -> Self {
        self.enter = classes.to_string();
        self
    }

    /// Sets the starting enter classes.
    #[must_use]
    pub fn enter_from(mut self, classes: &str) -> Self {
        self.enter_from = classes.to_string();
        self
    }

    /// Sets the ending enter classes.
    #[must_use]
    pub fn enter_to(mut self, classes: &str) -> Self {
        self.enter_to = classes.to_string();
        self
    }

    /// Sets the base leave classes.
    #[must_use]
    pub fn leave(mut self, classes: &str) -> Self {
        self.leave = classes.to_string();
        self
    }

    /// Sets the starting leave classes.
    #[must_use]
    pub fn leave_from(mut self, classes: &str) -> Self {
        self.leave_from = classes.to_string();
        self
    }

    /// Sets the ending leave classes.
    #[must_use]
    pub fn leave_to(mut self, classes: &str) -> Self {
        self.leave_to = classes.to_string();
        self
    }

    /// Whether neither phase configures any class.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phase(Direction::Enter).is_empty() && self.phase(Direction::Leave).is_empty()
    }

    /// Split class tokens for one phase.
    #[must_use]
    pub fn phase(&self, direction: Direction) -> PhaseClasses {
        let (base, from, to) = match direction {
            Direction::Enter => (&self.enter, &self.enter_from, &self.enter_to),
            Direction::Leave => (&self.leave, &self.leave_from, &self.leave_to),
        };
        PhaseClasses {
            base: tokens(base),
            from: tokens(from),
            to: tokens(to),
        }
    }
}

fn tokens(value: &str) -> Vec<String> {
    value.split_whitespace().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_splits_on_any_whitespace() {
        let classes = TransitionClasses::new()
            .enter("  transition\tease-out ")
            .enter_from("opacity-0")
            .enter_to("opacity-100");
        let phase = classes.phase(Direction::Enter);
        assert_eq!(phase.base, vec!["transition", "ease-out"]);
        assert_eq!(phase.from, vec!["opacity-0"]);
        assert_eq!(phase.to, vec!["opacity-100"]);
        assert!(classes.phase(Direction::Leave).is_empty());
    }

    #[test]
    fn blank_configuration_is_empty() {
        assert!(TransitionClasses::new().enter("   ").is_empty());
        assert!(!TransitionClasses::new().leave_to("opacity-0").is_empty());
    }

    #[test]
    fn built_in_presets_parse() {
        for name in ["fade", "scale"] {
            let preset = TransitionClasses::preset(name);
            assert!(preset.is_some_and(|p| !p.is_empty()), "preset {name} should load");
        }
    }

    #[test]
    fn missing_keys_default_to_empty() {
        let classes: TransitionClasses = toml::from_str("enter = \"duration-75\"").unwrap();
        assert_eq!(classes.enter, "duration-75");
        assert!(classes.leave.is_empty());
    }
}
