//! Headless UI: accessible menu and transition primitives without markup or styling.
//!
//! Consumers supply the elements and the visual design; this crate supplies:
//! - Keyboard navigation, typeahead search and focus management for menus
//! - ARIA attribute wiring on every rendered element
//! - Nested enter/leave transition sequencing keyed on CSS class lifecycles
//! - Scoped cancellation of every deferred callback a component schedules
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Components (menu/, transition/)                    │  ← Host-facing API
//! │  - Menu, MenuButton, MenuItems, MenuItem            │
//! │  - Transition, TransitionChild                      │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  State machine (menu/state)                         │  ← Pure reducer
//! │  - MenuState, MenuAction, reduce                    │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Host seam     │   │ Runtime       │   │ Domain        │
//! │ (dom/)        │   │ (runtime/)    │   │ (domain/)     │
//! │ - Dom trait   │   │ - Scheduler   │   │ - Errors      │
//! │ - Events      │   │ - Disposables │   │ - Ids         │
//! │ - Elements    │   │               │   │ - Tag match   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - tracing-subscriber setup                         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Everything runs on the host's UI thread. The host implements [`dom::Dom`]
//! and [`runtime::Scheduler`] (or uses [`dom::MemoryDom`] and
//! [`runtime::ManualScheduler`]), forwards input events to the components and
//! turns their [`dom::Element`] output into real nodes.
//!
//! # Modules
//!
//! - [`domain`]: Error taxonomy, id generation, tag matching
//! - [`dom`]: The host seam: document trait, events, render output
//! - [`runtime`]: Frame/timer scheduling and scoped cancellation
//! - [`menu`]: The menu state machine and its components
//! - [`transition`]: CSS-class transitions
//! - [`observability`]: Tracing subscriber initialisation
//!
//! # Configuration
//!
//! Hosts pass a string map (e.g. from their own settings) or a TOML document:
//!
//! ```toml
//! search_clear_delay_ms = 500
//! trace_level = "headless_ui=debug"
//!
//! [presets.slide]
//! enter = "transition duration-200"
//! enter_from = "-translate-y-2"
//! enter_to = "translate-y-0"
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use headless_ui::dom::{Key, KeyboardEvent, MemoryDom};
//! use headless_ui::menu::{ItemProps, Menu, MenuButton, MenuItem, MenuItems};
//! use headless_ui::runtime::ManualScheduler;
//! use headless_ui::{initialize, Config};
//!
//! let config = Config::default();
//! initialize(&config);
//!
//! let dom = Rc::new(MemoryDom::new());
//! let scheduler = Rc::new(ManualScheduler::new());
//! let menu = Menu::with_config(dom.clone(), scheduler.clone(), &config);
//! let button = MenuButton::new(Some(menu.context()))?;
//! let items = MenuItems::new(Some(menu.context()))?;
//! let _edit = MenuItem::mount(Some(menu.context()), ItemProps::new())?;
//!
//! button.on_key_down(&mut KeyboardEvent::new(Key::Enter));
//! scheduler.run_frame();
//! assert_eq!(dom.focused().as_deref(), Some(items.id()));
//! # Ok::<(), headless_ui::HeadlessError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod dom;
pub mod domain;
pub mod menu;
pub mod observability;
pub mod runtime;
pub mod transition;

pub use domain::{HeadlessError, Result};
pub use transition::TransitionClasses;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const DEFAULT_SEARCH_CLEAR_DELAY_MS: u64 = 350;

/// Library configuration.
///
/// # Example
///
/// ```
/// use headless_ui::Config;
///
/// let config = Config::from_toml_str("search_clear_delay_ms = 500").unwrap();
/// assert_eq!(config.search_clear_delay_ms, 500);
/// assert!(config.preset("fade").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// How long typeahead input is kept before the query resets, in milliseconds.
    ///
    /// Every keystroke restarts the wait. Default: 350
    pub search_clear_delay_ms: u64,

    /// `EnvFilter` directives for [`observability::init_tracing`].
    ///
    /// Examples: `info`, `headless_ui=debug`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Transition class presets by name, consulted before the built-in ones.
    pub presets: BTreeMap<String, TransitionClasses>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_clear_delay_ms: DEFAULT_SEARCH_CLEAR_DELAY_MS,
            trace_level: None,
            presets: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Parses configuration from a flat string map.
    ///
    /// # Parsing Rules
    ///
    /// - `search_clear_delay_ms`: String → `u64` (falls back to 350 on parse error)
    /// - `trace_level`: String → `Option<String>`
    ///
    /// Other keys are ignored. Presets can only be given through
    /// [`from_toml_str`](Self::from_toml_str).
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use headless_ui::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("search_clear_delay_ms".to_string(), "soon".to_string());
    /// map.insert("trace_level".to_string(), "debug".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.search_clear_delay_ms, 350);
    /// assert_eq!(config.trace_level.as_deref(), Some("debug"));
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let search_clear_delay_ms = config
            .get("search_clear_delay_ms")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_SEARCH_CLEAR_DELAY_MS);

        Self {
            search_clear_delay_ms,
            trace_level: config.get("trace_level").cloned(),
            presets: BTreeMap::new(),
        }
    }

    /// Parses a TOML configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`HeadlessError::Config`] if the document is malformed, has a
    /// value of the wrong type, or has an unknown key.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| {
            tracing::error!(error = %e, "invalid configuration");
            HeadlessError::Config(e.to_string())
        })
    }

    /// Resolves a transition preset, custom presets first.
    #[must_use]
    pub fn preset(&self, name: &str) -> Option<TransitionClasses> {
        self.presets
            .get(name)
            .cloned()
            .or_else(|| TransitionClasses::preset(name))
    }
}

/// Installs the tracing subscriber described by `config`.
///
/// Safe to call more than once; only the first call installs anything.
pub fn initialize(config: &Config) {
    observability::init_tracing(config);
    tracing::debug!(
        search_clear_delay_ms = config.search_clear_delay_ms,
        presets = config.presets.len(),
        "headless-ui initialized"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.search_clear_delay_ms, 350);
        assert!(config.trace_level.is_none());
        assert!(config.presets.is_empty());
    }

    #[test]
    fn toml_presets_shadow_built_ins() {
        let config = Config::from_toml_str(
            r#"
            [presets.fade]
            enter = "custom-fade"
            "#,
        )
        .unwrap();
        assert_eq!(config.search_clear_delay_ms, 350);
        assert_eq!(config.preset("fade").unwrap().enter, "custom-fade");
        assert!(config.preset("scale").is_some());
        assert!(config.preset("missing").is_none());
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = Config::from_toml_str("search_clear_delay_ms = \"fast\"").unwrap_err();
        assert!(matches!(err, HeadlessError::Config(_)));

        let err = Config::from_toml_str("search_delay = 10").unwrap_err();
        assert!(err.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn map_falls_back_per_key() {
        let mut map = BTreeMap::new();
        map.insert("search_clear_delay_ms".to_string(), " 120 ".to_string());
        map.insert("unrelated".to_string(), "x".to_string());
        let config = Config::from_map(&map);
        assert_eq!(config.search_clear_delay_ms, 120);
        assert!(config.trace_level.is_none());
    }
}
