//! Error types for the headless component library.
//!
//! This module defines the centralized error type [`HeadlessError`] and a type alias
//! [`Result`] used throughout the crate. Every failure the library reports is a
//! programmer error surfaced synchronously at the call site: there is no I/O
//! to retry and nothing is swallowed.

use thiserror::Error;

/// The main error type for component construction and tag resolution.
///
/// # Examples
///
/// ```
/// use headless_ui::domain::HeadlessError;
///
/// let err = HeadlessError::MissingParent {
///     component: "Menu.Button",
///     parent: "Menu",
/// };
/// assert_eq!(
///     err.to_string(),
///     "<Menu.Button /> is missing a parent <Menu /> component."
/// );
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeadlessError {
    /// A subcomponent was mounted without its required ancestor.
    ///
    /// Raised when `Menu.Button`, `Menu.Items`, `Menu.Item` or
    /// `Transition.Child` is constructed without the handle its root
    /// component hands out. Not recoverable.
    #[error("<{component} /> is missing a parent <{parent} /> component.")]
    MissingParent {
        /// The offending subcomponent.
        component: &'static str,
        /// The ancestor it requires.
        parent: &'static str,
    },

    /// A state or action tag reached a branch selection with no matching case.
    ///
    /// Indicates an internal defect or a malformed tag handed in by a host.
    /// Lists the cases that would have been accepted.
    #[error("Tried to handle \"{value}\" but there is no handler defined. Only defined handlers are: {}.", quoted(.cases))]
    Unmatched {
        /// The tag that failed to match.
        value: String,
        /// Every tag the selection knows about.
        cases: Vec<&'static str>,
    },

    /// Configuration is invalid or could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),
}

fn quoted(cases: &[&'static str]) -> String {
    cases
        .iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A specialized `Result` type for library operations.
pub type Result<T> = std::result::Result<T, HeadlessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_lists_every_case() {
        let err = HeadlessError::Unmatched {
            value: "Ajar".to_string(),
            cases: vec!["Open", "Closed"],
        };
        assert_eq!(
            err.to_string(),
            "Tried to handle \"Ajar\" but there is no handler defined. Only defined handlers are: \"Open\", \"Closed\"."
        );
    }

    #[test]
    fn missing_parent_names_both_components() {
        let err = HeadlessError::MissingParent {
            component: "Transition.Child",
            parent: "Transition",
        };
        let text = err.to_string();
        assert!(text.contains("Transition.Child"));
        assert!(text.contains("<Transition />"));
    }
}
