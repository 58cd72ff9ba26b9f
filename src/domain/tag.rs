//! Exhaustive branch selection over string tags.
//!
//! Inside the crate every state and action kind is a closed enum and matched
//! exhaustively. Tags still cross the host boundary as strings though (a
//! `data-headlessui-state` attribute, a serialized snapshot), and resolving
//! those must fail loudly instead of falling back to a default.

use super::error::{HeadlessError, Result};

/// Resolves `value` against a closed table of `(tag, variant)` cases.
///
/// # Errors
///
/// Returns [`HeadlessError::Unmatched`] listing every known tag when `value`
/// matches none of them.
///
/// # Example
///
/// ```
/// use headless_ui::domain::tag::match_tag;
///
/// let cases = [("Open", true), ("Closed", false)];
/// assert_eq!(match_tag("Open", &cases), Ok(true));
/// assert!(match_tag("Ajar", &cases).is_err());
/// ```
pub fn match_tag<T: Copy>(value: &str, cases: &[(&'static str, T)]) -> Result<T> {
    cases
        .iter()
        .find(|(tag, _)| *tag == value)
        .map(|(_, variant)| *variant)
        .ok_or_else(|| {
            tracing::error!(value = %value, "unmatched tag");
            HeadlessError::Unmatched {
                value: value.to_string(),
                cases: cases.iter().map(|(tag, _)| *tag).collect(),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Phase {
        Enter,
        Leave,
    }

    const CASES: [(&str, Phase); 2] = [("enter", Phase::Enter), ("leave", Phase::Leave)];

    #[test]
    fn resolves_known_tags() {
        assert_eq!(match_tag("enter", &CASES), Ok(Phase::Enter));
        assert_eq!(match_tag("leave", &CASES), Ok(Phase::Leave));
    }

    #[test]
    fn unknown_tag_reports_all_cases() {
        let err = match_tag("idle", &CASES).unwrap_err();
        assert_eq!(
            err,
            HeadlessError::Unmatched {
                value: "idle".to_string(),
                cases: vec!["enter", "leave"],
            }
        );
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(match_tag("Enter", &CASES).is_err());
    }
}
