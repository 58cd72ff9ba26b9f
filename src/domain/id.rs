//! Process-wide element id generation.
//!
//! Every mounted component needs an id that is unique for the lifetime of the
//! running application so ARIA references (`aria-controls`,
//! `aria-activedescendant`, `aria-labelledby`) resolve unambiguously. Ids are
//! drawn from a single monotonically increasing counter; uniqueness across
//! processes is not attempted.

use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

/// Returns the next raw id from the application-wide counter.
pub fn next_id() -> usize {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Generates a unique element id of the form `headlessui-{kind}-{n}`.
///
/// # Example
///
/// ```
/// use headless_ui::domain::id::generate_id;
///
/// let a = generate_id("menu-button");
/// let b = generate_id("menu-button");
/// assert!(a.starts_with("headlessui-menu-button-"));
/// assert_ne!(a, b);
/// ```
#[must_use]
pub fn generate_id(kind: &str) -> String {
    format!("headlessui-{kind}-{}", next_id())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase_monotonically() {
        let first = next_id();
        let second = next_id();
        assert!(second > first);
    }

    #[test]
    fn generated_ids_are_unique_per_kind() {
        let ids: Vec<String> = (0..32).map(|_| generate_id("menu-item")).collect();
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(ids.len(), deduped.len());
    }
}
