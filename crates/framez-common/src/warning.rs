//! Engine warnings with colored terminal output.
//!
//! Tolerated failures (malformed fragment selectors, HTML parse issues)
//! degrade to no-ops at the point of use; this module gives them a single
//! deduplicated diagnostic channel, so a page that trips the same condition
//! on every load event does not flood stderr.

use std::collections::HashSet;
use std::sync::Mutex;

use owo_colors::OwoColorize;

/// Warnings already printed, keyed by component and message.
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Record a key; true if it has not been seen since the last clear.
fn record(key: String) -> bool {
    WARNED
        .lock()
        .unwrap()
        .get_or_insert_with(HashSet::new)
        .insert(key)
}

/// Report a tolerated failure. Each unique component/message pair prints
/// once until [`clear_warnings`] resets the set.
///
/// # Example
/// ```ignore
/// warn_once("Page", "ignoring malformed fragment selector '#1bad'");
/// ```
///
/// # Panics
/// Panics if the warning set mutex is poisoned.
pub fn warn_once(component: &str, message: &str) {
    if record(format!("{component}\u{1f}{message}")) {
        let label = format!("[Framez {component}]");
        eprintln!("{} {}", label.yellow().bold(), message.yellow());
    }
}

/// Forget every recorded warning. Called when a new host page is created,
/// since deduplication is scoped to a page load.
///
/// # Panics
/// Panics if the warning set mutex is poisoned.
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap();
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deduplicates_until_cleared() {
        clear_warnings();
        assert!(record("a\u{1f}b".to_string()));
        assert!(!record("a\u{1f}b".to_string()));
        assert!(record("a\u{1f}c".to_string()));

        clear_warnings();
        assert!(record("a\u{1f}b".to_string()));
    }
}
