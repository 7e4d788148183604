//! Minifier warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the lexer and the minification engine to report recoverable issues
//! such as unterminated constructs or embedded content without a minifier.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a recoverable issue (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("HTML Lexer", "unterminated comment at position 120");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    // A poisoned lock only means another thread panicked mid-insert; the set
    // itself is still usable.
    let should_print = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_print {
        eprintln!("{YELLOW}[Taut {component}] ⚠ {message}{RESET}");
    }
}

/// Clear all recorded warnings (call before minifying a new document)
pub fn clear_warnings() {
    let mut guard = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

/// Number of distinct warnings recorded since the last [`clear_warnings`].
#[must_use]
pub fn warning_count() -> usize {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map_or(0, HashSet::len)
}
