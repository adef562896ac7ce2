//! Selection of result e-mail addresses for bulk outreach.

use std::collections::BTreeSet;

/// Toggle one address in the selection.
pub fn toggle(selected: &mut BTreeSet<String>, email: &str) {
    if !selected.remove(email) {
        selected.insert(email.to_string());
    }
}

/// Render the selection as one "; "-separated string, ready to paste
/// into a mail client's BCC field.
pub fn formatted(selected: &BTreeSet<String>) -> String {
    selected.iter().cloned().collect::<Vec<_>>().join("; ")
}
