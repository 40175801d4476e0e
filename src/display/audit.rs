//! Audit history display

use crate::audit::AuditEntry;

/// Entries newest first, one block each
pub fn format_history(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No history recorded.\n".to_string();
    }

    let mut output = String::new();
    for entry in entries.iter().rev() {
        output.push_str(&entry.format_human_readable());
        output.push('\n');
    }
    output
}
