//! Listing filters shared by both store backends.

use uuid::Uuid;

/// Filter for coordinator and teacher listings.
#[derive(Debug, Clone, Default)]
pub struct StaffFilter {
    /// Case-insensitive substring of the name.
    pub query: Option<String>,
    /// Restrict to one institution.
    pub institution_id: Option<Uuid>,
}

/// Filter for class schedule listings.
#[derive(Debug, Clone, Default)]
pub struct ScheduleFilter {
    /// Case-insensitive substring of the subject.
    pub query: Option<String>,
    /// Exact class label.
    pub class_name: Option<String>,
}

/// Filter for notification listings.
#[derive(Debug, Clone, Default)]
pub struct NotificationFilter {
    /// Case-insensitive substring of message, type or recipient name.
    pub query: Option<String>,
}

/// Trimmed, non-empty search term.
pub(crate) fn search_term(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// `ILIKE` pattern matching `term` literally anywhere in the column.
///
/// `%`, `_` and `\` are escaped with the default `\` escape character.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Case-insensitive substring match used by the in-memory backend.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
