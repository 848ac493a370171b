//! Event search predicates.
//!
//! Search narrows future events by two optional case-insensitive
//! "contains" filters: one on the title, one on the event type. The SQL side
//! uses `ILIKE` with the patterns built here; [`SearchCriteria::matches`] is
//! the same predicate in Rust.

/// Search input. Blank filters are dropped so they impose no constraint;
/// any other filter is matched exactly as sent, surrounding spaces included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub title: Option<String>,
    pub event_type: Option<String>,
}

impl SearchCriteria {
    pub fn new(title: Option<&str>, event_type: Option<&str>) -> Self {
        Self {
            title: non_blank(title),
            event_type: non_blank(event_type),
        }
    }

    /// Evaluate the criteria against an event's title and type.
    pub fn matches(&self, title: &str, event_type: &str) -> bool {
        contains_ignore_case(title, self.title.as_deref())
            && contains_ignore_case(event_type, self.event_type.as_deref())
    }

    /// `ILIKE` pattern for the title filter, if set.
    pub fn title_pattern(&self) -> Option<String> {
        self.title.as_deref().map(contains_pattern)
    }

    /// `ILIKE` pattern for the type filter, if set.
    pub fn event_type_pattern(&self) -> Option<String> {
        self.event_type.as_deref().map(contains_pattern)
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

fn contains_ignore_case(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

/// Escape `LIKE` metacharacters so user input is matched literally.
///
/// The escape character is `\`, which is PostgreSQL's default for `LIKE`.
///
/// # Examples
///
/// ```
/// use actify_core::search::escape_like;
/// assert_eq!(escape_like("50%_off"), "50\\%\\_off");
/// ```
pub fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Build a `%...%` pattern matching `needle` anywhere in the column.
pub fn contains_pattern(needle: &str) -> String {
    format!("%{}%", escape_like(needle))
}
