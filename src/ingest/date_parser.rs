use chrono::NaiveDateTime;

/// Expected time-source layout: 4-digit year, 2-digit month/day, then
/// hour, minute and second.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Resolves `text` against `format`; `None` on any deviation or on an
/// impossible calendar value.
#[must_use]
pub fn parse_instant(text: &str, format: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text.trim(), format).ok()
}
