//! Paragraph splitting for help text.

/// Platform line separator used to split help text into paragraphs.
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
/// Platform line separator used to split help text into paragraphs.
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Splits help text into trimmed paragraphs, one per line.
///
/// Empty lines are kept, so a trailing separator yields a trailing empty
/// paragraph. Absent text yields a single empty paragraph.
#[must_use]
pub fn to_paragraphs(text: Option<&str>) -> Vec<String> {
    text.unwrap_or_default()
        .split(LINE_SEPARATOR)
        .map(|line| line.trim().to_owned())
        .collect()
}
