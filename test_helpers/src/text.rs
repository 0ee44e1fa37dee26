//! Shared text normalization helpers for golden and behavioural suites.

const BOM: char = '\u{feff}';

/// Strips one layer of matching single or double quotes from a value.
#[must_use]
pub fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    if let Some(stripped) = trimmed.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        return stripped;
    }
    if let Some(stripped) = trimmed
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
    {
        return stripped;
    }
    trimmed
}

/// Normalizes a scalar placeholder by trimming and unquoting one outer layer.
#[must_use]
pub fn normalize_scalar(value: &str) -> String {
    unquote(value).trim().to_owned()
}

/// Drops a leading byte-order mark and converts CRLF line endings to LF.
#[must_use]
pub fn normalise_newlines(value: &str) -> String {
    value.strip_prefix(BOM).unwrap_or(value).replace("\r\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::{normalise_newlines, normalize_scalar, unquote};

    #[test]
    fn unquote_removes_single_outer_quotes() {
        assert_eq!(unquote("'value'"), "value");
        assert_eq!(unquote("\"value\""), "value");
    }

    #[test]
    fn normalize_scalar_trims_whitespace() {
        assert_eq!(normalize_scalar("  'value'  "), "value");
    }

    #[test]
    fn normalise_newlines_strips_bom_and_crlf() {
        assert_eq!(normalise_newlines("\u{feff}<a>\r\n</a>\r\n"), "<a>\n</a>\n");
        assert_eq!(normalise_newlines("plain\n"), "plain\n");
    }
}
