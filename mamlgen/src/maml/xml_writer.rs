//! XML helpers for MAML rendering.

use super::types::LineEnding;

pub(crate) const MSH_NS: &str = "http://msh";
pub(crate) const MAML_NS: &str = "http://schemas.microsoft.com/maml/2004/10";
pub(crate) const COMMAND_NS: &str = "http://schemas.microsoft.com/maml/dev/command/2004/10";
pub(crate) const DEV_NS: &str = "http://schemas.microsoft.com/maml/dev/2004/10";

pub(super) const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

pub(super) fn help_items_open() -> String {
    format!(
        r#"<helpItems schema="maml" xmlns="{MSH_NS}" xmlns:maml="{MAML_NS}" xmlns:command="{COMMAND_NS}" xmlns:dev="{DEV_NS}">"#
    )
}

pub(super) const fn bool_attr(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Escapes markup characters; carriage returns are written as character
/// references so they survive parser line-ending normalisation. Characters
/// outside the XML 1.0 `Char` production, such as the escape introducing an
/// ANSI colour sequence, are dropped.
pub(super) fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\r' => escaped.push_str("&#13;"),
            ch if is_xml_char(ch) => escaped.push(ch),
            _ => {}
        }
    }
    escaped
}

const fn is_xml_char(ch: char) -> bool {
    matches!(ch, '\t' | '\n' | '\u{20}'..='\u{fffd}' | '\u{10000}'..=char::MAX)
}

pub(super) struct XmlWriter {
    buffer: String,
    indent: usize,
    line_ending: &'static str,
}

impl XmlWriter {
    #[expect(
        clippy::missing_const_for_fn,
        reason = "avoid relying on const-stability details for allocation constructors"
    )]
    pub(super) fn new(line_ending: LineEnding) -> Self {
        Self {
            buffer: String::new(),
            indent: 0,
            line_ending: line_ending.as_str(),
        }
    }

    pub(super) const fn indent(&mut self) {
        self.indent += 1;
    }

    pub(super) const fn outdent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    pub(super) fn line(&mut self, line: &str) {
        for _ in 0..self.indent {
            self.buffer.push_str("  ");
        }
        self.buffer.push_str(line);
        self.buffer.push_str(self.line_ending);
    }

    /// Writes `<tag>` and indents.
    pub(super) fn open(&mut self, tag: &str) {
        self.line(&format!("<{tag}>"));
        self.indent();
    }

    /// Outdents and writes `</tag>`.
    pub(super) fn close(&mut self, tag: &str) {
        self.outdent();
        self.line(&format!("</{tag}>"));
    }

    /// Writes `<tag>text</tag>`, or `<tag />` for empty text.
    pub(super) fn text_element(&mut self, tag: &str, text: &str) {
        if text.is_empty() {
            self.empty(tag);
        } else {
            self.line(&format!("<{tag}>{}</{tag}>", escape_xml(text)));
        }
    }

    /// Writes `<tag />`.
    pub(super) fn empty(&mut self, tag: &str) {
        self.line(&format!("<{tag} />"));
    }

    pub(super) fn finish(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_reserved_characters() {
        assert_eq!(
            escape_xml("<a href=\"x\">Tom & Jerry's</a>\r\n"),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&apos;s&lt;/a&gt;&#13;\n"
        );
    }

    #[test]
    fn drops_characters_xml_cannot_carry() {
        assert_eq!(
            escape_xml("echo \u{1b}[31mred\u{0}\u{fffe}\tdone\u{1f600}"),
            "echo [31mred\tdone\u{1f600}"
        );
    }

    #[test]
    fn nested_elements_are_indented() {
        let mut writer = XmlWriter::new(LineEnding::Lf);
        writer.open("a");
        writer.text_element("b", "x");
        writer.text_element("c", "");
        writer.close("a");
        assert_eq!(writer.finish(), "<a>\n  <b>x</b>\n  <c />\n</a>\n");
    }
}
