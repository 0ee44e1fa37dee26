//! Microsoft Assistance Markup Language (MAML) document model, rendering,
//! and parse-back.
//!
//! Rendering follows a fixed element order. Containers that MAML consumers
//! expect to find (`maml:description`, `command:syntax`,
//! `command:parameters`, `command:inputTypes`, `command:returnValues`,
//! `command:examples`) are always written, self-closing when empty;
//! `maml:alertSet` and `maml:relatedLinks` are omitted when empty.

mod parse;
mod render;
mod types;
mod xml_writer;

use std::io::Write;

pub use types::{
    Alert, Command, CommandDetails, Example, HelpItems, LineEnding, NavigationLink, Parameter,
    ParameterValue, RenderOptions, SyntaxItem, TypeEntry,
};

use crate::error::MamlgenError;

/// Renders the MAML help XML for `help`.
#[must_use]
pub fn render_help(help: &HelpItems, options: RenderOptions) -> String {
    render::render_help(help, options)
}

/// Renders `help` and writes it to `sink`.
///
/// # Errors
///
/// Returns [`MamlgenError::Write`], carrying the sink's error as its source,
/// when the sink rejects the write.
pub fn write_help<W: Write>(
    help: &HelpItems,
    options: RenderOptions,
    sink: &mut W,
) -> Result<(), MamlgenError> {
    sink.write_all(render_help(help, options).as_bytes())
        .and_then(|()| sink.flush())
        .map_err(MamlgenError::Write)
}

/// Parses rendered MAML help back into a document tree.
///
/// A leading byte-order mark is ignored.
///
/// # Errors
///
/// Returns [`MamlgenError::Xml`] when `text` is not well-formed XML and
/// [`MamlgenError::MalformedHelp`] when it is not MAML help, including when a
/// command name disagrees with its verb and noun.
pub fn parse_help(text: &str) -> Result<HelpItems, MamlgenError> {
    parse::parse_help(text)
}
