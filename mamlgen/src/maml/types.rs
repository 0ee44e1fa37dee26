//! In-memory MAML document tree.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::descriptor::{PipelineInputMode, Position};

/// Root `helpItems` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpItems {
    /// Command help entries, in generation order.
    pub commands: Vec<Command>,
}

/// A `command:command` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Name, synopsis, verb, and noun.
    pub details: CommandDetails,
    /// Detailed description paragraphs.
    pub description: Vec<String>,
    /// One syntax item per parameter set, ordered by set name.
    pub syntax: Vec<SyntaxItem>,
    /// Every parameter, in declaration order.
    pub parameters: Vec<Parameter>,
    /// Types accepted from the pipeline.
    pub input_types: Vec<TypeEntry>,
    /// Types written to the pipeline.
    pub return_values: Vec<TypeEntry>,
    /// Notes; the element is omitted when empty.
    pub alert_set: Vec<Alert>,
    /// Worked examples.
    pub examples: Vec<Example>,
    /// Related links; the element is omitted when empty.
    pub related_links: Vec<NavigationLink>,
}

impl Command {
    /// Creates a command with only its details populated.
    #[must_use]
    pub const fn new(details: CommandDetails) -> Self {
        Self {
            details,
            description: Vec::new(),
            syntax: Vec::new(),
            parameters: Vec::new(),
            input_types: Vec::new(),
            return_values: Vec::new(),
            alert_set: Vec::new(),
            examples: Vec::new(),
            related_links: Vec::new(),
        }
    }
}

/// A `command:details` element.
///
/// The command name is always derived from the verb and noun, so it cannot
/// drift from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDetails {
    verb: String,
    noun: String,
    /// Synopsis paragraphs.
    pub synopsis: Vec<String>,
}

impl CommandDetails {
    /// Creates details for `verb-noun` with an empty synopsis.
    #[must_use]
    pub fn new(verb: impl Into<String>, noun: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            noun: noun.into(),
            synopsis: Vec::new(),
        }
    }

    /// Returns `"{verb}-{noun}"`.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{}-{}", self.verb, self.noun)
    }

    /// Returns the verb.
    #[must_use]
    pub fn verb(&self) -> &str {
        &self.verb
    }

    /// Returns the noun.
    #[must_use]
    pub fn noun(&self) -> &str {
        &self.noun
    }

    /// Replaces the verb.
    pub fn set_verb(&mut self, verb: impl Into<String>) {
        self.verb = verb.into();
    }

    /// Replaces the noun.
    pub fn set_noun(&mut self, noun: impl Into<String>) {
        self.noun = noun.into();
    }
}

/// A `command:syntaxItem` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxItem {
    /// Command name shown for this syntax.
    pub command_name: String,
    /// Parameters in the set, in declaration order.
    pub parameters: Vec<Parameter>,
}

/// A `command:parameter` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Description paragraphs.
    pub description: Vec<String>,
    /// Value type information.
    pub value: ParameterValue,
    /// `required` attribute.
    pub is_mandatory: bool,
    /// `globbing` attribute.
    pub supports_globbing: bool,
    /// `pipelineInput` attribute.
    pub pipeline_input: PipelineInputMode,
    /// `position` attribute.
    pub position: Position,
}

/// A `command:parameterValue` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterValue {
    /// Rendered type name.
    pub data_type: String,
    /// `required` attribute.
    pub is_mandatory: bool,
    /// `variableLength` attribute.
    pub is_variable_length: bool,
}

/// A `command:inputType` or `command:returnValue` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeEntry {
    /// Rendered type name.
    pub type_name: String,
    /// Optional documentation URI; empty when unknown.
    pub uri: String,
    /// Description paragraphs.
    pub description: Vec<String>,
}

impl TypeEntry {
    /// Creates an entry with no URI or description.
    #[must_use]
    pub fn named(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            uri: String::new(),
            description: Vec::new(),
        }
    }
}

/// A `maml:alert` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Note paragraphs.
    pub paragraphs: Vec<String>,
}

/// A `command:example` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    /// Example title.
    pub title: String,
    /// Command text.
    pub code: String,
    /// Remark paragraphs.
    pub remarks: Vec<String>,
}

/// A `maml:navigationLink` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationLink {
    /// Link text.
    pub link_text: String,
    /// Target URI.
    pub uri: String,
}

/// Line terminator used when rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `\n`.
    Lf,
    /// `\r\n`, which Windows `PowerShell` tooling expects.
    #[default]
    Crlf,
}

impl LineEnding {
    /// Returns the terminator text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }
}

/// Options for MAML rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Line terminator.
    pub line_ending: LineEnding,
}
