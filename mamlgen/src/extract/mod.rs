//! Documentation extractors and the fallback chain that queries them.
//!
//! Each extractor may answer a query with text, with an empty string (the
//! item is deliberately documented as blank), or with `None` (no opinion).
//! [`ExtractorChain`] asks extractors in order and keeps the first answer.
//!
//! Localised help from resource tables is not implemented; a resource-backed
//! extractor slots into the chain through [`DocumentationExtractor`].

mod inline;
mod xml_comments;
mod xml_doc;

pub use inline::InlineAnnotationExtractor;
pub use xml_comments::{DocCache, DocSource, FileDocSource, InMemoryDocSource, XmlCommentExtractor};
pub use xml_doc::{MemberDoc, MemberKind, MemberRef, XmlDoc};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::descriptor::{CommandDescriptor, ParameterDescriptor};
use crate::error::{ExtractError, MamlgenError};

/// A source of command and parameter prose.
pub trait DocumentationExtractor: Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Extracts the synopsis for a command.
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractError`] when the underlying source is unusable or
    /// the lookup itself is invalid.
    fn command_synopsis(&self, command: &CommandDescriptor)
    -> Result<Option<String>, ExtractError>;

    /// Extracts the detailed description for a command.
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractError`] when the underlying source is unusable or
    /// the lookup itself is invalid.
    fn command_description(
        &self,
        command: &CommandDescriptor,
    ) -> Result<Option<String>, ExtractError>;

    /// Extracts the description for one of `command`'s parameters.
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractError`] when the underlying source is unusable or
    /// the lookup itself is invalid.
    fn parameter_description(
        &self,
        command: &CommandDescriptor,
        parameter: &ParameterDescriptor,
    ) -> Result<Option<String>, ExtractError>;
}

/// Built-in extractor selection, used by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractorKind {
    /// Inline help annotations on the command type and parameter markers.
    Inline,
    /// Compiler-emitted XML documentation comments beside the module.
    XmlComments,
}

impl ExtractorKind {
    /// The default priority order: inline annotations, then XML comments.
    pub const DEFAULT_ORDER: [Self; 2] = [Self::Inline, Self::XmlComments];

    fn build(self) -> Box<dyn DocumentationExtractor> {
        match self {
            Self::Inline => Box::new(InlineAnnotationExtractor),
            Self::XmlComments => Box::new(XmlCommentExtractor::new(FileDocSource)),
        }
    }
}

/// An ordered list of extractors queried first-answer-wins.
pub struct ExtractorChain {
    extractors: Vec<Box<dyn DocumentationExtractor>>,
}

impl ExtractorChain {
    /// Creates a chain from extractors in priority order.
    #[must_use]
    pub fn new(extractors: Vec<Box<dyn DocumentationExtractor>>) -> Self {
        Self { extractors }
    }

    /// Creates a chain of built-in extractors in the given order.
    #[must_use]
    pub fn from_kinds(kinds: &[ExtractorKind]) -> Self {
        Self::new(kinds.iter().map(|kind| kind.build()).collect())
    }

    /// Returns the extractor names in priority order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.extractors.iter().map(|extractor| extractor.name()).collect()
    }

    /// Resolves a command synopsis.
    ///
    /// # Errors
    ///
    /// Returns [`MamlgenError::UnresolvedMember`] if an extractor hits a
    /// lookup contract violation. Source failures are logged and skipped.
    pub fn command_synopsis(
        &self,
        command: &CommandDescriptor,
    ) -> Result<Option<String>, MamlgenError> {
        self.first_answer("synopsis", |extractor| extractor.command_synopsis(command))
    }

    /// Resolves a command description.
    ///
    /// # Errors
    ///
    /// See [`ExtractorChain::command_synopsis`].
    pub fn command_description(
        &self,
        command: &CommandDescriptor,
    ) -> Result<Option<String>, MamlgenError> {
        self.first_answer("description", |extractor| {
            extractor.command_description(command)
        })
    }

    /// Resolves a parameter description.
    ///
    /// # Errors
    ///
    /// See [`ExtractorChain::command_synopsis`].
    pub fn parameter_description(
        &self,
        command: &CommandDescriptor,
        parameter: &ParameterDescriptor,
    ) -> Result<Option<String>, MamlgenError> {
        self.first_answer("parameter description", |extractor| {
            extractor.parameter_description(command, parameter)
        })
    }

    fn first_answer<F>(&self, field: &str, query: F) -> Result<Option<String>, MamlgenError>
    where
        F: Fn(&dyn DocumentationExtractor) -> Result<Option<String>, ExtractError>,
    {
        for extractor in &self.extractors {
            match query(extractor.as_ref()) {
                Ok(Some(text)) => {
                    tracing::trace!(extractor = extractor.name(), field, "resolved");
                    return Ok(Some(text));
                }
                Ok(None) => {}
                Err(err @ ExtractError::Source { .. }) => {
                    tracing::warn!(
                        extractor = extractor.name(),
                        field,
                        error = %err,
                        "documentation extractor failed; trying the next one"
                    );
                }
                Err(err @ ExtractError::UnresolvedMember { .. }) => return Err(err.into()),
            }
        }
        Ok(None)
    }
}

impl Default for ExtractorChain {
    fn default() -> Self {
        Self::from_kinds(&ExtractorKind::DEFAULT_ORDER)
    }
}

impl std::fmt::Debug for ExtractorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractorChain")
            .field("extractors", &self.names())
            .finish()
    }
}
