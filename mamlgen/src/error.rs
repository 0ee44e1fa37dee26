//! Error types for `mamlgen`.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::extract::MemberKind;

/// The eligibility condition a reflected type failed to meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ineligibility {
    /// The type is not publicly accessible.
    NotPublic,
    /// The type is not a concrete class.
    NotAClass,
    /// The type is abstract.
    Abstract,
    /// The type does not derive from the command base type.
    MissingCommandBase,
    /// The type lacks the command identity marker (verb and noun).
    MissingIdentityMarker,
    /// The identity marker has an empty or whitespace-only verb or noun.
    BlankIdentity,
}

impl Ineligibility {
    /// Returns a human-readable description of the unmet condition.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotPublic => "type is not publicly accessible",
            Self::NotAClass => "type is not a class",
            Self::Abstract => "type is abstract",
            Self::MissingCommandBase => "type does not derive from the command base type",
            Self::MissingIdentityMarker => "type is not decorated with the command identity marker",
            Self::BlankIdentity => "command verb and noun must not be empty",
        }
    }
}

impl std::fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single type entry that could not be loaded from a module manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeLoadFailure {
    /// Zero-based index of the entry in the manifest's `types` array.
    pub index: usize,
    /// The entry's `full_name`, when it could be read.
    pub type_name: Option<String>,
    /// Loader diagnostic.
    pub message: String,
}

impl std::fmt::Display for TypeLoadFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.type_name.as_deref() {
            Some(name) => write!(f, "types[{}] ({name}): {}", self.index, self.message),
            None => write!(f, "types[{}]: {}", self.index, self.message),
        }
    }
}

/// Errors surfaced by the `mamlgen` pipeline.
#[derive(Debug, Error)]
pub enum MamlgenError {
    /// A supplied type does not satisfy the command eligibility contract.
    #[error("'{type_name}' does not implement a command: {reason}")]
    InvalidCommand {
        /// Full name of the offending type.
        type_name: String,
        /// The unmet condition.
        reason: Ineligibility,
    },

    /// Documentation was requested for a member kind that has no lookup key.
    #[error("cannot resolve documentation for {kind} member '{member}'")]
    UnresolvedMember {
        /// Display name of the member.
        member: String,
        /// The unsupported member kind.
        kind: MemberKind,
    },

    /// One or more manifest type entries failed to load.
    #[error("{} type(s) in {path} failed to load", failures.len())]
    PartialLoad {
        /// Manifest path.
        path: Utf8PathBuf,
        /// Each individual load failure.
        failures: Vec<TypeLoadFailure>,
    },

    /// MAML text could not be read back into a document tree.
    #[error("malformed MAML help: {0}")]
    MalformedHelp(String),

    /// The module manifest is not valid JSON or does not match the schema.
    #[error("failed to parse module manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    /// An XML document could not be parsed.
    #[error("failed to parse XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// Configuration layers could not be merged.
    #[error("invalid configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Filesystem access failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being accessed.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Rendered help could not be written to its sink.
    #[error("failed to write MAML help")]
    Write(#[source] std::io::Error),

    /// Free-form failure.
    #[error("{0}")]
    Message(String),
}

impl From<figment::Error> for MamlgenError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

/// Failures raised by individual documentation extractors.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The documentation source could not be read or parsed. Recoverable:
    /// the chain treats the extractor as having no opinion.
    #[error("documentation source for module '{module}' is unusable: {message}")]
    Source {
        /// Module whose documentation failed to load.
        module: String,
        /// Diagnostic text.
        message: String,
    },

    /// A lookup key was requested for an unsupported member kind. Fatal.
    #[error("cannot resolve documentation for {kind} member '{member}'")]
    UnresolvedMember {
        /// Display name of the member.
        member: String,
        /// The unsupported member kind.
        kind: MemberKind,
    },
}

impl From<ExtractError> for MamlgenError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::UnresolvedMember { member, kind } => {
                Self::UnresolvedMember { member, kind }
            }
            ExtractError::Source { module, message } => {
                Self::Message(format!("documentation for '{module}': {message}"))
            }
        }
    }
}
