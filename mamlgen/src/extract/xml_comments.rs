//! Extractor backed by compiler-emitted XML documentation comments.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::descriptor::{CommandDescriptor, ModuleInfo, ParameterDescriptor};
use crate::error::ExtractError;
use crate::fs_helpers::read_optional_text;
use crate::names::ModuleName;

use super::DocumentationExtractor;
use super::xml_doc::{MemberRef, XmlDoc};

/// Supplies the raw XML documentation text for a module.
pub trait DocSource: Send + Sync {
    /// Loads the documentation for `module`, or `None` if it has none.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Source`] when documentation exists but cannot
    /// be read.
    fn load(&self, module: &ModuleInfo) -> Result<Option<String>, ExtractError>;
}

/// Reads `<module location>.xml`, the file a compiler writes beside the
/// module binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileDocSource;

impl DocSource for FileDocSource {
    fn load(&self, module: &ModuleInfo) -> Result<Option<String>, ExtractError> {
        let Some(location) = module.location.as_ref() else {
            return Ok(None);
        };
        let doc_path = location.with_extension("xml");
        tracing::debug!(module = %module.name, path = %doc_path, "looking for XML documentation");
        read_optional_text(&doc_path).map_err(|err| ExtractError::Source {
            module: module.name.to_string(),
            message: err.to_string(),
        })
    }
}

/// Serves documentation text held in memory, keyed by module name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocSource {
    documents: HashMap<ModuleName, String>,
}

impl InMemoryDocSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the documentation text for a module.
    #[must_use]
    pub fn with_document(mut self, module: impl Into<ModuleName>, xml: impl Into<String>) -> Self {
        self.documents.insert(module.into(), xml.into());
        self
    }
}

impl DocSource for InMemoryDocSource {
    fn load(&self, module: &ModuleInfo) -> Result<Option<String>, ExtractError> {
        Ok(self.documents.get(&module.name).cloned())
    }
}

/// Parsed documentation per module; each module is loaded and parsed once.
///
/// Modules without documentation, and modules whose documentation failed to
/// load, are remembered as absent.
#[derive(Debug, Default)]
pub struct DocCache {
    entries: Mutex<HashMap<ModuleName, Option<Arc<XmlDoc>>>>,
}

impl DocCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of modules seen so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Reports whether no module has been looked up yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Returns the cached documentation for `module`, loading it from
    /// `source` on first use.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Source`] the first time a module's
    /// documentation fails to load or parse; later lookups see it as absent.
    pub fn get_or_load(
        &self,
        module: &ModuleInfo,
        source: &dyn DocSource,
    ) -> Result<Option<Arc<XmlDoc>>, ExtractError> {
        let mut entries = self.entries.lock();
        if let Some(cached) = entries.get(&module.name) {
            return Ok(cached.clone());
        }
        let loaded = load_and_parse(module, source);
        let entry = loaded.as_ref().ok().and_then(Clone::clone);
        entries.insert(module.name.clone(), entry);
        loaded
    }
}

fn load_and_parse(
    module: &ModuleInfo,
    source: &dyn DocSource,
) -> Result<Option<Arc<XmlDoc>>, ExtractError> {
    let Some(text) = source.load(module)? else {
        tracing::debug!(module = %module.name, "no XML documentation found");
        return Ok(None);
    };
    let doc = XmlDoc::parse(&text).map_err(|err| ExtractError::Source {
        module: module.name.to_string(),
        message: err.to_string(),
    })?;
    tracing::debug!(module = %module.name, members = doc.len(), "parsed XML documentation");
    Ok(Some(Arc::new(doc)))
}

/// Obtains synopsis (`<summary>`), description (`<remarks>`), and parameter
/// descriptions (property `<summary>`) from XML documentation comments.
pub struct XmlCommentExtractor {
    source: Box<dyn DocSource>,
    cache: DocCache,
}

impl XmlCommentExtractor {
    /// Creates an extractor with its own empty cache.
    #[must_use]
    pub fn new(source: impl DocSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            cache: DocCache::new(),
        }
    }

    /// Returns the extractor's documentation cache.
    #[must_use]
    pub const fn cache(&self) -> &DocCache {
        &self.cache
    }

    fn documentation(&self, module: &ModuleInfo) -> Result<Option<Arc<XmlDoc>>, ExtractError> {
        self.cache.get_or_load(module, self.source.as_ref())
    }
}

impl std::fmt::Debug for XmlCommentExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XmlCommentExtractor")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl DocumentationExtractor for XmlCommentExtractor {
    fn name(&self) -> &'static str {
        "xml-comments"
    }

    fn command_synopsis(
        &self,
        command: &CommandDescriptor,
    ) -> Result<Option<String>, ExtractError> {
        let Some(doc) = self.documentation(command.module())? else {
            return Ok(None);
        };
        doc.summary(&MemberRef::of_type(command.type_name().as_str()))
    }

    fn command_description(
        &self,
        command: &CommandDescriptor,
    ) -> Result<Option<String>, ExtractError> {
        let Some(doc) = self.documentation(command.module())? else {
            return Ok(None);
        };
        doc.remarks(&MemberRef::of_type(command.type_name().as_str()))
    }

    fn parameter_description(
        &self,
        command: &CommandDescriptor,
        parameter: &ParameterDescriptor,
    ) -> Result<Option<String>, ExtractError> {
        let Some(doc) = self.documentation(command.module())? else {
            return Ok(None);
        };
        doc.summary(&MemberRef::of_property(
            parameter.declaring_type.as_str(),
            &parameter.name,
        ))
    }
}
