//! Module manifests: the JSON description of a module's reflected types.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use serde_json::Value;

use crate::descriptor::{CommandDescriptor, ModuleInfo};
use crate::error::{MamlgenError, TypeLoadFailure};
use crate::fs_helpers::read_text;
use crate::generator::{InvalidCommandPolicy, describe_commands};
use crate::names::ModuleName;
use crate::reflect::ReflectedType;

#[derive(Debug, Deserialize)]
struct RawManifest {
    module: ModuleName,
    #[serde(default)]
    location: Option<Utf8PathBuf>,
    #[serde(default)]
    types: Vec<Value>,
}

/// A module and the types observed in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleManifest {
    /// The module the types were loaded from.
    pub module: ModuleInfo,
    /// Every observed type, in manifest order.
    pub types: Vec<ReflectedType>,
}

impl ModuleManifest {
    /// Creates a manifest from already loaded types.
    #[must_use]
    pub const fn new(module: ModuleInfo, types: Vec<ReflectedType>) -> Self {
        Self { module, types }
    }

    /// Reads and parses the manifest at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`MamlgenError::Io`] if the file cannot be read, otherwise see
    /// [`ModuleManifest::parse`].
    pub fn load(path: &Utf8Path) -> Result<Self, MamlgenError> {
        tracing::debug!(%path, "loading module manifest");
        let text = read_text(path)?;
        Self::parse(&text, path)
    }

    /// Parses manifest JSON read from `path`.
    ///
    /// A relative `location` is resolved against the manifest's directory;
    /// without one, the manifest path itself stands in as the module
    /// location so documentation is looked for beside it. Each type entry
    /// is decoded independently.
    ///
    /// # Errors
    ///
    /// Returns [`MamlgenError::Manifest`] when the document itself is
    /// invalid, and [`MamlgenError::PartialLoad`] listing every type entry
    /// that failed to decode.
    pub fn parse(text: &str, path: &Utf8Path) -> Result<Self, MamlgenError> {
        let raw: RawManifest = serde_json::from_str(text)?;
        let location = raw.location.map_or_else(
            || path.to_path_buf(),
            |location| match path.parent() {
                Some(parent) if location.is_relative() => parent.join(location),
                _ => location,
            },
        );

        let mut types = Vec::with_capacity(raw.types.len());
        let mut failures = Vec::new();
        for (index, entry) in raw.types.into_iter().enumerate() {
            let type_name = entry
                .get("full_name")
                .and_then(Value::as_str)
                .map(str::to_owned);
            match serde_json::from_value::<ReflectedType>(entry) {
                Ok(ty) => types.push(ty),
                Err(err) => failures.push(TypeLoadFailure {
                    index,
                    type_name,
                    message: err.to_string(),
                }),
            }
        }
        if !failures.is_empty() {
            return Err(MamlgenError::PartialLoad {
                path: path.to_path_buf(),
                failures,
            });
        }

        tracing::debug!(module = %raw.module, types = types.len(), "loaded module manifest");
        Ok(Self {
            module: ModuleInfo {
                name: raw.module,
                location: Some(location),
            },
            types,
        })
    }

    /// Returns the types that claim to be commands.
    pub fn command_types(&self) -> impl Iterator<Item = &ReflectedType> {
        self.types.iter().filter(|ty| ty.claims_command())
    }

    /// Discovers the module's commands.
    ///
    /// Types without the command identity marker are ordinary module types
    /// and are skipped silently. Types that claim to be commands but fail
    /// the eligibility check are handled according to `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`MamlgenError::InvalidCommand`] under
    /// [`InvalidCommandPolicy::Abort`].
    pub fn command_descriptors(
        &self,
        policy: InvalidCommandPolicy,
    ) -> Result<Vec<CommandDescriptor>, MamlgenError> {
        describe_commands(self.command_types(), &self.module, policy)
    }
}
