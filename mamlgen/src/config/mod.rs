//! Layered configuration for help generation.
//!
//! Values are merged with figment, lowest precedence first: built-in
//! defaults, a TOML file (`--config`, or `mamlgen.toml` in the working
//! directory), `MAMLGEN_*` environment variables, then command-line flags.

mod csv_env;

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Format, Serialized, Toml};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::MamlgenError;
use crate::extract::{ExtractorChain, ExtractorKind};
use crate::fs_helpers::read_text;
use crate::generator::InvalidCommandPolicy;
use crate::maml::{LineEnding, RenderOptions};

pub use csv_env::CsvEnv;

/// Configuration file looked for in the working directory.
pub const CONFIG_FILE_NAME: &str = "mamlgen.toml";
/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "MAMLGEN_";
/// Keys whose environment values are comma-separated lists.
const LIST_KEYS: &[&str] = &["extractors"];

/// Settings for one `gen-help` run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Module manifest to document.
    pub module: Option<Utf8PathBuf>,
    /// Output path; `-` writes to stdout. Defaults to `<module>-Help.xml`.
    pub output: Option<String>,
    /// Extractors in priority order.
    #[serde(deserialize_with = "one_or_many")]
    pub extractors: Vec<ExtractorKind>,
    /// Handling of types that claim to be commands but are ineligible.
    pub on_invalid: InvalidCommandPolicy,
    /// Prefix written files with a UTF-8 byte-order mark.
    pub write_bom: bool,
    /// Line terminator for rendered help.
    pub line_ending: LineEnding,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            module: None,
            output: None,
            extractors: ExtractorKind::DEFAULT_ORDER.to_vec(),
            on_invalid: InvalidCommandPolicy::default(),
            write_bom: false,
            line_ending: LineEnding::default(),
            log_level: "warn".to_owned(),
        }
    }
}

/// Highest-precedence values, usually from command-line flags.
///
/// Unset fields leave lower layers untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigOverrides {
    /// See [`GenerateConfig::module`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<Utf8PathBuf>,
    /// See [`GenerateConfig::output`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// See [`GenerateConfig::extractors`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extractors: Option<Vec<ExtractorKind>>,
    /// See [`GenerateConfig::on_invalid`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_invalid: Option<InvalidCommandPolicy>,
    /// See [`GenerateConfig::write_bom`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_bom: Option<bool>,
    /// See [`GenerateConfig::line_ending`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_ending: Option<LineEnding>,
    /// See [`GenerateConfig::log_level`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl GenerateConfig {
    /// Builds the layered figment without extracting it.
    ///
    /// An explicit `config_file` must exist; the default `mamlgen.toml` is
    /// optional.
    ///
    /// # Errors
    ///
    /// Returns [`MamlgenError::Io`] when an explicit configuration file
    /// cannot be read.
    pub fn figment(
        config_file: Option<&Utf8Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Figment, MamlgenError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        figment = match config_file {
            Some(path) => {
                tracing::debug!(%path, "reading configuration file");
                figment.merge(Toml::string(&read_text(path)?))
            }
            None => figment.merge(Toml::file(CONFIG_FILE_NAME)),
        };
        Ok(figment
            .merge(CsvEnv::prefixed(ENV_PREFIX).lists(LIST_KEYS))
            .merge(Serialized::defaults(overrides)))
    }

    /// Loads configuration from every layer.
    ///
    /// # Errors
    ///
    /// Returns [`MamlgenError::Config`] when a layer holds invalid values,
    /// or [`MamlgenError::Io`] when an explicit configuration file cannot
    /// be read.
    pub fn load(
        config_file: Option<&Utf8Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, MamlgenError> {
        Ok(Self::figment(config_file, overrides)?.extract()?)
    }

    /// Returns the module manifest path.
    ///
    /// # Errors
    ///
    /// Returns [`MamlgenError::Message`] when no module was configured.
    pub fn module_path(&self) -> Result<&Utf8Path, MamlgenError> {
        self.module
            .as_deref()
            .ok_or_else(|| MamlgenError::Message("no module manifest was given".to_owned()))
    }

    /// Returns the rendering options.
    #[must_use]
    pub const fn render_options(&self) -> RenderOptions {
        RenderOptions {
            line_ending: self.line_ending,
        }
    }

    /// Builds the configured extractor chain.
    #[must_use]
    pub fn extractor_chain(&self) -> ExtractorChain {
        ExtractorChain::from_kinds(&self.extractors)
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<ExtractorKind>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(ExtractorKind),
        Many(Vec<ExtractorKind>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(kind) => vec![kind],
        OneOrMany::Many(kinds) => kinds,
    })
}
