//! Command-line interface definitions for `mamlgen`.

use camino::Utf8PathBuf;
use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::config::ConfigOverrides;
use crate::extract::ExtractorKind;
use crate::generator::InvalidCommandPolicy;
use crate::maml::LineEnding;

/// Parsed CLI arguments for `mamlgen`.
#[derive(Debug, Parser)]
#[command(name = "mamlgen")]
#[command(about = "Generate PowerShell MAML help from reflected command metadata")]
#[command(version)]
pub struct Args {
    /// Configuration file (defaults to `mamlgen.toml` when present).
    #[arg(long, value_name = "path", global = true)]
    pub config: Option<Utf8PathBuf>,
    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, value_name = "filter", global = true)]
    pub log_level: Option<String>,
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// `mamlgen` subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate MAML help for a module manifest.
    GenHelp(GenHelpArgs),
}

/// Arguments for `gen-help`.
#[derive(Debug, Clone, ClapArgs)]
pub struct GenHelpArgs {
    /// Module manifest describing the command types.
    #[arg(value_name = "MODULE")]
    pub module: Utf8PathBuf,
    /// Output file; `-` writes to stdout. Defaults to `<MODULE>-Help.xml`.
    #[arg(value_name = "OUTPUT")]
    pub output: Option<String>,
    /// Documentation extractor, in priority order (repeatable).
    #[arg(long = "extractor", value_enum, value_name = "kind")]
    pub extractors: Vec<ExtractorKind>,
    /// Handling of types that claim to be commands but are ineligible.
    #[arg(long, value_enum, value_name = "policy")]
    pub on_invalid: Option<InvalidCommandPolicy>,
    /// Prefix the output file with a UTF-8 byte-order mark.
    #[arg(long = "bom")]
    pub should_write_bom: bool,
    /// Line terminator for the rendered help.
    #[arg(long, value_enum, value_name = "ending")]
    pub line_ending: Option<LineEnding>,
}

impl Args {
    /// Returns the configuration layer contributed by the command line.
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        let Command::GenHelp(args) = &self.command;
        ConfigOverrides {
            module: Some(args.module.clone()),
            output: args.output.clone(),
            extractors: (!args.extractors.is_empty()).then(|| args.extractors.clone()),
            on_invalid: args.on_invalid,
            write_bom: args.should_write_bom.then_some(true),
            line_ending: args.line_ending,
            log_level: self.log_level.clone(),
        }
    }
}
