//! Generate `PowerShell` MAML help from reflected command metadata.
//!
//! The pipeline runs from a [`ModuleManifest`] of reflected types, through
//! eligibility checks into [`CommandDescriptor`]s, and on to a MAML document
//! tree built by [`MamlGenerator`]. Prose comes from an [`ExtractorChain`]
//! that asks each [`DocumentationExtractor`] in turn and keeps the first
//! answer. The tree renders to XML with [`render_help`] and reads back with
//! [`parse_help`].
//!
//! ```
//! use mamlgen::{
//!     MamlGenerator, ModuleInfo, RenderOptions, ReflectedProperty, ReflectedType, TypeRef,
//!     render_help,
//! };
//!
//! let ty = ReflectedType::command("Demo.GetGreeting", "Get", "Greeting")
//!     .with_property(ReflectedProperty::parameter("Name", TypeRef::parse("System.String")));
//! let help = MamlGenerator::new()
//!     .generate_types(&[ty], &ModuleInfo::named("Demo"), Default::default())
//!     .expect("the type is a valid command");
//! let xml = render_help(&help, RenderOptions::default());
//! assert!(xml.contains("<command:name>Get-Greeting</command:name>"));
//! ```

use std::io::Write;

pub mod cli;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod extract;
mod fs_helpers;
pub mod generator;
pub mod grouping;
pub mod maml;
pub mod manifest;
pub mod names;
pub mod output;
pub mod reflect;
pub mod text;

pub use config::{ConfigOverrides, GenerateConfig};
pub use descriptor::{
    CommandDescriptor, ModuleInfo, ParameterDescriptor, PipelineInputMode, Position, TypeRef,
};
pub use error::{ExtractError, Ineligibility, MamlgenError, TypeLoadFailure};
pub use extract::{
    DocCache, DocSource, DocumentationExtractor, ExtractorChain, ExtractorKind, FileDocSource,
    InMemoryDocSource, InlineAnnotationExtractor, MemberKind, XmlCommentExtractor,
};
pub use generator::{InvalidCommandPolicy, MamlGenerator};
pub use maml::{HelpItems, LineEnding, RenderOptions, parse_help, render_help, write_help};
pub use manifest::ModuleManifest;
pub use names::{ModuleName, TypeName};
pub use output::OutputTarget;
pub use reflect::{HelpAnnotations, ParameterMarker, ReflectedProperty, ReflectedType};

/// Runs `gen-help` for a loaded configuration.
///
/// Loads the configured manifest, generates help for every discovered
/// command, and writes it to the configured target. `stdout` receives the
/// document when the output is `-`.
///
/// # Errors
///
/// Returns any loading, generation, or write failure.
pub fn run_gen_help(
    config: &GenerateConfig,
    stdout: &mut dyn Write,
) -> Result<OutputTarget, MamlgenError> {
    let module = config.module_path()?;
    let manifest = ModuleManifest::load(module)?;
    let generator = MamlGenerator::with_chain(config.extractor_chain());
    tracing::debug!(extractors = ?generator.chain().names(), "extractor chain");

    let help = generator.generate_module(&manifest, config.on_invalid)?;
    let target = OutputTarget::resolve(config.output.as_deref(), module);
    target.write(
        &render_help(&help, config.render_options()),
        config.write_bom,
        stdout,
    )?;
    tracing::info!(
        commands = help.commands.len(),
        output = %target,
        "generated MAML help"
    );
    Ok(target)
}
