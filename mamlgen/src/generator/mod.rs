//! Builds MAML document trees from command descriptors.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::descriptor::{CommandDescriptor, ModuleInfo, ParameterDescriptor};
use crate::error::MamlgenError;
use crate::extract::ExtractorChain;
use crate::grouping::group_parameters;
use crate::maml::{
    Alert, Command, CommandDetails, Example, HelpItems, NavigationLink, Parameter,
    ParameterValue, TypeEntry,
};
use crate::manifest::ModuleManifest;
use crate::reflect::ReflectedType;
use crate::text::to_paragraphs;

/// What to do with a type that claims to be a command but is ineligible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InvalidCommandPolicy {
    /// Fail the run with [`MamlgenError::InvalidCommand`].
    #[default]
    Abort,
    /// Log a warning and leave the type out of the help.
    Skip,
}

/// Normalises reflected types into command descriptors.
///
/// Every type is expected to be a command; ineligible ones are handled
/// according to `policy`.
///
/// # Errors
///
/// Returns [`MamlgenError::InvalidCommand`] for the first ineligible type
/// under [`InvalidCommandPolicy::Abort`].
pub fn describe_commands<'a>(
    types: impl IntoIterator<Item = &'a ReflectedType>,
    module: &ModuleInfo,
    policy: InvalidCommandPolicy,
) -> Result<Vec<CommandDescriptor>, MamlgenError> {
    let mut descriptors = Vec::new();
    for ty in types {
        match CommandDescriptor::from_reflected(ty, module) {
            Ok(descriptor) => descriptors.push(descriptor),
            Err(MamlgenError::InvalidCommand { type_name, reason })
                if policy == InvalidCommandPolicy::Skip =>
            {
                tracing::warn!(%type_name, %reason, "skipping invalid command");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(descriptors)
}

/// Generates MAML help from command descriptors, querying an
/// [`ExtractorChain`] for prose.
#[derive(Debug, Default)]
pub struct MamlGenerator {
    chain: ExtractorChain,
}

impl MamlGenerator {
    /// Creates a generator with the default extractor chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator that queries `chain`.
    #[must_use]
    pub const fn with_chain(chain: ExtractorChain) -> Self {
        Self { chain }
    }

    /// Returns the extractor chain.
    #[must_use]
    pub const fn chain(&self) -> &ExtractorChain {
        &self.chain
    }

    /// Generates help for each command, in input order.
    ///
    /// # Errors
    ///
    /// Propagates the first fatal extractor error.
    pub fn generate(&self, commands: &[CommandDescriptor]) -> Result<HelpItems, MamlgenError> {
        let commands = commands
            .iter()
            .map(|command| self.generate_command(command))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(HelpItems { commands })
    }

    /// Checks and generates help for reflected types that are all expected
    /// to be commands.
    ///
    /// # Errors
    ///
    /// Returns [`MamlgenError::InvalidCommand`] under
    /// [`InvalidCommandPolicy::Abort`], or a fatal extractor error.
    pub fn generate_types(
        &self,
        types: &[ReflectedType],
        module: &ModuleInfo,
        policy: InvalidCommandPolicy,
    ) -> Result<HelpItems, MamlgenError> {
        self.generate(&describe_commands(types, module, policy)?)
    }

    /// Discovers and generates help for every command in a module.
    ///
    /// Types that make no command claim are skipped; claimed but ineligible
    /// types follow `policy`.
    ///
    /// # Errors
    ///
    /// See [`MamlGenerator::generate_types`].
    pub fn generate_module(
        &self,
        manifest: &ModuleManifest,
        policy: InvalidCommandPolicy,
    ) -> Result<HelpItems, MamlgenError> {
        let descriptors = manifest.command_descriptors(policy)?;
        tracing::debug!(
            module = %manifest.module.name,
            commands = descriptors.len(),
            "discovered commands"
        );
        self.generate(&descriptors)
    }

    /// Generates help for one command.
    ///
    /// # Errors
    ///
    /// Propagates fatal extractor errors such as
    /// [`MamlgenError::UnresolvedMember`].
    pub fn generate_command(&self, command: &CommandDescriptor) -> Result<Command, MamlgenError> {
        let name = command.name();
        tracing::debug!(command = %name, parameters = command.parameters().len(), "generating help");

        let synopsis = self.chain.command_synopsis(command)?;
        let description = self.chain.command_description(command)?;

        let mut details = CommandDetails::new(command.verb(), command.noun());
        details.synopsis = to_paragraphs(synopsis.as_deref());
        let mut maml = Command::new(details);
        maml.description = to_paragraphs(description.as_deref());

        let parameters = command
            .parameters()
            .iter()
            .map(|parameter| {
                let rendered = self.parameter(command, parameter)?;
                Ok((parameter.parameter_set_name.as_str(), rendered))
            })
            .collect::<Result<Vec<_>, MamlgenError>>()?;
        let grouped = group_parameters(&name, parameters);
        maml.syntax = grouped.syntax;
        maml.parameters = grouped.parameters;

        maml.input_types = input_types(command.parameters());
        maml.return_values = command
            .output_types()
            .iter()
            .map(|output| TypeEntry::named(output.display_name()))
            .collect();

        let help = command.help();
        maml.alert_set = help
            .notes
            .iter()
            .map(|note| Alert {
                paragraphs: to_paragraphs(Some(note)),
            })
            .collect();
        maml.examples = help
            .examples
            .iter()
            .map(|example| Example {
                title: example.title.trim().to_owned(),
                code: example.code.clone(),
                remarks: to_paragraphs(example.remarks.as_deref()),
            })
            .collect();
        maml.related_links = help
            .links
            .iter()
            .map(|link| NavigationLink {
                link_text: link.text.trim().to_owned(),
                uri: link.uri.trim().to_owned(),
            })
            .collect();

        Ok(maml)
    }

    fn parameter(
        &self,
        command: &CommandDescriptor,
        parameter: &ParameterDescriptor,
    ) -> Result<Parameter, MamlgenError> {
        let description = self.chain.parameter_description(command, parameter)?;
        Ok(Parameter {
            name: parameter.name.clone(),
            description: to_paragraphs(description.as_deref()),
            value: ParameterValue {
                data_type: parameter.value_type.display_name(),
                is_mandatory: parameter.is_mandatory,
                is_variable_length: parameter.value_type.is_array(),
            },
            is_mandatory: parameter.is_mandatory,
            supports_globbing: parameter.supports_globbing,
            pipeline_input: parameter.pipeline_input,
            position: parameter.position,
        })
    }
}

/// Distinct value types of pipeline-bound parameters, first occurrence first.
fn input_types(parameters: &[ParameterDescriptor]) -> Vec<TypeEntry> {
    let mut entries: Vec<TypeEntry> = Vec::new();
    for parameter in parameters.iter().filter(|p| p.pipeline_input.accepts_input()) {
        let type_name = parameter.value_type.display_name();
        if !entries.iter().any(|entry| entry.type_name == type_name) {
            entries.push(TypeEntry::named(type_name));
        }
    }
    entries
}
