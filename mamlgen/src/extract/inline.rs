//! Extractor for inline help annotations.

use crate::descriptor::{CommandDescriptor, ParameterDescriptor};
use crate::error::ExtractError;

use super::DocumentationExtractor;

/// Reads the synopsis/description annotations on the command type and the
/// help message on each parameter marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineAnnotationExtractor;

impl DocumentationExtractor for InlineAnnotationExtractor {
    fn name(&self) -> &'static str {
        "inline"
    }

    fn command_synopsis(
        &self,
        command: &CommandDescriptor,
    ) -> Result<Option<String>, ExtractError> {
        Ok(trimmed(command.help().synopsis.as_deref()))
    }

    fn command_description(
        &self,
        command: &CommandDescriptor,
    ) -> Result<Option<String>, ExtractError> {
        Ok(trimmed(command.help().description.as_deref()))
    }

    fn parameter_description(
        &self,
        _command: &CommandDescriptor,
        parameter: &ParameterDescriptor,
    ) -> Result<Option<String>, ExtractError> {
        Ok(trimmed(parameter.help_message.as_deref()))
    }
}

fn trimmed(text: Option<&str>) -> Option<String> {
    text.map(|value| value.trim().to_owned())
}
