//! Reflected type metadata supplied by an external introspection step.
//!
//! These records mirror what a runtime reflection pass can observe about a
//! binary module: type visibility, the command identity marker, and per
//! property parameter markers. They deserialise from the module manifest.

use serde::{Deserialize, Serialize};

use crate::descriptor::{TypeRef, check_eligibility};
use crate::error::Ineligibility;
use crate::names::TypeName;

const fn yes() -> bool {
    true
}

/// Verb/noun identity marker on a command type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMarker {
    /// Command verb, for example `Get`.
    pub verb: String,
    /// Command noun, for example `Greeting`.
    pub noun: String,
}

/// A worked example attached to a command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExampleAnnotation {
    /// Example title.
    pub title: String,
    /// Example command text.
    pub code: String,
    /// Explanation following the code.
    pub remarks: Option<String>,
}

/// A related link attached to a command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkAnnotation {
    /// Link text.
    pub text: String,
    /// Target URI; empty for links to other help topics.
    pub uri: String,
}

/// Inline help annotations on a command type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelpAnnotations {
    /// Inline synopsis, if annotated.
    pub synopsis: Option<String>,
    /// Inline detailed description, if annotated.
    pub description: Option<String>,
    /// Worked examples.
    pub examples: Vec<ExampleAnnotation>,
    /// Notes rendered in the alert set.
    pub notes: Vec<String>,
    /// Related links.
    pub links: Vec<LinkAnnotation>,
}

/// Parameter marker on a property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterMarker {
    /// Whether the parameter is mandatory.
    pub mandatory: bool,
    /// Inline help message.
    pub help_message: Option<String>,
    /// Parameter-set name; absent for the default set.
    pub parameter_set_name: Option<String>,
    /// Zero-based position; absent for named parameters.
    pub position: Option<u32>,
    /// Whether the parameter binds pipeline objects.
    pub value_from_pipeline: bool,
    /// Whether the parameter binds pipeline object properties by name.
    pub value_from_pipeline_by_property_name: bool,
}

/// A property observed on a reflected type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectedProperty {
    /// Property name.
    pub name: String,
    /// Declared property type.
    pub value_type: TypeRef,
    /// Type that declares the property, when inherited from a base type.
    /// Defaults to the owning type.
    #[serde(default)]
    pub declaring_type: Option<TypeName>,
    /// Whether the property has a setter.
    #[serde(default = "yes")]
    pub can_write: bool,
    /// Whether the setter is public.
    #[serde(default = "yes")]
    pub setter_is_public: bool,
    /// Parameter markers, in declaration order.
    #[serde(default)]
    pub parameters: Vec<ParameterMarker>,
    /// Whether the property carries the wildcard-support marker.
    #[serde(default)]
    pub supports_wildcards: bool,
}

impl ReflectedProperty {
    /// Creates a public, writable property with one default parameter marker.
    #[must_use]
    pub fn parameter(name: impl Into<String>, value_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            value_type,
            declaring_type: None,
            can_write: true,
            setter_is_public: true,
            parameters: vec![ParameterMarker::default()],
            supports_wildcards: false,
        }
    }
}

/// A type observed in a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectedType {
    /// Fully qualified type name.
    pub full_name: TypeName,
    /// Whether the type is publicly accessible.
    #[serde(default = "yes")]
    pub is_public: bool,
    /// Whether the type is a class.
    #[serde(default = "yes")]
    pub is_class: bool,
    /// Whether the type is abstract.
    #[serde(default)]
    pub is_abstract: bool,
    /// Whether the type derives from the command base type.
    #[serde(default)]
    pub derives_command_base: bool,
    /// Command identity marker.
    #[serde(default)]
    pub command: Option<CommandMarker>,
    /// Inline help annotations.
    #[serde(default)]
    pub help: Option<HelpAnnotations>,
    /// Declared output types.
    #[serde(default)]
    pub output_types: Vec<TypeRef>,
    /// Public properties, in declaration order.
    #[serde(default)]
    pub properties: Vec<ReflectedProperty>,
}

impl ReflectedType {
    /// Creates an eligible command type with no properties.
    #[must_use]
    pub fn command(
        full_name: impl Into<TypeName>,
        verb: impl Into<String>,
        noun: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            is_public: true,
            is_class: true,
            is_abstract: false,
            derives_command_base: true,
            command: Some(CommandMarker {
                verb: verb.into(),
                noun: noun.into(),
            }),
            help: None,
            output_types: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Adds a property after any already declared.
    #[must_use]
    pub fn with_property(mut self, property: ReflectedProperty) -> Self {
        self.properties.push(property);
        self
    }

    /// Replaces the inline help annotations.
    #[must_use]
    pub fn with_help(mut self, help: HelpAnnotations) -> Self {
        self.help = Some(help);
        self
    }

    /// Returns the identity marker once every eligibility condition holds.
    ///
    /// # Errors
    ///
    /// Returns the first unmet condition.
    pub fn command_identity(&self) -> Result<&CommandMarker, Ineligibility> {
        check_eligibility(self)?;
        self.command
            .as_ref()
            .ok_or(Ineligibility::MissingIdentityMarker)
    }

    /// Reports whether the type claims to be a command, whether or not it is
    /// eligible. Types that make no claim are ordinary module types.
    #[must_use]
    pub const fn claims_command(&self) -> bool {
        self.command.is_some()
    }
}
