//! Normalised command and parameter descriptors.
//!
//! A [`CommandDescriptor`] is the language-neutral view of one reflected
//! command type. Descriptors are built from [`ReflectedType`] records once the
//! eligibility contract has been checked, and are immutable from the
//! generator's point of view.

use std::fmt;
use std::str::FromStr;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::error::{Ineligibility, MamlgenError};
use crate::names::{ModuleName, TypeName};
use crate::reflect::{HelpAnnotations, ReflectedProperty, ReflectedType};

/// Namespace whose types render by their short name.
const BUILT_IN_NAMESPACE: &str = "System";

/// Reference to a declared value type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeRef {
    namespace: String,
    name: String,
}

impl TypeRef {
    /// Creates a reference from a namespace and a short type name.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Parses a fully qualified type name such as `System.String[]`.
    ///
    /// The namespace ends at the last `.` before any generic arity marker or
    /// array/generic bracket, so `System.Collections.Generic.List`1[[...]]`
    /// keeps its argument list in the short name.
    #[must_use]
    pub fn parse(full_name: &str) -> Self {
        let base_end = full_name.find(['[', '`']).unwrap_or(full_name.len());
        let base = full_name.get(..base_end).unwrap_or(full_name);
        match base.rfind('.') {
            Some(dot) => Self {
                namespace: full_name.get(..dot).unwrap_or_default().to_owned(),
                name: full_name.get(dot + 1..).unwrap_or_default().to_owned(),
            },
            None => Self {
                namespace: String::new(),
                name: full_name.to_owned(),
            },
        }
    }

    /// Returns the type's namespace (empty for the global namespace).
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the short type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fully qualified type name.
    #[must_use]
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Returns the name used in help output.
    ///
    /// Built-in types render by their short name, everything else by its
    /// fully qualified name. `PowerShell` help consumers expect exactly this.
    /// The short name drops any generic argument list but keeps array rank
    /// specifiers, so ``System.Nullable`1[[System.Int32, ...]]`` renders as
    /// ``Nullable`1``.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.namespace == BUILT_IN_NAMESPACE {
            short_name(&self.name)
        } else {
            self.full_name()
        }
    }

    /// Reports whether the type is an array.
    #[must_use]
    pub fn is_array(&self) -> bool {
        self.name.ends_with("[]")
    }
}

/// Strips the generic argument list from `name`, keeping trailing array
/// rank specifiers such as `[]` or `[,]`.
fn short_name(name: &str) -> String {
    let Some(open) = name.find('[') else {
        return name.to_owned();
    };
    let (base, rest) = name.split_at(open);
    let mut head = rest;
    while let Some((before, rank)) = head
        .strip_suffix(']')
        .and_then(|inner| inner.rfind('[').map(|at| inner.split_at(at)))
    {
        if !rank.chars().skip(1).all(|ch| ch == ',') {
            break;
        }
        head = before;
    }
    format!("{base}{}", rest.get(head.len()..).unwrap_or_default())
}

impl TryFrom<String> for TypeRef {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            return Err("type name must not be empty".to_owned());
        }
        Ok(Self::parse(&value))
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.full_name()
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

/// How a parameter may receive its value from the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PipelineInputMode {
    /// The parameter does not accept pipeline input.
    #[default]
    None,
    /// The parameter binds whole pipeline objects.
    ByValue,
    /// The parameter binds a same-named property of pipeline objects.
    ByPropertyName,
    /// The parameter accepts either binding.
    ByValueOrByPropertyName,
}

impl PipelineInputMode {
    /// Builds the mode from the two pipeline flags on a parameter marker.
    #[must_use]
    pub const fn from_flags(by_value: bool, by_property_name: bool) -> Self {
        match (by_value, by_property_name) {
            (false, false) => Self::None,
            (true, false) => Self::ByValue,
            (false, true) => Self::ByPropertyName,
            (true, true) => Self::ByValueOrByPropertyName,
        }
    }

    /// Returns the MAML `pipelineInput` attribute token.
    #[must_use]
    pub const fn as_token(self) -> &'static str {
        match self {
            Self::None => "false",
            Self::ByValue => "true (ByValue)",
            Self::ByPropertyName => "true (ByPropertyName)",
            Self::ByValueOrByPropertyName => "true (ByValue, ByPropertyName)",
        }
    }

    /// Parses a MAML `pipelineInput` attribute token.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        [
            Self::None,
            Self::ByValue,
            Self::ByPropertyName,
            Self::ByValueOrByPropertyName,
        ]
        .into_iter()
        .find(|mode| mode.as_token() == token)
    }

    /// Reports whether the parameter accepts pipeline input at all.
    #[must_use]
    pub const fn accepts_input(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Positional binding of a parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Position {
    /// The parameter must be named explicitly.
    #[default]
    Named,
    /// Zero-based positional index.
    Index(u32),
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named => f.write_str("named"),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

impl FromStr for Position {
    type Err = std::num::ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.eq_ignore_ascii_case("named") {
            return Ok(Self::Named);
        }
        value.parse().map(Self::Index)
    }
}

/// The module a command type was loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleInfo {
    /// Module identity; documentation is cached per name.
    pub name: ModuleName,
    /// On-disk location of the module, when known.
    pub location: Option<Utf8PathBuf>,
}

impl ModuleInfo {
    /// Creates module information without a location.
    #[must_use]
    pub fn named(name: impl Into<ModuleName>) -> Self {
        Self {
            name: name.into(),
            location: None,
        }
    }
}

/// Normalised metadata for one command parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    /// Parameter name, unique within its command.
    pub name: String,
    /// Full name of the type that declares the parameter property.
    pub declaring_type: TypeName,
    /// Declared value type.
    pub value_type: TypeRef,
    /// Whether the parameter must be supplied.
    pub is_mandatory: bool,
    /// Whether the parameter accepts wildcard patterns.
    pub supports_globbing: bool,
    /// Pipeline binding mode.
    pub pipeline_input: PipelineInputMode,
    /// Parameter-set name; empty for the default set.
    pub parameter_set_name: String,
    /// Positional binding.
    pub position: Position,
    /// Inline help message, before paragraph splitting.
    pub help_message: Option<String>,
}

impl ParameterDescriptor {
    /// Creates an optional, named parameter in the default set.
    #[must_use]
    pub fn new(
        declaring_type: impl Into<TypeName>,
        name: impl Into<String>,
        value_type: TypeRef,
    ) -> Self {
        Self {
            name: name.into(),
            declaring_type: declaring_type.into(),
            value_type,
            is_mandatory: false,
            supports_globbing: false,
            pipeline_input: PipelineInputMode::None,
            parameter_set_name: String::new(),
            position: Position::Named,
            help_message: None,
        }
    }

    /// Builds a descriptor from a reflected property of `owner`.
    ///
    /// Returns `None` when the property is not a parameter: it must be
    /// writable, expose a public setter, and carry a parameter marker. Only
    /// the first marker is honoured. The declaring type is the property's
    /// own `declaring_type` when set, otherwise `owner`.
    #[must_use]
    pub fn from_property(owner: &TypeName, property: &ReflectedProperty) -> Option<Self> {
        if !property.can_write || !property.setter_is_public {
            return None;
        }
        let marker = property.parameters.first()?;
        Some(Self {
            name: property.name.clone(),
            declaring_type: property
                .declaring_type
                .clone()
                .unwrap_or_else(|| owner.clone()),
            value_type: property.value_type.clone(),
            is_mandatory: marker.mandatory,
            supports_globbing: property.supports_wildcards,
            pipeline_input: PipelineInputMode::from_flags(
                marker.value_from_pipeline,
                marker.value_from_pipeline_by_property_name,
            ),
            parameter_set_name: marker.parameter_set_name.clone().unwrap_or_default(),
            position: marker.position.map_or(Position::Named, Position::Index),
            help_message: marker.help_message.clone(),
        })
    }
}

/// Normalised metadata for one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    verb: String,
    noun: String,
    type_name: TypeName,
    module: ModuleInfo,
    help: HelpAnnotations,
    output_types: Vec<TypeRef>,
    parameters: Vec<ParameterDescriptor>,
}

impl CommandDescriptor {
    /// Creates a descriptor with no parameters or annotations.
    #[must_use]
    pub fn new(
        type_name: impl Into<TypeName>,
        module: ModuleInfo,
        verb: impl Into<String>,
        noun: impl Into<String>,
    ) -> Self {
        Self {
            verb: verb.into(),
            noun: noun.into(),
            type_name: type_name.into(),
            module,
            help: HelpAnnotations::default(),
            output_types: Vec::new(),
            parameters: Vec::new(),
        }
    }

    /// Validates a reflected type and normalises it into a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`MamlgenError::InvalidCommand`] naming the first unmet
    /// eligibility condition.
    pub fn from_reflected(ty: &ReflectedType, module: &ModuleInfo) -> Result<Self, MamlgenError> {
        let identity = ty.command_identity().map_err(|reason| MamlgenError::InvalidCommand {
            type_name: ty.full_name.to_string(),
            reason,
        })?;
        let parameters = ty
            .properties
            .iter()
            .filter_map(|property| ParameterDescriptor::from_property(&ty.full_name, property))
            .collect();
        Ok(Self {
            verb: identity.verb.clone(),
            noun: identity.noun.clone(),
            type_name: ty.full_name.clone(),
            module: module.clone(),
            help: ty.help.clone().unwrap_or_default(),
            output_types: ty.output_types.clone(),
            parameters,
        })
    }

    /// Adds a parameter after any already declared.
    #[must_use]
    pub fn with_parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Replaces the inline help annotations.
    #[must_use]
    pub fn with_help(mut self, help: HelpAnnotations) -> Self {
        self.help = help;
        self
    }

    /// Adds a declared output type.
    #[must_use]
    pub fn with_output_type(mut self, output: TypeRef) -> Self {
        self.output_types.push(output);
        self
    }

    /// Returns the command name, always `"{verb}-{noun}"`.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{}-{}", self.verb, self.noun)
    }

    /// Returns the command verb.
    #[must_use]
    pub fn verb(&self) -> &str {
        &self.verb
    }

    /// Returns the command noun.
    #[must_use]
    pub fn noun(&self) -> &str {
        &self.noun
    }

    /// Returns the full name of the implementing type.
    #[must_use]
    pub const fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    /// Returns the originating module.
    #[must_use]
    pub const fn module(&self) -> &ModuleInfo {
        &self.module
    }

    /// Returns the inline help annotations.
    #[must_use]
    pub const fn help(&self) -> &HelpAnnotations {
        &self.help
    }

    /// Returns the declared output types.
    #[must_use]
    pub fn output_types(&self) -> &[TypeRef] {
        &self.output_types
    }

    /// Returns the parameters in declaration order.
    #[must_use]
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }
}

/// Checks the eligibility conditions in the order they are reported.
pub(crate) fn check_eligibility(ty: &ReflectedType) -> Result<(), Ineligibility> {
    if !ty.is_public {
        return Err(Ineligibility::NotPublic);
    }
    if !ty.is_class {
        return Err(Ineligibility::NotAClass);
    }
    if ty.is_abstract {
        return Err(Ineligibility::Abstract);
    }
    if !ty.derives_command_base {
        return Err(Ineligibility::MissingCommandBase);
    }
    match ty.command.as_ref() {
        None => Err(Ineligibility::MissingIdentityMarker),
        Some(marker) if marker.verb.trim().is_empty() || marker.noun.trim().is_empty() => {
            Err(Ineligibility::BlankIdentity)
        }
        Some(_) => Ok(()),
    }
}
