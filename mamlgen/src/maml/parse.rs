//! Reading rendered MAML back into the document tree.

use roxmltree::{Document, Node};

use crate::descriptor::{PipelineInputMode, Position};
use crate::error::MamlgenError;

use super::types::{
    Alert, Command, CommandDetails, Example, HelpItems, NavigationLink, Parameter,
    ParameterValue, SyntaxItem, TypeEntry,
};
use super::xml_writer::{COMMAND_NS, DEV_NS, MAML_NS, MSH_NS};

type ParseResult<T> = Result<T, MamlgenError>;

pub(super) fn parse_help(text: &str) -> ParseResult<HelpItems> {
    let document = Document::parse(text.trim_start_matches('\u{feff}'))?;
    let root = document.root_element();
    if !is(root, MSH_NS, "helpItems") {
        return Err(malformed(format!(
            "expected helpItems root, found '{}'",
            root.tag_name().name()
        )));
    }
    let commands = children(root, COMMAND_NS, "command")
        .map(parse_command)
        .collect::<ParseResult<Vec<_>>>()?;
    Ok(HelpItems { commands })
}

fn parse_command(node: Node<'_, '_>) -> ParseResult<Command> {
    let mut command = Command::new(parse_details(required_child(node, COMMAND_NS, "details")?)?);
    command.description = paragraphs_of(node, MAML_NS, "description")?;
    command.syntax = items_of(node, "syntax", "syntaxItem", parse_syntax_item)?;
    command.parameters = items_of(node, "parameters", "parameter", parse_parameter)?;
    command.input_types = items_of(node, "inputTypes", "inputType", parse_type_entry)?;
    command.return_values = items_of(node, "returnValues", "returnValue", parse_type_entry)?;
    command.alert_set = match child(node, MAML_NS, "alertSet") {
        Some(set) => children(set, MAML_NS, "alert")
            .map(|alert| Alert {
                paragraphs: paragraphs(alert),
            })
            .collect(),
        None => Vec::new(),
    };
    command.examples = items_of(node, "examples", "example", parse_example)?;
    command.related_links = match child(node, MAML_NS, "relatedLinks") {
        Some(links) => children(links, MAML_NS, "navigationLink")
            .map(parse_link)
            .collect::<ParseResult<_>>()?,
        None => Vec::new(),
    };
    Ok(command)
}

fn parse_details(node: Node<'_, '_>) -> ParseResult<CommandDetails> {
    let name = required_text(node, COMMAND_NS, "name")?;
    let verb = required_text(node, COMMAND_NS, "verb")?;
    let noun = required_text(node, COMMAND_NS, "noun")?;
    let mut details = CommandDetails::new(verb, noun);
    if details.name() != name {
        return Err(malformed(format!(
            "command name '{name}' does not match verb-noun '{}'",
            details.name()
        )));
    }
    details.synopsis = paragraphs_of(node, MAML_NS, "description")?;
    Ok(details)
}

fn parse_syntax_item(node: Node<'_, '_>) -> ParseResult<SyntaxItem> {
    Ok(SyntaxItem {
        command_name: required_text(node, MAML_NS, "name")?,
        parameters: children(node, COMMAND_NS, "parameter")
            .map(parse_parameter)
            .collect::<ParseResult<_>>()?,
    })
}

fn parse_parameter(node: Node<'_, '_>) -> ParseResult<Parameter> {
    let pipeline = required_attribute(node, "pipelineInput")?;
    let position = required_attribute(node, "position")?;
    let value = required_child(node, COMMAND_NS, "parameterValue")?;
    Ok(Parameter {
        name: required_text(node, MAML_NS, "name")?,
        description: paragraphs_of(node, MAML_NS, "description")?,
        value: ParameterValue {
            data_type: text(value),
            is_mandatory: bool_attribute(value, "required")?,
            is_variable_length: bool_attribute(value, "variableLength")?,
        },
        is_mandatory: bool_attribute(node, "required")?,
        supports_globbing: bool_attribute(node, "globbing")?,
        pipeline_input: PipelineInputMode::from_token(pipeline)
            .ok_or_else(|| malformed(format!("unknown pipelineInput token '{pipeline}'")))?,
        position: position
            .parse::<Position>()
            .map_err(|err| malformed(format!("invalid position '{position}': {err}")))?,
    })
}

fn parse_type_entry(node: Node<'_, '_>) -> ParseResult<TypeEntry> {
    let dev_type = required_child(node, DEV_NS, "type")?;
    Ok(TypeEntry {
        type_name: required_text(dev_type, MAML_NS, "name")?,
        uri: child(dev_type, MAML_NS, "uri").map(text).unwrap_or_default(),
        description: paragraphs_of(node, MAML_NS, "description")?,
    })
}

fn parse_example(node: Node<'_, '_>) -> ParseResult<Example> {
    Ok(Example {
        title: required_text(node, MAML_NS, "title")?,
        code: required_text(node, DEV_NS, "code")?,
        remarks: paragraphs_of(node, DEV_NS, "remarks")?,
    })
}

fn parse_link(node: Node<'_, '_>) -> ParseResult<NavigationLink> {
    Ok(NavigationLink {
        link_text: required_text(node, MAML_NS, "linkText")?,
        uri: child(node, MAML_NS, "uri").map(text).unwrap_or_default(),
    })
}

/// Parses the `command:{container}` child of `node` as a list of
/// `command:{item}` elements.
fn items_of<T>(
    node: Node<'_, '_>,
    container: &str,
    item: &str,
    parse_item: impl Fn(Node<'_, '_>) -> ParseResult<T>,
) -> ParseResult<Vec<T>> {
    let container_node = required_child(node, COMMAND_NS, container)?;
    children(container_node, COMMAND_NS, item)
        .map(parse_item)
        .collect()
}

fn paragraphs_of(node: Node<'_, '_>, namespace: &str, name: &str) -> ParseResult<Vec<String>> {
    required_child(node, namespace, name).map(paragraphs)
}

fn paragraphs(node: Node<'_, '_>) -> Vec<String> {
    children(node, MAML_NS, "para").map(text).collect()
}

fn is(node: Node<'_, '_>, namespace: &str, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(namespace)
}

fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    namespace: &'a str,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |c| is(*c, namespace, name))
}

fn child<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    namespace: &'a str,
    name: &'a str,
) -> Option<Node<'a, 'input>> {
    children(node, namespace, name).next()
}

fn required_child<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    namespace: &'a str,
    name: &'a str,
) -> ParseResult<Node<'a, 'input>> {
    child(node, namespace, name).ok_or_else(|| {
        malformed(format!(
            "'{}' is missing its '{name}' element",
            node.tag_name().name()
        ))
    })
}

fn required_text(node: Node<'_, '_>, namespace: &str, name: &str) -> ParseResult<String> {
    required_child(node, namespace, name).map(text)
}

/// Concatenated descendant text of an element.
fn text(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(Node::is_text)
        .filter_map(|n| n.text())
        .collect()
}

fn required_attribute<'a>(node: Node<'a, '_>, name: &str) -> ParseResult<&'a str> {
    node.attribute(name).ok_or_else(|| {
        malformed(format!(
            "'{}' is missing its '{name}' attribute",
            node.tag_name().name()
        ))
    })
}

fn bool_attribute(node: Node<'_, '_>, name: &str) -> ParseResult<bool> {
    match required_attribute(node, name)? {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(malformed(format!(
            "attribute '{name}' must be 'true' or 'false', found '{other}'"
        ))),
    }
}

fn malformed(message: String) -> MamlgenError {
    MamlgenError::MalformedHelp(message)
}
