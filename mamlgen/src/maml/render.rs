//! Rendering of the document tree to MAML text.

use super::types::{
    Alert, Command, Example, HelpItems, NavigationLink, Parameter, RenderOptions, SyntaxItem,
    TypeEntry,
};
use super::xml_writer::{XML_DECLARATION, XmlWriter, bool_attr, escape_xml, help_items_open};

/// Renders `help` as a complete MAML document.
#[must_use]
pub fn render_help(help: &HelpItems, options: RenderOptions) -> String {
    let mut writer = XmlWriter::new(options.line_ending);

    writer.line(XML_DECLARATION);
    writer.line(&help_items_open());
    writer.indent();
    for command in &help.commands {
        render_command(&mut writer, command);
    }
    writer.outdent();
    writer.line("</helpItems>");

    writer.finish()
}

fn render_command(writer: &mut XmlWriter, command: &Command) {
    writer.open("command:command");

    writer.open("command:details");
    writer.text_element("command:name", &command.details.name());
    render_paragraphs(writer, "maml:description", &command.details.synopsis);
    writer.text_element("command:verb", command.details.verb());
    writer.text_element("command:noun", command.details.noun());
    writer.close("command:details");

    render_paragraphs(writer, "maml:description", &command.description);
    render_container(writer, "command:syntax", &command.syntax, render_syntax_item);
    render_container(
        writer,
        "command:parameters",
        &command.parameters,
        render_parameter,
    );
    render_container(writer, "command:inputTypes", &command.input_types, |w, entry| {
        render_type_entry(w, "command:inputType", entry);
    });
    render_container(
        writer,
        "command:returnValues",
        &command.return_values,
        |w, entry| render_type_entry(w, "command:returnValue", entry),
    );
    if !command.alert_set.is_empty() {
        render_container(writer, "maml:alertSet", &command.alert_set, render_alert);
    }
    render_container(writer, "command:examples", &command.examples, render_example);
    if !command.related_links.is_empty() {
        render_container(
            writer,
            "maml:relatedLinks",
            &command.related_links,
            render_link,
        );
    }

    writer.close("command:command");
}

/// Writes `<tag>` around each rendered item, or `<tag />` when there are none.
fn render_container<T>(
    writer: &mut XmlWriter,
    tag: &str,
    items: &[T],
    mut render_item: impl FnMut(&mut XmlWriter, &T),
) {
    if items.is_empty() {
        writer.empty(tag);
        return;
    }
    writer.open(tag);
    for item in items {
        render_item(writer, item);
    }
    writer.close(tag);
}

fn render_paragraphs(writer: &mut XmlWriter, tag: &str, paragraphs: &[String]) {
    render_container(writer, tag, paragraphs, |w, paragraph| {
        w.text_element("maml:para", paragraph);
    });
}

fn render_syntax_item(writer: &mut XmlWriter, item: &SyntaxItem) {
    writer.open("command:syntaxItem");
    writer.text_element("maml:name", &item.command_name);
    for parameter in &item.parameters {
        render_parameter(writer, parameter);
    }
    writer.close("command:syntaxItem");
}

fn render_parameter(writer: &mut XmlWriter, parameter: &Parameter) {
    writer.line(&format!(
        "<command:parameter required=\"{}\" globbing=\"{}\" pipelineInput=\"{}\" position=\"{}\">",
        bool_attr(parameter.is_mandatory),
        bool_attr(parameter.supports_globbing),
        parameter.pipeline_input.as_token(),
        parameter.position,
    ));
    writer.indent();
    writer.text_element("maml:name", &parameter.name);
    render_paragraphs(writer, "maml:description", &parameter.description);
    writer.line(&format!(
        "<command:parameterValue required=\"{}\" variableLength=\"{}\">{}</command:parameterValue>",
        bool_attr(parameter.value.is_mandatory),
        bool_attr(parameter.value.is_variable_length),
        escape_xml(&parameter.value.data_type),
    ));
    writer.close("command:parameter");
}

fn render_type_entry(writer: &mut XmlWriter, tag: &str, entry: &TypeEntry) {
    writer.open(tag);
    writer.open("dev:type");
    writer.text_element("maml:name", &entry.type_name);
    writer.text_element("maml:uri", &entry.uri);
    writer.close("dev:type");
    render_paragraphs(writer, "maml:description", &entry.description);
    writer.close(tag);
}

fn render_alert(writer: &mut XmlWriter, alert: &Alert) {
    render_paragraphs(writer, "maml:alert", &alert.paragraphs);
}

fn render_example(writer: &mut XmlWriter, example: &Example) {
    writer.open("command:example");
    writer.text_element("maml:title", &example.title);
    writer.text_element("dev:code", &example.code);
    render_paragraphs(writer, "dev:remarks", &example.remarks);
    writer.close("command:example");
}

fn render_link(writer: &mut XmlWriter, link: &NavigationLink) {
    writer.open("maml:navigationLink");
    writer.text_element("maml:linkText", &link.link_text);
    writer.text_element("maml:uri", &link.uri);
    writer.close("maml:navigationLink");
}
