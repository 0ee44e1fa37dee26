//! Step definitions for `gen-help` behavioural tests.

use std::process::Output;

use mamlgen::maml::{Command, HelpItems, Parameter};
use mamlgen::parse_help;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, then, when};
use serde_json::Value;
use test_helpers::text::normalize_scalar;

use crate::common::{
    ModuleFixture, TestResult, abstract_command, bare_command, foo_bar_command, greeting_command,
};

const MODULE: &str = "Demo.Steps";

/// Scenario state for `gen-help` scenarios.
#[derive(Debug, Default, ScenarioState)]
pub struct GenHelpContext {
    pub types: Slot<Vec<Value>>,
    pub docs: Slot<Vec<(String, String)>>,
    pub fixture: Slot<ModuleFixture>,
    pub last_output: Slot<Output>,
}

/// Provides a clean context for `gen-help` scenarios.
#[fixture]
pub fn gen_help_context() -> GenHelpContext {
    GenHelpContext::default()
}

fn push_type(ctx: &GenHelpContext, ty: Value) {
    let mut types = ctx.types.with_ref(Clone::clone).unwrap_or_default();
    types.push(ty);
    ctx.types.set(types);
}

fn run(ctx: &GenHelpContext, extra: &[&str]) -> TestResult {
    let fixture = ModuleFixture::new()?;
    let types = ctx.types.with_ref(Clone::clone).unwrap_or_default();
    fixture.write_manifest(MODULE, &types)?;
    if let Some(docs) = ctx.docs.with_ref(Clone::clone) {
        let members: Vec<(&str, &str)> = docs
            .iter()
            .map(|(name, inner)| (name.as_str(), inner.as_str()))
            .collect();
        fixture.write_docs(MODULE, &members)?;
    }

    let manifest = format!("{MODULE}.json");
    let mut args = vec!["gen-help", manifest.as_str(), "-", "--line-ending", "lf"];
    args.extend_from_slice(extra);
    let output = fixture.run(&args)?;
    ctx.last_output.set(output);
    ctx.fixture.set(fixture);
    Ok(())
}

fn help(ctx: &GenHelpContext) -> TestResult<HelpItems> {
    let output = ctx
        .last_output
        .with_ref(Clone::clone)
        .ok_or("help should have been generated")?;
    if !output.status.success() {
        return Err(format!(
            "mamlgen failed: {}",
            String::from_utf8_lossy(&output.stderr)
        )
        .into());
    }
    Ok(parse_help(&String::from_utf8(output.stdout)?)?)
}

fn find_command(ctx: &GenHelpContext, name: &str) -> TestResult<Command> {
    let name = normalize_scalar(name);
    help(ctx)?
        .commands
        .into_iter()
        .find(|command| command.details.name() == name)
        .ok_or_else(|| format!("no help for command {name}").into())
}

fn find_parameter(
    ctx: &GenHelpContext,
    parameter: &str,
    command_name: &str,
) -> TestResult<Parameter> {
    let wanted = normalize_scalar(parameter);
    find_command(ctx, command_name)?
        .parameters
        .into_iter()
        .find(|candidate| candidate.name == wanted)
        .ok_or_else(|| format!("no parameter {wanted}").into())
}

#[given("a module containing the greeting command")]
fn greeting_module(gen_help_context: &GenHelpContext) {
    push_type(gen_help_context, greeting_command());
}

#[given("a module containing the FooBar command")]
fn foo_bar_module(gen_help_context: &GenHelpContext) {
    push_type(gen_help_context, foo_bar_command());
}

#[given("a module containing the FooBar command without an inline description")]
fn foo_bar_module_without_description(gen_help_context: &GenHelpContext) {
    let mut ty = foo_bar_command();
    if let Some(help) = ty.get_mut("help").and_then(Value::as_object_mut) {
        help.remove("description");
    }
    push_type(gen_help_context, ty);
}

#[given("a module containing a command {name} without parameters")]
fn bare_module(gen_help_context: &GenHelpContext, name: String) -> TestResult {
    let name = normalize_scalar(&name);
    let (verb, noun) = name
        .split_once('-')
        .ok_or_else(|| format!("{name} is not a verb-noun name"))?;
    let type_name = format!("{MODULE}.{verb}{noun}Command");
    push_type(gen_help_context, bare_command(&type_name, verb, noun));
    Ok(())
}

#[given("a module type claiming to be a command while abstract")]
fn abstract_type(gen_help_context: &GenHelpContext) {
    push_type(gen_help_context, abstract_command());
}

#[given("documentation comments give {type_name} the remarks {remarks}")]
fn documented_remarks(gen_help_context: &GenHelpContext, type_name: String, remarks: String) {
    let mut docs = gen_help_context
        .docs
        .with_ref(Clone::clone)
        .unwrap_or_default();
    docs.push((
        format!("T:{}", normalize_scalar(&type_name)),
        format!("<remarks>{}</remarks>", normalize_scalar(&remarks)),
    ));
    gen_help_context.docs.set(docs);
}

#[when("help is generated for the module")]
fn generate(gen_help_context: &GenHelpContext) -> TestResult {
    run(gen_help_context, &[])
}

#[when("help is generated for the module skipping invalid commands")]
fn generate_skipping(gen_help_context: &GenHelpContext) -> TestResult {
    run(gen_help_context, &["--on-invalid", "skip"])
}

#[then("the command {name} has {count} syntax items")]
fn syntax_item_count(gen_help_context: &GenHelpContext, name: String, count: usize) -> TestResult {
    assert_eq!(find_command(gen_help_context, &name)?.syntax.len(), count);
    Ok(())
}

#[then("the command {name} has {count} parameters")]
fn parameter_count(gen_help_context: &GenHelpContext, name: String, count: usize) -> TestResult {
    assert_eq!(find_command(gen_help_context, &name)?.parameters.len(), count);
    Ok(())
}

#[then("syntax item {index} of {name} lists parameters {names}")]
fn syntax_item_parameters(
    gen_help_context: &GenHelpContext,
    index: usize,
    name: String,
    names: String,
) -> TestResult {
    let command = find_command(gen_help_context, &name)?;
    let item = index
        .checked_sub(1)
        .and_then(|position| command.syntax.get(position))
        .ok_or_else(|| format!("no syntax item {index}"))?;
    let actual: Vec<&str> = item.parameters.iter().map(|p| p.name.as_str()).collect();
    let expected_names = normalize_scalar(&names);
    let expected: Vec<&str> = expected_names.split(',').map(str::trim).collect();
    assert_eq!(actual, expected);
    Ok(())
}

#[then("parameter {parameter_name} of {name} is required with type {data_type}")]
fn parameter_is_required(
    gen_help_context: &GenHelpContext,
    parameter_name: String,
    name: String,
    data_type: String,
) -> TestResult {
    let parameter = find_parameter(gen_help_context, &parameter_name, &name)?;
    assert!(parameter.is_mandatory);
    assert!(!parameter.supports_globbing);
    assert_eq!(parameter.value.data_type, normalize_scalar(&data_type));
    Ok(())
}

#[then("parameter {parameter_name} of {name} is described as {text}")]
fn parameter_description(
    gen_help_context: &GenHelpContext,
    parameter_name: String,
    name: String,
    text: String,
) -> TestResult {
    let parameter = find_parameter(gen_help_context, &parameter_name, &name)?;
    assert_eq!(parameter.description, vec![normalize_scalar(&text)]);
    Ok(())
}

#[then("the synopsis of {name} is {text}")]
fn synopsis(gen_help_context: &GenHelpContext, name: String, text: String) -> TestResult {
    let command = find_command(gen_help_context, &name)?;
    assert_eq!(command.details.synopsis, vec![normalize_scalar(&text)]);
    Ok(())
}

#[then("the description of {name} has {count} paragraphs")]
fn description_length(gen_help_context: &GenHelpContext, name: String, count: usize) -> TestResult {
    assert_eq!(find_command(gen_help_context, &name)?.description.len(), count);
    Ok(())
}

#[then("description paragraph {index} of {name} is {text}")]
fn description_paragraph(
    gen_help_context: &GenHelpContext,
    index: usize,
    name: String,
    text: String,
) -> TestResult {
    let command = find_command(gen_help_context, &name)?;
    let paragraph = index
        .checked_sub(1)
        .and_then(|position| command.description.get(position))
        .ok_or_else(|| format!("no description paragraph {index}"))?;
    assert_eq!(paragraph, &normalize_scalar(&text));
    Ok(())
}

#[then("generation fails mentioning {message}")]
fn generation_fails(gen_help_context: &GenHelpContext, message: String) -> TestResult {
    let output = gen_help_context
        .last_output
        .with_ref(Clone::clone)
        .ok_or("help should have been generated")?;
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(&normalize_scalar(&message)), "stderr: {stderr}");
    Ok(())
}

#[then("the help lists commands {names}")]
fn listed_commands(gen_help_context: &GenHelpContext, names: String) -> TestResult {
    let actual: Vec<String> = help(gen_help_context)?
        .commands
        .iter()
        .map(|command| command.details.name())
        .collect();
    let expected_names = normalize_scalar(&names);
    let expected: Vec<&str> = expected_names.split(',').map(str::trim).collect();
    assert_eq!(actual, expected);
    Ok(())
}
