//! Golden tests for generated MAML help, through the binary and the library.
#![allow(
    unfulfilled_lint_expectations,
    reason = "clippy::expect_used is denied globally; tests may not hit those branches"
)]
#![expect(
    clippy::expect_used,
    reason = "tests panic to surface fixture mistakes"
)]

#[path = "../common/mod.rs"]
#[expect(dead_code, reason = "each test target uses a subset of the shared helpers")]
mod common;

use camino::Utf8PathBuf;
use common::{ModuleFixture, TestResult, abstract_command, bare_command, greeting_command};
use mamlgen::{GenerateConfig, LineEnding, OutputTarget, parse_help, run_gen_help};
use rstest::{fixture, rstest};
use serde_json::json;
use test_helpers::text::normalise_newlines;

const GREETING_GOLDEN: &str = include_str!("greeting-help.xml.golden");
const FOOBAR_GOLDEN: &str = include_str!("foobar-help.xml.golden");
const BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

#[fixture]
fn greeting_module() -> ModuleFixture {
    let fixture = ModuleFixture::new().expect("create fixture dir");
    fixture
        .write_manifest("Demo.Greeting", &[greeting_command()])
        .expect("write manifest");
    fixture
}

/// A module exercising every optional section, a second parameter set, a
/// plain helper type, and documentation comments beside the manifest.
#[fixture]
fn foo_bar_module() -> ModuleFixture {
    let fixture = ModuleFixture::new().expect("create fixture dir");
    let get_foo_bar = json!({
        "full_name": "Demo.FooBar.GetFooBarCommand",
        "derives_command_base": true,
        "command": { "verb": "Get", "noun": "FooBar" },
        "output_types": ["Demo.FooBar.FooBar"],
        "help": {
            "synopsis": "Retrieve one or more FooBars.",
            "examples": [{
                "title": "  Example 1: list FooBars ",
                "code": "Get-FooBar -Path *",
                "remarks": "Lists every FooBar."
            }],
            "notes": ["Requires a FooBar store."],
            "links": [{ "text": "Online version", "uri": "https://example.com/foobar" }]
        },
        "properties": [
            {
                "name": "Path",
                "value_type": "System.String[]",
                "supports_wildcards": true,
                "parameters": [{
                    "position": 0,
                    "value_from_pipeline": true,
                    "value_from_pipeline_by_property_name": true
                }]
            },
            {
                "name": "Name",
                "value_type": "System.String",
                "parameters": [{
                    "mandatory": true,
                    "parameter_set_name": "ByName",
                    "help_message": "Name of the FooBar."
                }]
            },
            { "name": "Cache", "value_type": "System.Object" }
        ]
    });
    fixture
        .write_manifest(
            "Demo.FooBar",
            &[
                get_foo_bar,
                json!({ "full_name": "Demo.FooBar.FooBar" }),
                bare_command("Demo.FooBar.ClearFooBarCommand", "Clear", "FooBar"),
            ],
        )
        .expect("write manifest");
    fixture
        .write_docs(
            "Demo.FooBar",
            &[
                (
                    "T:Demo.FooBar.GetFooBarCommand",
                    "<summary>Ignored: the inline synopsis wins.</summary>\
                     <remarks>\n      Lists FooBars from the store &amp; its cache.\n    </remarks>",
                ),
                (
                    "P:Demo.FooBar.GetFooBarCommand.Path",
                    "<summary>Paths to search.</summary>",
                ),
            ],
        )
        .expect("write docs");
    fixture
}

fn stdout_text(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_text(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[rstest]
fn cli_writes_crlf_help_beside_the_manifest(greeting_module: ModuleFixture) -> TestResult {
    let output = greeting_module.run(&["gen-help", "Demo.Greeting.json"])?;
    assert!(output.status.success(), "stderr: {}", stderr_text(&output));
    assert!(output.stdout.is_empty());

    let written = greeting_module.read("Demo.Greeting.json-Help.xml")?;
    assert!(!written.starts_with(BOM));
    let text = String::from_utf8(written)?;
    assert!(text.ends_with("</helpItems>\r\n"));
    assert!(!text.replace("\r\n", "").contains('\n'));
    assert_eq!(normalise_newlines(&text), GREETING_GOLDEN);
    Ok(())
}

#[rstest]
fn cli_streams_to_stdout_without_a_bom(greeting_module: ModuleFixture) -> TestResult {
    let output = greeting_module.run(&[
        "gen-help",
        "Demo.Greeting.json",
        "-",
        "--line-ending",
        "lf",
        "--bom",
    ])?;
    assert!(output.status.success(), "stderr: {}", stderr_text(&output));
    assert_eq!(stdout_text(&output), GREETING_GOLDEN);
    Ok(())
}

#[rstest]
fn cli_prefixes_files_with_a_bom_on_request(greeting_module: ModuleFixture) -> TestResult {
    let output =
        greeting_module.run(&["gen-help", "Demo.Greeting.json", "out/help.xml", "--bom"])?;
    assert!(output.status.success(), "stderr: {}", stderr_text(&output));

    let written = greeting_module.read("out/help.xml")?;
    assert!(written.starts_with(BOM));
    assert_eq!(normalise_newlines(&String::from_utf8(written)?), GREETING_GOLDEN);
    Ok(())
}

#[rstest]
fn configuration_file_supplies_defaults(greeting_module: ModuleFixture) -> TestResult {
    greeting_module.write("mamlgen.toml", "output = \"-\"\nline_ending = \"lf\"\n")?;
    let output = greeting_module.run(&["gen-help", "Demo.Greeting.json"])?;
    assert!(output.status.success(), "stderr: {}", stderr_text(&output));
    assert_eq!(stdout_text(&output), GREETING_GOLDEN);
    Ok(())
}

#[rstest]
fn library_run_renders_every_section(foo_bar_module: ModuleFixture) -> TestResult {
    let config = GenerateConfig {
        module: Some(foo_bar_module.root().join("Demo.FooBar.json")),
        output: Some("-".to_owned()),
        line_ending: LineEnding::Lf,
        ..GenerateConfig::default()
    };
    let mut stdout = Vec::new();

    let target = run_gen_help(&config, &mut stdout)?;

    assert_eq!(target, OutputTarget::Stdout);
    let text = String::from_utf8(stdout)?;
    assert_eq!(text, FOOBAR_GOLDEN);
    let parsed = parse_help(&text)?;
    let names: Vec<String> = parsed.commands.iter().map(|c| c.details.name()).collect();
    assert_eq!(names, vec!["Get-FooBar", "Clear-FooBar"]);
    Ok(())
}

#[rstest]
fn library_run_returns_the_default_file(foo_bar_module: ModuleFixture) -> TestResult {
    let module = foo_bar_module.root().join("Demo.FooBar.json");
    let config = GenerateConfig {
        module: Some(module.clone()),
        ..GenerateConfig::default()
    };
    let mut stdout = Vec::new();

    let target = run_gen_help(&config, &mut stdout)?;

    let expected = Utf8PathBuf::from(format!("{module}-Help.xml"));
    assert_eq!(target, OutputTarget::File(expected));
    assert!(stdout.is_empty());
    let written = foo_bar_module.read("Demo.FooBar.json-Help.xml")?;
    assert_eq!(normalise_newlines(&String::from_utf8(written)?), FOOBAR_GOLDEN);
    Ok(())
}

#[rstest]
fn ineligible_commands_abort_unless_skipped(greeting_module: ModuleFixture) -> TestResult {
    greeting_module.write_manifest("Demo.Mixed", &[greeting_command(), abstract_command()])?;

    let aborted = greeting_module.run(&["gen-help", "Demo.Mixed.json", "-"])?;
    assert!(!aborted.status.success());
    assert!(aborted.stdout.is_empty());
    assert!(stderr_text(&aborted).contains(
        "'Demo.Broken.GetBrokenCommand' does not implement a command: type is abstract"
    ));

    let skipped = greeting_module.run(&[
        "gen-help",
        "Demo.Mixed.json",
        "-",
        "--on-invalid",
        "skip",
    ])?;
    assert!(skipped.status.success(), "stderr: {}", stderr_text(&skipped));
    let help = parse_help(&stdout_text(&skipped))?;
    let names: Vec<String> = help.commands.iter().map(|c| c.details.name()).collect();
    assert_eq!(names, vec!["Get-Greeting"]);
    assert!(stderr_text(&skipped).contains("skipping invalid command"));
    Ok(())
}

#[rstest]
fn partial_loads_list_every_failure() -> TestResult {
    let fixture = ModuleFixture::new()?;
    fixture.write_manifest(
        "Demo.Partial",
        &[
            greeting_command(),
            json!({ "full_name": "Demo.Partial.Bad", "is_public": "yes" }),
            json!({ "is_class": true }),
        ],
    )?;

    let output = fixture.run(&["gen-help", "Demo.Partial.json"])?;

    assert!(!output.status.success());
    let stderr = stderr_text(&output);
    let lines: Vec<&str> = stderr.lines().collect();
    let separator = "=".repeat(80);
    let position = lines
        .iter()
        .position(|line| *line == separator)
        .expect("separator line");
    let after: Vec<&str> = lines.iter().skip(position + 1).copied().collect();
    assert!(
        matches!(
            after.as_slice(),
            [first, second]
                if first.starts_with("types[1] (Demo.Partial.Bad):")
                    && second.starts_with("types[2]:")
        ),
        "unexpected failure listing: {after:?}"
    );
    assert!(stderr.contains("2 type(s) in Demo.Partial.json failed to load"));
    Ok(())
}

#[rstest]
fn missing_manifest_is_reported() -> TestResult {
    let fixture = ModuleFixture::new()?;
    let output = fixture.run(&["gen-help", "Absent.json"])?;
    assert!(!output.status.success());
    assert!(stderr_text(&output).starts_with("mamlgen: I/O error at Absent.json"));
    Ok(())
}
