//! Shared helpers for `mamlgen` integration tests.

use std::error::Error;
use std::process::{Command, Output};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use mamlgen::text::LINE_SEPARATOR;
use serde_json::{Value, json};
use tempfile::TempDir;

/// Error type for integration test helpers.
pub type TestError = Box<dyn Error + Send + Sync>;

/// Result type for integration test helpers.
pub type TestResult<T = ()> = Result<T, TestError>;

/// Resolves the compiled `mamlgen` binary.
///
/// Nextest publishes the path at run time; cargo bakes it in at build time.
pub fn mamlgen_exe() -> Utf8PathBuf {
    std::env::var("NEXTEST_BIN_EXE_mamlgen").map_or_else(
        |_| Utf8PathBuf::from(env!("CARGO_BIN_EXE_mamlgen")),
        Utf8PathBuf::from,
    )
}

/// A scratch directory holding module manifests and sidecar documentation.
#[derive(Debug)]
pub struct ModuleFixture {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl ModuleFixture {
    /// Creates an empty fixture directory.
    pub fn new() -> TestResult<Self> {
        let dir = tempfile::tempdir()?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| format!("non-UTF-8 temp dir: {}", path.display()))?;
        Ok(Self { _dir: dir, root })
    }

    /// Returns the fixture directory.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Writes `contents` to `relative` and returns the absolute path.
    pub fn write(&self, relative: &str, contents: &str) -> TestResult<Utf8PathBuf> {
        let dir = Dir::open_ambient_dir(&self.root, ambient_authority())?;
        dir.write(relative, contents)?;
        Ok(self.root.join(relative))
    }

    /// Writes a manifest for `module` containing `types`.
    pub fn write_manifest(&self, module: &str, types: &[Value]) -> TestResult<Utf8PathBuf> {
        let manifest = json!({ "module": module, "types": types });
        self.write(&format!("{module}.json"), &serde_json::to_string_pretty(&manifest)?)
    }

    /// Writes the documentation comments file read for `module`'s manifest.
    pub fn write_docs(&self, module: &str, members: &[(&str, &str)]) -> TestResult<Utf8PathBuf> {
        let body: String = members
            .iter()
            .map(|(name, inner)| format!("    <member name=\"{name}\">{inner}</member>\n"))
            .collect();
        let doc = format!("<?xml version=\"1.0\"?>\n<doc>\n  <members>\n{body}  </members>\n</doc>\n");
        self.write(&format!("{module}.xml"), &doc)
    }

    /// Reads a file from the fixture directory.
    pub fn read(&self, relative: &str) -> TestResult<Vec<u8>> {
        let dir = Dir::open_ambient_dir(&self.root, ambient_authority())?;
        Ok(dir.read(relative)?)
    }

    /// Runs `mamlgen` from the fixture directory with `args`.
    pub fn run(&self, args: &[&str]) -> TestResult<Output> {
        Ok(Command::new(mamlgen_exe())
            .args(args)
            .current_dir(&self.root)
            .env_remove("RUST_LOG")
            .output()?)
    }
}

/// The `Get-Greeting` command: one mandatory string parameter.
pub fn greeting_command() -> Value {
    json!({
        "full_name": "Demo.Greeting.GetGreetingCommand",
        "derives_command_base": true,
        "command": { "verb": "Get", "noun": "Greeting" },
        "output_types": ["System.String"],
        "properties": [{
            "name": "Name",
            "value_type": "System.String",
            "parameters": [{
                "mandatory": true,
                "help_message": "The name of the person to greet"
            }]
        }]
    })
}

/// The `Get-FooBar` command with an inline synopsis and three-line
/// description.
pub fn foo_bar_command() -> Value {
    let description = [
        "  This command works with FooBars.",
        "It gets them.   ",
        "\tI don't really know how to make it any clearer than that.",
    ]
    .join(LINE_SEPARATOR);
    json!({
        "full_name": "Demo.FooBar.GetFooBarCommand",
        "derives_command_base": true,
        "command": { "verb": "Get", "noun": "FooBar" },
        "help": {
            "synopsis": "Retrieve one or more FooBars.",
            "description": description
        },
        "properties": []
    })
}

/// A command with neither inline help nor parameters.
pub fn bare_command(type_name: &str, verb: &str, noun: &str) -> Value {
    json!({
        "full_name": type_name,
        "derives_command_base": true,
        "command": { "verb": verb, "noun": noun }
    })
}

/// A type that claims to be a command but is abstract.
pub fn abstract_command() -> Value {
    json!({
        "full_name": "Demo.Broken.GetBrokenCommand",
        "is_abstract": true,
        "derives_command_base": true,
        "command": { "verb": "Get", "noun": "Broken" }
    })
}
