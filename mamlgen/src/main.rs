//! CLI entrypoint for `mamlgen`.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use mamlgen::cli::Args;
use mamlgen::{GenerateConfig, MamlgenError, run_gen_help};
use tracing_subscriber::EnvFilter;

const SEPARATOR_WIDTH: usize = 80;

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&mut io::stderr().lock(), &err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), MamlgenError> {
    let config = GenerateConfig::load(args.config.as_deref(), &args.overrides())?;
    init_tracing(&config.log_level);
    run_gen_help(&config, &mut io::stdout().lock())?;
    Ok(())
}

/// Installs a stderr subscriber; `RUST_LOG` takes precedence over `level`.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
    if let Err(err) = result {
        report_line(&mut io::stderr().lock(), &format!("mamlgen: logging disabled: {err}"));
    }
}

/// Writes the diagnostic dump for a failed run.
fn report(out: &mut dyn Write, err: &MamlgenError) {
    report_line(out, &format!("mamlgen: {err}"));
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        report_line(out, &format!("  caused by: {cause}"));
        source = cause.source();
    }
    if let MamlgenError::PartialLoad { failures, .. } = err {
        report_line(out, &"=".repeat(SEPARATOR_WIDTH));
        for failure in failures {
            report_line(out, &failure.to_string());
        }
    }
}

fn report_line(out: &mut dyn Write, line: &str) {
    // Best effort: stderr may already be closed.
    drop(writeln!(out, "{line}"));
}
