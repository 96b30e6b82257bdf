//! Subcommand implementations.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use controls_core::registry::{Category, ControlKind, ControlSummary};
use controls_core::{ControlRegistry, ControlsConfig, Outcome, Scenario};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Text,
    Json,
}

pub const EXIT_OK: u8 = 0;
/// Exit status for a validator that rejected its input.
pub const EXIT_UNSAFE: u8 = 1;
/// Exit status for a remediation flow that refused its input.
pub const EXIT_REJECTED: u8 = 2;
/// Exit status for a malformed command line (sysexits `EX_USAGE`).
pub const EXIT_USAGE: u8 = 64;

#[derive(Serialize)]
struct RunReport<'a> {
    control: &'a str,
    kind: ControlKind,
    input: Option<&'a str>,
    outcome: Outcome,
}

#[derive(Serialize)]
struct RemediationReport<'a> {
    scenario: &'a str,
    accepted: bool,
    output: Option<String>,
    rejection: Option<String>,
}

pub fn load_config(path: Option<&Path>) -> Result<ControlsConfig> {
    match path {
        Some(path) => ControlsConfig::load(path)
            .with_context(|| format!("load config {}", path.display())),
        None => Ok(ControlsConfig::default()),
    }
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

pub fn list<W: Write>(
    out: &mut W,
    registry: &ControlRegistry,
    category: Option<&str>,
    output: Output,
) -> Result<u8> {
    let category = category.map(str::parse::<Category>).transpose()?;
    let summaries: Vec<ControlSummary> = registry
        .iter()
        .filter(|spec| category.map_or(true, |wanted| spec.category == wanted))
        .map(|spec| spec.summary())
        .collect();
    debug!(count = summaries.len(), "listing controls");

    match output {
        Output::Json => write_json(out, &summaries)?,
        Output::Text => {
            for summary in &summaries {
                writeln!(
                    out,
                    "{:<24} {:<10} {:<15} {}",
                    summary.name, summary.kind, summary.category, summary.description
                )?;
                writeln!(out, "    {}", summary.signature)?;
            }
        }
    }
    Ok(EXIT_OK)
}

pub fn run<W: Write>(
    out: &mut W,
    registry: &ControlRegistry,
    control: &str,
    input: Option<&str>,
    output: Output,
) -> Result<u8> {
    let spec = registry.lookup(control)?;
    let outcome = registry.apply(spec.name, input)?;
    let code = if outcome.is_rejection() { EXIT_UNSAFE } else { EXIT_OK };

    match output {
        Output::Json => write_json(
            out,
            &RunReport {
                control: spec.name,
                kind: spec.kind(),
                input,
                outcome,
            },
        )?,
        Output::Text => writeln!(out, "{}", outcome)?,
    }
    Ok(code)
}

pub fn scan<W: Write>(
    out: &mut W,
    registry: &ControlRegistry,
    input: Option<&str>,
    output: Output,
) -> Result<u8> {
    let results = registry.scan(input);
    let rejected = results.iter().filter(|(_, outcome)| outcome.is_rejection()).count();
    info!(controls = results.len(), rejected, "scan finished");

    match output {
        Output::Json => {
            let reports: Vec<RunReport<'_>> = results
                .into_iter()
                .map(|(spec, outcome)| RunReport {
                    control: spec.name,
                    kind: spec.kind(),
                    input,
                    outcome,
                })
                .collect();
            write_json(out, &reports)?;
        }
        Output::Text => {
            for (spec, outcome) in &results {
                writeln!(out, "{:<24} {}", spec.name, outcome)?;
            }
        }
    }
    Ok(EXIT_OK)
}

pub fn remediate<W: Write>(
    out: &mut W,
    scenario: &str,
    values: &[String],
    output: Output,
) -> Result<u8> {
    let scenario: Scenario = scenario.parse()?;
    let args: Vec<&str> = values.iter().map(String::as_str).collect();
    let guarded = scenario
        .run(&args)
        .with_context(|| format!("expected values: {}", scenario.parameters().join(" ")))?;

    let code = if guarded.is_ok() { EXIT_OK } else { EXIT_REJECTED };

    match output {
        Output::Json => write_json(
            out,
            &RemediationReport {
                scenario: scenario.as_str(),
                accepted: guarded.is_ok(),
                rejection: guarded.as_ref().err().map(ToString::to_string),
                output: guarded.ok(),
            },
        )?,
        Output::Text => match guarded {
            Ok(value) => writeln!(out, "{}", value)?,
            Err(rejection) => writeln!(out, "Error: {}", rejection)?,
        },
    }
    Ok(code)
}

pub fn check_config<W: Write>(out: &mut W, config: &ControlsConfig, output: Output) -> Result<u8> {
    config.validate()?;
    match output {
        Output::Json => write_json(out, config)?,
        Output::Text => write!(out, "{}", toml::to_string_pretty(config)?)?,
    }
    Ok(EXIT_OK)
}

/// Prometheus text export. JSON output keeps stdout a single document, so
/// the export goes to `err` there.
pub fn metrics<W: Write, E: Write>(
    out: &mut W,
    err: &mut E,
    registry: &ControlRegistry,
    output: Output,
) -> Result<()> {
    let Some(metrics) = registry.metrics() else {
        return Ok(());
    };
    let export = metrics.export()?;
    match output {
        Output::Json => write!(err, "{}", export)?,
        Output::Text => write!(out, "{}", export)?,
    }
    Ok(())
}
