mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use commands::{Output, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "controls", version, about = "Run security validators and sanitizers")]
struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Print prometheus counters after the command
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the registered controls
    List {
        #[arg(long)]
        category: Option<String>,
    },
    /// Apply one control; omit INPUT to pass an absent value
    Run {
        control: String,
        #[arg(allow_hyphen_values = true)]
        input: Option<String>,
    },
    /// Apply every enabled control to one input
    Scan {
        #[arg(allow_hyphen_values = true)]
        input: Option<String>,
    },
    /// Run a guarded flow, e.g. `remediate sql-combined alice pw`
    Remediate {
        scenario: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        values: Vec<String>,
    },
    /// Load and validate the config, then print it
    CheckConfig,
}

fn main() -> Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            err.print()?;
            let code = if err.use_stderr() { EXIT_USAGE } else { 0 };
            return Ok(ExitCode::from(code));
        }
    };

    let mut config = commands::load_config(cli.config.as_deref())?;
    if cli.metrics {
        config.metrics.enabled = true;
    }
    controls_core::observability::setup_logging(&config.logging);

    let registry = config.build_registry()?;
    let output = if cli.json { Output::Json } else { Output::Text };
    let mut out = io::stdout().lock();

    let code = match cli.command {
        Command::List { category } => commands::list(&mut out, &registry, category.as_deref(), output)?,
        Command::Run { control, input } => {
            commands::run(&mut out, &registry, &control, input.as_deref(), output)?
        }
        Command::Scan { input } => commands::scan(&mut out, &registry, input.as_deref(), output)?,
        Command::Remediate { scenario, values } => {
            commands::remediate(&mut out, &scenario, &values, output)?
        }
        Command::CheckConfig => commands::check_config(&mut out, &config, output)?,
    };

    commands::metrics(&mut out, &mut io::stderr(), &registry, output)?;

    Ok(ExitCode::from(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("controls").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_run_accepts_hyphen_leading_input() {
        match parse(&["run", "is_numeric", "-42"]).command {
            Command::Run { control, input } => {
                assert_eq!(control, "is_numeric");
                assert_eq!(input.as_deref(), Some("-42"));
            }
            _ => panic!("expected run"),
        }
        match parse(&["run", "sanitize_sql_input", "-xp_-"]).command {
            Command::Run { input, .. } => assert_eq!(input.as_deref(), Some("-xp_-")),
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_scan_accepts_hyphen_leading_input() {
        match parse(&["scan", "-1 OR 1=1"]).command {
            Command::Scan { input } => assert_eq!(input.as_deref(), Some("-1 OR 1=1")),
            _ => panic!("expected scan"),
        }
    }

    #[test]
    fn test_remediate_accepts_hyphen_leading_values() {
        match parse(&["remediate", "sql-sanitized", "-x", "pw"]).command {
            Command::Remediate { scenario, values } => {
                assert_eq!(scenario, "sql-sanitized");
                assert_eq!(values, vec!["-x", "pw"]);
            }
            _ => panic!("expected remediate"),
        }
    }

    #[test]
    fn test_global_flags_before_subcommand() {
        let cli = parse(&["--json", "--metrics", "run", "is_numeric", "5"]);
        assert!(cli.json);
        assert!(cli.metrics);
    }

    #[test]
    fn test_usage_errors_do_not_collide_with_rejection() {
        let err = Cli::try_parse_from(["controls", "frobnicate"]).err().unwrap();
        assert!(err.use_stderr());
        assert_ne!(EXIT_USAGE, commands::EXIT_REJECTED);
        assert_ne!(EXIT_USAGE, commands::EXIT_UNSAFE);
    }
}
