//! CLI entrypoint for the fmtscan conformance harness.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use fmtscan_harness::builtin::builtin_fixtures;
use fmtscan_harness::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};
use fmtscan_harness::{ConformanceReport, FixtureSet, HarnessError, TestRunner};

/// Conformance tooling for fmtscan.
#[derive(Debug, Parser)]
#[command(name = "fmtscan-harness")]
#[command(about = "Conformance testing harness for fmtscan")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run fixture cases against the engines and report pass/fail.
    Verify {
        /// Fixture JSON file (defaults to the built-in set).
        #[arg(long)]
        fixture: Option<PathBuf>,
        /// Output report path (markdown).
        #[arg(long)]
        report: Option<PathBuf>,
        /// Output report path (JSON).
        #[arg(long)]
        report_json: Option<PathBuf>,
        /// Structured JSONL log path.
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// List fixture case names.
    List {
        /// Fixture JSON file (defaults to the built-in set).
        #[arg(long)]
        fixture: Option<PathBuf>,
    },
    /// Write the built-in fixture set as JSON.
    ExportBuiltin {
        /// Output path (prints to stdout if omitted).
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(all_passed) => {
            if all_passed {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<bool, HarnessError> {
    match cli.command {
        Command::Verify {
            fixture,
            report,
            report_json,
            log,
        } => {
            let set = load_set(fixture)?;
            let summary = TestRunner::new().run(&set);

            if let Some(path) = log {
                let file = fs::File::create(path)?;
                let mut emitter = LogEmitter::new(file);
                for result in &summary.results {
                    let outcome = if result.passed {
                        Outcome::Pass
                    } else {
                        Outcome::Fail
                    };
                    let level = if result.passed {
                        LogLevel::Info
                    } else {
                        LogLevel::Error
                    };
                    emitter.emit(
                        &LogEntry::new(level, "case_verified")
                            .with_case(result.case_name.clone())
                            .with_outcome(outcome),
                    )?;
                }
            }

            let conformance = ConformanceReport::new(set.family.clone(), summary);
            if let Some(path) = report {
                fs::write(path, conformance.to_markdown())?;
            }
            if let Some(path) = report_json {
                fs::write(path, conformance.to_json()?)?;
            }

            println!(
                "{}: {} cases, {} passed, {} failed",
                conformance.family, conformance.total, conformance.passed, conformance.failed
            );
            for result in conformance.summary.results.iter().filter(|r| !r.passed) {
                println!("FAIL {}", result.case_name);
                println!("  expected: {}", result.expected);
                println!("  actual:   {}", result.actual);
            }
            Ok(conformance.failed == 0)
        }
        Command::List { fixture } => {
            let set = load_set(fixture)?;
            for case in &set.cases {
                println!("{}", case.name);
            }
            Ok(true)
        }
        Command::ExportBuiltin { output } => {
            let json = builtin_fixtures().to_json()?;
            match output {
                Some(path) => fs::write(path, json)?,
                None => println!("{json}"),
            }
            Ok(true)
        }
    }
}

fn load_set(fixture: Option<PathBuf>) -> Result<FixtureSet, HarnessError> {
    match fixture {
        Some(path) => FixtureSet::from_file(&path),
        None => Ok(builtin_fixtures()),
    }
}
