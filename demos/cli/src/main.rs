use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{info, warn};
use triage_core::{DiagnosticReport, InMemoryPatientStore, TriageConfig};
use triage_engine::TriageService;

#[derive(Parser, Debug)]
#[command(
    name = "triage-cli",
    about = "Rule-based triage of patient records stored as JSON."
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a single patient record.
    Analyze {
        /// Path to the patient record JSON file.
        #[arg(short, long)]
        input: PathBuf,
        /// Optional JSON file with config overrides.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Print the full report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Analyze every `*.json` record in a directory.
    Batch {
        #[arg(short, long)]
        dir: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Analyze {
            input,
            config,
            json,
        } => {
            let config = load_config(config.as_deref())?;
            let service = TriageService::new(InMemoryPatientStore::new(), config);
            let data = std::fs::read_to_string(&input)
                .with_context(|| format!("Could not read file {:?}", input))?;
            let submission = service
                .submit_str(&data)
                .with_context(|| format!("Could not analyze {:?}", input))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&submission.report)?);
            } else {
                print_report(&submission.report);
            }
        }
        Command::Batch { dir, config } => {
            let config = load_config(config.as_deref())?;
            let service = TriageService::new(InMemoryPatientStore::new(), config);
            let mut paths: Vec<PathBuf> = std::fs::read_dir(&dir)
                .with_context(|| format!("Could not read directory {:?}", dir))?
                .filter_map(|entry| entry.ok().map(|entry| entry.path()))
                .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
                .collect();
            paths.sort();

            let mut failures = 0usize;
            for path in &paths {
                let result = std::fs::read_to_string(path)
                    .with_context(|| format!("Could not read file {:?}", path))
                    .and_then(|data| {
                        service
                            .submit_str(&data)
                            .with_context(|| format!("Could not analyze {:?}", path))
                    });
                match result {
                    Ok(submission) => println!(
                        "{:<28} {:<9} findings: {:>2}  conditions: {:>2}",
                        submission.patient_id,
                        submission.report.overall_risk.as_str().to_uppercase(),
                        submission.report.findings.len(),
                        submission.report.possible_conditions.len()
                    ),
                    Err(err) => {
                        failures += 1;
                        warn!("{err:#}");
                        eprintln!("{}: {err:#}", path.display());
                    }
                }
            }

            info!(
                "batch finished: {} analyzed, {} failed",
                service.patients().len(),
                failures
            );
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<TriageConfig> {
    let Some(path) = path else {
        return Ok(TriageConfig::default());
    };
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read config {:?}", path))?;
    serde_json::from_str(&data).with_context(|| format!("Invalid config {:?}", path))
}

fn print_report(report: &DiagnosticReport) {
    println!("{}\n", report.summary);

    if !report.immediate_actions.is_empty() {
        println!("Immediate actions:");
        for action in &report.immediate_actions {
            println!("  - {action}");
        }
    }

    if !report.findings.is_empty() {
        println!("Findings:");
        for finding in &report.findings {
            println!(
                "  [{}] {}: {} (normal {}) - {}",
                finding.status.as_str().to_uppercase(),
                finding.parameter,
                finding.value,
                finding.normal_range,
                finding.interpretation
            );
        }
    }

    if !report.possible_conditions.is_empty() {
        println!("Possible conditions:");
        for inference in &report.possible_conditions {
            println!(
                "  {} (confidence {:?}, risk {})",
                inference.condition, inference.confidence, inference.risk
            );
            for note in &inference.notes {
                println!("    {note}");
            }
        }
    }

    if !report.follow_up_tests.is_empty() {
        println!("Follow-up tests:");
        for test in &report.follow_up_tests {
            println!("  - {test}");
        }
    }

    println!("Recommendations:");
    for line in &report.general_recommendations {
        println!("  - {line}");
    }
}
