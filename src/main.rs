//! `risk-registr` — load a cybersecurity risk register, score every entry,
//! and render dashboard views.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config ([`config::load_config`]).
//! 3. Locate the register file ([`detector::detect_register`]).
//! 4. Load draft entries ([`register`]), falling back to the built-in samples.
//! 5. Validate, score, and classify each entry ([`register::build_risks`]).
//! 6. Render the requested view ([`report`]).
//! 7. Exit `0` (clean) or `1` (at least one [`models::Severity::Critical`] risk).

mod cli;
mod config;
mod detector;
mod models;
mod register;
mod report;
mod scoring;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use cli::{Cli, ReportFormat};
use config::load_config;
use detector::detect_register;
use models::Severity;
use scoring::stats::aggregate;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Resolve register path
    let path = cli
        .path
        .canonicalize()
        .unwrap_or_else(|_| cli.path.clone());

    let config = load_config(&path, cli.config.as_deref())?;

    // Locate the register: the CLI path first, then the configured file
    let located = detect_register(&path)
        .or_else(|| config.register.file.as_deref().and_then(detect_register));

    let seed_allowed = config.register.seed && !cli.no_seed;

    let (drafts, register_label) = match located {
        Some((file, format)) => {
            let drafts = format.load(&file)?;
            if !cli.quiet {
                eprintln!(
                    "  {} {} {} entries",
                    "→".cyan(),
                    file.display(),
                    drafts.len()
                );
            }
            (drafts, file.display().to_string())
        }
        None if seed_allowed => {
            if !cli.quiet {
                eprintln!(
                    "  {} no register file found; using built-in sample risks",
                    "→".cyan()
                );
            }
            (register::seed::sample_drafts(), "built-in samples".to_string())
        }
        None => {
            eprintln!(
                "No register file (risks.toml / risks.json) found in {}",
                path.display()
            );
            std::process::exit(1);
        }
    };

    // Score and classify at append time — never from values stored in the file
    let risks = register::build_risks(drafts)?;

    // Resolve effective view: --pdf implies the PDF report
    let report_format = match &cli.pdf {
        Some(_) => ReportFormat::Pdf,
        None => cli.report,
    };
    let pdf_path = cli
        .pdf
        .unwrap_or_else(|| std::path::PathBuf::from("risk-report.pdf"));

    match report_format {
        ReportFormat::Summary => {
            report::terminal::render(
                &risks,
                &register_label,
                cli.worst,
                config.report.worst_limit,
                cli.verbose,
                cli.quiet,
            )?;
        }
        ReportFormat::Matrix => {
            report::matrix::render(&risks, cli.quiet)?;
        }
        ReportFormat::Analysis => {
            let codes = || {
                risks
                    .iter()
                    .map(|r| r.code.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            let Some(code) = cli.risk.as_deref() else {
                eprintln!("The analysis view needs --risk CODE. Registered codes: {}", codes());
                std::process::exit(1);
            };
            let Some(risk) = risks.iter().find(|r| r.code == code) else {
                eprintln!("No risk with code {code}. Registered codes: {}", codes());
                std::process::exit(1);
            };
            report::analysis::render(risk)?;
        }
        ReportFormat::Json => {
            let statistics = aggregate(&risks);
            let payload = serde_json::json!({
                "statistics": statistics,
                "risks": risks,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        ReportFormat::Pdf => {
            report::pdf::render(&risks, &register_label, &pdf_path)?;
        }
    }

    // Exit code: 1 if the register holds any critical risk
    let has_critical = risks.iter().any(|r| r.severity == Severity::Critical);

    if has_critical {
        std::process::exit(1);
    }

    Ok(())
}
