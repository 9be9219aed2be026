use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "risk-registr",
    about = "Register cybersecurity risks and assess probability/impact severity",
    version
)]
pub struct Cli {
    /// Register file, or directory containing risks.toml / risks.json
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Report view
    #[arg(long, default_value = "summary", value_name = "VIEW")]
    pub report: ReportFormat,

    /// Risk code to inspect in the analysis view
    #[arg(long, value_name = "CODE")]
    pub risk: Option<String>,

    /// Only show high and critical risks in the summary
    #[arg(long)]
    pub worst: bool,

    /// Config file [default: ./.risk-registr/config.toml, fallback ~/.config/risk-registr/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// PDF output path; use without value to default to risk-report.pdf
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = "risk-report.pdf")]
    pub pdf: Option<PathBuf>,

    /// Do not fall back to the built-in sample risks
    #[arg(long)]
    pub no_seed: bool,

    /// Show full descriptions in the summary table
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print the summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Summary,
    Matrix,
    Analysis,
    Json,
    Pdf,
}
