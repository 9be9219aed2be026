use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use crate::models::{Risk, Severity};
use crate::report::severity_color;
use crate::scoring::stats::{aggregate, rank_worst};

/// Render the colored summary view.
pub fn render(
    risks: &[Risk],
    register_label: &str,
    worst_only: bool,
    worst_limit: Option<usize>,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let stats = aggregate(risks);

    if quiet {
        println!(
            "Total: {}  Critical: {}  High: {}  Medium: {}  Low: {}  Avg: {}",
            stats.total_risks,
            stats.critical_risks.to_string().red(),
            stats.high_risks.to_string().magenta(),
            stats.medium_risks.to_string().yellow(),
            stats.low_risks.to_string().green(),
            stats.average_risk_score,
        );
        return Ok(());
    }

    println!(
        "\n {} v{}",
        "risk-registr".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Register: {}\n", register_label);

    // Summary box
    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(
        " │  {:<48} │",
        format!("Total risks        : {}", stats.total_risks)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Critical        : {:>4}", "✗".red(), stats.critical_risks)
    );
    println!(
        " │  {:<48} │",
        format!("{}  High            : {:>4}", "⚠".magenta(), stats.high_risks)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Medium          : {:>4}", "●".yellow(), stats.medium_risks)
    );
    println!(
        " │  {:<48} │",
        format!("{}  Low             : {:>4}", "✓".green(), stats.low_risks)
    );
    println!(
        " │  {:<48} │",
        format!("Average risk score : {}", stats.average_risk_score)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if risks.is_empty() {
        println!(
            " {}",
            "No risks have been registered yet. Add entries to the register file to get started."
                .dimmed()
        );
        return Ok(());
    }

    if worst_only {
        let mut worst = rank_worst(risks);
        let total_worst = worst.len();
        if let Some(limit) = worst_limit {
            worst.truncate(limit);
        }

        if worst.is_empty() {
            println!(
                " {}",
                "No high or critical risks found. All risks are at acceptable levels.".green()
            );
            return Ok(());
        }

        println!(
            " {} Worst risks ({} of {}):\n",
            "[WORST]".red().bold(),
            worst.len(),
            total_worst
        );
        render_table(&worst, verbose);
        println!();
        return Ok(());
    }

    println!(" {} All risks ({}):\n", "[ALL]".cyan().bold(), risks.len());
    render_table(risks, verbose);
    println!();

    Ok(())
}

fn render_table(risks: &[Risk], verbose: bool) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![
        Cell::new("Code").add_attribute(Attribute::Bold),
        Cell::new("Title").add_attribute(Attribute::Bold),
        Cell::new("Probability").add_attribute(Attribute::Bold),
        Cell::new("Impact").add_attribute(Attribute::Bold),
        Cell::new("Score").add_attribute(Attribute::Bold),
        Cell::new("Severity").add_attribute(Attribute::Bold),
    ];
    if verbose {
        header.push(Cell::new("Description").add_attribute(Attribute::Bold));
    }
    table.set_header(header);

    for risk in risks {
        let score_cell = Cell::new(risk.risk_score.to_string())
            .set_alignment(CellAlignment::Right)
            .add_attribute(if risk.severity >= Severity::High {
                Attribute::Bold
            } else {
                Attribute::Dim
            });

        let mut row = vec![
            Cell::new(&risk.code),
            Cell::new(&risk.title),
            Cell::new(format!(
                "{} ({})",
                risk.probability.weight, risk.probability.name
            )),
            Cell::new(format!("{} ({})", risk.impact.weight, risk.impact.name)),
            score_cell,
            Cell::new(risk.severity.label()).fg(severity_color(risk.severity)),
        ];
        if verbose {
            row.push(Cell::new(&risk.description));
        }
        table.add_row(row);
    }

    println!("{}", table);
}
