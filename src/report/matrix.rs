use anyhow::Result;
use colored::*;

use crate::models::{Risk, Severity};
use crate::scoring::score::{classify, compute_score};
use crate::scoring::stats::{aggregate, matrix_counts};

const CELL_W: usize = 10;

/// Render the 5×5 probability×impact grid.
///
/// Every cell shows the score for that weight pair and how many registered
/// risks sit in it; the cell color comes from classifying the score, so the
/// grid and the summary can never disagree about band boundaries.
pub fn render(risks: &[Risk], quiet: bool) -> Result<()> {
    let counts = matrix_counts(risks);
    let stats = aggregate(risks);

    if !quiet {
        println!("\n {}", "Risk Matrix — probability × impact".bold());
        println!(" Cell shows score · registered risks\n");
    }

    // Column headers
    print!("{:>9}", "");
    for impact in 1..=5u8 {
        print!("{:^w$}", format!("Impact {impact}"), w = CELL_W);
    }
    println!();

    for probability in 1..=5u8 {
        print!(" {:<8}", format!("Prob {probability}"));
        for impact in 1..=5u8 {
            let score = compute_score(probability, impact);
            let count = counts[usize::from(probability) - 1][usize::from(impact) - 1];
            let text = if count > 0 {
                format!("{:^w$}", format!("{score} · {count}"), w = CELL_W)
            } else {
                format!("{:^w$}", score, w = CELL_W)
            };
            print!("{}", paint_cell(&text, classify(score)));
        }
        println!();
    }

    if quiet {
        return Ok(());
    }

    // Legend
    println!();
    println!(
        "   {}  {}  {}  {}",
        paint_cell(" Low 1-5 ", Severity::Low),
        paint_cell(" Medium 6-15 ", Severity::Medium),
        paint_cell(" High 16-20 ", Severity::High),
        paint_cell(" Critical 21-25 ", Severity::Critical),
    );

    // Per-band totals
    println!(
        "\n   Critical: {}   High: {}   Medium: {}   Low: {}   Total: {}\n",
        stats.critical_risks.to_string().red().bold(),
        stats.high_risks.to_string().magenta().bold(),
        stats.medium_risks.to_string().yellow().bold(),
        stats.low_risks.to_string().green().bold(),
        stats.total_risks,
    );

    Ok(())
}

fn paint_cell(text: &str, severity: Severity) -> ColoredString {
    match severity {
        Severity::Low => text.black().on_green(),
        Severity::Medium => text.black().on_yellow(),
        Severity::High => text.white().on_magenta(),
        Severity::Critical => text.white().on_red(),
    }
}
