use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, ContentArrangement, Table};

use crate::models::{Risk, Severity};
use crate::report::severity_color;

/// Render the analysis view for a single risk: details, ratings, score,
/// and the severity alert banner.
pub fn render(risk: &Risk) -> Result<()> {
    println!(
        "\n {} {} — {}",
        "Risk Analysis".bold(),
        risk.code.cyan().bold(),
        risk.title
    );
    println!();

    let mut details = Table::new();
    details
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    details.add_row(vec![
        Cell::new("Severity").add_attribute(Attribute::Bold),
        Cell::new(risk.severity.label()).fg(severity_color(risk.severity)),
    ]);
    details.add_row(vec![
        Cell::new("Description").add_attribute(Attribute::Bold),
        Cell::new(&risk.description),
    ]);
    details.add_row(vec![
        Cell::new("Probability").add_attribute(Attribute::Bold),
        Cell::new(format!(
            "{} — {} ({})",
            risk.probability.weight, risk.probability.name, risk.frequency_description
        )),
    ]);
    details.add_row(vec![
        Cell::new("Impact").add_attribute(Attribute::Bold),
        Cell::new(format!(
            "{} — {} ({})",
            risk.impact.weight, risk.impact.name, risk.impact_description
        )),
    ]);
    details.add_row(vec![
        Cell::new("Impact weight").add_attribute(Attribute::Bold),
        Cell::new(risk.impact_weight.to_string()),
    ]);
    details.add_row(vec![
        Cell::new("Risk score").add_attribute(Attribute::Bold),
        Cell::new(format!(
            "{}  (probability × impact)",
            risk.risk_score
        ))
        .add_attribute(Attribute::Bold),
    ]);
    details.add_row(vec![
        Cell::new("Created").add_attribute(Attribute::Bold),
        Cell::new(risk.created_at.to_string()),
    ]);
    details.add_row(vec![
        Cell::new("Updated").add_attribute(Attribute::Bold),
        Cell::new(risk.updated_at.to_string()),
    ]);
    println!("{}", details);

    // Alert banner
    let banner = format!(
        " {}  {} — risk {} requires {} attention ",
        "▲",
        risk.severity.alert(),
        risk.code,
        risk.severity.label().to_lowercase()
    );
    let painted = match risk.severity {
        Severity::Low => banner.black().on_green(),
        Severity::Medium => banner.black().on_yellow(),
        Severity::High => banner.white().on_magenta().bold(),
        Severity::Critical => banner.white().on_red().bold(),
    };
    println!("\n{}\n", painted);

    Ok(())
}
