//! Register loading: the form-submission side of the dashboard.
//!
//! - [`toml`] / [`json`] — parse a register file into [`RiskDraft`]s.
//! - [`seed`] — the built-in sample register used when no file is found.
//! - [`validate`] / [`build_risks`] — required-field checks and the only
//!   path that constructs [`Risk`] records, computing score and severity
//!   from the current level weights at append time.

use anyhow::{bail, Context, Result};
use uuid::Uuid;

use crate::models::{Risk, RiskDraft};
use crate::scoring::levels::level_by_id;
use crate::scoring::score::{classify, compute_score};
use crate::scoring::stats::next_code;

pub mod json;
pub mod seed;
pub mod toml;

pub trait RegisterSource {
    fn load(&self, path: &std::path::Path) -> Result<Vec<RiskDraft>>;
}

/// Reject a draft that would not pass the registration form.
///
/// The code may be omitted (it is assigned automatically), but every other
/// text field must be non-empty and the ratings must come from the fixed
/// 1..=5 table. These are recoverable input errors, not engine
/// preconditions.
pub fn validate(draft: &RiskDraft) -> Result<()> {
    if let Some(code) = &draft.code {
        if code.trim().is_empty() {
            bail!("risk code must not be blank when given");
        }
    }
    if draft.title.trim().is_empty() {
        bail!("risk title is required");
    }
    if draft.description.trim().is_empty() {
        bail!("risk description is required");
    }
    if draft.frequency_description.trim().is_empty() {
        bail!("frequency description is required");
    }
    if draft.impact_description.trim().is_empty() {
        bail!("impact description is required");
    }
    if !(1..=5).contains(&draft.probability) {
        bail!("probability rating {} outside 1..=5", draft.probability);
    }
    if !(1..=5).contains(&draft.impact) {
        bail!("impact rating {} outside 1..=5", draft.impact);
    }
    if !(1..=5).contains(&draft.impact_weight) {
        bail!("impact weight {} outside 1..=5", draft.impact_weight);
    }
    Ok(())
}

/// Build [`Risk`] records from validated drafts.
///
/// Score and severity are always derived here, from the ratings resolved
/// at this moment — never carried over from the input file — so the
/// `risk_score == probability.weight * impact.weight` and
/// `severity == classify(risk_score)` invariants hold for every risk that
/// leaves this function. Drafts without a code receive the next free
/// `R`-prefixed code.
pub fn build_risks(drafts: Vec<RiskDraft>) -> Result<Vec<Risk>> {
    let today = chrono::Local::now().date_naive();
    let mut risks = Vec::with_capacity(drafts.len());

    for (index, draft) in drafts.into_iter().enumerate() {
        validate(&draft).with_context(|| format!("register entry #{}", index + 1))?;

        // validate() guarantees both ids are in the table
        let probability = level_by_id(draft.probability)
            .with_context(|| format!("register entry #{}: unknown probability", index + 1))?;
        let impact = level_by_id(draft.impact)
            .with_context(|| format!("register entry #{}: unknown impact", index + 1))?;

        let risk_score = compute_score(probability.weight, impact.weight);
        let severity = classify(risk_score);

        let code = match draft.code {
            Some(code) => code,
            None => next_code(&risks),
        };
        let created_at = draft.created.unwrap_or(today);
        let updated_at = draft.updated.unwrap_or(created_at);

        risks.push(Risk {
            id: Uuid::new_v4().to_string(),
            code,
            title: draft.title,
            description: draft.description,
            probability,
            frequency_description: draft.frequency_description,
            impact,
            impact_description: draft.impact_description,
            impact_weight: draft.impact_weight,
            risk_score,
            severity,
            created_at,
            updated_at,
        });
    }

    Ok(risks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;

    fn draft(title: &str, probability: u8, impact: u8) -> RiskDraft {
        RiskDraft {
            code: None,
            title: title.to_string(),
            description: "A test risk".to_string(),
            probability,
            frequency_description: "Weekly".to_string(),
            impact,
            impact_description: "Service disruption".to_string(),
            impact_weight: impact,
            created: None,
            updated: None,
        }
    }

    #[test]
    fn test_validate_accepts_complete_draft() {
        assert!(validate(&draft("SQL Injection", 4, 5)).is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        let mut d = draft("X", 4, 5);
        d.title = "  ".to_string();
        assert!(validate(&d).is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_rating() {
        assert!(validate(&draft("X", 0, 5)).is_err());
        assert!(validate(&draft("X", 3, 6)).is_err());
        let mut d = draft("X", 3, 3);
        d.impact_weight = 0;
        assert!(validate(&d).is_err());
    }

    #[test]
    fn test_build_derives_score_and_severity() {
        let risks = build_risks(vec![draft("Phishing", 5, 4)]).unwrap();
        assert_eq!(risks[0].risk_score, 20);
        assert_eq!(risks[0].severity, Severity::High);
        assert_eq!(
            risks[0].risk_score,
            risks[0].probability.weight * risks[0].impact.weight
        );
    }

    #[test]
    fn test_build_assigns_codes_in_sequence() {
        let mut second = draft("B", 2, 2);
        second.code = Some("R007".to_string());
        let risks = build_risks(vec![draft("A", 1, 1), second, draft("C", 3, 3)]).unwrap();
        assert_eq!(risks[0].code, "R001");
        assert_eq!(risks[1].code, "R007");
        // Continues past the highest explicit code in the batch
        assert_eq!(risks[2].code, "R008");
    }

    #[test]
    fn test_build_keeps_independent_impact_weight() {
        let mut d = draft("Insider Threat", 2, 4);
        d.impact_weight = 2;
        let risks = build_risks(vec![d]).unwrap();
        // Score comes from the impact rating, not the user-chosen weight
        assert_eq!(risks[0].risk_score, 8);
        assert_eq!(risks[0].impact_weight, 2);
    }

    #[test]
    fn test_build_reports_entry_position_on_error() {
        let err = build_risks(vec![draft("A", 1, 1), draft("", 2, 2)])
            .unwrap_err()
            .to_string();
        assert!(err.contains("entry #2"), "unexpected error: {err}");
    }
}
