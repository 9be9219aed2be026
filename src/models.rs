use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One of the five fixed ordinal ratings used for both the probability and
/// impact axes. Drawn from the static table in [`crate::scoring::levels`];
/// never constructed anywhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskLevel {
    pub id: u8,
    pub name: &'static str,
    pub weight: u8,
    pub description: &'static str,
    /// Presentation tag consumed by the report renderers.
    pub color: &'static str,
}

/// Severity band derived from a risk score. Ordered: Low < Medium < High < Critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Display label for dashboards and reports.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "Low Risk",
            Severity::Medium => "Medium Risk",
            Severity::High => "High Risk",
            Severity::Critical => "Critical Risk",
        }
    }

    /// Alert message shown when a risk of this severity is analyzed.
    pub fn alert(&self) -> &'static str {
        match self {
            Severity::Low => "Acceptable Risk",
            Severity::Medium => "Monitor Closely",
            Severity::High => "High Priority - Action Needed",
            Severity::Critical => "IMMEDIATE ACTION REQUIRED",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A registered risk with its derived score and severity.
///
/// Built only by [`crate::register::build_risks`], which computes
/// `risk_score` and `severity` from the current level weights at append
/// time. `impact_weight` is the user-chosen weighting from the form and is
/// carried through independently of `impact.weight`.
#[derive(Debug, Clone, Serialize)]
pub struct Risk {
    pub id: String,
    pub code: String,
    pub title: String,
    pub description: String,
    pub probability: RiskLevel,
    pub frequency_description: String,
    pub impact: RiskLevel,
    pub impact_description: String,
    pub impact_weight: u8,
    pub risk_score: u8,
    pub severity: Severity,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
}

/// A register entry as written by the user, before validation and scoring.
#[derive(Debug, Clone, Deserialize)]
pub struct RiskDraft {
    /// Register code (`R001`-style). Assigned automatically when omitted.
    #[serde(default)]
    pub code: Option<String>,
    pub title: String,
    pub description: String,
    /// Probability rating id (1..=5).
    pub probability: u8,
    #[serde(rename = "frequency")]
    pub frequency_description: String,
    /// Impact rating id (1..=5).
    pub impact: u8,
    #[serde(rename = "impact_note")]
    pub impact_description: String,
    pub impact_weight: u8,
    /// `YYYY-MM-DD` string; TOML registers must quote it.
    #[serde(default)]
    pub created: Option<NaiveDate>,
    #[serde(default)]
    pub updated: Option<NaiveDate>,
}

/// Aggregate statistics over the current register, recomputed on demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskStatistics {
    pub total_risks: usize,
    pub critical_risks: usize,
    pub high_risks: usize,
    pub medium_risks: usize,
    pub low_risks: usize,
    /// Mean risk score rounded to 2 decimals; 0 for an empty register.
    pub average_risk_score: f64,
}
