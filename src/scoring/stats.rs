use crate::models::{Risk, RiskStatistics, Severity};

/// Aggregate the register into per-severity counts and an average score.
///
/// The average is rounded to 2 decimal places; an empty register yields
/// zero counts and an average of 0 rather than a division error.
pub fn aggregate(risks: &[Risk]) -> RiskStatistics {
    let mut critical_risks = 0;
    let mut high_risks = 0;
    let mut medium_risks = 0;
    let mut low_risks = 0;
    let mut score_sum: u32 = 0;

    for risk in risks {
        match risk.severity {
            Severity::Critical => critical_risks += 1,
            Severity::High => high_risks += 1,
            Severity::Medium => medium_risks += 1,
            Severity::Low => low_risks += 1,
        }
        score_sum += u32::from(risk.risk_score);
    }

    let average_risk_score = if risks.is_empty() {
        0.0
    } else {
        round2(f64::from(score_sum) / risks.len() as f64)
    };

    RiskStatistics {
        total_risks: risks.len(),
        critical_risks,
        high_risks,
        medium_risks,
        low_risks,
        average_risk_score,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The worst risks: Critical and High entries, descending by score.
///
/// The sort is stable, so equal-score risks keep their registration order.
pub fn rank_worst(risks: &[Risk]) -> Vec<Risk> {
    let mut worst: Vec<Risk> = risks
        .iter()
        .filter(|risk| risk.severity >= Severity::High)
        .cloned()
        .collect();
    worst.sort_by(|a, b| b.risk_score.cmp(&a.risk_score));
    worst
}

/// Derive the next free register code (`R001`-style).
///
/// Codes that do not parse as `R` followed by a number are ignored when
/// computing the current maximum, so a register of only non-conforming
/// codes starts over at `R001`. The zero padding widens naturally past
/// `R999`.
pub fn next_code(risks: &[Risk]) -> String {
    let max = risks
        .iter()
        .filter_map(|risk| risk.code.strip_prefix('R'))
        .filter_map(|suffix| suffix.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("R{:03}", max + 1)
}

/// Count risks per probability×impact cell for the 5×5 matrix view.
/// Indexed `[probability.weight - 1][impact.weight - 1]`.
pub fn matrix_counts(risks: &[Risk]) -> [[usize; 5]; 5] {
    let mut counts = [[0usize; 5]; 5];
    for risk in risks {
        let p = usize::from(risk.probability.weight) - 1;
        let i = usize::from(risk.impact.weight) - 1;
        counts[p][i] += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::levels::level_by_id;
    use crate::scoring::score::{classify, compute_score};
    use chrono::NaiveDate;

    fn sample(code: &str, probability_id: u8, impact_id: u8) -> Risk {
        let probability = level_by_id(probability_id).unwrap();
        let impact = level_by_id(impact_id).unwrap();
        let risk_score = compute_score(probability.weight, impact.weight);
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        Risk {
            id: code.to_string(),
            code: code.to_string(),
            title: format!("Risk {code}"),
            description: String::new(),
            probability,
            frequency_description: String::new(),
            impact,
            impact_description: String::new(),
            impact_weight: impact.weight,
            risk_score,
            severity: classify(risk_score),
            created_at: date,
            updated_at: date,
        }
    }

    #[test]
    fn test_aggregate_empty_register() {
        let stats = aggregate(&[]);
        assert_eq!(stats.total_risks, 0);
        assert_eq!(stats.average_risk_score, 0.0);
    }

    #[test]
    fn test_aggregate_counts_and_average() {
        // Scores 20, 20, 15, 8, 12 → mean 15.0
        let risks = vec![
            sample("R001", 4, 5),
            sample("R002", 5, 4),
            sample("R003", 3, 5),
            sample("R004", 2, 4),
            sample("R005", 3, 4),
        ];
        let stats = aggregate(&risks);
        assert_eq!(stats.total_risks, 5);
        assert_eq!(stats.critical_risks, 0);
        assert_eq!(stats.high_risks, 2);
        assert_eq!(stats.medium_risks, 3);
        assert_eq!(stats.low_risks, 0);
        assert_eq!(stats.average_risk_score, 15.0);
    }

    #[test]
    fn test_aggregate_rounds_to_two_decimals() {
        // Scores 20, 20, 15 → 55/3 = 18.333…
        let risks = vec![sample("R001", 4, 5), sample("R002", 5, 4), sample("R003", 3, 5)];
        assert_eq!(aggregate(&risks).average_risk_score, 18.33);
    }

    #[test]
    fn test_rank_worst_filters_and_sorts() {
        // Scores 20, 15, 8, 25, 16 → worst are 25, 20, 16
        let risks = vec![
            sample("R001", 4, 5),
            sample("R002", 3, 5),
            sample("R003", 2, 4),
            sample("R004", 5, 5),
            sample("R005", 4, 4),
        ];
        let worst = rank_worst(&risks);
        let scores: Vec<u8> = worst.iter().map(|r| r.risk_score).collect();
        assert_eq!(scores, vec![25, 20, 16]);
    }

    #[test]
    fn test_rank_worst_keeps_registration_order_on_ties() {
        let risks = vec![sample("R001", 4, 5), sample("R002", 5, 4)];
        let worst = rank_worst(&risks);
        assert_eq!(worst[0].code, "R001");
        assert_eq!(worst[1].code, "R002");
    }

    #[test]
    fn test_next_code_on_empty_register() {
        assert_eq!(next_code(&[]), "R001");
    }

    #[test]
    fn test_next_code_past_current_maximum() {
        let risks = vec![sample("R004", 1, 1), sample("R009", 1, 1)];
        assert_eq!(next_code(&risks), "R010");
    }

    #[test]
    fn test_next_code_ignores_non_conforming_codes() {
        let risks = vec![
            sample("AUDIT-7", 1, 1),
            sample("R2x", 1, 1),
            sample("R002", 1, 1),
        ];
        assert_eq!(next_code(&risks), "R003");
    }

    #[test]
    fn test_next_code_widens_past_999() {
        let risks = vec![sample("R999", 1, 1)];
        assert_eq!(next_code(&risks), "R1000");
    }

    #[test]
    fn test_matrix_counts() {
        let risks = vec![sample("R001", 4, 5), sample("R002", 4, 5), sample("R003", 1, 2)];
        let counts = matrix_counts(&risks);
        assert_eq!(counts[3][4], 2);
        assert_eq!(counts[0][1], 1);
        assert_eq!(counts[2][2], 0);
    }
}
