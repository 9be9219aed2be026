use crate::models::Severity;

/// Compute a risk score as the product of a probability weight and an
/// impact weight, both in 1..=5. The result is in 1..=25.
///
/// Weights outside 1..=5 violate the rating-table contract and panic;
/// clamping would silently corrupt the score/severity invariant.
pub fn compute_score(probability_weight: u8, impact_weight: u8) -> u8 {
    assert!(
        (1..=5).contains(&probability_weight),
        "probability weight {probability_weight} outside 1..=5"
    );
    assert!(
        (1..=5).contains(&impact_weight),
        "impact weight {impact_weight} outside 1..=5"
    );
    probability_weight * impact_weight
}

/// Classify a risk score into its severity band.
///
/// The four bands tile 1..=25 with inclusive boundaries:
/// Low 1–5, Medium 6–15, High 16–20, Critical 21–25. Every view derives
/// its severity through this function, so the band boundaries live in
/// exactly one place.
pub fn classify(score: u8) -> Severity {
    match score {
        1..=5 => Severity::Low,
        6..=15 => Severity::Medium,
        16..=20 => Severity::High,
        21..=25 => Severity::Critical,
        _ => panic!("risk score {score} outside 1..=25"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_is_product() {
        for p in 1..=5u8 {
            for i in 1..=5u8 {
                assert_eq!(compute_score(p, i), p * i);
            }
        }
    }

    #[test]
    fn test_score_is_commutative() {
        for p in 1..=5u8 {
            for i in 1..=5u8 {
                assert_eq!(compute_score(p, i), compute_score(i, p));
            }
        }
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(classify(1), Severity::Low);
        assert_eq!(classify(5), Severity::Low);
        assert_eq!(classify(6), Severity::Medium);
        assert_eq!(classify(15), Severity::Medium);
        assert_eq!(classify(16), Severity::High);
        assert_eq!(classify(20), Severity::High);
        assert_eq!(classify(21), Severity::Critical);
        assert_eq!(classify(25), Severity::Critical);
    }

    #[test]
    fn test_bands_partition_full_domain() {
        for score in 1..=25u8 {
            // classify is total over 1..=25 — every score lands in
            // exactly one band, so this must not panic.
            let severity = classify(score);
            let expected = match score {
                1..=5 => Severity::Low,
                6..=15 => Severity::Medium,
                16..=20 => Severity::High,
                _ => Severity::Critical,
            };
            assert_eq!(severity, expected, "score {score}");
        }
    }

    #[test]
    fn test_high_scenario() {
        let score = compute_score(4, 5);
        assert_eq!(score, 20);
        assert_eq!(classify(score), Severity::High);
        assert_eq!(classify(score).alert(), "High Priority - Action Needed");
    }

    #[test]
    fn test_critical_scenario() {
        let score = compute_score(5, 5);
        assert_eq!(score, 25);
        assert_eq!(classify(score), Severity::Critical);
    }

    #[test]
    fn test_classify_is_idempotent() {
        for p in 1..=5u8 {
            for i in 1..=5u8 {
                let first = classify(compute_score(p, i));
                let second = classify(compute_score(p, i));
                assert_eq!(first, second);
            }
        }
    }

    #[test]
    #[should_panic(expected = "outside 1..=5")]
    fn test_out_of_domain_weight_panics() {
        compute_score(0, 3);
    }

    #[test]
    #[should_panic(expected = "outside 1..=5")]
    fn test_oversized_weight_panics() {
        compute_score(3, 6);
    }

    #[test]
    #[should_panic(expected = "outside 1..=25")]
    fn test_out_of_domain_score_panics() {
        classify(0);
    }

    #[test]
    #[should_panic(expected = "outside 1..=25")]
    fn test_oversized_score_panics() {
        classify(26);
    }
}
