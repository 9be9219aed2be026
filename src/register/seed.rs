use chrono::NaiveDate;

use crate::models::RiskDraft;

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Built-in sample register used when no register file is found, so a
/// fresh checkout renders a populated dashboard out of the box.
pub fn sample_drafts() -> Vec<RiskDraft> {
    vec![
        RiskDraft {
            code: Some("R001".to_string()),
            title: "SQL Injection Attack".to_string(),
            description: "Vulnerability in web application allowing malicious SQL queries \
                          to be executed against the database."
                .to_string(),
            probability: 4,
            frequency_description: "Weekly attempts detected".to_string(),
            impact: 5,
            impact_description: "Complete database compromise, data breach, regulatory fines"
                .to_string(),
            impact_weight: 5,
            created: date(2024, 1, 15),
            updated: date(2024, 1, 15),
        },
        RiskDraft {
            code: Some("R002".to_string()),
            title: "Phishing Campaign".to_string(),
            description: "Targeted email attacks attempting to steal credentials and install \
                          malware."
                .to_string(),
            probability: 5,
            frequency_description: "Daily phishing attempts".to_string(),
            impact: 4,
            impact_description: "Credential theft, unauthorized access, data exfiltration"
                .to_string(),
            impact_weight: 4,
            created: date(2024, 1, 10),
            updated: date(2024, 1, 10),
        },
        RiskDraft {
            code: Some("R003".to_string()),
            title: "Ransomware Attack".to_string(),
            description: "Malware that encrypts critical business data and demands payment \
                          for decryption."
                .to_string(),
            probability: 3,
            frequency_description: "Monthly threat intelligence reports".to_string(),
            impact: 5,
            impact_description: "Business disruption, data loss, financial impact".to_string(),
            impact_weight: 5,
            created: date(2024, 1, 5),
            updated: date(2024, 1, 5),
        },
        RiskDraft {
            code: Some("R004".to_string()),
            title: "Insider Threat".to_string(),
            description: "Malicious or negligent actions by employees with authorized access \
                          to systems."
                .to_string(),
            probability: 2,
            frequency_description: "Quarterly incidents".to_string(),
            impact: 4,
            impact_description: "Data theft, intellectual property loss, reputational damage"
                .to_string(),
            impact_weight: 4,
            created: date(2024, 1, 1),
            updated: date(2024, 1, 1),
        },
        RiskDraft {
            code: Some("R005".to_string()),
            title: "DDoS Attack".to_string(),
            description: "Distributed denial of service attacks targeting network \
                          infrastructure."
                .to_string(),
            probability: 4,
            frequency_description: "Weekly attack attempts".to_string(),
            impact: 3,
            impact_description: "Service disruption, temporary unavailability".to_string(),
            impact_weight: 3,
            created: date(2024, 1, 20),
            updated: date(2024, 1, 20),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;
    use crate::register::build_risks;

    #[test]
    fn test_samples_build_cleanly() {
        let risks = build_risks(sample_drafts()).unwrap();
        assert_eq!(risks.len(), 5);
        // SQL injection: 4×5 = 20 → High
        assert_eq!(risks[0].risk_score, 20);
        assert_eq!(risks[0].severity, Severity::High);
        // DDoS: 4×3 = 12 → Medium
        assert_eq!(risks[4].risk_score, 12);
        assert_eq!(risks[4].severity, Severity::Medium);
    }
}
