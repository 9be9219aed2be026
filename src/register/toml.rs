use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::RiskDraft;

#[derive(Debug, Deserialize)]
struct RegisterFile {
    #[serde(default, rename = "risk")]
    risks: Vec<RiskDraft>,
}

/// Loads a TOML register: an array of `[[risk]]` tables.
pub struct TomlRegister;

impl TomlRegister {
    pub fn new() -> Self {
        Self
    }
}

impl super::RegisterSource for TomlRegister {
    fn load(&self, path: &Path) -> Result<Vec<RiskDraft>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read register {}", path.display()))?;
        let file: RegisterFile = toml::from_str(&content)
            .with_context(|| format!("Malformed register {}", path.display()))?;
        Ok(file.risks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_register() {
        let content = r#"
[[risk]]
code = "R001"
title = "SQL Injection Attack"
description = "Malicious SQL executed against the database."
probability = 4
frequency = "Weekly attempts detected"
impact = 5
impact_note = "Complete database compromise"
impact_weight = 5
created = "2024-01-15"

[[risk]]
title = "Phishing Campaign"
description = "Targeted credential-stealing emails."
probability = 5
frequency = "Daily phishing attempts"
impact = 4
impact_note = "Credential theft"
impact_weight = 4
"#;

        let file: RegisterFile = toml::from_str(content).unwrap();
        assert_eq!(file.risks.len(), 2);
        assert_eq!(file.risks[0].code.as_deref(), Some("R001"));
        assert_eq!(file.risks[0].probability, 4);
        assert!(file.risks[0].created.is_some());
        // Second entry has no code — assigned later by build_risks
        assert!(file.risks[1].code.is_none());
        assert_eq!(file.risks[1].impact_weight, 4);
    }

    #[test]
    fn test_empty_register_is_valid() {
        let file: RegisterFile = toml::from_str("").unwrap();
        assert!(file.risks.is_empty());
    }
}
