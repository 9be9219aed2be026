use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::RiskDraft;

#[derive(Debug, Deserialize)]
struct RegisterFile {
    #[serde(default)]
    risks: Vec<RiskDraft>,
}

/// Loads a JSON register: `{ "risks": [ ... ] }`.
pub struct JsonRegister;

impl JsonRegister {
    pub fn new() -> Self {
        Self
    }
}

impl super::RegisterSource for JsonRegister {
    fn load(&self, path: &Path) -> Result<Vec<RiskDraft>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read register {}", path.display()))?;
        let file: RegisterFile = serde_json::from_str(&content)
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
{
  "risks": [
    {
      "code": "R003",
      "title": "Ransomware Attack",
      "description": "Malware encrypting critical business data.",
      "probability": 3,
      "frequency": "Monthly threat intelligence reports",
      "impact": 5,
      "impact_note": "Business disruption, data loss",
      "impact_weight": 5
    }
  ]
}
"#;

        let file: RegisterFile = serde_json::from_str(content).unwrap();
        assert_eq!(file.risks.len(), 1);
        assert_eq!(file.risks[0].code.as_deref(), Some("R003"));
        assert_eq!(file.risks[0].probability, 3);
        assert_eq!(file.risks[0].impact, 5);
    }

    #[test]
    fn test_empty_register_is_valid() {
        let file: RegisterFile = serde_json::from_str("{}").unwrap();
        assert!(file.risks.is_empty());
    }
}
