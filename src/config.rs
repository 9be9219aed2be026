use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

/// Root configuration structure, deserialized from `.risk-registr/config.toml`.
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub register: RegisterConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Where the register comes from.
#[derive(Debug, Deserialize)]
pub struct RegisterConfig {
    /// Load the built-in sample risks when no register file is found.
    /// Defaults to `true`.
    #[serde(default = "default_seed")]
    pub seed: bool,
    /// Register file used when the CLI path does not contain one.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Report rendering preferences.
#[derive(Debug, Default, Deserialize)]
pub struct ReportConfig {
    /// Cap on the number of entries in the worst-risks listing.
    #[serde(default)]
    pub worst_limit: Option<usize>,
}

fn default_seed() -> bool {
    true
}

impl Default for RegisterConfig {
    fn default() -> Self {
        RegisterConfig { seed: true, file: None }
    }
}

impl Default for Config {
    /// Built-in defaults used when no config file is found: seed the
    /// sample register, no fixed register path, unlimited worst listing.
    fn default() -> Self {
        Config {
            register: RegisterConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.risk-registr/config.toml`
/// 3. `~/.config/risk-registr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        let content = std::fs::read_to_string(path)?;
        return Ok(toml::from_str(&content)?);
    }

    let project_config = project_path.join(".risk-registr").join("config.toml");
    if project_config.exists() {
        let content = std::fs::read_to_string(&project_config)?;
        return Ok(toml::from_str(&content)?);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("risk-registr").join("config.toml");
        if home_config.exists() {
            let content = std::fs::read_to_string(&home_config)?;
            return Ok(toml::from_str(&content)?);
        }
    }

    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.register.seed);
        assert!(config.register.file.is_none());
        assert!(config.report.worst_limit.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
[register]
seed = false
file = "registers/prod.toml"

[report]
worst_limit = 10
"#,
        )
        .unwrap();
        assert!(!config.register.seed);
        assert_eq!(
            config.register.file.as_deref(),
            Some(Path::new("registers/prod.toml"))
        );
        assert_eq!(config.report.worst_limit, Some(10));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: Config = toml::from_str("[report]\nworst_limit = 3\n").unwrap();
        assert!(config.register.seed);
        assert_eq!(config.report.worst_limit, Some(3));
    }

    #[test]
    fn test_load_config_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path(), None).unwrap();
        assert!(config.register.seed);
    }
}
