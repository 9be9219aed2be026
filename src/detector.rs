use std::path::{Path, PathBuf};

use crate::models::RiskDraft;
use crate::register::{json::JsonRegister, toml::TomlRegister, RegisterSource};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegisterFormat {
    Toml,
    Json,
}

impl RegisterFormat {
    pub fn loader(&self) -> Box<dyn RegisterSource> {
        match self {
            RegisterFormat::Toml => Box::new(TomlRegister::new()),
            RegisterFormat::Json => Box::new(JsonRegister::new()),
        }
    }

    pub fn load(&self, path: &Path) -> anyhow::Result<Vec<RiskDraft>> {
        self.loader().load(path)
    }
}

/// Locate the register for `path`.
///
/// A file path is classified by extension; a directory is probed for the
/// known register names, TOML first.
pub fn detect_register(path: &Path) -> Option<(PathBuf, RegisterFormat)> {
    if path.is_file() {
        let format = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => RegisterFormat::Toml,
            Some("json") => RegisterFormat::Json,
            _ => return None,
        };
        return Some((path.to_path_buf(), format));
    }

    let toml_path = path.join("risks.toml");
    if toml_path.exists() {
        return Some((toml_path, RegisterFormat::Toml));
    }

    let json_path = path.join("risks.json");
    if json_path.exists() {
        return Some((json_path, RegisterFormat::Json));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_in_directory_prefers_toml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("risks.toml"), "").unwrap();
        std::fs::write(dir.path().join("risks.json"), "{}").unwrap();

        let (path, format) = detect_register(dir.path()).unwrap();
        assert_eq!(format, RegisterFormat::Toml);
        assert_eq!(path, dir.path().join("risks.toml"));
    }

    #[test]
    fn test_detect_json_fallback() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("risks.json"), "{}").unwrap();

        let (_, format) = detect_register(dir.path()).unwrap();
        assert_eq!(format, RegisterFormat::Json);
    }

    #[test]
    fn test_detect_explicit_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("register.json");
        std::fs::write(&file, "{}").unwrap();

        let (path, format) = detect_register(&file).unwrap();
        assert_eq!(format, RegisterFormat::Json);
        assert_eq!(path, file);
    }

    #[test]
    fn test_detect_nothing_in_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(detect_register(dir.path()).is_none());
    }
}
