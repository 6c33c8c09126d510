//! Optional TOML configuration file

use crate::types::SyncError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Defaults read from a config file; command-line flags take precedence
///
/// ```toml
/// case_sensitive = false
/// show_skipped = true
/// exclude = ["*.tmp", "Thumbs.db"]
/// log_level = "info"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub case_sensitive: Option<bool>,
    pub show_skipped: Option<bool>,
    pub exclude: Vec<String>,
    pub log_level: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let text = fs::read_to_string(path).map_err(|e| {
            SyncError::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        Self::parse(&text).map_err(|e| match e {
            SyncError::Config(msg) => {
                SyncError::Config(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    pub fn parse(text: &str) -> Result<Self, SyncError> {
        toml::from_str(text).map_err(|e| SyncError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_file() {
        let config = FileConfig::parse(
            r#"
            case_sensitive = true
            show_skipped = true
            exclude = ["*.tmp", "cache"]
            log_level = "debug"
            "#,
        )
        .expect("parse");

        assert_eq!(config.case_sensitive, Some(true));
        assert_eq!(config.show_skipped, Some(true));
        assert_eq!(config.exclude, vec!["*.tmp".to_string(), "cache".to_string()]);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        assert_eq!(FileConfig::parse("").expect("parse"), FileConfig::default());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result = FileConfig::parse("delete = true");
        assert!(matches!(result, Err(SyncError::Config(_))));
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join("treesync.toml");
        match FileConfig::load(&path) {
            Err(SyncError::Config(msg)) => assert!(msg.contains("treesync.toml")),
            other => panic!("expected config error, got {:?}", other),
        }
    }
}
