//! Configuration management

mod cli;
mod file;

pub use cli::{Cli, Command, PathArgs, SyncArgs};
pub use file::FileConfig;

use crate::guard::is_resolved_destination_invalid;
use crate::sync::{ExcludeFilter, SyncOptions};
use crate::types::{CaseSensitivity, DirectoryPath, SyncError};
use std::path::PathBuf;

/// Global configuration for treesync
#[derive(Debug, Clone)]
pub struct Config {
    /// Source directory
    pub source: PathBuf,

    /// Destination directory (created if missing)
    pub destination: PathBuf,

    /// How the path guard and run lock compare paths
    pub case_sensitivity: CaseSensitivity,

    /// Emit events for files that are already up to date
    pub report_skipped: bool,

    /// Exclude patterns (globs on entry names)
    pub exclude_patterns: Vec<String>,

    /// Only print errors and the final summary
    pub quiet: bool,

    /// Default tracing filter when RUST_LOG is not set
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            destination: PathBuf::new(),
            case_sensitivity: CaseSensitivity::default(),
            report_skipped: false,
            exclude_patterns: Vec::new(),
            quiet: false,
            log_level: "warn".to_string(),
        }
    }
}

/// Source and destination after validation
#[derive(Debug, Clone)]
pub struct ValidatedPaths {
    pub source: DirectoryPath,
    pub destination: DirectoryPath,
}

impl Config {
    /// Validate configuration before anything touches the filesystem
    ///
    /// Checks, in order: both paths are set, the source is an existing
    /// directory, both paths resolve, and the destination is neither the
    /// source nor inside it.
    pub fn validate(&self) -> Result<ValidatedPaths, SyncError> {
        if is_blank(&self.source) || is_blank(&self.destination) {
            return Err(SyncError::Validation(
                "Both a source and a destination directory are required".to_string(),
            ));
        }

        if !self.source.is_dir() {
            return Err(SyncError::SourceNotFound {
                path: self.source.clone(),
            });
        }

        let source = DirectoryPath::resolve(&self.source).map_err(|e| {
            SyncError::Validation(format!(
                "Cannot resolve source {}: {}",
                self.source.display(),
                e
            ))
        })?;
        let destination = DirectoryPath::resolve(&self.destination).map_err(|e| {
            SyncError::Validation(format!(
                "Cannot resolve destination {}: {}",
                self.destination.display(),
                e
            ))
        })?;

        if is_resolved_destination_invalid(&source, &destination, self.case_sensitivity) {
            return Err(SyncError::DestinationInsideSource {
                source_dir: source.into_path_buf(),
                destination: destination.into_path_buf(),
            });
        }

        Ok(ValidatedPaths {
            source,
            destination,
        })
    }

    /// Build the per-run options (compiles exclude patterns)
    pub fn sync_options(&self) -> Result<SyncOptions, SyncError> {
        Ok(SyncOptions {
            report_skipped: self.report_skipped,
            exclude: ExcludeFilter::new(&self.exclude_patterns)?,
            ..SyncOptions::default()
        })
    }
}

fn is_blank(path: &std::path::Path) -> bool {
    path.to_string_lossy().trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(source: PathBuf, destination: PathBuf) -> Config {
        Config {
            source,
            destination,
            ..Config::default()
        }
    }

    #[test]
    fn test_blank_paths_are_rejected() {
        let config = Config::default();
        assert!(matches!(config.validate(), Err(SyncError::Validation(_))));

        let temp = TempDir::new().expect("create temp dir");
        let config = config_for(temp.path().to_path_buf(), PathBuf::from("  "));
        assert!(matches!(config.validate(), Err(SyncError::Validation(_))));
    }

    #[test]
    fn test_missing_source_is_rejected() {
        let temp = TempDir::new().expect("create temp dir");
        let config = config_for(temp.path().join("nope"), temp.path().join("out"));
        assert!(matches!(
            config.validate(),
            Err(SyncError::SourceNotFound { .. })
        ));
    }

    #[test]
    fn test_source_that_is_a_file_is_rejected() {
        let temp = TempDir::new().expect("create temp dir");
        let file = temp.path().join("file.txt");
        fs::write(&file, b"x").expect("write");
        let config = config_for(file, temp.path().join("out"));
        assert!(matches!(
            config.validate(),
            Err(SyncError::SourceNotFound { .. })
        ));
    }

    #[test]
    fn test_nested_destination_is_rejected() {
        let temp = TempDir::new().expect("create temp dir");
        let config = config_for(temp.path().to_path_buf(), temp.path().join("backup"));
        assert!(matches!(
            config.validate(),
            Err(SyncError::DestinationInsideSource { .. })
        ));
    }

    #[test]
    fn test_nested_destination_spelled_through_parent_is_rejected() {
        let temp = TempDir::new().expect("create temp dir");
        fs::create_dir(temp.path().join("other")).expect("create other");
        let config = config_for(
            temp.path().to_path_buf(),
            temp.path().join("other/../backup"),
        );

        match config.validate() {
            Err(SyncError::DestinationInsideSource {
                source_dir,
                destination,
            }) => {
                assert!(destination.starts_with(&source_dir));
                assert!(destination.ends_with("backup"));
            }
            other => panic!("expected nested destination error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_pair_resolves() {
        let src = TempDir::new().expect("create src");
        let dst = TempDir::new().expect("create dst");
        let config = config_for(src.path().to_path_buf(), dst.path().join("mirror"));

        let paths = config.validate().expect("valid configuration");
        assert!(paths.destination.as_path().ends_with("mirror"));
        assert!(paths.source.as_path().is_absolute());
    }

    #[test]
    fn test_sync_options_reject_bad_glob() {
        let config = Config {
            exclude_patterns: vec!["[bad".to_string()],
            ..Config::default()
        };
        assert!(matches!(config.sync_options(), Err(SyncError::Config(_))));
    }
}
