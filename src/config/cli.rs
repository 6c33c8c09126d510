//! Command-line interface definition

use super::{Config, FileConfig};
use crate::types::{CaseSensitivity, SyncError};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Mirror a directory tree: copy new and newer files, never delete
#[derive(Debug, Parser)]
#[command(name = "treesync", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Copy new and updated files from SOURCE into DEST
    Sync(SyncArgs),

    /// Only validate SOURCE and DEST (existence, nesting)
    Check(PathArgs),
}

#[derive(Debug, Clone, Args)]
pub struct PathArgs {
    /// Directory to copy from
    pub source: PathBuf,

    /// Directory to copy into (created if missing)
    pub destination: PathBuf,

    /// Compare paths case-sensitively when checking for nesting
    #[arg(long)]
    pub case_sensitive: bool,
}

#[derive(Debug, Clone, Args)]
pub struct SyncArgs {
    #[command(flatten)]
    pub paths: PathArgs,

    /// Also log files that are already up to date
    #[arg(long)]
    pub show_skipped: bool,

    /// Skip files and directories whose name matches this glob (repeatable)
    #[arg(short, long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Only print errors and the final summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Read defaults from a TOML file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Diagnostic log filter (overridden by RUST_LOG)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl From<PathArgs> for Config {
    fn from(args: PathArgs) -> Self {
        Config {
            source: args.source,
            destination: args.destination,
            case_sensitivity: CaseSensitivity::from_flag(args.case_sensitive),
            ..Config::default()
        }
    }
}

impl TryFrom<SyncArgs> for Config {
    type Error = SyncError;

    fn try_from(args: SyncArgs) -> Result<Self, Self::Error> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        let case_sensitive = args.paths.case_sensitive || file.case_sensitive.unwrap_or(false);
        let report_skipped = args.show_skipped || file.show_skipped.unwrap_or(false);

        let mut exclude_patterns = file.exclude;
        exclude_patterns.extend(args.exclude);

        let defaults = Config::default();
        Ok(Config {
            source: args.paths.source,
            destination: args.paths.destination,
            case_sensitivity: CaseSensitivity::from_flag(case_sensitive),
            report_skipped,
            exclude_patterns,
            quiet: args.quiet,
            log_level: args.log_level.or(file.log_level).unwrap_or(defaults.log_level),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("arguments should parse")
    }

    fn sync_args(cli: Cli) -> SyncArgs {
        match cli.command {
            Command::Sync(args) => args,
            other => panic!("expected sync command, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_sync_defaults() {
        let args = sync_args(parse(&["treesync", "sync", "/src", "/dst"]));
        let config = Config::try_from(args).expect("convert");

        assert_eq!(config.source, PathBuf::from("/src"));
        assert_eq!(config.destination, PathBuf::from("/dst"));
        assert_eq!(config.case_sensitivity, CaseSensitivity::Insensitive);
        assert!(!config.report_skipped);
        assert!(config.exclude_patterns.is_empty());
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_sync_flags() {
        let args = sync_args(parse(&[
            "treesync",
            "sync",
            "/src",
            "/dst",
            "--case-sensitive",
            "--show-skipped",
            "-e",
            "*.tmp",
            "--exclude",
            "cache",
            "--quiet",
            "--log-level",
            "debug",
        ]));
        let config = Config::try_from(args).expect("convert");

        assert_eq!(config.case_sensitivity, CaseSensitivity::Sensitive);
        assert!(config.report_skipped);
        assert!(config.quiet);
        assert_eq!(config.exclude_patterns, vec!["*.tmp", "cache"]);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_config_file_supplies_defaults() {
        let temp = TempDir::new().expect("create temp dir");
        let file = temp.path().join("treesync.toml");
        fs::write(
            &file,
            "show_skipped = true\nexclude = [\"*.bak\"]\nlog_level = \"info\"\n",
        )
        .expect("write config");

        let file_arg = file.to_string_lossy().into_owned();
        let args = sync_args(parse(&[
            "treesync", "sync", "/src", "/dst", "--config", &file_arg, "-e", "*.tmp",
        ]));
        let config = Config::try_from(args).expect("convert");

        assert!(config.report_skipped);
        assert_eq!(config.exclude_patterns, vec!["*.bak", "*.tmp"]);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_check_command() {
        let cli = parse(&["treesync", "check", "/src", "/dst", "--case-sensitive"]);
        match cli.command {
            Command::Check(paths) => {
                let config = Config::from(paths);
                assert_eq!(config.case_sensitivity, CaseSensitivity::Sensitive);
            }
            other => panic!("expected check command, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_destination_is_a_usage_error() {
        assert!(Cli::try_parse_from(["treesync", "sync", "/src"]).is_err());
    }
}
