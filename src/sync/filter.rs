//! Exclude patterns matched against entry names

use crate::types::SyncError;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::ffi::OsStr;

/// Compiled set of exclude globs
///
/// Patterns match the base name of a file or directory (`*.tmp`,
/// `node_modules`). Excluded entries are not visited and produce no events.
#[derive(Debug, Clone)]
pub struct ExcludeFilter {
    set: GlobSet,
    patterns: Vec<String>,
}

impl ExcludeFilter {
    /// Compile `patterns`
    ///
    /// # Errors
    /// `SyncError::Config` naming the first pattern that is not a valid glob.
    pub fn new(patterns: &[String]) -> Result<Self, SyncError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = GlobBuilder::new(pattern)
                .literal_separator(true)
                .build()
                .map_err(|e| {
                    SyncError::Config(format!("Invalid exclude pattern '{}': {}", pattern, e))
                })?;
            builder.add(glob);
        }

        let set = builder
            .build()
            .map_err(|e| SyncError::Config(format!("Failed to build exclude set: {}", e)))?;

        Ok(Self {
            set,
            patterns: patterns.to_vec(),
        })
    }

    pub fn is_excluded(&self, name: &OsStr) -> bool {
        !self.patterns.is_empty() && self.set.is_match(name)
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl Default for ExcludeFilter {
    fn default() -> Self {
        Self {
            set: GlobSet::empty(),
            patterns: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(patterns: &[&str]) -> ExcludeFilter {
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        ExcludeFilter::new(&patterns).expect("valid patterns")
    }

    #[test]
    fn test_empty_filter_excludes_nothing() {
        let f = ExcludeFilter::default();
        assert!(!f.is_excluded(OsStr::new("anything.txt")));
    }

    #[test]
    fn test_matches_base_names() {
        let f = filter(&["*.tmp", "Thumbs.db", "cache"]);
        assert!(f.is_excluded(OsStr::new("draft.tmp")));
        assert!(f.is_excluded(OsStr::new("Thumbs.db")));
        assert!(f.is_excluded(OsStr::new("cache")));
        assert!(!f.is_excluded(OsStr::new("draft.txt")));
        assert!(!f.is_excluded(OsStr::new("cache2")));
    }

    #[test]
    fn test_invalid_pattern_is_config_error() {
        let result = ExcludeFilter::new(&["[unclosed".to_string()]);
        match result {
            Err(SyncError::Config(msg)) => assert!(msg.contains("[unclosed")),
            other => panic!("expected config error, got {:?}", other),
        }
    }
}
