//! DirectoryPath - Absolute, normalized directory paths

use super::SyncError;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

/// How path strings are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseSensitivity {
    /// Byte-for-byte comparison (typical Linux filesystems)
    Sensitive,

    /// Case-folded comparison (NTFS, APFS, FAT defaults)
    #[default]
    Insensitive,
}

impl CaseSensitivity {
    pub fn from_flag(case_sensitive: bool) -> Self {
        if case_sensitive {
            CaseSensitivity::Sensitive
        } else {
            CaseSensitivity::Insensitive
        }
    }
}

/// An absolute directory path with `.`, `..` and symbolic links resolved
///
/// The directory itself does not need to exist: the longest existing ancestor
/// is canonicalized and the remaining components are appended lexically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryPath(PathBuf);

impl DirectoryPath {
    /// Resolve a caller-supplied path
    ///
    /// # Errors
    /// * `SyncError::Validation` - blank input
    /// * `SyncError::Io` - current directory unavailable, or an ancestor could
    ///   not be inspected (permission denied, a file where a directory is
    ///   expected, ...)
    pub fn resolve(raw: impl AsRef<Path>) -> Result<Self, SyncError> {
        let raw = raw.as_ref();
        if raw.to_string_lossy().trim().is_empty() {
            return Err(SyncError::Validation("path is blank".to_string()));
        }

        let absolute = if raw.is_absolute() {
            raw.to_path_buf()
        } else {
            std::env::current_dir()?.join(raw)
        };

        Ok(Self(canonicalize_existing_prefix(&absolute)?))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }

    /// String form used for equality and prefix tests
    ///
    /// Always ends with exactly one separator so that `/a/b/` is never a
    /// prefix of `/a/bc/`.
    pub fn comparison_key(&self, case: CaseSensitivity) -> String {
        let text = self.0.to_string_lossy();
        let mut key = text
            .trim_end_matches(|c: char| c == MAIN_SEPARATOR || c == '/')
            .to_string();
        key.push(MAIN_SEPARATOR);
        match case {
            CaseSensitivity::Sensitive => key,
            CaseSensitivity::Insensitive => key.to_lowercase(),
        }
    }

    /// True if `other` is this directory or lies anywhere below it
    pub fn contains(&self, other: &DirectoryPath, case: CaseSensitivity) -> bool {
        let own = self.comparison_key(case);
        let theirs = other.comparison_key(case);
        own == theirs || theirs.starts_with(&own)
    }
}

impl AsRef<Path> for DirectoryPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

fn canonicalize_existing_prefix(path: &Path) -> std::io::Result<PathBuf> {
    let components: Vec<Component<'_>> = path.components().collect();

    for split in (1..=components.len()).rev() {
        let head: PathBuf = components[..split].iter().collect();
        match head.canonicalize() {
            Ok(base) => return Ok(append_lexically(base, &components[split..])),
            Err(e) if e.kind() == ErrorKind::NotFound => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(append_lexically(PathBuf::new(), &components))
}

fn append_lexically(mut base: PathBuf, rest: &[Component<'_>]) -> PathBuf {
    for component in rest {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                base.pop();
            }
            other => base.push(other.as_os_str()),
        }
    }
    base
}
