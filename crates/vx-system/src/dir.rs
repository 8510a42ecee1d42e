//! Directory parsing.
//!
//! [`DirectoryParser`] walks one directory (optionally its whole subtree)
//! and yields the files whose names match a glob pattern such as
//! `*.png`. Entries that cannot be read are logged and skipped.

use crate::{SystemError, SystemResult};
use glob::{MatchOptions, Paths, Pattern};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Iterator over the files of a directory matching a pattern.
///
/// # Example
///
/// ```rust,no_run
/// use vx_system::dir::DirectoryParser;
///
/// for texture in DirectoryParser::new("assets", "*.png", true).unwrap() {
///     println!("{}", texture.display());
/// }
/// ```
pub struct DirectoryParser {
    paths: Paths,
}

impl DirectoryParser {
    /// Starts parsing `dir` for files matching `pattern`.
    ///
    /// With `recursive` set, subdirectories are searched too. Matching is
    /// case-sensitive on Unix and case-insensitive on Windows.
    pub fn new(dir: impl AsRef<Path>, pattern: &str, recursive: bool) -> SystemResult<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(SystemError::DirectoryNotFound { path: dir.to_path_buf() });
        }
        Pattern::new(pattern)?;

        let root = Pattern::escape(&dir.to_string_lossy());
        let full = if recursive {
            format!("{root}/**/{pattern}")
        } else {
            format!("{root}/{pattern}")
        };
        debug!(dir = %dir.display(), pattern, recursive, "Parsing directory");

        let options = MatchOptions {
            case_sensitive: !cfg!(windows),
            ..MatchOptions::new()
        };
        Ok(Self {
            paths: glob::glob_with(&full, options)?,
        })
    }
}

impl Iterator for DirectoryParser {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            match self.paths.next()? {
                Ok(path) if path.is_file() => return Some(path),
                Ok(_) => continue,
                Err(e) => {
                    warn!(path = %e.path().display(), error = %e.error(), "Skipping unreadable entry");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_flat_and_recursive() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.png"), b"").unwrap();
        fs::write(dir.path().join("b.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("c.png"), b"").unwrap();
        fs::create_dir(dir.path().join("dir.png")).unwrap();

        let flat: Vec<PathBuf> = DirectoryParser::new(dir.path(), "*.png", false).unwrap().collect();
        assert_eq!(flat, vec![dir.path().join("a.png")]);

        let mut deep: Vec<PathBuf> = DirectoryParser::new(dir.path(), "*.png", true).unwrap().collect();
        deep.sort();
        assert_eq!(deep, vec![dir.path().join("a.png"), dir.path().join("sub").join("c.png")]);
    }

    #[test]
    fn test_errors() {
        let dir = tempdir().unwrap();
        assert!(DirectoryParser::new(dir.path().join("missing"), "*", false)
            .err()
            .is_some_and(|e| e.is_io_error()));
        assert!(matches!(
            DirectoryParser::new(dir.path(), "[", false),
            Err(SystemError::Pattern(_))
        ));
    }
}
