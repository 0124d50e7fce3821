//! Package directory listing with gitignore support.
//!
//! Uses the `ignore` crate to list the Go files of one package directory
//! while respecting .gitignore, .git/info/exclude, and .enumgenignore.

use std::path::{Path, PathBuf};

use glob::Pattern;
use ignore::WalkBuilder;
use thiserror::Error;

/// Extension of files considered source.
pub const SOURCE_EXTENSION: &str = "go";

/// Errors that can occur while listing a package directory.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("path not found: {path}")]
    NotFound { path: PathBuf },

    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid exclude pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// Options for listing source files.
#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Include hidden files.
    pub include_hidden: bool,
    /// Respect .gitignore patterns.
    pub respect_gitignore: bool,
    /// Glob patterns matched against file names; matches are skipped.
    pub exclude: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            include_hidden: false,
            respect_gitignore: true,
            exclude: Vec::new(),
        }
    }
}

impl WalkOptions {
    /// Add a file-name exclusion pattern.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude.push(pattern.into());
        self
    }
}

/// List the source files directly inside `dir`, sorted by file name.
///
/// # Examples
///
/// ```no_run
/// use enumgen::walker::{list_source_files, WalkOptions};
/// use std::path::Path;
///
/// for path in list_source_files(Path::new("./enums"), &WalkOptions::default()).unwrap() {
///     println!("{}", path.display());
/// }
/// ```
pub fn list_source_files(dir: &Path, options: &WalkOptions) -> Result<Vec<PathBuf>, WalkError> {
    if !dir.exists() {
        return Err(WalkError::NotFound {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        return Err(WalkError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let patterns = options
        .exclude
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|source| WalkError::Pattern {
                pattern: p.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut builder = WalkBuilder::new(dir);
    builder
        .max_depth(Some(1))
        .hidden(!options.include_hidden)
        .git_ignore(options.respect_gitignore)
        .git_global(options.respect_gitignore)
        .git_exclude(options.respect_gitignore)
        .follow_links(false);

    let enumgenignore = dir.join(".enumgenignore");
    if enumgenignore.exists() {
        if let Some(err) = builder.add_ignore(&enumgenignore) {
            tracing::warn!(error = %err, "failed to read .enumgenignore");
        }
    }

    let mut files = Vec::new();
    for result in builder.build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(ignore::Error::Io(io_err)) => {
                let path = dir.to_path_buf();
                if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                    return Err(WalkError::PermissionDenied { path });
                }
                return Err(WalkError::Io {
                    path,
                    source: io_err,
                });
            }
            Err(err) => {
                // Ignore-file parse problems are not fatal for a listing
                tracing::debug!(error = %err, "skipping walk entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(SOURCE_EXTENSION) {
            continue;
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if patterns.iter().any(|p| p.matches(&name)) {
            tracing::debug!(file = %name, "excluded by pattern");
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}
