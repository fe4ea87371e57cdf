//! File discovery and traversal with gitignore support
//!
//! Walks one root at a time, honouring `.gitignore`, the configured
//! include/exclude globs, and ripgrep's `go` file type from the ignore crate.

use crate::types::GlobPattern;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use ignore::types::{Types, TypesBuilder};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during file walking
#[derive(Debug, Error)]
pub enum FileWalkerError {
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        source: globset::Error,
    },

    #[error("Failed to build Go file type matcher: {0}")]
    Types(ignore::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),
}

/// Reason why a file was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Did not match include patterns, or matched an exclude pattern
    ExcludedByPattern,
    /// Not a Go source file
    NotGoSource,
    /// Not a regular file (e.g., directory)
    NotAFile,
}

/// Result of file walking: a file to analyse or a skipped path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkResult {
    File(PathBuf),
    Skipped { path: PathBuf, reason: SkipReason },
}

/// Iterator source over discovered Go files below one root
pub struct FileWalker {
    root: PathBuf,
    include_set: Option<GlobSet>,
    exclude_set: GlobSet,
    go_types: Types,
    verbose: bool,
}

impl FileWalker {
    /// Creates a new FileWalker
    ///
    /// `include` empty means every Go file; `exclude` is applied after include.
    /// Patterns match paths relative to `root`.
    ///
    /// # Errors
    ///
    /// Returns `FileWalkerError` if a glob does not compile.
    pub fn new(
        root: &Path,
        include: &[GlobPattern],
        exclude: &[GlobPattern],
    ) -> Result<Self, FileWalkerError> {
        Self::with_verbose(root, include, exclude, false)
    }

    /// Like [`new`](Self::new), also reporting skipped paths when `verbose`
    ///
    /// # Errors
    ///
    /// Returns `FileWalkerError` if a glob does not compile.
    pub fn with_verbose(
        root: &Path,
        include: &[GlobPattern],
        exclude: &[GlobPattern],
        verbose: bool,
    ) -> Result<Self, FileWalkerError> {
        let include_set = if include.is_empty() {
            None
        } else {
            Some(Self::build_globset(include)?)
        };

        // Always exclude .git, merged with user-provided excludes
        let mut exclude_patterns = Vec::from(exclude);
        exclude_patterns.push(GlobPattern::new("**/.git/**"));
        let exclude_set = Self::build_globset(&exclude_patterns)?;

        let mut types = TypesBuilder::new();
        types.add_defaults();
        types.select("go");
        let go_types = types.build().map_err(FileWalkerError::Types)?;

        Ok(Self {
            root: root.to_path_buf(),
            include_set,
            exclude_set,
            go_types,
            verbose,
        })
    }

    fn build_globset(patterns: &[GlobPattern]) -> Result<GlobSet, FileWalkerError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern.as_str()).map_err(|e| FileWalkerError::InvalidGlob {
                pattern: pattern.as_str().to_string(),
                source: e,
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|e| FileWalkerError::InvalidGlob {
            pattern: "<globset>".to_string(),
            source: e,
        })
    }

    /// Walks the tree and yields the Go files to analyse
    pub fn walk(self) -> impl Iterator<Item = Result<PathBuf, FileWalkerError>> {
        self.walk_with_skip_info()
            .filter_map(|result| match result {
                Ok(WalkResult::File(path)) => Some(Ok(path)),
                Ok(WalkResult::Skipped { .. }) => None,
                Err(e) => Some(Err(e)),
            })
    }

    /// Walks the tree, reporting skipped paths too when verbose
    pub fn walk_with_skip_info(self) -> impl Iterator<Item = Result<WalkResult, FileWalkerError>> {
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .build();

        walker.filter_map(move |result| {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => return Some(Err(FileWalkerError::Walk(e))),
            };
            let path = entry.path();

            let skipped = |reason| {
                self.verbose.then(|| {
                    Ok(WalkResult::Skipped {
                        path: path.to_path_buf(),
                        reason,
                    })
                })
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                return skipped(SkipReason::NotAFile);
            }

            if !self.go_types.matched(path, false).is_whitelist() {
                return skipped(SkipReason::NotGoSource);
            }

            let relative = self.relative(path);
            if let Some(include_set) = &self.include_set
                && !include_set.is_match(relative)
            {
                return skipped(SkipReason::ExcludedByPattern);
            }
            if self.exclude_set.is_match(relative) {
                return skipped(SkipReason::ExcludedByPattern);
            }

            Some(Ok(WalkResult::File(path.to_path_buf())))
        })
    }

    /// Path as seen by the globs; a root that is itself a file matches by its own path
    fn relative<'p>(&self, path: &'p Path) -> &'p Path {
        match path.strip_prefix(&self.root) {
            Ok(relative) if !relative.as_os_str().is_empty() => relative,
            _ => path,
        }
    }
}
