//! Wrapper around Path objects provided by the standard library
//!
//! Resolution deals with several kinds of paths: the working directory
//! patterns expand against, the matched paths the glob walk returns, and
//! the relative identity a resource keeps. The wrapper makes sure the
//! working directory is always resolved and absolute, and adds helpers to
//! convert to and from the standard library types.

use crate::error::PathError;
use error_stack::{Report, Result, ResultExt};
use std::path::{Path, PathBuf};

/// Representation of an absolute path that exists.
///
/// Using [`PathBuf`] directly in the program can be confusing,
/// since it can represent both relative and absolute paths in different contexts.
/// Hence, we use `AbsPath` wherever we can to indicate that a path is resolved and absolute.
///
/// We still use [`PathBuf`] in places that usually represent input from the user,
/// as it could be relative or absolute and may not exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AbsPath {
    p: PathBuf,
}

impl TryFrom<PathBuf> for AbsPath {
    type Error = Report<PathError>;

    /// Convert a [`PathBuf`] to an absolute path.
    ///
    /// This will error if:
    /// - the path doesn't exist
    /// - the path cannot be made absolute for some reason
    ///
    /// If the path is relative, it will be made absolute by
    /// using [`canonicalize`](std::path::Path::canonicalize)
    fn try_from(p: PathBuf) -> Result<Self, PathError> {
        if !p.exists() {
            return Err(Report::new(PathError::from(&p)).attach_printable("path does not exist"));
        }
        let p_abs = p
            .canonicalize()
            .change_context_lazy(|| PathError::from(&p))
            .attach_printable("cannot resolve path as absolute")?;

        Ok(Self { p: p_abs })
    }
}

/// Integration with [`PathBuf`] and [`Path`]
impl AbsPath {
    #[inline]
    pub fn as_path_buf(&self) -> &PathBuf {
        &self.p
    }
    #[inline]
    pub fn into_path_buf(self) -> PathBuf {
        self.p
    }
    #[inline]
    pub fn as_path(&self) -> &Path {
        self.p.as_path()
    }
}

impl From<AbsPath> for PathBuf {
    #[inline]
    fn from(p: AbsPath) -> Self {
        p.p
    }
}

impl AsRef<PathBuf> for AbsPath {
    #[inline]
    fn as_ref(&self) -> &PathBuf {
        self.as_path_buf()
    }
}

impl AsRef<Path> for AbsPath {
    #[inline]
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

impl AbsPath {
    /// Resolve a working directory for pattern expansion.
    ///
    /// The path must exist and be a directory.
    pub fn create_base(p: PathBuf) -> Result<Self, PathError> {
        let base = Self::try_from(p)?;
        if !base.p.is_dir() {
            return Err(Report::new(PathError::from(&base.p))
                .attach_printable("working directory is not a directory"));
        }
        Ok(base)
    }

    /// Get the given path relative to this one.
    ///
    /// Returns the path unchanged when it is not under this one.
    pub fn rel_of(&self, path: &Path) -> PathBuf {
        match path.strip_prefix(&self.p) {
            Ok(rel) => rel.to_path_buf(),
            Err(_) => path.to_path_buf(),
        }
    }
}

impl std::fmt::Display for AbsPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", normalize_path(&self.p.display().to_string()))
    }
}

/// Clean up a path string for display.
///
/// On windows, removes the `\\?\` prefix returned by
/// [`canonicalize`](std::path::Path::canonicalize).
#[cfg(windows)]
pub fn normalize_path(p: &str) -> String {
    match p.strip_prefix(r"\\?\") {
        Some(stripped) => stripped.to_string(),
        None => p.to_string(),
    }
}

/// Clean up a path string for display.
#[cfg(not(windows))]
pub fn normalize_path(p: &str) -> String {
    p.to_string()
}
