use crate::error::PathError;
use crate::fs::AbsPath;
use error_stack::{Result, ResultExt};
use glob::MatchOptions;
use std::path::{Path, PathBuf};

/// Expand one pattern against a working directory.
///
/// Returns the matched paths relative to `working_dir`, in the order the
/// glob walk produced them. Directory matches are dropped: only concrete
/// files become resources. Zero matches is a valid empty result, not an
/// error.
pub fn expand_pattern(pattern: &str, working_dir: &AbsPath) -> Result<Vec<PathBuf>, PathError> {
    let full_pattern = if Path::new(pattern).is_absolute() {
        pattern.to_string()
    } else {
        working_dir.as_path().join(pattern).display().to_string()
    };

    // `*` must not cross path separators
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: true,
        require_literal_leading_dot: false,
    };

    let entries = glob::glob_with(&full_pattern, options)
        .change_context_lazy(|| PathError::from(&full_pattern))
        .attach_printable_lazy(|| format!("invalid pattern: `{pattern}`"))?;

    let mut files = vec![];
    for entry in entries {
        let path = entry
            .change_context_lazy(|| PathError::from(&full_pattern))
            .attach_printable("cannot read glob entry")?;
        if path.is_dir() {
            log::debug!("skipping directory match: {}", path.display());
            continue;
        }
        files.push(working_dir.rel_of(&path));
    }

    Ok(files)
}

#[cfg(test)]
mod ut {
    use super::*;
    use std::fs::{create_dir_all, File};
    use tempfile::TempDir;

    fn base(dir: &TempDir) -> AbsPath {
        AbsPath::create_base(dir.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_basic_match() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("a.txt")).unwrap();
        File::create(dir.path().join("b.txt")).unwrap();
        File::create(dir.path().join("c.css")).unwrap();

        let files = expand_pattern("*.txt", &base(&dir)).unwrap();
        assert_eq!(
            files,
            vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]
        );
    }

    #[test]
    fn test_directories_excluded() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("file.txt")).unwrap();
        create_dir_all(dir.path().join("subdir.txt")).unwrap();

        let files = expand_pattern("*.txt", &base(&dir)).unwrap();
        assert_eq!(files, vec![PathBuf::from("file.txt")]);
    }

    #[test]
    fn test_zero_matches_is_empty_not_error() {
        let dir = TempDir::new().unwrap();
        let files = expand_pattern("*.nothing", &base(&dir)).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_nested_match_is_relative() {
        let dir = TempDir::new().unwrap();
        create_dir_all(dir.path().join("sub")).unwrap();
        File::create(dir.path().join("sub/x.txt")).unwrap();

        let files = expand_pattern("sub/*.txt", &base(&dir)).unwrap();
        assert_eq!(files, vec![PathBuf::from("sub/x.txt")]);
    }

    #[test]
    fn test_invalid_pattern_errors() {
        let dir = TempDir::new().unwrap();
        assert!(expand_pattern("a[", &base(&dir)).is_err());
    }
}
