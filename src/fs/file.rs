use crate::error::PathError;
use error_stack::{Result, ResultExt};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

/// Create the parent directory chain of `path` if it does not exist.
///
/// Pre-existing directories are not an error.
pub fn ensure_parent(path: &Path) -> Result<(), PathError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .change_context_lazy(|| PathError::from(&parent))
                .attach_printable("cannot create parent directories")?;
        }
    }
    Ok(())
}

/// Write content to `dest`, creating parent directories as needed.
///
/// An existing file is overwritten.
pub fn save_file(dest: &Path, content: &str) -> Result<(), PathError> {
    ensure_parent(dest)?;
    let mut w = File::create(dest)
        .map(BufWriter::new)
        .change_context_lazy(|| PathError::from(&dest))
        .attach_printable_lazy(|| format!("could not open file for writing: `{}`", dest.display()))?;
    w.write_all(content.as_bytes())
        .change_context_lazy(|| PathError::from(&dest))
        .attach_printable("cannot write file content")?;
    w.flush()
        .change_context_lazy(|| PathError::from(&dest))
        .attach_printable("cannot flush file content")?;
    Ok(())
}

/// Stream-copy `source` to `target`, creating the target's parent
/// directories as needed.
///
/// Each call yields exactly one outcome: the first failure on either side
/// of the stream is the operation's error.
pub fn copy_file(source: &Path, target: &Path) -> Result<(), PathError> {
    ensure_parent(target)?;
    let mut r = File::open(source)
        .map(BufReader::new)
        .change_context_lazy(|| PathError::from(&source))
        .attach_printable_lazy(|| format!("could not open source file: `{}`", source.display()))?;
    let mut w = File::create(target)
        .map(BufWriter::new)
        .change_context_lazy(|| PathError::from(&target))
        .attach_printable_lazy(|| format!("could not open target file: `{}`", target.display()))?;
    let copied = io::copy(&mut r, &mut w)
        .change_context_lazy(|| PathError::from(&target))
        .attach_printable_lazy(|| {
            format!(
                "cannot copy `{}` to `{}`",
                source.display(),
                target.display()
            )
        })?;
    w.flush()
        .change_context_lazy(|| PathError::from(&target))
        .attach_printable("cannot flush copied content")?;
    log::debug!(
        "copied {copied} byte(s) from {} to {}",
        source.display(),
        target.display()
    );
    Ok(())
}

#[cfg(test)]
mod ut {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_creates_nested_parents() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("a/b/c/out.txt");
        save_file(&dest, "hello").unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "hello");
    }

    #[test]
    fn test_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("out.txt");
        save_file(&dest, "first").unwrap();
        save_file(&dest, "second").unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "second");
    }

    #[test]
    fn test_ensure_parent_idempotent() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("x/y.txt");
        ensure_parent(&dest).unwrap();
        ensure_parent(&dest).unwrap();
        assert!(dir.path().join("x").is_dir());
    }

    #[test]
    fn test_copy_creates_parents() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src.txt");
        fs::write(&source, "payload").unwrap();
        let target = dir.path().join("deep/nested/dst.txt");
        copy_file(&source, &target).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "payload");
    }

    #[test]
    fn test_copy_missing_source_is_single_error() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("missing.txt");
        let target = dir.path().join("dst.txt");
        assert!(copy_file(&source, &target).is_err());
        // the failed copy did not create the target file
        assert!(!target.exists());
    }
}
