//! File references under the staging root.
//!
//! Inputs are resolved lexically: the input is made relative, joined onto the
//! staging root and cleaned (`.` dropped, `..` folded into its parent).
//! Cleaning does not confine the result to the root; `../etc/passwd` under
//! `/tmp` resolves to `/etc/passwd`.

use crate::error::ValidationError;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Component, Path, PathBuf};
use tracing::trace;

/// Checks that `path` names a readable regular file.
///
/// Missing paths and directories yield [`ValidationError::FileNotFound`],
/// permission problems [`ValidationError::FileAccessDenied`]. Reads at most
/// one byte.
pub fn validate_file(path: impl AsRef<Path>) -> Result<(), ValidationError> {
    let path = path.as_ref();

    let metadata = std::fs::metadata(path).map_err(map_io_error)?;
    if metadata.is_dir() {
        return Err(ValidationError::FileNotFound);
    }

    let mut file = File::open(path).map_err(map_io_error)?;
    let mut byte = [0u8; 1];
    let read = file.read(&mut byte).map_err(map_io_error)?;
    trace!("Read {} byte(s) from {}", read, path.display());
    Ok(())
}

fn map_io_error(err: io::Error) -> ValidationError {
    match err.kind() {
        io::ErrorKind::NotFound => ValidationError::FileNotFound,
        io::ErrorKind::PermissionDenied => ValidationError::FileAccessDenied,
        kind => ValidationError::Io(kind),
    }
}

/// Resolves `input` below `root`.
///
/// Leading `/` (and drive prefixes) are dropped so absolute inputs land under
/// the root.
pub fn resolve_staged_path(root: &Path, input: &str) -> PathBuf {
    let relative: PathBuf = Path::new(input)
        .components()
        .filter(|c| !matches!(c, Component::Prefix(_) | Component::RootDir))
        .collect();
    clean_path(&root.join(relative))
}

/// Lexically cleans a path.
///
/// `..` directly below the root is dropped; `..` at the start of a relative
/// path is kept. An empty result becomes `.`.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            _ => out.push(component),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path(Path::new("a/./b/../c")), PathBuf::from("a/c"));
        assert_eq!(clean_path(Path::new("../a")), PathBuf::from("../a"));
        assert_eq!(clean_path(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(clean_path(Path::new("a/..")), PathBuf::from("."));
        assert_eq!(clean_path(Path::new("")), PathBuf::from("."));
    }

    #[test]
    fn test_resolve_staged_path() {
        let root = Path::new("/tmp");
        assert_eq!(resolve_staged_path(root, "sample.bin"), PathBuf::from("/tmp/sample.bin"));
        assert_eq!(resolve_staged_path(root, "/sample.bin"), PathBuf::from("/tmp/sample.bin"));
        assert_eq!(resolve_staged_path(root, "./a/../b"), PathBuf::from("/tmp/b"));
    }

    #[test]
    fn test_resolve_does_not_confine_traversal() {
        let root = Path::new("/tmp");
        assert_eq!(resolve_staged_path(root, "../etc/passwd"), PathBuf::from("/etc/passwd"));
    }

    #[test]
    fn test_validate_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.bin");
        fs::write(&path, b"MZ").unwrap();
        assert_eq!(validate_file(&path), Ok(()));

        let empty = dir.path().join("empty.bin");
        fs::write(&empty, b"").unwrap();
        assert_eq!(validate_file(&empty), Ok(()));
    }

    #[test]
    fn test_validate_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            validate_file(dir.path().join("missing")),
            Err(ValidationError::FileNotFound)
        );
    }

    #[test]
    fn test_validate_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(validate_file(dir.path()), Err(ValidationError::FileNotFound));
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_unreadable_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locked.bin");
        fs::write(&path, b"data").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can read it anyway
        if File::open(&path).is_ok() {
            return;
        }
        assert_eq!(validate_file(&path), Err(ValidationError::FileAccessDenied));
    }
}
