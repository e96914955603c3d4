//! Root-relative path validation.
//!
//! Every path handed to a [`StorageBackend`](crate::StorageBackend) is
//! relative to the folder being organized. Only plain name components are
//! accepted, so nothing can reach outside of that folder.

use std::path::{Component, Path, PathBuf};

use crate::error::{ErrorKind, Result};

/// Validates a root-relative path and strips `.` components and redundant
/// separators.
///
/// # Returns
/// The cleaned path, or [`InvalidPath`](crate::error::ErrorKind::InvalidPath)
/// if the path is empty, absolute, contains `..`, or contains a null byte.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use datedirs_storage::validate_path;
/// assert_eq!(validate_path("2020-01-12/IMG_0001.jpg").unwrap(), Path::new("2020-01-12/IMG_0001.jpg"));
/// assert_eq!(validate_path("./12 stycznia 2020/").unwrap(), Path::new("12 stycznia 2020"));
/// assert!(validate_path("../elsewhere").is_err());
/// assert!(validate_path("/2020-01-12").is_err());
/// ```
pub fn validate(path: impl AsRef<Path>) -> Result<PathBuf> {
    let original = path.as_ref();
    let invalid = || ErrorKind::InvalidPath(original.to_path_buf());
    let mut cleaned = PathBuf::new();
    for component in original.components() {
        match component {
            // Null bytes pass through Path::components() on Unix but truncate
            // the path in the underlying syscalls.
            Component::Normal(name) if name.as_encoded_bytes().contains(&0) => exn::bail!(invalid()),
            Component::Normal(name) => cleaned.push(name),
            Component::CurDir => {},
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => exn::bail!(invalid()),
        }
    }
    if cleaned.as_os_str().is_empty() {
        exn::bail!(invalid());
    }
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2020-01-12", "2020-01-12")]
    #[case("12 stycznia 2020", "12 stycznia 2020")]
    #[case("IMG, 12 stycznia 2020/photo.jpg", "IMG, 12 stycznia 2020/photo.jpg")]
    #[case("a//b", "a/b")]
    #[case("./a/./b/", "a/b")]
    fn test_valid(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(validate(input).unwrap(), Path::new(expected));
    }

    #[rstest]
    #[case("")]
    #[case(".")]
    #[case("./")]
    #[case("..")]
    #[case("a/../b")]
    #[case("/etc/passwd")]
    #[case("a\0b")]
    fn test_invalid(#[case] input: &str) {
        let err = validate(input).unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidPath(_)));
    }
}
