use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::DirectoryAccess;

/// Host filesystem access.
///
/// Symbolic links are reported under their own name and are not followed for
/// case verification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeFs;

impl DirectoryAccess for NativeFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        fs::read_dir(path)?
            .map(|entry| entry.map(|entry| entry.file_name()))
            .collect()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::DirectoryResolver;
    use tempfile::TempDir;

    #[test]
    fn lists_real_directory_entries() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("Features")).unwrap();
        fs::write(dir.path().join("index.ejs"), "<html></html>").unwrap();

        let mut names = NativeFs.read_dir(dir.path()).unwrap();
        names.sort();
        assert_eq!(
            names,
            vec![OsString::from("Features"), OsString::from("index.ejs")]
        );
    }

    #[test]
    fn resolves_against_real_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("components")).unwrap();

        let resolver = DirectoryResolver::with_cwd(&NativeFs, dir.path());
        let resolved = resolver
            .resolve(&["./Components", "./components"])
            .unwrap()
            .unwrap();
        assert_eq!(resolved, dir.path().join("components"));
    }

    #[cfg(unix)]
    #[test]
    fn symlink_is_accepted_under_its_own_name() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("Shared")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("Shared"), dir.path().join("Features"))
            .unwrap();

        let resolver = DirectoryResolver::with_cwd(&NativeFs, dir.path());
        assert!(resolver
            .is_case_exact(&dir.path().join("Features"))
            .unwrap());
    }
}
