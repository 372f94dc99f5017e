use std::cell::RefCell;
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use path_clean::PathClean;

use super::DirectoryAccess;

/// In-memory directory tree.
///
/// Useful for dry runs and for exercising case-sensitivity rules without
/// depending on the host filesystem. In case-insensitive mode, lookups ignore
/// case the way the macOS and Windows defaults do, while listings still report
/// the stored spelling.
#[derive(Debug, Clone)]
pub struct MemoryFs {
    dirs: RefCell<BTreeSet<PathBuf>>,
    cwd: PathBuf,
    case_insensitive: bool,
}

impl MemoryFs {
    /// Create a tree containing `cwd` and its ancestors.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        let cwd: PathBuf = cwd.into();
        let cwd = cwd.clean();
        let fs = Self {
            dirs: RefCell::new(BTreeSet::new()),
            cwd: cwd.clone(),
            case_insensitive: false,
        };
        fs.insert_all(&cwd);
        fs
    }

    /// Add a directory (and its ancestors).
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        self.insert_all(&path.as_ref().clean());
        self
    }

    /// Match lookups without regard to case.
    pub fn case_insensitive(mut self) -> Self {
        self.case_insensitive = true;
        self
    }

    /// Directories currently in the tree.
    pub fn dirs(&self) -> Vec<PathBuf> {
        self.dirs.borrow().iter().cloned().collect()
    }

    fn insert_all(&self, path: &Path) {
        let mut dirs = self.dirs.borrow_mut();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            dirs.insert(ancestor.to_path_buf());
        }
    }

    fn lookup(&self, path: &Path) -> Option<PathBuf> {
        let path = path.clean();
        let dirs = self.dirs.borrow();
        if dirs.contains(&path) {
            return Some(path);
        }
        if !self.case_insensitive {
            return None;
        }

        let wanted = path.to_string_lossy().to_lowercase();
        dirs.iter()
            .find(|dir| dir.to_string_lossy().to_lowercase() == wanted)
            .cloned()
    }
}

impl DirectoryAccess for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        self.lookup(path).is_some()
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<OsString>> {
        let stored = self.lookup(path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory: {}", path.display()),
            )
        })?;

        let entries = self
            .dirs
            .borrow()
            .iter()
            .filter(|dir| dir.parent() == Some(stored.as_path()))
            .filter_map(|dir| dir.file_name().map(|name| name.to_os_string()))
            .collect();
        Ok(entries)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.insert_all(&path.clean());
        Ok(())
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        Ok(self.cwd.clone())
    }
}
