//! Case-exact directory resolution.
//!
//! Some filesystems (the macOS and Windows defaults) accept `./features` when
//! the directory on disk is `./Features`. A build that resolves modules that
//! way works locally and breaks on a case-sensitive CI machine, so a plain
//! existence check is not enough: every segment of the candidate path must
//! appear in its parent's listing with exactly the same spelling.
//!
//! All filesystem access goes through [`DirectoryAccess`] so the walk can be
//! exercised against [`MemoryFs`] in tests and against [`NativeFs`] in
//! production.

mod memory;
mod native;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use path_clean::PathClean;
use tracing::{debug, trace, warn};

use crate::error::{ConfigError, Result};

pub use memory::MemoryFs;
pub use native::NativeFs;

/// Directory-level filesystem operations needed while assembling a configuration.
pub trait DirectoryAccess: std::fmt::Debug {
    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// List the entry names of a directory, spelled as stored
    fn read_dir(&self, path: &Path) -> std::io::Result<Vec<OsString>>;

    /// Create a directory and all missing ancestors
    fn create_dir_all(&self, path: &Path) -> std::io::Result<()>;

    /// Get the current working directory
    fn current_dir(&self) -> std::io::Result<PathBuf>;
}

/// Picks the first candidate directory whose on-disk spelling matches exactly.
#[derive(Debug)]
pub struct DirectoryResolver<'a, A: DirectoryAccess + ?Sized> {
    access: &'a A,
    cwd: PathBuf,
}

impl<'a, A: DirectoryAccess + ?Sized> DirectoryResolver<'a, A> {
    /// Create a resolver anchored at the accessor's current working directory.
    pub fn new(access: &'a A) -> Result<Self> {
        let cwd = access
            .current_dir()
            .map_err(|err| ConfigError::io(".", err))?;
        Ok(Self::with_cwd(access, cwd))
    }

    /// Create a resolver with an explicit working directory.
    ///
    /// Relative candidates are interpreted against `cwd`, and `cwd` itself
    /// terminates the upward walk.
    pub fn with_cwd(access: &'a A, cwd: impl Into<PathBuf>) -> Self {
        let cwd: PathBuf = cwd.into();
        Self {
            access,
            cwd: cwd.clean(),
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Return the first candidate that exists with exact case.
    ///
    /// When no candidate verifies, the last one is returned unverified and the
    /// bundler reports the missing directory later. Returns `None` only for an
    /// empty candidate list.
    ///
    /// # Errors
    ///
    /// Propagates failures to list a directory that does exist.
    pub fn resolve<P: AsRef<Path>>(&self, candidates: &[P]) -> Result<Option<PathBuf>> {
        let mut last = None;

        for candidate in candidates {
            let path = self.absolutize(candidate.as_ref());
            if self.is_case_exact(&path)? {
                debug!(candidate = %path.display(), "resolved directory");
                return Ok(Some(path));
            }
            trace!(candidate = %path.display(), "candidate rejected");
            last = Some(path);
        }

        if let Some(path) = &last {
            warn!(
                candidate = %path.display(),
                "no candidate directory matched with exact case, using last candidate"
            );
        }

        Ok(last)
    }

    /// Walk from `path` up to the filesystem root (or the working directory),
    /// checking each segment against its parent's listing.
    pub fn is_case_exact(&self, path: &Path) -> Result<bool> {
        if path == self.cwd {
            return Ok(true);
        }

        let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
            // Filesystem root (or a bare prefix on Windows)
            return Ok(true);
        };

        if !self.access.exists(path) {
            trace!(path = %path.display(), "path does not exist");
            return Ok(false);
        }

        let entries = self
            .access
            .read_dir(parent)
            .map_err(|err| ConfigError::io(parent, err))?;

        if !entries.iter().any(|entry| entry.as_os_str() == name) {
            trace!(
                path = %path.display(),
                "segment spelled differently on disk"
            );
            return Ok(false);
        }

        self.is_case_exact(parent)
    }

    fn absolutize(&self, candidate: &Path) -> PathBuf {
        if candidate.is_absolute() {
            candidate.clean()
        } else {
            self.cwd.join(candidate).clean()
        }
    }
}

/// Flip the case of the first character of the final path segment.
///
/// `./Features` becomes `./features` and vice versa. Returns `None` when the
/// segment does not start with a cased character.
pub fn alternate_case(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?.to_str()?;
    let mut chars = name.chars();
    let first = chars.next()?;

    let flipped: String = if first.is_uppercase() {
        first.to_lowercase().collect()
    } else if first.is_lowercase() {
        first.to_uppercase().collect()
    } else {
        return None;
    };

    Some(path.with_file_name(format!("{flipped}{}", chars.as_str())))
}

/// Candidate list for a configured directory: as written, then alternate case.
pub fn case_candidates(path: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![path.to_path_buf()];
    if let Some(alternate) = alternate_case(path) {
        candidates.push(alternate);
    }
    candidates
}
