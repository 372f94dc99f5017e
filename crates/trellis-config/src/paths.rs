//! Resolved project paths.
//!
//! A [`PathSet`] is built once by the process entry point and handed to the
//! [`ConfigFactory`](crate::ConfigFactory); it is never recomputed per build.

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use serde::Serialize;
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::resolver::{DirectoryAccess, DirectoryResolver, case_candidates};
use crate::settings::Settings;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathSet {
    pub feature_dir: PathBuf,
    pub component_dir: PathBuf,
    pub out_dir: PathBuf,
    pub root_dir: PathBuf,
    pub base_url: String,
    pub title: String,
    pub dependency_dir: PathBuf,
    pub template: PathBuf,
    pub favicon: PathBuf,
}

impl PathSet {
    /// Resolve settings against the filesystem.
    ///
    /// The feature and component directories are tried as configured, then
    /// with the first letter of their last segment in the other case. All
    /// directories are anchored at the root directory.
    ///
    /// # Errors
    ///
    /// Fails if the working directory cannot be determined or a directory
    /// listing fails during case verification.
    pub fn resolve<A: DirectoryAccess + ?Sized>(settings: &Settings, access: &A) -> Result<Self> {
        let cwd = access
            .current_dir()
            .map_err(|err| ConfigError::io(".", err))?;
        let root_dir = match &settings.root_dir {
            Some(root) if root.is_absolute() => root.clean(),
            Some(root) => cwd.join(root).clean(),
            None => cwd.clean(),
        };

        let resolver = DirectoryResolver::with_cwd(access, &root_dir);
        let feature_dir = resolve_dir(&resolver, &settings.feature_dir)?;
        let component_dir = resolve_dir(&resolver, &settings.component_dir)?;
        let out_dir = root_dir.join(&settings.out_dir).clean();

        debug!(
            root = %root_dir.display(),
            features = %feature_dir.display(),
            components = %component_dir.display(),
            out = %out_dir.display(),
            "resolved project paths"
        );

        Ok(Self {
            feature_dir,
            component_dir,
            out_dir,
            root_dir,
            base_url: settings.base_url.clone(),
            title: settings.title.clone(),
            dependency_dir: settings.dependency_dir.clone(),
            template: settings.template.clone(),
            favicon: settings.favicon.clone(),
        })
    }

    /// Absolute location of the shared dependency directory.
    pub fn dependency_path(&self) -> PathBuf {
        self.root_dir.join(&self.dependency_dir).clean()
    }
}

fn resolve_dir<A: DirectoryAccess + ?Sized>(
    resolver: &DirectoryResolver<'_, A>,
    configured: &Path,
) -> Result<PathBuf> {
    let candidates = case_candidates(configured);
    let resolved = resolver.resolve(&candidates)?;
    // case_candidates always yields the configured path
    Ok(resolved.unwrap_or_else(|| resolver.cwd().join(configured).clean()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::MemoryFs;

    #[test]
    fn resolves_lowercase_fallbacks() {
        let fs = MemoryFs::new("/srv/site")
            .with_dir("/srv/site/features")
            .with_dir("/srv/site/components");

        let paths = PathSet::resolve(&Settings::default(), &fs).unwrap();
        assert_eq!(paths.root_dir, PathBuf::from("/srv/site"));
        assert_eq!(paths.feature_dir, PathBuf::from("/srv/site/features"));
        assert_eq!(paths.component_dir, PathBuf::from("/srv/site/components"));
        assert_eq!(paths.out_dir, PathBuf::from("/srv/site/wwwroot"));
    }

    #[test]
    fn keeps_configured_spelling_when_present() {
        let fs = MemoryFs::new("/srv/site")
            .with_dir("/srv/site/Features")
            .with_dir("/srv/site/Components");

        let paths = PathSet::resolve(&Settings::default(), &fs).unwrap();
        assert_eq!(paths.feature_dir, PathBuf::from("/srv/site/Features"));
        assert_eq!(paths.component_dir, PathBuf::from("/srv/site/Components"));
    }

    #[test]
    fn relative_root_is_anchored_at_cwd() {
        let fs = MemoryFs::new("/home/dev").with_dir("/home/dev/client/Features");
        let settings = Settings {
            root_dir: Some(PathBuf::from("client")),
            out_dir: PathBuf::from("../public"),
            ..Settings::default()
        };

        let paths = PathSet::resolve(&settings, &fs).unwrap();
        assert_eq!(paths.root_dir, PathBuf::from("/home/dev/client"));
        assert_eq!(paths.feature_dir, PathBuf::from("/home/dev/client/Features"));
        assert_eq!(paths.out_dir, PathBuf::from("/home/dev/public"));
        assert_eq!(
            paths.dependency_path(),
            PathBuf::from("/home/dev/client/node_modules")
        );
    }

    #[test]
    fn missing_directories_fall_back_to_last_candidate() {
        let fs = MemoryFs::new("/srv/site");
        let paths = PathSet::resolve(&Settings::default(), &fs).unwrap();
        assert_eq!(paths.feature_dir, PathBuf::from("/srv/site/features"));
        assert_eq!(paths.component_dir, PathBuf::from("/srv/site/components"));
    }
}
