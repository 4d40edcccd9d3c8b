//! Bundle path resolution.
//!
//! Resolution order, highest priority first:
//!
//! 1. `use_system_root` set: `/Applications/<name>.app`, no filesystem access
//! 2. base path set and `<base>/<name>.app` creatable: that directory
//! 3. otherwise: `<cwd>/<name>.app`
//!
//! The working directory is an explicit input of [`PathResolver`] rather than
//! read from the process on every call.

use super::{SYSTEM_APPLICATIONS_ROOT, app::Bundle, app_folder_name};
use crate::bundler::{
    error::{ErrorExt, Result},
    settings::BundleConfig,
    utils::fs,
};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Returns `/Applications/<name>.app`.
pub fn system_root_app_path(name: &str) -> PathBuf {
    Path::new(SYSTEM_APPLICATIONS_ROOT).join(app_folder_name(name))
}

/// Computes the absolute location of a bundle from a [`BundleConfig`].
#[derive(Clone, Debug)]
pub struct PathResolver {
    cwd: PathBuf,
}

impl PathResolver {
    /// Creates a resolver that treats `cwd` as the working directory.
    ///
    /// A relative `cwd` is absolutized against the process working directory.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        let cwd = cwd.into();
        let cwd = match cwd.absolutize() {
            Ok(absolute) => absolute.into_owned(),
            Err(_) => cwd.clone(),
        };
        Self { cwd }
    }

    /// Creates a resolver bound to the process working directory.
    pub fn from_current_dir() -> Result<Self> {
        let cwd = std::env::current_dir().fs_context("reading working directory", ".")?;
        Ok(Self { cwd })
    }

    /// Working directory used for the fallback location.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Resolves the bundle location.
    ///
    /// When a base path is configured this probes (and creates) `<base>/<name>.app`.
    /// If that fails, a warning is logged and the working-directory default is used.
    pub async fn resolve(&self, config: &BundleConfig) -> Bundle {
        let path = match self.base_candidate(config) {
            Some(candidate) => match fs::try_ensure_dir(&candidate).await {
                Ok(()) => candidate,
                Err(e) => {
                    log::warn!("{e}; falling back to {}", self.cwd.display());
                    self.default_path(config)
                }
            },
            None => self.default_path(config),
        };

        Bundle::from_parts(path, config.name())
    }

    /// Strict form of [`resolve`](Self::resolve).
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectoryCreation`](crate::bundler::Error::DirectoryCreation)
    /// when a base path is configured but `<base>/<name>.app` cannot be created.
    pub async fn try_resolve(&self, config: &BundleConfig) -> Result<Bundle> {
        let path = match self.base_candidate(config) {
            Some(candidate) => {
                fs::try_ensure_dir(&candidate).await?;
                candidate
            }
            None => self.default_path(config),
        };

        Ok(Bundle::from_parts(path, config.name()))
    }

    /// The base-path candidate, or `None` when the system root or no base path is configured.
    fn base_candidate(&self, config: &BundleConfig) -> Option<PathBuf> {
        if config.use_system_root() {
            return None;
        }
        let candidate = config.base_path()?.join(app_folder_name(config.name()));
        Some(match candidate.absolutize_from(&self.cwd) {
            Ok(absolute) => absolute.into_owned(),
            Err(_) => candidate.clone(),
        })
    }

    fn default_path(&self, config: &BundleConfig) -> PathBuf {
        if config.use_system_root() {
            system_root_app_path(config.name())
        } else {
            self.cwd.join(app_folder_name(config.name()))
        }
    }
}
