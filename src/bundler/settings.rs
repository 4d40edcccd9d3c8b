//! Bundle configuration.
//!
//! [`BundleConfig`] is the immutable input to path resolution: the bundle name,
//! an optional base directory and the system-root flag. It is validated on
//! construction so every later stage can rely on a usable name.

use crate::bundler::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Input describing where and under which name a `.app` bundle is created.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_macapp::bundler::BundleConfig;
///
/// # fn example() -> kodegen_bundler_macapp::bundler::Result<()> {
/// let config = BundleConfig::builder()
///     .name("Demo")
///     .base_path("/tmp/x")
///     .build()?;
/// assert_eq!(config.name(), "Demo");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(try_from = "RawBundleConfig")]
pub struct BundleConfig {
    /// Bundle name, used for `<name>.app`, the executable and the icon file.
    name: String,

    /// Directory the bundle is placed in when it can be created.
    ///
    /// Default: None (working directory)
    base_path: Option<PathBuf>,

    /// Place the bundle under the system applications root, overriding `base_path`.
    ///
    /// Default: false
    use_system_root: bool,
}

/// Unvalidated serde form of [`BundleConfig`].
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBundleConfig {
    name: String,
    #[serde(default)]
    base_path: Option<PathBuf>,
    #[serde(default)]
    use_system_root: bool,
}

impl TryFrom<RawBundleConfig> for BundleConfig {
    type Error = Error;

    fn try_from(raw: RawBundleConfig) -> Result<Self> {
        BundleConfig::builder()
            .name(raw.name)
            .maybe_base_path(raw.base_path)
            .use_system_root(raw.use_system_root)
            .build()
    }
}

impl BundleConfig {
    /// Creates a config for `name` with no base path and the system-root flag off.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::builder().name(name).build()
    }

    /// Returns a builder.
    pub fn builder() -> BundleConfigBuilder {
        BundleConfigBuilder::default()
    }

    /// Bundle name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base directory, if one was supplied and is non-empty.
    pub fn base_path(&self) -> Option<&Path> {
        self.base_path.as_deref().filter(|p| !p.as_os_str().is_empty())
    }

    /// Whether the bundle goes under the system applications root.
    pub fn use_system_root(&self) -> bool {
        self.use_system_root
    }

    /// Checks the name rules. Run by the builder, which deserialization goes through.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)
    }
}

/// Builder for [`BundleConfig`].
#[derive(Default)]
pub struct BundleConfigBuilder {
    name: Option<String>,
    base_path: Option<PathBuf>,
    use_system_root: bool,
}

impl BundleConfigBuilder {
    /// Sets the bundle name.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the base directory.
    pub fn base_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.base_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets or clears the base directory.
    pub fn maybe_base_path(mut self, path: Option<PathBuf>) -> Self {
        self.base_path = path;
        self
    }

    /// Sets the system-root flag.
    pub fn use_system_root(mut self, use_system_root: bool) -> Self {
        self.use_system_root = use_system_root;
        self
    }

    /// Builds the config.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidName`] if the name is missing, empty, `.`/`..`,
    /// or contains a path separator or NUL byte.
    pub fn build(self) -> Result<BundleConfig> {
        let config = BundleConfig {
            name: self.name.unwrap_or_default(),
            base_path: self.base_path,
            use_system_root: self.use_system_root,
        };
        config.validate()?;
        Ok(config)
    }
}

fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "name must not be empty"
    } else if name == "." || name == ".." {
        "name must not be a relative directory reference"
    } else if name.contains(['/', '\\']) {
        "name must not contain path separators"
    } else if name.contains('\0') {
        "name must not contain NUL bytes"
    } else {
        return Ok(());
    };

    Err(Error::InvalidName {
        name: name.to_string(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = BundleConfig::new("Demo").unwrap();
        assert_eq!(config.name(), "Demo");
        assert_eq!(config.base_path(), None);
        assert!(!config.use_system_root());
    }

    #[test]
    fn test_empty_base_path_is_ignored() {
        let config = BundleConfig::builder()
            .name("Demo")
            .base_path("")
            .build()
            .unwrap();
        assert_eq!(config.base_path(), None);
    }

    #[test]
    fn test_rejects_bad_names() {
        for bad in ["", ".", "..", "a/b", "a\\b", "nul\0"] {
            assert!(
                matches!(BundleConfig::new(bad), Err(Error::InvalidName { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_missing_name_is_rejected() {
        assert!(BundleConfig::builder().build().is_err());
    }

    #[test]
    fn test_deserialize_validates_name() {
        let config: BundleConfig =
            serde_json::from_str(r#"{"name":"Demo","base_path":"/tmp/x"}"#).unwrap();
        assert_eq!(config.base_path(), Some(Path::new("/tmp/x")));
        assert!(!config.use_system_root());

        let err = serde_json::from_str::<BundleConfig>(r#"{"name":"../escape"}"#).unwrap_err();
        assert!(err.to_string().contains("path separators"), "{err}");
    }

    #[test]
    fn test_serialized_config_reads_back() {
        let config = BundleConfig::builder()
            .name("Demo")
            .use_system_root(true)
            .build()
            .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<BundleConfig>(&json).unwrap(), config);
    }

    #[test]
    fn test_names_with_spaces_and_dots_are_fine() {
        assert!(BundleConfig::new("My App 2.0").is_ok());
    }
}
