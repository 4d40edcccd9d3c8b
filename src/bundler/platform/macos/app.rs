//! macOS application bundle (.app) creation.
//!
//! A [`Bundle`] is an immutable handle naming a `<name>.app` directory. It is
//! obtained by resolving a [`BundleConfig`] and exposes the operations that
//! materialize the layout and place the executable and icon.
//!
//! Folder and descriptor operations come in two forms: a lenient one that logs
//! and reports `bool`/nothing, and a `try_*` form returning typed errors. Copy
//! operations always return typed errors.

use super::{
    APP_EXTENSION, CONTENTS_DIR, DESCRIPTOR_FILE, ICON_EXTENSION, MACOS_DIR, RESOURCES_DIR,
    descriptor::render_descriptor,
    icon::{ConvertOptions, IconConverter},
    path::PathResolver,
};
use crate::bundler::{
    error::{Context, Error, Result},
    settings::BundleConfig,
    utils::fs,
};
use std::path::{Path, PathBuf};

/// Handle to a (possibly not yet existing) `<name>.app` directory.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_macapp::bundler::{Bundle, BundleConfig};
///
/// # async fn example() -> kodegen_bundler_macapp::bundler::Result<()> {
/// let config = BundleConfig::builder().name("Demo").base_path("/tmp/x").build()?;
/// let bundle = Bundle::create(&config).await?;
/// bundle.place_binary("/bin/echo").await?;
/// bundle.place_icon("/tmp/icon.icns").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Bundle {
    path: PathBuf,
    name: String,
}

impl Bundle {
    pub(crate) fn from_parts(path: PathBuf, name: &str) -> Self {
        Self {
            path,
            name: name.to_string(),
        }
    }

    /// Resolves `config` against the process working directory without creating the layout.
    pub async fn new(config: &BundleConfig) -> Result<Self> {
        Ok(PathResolver::from_current_dir()?.resolve(config).await)
    }

    /// Attaches to an existing `<name>.app` path. The name is the file stem.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotABundle`] if the path does not end in `.app` or is not
    /// a directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let is_app = path.extension().is_some_and(|ext| ext == APP_EXTENSION);
        if !is_app || !path.is_dir() {
            return Err(Error::NotABundle(path.to_path_buf()));
        }

        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .context("bundle name is not valid UTF-8")?;
        BundleConfig::new(name)?;

        let path = PathResolver::from_current_dir()?.cwd().join(path);
        Ok(Self::from_parts(path, name))
    }

    /// Resolves `config` against the process working directory and creates the
    /// skeleton: top-level folder, `Contents/MacOS`, `Contents/Resources` and the
    /// descriptor.
    ///
    /// Folder and descriptor failures are logged, not returned; use
    /// [`inspect`](Self::inspect) to confirm the result. Only reading the working
    /// directory can fail.
    pub async fn create(config: &BundleConfig) -> Result<Self> {
        Ok(Self::create_with(&PathResolver::from_current_dir()?, config).await)
    }

    /// [`create`](Self::create) with an explicit resolver.
    pub async fn create_with(resolver: &PathResolver, config: &BundleConfig) -> Self {
        let bundle = resolver.resolve(config).await;
        log::info!("Bundling {} at {}", config.name(), bundle.path.display());

        bundle.ensure_top_level_folder().await;
        bundle.ensure_content_structure().await;
        bundle
    }

    /// Strict [`create`](Self::create): every resolution, folder and descriptor
    /// failure is returned.
    pub async fn try_create(config: &BundleConfig) -> Result<Self> {
        Self::try_create_with(&PathResolver::from_current_dir()?, config).await
    }

    /// [`try_create`](Self::try_create) with an explicit resolver.
    pub async fn try_create_with(resolver: &PathResolver, config: &BundleConfig) -> Result<Self> {
        let bundle = resolver.try_resolve(config).await?;
        log::info!("Bundling {} at {}", config.name(), bundle.path.display());

        bundle.try_ensure_top_level_folder().await?;
        bundle.try_ensure_content_structure().await?;
        Ok(bundle)
    }

    /// Absolute path of the `.app` directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bundle name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `<bundle>/Contents`
    pub fn contents_path(&self) -> PathBuf {
        self.path.join(CONTENTS_DIR)
    }

    /// `<bundle>/Contents/MacOS`
    pub fn macos_path(&self) -> PathBuf {
        self.contents_path().join(MACOS_DIR)
    }

    /// `<bundle>/Contents/Resources`
    pub fn resources_path(&self) -> PathBuf {
        self.contents_path().join(RESOURCES_DIR)
    }

    /// `<bundle>/Contents/info.plist`
    pub fn descriptor_path(&self) -> PathBuf {
        self.contents_path().join(DESCRIPTOR_FILE)
    }

    /// `<bundle>/Contents/MacOS/<name>`
    pub fn binary_path(&self) -> PathBuf {
        self.macos_path().join(&self.name)
    }

    /// `<bundle>/Contents/Resources/<name>.icns`
    pub fn icon_path(&self) -> PathBuf {
        self.resources_path().join(format!("{}.{}", self.name, ICON_EXTENSION))
    }

    /// Creates the bundle directory if absent.
    ///
    /// Returns whether it exists after the call, `true` when it already existed.
    pub async fn ensure_top_level_folder(&self) -> bool {
        fs::ensure_dir(&self.path).await
    }

    /// Typed form of [`ensure_top_level_folder`](Self::ensure_top_level_folder).
    pub async fn try_ensure_top_level_folder(&self) -> Result<()> {
        fs::try_ensure_dir(&self.path).await
    }

    /// Creates `Contents/MacOS` and `Contents/Resources`, then writes the
    /// descriptor, replacing any existing one. Failures are logged.
    pub async fn ensure_content_structure(&self) {
        if let Err(e) = self.try_ensure_content_structure().await {
            log::warn!("{e}");
        }
    }

    /// Typed form of [`ensure_content_structure`](Self::ensure_content_structure).
    pub async fn try_ensure_content_structure(&self) -> Result<()> {
        fs::try_ensure_dir(&self.macos_path()).await?;
        fs::try_ensure_dir(&self.resources_path()).await?;
        self.write_descriptor().await
    }

    async fn write_descriptor(&self) -> Result<()> {
        let descriptor_path = self.descriptor_path();
        let xml = render_descriptor(&self.name)?;

        fs::write_file(&descriptor_path, xml.as_bytes()).await?;
        fs::set_executable(&descriptor_path).await?;

        log::debug!("Wrote descriptor {}", descriptor_path.display());
        Ok(())
    }

    /// Copies `source` to `Contents/MacOS/<name>` and marks it executable.
    ///
    /// Returns the number of bytes copied.
    ///
    /// # Errors
    ///
    /// - [`Error::NotRegularFile`] if `source` is a directory, dangling symlink or special file
    /// - [`Error::Fs`] if `source` cannot be read or the destination cannot be written
    pub async fn place_binary(&self, source: impl AsRef<Path>) -> Result<u64> {
        let destination = self.binary_path();
        let copied = fs::copy_regular_file(source.as_ref(), &destination)
            .await
            .with_context(|| format!("failed to copy {} to .app bundle", self.name))?;
        fs::set_executable(&destination).await?;

        log::info!("✓ Placed binary {} ({} bytes)", destination.display(), copied);
        Ok(copied)
    }

    /// Copies a ready-made `.icns` file to `Contents/Resources/<name>.icns`.
    ///
    /// Same contract as [`place_binary`](Self::place_binary), without the mode
    /// change. Other image formats go through [`convert_icon`](Self::convert_icon).
    pub async fn place_icon(&self, source: impl AsRef<Path>) -> Result<u64> {
        let destination = self.icon_path();
        let copied = fs::copy_regular_file(source.as_ref(), &destination)
            .await
            .context("failed to copy app icon")?;

        log::info!("✓ Placed icon {} ({} bytes)", destination.display(), copied);
        Ok(copied)
    }

    /// Converts `source` into `Contents/Resources/<name>.icns` with `converter`.
    ///
    /// Returns the converter's diagnostics.
    pub async fn convert_icon<C: IconConverter>(
        &self,
        converter: &C,
        source: impl AsRef<Path>,
        options: &ConvertOptions,
    ) -> Result<String> {
        let destination = self.icon_path();
        converter
            .convert(source.as_ref(), &destination, options)
            .await
            .with_context(|| format!("failed to create app icon with {}", converter.name()))
    }

    /// Places an icon, copying `.icns` sources and converting anything else.
    pub async fn install_icon<C: IconConverter>(
        &self,
        converter: &C,
        source: impl AsRef<Path>,
        options: &ConvertOptions,
    ) -> Result<()> {
        let source = source.as_ref();
        let is_icns = source
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(ICON_EXTENSION));

        if is_icns {
            self.place_icon(source).await?;
        } else {
            let diagnostics = self.convert_icon(converter, source, options).await?;
            if !diagnostics.trim().is_empty() {
                log::debug!("{} output: {}", converter.name(), diagnostics.trim());
            }
        }
        Ok(())
    }
}
