//! Bundle manifests.
//!
//! Bundle options can live in a standalone TOML file:
//!
//! ```toml
//! name = "Demo"
//! base_path = "dist"
//! binary = "target/release/demo"
//! icon = "assets/icon.png"
//! converter = "native"
//! convert_timeout_secs = 30
//! ```
//!
//! or in a `Cargo.toml` under `[package.metadata.macapp]`, where `name` defaults
//! to the package name and `binary` to `target/release/<first [[bin]] or package name>`
//! when that file exists. Relative paths are resolved against the manifest's directory.

use crate::bundler::ConverterKind;
use crate::error::{ManifestError, Result};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Options read from a manifest. Every field is optional; CLI flags take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BundleManifest {
    /// Bundle name
    pub name: Option<String>,
    /// Directory the bundle is created in
    pub base_path: Option<PathBuf>,
    /// Place the bundle under /Applications
    pub use_system_root: Option<bool>,
    /// Executable to place in Contents/MacOS
    pub binary: Option<PathBuf>,
    /// Icon to place in Contents/Resources (.icns copied, anything else converted)
    pub icon: Option<PathBuf>,
    /// Icon converter selection
    pub converter: Option<ConverterKind>,
    /// Time limit for external icon conversion
    pub convert_timeout_secs: Option<u64>,
}

/// Load a manifest, dispatching on the file name: `Cargo.toml` is read through
/// its `[package.metadata.macapp]` table, anything else as a standalone manifest.
pub fn load_manifest(path: &Path) -> Result<BundleManifest> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parse_error = |source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    };

    let is_cargo = path.file_name().is_some_and(|name| name == "Cargo.toml");

    let manifest = if is_cargo {
        let document: toml::Table = toml::from_str(&content).map_err(parse_error)?;
        from_cargo_document(path, &document)?
    } else {
        toml::from_str(&content).map_err(parse_error)?
    };

    let base_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let base_dir = match base_dir.absolutize() {
        Ok(absolute) => absolute.into_owned(),
        Err(_) => base_dir.to_path_buf(),
    };
    Ok(manifest.relative_to(&base_dir))
}

fn from_cargo_document(path: &Path, document: &toml::Table) -> Result<BundleManifest> {
    let package = document.get("package");
    let package_name = package
        .and_then(|p| p.get("name"))
        .and_then(|v| v.as_str());

    let mut manifest = match package
        .and_then(|p| p.get("metadata"))
        .and_then(|m| m.get("macapp"))
    {
        Some(table) => table
            .clone()
            .try_into::<BundleManifest>()
            .map_err(|source| ManifestError::Parse {
                path: path.to_path_buf(),
                source,
            })?,
        None if package_name.is_some() => BundleManifest::default(),
        None => {
            return Err(ManifestError::MissingSection {
                path: path.to_path_buf(),
                reason: "no [package] name and no [package.metadata.macapp] table".to_string(),
            }
            .into());
        }
    };

    if manifest.name.is_none() {
        manifest.name = package_name.map(String::from);
    }

    if manifest.binary.is_none() {
        let binary_name = document
            .get("bin")
            .and_then(|v| v.as_array())
            .and_then(|arr| arr.first())
            .and_then(|first| first.get("name"))
            .and_then(|v| v.as_str())
            .or(package_name);

        let manifest_dir = path.parent().unwrap_or(Path::new("."));
        manifest.binary = binary_name
            .map(|name| PathBuf::from("target/release").join(name))
            .filter(|candidate| manifest_dir.join(candidate).is_file());
    }

    Ok(manifest)
}

impl BundleManifest {
    /// Resolve relative paths against `dir`.
    pub fn relative_to(mut self, dir: &Path) -> Self {
        let resolve = |path: PathBuf| match path.absolutize_from(dir) {
            Ok(absolute) => absolute.into_owned(),
            Err(_) => path.clone(),
        };

        self.base_path = self.base_path.map(resolve);
        self.binary = self.binary.map(resolve);
        self.icon = self.icon.map(resolve);
        self
    }
}
