//! On-disk state of a bundle.
//!
//! The lenient creation path does not report folder or descriptor failures, so
//! callers that need certainty re-query the bundle with [`Bundle::inspect`].

use super::app::Bundle;
use crate::bundler::error::Result;
use std::path::{Path, PathBuf};

/// Values read back from `Contents/info.plist`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct DescriptorInfo {
    /// `CFBundleDisplayName`
    pub display_name: Option<String>,
    /// `CFBundleIconFile`
    pub icon_file: Option<String>,
}

/// Snapshot of what exists inside a bundle.
#[derive(Clone, Debug, serde::Serialize)]
pub struct BundleStatus {
    /// Bundle directory.
    pub path: PathBuf,
    /// Bundle name.
    pub name: String,
    /// `<name>.app` is a directory.
    pub exists: bool,
    /// `Contents/MacOS` is a directory.
    pub macos_dir: bool,
    /// `Contents/Resources` is a directory.
    pub resources_dir: bool,
    /// Parsed descriptor, `None` when missing or unreadable.
    pub descriptor: Option<DescriptorInfo>,
    /// Size of the executable, `None` when missing.
    pub binary_size: Option<u64>,
    /// Executable has any execute bit set (always true off unix when present).
    pub binary_executable: bool,
    /// Size of the icon, `None` when missing.
    pub icon_size: Option<u64>,
}

impl BundleStatus {
    /// Every part of the layout is present and the descriptor names this bundle.
    pub fn is_complete(&self) -> bool {
        let descriptor_matches = self.descriptor.as_ref().is_some_and(|d| {
            d.display_name.as_deref() == Some(self.name.as_str())
                && d.icon_file.as_deref() == Some(self.name.as_str())
        });

        self.exists
            && self.macos_dir
            && self.resources_dir
            && descriptor_matches
            && self.binary_size.is_some()
            && self.binary_executable
            && self.icon_size.is_some()
    }

    /// Human-readable list of what is missing.
    pub fn missing(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if !self.exists {
            missing.push(format!("{} does not exist", self.path.display()));
            return missing;
        }
        if !self.macos_dir {
            missing.push("Contents/MacOS directory".to_string());
        }
        if !self.resources_dir {
            missing.push("Contents/Resources directory".to_string());
        }
        match &self.descriptor {
            None => missing.push("Contents/info.plist descriptor".to_string()),
            Some(d) => {
                if d.display_name.as_deref() != Some(self.name.as_str()) {
                    missing.push("CFBundleDisplayName matching the bundle name".to_string());
                }
                if d.icon_file.as_deref() != Some(self.name.as_str()) {
                    missing.push("CFBundleIconFile matching the bundle name".to_string());
                }
            }
        }
        if self.binary_size.is_none() {
            missing.push(format!("Contents/MacOS/{} executable", self.name));
        } else if !self.binary_executable {
            missing.push(format!("execute permission on Contents/MacOS/{}", self.name));
        }
        if self.icon_size.is_none() {
            missing.push(format!("Contents/Resources/{}.icns icon", self.name));
        }
        missing
    }
}

impl Bundle {
    /// Reads the current on-disk state of the bundle.
    pub async fn inspect(&self) -> BundleStatus {
        let binary = file_metadata(&self.binary_path()).await;
        let descriptor = match read_descriptor(&self.descriptor_path()).await {
            Ok(info) => Some(info),
            Err(e) => {
                log::debug!("descriptor unavailable: {e}");
                None
            }
        };

        BundleStatus {
            path: self.path().to_path_buf(),
            name: self.name().to_string(),
            exists: is_dir(self.path()).await,
            macos_dir: is_dir(&self.macos_path()).await,
            resources_dir: is_dir(&self.resources_path()).await,
            descriptor,
            binary_size: binary.as_ref().map(|m| m.len()),
            binary_executable: binary.as_ref().is_some_and(is_executable),
            icon_size: file_metadata(&self.icon_path()).await.map(|m| m.len()),
        }
    }
}

async fn read_descriptor(path: &Path) -> Result<DescriptorInfo> {
    let bytes = tokio::fs::read(path).await?;
    let value = plist::Value::from_reader_xml(bytes.as_slice())?;
    let dict = value.as_dictionary();
    let field = |key: &str| {
        dict.and_then(|d| d.get(key))
            .and_then(|v| v.as_string())
            .map(str::to_string)
    };

    Ok(DescriptorInfo {
        display_name: field("CFBundleDisplayName"),
        icon_file: field("CFBundleIconFile"),
    })
}

async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

async fn file_metadata(path: &Path) -> Option<std::fs::Metadata> {
    tokio::fs::metadata(path).await.ok().filter(|m| m.is_file())
}

#[cfg(unix)]
fn is_executable(metadata: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &std::fs::Metadata) -> bool {
    true
}
