//! macOS `.app` bundle skeleton support.
//!
//! This module derives bundle paths, materializes the directory layout and
//! places the executable and icon at their fixed locations.
//!
//! # Layout
//!
//! ```text
//! <Name>.app/
//!   Contents/
//!     MacOS/<Name>            executable, mode 0755
//!     Resources/<Name>.icns   icon
//!     info.plist              descriptor, mode 0755
//! ```
//!
//! # Modules
//!
//! - [`path`]: resolves where the bundle lives (system root, base path or working directory)
//! - [`app`]: the [`Bundle`](app::Bundle) handle and its folder/copy operations
//! - [`descriptor`]: the fixed `info.plist` template
//! - [`icon`]: pluggable image-to-ICNS converters
//! - [`status`]: reads back what is on disk

pub mod app;
pub mod descriptor;
pub mod icon;
pub mod path;
pub mod status;

/// Root directory for system-wide applications.
pub const SYSTEM_APPLICATIONS_ROOT: &str = "/Applications";

/// Extension of the bundle directory.
pub const APP_EXTENSION: &str = "app";

/// Top-level directory inside the bundle.
pub const CONTENTS_DIR: &str = "Contents";

/// Directory holding the executable, relative to [`CONTENTS_DIR`].
pub const MACOS_DIR: &str = "MacOS";

/// Directory holding the icon, relative to [`CONTENTS_DIR`].
pub const RESOURCES_DIR: &str = "Resources";

/// Descriptor file name, relative to [`CONTENTS_DIR`].
pub const DESCRIPTOR_FILE: &str = "info.plist";

/// Extension of the icon file.
pub const ICON_EXTENSION: &str = "icns";

/// Returns `<name>.app`.
pub fn app_folder_name(name: &str) -> String {
    format!("{name}.{APP_EXTENSION}")
}
