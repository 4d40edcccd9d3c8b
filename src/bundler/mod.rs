//! macOS `.app` bundle skeleton generation.
//!
//! This module resolves where a bundle lives, creates the
//! `<Name>.app/Contents/{MacOS,Resources}` layout with its `info.plist`
//! descriptor, and places a caller-supplied executable and icon.
//!
//! # Control flow
//!
//! resolve path → create top-level folder → create `Contents/MacOS` and
//! `Contents/Resources` → write descriptor → place binary and icon.
//!
//! # Example
//!
//! ```no_run
//! use kodegen_bundler_macapp::bundler::{Bundle, BundleConfig, CommandConverter, ConvertOptions};
//!
//! # async fn example() -> kodegen_bundler_macapp::bundler::Result<()> {
//! let config = BundleConfig::builder()
//!     .name("Demo")
//!     .base_path("/tmp/x")
//!     .build()?;
//!
//! let bundle = Bundle::create(&config).await?;
//! let copied = bundle.place_binary("/bin/echo").await?;
//! bundle
//!     .install_icon(&CommandConverter::magick(), "assets/icon.png", &ConvertOptions::default())
//!     .await?;
//!
//! println!("{} ({} byte executable)", bundle.path().display(), copied);
//! # Ok(())
//! # }
//! ```
//!
//! # Strict mode
//!
//! [`Bundle::create`] never reports folder or descriptor failures and silently
//! falls back to the working directory when the base path cannot be created.
//! [`Bundle::try_create`] and [`PathResolver::try_resolve`] report both.

#![warn(missing_docs)]

pub(crate) mod error;
pub(crate) mod platform;
mod settings;
mod utils;

// Public re-exports
pub use error::{Context, Error, ErrorExt, Result};
pub use platform::macos::{
    APP_EXTENSION, CONTENTS_DIR, DESCRIPTOR_FILE, ICON_EXTENSION, MACOS_DIR, RESOURCES_DIR,
    SYSTEM_APPLICATIONS_ROOT,
    app::Bundle,
    app_folder_name,
    descriptor::{DESCRIPTOR_TEMPLATE, render_descriptor},
    icon::{
        CommandConverter, ConvertOptions, ConverterKind, IconConverter, MAGICK_PROGRAM,
        NativeIcnsConverter, SelectedConverter,
    },
    path::{PathResolver, system_root_app_path},
    status::{BundleStatus, DescriptorInfo},
};
pub use settings::{BundleConfig, BundleConfigBuilder};
