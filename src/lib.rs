//! # kodegen_bundler_macapp
//!
//! Builds minimal macOS `.app` bundles: the `<Name>.app/Contents/{MacOS,Resources}`
//! layout, a property-list descriptor, an executable and an `.icns` icon.
//!
//! ## Features
//!
//! - **Path resolution**: `/Applications`, a caller-chosen base directory, or the working directory
//! - **Lenient and strict creation**: silent fallback by default, typed errors on request
//! - **Icon conversion**: ImageMagick subprocess with timeout and cancellation, or an opt-in in-process encoder
//! - **Inspection**: read back what a bundle contains
//!
//! ## Usage
//!
//! ```bash
//! kodegen_bundler_macapp create Demo --base-path dist --binary target/release/demo --icon icon.png
//! kodegen_bundler_macapp create --manifest Cargo.toml --strict
//! kodegen_bundler_macapp status dist/Demo.app --json
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod bundler;
pub mod cli;
pub mod error;
pub mod manifest;

pub use bundler::{Bundle, BundleConfig, BundleStatus, ConverterKind, PathResolver};
pub use cli::Args;
pub use error::{CliError, MacAppError, ManifestError, Result};
pub use manifest::{BundleManifest, load_manifest};
