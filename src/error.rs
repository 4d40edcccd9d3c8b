//! Error types for the command line front end.
//!
//! Library operations return [`crate::bundler::Error`]; this module wraps it
//! together with argument and manifest failures and attaches recovery suggestions.

use crate::bundler::Error as BundlerError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, MacAppError>;

/// Main error type for the `kodegen_bundler_macapp` binary
#[derive(Error, Debug)]
pub enum MacAppError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Manifest errors
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Bundler errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] BundlerError),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },
}

/// Manifest loading errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file could not be read
    #[error("Failed to read manifest {path}: {source}")]
    Read {
        /// Manifest path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Manifest is not valid TOML or has unexpected fields
    #[error("Failed to parse manifest {path}: {source}")]
    Parse {
        /// Manifest path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: toml::de::Error,
    },

    /// Cargo.toml has neither `[package.metadata.macapp]` nor a package name
    #[error("No bundle configuration found in {path}: {reason}")]
    MissingSection {
        /// Manifest path
        path: PathBuf,
        /// What was missing
        reason: String,
    },
}

impl MacAppError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            MacAppError::Bundler(e) => bundler_suggestions(root_cause(e)),
            MacAppError::Cli(CliError::MissingArgument { argument }) => vec![
                format!("Pass {} on the command line", argument),
                "Or point --manifest at a file that sets it".to_string(),
            ],
            MacAppError::Cli(CliError::InvalidArguments { .. }) => vec![
                "Run with --help to see the accepted flags and values".to_string(),
            ],
            MacAppError::Manifest(ManifestError::Parse { .. }) => vec![
                "Check the manifest keys: name, base_path, use_system_root, binary, icon, converter, convert_timeout_secs".to_string(),
            ],
            MacAppError::Manifest(ManifestError::MissingSection { .. }) => vec![
                "Add a [package.metadata.macapp] table to Cargo.toml".to_string(),
            ],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}

fn root_cause(error: &BundlerError) -> &BundlerError {
    match error {
        BundlerError::Context(_, inner) => root_cause(inner),
        other => other,
    }
}

fn bundler_suggestions(error: &BundlerError) -> Vec<String> {
    match error {
        BundlerError::ToolNotFound { tool } => vec![
            format!("Install {} (https://imagemagick.org) and make sure it is on PATH", tool),
            "Use --converter native to encode the icon in-process".to_string(),
            "Or pass a ready-made .icns file as --icon".to_string(),
        ],
        BundlerError::ToolTimedOut { .. } => vec![
            "Raise --convert-timeout or omit it to wait indefinitely".to_string(),
        ],
        BundlerError::NotRegularFile { path } => vec![
            format!("{} must be a regular file, not a directory or broken link", path.display()),
        ],
        BundlerError::DirectoryCreation { path, .. } => vec![
            format!("Check write permissions for {}", path.display()),
            "Choose a writable --base-path".to_string(),
            "Writing to /Applications usually requires elevated privileges".to_string(),
        ],
        BundlerError::InvalidName { .. } => vec![
            "Use a bundle name without '/' or '\\', e.g. \"My App\"".to_string(),
        ],
        _ => vec!["Check the error message above for specific details".to_string()],
    }
}
