//! Command line argument parsing and validation.

use crate::bundler::ConverterKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Build minimal macOS `.app` bundles
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_macapp",
    version,
    about = "Build minimal macOS .app bundles",
    long_about = "Create the <Name>.app folder layout with a property-list descriptor,
then place an executable and an icon inside it.

Usage:
  kodegen_bundler_macapp create Demo --binary target/release/demo --icon icon.png
  kodegen_bundler_macapp create --manifest Cargo.toml
  kodegen_bundler_macapp status Demo.app --json"
)]
pub struct Args {
    /// Command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a bundle and optionally place its executable and icon
    Create {
        /// Bundle name (falls back to the manifest's name)
        #[arg(value_name = "NAME")]
        name: Option<String>,

        /// Directory the bundle is created in
        #[arg(long, value_name = "DIR", env = "MACAPP_BASE_PATH")]
        base_path: Option<PathBuf>,

        /// Create the bundle under /Applications
        #[arg(long)]
        system_root: bool,

        /// Fail instead of falling back when a folder cannot be created
        #[arg(long)]
        strict: bool,

        /// Executable copied to Contents/MacOS/<NAME>
        #[arg(long, value_name = "FILE")]
        binary: Option<PathBuf>,

        /// Icon placed at Contents/Resources/<NAME>.icns (.icns copied, others converted)
        #[arg(long, value_name = "FILE")]
        icon: Option<PathBuf>,

        /// Icon converter: magick (default) or native
        #[arg(long, value_name = "KIND", env = "MACAPP_CONVERTER")]
        converter: Option<ConverterKind>,

        /// Time limit in seconds for external icon conversion
        #[arg(long, value_name = "SECS")]
        convert_timeout: Option<u64>,

        /// Read options from a TOML manifest or a Cargo.toml
        #[arg(long, value_name = "FILE")]
        manifest: Option<PathBuf>,
    },

    /// Show what exists inside a bundle
    Status {
        /// Path to the <Name>.app directory
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Command {
    /// Command name for messages
    pub fn name(&self) -> &'static str {
        match self {
            Command::Create { .. } => "create",
            Command::Status { .. } => "status",
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        match &self.command {
            Command::Create {
                convert_timeout: Some(0),
                ..
            } => Err("--convert-timeout must be greater than zero".to_string()),
            Command::Status { path, .. } if path.as_os_str().is_empty() => {
                Err("Bundle path cannot be empty".to_string())
            }
            _ => Ok(()),
        }
    }
}

/// Configuration derived from command line arguments
#[derive(Debug)]
pub struct RuntimeConfig {
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.verbose, args.quiet),
        }
    }
}

impl RuntimeConfig {
    /// Print message
    pub fn println(&self, message: &str) {
        let _ = self.output.println(message);
    }

    /// Print verbose message
    pub fn verbose_println(&self, message: &str) {
        let _ = self.output.verbose(message);
    }

    /// Print progress message
    pub fn progress_println(&self, message: &str) {
        let _ = self.output.progress(message);
    }

    /// Print error message (always shown)
    pub fn error_println(&self, message: &str) {
        self.output.error(message);
    }

    /// Print warning message
    pub fn warning_println(&self, message: &str) {
        let _ = self.output.warn(message);
    }

    /// Print success message
    pub fn success_println(&self, message: &str) {
        let _ = self.output.success(message);
    }

    /// Print indented text
    pub fn indent(&self, message: &str) {
        let _ = self.output.indent(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create() {
        let args = Args::try_parse_from([
            "kodegen_bundler_macapp",
            "create",
            "Demo",
            "--base-path",
            "dist",
            "--converter",
            "native",
            "--convert-timeout",
            "5",
        ])
        .unwrap();

        match args.command {
            Command::Create {
                name,
                base_path,
                converter,
                convert_timeout,
                system_root,
                ..
            } => {
                assert_eq!(name.as_deref(), Some("Demo"));
                assert_eq!(base_path, Some(PathBuf::from("dist")));
                assert_eq!(converter, Some(ConverterKind::Native));
                assert_eq!(convert_timeout, Some(5));
                assert!(!system_root);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_converter_is_rejected() {
        let result = Args::try_parse_from([
            "kodegen_bundler_macapp",
            "create",
            "Demo",
            "--converter",
            "sips",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let args = Args::try_parse_from([
            "kodegen_bundler_macapp",
            "create",
            "Demo",
            "--convert-timeout",
            "0",
        ])
        .unwrap();
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_status_json_flag() {
        let args =
            Args::try_parse_from(["kodegen_bundler_macapp", "status", "Demo.app", "--json", "-q"])
                .unwrap();
        assert!(args.quiet);
        assert!(matches!(args.command, Command::Status { json: true, .. }));
    }
}
