//! Error types for bundle construction.
//!
//! Provides contextual error chaining, filesystem errors that carry the
//! offending path, and the external-tool failures raised by icon converters.
//!
//! # Features
//!
//! - **Context trait**: Add context to errors similar to anyhow
//! - **ErrorExt trait**: Filesystem operations with automatic path context
//!
//! # Example
//!
//! ```no_run
//! # use std::path::{Path, PathBuf};
//! # type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
//! #
//! # trait ErrorExt<T> {
//! #     fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
//! # }
//! # impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
//! #     fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
//! #         self.map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
//! #     }
//! # }
//! #
//! fn read_descriptor(path: &Path) -> Result<String> {
//!     let contents = std::fs::read_to_string(path)
//!         .fs_context("reading descriptor", path)?;
//!     Ok(contents)
//! }
//! ```

use std::{
    fmt::Display,
    io,
    path::PathBuf,
    time::Duration,
};
use thiserror::Error as DeriveError;

/// Errors returned by the bundler.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Error with context. Created by the [`Context`] trait.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// File system error with path context.
    ///
    /// Covers open/create/read/write failures during copies, including
    /// permission errors. Created by the [`ErrorExt`] trait's `fs_context` method.
    #[error("{context} {path}: {error}")]
    Fs {
        /// Context describing the operation (e.g., "copying binary")
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// A bundle directory could not be created.
    ///
    /// The lenient folder operations turn this into `false` or a logged warning;
    /// the `try_*` operations return it.
    #[error("failed to create directory {path}: {error}")]
    DirectoryCreation {
        /// Directory that could not be created
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// Copy source is a directory, a dangling symlink or a special file.
    #[error("{path} is not a regular file")]
    NotRegularFile {
        /// Offending source path
        path: PathBuf,
    },

    /// Copy source and destination are the same file.
    #[error("{path} cannot be copied onto itself")]
    SameFile {
        /// The shared path
        path: PathBuf,
    },

    /// Bundle name is empty or contains path separators.
    #[error("invalid bundle name {name:?}: {reason}")]
    InvalidName {
        /// The rejected name
        name: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Path handed to [`Bundle::open`](crate::bundler::Bundle::open) is not a `.app` directory.
    #[error("{0} is not a .app bundle")]
    NotABundle(PathBuf),

    /// Child process could not be spawned or awaited.
    #[error("failed to run command {command}: {error}")]
    CommandFailed {
        /// Command that failed to execute
        command: String,
        /// The underlying error
        error: io::Error,
    },

    /// External converter was not found on `PATH`.
    #[error("{tool} not found in PATH")]
    ToolNotFound {
        /// Program name that was searched for
        tool: String,
    },

    /// External converter exited unsuccessfully.
    #[error("{tool} exited with status {status:?}: {output}")]
    ExternalTool {
        /// Program that failed
        tool: String,
        /// Exit code, `None` when terminated by a signal
        status: Option<i32>,
        /// Combined stdout and stderr
        output: String,
    },

    /// External converter exceeded its time limit and was killed.
    #[error("{tool} timed out after {timeout:?}")]
    ToolTimedOut {
        /// Program that timed out
        tool: String,
        /// Limit that was exceeded
        timeout: Duration,
    },

    /// External converter was cancelled and killed.
    #[error("{tool} was cancelled")]
    ToolCancelled {
        /// Program that was cancelled
        tool: String,
    },

    /// Generic I/O error.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Image decoding error (icon conversion, resizing).
    #[error("{0}")]
    ImageError(#[from] image::ImageError),

    /// Handlebars template rendering error.
    #[error("{0}")]
    HandleBarsError(#[from] handlebars::RenderError),

    /// Handlebars template parsing error.
    #[error("{0}")]
    Template(#[from] handlebars::TemplateError),

    /// Property list parsing error.
    #[error("{0}")]
    Plist(#[from] plist::Error),

    /// Generic error with custom message.
    #[error("{0}")]
    GenericError(String),
}

impl Error {
    /// Returns true for the copy-source rejection, regardless of context wrapping.
    pub fn is_not_regular_file(&self) -> bool {
        match self {
            Error::NotRegularFile { .. } => true,
            Error::Context(_, inner) => inner.is_not_regular_file(),
            _ => false,
        }
    }
}

/// Convenient type alias for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for adding context to errors.
///
/// Similar to `anyhow::Context` but integrated with bundler's Error type.
/// Works with both `Result<T, E>` and `Option<T>`.
pub trait Context<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Add context to an error using a closure (lazy evaluation).
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), Box::new(e)))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Extension trait for filesystem operations with automatic path context.
///
/// # Examples
///
/// ```no_run
/// # use std::path::{Path, PathBuf};
/// # type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
/// #
/// # trait ErrorExt<T> {
/// #     fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
/// # }
/// # impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
/// #     fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
/// #         self.map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
/// #     }
/// # }
/// #
/// fn write_descriptor(path: &Path, xml: &str) -> Result<()> {
///     std::fs::write(path, xml).fs_context("writing descriptor", path)?;
///     Ok(())
/// }
/// ```
pub trait ErrorExt<T> {
    /// Add filesystem context to an I/O error.
    ///
    /// The `context` should be a present-tense verb phrase describing the operation,
    /// e.g., "reading file", "creating directory", "copying binary".
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}
