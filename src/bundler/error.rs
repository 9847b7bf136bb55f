//! Error types for installer build operations.
//!
//! Provides contextual error chaining, filesystem errors carrying the path
//! that failed, and one variant per pipeline failure class (version
//! resolution, download, extraction, toolchain).
//!
//! # Features
//!
//! - **Context trait**: Add context to errors similar to anyhow
//! - **ErrorExt trait**: Filesystem operations with automatic path context
//! - **bail! macro**: Early return with formatted error messages

use std::{
    fmt::Display,
    io,
    path::{self, PathBuf},
};
use thiserror::Error as DeriveError;

/// Errors returned by the installer pipeline.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Error with context. Created by the [`Context`] trait.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// File system error with path context.
    ///
    /// Created by the [`ErrorExt`] trait's `fs_context` method.
    #[error("{context} {path}: {error}")]
    Fs {
        /// Context describing the operation (e.g., "reading config file")
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// No release version was given and none could be detected on disk.
    #[error(
        "no release archive found (searched {}); pass --build to download one",
        display_paths(.searched)
    )]
    VersionNotFound {
        /// Distribution folders that were scanned
        searched: Vec<PathBuf>,
    },

    /// Remote fetch failed.
    #[error("download of {url} failed: {reason}")]
    Download {
        /// URL being fetched
        url: String,
        /// Transport error or HTTP status
        reason: String,
    },

    /// Archive could not be read or unpacked.
    #[error("failed to extract {}: {reason}", .archive.display())]
    Extraction {
        /// Archive being extracted
        archive: PathBuf,
        /// Underlying failure
        reason: String,
    },

    /// External WiX tool exited unsuccessfully.
    #[error("{tool} failed on {target} ({status})\n{output}")]
    Toolchain {
        /// Tool name (heat, candle, light)
        tool: String,
        /// Document or directory the tool was run against
        target: String,
        /// Exit status description
        status: String,
        /// Captured stdout and stderr
        output: String,
    },

    /// Child process could not be spawned at all.
    #[error("failed to run command {command}: {error}")]
    CommandFailed {
        /// Command that failed to execute
        command: String,
        /// The underlying error
        error: io::Error,
    },

    /// Required external tool is not installed where configured.
    #[error("{tool} not found at {}", .location.display())]
    MissingTool {
        /// Tool name
        tool: String,
        /// Where it was looked for
        location: PathBuf,
    },

    /// Release version cannot be expressed as an MSI version.
    #[error("invalid release version {version:?}: {reason}")]
    InvalidVersion {
        /// Version string as given
        version: String,
        /// What is wrong with it
        reason: String,
    },

    /// Configuration file could not be parsed.
    #[error("invalid configuration {}: {error}", .path.display())]
    Config {
        /// Config file path
        path: PathBuf,
        /// Parse error
        error: toml::de::Error,
    },

    /// Generic I/O error.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Error walking directory (static resources, directory copies).
    #[error("{0}")]
    WalkdirError(#[from] walkdir::Error),

    /// Path prefix stripping error.
    #[error("{0}")]
    StripError(#[from] path::StripPrefixError),

    /// Handlebars template rendering error.
    #[error("{0}")]
    HandleBarsError(#[from] handlebars::RenderError),

    /// Handlebars template parsing error.
    #[error("{0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    /// URL parsing error.
    #[error("{0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid glob pattern (archive autodetection).
    #[error("{0}")]
    GlobPattern(#[from] glob::PatternError),

    /// Glob execution error (archive autodetection).
    #[error("{0}")]
    Glob(#[from] glob::GlobError),

    /// Generic error with custom message.
    #[error("{0}")]
    GenericError(String),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convenient type alias for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for adding context to errors.
///
/// Similar to `anyhow::Context` but integrated with the bundler's Error type.
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
pub trait ErrorExt<T> {
    /// Add filesystem context to an I/O error.
    ///
    /// The `context` should be a present-tense verb phrase describing the operation,
    /// e.g., "reading file", "creating directory", "copying installer".
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

impl From<handlebars::TemplateError> for Error {
    fn from(error: handlebars::TemplateError) -> Self {
        Self::Template(Box::new(error))
    }
}

/// Macro for early return with error.
///
/// Converts the message into a [`Error::GenericError`] and returns immediately.
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::error::Error::GenericError(format!($msg)))
    };
    ($err:expr $(,)?) => {
        return Err($crate::bundler::error::Error::GenericError($err.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::error::Error::GenericError(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_wraps_inner_error() {
        let result: Result<()> = Err(Error::GenericError("boom".into()));
        let err = result.context("linking installer").unwrap_err();
        assert_eq!(err.to_string(), "linking installer: boom");
    }

    #[test]
    fn fs_context_includes_path() {
        let result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let err = result.fs_context("reading archive", "dist/x.zip").unwrap_err();
        assert!(err.to_string().contains("dist/x.zip"));
        assert!(err.to_string().starts_with("reading archive"));
    }

    fn check_name(name: &str) -> Result<()> {
        if name.is_empty() {
            crate::bail!("name is empty");
        }
        if name.contains('/') {
            crate::bail!("{name:?} contains a separator");
        }
        Ok(())
    }

    #[test]
    fn bail_formats_inline_arguments() {
        assert_eq!(check_name("").unwrap_err().to_string(), "name is empty");
        assert_eq!(
            check_name("a/b").unwrap_err().to_string(),
            r#""a/b" contains a separator"#
        );
        assert!(check_name("ab").is_ok());
    }

    #[test]
    fn version_not_found_lists_searched_folders() {
        let err = Error::VersionNotFound {
            searched: vec![PathBuf::from("dist"), PathBuf::from("enterprise-dist")],
        };
        let msg = err.to_string();
        assert!(msg.contains("dist, enterprise-dist"));
    }
}
