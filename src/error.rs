//! Top-level error types for the command line tool.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type returned by [`crate::cli::run`]
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Installer build errors
    #[error("{0}")]
    Bundler(#[from] crate::bundler::Error),
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
}

impl BundlerError {
    /// Actionable hint for the failure, when there is one.
    pub fn suggestion(&self) -> Option<&'static str> {
        use crate::bundler::Error;

        match self {
            Self::Bundler(Error::MissingTool { .. }) => {
                Some("set --wix-home/WIX_HOME and --wine/WINE_CMD, or the [toolchain] config section")
            }
            Self::Bundler(Error::Download { .. }) => {
                Some("check network access, or place the archive in the distribution folder")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_tool_has_suggestion() {
        let err = BundlerError::from(crate::bundler::Error::MissingTool {
            tool: "candle.exe".into(),
            location: PathBuf::from("/opt/wix/candle.exe"),
        });
        assert_eq!(err.to_string(), "candle.exe not found at /opt/wix/candle.exe");
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn invalid_arguments_display() {
        let err = BundlerError::from(CliError::InvalidArguments {
            reason: "--build cannot be empty".into(),
        });
        assert_eq!(err.to_string(), "CLI error: Invalid arguments: --build cannot be empty");
        assert!(err.suggestion().is_none());
    }
}
