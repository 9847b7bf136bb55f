//! Grafana MSI installer builder.
//!
//! Packages a Grafana release archive (standard or enterprise edition) as a
//! Windows installer, driving heat, candle and light from the WiX toolset
//! and wrapping grafana-server as a service with NSSM.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod source;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
