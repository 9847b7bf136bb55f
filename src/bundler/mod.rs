//! MSI installer build library.
//!
//! Turns a Grafana release archive into a Windows installer by driving the
//! WiX toolset: heat harvests the extracted tree, candle compiles the
//! rendered sources and light links them into `grafana.msi`.
//!
//! # Example
//!
//! ```no_run
//! use grafana_msi::bundler::{Bundler, Edition, ProcessRunner, ReleaseIdentity, SettingsBuilder};
//!
//! # async fn example() -> grafana_msi::bundler::Result<()> {
//! let settings = SettingsBuilder::new().wix_home("/opt/wix").build()?;
//! let release = ReleaseIdentity::new("6.0.0", Edition::Standard)?;
//!
//! let artifact = Bundler::new(settings, ProcessRunner).bundle(&release).await?;
//! println!("{} ({} bytes, sha256 {})", artifact.path.display(), artifact.size, artifact.checksum);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod error;
pub mod platform;
pub mod settings;
pub mod utils;

pub use builder::{Bundler, PublishedArtifact, verify_toolchain};
pub use error::{Error, Result};
pub use platform::windows::msi::{ProcessRunner, ToolCommand, ToolOutput, ToolRunner};
pub use settings::{Edition, ProductConfig, ReleaseIdentity, Settings, SettingsBuilder};
