//! Build orchestration.
//!
//! This module provides the [`Bundler`] orchestrator that runs the MSI
//! pipeline and reports the published installer.
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum of the published installer
//! - [`orchestrator`] - Main [`Bundler`] struct
//! - [`tool_detection`] - WiX and wine availability checking

mod checksum;
mod orchestrator;
mod tool_detection;

pub use checksum::calculate_sha256;
pub use orchestrator::{Bundler, PublishedArtifact};
pub use tool_detection::verify_toolchain;
