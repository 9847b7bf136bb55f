//! Configuration structures for the installer build.
//!
//! This module provides the release identity, the per-edition product
//! presets, WiX toolchain settings, and the builder that layers defaults,
//! the config file and command-line overrides.

mod builder;
mod core;
mod product;
mod release;
mod windows;

// Re-export all public types
pub use builder::SettingsBuilder;
pub use core::{Paths, Settings, Urls};
pub use product::{
    APP_COMPONENT_GROUP, APP_DIRECTORY, ComponentGroupDescriptor, ComponentGroupRef,
    ENTERPRISE_UPGRADE_CODE, FIREWALL_COMPONENT_GROUP, FeatureDescriptor, ProductConfig,
    SERVICE_COMPONENT_GROUP, SERVICE_DIRECTORY, STANDARD_UPGRADE_CODE,
};
pub use release::{Edition, ReleaseIdentity, msi_version};
pub use windows::{WixSettings, WixToolchain};
