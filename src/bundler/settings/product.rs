//! Product identity and feature layout, one preset per edition.

use super::{Edition, ReleaseIdentity};
use serde::Serialize;
use std::path::PathBuf;
use uuid::Uuid;

/// Upgrade code of the standard edition. Must never change: Windows Installer
/// uses it to tell an upgrade from a side-by-side install.
pub const STANDARD_UPGRADE_CODE: Uuid = Uuid::from_u128(0x35c7d2a9_6e23_4645_b975_e8693a1cef10);
pub const STANDARD_PRODUCT_NAME: &str = "Grafana OSS";

/// Upgrade code of the enterprise edition. Must never change.
pub const ENTERPRISE_UPGRADE_CODE: Uuid =
    Uuid::from_u128(0xd534ec50_476b_4edc_a25e_fe854c949f4f);
pub const ENTERPRISE_PRODUCT_NAME: &str = "Grafana Enterprise";

pub const MANUFACTURER: &str = "Grafana Labs";

/// File name of the linked installer.
pub const INSTALLER_NAME: &str = "grafana.msi";

/// Component group and directory of the harvested application tree.
pub const APP_COMPONENT_GROUP: &str = "GrafanaX64";
pub const APP_DIRECTORY: &str = "GrafanaX64Dir";

/// Component group and directory of the NSSM service registration.
pub const SERVICE_COMPONENT_GROUP: &str = "GrafanaServiceX64";
pub const SERVICE_DIRECTORY: &str = "GrafanaServiceX64Dir";

pub const FIREWALL_COMPONENT_GROUP: &str = "GrafanaFirewallExceptionsGroup";

/// Reference from a feature to a component group and the directory it
/// installs into.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ComponentGroupRef {
    pub ref_id: String,
    pub directory: String,
}

impl ComponentGroupRef {
    pub fn new(ref_id: impl Into<String>, directory: impl Into<String>) -> Self {
        Self {
            ref_id: ref_id.into(),
            directory: directory.into(),
        }
    }
}

/// One selectable installer feature.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FeatureDescriptor {
    pub name: String,
    pub title: String,
    pub component_groups: Vec<ComponentGroupRef>,
}

/// Output of the harvest step: the generated fragment and the group it
/// declares.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ComponentGroupDescriptor {
    /// Component group id declared in the fragment.
    pub group: String,
    /// Fragment document written by heat.
    pub fragment: PathBuf,
    /// Directory reference the fragment installs into.
    pub directory: String,
}

/// Product metadata rendered into `product.wxs`.
///
/// Constructed with [`ProductConfig::for_release`]; the edition decides the
/// upgrade code, display name and core feature name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProductConfig {
    version: String,
    upgrade_code: Uuid,
    product_name: &'static str,
    manufacturer: &'static str,
    installer_name: &'static str,
    features: Vec<FeatureDescriptor>,
}

impl ProductConfig {
    /// Edition preset filled with the release version.
    pub fn for_release(release: &ReleaseIdentity) -> Self {
        let (upgrade_code, product_name, core_feature) = match release.edition() {
            Edition::Standard => (STANDARD_UPGRADE_CODE, STANDARD_PRODUCT_NAME, "GrafanaOSS"),
            Edition::Enterprise => (
                ENTERPRISE_UPGRADE_CODE,
                ENTERPRISE_PRODUCT_NAME,
                "GrafanaEnterprise",
            ),
        };

        let features = vec![
            FeatureDescriptor {
                name: core_feature.to_string(),
                title: product_name.to_string(),
                component_groups: vec![ComponentGroupRef::new(APP_COMPONENT_GROUP, APP_DIRECTORY)],
            },
            FeatureDescriptor {
                name: "GrafanaService".to_string(),
                title: "Run Grafana as a Service".to_string(),
                component_groups: vec![
                    ComponentGroupRef::new(SERVICE_COMPONENT_GROUP, SERVICE_DIRECTORY),
                    ComponentGroupRef::new(FIREWALL_COMPONENT_GROUP, SERVICE_DIRECTORY),
                ],
            },
        ];

        Self {
            version: release.version().to_string(),
            upgrade_code,
            product_name,
            manufacturer: MANUFACTURER,
            installer_name: INSTALLER_NAME,
            features,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn upgrade_code(&self) -> Uuid {
        self.upgrade_code
    }

    pub fn product_name(&self) -> &str {
        self.product_name
    }

    pub fn manufacturer(&self) -> &str {
        self.manufacturer
    }

    /// File name of the linked installer, `grafana.msi`.
    pub fn installer_name(&self) -> &str {
        self.installer_name
    }

    pub fn features(&self) -> &[FeatureDescriptor] {
        &self.features
    }

    /// Stable component GUID derived from the upgrade code.
    ///
    /// Windows Installer requires component GUIDs to stay fixed across
    /// releases of a product, so they are name-based rather than random.
    pub fn component_guid(&self, component: &str) -> Uuid {
        Uuid::new_v5(&self.upgrade_code, component.as_bytes())
    }
}
