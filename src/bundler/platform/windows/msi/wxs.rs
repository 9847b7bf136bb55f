//! WiX source generation.
//!
//! Renders the firewall, service and product documents from the templates
//! in [`super::template`]. Rendering is pure: the same release and settings
//! always give byte-identical documents, since component GUIDs are derived
//! from the upgrade code instead of generated.

use super::template::{FIREWALL_TEMPLATE, PRODUCT_TEMPLATE, SERVICE_TEMPLATE};
use crate::bundler::{
    error::{ErrorExt, Result},
    settings::{
        APP_DIRECTORY, ComponentGroupDescriptor, FIREWALL_COMPONENT_GROUP, FeatureDescriptor,
        ProductConfig, ReleaseIdentity, SERVICE_COMPONENT_GROUP, SERVICE_DIRECTORY, Settings,
        WixSettings,
    },
};
use handlebars::Handlebars;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const FIREWALL_DOCUMENT: &str = "grafana-firewall.wxs";
pub const SERVICE_DOCUMENT: &str = "grafana-service.wxs";
pub const PRODUCT_DOCUMENT: &str = "product.wxs";

/// Port grafana-server listens on by default.
pub const SERVER_PORT: u16 = 3000;

/// Windows service name registered through NSSM.
pub const SERVICE_NAME: &str = "Grafana";

#[derive(Serialize)]
struct FirewallData<'a> {
    group: &'static str,
    directory: &'static str,
    app_directory: &'static str,
    component_guid: String,
    rule_name: String,
    version: &'a str,
    port: u16,
}

#[derive(Serialize)]
struct ServiceData<'a> {
    group: &'static str,
    directory: &'static str,
    app_directory: &'static str,
    component_guid: String,
    service_name: &'static str,
    parameters_key: String,
    display_name: &'a str,
    version: &'a str,
    nssm_version: &'a str,
    nssm_dir: String,
}

#[derive(Serialize)]
struct ProductData<'a> {
    product_name: &'a str,
    manufacturer: &'a str,
    version: &'a str,
    msi_version: String,
    upgrade_code: String,
    app_directory: &'a str,
    features: &'a [FeatureDescriptor],
    // Always serialized (None as null) so strict mode sees the keys.
    license: Option<String>,
    banner: Option<String>,
    dialog_image: Option<String>,
}

/// Paths of the rendered documents in the scratch directory.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RenderedDocuments {
    pub firewall: PathBuf,
    pub service: PathBuf,
    pub product: PathBuf,
}

fn registry() -> Result<Handlebars<'static>> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    // Numeric character references are valid XML too.
    handlebars.register_escape_fn(handlebars::html_escape);

    handlebars.register_template_string(FIREWALL_DOCUMENT, FIREWALL_TEMPLATE)?;
    handlebars.register_template_string(SERVICE_DOCUMENT, SERVICE_TEMPLATE)?;
    handlebars.register_template_string(PRODUCT_DOCUMENT, PRODUCT_TEMPLATE)?;

    Ok(handlebars)
}

/// Firewall exception for grafana-server, attached to the service directory.
pub fn render_firewall(config: &ProductConfig) -> Result<String> {
    let data = FirewallData {
        group: FIREWALL_COMPONENT_GROUP,
        directory: SERVICE_DIRECTORY,
        app_directory: APP_DIRECTORY,
        component_guid: config.component_guid(FIREWALL_COMPONENT_GROUP).to_string(),
        rule_name: format!("{} Server", config.product_name()),
        version: config.version(),
        port: SERVER_PORT,
    };
    Ok(registry()?.render(FIREWALL_DOCUMENT, &data)?)
}

/// NSSM-backed service registration.
///
/// `nssm_dir` is the NSSM folder name relative to the link directory,
/// e.g. `nssm-2.24`.
pub fn render_service(config: &ProductConfig, nssm_version: &str, nssm_dir: &str) -> Result<String> {
    let data = ServiceData {
        group: SERVICE_COMPONENT_GROUP,
        directory: SERVICE_DIRECTORY,
        app_directory: APP_DIRECTORY,
        component_guid: config.component_guid(SERVICE_COMPONENT_GROUP).to_string(),
        service_name: SERVICE_NAME,
        parameters_key: format!(r"SYSTEM\CurrentControlSet\Services\{SERVICE_NAME}\Parameters"),
        display_name: config.product_name(),
        version: config.version(),
        nssm_version,
        nssm_dir: nssm_dir.to_string(),
    };
    Ok(registry()?.render(SERVICE_DOCUMENT, &data)?)
}

/// Product manifest: identity, directory layout and features.
pub fn render_product(
    config: &ProductConfig,
    release: &ReleaseIdentity,
    harvest: &ComponentGroupDescriptor,
    wix: &WixSettings,
) -> Result<String> {
    let display = |path: &Option<PathBuf>| path.as_ref().map(|p| p.display().to_string());

    let data = ProductData {
        product_name: config.product_name(),
        manufacturer: config.manufacturer(),
        version: config.version(),
        msi_version: release.msi_version()?,
        upgrade_code: config.upgrade_code().to_string().to_uppercase(),
        app_directory: &harvest.directory,
        features: config.features(),
        license: display(&wix.license),
        banner: display(&wix.banner_path),
        dialog_image: display(&wix.dialog_image_path),
    };
    Ok(registry()?.render(PRODUCT_DOCUMENT, &data)?)
}

/// Renders all three documents into the scratch directory, overwriting
/// earlier renders.
pub async fn write_documents(
    settings: &Settings,
    release: &ReleaseIdentity,
    config: &ProductConfig,
    harvest: &ComponentGroupDescriptor,
) -> Result<RenderedDocuments> {
    log::info!("Rendering WiX sources");

    let scratch = settings.scratch_dir();
    let documents = RenderedDocuments {
        firewall: scratch.join(FIREWALL_DOCUMENT),
        service: scratch.join(SERVICE_DOCUMENT),
        product: scratch.join(PRODUCT_DOCUMENT),
    };

    write(&documents.firewall, &render_firewall(config)?).await?;
    write(
        &documents.service,
        &render_service(
            config,
            settings.service_wrapper_version(),
            &settings.service_wrapper_dir_name(),
        )?,
    )
    .await?;
    write(
        &documents.product,
        &render_product(config, release, harvest, settings.wix())?,
    )
    .await?;

    Ok(documents)
}

async fn write(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .fs_context("creating directory", parent)?;
    }
    tokio::fs::write(path, contents)
        .await
        .fs_context("writing WiX source", path)?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}
