//! Harvesting the extracted application tree with heat.

use super::toolset::{ToolCommand, ToolRunner};
use crate::bundler::{
    error::{Context, Result},
    settings::{APP_COMPONENT_GROUP, APP_DIRECTORY, ComponentGroupDescriptor, Edition, Settings},
    utils::fs,
};

/// Fragment file name for an edition, e.g. `grafana-oss.wxs`.
pub fn fragment_name(edition: Edition) -> String {
    format!("grafana-{}.wxs", edition.slug())
}

/// Runs `heat dir` over the work directory.
///
/// The fragment is written to the scratch directory and copied into the
/// work directory next to the harvested files.
///
/// Flags that matter:
/// - `-srd` keeps the work directory's own name out of the harvest
/// - `-cg` names the component group the product manifest references
/// - `-dr` sets the directory the files install into
pub async fn harvest<R: ToolRunner>(
    runner: &R,
    settings: &Settings,
    edition: Edition,
) -> Result<ComponentGroupDescriptor> {
    log::info!("Heat Harvesting");

    let scratch = settings.scratch_dir();
    let work = settings.work_dir();
    let name = fragment_name(edition);
    let fragment = scratch.join(&name);

    let command = ToolCommand::wix(settings.toolchain(), "heat", work.display().to_string(), scratch)
        .arg("dir")
        .arg(work)
        .args(["-platform", "x64", "-sw5150", "-srd", "-cg", APP_COMPONENT_GROUP])
        .args(["-gg", "-sfrag", "-dr", APP_DIRECTORY, "-template", "fragment"])
        .arg("-out")
        .arg(&name);

    runner.run(&command).await.context("harvesting release tree")?;

    fs::copy_file(&fragment, &work.join(&name))
        .await
        .context("heat did not produce the expected fragment")?;

    log::info!("HARVEST COMPLETE");

    Ok(ComponentGroupDescriptor {
        group: APP_COMPONENT_GROUP.to_string(),
        fragment,
        directory: APP_DIRECTORY.to_string(),
    })
}
