//! Builder for constructing Settings.
//!
//! Values are layered: built-in defaults, then a TOML config file, then
//! explicit setter calls (CLI flags and environment variables).

use super::{
    Settings, WixSettings, WixToolchain,
    core::{DEFAULT_SERVICE_WRAPPER_VERSION, Paths, Urls},
};
use crate::{
    bail,
    bundler::error::{Error, ErrorExt, Result},
};
use path_absolutize::Absolutize;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// On-disk configuration file.
///
/// ```toml
/// [toolchain]
/// wix_home = "/opt/wix"
/// wine = "wine64"
///
/// [paths]
/// dist = "dist"
/// work = "/tmp/a"
/// publish = "/oss/scratch"
///
/// [service_wrapper]
/// version = "2.24"
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    toolchain: ToolchainSection,
    paths: PathsSection,
    urls: UrlsSection,
    service_wrapper: ServiceWrapperSection,
    wix: WixSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ToolchainSection {
    wix_home: Option<PathBuf>,
    wine: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PathsSection {
    dist: Option<PathBuf>,
    enterprise_dist: Option<PathBuf>,
    scratch: Option<PathBuf>,
    work: Option<PathBuf>,
    cache: Option<PathBuf>,
    publish: Option<PathBuf>,
    resources: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct UrlsSection {
    release: Option<String>,
    enterprise_release: Option<String>,
    service_wrapper: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ServiceWrapperSection {
    version: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct WixSection {
    cultures: Option<String>,
    license: Option<PathBuf>,
    banner: Option<PathBuf>,
    dialog_image: Option<PathBuf>,
}

/// Builder for constructing [`Settings`].
///
/// # Examples
///
/// ```no_run
/// use grafana_msi::bundler::SettingsBuilder;
///
/// # fn example() -> grafana_msi::bundler::Result<()> {
/// let settings = SettingsBuilder::from_file("msi.toml")?
///     .wix_home("/opt/wix")
///     .publish_dir("out")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    paths: Paths,
    urls: Urls,
    toolchain: WixToolchain,
    wix: WixSettings,
    service_wrapper_version: Option<String>,
}

impl SettingsBuilder {
    /// Creates a builder holding the built-in defaults.
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates a builder from a TOML config file layered over the defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).fs_context("reading config file", path)?;
        Self::from_toml(&contents).map_err(|error| match error {
            Error::Config { error, .. } => Error::Config {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Creates a builder from TOML text layered over the defaults.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents).map_err(|error| Error::Config {
            path: PathBuf::from("<inline>"),
            error,
        })?;

        let mut builder = Self::new();

        if let Some(wix_home) = file.toolchain.wix_home {
            builder.toolchain.wix_home = wix_home;
        }
        if let Some(wine) = file.toolchain.wine {
            builder.toolchain.wine = Some(wine);
        }

        let paths = file.paths;
        let target = &mut builder.paths;
        for (value, slot) in [
            (paths.dist, &mut target.dist),
            (paths.enterprise_dist, &mut target.enterprise_dist),
            (paths.scratch, &mut target.scratch),
            (paths.work, &mut target.work),
            (paths.cache, &mut target.cache),
            (paths.publish, &mut target.publish),
        ] {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if paths.resources.is_some() {
            target.resources = paths.resources;
        }

        if let Some(url) = file.urls.release {
            builder.urls.release = url;
        }
        if let Some(url) = file.urls.enterprise_release {
            builder.urls.enterprise_release = url;
        }
        if let Some(url) = file.urls.service_wrapper {
            builder.urls.service_wrapper = url;
        }

        builder.service_wrapper_version = file.service_wrapper.version;

        if let Some(cultures) = file.wix.cultures {
            builder.wix.cultures = cultures;
        }
        builder.wix.license = file.wix.license;
        builder.wix.banner_path = file.wix.banner;
        builder.wix.dialog_image_path = file.wix.dialog_image;

        Ok(builder)
    }

    /// Sets the WiX installation directory.
    pub fn wix_home<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.toolchain.wix_home = path.as_ref().to_path_buf();
        self
    }

    /// Sets the wine launcher. An empty path runs the tools directly.
    pub fn wine<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref();
        self.toolchain.wine = if path.as_os_str().is_empty() {
            None
        } else {
            Some(path.to_path_buf())
        };
        self
    }

    pub fn dist_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.paths.dist = path.as_ref().to_path_buf();
        self
    }

    pub fn enterprise_dist_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.paths.enterprise_dist = path.as_ref().to_path_buf();
        self
    }

    pub fn scratch_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.paths.scratch = path.as_ref().to_path_buf();
        self
    }

    pub fn work_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.paths.work = path.as_ref().to_path_buf();
        self
    }

    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.paths.cache = path.as_ref().to_path_buf();
        self
    }

    pub fn publish_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.paths.publish = path.as_ref().to_path_buf();
        self
    }

    pub fn resources_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.paths.resources = Some(path.as_ref().to_path_buf());
        self
    }

    /// Overrides the standard-edition archive URL template.
    pub fn release_url(mut self, template: impl Into<String>) -> Self {
        self.urls.release = template.into();
        self
    }

    /// Overrides the enterprise-edition archive URL template.
    pub fn enterprise_release_url(mut self, template: impl Into<String>) -> Self {
        self.urls.enterprise_release = template.into();
        self
    }

    /// Overrides the NSSM archive URL template.
    pub fn service_wrapper_url(mut self, template: impl Into<String>) -> Self {
        self.urls.service_wrapper = template.into();
        self
    }

    pub fn service_wrapper_version(mut self, version: impl Into<String>) -> Self {
        self.service_wrapper_version = Some(version.into());
        self
    }

    pub fn wix_settings(mut self, wix: WixSettings) -> Self {
        self.wix = wix;
        self
    }

    /// Builds the settings.
    ///
    /// Relative paths are resolved against the current directory, since the
    /// WiX tools run from the scratch and work directories.
    ///
    /// # Errors
    ///
    /// Returns an error if a URL template does not form a valid URL, or if
    /// the work directory contains any other configured directory.
    pub fn build(self) -> Result<Settings> {
        for template in [
            &self.urls.release,
            &self.urls.enterprise_release,
            &self.urls.service_wrapper,
        ] {
            url::Url::parse(&template.replace("{version}", "0.0.0"))?;
        }

        let mut paths = self.paths;
        for path in [
            &mut paths.dist,
            &mut paths.enterprise_dist,
            &mut paths.scratch,
            &mut paths.work,
            &mut paths.cache,
            &mut paths.publish,
        ] {
            *path = absolute(path)?;
        }
        if let Some(resources) = &mut paths.resources {
            *resources = absolute(resources)?;
        }

        let mut toolchain = self.toolchain;
        toolchain.wix_home = absolute(&toolchain.wix_home)?;

        // The work directory is erased at the start of every run.
        let kept = [
            ("dist", Some(&paths.dist)),
            ("enterprise dist", Some(&paths.enterprise_dist)),
            ("scratch", Some(&paths.scratch)),
            ("cache", Some(&paths.cache)),
            ("publish", Some(&paths.publish)),
            ("resources", paths.resources.as_ref()),
            ("WiX", Some(&toolchain.wix_home)),
        ];
        for (name, path) in kept {
            let Some(path) = path else { continue };
            if path.starts_with(&paths.work) {
                bail!(
                    "work directory {} would erase the {name} directory {}",
                    paths.work.display(),
                    path.display()
                );
            }
        }

        Ok(Settings::new(
            paths,
            self.urls,
            toolchain,
            self.wix,
            self.service_wrapper_version
                .unwrap_or_else(|| DEFAULT_SERVICE_WRAPPER_VERSION.to_string()),
        ))
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(path
        .absolutize()
        .fs_context("resolving path", path)?
        .into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_build_container_layout() {
        let settings = SettingsBuilder::new().build().unwrap();
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(settings.paths().dist, cwd.join("dist"));
        assert_eq!(settings.paths().enterprise_dist, cwd.join("enterprise-dist"));
        assert_eq!(settings.scratch_dir(), cwd.join("scratch"));
        assert_eq!(settings.publish_dir(), cwd.join("scratch"));
        assert_eq!(settings.service_wrapper_version(), "2.24");
        assert_eq!(settings.wix().cultures, "en-US");
        assert_eq!(
            settings.toolchain().tool_path("candle"),
            Path::new("/home/xclient/wix/candle.exe")
        );
    }

    #[test]
    fn config_file_overrides_defaults() {
        let builder = SettingsBuilder::from_toml(
            r#"
            [toolchain]
            wix_home = "/opt/wix"
            wine = "wine"

            [paths]
            work = "/tmp/a"
            publish = "/oss/scratch"
            resources = "static"

            [service_wrapper]
            version = "2.25"

            [wix]
            cultures = "de-DE"
            license = "LICENSE.rtf"
            "#,
        )
        .unwrap();
        let settings = builder.build().unwrap();

        assert_eq!(settings.toolchain().wix_home(), Path::new("/opt/wix"));
        assert_eq!(settings.toolchain().wine.as_deref(), Some(Path::new("wine")));
        assert_eq!(settings.work_dir(), Path::new("/tmp/a"));
        assert_eq!(settings.publish_dir(), Path::new("/oss/scratch"));
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(settings.resources_dir(), Some(cwd.join("static").as_path()));
        assert_eq!(settings.paths().dist, cwd.join("dist"));
        assert_eq!(settings.service_wrapper_version(), "2.25");
        assert_eq!(settings.wix().cultures, "de-DE");
        assert_eq!(settings.wix().license.as_deref(), Some(Path::new("LICENSE.rtf")));
    }

    #[test]
    fn setters_override_config_file() {
        let settings = SettingsBuilder::from_toml("[toolchain]\nwix_home = \"/opt/wix\"\n")
            .unwrap()
            .wix_home("/srv/wix")
            .wine("")
            .build()
            .unwrap();
        assert_eq!(settings.toolchain().wix_home(), Path::new("/srv/wix"));
        assert!(settings.toolchain().wine.is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = SettingsBuilder::from_toml("[paths]\ndistt = \"x\"\n").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn from_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("msi.toml");
        std::fs::write(&path, "[urls\n").unwrap();
        match SettingsBuilder::from_file(&path).unwrap_err() {
            Error::Config { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn relative_paths_are_normalized() {
        let settings = SettingsBuilder::new()
            .work_dir("/tmp/msi/../a")
            .wix_home("wix")
            .build()
            .unwrap();
        assert_eq!(settings.work_dir(), Path::new("/tmp/a"));
        assert!(settings.toolchain().wix_home().is_absolute());
    }

    #[test]
    fn work_dir_must_not_contain_other_dirs() {
        let err = SettingsBuilder::new()
            .work_dir("/srv/msi")
            .dist_dir("/srv/msi/dist")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::GenericError(_)));
        assert!(err.to_string().contains("/srv/msi/dist"));

        let err = SettingsBuilder::new()
            .work_dir("/srv/msi")
            .wix_home("/srv/msi")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("WiX directory"));
    }

    #[test]
    fn current_dir_as_work_dir_is_rejected() {
        // Default dist and scratch are relative to the current directory.
        assert!(SettingsBuilder::new().work_dir(".").build().is_err());
    }

    #[test]
    fn sibling_work_dir_is_accepted() {
        let settings = SettingsBuilder::new()
            .work_dir("/srv/msi/work")
            .dist_dir("/srv/msi/dist")
            .cache_dir("/srv/msi/work-cache")
            .build()
            .unwrap();
        assert_eq!(settings.work_dir(), Path::new("/srv/msi/work"));
    }

    #[test]
    fn invalid_url_template_is_rejected() {
        assert!(SettingsBuilder::new().release_url("not a url").build().is_err());
    }
}
