//! Command line argument parsing and validation.

use crate::bundler::{Result, Settings, SettingsBuilder};
use clap::Parser;
use std::path::PathBuf;

/// Windows installer builder for Grafana releases
#[derive(Parser, Debug)]
#[command(
    name = "grafana_msi",
    version,
    about = "Builds the Grafana Windows installer (grafana.msi) with the WiX toolset",
    long_about = "Builds the Grafana Windows installer (grafana.msi) with the WiX toolset.

Without --build, the newest archive already present in the distribution
folders is packaged. With --build, the archive is downloaded when missing.

Usage:
  grafana_msi
  grafana_msi --build 6.0.0
  grafana_msi --build 6.0.0-beta1 --enterprise

Exit code 0 = grafana.msi exists in the publish directory."
)]
pub struct Args {
    /// Release version to package, e.g. 6.0.0 or 6.0.0-ca0bc2c5pre3
    #[arg(short, long, value_name = "VERSION")]
    pub build: Option<String>,

    /// Package the enterprise edition
    #[arg(short, long)]
    pub enterprise: bool,

    /// Accepted for compatibility; has no effect
    #[arg(short, long)]
    pub premium: bool,

    /// TOML config file layered over the built-in defaults
    #[arg(short, long, value_name = "FILE", env = "GRAFANA_MSI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory containing heat.exe, candle.exe and light.exe
    #[arg(long, value_name = "DIR", env = "WIX_HOME")]
    pub wix_home: Option<PathBuf>,

    /// Launcher for the WiX executables; empty runs them directly
    #[arg(long, value_name = "CMD", env = "WINE_CMD")]
    pub wine: Option<String>,

    /// Enable debug logging, including captured tool output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if let Some(build) = &self.build
            && build.trim().is_empty()
        {
            return Err("--build cannot be empty".to_string());
        }
        Ok(())
    }

    /// Default log filter for the selected verbosity.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Resolves settings: defaults, then the config file, then flags and
    /// environment variables.
    pub fn settings(&self) -> Result<Settings> {
        let mut builder = match &self.config {
            Some(path) => SettingsBuilder::from_file(path)?,
            None => SettingsBuilder::new(),
        };

        if let Some(wix_home) = &self.wix_home {
            builder = builder.wix_home(wix_home);
        }
        if let Some(wine) = &self.wine {
            builder = builder.wine(wine);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("grafana_msi").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn short_flags() {
        let args = parse(&["-b", "6.0.0", "-e", "-p"]);
        assert_eq!(args.build.as_deref(), Some("6.0.0"));
        assert!(args.enterprise);
        assert!(args.premium);
        assert!(!args.verbose);
        assert_eq!(args.log_filter(), "info");
    }

    #[test]
    fn empty_build_is_rejected() {
        assert!(parse(&["--build", " "]).validate().is_err());
        assert!(parse(&[]).validate().is_ok());
    }

    #[test]
    fn flags_override_config_file() {
        let tmp = tempfile::tempdir().unwrap();
        let config = tmp.path().join("grafana-msi.toml");
        std::fs::write(
            &config,
            "[toolchain]\nwix_home = \"/from/config\"\nwine = \"wine\"\n\n[paths]\ndist = \"/srv/dist\"\n",
        )
        .unwrap();

        let args = parse(&[
            "--config",
            config.to_str().unwrap(),
            "--wix-home",
            "/from/flag",
            "--wine",
            "",
        ]);
        let settings = args.settings().unwrap();
        assert_eq!(settings.toolchain().wix_home(), std::path::Path::new("/from/flag"));
        assert_eq!(settings.toolchain().wine, None);
        assert_eq!(settings.paths().dist, PathBuf::from("/srv/dist"));
    }
}
