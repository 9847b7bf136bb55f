//! WiX toolset invocation.
//!
//! Every external tool call goes through [`ToolRunner`], which captures
//! status and output. A non-zero exit becomes [`Error::Toolchain`], so no
//! step runs after a failed one.

use crate::bundler::{
    error::{Error, Result},
    settings::WixToolchain,
};
use std::{
    ffi::OsString,
    fmt,
    future::Future,
    path::{Path, PathBuf},
    process::Stdio,
};

/// Extensions loaded by both candle and light.
pub const COMMON_EXTENSIONS: [&str; 2] = ["WixFirewallExtension", "WixUtilExtension"];

/// Extension only light needs, for the installer UI.
pub const UI_EXTENSION: &str = "WixUIExtension";

/// A fully resolved external command.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ToolCommand {
    /// Tool name for diagnostics (heat, candle, light).
    pub tool: &'static str,
    /// What the tool is run against, for diagnostics.
    pub target: String,
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub current_dir: PathBuf,
}

impl ToolCommand {
    /// Command for WiX `tool`, launched through wine when configured.
    pub fn wix(
        toolchain: &WixToolchain,
        tool: &'static str,
        target: impl Into<String>,
        current_dir: &Path,
    ) -> Self {
        let exe = toolchain.tool_path(tool);
        let (program, args) = match &toolchain.wine {
            Some(wine) => (wine.clone(), vec![exe.into_os_string()]),
            None => (exe, Vec::new()),
        };

        Self {
            tool,
            target: target.into(),
            program,
            args,
            current_dir: current_dir.to_path_buf(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Adds `-ext <name>` for each extension.
    pub fn extensions<'a>(mut self, extensions: impl IntoIterator<Item = &'a str>) -> Self {
        for extension in extensions {
            self.args.push("-ext".into());
            self.args.push(extension.into());
        }
        self
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Captured result of a successful tool run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Runs external tools.
///
/// Implementations must return [`Error::Toolchain`] for a non-zero exit and
/// only return `Ok` when the tool succeeded.
pub trait ToolRunner {
    fn run(&self, command: &ToolCommand) -> impl Future<Output = Result<ToolOutput>> + Send;
}

/// Runs tools as child processes.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    async fn run(&self, command: &ToolCommand) -> Result<ToolOutput> {
        log::info!("{}", command);

        let output = tokio::process::Command::new(&command.program)
            .args(&command.args)
            .current_dir(&command.current_dir)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|error| Error::CommandFailed {
                command: command.to_string(),
                error,
            })?;

        let captured = ToolOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !output.status.success() {
            return Err(Error::Toolchain {
                tool: command.tool.to_string(),
                target: command.target.clone(),
                status: output.status.to_string(),
                output: format!("{}{}", captured.stdout, captured.stderr),
            });
        }

        log::debug!("{} output:\n{}{}", command.tool, captured.stdout, captured.stderr);
        Ok(captured)
    }
}
