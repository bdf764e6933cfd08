use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use crate::launcher::{AppLauncher, LauncherError};

const VIEW_ACTION: &str = "android.intent.action.VIEW";

/// Drives an Android device through the `adb` command-line tool.
pub struct AdbLauncher {
    program: PathBuf,
    serial: Option<String>,
}

impl AdbLauncher {
    pub fn new(program: impl Into<PathBuf>, serial: Option<String>) -> Self {
        Self {
            program: program.into(),
            serial,
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        if let Some(serial) = &self.serial {
            cmd.args(["-s", serial]);
        }
        cmd.stdin(Stdio::null());
        cmd
    }

    fn run(&self, args: &[String]) -> Result<Output, LauncherError> {
        tracing::debug!(program = %self.program.display(), ?args, "running adb");
        self.command().args(args).output().map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                LauncherError::ToolNotAvailable(self.program.display().to_string())
            }
            _ => LauncherError::Io(e),
        })
    }

    fn run_checked(&self, args: &[String]) -> Result<String, LauncherError> {
        let output = self.run(args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LauncherError::CommandFailed(format!(
                "adb {}: {}",
                args.join(" "),
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Parse `pm list packages` output (`package:<id>` per line).
    fn parse_package_list(output: &str) -> HashSet<String> {
        output
            .lines()
            .filter_map(|line| line.trim().strip_prefix("package:"))
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Quote for the device shell, which re-parses everything after `adb shell`.
    fn shell_quote(s: &str) -> String {
        format!("'{}'", s.replace('\'', r"'\''"))
    }

    fn view_intent_args(url: &str, package: Option<&str>) -> Vec<String> {
        let mut args = vec![
            "-a".to_string(),
            VIEW_ACTION.to_string(),
            "-d".to_string(),
            Self::shell_quote(url),
        ];
        if let Some(package) = package {
            args.push("-p".to_string());
            args.push(package.to_string());
        }
        args
    }

    fn start_args(url: &str, package: Option<&str>) -> Vec<String> {
        let mut args: Vec<String> = ["shell", "am", "start"].iter().map(|s| s.to_string()).collect();
        args.extend(Self::view_intent_args(url, package));
        args
    }

    fn resolve_args(url: &str, package: Option<&str>) -> Vec<String> {
        let mut args: Vec<String> = ["shell", "cmd", "package", "resolve-activity", "--brief"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        args.extend(Self::view_intent_args(url, package));
        args
    }

    fn is_unresolved(output: &str) -> bool {
        let lower = output.to_lowercase();
        lower.contains("unable to resolve intent") || lower.contains("no activity found")
    }

    /// Interpret the output of `am start`, which often exits 0 even when it
    /// reports an error.
    fn check_start_output(
        url: &str,
        success: bool,
        stdout: &str,
        stderr: &str,
    ) -> Result<(), LauncherError> {
        let combined = format!("{}\n{}", stdout, stderr);
        if Self::is_unresolved(&combined) {
            return Err(LauncherError::Unresolved {
                url: url.to_string(),
            });
        }

        if let Some(line) = combined.lines().find(|l| l.trim_start().starts_with("Error")) {
            return Err(LauncherError::CommandFailed(line.trim().to_string()));
        }

        if !success {
            return Err(LauncherError::CommandFailed(format!(
                "am start exited with failure: {}",
                stderr.trim()
            )));
        }

        Ok(())
    }
}

impl AppLauncher for AdbLauncher {
    fn name(&self) -> &str {
        "adb"
    }

    fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn status(&self) -> Result<String, LauncherError> {
        let state = self.run_checked(&["get-state".to_string()])?;
        Ok(state.trim().to_string())
    }

    fn list_installed_package_ids(&self) -> Result<HashSet<String>, LauncherError> {
        let args: Vec<String> = ["shell", "pm", "list", "packages"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let stdout = self.run_checked(&args)?;
        Ok(Self::parse_package_list(&stdout))
    }

    fn start_activity(
        &self,
        url: &str,
        package: Option<&str>,
        suppress_unresolved: bool,
    ) -> Result<(), LauncherError> {
        if suppress_unresolved {
            // resolve-activity is missing before API 24; fall through to am start
            match self.run_checked(&Self::resolve_args(url, package)) {
                Ok(answer) if Self::is_unresolved(&answer) => {
                    tracing::info!(url, ?package, "no activity resolves the intent, not starting");
                    return Ok(());
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(url, ?package, "cannot check intent resolution: {}", e);
                }
            }
        }

        let output = self.run(&Self::start_args(url, package))?;
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        match Self::check_start_output(url, output.status.success(), &stdout, &stderr) {
            Err(LauncherError::Unresolved { .. }) if suppress_unresolved => {
                tracing::info!(url, ?package, "am start could not resolve the intent, ignoring");
                Ok(())
            }
            result => result,
        }
    }
}
