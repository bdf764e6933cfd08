pub mod adb;
pub mod dry_run;
#[cfg(test)]
pub mod fake;

use std::collections::HashSet;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("tool not available: {0}")]
    ToolNotAvailable(String),
    /// No installed component can handle the URL.
    #[error("no activity found to handle {url}")]
    Unresolved { url: String },
    #[error("command failed: {0}")]
    CommandFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// One `start_activity` invocation, as seen by the launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityStart {
    pub url: String,
    pub package: Option<String>,
    pub suppress_unresolved: bool,
}

/// Platform glue: installed-application detection and activity start.
pub trait AppLauncher: Send + Sync {
    fn name(&self) -> &str;

    /// Whether the backing tool can be invoked at all.
    fn is_available(&self) -> bool;

    /// Short human-readable state of the target device.
    fn status(&self) -> Result<String, LauncherError> {
        Ok("ready".to_string())
    }

    fn list_installed_package_ids(&self) -> Result<HashSet<String>, LauncherError>;

    /// Open `url`, restricted to `package` when given. With
    /// `suppress_unresolved`, a URL no component can handle is a silent
    /// success instead of `LauncherError::Unresolved`.
    fn start_activity(
        &self,
        url: &str,
        package: Option<&str>,
        suppress_unresolved: bool,
    ) -> Result<(), LauncherError>;
}
