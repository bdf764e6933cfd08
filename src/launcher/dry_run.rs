use std::collections::HashSet;
use std::sync::Mutex;

use crate::launcher::{ActivityStart, AppLauncher, LauncherError};

/// Detects through the wrapped launcher but only records activity starts.
pub struct DryRunLauncher {
    inner: Box<dyn AppLauncher>,
    starts: Mutex<Vec<ActivityStart>>,
}

impl DryRunLauncher {
    pub fn new(inner: Box<dyn AppLauncher>) -> Self {
        Self {
            inner,
            starts: Mutex::new(Vec::new()),
        }
    }

    /// Starts recorded so far, oldest first.
    pub fn starts(&self) -> Vec<ActivityStart> {
        self.starts
            .lock()
            .map(|s| s.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl AppLauncher for DryRunLauncher {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn is_available(&self) -> bool {
        self.inner.is_available()
    }

    fn status(&self) -> Result<String, LauncherError> {
        self.inner.status().map(|s| format!("{} (dry run)", s))
    }

    fn list_installed_package_ids(&self) -> Result<HashSet<String>, LauncherError> {
        self.inner.list_installed_package_ids()
    }

    fn start_activity(
        &self,
        url: &str,
        package: Option<&str>,
        suppress_unresolved: bool,
    ) -> Result<(), LauncherError> {
        tracing::info!(url, ?package, suppress_unresolved, "dry run: skipping activity start");
        let start = ActivityStart {
            url: url.to_string(),
            package: package.map(str::to_string),
            suppress_unresolved,
        };
        match self.starts.lock() {
            Ok(mut starts) => starts.push(start),
            Err(poisoned) => poisoned.into_inner().push(start),
        }
        Ok(())
    }
}
