use std::collections::HashSet;
use std::sync::Mutex;

use crate::launcher::{ActivityStart, AppLauncher, LauncherError};

/// What a `FakeLauncher` answers to `start_activity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// Nothing resolves the intent; honours `suppress_unresolved` like a real launcher.
    Unresolved,
    /// Nothing resolves the intent, regardless of `suppress_unresolved`.
    UnresolvedAlways,
}

/// Scriptable launcher for unit tests.
pub struct FakeLauncher {
    installed: Option<Vec<String>>,
    outcome: StartOutcome,
    starts: Mutex<Vec<ActivityStart>>,
}

impl FakeLauncher {
    pub fn with_installed(ids: &[&str]) -> Self {
        Self {
            installed: Some(ids.iter().map(|s| s.to_string()).collect()),
            outcome: StartOutcome::Started,
            starts: Mutex::new(Vec::new()),
        }
    }

    /// A launcher whose package listing always fails.
    pub fn broken() -> Self {
        Self {
            installed: None,
            outcome: StartOutcome::Started,
            starts: Mutex::new(Vec::new()),
        }
    }

    pub fn outcome(mut self, outcome: StartOutcome) -> Self {
        self.outcome = outcome;
        self
    }

    pub fn starts(&self) -> Vec<ActivityStart> {
        self.starts.lock().unwrap().clone()
    }
}

impl AppLauncher for FakeLauncher {
    fn name(&self) -> &str {
        "fake"
    }

    fn is_available(&self) -> bool {
        self.installed.is_some()
    }

    fn list_installed_package_ids(&self) -> Result<HashSet<String>, LauncherError> {
        match &self.installed {
            Some(ids) => Ok(ids.iter().cloned().collect()),
            None => Err(LauncherError::CommandFailed("device offline".to_string())),
        }
    }

    fn start_activity(
        &self,
        url: &str,
        package: Option<&str>,
        suppress_unresolved: bool,
    ) -> Result<(), LauncherError> {
        self.starts.lock().unwrap().push(ActivityStart {
            url: url.to_string(),
            package: package.map(str::to_string),
            suppress_unresolved,
        });
        match self.outcome {
            StartOutcome::Started => Ok(()),
            StartOutcome::Unresolved if suppress_unresolved => Ok(()),
            StartOutcome::Unresolved | StartOutcome::UnresolvedAlways => {
                Err(LauncherError::Unresolved {
                    url: url.to_string(),
                })
            }
        }
    }
}
