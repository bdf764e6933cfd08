use std::collections::HashSet;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::error::LaunchError;
use crate::launcher::{AppLauncher, LauncherError};
use crate::map::{LaunchRequest, MapProvider, MapType};
use crate::registry::ProviderRegistry;

/// Turns map requests into launcher calls against a fixed registry.
///
/// Nothing is cached: every operation asks the launcher for a fresh
/// installed-package listing, since apps can be (un)installed between calls.
pub struct LaunchResolver<'a> {
    registry: &'a ProviderRegistry,
    launcher: &'a dyn AppLauncher,
}

impl<'a> LaunchResolver<'a> {
    pub fn new(registry: &'a ProviderRegistry, launcher: &'a dyn AppLauncher) -> Self {
        Self { registry, launcher }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        self.registry
    }

    pub fn launcher(&self) -> &dyn AppLauncher {
        self.launcher
    }

    /// Installed maps, in registry order. Detection is best-effort: a failed
    /// listing yields an empty result.
    pub fn installed_providers(&self) -> Vec<MapProvider> {
        let installed = self.installed_package_ids();
        let providers: Vec<MapProvider> = self
            .registry
            .providers()
            .iter()
            .filter(|p| installed.contains(&p.package_name))
            .cloned()
            .collect();
        tracing::debug!(count = providers.len(), "installed maps detected");
        providers
    }

    /// Whether `id` names an installed map. Unknown ids are simply unavailable.
    pub fn is_available(&self, id: &str) -> bool {
        self.installed_providers()
            .iter()
            .any(|p| p.map_type.as_str() == id)
    }

    /// Open `request.url` in the requested map.
    ///
    /// The primary provider is started with unresolved intents suppressed and
    /// any remaining `Unresolved` answer is accepted as a no-op. Every other
    /// provider propagates launcher failures, since it was just detected as
    /// installed.
    pub fn launch(&self, request: &LaunchRequest) -> Result<(), LaunchError> {
        let installed = self.installed_providers();
        let provider = match installed.iter().find(|p| p.map_type == request.map_type) {
            Some(p) => p,
            None => {
                tracing::info!(map = %request.map_type, "map not installed");
                return Err(LaunchError::NotAvailable {
                    installed: installed.iter().map(|p| p.map_name.clone()).collect(),
                });
            }
        };

        tracing::debug!(
            map = %provider.map_type,
            package = %provider.package_name,
            primary = provider.is_primary,
            "launching map"
        );

        if provider.is_primary {
            match self
                .launcher
                .start_activity(&request.url, Some(&provider.package_name), true)
            {
                Ok(()) => Ok(()),
                Err(LauncherError::Unresolved { url }) => {
                    tracing::info!(%url, map = %provider.map_type, "primary map cannot handle url, ignoring");
                    Ok(())
                }
                Err(e) => Err(e.into()),
            }
        } else {
            self.launcher
                .start_activity(&request.url, Some(&provider.package_name), false)?;
            Ok(())
        }
    }

    /// Closest registry id to a mistyped `input`, if any is close at all.
    pub fn suggest(&self, input: &str) -> Option<MapType> {
        let matcher = SkimMatcherV2::default().ignore_case();
        let mut best: Option<(i64, MapType)> = None;
        for provider in self.registry.providers() {
            let candidates = [provider.map_type.as_str(), provider.map_name.as_str()];
            let score = candidates
                .iter()
                .filter_map(|c| matcher.fuzzy_match(c, input))
                .max();
            if let Some(score) = score {
                match &best {
                    Some((best_score, _)) if score <= *best_score => {}
                    _ => best = Some((score, provider.map_type)),
                }
            }
        }
        best.map(|(_, map_type)| map_type)
    }

    fn installed_package_ids(&self) -> HashSet<String> {
        match self.launcher.list_installed_package_ids() {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!(launcher = self.launcher.name(), "cannot list installed packages: {}", e);
                HashSet::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launcher::fake::{FakeLauncher, StartOutcome};

    const A: &str = "com.example.a";
    const B: &str = "com.example.b";
    const C: &str = "com.example.c";

    /// Catalog {A(primary), B, C}.
    fn abc_registry() -> ProviderRegistry {
        ProviderRegistry::new(vec![
            MapProvider::new(MapType::Google, "Map A", A).primary(),
            MapProvider::new(MapType::Waze, "Map B", B),
            MapProvider::new(MapType::Osmand, "Map C", C),
        ])
        .unwrap()
    }

    fn names(providers: &[MapProvider]) -> Vec<&str> {
        providers.iter().map(|p| p.map_name.as_str()).collect()
    }

    #[test]
    fn test_installed_preserves_registry_order() {
        let registry = abc_registry();
        // listing order differs from registry order on purpose
        let launcher = FakeLauncher::with_installed(&[C, "com.unrelated", A]);
        let resolver = LaunchResolver::new(&registry, &launcher);
        assert_eq!(names(&resolver.installed_providers()), vec!["Map A", "Map C"]);
    }

    #[test]
    fn test_installed_with_builtin_registry() {
        let registry = ProviderRegistry::builtin();
        let launcher = FakeLauncher::with_installed(&["net.osmand", "com.waze", "com.android.chrome"]);
        let resolver = LaunchResolver::new(&registry, &launcher);
        let installed: Vec<MapType> =
            resolver.installed_providers().iter().map(|p| p.map_type).collect();
        assert_eq!(installed, vec![MapType::Waze, MapType::Osmand]);
    }

    #[test]
    fn test_listing_failure_is_empty_set() {
        let registry = abc_registry();
        let launcher = FakeLauncher::broken();
        let resolver = LaunchResolver::new(&registry, &launcher);
        assert!(resolver.installed_providers().is_empty());
        assert!(!resolver.is_available("google"));
    }

    #[test]
    fn test_is_available() {
        let registry = abc_registry();
        let launcher = FakeLauncher::with_installed(&[A, C]);
        let resolver = LaunchResolver::new(&registry, &launcher);
        assert!(resolver.is_available("google"));
        assert!(resolver.is_available("osmand"));
        assert!(!resolver.is_available("waze"));
        // known to MapType but absent from this catalog
        assert!(!resolver.is_available("baidu"));
        assert!(!resolver.is_available("bing"));
        assert!(!resolver.is_available(""));
    }

    #[test]
    fn test_launch_not_installed_lists_alternatives() {
        let registry = abc_registry();
        let launcher = FakeLauncher::with_installed(&[A, C]);
        let resolver = LaunchResolver::new(&registry, &launcher);

        let err = resolver
            .launch(&LaunchRequest::new(MapType::Waze, "geo:1,2"))
            .unwrap_err();
        match err {
            LaunchError::NotAvailable { installed } => {
                assert_eq!(installed, vec!["Map A", "Map C"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(launcher.starts().is_empty());
    }

    #[test]
    fn test_launch_nothing_installed() {
        let registry = abc_registry();
        let launcher = FakeLauncher::with_installed(&[]);
        let resolver = LaunchResolver::new(&registry, &launcher);

        assert!(resolver.installed_providers().is_empty());
        for map_type in [MapType::Google, MapType::Waze, MapType::Osmand] {
            match resolver.launch(&LaunchRequest::new(map_type, "geo:1,2")) {
                Err(LaunchError::NotAvailable { installed }) => assert!(installed.is_empty()),
                other => panic!("unexpected result: {:?}", other),
            }
        }
        assert!(launcher.starts().is_empty());
    }

    #[test]
    fn test_launch_non_primary_constrains_package() {
        let registry = abc_registry();
        let launcher = FakeLauncher::with_installed(&[A, C]);
        let resolver = LaunchResolver::new(&registry, &launcher);

        resolver
            .launch(&LaunchRequest::new(MapType::Osmand, "osmand.api://x"))
            .unwrap();
        let starts = launcher.starts();
        assert_eq!(starts.len(), 1);
        assert_eq!(starts[0].url, "osmand.api://x");
        assert_eq!(starts[0].package.as_deref(), Some(C));
        assert!(!starts[0].suppress_unresolved);
    }

    #[test]
    fn test_launch_primary_suppresses_unresolved() {
        let registry = abc_registry();
        let launcher = FakeLauncher::with_installed(&[A]).outcome(StartOutcome::Unresolved);
        let resolver = LaunchResolver::new(&registry, &launcher);

        resolver
            .launch(&LaunchRequest::new(MapType::Google, "google.navigation:q=1,2"))
            .unwrap();
        let starts = launcher.starts();
        assert_eq!(starts.len(), 1);
        assert_eq!(starts[0].package.as_deref(), Some(A));
        assert!(starts[0].suppress_unresolved);
    }

    #[test]
    fn test_launch_primary_accepts_unresolved_from_launcher() {
        let registry = abc_registry();
        let launcher = FakeLauncher::with_installed(&[A]).outcome(StartOutcome::UnresolvedAlways);
        let resolver = LaunchResolver::new(&registry, &launcher);
        assert!(resolver
            .launch(&LaunchRequest::new(MapType::Google, "google.navigation:q=1,2"))
            .is_ok());
    }

    #[test]
    fn test_launch_non_primary_unresolved_propagates() {
        let registry = abc_registry();
        let launcher = FakeLauncher::with_installed(&[A, C]).outcome(StartOutcome::Unresolved);
        let resolver = LaunchResolver::new(&registry, &launcher);

        let err = resolver
            .launch(&LaunchRequest::new(MapType::Osmand, "osmand.api://x"))
            .unwrap_err();
        assert!(matches!(
            err,
            LaunchError::Platform(LauncherError::Unresolved { .. })
        ));
    }

    #[test]
    fn test_primary_is_flag_driven() {
        // Waze flagged primary in a custom catalog gets the lenient path.
        let registry = ProviderRegistry::new(vec![
            MapProvider::new(MapType::Google, "Google Maps", A),
            MapProvider::new(MapType::Waze, "Waze", B).primary(),
        ])
        .unwrap();
        let launcher = FakeLauncher::with_installed(&[A, B]).outcome(StartOutcome::UnresolvedAlways);
        let resolver = LaunchResolver::new(&registry, &launcher);

        assert!(resolver.launch(&LaunchRequest::new(MapType::Waze, "waze://")).is_ok());
        assert!(resolver.launch(&LaunchRequest::new(MapType::Google, "geo:0,0")).is_err());
    }

    #[test]
    fn test_suggest() {
        let registry = ProviderRegistry::builtin();
        let launcher = FakeLauncher::with_installed(&[]);
        let resolver = LaunchResolver::new(&registry, &launcher);
        assert_eq!(resolver.suggest("yandexnav"), Some(MapType::YandexNavi));
        assert_eq!(resolver.suggest("osm"), Some(MapType::Osmand));
        assert_eq!(resolver.suggest("zzzzqqq"), None);
    }
}
