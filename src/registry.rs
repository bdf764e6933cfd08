use std::collections::HashSet;

use crate::error::RegistryError;
use crate::map::{MapProvider, MapType};

/// Ordered catalog of known map applications.
///
/// Order is significant: installed maps are reported, and fallback
/// alternatives enumerated, in registry order.
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    providers: Vec<MapProvider>,
}

impl ProviderRegistry {
    pub fn new(providers: Vec<MapProvider>) -> Result<Self, RegistryError> {
        if providers.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::new();
        for provider in &providers {
            if !seen.insert(provider.map_type) {
                return Err(RegistryError::Duplicate(provider.map_type));
            }
        }

        Ok(Self { providers })
    }

    /// The catalog of Android map applications.
    pub fn builtin() -> Self {
        Self {
            providers: vec![
                MapProvider::new(MapType::Google, "Google Maps", "com.google.android.apps.maps")
                    .primary(),
                MapProvider::new(MapType::Amap, "Amap", "com.autonavi.minimap"),
                MapProvider::new(MapType::Baidu, "Baidu Maps", "com.baidu.BaiduMap"),
                MapProvider::new(MapType::Waze, "Waze", "com.waze"),
                MapProvider::new(MapType::YandexNavi, "Yandex Navigator", "ru.yandex.yandexnavi"),
                MapProvider::new(MapType::YandexMaps, "Yandex Maps", "ru.yandex.yandexmaps"),
                MapProvider::new(MapType::Citymapper, "Citymapper", "com.citymapper.app.release"),
                MapProvider::new(MapType::Mapswithme, "MAPS.ME", "com.mapswithme.maps.pro"),
                MapProvider::new(MapType::Osmand, "OsmAnd", "net.osmand"),
            ],
        }
    }

    pub fn providers(&self) -> &[MapProvider] {
        &self.providers
    }

    pub fn find(&self, map_type: MapType) -> Option<&MapProvider> {
        self.providers.iter().find(|p| p.map_type == map_type)
    }

    pub fn primary(&self) -> Option<&MapProvider> {
        self.providers.iter().find(|p| p.is_primary)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
