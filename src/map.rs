use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RequestError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum MapType {
    Google,
    Amap,
    Baidu,
    Waze,
    YandexNavi,
    YandexMaps,
    Citymapper,
    Mapswithme,
    Osmand,
}

impl MapType {
    pub const ALL: [MapType; 9] = [
        MapType::Google,
        MapType::Amap,
        MapType::Baidu,
        MapType::Waze,
        MapType::YandexNavi,
        MapType::YandexMaps,
        MapType::Citymapper,
        MapType::Mapswithme,
        MapType::Osmand,
    ];

    /// Identifier used on the wire and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            MapType::Google => "google",
            MapType::Amap => "amap",
            MapType::Baidu => "baidu",
            MapType::Waze => "waze",
            MapType::YandexNavi => "yandexNavi",
            MapType::YandexMaps => "yandexMaps",
            MapType::Citymapper => "citymapper",
            MapType::Mapswithme => "mapswithme",
            MapType::Osmand => "osmand",
        }
    }
}

impl fmt::Display for MapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for MapType {
    type Err = RequestError;

    /// Exact, case-sensitive match against the wire identifiers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MapType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| RequestError::UnknownMap(s.to_string()))
    }
}

/// A map application known to the registry.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MapProvider {
    pub map_type: MapType,
    pub map_name: String,
    pub package_name: String,
    #[serde(skip)]
    pub is_primary: bool,
}

impl MapProvider {
    pub fn new(map_type: MapType, map_name: &str, package_name: &str) -> Self {
        Self {
            map_type,
            map_name: map_name.to_string(),
            package_name: package_name.to_string(),
            is_primary: false,
        }
    }

    /// Mark this provider as the platform's primary map application.
    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }
}

/// A request to open `url` in the map application identified by `map_type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub map_type: MapType,
    pub url: String,
}

impl LaunchRequest {
    pub fn new(map_type: MapType, url: impl Into<String>) -> Self {
        Self {
            map_type,
            url: url.into(),
        }
    }

    /// Build a request from untyped caller input, rejecting unknown ids and
    /// missing fields.
    pub fn parse(map_type: Option<&str>, url: Option<&str>) -> Result<Self, RequestError> {
        let map_type = map_type.ok_or(RequestError::MissingArgument("mapType"))?;
        let url = url.ok_or(RequestError::MissingArgument("url"))?;
        Ok(Self::new(map_type.parse()?, url))
    }
}
