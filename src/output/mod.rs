pub mod columns;
pub mod json;
pub mod table;
pub mod tsv;

use std::fmt;
use std::str::FromStr;

use crate::map::{MapProvider, MapType};
use columns::Column;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Tsv,
    Ids,
    Names,
    Packages,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 6] = [
        OutputFormat::Table,
        OutputFormat::Json,
        OutputFormat::Tsv,
        OutputFormat::Ids,
        OutputFormat::Names,
        OutputFormat::Packages,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Ids => "ids",
            OutputFormat::Names => "names",
            OutputFormat::Packages => "packages",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        OutputFormat::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == lower)
            .ok_or_else(|| {
                format!(
                    "invalid format '{}': expected table, json, tsv, ids, names or packages",
                    s
                )
            })
    }
}

impl clap::ValueEnum for OutputFormat {
    fn value_variants<'a>() -> &'a [Self] {
        &OutputFormat::ALL
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

pub struct Formatter {
    format: OutputFormat,
    no_color: bool,
}

impl Formatter {
    pub fn new(format: OutputFormat, no_color: bool) -> Self {
        Self { format, no_color }
    }

    pub fn format_list(
        &self,
        providers: &[MapProvider],
        w: &mut dyn std::io::Write,
    ) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Table => table::format_table(providers, w, self.no_color),
            OutputFormat::Json => json::format_json_list(providers, w),
            OutputFormat::Tsv => tsv::format_tsv(providers, w),
            OutputFormat::Ids => columns::format_column(providers, Column::Id, w),
            OutputFormat::Names => columns::format_column(providers, Column::Name, w),
            OutputFormat::Packages => columns::format_column(providers, Column::Package, w),
        }
    }

    pub fn format_available(
        &self,
        map_type: &str,
        available: bool,
        w: &mut dyn std::io::Write,
    ) -> anyhow::Result<()> {
        if self.format == OutputFormat::Json {
            let obj = serde_json::json!({
                "mapType": map_type,
                "available": available,
            });
            writeln!(w, "{}", serde_json::to_string_pretty(&obj)?)?;
        }
        // Silent for non-JSON formats (exit code only)
        Ok(())
    }

    pub fn format_launched(
        &self,
        map_type: MapType,
        url: &str,
        w: &mut dyn std::io::Write,
    ) -> anyhow::Result<()> {
        if self.format == OutputFormat::Json {
            let obj = serde_json::json!({
                "mapType": map_type,
                "url": url,
                "launched": true,
            });
            writeln!(w, "{}", serde_json::to_string_pretty(&obj)?)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_provider(map_type: MapType, name: &str, package: &str) -> MapProvider {
        MapProvider::new(map_type, name, package)
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!(" Packages ".parse::<OutputFormat>().unwrap(), OutputFormat::Packages);
        assert_eq!("IDS".parse::<OutputFormat>().unwrap(), OutputFormat::Ids);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_format_available_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let mut buf = Vec::new();
        formatter.format_available("waze", true, &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(parsed["available"], true);
        assert_eq!(parsed["mapType"], "waze");
    }

    #[test]
    fn test_format_available_silent_non_json() {
        let formatter = Formatter::new(OutputFormat::Table, true);
        let mut buf = Vec::new();
        formatter.format_available("waze", false, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "");
    }

    #[test]
    fn test_format_launched_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let mut buf = Vec::new();
        formatter
            .format_launched(MapType::YandexNavi, "yandexnavi://", &mut buf)
            .unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(String::from_utf8(buf).unwrap().trim()).unwrap();
        assert_eq!(parsed["mapType"], "yandexNavi");
        assert_eq!(parsed["launched"], true);
    }

    #[test]
    fn test_format_list_each_format() {
        let providers = vec![make_provider(MapType::Waze, "Waze", "com.waze")];

        for format in OutputFormat::ALL {
            let formatter = Formatter::new(format, true);
            let mut buf = Vec::new();
            formatter.format_list(&providers, &mut buf).unwrap();
            let output = String::from_utf8(buf).unwrap();
            assert!(!output.is_empty(), "Format {:?} produced empty output", format);
        }
    }
}
