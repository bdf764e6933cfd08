use std::fs;
use std::path::{Path, PathBuf};

use configparser::ini::Ini;

use crate::error::ConfigError;
use crate::output::OutputFormat;

/// Settings read from `config.ini`. Every field is optional so command-line
/// values can be layered on top.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub adb_path: Option<PathBuf>,
    pub serial: Option<String>,
    pub format: Option<OutputFormat>,
    pub color: Option<bool>,
}

impl Config {
    /// `<config_dir>/maplaunch/config.ini`, e.g. `~/.config/maplaunch/config.ini`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("maplaunch").join("config.ini"))
    }

    /// Load an explicit file (must exist) or the default one (may be absent).
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    tracing::debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loading config");
        Self::parse(&content, path)
    }

    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let mut ini = Ini::new();
        ini.set_comment_symbols(&['#', ';']);
        ini.read(content.to_string()).map_err(|message| ConfigError::Parse {
            path: path.display().to_string(),
            message,
        })?;

        let adb_path = non_empty(ini.get("adb", "path")).map(PathBuf::from);
        let serial = non_empty(ini.get("adb", "serial"));

        let format = match non_empty(ini.get("output", "format")) {
            Some(value) => Some(
                value
                    .parse::<OutputFormat>()
                    .map_err(|_| ConfigError::InvalidValue {
                        key: "output.format".to_string(),
                        value,
                    })?,
            ),
            None => None,
        };

        let color = ini
            .getboolcoerce("output", "color")
            .map_err(|_| ConfigError::InvalidValue {
                key: "output.color".to_string(),
                value: ini.get("output", "color").unwrap_or_default(),
            })?;

        Ok(Self {
            adb_path,
            serial,
            format,
            color,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
