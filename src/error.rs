use thiserror::Error;

use crate::launcher::LauncherError;

/// Malformed caller input. Never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("unknown map type: {0}")]
    UnknownMap(String),

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
}

#[derive(Error, Debug)]
pub enum LaunchError {
    /// The requested map is not installed. `installed` holds the display
    /// names of the maps that are, in registry order.
    #[error("map is not installed on a device")]
    NotAvailable { installed: Vec<String> },

    #[error("launch failed: {0}")]
    Platform(#[from] LauncherError),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("registry must contain at least one provider")]
    Empty,

    #[error("duplicate map type in registry: {0}")]
    Duplicate(crate::map::MapType),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
