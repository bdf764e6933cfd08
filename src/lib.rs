//! Detect installed map applications and open navigation URLs in them.
//!
//! The [`registry::ProviderRegistry`] lists known maps, an
//! [`launcher::AppLauncher`] talks to the device, and the
//! [`resolver::LaunchResolver`] decides what to launch or which
//! alternatives to report.

pub mod channel;
pub mod config;
pub mod error;
pub mod launcher;
pub mod logging;
pub mod map;
pub mod output;
pub mod registry;
pub mod resolver;
