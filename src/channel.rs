//! Method-call surface over the resolver.
//!
//! Requests are `{ "method": ..., "arguments": {...} }`; responses are one of
//! `{ "result": ... }`, `{ "error": { "code", "message" } }` or
//! `{ "notImplemented": true }`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{LaunchError, RequestError};
use crate::map::LaunchRequest;
use crate::resolver::LaunchResolver;

pub const MAP_NOT_AVAILABLE: &str = "MAP_NOT_AVAILABLE";
pub const INVALID_ARGUMENTS: &str = "INVALID_ARGUMENTS";
pub const LAUNCH_FAILED: &str = "LAUNCH_FAILED";

const NOT_INSTALLED_MESSAGE: &str = "Map is not installed on a device";

#[derive(Debug, Clone, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelError {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MethodResponse {
    Result(Value),
    Error(ChannelError),
    NotImplemented(bool),
}

impl MethodResponse {
    pub fn success(value: Value) -> Self {
        MethodResponse::Result(value)
    }

    pub fn error(code: &str, message: impl Into<String>) -> Self {
        MethodResponse::Error(ChannelError {
            code: code.to_string(),
            message: message.into(),
        })
    }

    pub fn not_implemented() -> Self {
        MethodResponse::NotImplemented(true)
    }
}

impl From<RequestError> for MethodResponse {
    fn from(e: RequestError) -> Self {
        MethodResponse::error(INVALID_ARGUMENTS, e.to_string())
    }
}

/// Which not-installed message a launch method reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LaunchKind {
    Map,
    Directions,
}

pub struct MethodChannel<'a> {
    resolver: LaunchResolver<'a>,
}

impl<'a> MethodChannel<'a> {
    pub fn new(resolver: LaunchResolver<'a>) -> Self {
        Self { resolver }
    }

    pub fn handle(&self, call: &MethodCall) -> MethodResponse {
        tracing::debug!(method = %call.method, "method call");
        match call.method.as_str() {
            "getInstalledMaps" => self.get_installed_maps(),
            "isMapAvailable" => self.is_map_available(&call.arguments),
            "launchMap" => self.launch(&call.arguments, LaunchKind::Map),
            "launchMapDirections" => self.launch(&call.arguments, LaunchKind::Directions),
            _ => MethodResponse::not_implemented(),
        }
    }

    /// Decode one JSON request line and handle it.
    pub fn handle_line(&self, line: &str) -> MethodResponse {
        match serde_json::from_str::<MethodCall>(line) {
            Ok(call) => self.handle(&call),
            Err(e) => RequestError::InvalidArguments(format!("malformed request: {}", e)).into(),
        }
    }

    fn get_installed_maps(&self) -> MethodResponse {
        let maps = self
            .resolver
            .installed_providers()
            .into_iter()
            .map(|p| {
                json!({
                    "mapType": p.map_type.as_str(),
                    "mapName": p.map_name,
                    "packageName": p.package_name,
                })
            })
            .collect();
        MethodResponse::success(Value::Array(maps))
    }

    fn is_map_available(&self, arguments: &Value) -> MethodResponse {
        match string_arg(arguments, "mapType") {
            Ok(Some(map_type)) => {
                MethodResponse::success(Value::Bool(self.resolver.is_available(map_type)))
            }
            Ok(None) => RequestError::MissingArgument("mapType").into(),
            Err(e) => e.into(),
        }
    }

    fn launch(&self, arguments: &Value, kind: LaunchKind) -> MethodResponse {
        let request = match parse_launch_request(arguments) {
            Ok(request) => request,
            Err(e) => return e.into(),
        };

        match self.resolver.launch(&request) {
            Ok(()) => MethodResponse::success(Value::Null),
            Err(LaunchError::NotAvailable { installed }) => {
                MethodResponse::error(MAP_NOT_AVAILABLE, not_installed_message(kind, &installed))
            }
            Err(e @ LaunchError::Platform(_)) => MethodResponse::error(LAUNCH_FAILED, e.to_string()),
        }
    }
}

fn not_installed_message(kind: LaunchKind, installed: &[String]) -> String {
    match kind {
        LaunchKind::Map => NOT_INSTALLED_MESSAGE.to_string(),
        LaunchKind::Directions => format!("{}: {}", NOT_INSTALLED_MESSAGE, installed.join(",")),
    }
}

/// `Ok(None)` when the key is absent or null; an error when it holds a non-string.
fn string_arg<'v>(arguments: &'v Value, key: &'static str) -> Result<Option<&'v str>, RequestError> {
    let object = match arguments {
        Value::Object(map) => map,
        Value::Null => return Ok(None),
        _ => {
            return Err(RequestError::InvalidArguments(
                "arguments must be an object".to_string(),
            ))
        }
    };

    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(RequestError::InvalidArguments(format!("{} must be a string", key))),
    }
}

fn parse_launch_request(arguments: &Value) -> Result<LaunchRequest, RequestError> {
    let map_type = string_arg(arguments, "mapType")?;
    let url = string_arg(arguments, "url")?;
    LaunchRequest::parse(map_type, url)
}
