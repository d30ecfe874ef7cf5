//! The only place that knows the daemon's JSON-RPC shapes. Everything above
//! traffics in typed records.

use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::model::{Claim, Failure, FailureKind};

mod error;
pub use self::error::GatewayError;

mod transport;
pub use self::transport::{HttpTransport, RpcReply, Transport};

mod types;
pub use self::types::*;

mod claims;
mod files;
mod peers;
mod prefs;
mod supports;

/// Large page size used to fetch whole local listings in one call.
const ALL_ITEMS: u32 = 99_000;

pub struct Gateway<T: Transport = HttpTransport> {
    transport: T,
}

impl Gateway<HttpTransport> {
    pub fn connect(server: &str, timeout: std::time::Duration) -> Result<Self, GatewayError> {
        Ok(Self::new(HttpTransport::new(server, timeout)?))
    }
}

impl<T: Transport> Gateway<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    /// Liveness check: a benign request whose only purpose is to learn
    /// whether anything answers at the endpoint.
    pub fn server_exists(&self) -> bool {
        match self.transport.call("version", json!({})) {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(endpoint = self.endpoint(), error = %err, "liveness check failed");
                false
            }
        }
    }

    /// Raw call; an `error` payload is returned, not raised.
    pub fn call(&self, method: &str, params: Value) -> Result<RpcReply, GatewayError> {
        tracing::debug!(method, %params, "rpc");
        self.transport.call(method, params)
    }

    /// Call whose error payload is turned into `GatewayError::Daemon`.
    fn call_result(&self, method: &str, params: Value) -> Result<Value, GatewayError> {
        match self.call(method, params)? {
            RpcReply::Result(v) => Ok(v),
            RpcReply::Error(e) => Err(GatewayError::Daemon {
                method: method.to_string(),
                message: error_text(&e),
            }),
        }
    }

    fn call_typed<R: DeserializeOwned>(&self, method: &str, params: Value) -> Result<R, GatewayError> {
        let v = self.call_result(method, params)?;
        serde_json::from_value(v).map_err(|e| GatewayError::Decode {
            method: method.to_string(),
            message: e.to_string(),
        })
    }

    pub fn get_settings(&self) -> Result<Value, GatewayError> {
        self.call_result("settings_get", json!({}))
    }

    pub fn get_download_dir(&self) -> Result<std::path::PathBuf, GatewayError> {
        let settings = self.get_settings()?;
        settings
            .get("download_dir")
            .and_then(|v| v.as_str())
            .map(std::path::PathBuf::from)
            .ok_or_else(|| GatewayError::Decode {
                method: "settings_get".to_string(),
                message: "missing download_dir".to_string(),
            })
    }
}

/// Best effort text of a daemon error payload: `{"message": ...}`,
/// `{"name", "text"}`, or a bare string.
pub(crate) fn error_text(e: &Value) -> String {
    if let Some(s) = e.as_str() {
        return s.to_string();
    }
    for key in ["text", "message"] {
        if let Some(s) = e.get(key).and_then(|v| v.as_str()) {
            return match e.get("name").and_then(|v| v.as_str()) {
                Some(name) if key == "text" && !s.contains(name) => format!("{}: {}", name, s),
                _ => s.to_string(),
            };
        }
    }
    e.to_string()
}

impl From<GatewayError> for Failure {
    fn from(err: GatewayError) -> Self {
        Failure::new(FailureKind::RpcError, err.to_string())
    }
}

/// Page of `claim_search`-style results.
#[derive(Debug, serde::Deserialize)]
pub struct Page<I> {
    #[serde(default = "Vec::new")]
    pub items: Vec<I>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_items: u64,
}

pub(crate) fn claim_from_value(v: Value) -> Result<Claim, GatewayError> {
    serde_json::from_value(v).map_err(|e| GatewayError::Decode {
        method: "resolve".to_string(),
        message: e.to_string(),
    })
}
