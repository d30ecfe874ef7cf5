use std::time::Duration;

use serde_json::{Value, json};

use super::GatewayError;

/// Body of a JSON-RPC response: either `result` or `error`.
#[derive(Clone, Debug, PartialEq)]
pub enum RpcReply {
    Result(Value),
    Error(Value),
}

impl RpcReply {
    /// Splits a decoded response body into its `result` or `error` member.
    pub fn from_body(method: &str, body: Value) -> Result<Self, GatewayError> {
        let mut body = body;
        if let Some(err) = body.get_mut("error").map(Value::take) {
            if !err.is_null() {
                return Ok(RpcReply::Error(err));
            }
        }
        match body.get_mut("result").map(Value::take) {
            Some(result) => Ok(RpcReply::Result(result)),
            None => Err(GatewayError::Decode {
                method: method.to_string(),
                message: "neither result nor error in response".to_string(),
            }),
        }
    }
}

/// Carries one JSON-RPC request to the daemon. Implementations must be
/// shareable across the worker pools.
pub trait Transport: Send + Sync {
    fn endpoint(&self) -> &str;

    fn call(&self, method: &str, params: Value) -> Result<RpcReply, GatewayError>;
}

pub struct HttpTransport {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("lbry-bulk")
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Connection {
                endpoint: endpoint.to_string(),
                message: format!("build reqwest client: {}", e),
            })?;
        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            client,
        })
    }
}

impl Transport for HttpTransport {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn call(&self, method: &str, params: Value) -> Result<RpcReply, GatewayError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "method": method, "params": params }))
            .send()
            .map_err(|e| GatewayError::Connection {
                endpoint: self.endpoint.clone(),
                message: e.to_string(),
            })?;

        let status = resp.status();
        let body: Result<Value, _> = resp.json();
        match body {
            Ok(body) => RpcReply::from_body(method, body),
            Err(_) if !status.is_success() => Err(GatewayError::Status {
                method: method.to_string(),
                status: status.as_u16(),
            }),
            Err(e) => Err(GatewayError::Decode {
                method: method.to_string(),
                message: e.to_string(),
            }),
        }
    }
}
