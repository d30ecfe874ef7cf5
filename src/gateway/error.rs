#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Socket-level failure, including connection refused.
    #[error("cannot reach {endpoint}: {message}")]
    Connection { endpoint: String, message: String },

    #[error("{method}: HTTP status {status}")]
    Status { method: String, status: u16 },

    #[error("{method}: malformed response: {message}")]
    Decode { method: String, message: String },

    /// The daemon answered with an error payload where a result was needed.
    #[error("{method}: {message}")]
    Daemon { method: String, message: String },

    #[error("{path}: {message}")]
    Io { path: String, message: String },
}

impl GatewayError {
    pub fn is_connection(&self) -> bool {
        matches!(self, GatewayError::Connection { .. })
    }
}
