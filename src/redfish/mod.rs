//! Redfish session client for the iDRAC management endpoint.

pub mod documents;
mod session;

pub use session::Session;

#[derive(Debug, thiserror::Error)]
pub enum RedfishError {
    /// The target hostname could not be parsed into a base URL.
    #[error("invalid hostname '{0}'")]
    Host(String),

    /// Endpoint unreachable after the built-in retry.
    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    /// The remote answered with a non-success status.
    #[error("API Error {endpoint} {status}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    /// The remote answered, but the document could not be decoded.
    #[error("failed to decode response from {endpoint}: {detail}")]
    Payload { endpoint: String, detail: String },
}

impl RedfishError {
    /// Short error class name used in the failure output line.
    pub fn kind(&self) -> &'static str {
        match self {
            RedfishError::Host(_) => "InvalidHost",
            RedfishError::Transport(_) => "TransportError",
            RedfishError::Api { .. } => "ApiError",
            RedfishError::Payload { .. } => "PayloadError",
        }
    }

    /// Transport failures get the fixed "not reachable" output and always
    /// map to the unknown exit code, regardless of mode.
    pub fn is_transport(&self) -> bool {
        matches!(self, RedfishError::Transport(_))
    }
}
