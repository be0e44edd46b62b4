use thiserror::Error;

/// Text shown to the user for any transport failure.
pub const NETWORK_ERROR: &str = "Network error";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PortalError {
    /// Missing or malformed input, caught before any request is made.
    #[error("{0}")]
    Validation(String),

    /// The roll lookup returned no student.
    #[error("Student not found. Register first.")]
    StudentNotFound(String),

    /// Non-OK reply. `message` is the `error` field of the body, or the whole
    /// body dumped as JSON when that field is missing.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The request never produced a usable reply.
    #[error("network error: {0}")]
    Network(String),
}

impl PortalError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(value: serde_json::Error) -> Self {
        Self::Network(format!("invalid json: {value}"))
    }
}

pub type Result<T, E = PortalError> = std::result::Result<T, E>;
