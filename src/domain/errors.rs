use http::StatusCode;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum RelayError {
    Network(String),
    Timeout(Duration),
    Status { status: StatusCode, body: Vec<u8> },
    Decode(String),
    InvalidRequest(String),
    Route { status: StatusCode, message: String },
    Other(String),
}

impl RelayError {
    pub fn route(status: StatusCode, message: impl Into<String>) -> Self {
        RelayError::Route {
            status,
            message: message.into(),
        }
    }

    /// Whether the remote registry answered at all.
    pub fn has_response(&self) -> bool {
        matches!(self, RelayError::Status { .. } | RelayError::Decode(_))
    }

    /// Status reported to the inbound caller. Only route errors carry their own.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::Route { status, .. } => *status,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::Network(msg) => write!(f, "{}", msg),
            RelayError::Timeout(after) => write!(f, "timeout of {}ms exceeded", after.as_millis()),
            RelayError::Status { status, .. } => write!(f, "Request failed with status code {}", status.as_u16()),
            RelayError::Decode(msg) => write!(f, "Invalid response body: {}", msg),
            RelayError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            RelayError::Route { message, .. } => write!(f, "{}", message),
            RelayError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for RelayError {}

pub type Result<T> = std::result::Result<T, RelayError>;
