use std::fmt;

/// Errors that end a spot price query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpotError {
    /// Malformed user input: flags, config values or a parameter the provider rejected
    InvalidArgument(String),

    /// Missing, expired or insufficient cloud credentials
    Auth(String),

    /// Connectivity failures, timeouts and unexpected provider responses
    Network(String),

    /// The query was valid but the provider had no samples for it
    EmptyResult(String),
}

impl fmt::Display for SpotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpotError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            SpotError::Auth(msg) => write!(f, "Authentication failed: {}", msg),
            SpotError::Network(msg) => write!(f, "Network request failed: {}", msg),
            SpotError::EmptyResult(msg) => write!(f, "No data: {}", msg),
        }
    }
}

impl std::error::Error for SpotError {}

impl SpotError {
    /// Process exit code for this error. Zero is reserved for success and
    /// one for failures outside this taxonomy.
    pub fn exit_code(&self) -> i32 {
        match self {
            SpotError::InvalidArgument(_) => 2,
            SpotError::Auth(_) => 3,
            SpotError::Network(_) => 4,
            SpotError::EmptyResult(_) => 5,
        }
    }

    /// Get a follow-up hint to print under the error message
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            SpotError::InvalidArgument(_) => Some("Run `spot --help` for usage."),
            SpotError::Auth(_) => Some(
                "Configure AWS credentials (aws configure, AWS_PROFILE or AWS_ACCESS_KEY_ID/AWS_SECRET_ACCESS_KEY).",
            ),
            SpotError::Network(_) => Some("Check your connection and try again."),
            SpotError::EmptyResult(_) => None,
        }
    }
}

/// Result type for spot price operations
pub type SpotResult<T> = Result<T, SpotError>;
