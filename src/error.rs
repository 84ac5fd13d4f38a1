//! Error types for the Omise client
//!
//! Every failure a call can observe is normalized into [`ApiError`] before it
//! reaches the caller. Each kind carries a stable numeric code so that results
//! can be compared across SDKs.

use serde::Deserialize;
use thiserror::Error;

/// Result type alias for Omise API operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// First code of the error code block. Each [`ErrorKind`] adds its offset.
pub const ERROR_CODE_BASE: u32 = 92661;

/// The closed set of failure kinds, without their payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Timeout,
    ConnectionFailure,
    BadRequest,
    ServerError,
    ParsingFailure,
    Unknown,
    InvalidRequest,
}

impl ErrorKind {
    /// Every kind, in code order
    pub const ALL: [ErrorKind; 7] = [
        ErrorKind::Timeout,
        ErrorKind::ConnectionFailure,
        ErrorKind::BadRequest,
        ErrorKind::ServerError,
        ErrorKind::ParsingFailure,
        ErrorKind::Unknown,
        ErrorKind::InvalidRequest,
    ];

    /// Stable numeric code for this kind
    pub fn code(self) -> u32 {
        let offset = match self {
            ErrorKind::Timeout => 0,
            ErrorKind::ConnectionFailure => 1,
            ErrorKind::BadRequest => 2,
            ErrorKind::ServerError => 3,
            ErrorKind::ParsingFailure => 4,
            ErrorKind::Unknown => 5,
            ErrorKind::InvalidRequest => 6,
        };
        ERROR_CODE_BASE + offset
    }

    /// Look up a kind by its stable code
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

/// Main error type delivered to callers of the client
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No response arrived before the client-side deadline
    #[error("Request timed out")]
    Timeout,

    /// Socket, DNS or TLS failure before a response was received
    #[error("Connection failure: {reason}")]
    ConnectionFailure { reason: String },

    /// The service rejected the request with a 4xx status and an error body
    #[error("Bad request ({server_code}): {server_message}")]
    BadRequest {
        server_message: String,
        server_code: String,
        location: Option<String>,
    },

    /// The service failed with a 5xx status
    #[error("Server error with status {status}")]
    ServerError { status: u16 },

    /// A successful response did not have the expected shape
    #[error("Failed to parse response field `{field}`")]
    ParsingFailure { field: String },

    /// Anything else, including 4xx responses without a readable error body
    #[error("Unknown error: {reason}")]
    Unknown { reason: String },

    /// The request was rejected locally before any network I/O
    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },
}

impl ApiError {
    /// Create a connection failure error
    pub fn connection_failure(reason: impl Into<String>) -> Self {
        Self::ConnectionFailure {
            reason: reason.into(),
        }
    }

    /// Create a bad request error from the server-supplied code and message
    pub fn bad_request(server_code: impl Into<String>, server_message: impl Into<String>) -> Self {
        Self::BadRequest {
            server_message: server_message.into(),
            server_code: server_code.into(),
            location: None,
        }
    }

    /// Create a parsing failure error
    pub fn parsing_failure(field: impl Into<String>) -> Self {
        Self::ParsingFailure {
            field: field.into(),
        }
    }

    /// Create an unknown error
    pub fn unknown(reason: impl Into<String>) -> Self {
        Self::Unknown {
            reason: reason.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// The kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Timeout => ErrorKind::Timeout,
            ApiError::ConnectionFailure { .. } => ErrorKind::ConnectionFailure,
            ApiError::BadRequest { .. } => ErrorKind::BadRequest,
            ApiError::ServerError { .. } => ErrorKind::ServerError,
            ApiError::ParsingFailure { .. } => ErrorKind::ParsingFailure,
            ApiError::Unknown { .. } => ErrorKind::Unknown,
            ApiError::InvalidRequest { .. } => ErrorKind::InvalidRequest,
        }
    }

    /// Stable numeric code of this error's kind
    pub fn code(&self) -> u32 {
        self.kind().code()
    }

    /// Human-readable message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Whether the failure was caused by the caller's request rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(self, ApiError::InvalidRequest { .. })
    }

    /// Classified server error code, for `BadRequest` errors only
    pub fn server_error_code(&self) -> Option<ServerErrorCode> {
        match self {
            ApiError::BadRequest { server_code, .. } => Some(ServerErrorCode::from(server_code.as_str())),
            _ => None,
        }
    }

    /// Classify a non-2xx HTTP response.
    ///
    /// 4xx responses become `BadRequest` when the body is a readable error
    /// object, `Unknown` otherwise. 5xx responses become `ServerError`.
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        match status {
            400..=499 => match serde_json::from_slice::<ErrorBody>(body) {
                Ok(ErrorBody {
                    code: Some(code),
                    message: Some(message),
                    location,
                    ..
                }) if !code.is_empty() => ApiError::BadRequest {
                    server_message: message,
                    server_code: code,
                    location,
                },
                _ => ApiError::unknown(format!("HTTP {} without a readable error body", status)),
            },
            500..=599 => ApiError::ServerError { status },
            _ => ApiError::unknown(format!("Unexpected HTTP status {}", status)),
        }
    }
}

/// Error object returned by the service on 4xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    location: Option<String>,
    code: Option<String>,
    message: Option<String>,
}

/// Well-known server error codes carried by `BadRequest`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ServerErrorCode {
    InvalidCard,
    BadRequest,
    AuthenticationFailure,
    ServiceNotFound,
    Other(String),
}

impl From<&str> for ServerErrorCode {
    fn from(code: &str) -> Self {
        match code {
            "invalid_card" => ServerErrorCode::InvalidCard,
            "bad_request" => ServerErrorCode::BadRequest,
            "authentication_failure" => ServerErrorCode::AuthenticationFailure,
            "service_not_found" | "not_found" => ServerErrorCode::ServiceNotFound,
            other => ServerErrorCode::Other(other.to_string()),
        }
    }
}

/// A response body did not match the expected shape.
///
/// `field` is the dotted path from the top-level object; `$` is the body itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("field `{field}`: {reason}")]
pub struct ParsingFailure {
    pub field: String,
    pub reason: String,
}

impl ParsingFailure {
    /// Path used when the body itself is not a JSON object
    pub const ROOT: &'static str = "$";

    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Required field absent or null
    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, "required field is missing")
    }

    /// The body could not be read as a JSON object
    pub fn root(reason: impl Into<String>) -> Self {
        Self::new(Self::ROOT, reason)
    }
}

impl From<ParsingFailure> for ApiError {
    fn from(failure: ParsingFailure) -> Self {
        ApiError::ParsingFailure {
            field: failure.field,
        }
    }
}

/// A request was rejected by the request builder before any I/O
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct ValidationFailure {
    pub reason: String,
}

impl ValidationFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<ValidationFailure> for ApiError {
    fn from(failure: ValidationFailure) -> Self {
        ApiError::InvalidRequest {
            reason: failure.reason,
        }
    }
}

/// Errors raised while constructing a client
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Public key missing or not a `pkey_` key
    #[error("Invalid public key: {message}")]
    InvalidPublicKey { message: String },

    /// Secret key not a `skey_` key
    #[error("Invalid secret key: {message}")]
    InvalidSecretKey { message: String },

    /// Endpoint URL could not be used
    #[error("Invalid URL for {name}: {message}")]
    InvalidUrl { name: String, message: String },

    /// Any other configuration problem
    #[error("Configuration error: {message}")]
    Other { message: String },
}

impl ConfigError {
    pub fn invalid_url(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidUrl {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(ErrorKind::Timeout.code(), 92661);
        assert_eq!(ErrorKind::ConnectionFailure.code(), 92662);
        assert_eq!(ErrorKind::BadRequest.code(), 92663);
        assert_eq!(ErrorKind::ServerError.code(), 92664);
        assert_eq!(ErrorKind::ParsingFailure.code(), 92665);
        assert_eq!(ErrorKind::Unknown.code(), 92666);
        assert_eq!(ErrorKind::InvalidRequest.code(), 92667);
    }

    #[test]
    fn test_codes_round_trip() {
        for kind in ErrorKind::ALL {
            assert_eq!(ErrorKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(ErrorKind::from_code(1), None);
    }

    #[test]
    fn test_400_with_error_body() {
        let body = br#"{"object":"error","location":"https://www.omise.co/api-errors#invalid-card","code":"invalid_card","message":"invalid expiration date"}"#;
        let error = ApiError::from_status(400, body);
        assert_eq!(
            error,
            ApiError::BadRequest {
                server_message: "invalid expiration date".to_string(),
                server_code: "invalid_card".to_string(),
                location: Some("https://www.omise.co/api-errors#invalid-card".to_string()),
            }
        );
        assert_eq!(error.server_error_code(), Some(ServerErrorCode::InvalidCard));
    }

    #[test]
    fn test_4xx_without_body_is_unknown() {
        assert_eq!(ApiError::from_status(401, b"").kind(), ErrorKind::Unknown);
        assert_eq!(ApiError::from_status(404, b"<html>").kind(), ErrorKind::Unknown);
        assert_eq!(
            ApiError::from_status(422, br#"{"message":"no code"}"#).kind(),
            ErrorKind::Unknown
        );
    }

    #[test]
    fn test_5xx_is_server_error() {
        assert_eq!(ApiError::from_status(503, b"{}"), ApiError::ServerError { status: 503 });
    }

    #[test]
    fn test_other_status_is_unknown() {
        assert_eq!(ApiError::from_status(302, b"").kind(), ErrorKind::Unknown);
    }

    #[test]
    fn test_server_error_codes() {
        assert_eq!(
            ServerErrorCode::from("authentication_failure"),
            ServerErrorCode::AuthenticationFailure
        );
        assert_eq!(ServerErrorCode::from("not_found"), ServerErrorCode::ServiceNotFound);
        assert_eq!(
            ServerErrorCode::from("used_token"),
            ServerErrorCode::Other("used_token".to_string())
        );
        assert_eq!(ApiError::Timeout.server_error_code(), None);
    }

    #[test]
    fn test_conversions() {
        let parsing: ApiError = ParsingFailure::missing("card.brand").into();
        assert_eq!(parsing, ApiError::parsing_failure("card.brand"));

        let validation: ApiError = ValidationFailure::new("amount must be positive").into();
        assert!(validation.is_client_error());
        assert_eq!(validation.code(), 92667);
    }
}
