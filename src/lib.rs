//! # omise - payment tokenization client core
//!
//! Turns locally collected card details, or a bank or wallet selection, into
//! single-use tokens and sources through the Omise API, and creates charges
//! and customers against the same service.
//!
//! ```no_run
//! use omise::{CardParams, Client, ClientConfig, TokenRequest};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new(ClientConfig::new("pkey_test_123"))?;
//! let card = CardParams::new("Jane Doe", "4242424242424242", 12, 2030);
//! let token = client.create_token(TokenRequest::new(card)).await?;
//! println!("{}", token.id);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod catalog;
pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod models;
pub mod pan;
pub mod requests;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use builder::RequestBuilder;
pub use client::{Client, Submission};
pub use config::{ClientConfig, API_VERSION};
pub use error::{ApiError, ConfigError, ErrorKind, ParsingFailure, Result, ServerErrorCode, ValidationFailure};
pub use models::{ApiObject, Capability, CapabilityMethod, Card, Charge, Customer, List, ObjectKind, Source, Token};
pub use pan::{CardBrand, Pan};
pub use requests::{
    ApiRequest, CapabilityRequest, CardParams, ChargeRequest, CustomerRequest, Request, RequestKind,
    SourceRequest, TokenLookup, TokenRequest,
};
pub use transport::{ReqwestTransport, Transport, TransportError, TransportRequest, TransportResponse};
pub use types::{ChargeStatus, Currency, Flow, SourceType};

/// Current version of the omise library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constants() {
        assert_eq!(API_VERSION, "2019-05-29");
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_user_agent_carries_version() {
        let config = ClientConfig::default();
        assert_eq!(
            config.user_agent,
            format!("OmiseRust/{} Rust/{}", VERSION, std::env::consts::OS)
        );
    }
}
