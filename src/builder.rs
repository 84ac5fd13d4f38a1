//! Request builder
//!
//! Turns a [`Request`] into a [`TransportRequest`]: host and path from the
//! request kind, the Basic credential for the key the kind needs, the common
//! headers, and the JSON body. Invalid requests fail here, before any I/O.

use crate::catalog::{self, SourceField};
use crate::codec;
use crate::config::ClientConfig;
use crate::error::ValidationFailure;
use crate::requests::{
    CardParams, ChargeRequest, Credential, CustomerRequest, Request, Server, SourceRequest,
    TokenLookup, TokenRequest,
};
use crate::transport::TransportRequest;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use http::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use url::Url;

/// Header carrying the API version
pub const OMISE_VERSION_HEADER: &str = "omise-version";

/// Characters escaped in an identifier used as a path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

type Validation<T = ()> = Result<T, ValidationFailure>;

/// Builds transport requests against one configuration
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    config: ClientConfig,
}

impl RequestBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Validate a request and compose its transport request
    pub fn build(&self, request: &Request) -> Validation<TransportRequest> {
        validate(request)?;

        let kind = request.kind();
        let url = self.url(request)?;
        let key = self.key_for(request)?;
        let headers = self.headers(key, kind.method() == http::Method::POST)?;
        let body = self.body(request)?;

        Ok(TransportRequest {
            kind,
            method: kind.method(),
            url,
            headers,
            body,
        })
    }

    fn url(&self, request: &Request) -> Validation<Url> {
        let base = match request.kind().server() {
            Server::Vault => &self.config.vault_url,
            Server::Api => &self.config.api_url,
        };
        let path = match request {
            Request::Token(_) => "tokens".to_string(),
            Request::TokenLookup(lookup) => {
                format!("tokens/{}", utf8_percent_encode(&lookup.id, PATH_SEGMENT))
            }
            Request::Source(_) => "sources".to_string(),
            Request::Charge(_) => "charges".to_string(),
            Request::Customer(_) => "customers".to_string(),
            Request::Capability(_) => "capability".to_string(),
        };
        base.join(&path)
            .map_err(|e| ValidationFailure::new(format!("cannot build request URL: {}", e)))
    }

    fn key_for<'a>(&'a self, request: &'a Request) -> Validation<&'a str> {
        let key = match (request, request.kind().credential()) {
            (Request::Token(TokenRequest { public_key: Some(key), .. }), _) => Some(key),
            (_, Credential::Public) => self.config.public_key.as_ref(),
            (_, Credential::Secret) => self.config.secret_key.as_ref(),
        };
        match key {
            Some(key) if !key.is_empty() => Ok(key.as_str()),
            _ => Err(ValidationFailure::new(match request.kind().credential() {
                Credential::Public => "public key is not configured",
                Credential::Secret => "secret key is not configured",
            })),
        }
    }

    fn headers(&self, key: &str, has_body: bool) -> Validation<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, header_value(&basic_auth(key))?);
        headers.insert(USER_AGENT, header_value(&self.config.user_agent)?);
        headers.insert(
            HeaderName::from_static(OMISE_VERSION_HEADER),
            header_value(&self.config.api_version)?,
        );
        if has_body {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        Ok(headers)
    }

    fn body(&self, request: &Request) -> Validation<Option<Vec<u8>>> {
        let encoded = match request {
            Request::Token(r) => codec::encode(r),
            Request::Source(r) => codec::encode(r),
            Request::Charge(r) => codec::encode(r),
            Request::Customer(r) => codec::encode(r),
            Request::TokenLookup(_) | Request::Capability(_) => return Ok(None),
        };
        encoded
            .map(Some)
            .map_err(|e| ValidationFailure::new(format!("cannot encode request body: {}", e)))
    }
}

/// `Basic base64(key + ":")`
pub fn basic_auth(key: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:", key)))
}

fn header_value(value: &str) -> Validation<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| ValidationFailure::new("header value contains invalid characters"))
}

fn require_text(value: &str, field: &str) -> Validation {
    if value.trim().is_empty() {
        return Err(ValidationFailure::new(format!("{} is required", field)));
    }
    Ok(())
}

fn require_optional_text(value: Option<&str>, field: &str) -> Validation {
    match value {
        Some(value) => require_text(value, field),
        None => Ok(()),
    }
}

fn require_positive(amount: i64) -> Validation {
    if amount <= 0 {
        return Err(ValidationFailure::new("amount must be greater than zero"));
    }
    Ok(())
}

/// Validate request fields without building anything
pub fn validate(request: &Request) -> Validation {
    match request {
        Request::Token(token) => validate_card(&token.card),
        Request::TokenLookup(lookup) => validate_lookup(lookup),
        Request::Source(source) => validate_source(source),
        Request::Charge(charge) => validate_charge(charge),
        Request::Customer(customer) => validate_customer(customer),
        Request::Capability(_) => Ok(()),
    }
}

fn validate_lookup(lookup: &TokenLookup) -> Validation {
    require_text(&lookup.id, "token id")?;
    if matches!(lookup.id.as_str(), "." | "..") {
        return Err(ValidationFailure::new("token id is not a valid path segment"));
    }
    Ok(())
}

fn validate_card(card: &CardParams) -> Validation {
    require_text(&card.name, "card name")?;
    if card.pan().is_empty() {
        return Err(ValidationFailure::new("card number is required"));
    }
    if !(1..=12).contains(&card.expiration_month) {
        return Err(ValidationFailure::new("card expiration month must be between 1 and 12"));
    }
    if card.expiration_year == 0 {
        return Err(ValidationFailure::new("card expiration year is required"));
    }
    require_optional_text(card.security_code.as_deref(), "card security code")
}

fn validate_source(source: &SourceRequest) -> Validation {
    require_text(source.source_type.as_str(), "source type")?;
    require_text(source.currency.code(), "currency")?;
    require_positive(source.amount)?;

    let Some(method) = catalog::lookup(&source.source_type) else {
        return Ok(());
    };
    for field in method.required_fields {
        let present = match field {
            SourceField::Bank => source.bank.as_deref().is_some_and(|v| !v.trim().is_empty()),
            SourceField::InstallmentTerm => source.installment_term.is_some_and(|term| term > 0),
            SourceField::PhoneNumber => source.phone_number.as_deref().is_some_and(|v| !v.trim().is_empty()),
            SourceField::Email => source.email.as_deref().is_some_and(|v| !v.trim().is_empty()),
            SourceField::Name => source.name.as_deref().is_some_and(|v| !v.trim().is_empty()),
            SourceField::StoreId => source.store_id.as_deref().is_some_and(|v| !v.trim().is_empty()),
            SourceField::TerminalId => source.terminal_id.as_deref().is_some_and(|v| !v.trim().is_empty()),
        };
        if !present {
            return Err(ValidationFailure::new(format!(
                "{} is required for {} sources",
                field.name(),
                source.source_type
            )));
        }
    }
    Ok(())
}

fn validate_charge(charge: &ChargeRequest) -> Validation {
    require_positive(charge.amount)?;
    require_text(charge.currency.code(), "currency")?;
    require_optional_text(charge.card.as_deref(), "card")?;
    require_optional_text(charge.customer.as_deref(), "customer")?;
    require_optional_text(charge.source.as_deref(), "source")?;
    if charge.card.is_none() && charge.customer.is_none() && charge.source.is_none() {
        return Err(ValidationFailure::new("charge needs a card, customer or source"));
    }
    Ok(())
}

fn validate_customer(customer: &CustomerRequest) -> Validation {
    require_optional_text(customer.email.as_deref(), "email")?;
    require_optional_text(customer.card.as_deref(), "card")
}
