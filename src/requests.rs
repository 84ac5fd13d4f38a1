//! Request value types
//!
//! Requests never carry server-assigned fields. They are plain data: the
//! [`RequestBuilder`](crate::builder::RequestBuilder) validates them and turns
//! them into transport requests.

use crate::codec::Decode;
use crate::models::{Capability, Charge, Customer, ObjectKind, Source, Token};
use crate::pan::Pan;
use crate::types::{Currency, SourceType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which API key authenticates a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Credential {
    Public,
    Secret,
}

/// Which host serves a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Server {
    /// Card tokenization host
    Vault,
    /// Everything else
    Api,
}

/// Explicit tag for every request variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    CreateToken,
    RetrieveToken,
    CreateSource,
    CreateCharge,
    CreateCustomer,
    RetrieveCapability,
}

impl RequestKind {
    pub fn method(self) -> http::Method {
        match self {
            RequestKind::RetrieveToken | RequestKind::RetrieveCapability => http::Method::GET,
            _ => http::Method::POST,
        }
    }

    pub fn credential(self) -> Credential {
        match self {
            RequestKind::CreateCharge | RequestKind::CreateCustomer => Credential::Secret,
            _ => Credential::Public,
        }
    }

    pub fn server(self) -> Server {
        match self {
            RequestKind::CreateToken | RequestKind::RetrieveToken => Server::Vault,
            _ => Server::Api,
        }
    }

    /// The object kind a successful response decodes into
    pub fn output(self) -> ObjectKind {
        match self {
            RequestKind::CreateToken | RequestKind::RetrieveToken => ObjectKind::Token,
            RequestKind::CreateSource => ObjectKind::Source,
            RequestKind::CreateCharge => ObjectKind::Charge,
            RequestKind::CreateCustomer => ObjectKind::Customer,
            RequestKind::RetrieveCapability => ObjectKind::Capability,
        }
    }
}

/// A typed request and the result type it produces
pub trait ApiRequest: Into<Request> + Send + 'static {
    type Output: Decode + Send + 'static;

    const KIND: RequestKind;
}

/// Card details collected from the payer
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardParams {
    pub name: String,
    pub number: String,
    pub expiration_month: u32,
    pub expiration_year: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl CardParams {
    pub fn new(
        name: impl Into<String>,
        number: impl Into<String>,
        expiration_month: u32,
        expiration_year: u32,
    ) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
            expiration_month,
            expiration_year,
            security_code: None,
            street1: None,
            city: None,
            state: None,
            postal_code: None,
            country: None,
            phone_number: None,
        }
    }

    pub fn with_security_code(mut self, security_code: impl Into<String>) -> Self {
        self.security_code = Some(security_code.into());
        self
    }

    pub fn with_address(
        mut self,
        street1: impl Into<String>,
        city: impl Into<String>,
        postal_code: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        self.street1 = Some(street1.into());
        self.city = Some(city.into());
        self.postal_code = Some(postal_code.into());
        self.country = Some(country.into());
        self
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    /// The card number as a normalized PAN
    pub fn pan(&self) -> Pan {
        Pan::new(&self.number)
    }
}

impl fmt::Debug for CardParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardParams")
            .field("name", &self.name)
            .field("number", &self.pan().masked())
            .field("expiration_month", &self.expiration_month)
            .field("expiration_year", &self.expiration_year)
            .field("security_code", &self.security_code.as_ref().map(|_| "***"))
            .field("city", &self.city)
            .field("postal_code", &self.postal_code)
            .field("country", &self.country)
            .finish_non_exhaustive()
    }
}

/// Tokenize a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRequest {
    pub card: CardParams,
    /// Overrides the client's public key for this request
    #[serde(skip)]
    pub public_key: Option<String>,
}

impl TokenRequest {
    pub fn new(card: CardParams) -> Self {
        Self {
            card,
            public_key: None,
        }
    }

    pub fn with_public_key(mut self, public_key: impl Into<String>) -> Self {
        self.public_key = Some(public_key.into());
        self
    }
}

/// Look up a previously created token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenLookup {
    pub id: String,
}

impl TokenLookup {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Create a non-card payment source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRequest {
    #[serde(rename = "type")]
    pub source_type: SourceType,
    pub amount: i64,
    pub currency: Currency,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub bank: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub installment_term: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub zero_interest_installments: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub store_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub store_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub terminal_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub platform_type: Option<String>,
}

impl SourceRequest {
    pub fn new(source_type: impl Into<SourceType>, amount: i64, currency: impl Into<Currency>) -> Self {
        Self {
            source_type: source_type.into(),
            amount,
            currency: currency.into(),
            bank: None,
            installment_term: None,
            zero_interest_installments: None,
            phone_number: None,
            email: None,
            name: None,
            store_id: None,
            store_name: None,
            terminal_id: None,
            platform_type: None,
        }
    }

    pub fn with_bank(mut self, bank: impl Into<String>) -> Self {
        self.bank = Some(bank.into());
        self
    }

    pub fn with_installment_term(mut self, term: u32) -> Self {
        self.installment_term = Some(term);
        self
    }

    pub fn with_zero_interest_installments(mut self, zero_interest: bool) -> Self {
        self.zero_interest_installments = Some(zero_interest);
        self
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_store(mut self, store_id: impl Into<String>, store_name: impl Into<String>) -> Self {
        self.store_id = Some(store_id.into());
        self.store_name = Some(store_name.into());
        self
    }

    pub fn with_terminal_id(mut self, terminal_id: impl Into<String>) -> Self {
        self.terminal_id = Some(terminal_id.into());
        self
    }

    pub fn with_platform_type(mut self, platform_type: impl Into<String>) -> Self {
        self.platform_type = Some(platform_type.into());
        self
    }
}

/// Charge a token, source, or a customer's stored card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeRequest {
    pub amount: i64,
    pub currency: Currency,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub capture: Option<bool>,
    /// Token id, or a card id when `customer` is set
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub card: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub customer: Option<String>,
    /// Source id
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub return_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ip: Option<String>,
}

impl ChargeRequest {
    pub fn new(amount: i64, currency: impl Into<Currency>) -> Self {
        Self {
            amount,
            currency: currency.into(),
            description: None,
            capture: None,
            card: None,
            customer: None,
            source: None,
            return_uri: None,
            ip: None,
        }
    }

    pub fn with_card(mut self, card: impl Into<String>) -> Self {
        self.card = Some(card.into());
        self
    }

    pub fn with_customer(mut self, customer: impl Into<String>) -> Self {
        self.customer = Some(customer.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_capture(mut self, capture: bool) -> Self {
        self.capture = Some(capture);
        self
    }

    pub fn with_return_uri(mut self, return_uri: impl Into<String>) -> Self {
        self.return_uri = Some(return_uri.into());
        self
    }

    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }
}

/// Create a customer, optionally attaching a tokenized card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CustomerRequest {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    /// Token id of the card to attach
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub card: Option<String>,
}

impl CustomerRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_card(mut self, token: impl Into<String>) -> Self {
        self.card = Some(token.into());
        self
    }
}

/// Retrieve the account capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CapabilityRequest;

/// Every request the client can execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Token(TokenRequest),
    TokenLookup(TokenLookup),
    Source(SourceRequest),
    Charge(ChargeRequest),
    Customer(CustomerRequest),
    Capability(CapabilityRequest),
}

impl Request {
    pub fn kind(&self) -> RequestKind {
        match self {
            Request::Token(_) => RequestKind::CreateToken,
            Request::TokenLookup(_) => RequestKind::RetrieveToken,
            Request::Source(_) => RequestKind::CreateSource,
            Request::Charge(_) => RequestKind::CreateCharge,
            Request::Customer(_) => RequestKind::CreateCustomer,
            Request::Capability(_) => RequestKind::RetrieveCapability,
        }
    }
}

macro_rules! api_request {
    ($($ty:ty => $variant:ident, $kind:ident, $output:ty;)*) => {
        $(
            impl From<$ty> for Request {
                fn from(request: $ty) -> Self {
                    Request::$variant(request)
                }
            }

            impl ApiRequest for $ty {
                type Output = $output;

                const KIND: RequestKind = RequestKind::$kind;
            }
        )*
    };
}

api_request! {
    TokenRequest => Token, CreateToken, Token;
    TokenLookup => TokenLookup, RetrieveToken, Token;
    SourceRequest => Source, CreateSource, Source;
    ChargeRequest => Charge, CreateCharge, Charge;
    CustomerRequest => Customer, CreateCustomer, Customer;
    CapabilityRequest => Capability, RetrieveCapability, Capability;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_routing() {
        assert_eq!(RequestKind::CreateToken.server(), Server::Vault);
        assert_eq!(RequestKind::RetrieveToken.method(), http::Method::GET);
        assert_eq!(RequestKind::CreateSource.credential(), Credential::Public);
        assert_eq!(RequestKind::CreateCharge.credential(), Credential::Secret);
        assert_eq!(RequestKind::CreateCustomer.server(), Server::Api);
        assert_eq!(RequestKind::RetrieveCapability.output(), ObjectKind::Capability);
    }

    #[test]
    fn test_request_kind_matches_api_request() {
        let request: Request = SourceRequest::new(SourceType::PROMPTPAY, 100, Currency::THB).into();
        assert_eq!(request.kind(), SourceRequest::KIND);
        let request: Request = CapabilityRequest.into();
        assert_eq!(request.kind(), CapabilityRequest::KIND);
    }

    #[test]
    fn test_card_debug_is_masked() {
        let card = CardParams::new("Jane Doe", "4242424242424242", 12, 2030).with_security_code("123");
        let debug = format!("{:?}", TokenRequest::new(card));
        assert!(debug.contains("424242XXXXXX4242"));
        assert!(!debug.contains("4242424242424242"));
        assert!(!debug.contains("123"));
    }

    #[test]
    fn test_source_body_skips_unset_fields() {
        let request = SourceRequest::new("internet_banking_bay", 10000, "THB");
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"type": "internet_banking_bay", "amount": 10000, "currency": "THB"})
        );
    }

    #[test]
    fn test_token_body_omits_public_key() {
        let request = TokenRequest::new(CardParams::new("Jane Doe", "4242424242424242", 12, 2030))
            .with_public_key("pkey_test_123");
        let body = serde_json::to_string(&request).unwrap();
        assert!(!body.contains("pkey_test_123"));
        assert!(body.starts_with("{\"card\":{"));
    }
}
