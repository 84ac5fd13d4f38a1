//! Shared fixtures for integration tests
#![allow(dead_code)]

use omise::{CardParams, Client, ClientConfig, TokenRequest};
use serde_json::{json, Value};
use std::time::Duration;

pub const PUBLIC_KEY: &str = "pkey_test_123";
pub const SECRET_KEY: &str = "skey_test_456";

/// `Basic base64("pkey_test_123:")`
pub const PUBLIC_AUTH: &str = "Basic cGtleV90ZXN0XzEyMzo=";

/// Route client log events to the test output
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn config(base_url: &str) -> ClientConfig {
    ClientConfig::new(PUBLIC_KEY)
        .with_secret_key(SECRET_KEY)
        .with_base_url(base_url)
        .unwrap()
        .with_timeout(Duration::from_secs(5))
}

pub fn client(base_url: &str) -> Client {
    Client::new(config(base_url)).unwrap()
}

pub fn token_request() -> TokenRequest {
    TokenRequest::new(CardParams::new("Jane Doe", "4242424242424242", 12, 2030))
        .with_public_key(PUBLIC_KEY)
}

pub fn token_json() -> Value {
    json!({
        "object": "token",
        "id": "tokn_test_1",
        "livemode": false,
        "location": "https://vault.omise.co/tokens/tokn_test_1",
        "used": false,
        "card": card_json(),
        "created_at": "2019-05-29T10:00:00Z"
    })
}

pub fn card_json() -> Value {
    json!({
        "object": "card",
        "id": "card_test_1",
        "livemode": false,
        "country": "us",
        "city": "Bangkok",
        "postal_code": "10320",
        "financing": "credit",
        "bank": "JPMORGAN CHASE BANK, N.A.",
        "last_digits": "4242",
        "brand": "Visa",
        "expiration_month": 12,
        "expiration_year": 2030,
        "fingerprint": "mKleiBfwp+PoJWB/ipngANuECUmRKjyxROwFW5IO7TM=",
        "name": "Jane Doe",
        "security_code_check": true,
        "created_at": "2019-05-29T10:00:00Z"
    })
}

pub fn source_json() -> Value {
    json!({
        "object": "source",
        "id": "src_test_1",
        "livemode": false,
        "location": "/sources/src_test_1",
        "type": "internet_banking_bay",
        "flow": "redirect",
        "amount": 10000,
        "currency": "THB",
        "created_at": "2019-05-29T10:00:00Z"
    })
}

pub fn charge_json() -> Value {
    json!({
        "object": "charge",
        "id": "chrg_test_1",
        "livemode": false,
        "location": "/charges/chrg_test_1",
        "amount": 100000,
        "currency": "thb",
        "description": "Order #1",
        "status": "successful",
        "capture": true,
        "authorized": true,
        "paid": true,
        "transaction": "trxn_test_1",
        "return_uri": "https://example.com/orders/1/complete",
        "reference": "ref_test_1",
        "card": card_json(),
        "customer": null,
        "ip": "127.0.0.1",
        "created_at": "2019-05-29T10:00:00Z"
    })
}

pub fn customer_json() -> Value {
    json!({
        "object": "customer",
        "id": "cust_test_1",
        "livemode": false,
        "location": "/customers/cust_test_1",
        "default_card": "card_test_1",
        "email": "jane@example.com",
        "description": "Jane Doe",
        "created_at": "2019-05-29T10:00:00Z",
        "cards": {
            "object": "list",
            "from": "1970-01-01T00:00:00Z",
            "to": "2019-05-29T10:00:00Z",
            "offset": 0,
            "limit": 20,
            "total": 1,
            "location": "/customers/cust_test_1/cards",
            "data": [card_json()]
        }
    })
}

pub fn capability_json() -> Value {
    json!({
        "object": "capability",
        "location": "/capability",
        "country": "TH",
        "banks": ["bay", "bbl", "kbank"],
        "payment_methods": [
            {
                "object": "payment_method",
                "name": "card",
                "currencies": ["THB", "JPY", "USD"],
                "card_brands": ["JCB", "Visa", "MasterCard"]
            },
            {
                "object": "payment_method",
                "name": "internet_banking_bay",
                "currencies": ["THB"]
            },
            {
                "object": "payment_method",
                "name": "installment_kbank",
                "currencies": ["THB"],
                "installment_terms": [3, 4, 6, 10]
            }
        ]
    })
}

/// A body that can never be read as JSON
pub const UNDECODABLE_BODY: &str = "<html>not json</html>";

/// A local address nothing listens on
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}
