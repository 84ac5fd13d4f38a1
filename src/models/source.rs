//! Payment sources
//!
//! A source carries the payer's choice of a non-card method and the
//! method-specific details the service needs to start the payment flow.

use crate::codec::{Decode, DecodeResult, JsonObject};
use crate::types::{Currency, Flow, SourceType};
use chrono::{DateTime, Utc};

/// A non-card payment source (bank, wallet, QR, installment plan)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub id: String,
    pub livemode: bool,
    pub location: Option<String>,
    pub source_type: SourceType,
    pub amount: i64,
    pub currency: Currency,
    pub flow: Option<Flow>,
    pub bank: Option<String>,
    pub installment_term: Option<u32>,
    pub zero_interest_installments: bool,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub store_id: Option<String>,
    pub store_name: Option<String>,
    pub terminal_id: Option<String>,
    pub platform_type: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Decode for Source {
    fn decode(object: &JsonObject<'_>) -> DecodeResult<Self> {
        Ok(Source {
            id: object.required_id("id")?,
            livemode: object.optional_bool("livemode")?,
            location: object.optional_str("location")?,
            source_type: SourceType::new(object.required_str("type")?),
            amount: object.required_amount("amount")?,
            currency: Currency::new(object.required_str("currency")?),
            flow: object.optional_str("flow")?.as_deref().map(Flow::from),
            bank: object.optional_str("bank")?,
            installment_term: object.optional_u32("installment_term")?,
            zero_interest_installments: object.optional_bool("zero_interest_installments")?,
            phone_number: object.optional_str("phone_number")?,
            email: object.optional_str("email")?,
            name: object.optional_str("name")?,
            store_id: object.optional_str("store_id")?,
            store_name: object.optional_str("store_name")?,
            terminal_id: object.optional_str("terminal_id")?,
            platform_type: object.optional_str("platform_type")?,
            created_at: object.created_at()?,
        })
    }
}
