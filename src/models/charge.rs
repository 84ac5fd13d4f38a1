//! Charges

use super::Card;
use crate::codec::{Decode, DecodeResult, JsonObject};
use crate::types::Currency;
use chrono::{DateTime, Utc};

/// A charge against a token, source or stored card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charge {
    pub id: String,
    pub livemode: bool,
    pub location: Option<String>,
    /// Amount in the currency's minor unit
    pub amount: i64,
    pub currency: Currency,
    pub description: Option<String>,
    pub status: Option<String>,
    pub capture: bool,
    pub authorized: bool,
    pub paid: bool,
    pub transaction: Option<String>,
    pub return_uri: Option<String>,
    pub authorize_uri: Option<String>,
    pub reference: Option<String>,
    /// Absent for source-based charges
    pub card: Option<Card>,
    pub customer: Option<String>,
    pub ip: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Decode for Charge {
    fn decode(object: &JsonObject<'_>) -> DecodeResult<Self> {
        Ok(Charge {
            id: object.required_id("id")?,
            livemode: object.optional_bool("livemode")?,
            location: object.optional_str("location")?,
            amount: object.required_amount("amount")?,
            currency: Currency::new(object.required_str("currency")?),
            description: object.optional_str("description")?,
            status: object.optional_str("status")?,
            capture: object.optional_bool("capture")?,
            authorized: object.optional_bool("authorized")?,
            paid: object.optional_bool("paid")?,
            transaction: object.optional_str("transaction")?,
            return_uri: object.optional_str("return_uri")?,
            authorize_uri: object.optional_str("authorize_uri")?,
            reference: object.optional_str("reference")?,
            card: object.decode_optional("card")?,
            customer: object.optional_str("customer")?,
            ip: object.optional_str("ip")?,
            created_at: object.created_at()?,
        })
    }
}
