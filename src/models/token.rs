//! Card tokens

use super::Card;
use crate::codec::{Decode, DecodeResult, JsonObject};
use crate::types::ChargeStatus;
use chrono::{DateTime, Utc};

/// A single-use card token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub id: String,
    pub livemode: bool,
    pub location: Option<String>,
    pub used: bool,
    pub card: Card,
    /// Status of the charge made with this token, reported by token lookups
    pub charge_status: ChargeStatus,
    pub created_at: Option<DateTime<Utc>>,
}

impl Decode for Token {
    fn decode(object: &JsonObject<'_>) -> DecodeResult<Self> {
        Ok(Token {
            id: object.required_id("id")?,
            livemode: object.optional_bool("livemode")?,
            location: object.optional_str("location")?,
            used: object.optional_bool("used")?,
            card: object.decode("card")?,
            charge_status: object
                .optional_str("charge_status")?
                .as_deref()
                .map(ChargeStatus::from)
                .unwrap_or_default(),
            created_at: object.created_at()?,
        })
    }
}
