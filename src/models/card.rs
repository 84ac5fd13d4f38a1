//! Card details attached to tokens, charges and customers

use crate::codec::{Decode, DecodeResult, JsonObject};
use crate::error::ParsingFailure;
use crate::pan::{CardBrand, Pan};
use chrono::{DateTime, Utc};

/// A tokenized card as returned by the service.
///
/// `number`, when present, is always masked. `brand` and `last_digits` are
/// either both present or both absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Card {
    pub id: Option<String>,
    pub livemode: bool,
    pub location: Option<String>,
    pub country: Option<String>,
    pub number: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub financing: Option<String>,
    pub last_digits: Option<String>,
    pub brand: Option<String>,
    pub bank: Option<String>,
    pub expiration_month: Option<u32>,
    pub expiration_year: Option<u32>,
    pub fingerprint: Option<String>,
    pub name: Option<String>,
    pub security_code_check: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl Card {
    /// The brand as a known card network, if recognized
    pub fn card_brand(&self) -> Option<CardBrand> {
        self.brand.as_deref().and_then(CardBrand::from_name)
    }
}

fn masked_number(raw: String) -> String {
    let unmasked = raw
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '-');
    if unmasked {
        Pan::new(&raw).masked()
    } else {
        raw
    }
}

impl Decode for Card {
    fn decode(object: &JsonObject<'_>) -> DecodeResult<Self> {
        let last_digits = object.optional_str("last_digits")?;
        let brand = object.optional_str("brand")?;
        match (&brand, &last_digits) {
            (Some(_), None) => return Err(ParsingFailure::missing(object.field_path("last_digits"))),
            (None, Some(_)) => return Err(ParsingFailure::missing(object.field_path("brand"))),
            _ => {}
        }

        Ok(Card {
            id: object.optional_str("id")?,
            livemode: object.optional_bool("livemode")?,
            location: object.optional_str("location")?,
            country: object.optional_str("country")?,
            number: object.optional_str("number")?.map(masked_number),
            city: object.optional_str("city")?,
            postal_code: object.optional_str("postal_code")?,
            financing: object.optional_str("financing")?,
            last_digits,
            brand,
            bank: object.optional_str("bank")?,
            expiration_month: object.optional_u32("expiration_month")?,
            expiration_year: object.optional_u32("expiration_year")?,
            fingerprint: object.optional_str("fingerprint")?,
            name: object.optional_str("name")?,
            security_code_check: object.optional_bool("security_code_check")?,
            created_at: object.created_at()?,
        })
    }
}
