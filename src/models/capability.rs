//! Account capability

use crate::codec::{Decode, DecodeResult, JsonObject};
use crate::types::{Currency, SourceType};

/// Payment methods and banks enabled for an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capability {
    pub country: Option<String>,
    pub location: Option<String>,
    pub banks: Vec<String>,
    pub payment_methods: Vec<CapabilityMethod>,
}

/// One payment method enabled for an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityMethod {
    /// Source type identifier, or `card` for card payments
    pub name: String,
    pub currencies: Vec<Currency>,
    pub card_brands: Vec<String>,
    pub installment_terms: Vec<u32>,
    pub banks: Vec<String>,
}

impl Capability {
    /// The capability entry for a method name
    pub fn method(&self, name: &str) -> Option<&CapabilityMethod> {
        self.payment_methods.iter().find(|m| m.name == name)
    }

    /// Whether the account can create sources of this type
    pub fn supports(&self, source_type: &SourceType) -> bool {
        self.method(source_type.as_str()).is_some()
    }

    /// Source types enabled for the account, in the order the service reports them
    pub fn source_types(&self) -> impl Iterator<Item = SourceType> + '_ {
        self.payment_methods
            .iter()
            .filter(|m| m.name != "card")
            .map(|m| SourceType::new(&m.name))
    }
}

impl CapabilityMethod {
    pub fn supports_currency(&self, currency: &Currency) -> bool {
        self.currencies.contains(currency)
    }
}

impl Decode for CapabilityMethod {
    fn decode(object: &JsonObject<'_>) -> DecodeResult<Self> {
        Ok(CapabilityMethod {
            name: object.required_id("name")?,
            currencies: object
                .optional_str_list("currencies")?
                .into_iter()
                .map(Currency::new)
                .collect(),
            card_brands: object.optional_str_list("card_brands")?,
            installment_terms: object.optional_u32_list("installment_terms")?,
            banks: object.optional_str_list("banks")?,
        })
    }
}

impl Decode for Capability {
    fn decode(object: &JsonObject<'_>) -> DecodeResult<Self> {
        let payment_methods = if object.contains("payment_methods") {
            object.decode_list("payment_methods")?
        } else {
            Vec::new()
        };
        Ok(Capability {
            country: object.optional_str("country")?,
            location: object.optional_str("location")?,
            banks: object.optional_str_list("banks")?,
            payment_methods,
        })
    }
}
