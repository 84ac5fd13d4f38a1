//! Customers and their stored cards

use super::{Card, List};
use crate::codec::{Decode, DecodeResult, JsonObject};
use chrono::{DateTime, Utc};

/// A customer with the cards stored against it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: String,
    pub livemode: bool,
    pub location: Option<String>,
    pub default_card: Option<String>,
    pub email: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub cards: List<Card>,
}

impl Decode for Customer {
    fn decode(object: &JsonObject<'_>) -> DecodeResult<Self> {
        Ok(Customer {
            id: object.required_id("id")?,
            livemode: object.optional_bool("livemode")?,
            location: object.optional_str("location")?,
            default_card: object.optional_str("default_card")?,
            email: object.optional_str("email")?,
            description: object.optional_str("description")?,
            created_at: object.created_at()?,
            cards: object.decode_optional("cards")?.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;
    use serde_json::json;

    #[test]
    fn test_customer_cards() {
        let body = json!({
            "id": "cust_test_1",
            "email": "jane@example.com",
            "default_card": "card_test_1",
            "cards": {
                "object": "list",
                "offset": 0,
                "limit": 20,
                "total": 1,
                "data": [{"id": "card_test_1", "last_digits": "4242", "brand": "Visa"}]
            }
        });
        let customer: Customer = decode(body.to_string().as_bytes()).unwrap();
        assert_eq!(customer.cards.len(), 1);
        assert_eq!(customer.cards.data[0].id.as_deref(), Some("card_test_1"));
    }

    #[test]
    fn test_customer_without_cards() {
        let body = json!({"id": "cust_test_2"});
        let customer: Customer = decode(body.to_string().as_bytes()).unwrap();
        assert!(customer.cards.is_empty());
    }

    #[test]
    fn test_nested_card_failure_path() {
        let body = json!({
            "id": "cust_test_3",
            "cards": {
                "data": [
                    {"last_digits": "4242", "brand": "Visa"},
                    {"last_digits": "1111"}
                ]
            }
        });
        let failure = decode::<Customer>(body.to_string().as_bytes()).unwrap_err();
        assert_eq!(failure.field, "cards.data[1].brand");
    }
}
