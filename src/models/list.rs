//! Paginated collections

use crate::codec::{Decode, DecodeResult, JsonObject};
use crate::error::ParsingFailure;
use chrono::{DateTime, Utc};

/// A page of a paginated collection.
///
/// Decoding guarantees `data.len() <= limit` and `total >= data.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List<T> {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub offset: u64,
    pub limit: u64,
    pub total: u64,
    pub location: Option<String>,
    pub data: Vec<T>,
}

impl<T> List<T> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self {
            from: None,
            to: None,
            offset: 0,
            limit: 0,
            total: 0,
            location: None,
            data: Vec::new(),
        }
    }
}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

impl<T: Decode> Decode for List<T> {
    fn decode(object: &JsonObject<'_>) -> DecodeResult<Self> {
        let data: Vec<T> = object.decode_list("data")?;
        let count = data.len() as u64;
        let limit = object.optional_u64("limit")?.unwrap_or(count);
        let total = object.optional_u64("total")?.unwrap_or(count);

        if count > limit {
            return Err(ParsingFailure::new(
                object.field_path("limit"),
                format!("{} items exceed the limit of {}", count, limit),
            ));
        }
        if total < count {
            return Err(ParsingFailure::new(
                object.field_path("total"),
                format!("total {} is less than the {} items returned", total, count),
            ));
        }

        Ok(List {
            from: object.optional_datetime("from")?,
            to: object.optional_datetime("to")?,
            offset: object.optional_u64("offset")?.unwrap_or(0),
            limit,
            total,
            location: object.optional_str("location")?,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;
    use crate::models::Card;
    use serde_json::json;

    #[test]
    fn test_list_defaults() {
        let body = json!({"data": [{"id": "card_1"}, {"id": "card_2"}]});
        let list: List<Card> = decode(body.to_string().as_bytes()).unwrap();
        assert_eq!(list.offset, 0);
        assert_eq!(list.limit, 2);
        assert_eq!(list.total, 2);
    }

    #[test]
    fn test_list_cursors() {
        let body = json!({
            "from": "1970-01-01T00:00:00Z",
            "to": "2019-05-29T10:00:00Z",
            "offset": 20,
            "limit": 20,
            "total": 21,
            "location": "/customers/cust_test_1/cards",
            "data": [{"id": "card_21"}]
        });
        let list: List<Card> = decode(body.to_string().as_bytes()).unwrap();
        assert_eq!(list.offset, 20);
        assert!(list.from.is_some() && list.to.is_some());
    }

    #[test]
    fn test_list_invariants() {
        let body = json!({"limit": 1, "data": [{"id": "a"}, {"id": "b"}]});
        assert_eq!(decode::<List<Card>>(body.to_string().as_bytes()).unwrap_err().field, "limit");

        let body = json!({"total": 1, "data": [{"id": "a"}, {"id": "b"}]});
        assert_eq!(decode::<List<Card>>(body.to_string().as_bytes()).unwrap_err().field, "total");
    }

    #[test]
    fn test_list_requires_data() {
        let body = json!({"total": 0});
        assert_eq!(decode::<List<Card>>(body.to_string().as_bytes()).unwrap_err().field, "data");
    }
}
