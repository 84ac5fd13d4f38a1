//! JSON codec for API objects
//!
//! Responses are decoded by hand over a [`serde_json::Value`] tree so that a
//! failure can name the exact field path (`card.brand`, `cards.data[1].id`)
//! and so that required and optional fields follow one set of rules:
//!
//! - a required field that is absent or `null` fails with that field's path
//! - an optional field that is absent or `null` decodes to `None`, `false`, `0` or empty
//! - unknown keys are ignored
//!
//! Requests are encoded with serde; unset options are skipped by the request types.

use crate::error::ParsingFailure;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Result of decoding a response
pub type DecodeResult<T> = std::result::Result<T, ParsingFailure>;

/// A type that can be decoded from a JSON object
pub trait Decode: Sized {
    fn decode(object: &JsonObject<'_>) -> DecodeResult<Self>;
}

/// Decode a response body into `T`
pub fn decode<T: Decode>(bytes: &[u8]) -> DecodeResult<T> {
    decode_with(bytes, T::decode)
}

/// Decode a response body with an explicit decoder function
pub fn decode_with<T>(
    bytes: &[u8],
    decoder: impl FnOnce(&JsonObject<'_>) -> DecodeResult<T>,
) -> DecodeResult<T> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| ParsingFailure::root(format!("invalid JSON: {}", e)))?;
    let object = JsonObject::root(&value)?;
    decoder(&object)
}

/// Encode a request body
pub fn encode<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(value)
}

/// A JSON object together with its path from the top-level body
#[derive(Debug, Clone)]
pub struct JsonObject<'a> {
    path: String,
    map: &'a Map<String, Value>,
}

impl<'a> JsonObject<'a> {
    /// The top-level body. Anything other than an object fails at `$`.
    pub fn root(value: &'a Value) -> DecodeResult<Self> {
        match value {
            Value::Object(map) => Ok(Self {
                path: String::new(),
                map,
            }),
            _ => Err(ParsingFailure::root("expected a JSON object")),
        }
    }

    fn nested(path: String, value: &'a Value) -> DecodeResult<Self> {
        match value {
            Value::Object(map) => Ok(Self { path, map }),
            _ => Err(ParsingFailure::new(path, "expected an object")),
        }
    }

    /// Path of this object, `$` for the body itself
    pub fn path(&self) -> &str {
        if self.path.is_empty() {
            ParsingFailure::ROOT
        } else {
            &self.path
        }
    }

    /// Full path of a field of this object
    pub fn field_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    /// Value of a field, treating `null` as absent
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        match self.map.get(key) {
            Some(Value::Null) | None => None,
            Some(value) => Some(value),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn require(&self, key: &str) -> DecodeResult<&'a Value> {
        self.get(key).ok_or_else(|| ParsingFailure::missing(self.field_path(key)))
    }

    fn mismatch(&self, key: &str, expected: &str) -> ParsingFailure {
        ParsingFailure::new(self.field_path(key), format!("expected {}", expected))
    }

    pub fn required_str(&self, key: &str) -> DecodeResult<String> {
        match self.require(key)? {
            Value::String(s) => Ok(s.clone()),
            _ => Err(self.mismatch(key, "a string")),
        }
    }

    /// A required identifier. Empty strings fail like absent ones.
    pub fn required_id(&self, key: &str) -> DecodeResult<String> {
        let id = self.required_str(key)?;
        if id.is_empty() {
            return Err(ParsingFailure::new(self.field_path(key), "identifier is empty"));
        }
        Ok(id)
    }

    pub fn optional_str(&self, key: &str) -> DecodeResult<Option<String>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.mismatch(key, "a string")),
        }
    }

    pub fn optional_bool(&self, key: &str) -> DecodeResult<bool> {
        match self.get(key) {
            None => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(_) => Err(self.mismatch(key, "a boolean")),
        }
    }

    /// A required amount in minor units: a non-negative JSON integer
    pub fn required_amount(&self, key: &str) -> DecodeResult<i64> {
        let value = self.require(key)?;
        match value.as_i64() {
            Some(amount) if amount >= 0 => Ok(amount),
            Some(_) => Err(ParsingFailure::new(self.field_path(key), "amount is negative")),
            None => Err(self.mismatch(key, "an integer amount")),
        }
    }

    pub fn optional_u64(&self, key: &str) -> DecodeResult<Option<u64>> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_u64()
                .map(Some)
                .ok_or_else(|| self.mismatch(key, "a non-negative integer")),
        }
    }

    pub fn optional_u32(&self, key: &str) -> DecodeResult<Option<u32>> {
        match self.optional_u64(key)? {
            None => Ok(None),
            Some(n) => u32::try_from(n)
                .map(Some)
                .map_err(|_| ParsingFailure::new(self.field_path(key), "integer out of range")),
        }
    }

    /// An RFC 3339 timestamp
    pub fn optional_datetime(&self, key: &str) -> DecodeResult<Option<DateTime<Utc>>> {
        match self.optional_str(key)? {
            None => Ok(None),
            Some(raw) => DateTime::parse_from_rfc3339(&raw)
                .map(|dt| Some(dt.with_timezone(&Utc)))
                .map_err(|e| ParsingFailure::new(self.field_path(key), format!("invalid timestamp: {}", e))),
        }
    }

    /// Creation timestamp from `created_at`, falling back to the legacy `created` key
    pub fn created_at(&self) -> DecodeResult<Option<DateTime<Utc>>> {
        if self.contains("created_at") {
            self.optional_datetime("created_at")
        } else {
            self.optional_datetime("created")
        }
    }

    pub fn required_object(&self, key: &str) -> DecodeResult<JsonObject<'a>> {
        let value = self.require(key)?;
        Self::nested(self.field_path(key), value)
    }

    pub fn optional_object(&self, key: &str) -> DecodeResult<Option<JsonObject<'a>>> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => Self::nested(self.field_path(key), value).map(Some),
        }
    }

    /// Decode a required nested object
    pub fn decode<T: Decode>(&self, key: &str) -> DecodeResult<T> {
        T::decode(&self.required_object(key)?)
    }

    /// Decode an optional nested object
    pub fn decode_optional<T: Decode>(&self, key: &str) -> DecodeResult<Option<T>> {
        match self.optional_object(key)? {
            None => Ok(None),
            Some(object) => T::decode(&object).map(Some),
        }
    }

    fn array(&self, key: &str) -> DecodeResult<Option<&'a Vec<Value>>> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items)),
            Some(_) => Err(self.mismatch(key, "an array")),
        }
    }

    /// Decode a required array of objects. Element paths read `key[i]`.
    pub fn decode_list<T: Decode>(&self, key: &str) -> DecodeResult<Vec<T>> {
        let items = self
            .array(key)?
            .ok_or_else(|| ParsingFailure::missing(self.field_path(key)))?;
        let base = self.field_path(key);
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let object = Self::nested(format!("{}[{}]", base, i), item)?;
                T::decode(&object)
            })
            .collect()
    }

    /// An optional array of strings, empty when absent
    pub fn optional_str_list(&self, key: &str) -> DecodeResult<Vec<String>> {
        let Some(items) = self.array(key)? else {
            return Ok(Vec::new());
        };
        let base = self.field_path(key);
        items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) => Ok(s.clone()),
                _ => Err(ParsingFailure::new(format!("{}[{}]", base, i), "expected a string")),
            })
            .collect()
    }

    /// An optional array of non-negative integers, empty when absent
    pub fn optional_u32_list(&self, key: &str) -> DecodeResult<Vec<u32>> {
        let Some(items) = self.array(key)? else {
            return Ok(Vec::new());
        };
        let base = self.field_path(key);
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_u64()
                    .and_then(|n| u32::try_from(n).ok())
                    .ok_or_else(|| ParsingFailure::new(format!("{}[{}]", base, i), "expected an integer"))
            })
            .collect()
    }
}
