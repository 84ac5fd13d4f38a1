//! Domain objects returned by the service
//!
//! Every response type implements [`Decode`]. [`ObjectKind`] names the closed
//! set of result types and [`decode_object`] dispatches a body to the decoder
//! for a kind.

mod capability;
mod card;
mod charge;
mod customer;
mod list;
mod source;
mod token;

pub use capability::{Capability, CapabilityMethod};
pub use card::Card;
pub use charge::Charge;
pub use customer::Customer;
pub use list::List;
pub use source::Source;
pub use token::Token;

use crate::codec::{self, Decode, DecodeResult, JsonObject};

/// The kind of object a request produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Token,
    Source,
    Charge,
    Customer,
    Capability,
}

impl ObjectKind {
    /// The `object` tag the service puts on this kind
    pub fn tag(self) -> &'static str {
        match self {
            ObjectKind::Token => "token",
            ObjectKind::Source => "source",
            ObjectKind::Charge => "charge",
            ObjectKind::Customer => "customer",
            ObjectKind::Capability => "capability",
        }
    }
}

/// Any decoded result object
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiObject {
    Token(Token),
    Source(Source),
    Charge(Charge),
    Customer(Customer),
    Capability(Capability),
}

impl ApiObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            ApiObject::Token(_) => ObjectKind::Token,
            ApiObject::Source(_) => ObjectKind::Source,
            ApiObject::Charge(_) => ObjectKind::Charge,
            ApiObject::Customer(_) => ObjectKind::Customer,
            ApiObject::Capability(_) => ObjectKind::Capability,
        }
    }
}

macro_rules! api_object_from {
    ($($variant:ident),*) => {
        $(impl From<$variant> for ApiObject {
            fn from(value: $variant) -> Self {
                ApiObject::$variant(value)
            }
        })*
    };
}

api_object_from!(Token, Source, Charge, Customer, Capability);

type Decoder = fn(&JsonObject<'_>) -> DecodeResult<ApiObject>;

fn decode_as<T: Decode + Into<ApiObject>>(object: &JsonObject<'_>) -> DecodeResult<ApiObject> {
    T::decode(object).map(Into::into)
}

fn decoder(kind: ObjectKind) -> Decoder {
    match kind {
        ObjectKind::Token => decode_as::<Token>,
        ObjectKind::Source => decode_as::<Source>,
        ObjectKind::Charge => decode_as::<Charge>,
        ObjectKind::Customer => decode_as::<Customer>,
        ObjectKind::Capability => decode_as::<Capability>,
    }
}

/// Decode a response body as the object kind a request expects
pub fn decode_object(kind: ObjectKind, bytes: &[u8]) -> DecodeResult<ApiObject> {
    codec::decode_with(bytes, decoder(kind))
}
