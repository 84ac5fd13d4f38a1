//! Open string vocabularies shared by requests and responses
//!
//! Currencies and source types are extensible on the server side, so they are
//! modelled as string newtypes with constants for the known values instead of
//! closed enums. Unrecognized values are carried through unchanged.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Subunit factor for cent-based currencies
pub const CENT_BASED_CURRENCY_FACTOR: u32 = 100;

/// Subunit factor for currencies without a minor unit
pub const IDENTICAL_BASED_CURRENCY_FACTOR: u32 = 1;

/// ISO 4217 currency code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Currency(Cow<'static, str>);

impl Currency {
    pub const AUD: Currency = Currency(Cow::Borrowed("AUD"));
    pub const CAD: Currency = Currency(Cow::Borrowed("CAD"));
    pub const CHF: Currency = Currency(Cow::Borrowed("CHF"));
    pub const CNY: Currency = Currency(Cow::Borrowed("CNY"));
    pub const DKK: Currency = Currency(Cow::Borrowed("DKK"));
    pub const EUR: Currency = Currency(Cow::Borrowed("EUR"));
    pub const GBP: Currency = Currency(Cow::Borrowed("GBP"));
    pub const HKD: Currency = Currency(Cow::Borrowed("HKD"));
    pub const IDR: Currency = Currency(Cow::Borrowed("IDR"));
    pub const JPY: Currency = Currency(Cow::Borrowed("JPY"));
    pub const MYR: Currency = Currency(Cow::Borrowed("MYR"));
    pub const SGD: Currency = Currency(Cow::Borrowed("SGD"));
    pub const THB: Currency = Currency(Cow::Borrowed("THB"));
    pub const USD: Currency = Currency(Cow::Borrowed("USD"));

    /// Every currency code this SDK knows about
    pub const KNOWN: [Currency; 14] = [
        Self::AUD,
        Self::CAD,
        Self::CHF,
        Self::CNY,
        Self::DKK,
        Self::EUR,
        Self::GBP,
        Self::HKD,
        Self::IDR,
        Self::JPY,
        Self::MYR,
        Self::SGD,
        Self::THB,
        Self::USD,
    ];

    /// Create a currency from a code. Codes are normalized to upper case.
    pub fn new(code: impl AsRef<str>) -> Self {
        let code = code.as_ref().trim().to_ascii_uppercase();
        match Self::KNOWN.iter().find(|known| known.code() == code) {
            Some(known) => known.clone(),
            None => Currency(Cow::Owned(code)),
        }
    }

    /// The ISO 4217 code
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Whether this is one of the known currencies
    pub fn is_known(&self) -> bool {
        Self::KNOWN.contains(self)
    }

    /// How many subunits make one unit (100 satang per baht, 1 yen per yen)
    pub fn factor(&self) -> u32 {
        if *self == Self::JPY {
            IDENTICAL_BASED_CURRENCY_FACTOR
        } else {
            CENT_BASED_CURRENCY_FACTOR
        }
    }

    /// Convert an amount in subunits to units
    pub fn from_subunit(&self, amount: i64) -> Decimal {
        Decimal::from(amount) / Decimal::from(self.factor())
    }

    /// Convert an amount in units to subunits, truncating extra precision
    pub fn to_subunit(&self, amount: Decimal) -> Option<i64> {
        use rust_decimal::prelude::ToPrimitive;
        (amount * Decimal::from(self.factor())).trunc().to_i64()
    }
}

impl From<String> for Currency {
    fn from(code: String) -> Self {
        Currency::new(code)
    }
}

impl From<&str> for Currency {
    fn from(code: &str) -> Self {
        Currency::new(code)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.0.into_owned()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Payment source type identifier (e.g. `internet_banking_bay`, `promptpay`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SourceType(Cow<'static, str>);

macro_rules! source_types {
    ($($name:ident => $value:literal,)*) => {
        impl SourceType {
            $(pub const $name: SourceType = SourceType(Cow::Borrowed($value));)*

            /// Every source type this SDK knows about
            pub const KNOWN: &'static [SourceType] = &[$(Self::$name,)*];
        }
    };
}

source_types! {
    ALIPAY => "alipay",
    ALIPAY_CN => "alipay_cn",
    ALIPAY_HK => "alipay_hk",
    ATOME => "atome",
    BARCODE_ALIPAY => "barcode_alipay",
    BILL_PAYMENT_TESCO_LOTUS => "bill_payment_tesco_lotus",
    BOOST => "boost",
    DANA => "dana",
    DUITNOW_OBW => "duitnow_obw",
    DUITNOW_QR => "duitnow_qr",
    ECONTEXT => "econtext",
    FPX => "fpx",
    GCASH => "gcash",
    GRABPAY => "grabpay",
    GRABPAY_RMS => "grabpay_rms",
    INSTALLMENT_BAY => "installment_bay",
    INSTALLMENT_BBL => "installment_bbl",
    INSTALLMENT_FIRST_CHOICE => "installment_first_choice",
    INSTALLMENT_KBANK => "installment_kbank",
    INSTALLMENT_KTC => "installment_ktc",
    INSTALLMENT_MBB => "installment_mbb",
    INSTALLMENT_SCB => "installment_scb",
    INSTALLMENT_TTB => "installment_ttb",
    INSTALLMENT_UOB => "installment_uob",
    INTERNET_BANKING_BAY => "internet_banking_bay",
    INTERNET_BANKING_BBL => "internet_banking_bbl",
    KAKAOPAY => "kakaopay",
    MAYBANK_QR => "maybank_qr",
    MOBILE_BANKING_BAY => "mobile_banking_bay",
    MOBILE_BANKING_BBL => "mobile_banking_bbl",
    MOBILE_BANKING_KBANK => "mobile_banking_kbank",
    MOBILE_BANKING_KTB => "mobile_banking_ktb",
    MOBILE_BANKING_OCBC => "mobile_banking_ocbc",
    MOBILE_BANKING_SCB => "mobile_banking_scb",
    PAYNOW => "paynow",
    PAYPAY => "paypay",
    POINTS_CITI => "points_citi",
    PROMPTPAY => "promptpay",
    RABBIT_LINEPAY => "rabbit_linepay",
    SHOPEEPAY => "shopeepay",
    SHOPEEPAY_JUMPAPP => "shopeepay_jumpapp",
    TOUCH_N_GO => "touch_n_go",
    TOUCH_N_GO_ALIPAY_PLUS => "touch_n_go_alipay_plus",
    TRUEMONEY => "truemoney",
    TRUEMONEY_JUMPAPP => "truemoney_jumpapp",
    WECHAT_PAY => "wechat_pay",
}

impl SourceType {
    /// Create a source type from its identifier. Unknown identifiers are kept as-is.
    pub fn new(value: impl AsRef<str>) -> Self {
        let value = value.as_ref();
        match Self::KNOWN.iter().find(|known| known.as_str() == value) {
            Some(known) => known.clone(),
            None => SourceType(Cow::Owned(value.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is one of the known source types
    pub fn is_known(&self) -> bool {
        Self::KNOWN.contains(self)
    }

    /// Whether this source type is an installment plan
    pub fn is_installment(&self) -> bool {
        self.as_str().starts_with("installment_")
    }
}

impl From<String> for SourceType {
    fn from(value: String) -> Self {
        SourceType::new(value)
    }
}

impl From<&str> for SourceType {
    fn from(value: &str) -> Self {
        SourceType::new(value)
    }
}

impl From<SourceType> for String {
    fn from(source_type: SourceType) -> Self {
        source_type.0.into_owned()
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The flow a payer goes through to complete a source payment
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Flow {
    /// Payer is redirected to an external website
    Redirect,
    /// Payer receives information to complete the payment offline
    Offline,
    /// Payer is redirected to an app
    AppRedirect,
    /// Any flow this SDK does not know about
    Other(String),
}

impl Flow {
    pub fn as_str(&self) -> &str {
        match self {
            Flow::Redirect => "redirect",
            Flow::Offline => "offline",
            Flow::AppRedirect => "app_redirect",
            Flow::Other(value) => value,
        }
    }
}

impl From<&str> for Flow {
    fn from(value: &str) -> Self {
        match value {
            "redirect" => Flow::Redirect,
            "offline" => Flow::Offline,
            "app_redirect" => Flow::AppRedirect,
            other => Flow::Other(other.to_string()),
        }
    }
}

/// Status of the charge made with a token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ChargeStatus {
    #[default]
    Unknown,
    Failed,
    Expired,
    Pending,
    Reversed,
    Successful,
    Other(String),
}

impl ChargeStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ChargeStatus::Unknown => "unknown",
            ChargeStatus::Failed => "failed",
            ChargeStatus::Expired => "expired",
            ChargeStatus::Pending => "pending",
            ChargeStatus::Reversed => "reversed",
            ChargeStatus::Successful => "successful",
            ChargeStatus::Other(value) => value,
        }
    }

    /// Whether the charge can no longer change status
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            ChargeStatus::Failed | ChargeStatus::Expired | ChargeStatus::Reversed | ChargeStatus::Successful
        )
    }
}

impl From<&str> for ChargeStatus {
    fn from(value: &str) -> Self {
        match value {
            "unknown" => ChargeStatus::Unknown,
            "failed" => ChargeStatus::Failed,
            "expired" => ChargeStatus::Expired,
            "pending" => ChargeStatus::Pending,
            "reversed" => ChargeStatus::Reversed,
            "successful" => ChargeStatus::Successful,
            other => ChargeStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ChargeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_normalization() {
        assert_eq!(Currency::new("thb"), Currency::THB);
        assert_eq!(Currency::from(" jpy "), Currency::JPY);
        assert!(Currency::new("usd").is_known());
    }

    #[test]
    fn test_unknown_currency_round_trips() {
        let currency = Currency::new("PHP");
        assert!(!currency.is_known());
        assert_eq!(currency.code(), "PHP");

        let json = serde_json::to_string(&currency).unwrap();
        assert_eq!(json, "\"PHP\"");
        let decoded: Currency = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, currency);
    }

    #[test]
    fn test_currency_factor() {
        assert_eq!(Currency::THB.factor(), 100);
        assert_eq!(Currency::JPY.factor(), 1);
        assert_eq!(Currency::THB.from_subunit(10025), Decimal::new(10025, 2));
        assert_eq!(Currency::JPY.from_subunit(500), Decimal::from(500));
        assert_eq!(Currency::THB.to_subunit(Decimal::new(1999, 2)), Some(1999));
    }

    #[test]
    fn test_source_type_known_and_unknown() {
        assert_eq!(SourceType::new("internet_banking_bay"), SourceType::INTERNET_BANKING_BAY);
        assert!(SourceType::PROMPTPAY.is_known());

        let future = SourceType::new("qr_future_wallet");
        assert!(!future.is_known());
        let json = serde_json::to_string(&future).unwrap();
        let decoded: SourceType = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.as_str(), "qr_future_wallet");
    }

    #[test]
    fn test_installment_detection() {
        assert!(SourceType::INSTALLMENT_KBANK.is_installment());
        assert!(!SourceType::FPX.is_installment());
    }

    #[test]
    fn test_flow_values() {
        assert_eq!(Flow::from("app_redirect"), Flow::AppRedirect);
        assert_eq!(Flow::from("qr").as_str(), "qr");
    }

    #[test]
    fn test_charge_status_finality() {
        assert!(ChargeStatus::from("successful").is_final());
        assert!(ChargeStatus::from("failed").is_final());
        assert!(ChargeStatus::from("expired").is_final());
        assert!(ChargeStatus::from("reversed").is_final());
        assert!(!ChargeStatus::from("pending").is_final());
        assert!(!ChargeStatus::default().is_final());

        let other = ChargeStatus::from("disputed");
        assert_eq!(other, ChargeStatus::Other("disputed".to_string()));
        assert_eq!(other.as_str(), "disputed");
        assert!(!other.is_final());
    }
}
