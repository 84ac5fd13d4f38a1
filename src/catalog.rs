//! Static catalog of payment methods the client knows how to create
//!
//! Each entry declares the category a source type belongs to, the currencies
//! it accepts and the source fields a request for it must carry.

use crate::models::Capability;
use crate::types::{Currency, SourceType};

/// Grouping of payment methods as presented to payers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentCategory {
    Installment,
    InternetBanking,
    MobileBanking,
    EContext,
    Wallet,
    QrCode,
    BuyNowPayLater,
    BillPayment,
    OnlineBanking,
    Points,
}

/// A method-specific field on a source request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceField {
    Bank,
    InstallmentTerm,
    PhoneNumber,
    Email,
    Name,
    StoreId,
    TerminalId,
}

impl SourceField {
    pub fn name(self) -> &'static str {
        match self {
            SourceField::Bank => "bank",
            SourceField::InstallmentTerm => "installment_term",
            SourceField::PhoneNumber => "phone_number",
            SourceField::Email => "email",
            SourceField::Name => "name",
            SourceField::StoreId => "store_id",
            SourceField::TerminalId => "terminal_id",
        }
    }
}

/// Declared constraints of one payment method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentMethod {
    pub source_type: SourceType,
    pub name: &'static str,
    pub category: PaymentCategory,
    pub currencies: &'static [Currency],
    pub required_fields: &'static [SourceField],
}

impl PaymentMethod {
    pub fn supports_currency(&self, currency: &Currency) -> bool {
        self.currencies.contains(currency)
    }

    pub fn requires(&self, field: SourceField) -> bool {
        self.required_fields.contains(&field)
    }
}

const THB: &[Currency] = &[Currency::THB];
const MYR: &[Currency] = &[Currency::MYR];
const SGD: &[Currency] = &[Currency::SGD];
const JPY: &[Currency] = &[Currency::JPY];
const ALIPAY_PLUS: &[Currency] = &[Currency::THB, Currency::SGD, Currency::MYR];

macro_rules! method {
    ($ty:ident, $name:literal, $category:ident, $currencies:expr, [$($field:ident),*]) => {
        PaymentMethod {
            source_type: SourceType::$ty,
            name: $name,
            category: PaymentCategory::$category,
            currencies: $currencies,
            required_fields: &[$(SourceField::$field),*],
        }
    };
}

static METHODS: &[PaymentMethod] = &[
    method!(ALIPAY, "Alipay", Wallet, THB, []),
    method!(ALIPAY_CN, "Alipay CN", Wallet, ALIPAY_PLUS, []),
    method!(ALIPAY_HK, "Alipay HK", Wallet, ALIPAY_PLUS, []),
    method!(ATOME, "Atome", BuyNowPayLater, &[Currency::THB, Currency::SGD, Currency::MYR], [PhoneNumber]),
    method!(BARCODE_ALIPAY, "Alipay In-Store", QrCode, THB, [StoreId, TerminalId]),
    method!(BILL_PAYMENT_TESCO_LOTUS, "Bill Payment (Lotus's)", BillPayment, THB, []),
    method!(BOOST, "Boost", Wallet, MYR, []),
    method!(DANA, "DANA", Wallet, ALIPAY_PLUS, []),
    method!(DUITNOW_OBW, "DuitNow Online Banking/Wallets", OnlineBanking, MYR, [Bank]),
    method!(DUITNOW_QR, "DuitNow QR", QrCode, MYR, []),
    method!(ECONTEXT, "Konbini, Pay-easy and Online Banking", EContext, JPY, [Name, Email, PhoneNumber]),
    method!(FPX, "FPX", OnlineBanking, MYR, [Bank]),
    method!(GCASH, "GCash", Wallet, ALIPAY_PLUS, []),
    method!(GRABPAY, "GrabPay", Wallet, &[Currency::THB, Currency::SGD, Currency::MYR], []),
    method!(GRABPAY_RMS, "GrabPay", Wallet, MYR, []),
    method!(INSTALLMENT_BAY, "Krungsri", Installment, THB, [InstallmentTerm]),
    method!(INSTALLMENT_BBL, "Bangkok Bank", Installment, THB, [InstallmentTerm]),
    method!(INSTALLMENT_FIRST_CHOICE, "Krungsri First Choice", Installment, THB, [InstallmentTerm]),
    method!(INSTALLMENT_KBANK, "Kasikorn", Installment, THB, [InstallmentTerm]),
    method!(INSTALLMENT_KTC, "KTC", Installment, THB, [InstallmentTerm]),
    method!(INSTALLMENT_MBB, "Maybank", Installment, MYR, [InstallmentTerm]),
    method!(INSTALLMENT_SCB, "Siam Commercial Bank", Installment, THB, [InstallmentTerm]),
    method!(INSTALLMENT_TTB, "TMBThanachart Bank", Installment, THB, [InstallmentTerm]),
    method!(INSTALLMENT_UOB, "United Overseas Bank", Installment, THB, [InstallmentTerm]),
    method!(INTERNET_BANKING_BAY, "Krungsri Bank", InternetBanking, THB, []),
    method!(INTERNET_BANKING_BBL, "Bangkok Bank", InternetBanking, THB, []),
    method!(KAKAOPAY, "Kakao Pay", Wallet, ALIPAY_PLUS, []),
    method!(MAYBANK_QR, "Maybank QRPay", QrCode, MYR, []),
    method!(MOBILE_BANKING_BAY, "KMA", MobileBanking, THB, []),
    method!(MOBILE_BANKING_BBL, "Bualuang mBanking", MobileBanking, THB, []),
    method!(MOBILE_BANKING_KBANK, "K PLUS", MobileBanking, THB, []),
    method!(MOBILE_BANKING_KTB, "Krungthai NEXT", MobileBanking, THB, []),
    method!(MOBILE_BANKING_OCBC, "OCBC Digital", MobileBanking, SGD, []),
    method!(MOBILE_BANKING_SCB, "SCB EASY", MobileBanking, THB, []),
    method!(PAYNOW, "PayNow", QrCode, SGD, []),
    method!(PAYPAY, "PayPay", Wallet, JPY, []),
    method!(POINTS_CITI, "Pay with Citi Points", Points, THB, []),
    method!(PROMPTPAY, "PromptPay", QrCode, THB, []),
    method!(RABBIT_LINEPAY, "Rabbit LINE Pay", Wallet, THB, []),
    method!(SHOPEEPAY, "ShopeePay", Wallet, &[Currency::THB, Currency::SGD, Currency::MYR], []),
    method!(SHOPEEPAY_JUMPAPP, "ShopeePay", Wallet, &[Currency::THB, Currency::SGD, Currency::MYR], []),
    method!(TOUCH_N_GO, "Touch 'n Go", Wallet, MYR, []),
    method!(TOUCH_N_GO_ALIPAY_PLUS, "Touch 'n Go", Wallet, ALIPAY_PLUS, []),
    method!(TRUEMONEY, "TrueMoney Wallet", Wallet, THB, [PhoneNumber]),
    method!(TRUEMONEY_JUMPAPP, "TrueMoney", Wallet, THB, []),
    method!(WECHAT_PAY, "WeChat Pay", Wallet, THB, []),
];

/// Every known payment method, sorted by source type
pub fn all() -> &'static [PaymentMethod] {
    METHODS
}

/// The declared constraints for a source type, `None` for types the catalog does not know
pub fn lookup(source_type: &SourceType) -> Option<&'static PaymentMethod> {
    METHODS.iter().find(|m| &m.source_type == source_type)
}

pub fn by_category(category: PaymentCategory) -> impl Iterator<Item = &'static PaymentMethod> {
    METHODS.iter().filter(move |m| m.category == category)
}

/// Methods that accept a currency
pub fn supporting_currency<'a>(currency: &'a Currency) -> impl Iterator<Item = &'static PaymentMethod> + 'a {
    METHODS.iter().filter(move |m| m.supports_currency(currency))
}

/// Whether a source type is known to accept a currency. Unknown types are allowed.
pub fn supports_currency(source_type: &SourceType, currency: &Currency) -> bool {
    lookup(source_type).map_or(true, |m| m.supports_currency(currency))
}

/// Catalog methods an account has enabled, in catalog order
pub fn available_for(capability: &Capability) -> Vec<&'static PaymentMethod> {
    METHODS
        .iter()
        .filter(|m| capability.supports(&m.source_type))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CapabilityMethod;

    #[test]
    fn test_every_known_source_type_is_cataloged() {
        for source_type in SourceType::KNOWN {
            assert!(lookup(source_type).is_some(), "{} missing from catalog", source_type);
        }
        assert_eq!(all().len(), SourceType::KNOWN.len());
    }

    #[test]
    fn test_required_fields() {
        let kbank = lookup(&SourceType::INSTALLMENT_KBANK).unwrap();
        assert!(kbank.requires(SourceField::InstallmentTerm));
        assert_eq!(kbank.category, PaymentCategory::Installment);

        let fpx = lookup(&SourceType::FPX).unwrap();
        assert!(fpx.requires(SourceField::Bank));

        let bay = lookup(&SourceType::INTERNET_BANKING_BAY).unwrap();
        assert!(bay.required_fields.is_empty());
    }

    #[test]
    fn test_currency_queries() {
        assert!(supports_currency(&SourceType::PROMPTPAY, &Currency::THB));
        assert!(!supports_currency(&SourceType::PROMPTPAY, &Currency::JPY));
        assert!(supports_currency(&SourceType::new("future_method"), &Currency::JPY));

        let jpy: Vec<_> = supporting_currency(&Currency::JPY).map(|m| m.source_type.clone()).collect();
        assert!(jpy.contains(&SourceType::ECONTEXT));
        assert!(jpy.contains(&SourceType::PAYPAY));

        assert_eq!(by_category(PaymentCategory::MobileBanking).count(), 6);
    }

    #[test]
    fn test_available_for_capability() {
        let method = |name: &str| CapabilityMethod {
            name: name.to_string(),
            currencies: vec![Currency::THB],
            card_brands: Vec::new(),
            installment_terms: Vec::new(),
            banks: Vec::new(),
        };
        let capability = Capability {
            country: Some("TH".to_string()),
            location: None,
            banks: Vec::new(),
            payment_methods: vec![method("card"), method("promptpay"), method("unknown_wallet"), method("fpx")],
        };
        let available: Vec<_> = available_for(&capability).iter().map(|m| m.source_type.clone()).collect();
        assert_eq!(available, vec![SourceType::FPX, SourceType::PROMPTPAY]);
    }
}
