//! Card number (PAN) utilities

use std::fmt;

/// Card network brand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardBrand {
    Visa,
    MasterCard,
    Jcb,
    Amex,
    Diners,
    Laser,
    Maestro,
    Discover,
    UnionPay,
}

impl CardBrand {
    /// Brands in detection order. Earlier brands win on overlapping prefixes.
    pub const ALL: [CardBrand; 9] = [
        CardBrand::Visa,
        CardBrand::MasterCard,
        CardBrand::Jcb,
        CardBrand::Amex,
        CardBrand::Diners,
        CardBrand::Laser,
        CardBrand::Maestro,
        CardBrand::Discover,
        CardBrand::UnionPay,
    ];

    /// Brand name as the service reports it
    pub fn name(self) -> &'static str {
        match self {
            CardBrand::Visa => "Visa",
            CardBrand::MasterCard => "MasterCard",
            CardBrand::Jcb => "JCB",
            CardBrand::Amex => "American Express",
            CardBrand::Diners => "Diners Club",
            CardBrand::Laser => "Laser",
            CardBrand::Maestro => "Maestro",
            CardBrand::Discover => "Discover",
            CardBrand::UnionPay => "UnionPay",
        }
    }

    /// Parse a brand name as reported by the service
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|brand| brand.name().eq_ignore_ascii_case(name))
    }

    /// Valid card number lengths for this brand
    pub fn valid_lengths(self) -> std::ops::RangeInclusive<usize> {
        match self {
            CardBrand::Visa | CardBrand::MasterCard | CardBrand::Jcb => 16..=16,
            CardBrand::Amex => 15..=15,
            CardBrand::Diners => 14..=14,
            CardBrand::Laser => 16..=19,
            CardBrand::Maestro => 12..=19,
            CardBrand::Discover | CardBrand::UnionPay => 16..=19,
        }
    }

    fn matches(self, digits: &str) -> bool {
        let prefix = |n: usize| -> Option<u32> { digits.get(..n).and_then(|p| p.parse().ok()) };
        let len = digits.len();
        let in_prefix = |n: usize, low: u32, high: u32| prefix(n).is_some_and(|p| (low..=high).contains(&p));

        match self {
            CardBrand::Visa => digits.starts_with('4'),
            CardBrand::MasterCard => in_prefix(2, 51, 55) || in_prefix(4, 2221, 2720),
            CardBrand::Jcb => in_prefix(4, 3528, 3589),
            CardBrand::Amex => in_prefix(2, 34, 34) || in_prefix(2, 37, 37),
            CardBrand::Diners => {
                in_prefix(3, 300, 305) || matches!(prefix(2), Some(36 | 38 | 39))
            }
            CardBrand::Laser => matches!(prefix(4), Some(6304 | 6706 | 6709 | 6771)),
            CardBrand::Maestro => {
                matches!(prefix(2), Some(50 | 56 | 57 | 58))
                    || matches!(prefix(4), Some(6304 | 6759 | 6761 | 6762 | 6763))
            }
            CardBrand::Discover => {
                (16..=19).contains(&len)
                    && (prefix(4) == Some(6011)
                        || prefix(2) == Some(65)
                        || in_prefix(3, 644, 649)
                        || in_prefix(6, 622126, 622925))
            }
            CardBrand::UnionPay => (16..=19).contains(&len) && prefix(2) == Some(62),
        }
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A card number holding digits only.
///
/// `Debug` and `Display` print the masked form.
#[derive(Clone, PartialEq, Eq)]
pub struct Pan(String);

impl Pan {
    /// Create a PAN from user input, dropping every non-digit character
    pub fn new(input: &str) -> Self {
        Pan(input.chars().filter(char::is_ascii_digit).collect())
    }

    /// The unmasked digits
    pub fn digits(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The detected card brand
    pub fn brand(&self) -> Option<CardBrand> {
        CardBrand::ALL.into_iter().find(|brand| brand.matches(&self.0))
    }

    /// Last 4 digits
    pub fn last_digits(&self) -> &str {
        let start = self.0.len().saturating_sub(4);
        &self.0[start..]
    }

    /// Masked number, keeping the first six and last four digits of a 16-digit card
    pub fn masked(&self) -> String {
        let len = self.0.len();
        let start = len.saturating_sub(10);
        let end = len.saturating_sub(4);
        self.0
            .chars()
            .enumerate()
            .map(|(i, c)| if (start..end).contains(&i) { 'X' } else { c })
            .collect()
    }

    /// Brand detected, length valid for the brand, and Luhn checksum passes
    pub fn is_valid(&self) -> bool {
        match self.brand() {
            Some(brand) => {
                brand.valid_lengths().contains(&self.0.len()) && luhn::valid(self.digits())
            }
            None => false,
        }
    }
}

impl fmt::Debug for Pan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pan").field(&self.masked()).finish()
    }
}

impl fmt::Display for Pan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        let pan = Pan::new("4242 4242-4242 4242");
        assert_eq!(pan.digits(), "4242424242424242");
        assert_eq!(pan.last_digits(), "4242");
    }

    #[test]
    fn test_masking() {
        assert_eq!(Pan::new("4242424242424242").masked(), "424242XXXXXX4242");
        assert_eq!(Pan::new("378282246310005").masked(), "37828XXXXXX0005");
        assert_eq!(Pan::new("4242").masked(), "4242");
        assert_eq!(format!("{:?}", Pan::new("4242424242424242")), "Pan(\"424242XXXXXX4242\")");
    }

    #[test]
    fn test_brand_detection() {
        assert_eq!(Pan::new("4242424242424242").brand(), Some(CardBrand::Visa));
        assert_eq!(Pan::new("5555555555554444").brand(), Some(CardBrand::MasterCard));
        assert_eq!(Pan::new("2223003122003222").brand(), Some(CardBrand::MasterCard));
        assert_eq!(Pan::new("3530111333300000").brand(), Some(CardBrand::Jcb));
        assert_eq!(Pan::new("378282246310005").brand(), Some(CardBrand::Amex));
        assert_eq!(Pan::new("30569309025904").brand(), Some(CardBrand::Diners));
        assert_eq!(Pan::new("6011111111111117").brand(), Some(CardBrand::Discover));
        assert_eq!(Pan::new("6200000000000005").brand(), Some(CardBrand::UnionPay));
        assert_eq!(Pan::new("1234567812345678").brand(), None);
    }

    #[test]
    fn test_validity() {
        assert!(Pan::new("4242424242424242").is_valid());
        assert!(Pan::new("378282246310005").is_valid());
        assert!(!Pan::new("4242424242424241").is_valid());
        assert!(!Pan::new("424242424242").is_valid());
        assert!(!Pan::new("").is_valid());
    }

    #[test]
    fn test_validity_needs_brand_and_checksum() {
        assert!(Pan::new("4242 4242 4242 4242").is_valid());
        // passes the checksum but matches no brand
        assert!(!Pan::new("0000000000000000").is_valid());
        // visa prefix and length, bad checksum
        assert!(!Pan::new("4111111111111112").is_valid());
    }

    #[test]
    fn test_brand_names() {
        assert_eq!(CardBrand::from_name("visa"), Some(CardBrand::Visa));
        assert_eq!(CardBrand::from_name("American Express"), Some(CardBrand::Amex));
        assert_eq!(CardBrand::from_name("Mir"), None);
    }
}
