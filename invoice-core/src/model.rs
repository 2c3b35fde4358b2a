use std::fmt;

use crate::error::{InvoiceError, Result};

/// A line-item value as supplied by the caller: a JSON integer, a
/// JSON number with a fractional part, or a string.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl Scalar {
    /// Sum two numeric scalars. Integers stay integers until they meet a
    /// decimal; text never sums.
    pub fn checked_add(&self, other: &Scalar) -> Result<Scalar> {
        match (self, other) {
            (Scalar::Integer(a), Scalar::Integer(b)) => a
                .checked_add(*b)
                .map(Scalar::Integer)
                .ok_or_else(|| InvoiceError::TotalsAggregation {
                    reason: format!("{} + {} overflows a 64-bit integer", a, b),
                }),
            (Scalar::Integer(a), Scalar::Decimal(b)) => Ok(Scalar::Decimal(*a as f64 + b)),
            (Scalar::Decimal(a), Scalar::Integer(b)) => Ok(Scalar::Decimal(a + *b as f64)),
            (Scalar::Decimal(a), Scalar::Decimal(b)) => Ok(Scalar::Decimal(a + b)),
            (Scalar::Text(text), _) | (_, Scalar::Text(text)) => {
                Err(InvoiceError::TotalsAggregation {
                    reason: format!("{:?} is not a number", text),
                })
            }
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Integer(n) => write!(f, "{}", n),
            Scalar::Decimal(x) => format_decimal(f, *x),
            Scalar::Text(text) => f.write_str(text),
        }
    }
}

/// Shortest round-trip digits. Magnitudes outside `[1e-4, 1e16)` use
/// exponent notation with a signed two-digit exponent (`1e+16`,
/// `1.5e-05`); integral values keep a trailing `.0`.
fn format_decimal(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if !x.is_finite() {
        return write!(f, "{}", x);
    }
    if x != 0.0 && !(1e-4..1e16).contains(&x.abs()) {
        let formatted = format!("{:e}", x);
        let (mantissa, exponent) = formatted.split_once('e').unwrap_or((formatted.as_str(), "0"));
        let (sign, digits) = match exponent.strip_prefix('-') {
            Some(digits) => ('-', digits),
            None => ('+', exponent),
        };
        return write!(f, "{}e{}{:0>2}", mantissa, sign, digits);
    }
    if x.fract() == 0.0 {
        write!(f, "{:.1}", x)
    } else {
        write!(f, "{}", x)
    }
}

/// Name and address lines of a party, in display order. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct PartyDetails(Vec<String>);

pub type IssuerDetails = PartyDetails;
pub type BuyerDetails = PartyDetails;

impl PartyDetails {
    pub fn new(lines: Vec<String>) -> Option<Self> {
        if lines.is_empty() {
            None
        } else {
            Some(PartyDetails(lines))
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub sno: Scalar,
    pub name: String,
    pub hsn_code: Scalar,
    pub tax_slab: Scalar,
    pub quantity: Scalar,
    pub price: Scalar,
    /// Trusted as given; never recomputed from quantity and price.
    pub total: Scalar,
}

const MAX_INVOICE_NUMBER_LEN: usize = 128;

/// An invoice identifier that is safe to use as a file name stem.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
    pub const RULE: &'static str =
        "1 to 128 characters from A-Z, a-z, 0-9, '.', '_', '-', not starting with '.'";

    pub fn parse(raw: &str) -> Result<Self> {
        let valid = !raw.is_empty()
            && raw.len() <= MAX_INVOICE_NUMBER_LEN
            && !raw.starts_with('.')
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'));
        if valid {
            Ok(InvoiceNumber(raw.to_string()))
        } else {
            Err(InvoiceError::invalid("invoice_number", Self::RULE))
        }
    }

    /// Accept only `<invoice number>.pdf`.
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        file_name
            .strip_suffix(".pdf")
            .and_then(|stem| InvoiceNumber::parse(stem).ok())
            .ok_or_else(|| InvoiceError::invalid("filename", "<invoice number>.pdf"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> String {
        format!("{}.pdf", self.0)
    }
}

impl fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated request to render one invoice.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceRequest {
    pub issuer: IssuerDetails,
    pub buyer: BuyerDetails,
    pub items: Vec<LineItem>,
    pub invoice_number: InvoiceNumber,
}

impl InvoiceRequest {
    /// Sum of every item's `total`, in input order. An invoice with no
    /// items totals `0`.
    pub fn grand_total(&self) -> Result<Scalar> {
        self.items
            .iter()
            .enumerate()
            .try_fold(Scalar::Integer(0), |sum, (i, item)| {
                sum.checked_add(&item.total).map_err(|err| match err {
                    InvoiceError::TotalsAggregation { reason } => InvoiceError::TotalsAggregation {
                        reason: format!("items[{}].total: {}", i, reason),
                    },
                    other => other,
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_display_keeps_point_zero() {
        assert_eq!(Scalar::Decimal(20.0).to_string(), "20.0");
        assert_eq!(Scalar::Decimal(12.5).to_string(), "12.5");
        assert_eq!(Scalar::Decimal(0.1 + 0.2).to_string(), "0.30000000000000004");
        assert_eq!(Scalar::Integer(-3).to_string(), "-3");
    }

    #[test]
    fn extreme_decimals_use_exponent_notation() {
        assert_eq!(Scalar::Decimal(1e16).to_string(), "1e+16");
        assert_eq!(Scalar::Decimal(1.2345e20).to_string(), "1.2345e+20");
        assert_eq!(Scalar::Decimal(-2.5e17).to_string(), "-2.5e+17");
        assert_eq!(Scalar::Decimal(1.5e-5).to_string(), "1.5e-05");
        assert_eq!(Scalar::Decimal(9999999999999998.0).to_string(), "9999999999999998.0");
        assert_eq!(Scalar::Decimal(0.0001).to_string(), "0.0001");
        assert_eq!(Scalar::Decimal(0.0).to_string(), "0.0");
    }

    #[test]
    fn integer_plus_decimal_promotes() {
        let sum = Scalar::Integer(2).checked_add(&Scalar::Decimal(0.5)).unwrap();
        assert_eq!(sum, Scalar::Decimal(2.5));
    }

    #[test]
    fn integer_overflow_is_an_aggregation_error() {
        let err = Scalar::Integer(i64::MAX)
            .checked_add(&Scalar::Integer(1))
            .unwrap_err();
        assert!(matches!(err, InvoiceError::TotalsAggregation { .. }));
    }

    #[test]
    fn invoice_number_rules() {
        let longest = "9".repeat(128);
        let too_long = "9".repeat(129);
        for ok in ["INV001", "inv-2024_07.a", "a", longest.as_str()] {
            assert!(InvoiceNumber::parse(ok).is_ok(), "{} should be accepted", ok);
        }
        for bad in ["", ".hidden", "..", "../etc/passwd", "a/b", "a\\b", "in voice", "é", too_long.as_str()] {
            assert!(InvoiceNumber::parse(bad).is_err(), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn file_name_round_trip() {
        let number = InvoiceNumber::from_file_name("INV001.pdf").unwrap();
        assert_eq!(number.as_str(), "INV001");
        assert_eq!(number.file_name(), "INV001.pdf");
        assert!(InvoiceNumber::from_file_name("INV001").is_err());
        assert!(InvoiceNumber::from_file_name("../INV001.pdf").is_err());
        assert!(InvoiceNumber::from_file_name(".pdf").is_err());
    }
}
