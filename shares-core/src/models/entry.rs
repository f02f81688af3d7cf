use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::Figure;

/// A primary value as typed into one of the numeric form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Entry {
    /// The field is empty. Counts as zero in arithmetic.
    #[default]
    Unset,
    Number(Decimal),
    /// Non-empty text with no numeric prefix. The raw text is kept for display.
    Invalid(String),
}

impl Entry {
    /// Parses raw field text.
    ///
    /// Only the empty string is `Unset`. Anything else is read the way a
    /// browser `parseFloat` reads it: leading whitespace is skipped and the
    /// longest numeric prefix wins, so `"12abc"` is 12 and `"1,000"` is 1.
    /// Text without a numeric prefix becomes [`Entry::Invalid`].
    ///
    /// Values below `Decimal`'s smallest step round to zero, so `"1e-30"` is
    /// 0. Values past its range (about 7.9e28) are also `Invalid` and render
    /// as not-a-number.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::Unset;
        }

        let Some(prefix) = NumericPrefix::scan(raw) else {
            warn!(input = %raw, "field value is not a number");
            return Self::Invalid(raw.to_string());
        };

        match prefix.to_decimal() {
            Ok(value) => Self::Number(value),
            Err(OutOfRange) => {
                warn!(input = %raw, "field value is outside the supported range");
                Self::Invalid(raw.to_string())
            }
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn number(&self) -> Option<Decimal> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// The value as it takes part in arithmetic: unset is zero.
    pub fn figure(&self) -> Figure {
        match self {
            Self::Unset => Figure::ZERO,
            Self::Number(v) => Figure::Value(*v),
            Self::Invalid(_) => Figure::NotANumber,
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Unset => Ok(()),
            Self::Number(v) => write!(f, "{}", v.normalize()),
            Self::Invalid(raw) => f.write_str(raw),
        }
    }
}

/// The pieces of the leading number found in a string.
struct NumericPrefix<'a> {
    negative: bool,
    integer: &'a str,
    fraction: &'a str,
    exponent: Option<&'a str>,
}

impl<'a> NumericPrefix<'a> {
    fn scan(raw: &'a str) -> Option<Self> {
        let s = raw.trim_start();
        let bytes = s.as_bytes();
        let mut pos = 0;

        let negative = match bytes.first() {
            Some(b'-') => {
                pos = 1;
                true
            }
            Some(b'+') => {
                pos = 1;
                false
            }
            _ => false,
        };

        let int_start = pos;
        pos += count_digits(&bytes[pos..]);
        let integer = &s[int_start..pos];

        let mut fraction = "";
        if bytes.get(pos) == Some(&b'.') {
            let frac_start = pos + 1;
            let frac_end = frac_start + count_digits(&bytes[frac_start..]);
            fraction = &s[frac_start..frac_end];
            pos = frac_end;
        }

        if integer.is_empty() && fraction.is_empty() {
            return None;
        }

        let mut exponent = None;
        if matches!(bytes.get(pos), Some(b'e' | b'E')) {
            let sign_len = usize::from(matches!(bytes.get(pos + 1), Some(b'+' | b'-')));
            let digits_start = pos + 1 + sign_len;
            let digits = count_digits(&bytes[digits_start.min(bytes.len())..]);
            if digits > 0 {
                exponent = Some(&s[pos + 1..digits_start + digits]);
            }
        }

        Some(Self {
            negative,
            integer,
            fraction,
            exponent,
        })
    }

    /// Places the decimal point by hand so any exponent works: digits past
    /// the 28th decimal place are rounded away, and a magnitude too large for
    /// `Decimal` is [`OutOfRange`].
    fn to_decimal(&self) -> Result<Decimal, OutOfRange> {
        let all_digits = format!("{}{}", self.integer, self.fraction);
        let digits = all_digits.trim_start_matches('0');
        if digits.is_empty() {
            return Ok(Decimal::ZERO);
        }

        let exponent = match self.exponent {
            Some(exp) => exp
                .parse::<i64>()
                .unwrap_or(if exp.starts_with('-') { i64::MIN } else { i64::MAX }),
            None => 0,
        };
        // Digits before the decimal point, once leading zeros are gone.
        let point = i64::try_from(digits.len())
            .unwrap_or(i64::MAX)
            .saturating_add(exponent)
            .saturating_sub(i64::try_from(self.fraction.len()).unwrap_or(i64::MAX));

        if point < -MAX_SCALE {
            return Ok(Decimal::ZERO);
        }
        if point > MAX_INTEGER_DIGITS {
            return Err(OutOfRange);
        }

        let mut text = String::with_capacity(digits.len() + 32);
        if self.negative {
            text.push('-');
        }
        match usize::try_from(point) {
            Ok(split) if split >= digits.len() => {
                text.push_str(digits);
                text.extend(std::iter::repeat_n('0', split - digits.len()));
            }
            Ok(split) if split > 0 => {
                text.push_str(&digits[..split]);
                text.push('.');
                text.push_str(&digits[split..]);
            }
            _ => {
                text.push_str("0.");
                text.extend(std::iter::repeat_n('0', point.unsigned_abs() as usize));
                text.push_str(digits);
            }
        }

        text.parse().map_err(|_| OutOfRange)
    }
}

/// The largest number of decimal places a `Decimal` holds.
const MAX_SCALE: i64 = 28;

/// `Decimal::MAX` has 29 integer digits.
const MAX_INTEGER_DIGITS: i64 = 29;

/// A numeric prefix whose magnitude does not fit in a `Decimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OutOfRange;

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn empty_text_is_unset() {
        assert_eq!(Entry::parse(""), Entry::Unset);
    }

    #[test]
    fn whole_numbers_parse() {
        assert_eq!(Entry::parse("150"), Entry::Number(dec!(150)));
        assert_eq!(Entry::parse("  500"), Entry::Number(dec!(500)));
    }

    #[test]
    fn decimals_and_signs_parse() {
        assert_eq!(Entry::parse("2.25"), Entry::Number(dec!(2.25)));
        assert_eq!(Entry::parse(".5"), Entry::Number(dec!(0.5)));
        assert_eq!(Entry::parse("5."), Entry::Number(dec!(5)));
        assert_eq!(Entry::parse("-3"), Entry::Number(dec!(-3)));
        assert_eq!(Entry::parse("+7"), Entry::Number(dec!(7)));
    }

    #[test]
    fn exponents_parse() {
        assert_eq!(Entry::parse("1e3"), Entry::Number(dec!(1000)));
        assert_eq!(Entry::parse("25E-1"), Entry::Number(dec!(2.5)));
    }

    #[test]
    fn tiny_values_round_to_zero_in_any_notation() {
        assert_eq!(Entry::parse("1e-30"), Entry::Number(Decimal::ZERO));
        assert_eq!(Entry::parse("0.000000000000000000000000000001"), Entry::Number(Decimal::ZERO));
        assert_eq!(Entry::parse("-5e-99999999999999999999"), Entry::Number(Decimal::ZERO));
        assert_eq!(Entry::parse("1e-28"), Entry::Number(dec!(0.0000000000000000000000000001)));
    }

    #[test]
    fn large_exponents_within_range_parse() {
        assert_eq!(Entry::parse("0.00015e7"), Entry::Number(dec!(1500)));
        assert_eq!(Entry::parse("12345e-2"), Entry::Number(dec!(123.45)));
        assert_eq!(Entry::parse("1e28"), Entry::Number(dec!(10000000000000000000000000000)));
    }

    #[test]
    fn values_past_decimal_range_are_invalid() {
        let thirty_digits = "100000000000000000000000000000";

        assert_eq!(Entry::parse(thirty_digits), Entry::Invalid(thirty_digits.to_string()));
        assert_eq!(Entry::parse("1e400"), Entry::Invalid("1e400".to_string()));
        assert_eq!(Entry::parse("1e400").figure(), Figure::NotANumber);
    }

    #[test]
    fn trailing_garbage_is_ignored() {
        assert_eq!(Entry::parse("12abc"), Entry::Number(dec!(12)));
        assert_eq!(Entry::parse("1,000"), Entry::Number(dec!(1)));
        assert_eq!(Entry::parse("4e"), Entry::Number(dec!(4)));
    }

    #[test]
    fn text_without_a_number_is_invalid() {
        assert_eq!(Entry::parse("abc"), Entry::Invalid("abc".to_string()));
        assert_eq!(Entry::parse("   "), Entry::Invalid("   ".to_string()));
        assert_eq!(Entry::parse("-"), Entry::Invalid("-".to_string()));
        assert_eq!(Entry::parse("."), Entry::Invalid(".".to_string()));
    }

    #[test]
    fn figure_treats_unset_as_zero() {
        assert_eq!(Entry::Unset.figure(), Figure::ZERO);
        assert_eq!(Entry::parse("x").figure(), Figure::NotANumber);
        assert_eq!(Entry::parse("42").figure(), Figure::Value(dec!(42)));
    }

    #[test]
    fn display_echoes_the_field() {
        assert_eq!(Entry::Unset.to_string(), "");
        assert_eq!(Entry::parse("150.50").to_string(), "150.5");
        assert_eq!(Entry::parse("oops").to_string(), "oops");
    }
}
