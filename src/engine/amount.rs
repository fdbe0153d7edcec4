use serde::Deserialize;
use std::fmt;
use std::iter::Sum;
use std::num::{IntErrorKind, ParseIntError};
use std::ops::{Add, Neg};
use std::str::FromStr;
use thiserror::Error;

const SCALE: i64 = 10_000;
const DECIMALS: usize = 4;

/// Signed quantity of money held in a budget category.
/// It is using internally an i64 in order to avoid floating point rounding error.
/// The Amount precision is four places past the decimal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Amount {
    store: i64,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount parsing error: {0}")]
    Parse(String),

    #[error("Overflow error while creating Amount")]
    Overflow,
}

impl Amount {
    pub const ZERO: Amount = Amount { store: 0 };

    pub fn is_negative(&self) -> bool {
        self.store < 0
    }

    pub fn is_positive(&self) -> bool {
        self.store > 0
    }

    /// Ten-thousandths of a unit; the chart's bar values.
    pub fn ten_thousandths(&self) -> i64 {
        self.store
    }
}

impl From<i64> for Amount {
    /// Whole units, saturating at the representable range.
    fn from(units: i64) -> Self {
        Amount {
            store: units.saturating_mul(SCALE),
        }
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount {
            store: self.store.saturating_add(rhs.store),
        }
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Amount {
        Amount {
            store: self.store.saturating_neg(),
        }
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            Err(AmountError::Parse(s.into()))?
        }

        let (left_part, decimal_part) = match s.split_once('.') {
            Some((left, dec)) => (left, Some(dec)),
            None => (s, None),
        };

        // Integer part may be empty (ex: ".05") or a bare sign (ex: "-.05")
        let left_str = match (left_part, decimal_part) {
            ("", Some(_)) => "0",
            ("-", Some(_)) => "-0",
            ("+", Some(_)) => "+0",
            (other, _) => other,
        };

        let store: i64 = match decimal_part {
            None => {
                let units = left_str
                    .parse::<i64>()
                    .map_err(|e| parse_error(e, s))?;
                units.checked_mul(SCALE).ok_or(AmountError::Overflow)?
            }
            Some(dec_str) => {
                // Checking for extra '.' and stray characters
                if !dec_str.chars().all(|c| c.is_ascii_digit()) {
                    Err(AmountError::Parse(s.into()))?
                }

                let mut dec_str = dec_str.to_owned();
                dec_str.truncate(DECIMALS);
                while dec_str.len() < DECIMALS {
                    dec_str.push('0');
                }

                format!("{left_str}{dec_str}")
                    .parse::<i64>()
                    .map_err(|e| parse_error(e, s))?
            }
        };

        Ok(Self { store })
    }
}

fn parse_error(err: ParseIntError, input: &str) -> AmountError {
    match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => AmountError::Overflow,
        _ => AmountError::Parse(input.into()),
    }
}

impl TryFrom<String> for Amount {
    type Error = AmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.store;
        let sign = if value < 0 { "-" } else { "" };
        let abs_val = value.unsigned_abs();

        let left_part = abs_val / SCALE as u64;
        let decimal_part = abs_val % SCALE as u64;

        let text = if decimal_part == 0 {
            format!("{sign}{left_part}")
        } else {
            let decimals = format!("{:04}", decimal_part);
            format!("{sign}{left_part}.{}", decimals.trim_end_matches('0'))
        };

        // Honour width/alignment flags
        f.pad(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::{Amount, AmountError};
    use std::str::FromStr;

    #[test]
    fn test_that_valid_string_can_be_parsed() {
        assert_eq!(Amount::from_str("0").unwrap().store, 0);
        assert_eq!(Amount::from_str("0.").unwrap().store, 0);
        assert_eq!(Amount::from_str(".0").unwrap().store, 0);
        assert_eq!(Amount::from_str("0.005").unwrap().store, 50);
        assert_eq!(Amount::from_str("5").unwrap().store, 50000);
        assert_eq!(Amount::from_str("5.1").unwrap().store, 51000);
        assert_eq!(Amount::from_str("5.123456").unwrap().store, 51234);
        assert_eq!(Amount::from_str(".05").unwrap().store, 500);
        assert_eq!(Amount::from_str("-.05").unwrap().store, -500);
        assert_eq!(Amount::from_str(" 1000 ").unwrap().store, 10_000_000);
        assert_eq!(
            Amount::from_str("-12345.1234567").unwrap().store,
            -123451234
        );
    }

    #[test]
    fn test_that_invalid_string_parsing_returns_error() {
        for input in [
            "test", "123.12test", "12test.123", "1 .1 2", "1.2.3", "-", "",
        ] {
            let amount = Amount::from_str(input);
            assert!(
                matches!(amount, Err(AmountError::Parse(_))),
                "{input:?} should not parse"
            );
        }

        // Max i64, will be * 10_000
        let amount = Amount::from_str("9223372036854775807");
        assert!(matches!(amount, Err(AmountError::Overflow)));
    }

    #[test]
    fn test_that_display_uses_plain_numeric_text() {
        assert_eq!(Amount::from(700).to_string(), "700");
        assert_eq!(Amount::from(-300).to_string(), "-300");
        assert_eq!("10.50".parse::<Amount>().unwrap().to_string(), "10.5");
        assert_eq!("-0.05".parse::<Amount>().unwrap().to_string(), "-0.05");
        assert_eq!(Amount::ZERO.to_string(), "0");
        assert_eq!(format!("{:>5}", Amount::from(42)), "   42");
    }

    #[test]
    fn test_that_amount_can_be_added_and_negated() {
        let a: Amount = "200.12".parse().unwrap();
        let b: Amount = "100.0023".parse().unwrap();

        assert_eq!((a + b).to_string(), "300.1223");
        assert_eq!((-a + b).to_string(), "-100.1177");
        assert_eq!((-a + -b).to_string(), "-300.1223");
    }

    #[test]
    fn test_that_ledger_sums_saturate() {
        let max: Amount = "922337203685477.5807".parse().unwrap();
        let min: Amount = "-922337203685477.5807".parse().unwrap();
        let step = Amount::from(123);

        assert_eq!(max + step, max);
        assert_eq!(-(min + -step), max);
        assert_eq!(vec![max, step, step].into_iter().sum::<Amount>(), max);
    }

    #[test]
    fn test_that_out_of_range_input_reports_overflow() {
        for input in [
            "9223372036854775808",
            "922337203685478.0",
            "-922337203685478.5",
            "99999999999999999999.1",
        ] {
            let amount = Amount::from_str(input);
            assert!(
                matches!(amount, Err(AmountError::Overflow)),
                "{input:?} should overflow"
            );
        }
    }

    #[test]
    fn test_that_amounts_sum() {
        let total: Amount = vec![Amount::from(1000), Amount::from(-300)].into_iter().sum();
        assert_eq!(total, Amount::from(700));
        assert_eq!(Amount::from(7).ten_thousandths(), 70_000);
    }
}
