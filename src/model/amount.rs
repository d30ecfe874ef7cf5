//! Fixed-point LBC amounts.
//!
//! The daemon reports amounts as decimal strings with up to eight fractional
//! digits. `Lbc` keeps them as integer dewies so support arithmetic is exact.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const DEWIES_PER_LBC: i64 = 100_000_000;
const FRACTION_DIGITS: usize = 8;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("empty amount")]
    Empty,
    #[error("invalid amount: {0}")]
    Invalid(String),
    #[error("amount out of range: {0}")]
    Overflow(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lbc(i64);

impl Lbc {
    pub const ZERO: Lbc = Lbc(0);
    /// Smallest representable nonzero amount (10^-8).
    pub const MIN_UNIT: Lbc = Lbc(1);

    pub const fn from_dewies(dewies: i64) -> Self {
        Lbc(dewies)
    }

    pub const fn dewies(self) -> i64 {
        self.0
    }

    pub fn from_whole(lbc: i64) -> Self {
        Lbc(lbc.saturating_mul(DEWIES_PER_LBC))
    }

    /// Rounds to the nearest dewey.
    pub fn from_f64(value: f64) -> Result<Self, AmountError> {
        if !value.is_finite() {
            return Err(AmountError::Invalid(value.to_string()));
        }
        let dewies = (value * DEWIES_PER_LBC as f64).round();
        if dewies.abs() >= i64::MAX as f64 {
            return Err(AmountError::Overflow(value.to_string()));
        }
        Ok(Lbc(dewies as i64))
    }

    /// Parses like `from_str` and also reports whether nonzero digits past
    /// the eighth decimal were dropped.
    pub fn parse_truncating(s: &str) -> Result<(Lbc, bool), AmountError> {
        let amount = s.parse()?;
        let dropped = s
            .trim()
            .split_once('.')
            .is_some_and(|(_, frac)| frac.bytes().skip(FRACTION_DIGITS).any(|b| b != b'0'));
        Ok((amount, dropped))
    }

    /// Whole part, truncated toward zero.
    pub fn whole(self) -> i64 {
        self.0 / DEWIES_PER_LBC
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// `max(0, self - other)`
    pub fn saturating_excess(self, other: Lbc) -> Lbc {
        Lbc((self.0 - other.0).max(0))
    }

    pub fn clamp_non_negative(self) -> Lbc {
        Lbc(self.0.max(0))
    }
}

impl fmt::Display for Lbc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let unit = DEWIES_PER_LBC as u64;
        write!(
            f,
            "{}{}.{:0width$}",
            sign,
            abs / unit,
            abs % unit,
            width = FRACTION_DIGITS
        )
    }
}

impl FromStr for Lbc {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AmountError::Empty);
        }

        let (negative, digits) = match s.as_bytes()[0] {
            b'-' => (true, &s[1..]),
            b'+' => (false, &s[1..]),
            _ => (false, s),
        };

        let (whole, frac) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(AmountError::Invalid(s.to_string()));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(AmountError::Invalid(s.to_string()));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| AmountError::Overflow(s.to_string()))?
        };

        // Digits past the eighth are truncated.
        let mut frac_digits: String = frac.chars().take(FRACTION_DIGITS).collect();
        while frac_digits.len() < FRACTION_DIGITS {
            frac_digits.push('0');
        }
        let frac: i64 = frac_digits
            .parse()
            .map_err(|_| AmountError::Invalid(s.to_string()))?;

        let dewies = whole
            .checked_mul(DEWIES_PER_LBC)
            .and_then(|w| w.checked_add(frac))
            .ok_or_else(|| AmountError::Overflow(s.to_string()))?;

        Ok(Lbc(if negative { -dewies } else { dewies }))
    }
}

impl Add for Lbc {
    type Output = Lbc;
    fn add(self, rhs: Lbc) -> Lbc {
        Lbc(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Lbc {
    type Output = Lbc;
    fn sub(self, rhs: Lbc) -> Lbc {
        Lbc(self.0.saturating_sub(rhs.0))
    }
}

impl AddAssign for Lbc {
    fn add_assign(&mut self, rhs: Lbc) {
        *self = *self + rhs;
    }
}

impl SubAssign for Lbc {
    fn sub_assign(&mut self, rhs: Lbc) {
        *self = *self - rhs;
    }
}

impl Neg for Lbc {
    type Output = Lbc;
    fn neg(self) -> Lbc {
        Lbc(self.0.saturating_neg())
    }
}

impl Sum for Lbc {
    fn sum<I: Iterator<Item = Lbc>>(iter: I) -> Lbc {
        iter.fold(Lbc::ZERO, |acc, x| acc + x)
    }
}

impl Serialize for Lbc {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Lbc {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
            Float(f64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
            Raw::Int(n) => Ok(Lbc::from_whole(n)),
            Raw::Float(x) => Lbc::from_f64(x).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
#[path = "../tests/model/amount_tests.rs"]
mod tests;
