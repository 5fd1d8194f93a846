//! Amount type for monetary values.
//!
//! Amounts are plain floating point currency units. Sums use ordinary `f64` addition with no
//! rounding, so precision loss across very large ledgers is accepted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// Represents an amount of money in currency units.
///
/// Serializes as a bare JSON number, e.g. `1000` or `12.5`.
///
/// ```
/// # use budget_tracker::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("1,250.50").unwrap();
/// assert_eq!(amount.value(), 1250.5);
/// assert_eq!(amount.to_string(), "1250.5");
/// assert_eq!(amount.display_with("₱"), "₱1,250.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    pub const ZERO: Amount = Amount(0.0);

    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0.0
    }

    /// An amount can be admitted to the store only if it is a finite, positive number. Whether it
    /// counts as income or expense is carried by the transaction type, never by the sign.
    pub fn is_valid(&self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }

    /// Formats the amount with a currency symbol and thousands separators, e.g. `-₱1,000.00`.
    pub fn display_with(&self, symbol: &str) -> String {
        let (sign, num) = if self.is_negative() {
            ("-", self.0.abs())
        } else {
            ("", self.0)
        };
        format!("{sign}{symbol}{}", format_num::format_num!(",.2", num))
    }
}

/// Prints the shortest representation of the value, e.g. `1000` or `12.5`. This is the form used
/// in the CSV report.
impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for Amount {
    type Err = std::num::ParseFloatError;

    /// Thousands separators are removed before parsing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned = s.trim().replace(',', "");
        Ok(Self(f64::from_str(&cleaned)?))
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount(value)
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount(self.0 - rhs.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, |a, b| a + b)
    }
}
