// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// A US-dollar amount held as whole cents.
///
/// Amounts are integers to keep arithmetic exact; display adds the
/// dollar sign, thousands separators, and two decimal places, so
/// 500000 cents renders as `$5,000.00`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money {
    cents: i64,
}

impl Money {
    /// The fixed gross salary disbursed per employee in a payroll run.
    pub const MONTHLY_SALARY: Self = Self::from_cents(500_000);

    /// Creates an amount from whole cents.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Creates an amount from whole dollars.
    #[must_use]
    pub const fn from_dollars(dollars: i64) -> Self {
        Self {
            cents: dollars * 100,
        }
    }

    /// Returns the amount in cents.
    #[must_use]
    pub const fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the sum of two amounts, saturating at the numeric bounds.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self {
            cents: self.cents.saturating_add(other.cents),
        }
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::from_cents(0), Self::saturating_add)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign: &str = if self.cents < 0 { "-" } else { "" };
        let magnitude: u64 = self.cents.unsigned_abs();
        let dollars: u64 = magnitude / 100;
        let cents: u64 = magnitude % 100;
        let digits: String = dollars.to_string();
        let mut grouped: String = String::with_capacity(digits.len() + digits.len() / 3);
        for (index, ch) in digits.chars().enumerate() {
            if index > 0 && (digits.len() - index) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        write!(f, "{sign}${grouped}.{cents:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Money::from_cents(500_000).to_string(), "$5,000.00");
        assert_eq!(Money::from_cents(123_456_789).to_string(), "$1,234,567.89");
    }

    #[test]
    fn test_display_small_amounts() {
        assert_eq!(Money::from_cents(0).to_string(), "$0.00");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::from_cents(999).to_string(), "$9.99");
    }

    #[test]
    fn test_display_negative_amounts() {
        assert_eq!(Money::from_cents(-150_000).to_string(), "-$1,500.00");
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::MONTHLY_SALARY; 3].into_iter().sum();
        assert_eq!(total, Money::from_cents(1_500_000));
        assert_eq!(total.to_string(), "$15,000.00");
    }

    #[test]
    fn test_from_dollars() {
        assert_eq!(Money::from_dollars(5_000), Money::MONTHLY_SALARY);
    }
}
