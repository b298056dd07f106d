// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A calendar month used as a payroll period, stored as `YYYY-MM`.
///
/// Payroll rows carry the period itself rather than an arbitrary day
/// inside it, so the uniqueness rule on (employee, period) holds at the
/// storage level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PayPeriod {
    year: i32,
    month: u32,
}

impl PayPeriod {
    /// Creates a pay period from a year and a month.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPayPeriod` if the month is not in
    /// `1..=12` or the year is outside `1970..=9999`.
    pub fn new(year: i32, month: u32) -> Result<Self, DomainError> {
        if (1..=12).contains(&month) && (1970..=9999).contains(&year) {
            Ok(Self { year, month })
        } else {
            Err(DomainError::InvalidPayPeriod(format!("{year:04}-{month:02}")))
        }
    }

    /// Returns the pay period containing the given date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the year component.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month component, `1..=12`.
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Returns the first day of this period.
    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        // The month is validated in new(), so day 1 always exists.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Returns whether the given date falls inside this period.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.year == date.year() && self.month == date.month()
    }
}

impl FromStr for PayPeriod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidPayPeriod(s.to_string());
        let (year_part, month_part) = s.split_once('-').ok_or_else(invalid)?;
        if year_part.len() != 4 || month_part.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year_part.parse().map_err(|_| invalid())?;
        let month: u32 = month_part.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl std::fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl TryFrom<String> for PayPeriod {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PayPeriod> for String {
    fn from(period: PayPeriod) -> Self {
        period.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display_round_trip() {
        let period: PayPeriod = "2026-03".parse().unwrap();
        assert_eq!(period.year(), 2026);
        assert_eq!(period.month(), 3);
        assert_eq!(period.to_string(), "2026-03");
    }

    #[test]
    fn test_parse_rejects_malformed_values() {
        for bad in ["2026", "2026-13", "2026-00", "26-03", "2026-3", "2026-03-01", "abcd-ef"] {
            assert!(PayPeriod::from_str(bad).is_err(), "accepted: {bad}");
        }
    }

    #[test]
    fn test_first_day() {
        let period: PayPeriod = PayPeriod::new(2026, 2).unwrap();
        assert_eq!(
            period.first_day(),
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
        );
    }

    #[test]
    fn test_from_date_and_contains() {
        let date: NaiveDate = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();
        let period: PayPeriod = PayPeriod::from_date(date);
        assert_eq!(period.to_string(), "2026-08");
        assert!(period.contains(date));
        assert!(!period.contains(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()));
    }

    #[test]
    fn test_ordering_is_chronological() {
        let earlier: PayPeriod = "2025-12".parse().unwrap();
        let later: PayPeriod = "2026-01".parse().unwrap();
        assert!(earlier < later);
    }
}
