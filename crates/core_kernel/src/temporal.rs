//! Billing calendar types
//!
//! Fees are billed per calendar month. A [`BillingMonth`] is a (year, month)
//! cursor that rolls over into January of the next year after December.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// English month names, January first
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Returns the English name of a 1-based month number
pub fn month_name(month: u32) -> Result<&'static str, TemporalError> {
    if !(1..=12).contains(&month) {
        return Err(TemporalError::InvalidMonth(month));
    }
    Ok(MONTH_NAMES[(month - 1) as usize])
}

/// Latest year a billing month may start in
///
/// One below chrono's last representable year, so every month of a cycle
/// starting here still has real dates.
pub fn max_billing_year() -> i32 {
    NaiveDate::MAX.year() - 1
}

/// Errors related to calendar operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),

    #[error("Invalid year: {0} (expected 1-{max})", max = max_billing_year())]
    InvalidYear(i32),

    #[error("Invalid date: {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
}

/// A calendar month in a specific year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BillingMonth {
    // Field order gives chronological Ord.
    year: i32,
    month: u32,
}

impl BillingMonth {
    /// Creates a billing month, validating the month number and year
    /// (1 to [`max_billing_year`])
    pub fn new(year: i32, month: u32) -> Result<Self, TemporalError> {
        if !(1..=12).contains(&month) {
            return Err(TemporalError::InvalidMonth(month));
        }
        if year <= 0 || year > max_billing_year() {
            return Err(TemporalError::InvalidYear(year));
        }
        Ok(Self { year, month })
    }

    /// The billing month containing a date
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// English name of this month
    pub fn name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// The following month, rolling into January of the next year
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The month `n` months after this one
    pub fn plus_months(&self, n: u32) -> Self {
        let zero_based = self.month - 1 + n;
        Self {
            year: self.year + (zero_based / 12) as i32,
            month: zero_based % 12 + 1,
        }
    }

    /// Iterator over `count` consecutive months starting with this one
    pub fn iter(&self, count: u32) -> impl Iterator<Item = BillingMonth> {
        let start = *self;
        (0..count).map(move |n| start.plus_months(n))
    }

    /// The given day of this month as a date
    pub fn day(&self, day: u32) -> Result<NaiveDate, TemporalError> {
        NaiveDate::from_ymd_opt(self.year, self.month, day).ok_or(TemporalError::InvalidDate {
            year: self.year,
            month: self.month,
            day,
        })
    }
}

impl fmt::Display for BillingMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.year)
    }
}
