//! Period-month: the grouping and uniqueness key for payments.

use std::fmt;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar month, represented as the first day of that month.
///
/// Payments are keyed by the month they pay for; at most one payment may
/// exist per (client, period) pair. Storing the normalized first-of-month
/// date keeps the key portable across storage engines - no date-formatting
/// SQL functions are needed to group by it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PeriodMonth(NaiveDate);

impl PeriodMonth {
    /// Normalizes a date to the period-month containing it.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        // Day 1 is valid for every month; the fallback is unreachable.
        Self(date.with_day(1).unwrap_or(date))
    }

    /// The first day of this period, as stored in the database.
    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.0
    }

    /// The first day of the following period (exclusive upper bound for
    /// range queries over this period).
    #[must_use]
    pub fn next(self) -> Self {
        self.0
            .checked_add_months(Months::new(1))
            .map_or(self, Self::from_date)
    }

    /// The period `months` months before this one.
    #[must_use]
    pub fn months_back(self, months: u32) -> Self {
        self.0
            .checked_sub_months(Months::new(months))
            .map_or(self, Self::from_date)
    }

    /// The `YYYY-MM` label used in the revenue series payload.
    #[must_use]
    pub fn label(self) -> String {
        format!("{:04}-{:02}", self.0.year(), self.0.month())
    }
}

impl fmt::Display for PeriodMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl From<NaiveDate> for PeriodMonth {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

#[cfg(test)]
#[path = "period_tests.rs"]
mod tests;
