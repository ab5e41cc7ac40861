//! Monthly revenue series computation.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use rtnet_shared::PeriodMonth;

use super::types::RevenuePoint;

/// Maximum number of points in the revenue series.
pub const SERIES_MONTHS: usize = 12;

/// Groups payment rows by period-month, sums each group, and returns the
/// points sorted ascending by period.
///
/// The grouping key is derived from the stored period date, so the result
/// does not depend on any storage engine's date-formatting functions. The
/// caller windows the input to the last 12 months; if more groups show up
/// anyway, the most recent [`SERIES_MONTHS`] are kept.
pub fn monthly_series<I>(rows: I) -> Vec<RevenuePoint>
where
    I: IntoIterator<Item = (PeriodMonth, Decimal)>,
{
    let mut totals: BTreeMap<PeriodMonth, Decimal> = BTreeMap::new();
    for (period, amount) in rows {
        *totals.entry(period).or_insert(Decimal::ZERO) += amount;
    }

    let mut points: Vec<RevenuePoint> = totals
        .into_iter()
        .map(|(period, total)| RevenuePoint {
            month: period.label(),
            total,
        })
        .collect();

    if points.len() > SERIES_MONTHS {
        points.drain(..points.len() - SERIES_MONTHS);
    }

    points
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
