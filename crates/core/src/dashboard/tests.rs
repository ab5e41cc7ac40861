//! Tests for the monthly revenue series computation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use rtnet_shared::PeriodMonth;

use super::{SERIES_MONTHS, monthly_series};

fn period(y: i32, m: u32) -> PeriodMonth {
    PeriodMonth::from_date(NaiveDate::from_ymd_opt(y, m, 1).unwrap())
}

#[test]
fn empty_input_yields_empty_series() {
    assert!(monthly_series(Vec::new()).is_empty());
}

#[test]
fn same_period_rows_are_summed_across_clients() {
    let rows = vec![
        (period(2026, 7), dec!(150000)),
        (period(2026, 7), dec!(250000)),
        (period(2026, 6), dec!(150000)),
    ];

    let points = monthly_series(rows);

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].month, "2026-06");
    assert_eq!(points[0].total, dec!(150000));
    assert_eq!(points[1].month, "2026-07");
    assert_eq!(points[1].total, dec!(400000));
}

#[test]
fn sorted_ascending_across_year_boundary() {
    let rows = vec![
        (period(2026, 1), dec!(100)),
        (period(2025, 12), dec!(200)),
        (period(2025, 11), dec!(300)),
    ];

    let months: Vec<String> = monthly_series(rows).into_iter().map(|p| p.month).collect();

    assert_eq!(months, vec!["2025-11", "2025-12", "2026-01"]);
}

#[test]
fn keeps_the_most_recent_twelve_periods() {
    let base = period(2025, 1);
    let rows: Vec<_> = (0..18u32)
        .map(|i| {
            let first_day = base
                .first_day()
                .checked_add_months(chrono::Months::new(i))
                .unwrap();
            (PeriodMonth::from_date(first_day), dec!(1000))
        })
        .collect();

    let points = monthly_series(rows);

    assert_eq!(points.len(), SERIES_MONTHS);
    assert_eq!(points.first().unwrap().month, "2025-07");
    assert_eq!(points.last().unwrap().month, "2026-06");
}

prop_compose! {
    /// A payment row within an 12-period window starting at 2025-01.
    fn row_strategy()(offset in 0u32..12, cents in 0i64..100_000_000) -> (PeriodMonth, Decimal) {
        (period(2025, 1).first_day().checked_add_months(chrono::Months::new(offset))
            .map(PeriodMonth::from_date)
            .unwrap(),
         Decimal::new(cents, 2))
    }
}

proptest! {
    /// Series is sorted ascending and capped at 12 points.
    #[test]
    fn prop_sorted_and_capped(rows in prop::collection::vec(row_strategy(), 0..64)) {
        let points = monthly_series(rows);

        prop_assert!(points.len() <= SERIES_MONTHS);
        prop_assert!(points.windows(2).all(|w| w[0].month < w[1].month));
    }

    /// Each point's total equals the sum of amounts for exactly that period.
    #[test]
    fn prop_totals_match_per_period_sums(rows in prop::collection::vec(row_strategy(), 0..64)) {
        let points = monthly_series(rows.clone());

        for point in &points {
            let expected: Decimal = rows
                .iter()
                .filter(|(p, _)| p.label() == point.month)
                .map(|(_, amount)| *amount)
                .sum();
            prop_assert_eq!(point.total, expected);
        }

        // Nothing is dropped inside the window: every input period appears.
        let input_periods: std::collections::BTreeSet<String> =
            rows.iter().map(|(p, _)| p.label()).collect();
        prop_assert_eq!(points.len(), input_periods.len());
    }
}
