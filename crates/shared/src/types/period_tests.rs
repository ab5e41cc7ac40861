//! Tests for period-month normalization and arithmetic.

use chrono::NaiveDate;
use rstest::rstest;

use super::PeriodMonth;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[rstest]
#[case(date(2026, 7, 1), date(2026, 7, 1))]
#[case(date(2026, 7, 15), date(2026, 7, 1))]
#[case(date(2026, 12, 31), date(2026, 12, 1))]
#[case(date(2024, 2, 29), date(2024, 2, 1))]
fn normalizes_to_first_of_month(#[case] input: NaiveDate, #[case] expected: NaiveDate) {
    assert_eq!(PeriodMonth::from_date(input).first_day(), expected);
}

#[test]
fn normalization_is_idempotent() {
    let period = PeriodMonth::from_date(date(2026, 7, 15));
    assert_eq!(PeriodMonth::from_date(period.first_day()), period);
}

#[test]
fn next_crosses_year_boundary() {
    let december = PeriodMonth::from_date(date(2025, 12, 20));
    assert_eq!(december.next().first_day(), date(2026, 1, 1));
}

#[test]
fn months_back_spans_years() {
    let current = PeriodMonth::from_date(date(2026, 2, 10));
    assert_eq!(current.months_back(11).first_day(), date(2025, 3, 1));
    assert_eq!(current.months_back(0), current);
}

#[test]
fn label_is_zero_padded() {
    assert_eq!(PeriodMonth::from_date(date(2026, 3, 9)).label(), "2026-03");
    assert_eq!(PeriodMonth::from_date(date(2026, 11, 9)).label(), "2026-11");
}

#[test]
fn orders_chronologically() {
    let older = PeriodMonth::from_date(date(2025, 12, 1));
    let newer = PeriodMonth::from_date(date(2026, 1, 1));
    assert!(older < newer);
}
