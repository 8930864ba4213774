mod common;

use bookkeeping_core::errors::LedgerError;
use bookkeeping_core::ledger::{resolve_range, CreditorKind, DateRange, PeriodFilter};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use common::{at, txn};
use rust_decimal::dec;

fn instant(date: (i32, u32, u32), h: u32, m: u32, s: u32, ms: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(date.0, date.1, date.2)
        .unwrap()
        .and_hms_milli_opt(h, m, s, ms)
        .unwrap()
}

#[test]
fn select_month_is_zero_based_and_leap_aware() {
    let filter = PeriodFilter::SelectMonth {
        year: 2024,
        month: 1,
    };
    let range = resolve_range(&filter, at(2025, 6, 15, 8)).unwrap();
    assert_eq!(range.start, Some(instant((2024, 2, 1), 0, 0, 0, 0)));
    assert_eq!(range.end, Some(instant((2024, 2, 29), 23, 59, 59, 999)));
}

#[test]
fn select_month_rolls_into_next_year() {
    let range = PeriodFilter::SelectMonth {
        year: 2023,
        month: 12,
    }
    .resolve(at(2025, 1, 1, 0))
    .unwrap();
    assert_eq!(range.start, Some(instant((2024, 1, 1), 0, 0, 0, 0)));
    assert_eq!(range.end, Some(instant((2024, 1, 31), 23, 59, 59, 999)));
}

#[test]
fn today_covers_the_whole_local_day() {
    let range = PeriodFilter::Today.resolve(at(2024, 3, 5, 14)).unwrap();
    assert_eq!(range.start, Some(instant((2024, 3, 5), 0, 0, 0, 0)));
    assert_eq!(range.end, Some(instant((2024, 3, 5), 23, 59, 59, 999)));
}

#[test]
fn sunday_belongs_to_the_week_that_started_monday() {
    // 2024-03-10 is a Sunday.
    let range = PeriodFilter::Week.resolve(at(2024, 3, 10, 18)).unwrap();
    assert_eq!(range.start, Some(instant((2024, 3, 4), 0, 0, 0, 0)));
    assert_eq!(range.end, Some(instant((2024, 3, 10), 23, 59, 59, 999)));

    let monday = PeriodFilter::Week.resolve(at(2024, 3, 4, 1)).unwrap();
    assert_eq!(monday.start, Some(instant((2024, 3, 4), 0, 0, 0, 0)));
}

#[test]
fn month_and_year_use_calendar_bounds() {
    let now = at(2023, 2, 14, 9);
    let month = PeriodFilter::Month.resolve(now).unwrap();
    assert_eq!(month.end, Some(instant((2023, 2, 28), 23, 59, 59, 999)));
    let year = PeriodFilter::Year.resolve(now).unwrap();
    assert_eq!(year.start, Some(instant((2023, 1, 1), 0, 0, 0, 0)));
    assert_eq!(year.end, Some(instant((2023, 12, 31), 23, 59, 59, 999)));
    let selected = PeriodFilter::SelectYear { year: 2020 }.resolve(now).unwrap();
    assert_eq!(selected.end, Some(instant((2020, 12, 31), 23, 59, 59, 999)));
}

#[test]
fn custom_without_dates_matches_all() {
    let now = at(2024, 7, 1, 12);
    let custom = PeriodFilter::Custom {
        start_date: None,
        end_date: None,
    };
    assert_eq!(custom.resolve(now).unwrap(), PeriodFilter::All.resolve(now).unwrap());
    assert!(custom.resolve(now).unwrap().is_unbounded());
}

#[test]
fn custom_accepts_open_ranges() {
    let range = PeriodFilter::Custom {
        start_date: NaiveDate::from_ymd_opt(2024, 1, 10),
        end_date: None,
    }
    .resolve(at(2024, 7, 1, 12))
    .unwrap();
    assert_eq!(range.start, Some(instant((2024, 1, 10), 0, 0, 0, 0)));
    assert_eq!(range.end, None);
    assert!(range.contains(at(2099, 1, 1, 0)));
    assert!(!range.contains(at(2024, 1, 9, 23)));
}

#[test]
fn bounds_are_inclusive_to_the_millisecond() {
    let range = PeriodFilter::Today.resolve(at(2024, 3, 5, 14)).unwrap();
    let start = range.start.unwrap();
    let end = range.end.unwrap();
    assert!(range.contains(start));
    assert!(range.contains(end));
    assert!(!range.contains(start - Duration::milliseconds(1)));
    assert!(!range.contains(end + Duration::milliseconds(1)));
}

#[test]
fn select_keeps_only_in_range_transactions() {
    let txns = vec![
        txn(1, 1, CreditorKind::Borrow, dec!(10), at(2024, 1, 31, 23)),
        txn(2, 1, CreditorKind::Borrow, dec!(20), at(2024, 2, 1, 0)),
        txn(3, 1, CreditorKind::Repay, dec!(5), at(2024, 2, 29, 23)),
        txn(4, 1, CreditorKind::Repay, dec!(1), at(2024, 3, 1, 0)),
    ];
    let range = PeriodFilter::SelectMonth {
        year: 2024,
        month: 1,
    }
    .resolve(at(2024, 6, 1, 0))
    .unwrap();
    let ids: Vec<i64> = range.select(&txns).map(|t| t.id).collect();
    assert_eq!(ids, vec![2, 3]);
    assert_eq!(DateRange::unbounded().select(&txns).count(), 4);
}

#[test]
fn query_params_format_both_bounds() {
    let range = PeriodFilter::Today.resolve(at(2024, 3, 5, 14)).unwrap();
    assert_eq!(
        range.query_params(),
        vec![
            ("start_date", "2024-03-05T00:00:00.000".to_string()),
            ("end_date", "2024-03-05T23:59:59.999".to_string()),
        ]
    );
    assert!(DateRange::unbounded().query_params().is_empty());
}

#[test]
fn filters_deserialize_from_mode_tags() {
    let filter: PeriodFilter =
        serde_json::from_str(r#"{"mode":"select_month","year":2024,"month":11}"#).unwrap();
    assert_eq!(
        filter,
        PeriodFilter::SelectMonth {
            year: 2024,
            month: 11
        }
    );
    let custom: PeriodFilter =
        serde_json::from_str(r#"{"mode":"custom","end_date":"2024-02-01"}"#).unwrap();
    assert_eq!(custom.mode(), "custom");
    let all: PeriodFilter = serde_json::from_str(r#"{"mode":"all"}"#).unwrap();
    assert_eq!(all, PeriodFilter::default());
}

#[test]
fn out_of_range_year_is_an_error() {
    let err = PeriodFilter::SelectYear { year: 400_000 }
        .resolve(at(2024, 1, 1, 0))
        .expect_err("beyond the calendar");
    assert!(matches!(err, LedgerError::InvalidPeriod(_)));
}
