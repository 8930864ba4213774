//! Named period selections resolved to inclusive local-time ranges.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::transaction::Transaction;
use crate::errors::LedgerError;

const QUERY_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Period selection as offered by every list and dashboard page.
///
/// `SelectMonth::month` is zero based (`0` = January) and rolls over year
/// boundaries in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PeriodFilter {
    #[default]
    All,
    Today,
    Week,
    Month,
    Year,
    SelectMonth {
        year: i32,
        month: i32,
    },
    SelectYear {
        year: i32,
    },
    Custom {
        #[serde(default)]
        start_date: Option<NaiveDate>,
        #[serde(default)]
        end_date: Option<NaiveDate>,
    },
}

/// Inclusive instant range; a missing bound leaves that side open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DateRange {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl PeriodFilter {
    pub fn mode(&self) -> &'static str {
        match self {
            PeriodFilter::All => "all",
            PeriodFilter::Today => "today",
            PeriodFilter::Week => "week",
            PeriodFilter::Month => "month",
            PeriodFilter::Year => "year",
            PeriodFilter::SelectMonth { .. } => "select_month",
            PeriodFilter::SelectYear { .. } => "select_year",
            PeriodFilter::Custom { .. } => "custom",
        }
    }

    /// Resolves the filter against the local wall-clock `now`.
    pub fn resolve(&self, now: NaiveDateTime) -> Result<DateRange, LedgerError> {
        let today = now.date();
        let range = match self {
            PeriodFilter::All => DateRange::unbounded(),
            PeriodFilter::Today => DateRange::closed(start_of_day(today), end_of_day(today)?),
            PeriodFilter::Week => {
                // Sunday counts as the seventh day of the week that began on Monday.
                let back = today.weekday().num_days_from_monday() as i64;
                let monday = today - Duration::days(back);
                DateRange::closed(start_of_day(monday), end_of_day(today)?)
            }
            PeriodFilter::Month => month_range(today.year(), today.month0() as i32)?,
            PeriodFilter::Year => year_range(today.year())?,
            PeriodFilter::SelectMonth { year, month } => month_range(*year, *month)?,
            PeriodFilter::SelectYear { year } => year_range(*year)?,
            PeriodFilter::Custom {
                start_date,
                end_date,
            } => DateRange {
                start: start_date.map(start_of_day),
                end: end_date.map(end_of_day).transpose()?,
            },
        };
        tracing::debug!(mode = self.mode(), ?range, "resolved period filter");
        Ok(range)
    }
}

/// Free-function form of [`PeriodFilter::resolve`].
pub fn resolve_range(filter: &PeriodFilter, now: NaiveDateTime) -> Result<DateRange, LedgerError> {
    filter.resolve(now)
}

impl DateRange {
    pub fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    pub fn closed(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start.map_or(true, |start| at >= start) && self.end.map_or(true, |end| at <= end)
    }

    /// Narrows `transactions` to those occurring inside the range.
    pub fn select<'a, K: 'a, I>(&self, transactions: I) -> impl Iterator<Item = &'a Transaction<K>>
    where
        I: IntoIterator<Item = &'a Transaction<K>>,
    {
        let range = *self;
        transactions
            .into_iter()
            .filter(move |txn| range.contains(txn.occurred_at))
    }

    /// `start_date` / `end_date` pairs for list endpoints that filter server side.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(start) = self.start {
            params.push(("start_date", start.format(QUERY_FORMAT).to_string()));
        }
        if let Some(end) = self.end {
            params.push(("end_date", end.format(QUERY_FORMAT).to_string()));
        }
        params
    }
}

pub(crate) fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

pub(crate) fn end_of_day(date: NaiveDate) -> Result<NaiveDateTime, LedgerError> {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .ok_or_else(|| LedgerError::InvalidPeriod(format!("no end of day for {date}")))
}

/// First day of the month `month0` months after January of `year`.
pub(crate) fn first_of_month(year: i32, month0: i32) -> Result<NaiveDate, LedgerError> {
    let year = year
        .checked_add(month0.div_euclid(12))
        .ok_or_else(|| LedgerError::InvalidPeriod(format!("year overflow for {year}")))?;
    let month = month0.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| LedgerError::InvalidPeriod(format!("{year}-{month:02} is out of range")))
}

pub(crate) fn last_of_month(first: NaiveDate) -> Result<NaiveDate, LedgerError> {
    let next = first_of_month(first.year(), first.month0() as i32 + 1)?;
    next.pred_opt()
        .ok_or_else(|| LedgerError::InvalidPeriod(format!("no day before {next}")))
}

fn month_range(year: i32, month0: i32) -> Result<DateRange, LedgerError> {
    let first = first_of_month(year, month0)?;
    let last = last_of_month(first)?;
    Ok(DateRange::closed(start_of_day(first), end_of_day(last)?))
}

fn year_range(year: i32) -> Result<DateRange, LedgerError> {
    let first = first_of_month(year, 0)?;
    let last = first_of_month(year, 11).and_then(last_of_month)?;
    Ok(DateRange::closed(start_of_day(first), end_of_day(last)?))
}
