//! Month-bucketed totals for dashboard trend charts.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::period::{first_of_month, DateRange};
use super::transaction::Transaction;
use crate::errors::LedgerError;

/// Upper bound on buckets produced for a closed range, roughly a century of months.
const MAX_BUCKETS: usize = 1200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBucket {
    pub year: i32,
    /// Calendar month, `1..=12`.
    pub month: u32,
    pub amount: Decimal,
}

impl MonthBucket {
    fn empty(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            amount: Decimal::ZERO,
        }
    }

    /// Short label such as `Feb 2024`.
    pub fn label(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|date| date.format("%b %Y").to_string())
            .unwrap_or_else(|| format!("{:04}-{:02}", self.year, self.month))
    }

    fn key(&self) -> (i32, u32) {
        (self.year, self.month)
    }
}

fn month_key(at: NaiveDateTime) -> (i32, u32) {
    (at.year(), at.month())
}

/// Sums amounts per calendar month over the transactions inside `range`.
///
/// A range closed on both sides yields every month it spans, zero-filled.
/// Otherwise only months with activity are returned. Buckets are ascending.
pub fn monthly_totals<'a, K: 'a, I>(
    transactions: I,
    range: &DateRange,
) -> Result<Vec<MonthBucket>, LedgerError>
where
    I: IntoIterator<Item = &'a Transaction<K>>,
{
    let mut sums: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();
    for txn in range.select(transactions) {
        *sums.entry(month_key(txn.occurred_at)).or_insert(Decimal::ZERO) += txn.amount;
    }

    let (start, end) = match (range.start, range.end) {
        (Some(start), Some(end)) if start <= end => (start, end),
        _ => {
            return Ok(sums
                .into_iter()
                .map(|((year, month), amount)| MonthBucket {
                    year,
                    month,
                    amount,
                })
                .collect())
        }
    };

    let mut buckets = month_span(month_key(start), month_key(end))?;
    for bucket in &mut buckets {
        if let Some(amount) = sums.get(&bucket.key()) {
            bucket.amount = *amount;
        }
    }
    Ok(buckets)
}

/// The last `count` calendar months ending with the month of `now`, zero-filled.
pub fn trailing_months<'a, K: 'a, I>(
    transactions: I,
    now: NaiveDateTime,
    count: u32,
) -> Result<Vec<MonthBucket>, LedgerError>
where
    I: IntoIterator<Item = &'a Transaction<K>>,
{
    if count == 0 {
        return Ok(Vec::new());
    }
    let span = i32::try_from(count)
        .map_err(|_| LedgerError::InvalidPeriod(format!("{count} months is too many")))?;
    let first = first_of_month(now.year(), now.month0() as i32 - (span - 1))?;
    let mut buckets = month_span((first.year(), first.month()), month_key(now))?;
    let index: BTreeMap<(i32, u32), usize> = buckets
        .iter()
        .enumerate()
        .map(|(idx, bucket)| (bucket.key(), idx))
        .collect();
    for txn in transactions {
        if let Some(idx) = index.get(&month_key(txn.occurred_at)) {
            buckets[*idx].amount += txn.amount;
        }
    }
    Ok(buckets)
}

fn month_span(from: (i32, u32), to: (i32, u32)) -> Result<Vec<MonthBucket>, LedgerError> {
    let mut buckets = Vec::new();
    let (mut year, mut month) = from;
    while (year, month) <= to {
        if buckets.len() >= MAX_BUCKETS {
            return Err(LedgerError::InvalidPeriod(format!(
                "range {}-{:02}..{}-{:02} spans more than {MAX_BUCKETS} months",
                from.0, from.1, to.0, to.1
            )));
        }
        buckets.push(MonthBucket::empty(year, month));
        if month == 12 {
            year += 1;
            month = 1;
        } else {
            month += 1;
        }
    }
    Ok(buckets)
}
