//! Balance, running-balance and per-kind reductions shared by every ledger page.
//!
//! All functions are pure over already-fetched records. Amounts are trusted:
//! validation happens when records are built (see [`crate::ledger::wire`]).

use std::collections::BTreeMap;
use std::hash::Hash;
use std::iter::FusedIterator;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::polarity::{Polarity, Sign};
use super::transaction::{Transaction, TransactionId};

/// One step of a running balance, suitable for a balance-over-time chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalancePoint {
    pub transaction_id: TransactionId,
    pub occurred_at: NaiveDateTime,
    pub balance: Decimal,
}

/// Signed sum of `transactions` under `polarity`. Order independent.
pub fn compute_balance<'a, K, I>(transactions: I, polarity: &Polarity<K>) -> Decimal
where
    K: Eq + Hash + 'a,
    I: IntoIterator<Item = &'a Transaction<K>>,
{
    transactions
        .into_iter()
        .map(|txn| polarity.signed_amount(txn))
        .sum()
}

/// Chronological running balance, one point per transaction.
///
/// Transactions are ordered by `occurred_at`; equal timestamps keep their input order.
pub fn running_series<'a, K, I>(transactions: I, polarity: &'a Polarity<K>) -> RunningSeries<'a, K>
where
    K: Eq + Hash + 'a,
    I: IntoIterator<Item = &'a Transaction<K>>,
{
    let mut ordered: Vec<&'a Transaction<K>> = transactions.into_iter().collect();
    ordered.sort_by_key(|txn| txn.occurred_at);
    RunningSeries {
        ordered: ordered.into_iter(),
        polarity,
        balance: Decimal::ZERO,
    }
}

/// Lazily accumulates balances over a pre-sorted set of transactions.
///
/// Consumed once; call [`running_series`] again after the data changes.
#[derive(Debug)]
pub struct RunningSeries<'a, K: Eq + Hash> {
    ordered: std::vec::IntoIter<&'a Transaction<K>>,
    polarity: &'a Polarity<K>,
    balance: Decimal,
}

impl<K: Eq + Hash> RunningSeries<'_, K> {
    /// Balance accumulated by the points yielded so far.
    pub fn current_balance(&self) -> Decimal {
        self.balance
    }
}

impl<K: Eq + Hash> Iterator for RunningSeries<'_, K> {
    type Item = BalancePoint;

    fn next(&mut self) -> Option<Self::Item> {
        let txn = self.ordered.next()?;
        self.balance += self.polarity.signed_amount(txn);
        Some(BalancePoint {
            transaction_id: txn.id,
            occurred_at: txn.occurred_at,
            balance: self.balance,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ordered.size_hint()
    }
}

impl<K: Eq + Hash> ExactSizeIterator for RunningSeries<'_, K> {}

impl<K: Eq + Hash> FusedIterator for RunningSeries<'_, K> {}

/// Summed amount per kind, independent of polarity.
///
/// Kinds whose total is zero are left out so breakdown charts never show empty slices.
pub fn type_totals<'a, K, I>(transactions: I) -> BTreeMap<K, Decimal>
where
    K: Ord + Clone + 'a,
    I: IntoIterator<Item = &'a Transaction<K>>,
{
    let mut totals: BTreeMap<K, Decimal> = BTreeMap::new();
    for txn in transactions {
        *totals.entry(txn.kind.clone()).or_insert(Decimal::ZERO) += txn.amount;
    }
    totals.retain(|_, total| !total.is_zero());
    totals
}

/// Total amount of `transactions` whose kind carries `sign` in `polarity`.
pub fn signed_total<'a, K, I>(
    transactions: I,
    polarity: &Polarity<K>,
    sign: Sign,
) -> Decimal
where
    K: Eq + Hash + 'a,
    I: IntoIterator<Item = &'a Transaction<K>>,
{
    transactions
        .into_iter()
        .filter(|txn| polarity.sign_of(&txn.kind) == Some(sign))
        .map(|txn| txn.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{LedgerKind, SupplierKind};
    use chrono::NaiveDate;
    use rust_decimal::dec;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn supplier(id: i64, kind: SupplierKind, amount: Decimal, day: u32) -> Transaction<SupplierKind> {
        Transaction::new(id, 1, amount, kind, at(day, 10)).unwrap()
    }

    #[test]
    fn neutral_kinds_do_not_move_balance() {
        let polarity = SupplierKind::default_polarity();
        let txns = vec![
            supplier(1, SupplierKind::PurchaseCredit, dec!(500), 1),
            supplier(2, SupplierKind::PurchaseCash, dec!(300), 2),
            supplier(3, SupplierKind::Payment, dec!(200), 3),
        ];
        assert_eq!(compute_balance(&txns, &polarity), dec!(300));
        assert_eq!(signed_total(&txns, &polarity, Sign::Increase), dec!(500));
        assert_eq!(signed_total(&txns, &polarity, Sign::Decrease), dec!(200));
        // Cash purchases still show up in the per-kind breakdown.
        assert_eq!(type_totals(&txns).get(&SupplierKind::PurchaseCash), Some(&dec!(300)));
    }

    #[test]
    fn equal_timestamps_keep_input_order() {
        let polarity = SupplierKind::default_polarity();
        let txns = vec![
            supplier(10, SupplierKind::Payment, dec!(50), 4),
            supplier(11, SupplierKind::PurchaseCredit, dec!(80), 4),
            supplier(12, SupplierKind::PurchaseCredit, dec!(20), 1),
        ];
        let ids: Vec<_> = running_series(&txns, &polarity)
            .map(|point| point.transaction_id)
            .collect();
        assert_eq!(ids, vec![12, 10, 11]);
    }

    #[test]
    fn series_is_exact_size_and_tracks_balance() {
        let polarity = SupplierKind::default_polarity();
        let txns = vec![
            supplier(1, SupplierKind::PurchaseCredit, dec!(40), 1),
            supplier(2, SupplierKind::Payment, dec!(15), 2),
        ];
        let mut series = running_series(&txns, &polarity);
        assert_eq!(series.len(), 2);
        series.next();
        assert_eq!(series.current_balance(), dec!(40));
        series.next();
        assert_eq!(series.current_balance(), dec!(25));
        assert!(series.next().is_none());
        assert!(series.next().is_none());
    }

    #[test]
    fn zero_sum_kinds_are_omitted() {
        let txns = vec![supplier(1, SupplierKind::Payment, Decimal::ZERO, 1)];
        assert!(type_totals(&txns).is_empty());
    }
}
