use std::collections::BTreeMap;
use std::hash::Hash;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{
    compute_balance, monthly_totals, running_series, type_totals, BalancePoint, DateRange,
    MonthBucket, Party, PartyId, PeriodFilter, Polarity, Transaction,
};

use super::{ServiceError, ServiceResult};

/// Everything a party detail page shows for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyStatement<K: Ord> {
    pub party_id: PartyId,
    pub name: String,
    pub range: DateRange,
    pub balance: Decimal,
    pub series: Vec<BalancePoint>,
    pub totals: BTreeMap<K, Decimal>,
    pub transaction_count: usize,
}

/// Totals for pages that list amounts without a running balance (expenses, incomes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary<K: Ord> {
    pub range: DateRange,
    pub total: Decimal,
    pub by_kind: BTreeMap<K, Decimal>,
    pub trend: Vec<MonthBucket>,
    pub transaction_count: usize,
}

pub struct StatementService;

impl StatementService {
    /// Statement for `party_id`, whether or not the party is still active.
    pub fn party_statement<K: Eq + Hash + Ord + Clone>(
        parties: &[Party],
        party_id: PartyId,
        transactions: &[Transaction<K>],
        polarity: &Polarity<K>,
        filter: &PeriodFilter,
        now: NaiveDateTime,
    ) -> ServiceResult<PartyStatement<K>> {
        let party = parties
            .iter()
            .find(|party| party.id == party_id)
            .ok_or_else(|| ServiceError::Invalid(format!("Party {party_id} not found")))?;
        let range = filter.resolve(now)?;
        let own: Vec<&Transaction<K>> = range
            .select(transactions)
            .filter(|txn| txn.belongs_to(party_id))
            .collect();

        Ok(PartyStatement {
            party_id,
            name: party.name.clone(),
            range,
            balance: compute_balance(own.iter().copied(), polarity),
            series: running_series(own.iter().copied(), polarity).collect(),
            totals: type_totals(own.iter().copied()),
            transaction_count: own.len(),
        })
    }

    pub fn period_summary<K: Ord + Clone>(
        transactions: &[Transaction<K>],
        filter: &PeriodFilter,
        now: NaiveDateTime,
    ) -> ServiceResult<PeriodSummary<K>> {
        let range = filter.resolve(now)?;
        let scoped: Vec<&Transaction<K>> = range.select(transactions).collect();
        let trend = monthly_totals(scoped.iter().copied(), &range)?;
        Ok(PeriodSummary {
            range,
            total: scoped.iter().map(|txn| txn.amount).sum(),
            by_kind: type_totals(scoped.iter().copied()),
            trend,
            transaction_count: scoped.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{CreditorKind, LedgerKind};
    use chrono::NaiveDate;
    use rust_decimal::dec;

    fn at(month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, month, day)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn inactive_party_still_gets_a_statement() {
        let parties = vec![Party::new(7, "Old lender").inactive()];
        let txns = vec![
            Transaction::new(1, 7, dec!(500), CreditorKind::Borrow, at(1, 5)).unwrap(),
            Transaction::new(2, 7, dec!(200), CreditorKind::Repay, at(2, 5)).unwrap(),
            Transaction::new(3, 8, dec!(999), CreditorKind::Borrow, at(2, 6)).unwrap(),
        ];
        let statement = StatementService::party_statement(
            &parties,
            7,
            &txns,
            &CreditorKind::default_polarity(),
            &PeriodFilter::All,
            at(3, 1),
        )
        .unwrap();
        assert_eq!(statement.balance, dec!(300));
        assert_eq!(statement.transaction_count, 2);
        assert_eq!(statement.series.last().map(|p| p.balance), Some(dec!(300)));
        assert_eq!(statement.totals.get(&CreditorKind::Repay), Some(&dec!(200)));
    }

    #[test]
    fn unknown_party_is_rejected() {
        let err = StatementService::party_statement::<CreditorKind>(
            &[],
            1,
            &[],
            &CreditorKind::default_polarity(),
            &PeriodFilter::All,
            at(3, 1),
        )
        .expect_err("no such party");
        assert!(matches!(err, ServiceError::Invalid(_)));
    }

    #[test]
    fn expense_summary_groups_by_category_id() {
        // Expenses are keyed by category id rather than an enum.
        let txns = vec![
            Transaction::new(1, 1, dec!(40), 3_i64, at(1, 2)).unwrap(),
            Transaction::new(2, 1, dec!(60), 3_i64, at(3, 2)).unwrap(),
            Transaction::new(3, 1, dec!(25), 9_i64, at(3, 9)).unwrap(),
        ];
        let filter = PeriodFilter::Custom {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 31),
        };
        let summary = StatementService::period_summary(&txns, &filter, at(4, 1)).unwrap();
        assert_eq!(summary.total, dec!(125));
        assert_eq!(summary.by_kind.get(&3), Some(&dec!(100)));
        let amounts: Vec<_> = summary.trend.iter().map(|b| b.amount).collect();
        assert_eq!(amounts, vec![dec!(40), Decimal::ZERO, dec!(85)]);
    }
}
