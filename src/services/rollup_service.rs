//! Dashboard rollups: per-party balances composed into global totals.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{
    compute_balance, signed_total, Party, PartyId, PeriodFilter, Polarity, Sign, Transaction,
};

use super::ServiceResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RollupOptions {
    /// Drop inactive parties, and their transactions, before computing anything.
    pub active_only: bool,
}

impl RollupOptions {
    pub fn active_only() -> Self {
        Self { active_only: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyBalance {
    pub party_id: PartyId,
    pub name: String,
    pub balance: Decimal,
}

impl PartyBalance {
    /// Nothing left to pay or collect (overpaid counts as settled).
    pub fn is_settled(&self) -> bool {
        self.balance <= Decimal::ZERO
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RollupResult {
    /// Every party in scope, in roster order.
    pub parties: Vec<PartyBalance>,
    /// Parties whose balance is not exactly zero, in roster order.
    pub breakdown: Vec<PartyBalance>,
    pub increase_total: Decimal,
    pub decrease_total: Decimal,
    /// Sum of positive balances only; overpaid parties contribute nothing.
    pub remaining: Decimal,
    pub active_party_count: usize,
    pub transaction_count: usize,
}

impl RollupResult {
    pub fn net(&self) -> Decimal {
        self.increase_total - self.decrease_total
    }

    pub fn paid(&self) -> Decimal {
        self.decrease_total
    }

    pub fn breakdown_by_balance_desc(&self) -> Vec<PartyBalance> {
        let mut sorted = self.breakdown.clone();
        sorted.sort_by(|a, b| b.balance.cmp(&a.balance));
        sorted
    }

    /// The `limit` largest breakdown entries by absolute balance.
    pub fn top(&self, limit: usize) -> Vec<PartyBalance> {
        let mut sorted = self.breakdown.clone();
        sorted.sort_by(|a, b| b.balance.abs().cmp(&a.balance.abs()));
        sorted.truncate(limit);
        sorted
    }

    pub fn settled_count(&self) -> usize {
        self.parties.iter().filter(|p| p.is_settled()).count()
    }
}

pub struct DashboardService;

impl DashboardService {
    /// Balances every party in `parties` and assembles the dashboard totals.
    ///
    /// Transactions are joined to parties by id. Rows whose party is not in the
    /// roster (or was filtered out as inactive) are ignored.
    pub fn rollup<K: Eq + Hash>(
        parties: &[Party],
        transactions: &[Transaction<K>],
        polarity: &Polarity<K>,
        options: RollupOptions,
    ) -> RollupResult {
        let roster: Vec<&Party> = parties
            .iter()
            .filter(|party| !options.active_only || party.is_active)
            .collect();
        let roster_ids: HashSet<PartyId> = roster.iter().map(|party| party.id).collect();
        let known_ids: HashSet<PartyId> = parties.iter().map(|party| party.id).collect();

        let mut by_party: HashMap<PartyId, Vec<&Transaction<K>>> = HashMap::new();
        let mut in_scope: Vec<&Transaction<K>> = Vec::with_capacity(transactions.len());
        let mut orphaned = 0usize;
        for txn in transactions {
            if roster_ids.contains(&txn.party_id) {
                by_party.entry(txn.party_id).or_default().push(txn);
                in_scope.push(txn);
            } else if !known_ids.contains(&txn.party_id) {
                orphaned += 1;
            }
        }
        if orphaned > 0 {
            tracing::warn!(orphaned, "transactions reference parties missing from the roster");
        }

        let balances: Vec<PartyBalance> = roster
            .iter()
            .map(|party| {
                let balance = by_party
                    .get(&party.id)
                    .map(|txns| compute_balance(txns.iter().copied(), polarity))
                    .unwrap_or(Decimal::ZERO);
                PartyBalance {
                    party_id: party.id,
                    name: party.name.clone(),
                    balance,
                }
            })
            .collect();

        let remaining: Decimal = balances
            .iter()
            .map(|entry| entry.balance.max(Decimal::ZERO))
            .sum();
        let breakdown: Vec<PartyBalance> = balances
            .iter()
            .filter(|entry| !entry.balance.is_zero())
            .cloned()
            .collect();

        let result = RollupResult {
            increase_total: signed_total(in_scope.iter().copied(), polarity, Sign::Increase),
            decrease_total: signed_total(in_scope.iter().copied(), polarity, Sign::Decrease),
            remaining,
            breakdown,
            active_party_count: roster.iter().filter(|party| party.is_active).count(),
            transaction_count: in_scope.len(),
            parties: balances,
        };
        tracing::debug!(
            parties = result.parties.len(),
            transactions = result.transaction_count,
            active_only = options.active_only,
            "computed rollup"
        );
        result
    }

    /// Narrows `transactions` to `filter` (resolved against `now`) before rolling up.
    pub fn rollup_in_period<K: Eq + Hash + Clone>(
        parties: &[Party],
        transactions: &[Transaction<K>],
        polarity: &Polarity<K>,
        options: RollupOptions,
        filter: &PeriodFilter,
        now: NaiveDateTime,
    ) -> ServiceResult<RollupResult> {
        let range = filter.resolve(now)?;
        if range.is_unbounded() {
            return Ok(Self::rollup(parties, transactions, polarity, options));
        }
        let scoped: Vec<Transaction<K>> = range.select(transactions).cloned().collect();
        Ok(Self::rollup(parties, &scoped, polarity, options))
    }
}
