use std::collections::HashMap;
use std::hash::Hash;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transaction::Transaction;

/// Direction in which a transaction kind moves a balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    Increase,
    Decrease,
}

impl Sign {
    pub fn factor(self) -> Decimal {
        match self {
            Sign::Increase => Decimal::ONE,
            Sign::Decrease => Decimal::NEGATIVE_ONE,
        }
    }

    pub fn apply(self, amount: Decimal) -> Decimal {
        amount * self.factor()
    }
}

/// Caller-supplied table mapping each kind to the direction it moves a balance.
///
/// Kinds missing from the table contribute nothing to a balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polarity<K: Eq + Hash> {
    signs: HashMap<K, Sign>,
}

impl<K: Eq + Hash> Default for Polarity<K> {
    fn default() -> Self {
        Self {
            signs: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> Polarity<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: K, sign: Sign) -> Self {
        self.signs.insert(kind, sign);
        self
    }

    pub fn increase(self, kind: K) -> Self {
        self.with(kind, Sign::Increase)
    }

    pub fn decrease(self, kind: K) -> Self {
        self.with(kind, Sign::Decrease)
    }

    pub fn sign_of(&self, kind: &K) -> Option<Sign> {
        self.signs.get(kind).copied()
    }

    /// Signed contribution of `amount` under `kind`; zero for unrecognised kinds.
    pub fn signed(&self, kind: &K, amount: Decimal) -> Decimal {
        self.sign_of(kind)
            .map(|sign| sign.apply(amount))
            .unwrap_or(Decimal::ZERO)
    }

    pub fn signed_amount(&self, transaction: &Transaction<K>) -> Decimal {
        self.signed(&transaction.kind, transaction.amount)
    }

    pub fn kinds_with(&self, sign: Sign) -> impl Iterator<Item = &K> + '_ {
        self.signs
            .iter()
            .filter(move |(_, s)| **s == sign)
            .map(|(kind, _)| kind)
    }

    pub fn len(&self) -> usize {
        self.signs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signs.is_empty()
    }
}

impl<K: Eq + Hash> FromIterator<(K, Sign)> for Polarity<K> {
    fn from_iter<I: IntoIterator<Item = (K, Sign)>>(iter: I) -> Self {
        Self {
            signs: iter.into_iter().collect(),
        }
    }
}
