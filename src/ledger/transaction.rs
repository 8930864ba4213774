use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amount::validate_amount;
use crate::errors::LedgerError;

pub type TransactionId = i64;
pub type PartyId = i64;

/// A dated, typed movement of money against one party.
///
/// `occurred_at` is local wall-clock time in the configured ledger offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction<K> {
    pub id: TransactionId,
    pub party_id: PartyId,
    pub amount: Decimal,
    pub kind: K,
    pub occurred_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl<K> Transaction<K> {
    pub fn new(
        id: TransactionId,
        party_id: PartyId,
        amount: Decimal,
        kind: K,
        occurred_at: NaiveDateTime,
    ) -> Result<Self, LedgerError> {
        Ok(Self {
            id,
            party_id,
            amount: validate_amount(amount)?,
            kind,
            occurred_at,
            note: None,
        })
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let note = note.into();
        self.note = if note.trim().is_empty() { None } else { Some(note) };
        self
    }

    pub fn belongs_to(&self, party_id: PartyId) -> bool {
        self.party_id == party_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::CreditorKind;
    use chrono::NaiveDate;
    use rust_decimal::dec;

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn new_rejects_negative_amount() {
        let err = Transaction::new(1, 1, dec!(-5), CreditorKind::Borrow, at(1))
            .expect_err("negative amount must fail");
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
    }

    #[test]
    fn blank_note_is_dropped() {
        let txn = Transaction::new(1, 7, dec!(5), CreditorKind::Repay, at(2))
            .unwrap()
            .with_note("   ");
        assert!(txn.note.is_none());
        assert!(txn.belongs_to(7));
    }
}
