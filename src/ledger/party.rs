use serde::{Deserialize, Serialize};

use super::transaction::PartyId;

/// A ledger counterpart: creditor, debtor, contributor, buyer, supplier or organization.
///
/// Parties never store a balance; it is always derived from their transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub id: PartyId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(
        default,
        alias = "creditor_type",
        alias = "debtor_type",
        alias = "contributor_type",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
    #[serde(default = "Party::active_default")]
    pub is_active: bool,
}

impl Party {
    pub fn new(id: PartyId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            phone: None,
            category: None,
            is_active: true,
        }
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn active_default() -> bool {
        true
    }
}
