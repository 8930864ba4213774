//! Closed transaction kinds for every ledger domain the bookkeeping pages track.

use std::fmt::Debug;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::polarity::{Polarity, Sign};
use crate::errors::LedgerError;

/// A domain-specific transaction tag with a wire representation and a default polarity.
pub trait LedgerKind:
    Copy + Eq + Hash + Ord + Debug + FromStr<Err = LedgerError> + 'static
{
    /// Human readable domain name used in errors and logs.
    const DOMAIN: &'static str;
    /// Field holding the owning party id in REST payloads.
    const PARTY_KEY: &'static str;
    /// Field holding the kind tag in REST payloads.
    const KIND_KEY: &'static str = "type";
    /// Field holding the free-text note in REST payloads.
    const NOTE_KEY: &'static str = "note";

    fn as_str(&self) -> &'static str;

    fn all() -> &'static [Self];

    fn default_polarity() -> Polarity<Self>;
}

macro_rules! ledger_kind {
    (
        $(#[$meta:meta])*
        $name:ident, domain = $domain:literal, party_key = $party:literal
        $(, kind_key = $kind_key:literal)? $(, note_key = $note_key:literal)?;
        $($variant:ident => $wire:literal $(: $sign:ident)?),+ $(,)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl LedgerKind for $name {
            const DOMAIN: &'static str = $domain;
            const PARTY_KEY: &'static str = $party;
            $(const KIND_KEY: &'static str = $kind_key;)?
            $(const NOTE_KEY: &'static str = $note_key;)?

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            fn all() -> &'static [Self] {
                &[$($name::$variant),+]
            }

            fn default_polarity() -> Polarity<Self> {
                let mut polarity = Polarity::new();
                $($(polarity = polarity.with($name::$variant, Sign::$sign);)?)+
                polarity
            }
        }

        impl FromStr for $name {
            type Err = LedgerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($wire => Ok($name::$variant),)+
                    other => Err(LedgerError::UnknownKind {
                        domain: $domain,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

ledger_kind! {
    /// Money borrowed from and repaid to a creditor.
    CreditorKind, domain = "creditor", party_key = "creditor_id";
    Borrow => "BORROW": Increase,
    Repay => "REPAY": Decrease,
}

ledger_kind! {
    /// Money lent to and received back from a debtor.
    DebtorKind, domain = "debtor", party_key = "debtor_id";
    Lend => "LEND": Increase,
    Receive => "RECEIVE": Decrease,
}

ledger_kind! {
    /// Contributions made by a contributor and amounts returned to them.
    ContributorKind, domain = "contributor", party_key = "contributor_id";
    Contribute => "CONTRIBUTE": Increase,
    Return => "RETURN": Decrease,
}

ledger_kind! {
    /// Feed supplier activity. Cash purchases settle immediately and carry no polarity.
    SupplierKind, domain = "supplier", party_key = "supplier_id",
        kind_key = "transaction_type", note_key = "description";
    PurchaseCash => "purchase_cash",
    PurchaseCredit => "purchase_credit": Increase,
    Payment => "payment": Decrease,
}

ledger_kind! {
    /// Fish buyer dues and the payments collected against them.
    BuyerKind, domain = "buyer", party_key = "buyer_id",
        kind_key = "transaction_type", note_key = "description";
    Due => "due": Increase,
    Payment => "payment": Decrease,
}

ledger_kind! {
    /// Income categories recorded per organization.
    IncomeKind, domain = "income", party_key = "organization_id", kind_key = "income_type";
    Salary => "SALARY": Increase,
    Bonus => "BONUS": Increase,
    Commission => "COMMISSION": Increase,
    Allowance => "ALLOWANCE": Increase,
    Other => "OTHER": Increase,
}
