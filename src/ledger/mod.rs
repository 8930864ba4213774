//! Ledger records, polarity tables, period selection and the shared reductions.

pub mod aggregate;
pub mod amount;
pub mod kind;
pub mod party;
pub mod period;
pub mod polarity;
pub mod settlement;
pub mod transaction;
pub mod trend;
pub mod wire;

pub use aggregate::{
    compute_balance, running_series, signed_total, type_totals, BalancePoint, RunningSeries,
};
pub use kind::{
    BuyerKind, ContributorKind, CreditorKind, DebtorKind, IncomeKind, LedgerKind, SupplierKind,
};
pub use party::Party;
pub use period::{resolve_range, DateRange, PeriodFilter};
pub use polarity::{Polarity, Sign};
pub use settlement::{allocate_payment, Allocation, OpenSale, PaymentStatus, SettlementPlan};
pub use transaction::{PartyId, Transaction, TransactionId};
pub use trend::{monthly_totals, trailing_months, MonthBucket};
pub use wire::{decode_parties, decode_transactions, parse_timestamp, WireSchema};
