//! First-in-first-out application of buyer payments to outstanding sales.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::amount::validate_amount;
use super::transaction::TransactionId;
use crate::errors::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[serde(rename = "due")]
    Unpaid,
    Partial,
    Paid,
}

/// A sale with its running paid amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenSale {
    pub id: TransactionId,
    pub occurred_at: NaiveDateTime,
    pub total: Decimal,
    pub paid: Decimal,
}

impl OpenSale {
    pub fn due(&self) -> Decimal {
        (self.total - self.paid).max(Decimal::ZERO)
    }

    pub fn status(&self) -> PaymentStatus {
        status_for(self.total, self.paid)
    }
}

fn status_for(total: Decimal, paid: Decimal) -> PaymentStatus {
    if paid >= total {
        PaymentStatus::Paid
    } else if paid > Decimal::ZERO {
        PaymentStatus::Partial
    } else {
        PaymentStatus::Unpaid
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub sale_id: TransactionId,
    pub applied: Decimal,
    pub paid_after: Decimal,
    pub due_after: Decimal,
    pub status_after: PaymentStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SettlementPlan {
    pub allocations: Vec<Allocation>,
    /// Portion of the payment left after every open sale is covered.
    pub unapplied: Decimal,
}

impl SettlementPlan {
    pub fn applied(&self) -> Decimal {
        self.allocations.iter().map(|a| a.applied).sum()
    }
}

/// Spreads `payment` over the oldest unpaid sales first.
///
/// Sales are ordered by `occurred_at` (stable for equal dates); fully paid sales
/// are skipped. The inputs are left untouched.
pub fn allocate_payment(sales: &[OpenSale], payment: Decimal) -> Result<SettlementPlan, LedgerError> {
    let mut remaining = validate_amount(payment)?;
    let mut ordered: Vec<&OpenSale> = sales.iter().collect();
    ordered.sort_by_key(|sale| sale.occurred_at);

    let mut allocations = Vec::new();
    for sale in ordered {
        if remaining <= Decimal::ZERO {
            break;
        }
        let due = sale.due();
        if due <= Decimal::ZERO {
            continue;
        }
        let applied = due.min(remaining);
        remaining -= applied;
        let paid_after = sale.paid + applied;
        allocations.push(Allocation {
            sale_id: sale.id,
            applied,
            paid_after,
            due_after: (sale.total - paid_after).max(Decimal::ZERO),
            status_after: status_for(sale.total, paid_after),
        });
    }

    tracing::debug!(
        sales = sales.len(),
        allocations = allocations.len(),
        %remaining,
        "allocated buyer payment"
    );
    Ok(SettlementPlan {
        allocations,
        unapplied: remaining,
    })
}
