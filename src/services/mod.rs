pub mod rollup_service;
pub mod statement_service;

pub use rollup_service::{DashboardService, PartyBalance, RollupOptions, RollupResult};
pub use statement_service::{PartyStatement, PeriodSummary, StatementService};

use crate::errors::LedgerError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    Invalid(String),
}
