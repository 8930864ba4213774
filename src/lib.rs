#![doc(test(attr(deny(warnings))))]

//! Bookkeeping Core derives balances, running balances, per-kind totals and
//! dashboard rollups from creditor, debtor, contributor, supplier, buyer and
//! income ledgers, with calendar period filtering in a fixed local offset.

pub mod config;
pub mod errors;
pub mod ledger;
pub mod services;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Bookkeeping Core tracing initialized.");
    });
}
