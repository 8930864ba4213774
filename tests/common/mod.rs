#![allow(dead_code)]

use bookkeeping_core::{
    config::ConfigManager,
    ledger::{Party, Transaction},
};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use tempfile::TempDir;

/// Local wall-clock instant.
pub fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("valid date")
        .and_hms_opt(hour, 0, 0)
        .expect("valid time")
}

pub fn txn<K>(id: i64, party_id: i64, kind: K, amount: Decimal, when: NaiveDateTime) -> Transaction<K> {
    Transaction::new(id, party_id, amount, kind, when).expect("non-negative amount")
}

pub fn roster(names: &[(i64, &str)]) -> Vec<Party> {
    names
        .iter()
        .map(|(id, name)| Party::new(*id, *name))
        .collect()
}

/// Config manager rooted in a fresh directory; keep the guard alive for the test.
pub fn setup_test_env() -> (TempDir, ConfigManager) {
    let temp = TempDir::new().expect("create temp dir");
    let manager =
        ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("config manager for temp dir");
    (temp, manager)
}
