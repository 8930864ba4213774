//! Decoding of REST payloads into validated ledger records.
//!
//! Each domain names its fields differently (`creditor_id` vs `supplier_id`,
//! `type` vs `transaction_type`, ...). [`WireSchema`] captures those names so a
//! single decoder serves every list endpoint.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use super::amount::{amount_from_f64, parse_amount, validate_amount};
use super::kind::LedgerKind;
use super::party::Party;
use super::period::start_of_day;
use super::transaction::Transaction;
use crate::errors::LedgerError;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Field names used by one endpoint's transaction rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireSchema {
    pub id_key: &'static str,
    pub party_key: &'static str,
    pub amount_key: &'static str,
    pub kind_key: &'static str,
    pub date_key: &'static str,
    pub note_key: &'static str,
}

impl WireSchema {
    pub fn for_kind<K: LedgerKind>() -> Self {
        Self {
            id_key: "id",
            party_key: K::PARTY_KEY,
            amount_key: "amount",
            kind_key: K::KIND_KEY,
            date_key: "date",
            note_key: K::NOTE_KEY,
        }
    }

    /// Same schema keyed by a different owner column, e.g. `person_id` for incomes.
    pub fn with_party_key(mut self, party_key: &'static str) -> Self {
        self.party_key = party_key;
        self
    }
}

/// Parses a JSON array of transaction rows.
pub fn decode_transactions<K: LedgerKind>(
    json: &str,
    schema: &WireSchema,
    offset: FixedOffset,
) -> Result<Vec<Transaction<K>>, LedgerError> {
    let value: Value = serde_json::from_str(json)?;
    let rows = value
        .as_array()
        .ok_or_else(|| LedgerError::MalformedRecord("expected a JSON array of rows".into()))?;
    let transactions = rows
        .iter()
        .map(|row| decode_transaction(row, schema, offset))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(
        domain = K::DOMAIN,
        rows = transactions.len(),
        "decoded transaction rows"
    );
    Ok(transactions)
}

/// Converts one JSON row into a typed transaction.
pub fn decode_transaction<K: LedgerKind>(
    row: &Value,
    schema: &WireSchema,
    offset: FixedOffset,
) -> Result<Transaction<K>, LedgerError> {
    let object = row
        .as_object()
        .ok_or_else(|| LedgerError::MalformedRecord(format!("expected an object, got {row}")))?;
    let id = integer_field(object, schema.id_key)
        .ok_or_else(|| LedgerError::MalformedRecord(format!("row without `{}`", schema.id_key)))?;
    let party_id = integer_field(object, schema.party_key).ok_or_else(|| {
        LedgerError::InvalidRef(format!("row {id} has no `{}`", schema.party_key))
    })?;
    let amount = decode_amount(object.get(schema.amount_key))
        .map_err(|err| annotate(err, id))?;
    let kind = match object.get(schema.kind_key) {
        Some(Value::String(raw)) => raw.parse::<K>()?,
        _ => {
            return Err(LedgerError::MalformedRecord(format!(
                "row {id} has no `{}`",
                schema.kind_key
            )))
        }
    };
    let occurred_at = match object.get(schema.date_key) {
        Some(Value::String(raw)) => parse_timestamp(raw, offset)?,
        _ => {
            return Err(LedgerError::InvalidTimestamp(format!(
                "row {id} has no `{}`",
                schema.date_key
            )))
        }
    };
    let note = object
        .get(schema.note_key)
        .and_then(Value::as_str)
        .map(str::to_string);

    let transaction = Transaction::new(id, party_id, amount, kind, occurred_at)?;
    Ok(match note {
        Some(note) => transaction.with_note(note),
        None => transaction,
    })
}

/// Parses a party roster such as the `/creditors` response.
pub fn decode_parties(json: &str) -> Result<Vec<Party>, LedgerError> {
    Ok(serde_json::from_str(json)?)
}

/// Interprets a backend timestamp as local wall-clock time in `offset`.
///
/// Offset-carrying values are converted; naive values are taken as already local;
/// a bare date means midnight.
pub fn parse_timestamp(raw: &str, offset: FixedOffset) -> Result<NaiveDateTime, LedgerError> {
    let raw = raw.trim();
    if let Ok(aware) = DateTime::parse_from_rfc3339(raw) {
        return Ok(aware.with_timezone(&offset).naive_local());
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(start_of_day)
        .map_err(|_| LedgerError::InvalidTimestamp(format!("`{raw}` is not a recognised date")))
}

fn integer_field(object: &Map<String, Value>, key: &str) -> Option<i64> {
    object.get(key).and_then(Value::as_i64)
}

fn decode_amount(value: Option<&Value>) -> Result<Decimal, LedgerError> {
    match value {
        Some(Value::Number(number)) => {
            if let Some(int) = number.as_i64() {
                validate_amount(Decimal::from(int))
            } else if let Some(uint) = number.as_u64() {
                Ok(Decimal::from(uint))
            } else {
                let float = number
                    .as_f64()
                    .ok_or_else(|| LedgerError::InvalidAmount(number.to_string()))?;
                amount_from_f64(float)
            }
        }
        Some(Value::String(raw)) => parse_amount(raw),
        Some(other) => Err(LedgerError::InvalidAmount(format!("`{other}` is not a number"))),
        None => Err(LedgerError::InvalidAmount("missing amount".into())),
    }
}

fn annotate(err: LedgerError, id: i64) -> LedgerError {
    match err {
        LedgerError::InvalidAmount(message) => {
            LedgerError::InvalidAmount(format!("row {id}: {message}"))
        }
        other => other,
    }
}
