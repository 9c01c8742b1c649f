//! Canonical CBOR encoding and content fingerprints for snapshots.
//!
//! Every map uses small integer keys written in ascending order, ids are
//! encoded as their 16 raw bytes, and collections keep model order. Equal
//! snapshots therefore encode to identical bytes and hash to the same
//! [`Fingerprint`], which lets two replays of one operation log be compared
//! without walking both trees.

use ciborium::value::Value;
use std::fmt;

use crate::error::{CoreError, Result};
use crate::id::EntityId;
use crate::line::Line;
use crate::receipt::Receipt;
use crate::receipt_list::ReceiptList;
use crate::summary::Summary;

/// Field keys. Keys 0-23 encode as single bytes in CBOR.
mod keys {
    pub const ID: u64 = 0;
    pub const NAME: u64 = 1;
    pub const AMOUNT: u64 = 2;
    pub const EXPENSE_TYPE: u64 = 3;
    pub const CHILDREN: u64 = 4;
    pub const COUNT: u64 = 5;
    pub const SUM: u64 = 6;
}

/// Domain prefix mixed into every fingerprint.
const FINGERPRINT_DOMAIN: &[u8] = b"tally-snapshot-v0:";

/// A 32-byte Blake3 digest of a snapshot's canonical bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(pub [u8; 32]);

impl Fingerprint {
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Encode a snapshot to canonical CBOR bytes.
pub fn canonical_bytes(list: &ReceiptList) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    ciborium::into_writer(&list_to_cbor_value(list), &mut buf)
        .map_err(|e| CoreError::Encoding(e.to_string()))?;
    Ok(buf)
}

/// Blake3 fingerprint of a snapshot's canonical bytes.
pub fn fingerprint(list: &ReceiptList) -> Result<Fingerprint> {
    let bytes = canonical_bytes(list)?;
    let mut hasher = blake3::Hasher::new();
    hasher.update(FINGERPRINT_DOMAIN);
    hasher.update(&bytes);
    Ok(Fingerprint(*hasher.finalize().as_bytes()))
}

fn entry(key: u64, value: Value) -> (Value, Value) {
    (Value::Integer(key.into()), value)
}

fn id_value(id: &EntityId) -> Value {
    Value::Bytes(id.as_bytes().to_vec())
}

fn summary_entries(summary: Summary) -> [(Value, Value); 2] {
    [
        entry(keys::COUNT, Value::Integer((summary.count as u64).into())),
        entry(keys::SUM, Value::Float(summary.sum)),
    ]
}

fn line_to_cbor_value(line: &Line) -> Value {
    Value::Map(vec![
        entry(keys::ID, id_value(&line.id)),
        entry(keys::NAME, Value::Text(line.name.clone())),
        entry(keys::AMOUNT, Value::Float(line.amount)),
    ])
}

fn receipt_to_cbor_value(receipt: &Receipt) -> Value {
    let lines = receipt
        .lines()
        .iter()
        .map(|line| line_to_cbor_value(line))
        .collect();
    let mut entries = vec![
        entry(keys::ID, id_value(receipt.id())),
        entry(keys::EXPENSE_TYPE, Value::Text(receipt.expense_type().to_string())),
        entry(keys::CHILDREN, Value::Array(lines)),
    ];
    entries.extend(summary_entries(receipt.summary()));
    Value::Map(entries)
}

fn list_to_cbor_value(list: &ReceiptList) -> Value {
    let receipts = list
        .receipts()
        .iter()
        .map(|receipt| receipt_to_cbor_value(receipt))
        .collect();
    let mut entries = vec![
        entry(keys::ID, id_value(list.id())),
        entry(keys::CHILDREN, Value::Array(receipts)),
    ];
    entries.extend(summary_entries(list.summary()));
    Value::Map(entries)
}
