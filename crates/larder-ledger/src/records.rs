use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Direction of a stock quantity change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxAction {
    Add,
    Subtract,
}

impl fmt::Display for TxAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxAction::Add => write!(f, "add"),
            TxAction::Subtract => write!(f, "subtract"),
        }
    }
}

/// Caller-supplied fields of a transaction; the log assigns sequence,
/// timestamp, and hashes on append.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionInput {
    pub action: TxAction,
    pub item_name: String,
    /// Magnitude of the change; the sign lives in `action`.
    pub quantity: f64,
    pub unit: String,
    pub description: String,
}

impl TransactionInput {
    pub fn new(
        action: TxAction,
        item_name: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            action,
            item_name: item_name.into(),
            quantity,
            unit: unit.into(),
            description: description.into(),
        }
    }
}

/// An immutable audit record of one stock quantity change.
///
/// Entries form a hash chain: `entry_hash` covers the canonical JSON form
/// of the record (with a zeroed hash field) and `prev_hash` links to the
/// preceding entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// 1-based insertion order.
    pub seq: u64,
    pub action: TxAction,
    pub item_name: String,
    pub quantity: f64,
    pub unit: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub prev_hash: Option<[u8; 32]>,
    pub entry_hash: [u8; 32],
}

impl Transaction {
    /// The quantity change with its sign applied: positive for `add`,
    /// negative for `subtract`.
    pub fn signed_delta(&self) -> f64 {
        match self.action {
            TxAction::Add => self.quantity,
            TxAction::Subtract => -self.quantity,
        }
    }
}

/// Recompute the entry hash over the canonical form (hash field zeroed).
pub(crate) fn compute_entry_hash(transaction: &Transaction) -> Result<[u8; 32], LedgerError> {
    let mut canonical = transaction.clone();
    canonical.entry_hash = [0; 32];

    let encoded =
        serde_json::to_vec(&canonical).map_err(|e| LedgerError::Serialization(e.to_string()))?;

    let mut hasher = blake3::Hasher::new();
    hasher.update(b"larder-tx-v1:");
    hasher.update(&encoded);
    Ok(*hasher.finalize().as_bytes())
}
