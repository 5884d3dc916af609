use std::sync::RwLock;

use chrono::Utc;
use tracing::debug;

use crate::error::LedgerError;
use crate::records::{compute_entry_hash, Transaction, TransactionInput};
use crate::traits::TransactionLog;

/// In-memory transaction log for tests, local demos, and embedding.
#[derive(Default)]
pub struct InMemoryTransactionLog {
    inner: RwLock<Vec<Transaction>>,
}

impl InMemoryTransactionLog {
    /// Create a new empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate sequence monotonicity, previous-hash links, and recomputed
    /// entry hashes over the whole chain.
    pub fn validate_chain(&self) -> Result<(), LedgerError> {
        let entries = self.read_all()?;
        for (index, entry) in entries.iter().enumerate() {
            let expected_seq = (index + 1) as u64;
            if entry.seq != expected_seq {
                return Err(LedgerError::IntegrityViolation {
                    seq: entry.seq,
                    reason: format!("expected seq {expected_seq}, found {}", entry.seq),
                });
            }

            let expected_prev = if index == 0 {
                None
            } else {
                Some(entries[index - 1].entry_hash)
            };
            if entry.prev_hash != expected_prev {
                return Err(LedgerError::IntegrityViolation {
                    seq: entry.seq,
                    reason: "previous hash link mismatch".into(),
                });
            }

            if compute_entry_hash(entry)? != entry.entry_hash {
                return Err(LedgerError::IntegrityViolation {
                    seq: entry.seq,
                    reason: "entry hash mismatch".into(),
                });
            }
        }
        Ok(())
    }

    #[cfg(test)]
    fn tamper(&self, index: usize, quantity: f64) {
        self.inner.write().unwrap()[index].quantity = quantity;
    }
}

impl TransactionLog for InMemoryTransactionLog {
    fn append(&self, input: TransactionInput) -> Result<Transaction, LedgerError> {
        let mut entries = self
            .inner
            .write()
            .map_err(|e| LedgerError::Unavailable(format!("lock poisoned: {e}")))?;

        let mut transaction = Transaction {
            seq: (entries.len() + 1) as u64,
            action: input.action,
            item_name: input.item_name,
            quantity: input.quantity,
            unit: input.unit,
            description: input.description,
            timestamp: Utc::now(),
            prev_hash: entries.last().map(|last| last.entry_hash),
            entry_hash: [0; 32],
        };
        transaction.entry_hash = compute_entry_hash(&transaction)?;

        debug!(
            seq = transaction.seq,
            action = %transaction.action,
            item = %transaction.item_name,
            quantity = transaction.quantity,
            "transaction appended"
        );
        entries.push(transaction.clone());
        Ok(transaction)
    }

    fn read_all(&self) -> Result<Vec<Transaction>, LedgerError> {
        let entries = self
            .inner
            .read()
            .map_err(|e| LedgerError::Unavailable(format!("lock poisoned: {e}")))?;
        Ok(entries.clone())
    }

    fn read_for_item(&self, item_name: &str) -> Result<Vec<Transaction>, LedgerError> {
        let entries = self
            .inner
            .read()
            .map_err(|e| LedgerError::Unavailable(format!("lock poisoned: {e}")))?;
        Ok(entries
            .iter()
            .filter(|entry| entry.item_name == item_name)
            .cloned()
            .collect())
    }

    fn len(&self) -> Result<u64, LedgerError> {
        let entries = self
            .inner
            .read()
            .map_err(|e| LedgerError::Unavailable(format!("lock poisoned: {e}")))?;
        Ok(entries.len() as u64)
    }
}
