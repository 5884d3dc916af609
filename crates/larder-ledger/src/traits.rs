use crate::error::LedgerError;
use crate::records::{Transaction, TransactionInput};

/// Append/read boundary for the transaction log.
///
/// All implementations must satisfy these invariants:
/// - Append-only: entries are never mutated or deleted.
/// - Insertion order is the only index; `seq` is 1-based and gapless.
/// - Each entry hash-links to its predecessor.
/// - Append failure is an error for the enclosing operation, never
///   silently dropped.
pub trait TransactionLog: Send + Sync {
    /// Append one record; the log assigns `seq`, timestamp, and hashes.
    fn append(&self, input: TransactionInput) -> Result<Transaction, LedgerError>;

    /// Every record, in insertion order.
    fn read_all(&self) -> Result<Vec<Transaction>, LedgerError>;

    /// Records for one item name, in insertion order.
    fn read_for_item(&self, item_name: &str) -> Result<Vec<Transaction>, LedgerError>;

    /// Number of records appended so far.
    fn len(&self) -> Result<u64, LedgerError>;

    fn is_empty(&self) -> Result<bool, LedgerError> {
        Ok(self.len()? == 0)
    }
}
