//! Append-only transaction log for Larder.
//!
//! Every stock quantity mutation in the system produces exactly one
//! [`Transaction`] record. Records are immutable, insertion-ordered, and
//! hash-linked: each entry carries a BLAKE3 hash over its canonical JSON
//! form plus the hash of the previous entry, so the audit trail is
//! tamper-evident and replayable.
//!
//! - [`TransactionLog`] — the append/read trait boundary
//! - [`InMemoryTransactionLog`] — in-memory implementation with chain validation

pub mod error;
pub mod memory;
pub mod records;
pub mod traits;

pub use error::LedgerError;
pub use memory::InMemoryTransactionLog;
pub use records::{Transaction, TransactionInput, TxAction};
pub use traits::TransactionLog;
