use std::collections::HashSet;
use std::sync::Mutex;

use gsm_core::TransactionId;

/// Cleanup seam used by the dispatcher recovery path. The dispatcher only
/// ever removes; creation belongs to the transaction handlers.
pub trait TransactionRegistry: Send + Sync {
    /// Remove the transaction entry if present. Idempotent.
    fn remove(&self, id: TransactionId);
}

/// The process-wide table of in-flight transactions.
#[derive(Default)]
pub struct TransactionTable {
    entries: Mutex<HashSet<TransactionId>>,
}

impl TransactionTable {
    pub fn new() -> TransactionTable {
        TransactionTable::default()
    }

    pub fn insert(&self, id: TransactionId) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(id);
        }
    }

    pub fn contains(&self, id: TransactionId) -> bool {
        match self.entries.lock() {
            Ok(entries) => entries.contains(&id),
            Err(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        match self.entries.lock() {
            Ok(entries) => entries.len(),
            Err(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TransactionRegistry for TransactionTable {
    fn remove(&self, id: TransactionId) {
        if let Ok(mut entries) = self.entries.lock() {
            if entries.remove(&id) {
                tracing::debug!("removed transaction {}", id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_remove() {
        let table = TransactionTable::new();
        table.insert(7);
        table.insert(9);
        assert!(table.contains(7));
        assert_eq!(table.len(), 2);

        table.remove(7);
        assert!(!table.contains(7));
        assert!(table.contains(9));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let table = TransactionTable::new();
        table.insert(3);
        table.remove(3);
        table.remove(3);
        table.remove(42);
        assert!(table.is_empty());
    }
}
