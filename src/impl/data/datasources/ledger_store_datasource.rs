use std::collections::BTreeMap;

use async_trait::async_trait;
use fractic_server_error::ServerError;
use serde_derive::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::data::models::{
    debtor_document_model::DebtorDocumentModel, payment_document_model::PaymentDocumentModel,
    transaction_entry_model::TransactionEntryModel,
};
use crate::errors::{DuplicateTransactionEntry, SnapshotIoError};

/// Document-store seam for the ledger. The one hard requirement on any
/// implementation: `append_entries` is all-or-nothing over the whole batch —
/// an entry with only one leg persisted is the failure mode this engine
/// exists to rule out.
#[async_trait]
pub trait LedgerStoreDatasource: Send + Sync {
    async fn all_entries(&self) -> Result<Vec<TransactionEntryModel>, ServerError>;

    /// Validates and appends the batch atomically, assigning final
    /// transaction ids under the write lock. Returns the batch as stored.
    async fn append_entries(
        &self,
        batch: Vec<TransactionEntryModel>,
    ) -> Result<Vec<TransactionEntryModel>, ServerError>;

    async fn payment_exists(&self, payment_id: &str) -> Result<bool, ServerError>;

    async fn upsert_payment(&self, payment: PaymentDocumentModel) -> Result<(), ServerError>;

    async fn replace_debtor(&self, debtor: DebtorDocumentModel) -> Result<(), ServerError>;

    async fn load_debtor(
        &self,
        student_id: &str,
    ) -> Result<Option<DebtorDocumentModel>, ServerError>;

    async fn student_ids(&self) -> Result<Vec<String>, ServerError>;

    async fn save_snapshot(&self, path: &std::path::Path) -> Result<(), ServerError>;

    async fn load_snapshot(&self, path: &std::path::Path) -> Result<(), ServerError>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreState {
    entries: Vec<TransactionEntryModel>,
    payments: BTreeMap<String, PaymentDocumentModel>,
    debtors: BTreeMap<String, DebtorDocumentModel>,
    next_entry_id: u64,
}

/// In-memory ledger store. Batch appends happen under one write-lock
/// acquisition, which is what makes them atomic: either every entry of the
/// batch passes the write-time guards and lands, or none do.
pub struct LedgerMemoryDatasource {
    state: RwLock<StoreState>,
}

impl LedgerMemoryDatasource {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState {
                next_entry_id: 1,
                ..StoreState::default()
            }),
        }
    }
}

impl Default for LedgerMemoryDatasource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerStoreDatasource for LedgerMemoryDatasource {
    async fn all_entries(&self) -> Result<Vec<TransactionEntryModel>, ServerError> {
        Ok(self.state.read().await.entries.clone())
    }

    async fn append_entries(
        &self,
        mut batch: Vec<TransactionEntryModel>,
    ) -> Result<Vec<TransactionEntryModel>, ServerError> {
        let mut state = self.state.write().await;

        // Assign final ids, then validate the WHOLE batch before any entry is
        // visible to readers.
        for model in batch.iter_mut() {
            model.transaction_id = format!("txn-{:06}", state.next_entry_id);
            state.next_entry_id += 1;
        }
        for model in &batch {
            model.check_write_invariants()?;
            if state
                .entries
                .iter()
                .any(|existing| existing.transaction_id == model.transaction_id)
            {
                return Err(DuplicateTransactionEntry::new(&model.transaction_id));
            }
        }

        state.entries.extend(batch.iter().cloned());
        Ok(batch)
    }

    async fn payment_exists(&self, payment_id: &str) -> Result<bool, ServerError> {
        Ok(self.state.read().await.payments.contains_key(payment_id))
    }

    async fn upsert_payment(&self, payment: PaymentDocumentModel) -> Result<(), ServerError> {
        self.state
            .write()
            .await
            .payments
            .insert(payment.payment_id.clone(), payment);
        Ok(())
    }

    async fn replace_debtor(&self, debtor: DebtorDocumentModel) -> Result<(), ServerError> {
        self.state
            .write()
            .await
            .debtors
            .insert(debtor.student_id.clone(), debtor);
        Ok(())
    }

    async fn load_debtor(
        &self,
        student_id: &str,
    ) -> Result<Option<DebtorDocumentModel>, ServerError> {
        Ok(self.state.read().await.debtors.get(student_id).cloned())
    }

    async fn student_ids(&self) -> Result<Vec<String>, ServerError> {
        let state = self.state.read().await;
        let mut ids: Vec<String> = state
            .entries
            .iter()
            .flat_map(|e| e.entries.iter().map(|l| l.metadata.student_id.clone()))
            .chain(state.debtors.keys().cloned())
            .collect();
        ids.sort();
        ids.dedup();
        Ok(ids)
    }

    async fn save_snapshot(&self, path: &std::path::Path) -> Result<(), ServerError> {
        let json = {
            let state = self.state.read().await;
            serde_json::to_vec_pretty(&*state)
                .map_err(|e| SnapshotIoError::with_debug("serialization failed", &e))?
        };
        tokio::fs::write(path, json)
            .await
            .map_err(|e| SnapshotIoError::with_debug("write failed", &e))?;
        Ok(())
    }

    async fn load_snapshot(&self, path: &std::path::Path) -> Result<(), ServerError> {
        let json = tokio::fs::read(path)
            .await
            .map_err(|e| SnapshotIoError::with_debug("read failed", &e))?;
        let loaded: StoreState = serde_json::from_slice(&json)
            .map_err(|e| SnapshotIoError::with_debug("deserialization failed", &e))?;
        // Re-run the write guards: a snapshot from an upstream system gets no
        // more trust than a live write. Void entries are exempt — the balance
        // invariant binds posted entries only.
        for model in loaded.entries.iter().filter(|m| m.status != "void") {
            model.check_write_invariants()?;
        }
        *self.state.write().await = loaded;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
