use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::entities::{
    DebtorAggregate, LedgerEntry, Payment, PaymentId, PaymentStatus, StudentId,
};

/// Seam to the ledger store. Implementations must guarantee two things the
/// engine's correctness rests on: `append_entries` persists the whole batch
/// (every line of every entry) or nothing, and the balance invariant is
/// re-checked at write time independently of the caller.
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    async fn entries_for_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<LedgerEntry>, ServerError>;

    async fn all_entries(&self) -> Result<Vec<LedgerEntry>, ServerError>;

    /// Atomically appends a batch of entries, assigning final entry ids under
    /// the store's write lock. Returns the entries as persisted.
    async fn append_entries(
        &self,
        entries: Vec<LedgerEntry>,
    ) -> Result<Vec<LedgerEntry>, ServerError>;

    async fn payment_exists(&self, payment_id: &PaymentId) -> Result<bool, ServerError>;

    async fn record_payment(
        &self,
        payment: &Payment,
        status: PaymentStatus,
    ) -> Result<(), ServerError>;

    /// Rewrites the student's aggregate document wholesale. Incremental
    /// patching is deliberately unsupported.
    async fn save_debtor(&self, aggregate: &DebtorAggregate) -> Result<(), ServerError>;

    async fn load_debtor(
        &self,
        student_id: &StudentId,
    ) -> Result<Option<DebtorAggregate>, ServerError>;

    /// Every student referenced by any ledger line or aggregate document.
    async fn student_ids(&self) -> Result<Vec<StudentId>, ServerError>;
}
