use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use fractic_server_error::ServerError;

use crate::data::repositories::ledger_repository_impl::LedgerRepositoryImpl;
use crate::domain::logic::{debtor_rollup, obligation_calculator};
use crate::domain::repositories::ledger_repository::LedgerRepository;
use crate::entities::{
    DebtorAggregate, DriftReport, LeaseState, Obligation, StudentId,
};

use super::student_locks::StudentLocks;

#[async_trait]
pub trait DebtorUsecase: Send + Sync {
    /// Pure read of what the student still owes, oldest month first.
    async fn outstanding(
        &self,
        student_id: &StudentId,
        as_of: NaiveDate,
    ) -> Result<Vec<Obligation>, ServerError>;

    /// Recomputes the rollup from the ledger and rewrites the stored copy.
    async fn recompute(&self, student_id: &StudentId) -> Result<DebtorAggregate, ServerError>;

    async fn lease_state(&self, student_id: &StudentId) -> Result<LeaseState, ServerError>;

    /// Reconciliation sweep: recomputes every student's rollup, repairs any
    /// stored copy that drifted (the footprint of a historical partial
    /// write), and reports what it found. Students are processed in parallel.
    async fn reconcile(&self) -> Result<Vec<DriftReport>, ServerError>;
}

pub(crate) struct DebtorUsecaseImpl<
    R = LedgerRepositoryImpl, // Default.
> where
    R: LedgerRepository,
{
    repository: Arc<R>,
    locks: Arc<StudentLocks>,
}

#[async_trait]
impl<R> DebtorUsecase for DebtorUsecaseImpl<R>
where
    R: LedgerRepository,
{
    async fn outstanding(
        &self,
        student_id: &StudentId,
        as_of: NaiveDate,
    ) -> Result<Vec<Obligation>, ServerError> {
        let entries = self.repository.entries_for_student(student_id).await?;
        Ok(obligation_calculator::outstanding(
            &entries, student_id, as_of,
        ))
    }

    async fn recompute(&self, student_id: &StudentId) -> Result<DebtorAggregate, ServerError> {
        let _guard = self.locks.acquire(student_id).await;
        let entries = self.repository.entries_for_student(student_id).await?;
        let aggregate = debtor_rollup::recompute(&entries, student_id);
        self.repository.save_debtor(&aggregate).await?;
        Ok(aggregate)
    }

    async fn lease_state(&self, student_id: &StudentId) -> Result<LeaseState, ServerError> {
        let entries = self.repository.entries_for_student(student_id).await?;
        Ok(debtor_rollup::lease_state(&entries, student_id))
    }

    async fn reconcile(&self) -> Result<Vec<DriftReport>, ServerError> {
        let students = self.repository.student_ids().await?;
        let checks = students
            .iter()
            .map(|student_id| self.reconcile_one(student_id));
        let reports = futures::future::try_join_all(checks).await?;
        Ok(reports.into_iter().flatten().collect())
    }
}

impl<R: LedgerRepository> DebtorUsecaseImpl<R> {
    pub(crate) fn new(repository: Arc<R>, locks: Arc<StudentLocks>) -> Self {
        Self { repository, locks }
    }

    async fn reconcile_one(
        &self,
        student_id: &StudentId,
    ) -> Result<Option<DriftReport>, ServerError> {
        let _guard = self.locks.acquire(student_id).await;
        let cached = self.repository.load_debtor(student_id).await?;
        let entries = self.repository.entries_for_student(student_id).await?;
        let recomputed = debtor_rollup::recompute(&entries, student_id);
        if cached.as_ref() == Some(&recomputed) {
            return Ok(None);
        }
        tracing::warn!(
            student = %student_id,
            "cached debtor aggregate drifted from the ledger, repairing"
        );
        self.repository.save_debtor(&recomputed).await?;
        Ok(Some(DriftReport {
            student_id: student_id.clone(),
            cached,
            recomputed,
        }))
    }
}
