use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use fractic_server_error::ServerError;

use crate::data::repositories::ledger_repository_impl::LedgerRepositoryImpl;
use crate::domain::logic::{accrual_logic, debtor_rollup};
use crate::domain::repositories::ledger_repository::LedgerRepository;
use crate::entities::{
    AccrualCharge, BillingMonth, LedgerEntry, ReversalOutcome, StudentId,
};
use crate::errors::InvalidAccrualCharge;

use super::student_locks::StudentLocks;

#[async_trait]
pub trait AccrualUsecase: Send + Sync {
    /// Posts the month's obligations for one student. Idempotent: tuples that
    /// are already accrued are skipped, so re-running a billing batch is safe.
    async fn accrue_month(
        &self,
        student_id: &StudentId,
        month: BillingMonth,
        charges: Vec<AccrualCharge>,
    ) -> Result<Vec<LedgerEntry>, ServerError>;

    /// Forfeiture/no-show: offsets every unsettled accrual up to and
    /// including `as_of_month`. Succeeds with zero entries when there is
    /// nothing to reverse.
    async fn reverse_accruals(
        &self,
        student_id: &StudentId,
        as_of_month: BillingMonth,
        reversal_date: NaiveDate,
    ) -> Result<ReversalOutcome, ServerError>;
}

pub(crate) struct AccrualUsecaseImpl<
    R = LedgerRepositoryImpl, // Default.
> where
    R: LedgerRepository,
{
    repository: Arc<R>,
    locks: Arc<StudentLocks>,
}

#[async_trait]
impl<R> AccrualUsecase for AccrualUsecaseImpl<R>
where
    R: LedgerRepository,
{
    async fn accrue_month(
        &self,
        student_id: &StudentId,
        month: BillingMonth,
        charges: Vec<AccrualCharge>,
    ) -> Result<Vec<LedgerEntry>, ServerError> {
        for charge in &charges {
            if charge.student_id != *student_id || charge.month != month {
                return Err(InvalidAccrualCharge::new(
                    &charge.student_id,
                    &charge.month,
                    &charge.component,
                    "charge does not belong to this accrual batch",
                ));
            }
        }

        let _guard = self.locks.acquire(student_id).await;

        let existing = self.repository.entries_for_student(student_id).await?;
        let drafts = accrual_logic::build_accrual_entries(&charges, &existing)?;
        if drafts.is_empty() {
            return Ok(Vec::new());
        }
        let posted = self.repository.append_entries(drafts).await?;
        self.refresh_aggregate(student_id).await?;

        tracing::info!(
            student = %student_id,
            %month,
            entries = posted.len(),
            "accrued monthly obligations"
        );
        Ok(posted)
    }

    async fn reverse_accruals(
        &self,
        student_id: &StudentId,
        as_of_month: BillingMonth,
        reversal_date: NaiveDate,
    ) -> Result<ReversalOutcome, ServerError> {
        let _guard = self.locks.acquire(student_id).await;

        let existing = self.repository.entries_for_student(student_id).await?;
        let drafts = accrual_logic::build_reversal_entries(
            &existing,
            student_id,
            as_of_month,
            reversal_date,
        )?;
        if drafts.is_empty() {
            // Nothing accrued, or everything settled: forfeiture must not
            // fail merely because there is nothing to reverse.
            tracing::info!(student = %student_id, %as_of_month, "nothing to reverse");
            return Ok(ReversalOutcome {
                student_id: student_id.clone(),
                as_of_month,
                entries: Vec::new(),
                total_reversed: 0.0,
            });
        }

        let posted = self.repository.append_entries(drafts).await?;
        self.refresh_aggregate(student_id).await?;

        let total_reversed = posted.iter().map(|e| e.total_debit()).sum();
        tracing::info!(
            student = %student_id,
            %as_of_month,
            entries = posted.len(),
            total_reversed,
            "reversed outstanding accruals"
        );
        Ok(ReversalOutcome {
            student_id: student_id.clone(),
            as_of_month,
            entries: posted,
            total_reversed,
        })
    }
}

impl<R: LedgerRepository> AccrualUsecaseImpl<R> {
    pub(crate) fn new(repository: Arc<R>, locks: Arc<StudentLocks>) -> Self {
        Self { repository, locks }
    }

    async fn refresh_aggregate(&self, student_id: &StudentId) -> Result<(), ServerError> {
        let all = self.repository.entries_for_student(student_id).await?;
        let aggregate = debtor_rollup::recompute(&all, student_id);
        self.repository.save_debtor(&aggregate).await
    }
}
