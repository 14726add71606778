use std::sync::Arc;

use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::data::repositories::ledger_repository_impl::LedgerRepositoryImpl;
use crate::domain::logic::{
    debtor_rollup, entry_builder::build_payment_entries, payment_allocator,
};
use crate::domain::repositories::ledger_repository::LedgerRepository;
use crate::entities::{Payment, PaymentReceipt, PaymentStatus};
use crate::errors::DuplicatePayment;

use super::student_locks::StudentLocks;

#[async_trait]
pub trait AllocatePaymentUsecase: Send + Sync {
    async fn allocate(&self, payment: Payment) -> Result<PaymentReceipt, ServerError>;
}

pub(crate) struct AllocatePaymentUsecaseImpl<
    R = LedgerRepositoryImpl, // Default.
> where
    R: LedgerRepository,
{
    repository: Arc<R>,
    locks: Arc<StudentLocks>,
}

#[async_trait]
impl<R> AllocatePaymentUsecase for AllocatePaymentUsecaseImpl<R>
where
    R: LedgerRepository,
{
    /// The unit of recovery: everything up to `append_entries` is pure
    /// computation over a snapshot read, and the append is atomic, so any
    /// failure leaves the student's balances exactly as they were.
    async fn allocate(&self, payment: Payment) -> Result<PaymentReceipt, ServerError> {
        payment.validate()?;

        let _guard = self.locks.acquire(&payment.student_id).await;

        if self.repository.payment_exists(&payment.id).await? {
            return Err(DuplicatePayment::new(&payment.id));
        }

        let entries = self
            .repository
            .entries_for_student(&payment.student_id)
            .await?;
        let plan = payment_allocator::allocate(&payment, &entries);
        let drafts = build_payment_entries(&plan, &payment)?;
        let posted = self.repository.append_entries(drafts).await?;
        self.repository
            .record_payment(&payment, PaymentStatus::Allocated)
            .await?;

        let all = self
            .repository
            .entries_for_student(&payment.student_id)
            .await?;
        let aggregate = debtor_rollup::recompute(&all, &payment.student_id);
        self.repository.save_debtor(&aggregate).await?;

        tracing::info!(
            payment = %payment.id,
            student = %payment.student_id,
            lines = plan.lines.len(),
            total = plan.total_allocated(),
            "payment allocated"
        );

        Ok(PaymentReceipt {
            payment_id: payment.id.clone(),
            student_id: payment.student_id.clone(),
            plan,
            entries: posted,
            aggregate,
        })
    }
}

impl<R: LedgerRepository> AllocatePaymentUsecaseImpl<R> {
    pub(crate) fn new(repository: Arc<R>, locks: Arc<StudentLocks>) -> Self {
        Self { repository, locks }
    }
}
