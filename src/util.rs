use std::sync::Arc;

use chrono::NaiveDate;
use fractic_server_error::ServerError;

use crate::{
    data::datasources::{
        charges_csv_datasource::{ChargesCsvDatasource as _, ChargesCsvDatasourceImpl},
        ledger_store_datasource::LedgerStoreDatasource as _,
        payments_csv_datasource::{PaymentsCsvDatasource as _, PaymentsCsvDatasourceImpl},
    },
    data::repositories::ledger_repository_impl::LedgerRepositoryImpl,
    domain::logic::debtor_rollup,
    domain::repositories::ledger_repository::LedgerRepository as _,
    domain::usecases::{
        accrual_usecase::{AccrualUsecase as _, AccrualUsecaseImpl},
        allocate_payment_usecase::{AllocatePaymentUsecase as _, AllocatePaymentUsecaseImpl},
        debtor_usecase::{DebtorUsecase as _, DebtorUsecaseImpl},
        student_locks::StudentLocks,
    },
    entities::{
        AccrualCharge, BillingMonth, DebtorAggregate, DriftReport, LeaseState, LedgerEntry,
        Obligation, Payment, PaymentReceipt, ReversalOutcome, StudentId,
    },
    presentation::journal_printer::JournalPrinter,
};

pub type Journal = String;

/// The payment allocation and double-entry ledger engine. One instance owns
/// the ledger store, the per-student lock registry, and the operations around
/// them; everything else in the crate is wiring behind this facade.
pub struct LeaseLedgerEngine {
    repository: Arc<LedgerRepositoryImpl>,
    allocate_payment_usecase: AllocatePaymentUsecaseImpl,
    accrual_usecase: AccrualUsecaseImpl,
    debtor_usecase: DebtorUsecaseImpl,
    payments_datasource: PaymentsCsvDatasourceImpl,
    charges_datasource: ChargesCsvDatasourceImpl,
    printer: JournalPrinter,
}

impl LeaseLedgerEngine {
    pub fn new() -> Self {
        let repository = Arc::new(LedgerRepositoryImpl::new());
        let locks = Arc::new(StudentLocks::new());
        Self {
            allocate_payment_usecase: AllocatePaymentUsecaseImpl::new(
                repository.clone(),
                locks.clone(),
            ),
            accrual_usecase: AccrualUsecaseImpl::new(repository.clone(), locks.clone()),
            debtor_usecase: DebtorUsecaseImpl::new(repository.clone(), locks),
            payments_datasource: PaymentsCsvDatasourceImpl::new(),
            charges_datasource: ChargesCsvDatasourceImpl::new(),
            printer: JournalPrinter::new(),
            repository,
        }
    }

    // Obligations & allocation.
    // ---

    /// What the student still owes per (month, component), oldest first.
    pub async fn outstanding(
        &self,
        student_id: &StudentId,
        as_of: NaiveDate,
    ) -> Result<Vec<Obligation>, ServerError> {
        self.debtor_usecase.outstanding(student_id, as_of).await
    }

    /// Allocates one payment: FIFO per component, posted as balanced entries,
    /// aggregate recomputed — all inside the student's critical section. On
    /// any failure nothing is written and the attempt can simply be retried.
    pub async fn allocate_payment(
        &self,
        payment: Payment,
    ) -> Result<PaymentReceipt, ServerError> {
        self.allocate_payment_usecase.allocate(payment).await
    }

    /// Batch intake: parses a payments CSV and allocates each payment in
    /// order. Stops at the first failure (everything before it stays posted).
    pub async fn allocate_payments_csv(
        &self,
        payments_csv: &str,
    ) -> Result<Vec<PaymentReceipt>, ServerError> {
        let payments = self.payments_datasource.from_string(payments_csv)?;
        let mut receipts = Vec::with_capacity(payments.len());
        for payment in payments {
            receipts.push(self.allocate_payment_usecase.allocate(payment).await?);
        }
        Ok(receipts)
    }

    pub async fn allocate_payments_file<P>(
        &self,
        payments_csv: P,
    ) -> Result<Vec<PaymentReceipt>, ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let payments = self.payments_datasource.from_file(payments_csv)?;
        let mut receipts = Vec::with_capacity(payments.len());
        for payment in payments {
            receipts.push(self.allocate_payment_usecase.allocate(payment).await?);
        }
        Ok(receipts)
    }

    // Accrual & reversal.
    // ---

    /// Posts one student's obligations for a month. Idempotent per
    /// (student, month, component).
    pub async fn accrue_month(
        &self,
        student_id: &StudentId,
        month: BillingMonth,
        charges: Vec<AccrualCharge>,
    ) -> Result<Vec<LedgerEntry>, ServerError> {
        self.accrual_usecase
            .accrue_month(student_id, month, charges)
            .await
    }

    /// Runs a billing schedule CSV: charges are grouped per (student, month)
    /// and accrued batch by batch.
    pub async fn accrue_schedule_csv(
        &self,
        charges_csv: &str,
    ) -> Result<Vec<LedgerEntry>, ServerError> {
        let charges = self.charges_datasource.from_string(charges_csv)?;
        self.accrue_grouped(charges).await
    }

    pub async fn accrue_schedule_file<P>(
        &self,
        charges_csv: P,
    ) -> Result<Vec<LedgerEntry>, ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        let charges = self.charges_datasource.from_file(charges_csv)?;
        self.accrue_grouped(charges).await
    }

    /// Forfeiture/no-show: reverses every unsettled accrual through
    /// `as_of_month`. A student with nothing to reverse succeeds with zero
    /// entries.
    pub async fn reverse_accruals(
        &self,
        student_id: &StudentId,
        as_of_month: BillingMonth,
        reversal_date: NaiveDate,
    ) -> Result<ReversalOutcome, ServerError> {
        self.accrual_usecase
            .reverse_accruals(student_id, as_of_month, reversal_date)
            .await
    }

    // Debtor rollups.
    // ---

    /// Recomputes the student's rollup from the ledger and rewrites the
    /// stored copy.
    pub async fn debtor(&self, student_id: &StudentId) -> Result<DebtorAggregate, ServerError> {
        self.debtor_usecase.recompute(student_id).await
    }

    pub async fn lease_state(&self, student_id: &StudentId) -> Result<LeaseState, ServerError> {
        self.debtor_usecase.lease_state(student_id).await
    }

    /// Reconciliation sweep over every student: compares cached rollups with
    /// fresh recomputations, repairs drift, and reports what was found.
    pub async fn reconcile(&self) -> Result<Vec<DriftReport>, ServerError> {
        self.debtor_usecase.reconcile().await
    }

    // Audit & persistence.
    // ---

    /// Renders the whole posted ledger as an hledger-style journal.
    pub async fn journal(&self) -> Result<Journal, ServerError> {
        let entries = self.repository.all_entries().await?;
        let students = self.repository.student_ids().await?;
        let aggregates: Vec<DebtorAggregate> = students
            .iter()
            .map(|student_id| debtor_rollup::recompute(&entries, student_id))
            .collect();
        Ok(self.printer.print_journal(&entries, &aggregates))
    }

    pub async fn save_snapshot<P>(&self, path: P) -> Result<(), ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        self.repository
            .datasource()
            .save_snapshot(path.as_ref())
            .await
    }

    pub async fn load_snapshot<P>(&self, path: P) -> Result<(), ServerError>
    where
        P: AsRef<std::path::Path> + Send,
    {
        self.repository
            .datasource()
            .load_snapshot(path.as_ref())
            .await
    }

    // --

    async fn accrue_grouped(
        &self,
        charges: Vec<AccrualCharge>,
    ) -> Result<Vec<LedgerEntry>, ServerError> {
        let mut grouped: std::collections::BTreeMap<(StudentId, BillingMonth), Vec<AccrualCharge>> =
            std::collections::BTreeMap::new();
        for charge in charges {
            grouped
                .entry((charge.student_id.clone(), charge.month))
                .or_default()
                .push(charge);
        }
        let mut posted = Vec::new();
        for ((student_id, month), batch) in grouped {
            posted.extend(
                self.accrual_usecase
                    .accrue_month(&student_id, month, batch)
                    .await?,
            );
        }
        Ok(posted)
    }
}

impl Default for LeaseLedgerEngine {
    fn default() -> Self {
        Self::new()
    }
}
