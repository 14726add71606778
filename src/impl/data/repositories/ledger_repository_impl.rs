use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::data::datasources::ledger_store_datasource::{
    LedgerMemoryDatasource, LedgerStoreDatasource,
};
use crate::data::models::{
    debtor_document_model::DebtorDocumentModel, payment_document_model::PaymentDocumentModel,
    transaction_entry_model::TransactionEntryModel,
};
use crate::domain::repositories::ledger_repository::LedgerRepository;
use crate::entities::{
    AccountDirectory, DebtorAggregate, LedgerEntry, Payment, PaymentId, PaymentStatus, StudentId,
};
use crate::impl_ext::standard_accounts::standard_directory;

pub struct LedgerRepositoryImpl<DS = LedgerMemoryDatasource>
where
    DS: LedgerStoreDatasource,
{
    datasource: DS,
    directory: AccountDirectory,
}

#[async_trait]
impl<DS> LedgerRepository for LedgerRepositoryImpl<DS>
where
    DS: LedgerStoreDatasource,
{
    async fn entries_for_student(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<LedgerEntry>, ServerError> {
        Ok(self
            .all_entries()
            .await?
            .into_iter()
            .filter(|entry| {
                entry
                    .lines
                    .iter()
                    .any(|line| line.student_id == *student_id)
            })
            .collect())
    }

    async fn all_entries(&self) -> Result<Vec<LedgerEntry>, ServerError> {
        self.datasource
            .all_entries()
            .await?
            .iter()
            .map(|model| model.to_domain(&self.directory))
            .collect()
    }

    async fn append_entries(
        &self,
        entries: Vec<LedgerEntry>,
    ) -> Result<Vec<LedgerEntry>, ServerError> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }
        let batch: Vec<TransactionEntryModel> = entries
            .iter()
            .map(|entry| TransactionEntryModel::from_domain(entry, &self.directory))
            .collect();
        self.datasource
            .append_entries(batch)
            .await?
            .iter()
            .map(|model| model.to_domain(&self.directory))
            .collect()
    }

    async fn payment_exists(&self, payment_id: &PaymentId) -> Result<bool, ServerError> {
        self.datasource.payment_exists(payment_id.as_str()).await
    }

    async fn record_payment(
        &self,
        payment: &Payment,
        status: PaymentStatus,
    ) -> Result<(), ServerError> {
        self.datasource
            .upsert_payment(PaymentDocumentModel::from_domain(payment, status))
            .await
    }

    async fn save_debtor(&self, aggregate: &DebtorAggregate) -> Result<(), ServerError> {
        self.datasource
            .replace_debtor(DebtorDocumentModel::from_domain(aggregate))
            .await
    }

    async fn load_debtor(
        &self,
        student_id: &StudentId,
    ) -> Result<Option<DebtorAggregate>, ServerError> {
        self.datasource
            .load_debtor(student_id.as_str())
            .await?
            .map(|model| model.to_domain())
            .transpose()
    }

    async fn student_ids(&self) -> Result<Vec<StudentId>, ServerError> {
        Ok(self
            .datasource
            .student_ids()
            .await?
            .into_iter()
            .map(crate::entities::student)
            .collect())
    }
}

impl LedgerRepositoryImpl<LedgerMemoryDatasource> {
    pub fn new() -> Self {
        Self::with_datasource(LedgerMemoryDatasource::new())
    }
}

impl Default for LedgerRepositoryImpl<LedgerMemoryDatasource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<DS> LedgerRepositoryImpl<DS>
where
    DS: LedgerStoreDatasource,
{
    pub fn with_datasource(datasource: DS) -> Self {
        Self {
            datasource,
            directory: standard_directory(),
        }
    }

    pub(crate) fn datasource(&self) -> &DS {
        &self.datasource
    }
}
