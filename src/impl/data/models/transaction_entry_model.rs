use std::str::FromStr;

use fractic_server_error::ServerError;
use serde_derive::{Deserialize, Serialize};

use crate::entities::{
    cash, expense, income, liability, Account, AccountDirectory, AccountKind, BillingMonth,
    ComponentType, EntryId, EntrySource, EntryStatus, LedgerEntry, LedgerLine, ReceivableAccount,
    AMOUNT_EPSILON,
};
use crate::errors::{
    CorruptStoredEntry, LedgerImbalanceError, PartialWriteError, UnknownAccountCode,
};
use crate::impl_ext::standard_accounts::RECEIVABLE_ROOT;

use super::billing_month_model::BillingMonthModel;
use super::iso_date_model::ISODateModel;

/// Stored shape of a ledger entry, stable across store implementations. The
/// field names are the document-store contract, not Rust convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransactionEntryModel {
    pub transaction_id: String,
    /// ISO date (YYYY-MM-DD).
    pub date: String,
    pub description: String,
    pub source: String,
    pub source_id: String,
    pub status: String,
    pub entries: Vec<TransactionLineModel>,
    pub total_debit: f64,
    pub total_credit: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransactionLineModel {
    pub account_code: String,
    pub account_name: String,
    pub debit: f64,
    pub credit: f64,
    pub metadata: LineMetadataModel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LineMetadataModel {
    pub student_id: String,
    /// YYYY-MM, absent for non-monthly lines.
    pub month: Option<String>,
    pub component_type: String,
}

// --

impl TransactionEntryModel {
    pub(crate) fn from_domain(entry: &LedgerEntry, directory: &AccountDirectory) -> Self {
        Self {
            transaction_id: entry.id.to_string(),
            date: entry.date.format("%Y-%m-%d").to_string(),
            description: entry.description.clone(),
            source: entry.source.to_string(),
            source_id: entry.source_ref.clone(),
            status: match entry.status {
                EntryStatus::Posted => "posted".to_string(),
                EntryStatus::Void => "void".to_string(),
            },
            entries: entry
                .lines
                .iter()
                .map(|line| TransactionLineModel {
                    account_code: line.account.code().to_string(),
                    account_name: directory.display_name(line.account.code()),
                    debit: line.debit,
                    credit: line.credit,
                    metadata: LineMetadataModel {
                        student_id: line.student_id.to_string(),
                        month: line.month.map(|m| m.to_string()),
                        component_type: line.component.to_string(),
                    },
                })
                .collect(),
            total_debit: entry.total_debit(),
            total_credit: entry.total_credit(),
        }
    }

    pub(crate) fn to_domain(&self, directory: &AccountDirectory) -> Result<LedgerEntry, ServerError> {
        let id = parse_entry_id(&self.transaction_id)?;
        let date: chrono::NaiveDate = ISODateModel::from_str(&self.date)?.into();
        let source = parse_source(&self.transaction_id, &self.source)?;
        let status = match self.status.as_str() {
            "posted" => EntryStatus::Posted,
            "void" => EntryStatus::Void,
            other => {
                return Err(CorruptStoredEntry::new(
                    &self.transaction_id,
                    &format!("unknown status '{other}'"),
                ))
            }
        };
        let lines = self
            .entries
            .iter()
            .map(|line| line.to_domain(&self.transaction_id, directory))
            .collect::<Result<Vec<LedgerLine>, ServerError>>()?;
        Ok(LedgerEntry {
            id,
            date,
            description: self.description.clone(),
            source,
            source_ref: self.source_id.clone(),
            status,
            lines,
        })
    }

    /// Write-time guard, run by the storage layer on every entry regardless
    /// of what the caller already checked: totals must cancel, every line
    /// must carry exactly one side, and an entry with fewer than two lines is
    /// by definition missing a leg.
    pub(crate) fn check_write_invariants(&self) -> Result<(), ServerError> {
        if self.entries.len() < 2 {
            return Err(PartialWriteError::new(&format!(
                "entry '{}' has {} line(s); a balanced entry needs both legs",
                self.transaction_id,
                self.entries.len()
            )));
        }
        for line in &self.entries {
            let debit_set = line.debit.abs() > AMOUNT_EPSILON;
            let credit_set = line.credit.abs() > AMOUNT_EPSILON;
            if debit_set == credit_set {
                return Err(PartialWriteError::new(&format!(
                    "entry '{}' line on '{}' must carry exactly one of debit/credit",
                    self.transaction_id, line.account_code
                )));
            }
            if line.debit < 0.0 || line.credit < 0.0 {
                return Err(PartialWriteError::new(&format!(
                    "entry '{}' line on '{}' carries a negative amount",
                    self.transaction_id, line.account_code
                )));
            }
        }
        let debit: f64 = self.entries.iter().map(|l| l.debit).sum();
        let credit: f64 = self.entries.iter().map(|l| l.credit).sum();
        if (debit - credit).abs() > AMOUNT_EPSILON
            || (debit - self.total_debit).abs() > AMOUNT_EPSILON
            || (credit - self.total_credit).abs() > AMOUNT_EPSILON
        {
            return Err(LedgerImbalanceError::new(&self.description, debit, credit));
        }
        Ok(())
    }
}

impl TransactionLineModel {
    fn to_domain(
        &self,
        transaction_id: &str,
        directory: &AccountDirectory,
    ) -> Result<LedgerLine, ServerError> {
        let month: Option<BillingMonth> = self
            .metadata
            .month
            .as_deref()
            .map(BillingMonthModel::from_str)
            .transpose()?
            .map(Into::into);
        let component = parse_component(transaction_id, &self.metadata.component_type)?;
        let student_id = crate::entities::student(self.metadata.student_id.clone());
        Ok(LedgerLine {
            account: account_from_code(&self.account_code, directory)?,
            debit: self.debit,
            credit: self.credit,
            student_id,
            month,
            component,
        })
    }
}

fn parse_entry_id(transaction_id: &str) -> Result<EntryId, ServerError> {
    transaction_id
        .strip_prefix("txn-")
        .and_then(|n| n.parse::<u64>().ok())
        .map(EntryId)
        .ok_or_else(|| CorruptStoredEntry::new(transaction_id, "malformed transaction id"))
}

fn parse_source(transaction_id: &str, source: &str) -> Result<EntrySource, ServerError> {
    match source {
        "accrual" => Ok(EntrySource::Accrual),
        "payment" => Ok(EntrySource::Payment),
        "reversal" => Ok(EntrySource::Reversal),
        "adjustment" => Ok(EntrySource::Adjustment),
        other => Err(CorruptStoredEntry::new(
            transaction_id,
            &format!("unknown source '{other}'"),
        )),
    }
}

fn parse_component(transaction_id: &str, component: &str) -> Result<ComponentType, ServerError> {
    match component {
        "rent" => Ok(ComponentType::Rent),
        "admin" => Ok(ComponentType::Admin),
        "deposit" => Ok(ComponentType::Deposit),
        "other" => Ok(ComponentType::Other),
        other => Err(CorruptStoredEntry::new(
            transaction_id,
            &format!("unknown component type '{other}'"),
        )),
    }
}

fn account_from_code(code: &str, directory: &AccountDirectory) -> Result<Account, ServerError> {
    if code.starts_with(&format!("{RECEIVABLE_ROOT}:")) {
        return Ok(Account::Receivable(ReceivableAccount(code.to_string())));
    }
    let info = directory
        .lookup(code)
        .ok_or_else(|| UnknownAccountCode::new(code))?;
    Ok(match info.kind {
        AccountKind::Asset => cash(code).into(),
        AccountKind::Liability => liability(code).into(),
        AccountKind::Income => income(code).into(),
        AccountKind::Expense => expense(code).into(),
    })
}
