use chrono::NaiveDate;
use fractic_server_error::ServerError;

use crate::errors::LedgerImbalanceError;

use super::{
    account::Account, billing_month::BillingMonth, component::ComponentType, student::StudentId,
};

/// Tolerance for balance comparisons. Amounts are cash values carried as
/// floats; anything under half a cent is rounding noise, not a real residual.
pub const AMOUNT_EPSILON: f64 = 0.005;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
pub struct EntryId(pub(crate) u64);

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum EntrySource {
    Accrual,
    Payment,
    Reversal,
    Adjustment,
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum EntryStatus {
    Posted,
    Void,
}

/// One leg of a balanced entry. Exactly one of debit/credit is non-zero.
#[derive(Debug, Clone)]
pub struct LedgerLine {
    pub account: Account,
    pub debit: f64,
    pub credit: f64,
    pub student_id: StudentId,
    /// None for lines not tied to a billing period (e.g. unapplied credit).
    pub month: Option<BillingMonth>,
    pub component: ComponentType,
}

/// A balanced set of account lines recording one financial event. Entries are
/// append-only: corrections happen via new reversal or adjustment entries
/// referencing the original, never by editing a posted entry.
#[derive(Debug, Clone)]
pub struct LedgerEntry {
    pub id: EntryId,
    pub date: NaiveDate,
    pub description: String,
    pub source: EntrySource,
    /// Links back to the originating payment, accrual batch, or (for
    /// reversals) the original entry ids.
    pub source_ref: String,
    pub status: EntryStatus,
    pub lines: Vec<LedgerLine>,
}

// --

impl LedgerLine {
    pub fn debit(
        account: impl Into<Account>,
        amount: f64,
        student_id: StudentId,
        month: Option<BillingMonth>,
        component: ComponentType,
    ) -> Self {
        Self {
            account: account.into(),
            debit: amount,
            credit: 0.0,
            student_id,
            month,
            component,
        }
    }

    pub fn credit(
        account: impl Into<Account>,
        amount: f64,
        student_id: StudentId,
        month: Option<BillingMonth>,
        component: ComponentType,
    ) -> Self {
        Self {
            account: account.into(),
            debit: 0.0,
            credit: amount,
            student_id,
            month,
            component,
        }
    }
}

impl LedgerEntry {
    /// Builds a posted entry, rejecting any line set whose debits and credits
    /// do not cancel. This is the only way the engine constructs entries; the
    /// storage layer re-checks the same invariant at write time.
    pub fn balanced(
        id: EntryId,
        date: NaiveDate,
        description: impl Into<String>,
        source: EntrySource,
        source_ref: impl Into<String>,
        lines: Vec<LedgerLine>,
    ) -> Result<Self, ServerError> {
        let description = description.into();
        let total_debit: f64 = lines.iter().map(|l| l.debit).sum();
        let total_credit: f64 = lines.iter().map(|l| l.credit).sum();
        if (total_debit - total_credit).abs() > AMOUNT_EPSILON {
            return Err(LedgerImbalanceError::new(
                &description,
                total_debit,
                total_credit,
            ));
        }
        Ok(Self {
            id,
            date,
            description,
            source,
            source_ref: source_ref.into(),
            status: EntryStatus::Posted,
            lines,
        })
    }

    pub fn total_debit(&self) -> f64 {
        self.lines.iter().map(|l| l.debit).sum()
    }

    pub fn total_credit(&self) -> f64 {
        self.lines.iter().map(|l| l.credit).sum()
    }

    pub fn is_posted(&self) -> bool {
        self.status == EntryStatus::Posted
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "txn-{:06}", self.0)
    }
}

impl std::fmt::Display for EntrySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntrySource::Accrual => write!(f, "accrual"),
            EntrySource::Payment => write!(f, "payment"),
            EntrySource::Reversal => write!(f, "reversal"),
            EntrySource::Adjustment => write!(f, "adjustment"),
        }
    }
}
