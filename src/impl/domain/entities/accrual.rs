use fractic_server_error::ServerError;

use crate::errors::InvalidAccrualCharge;

use super::{
    billing_month::BillingMonth, component::ComponentType, ledger_entry::LedgerEntry,
    student::StudentId,
};

/// One component of a month's billing: the amount to recognize as owed before
/// any cash moves.
#[derive(Debug, Clone, PartialEq)]
pub struct AccrualCharge {
    pub student_id: StudentId,
    pub month: BillingMonth,
    pub component: ComponentType,
    pub amount: f64,
    pub description: String,
}

impl AccrualCharge {
    pub fn validate(&self) -> Result<(), ServerError> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(InvalidAccrualCharge::new(
                &self.student_id,
                &self.month,
                &self.component,
                "amount must be a positive number",
            ));
        }
        Ok(())
    }
}

/// Result of a forfeiture reversal. Zero entries is a legitimate outcome:
/// forfeiting a student who was never invoiced reverses nothing and succeeds.
#[derive(Debug, Clone)]
pub struct ReversalOutcome {
    pub student_id: StudentId,
    pub as_of_month: BillingMonth,
    pub entries: Vec<LedgerEntry>,
    pub total_reversed: f64,
}

impl ReversalOutcome {
    pub fn nothing_to_reverse(&self) -> bool {
        self.entries.is_empty()
    }
}
