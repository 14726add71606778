use super::{billing_month::BillingMonth, component::ComponentType, student::StudentId};

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum MonthStatus {
    Paid,
    Partial,
    Outstanding,
    /// Paid ahead of any accrued obligation.
    Advance,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyPosition {
    pub month: BillingMonth,
    pub component: ComponentType,
    pub owed: f64,
    pub paid: f64,
    pub outstanding: f64,
    pub status: MonthStatus,
}

/// Per-student rollup of the ledger. Strictly a cache: every field is
/// reproducible by full recomputation from posted lines, and the stored copy
/// is rewritten wholesale on every recompute.
#[derive(Debug, Clone, PartialEq)]
pub struct DebtorAggregate {
    pub student_id: StudentId,
    pub total_owed: f64,
    pub total_paid: f64,
    /// total_owed - total_paid. Negative when the student holds unapplied
    /// credit or advances beyond what has accrued.
    pub current_balance: f64,
    pub monthly_breakdown: Vec<MonthlyPosition>,
}

/// Settlement lifecycle of a student's lease, derived from the ledger.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum LeaseState {
    NotAccrued,
    Accrued,
    PartiallySettled,
    Settled,
    /// Terminal: accruals were reversed on forfeiture/no-show.
    Forfeited,
}

/// One reconciliation mismatch: the cached aggregate disagreed with a fresh
/// recomputation (the usual footprint of a historical partial write).
#[derive(Debug, Clone)]
pub struct DriftReport {
    pub student_id: StudentId,
    pub cached: Option<DebtorAggregate>,
    pub recomputed: DebtorAggregate,
}

impl std::fmt::Display for MonthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MonthStatus::Paid => write!(f, "paid"),
            MonthStatus::Partial => write!(f, "partial"),
            MonthStatus::Outstanding => write!(f, "outstanding"),
            MonthStatus::Advance => write!(f, "advance"),
        }
    }
}
