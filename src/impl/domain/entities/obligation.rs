use super::{billing_month::BillingMonth, component::ComponentType};

/// Derived view of what a student owes for one (month, component) tuple.
/// Never stored: recomputed on demand from posted ledger lines so the figure
/// cannot drift from the ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct Obligation {
    pub month: BillingMonth,
    pub component: ComponentType,
    pub owed: f64,
    pub paid: f64,
    pub outstanding: f64,
}

/// Latest accrued month and amount for a component, used to project the next
/// future obligation when a payment overshoots everything outstanding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccrualReference {
    pub latest_month: BillingMonth,
    pub monthly_amount: f64,
}
