use super::{billing_month::BillingMonth, component::ComponentType};

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum AllocationType {
    /// Settles an existing outstanding obligation.
    Settlement,
    /// Credits the first future month with no existing obligation for a
    /// recurring component.
    AdvancePayment,
    /// Remainder that exceeds all known and projected obligations. Carried as
    /// an explicit credit against the student's receivable, never dropped.
    UnappliedCredit,
}

/// One line of an allocation plan: this much of the payment settles that
/// (month, component) obligation.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationLine {
    /// None only for unapplied credit.
    pub month: Option<BillingMonth>,
    pub component: ComponentType,
    pub amount_allocated: f64,
    pub original_outstanding: f64,
    pub new_outstanding: f64,
    pub allocation_type: AllocationType,
}

/// Ordered output of the allocator. Conservation invariant: the lines sum to
/// the payment's component total, exactly.
#[derive(Debug, Clone, Default)]
pub struct AllocationPlan {
    pub lines: Vec<AllocationLine>,
}

// --

impl AllocationPlan {
    pub fn total_allocated(&self) -> f64 {
        self.lines.iter().map(|l| l.amount_allocated).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl std::fmt::Display for AllocationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocationType::Settlement => write!(f, "settlement"),
            AllocationType::AdvancePayment => write!(f, "advance_payment"),
            AllocationType::UnappliedCredit => write!(f, "unapplied_credit"),
        }
    }
}
