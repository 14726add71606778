use chrono::NaiveDate;
use fractic_server_error::ServerError;

use crate::errors::MalformedPayment;

use super::{
    allocation::AllocationPlan, component::ComponentType, debtor::DebtorAggregate,
    ledger_entry::{LedgerEntry, AMOUNT_EPSILON},
    student::StudentId,
};

#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct PaymentId(pub(crate) String);

pub fn payment_id(id: impl Into<String>) -> PaymentId {
    PaymentId(id.into())
}

/// One typed slice of a payment. The component carries its own amount; a
/// payment is the sum of its components, nothing is inferred downstream.
#[derive(Debug, Clone, Copy, PartialEq, serde_derive::Serialize, serde_derive::Deserialize)]
pub enum PaymentComponent {
    Rent(f64),
    Admin(f64),
    Deposit(f64),
    Other(f64),
}

/// An incoming student payment. Immutable once posted; amendments happen via
/// a reversal plus a new payment.
#[derive(Debug, Clone)]
pub struct Payment {
    pub id: PaymentId,
    pub student_id: StudentId,
    pub date: NaiveDate,
    pub total_amount: f64,
    pub components: Vec<PaymentComponent>,
    /// Acting user recorded by the upstream auth middleware. Opaque here.
    pub created_by: Option<String>,
    /// Proof-of-payment URL from the upstream file store. Opaque here.
    pub proof_url: Option<String>,
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum PaymentStatus {
    Received,
    Allocated,
}

/// Everything a successful allocation produced, returned to the caller in one
/// piece: the plan that was decided, the entries that recorded it, and the
/// aggregate recomputed afterwards.
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    pub payment_id: PaymentId,
    pub student_id: StudentId,
    pub plan: AllocationPlan,
    pub entries: Vec<LedgerEntry>,
    pub aggregate: DebtorAggregate,
}

// --

impl PaymentComponent {
    pub fn component_type(&self) -> ComponentType {
        match self {
            PaymentComponent::Rent(_) => ComponentType::Rent,
            PaymentComponent::Admin(_) => ComponentType::Admin,
            PaymentComponent::Deposit(_) => ComponentType::Deposit,
            PaymentComponent::Other(_) => ComponentType::Other,
        }
    }

    pub fn amount(&self) -> f64 {
        match self {
            PaymentComponent::Rent(a)
            | PaymentComponent::Admin(a)
            | PaymentComponent::Deposit(a)
            | PaymentComponent::Other(a) => *a,
        }
    }
}

impl Payment {
    /// Boundary validation. Rejects the malformed shapes the allocator must
    /// never have to guess about: empty component lists, negative or
    /// non-finite amounts, totals that disagree with the component sum, and
    /// repeated component types. Zero-amount components are allowed (they are
    /// skipped during allocation).
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.components.is_empty() {
            return Err(MalformedPayment::new(&self.id, "no components"));
        }
        for component in &self.components {
            let amount = component.amount();
            if !amount.is_finite() || amount < 0.0 {
                return Err(MalformedPayment::with_debug(
                    &self.id,
                    "component amount must be a non-negative number",
                    component,
                ));
            }
        }
        let component_sum: f64 = self.components.iter().map(|c| c.amount()).sum();
        if (component_sum - self.total_amount).abs() > AMOUNT_EPSILON {
            return Err(MalformedPayment::new(
                &self.id,
                "total amount does not equal the sum of components",
            ));
        }
        for component_type in ComponentType::all() {
            let occurrences = self
                .components
                .iter()
                .filter(|c| c.component_type() == component_type)
                .count();
            if occurrences > 1 {
                return Err(MalformedPayment::new(
                    &self.id,
                    "component type appears more than once",
                ));
            }
        }
        Ok(())
    }

    pub fn component(&self, component_type: ComponentType) -> Option<&PaymentComponent> {
        self.components
            .iter()
            .find(|c| c.component_type() == component_type)
    }
}

impl PaymentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Received => write!(f, "received"),
            PaymentStatus::Allocated => write!(f, "allocated"),
        }
    }
}
