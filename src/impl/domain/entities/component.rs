/// Classification of a payment or obligation amount. Each component type is
/// settled independently of the others.
#[derive(
    Debug, PartialEq, Eq, Hash, Clone, Copy, serde_derive::Serialize, serde_derive::Deserialize,
)]
pub enum ComponentType {
    Rent,
    Admin,
    Deposit,
    Other,
}

impl ComponentType {
    /// Fixed priority for deterministic allocation order within a month.
    pub fn priority(&self) -> u8 {
        match self {
            ComponentType::Rent => 0,
            ComponentType::Admin => 1,
            ComponentType::Deposit => 2,
            ComponentType::Other => 3,
        }
    }

    /// Rent recurs monthly; admin fees and deposits are once-off charges
    /// carried on the lease-start month. Only recurring components project a
    /// future obligation for advance payments.
    pub fn is_recurring(&self) -> bool {
        matches!(self, ComponentType::Rent)
    }

    pub fn all() -> [ComponentType; 4] {
        [
            ComponentType::Rent,
            ComponentType::Admin,
            ComponentType::Deposit,
            ComponentType::Other,
        ]
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentType::Rent => write!(f, "rent"),
            ComponentType::Admin => write!(f, "admin"),
            ComponentType::Deposit => write!(f, "deposit"),
            ComponentType::Other => write!(f, "other"),
        }
    }
}
