use crate::entities::AMOUNT_EPSILON;

/// Round a cash amount to cents. Allocation arithmetic stays in floats; every
/// amount that reaches a ledger line goes through this first.
pub(crate) fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// True when the amount is indistinguishable from zero at cash resolution.
pub(crate) fn is_zero(amount: f64) -> bool {
    amount.abs() <= AMOUNT_EPSILON
}

/// Outstanding amounts clamp at zero: an over-credited obligation reads as
/// settled, the surplus shows up in the debtor balance instead.
pub(crate) fn outstanding_of(owed: f64, paid: f64) -> f64 {
    let outstanding = owed - paid;
    if outstanding <= AMOUNT_EPSILON {
        0.0
    } else {
        round_cents(outstanding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_cents() {
        assert_eq!(round_cents(36.666666), 36.67);
        assert_eq!(round_cents(-0.005), -0.01);
        assert_eq!(round_cents(160.0), 160.0);
    }

    #[test]
    fn zero_within_epsilon() {
        assert!(is_zero(0.004));
        assert!(is_zero(-0.004));
        assert!(!is_zero(0.01));
    }

    #[test]
    fn outstanding_clamps_at_zero() {
        assert_eq!(outstanding_of(160.0, 160.0), 0.0);
        assert_eq!(outstanding_of(160.0, 180.0), 0.0);
        assert_eq!(outstanding_of(160.0, 100.0), 60.0);
        // Sub-epsilon residuals read as settled.
        assert_eq!(outstanding_of(160.0, 159.996), 0.0);
    }

}
