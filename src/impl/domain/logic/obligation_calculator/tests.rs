use super::*;
use crate::domain::logic::testkit::{accrual_entry, d, m, payment_entry, s};
use crate::entities::ComponentType;

#[test]
fn owed_minus_paid_grouped_by_month_and_component() {
    let alice = s("alice");
    let entries = vec![
        accrual_entry(1, &alice, m(2024, 6), ComponentType::Rent, 160.0),
        accrual_entry(2, &alice, m(2024, 7), ComponentType::Rent, 160.0),
        payment_entry(
            3,
            &alice,
            d(2024, 6, 10),
            Some(m(2024, 6)),
            ComponentType::Rent,
            100.0,
        ),
    ];

    let open = outstanding(&entries, &alice, d(2024, 12, 31));
    assert_eq!(open.len(), 2);
    assert_eq!(open[0].month, m(2024, 6));
    assert_eq!(open[0].owed, 160.0);
    assert_eq!(open[0].paid, 100.0);
    assert_eq!(open[0].outstanding, 60.0);
    assert_eq!(open[1].month, m(2024, 7));
    assert_eq!(open[1].outstanding, 160.0);
}

#[test]
fn settled_obligations_are_omitted() {
    let alice = s("alice");
    let entries = vec![
        accrual_entry(1, &alice, m(2024, 6), ComponentType::Rent, 160.0),
        payment_entry(
            2,
            &alice,
            d(2024, 6, 10),
            Some(m(2024, 6)),
            ComponentType::Rent,
            160.0,
        ),
    ];
    assert!(outstanding(&entries, &alice, d(2024, 12, 31)).is_empty());
}

#[test]
fn sub_epsilon_residual_reads_as_settled() {
    let alice = s("alice");
    let entries = vec![
        accrual_entry(1, &alice, m(2024, 6), ComponentType::Rent, 160.0),
        payment_entry(
            2,
            &alice,
            d(2024, 6, 10),
            Some(m(2024, 6)),
            ComponentType::Rent,
            159.996,
        ),
    ];
    assert!(outstanding(&entries, &alice, d(2024, 12, 31)).is_empty());
}

#[test]
fn ordering_is_month_then_component_priority() {
    let alice = s("alice");
    let entries = vec![
        accrual_entry(1, &alice, m(2024, 6), ComponentType::Deposit, 220.0),
        accrual_entry(2, &alice, m(2024, 6), ComponentType::Rent, 160.0),
        accrual_entry(3, &alice, m(2024, 6), ComponentType::Admin, 20.0),
        accrual_entry(4, &alice, m(2024, 5), ComponentType::Rent, 160.0),
    ];

    let open = outstanding(&entries, &alice, d(2024, 12, 31));
    let order: Vec<(BillingMonth, ComponentType)> =
        open.iter().map(|o| (o.month, o.component)).collect();
    assert_eq!(
        order,
        vec![
            (m(2024, 5), ComponentType::Rent),
            (m(2024, 6), ComponentType::Rent),
            (m(2024, 6), ComponentType::Admin),
            (m(2024, 6), ComponentType::Deposit),
        ]
    );
}

#[test]
fn cutoff_excludes_later_entries() {
    let alice = s("alice");
    let entries = vec![
        accrual_entry(1, &alice, m(2024, 6), ComponentType::Rent, 160.0),
        accrual_entry(2, &alice, m(2024, 7), ComponentType::Rent, 160.0),
    ];
    let open = outstanding(&entries, &alice, d(2024, 6, 30));
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].month, m(2024, 6));
}

#[test]
fn other_students_lines_are_ignored() {
    let alice = s("alice");
    let bob = s("bob");
    let entries = vec![
        accrual_entry(1, &alice, m(2024, 6), ComponentType::Rent, 160.0),
        accrual_entry(2, &bob, m(2024, 6), ComponentType::Rent, 300.0),
    ];
    let open = outstanding(&entries, &alice, d(2024, 12, 31));
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].owed, 160.0);
}

#[test]
fn accrual_reference_tracks_latest_month() {
    let alice = s("alice");
    let entries = vec![
        accrual_entry(1, &alice, m(2024, 6), ComponentType::Rent, 160.0),
        accrual_entry(2, &alice, m(2024, 7), ComponentType::Rent, 175.0),
    ];
    let reference = accrual_reference(&entries, &alice, ComponentType::Rent).unwrap();
    assert_eq!(reference.latest_month, m(2024, 7));
    assert_eq!(reference.monthly_amount, 175.0);
    assert!(accrual_reference(&entries, &alice, ComponentType::Deposit).is_none());
}

#[test]
fn latest_referenced_month_sees_advance_credits() {
    let alice = s("alice");
    let entries = vec![
        accrual_entry(1, &alice, m(2024, 6), ComponentType::Rent, 160.0),
        // Advance credit against August, no accrual there yet.
        payment_entry(
            2,
            &alice,
            d(2024, 6, 20),
            Some(m(2024, 8)),
            ComponentType::Rent,
            60.0,
        ),
    ];
    assert_eq!(
        latest_referenced_month(&entries, &alice, ComponentType::Rent),
        Some(m(2024, 8))
    );
}
