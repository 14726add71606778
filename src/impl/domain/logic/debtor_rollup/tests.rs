use super::*;
use crate::domain::logic::testkit::{accrual_entry, d, m, payment_entry, s};
use crate::entities::{EntryId, LedgerLine};
use crate::impl_ext::standard_accounts::{student_receivable, CASH_BANK};

#[test]
fn totals_and_statuses_roll_up_from_lines() {
    let alice = s("alice");
    let entries = vec![
        accrual_entry(1, &alice, m(2024, 6), ComponentType::Rent, 160.0),
        accrual_entry(2, &alice, m(2024, 7), ComponentType::Rent, 160.0),
        accrual_entry(3, &alice, m(2024, 6), ComponentType::Admin, 20.0),
        payment_entry(
            4,
            &alice,
            d(2024, 6, 10),
            Some(m(2024, 6)),
            ComponentType::Rent,
            160.0,
        ),
        payment_entry(
            5,
            &alice,
            d(2024, 7, 10),
            Some(m(2024, 7)),
            ComponentType::Rent,
            40.0,
        ),
    ];

    let aggregate = recompute(&entries, &alice);
    assert_eq!(aggregate.total_owed, 340.0);
    assert_eq!(aggregate.total_paid, 200.0);
    assert_eq!(aggregate.current_balance, 140.0);

    let statuses: Vec<(BillingMonth, ComponentType, MonthStatus)> = aggregate
        .monthly_breakdown
        .iter()
        .map(|p| (p.month, p.component, p.status))
        .collect();
    assert_eq!(
        statuses,
        vec![
            (m(2024, 6), ComponentType::Rent, MonthStatus::Paid),
            (m(2024, 6), ComponentType::Admin, MonthStatus::Outstanding),
            (m(2024, 7), ComponentType::Rent, MonthStatus::Partial),
        ]
    );
}

#[test]
fn advance_credit_shows_as_advance_month() {
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
        payment_entry(
            3,
            &alice,
            d(2024, 6, 10),
            Some(m(2024, 7)),
            ComponentType::Rent,
            60.0,
        ),
    ];

    let aggregate = recompute(&entries, &alice);
    let july = aggregate
        .monthly_breakdown
        .iter()
        .find(|p| p.month == m(2024, 7))
        .unwrap();
    assert_eq!(july.status, MonthStatus::Advance);
    assert_eq!(july.paid, 60.0);
    // Paid ahead: the balance owes the student.
    assert_eq!(aggregate.current_balance, -60.0);
}

#[test]
fn unapplied_credit_feeds_total_paid_without_a_month_row() {
    let alice = s("alice");
    let unapplied = LedgerEntry::balanced(
        EntryId(2),
        d(2024, 6, 10),
        "Payment p1: unapplied credit (deposit)",
        EntrySource::Payment,
        "p1",
        vec![
            LedgerLine::debit(
                CASH_BANK.clone(),
                80.0,
                alice.clone(),
                None,
                ComponentType::Deposit,
            ),
            LedgerLine::credit(
                student_receivable(&alice),
                80.0,
                alice.clone(),
                None,
                ComponentType::Deposit,
            ),
        ],
    )
    .unwrap();
    let entries = vec![
        accrual_entry(1, &alice, m(2024, 6), ComponentType::Rent, 160.0),
        unapplied,
    ];

    let aggregate = recompute(&entries, &alice);
    assert_eq!(aggregate.total_paid, 80.0);
    assert_eq!(aggregate.current_balance, 80.0);
    assert_eq!(aggregate.monthly_breakdown.len(), 1);
}

#[test]
fn recompute_is_reproducible() {
    let alice = s("alice");
    let entries = vec![
        accrual_entry(1, &alice, m(2024, 6), ComponentType::Rent, 160.0),
        payment_entry(
            2,
            &alice,
            d(2024, 6, 10),
            Some(m(2024, 6)),
            ComponentType::Rent,
            100.0,
        ),
    ];
    assert_eq!(recompute(&entries, &alice), recompute(&entries, &alice));
}

#[test]
fn lease_state_walks_the_lifecycle() {
    let alice = s("alice");

    assert_eq!(lease_state(&[], &alice), LeaseState::NotAccrued);

    let accrued = vec![accrual_entry(1, &alice, m(2024, 6), ComponentType::Rent, 160.0)];
    assert_eq!(lease_state(&accrued, &alice), LeaseState::Accrued);

    let mut partially = accrued.clone();
    partially.push(payment_entry(
        2,
        &alice,
        d(2024, 6, 10),
        Some(m(2024, 6)),
        ComponentType::Rent,
        100.0,
    ));
    assert_eq!(lease_state(&partially, &alice), LeaseState::PartiallySettled);

    let mut settled = accrued.clone();
    settled.push(payment_entry(
        3,
        &alice,
        d(2024, 6, 10),
        Some(m(2024, 6)),
        ComponentType::Rent,
        160.0,
    ));
    assert_eq!(lease_state(&settled, &alice), LeaseState::Settled);
}

#[test]
fn forfeiture_is_terminal() {
    let alice = s("alice");
    let reversal = LedgerEntry::balanced(
        EntryId(2),
        d(2024, 7, 1),
        "Forfeiture reversal: rent (alice, through 2024-06)",
        EntrySource::Reversal,
        "txn-000001",
        vec![
            LedgerLine::debit(
                crate::impl_ext::standard_accounts::RENTAL_INCOME.clone(),
                160.0,
                alice.clone(),
                Some(m(2024, 6)),
                ComponentType::Rent,
            ),
            LedgerLine::credit(
                student_receivable(&alice),
                160.0,
                alice.clone(),
                Some(m(2024, 6)),
                ComponentType::Rent,
            ),
        ],
    )
    .unwrap();
    let entries = vec![
        accrual_entry(1, &alice, m(2024, 6), ComponentType::Rent, 160.0),
        reversal,
    ];
    assert_eq!(lease_state(&entries, &alice), LeaseState::Forfeited);
}
