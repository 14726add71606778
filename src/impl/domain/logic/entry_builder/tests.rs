use super::*;
use crate::domain::logic::testkit::{d, m, payment, s};
use crate::entities::{Account, AllocationLine, ComponentType, PaymentComponent};

fn plan_of(lines: Vec<AllocationLine>) -> AllocationPlan {
    AllocationPlan { lines }
}

#[test]
fn one_balanced_entry_per_plan_line() {
    let alice = s("alice");
    let pay = payment(
        "p1",
        &alice,
        d(2024, 6, 5),
        vec![PaymentComponent::Rent(160.0), PaymentComponent::Admin(20.0)],
    );
    let plan = plan_of(vec![
        AllocationLine {
            month: Some(m(2024, 6)),
            component: ComponentType::Rent,
            amount_allocated: 160.0,
            original_outstanding: 160.0,
            new_outstanding: 0.0,
            allocation_type: AllocationType::Settlement,
        },
        AllocationLine {
            month: Some(m(2024, 6)),
            component: ComponentType::Admin,
            amount_allocated: 20.0,
            original_outstanding: 20.0,
            new_outstanding: 0.0,
            allocation_type: AllocationType::Settlement,
        },
    ]);

    let entries = build_payment_entries(&plan, &pay).unwrap();
    assert_eq!(entries.len(), 2);
    for entry in &entries {
        assert_eq!(entry.lines.len(), 2);
        assert!((entry.total_debit() - entry.total_credit()).abs() < 1e-9);
        assert_eq!(entry.source, EntrySource::Payment);
        assert_eq!(entry.source_ref, "p1");
        assert!(matches!(entry.lines[0].account, Account::Cash(_)));
        assert!(matches!(entry.lines[1].account, Account::Receivable(_)));
    }
    assert_eq!(entries[0].total_debit(), 160.0);
    assert_eq!(entries[1].total_debit(), 20.0);
}

#[test]
fn receivable_is_scoped_to_the_student() {
    let alice = s("alice");
    let pay = payment(
        "p9",
        &alice,
        d(2024, 6, 5),
        vec![PaymentComponent::Rent(50.0)],
    );
    let plan = plan_of(vec![AllocationLine {
        month: Some(m(2024, 6)),
        component: ComponentType::Rent,
        amount_allocated: 50.0,
        original_outstanding: 160.0,
        new_outstanding: 110.0,
        allocation_type: AllocationType::Settlement,
    }]);

    let entries = build_payment_entries(&plan, &pay).unwrap();
    assert_eq!(entries[0].lines[1].account.code(), "AR:alice");
    assert_eq!(entries[0].lines[1].student_id, alice);
}

#[test]
fn unapplied_credit_entry_carries_no_month() {
    let alice = s("alice");
    let pay = payment(
        "p2",
        &alice,
        d(2024, 6, 5),
        vec![PaymentComponent::Deposit(80.0)],
    );
    let plan = plan_of(vec![AllocationLine {
        month: None,
        component: ComponentType::Deposit,
        amount_allocated: 80.0,
        original_outstanding: 0.0,
        new_outstanding: 0.0,
        allocation_type: AllocationType::UnappliedCredit,
    }]);

    let entries = build_payment_entries(&plan, &pay).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].lines[0].month, None);
    assert!(entries[0].description.contains("unapplied credit"));
}
