use super::*;
use crate::domain::logic::debtor_rollup::recompute;
use crate::domain::logic::testkit::{accrual_entry, d, m, payment_entry, s};
use crate::entities::ComponentType;

#[test]
fn journal_has_all_three_sections_in_date_order() {
    let alice = s("alice");
    let entries = vec![
        payment_entry(
            2,
            &alice,
            d(2024, 6, 10),
            Some(m(2024, 6)),
            ComponentType::Rent,
            100.0,
        ),
        accrual_entry(1, &alice, m(2024, 6), ComponentType::Rent, 160.0),
    ];
    let aggregates = vec![recompute(&entries, &alice)];

    let journal = JournalPrinter::new().print_journal(&entries, &aggregates);

    assert!(journal.contains("; --- Accounts"));
    assert!(journal.contains("; --- Transactions"));
    assert!(journal.contains("; --- Debtor balances"));

    // Declarations cover every account touched.
    assert!(journal.contains("account Assets:AR:alice"));
    assert!(journal.contains("account Assets:Cash:BANK"));
    assert!(journal.contains("account Income:RENT-INC"));

    // The accrual (June 1) prints before the payment (June 10).
    let accrual_at = journal.find("(txn-000001)").unwrap();
    let payment_at = journal.find("(txn-000002)").unwrap();
    assert!(accrual_at < payment_at);

    // Credits are negative in the journal.
    assert!(journal.contains("-160.00"));
    // Rollup comment line.
    assert!(journal.contains("; alice: owed 160.00, paid 100.00, balance 60.00"));
    assert!(journal.contains("partial"));
}

#[test]
fn source_reference_is_printed_as_a_note() {
    let alice = s("alice");
    let entries = vec![accrual_entry(1, &alice, m(2024, 6), ComponentType::Rent, 160.0)];
    let journal = JournalPrinter::new().print_journal(&entries, &[]);
    assert!(journal.contains("; source: accrual | ref: accrual-2024-06"));
}
