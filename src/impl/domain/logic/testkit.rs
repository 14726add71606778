//! Builders shared by the logic test modules.

use chrono::NaiveDate;

use crate::entities::{
    student, BillingMonth, ComponentType, EntryId, EntrySource, LedgerEntry, LedgerLine, Payment,
    PaymentComponent, PaymentId, StudentId,
};
use crate::impl_ext::standard_accounts::{accrual_credit_account, student_receivable, CASH_BANK};

pub(crate) fn d(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub(crate) fn m(year: i32, month: u32) -> BillingMonth {
    BillingMonth::new(year, month)
}

pub(crate) fn s(id: &str) -> StudentId {
    student(id)
}

pub(crate) fn accrual_entry(
    id: u64,
    student: &StudentId,
    month: BillingMonth,
    component: ComponentType,
    amount: f64,
) -> LedgerEntry {
    LedgerEntry::balanced(
        EntryId(id),
        month.first_day(),
        format!("Accrual: {component} {month}"),
        EntrySource::Accrual,
        format!("accrual-{month}"),
        vec![
            LedgerLine::debit(
                student_receivable(student),
                amount,
                student.clone(),
                Some(month),
                component,
            ),
            LedgerLine::credit(
                accrual_credit_account(component),
                amount,
                student.clone(),
                Some(month),
                component,
            ),
        ],
    )
    .unwrap()
}

pub(crate) fn payment_entry(
    id: u64,
    student: &StudentId,
    date: NaiveDate,
    month: Option<BillingMonth>,
    component: ComponentType,
    amount: f64,
) -> LedgerEntry {
    LedgerEntry::balanced(
        EntryId(id),
        date,
        format!("Payment allocation ({component})"),
        EntrySource::Payment,
        "pay-test",
        vec![
            LedgerLine::debit(CASH_BANK.clone(), amount, student.clone(), month, component),
            LedgerLine::credit(
                student_receivable(student),
                amount,
                student.clone(),
                month,
                component,
            ),
        ],
    )
    .unwrap()
}

pub(crate) fn payment(
    id: &str,
    student: &StudentId,
    date: NaiveDate,
    components: Vec<PaymentComponent>,
) -> Payment {
    let total_amount = components.iter().map(|c| c.amount()).sum();
    Payment {
        id: PaymentId(id.to_string()),
        student_id: student.clone(),
        date,
        total_amount,
        components,
        created_by: None,
        proof_url: None,
    }
}
