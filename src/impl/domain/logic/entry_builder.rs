use fractic_server_error::ServerError;

use crate::entities::{
    AllocationPlan, AllocationType, EntryId, EntrySource, LedgerEntry, LedgerLine, Payment,
};
use crate::impl_ext::standard_accounts::{student_receivable, CASH_BANK};

/// Turns each allocation-plan line into one balanced ledger entry: a debit to
/// cash and a matching credit to the student's scoped receivable, tagged with
/// the line's month and component type.
///
/// Entries come back with placeholder ids; the store assigns final ids under
/// its write lock when the batch is appended, so two racing posts can never
/// mint the same id.
pub(crate) fn build_payment_entries(
    plan: &AllocationPlan,
    payment: &Payment,
) -> Result<Vec<LedgerEntry>, ServerError> {
    plan.lines
        .iter()
        .map(|line| {
            let description = match (line.allocation_type, line.month) {
                (AllocationType::Settlement, Some(month)) => {
                    format!("Payment {}: {} {}", payment.id, line.component, month)
                }
                (AllocationType::AdvancePayment, Some(month)) => {
                    format!("Payment {}: advance {} {}", payment.id, line.component, month)
                }
                _ => format!("Payment {}: unapplied credit ({})", payment.id, line.component),
            };
            LedgerEntry::balanced(
                EntryId(0),
                payment.date,
                description,
                EntrySource::Payment,
                payment.id.as_str(),
                vec![
                    LedgerLine::debit(
                        CASH_BANK.clone(),
                        line.amount_allocated,
                        payment.student_id.clone(),
                        line.month,
                        line.component,
                    ),
                    LedgerLine::credit(
                        student_receivable(&payment.student_id),
                        line.amount_allocated,
                        payment.student_id.clone(),
                        line.month,
                        line.component,
                    ),
                ],
            )
        })
        .collect()
}

#[cfg(test)]
mod tests;
