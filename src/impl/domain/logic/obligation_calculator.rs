use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::entities::{
    AccrualReference, Account, BillingMonth, ComponentType, EntrySource, LedgerEntry, Obligation,
    StudentId,
};

use super::utils::{is_zero, outstanding_of, round_cents};

/// Derives what a student still owes, per (month, component), from posted
/// ledger lines as of the cutoff date. Owed is the sum of accrual debits to
/// the student's receivable; paid is the sum of payment and reversal credits
/// against it. Pure read, no side effects.
///
/// Ordering is ascending month, then the fixed component priority, so the
/// allocator's walk is deterministic. Tuples that are settled (within the
/// cash epsilon) are omitted.
pub(crate) fn outstanding(
    entries: &[LedgerEntry],
    student_id: &StudentId,
    as_of: NaiveDate,
) -> Vec<Obligation> {
    let mut grouped: BTreeMap<(BillingMonth, u8), (ComponentType, f64, f64)> = BTreeMap::new();

    for entry in entries.iter().filter(|e| e.is_posted() && e.date <= as_of) {
        for line in receivable_lines_of(entry, student_id) {
            let Some(month) = line.month else {
                // Unapplied credit carries no month; it surfaces in the
                // debtor balance, not in per-month obligations.
                continue;
            };
            let slot = grouped
                .entry((month, line.component.priority()))
                .or_insert((line.component, 0.0, 0.0));
            match entry.source {
                EntrySource::Accrual => slot.1 += line.debit,
                EntrySource::Payment | EntrySource::Reversal | EntrySource::Adjustment => {
                    slot.2 += line.credit
                }
            }
        }
    }

    let obligations: Vec<Obligation> = grouped
        .into_iter()
        .map(|((month, _), (component, owed, paid))| Obligation {
            month,
            component,
            owed: round_cents(owed),
            paid: round_cents(paid),
            outstanding: outstanding_of(owed, paid),
        })
        .filter(|o| !is_zero(o.outstanding))
        .collect();

    tracing::debug!(
        student = %student_id,
        %as_of,
        open = obligations.len(),
        "computed outstanding obligations"
    );
    obligations
}

/// Latest accrued month and its amount for a component. This is the reference
/// rate used to project one future month's obligation when a payment
/// overshoots everything outstanding.
pub(crate) fn accrual_reference(
    entries: &[LedgerEntry],
    student_id: &StudentId,
    component: ComponentType,
) -> Option<AccrualReference> {
    let mut by_month: BTreeMap<BillingMonth, f64> = BTreeMap::new();
    for entry in entries
        .iter()
        .filter(|e| e.is_posted() && e.source == EntrySource::Accrual)
    {
        for line in receivable_lines_of(entry, student_id) {
            if line.component != component {
                continue;
            }
            if let Some(month) = line.month {
                *by_month.entry(month).or_insert(0.0) += line.debit;
            }
        }
    }
    by_month
        .into_iter()
        .last()
        .map(|(latest_month, amount)| AccrualReference {
            latest_month,
            monthly_amount: round_cents(amount),
        })
}

/// Latest month referenced by ANY posted receivable line for the component,
/// accrued or merely credited. Successive advance payments therefore roll
/// forward month by month instead of stacking on the same placeholder.
pub(crate) fn latest_referenced_month(
    entries: &[LedgerEntry],
    student_id: &StudentId,
    component: ComponentType,
) -> Option<BillingMonth> {
    entries
        .iter()
        .filter(|e| e.is_posted())
        .flat_map(|e| receivable_lines_of(e, student_id))
        .filter(|l| l.component == component)
        .filter_map(|l| l.month)
        .max()
}

fn receivable_lines_of<'a>(
    entry: &'a LedgerEntry,
    student_id: &'a StudentId,
) -> impl Iterator<Item = &'a crate::entities::LedgerLine> {
    entry
        .lines
        .iter()
        .filter(move |l| matches!(l.account, Account::Receivable(_)) && l.student_id == *student_id)
}

#[cfg(test)]
mod tests;
