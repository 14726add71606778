use std::collections::BTreeMap;

use crate::entities::{
    Account, BillingMonth, ComponentType, DebtorAggregate, EntrySource, LeaseState, LedgerEntry,
    MonthStatus, MonthlyPosition, StudentId,
};

use super::utils::{is_zero, outstanding_of, round_cents};

/// Recomputes the per-student rollup from posted ledger lines. This is the
/// only way a DebtorAggregate comes into existence: the stored copy is a
/// cache of this function's output and is rewritten wholesale, so the rollup
/// can always be reproduced from the ledger alone.
pub(crate) fn recompute(entries: &[LedgerEntry], student_id: &StudentId) -> DebtorAggregate {
    let mut monthly: BTreeMap<(BillingMonth, u8), (ComponentType, f64, f64)> = BTreeMap::new();
    let mut unapplied_credit = 0.0;

    for entry in entries.iter().filter(|e| e.is_posted()) {
        for line in entry.lines.iter().filter(|l| {
            matches!(l.account, Account::Receivable(_)) && l.student_id == *student_id
        }) {
            let Some(month) = line.month else {
                unapplied_credit += line.credit - line.debit;
                continue;
            };
            let slot = monthly
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

    let monthly_breakdown: Vec<MonthlyPosition> = monthly
        .into_iter()
        .map(|((month, _), (component, owed, paid))| {
            let owed = round_cents(owed);
            let paid = round_cents(paid);
            let outstanding = outstanding_of(owed, paid);
            MonthlyPosition {
                month,
                component,
                owed,
                paid,
                outstanding,
                status: month_status(owed, paid, outstanding),
            }
        })
        .collect();

    let total_owed = round_cents(monthly_breakdown.iter().map(|p| p.owed).sum());
    let total_paid = round_cents(
        monthly_breakdown.iter().map(|p| p.paid).sum::<f64>() + unapplied_credit,
    );

    DebtorAggregate {
        student_id: student_id.clone(),
        total_owed,
        total_paid,
        current_balance: round_cents(total_owed - total_paid),
        monthly_breakdown,
    }
}

fn month_status(owed: f64, paid: f64, outstanding: f64) -> MonthStatus {
    if is_zero(owed) {
        MonthStatus::Advance
    } else if is_zero(outstanding) {
        MonthStatus::Paid
    } else if is_zero(paid) {
        MonthStatus::Outstanding
    } else {
        MonthStatus::Partial
    }
}

/// Settlement lifecycle derived from the same lines as the rollup. Forfeiture
/// (any reversal entry) is terminal.
pub(crate) fn lease_state(entries: &[LedgerEntry], student_id: &StudentId) -> LeaseState {
    let touches_student = |e: &LedgerEntry| e.lines.iter().any(|l| l.student_id == *student_id);

    if entries
        .iter()
        .any(|e| e.is_posted() && e.source == EntrySource::Reversal && touches_student(e))
    {
        return LeaseState::Forfeited;
    }
    if !entries
        .iter()
        .any(|e| e.is_posted() && e.source == EntrySource::Accrual && touches_student(e))
    {
        return LeaseState::NotAccrued;
    }

    let aggregate = recompute(entries, student_id);
    let all_settled = aggregate
        .monthly_breakdown
        .iter()
        .all(|p| is_zero(p.outstanding));
    if all_settled {
        LeaseState::Settled
    } else if aggregate.monthly_breakdown.iter().any(|p| !is_zero(p.paid)) {
        LeaseState::PartiallySettled
    } else {
        LeaseState::Accrued
    }
}

#[cfg(test)]
mod tests;
