use crate::entities::{
    AllocationLine, AllocationPlan, AllocationType, LedgerEntry, Obligation, Payment,
};

use super::{
    obligation_calculator::{accrual_reference, latest_referenced_month, outstanding},
    utils::{is_zero, outstanding_of, round_cents},
};

/// Smart FIFO allocation: walks a component's outstanding obligations oldest
/// month first and settles each in turn until the component amount runs out.
/// Chronological priority is structural — a later month can only be reached
/// once every earlier month of the same component is settled.
///
/// Components are independent: an admin-fee amount never settles a rent
/// obligation. Whatever survives the walk becomes, in order, one advance
/// line for the next unreferenced future month (recurring components only,
/// capped at the latest accrued monthly amount) and then an explicit
/// unapplied-credit line. The plan always sums to the payment's component
/// total.
pub(crate) fn allocate(payment: &Payment, entries: &[LedgerEntry]) -> AllocationPlan {
    let open = outstanding(entries, &payment.student_id, payment.date);
    let mut plan = AllocationPlan::default();

    for component_slice in &payment.components {
        let component = component_slice.component_type();
        let mut remaining = round_cents(component_slice.amount());
        if is_zero(remaining) {
            // Zero-amount component: skip, no entry is ever written for it.
            continue;
        }

        for obligation in open.iter().filter(|o| o.component == component) {
            if is_zero(remaining) {
                break;
            }
            let allocated = round_cents(remaining.min(obligation.outstanding));
            remaining = round_cents(remaining - allocated);
            plan.lines.push(settlement_line(obligation, allocated));
            tracing::debug!(
                payment = %payment.id,
                %component,
                month = %obligation.month,
                allocated,
                remaining,
                "settled obligation"
            );
        }

        if is_zero(remaining) {
            continue;
        }

        // Money left over after every known obligation for this component is
        // settled. Project at most one future month for recurring components.
        if component.is_recurring() {
            if let Some(reference) = accrual_reference(entries, &payment.student_id, component) {
                let advance_month = latest_referenced_month(entries, &payment.student_id, component)
                    .map(|m| m.next())
                    .unwrap_or_else(|| reference.latest_month.next());
                let advance = round_cents(remaining.min(reference.monthly_amount));
                if !is_zero(advance) {
                    remaining = round_cents(remaining - advance);
                    plan.lines.push(AllocationLine {
                        month: Some(advance_month),
                        component,
                        amount_allocated: advance,
                        original_outstanding: 0.0,
                        new_outstanding: 0.0,
                        allocation_type: AllocationType::AdvancePayment,
                    });
                    tracing::debug!(
                        payment = %payment.id,
                        %component,
                        month = %advance_month,
                        advance,
                        "projected advance payment"
                    );
                }
            }
        }

        if !is_zero(remaining) {
            // Exceeds all known and projected obligations: keep it visible as
            // credit against the student's receivable rather than dropping it.
            plan.lines.push(AllocationLine {
                month: None,
                component,
                amount_allocated: remaining,
                original_outstanding: 0.0,
                new_outstanding: 0.0,
                allocation_type: AllocationType::UnappliedCredit,
            });
            tracing::debug!(
                payment = %payment.id,
                %component,
                unapplied = remaining,
                "recorded unapplied credit"
            );
        }
    }

    plan
}

fn settlement_line(obligation: &Obligation, allocated: f64) -> AllocationLine {
    AllocationLine {
        month: Some(obligation.month),
        component: obligation.component,
        amount_allocated: allocated,
        original_outstanding: obligation.outstanding,
        new_outstanding: outstanding_of(obligation.outstanding, allocated),
        allocation_type: AllocationType::Settlement,
    }
}
