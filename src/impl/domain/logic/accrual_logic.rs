use chrono::NaiveDate;
use fractic_server_error::ServerError;

use crate::entities::{
    Account, AccrualCharge, BillingMonth, ComponentType, EntryId, EntrySource, LedgerEntry,
    LedgerLine, StudentId,
};
use crate::impl_ext::standard_accounts::{accrual_credit_account, student_receivable};

use super::{obligation_calculator::outstanding, utils::round_cents};

/// True when an accrual already exists for the (student, month, component)
/// tuple. Accrual is idempotent: re-invoking for an accrued month is a no-op.
pub(crate) fn already_accrued(
    entries: &[LedgerEntry],
    student_id: &StudentId,
    month: BillingMonth,
    component: ComponentType,
) -> bool {
    entries
        .iter()
        .filter(|e| e.is_posted() && e.source == EntrySource::Accrual)
        .flat_map(|e| e.lines.iter())
        .any(|l| {
            matches!(l.account, Account::Receivable(_))
                && l.student_id == *student_id
                && l.month == Some(month)
                && l.component == component
        })
}

/// Builds the monthly obligation entries: debit the student's receivable,
/// credit rental/admin income or the deposit liability. Charges whose tuple
/// is already accrued are skipped.
pub(crate) fn build_accrual_entries(
    charges: &[AccrualCharge],
    existing: &[LedgerEntry],
) -> Result<Vec<LedgerEntry>, ServerError> {
    let mut entries = Vec::new();
    for charge in charges {
        charge.validate()?;
        if already_accrued(existing, &charge.student_id, charge.month, charge.component) {
            tracing::debug!(
                student = %charge.student_id,
                month = %charge.month,
                component = %charge.component,
                "already accrued, skipping"
            );
            continue;
        }
        let amount = round_cents(charge.amount);
        entries.push(LedgerEntry::balanced(
            EntryId(0),
            charge.month.first_day(),
            charge.description.clone(),
            EntrySource::Accrual,
            format!("accrual-{}-{}", charge.month, charge.component),
            vec![
                LedgerLine::debit(
                    student_receivable(&charge.student_id),
                    amount,
                    charge.student_id.clone(),
                    Some(charge.month),
                    charge.component,
                ),
                LedgerLine::credit(
                    accrual_credit_account(charge.component),
                    amount,
                    charge.student_id.clone(),
                    Some(charge.month),
                    charge.component,
                ),
            ],
        )?);
    }
    Ok(entries)
}

/// Builds the forfeiture reversal set: for every unsettled accrual up to and
/// including `as_of_month`, an offsetting entry bringing outstanding to zero.
/// Batched per component type so each reversal is independently auditable.
///
/// Deposit reversals debit the deposit liability — forfeited deposits reduce
/// a liability, they are not revenue. An empty result is a legitimate
/// success: a student who was never invoiced has nothing to reverse.
pub(crate) fn build_reversal_entries(
    entries: &[LedgerEntry],
    student_id: &StudentId,
    as_of_month: BillingMonth,
    reversal_date: NaiveDate,
) -> Result<Vec<LedgerEntry>, ServerError> {
    let open: Vec<_> = outstanding(entries, student_id, reversal_date)
        .into_iter()
        .filter(|o| o.month <= as_of_month)
        .collect();

    let mut reversals = Vec::new();
    for component in ComponentType::all() {
        let component_open: Vec<_> = open.iter().filter(|o| o.component == component).collect();
        if component_open.is_empty() {
            continue;
        }

        let mut lines = Vec::new();
        for obligation in &component_open {
            let amount = round_cents(obligation.outstanding);
            lines.push(LedgerLine::debit(
                accrual_credit_account(component),
                amount,
                student_id.clone(),
                Some(obligation.month),
                component,
            ));
            lines.push(LedgerLine::credit(
                student_receivable(student_id),
                amount,
                student_id.clone(),
                Some(obligation.month),
                component,
            ));
        }

        let originals = original_accrual_ids(entries, student_id, component, as_of_month);
        reversals.push(LedgerEntry::balanced(
            EntryId(0),
            reversal_date,
            format!(
                "Forfeiture reversal: {} ({}, through {})",
                component, student_id, as_of_month
            ),
            EntrySource::Reversal,
            originals,
            lines,
        )?);
    }
    Ok(reversals)
}

/// Ids of the accrual entries being offset, joined for the source reference.
fn original_accrual_ids(
    entries: &[LedgerEntry],
    student_id: &StudentId,
    component: ComponentType,
    as_of_month: BillingMonth,
) -> String {
    let mut ids: Vec<String> = entries
        .iter()
        .filter(|e| e.is_posted() && e.source == EntrySource::Accrual)
        .filter(|e| {
            e.lines.iter().any(|l| {
                matches!(l.account, Account::Receivable(_))
                    && l.student_id == *student_id
                    && l.component == component
                    && l.month.is_some_and(|m| m <= as_of_month)
            })
        })
        .map(|e| e.id.to_string())
        .collect();
    ids.dedup();
    ids.join(",")
}
