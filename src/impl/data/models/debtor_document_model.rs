use std::str::FromStr;

use fractic_server_error::ServerError;
use serde_derive::{Deserialize, Serialize};

use crate::entities::{
    student, ComponentType, DebtorAggregate, MonthStatus, MonthlyPosition,
};
use crate::errors::CorruptStoredEntry;

use super::billing_month_model::BillingMonthModel;

/// Stored shape of the per-student rollup, keyed by studentId and rewritten
/// wholesale on every recompute.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DebtorDocumentModel {
    pub student_id: String,
    pub total_owed: f64,
    pub total_paid: f64,
    pub current_balance: f64,
    pub monthly_breakdown: Vec<MonthlyPositionModel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MonthlyPositionModel {
    pub month: String,
    pub component_type: String,
    pub owed: f64,
    pub paid: f64,
    pub outstanding: f64,
    pub status: String,
}

impl DebtorDocumentModel {
    pub(crate) fn from_domain(aggregate: &DebtorAggregate) -> Self {
        Self {
            student_id: aggregate.student_id.to_string(),
            total_owed: aggregate.total_owed,
            total_paid: aggregate.total_paid,
            current_balance: aggregate.current_balance,
            monthly_breakdown: aggregate
                .monthly_breakdown
                .iter()
                .map(|position| MonthlyPositionModel {
                    month: position.month.to_string(),
                    component_type: position.component.to_string(),
                    owed: position.owed,
                    paid: position.paid,
                    outstanding: position.outstanding,
                    status: position.status.to_string(),
                })
                .collect(),
        }
    }

    pub(crate) fn to_domain(&self) -> Result<DebtorAggregate, ServerError> {
        let monthly_breakdown = self
            .monthly_breakdown
            .iter()
            .map(|position| {
                Ok(MonthlyPosition {
                    month: BillingMonthModel::from_str(&position.month)?.into(),
                    component: parse_component(&self.student_id, &position.component_type)?,
                    owed: position.owed,
                    paid: position.paid,
                    outstanding: position.outstanding,
                    status: parse_status(&self.student_id, &position.status)?,
                })
            })
            .collect::<Result<Vec<MonthlyPosition>, ServerError>>()?;
        Ok(DebtorAggregate {
            student_id: student(self.student_id.clone()),
            total_owed: self.total_owed,
            total_paid: self.total_paid,
            current_balance: self.current_balance,
            monthly_breakdown,
        })
    }
}

fn parse_component(student_id: &str, component: &str) -> Result<ComponentType, ServerError> {
    match component {
        "rent" => Ok(ComponentType::Rent),
        "admin" => Ok(ComponentType::Admin),
        "deposit" => Ok(ComponentType::Deposit),
        "other" => Ok(ComponentType::Other),
        other => Err(CorruptStoredEntry::new(
            student_id,
            &format!("unknown component type '{other}' in debtor document"),
        )),
    }
}

fn parse_status(student_id: &str, status: &str) -> Result<MonthStatus, ServerError> {
    match status {
        "paid" => Ok(MonthStatus::Paid),
        "partial" => Ok(MonthStatus::Partial),
        "outstanding" => Ok(MonthStatus::Outstanding),
        "advance" => Ok(MonthStatus::Advance),
        other => Err(CorruptStoredEntry::new(
            student_id,
            &format!("unknown month status '{other}' in debtor document"),
        )),
    }
}
