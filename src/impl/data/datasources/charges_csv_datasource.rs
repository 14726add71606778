use std::{fs, str::FromStr as _};

use fractic_server_error::ServerError;
use ron::from_str;

use crate::data::models::{amount_model::CashAmountModel, billing_month_model::BillingMonthModel};
use crate::entities::{student, AccrualCharge, ComponentType};
use crate::errors::{InvalidCsv, InvalidCsvContent, InvalidRon, ReadError};

/// Monthly billing schedule import, used to drive accruals. Columns:
/// student_id, month, component, amount, description
/// where `component` is a RON value such as `Rent`.
pub(crate) trait ChargesCsvDatasource {
    fn from_string(&self, s: &str) -> Result<Vec<AccrualCharge>, ServerError>;

    fn from_file<P>(&self, path: P) -> Result<Vec<AccrualCharge>, ServerError>
    where
        P: AsRef<std::path::Path>;
}

pub(crate) struct ChargesCsvDatasourceImpl;

impl ChargesCsvDatasourceImpl {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl ChargesCsvDatasource for ChargesCsvDatasourceImpl {
    fn from_string(&self, s: &str) -> Result<Vec<AccrualCharge>, ServerError> {
        csv::Reader::from_reader(s.as_bytes())
            .records()
            .map(|r| {
                r.map_err(|e| InvalidCsv::with_debug(&e)).and_then(|r| {
                    let raw_student_id = r.get(0).unwrap_or("");
                    let raw_month = r.get(1).unwrap_or("");
                    let raw_component = r.get(2).unwrap_or("");
                    let raw_amount = r.get(3).unwrap_or("0");
                    let raw_description = r.get(4).unwrap_or("");

                    if raw_student_id.is_empty() {
                        return Err(InvalidCsvContent::new("student_id is required"));
                    }

                    let month: BillingMonthModel = BillingMonthModel::from_str(raw_month)?;
                    let component: ComponentType = from_str(raw_component)
                        .map_err(|e| InvalidRon::with_debug("ComponentType", &e))?;
                    let amount: CashAmountModel = CashAmountModel::from_str(raw_amount)?;

                    let charge = AccrualCharge {
                        student_id: student(raw_student_id),
                        month: month.into(),
                        component,
                        amount: amount.into(),
                        description: if raw_description.is_empty() {
                            format!("Monthly billing: {component} {raw_month}")
                        } else {
                            raw_description.to_string()
                        },
                    };
                    charge.validate()?;
                    Ok(charge)
                })
            })
            .collect()
    }

    fn from_file<P>(&self, path: P) -> Result<Vec<AccrualCharge>, ServerError>
    where
        P: AsRef<std::path::Path>,
    {
        self.from_string(&fs::read_to_string(path).map_err(|e| ReadError::with_debug(&e))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::BillingMonth;

    const HEADER: &str = "student_id,month,component,amount,description\n";

    #[test]
    fn parses_a_billing_schedule() {
        let csv = format!(
            "{HEADER}alice,2024-06,Rent,160.00,June rent\nalice,2024-06,Deposit,220.00,\n"
        );
        let charges = ChargesCsvDatasourceImpl::new().from_string(&csv).unwrap();
        assert_eq!(charges.len(), 2);
        assert_eq!(charges[0].month, BillingMonth::new(2024, 6));
        assert_eq!(charges[0].component, ComponentType::Rent);
        assert_eq!(charges[0].description, "June rent");
        // Description defaults when the cell is empty.
        assert_eq!(charges[1].description, "Monthly billing: deposit 2024-06");
    }

    #[test]
    fn bad_month_is_rejected() {
        let csv = format!("{HEADER}alice,2024-13,Rent,160.00,\n");
        assert!(ChargesCsvDatasourceImpl::new().from_string(&csv).is_err());
    }

    #[test]
    fn zero_amount_charge_is_rejected() {
        let csv = format!("{HEADER}alice,2024-06,Rent,0,\n");
        assert!(ChargesCsvDatasourceImpl::new().from_string(&csv).is_err());
    }
}
