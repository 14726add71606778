use std::{fs, str::FromStr as _};

use fractic_server_error::ServerError;
use ron::from_str;

use crate::data::models::{amount_model::CashAmountModel, iso_date_model::ISODateModel};
use crate::entities::{payment_id, student, Payment, PaymentComponent};
use crate::errors::{InvalidCsv, InvalidCsvContent, InvalidRon, ReadError};

/// Batch payment import. Columns:
/// payment_id, student_id, date, total_amount, components, created_by, proof_url
/// where `components` is a RON list such as `[Rent(160.0), Admin(20.0)]`.
pub(crate) trait PaymentsCsvDatasource {
    fn from_string(&self, s: &str) -> Result<Vec<Payment>, ServerError>;

    fn from_file<P>(&self, path: P) -> Result<Vec<Payment>, ServerError>
    where
        P: AsRef<std::path::Path>;
}

pub(crate) struct PaymentsCsvDatasourceImpl;

impl PaymentsCsvDatasourceImpl {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl PaymentsCsvDatasource for PaymentsCsvDatasourceImpl {
    fn from_string(&self, s: &str) -> Result<Vec<Payment>, ServerError> {
        csv::Reader::from_reader(s.as_bytes())
            .records()
            .map(|r| {
                r.map_err(|e| InvalidCsv::with_debug(&e)).and_then(|r| {
                    // Extract from CSV record.
                    let raw_payment_id = r.get(0).unwrap_or("");
                    let raw_student_id = r.get(1).unwrap_or("");
                    let raw_date = r.get(2).unwrap_or("");
                    let raw_total = r.get(3).unwrap_or("0");
                    let raw_components = r.get(4).unwrap_or("");
                    let raw_created_by = match r.get(5) {
                        Some(s) if !s.is_empty() => Some(s),
                        _ => None,
                    };
                    let raw_proof_url = match r.get(6) {
                        Some(s) if !s.is_empty() => Some(s),
                        _ => None,
                    };

                    if raw_payment_id.is_empty() || raw_student_id.is_empty() {
                        return Err(InvalidCsvContent::new(
                            "payment_id and student_id are required",
                        ));
                    }

                    // Parse.
                    let date: ISODateModel = ISODateModel::from_str(raw_date)?;
                    let total_amount: CashAmountModel = CashAmountModel::from_str(raw_total)?;
                    let components: Vec<PaymentComponent> = from_str(raw_components)
                        .map_err(|e| InvalidRon::with_debug("PaymentComponent", &e))?;

                    // Build, validating at the boundary.
                    let payment = Payment {
                        id: payment_id(raw_payment_id),
                        student_id: student(raw_student_id),
                        date: date.into(),
                        total_amount: total_amount.into(),
                        components,
                        created_by: raw_created_by.map(Into::into),
                        proof_url: raw_proof_url.map(Into::into),
                    };
                    payment.validate()?;
                    Ok(payment)
                })
            })
            .collect()
    }

    fn from_file<P>(&self, path: P) -> Result<Vec<Payment>, ServerError>
    where
        P: AsRef<std::path::Path>,
    {
        self.from_string(&fs::read_to_string(path).map_err(|e| ReadError::with_debug(&e))?)
    }
}

#[cfg(test)]
mod tests;
