use serde_derive::{Deserialize, Serialize};

use crate::entities::{Payment, PaymentComponent, PaymentStatus};

/// Stored shape of a payment document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaymentDocumentModel {
    pub payment_id: String,
    pub student_id: String,
    /// ISO date (YYYY-MM-DD).
    pub date: String,
    pub total_amount: f64,
    pub components: Vec<PaymentComponent>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_url: Option<String>,
}

impl PaymentDocumentModel {
    pub(crate) fn from_domain(payment: &Payment, status: PaymentStatus) -> Self {
        Self {
            payment_id: payment.id.to_string(),
            student_id: payment.student_id.to_string(),
            date: payment.date.format("%Y-%m-%d").to_string(),
            total_amount: payment.total_amount,
            components: payment.components.clone(),
            status: status.to_string(),
            created_by: payment.created_by.clone(),
            proof_url: payment.proof_url.clone(),
        }
    }
}
