use super::*;
use crate::entities::ComponentType;

const HEADER: &str = "payment_id,student_id,date,total_amount,components,created_by,proof_url\n";

#[test]
fn parses_a_multi_component_payment() {
    let csv = format!(
        "{HEADER}p1,alice,2024-06-05,460.00,\"[Rent(220.0), Admin(20.0), Deposit(220.0)]\",admin@site,https://files/pop.pdf\n"
    );
    let payments = PaymentsCsvDatasourceImpl::new().from_string(&csv).unwrap();
    assert_eq!(payments.len(), 1);
    let payment = &payments[0];
    assert_eq!(payment.id.as_str(), "p1");
    assert_eq!(payment.total_amount, 460.0);
    assert_eq!(payment.components.len(), 3);
    assert_eq!(
        payment.components[0].component_type(),
        ComponentType::Rent
    );
    assert_eq!(payment.created_by.as_deref(), Some("admin@site"));
}

#[test]
fn optional_columns_may_be_absent() {
    let csv = format!("{HEADER}p2,bob,2024-06-05,160.00,[Rent(160.0)],,\n");
    let payments = PaymentsCsvDatasourceImpl::new().from_string(&csv).unwrap();
    assert_eq!(payments[0].created_by, None);
    assert_eq!(payments[0].proof_url, None);
}

#[test]
fn total_mismatch_is_rejected_at_the_boundary() {
    let csv = format!("{HEADER}p3,bob,2024-06-05,999.00,[Rent(160.0)],,\n");
    assert!(PaymentsCsvDatasourceImpl::new().from_string(&csv).is_err());
}

#[test]
fn malformed_components_cell_is_rejected() {
    let csv = format!("{HEADER}p4,bob,2024-06-05,160.00,[Rent(]),,\n");
    assert!(PaymentsCsvDatasourceImpl::new().from_string(&csv).is_err());
}

#[test]
fn missing_ids_are_rejected() {
    let csv = format!("{HEADER},bob,2024-06-05,160.00,[Rent(160.0)],,\n");
    assert!(PaymentsCsvDatasourceImpl::new().from_string(&csv).is_err());
}
